// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> miette::Result<()> {
	use ticket_desk::config::parse_config;
	use ticket_desk::logging::init_logging;
	use ticket_desk::web::server::run_server;

	let config_path = std::env::args().nth(1).unwrap_or_else(|| String::from("config.kdl"));
	let config = parse_config(&config_path).await?;
	init_logging(&config.log)?;

	run_server(&config).await
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
	// The client is started through `hydrate` in the library; only the server build has a binary.
}
