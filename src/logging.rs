// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::LogConfig;
use miette::IntoDiagnostic;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber for the server.
pub fn init_logging(config: &LogConfig) -> miette::Result<()> {
	let env_filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(&config.filter).into_diagnostic()?,
	};

	if config.json {
		tracing_subscriber::registry()
			.with(env_filter)
			.with(fmt::layer().json().with_current_span(true))
			.try_init()
			.into_diagnostic()?;
	} else {
		tracing_subscriber::registry()
			.with(env_filter)
			.with(fmt::layer().with_target(true))
			.try_init()
			.into_diagnostic()?;
	}

	Ok(())
}
