// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use kdl::{KdlDocument, KdlNode};
use miette::{IntoDiagnostic, Result, bail, miette};
use tokio::fs::read_to_string;

pub const DEFAULT_LOG_FILTER: &str = "info";

pub async fn parse_config(config_path: &str) -> Result<ConfigData> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	parse_config_str(&config_file_contents)
}

pub fn parse_config_str(contents: &str) -> Result<ConfigData> {
	let document: KdlDocument = contents.parse()?;

	let web_node = document
		.get("web")
		.ok_or_else(|| miette!("Config is missing the `web` block"))?;
	let bind_addr = string_setting(web_node, "bind_addr")?
		.ok_or_else(|| miette!("Config is missing `web.bind_addr`"))?;

	let log = match document.get("log") {
		Some(log_node) => LogConfig {
			filter: string_setting(log_node, "filter")?.unwrap_or_else(|| String::from(DEFAULT_LOG_FILTER)),
			json: bool_setting(log_node, "json")?.unwrap_or(false),
		},
		None => LogConfig::default(),
	};

	Ok(ConfigData {
		web: WebConfig { bind_addr },
		log,
	})
}

fn string_setting(block: &KdlNode, name: &str) -> Result<Option<String>> {
	let Some(value) = block.children().and_then(|children| children.get_arg(name)) else {
		return Ok(None);
	};
	match value.as_string() {
		Some(value) => Ok(Some(value.to_string())),
		None => bail!("`{}.{}` must be a string", block.name().value(), name),
	}
}

fn bool_setting(block: &KdlNode, name: &str) -> Result<Option<bool>> {
	let Some(value) = block.children().and_then(|children| children.get_arg(name)) else {
		return Ok(None);
	};
	match value.as_bool() {
		Some(value) => Ok(Some(value)),
		None => bail!("`{}.{}` must be #true or #false", block.name().value(), name),
	}
}

#[derive(Debug)]
pub struct ConfigData {
	pub web: WebConfig,
	pub log: LogConfig,
}

#[derive(Debug)]
pub struct WebConfig {
	/// Address the web server listens on, like `127.0.0.1:3000`
	pub bind_addr: String,
}

#[derive(Debug)]
pub struct LogConfig {
	/// Default `tracing` filter directives; `RUST_LOG` takes precedence when set.
	pub filter: String,
	/// Whether to write logs as JSON rather than human-readable text
	pub json: bool,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			filter: String::from(DEFAULT_LOG_FILTER),
			json: false,
		}
	}
}
