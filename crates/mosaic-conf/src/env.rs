//! `MOSAIC_*` environment overrides

use std::collections::HashMap;

use crate::{JsonApiSettings, SettingsError};

/// Prefix of every environment variable read by the settings loader
pub const ENV_PREFIX: &str = "MOSAIC_";

/// Snapshot of the `MOSAIC_*` variables, keyed by lowercase setting name
#[derive(Debug, Clone, Default)]
pub(crate) struct EnvOverrides {
	values: HashMap<String, String>,
}

impl EnvOverrides {
	pub(crate) fn from_process() -> Self {
		Self::from_vars(std::env::vars())
	}

	pub(crate) fn from_vars<I>(vars: I) -> Self
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let values = vars
			.into_iter()
			.filter_map(|(key, value)| {
				key.strip_prefix(ENV_PREFIX)
					.map(|name| (name.to_lowercase(), value))
			})
			.collect();
		Self { values }
	}

	pub(crate) fn apply(&self, settings: &mut JsonApiSettings) -> Result<(), SettingsError> {
		for (key, value) in &self.values {
			match key.as_str() {
				"url_prefix" => settings.url_prefix = value.clone(),
				"default_page_size" => settings.default_page_size = parse_usize(key, value)?,
				"page_size_limit" => settings.page_size_limit = parse_usize(key, value)?,
				"include_by_default" => settings.include_by_default = parse_bool(key, value)?,
				"member_case" => settings.member_case = value.parse()?,
				"help_link" if value.trim().is_empty() => settings.help_link = None,
				"help_link" => settings.help_link = Some(value.clone()),
				_ => {
					tracing::warn!(setting = %key, "Ignoring unknown {}* variable", ENV_PREFIX);
					continue;
				}
			}
			tracing::debug!(setting = %key, "Applied environment override");
		}
		Ok(())
	}
}

fn parse_usize(key: &str, value: &str) -> Result<usize, SettingsError> {
	value
		.trim()
		.parse()
		.map_err(|_| SettingsError::InvalidValue {
			key: key.to_string(),
			message: format!("'{}' is not a non-negative integer", value),
		})
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(SettingsError::InvalidValue {
			key: key.to_string(),
			message: format!("'{}' is not a boolean", value),
		}),
	}
}
