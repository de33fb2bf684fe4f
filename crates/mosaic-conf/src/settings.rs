//! Engine settings

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::SettingsError;
use crate::env::EnvOverrides;

/// Casing applied to attribute and relationship member names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberCase {
	/// Names are emitted exactly as declared
	#[default]
	AsDeclared,
	/// `first-name`
	Kebab,
	/// `firstName`
	Camel,
}

impl MemberCase {
	pub fn as_str(&self) -> &'static str {
		match self {
			MemberCase::AsDeclared => "as-declared",
			MemberCase::Kebab => "kebab",
			MemberCase::Camel => "camel",
		}
	}
}

impl fmt::Display for MemberCase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for MemberCase {
	type Err = SettingsError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_lowercase().as_str() {
			"as-declared" | "as_declared" | "none" => Ok(MemberCase::AsDeclared),
			"kebab" | "kebab-case" => Ok(MemberCase::Kebab),
			"camel" | "camelcase" | "camel-case" => Ok(MemberCase::Camel),
			other => Err(SettingsError::InvalidValue {
				key: "member_case".to_string(),
				message: format!("unknown member case '{}'", other),
			}),
		}
	}
}

/// Settings of the serialization facade
///
/// Sources, lowest priority first: built-in defaults, a TOML document, then
/// `MOSAIC_*` environment variables.
///
/// # Examples
///
/// ```
/// use mosaic_conf::{JsonApiSettings, MemberCase};
///
/// let settings = JsonApiSettings::from_toml_str(r#"
/// url_prefix = "/api"
/// page_size_limit = 50
/// member_case = "kebab"
/// "#).unwrap();
///
/// assert_eq!(settings.url_prefix, "/api");
/// assert_eq!(settings.default_page_size, 10);
/// assert_eq!(settings.page_size_limit, 50);
/// assert_eq!(settings.member_case, MemberCase::Kebab);
/// assert!(settings.include_by_default);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JsonApiSettings {
	/// Prefix of every generated path
	pub url_prefix: String,
	/// Page size used when a paginated request does not ask for one
	pub default_page_size: usize,
	/// Largest page size a request may ask for
	pub page_size_limit: usize,
	/// Include every loaded relationship when a request has no `include`
	pub include_by_default: bool,
	pub member_case: MemberCase,
	/// `links.about` of server errors
	pub help_link: Option<String>,
}

impl Default for JsonApiSettings {
	fn default() -> Self {
		Self {
			url_prefix: String::new(),
			default_page_size: 10,
			page_size_limit: 100,
			include_by_default: true,
			member_case: MemberCase::AsDeclared,
			help_link: None,
		}
	}
}

impl JsonApiSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse settings from a TOML document; missing keys keep their defaults
	pub fn from_toml_str(toml: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(toml)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let content = fs::read_to_string(path)?;
		tracing::debug!(path = %path.display(), "Loading settings file");
		Self::from_toml_str(&content)
	}

	/// Defaults overridden by `MOSAIC_*` environment variables
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::default().with_env_overrides()
	}

	/// Apply `MOSAIC_*` environment variables on top of these settings
	pub fn with_env_overrides(self) -> Result<Self, SettingsError> {
		self.with_overrides(&EnvOverrides::from_process())
	}

	pub(crate) fn with_overrides(mut self, overrides: &EnvOverrides) -> Result<Self, SettingsError> {
		overrides.apply(&mut self)?;
		self.validate()?;
		Ok(self)
	}

	pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.url_prefix = prefix.into();
		self
	}

	pub fn with_default_page_size(mut self, size: usize) -> Self {
		self.default_page_size = size;
		self
	}

	pub fn with_page_size_limit(mut self, limit: usize) -> Self {
		self.page_size_limit = limit;
		self
	}

	pub fn with_include_by_default(mut self, include: bool) -> Self {
		self.include_by_default = include;
		self
	}

	pub fn with_member_case(mut self, case: MemberCase) -> Self {
		self.member_case = case;
		self
	}

	pub fn with_help_link(mut self, link: impl Into<String>) -> Self {
		self.help_link = Some(link.into());
		self
	}

	/// Check the cross-field constraints
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.page_size_limit == 0 {
			return Err(SettingsError::InvalidValue {
				key: "page_size_limit".to_string(),
				message: "must be at least 1".to_string(),
			});
		}
		if self.default_page_size == 0 || self.default_page_size > self.page_size_limit {
			return Err(SettingsError::InvalidValue {
				key: "default_page_size".to_string(),
				message: format!("must be between 1 and page_size_limit ({})", self.page_size_limit),
			});
		}
		Ok(())
	}
}
