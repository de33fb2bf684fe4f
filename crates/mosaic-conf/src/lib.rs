//! # Mosaic Conf
//!
//! Settings for the Mosaic serialization facade.
//!
//! [`JsonApiSettings`] is loaded in layers: built-in defaults, then an
//! optional TOML file, then `MOSAIC_*` environment variables
//! (`MOSAIC_PAGE_SIZE_LIMIT=50`, `MOSAIC_MEMBER_CASE=camel`, ...).
//!
//! ```no_run
//! use mosaic_conf::JsonApiSettings;
//!
//! let settings = JsonApiSettings::from_file("mosaic.toml")?
//!     .with_env_overrides()?;
//! # Ok::<(), mosaic_conf::SettingsError>(())
//! ```

mod env;
mod settings;

pub use env::ENV_PREFIX;
pub use settings::{JsonApiSettings, MemberCase};

/// Errors raised while loading settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },
}
