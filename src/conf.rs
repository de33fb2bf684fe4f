//! Engine settings.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mosaic::conf::JsonApiSettings;
//!
//! let settings = JsonApiSettings::from_env()?;
//! # Ok::<(), mosaic::conf::SettingsError>(())
//! ```

pub use mosaic_conf::*;
