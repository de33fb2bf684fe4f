//! URL path construction.
//!
//! # Examples
//!
//! ```
//! use mosaic::urls::{DefaultUrlPathBuilder, trim_join};
//!
//! assert_eq!(trim_join(["/api/", "/people/"]), "api/people");
//! assert_eq!(DefaultUrlPathBuilder::with_prefix("/api/").prefix(), "api");
//! ```

pub use mosaic_urls::*;
