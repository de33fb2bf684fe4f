//! Resource models, query context, documents and errors.
//!
//! # Examples
//!
//! ```
//! use mosaic::core::exception::{Error, ErrorKind};
//!
//! assert_eq!(Error::MissingRequestUri.kind(), ErrorKind::Server);
//! ```

pub use mosaic_core::*;
