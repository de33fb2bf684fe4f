//! Page slicing and pagination links.

pub use mosaic_pagination::*;
