//! Resource graph serialization, error documents and the facade.

pub use mosaic_serializers::*;
