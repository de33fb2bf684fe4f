//! # Mosaic Core
//!
//! Core types shared by every Mosaic crate:
//!
//! - **exception**: the engine [`Error`](exception::Error) and its client/server classification
//! - **model**: resource descriptors, the builder that declares them, and the registry
//! - **document**: the JSON:API document value produced by the serializers
//! - **query**: pagination, sorting, filtering, sparse fieldsets and include paths

pub mod document;
pub mod exception;
pub mod model;
pub mod query;

pub use exception::{Error, ErrorKind, HttpFault, Result};
