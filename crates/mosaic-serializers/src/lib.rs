//! # Mosaic Serializers
//!
//! Turns domain objects into JSON:API documents.
//!
//! - [`JsonApiSerializer`]: the facade a request handler calls. It resolves
//!   the descriptor, validates the page size, filters, sorts, paginates and
//!   hands the result to the [`ResourceSerializer`]. Faults become error
//!   documents.
//! - [`ResourceSerializer`]: the graph walk producing `data`, `included` and
//!   links. Each `(type, id)` appears at most once per document, so cyclic
//!   graphs terminate.
//! - [`ErrorSerializer`]: error documents from any `std::error::Error`.
//! - [`QueryInterpreter`] and [`QueryEvaluator`]: `filter[...]` and `sort`.
//! - [`ValueConverter`]: rewrites attribute values on the way out.

mod context;
mod converters;
mod error;
mod facade;
mod interpreter;
mod provider;
mod resource;

pub use converters::{Converters, ValueConverter, member_name};
pub use error::ErrorSerializer;
pub use facade::{Content, JsonApiSerializer};
pub use interpreter::{AttributeQueryEvaluator, QueryEvaluator, QueryInterpreter, compare_values};
pub use provider::ResourceProvider;
pub use resource::ResourceSerializer;
