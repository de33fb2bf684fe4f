//! # Mosaic
//!
//! A JSON:API document engine for Rust.
//!
//! Mosaic turns arbitrary, possibly cyclic, object graphs into documents with
//! typed resources, relationships, compound `included` members, pagination
//! links, sparse fieldsets and structured errors. Domain types stay plain
//! Rust: a [`ResourceModel`](model::ResourceModel) declares how to read
//! identifiers, attributes and relationships, and the engine does the rest.
//!
//! ## Crates
//!
//! - [`core`]: resource models, the query context, document values and errors
//! - [`urls`]: URL path construction for `self` and `related` links
//! - [`pagination`]: page slicing and pagination links
//! - [`serializers`]: the graph walk, error documents and the facade
//! - [`conf`]: settings from TOML and `MOSAIC_*` variables (`conf` feature)
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//! use mosaic::prelude::*;
//!
//! struct Person { id: u32, name: String, friends: Vec<Person> }
//!
//! let registry = ModelRegistry::new().with(
//!     ResourceModel::<Person>::named("PersonModel")
//!         .id(|p| p.id)
//!         .attribute("name", |p| p.name.clone())
//!         .to_many::<Person>("friends", |p| Relation::many(&p.friends))
//!         .build()?,
//! )?;
//! let serializer = JsonApiSerializer::new(Arc::new(registry));
//!
//! let ann = Person {
//!     id: 1,
//!     name: "Ann".into(),
//!     friends: vec![Person { id: 2, name: "Bob".into(), friends: Vec::new() }],
//! };
//! let document = serializer.serialize(Content::single(&ann), None, Some("/people/1"), None)?;
//!
//! let value = document.to_value().unwrap();
//! assert_eq!(value["data"]["type"], "Person");
//! assert_eq!(value["data"]["relationships"]["friends"]["data"][0]["id"], "2");
//! assert_eq!(value["included"][0]["attributes"]["name"], "Bob");
//! # Ok::<(), mosaic::core::Error>(())
//! ```

pub mod conf;
pub mod core;
pub mod pagination;
pub mod serializers;
pub mod urls;

pub use mosaic_core::document::{ApiError, Document};
pub use mosaic_core::exception::{Error, ErrorKind, HttpFault, Result};
pub use mosaic_core::model;
pub use mosaic_core::query;
pub use mosaic_serializers::{Content, JsonApiSerializer};

pub use mosaic_conf::{JsonApiSettings, MemberCase};

/// Commonly used types
pub mod prelude {
	pub use mosaic_conf::{JsonApiSettings, MemberCase};
	pub use mosaic_core::document::{ApiError, Document, PrimaryData, ResourceObject};
	pub use mosaic_core::exception::{Error, ErrorKind, HttpFault, Result};
	pub use mosaic_core::model::{ModelRegistry, Relation, ResourceDescriptor, ResourceModel};
	pub use mosaic_core::query::{
		FilterExpressions, Fieldsets, IncludeTree, Pagination, QueryContext, Sorting,
	};
	pub use mosaic_serializers::{
		Content, ErrorSerializer, JsonApiSerializer, ResourceProvider, ValueConverter,
	};
	pub use mosaic_urls::{DefaultUrlPathBuilder, UrlPathBuilder};
}
