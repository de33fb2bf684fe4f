//! Resource models
//!
//! Domain types are exposed as JSON:API resources through explicit
//! descriptors rather than reflection. Each domain type gets one
//! [`ResourceDescriptor`], declared once with [`ResourceModel`] and stored in
//! a [`ModelRegistry`]:
//!
//! ```
//! use mosaic_core::model::{ModelRegistry, Relation, ResourceModel};
//!
//! struct Person {
//!     id: String,
//!     name: String,
//!     friends: Vec<Person>,
//! }
//!
//! let mut registry = ModelRegistry::new();
//! registry
//!     .register(
//!         ResourceModel::<Person>::named("PersonModel")
//!             .id(|p| p.id.clone())
//!             .attribute("name", |p| p.name.clone())
//!             .to_many::<Person>("friends", |p| Relation::many(&p.friends))
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let person = registry.get::<Person>().unwrap();
//! assert_eq!(person.type_name(), "Person");
//! ```

mod builder;
mod descriptor;
mod instance;
pub mod naming;
mod registry;
mod relation;

pub use builder::{RESERVED_MEMBER_NAMES, RelationFn, ResourceModel};
pub use descriptor::{
	AttributeAccess, AttributeDescriptor, IdAccess, ModelRef, RelationAccess,
	RelationshipDescriptor, ResourceDescriptor,
};
pub use instance::{ResourceInstance, ResourceKey};
pub use registry::ModelRegistry;
pub use relation::{Cardinality, DomainObject, RelatedItem, Relation, concrete_type_id};
