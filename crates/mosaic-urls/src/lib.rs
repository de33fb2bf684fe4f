//! # Mosaic URLs
//!
//! URL path construction for resources and relationships.
//!
//! Every link in a document comes from a [`UrlPathBuilder`]. The engine only
//! calls the four operations of the trait, so hosts with their own routing
//! conventions can substitute an implementation; [`DefaultUrlPathBuilder`]
//! covers the usual `prefix/collection/id/` layout.

mod builder;
mod path;

pub use builder::DefaultUrlPathBuilder;
pub use path::{ensure_slashes, trim_join};

use mosaic_core::model::{RelationshipDescriptor, ResourceDescriptor};

/// Path construction used for every `self` and `related` link
///
/// Implementations return absolute paths with a leading and trailing `/`.
pub trait UrlPathBuilder: Send + Sync {
	/// Collection path, e.g. `/api/people/`
	fn canonical_path(&self, resource: &ResourceDescriptor) -> String;

	/// Instance path, e.g. `/api/people/1/`
	fn instance_path(&self, resource: &ResourceDescriptor, id: &str) -> String;

	/// Relationship linkage path, e.g. `/api/people/1/relationships/friends/`
	fn relationship_path(
		&self,
		resource: &ResourceDescriptor,
		id: &str,
		relationship: &RelationshipDescriptor,
	) -> String;

	/// Related resource path, e.g. `/api/people/1/friends/`
	fn related_path(
		&self,
		resource: &ResourceDescriptor,
		id: &str,
		relationship: &RelationshipDescriptor,
	) -> String;
}
