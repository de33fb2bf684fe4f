//! The default URL path builder

use mosaic_core::model::{RelationshipDescriptor, ResourceDescriptor};

use crate::UrlPathBuilder;
use crate::path::{ensure_slashes, trim_join};

/// Builds paths as `prefix/url-path/id/...`
///
/// # Examples
///
/// ```
/// use mosaic_core::model::ResourceModel;
/// use mosaic_urls::{DefaultUrlPathBuilder, UrlPathBuilder};
///
/// struct Person { id: u32 }
/// let people = ResourceModel::<Person>::named("PersonModel").id(|p| p.id).build().unwrap();
///
/// let builder = DefaultUrlPathBuilder::with_prefix("/api/");
/// assert_eq!(builder.canonical_path(&people), "/api/people/");
/// assert_eq!(builder.instance_path(&people, "1"), "/api/people/1/");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultUrlPathBuilder {
	prefix: String,
}

impl DefaultUrlPathBuilder {
	/// Builder without a prefix
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder mounted under an explicit prefix
	pub fn with_prefix(prefix: impl AsRef<str>) -> Self {
		Self {
			prefix: trim_join([prefix.as_ref()]),
		}
	}

	/// Derive the prefix from a route template
	///
	/// The leading literal segments of the template form the prefix. When the
	/// template has fewer than two parameterised segments, the last literal
	/// segment is assumed to be the resource's own path and is dropped too.
	/// This is a heuristic; prefer [`with_prefix`](Self::with_prefix) when the
	/// mount path is known.
	///
	/// # Examples
	///
	/// ```
	/// use mosaic_urls::DefaultUrlPathBuilder;
	///
	/// let builder = DefaultUrlPathBuilder::from_route_template("/", "api/people/{id}");
	/// assert_eq!(builder.prefix(), "api");
	///
	/// let nested = DefaultUrlPathBuilder::from_route_template("/app", "api/{tenant}/people/{id}");
	/// assert_eq!(nested.prefix(), "app/api");
	/// ```
	pub fn from_route_template(virtual_root: &str, template: &str) -> Self {
		let segments: Vec<&str> = template.split('/').filter(|s| !s.is_empty()).collect();
		let parameterised = segments.iter().filter(|s| is_parameter(s)).count();
		let mut literal: Vec<&str> = segments
			.iter()
			.copied()
			.take_while(|s| !is_parameter(s))
			.collect();
		if parameterised < 2 {
			literal.pop();
		}

		let prefix = trim_join(std::iter::once(virtual_root).chain(literal));
		tracing::debug!(template, prefix = %prefix, "Derived URL prefix from route template");
		Self { prefix }
	}

	/// Prefix without surrounding slashes
	pub fn prefix(&self) -> &str {
		&self.prefix
	}
}

fn is_parameter(segment: &str) -> bool {
	segment.starts_with('{')
}

impl UrlPathBuilder for DefaultUrlPathBuilder {
	fn canonical_path(&self, resource: &ResourceDescriptor) -> String {
		ensure_slashes(&trim_join([self.prefix.as_str(), resource.url_path()]))
	}

	fn instance_path(&self, resource: &ResourceDescriptor, id: &str) -> String {
		ensure_slashes(&trim_join([
			self.canonical_path(resource).as_str(),
			id,
		]))
	}

	fn relationship_path(
		&self,
		resource: &ResourceDescriptor,
		id: &str,
		relationship: &RelationshipDescriptor,
	) -> String {
		ensure_slashes(&trim_join([
			self.instance_path(resource, id).as_str(),
			"relationships",
			relationship.url_path(),
		]))
	}

	fn related_path(
		&self,
		resource: &ResourceDescriptor,
		id: &str,
		relationship: &RelationshipDescriptor,
	) -> String {
		ensure_slashes(&trim_join([
			self.instance_path(resource, id).as_str(),
			relationship.url_path(),
		]))
	}
}
