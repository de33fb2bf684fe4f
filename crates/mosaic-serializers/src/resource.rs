//! Resource graph serialization
//!
//! [`ResourceSerializer`] turns candidate content (already filtered, sorted
//! and paginated) into a success [`Document`]. It walks the object graph
//! through the descriptors' accessors, so arbitrary and cyclic graphs can be
//! serialized without the domain types knowing anything about JSON:API.

use std::collections::HashSet;
use std::sync::Arc;

use mosaic_conf::MemberCase;
use mosaic_core::document::{
	Document, Linkage, Links, Meta, PrimaryData, RelationshipLinks, RelationshipObject,
	ResourceIdentifier, ResourceObject,
};
use mosaic_core::exception::{Error, Result};
use mosaic_core::model::{
	DomainObject, ModelRegistry, RelatedItem, Relation, RelationshipDescriptor, ResourceDescriptor,
	ResourceInstance,
};
use mosaic_core::query::{IncludeTree, QueryContext};
use mosaic_pagination::{Candidate, RequestUri, pagination_links};
use mosaic_urls::UrlPathBuilder;

use crate::context::WalkContext;
use crate::converters::{Converters, member_name};

static NO_CONVERTERS: Converters = Converters::new();

/// Which related resources end up in `included`
#[derive(Debug, Clone, Copy)]
enum IncludeScope<'q> {
	/// Every loaded relationship, recursively
	Everything,
	/// Only the requested include paths
	Paths(&'q IncludeTree),
	Nothing,
}

impl<'q> IncludeScope<'q> {
	fn for_query(query: &'q QueryContext, include_by_default: bool) -> Self {
		match &query.includes {
			Some(tree) => IncludeScope::Paths(tree),
			None if include_by_default => IncludeScope::Everything,
			None => IncludeScope::Nothing,
		}
	}

	/// Scope for the resources behind relationship `member`, if they are included at all
	fn descend(self, member: &str) -> Option<Self> {
		match self {
			IncludeScope::Everything => Some(IncludeScope::Everything),
			IncludeScope::Paths(tree) => tree.child(member).map(IncludeScope::Paths),
			IncludeScope::Nothing => None,
		}
	}
}

/// Builds success documents from domain objects
///
/// # Examples
///
/// ```
/// use mosaic_core::model::{ModelRegistry, ResourceModel};
/// use mosaic_core::query::QueryContext;
/// use mosaic_pagination::{Candidate, RequestUri};
/// use mosaic_serializers::ResourceSerializer;
/// use mosaic_urls::DefaultUrlPathBuilder;
/// use serde_json::json;
///
/// struct Tag { id: u32, label: String }
///
/// let mut registry = ModelRegistry::new();
/// let tags = registry
///     .register(ResourceModel::<Tag>::new().id(|t| t.id).attribute("label", |t| t.label.clone()).build()?)?;
///
/// let urls = DefaultUrlPathBuilder::with_prefix("api");
/// let serializer = ResourceSerializer::new(&registry, &urls);
///
/// let tag = Tag { id: 3, label: "rust".into() };
/// let document = serializer.serialize(
///     Candidate::Single(&tag),
///     Some(&tags),
///     &RequestUri::parse("http://x/api/tags/3")?,
///     &QueryContext::new(),
/// )?;
///
/// assert_eq!(
///     document.to_value().unwrap(),
///     json!({
///         "data": {
///             "type": "Tag",
///             "id": "3",
///             "attributes": { "label": "rust" },
///             "links": { "self": "http://x/api/tags/3/" }
///         },
///         "links": { "self": "http://x/api/tags/3" }
///     })
/// );
/// # Ok::<(), mosaic_core::Error>(())
/// ```
pub struct ResourceSerializer<'s> {
	registry: &'s ModelRegistry,
	url_builder: &'s dyn UrlPathBuilder,
	converters: &'s Converters,
	member_case: MemberCase,
	include_by_default: bool,
}

impl<'s> ResourceSerializer<'s> {
	pub fn new(registry: &'s ModelRegistry, url_builder: &'s dyn UrlPathBuilder) -> Self {
		Self {
			registry,
			url_builder,
			converters: &NO_CONVERTERS,
			member_case: MemberCase::AsDeclared,
			include_by_default: true,
		}
	}

	pub fn with_converters(mut self, converters: &'s Converters) -> Self {
		self.converters = converters;
		self
	}

	pub fn with_member_case(mut self, case: MemberCase) -> Self {
		self.member_case = case;
		self
	}

	/// Include every loaded relationship when the request has no `include`
	pub fn with_include_by_default(mut self, include: bool) -> Self {
		self.include_by_default = include;
		self
	}

	/// Serialize `content` into a success document
	///
	/// `root` describes the primary resources; objects it does not accept are
	/// resolved through the registry. Invalid include paths are client errors,
	/// unresolvable related types are server errors.
	pub fn serialize(
		&self,
		content: Candidate<&DomainObject>,
		root: Option<&Arc<ResourceDescriptor>>,
		request_uri: &RequestUri,
		query: &QueryContext,
	) -> Result<Document> {
		let scope = IncludeScope::for_query(query, self.include_by_default);
		if let (Some(root), IncludeScope::Paths(tree)) = (root, scope) {
			self.validate_includes(root, tree, "")?;
		}

		let page_info = content.page_info().copied();
		let (objects, single) = match content {
			Candidate::Null => (Vec::new(), true),
			Candidate::Single(object) => (vec![object], true),
			Candidate::Sequence(objects) => (objects, false),
			Candidate::Page(page) => (page.items, false),
		};
		tracing::debug!(
			resource = root.map(|descriptor| descriptor.type_name()).unwrap_or("<registry>"),
			count = objects.len(),
			collection = !single,
			"Serializing document"
		);

		let instances = objects
			.into_iter()
			.map(|object| self.primary_instance(object, root))
			.collect::<Result<Vec<_>>>()?;
		if let IncludeScope::Paths(tree) = scope {
			let mut validated: HashSet<&str> = root.iter().map(|root| root.type_name()).collect();
			for instance in &instances {
				if validated.insert(instance.type_name()) {
					self.validate_includes(instance.descriptor(), tree, "")?;
				}
			}
		}

		let mut walk = Walk {
			serializer: self,
			uri: request_uri,
			query,
			context: WalkContext::new(),
		};
		for instance in &instances {
			walk.context.mark_primary(instance.key());
		}
		let mut resources = Vec::with_capacity(instances.len());
		for instance in &instances {
			resources.push(walk.resource(instance, scope)?);
		}

		let data = if single {
			match resources.pop() {
				Some(resource) => PrimaryData::Single(Box::new(resource)),
				None => PrimaryData::Null,
			}
		} else {
			PrimaryData::Collection(resources)
		};

		let mut links = Links::new();
		links.insert("self".to_string(), request_uri.as_str().to_string());
		let mut meta = Meta::new();
		if let Some(info) = page_info {
			links.extend(pagination_links(request_uri, &info));
			match serde_json::to_value(info.meta()) {
				Ok(page) => {
					meta.insert("page".to_string(), page);
				}
				Err(err) => tracing::warn!(error = %err, "Could not render page meta"),
			}
		}

		Ok(Document::Data {
			data,
			included: walk.context.into_included(),
			links,
			meta,
		})
	}

	fn primary_instance<'o>(
		&self,
		object: &'o DomainObject,
		root: Option<&Arc<ResourceDescriptor>>,
	) -> Result<ResourceInstance<'o>> {
		if let Some(root) = root
			&& root.accepts(object)
		{
			return ResourceInstance::resolve(object, Arc::clone(root));
		}
		match (self.registry.resolve(object), root) {
			(Some(descriptor), _) => ResourceInstance::resolve(object, Arc::clone(descriptor)),
			(None, Some(root)) => Err(Error::ObjectTypeMismatch {
				resource: root.type_name().to_string(),
			}),
			(None, None) => {
				tracing::warn!("Primary object of an unregistered type");
				Err(Error::UnresolvedResource {
					type_name: "<unregistered type>".to_string(),
				})
			}
		}
	}

	/// Check every include path against the declared relationships
	fn validate_includes(&self, descriptor: &ResourceDescriptor, tree: &IncludeTree, prefix: &str) -> Result<()> {
		for (member, child) in tree.children() {
			let path = if prefix.is_empty() {
				member.to_string()
			} else {
				format!("{}.{}", prefix, member)
			};
			let Some(relationship) = self.find_relationship(descriptor, member) else {
				return Err(Error::InvalidIncludePath {
					path,
					resource: descriptor.type_name().to_string(),
					relationship: member.to_string(),
				});
			};
			if !child.is_empty() {
				let target = self.registry.resolve_target(relationship.target())?;
				self.validate_includes(target, child, &path)?;
			}
		}
		Ok(())
	}

	fn find_relationship<'d>(
		&self,
		descriptor: &'d ResourceDescriptor,
		member: &str,
	) -> Option<&'d RelationshipDescriptor> {
		descriptor
			.relationships()
			.iter()
			.find(|relationship| member_name(self.member_case, relationship.name()) == member)
	}

	/// Descriptor of a related object, by its concrete type
	fn related_descriptor(
		&self,
		relationship: &RelationshipDescriptor,
		object: &DomainObject,
	) -> Result<Arc<ResourceDescriptor>> {
		match self.registry.resolve(object) {
			Some(descriptor) => Ok(Arc::clone(descriptor)),
			None => {
				tracing::warn!(
					relationship = relationship.name(),
					target = relationship.target().rust_name(),
					"Related object has no registered descriptor"
				);
				Err(Error::UnresolvedResource {
					type_name: relationship.target().rust_name().to_string(),
				})
			}
		}
	}

	fn identifier(&self, relationship: &RelationshipDescriptor, item: &RelatedItem<'_>) -> Result<ResourceIdentifier> {
		let object: &DomainObject = match item {
			RelatedItem::Identifier(id) => {
				let target = self.registry.resolve_target(relationship.target())?;
				return Ok(ResourceIdentifier::new(target.type_name(), id.clone()));
			}
			RelatedItem::Object(object) => *object,
			RelatedItem::Shared(object) => &**object,
		};
		let descriptor = self.related_descriptor(relationship, object)?;
		Ok(ResourceIdentifier::new(
			descriptor.type_name(),
			descriptor.resource_id(object)?,
		))
	}

	fn linkage(&self, relationship: &RelationshipDescriptor, relation: &Relation<'_>) -> Result<Option<Linkage>> {
		let linkage = match relation {
			Relation::NotLoaded => return Ok(None),
			Relation::One(None) => Linkage::One(None),
			Relation::One(Some(item)) => Linkage::One(Some(self.identifier(relationship, item)?)),
			Relation::Many(items) => Linkage::Many(
				items
					.iter()
					.map(|item| self.identifier(relationship, item))
					.collect::<Result<_>>()?,
			),
		};
		Ok(Some(linkage))
	}
}

/// One pass over the object graph
struct Walk<'w, 's> {
	serializer: &'w ResourceSerializer<'s>,
	uri: &'w RequestUri,
	query: &'w QueryContext,
	context: WalkContext,
}

impl Walk<'_, '_> {
	fn resource(&mut self, instance: &ResourceInstance<'_>, scope: IncludeScope<'_>) -> Result<ResourceObject> {
		let serializer = self.serializer;
		let query = self.query;
		let descriptor = Arc::clone(instance.descriptor());
		let type_name = descriptor.type_name();
		let fieldsets = &query.fieldsets;
		let mut resource = ResourceObject::new(type_name, instance.id());

		for attribute in descriptor.attributes() {
			let member = member_name(serializer.member_case, attribute.name());
			if !fieldsets.allows(type_name, &member) {
				continue;
			}
			let value = descriptor.read_attribute(attribute, instance.object())?;
			let value = serializer.converters.apply(type_name, attribute.name(), value);
			resource.attributes.insert(member.into_owned(), value);
		}

		for relationship in descriptor.relationships() {
			let member = member_name(serializer.member_case, relationship.name());
			let emitted = fieldsets.allows(type_name, &member);
			let nested = scope.descend(&member);
			if !emitted && nested.is_none() {
				continue;
			}

			let relation = descriptor.read_relationship(relationship, instance.object())?;
			if let Some(nested) = nested {
				self.include_related(relationship, &relation, nested)?;
			}
			if emitted {
				let object = RelationshipObject {
					links: RelationshipLinks {
						self_link: self.uri.resolve_path(&serializer.url_builder.relationship_path(
							&descriptor,
							instance.id(),
							relationship,
						)),
						related: self.uri.resolve_path(&serializer.url_builder.related_path(
							&descriptor,
							instance.id(),
							relationship,
						)),
					},
					data: serializer.linkage(relationship, &relation)?,
				};
				resource.relationships.insert(member.into_owned(), object);
			}
		}

		resource.links.insert(
			"self".to_string(),
			self.uri
				.resolve_path(&serializer.url_builder.instance_path(&descriptor, instance.id())),
		);
		Ok(resource)
	}

	fn include_related(
		&mut self,
		relationship: &RelationshipDescriptor,
		relation: &Relation<'_>,
		scope: IncludeScope<'_>,
	) -> Result<()> {
		for item in relation.items() {
			let Some(object) = item.object() else {
				continue;
			};
			let descriptor = self.serializer.related_descriptor(relationship, object)?;
			let instance = ResourceInstance::resolve(object, descriptor)?;
			self.include(&instance, scope)?;
		}
		Ok(())
	}

	fn include(&mut self, instance: &ResourceInstance<'_>, scope: IncludeScope<'_>) -> Result<()> {
		let key = instance.key();
		if !self.context.reserve(key.clone()) {
			tracing::debug!(resource = %key, "Resource already in document");
			// A deeper include path may still reach past a resource seen on a shorter one
			if let IncludeScope::Paths(tree) = scope
				&& !tree.is_empty()
			{
				self.include_paths(instance, tree)?;
			}
			return Ok(());
		}

		self.context.descend();
		tracing::debug!(resource = %key, depth = self.context.depth(), "Including resource");
		let resource = self.resource(instance, scope);
		self.context.ascend();
		self.context.fill(&key, resource?);
		Ok(())
	}

	fn include_paths(&mut self, instance: &ResourceInstance<'_>, tree: &IncludeTree) -> Result<()> {
		let descriptor = Arc::clone(instance.descriptor());
		for (member, child) in tree.children() {
			let Some(relationship) = self.serializer.find_relationship(&descriptor, member) else {
				continue;
			};
			let relation = descriptor.read_relationship(relationship, instance.object())?;
			self.include_related(relationship, &relation, IncludeScope::Paths(child))?;
		}
		Ok(())
	}
}
