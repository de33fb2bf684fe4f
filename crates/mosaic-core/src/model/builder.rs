//! Declarative construction of resource descriptors

use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;

use super::descriptor::{
	AttributeDescriptor, IdAccess, ModelRef, RelationshipDescriptor, ResourceDescriptor,
	TypedAttribute, TypedId, TypedRelation,
};
use super::naming::{default_url_path, derive_type_name, short_type_name};
use super::relation::{Cardinality, Relation};
use crate::exception::{Error, Result};

/// Member names that JSON:API reserves on resource objects
pub const RESERVED_MEMBER_NAMES: &[&str] = &["id", "type"];

/// Builder for the [`ResourceDescriptor`] of domain type `T`
///
/// Accessors are plain functions of `&T`, so no runtime name lookup happens
/// while serializing. Declaration mistakes are reported by [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use mosaic_core::model::{Relation, ResourceModel};
///
/// struct Person {
///     id: u32,
///     name: String,
///     friends: Vec<Person>,
/// }
///
/// let descriptor = ResourceModel::<Person>::named("PersonModel")
///     .id(|p| p.id)
///     .attribute("name", |p| p.name.clone())
///     .to_many::<Person>("friends", |p| Relation::many(&p.friends))
///     .build()
///     .unwrap();
///
/// assert_eq!(descriptor.type_name(), "Person");
/// assert_eq!(descriptor.url_path(), "people");
/// assert_eq!(descriptor.relationships()[0].url_path(), "friends");
/// ```
pub struct ResourceModel<T> {
	model_name: String,
	url_path: Option<String>,
	id: Option<Arc<dyn IdAccess>>,
	attributes: Vec<AttributeDescriptor>,
	relationships: Vec<RelationshipDescriptor>,
	_marker: PhantomData<fn(&T)>,
}

impl<T: Any + Send + Sync> ResourceModel<T> {
	/// Start a model whose name is the short Rust name of `T`
	pub fn new() -> Self {
		Self::named(short_type_name(std::any::type_name::<T>()))
	}

	/// Start a model with an explicit model name (e.g. `PersonModel`)
	pub fn named(model_name: impl Into<String>) -> Self {
		Self {
			model_name: model_name.into(),
			url_path: None,
			id: None,
			attributes: Vec::new(),
			relationships: Vec::new(),
			_marker: PhantomData,
		}
	}

	/// Override the collection path segment
	pub fn url_path(mut self, path: impl Into<String>) -> Self {
		self.url_path = Some(path.into());
		self
	}

	/// Identifier accessor
	pub fn id<F, I>(mut self, read: F) -> Self
	where
		F: Fn(&T) -> I + Send + Sync + 'static,
		I: ToString + 'static,
	{
		self.id = Some(Arc::new(TypedId::<T, F>::new(read)));
		self
	}

	/// Declare an attribute
	pub fn attribute<F, V>(mut self, name: impl Into<String>, read: F) -> Self
	where
		F: Fn(&T) -> V + Send + Sync + 'static,
		V: Serialize + 'static,
	{
		self.attributes.push(AttributeDescriptor {
			name: name.into(),
			accessor: Arc::new(TypedAttribute::<T, F>::new(read)),
		});
		self
	}

	/// Declare a to-one relationship whose path segment is its name
	pub fn to_one<U: Any>(self, name: impl Into<String>, read: RelationFn<T>) -> Self {
		let name = name.into();
		let path = name.clone();
		self.relationship(name, path, Cardinality::One, ModelRef::of::<U>(), read)
	}

	/// Declare a to-one relationship with a custom path segment
	pub fn to_one_at<U: Any>(
		self,
		name: impl Into<String>,
		path: impl Into<String>,
		read: RelationFn<T>,
	) -> Self {
		self.relationship(
			name.into(),
			path.into(),
			Cardinality::One,
			ModelRef::of::<U>(),
			read,
		)
	}

	/// Declare a to-many relationship whose path segment is its name
	pub fn to_many<U: Any>(self, name: impl Into<String>, read: RelationFn<T>) -> Self {
		let name = name.into();
		let path = name.clone();
		self.relationship(name, path, Cardinality::Many, ModelRef::of::<U>(), read)
	}

	/// Declare a to-many relationship with a custom path segment
	pub fn to_many_at<U: Any>(
		self,
		name: impl Into<String>,
		path: impl Into<String>,
		read: RelationFn<T>,
	) -> Self {
		self.relationship(
			name.into(),
			path.into(),
			Cardinality::Many,
			ModelRef::of::<U>(),
			read,
		)
	}

	fn relationship(
		mut self,
		name: String,
		url_path: String,
		cardinality: Cardinality,
		target: ModelRef,
		read: RelationFn<T>,
	) -> Self {
		self.relationships.push(RelationshipDescriptor {
			name,
			cardinality,
			target,
			url_path,
			accessor: Arc::new(TypedRelation::<T, RelationFn<T>>::new(read)),
		});
		self
	}

	/// Validate the declarations and produce the descriptor
	pub fn build(self) -> Result<ResourceDescriptor> {
		let type_name = derive_type_name(&self.model_name);
		if type_name.is_empty() {
			return Err(Error::configuration(&self.model_name, "model name is empty"));
		}
		let id = self
			.id
			.ok_or_else(|| Error::configuration(&self.model_name, "no identifier accessor declared"))?;

		let mut seen = HashSet::new();
		let names = self
			.attributes
			.iter()
			.map(|attr| attr.name.as_str())
			.chain(self.relationships.iter().map(|rel| rel.name.as_str()));
		for name in names {
			if name.is_empty() {
				return Err(Error::configuration(&self.model_name, "member name is empty"));
			}
			if RESERVED_MEMBER_NAMES.contains(&name) {
				return Err(Error::configuration(
					&self.model_name,
					format!("'{}' is a reserved member name", name),
				));
			}
			if !seen.insert(name) {
				return Err(Error::configuration(
					&self.model_name,
					format!("member '{}' is declared more than once", name),
				));
			}
		}
		if let Some(rel) = self.relationships.iter().find(|rel| rel.url_path.is_empty()) {
			return Err(Error::configuration(
				&self.model_name,
				format!("relationship '{}' has an empty path segment", rel.name),
			));
		}

		let url_path = self
			.url_path
			.unwrap_or_else(|| default_url_path(&type_name));

		tracing::debug!(
			model = %self.model_name,
			resource_type = %type_name,
			attributes = self.attributes.len(),
			relationships = self.relationships.len(),
			"Built resource descriptor"
		);

		Ok(ResourceDescriptor {
			model_name: self.model_name,
			type_name,
			url_path,
			model_type: TypeId::of::<T>(),
			id,
			attributes: self.attributes,
			relationships: self.relationships,
		})
	}
}

impl<T: Any + Send + Sync> Default for ResourceModel<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// Relationship accessor signature accepted by [`ResourceModel`]
pub type RelationFn<T> = for<'a> fn(&'a T) -> Relation<'a>;
