//! Resource descriptors
//!
//! A [`ResourceDescriptor`] is the immutable, declarative shape of one domain
//! type: its wire `type`, its URL path segment, the identifier accessor, and
//! the ordered attribute and relationship declarations. Descriptors are built
//! with [`ResourceModel`](super::ResourceModel) and shared as
//! `Arc<ResourceDescriptor>`.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::naming::short_type_name;
use super::relation::{Cardinality, DomainObject, Relation, concrete_type_id};
use crate::exception::{Error, Result};

/// Reads the resource identifier off a domain object
pub trait IdAccess: Send + Sync {
	/// `None` when the object is not of the accessor's type
	fn read(&self, object: &DomainObject) -> Option<String>;
}

/// Reads one attribute value off a domain object
pub trait AttributeAccess: Send + Sync {
	/// `None` when the object is not of the accessor's type
	fn read(&self, object: &DomainObject) -> Option<serde_json::Result<Value>>;
}

/// Reads one relationship off a domain object
pub trait RelationAccess: Send + Sync {
	/// `None` when the object is not of the accessor's type
	fn read<'a>(&self, object: &'a DomainObject) -> Option<Relation<'a>>;
}

pub(crate) struct TypedId<T, F> {
	read: F,
	_marker: PhantomData<fn(&T)>,
}

impl<T, F> TypedId<T, F> {
	pub(crate) fn new(read: F) -> Self {
		Self {
			read,
			_marker: PhantomData,
		}
	}
}

impl<T, F, I> IdAccess for TypedId<T, F>
where
	T: Any,
	F: Fn(&T) -> I + Send + Sync,
	I: ToString,
{
	fn read(&self, object: &DomainObject) -> Option<String> {
		object
			.downcast_ref::<T>()
			.map(|object| (self.read)(object).to_string())
	}
}

pub(crate) struct TypedAttribute<T, F> {
	read: F,
	_marker: PhantomData<fn(&T)>,
}

impl<T, F> TypedAttribute<T, F> {
	pub(crate) fn new(read: F) -> Self {
		Self {
			read,
			_marker: PhantomData,
		}
	}
}

impl<T, F, V> AttributeAccess for TypedAttribute<T, F>
where
	T: Any,
	F: Fn(&T) -> V + Send + Sync,
	V: Serialize,
{
	fn read(&self, object: &DomainObject) -> Option<serde_json::Result<Value>> {
		object
			.downcast_ref::<T>()
			.map(|object| serde_json::to_value((self.read)(object)))
	}
}

pub(crate) struct TypedRelation<T, F> {
	read: F,
	_marker: PhantomData<fn(&T)>,
}

impl<T, F> TypedRelation<T, F> {
	pub(crate) fn new(read: F) -> Self {
		Self {
			read,
			_marker: PhantomData,
		}
	}
}

impl<T, F> RelationAccess for TypedRelation<T, F>
where
	T: Any,
	F: for<'a> Fn(&'a T) -> Relation<'a> + Send + Sync,
{
	fn read<'a>(&self, object: &'a DomainObject) -> Option<Relation<'a>> {
		object.downcast_ref::<T>().map(|object| (self.read)(object))
	}
}

/// Lazy reference to the descriptor of a relationship target
///
/// Only the Rust type is recorded at declaration time; the descriptor itself
/// is looked up in a [`ModelRegistry`](super::ModelRegistry) when the
/// relationship is walked, so mutually referential models can be declared in
/// any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelRef {
	type_id: TypeId,
	rust_name: &'static str,
}

impl ModelRef {
	/// # Examples
	///
	/// ```
	/// use mosaic_core::model::ModelRef;
	///
	/// struct Person;
	/// let target = ModelRef::of::<Person>();
	/// assert_eq!(target.rust_name(), "Person");
	/// ```
	pub fn of<U: Any>() -> Self {
		Self {
			type_id: TypeId::of::<U>(),
			rust_name: short_type_name(std::any::type_name::<U>()),
		}
	}

	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Short Rust name of the target type, used in diagnostics
	pub fn rust_name(&self) -> &'static str {
		self.rust_name
	}
}

/// A declared attribute
pub struct AttributeDescriptor {
	pub(crate) name: String,
	pub(crate) accessor: Arc<dyn AttributeAccess>,
}

impl AttributeDescriptor {
	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Debug for AttributeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AttributeDescriptor")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// A declared to-one or to-many relationship
pub struct RelationshipDescriptor {
	pub(crate) name: String,
	pub(crate) cardinality: Cardinality,
	pub(crate) target: ModelRef,
	pub(crate) url_path: String,
	pub(crate) accessor: Arc<dyn RelationAccess>,
}

impl RelationshipDescriptor {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn cardinality(&self) -> Cardinality {
		self.cardinality
	}

	/// Target model, resolved lazily through the registry
	pub fn target(&self) -> ModelRef {
		self.target
	}

	/// Path segment used in relationship links; defaults to the name
	pub fn url_path(&self) -> &str {
		&self.url_path
	}
}

impl fmt::Debug for RelationshipDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RelationshipDescriptor")
			.field("name", &self.name)
			.field("cardinality", &self.cardinality)
			.field("target", &self.target.rust_name)
			.field("url_path", &self.url_path)
			.finish_non_exhaustive()
	}
}

/// Immutable description of how one domain type is exposed as a resource
pub struct ResourceDescriptor {
	pub(crate) model_name: String,
	pub(crate) type_name: String,
	pub(crate) url_path: String,
	pub(crate) model_type: TypeId,
	pub(crate) id: Arc<dyn IdAccess>,
	pub(crate) attributes: Vec<AttributeDescriptor>,
	pub(crate) relationships: Vec<RelationshipDescriptor>,
}

impl ResourceDescriptor {
	/// Name of the model the descriptor was declared as (e.g. `PersonModel`)
	pub fn model_name(&self) -> &str {
		&self.model_name
	}

	/// Wire-visible resource `type`
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// URL path segment of the resource collection
	pub fn url_path(&self) -> &str {
		&self.url_path
	}

	/// Rust type this descriptor reads
	pub fn model_type(&self) -> TypeId {
		self.model_type
	}

	pub fn attributes(&self) -> &[AttributeDescriptor] {
		&self.attributes
	}

	pub fn relationships(&self) -> &[RelationshipDescriptor] {
		&self.relationships
	}

	pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
		self.attributes.iter().find(|attr| attr.name == name)
	}

	pub fn relationship(&self, name: &str) -> Option<&RelationshipDescriptor> {
		self.relationships.iter().find(|rel| rel.name == name)
	}

	/// Whether `object` is of the type this descriptor was declared for
	pub fn accepts(&self, object: &DomainObject) -> bool {
		concrete_type_id(object) == self.model_type
	}

	/// Extract the resource identifier
	pub fn resource_id(&self, object: &DomainObject) -> Result<String> {
		self.id.read(object).ok_or_else(|| self.mismatch())
	}

	/// Read one attribute value
	pub fn read_attribute(
		&self,
		attribute: &AttributeDescriptor,
		object: &DomainObject,
	) -> Result<Value> {
		let value = attribute.accessor.read(object).ok_or_else(|| self.mismatch())?;
		value.map_err(|err| Error::AttributeValue {
			resource: self.type_name.clone(),
			attribute: attribute.name.clone(),
			message: err.to_string(),
		})
	}

	/// Read one relationship, checking the returned shape against its cardinality
	pub fn read_relationship<'a>(
		&self,
		relationship: &RelationshipDescriptor,
		object: &'a DomainObject,
	) -> Result<Relation<'a>> {
		let relation = relationship
			.accessor
			.read(object)
			.ok_or_else(|| self.mismatch())?;
		let matches = match (&relation, relationship.cardinality) {
			(Relation::NotLoaded, _) => true,
			(Relation::One(_), Cardinality::One) => true,
			(Relation::Many(_), Cardinality::Many) => true,
			_ => false,
		};
		if !matches {
			return Err(Error::CardinalityMismatch {
				resource: self.type_name.clone(),
				relationship: relationship.name.clone(),
				expected: relationship.cardinality.as_str(),
				actual: relation.shape(),
			});
		}
		Ok(relation)
	}

	fn mismatch(&self) -> Error {
		Error::ObjectTypeMismatch {
			resource: self.type_name.clone(),
		}
	}
}

impl fmt::Debug for ResourceDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResourceDescriptor")
			.field("model_name", &self.model_name)
			.field("type_name", &self.type_name)
			.field("url_path", &self.url_path)
			.field("attributes", &self.attributes)
			.field("relationships", &self.relationships)
			.finish_non_exhaustive()
	}
}
