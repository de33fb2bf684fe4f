//! Values returned by relationship accessors
//!
//! A relationship accessor never hands the serializer a concrete Rust type.
//! It returns a [`Relation`], which says whether the relationship is loaded
//! and, if so, which related objects (or bare identifiers) it points at.

use std::any::{Any, TypeId};
use std::sync::Arc;

/// Any domain object the engine can walk
pub type DomainObject = dyn Any + Send + Sync;

/// Concrete type of a domain object behind a trait object
///
/// # Examples
///
/// ```
/// use mosaic_core::model::{DomainObject, concrete_type_id};
/// use std::any::TypeId;
///
/// struct Person;
/// let person = Person;
/// let object: &DomainObject = &person;
/// assert_eq!(concrete_type_id(object), TypeId::of::<Person>());
/// ```
pub fn concrete_type_id(object: &DomainObject) -> TypeId {
	let object: &dyn Any = object;
	object.type_id()
}

/// Cardinality of a declared relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
	/// To-one relationship
	One,
	/// To-many relationship
	Many,
}

impl Cardinality {
	pub fn as_str(&self) -> &'static str {
		match self {
			Cardinality::One => "to-one",
			Cardinality::Many => "to-many",
		}
	}
}

/// One related object as seen by the serializer
pub enum RelatedItem<'a> {
	/// A related object borrowed from the owning object
	Object(&'a DomainObject),
	/// A related object the accessor had to materialise (e.g. by upgrading a `Weak`)
	Shared(Arc<DomainObject>),
	/// Only the identifier is known; rendered as linkage, never included
	Identifier(String),
}

impl<'a> RelatedItem<'a> {
	/// The related object, when one is available
	pub fn object(&self) -> Option<&DomainObject> {
		match self {
			RelatedItem::Object(object) => Some(*object),
			RelatedItem::Shared(object) => Some(&**object),
			RelatedItem::Identifier(_) => None,
		}
	}
}

impl std::fmt::Debug for RelatedItem<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			RelatedItem::Object(_) => f.write_str("Object(..)"),
			RelatedItem::Shared(_) => f.write_str("Shared(..)"),
			RelatedItem::Identifier(id) => f.debug_tuple("Identifier").field(id).finish(),
		}
	}
}

/// The state of one relationship on one domain object
///
/// # Examples
///
/// ```
/// use mosaic_core::model::Relation;
///
/// struct Tag { id: u32 }
/// let tags = vec![Tag { id: 1 }, Tag { id: 2 }];
///
/// let relation = Relation::many(tags.iter());
/// assert_eq!(relation.len(), 2);
///
/// let none: Relation<'_> = Relation::optional::<Tag>(None);
/// assert!(none.is_loaded());
/// assert_eq!(none.len(), 0);
///
/// assert!(!Relation::not_loaded().is_loaded());
/// ```
#[derive(Debug)]
pub enum Relation<'a> {
	/// The relationship was not loaded; only links are rendered
	NotLoaded,
	/// To-one linkage, `None` renders as `null`
	One(Option<RelatedItem<'a>>),
	/// To-many linkage
	Many(Vec<RelatedItem<'a>>),
}

impl<'a> Relation<'a> {
	pub fn not_loaded() -> Self {
		Relation::NotLoaded
	}

	/// An empty to-one relationship
	pub fn null() -> Self {
		Relation::One(None)
	}

	pub fn one<U: Any + Send + Sync>(object: &'a U) -> Self {
		Relation::One(Some(RelatedItem::Object(object)))
	}

	pub fn optional<U: Any + Send + Sync>(object: Option<&'a U>) -> Self {
		Relation::One(object.map(|object| RelatedItem::Object(object as &DomainObject)))
	}

	pub fn many<U, I>(objects: I) -> Self
	where
		U: Any + Send + Sync,
		I: IntoIterator<Item = &'a U>,
	{
		Relation::Many(
			objects
				.into_iter()
				.map(|object| RelatedItem::Object(object as &DomainObject))
				.collect(),
		)
	}

	/// To-one relationship to an object the accessor owns through an `Arc`
	pub fn shared<U: Any + Send + Sync>(object: Option<Arc<U>>) -> Self {
		Relation::One(object.map(|object| RelatedItem::Shared(object as Arc<DomainObject>)))
	}

	pub fn many_shared<U, I>(objects: I) -> Self
	where
		U: Any + Send + Sync,
		I: IntoIterator<Item = Arc<U>>,
	{
		Relation::Many(
			objects
				.into_iter()
				.map(|object| RelatedItem::Shared(object as Arc<DomainObject>))
				.collect(),
		)
	}

	/// To-one linkage by identifier only
	pub fn identifier(id: impl ToString) -> Self {
		Relation::One(Some(RelatedItem::Identifier(id.to_string())))
	}

	/// To-many linkage by identifiers only
	pub fn identifiers<I, S>(ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: ToString,
	{
		Relation::Many(
			ids.into_iter()
				.map(|id| RelatedItem::Identifier(id.to_string()))
				.collect(),
		)
	}

	pub fn is_loaded(&self) -> bool {
		!matches!(self, Relation::NotLoaded)
	}

	/// Number of related items (0 when not loaded)
	pub fn len(&self) -> usize {
		match self {
			Relation::NotLoaded | Relation::One(None) => 0,
			Relation::One(Some(_)) => 1,
			Relation::Many(items) => items.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub(crate) fn shape(&self) -> &'static str {
		match self {
			Relation::NotLoaded => "nothing",
			Relation::One(_) => Cardinality::One.as_str(),
			Relation::Many(_) => Cardinality::Many.as_str(),
		}
	}

	/// Iterate over the related items
	pub fn items(&self) -> std::slice::Iter<'_, RelatedItem<'a>> {
		match self {
			Relation::NotLoaded | Relation::One(None) => <&[RelatedItem<'a>]>::default().iter(),
			Relation::One(Some(item)) => std::slice::from_ref(item).iter(),
			Relation::Many(items) => items.iter(),
		}
	}
}
