//! JSON:API document values
//!
//! These types are the in-memory shape of a response document. They are
//! plain data: building them is the serializer's job, encoding them to text
//! is `serde_json`'s. Every map preserves insertion order so the same input
//! always renders the same bytes.

mod error;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

pub use error::ApiError;

/// Link members keyed by relation name (`self`, `related`, `first`, ...)
pub type Links = IndexMap<String, String>;

/// Free-form `meta` member
pub type Meta = IndexMap<String, Value>;

/// A complete response document
///
/// A document carries either primary data or errors, never both.
///
/// # Examples
///
/// ```
/// use mosaic_core::document::Document;
/// use serde_json::json;
///
/// let document = Document::null();
/// assert_eq!(serde_json::to_value(&document).unwrap(), json!({ "data": null }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
	/// Success document
	Data {
		data: PrimaryData,
		#[serde(skip_serializing_if = "Vec::is_empty")]
		included: Vec<ResourceObject>,
		#[serde(skip_serializing_if = "IndexMap::is_empty")]
		links: Links,
		#[serde(skip_serializing_if = "IndexMap::is_empty")]
		meta: Meta,
	},
	/// Error document
	Errors {
		errors: Vec<ApiError>,
		#[serde(skip_serializing_if = "IndexMap::is_empty")]
		meta: Meta,
	},
}

impl Document {
	/// Success document with `data: null`
	pub fn null() -> Self {
		Self::from_data(PrimaryData::Null)
	}

	pub fn from_data(data: PrimaryData) -> Self {
		Document::Data {
			data,
			included: Vec::new(),
			links: Links::new(),
			meta: Meta::new(),
		}
	}

	pub fn from_errors(errors: Vec<ApiError>) -> Self {
		Document::Errors {
			errors,
			meta: Meta::new(),
		}
	}

	pub fn is_error(&self) -> bool {
		matches!(self, Document::Errors { .. })
	}

	/// Primary data of a success document
	pub fn data(&self) -> Option<&PrimaryData> {
		match self {
			Document::Data { data, .. } => Some(data),
			Document::Errors { .. } => None,
		}
	}

	pub fn included(&self) -> &[ResourceObject] {
		match self {
			Document::Data { included, .. } => included,
			Document::Errors { .. } => &[],
		}
	}

	pub fn errors(&self) -> &[ApiError] {
		match self {
			Document::Data { .. } => &[],
			Document::Errors { errors, .. } => errors,
		}
	}

	/// Top-level links (empty for error documents)
	pub fn links(&self) -> Option<&Links> {
		match self {
			Document::Data { links, .. } => Some(links),
			Document::Errors { .. } => None,
		}
	}

	pub fn meta(&self) -> &Meta {
		match self {
			Document::Data { meta, .. } | Document::Errors { meta, .. } => meta,
		}
	}

	pub fn meta_mut(&mut self) -> &mut Meta {
		match self {
			Document::Data { meta, .. } | Document::Errors { meta, .. } => meta,
		}
	}

	/// Encode into a `serde_json::Value`
	pub fn to_value(&self) -> serde_json::Result<Value> {
		serde_json::to_value(self)
	}
}

/// Primary `data` member
///
/// An empty collection and `Null` are distinct: the former renders `[]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
	Null,
	Single(Box<ResourceObject>),
	Collection(Vec<ResourceObject>),
}

impl PrimaryData {
	/// Resource objects in document order
	pub fn resources(&self) -> &[ResourceObject] {
		match self {
			PrimaryData::Null => &[],
			PrimaryData::Single(resource) => std::slice::from_ref(&**resource),
			PrimaryData::Collection(resources) => resources,
		}
	}
}

/// A fully serialized resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceObject {
	#[serde(rename = "type")]
	pub type_name: String,
	pub id: String,
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub attributes: IndexMap<String, Value>,
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub relationships: IndexMap<String, RelationshipObject>,
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub links: Links,
}

impl ResourceObject {
	pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			id: id.into(),
			attributes: IndexMap::new(),
			relationships: IndexMap::new(),
			links: Links::new(),
		}
	}

	pub fn identifier(&self) -> ResourceIdentifier {
		ResourceIdentifier::new(self.type_name.clone(), self.id.clone())
	}
}

/// `{ "type", "id" }` reference to a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceIdentifier {
	#[serde(rename = "type")]
	pub type_name: String,
	pub id: String,
}

impl ResourceIdentifier {
	pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			id: id.into(),
		}
	}
}

/// Resource linkage of a relationship
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Linkage {
	/// To-one linkage; `None` renders as `null`
	One(Option<ResourceIdentifier>),
	/// To-many linkage; may be empty
	Many(Vec<ResourceIdentifier>),
}

/// Links of a relationship object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipLinks {
	#[serde(rename = "self")]
	pub self_link: String,
	pub related: String,
}

/// One entry of a resource's `relationships` member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipObject {
	pub links: RelationshipLinks,
	/// Present only when the relationship was loaded
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Linkage>,
}
