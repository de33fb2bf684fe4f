//! Resolved resource instances

use std::fmt;
use std::sync::Arc;

use super::descriptor::ResourceDescriptor;
use super::relation::DomainObject;
use crate::exception::Result;

/// De-duplication key of a resource inside one document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
	pub type_name: String,
	pub id: String,
}

impl ResourceKey {
	pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			id: id.into(),
		}
	}
}

impl fmt::Display for ResourceKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.type_name, self.id)
	}
}

/// One domain object paired with its descriptor and identifier
///
/// Instances live for a single serialization pass.
pub struct ResourceInstance<'a> {
	object: &'a DomainObject,
	descriptor: Arc<ResourceDescriptor>,
	id: String,
}

impl<'a> ResourceInstance<'a> {
	/// Pair `object` with `descriptor`, extracting the identifier
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use mosaic_core::model::{ResourceInstance, ResourceKey, ResourceModel};
	///
	/// struct Person { id: u32 }
	///
	/// let descriptor = Arc::new(ResourceModel::<Person>::named("PersonModel").id(|p| p.id).build().unwrap());
	/// let person = Person { id: 9 };
	/// let instance = ResourceInstance::resolve(&person, descriptor).unwrap();
	/// assert_eq!(instance.key(), ResourceKey::new("Person", "9"));
	/// ```
	pub fn resolve(object: &'a DomainObject, descriptor: Arc<ResourceDescriptor>) -> Result<Self> {
		let id = descriptor.resource_id(object)?;
		Ok(Self {
			object,
			descriptor,
			id,
		})
	}

	pub fn object(&self) -> &'a DomainObject {
		self.object
	}

	pub fn descriptor(&self) -> &Arc<ResourceDescriptor> {
		&self.descriptor
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn type_name(&self) -> &str {
		self.descriptor.type_name()
	}

	pub fn key(&self) -> ResourceKey {
		ResourceKey::new(self.descriptor.type_name(), self.id.clone())
	}
}

impl fmt::Debug for ResourceInstance<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResourceInstance")
			.field("type_name", &self.descriptor.type_name())
			.field("id", &self.id)
			.finish_non_exhaustive()
	}
}
