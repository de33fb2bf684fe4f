//! Registry mapping domain types to their resource descriptors

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use super::descriptor::{ModelRef, ResourceDescriptor};
use super::relation::{DomainObject, concrete_type_id};
use crate::exception::{Error, Result};

/// Process-wide set of resource descriptors
///
/// The registry is filled once during start-up and is read-only afterwards;
/// share it behind an `Arc` to serve concurrent requests.
///
/// # Examples
///
/// ```
/// use mosaic_core::model::{ModelRegistry, ResourceModel};
///
/// struct Tag { id: u32, label: String }
///
/// let mut registry = ModelRegistry::new();
/// registry
///     .register(
///         ResourceModel::<Tag>::new()
///             .id(|t| t.id)
///             .attribute("label", |t| t.label.clone())
///             .build()
///             .unwrap(),
///     )
///     .unwrap();
///
/// let tag = Tag { id: 1, label: "rust".into() };
/// assert_eq!(registry.resolve(&tag).unwrap().type_name(), "Tag");
/// assert!(registry.by_type_name("Tag").is_some());
/// ```
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
	by_type: HashMap<TypeId, Arc<ResourceDescriptor>>,
	by_name: HashMap<String, TypeId>,
}

impl ModelRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a descriptor under the Rust type it was declared for
	///
	/// Registering a second descriptor for the same Rust type, or a second
	/// descriptor with the same wire type name, is a configuration error.
	pub fn register(&mut self, descriptor: ResourceDescriptor) -> Result<Arc<ResourceDescriptor>> {
		let type_id = descriptor.model_type();
		if let Some(existing) = self.by_type.get(&type_id) {
			return Err(Error::configuration(
				descriptor.model_name(),
				format!(
					"type is already registered as '{}'",
					existing.model_name()
				),
			));
		}
		if self.by_name.contains_key(descriptor.type_name()) {
			return Err(Error::configuration(
				descriptor.model_name(),
				format!(
					"resource type '{}' is already registered",
					descriptor.type_name()
				),
			));
		}

		let descriptor = Arc::new(descriptor);
		self.by_name
			.insert(descriptor.type_name().to_string(), type_id);
		self.by_type.insert(type_id, Arc::clone(&descriptor));
		Ok(descriptor)
	}

	/// Builder-style variant of [`register`](Self::register)
	pub fn with(mut self, descriptor: ResourceDescriptor) -> Result<Self> {
		self.register(descriptor)?;
		Ok(self)
	}

	/// Descriptor of Rust type `U`
	pub fn get<U: Any>(&self) -> Option<&Arc<ResourceDescriptor>> {
		self.by_type.get(&TypeId::of::<U>())
	}

	pub fn get_by_type_id(&self, type_id: TypeId) -> Option<&Arc<ResourceDescriptor>> {
		self.by_type.get(&type_id)
	}

	/// Descriptor matching the concrete type of a live object
	pub fn resolve(&self, object: &DomainObject) -> Option<&Arc<ResourceDescriptor>> {
		self.by_type.get(&concrete_type_id(object))
	}

	/// Descriptor by wire-visible resource type
	pub fn by_type_name(&self, type_name: &str) -> Option<&Arc<ResourceDescriptor>> {
		self.by_name
			.get(type_name)
			.and_then(|type_id| self.by_type.get(type_id))
	}

	/// Descriptor of a relationship target
	pub fn resolve_target(&self, target: ModelRef) -> Result<&Arc<ResourceDescriptor>> {
		self.by_type
			.get(&target.type_id())
			.ok_or_else(|| Error::UnresolvedResource {
				type_name: target.rust_name().to_string(),
			})
	}

	pub fn len(&self) -> usize {
		self.by_type.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_type.is_empty()
	}

	/// Registered descriptors, ordered by wire type name
	pub fn descriptors(&self) -> Vec<&Arc<ResourceDescriptor>> {
		let mut descriptors: Vec<_> = self.by_type.values().collect();
		descriptors.sort_by(|a, b| a.type_name().cmp(b.type_name()));
		descriptors
	}
}
