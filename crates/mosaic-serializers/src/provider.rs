//! Host hook for choosing the primary resource descriptor

use std::sync::Arc;

use mosaic_core::model::ResourceDescriptor;

use crate::facade::Content;

/// Chooses the descriptor for response content when the caller passes none
///
/// Returning `None` for anything but null content is a server error; the
/// registry is not consulted as a fallback.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use mosaic_core::model::{ResourceDescriptor, ResourceModel};
/// use mosaic_serializers::{Content, ResourceProvider};
///
/// struct Person { id: u32 }
///
/// struct PeopleOnly(Arc<ResourceDescriptor>);
///
/// impl ResourceProvider for PeopleOnly {
///     fn resolve(&self, content: &Content<'_>) -> Option<Arc<ResourceDescriptor>> {
///         content.is_data().then(|| Arc::clone(&self.0))
///     }
/// }
///
/// let people = Arc::new(ResourceModel::<Person>::new().id(|p| p.id).build().unwrap());
/// let provider = PeopleOnly(people);
/// let person = Person { id: 1 };
/// assert!(provider.resolve(&Content::single(&person)).is_some());
/// ```
pub trait ResourceProvider: Send + Sync {
	fn resolve(&self, content: &Content<'_>) -> Option<Arc<ResourceDescriptor>>;
}

impl<F> ResourceProvider for F
where
	F: Fn(&Content<'_>) -> Option<Arc<ResourceDescriptor>> + Send + Sync,
{
	fn resolve(&self, content: &Content<'_>) -> Option<Arc<ResourceDescriptor>> {
		self(content)
	}
}
