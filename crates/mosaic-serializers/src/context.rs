//! Per-call state of a graph walk

use std::collections::HashSet;

use indexmap::IndexMap;
use mosaic_core::document::ResourceObject;
use mosaic_core::model::ResourceKey;

/// Tracks which resources a document already carries
///
/// Primary resources are marked up front so they never reappear in
/// `included`. Included resources are reserved in an arena before their
/// relationships are walked, which both stops cycles and fixes their position
/// in pre-order.
#[derive(Debug, Default)]
pub(crate) struct WalkContext {
	primary: HashSet<ResourceKey>,
	included: IndexMap<ResourceKey, Option<ResourceObject>>,
	depth: usize,
}

impl WalkContext {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn mark_primary(&mut self, key: ResourceKey) {
		self.primary.insert(key);
	}

	/// Whether `key` is already part of the document
	pub(crate) fn is_visited(&self, key: &ResourceKey) -> bool {
		self.primary.contains(key) || self.included.contains_key(key)
	}

	/// Claim a slot in `included`
	///
	/// Returns `false` when the resource is already in the document.
	pub(crate) fn reserve(&mut self, key: ResourceKey) -> bool {
		if self.is_visited(&key) {
			return false;
		}
		self.included.insert(key, None);
		true
	}

	pub(crate) fn fill(&mut self, key: &ResourceKey, resource: ResourceObject) {
		if let Some(slot) = self.included.get_mut(key) {
			*slot = Some(resource);
		}
	}

	pub(crate) fn depth(&self) -> usize {
		self.depth
	}

	pub(crate) fn descend(&mut self) {
		self.depth += 1;
	}

	pub(crate) fn ascend(&mut self) {
		self.depth = self.depth.saturating_sub(1);
	}

	/// Included resources in the order they were first reached
	pub(crate) fn into_included(self) -> Vec<ResourceObject> {
		self.included.into_values().flatten().collect()
	}
}
