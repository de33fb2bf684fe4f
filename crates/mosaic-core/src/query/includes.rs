//! Include paths for compound documents

use indexmap::IndexMap;

use crate::exception::{Error, Result};

/// Tree of relationship names parsed from dotted include paths
///
/// # Examples
///
/// ```
/// use mosaic_core::query::IncludeTree;
///
/// let tree = IncludeTree::parse("author,comments.author").unwrap();
/// assert!(tree.contains("author"));
/// assert!(tree.child("comments").unwrap().contains("author"));
/// assert!(!tree.contains("tags"));
/// assert_eq!(tree.paths(), vec!["author", "comments", "comments.author"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncludeTree {
	children: IndexMap<String, IncludeTree>,
}

impl IncludeTree {
	/// Tree that includes nothing
	pub fn empty() -> Self {
		Self::default()
	}

	/// Parse a comma separated list of dotted paths
	///
	/// An empty value yields an empty tree.
	pub fn parse(value: &str) -> Result<Self> {
		let mut tree = Self::default();
		if value.trim().is_empty() {
			return Ok(tree);
		}
		for path in value.split(',') {
			tree.insert_path(path.trim())?;
		}
		Ok(tree)
	}

	/// Add one dotted path
	pub fn insert_path(&mut self, path: &str) -> Result<()> {
		let mut node = self;
		for segment in path.split('.') {
			if segment.is_empty() {
				return Err(Error::invalid_query(
					"include",
					format!("'{}' contains an empty relationship name", path),
				));
			}
			node = node.children.entry(segment.to_string()).or_default();
		}
		Ok(())
	}

	pub fn contains(&self, relationship: &str) -> bool {
		self.children.contains_key(relationship)
	}

	pub fn child(&self, relationship: &str) -> Option<&IncludeTree> {
		self.children.get(relationship)
	}

	pub fn children(&self) -> impl Iterator<Item = (&str, &IncludeTree)> {
		self.children.iter().map(|(name, child)| (name.as_str(), child))
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	/// Every path in the tree, parents before children
	pub fn paths(&self) -> Vec<String> {
		let mut paths = Vec::new();
		self.collect_paths("", &mut paths);
		paths
	}

	fn collect_paths(&self, prefix: &str, paths: &mut Vec<String>) {
		for (name, child) in &self.children {
			let path = if prefix.is_empty() {
				name.clone()
			} else {
				format!("{}.{}", prefix, name)
			};
			paths.push(path.clone());
			child.collect_paths(&path, paths);
		}
	}
}
