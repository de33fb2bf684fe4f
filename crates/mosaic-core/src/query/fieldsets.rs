//! Sparse fieldsets

use indexmap::IndexMap;

/// Per resource type, the member names a request asked for
///
/// Types without an entry get every member.
///
/// # Examples
///
/// ```
/// use mosaic_core::query::Fieldsets;
///
/// let fieldsets = Fieldsets::new().with("Person", ["name"]);
/// assert!(fieldsets.allows("Person", "name"));
/// assert!(!fieldsets.allows("Person", "age"));
/// assert!(fieldsets.allows("Article", "title"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fieldsets {
	by_type: IndexMap<String, Vec<String>>,
}

impl Fieldsets {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert<I, S>(&mut self, type_name: impl Into<String>, members: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.by_type
			.insert(type_name.into(), members.into_iter().map(Into::into).collect());
	}

	pub fn with<I, S>(mut self, type_name: impl Into<String>, members: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.insert(type_name, members);
		self
	}

	/// Requested members of `type_name`, if restricted
	pub fn for_type(&self, type_name: &str) -> Option<&[String]> {
		self.by_type.get(type_name).map(Vec::as_slice)
	}

	pub fn allows(&self, type_name: &str, member: &str) -> bool {
		self.for_type(type_name)
			.is_none_or(|members| members.iter().any(|m| m == member))
	}

	pub fn is_empty(&self) -> bool {
		self.by_type.is_empty()
	}
}
