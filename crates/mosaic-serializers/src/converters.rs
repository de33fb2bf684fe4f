//! Attribute value converters and member-name casing

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use convert_case::{Case, Casing};
use mosaic_conf::MemberCase;
use serde_json::Value;

/// Rewrites attribute values on their way into a document
///
/// Converters run in registration order over every emitted attribute value.
/// Any `Fn(&str, &str, Value) -> Value` closure is a converter.
///
/// # Examples
///
/// ```
/// use mosaic_serializers::ValueConverter;
/// use serde_json::{Value, json};
///
/// let upper = |_: &str, attribute: &str, value: Value| match (attribute, value) {
///     ("name", Value::String(name)) => Value::String(name.to_uppercase()),
///     (_, value) => value,
/// };
///
/// assert_eq!(upper.convert("Person", "name", json!("ann")), json!("ANN"));
/// assert_eq!(upper.convert("Person", "age", json!(41)), json!(41));
/// ```
pub trait ValueConverter: Send + Sync {
	/// Convert `value` of `attribute` (declared name) on a resource of `resource_type`
	fn convert(&self, resource_type: &str, attribute: &str, value: Value) -> Value;
}

impl<F> ValueConverter for F
where
	F: Fn(&str, &str, Value) -> Value + Send + Sync,
{
	fn convert(&self, resource_type: &str, attribute: &str, value: Value) -> Value {
		self(resource_type, attribute, value)
	}
}

/// Ordered list of converters
#[derive(Clone, Default)]
pub struct Converters {
	converters: Vec<Arc<dyn ValueConverter>>,
}

impl Converters {
	pub const fn new() -> Self {
		Self {
			converters: Vec::new(),
		}
	}

	pub fn push(&mut self, converter: Arc<dyn ValueConverter>) {
		self.converters.push(converter);
	}

	pub fn with(mut self, converter: impl ValueConverter + 'static) -> Self {
		self.push(Arc::new(converter));
		self
	}

	pub fn len(&self) -> usize {
		self.converters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.converters.is_empty()
	}

	/// Run every converter over `value`
	pub fn apply(&self, resource_type: &str, attribute: &str, value: Value) -> Value {
		self.converters
			.iter()
			.fold(value, |value, converter| converter.convert(resource_type, attribute, value))
	}
}

impl fmt::Debug for Converters {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Converters")
			.field("len", &self.converters.len())
			.finish()
	}
}

/// Emitted member name for a declared attribute or relationship name
///
/// # Examples
///
/// ```
/// use mosaic_conf::MemberCase;
/// use mosaic_serializers::member_name;
///
/// assert_eq!(member_name(MemberCase::Kebab, "first_name"), "first-name");
/// assert_eq!(member_name(MemberCase::Camel, "first_name"), "firstName");
/// assert_eq!(member_name(MemberCase::AsDeclared, "first_name"), "first_name");
/// ```
pub fn member_name(case: MemberCase, declared: &str) -> Cow<'_, str> {
	match case {
		MemberCase::AsDeclared => Cow::Borrowed(declared),
		MemberCase::Kebab => Cow::Owned(declared.to_case(Case::Kebab)),
		MemberCase::Camel => Cow::Owned(declared.to_case(Case::Camel)),
	}
}
