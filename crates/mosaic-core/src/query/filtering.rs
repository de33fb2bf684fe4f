//! Filter parameters and filter expressions

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// Compares an attribute value against the raw filter string
pub type FilterExpression = Arc<dyn Fn(&Value, &str) -> bool + Send + Sync>;

/// One `filter[name]=value` predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterPredicate {
	pub name: String,
	pub value: String,
}

impl FilterPredicate {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}

/// Equality between a JSON value and a raw query-string value
///
/// Strings compare verbatim, other scalars compare by their JSON text, and
/// `null` matches the empty string or `null`.
///
/// # Examples
///
/// ```
/// use mosaic_core::query::default_equality;
/// use serde_json::json;
///
/// assert!(default_equality(&json!("Ann"), "Ann"));
/// assert!(default_equality(&json!(42), "42"));
/// assert!(default_equality(&json!(true), "true"));
/// assert!(!default_equality(&json!("ann"), "Ann"));
/// ```
pub fn default_equality(value: &Value, raw: &str) -> bool {
	match value {
		Value::String(text) => text == raw,
		Value::Null => raw.is_empty() || raw == "null",
		Value::Number(number) => raw.parse::<f64>().ok() == number.as_f64() || number.to_string() == raw,
		other => other.to_string() == raw,
	}
}

/// Named comparison functions, keyed by attribute name
///
/// Attributes without a registered expression use [`default_equality`].
///
/// # Examples
///
/// ```
/// use mosaic_core::query::FilterExpressions;
/// use serde_json::json;
///
/// let expressions = FilterExpressions::new().with("name", |value, raw| {
///     value.as_str().is_some_and(|name| name.eq_ignore_ascii_case(raw))
/// });
/// assert!(expressions.matches("name", &json!("Ann"), "ann"));
/// assert!(!expressions.matches("city", &json!("Oslo"), "oslo"));
/// ```
#[derive(Clone, Default)]
pub struct FilterExpressions {
	expressions: IndexMap<String, FilterExpression>,
}

impl FilterExpressions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an expression for one attribute, replacing any earlier one
	pub fn register<F>(&mut self, name: impl Into<String>, expression: F)
	where
		F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
	{
		self.expressions.insert(name.into(), Arc::new(expression));
	}

	pub fn with<F>(mut self, name: impl Into<String>, expression: F) -> Self
	where
		F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
	{
		self.register(name, expression);
		self
	}

	pub fn get(&self, name: &str) -> Option<&FilterExpression> {
		self.expressions.get(name)
	}

	/// Evaluate the expression registered for `name` (or equality)
	pub fn matches(&self, name: &str, value: &Value, raw: &str) -> bool {
		match self.expressions.get(name) {
			Some(expression) => expression(value, raw),
			None => default_equality(value, raw),
		}
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.expressions.keys().map(String::as_str)
	}
}

impl fmt::Debug for FilterExpressions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.expressions.keys()).finish()
	}
}

/// Requested filters plus the expressions available to evaluate them
#[derive(Debug, Clone, Default)]
pub struct Filtering {
	pub predicates: Vec<FilterPredicate>,
	pub available_filter_expressions: FilterExpressions,
}

impl Filtering {
	pub fn new(predicates: Vec<FilterPredicate>) -> Self {
		Self {
			predicates,
			available_filter_expressions: FilterExpressions::default(),
		}
	}

	pub fn with_expressions(mut self, expressions: FilterExpressions) -> Self {
		self.available_filter_expressions = expressions;
		self
	}

	pub fn is_empty(&self) -> bool {
		self.predicates.is_empty()
	}
}
