//! Request query context
//!
//! A [`QueryContext`] collects everything a request asks for beyond the
//! resource itself: which page, which order, which filters, which fields and
//! which related resources. The host builds one per request, usually with
//! [`QueryContext::from_query_str`], and the engine only reads it.

mod fieldsets;
mod filtering;
mod includes;
mod pagination;
mod sorting;

pub use fieldsets::Fieldsets;
pub use filtering::{FilterExpression, FilterExpressions, FilterPredicate, Filtering, default_equality};
pub use includes::IncludeTree;
pub use pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_LIMIT, Pagination};
pub use sorting::{SortDirection, SortField, Sorting};

use crate::exception::{Error, Result};

/// Per-request query parameters
///
/// # Examples
///
/// ```
/// use mosaic_core::query::QueryContext;
///
/// let context = QueryContext::from_query_str(
///     "page[number]=2&page[size]=5&sort=-age&filter[city]=Oslo&fields[Person]=name,age&include=friends",
/// )
/// .unwrap();
///
/// let pagination = context.pagination.unwrap();
/// assert_eq!((pagination.page_number, pagination.page_size), (2, 5));
/// assert_eq!(context.sorting.to_string(), "-age");
/// assert_eq!(context.filtering.predicates[0].value, "Oslo");
/// assert!(context.fieldsets.allows("Person", "age"));
/// assert!(context.includes.unwrap().contains("friends"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
	/// `None` when the request is not paginated
	pub pagination: Option<Pagination>,
	pub sorting: Sorting,
	pub filtering: Filtering,
	pub fieldsets: Fieldsets,
	/// `None` applies the default include policy
	pub includes: Option<IncludeTree>,
}

impl QueryContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a raw query string with default pagination settings
	pub fn from_query_str(query: &str) -> Result<Self> {
		Self::parse(query, Pagination::default())
	}

	/// Parse a raw query string
	///
	/// `page_defaults` supplies the page size and limit used when the request
	/// carries a `page[...]` parameter but not all of them. Unknown
	/// parameters are ignored.
	pub fn parse(query: &str, page_defaults: Pagination) -> Result<Self> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.trim_start_matches('?'))
			.map_err(|err| Error::invalid_query("query", err.to_string()))?;

		let mut context = Self::default();
		for (key, value) in pairs {
			match split_family(&key) {
				Some(("page", "number")) => {
					let number = parse_page_value(&key, &value)?;
					if number == 0 {
						return Err(Error::invalid_query(key.as_str(), "page numbers start at 1"));
					}
					context.pagination = Some(
						context
							.pagination
							.unwrap_or(page_defaults)
							.with_page_number(number),
					);
				}
				Some(("page", "size")) => {
					let size = parse_page_value(&key, &value)?;
					context.pagination = Some(
						context
							.pagination
							.unwrap_or(page_defaults)
							.with_page_size(size),
					);
				}
				Some(("filter", name)) => {
					context
						.filtering
						.predicates
						.push(FilterPredicate::new(name, value));
				}
				Some(("fields", type_name)) => {
					let members = value
						.split(',')
						.map(str::trim)
						.filter(|member| !member.is_empty());
					context.fieldsets.insert(type_name, members);
				}
				_ if key == "sort" => context.sorting = Sorting::parse(&value)?,
				_ if key == "include" => {
					let tree = context.includes.get_or_insert_with(IncludeTree::empty);
					for path in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
						tree.insert_path(path)?;
					}
				}
				_ => tracing::debug!(parameter = %key, "Ignoring unrecognised query parameter"),
			}
		}
		Ok(context)
	}

	pub fn with_pagination(mut self, pagination: Pagination) -> Self {
		self.pagination = Some(pagination);
		self
	}

	pub fn with_sorting(mut self, sorting: Sorting) -> Self {
		self.sorting = sorting;
		self
	}

	pub fn with_filtering(mut self, filtering: Filtering) -> Self {
		self.filtering = filtering;
		self
	}

	pub fn with_fieldsets(mut self, fieldsets: Fieldsets) -> Self {
		self.fieldsets = fieldsets;
		self
	}

	pub fn with_includes(mut self, includes: IncludeTree) -> Self {
		self.includes = Some(includes);
		self
	}

	/// Register filter expressions on the filtering part
	pub fn with_filter_expressions(mut self, expressions: FilterExpressions) -> Self {
		self.filtering.available_filter_expressions = expressions;
		self
	}
}

/// Split `family[member]` into its two parts
fn split_family(key: &str) -> Option<(&str, &str)> {
	let (family, rest) = key.split_once('[')?;
	let member = rest.strip_suffix(']')?;
	if family.is_empty() || member.is_empty() || member.contains(['[', ']']) {
		return None;
	}
	Some((family, member))
}

fn parse_page_value(key: &str, value: &str) -> Result<usize> {
	value
		.trim()
		.parse::<usize>()
		.map_err(|_| Error::invalid_query(key, format!("'{}' is not a non-negative integer", value)))
}
