//! Applying pagination to candidate content

use mosaic_core::exception::{Error, Result};
use mosaic_core::query::{Pagination, QueryContext};

use crate::page::{Page, PageInfo};

/// Content on its way to the serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate<T> {
	Null,
	Single(T),
	Sequence(Vec<T>),
	/// A sequence that has already been paginated
	Page(Page<T>),
}

impl<T> Candidate<T> {
	/// The page, if pagination was applied
	pub fn page_info(&self) -> Option<&PageInfo> {
		match self {
			Candidate::Page(page) => Some(&page.info),
			_ => None,
		}
	}
}

/// Applies the request's pagination parameters to candidate content
///
/// # Examples
///
/// ```
/// use mosaic_core::query::{Pagination, QueryContext};
/// use mosaic_pagination::{Candidate, PaginationInterpreter};
///
/// let context = QueryContext::new().with_pagination(Pagination::new(2, 3));
/// let interpreter = PaginationInterpreter::new(&context);
///
/// let paged = interpreter.apply_if_applicable(Candidate::Sequence((1..=10).collect()));
/// match &paged {
///     Candidate::Page(page) => assert_eq!(page.items, vec![4, 5, 6]),
///     other => panic!("unexpected {:?}", other),
/// }
///
/// // Re-applying the same parameters changes nothing
/// assert_eq!(interpreter.apply_if_applicable(paged.clone()), paged);
///
/// // Single objects pass through untouched
/// assert_eq!(interpreter.apply_if_applicable(Candidate::Single(7)), Candidate::Single(7));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PaginationInterpreter<'a> {
	context: &'a QueryContext,
}

impl<'a> PaginationInterpreter<'a> {
	pub fn new(context: &'a QueryContext) -> Self {
		Self { context }
	}

	pub fn pagination(&self) -> Option<&'a Pagination> {
		self.context.pagination.as_ref()
	}

	/// Reject page sizes above the configured limit
	///
	/// This is a request-validation rule: an oversized page is an error, it is
	/// never silently truncated.
	pub fn validate(&self) -> Result<()> {
		match self.pagination() {
			Some(pagination) if pagination.exceeds_limit() => {
				tracing::debug!(
					requested = pagination.page_size,
					limit = pagination.page_size_limit,
					"Rejected oversized page request"
				);
				Err(Error::PageSizeExceeded {
					requested: pagination.page_size,
					limit: pagination.page_size_limit,
				})
			}
			_ => Ok(()),
		}
	}

	/// Slice sequences according to the request; pass anything else through
	pub fn apply_if_applicable<T>(&self, content: Candidate<T>) -> Candidate<T> {
		let Some(pagination) = self.pagination() else {
			return content;
		};
		match content {
			Candidate::Sequence(items) => Candidate::Page(paginate(items, pagination)),
			Candidate::Page(page) if page.info.matches(pagination) => Candidate::Page(page),
			Candidate::Page(page) => Candidate::Page(paginate(page.items, pagination)),
			other => other,
		}
	}
}

/// Cut one page out of `items`
///
/// Skips `(page_number - 1) * page_size` items and takes `page_size`, with the
/// page size clamped to `[1, page_size_limit]`.
pub fn paginate<T>(items: Vec<T>, pagination: &Pagination) -> Page<T> {
	let total_count = items.len();
	let size = pagination.effective_page_size();
	let number = pagination.effective_page_number();
	let page_items: Vec<T> = items
		.into_iter()
		.skip(pagination.offset())
		.take(size)
		.collect();

	tracing::debug!(
		page = number,
		size,
		total_count,
		returned = page_items.len(),
		"Applied pagination"
	);

	Page::new(
		page_items,
		PageInfo {
			number,
			size,
			total_count,
		},
	)
}
