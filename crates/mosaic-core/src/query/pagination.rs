//! Page-number pagination parameters

/// Page size used when a request does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size a request may ask for unless configured otherwise
pub const DEFAULT_PAGE_SIZE_LIMIT: usize = 100;

/// Pagination parameters of one request
///
/// `page_number` is 1-based. `page_size` is what the client asked for;
/// [`effective_page_size`](Self::effective_page_size) is what a slice is cut with.
///
/// # Examples
///
/// ```
/// use mosaic_core::query::Pagination;
///
/// let pagination = Pagination::new(3, 20);
/// assert_eq!(pagination.offset(), 40);
/// assert!(!pagination.exceeds_limit());
///
/// let greedy = Pagination::new(1, 1_000);
/// assert!(greedy.exceeds_limit());
/// assert_eq!(greedy.effective_page_size(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
	pub page_number: usize,
	pub page_size: usize,
	pub page_size_limit: usize,
}

impl Default for Pagination {
	fn default() -> Self {
		Self {
			page_number: 1,
			page_size: DEFAULT_PAGE_SIZE,
			page_size_limit: DEFAULT_PAGE_SIZE_LIMIT,
		}
	}
}

impl Pagination {
	pub fn new(page_number: usize, page_size: usize) -> Self {
		Self {
			page_number,
			page_size,
			..Self::default()
		}
	}

	pub fn with_page_number(mut self, page_number: usize) -> Self {
		self.page_number = page_number;
		self
	}

	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size;
		self
	}

	pub fn with_limit(mut self, page_size_limit: usize) -> Self {
		self.page_size_limit = page_size_limit;
		self
	}

	/// Whether the requested page size is above the limit
	pub fn exceeds_limit(&self) -> bool {
		self.page_size > self.page_size_limit
	}

	/// Page size clamped to `[1, page_size_limit]`
	pub fn effective_page_size(&self) -> usize {
		self.page_size.clamp(1, self.page_size_limit.max(1))
	}

	/// 1-based page number; page `0` is treated as the first page
	pub fn effective_page_number(&self) -> usize {
		self.page_number.max(1)
	}

	/// Number of items skipped before this page
	pub fn offset(&self) -> usize {
		(self.effective_page_number() - 1).saturating_mul(self.effective_page_size())
	}
}
