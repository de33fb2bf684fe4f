//! Pages cut from a candidate sequence

use mosaic_core::query::Pagination;
use serde::Serialize;

/// Parameters a page was cut with, plus the size of its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageInfo {
	/// 1-based page number
	pub number: usize,
	/// Effective page size
	pub size: usize,
	/// Number of items in the whole source sequence
	pub total_count: usize,
}

impl PageInfo {
	/// Number of pages needed for `total_count` items
	///
	/// # Examples
	///
	/// ```
	/// use mosaic_pagination::PageInfo;
	///
	/// let info = PageInfo { number: 1, size: 10, total_count: 25 };
	/// assert_eq!(info.total_pages(), 3);
	/// assert_eq!(PageInfo { number: 1, size: 10, total_count: 0 }.total_pages(), 0);
	/// ```
	pub fn total_pages(&self) -> usize {
		self.total_count.div_ceil(self.size.max(1))
	}

	/// Number of the last page; `1` for an empty source
	pub fn last_page(&self) -> usize {
		self.total_pages().max(1)
	}

	pub fn has_previous(&self) -> bool {
		self.number > 1
	}

	pub fn has_next(&self) -> bool {
		self.number < self.total_pages()
	}

	/// Whether this page was cut with the given request parameters
	pub fn matches(&self, pagination: &Pagination) -> bool {
		self.number == pagination.effective_page_number()
			&& self.size == pagination.effective_page_size()
	}

	/// `meta.page` member
	pub fn meta(&self) -> PageMeta {
		PageMeta {
			number: self.number,
			size: self.size,
			total_pages: self.total_pages(),
			total_count: self.total_count,
		}
	}
}

/// Serialisable `meta.page` block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageMeta {
	pub number: usize,
	pub size: usize,
	pub total_pages: usize,
	pub total_count: usize,
}

/// A single page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
	/// Items in this page, in source order
	pub items: Vec<T>,
	pub info: PageInfo,
}

impl<T> Page<T> {
	pub fn new(items: Vec<T>, info: PageInfo) -> Self {
		Self { items, info }
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// 1-based index of the first item, `0` for an empty page
	///
	/// # Examples
	///
	/// ```
	/// use mosaic_pagination::{Page, PageInfo};
	///
	/// let page = Page::new(vec!["d", "e", "f"], PageInfo { number: 2, size: 3, total_count: 9 });
	/// assert_eq!(page.start_index(), 4);
	/// assert_eq!(page.end_index(), 6);
	/// ```
	pub fn start_index(&self) -> usize {
		if self.items.is_empty() {
			0
		} else {
			(self.info.number - 1) * self.info.size + 1
		}
	}

	/// 1-based index of the last item, `0` for an empty page
	pub fn end_index(&self) -> usize {
		if self.items.is_empty() {
			0
		} else {
			self.start_index() + self.items.len() - 1
		}
	}
}
