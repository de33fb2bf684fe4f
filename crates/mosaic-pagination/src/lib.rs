//! # Mosaic Pagination
//!
//! Page-number pagination for JSON:API documents.
//!
//! - [`PaginationInterpreter`] validates the requested page size and slices
//!   candidate sequences into a [`Page`]
//! - [`pagination_links`] rebuilds `first`/`last`/`prev`/`next` links from the
//!   request URI, replacing `page[number]` and `page[size]`
//! - [`PageInfo::meta`] produces the `meta.page` block
//!
//! ## Example
//!
//! ```
//! use mosaic_core::query::QueryContext;
//! use mosaic_pagination::{Candidate, PaginationInterpreter, RequestUri, pagination_links};
//!
//! let context = QueryContext::from_query_str("page[number]=2&page[size]=2").unwrap();
//! let interpreter = PaginationInterpreter::new(&context);
//! interpreter.validate().unwrap();
//!
//! let content = interpreter.apply_if_applicable(Candidate::Sequence(vec!["a", "b", "c", "d", "e"]));
//! let info = content.page_info().unwrap();
//! assert_eq!(info.total_pages(), 3);
//!
//! let uri = RequestUri::parse("http://example.com/letters?page[number]=2&page[size]=2").unwrap();
//! let links = pagination_links(&uri, info);
//! assert_eq!(links.len(), 4);
//! ```

mod interpreter;
mod links;
mod page;

pub use interpreter::{Candidate, PaginationInterpreter, paginate};
pub use links::{PAGE_NUMBER_PARAM, PAGE_SIZE_PARAM, RequestUri, pagination_links};
pub use page::{Page, PageInfo, PageMeta};
