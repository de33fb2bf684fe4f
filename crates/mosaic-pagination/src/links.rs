//! Pagination links

use mosaic_core::document::Links;
use mosaic_core::exception::{Error, Result};
use url::{Position, Url};

use crate::page::PageInfo;

/// Query parameter carrying the page number
pub const PAGE_NUMBER_PARAM: &str = "page[number]";

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "page[size]";

const RELATIVE_BASE: &str = "http://localhost";

/// The URI of the request being answered
///
/// Absolute URIs and origin-relative references (`/api/people?sort=name`)
/// are both accepted; links derived from a relative URI stay relative.
///
/// # Examples
///
/// ```
/// use mosaic_pagination::RequestUri;
///
/// let uri = RequestUri::parse("/api/people?sort=name").unwrap();
/// assert_eq!(uri.as_str(), "/api/people?sort=name");
/// assert_eq!(uri.path(), "/api/people");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUri {
	original: String,
	url: Url,
	relative: bool,
}

impl RequestUri {
	pub fn parse(uri: &str) -> Result<Self> {
		let invalid = |err: url::ParseError| Error::InvalidRequestUri {
			uri: uri.to_string(),
			message: err.to_string(),
		};
		let (url, relative) = match Url::parse(uri) {
			Ok(url) => (url, false),
			Err(url::ParseError::RelativeUrlWithoutBase) => {
				let base = Url::parse(RELATIVE_BASE).map_err(invalid)?;
				(base.join(uri).map_err(invalid)?, true)
			}
			Err(err) => return Err(invalid(err)),
		};
		Ok(Self {
			original: uri.to_string(),
			url,
			relative,
		})
	}

	/// The URI exactly as received
	pub fn as_str(&self) -> &str {
		&self.original
	}

	pub fn path(&self) -> &str {
		self.url.path()
	}

	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Resolve an absolute path against the request origin
	///
	/// Relative request URIs leave the path untouched.
	///
	/// # Examples
	///
	/// ```
	/// use mosaic_pagination::RequestUri;
	///
	/// let absolute = RequestUri::parse("http://x/api/people/1").unwrap();
	/// assert_eq!(absolute.resolve_path("/people/1/"), "http://x/people/1/");
	///
	/// let relative = RequestUri::parse("/api/people/1").unwrap();
	/// assert_eq!(relative.resolve_path("/people/1/"), "/people/1/");
	/// ```
	pub fn resolve_path(&self, path: &str) -> String {
		if self.relative {
			return path.to_string();
		}
		match self.url.join(path) {
			Ok(url) => url.to_string(),
			Err(err) => {
				tracing::warn!(path, error = %err, "Could not resolve link against request URI");
				path.to_string()
			}
		}
	}

	/// The request URI with its page parameters replaced
	///
	/// Other query parameters keep their order and values.
	pub fn with_page(&self, number: usize, size: usize) -> String {
		let mut rebuilt = self.url.clone();
		rebuilt
			.query_pairs_mut()
			.clear()
			.append_pair(PAGE_NUMBER_PARAM, &number.to_string())
			.append_pair(PAGE_SIZE_PARAM, &size.to_string());

		for (key, value) in self.url.query_pairs() {
			if key != PAGE_NUMBER_PARAM && key != PAGE_SIZE_PARAM {
				rebuilt.query_pairs_mut().append_pair(&key, &value);
			}
		}
		self.render(&rebuilt)
	}

	fn render(&self, url: &Url) -> String {
		if self.relative {
			url[Position::BeforePath..].to_string()
		} else {
			url.to_string()
		}
	}
}

/// `first`, `last`, `prev` and `next` links for a page
///
/// `prev` is omitted on the first page and `next` on the last one.
pub fn pagination_links(uri: &RequestUri, info: &PageInfo) -> Links {
	let mut links = Links::new();
	links.insert("first".to_string(), uri.with_page(1, info.size));
	links.insert("last".to_string(), uri.with_page(info.last_page(), info.size));
	if info.has_previous() {
		let previous = (info.number - 1).min(info.last_page());
		links.insert("prev".to_string(), uri.with_page(previous, info.size));
	}
	if info.has_next() {
		links.insert("next".to_string(), uri.with_page(info.number + 1, info.size));
	}
	links
}
