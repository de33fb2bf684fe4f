//! Error objects

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::exception::{Error, ErrorKind, HttpFault};

const INTERNAL_ERROR_TITLE: &str = "Internal server error";

/// Normalised error record rendered into an error document
///
/// Serialises as
/// `{ "type", "status", "title", "detail", "code"?, "links": { "about" }? }`.
///
/// # Examples
///
/// ```
/// use mosaic_core::document::ApiError;
/// use mosaic_core::exception::Error;
///
/// let error = ApiError::from_fault(&Error::PageSizeExceeded { requested: 500, limit: 100 });
/// let value = serde_json::to_value(&error).unwrap();
/// assert_eq!(value["type"], "client");
/// assert_eq!(value["status"], "400");
/// assert_eq!(value["detail"], "Page size exceeds page size limit for queries.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
	pub kind: ErrorKind,
	pub status: u16,
	pub title: String,
	pub detail: String,
	pub code: Option<String>,
	pub help_link: Option<String>,
}

impl ApiError {
	pub fn new(kind: ErrorKind, title: impl Into<String>, detail: impl Into<String>) -> Self {
		Self {
			kind,
			status: kind.status_code(),
			title: title.into(),
			detail: detail.into(),
			code: None,
			help_link: None,
		}
	}

	pub fn client(detail: impl Into<String>) -> Self {
		Self::new(ErrorKind::Client, "Bad request", detail)
	}

	pub fn server(detail: impl Into<String>) -> Self {
		Self::new(ErrorKind::Server, INTERNAL_ERROR_TITLE, detail)
	}

	/// Map any fault to an error record
	///
	/// Engine errors keep their own classification, [`HttpFault`]s carry
	/// their status, and anything else becomes a server error. Never fails.
	pub fn from_fault(fault: &(dyn std::error::Error + 'static)) -> Self {
		if let Some(error) = fault.downcast_ref::<Error>() {
			return Self::from(error);
		}
		if let Some(fault) = fault.downcast_ref::<HttpFault>() {
			return Self::from(fault);
		}

		tracing::warn!(fault = %fault, "Unclassified fault mapped to a server error");
		Self::server(fault.to_string())
	}

	pub fn with_help_link(mut self, link: impl Into<String>) -> Self {
		self.help_link = Some(link.into());
		self
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());
		self
	}
}

impl From<&Error> for ApiError {
	fn from(error: &Error) -> Self {
		let kind = error.kind();
		if kind == ErrorKind::Server {
			tracing::warn!(error = %error, "Engine error mapped to a server error");
		}
		Self::new(kind, error.title(), error.to_string()).with_code(error.code())
	}
}

impl From<Error> for ApiError {
	fn from(error: Error) -> Self {
		Self::from(&error)
	}
}

impl From<&HttpFault> for ApiError {
	fn from(fault: &HttpFault) -> Self {
		let kind = fault.kind();
		let title = match (&fault.title, kind) {
			(Some(title), _) => title.clone(),
			(None, ErrorKind::Client) => "Bad request".to_string(),
			(None, ErrorKind::Server) => INTERNAL_ERROR_TITLE.to_string(),
		};
		Self {
			kind,
			status: fault.status,
			title,
			detail: fault.detail.clone(),
			code: fault.code.clone(),
			help_link: None,
		}
	}
}

impl Serialize for ApiError {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		struct About<'a>(&'a str);

		impl Serialize for About<'_> {
			fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
				let mut map = serializer.serialize_map(Some(1))?;
				map.serialize_entry("about", self.0)?;
				map.end()
			}
		}

		let mut map = serializer.serialize_map(None)?;
		map.serialize_entry("type", &self.kind)?;
		map.serialize_entry("status", &self.status.to_string())?;
		map.serialize_entry("title", &self.title)?;
		map.serialize_entry("detail", &self.detail)?;
		if let Some(code) = &self.code {
			map.serialize_entry("code", code)?;
		}
		if let Some(link) = &self.help_link {
			map.serialize_entry("links", &About(link))?;
		}
		map.end()
	}
}
