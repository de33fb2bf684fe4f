//! Error types shared by every Mosaic crate
//!
//! Every failure the engine can report is an [`Error`]. Each variant is
//! classified as either a client error (the request violates a contract) or a
//! server error (the host integration is misconfigured), see [`ErrorKind`].
//! The classification decides the `type` and `status` members of the error
//! object that ends up in an error document.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type used throughout Mosaic
pub type Result<T> = std::result::Result<T, Error>;

/// Who is at fault for an error
///
/// # Examples
///
/// ```
/// use mosaic_core::exception::ErrorKind;
///
/// assert_eq!(ErrorKind::Client.status_code(), 400);
/// assert_eq!(ErrorKind::Server.status_code(), 500);
/// assert_eq!(ErrorKind::Client.to_string(), "client");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
	/// The caller supplied input that violates a contract
	Client,
	/// The host or engine is misconfigured
	Server,
}

impl ErrorKind {
	/// HTTP status code conventionally associated with this kind
	pub fn status_code(&self) -> u16 {
		match self {
			ErrorKind::Client => 400,
			ErrorKind::Server => 500,
		}
	}

	/// Lowercase wire name (`client` / `server`)
	pub fn as_str(&self) -> &'static str {
		match self {
			ErrorKind::Client => "client",
			ErrorKind::Server => "server",
		}
	}
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors raised while describing, querying or serializing resources
///
/// # Examples
///
/// ```
/// use mosaic_core::exception::{Error, ErrorKind};
///
/// let err = Error::PageSizeExceeded { requested: 500, limit: 100 };
/// assert_eq!(err.kind(), ErrorKind::Client);
/// assert_eq!(err.to_string(), "Page size exceeds page size limit for queries.");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// The requested page size is larger than the configured limit
	#[error("Page size exceeds page size limit for queries.")]
	PageSizeExceeded { requested: usize, limit: usize },

	/// A query-string parameter could not be interpreted
	#[error("Invalid query parameter '{parameter}': {message}")]
	InvalidQuery { parameter: String, message: String },

	/// A filter names an attribute that the resource does not expose
	#[error("Cannot filter '{resource}' on unknown attribute '{field}'")]
	UnknownFilterField { resource: String, field: String },

	/// A sort field names an attribute that the resource does not expose
	#[error("Cannot sort '{resource}' on unknown attribute '{field}'")]
	UnknownSortField { resource: String, field: String },

	/// An include path names a relationship that does not exist
	#[error("Cannot include '{path}': '{resource}' has no relationship named '{relationship}'")]
	InvalidIncludePath {
		path: String,
		resource: String,
		relationship: String,
	},

	/// A resource model was declared inconsistently
	#[error("Invalid resource model '{model}': {message}")]
	Configuration { model: String, message: String },

	/// No resource descriptor could be found for a content object
	#[error("No resource descriptor is registered for '{type_name}'")]
	UnresolvedResource { type_name: String },

	/// A resource provider was configured but returned nothing
	#[error("The resource provider returned no descriptor for the response content")]
	ResourceProviderReturnedNothing,

	/// A domain object of an unexpected type reached a descriptor accessor
	#[error("Descriptor '{resource}' cannot read an object of a different type")]
	ObjectTypeMismatch { resource: String },

	/// A relationship accessor returned a shape that contradicts its cardinality
	#[error("Relationship '{relationship}' on '{resource}' is declared {expected} but returned {actual}")]
	CardinalityMismatch {
		resource: String,
		relationship: String,
		expected: &'static str,
		actual: &'static str,
	},

	/// An attribute accessor produced a value that is not representable as JSON
	#[error("Attribute '{attribute}' on '{resource}' could not be converted: {message}")]
	AttributeValue {
		resource: String,
		attribute: String,
		message: String,
	},

	/// The request URI handed to the engine is not a valid URI reference
	#[error("Request URI '{uri}' is invalid: {message}")]
	InvalidRequestUri { uri: String, message: String },

	/// Serialization was attempted without the URI of the incoming request
	#[error("A request URI is required to serialize a document")]
	MissingRequestUri,
}

impl Error {
	/// Classify this error as a client or server error
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::PageSizeExceeded { .. }
			| Error::InvalidQuery { .. }
			| Error::UnknownFilterField { .. }
			| Error::UnknownSortField { .. }
			| Error::InvalidIncludePath { .. } => ErrorKind::Client,
			Error::Configuration { .. }
			| Error::UnresolvedResource { .. }
			| Error::ResourceProviderReturnedNothing
			| Error::ObjectTypeMismatch { .. }
			| Error::CardinalityMismatch { .. }
			| Error::AttributeValue { .. }
			| Error::InvalidRequestUri { .. }
			| Error::MissingRequestUri => ErrorKind::Server,
		}
	}

	/// Short, human-readable summary used as the error object's `title`
	pub fn title(&self) -> &'static str {
		match self {
			Error::PageSizeExceeded { .. } => "Page size limit exceeded",
			Error::InvalidQuery { .. } => "Invalid query parameter",
			Error::UnknownFilterField { .. } => "Invalid filter",
			Error::UnknownSortField { .. } => "Invalid sort",
			Error::InvalidIncludePath { .. } => "Invalid include path",
			Error::Configuration { .. } => "Invalid resource model",
			Error::UnresolvedResource { .. } | Error::ResourceProviderReturnedNothing => {
				"Resource could not be resolved"
			}
			Error::ObjectTypeMismatch { .. } | Error::CardinalityMismatch { .. } => {
				"Resource model mismatch"
			}
			Error::AttributeValue { .. } => "Attribute could not be serialized",
			Error::InvalidRequestUri { .. } => "Invalid request URI",
			Error::MissingRequestUri => "Missing request URI",
		}
	}

	/// Stable machine-readable code used as the error object's `code`
	pub fn code(&self) -> &'static str {
		match self {
			Error::PageSizeExceeded { .. } => "page_size_exceeded",
			Error::InvalidQuery { .. } => "invalid_query",
			Error::UnknownFilterField { .. } => "unknown_filter_field",
			Error::UnknownSortField { .. } => "unknown_sort_field",
			Error::InvalidIncludePath { .. } => "invalid_include_path",
			Error::Configuration { .. } => "configuration",
			Error::UnresolvedResource { .. } => "unresolved_resource",
			Error::ResourceProviderReturnedNothing => "resource_provider_returned_nothing",
			Error::ObjectTypeMismatch { .. } => "object_type_mismatch",
			Error::CardinalityMismatch { .. } => "cardinality_mismatch",
			Error::AttributeValue { .. } => "attribute_value",
			Error::InvalidRequestUri { .. } => "invalid_request_uri",
			Error::MissingRequestUri => "missing_request_uri",
		}
	}

	pub(crate) fn configuration(model: impl Into<String>, message: impl Into<String>) -> Self {
		Error::Configuration {
			model: model.into(),
			message: message.into(),
		}
	}

	pub(crate) fn invalid_query(parameter: impl Into<String>, message: impl Into<String>) -> Self {
		Error::InvalidQuery {
			parameter: parameter.into(),
			message: message.into(),
		}
	}
}

/// A fault raised by the host application with an explicit HTTP status
///
/// Statuses below 500 classify as client errors, everything else as server
/// errors.
///
/// # Examples
///
/// ```
/// use mosaic_core::exception::{ErrorKind, HttpFault};
///
/// let fault = HttpFault::new(404, "No person with id 7").with_title("Not found");
/// assert_eq!(fault.kind(), ErrorKind::Client);
/// assert_eq!(fault.to_string(), "No person with id 7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct HttpFault {
	pub status: u16,
	pub title: Option<String>,
	pub detail: String,
	pub code: Option<String>,
}

impl HttpFault {
	pub fn new(status: u16, detail: impl Into<String>) -> Self {
		Self {
			status,
			title: None,
			detail: detail.into(),
			code: None,
		}
	}

	/// `400 Bad Request` fault
	pub fn client(detail: impl Into<String>) -> Self {
		Self::new(400, detail)
	}

	/// `500 Internal Server Error` fault
	pub fn server(detail: impl Into<String>) -> Self {
		Self::new(500, detail)
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());
		self
	}

	pub fn kind(&self) -> ErrorKind {
		if self.status < 500 {
			ErrorKind::Client
		} else {
			ErrorKind::Server
		}
	}
}
