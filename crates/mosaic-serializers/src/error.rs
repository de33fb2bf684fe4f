//! Error documents

use std::error::Error as StdError;

use mosaic_core::ErrorKind;
use mosaic_core::document::{ApiError, Document};
use mosaic_core::exception::Error;

/// Renders faults as error documents
///
/// Server errors carry the configured help link as `links.about`.
///
/// # Examples
///
/// ```
/// use mosaic_core::HttpFault;
/// use mosaic_serializers::ErrorSerializer;
/// use serde_json::json;
///
/// let serializer = ErrorSerializer::new().with_help_link("https://docs.example/errors");
/// let document = serializer.serialize_fault(&HttpFault::client("Name is required"));
///
/// assert_eq!(
///     document.to_value().unwrap(),
///     json!({
///         "errors": [{
///             "type": "client",
///             "status": "400",
///             "title": "Bad request",
///             "detail": "Name is required"
///         }]
///     })
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorSerializer {
	help_link: Option<String>,
}

impl ErrorSerializer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_help_link(mut self, link: impl Into<String>) -> Self {
		self.help_link = Some(link.into());
		self
	}

	/// Set or clear the help link
	pub fn help_link(mut self, link: Option<String>) -> Self {
		self.help_link = link;
		self
	}

	/// Error document for any fault; never fails
	pub fn serialize_fault(&self, fault: &(dyn StdError + 'static)) -> Document {
		self.serialize_errors([ApiError::from_fault(fault)])
	}

	/// Error document listing several faults in order
	pub fn serialize_faults<'f, I>(&self, faults: I) -> Document
	where
		I: IntoIterator<Item = &'f (dyn StdError + 'static)>,
	{
		self.serialize_errors(faults.into_iter().map(ApiError::from_fault))
	}

	/// Error document for an engine error
	pub fn serialize_error(&self, error: &Error) -> Document {
		self.serialize_errors([ApiError::from(error)])
	}

	pub fn serialize_errors<I>(&self, errors: I) -> Document
	where
		I: IntoIterator<Item = ApiError>,
	{
		let errors: Vec<ApiError> = errors.into_iter().map(|error| self.decorate(error)).collect();
		tracing::debug!(count = errors.len(), "Serializing error document");
		Document::from_errors(errors)
	}

	fn decorate(&self, error: ApiError) -> ApiError {
		match (&self.help_link, error.kind) {
			(Some(link), ErrorKind::Server) if error.help_link.is_none() => error.with_help_link(link.clone()),
			_ => error,
		}
	}
}
