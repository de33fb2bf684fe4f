//! Error document integration tests
//!
//! **Purpose:**
//! Verifies how faults and failed serializations surface: as error
//! documents for per-request conditions and as hard failures for host
//! integration bugs.
//!
//! **Test Coverage:**
//! - Host faults keep their classification, status and message
//! - Unclassified faults become server errors with the help link
//! - Unresolvable content and silent resource providers are server errors
//! - Error documents replace partially built data
//! - Null content and empty sequences are success documents
//! - A missing or malformed request URI fails the call

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use mosaic::prelude::*;
use mosaic_integration_tests::{Person, init_tracing, person, registry};
use rstest::*;
use serde_json::json;

const HELP_LINK: &str = "https://docs.example/errors";

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn serializer() -> JsonApiSerializer {
	init_tracing();
	JsonApiSerializer::from_settings(JsonApiSettings::default().with_help_link(HELP_LINK), registry())
}

#[derive(Debug)]
struct StorageOffline;

impl fmt::Display for StorageOffline {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("storage backend is offline")
	}
}

impl StdError for StorageOffline {}

struct Stray;

// ============================================================================
// Faults
// ============================================================================

#[rstest]
fn test_client_fault_document(serializer: JsonApiSerializer) {
	// Arrange
	let fault = HttpFault::client("Page size exceeds page size limit for queries.");

	// Act
	let document = serializer
		.serialize(Content::fault(&fault), None, Some("/people"), None)
		.unwrap();

	// Assert
	assert_eq!(document.errors().len(), 1);
	let value = document.to_value().unwrap();
	assert_eq!(value["errors"][0]["type"], "client");
	assert_eq!(value["errors"][0]["detail"], "Page size exceeds page size limit for queries.");
	assert!(value["errors"][0].get("links").is_none());
}

#[rstest]
fn test_engine_error_as_fault_keeps_classification(serializer: JsonApiSerializer) {
	// Arrange
	let fault = Error::PageSizeExceeded {
		requested: 500,
		limit: 100,
	};

	// Act
	let document = serializer
		.serialize(Content::fault(&fault), None, Some("/people"), None)
		.unwrap();

	// Assert
	assert_eq!(
		document.to_value().unwrap(),
		json!({
			"errors": [{
				"type": "client",
				"status": "400",
				"title": "Page size limit exceeded",
				"detail": "Page size exceeds page size limit for queries.",
				"code": "page_size_exceeded"
			}]
		})
	);
}

#[rstest]
fn test_unclassified_fault_is_server_error(serializer: JsonApiSerializer) {
	// Act
	let document = serializer
		.serialize(Content::fault(&StorageOffline), None, Some("/people"), None)
		.unwrap();

	// Assert
	let value = document.to_value().unwrap();
	assert_eq!(value["errors"][0]["type"], "server");
	assert_eq!(value["errors"][0]["status"], "500");
	assert_eq!(value["errors"][0]["detail"], "storage backend is offline");
	assert_eq!(value["errors"][0]["links"]["about"], HELP_LINK);
}

#[rstest]
fn test_several_faults_keep_their_order(serializer: JsonApiSerializer) {
	// Arrange
	let missing = HttpFault::new(404, "No person with id 9").with_title("Not found");
	let faults: Vec<&(dyn StdError + 'static)> = vec![&missing, &StorageOffline];

	// Act
	let document = serializer
		.serialize(Content::Faults(faults), None, Some("/people/9"), None)
		.unwrap();

	// Assert
	let errors = document.errors();
	assert_eq!(errors.len(), 2);
	assert_eq!((errors[0].status, errors[0].kind), (404, ErrorKind::Client));
	assert_eq!(errors[0].title, "Not found");
	assert_eq!((errors[1].status, errors[1].kind), (500, ErrorKind::Server));
	assert!(errors[0].help_link.is_none());
	assert_eq!(errors[1].help_link.as_deref(), Some(HELP_LINK));
}

// ============================================================================
// Resolution failures
// ============================================================================

#[rstest]
fn test_unregistered_content_is_server_error(serializer: JsonApiSerializer) {
	// Act
	let document = serializer
		.serialize(Content::single(&Stray), None, Some("/strays/1"), None)
		.unwrap();

	// Assert
	let value = document.to_value().unwrap();
	assert!(value.get("data").is_none());
	assert_eq!(value["errors"][0]["type"], "server");
	assert_eq!(value["errors"][0]["code"], "unresolved_resource");
	assert!(value["errors"][0]["detail"].as_str().unwrap().contains("Stray"));
	assert_eq!(value["errors"][0]["links"]["about"], HELP_LINK);
}

#[rstest]
fn test_silent_resource_provider_is_server_error() {
	// Arrange
	let serializer = JsonApiSerializer::from_settings(JsonApiSettings::default().with_help_link(HELP_LINK), registry())
		.with_resource_provider(|_: &Content<'_>| None::<Arc<ResourceDescriptor>>);
	let ann = person(1, "Ann", 41);

	// Act
	let document = serializer
		.serialize(Content::single(&*ann), None, Some("/people/1"), None)
		.unwrap();
	let null = serializer
		.serialize(Content::Null, None, Some("/people/1"), None)
		.unwrap();

	// Assert
	assert_eq!(document.errors()[0].code.as_deref(), Some("resource_provider_returned_nothing"));
	assert_eq!(document.errors()[0].help_link.as_deref(), Some(HELP_LINK));
	assert!(!null.is_error());
}

#[rstest]
fn test_error_replaces_partial_data(serializer: JsonApiSerializer) {
	// Arrange
	struct Kennel {
		id: u32,
		resident: Stray,
	}
	let registry = ModelRegistry::new()
		.with(
			ResourceModel::<Kennel>::new()
				.id(|k| k.id)
				.to_one::<Stray>("resident", |k| Relation::one(&k.resident))
				.build()
				.unwrap(),
		)
		.unwrap();
	let serializer = JsonApiSerializer::from_settings(serializer.settings().clone(), Arc::new(registry));
	let kennels = [
		Kennel { id: 1, resident: Stray },
		Kennel { id: 2, resident: Stray },
	];

	// Act
	let document = serializer
		.serialize(Content::many(&kennels), None, Some("/kennels"), None)
		.unwrap();

	// Assert
	assert!(document.is_error());
	assert!(document.data().is_none());
	assert!(document.included().is_empty());
	assert_eq!(document.errors()[0].kind, ErrorKind::Server);
}

// ============================================================================
// Empty content
// ============================================================================

#[rstest]
fn test_null_content(serializer: JsonApiSerializer) {
	// Act
	let document = serializer
		.serialize(Content::Null, None, Some("/people/1"), None)
		.unwrap();

	// Assert
	assert_eq!(
		document.to_value().unwrap(),
		json!({ "data": null, "links": { "self": "/people/1" } })
	);
	assert_eq!(Document::null().to_value().unwrap(), json!({ "data": null }));
}

#[rstest]
#[case::typed(Content::many(Vec::<&Person>::new()))]
#[case::erased(Content::objects(Vec::new()))]
fn test_empty_sequence(serializer: JsonApiSerializer, #[case] content: Content<'static>) {
	// Act
	let document = serializer
		.serialize(content, None, Some("/people"), None)
		.unwrap();

	// Assert
	assert_eq!(
		document.to_value().unwrap(),
		json!({ "data": [], "links": { "self": "/people" } })
	);
}

// ============================================================================
// Hard failures
// ============================================================================

#[rstest]
fn test_missing_request_uri_fails(serializer: JsonApiSerializer) {
	// Arrange
	let ann = person(1, "Ann", 41);

	// Act
	let result = serializer.serialize(Content::single(&*ann), None, None, None);

	// Assert
	assert_eq!(result.unwrap_err(), Error::MissingRequestUri);
}

#[rstest]
fn test_malformed_request_uri_fails(serializer: JsonApiSerializer) {
	// Act
	let result = serializer.serialize(Content::Null, None, Some("http://[::1/people"), None);

	// Assert
	match result {
		Err(Error::InvalidRequestUri { uri, .. }) => assert_eq!(uri, "http://[::1/people"),
		other => panic!("unexpected result {:?}", other),
	}
}
