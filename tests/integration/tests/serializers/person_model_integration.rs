//! Resource document shape integration tests
//!
//! **Purpose:**
//! Verifies the documents produced by the serialization facade for a
//! registered person model: resource type derivation, attribute members,
//! relationship links and linkage, and resource links.
//!
//! **Test Coverage:**
//! - Resource type derived from the model name
//! - Attribute keys follow declaration order minus sparse fieldset exclusions
//! - Relationship `self` and `related` links
//! - Related resources of another model in `included`
//! - Identical input renders identical bytes
//! - The facade is shareable across threads

use std::sync::Arc;

use mosaic::prelude::*;
use mosaic_integration_tests::{company, employee, graphs, included_keys, init_tracing, people, person, registry};
use rstest::*;
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

struct PersonModel {
	id: String,
	name: String,
	friends: Vec<PersonModel>,
}

#[fixture]
fn serializer() -> JsonApiSerializer {
	init_tracing();
	JsonApiSerializer::new(registry())
}

// ============================================================================
// Model example
// ============================================================================

#[rstest]
fn test_person_model_document() {
	// Arrange
	let registry = ModelRegistry::new()
		.with(
			ResourceModel::<PersonModel>::new()
				.id(|p| p.id.clone())
				.attribute("name", |p| p.name.clone())
				.to_many::<PersonModel>("friends", |p| Relation::many(&p.friends))
				.build()
				.unwrap(),
		)
		.unwrap();
	let serializer = JsonApiSerializer::new(Arc::new(registry));
	let ann = PersonModel {
		id: "1".into(),
		name: "Ann".into(),
		friends: vec![PersonModel {
			id: "2".into(),
			name: "Bob".into(),
			friends: Vec::new(),
		}],
	};

	// Act
	let document = serializer
		.serialize(Content::single(&ann), None, Some("http://x/api/people/1"), None)
		.unwrap();

	// Assert
	let value = document.to_value().unwrap();
	let data = &value["data"];
	assert_eq!(data["type"], "Person");
	assert_eq!(data["id"], "1");
	assert_eq!(data["attributes"], json!({ "name": "Ann" }));
	assert_eq!(data["relationships"]["friends"]["data"], json!([{ "type": "Person", "id": "2" }]));
	let friends_self = data["relationships"]["friends"]["links"]["self"].as_str().unwrap();
	assert!(
		friends_self.ends_with("/people/1/relationships/friends/"),
		"unexpected relationship link {}",
		friends_self
	);
	assert_eq!(value["links"]["self"], "http://x/api/people/1");
}

#[rstest]
fn test_relationship_links(serializer: JsonApiSerializer) {
	// Arrange
	let ann = person(1, "Ann", 41);

	// Act
	let document = serializer
		.serialize(Content::single(&*ann), None, Some("http://x/people/1"), None)
		.unwrap();

	// Assert
	let value = document.to_value().unwrap();
	assert_eq!(
		value["data"]["relationships"],
		json!({
			"friends": {
				"links": {
					"self": "http://x/people/1/relationships/friends/",
					"related": "http://x/people/1/friends/"
				}
			},
			"employer": {
				"links": {
					"self": "http://x/people/1/relationships/employer/",
					"related": "http://x/people/1/employer/"
				},
				"data": null
			}
		})
	);
	assert_eq!(value["data"]["links"]["self"], "http://x/people/1/");
}

#[rstest]
fn test_relative_request_uri_keeps_links_relative(serializer: JsonApiSerializer) {
	// Arrange
	let ann = person(1, "Ann", 41);

	// Act
	let document = serializer
		.serialize(Content::single(&*ann), None, Some("/people/1"), None)
		.unwrap();

	// Assert
	let value = document.to_value().unwrap();
	assert_eq!(value["data"]["links"]["self"], "/people/1/");
	assert_eq!(value["links"]["self"], "/people/1");
}

// ============================================================================
// Attributes and sparse fieldsets
// ============================================================================

#[rstest]
#[case("", &["name", "age"])]
#[case("fields[Person]=name", &["name"])]
#[case("fields[Person]=age,name", &["name", "age"])]
#[case("fields[Person]=age,unknown", &["age"])]
#[case("fields[Person]=", &[])]
#[case("fields[Company]=name", &["name", "age"])]
fn test_attribute_keys_follow_fieldsets(
	serializer: JsonApiSerializer,
	#[case] query: &str,
	#[case] expected: &[&str],
) {
	// Arrange
	let ann = person(1, "Ann", 41);
	let query = serializer.parse_query(query).unwrap();

	// Act
	let document = serializer
		.serialize(Content::single(&*ann), None, Some("http://x/people/1"), Some(&query))
		.unwrap();

	// Assert
	let resource = &document.data().unwrap().resources()[0];
	let keys: Vec<&str> = resource.attributes.keys().map(String::as_str).collect();
	assert_eq!(keys, expected);
	assert_eq!(resource.type_name, "Person");
}

#[rstest]
fn test_fieldsets_apply_to_included_resources(serializer: JsonApiSerializer) {
	// Arrange
	let acme = company(7, "Acme", 1901);
	let ann = employee(1, "Ann", 41, &acme);
	let query = serializer
		.parse_query("include=employer&fields[Company]=founded")
		.unwrap();

	// Act
	let document = serializer
		.serialize(Content::single(&*ann), None, Some("http://x/people/1"), Some(&query))
		.unwrap();

	// Assert
	let value = document.to_value().unwrap();
	assert_eq!(value["data"]["attributes"], json!({ "name": "Ann", "age": 41 }));
	assert_eq!(
		value["included"],
		json!([{
			"type": "Company",
			"id": "7",
			"attributes": { "founded": 1901 },
			"links": { "self": "http://x/companies/7/" }
		}])
	);
}

#[rstest]
fn test_related_model_is_resolved_through_registry(serializer: JsonApiSerializer) {
	// Arrange
	let acme = company(7, "Acme", 1901);
	let ann = employee(1, "Ann", 41, &acme);

	// Act
	let document = serializer
		.serialize(Content::single(&*ann), None, Some("http://x/people/1"), None)
		.unwrap();

	// Assert
	let value = document.to_value().unwrap();
	assert_eq!(
		value["data"]["relationships"]["employer"]["data"],
		json!({ "type": "Company", "id": "7" })
	);
	assert_eq!(included_keys(&value), vec![("Company".to_string(), "7".to_string())]);
	assert_eq!(value["included"][0]["attributes"]["name"], "Acme");
}

#[rstest]
fn test_explicit_descriptor_wins(serializer: JsonApiSerializer) {
	// Arrange
	let renamed = Arc::new(
		mosaic_integration_tests::person_model()
			.url_path("members")
			.build()
			.unwrap(),
	);
	let ann = person(1, "Ann", 41);

	// Act
	let document = serializer
		.serialize(Content::single(&*ann), Some(&renamed), Some("http://x/members/1"), None)
		.unwrap();

	// Assert
	let value = document.to_value().unwrap();
	assert_eq!(value["data"]["links"]["self"], "http://x/members/1/");
	assert_eq!(value["data"]["type"], "Person");
}

// ============================================================================
// Determinism and sharing
// ============================================================================

#[rstest]
fn test_identical_input_renders_identical_bytes(serializer: JsonApiSerializer) {
	// Arrange
	let everyone = graphs::clique(6);
	let query = serializer.parse_query("sort=-age&page[size]=4").unwrap();
	let render = || {
		let document = serializer
			.serialize(
				Content::many(everyone.iter().map(|p| &**p)),
				None,
				Some("http://x/people?sort=-age"),
				Some(&query),
			)
			.unwrap();
		serde_json::to_string(&document).unwrap()
	};

	// Act
	let first = render();
	let second = render();

	// Assert
	assert_eq!(first, second);
}

#[rstest]
fn test_serializer_is_shared_across_threads(serializer: JsonApiSerializer) {
	// Arrange
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<JsonApiSerializer>();
	assert_send_sync::<ModelRegistry>();
	assert_send_sync::<ResourceDescriptor>();
	assert_send_sync::<Document>();
	let everyone = graphs::ring(5);
	let descriptor = people(serializer.registry());

	// Act
	let rendered: Vec<String> = std::thread::scope(|scope| {
		let handles: Vec<_> = everyone
			.iter()
			.map(|member| {
				let serializer = &serializer;
				let descriptor = &descriptor;
				scope.spawn(move || {
					let document = serializer
						.serialize(Content::single(&**member), Some(descriptor), Some("/people"), None)
						.unwrap();
					serde_json::to_string(&document).unwrap()
				})
			})
			.collect();
		handles.into_iter().map(|handle| handle.join().unwrap()).collect()
	});

	// Assert
	assert_eq!(rendered.len(), 5);
	for (index, document) in rendered.iter().enumerate() {
		let value: serde_json::Value = serde_json::from_str(document).unwrap();
		assert_eq!(value["data"]["id"], (index + 1).to_string());
		assert_eq!(included_keys(&value).len(), 4);
	}
}
