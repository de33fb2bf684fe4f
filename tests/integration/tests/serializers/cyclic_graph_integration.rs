//! Cyclic object graph integration tests
//!
//! **Purpose:**
//! Verifies that the graph walk terminates on cyclic friendship graphs and
//! that compound documents carry every related resource exactly once.
//!
//! **Test Coverage:**
//! - Rings, cliques and self references terminate
//! - `included` holds each `(type, id)` pair once
//! - Primary resources never appear in `included`
//! - Explicit and nested include paths
//! - Property: arbitrary friendship graphs produce duplicate-free documents

use std::collections::HashSet;

use mosaic::prelude::*;
use mosaic_integration_tests::{company, employee, graphs, included_keys, init_tracing, person, registry};
use proptest::prelude::*;
use rstest::*;
use serde_json::Value;

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn serializer() -> JsonApiSerializer {
	init_tracing();
	JsonApiSerializer::new(registry())
}

fn render(serializer: &JsonApiSerializer, content: Content<'_>, query: &str) -> Value {
	let query = serializer.parse_query(query).unwrap();
	serializer
		.serialize(content, None, Some("http://x/people"), Some(&query))
		.unwrap()
		.to_value()
		.unwrap()
}

fn ids(keys: &[(String, String)]) -> Vec<&str> {
	keys.iter().map(|(_, id)| id.as_str()).collect()
}

// ============================================================================
// Termination and de-duplication
// ============================================================================

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(64)]
fn test_ring_includes_everyone_else_once(serializer: JsonApiSerializer, #[case] size: u32) {
	// Arrange
	let ring = graphs::ring(size);

	// Act
	let value = render(&serializer, Content::single(&*ring[0]), "");

	// Assert
	let keys = included_keys(&value);
	let expected: Vec<String> = (2..=size).map(|id| id.to_string()).collect();
	assert_eq!(ids(&keys), expected);
	assert!(keys.iter().all(|(type_name, _)| type_name == "Person"));
}

#[rstest]
fn test_self_reference_links_back_without_inclusion(serializer: JsonApiSerializer) {
	// Arrange
	let narcissus = graphs::ring(1);

	// Act
	let value = render(&serializer, Content::single(&*narcissus[0]), "");

	// Assert
	assert_eq!(
		value["data"]["relationships"]["friends"]["data"],
		serde_json::json!([{ "type": "Person", "id": "1" }])
	);
	assert!(value.get("included").is_none());
}

#[rstest]
fn test_clique_collection_has_no_included(serializer: JsonApiSerializer) {
	// Arrange
	let clique = graphs::clique(5);

	// Act
	let value = render(&serializer, Content::many(clique.iter().map(|p| &**p)), "");

	// Assert
	assert_eq!(value["data"].as_array().unwrap().len(), 5);
	assert!(included_keys(&value).is_empty());
	for resource in value["data"].as_array().unwrap() {
		assert_eq!(
			resource["relationships"]["friends"]["data"].as_array().unwrap().len(),
			5
		);
	}
}

#[rstest]
fn test_partial_collection_includes_the_rest(serializer: JsonApiSerializer) {
	// Arrange
	let clique = graphs::clique(6);

	// Act
	let value = render(&serializer, Content::many(clique[..2].iter().map(|p| &**p)), "");

	// Assert
	assert_eq!(ids(&included_keys(&value)), vec!["3", "4", "5", "6"]);
}

// ============================================================================
// Include paths
// ============================================================================

#[rstest]
fn test_include_path_selects_relationships(serializer: JsonApiSerializer) {
	// Arrange
	let acme = company(7, "Acme", 1901);
	let ann = employee(1, "Ann", 41, &acme);
	let bob = person(2, "Bob", 35);
	mosaic_integration_tests::befriend(&ann, &[&bob]);

	// Act
	let employer_only = render(&serializer, Content::single(&*ann), "include=employer");
	let friends_only = render(&serializer, Content::single(&*ann), "include=friends");
	let nothing = render(&serializer, Content::single(&*ann), "include=");

	// Assert
	assert_eq!(included_keys(&employer_only), vec![("Company".to_string(), "7".to_string())]);
	assert_eq!(included_keys(&friends_only), vec![("Person".to_string(), "2".to_string())]);
	assert!(included_keys(&nothing).is_empty());
	assert_eq!(
		nothing["data"]["relationships"]["friends"]["data"],
		serde_json::json!([{ "type": "Person", "id": "2" }])
	);
}

#[rstest]
fn test_nested_include_path(serializer: JsonApiSerializer) {
	// Arrange
	let acme = company(7, "Acme", 1901);
	let globex = company(8, "Globex", 1989);
	let ann = employee(1, "Ann", 41, &acme);
	let bob = employee(2, "Bob", 35, &globex);
	mosaic_integration_tests::befriend(&ann, &[&bob]);

	// Act
	let value = render(&serializer, Content::single(&*ann), "include=friends.employer");

	// Assert
	assert_eq!(
		included_keys(&value),
		vec![
			("Person".to_string(), "2".to_string()),
			("Company".to_string(), "8".to_string()),
		]
	);
}

#[rstest]
fn test_nested_include_through_cycle_terminates(serializer: JsonApiSerializer) {
	// Arrange
	let ring = graphs::ring(3);

	// Act
	let value = render(
		&serializer,
		Content::single(&*ring[0]),
		"include=friends.friends.friends.friends",
	);

	// Assert
	assert_eq!(ids(&included_keys(&value)), vec!["2", "3"]);
}

#[rstest]
#[case("include=enemies", "enemies")]
#[case("include=friends.rivals", "friends.rivals")]
#[case("include=employer.friends", "employer.friends")]
fn test_unknown_include_path_is_client_error(
	serializer: JsonApiSerializer,
	#[case] query: &str,
	#[case] path: &str,
) {
	// Arrange
	let ann = person(1, "Ann", 41);

	// Act
	let value = render(&serializer, Content::single(&*ann), query);

	// Assert
	assert!(value.get("data").is_none());
	assert_eq!(value["errors"][0]["type"], "client");
	assert_eq!(value["errors"][0]["code"], "invalid_include_path");
	assert!(value["errors"][0]["detail"].as_str().unwrap().contains(path));
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
	#[test]
	fn prop_included_is_duplicate_free(
		count in 1u32..16,
		edges in prop::collection::vec((0usize..16, 0usize..16), 0..48),
		primaries in 1usize..4,
	) {
		let serializer = JsonApiSerializer::new(registry());
		let people = graphs::from_edges(count, &edges);
		let primaries = primaries.min(people.len());

		let value = render(&serializer, Content::many(people[..primaries].iter().map(|p| &**p)), "");

		let keys = included_keys(&value);
		let unique: HashSet<&(String, String)> = keys.iter().collect();
		prop_assert_eq!(unique.len(), keys.len());
		for primary in &people[..primaries] {
			let key = ("Person".to_string(), primary.id.to_string());
			prop_assert!(!unique.contains(&key));
		}
		prop_assert!(keys.len() + primaries <= people.len());
	}
}
