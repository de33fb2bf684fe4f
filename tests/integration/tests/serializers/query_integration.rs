//! Query interpretation integration tests
//!
//! **Purpose:**
//! Verifies filtering, sorting and pagination of collections through the
//! serialization facade, along with the host seams that customise them.
//!
//! **Test Coverage:**
//! - `filter[...]` with default equality and registered filter expressions
//! - Filter expressions whichever way the attribute is spelled
//! - `sort` ascending, descending and on several fields
//! - Filtering and sorting happen before pagination
//! - Unknown filter and sort fields are client errors
//! - Custom query evaluators, resource providers and value converters

use std::sync::Arc;

use mosaic::model::DomainObject;
use mosaic::prelude::*;
use mosaic::query::{FilterPredicate, SortField};
use mosaic_integration_tests::{Person, init_tracing, person, registry};
use mosaic_serializers::QueryEvaluator;
use rstest::*;
use serde_json::{Value, json};

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn serializer() -> JsonApiSerializer {
	init_tracing();
	JsonApiSerializer::new(registry())
}

#[fixture]
fn staff() -> Vec<Arc<Person>> {
	vec![
		person(1, "Cleo", 29),
		person(2, "Ann", 41),
		person(3, "Bob", 29),
		person(4, "Dan", 57),
		person(5, "Eve", 41),
	]
}

fn render(serializer: &JsonApiSerializer, staff: &[Arc<Person>], query: QueryContext) -> Value {
	serializer
		.serialize(
			Content::many(staff.iter().map(|p| &**p)),
			None,
			Some("http://x/people"),
			Some(&query),
		)
		.unwrap()
		.to_value()
		.unwrap()
}

fn ids(value: &Value) -> Vec<String> {
	value["data"]
		.as_array()
		.unwrap()
		.iter()
		.map(|resource| resource["id"].as_str().unwrap().to_string())
		.collect()
}

// ============================================================================
// Filtering and sorting
// ============================================================================

#[rstest]
#[case("sort=name", &["2", "3", "1", "4", "5"])]
#[case("sort=-age", &["4", "2", "5", "1", "3"])]
#[case("sort=age,-name", &["1", "3", "5", "2", "4"])]
#[case("filter[age]=41", &["2", "5"])]
#[case("filter[age]=41&sort=-name", &["5", "2"])]
#[case("filter[name]=Nobody", &[])]
fn test_filter_and_sort(
	serializer: JsonApiSerializer,
	staff: Vec<Arc<Person>>,
	#[case] query: &str,
	#[case] expected: &[&str],
) {
	// Arrange
	let query = serializer.parse_query(query).unwrap();

	// Act
	let value = render(&serializer, &staff, query);

	// Assert
	assert_eq!(ids(&value), expected);
}

#[rstest]
fn test_registered_filter_expression(serializer: JsonApiSerializer, staff: Vec<Arc<Person>>) {
	// Arrange
	let query = serializer
		.parse_query("filter[name]=a")
		.unwrap()
		.with_filter_expressions(FilterExpressions::new().with("name", |value, raw| {
			value
				.as_str()
				.is_some_and(|name| name.to_lowercase().contains(&raw.to_lowercase()))
		}));

	// Act
	let value = render(&serializer, &staff, query);

	// Assert
	assert_eq!(ids(&value), vec!["2", "4"]);
}

/// A member whose attribute names span several words
struct Member {
	id: u32,
	joined_on: String,
}

#[rstest]
#[case::declared("joined_on")]
#[case::camel("joinedOn")]
#[case::kebab("joined-on")]
fn test_filter_expression_applies_to_every_spelling(#[case] field: &str) {
	// Arrange
	let members = ModelRegistry::new()
		.with(
			ResourceModel::<Member>::named("MemberModel")
				.id(|m| m.id)
				.attribute("joined_on", |m| m.joined_on.clone())
				.build()
				.unwrap(),
		)
		.unwrap();
	let serializer = JsonApiSerializer::from_settings(
		JsonApiSettings::default().with_member_case(MemberCase::Camel),
		Arc::new(members),
	);
	let roster = [
		Member { id: 1, joined_on: "1990-04-02".to_string() },
		Member { id: 2, joined_on: "2004-11-30".to_string() },
		Member { id: 3, joined_on: "1990-12-24".to_string() },
	];
	let query = serializer
		.parse_query(&format!("filter[{}]=1990", field))
		.unwrap()
		.with_filter_expressions(FilterExpressions::new().with("joined_on", |value, raw| {
			value.as_str().is_some_and(|date| date.starts_with(raw))
		}));

	// Act
	let value = serializer
		.serialize(Content::many(&roster), None, Some("http://x/members"), Some(&query))
		.unwrap()
		.to_value()
		.unwrap();

	// Assert
	assert_eq!(ids(&value), vec!["1", "3"]);
	assert_eq!(value["data"][0]["attributes"]["joinedOn"], "1990-04-02");
}

#[rstest]
fn test_sorting_happens_before_pagination(serializer: JsonApiSerializer, staff: Vec<Arc<Person>>) {
	// Arrange
	let query = serializer
		.parse_query("sort=name&page[number]=2&page[size]=2")
		.unwrap();

	// Act
	let value = render(&serializer, &staff, query);

	// Assert
	assert_eq!(ids(&value), vec!["1", "4"]);
	assert_eq!(
		value["meta"]["page"],
		json!({ "number": 2, "size": 2, "total-pages": 3, "total-count": 5 })
	);
}

#[rstest]
#[case("filter[salary]=10", "unknown_filter_field", "salary")]
#[case("sort=-salary", "unknown_sort_field", "salary")]
fn test_unknown_query_fields_are_client_errors(
	serializer: JsonApiSerializer,
	staff: Vec<Arc<Person>>,
	#[case] query: &str,
	#[case] code: &str,
	#[case] field: &str,
) {
	// Arrange
	let query = serializer.parse_query(query).unwrap();

	// Act
	let value = render(&serializer, &staff, query);

	// Assert
	assert!(value.get("data").is_none());
	assert_eq!(value["errors"][0]["type"], "client");
	assert_eq!(value["errors"][0]["status"], "400");
	assert_eq!(value["errors"][0]["code"], code);
	assert!(value["errors"][0]["detail"].as_str().unwrap().contains(field));
}

#[rstest]
#[case("page[number]=zero")]
#[case("page[number]=0")]
#[case("sort=")]
fn test_malformed_query_is_rejected_at_parse_time(serializer: JsonApiSerializer, #[case] query: &str) {
	// Act
	let error = serializer.parse_query(query).unwrap_err();

	// Assert
	assert_eq!(error.kind(), ErrorKind::Client);
	let document = serializer.error_serializer().serialize_error(&error);
	assert_eq!(document.errors()[0].status, 400);
}

// ============================================================================
// Host seams
// ============================================================================

/// Matches `filter[initial]` against the first letter of the name and sorts
/// by name length
struct Initials;

impl QueryEvaluator for Initials {
	fn matches(
		&self,
		_descriptor: &ResourceDescriptor,
		object: &DomainObject,
		predicate: &FilterPredicate,
		_expressions: &FilterExpressions,
	) -> mosaic::Result<bool> {
		let Some(person) = object.downcast_ref::<Person>() else {
			return Ok(false);
		};
		Ok(predicate.name == "initial" && person.name.starts_with(predicate.value.as_str()))
	}

	fn sort_key(
		&self,
		_descriptor: &ResourceDescriptor,
		object: &DomainObject,
		_field: &SortField,
	) -> mosaic::Result<Value> {
		Ok(json!(object.downcast_ref::<Person>().map(|p| p.name.len()).unwrap_or_default()))
	}
}

#[rstest]
fn test_custom_query_evaluator(staff: Vec<Arc<Person>>) {
	// Arrange
	let serializer = JsonApiSerializer::new(registry()).with_query_evaluator(Initials);
	let mut everyone = staff;
	everyone.push(person(6, "Alexandra", 33));
	let query = serializer.parse_query("filter[initial]=A&sort=-length").unwrap();

	// Act
	let value = render(&serializer, &everyone, query);

	// Assert
	assert_eq!(ids(&value), vec!["6", "2"]);
}

#[rstest]
fn test_resource_provider_chooses_descriptor(staff: Vec<Arc<Person>>) {
	// Arrange
	let staff_model = Arc::new(
		mosaic_integration_tests::person_model()
			.url_path("staff")
			.build()
			.unwrap(),
	);
	let serializer = JsonApiSerializer::new(registry()).with_resource_provider(
		move |content: &Content<'_>| content.is_data().then(|| Arc::clone(&staff_model)),
	);

	// Act
	let value = render(&serializer, &staff[..1], QueryContext::new());

	// Assert
	assert_eq!(value["data"][0]["links"]["self"], "http://x/staff/1/");
}

#[rstest]
fn test_converters_run_in_registration_order(staff: Vec<Arc<Person>>) {
	// Arrange
	let serializer = JsonApiSerializer::new(registry())
		.with_converter(|_: &str, attribute: &str, value: Value| match attribute {
			"name" => json!(value.as_str().unwrap_or_default().to_uppercase()),
			_ => value,
		})
		.with_converter(|resource: &str, attribute: &str, value: Value| match attribute {
			"name" => json!(format!("{}:{}", resource, value.as_str().unwrap_or_default())),
			_ => value,
		});

	// Act
	let value = render(&serializer, &staff[1..2], QueryContext::new());

	// Assert
	assert_eq!(value["data"][0]["attributes"], json!({ "name": "Person:ANN", "age": 41 }));
}
