//! Integration test utilities for Mosaic
//!
//! Shared domain models, registries and graph builders used by the
//! integration tests across the Mosaic crates.

use std::sync::{Arc, OnceLock};

use mosaic::model::{ModelRegistry, Relation, ResourceDescriptor, ResourceModel};
use serde_json::Value;

pub mod graphs;

/// A person who may have friends and an employer
///
/// Friends are set once after construction so that cycles can be built
/// from shared handles.
pub struct Person {
	pub id: u32,
	pub name: String,
	pub age: u32,
	pub friends: OnceLock<Vec<Arc<Person>>>,
	pub employer: Option<Arc<Company>>,
}

pub struct Company {
	pub id: u32,
	pub name: String,
	pub founded: u32,
}

/// A person without friends or employer
pub fn person(id: u32, name: &str, age: u32) -> Arc<Person> {
	Arc::new(Person {
		id,
		name: name.to_string(),
		age,
		friends: OnceLock::new(),
		employer: None,
	})
}

/// A person working for `employer`
pub fn employee(id: u32, name: &str, age: u32, employer: &Arc<Company>) -> Arc<Person> {
	Arc::new(Person {
		id,
		name: name.to_string(),
		age,
		friends: OnceLock::new(),
		employer: Some(Arc::clone(employer)),
	})
}

pub fn company(id: u32, name: &str, founded: u32) -> Arc<Company> {
	Arc::new(Company {
		id,
		name: name.to_string(),
		founded,
	})
}

/// Set the friends of `person`
///
/// # Panics
///
/// Panics if the friends were already set.
pub fn befriend(person: &Arc<Person>, friends: &[&Arc<Person>]) {
	let friends = friends.iter().map(|friend| Arc::clone(*friend)).collect();
	if person.friends.set(friends).is_err() {
		panic!("friends of person {} are already set", person.id);
	}
}

/// Descriptor of [`Person`]: type `Person`, attributes `name` and `age`
pub fn person_model() -> ResourceModel<Person> {
	ResourceModel::<Person>::named("PersonModel")
		.id(|p| p.id)
		.attribute("name", |p| p.name.clone())
		.attribute("age", |p| p.age)
		.to_many::<Person>("friends", |p| match p.friends.get() {
			Some(friends) => Relation::many(friends.iter().map(|friend| &**friend)),
			None => Relation::not_loaded(),
		})
		.to_one::<Company>("employer", |p| Relation::optional(p.employer.as_deref()))
}

/// Descriptor of [`Company`] mounted at `companies`
pub fn company_model() -> ResourceModel<Company> {
	ResourceModel::<Company>::named("CompanyModel")
		.url_path("companies")
		.id(|c| c.id)
		.attribute("name", |c| c.name.clone())
		.attribute("founded", |c| c.founded)
}

/// Registry holding the person and company models
pub fn registry() -> Arc<ModelRegistry> {
	let registry = ModelRegistry::new()
		.with(person_model().build().expect("person model is valid"))
		.and_then(|registry| registry.with(company_model().build().expect("company model is valid")))
		.expect("models register once");
	Arc::new(registry)
}

/// The registered person descriptor
pub fn people(registry: &ModelRegistry) -> Arc<ResourceDescriptor> {
	registry
		.get::<Person>()
		.cloned()
		.expect("person model is registered")
}

/// `(type, id)` pairs of the `included` member of a rendered document
pub fn included_keys(document: &Value) -> Vec<(String, String)> {
	document["included"]
		.as_array()
		.map(|included| {
			included
				.iter()
				.map(|resource| {
					(
						resource["type"].as_str().unwrap_or_default().to_string(),
						resource["id"].as_str().unwrap_or_default().to_string(),
					)
				})
				.collect()
		})
		.unwrap_or_default()
}

/// Install a test subscriber honouring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}
