//! Filtering and sorting of candidate sequences

use std::cmp::Ordering;

use convert_case::{Case, Casing};
use mosaic_core::exception::{Error, Result};
use mosaic_core::model::{AttributeDescriptor, DomainObject, ResourceDescriptor};
use mosaic_core::query::{FilterExpressions, FilterPredicate, QueryContext, SortDirection, SortField};
use serde_json::Value;

/// Evaluates filter predicates and sort keys against domain objects
///
/// Hosts backed by a query engine can implement this to push the work
/// elsewhere; [`AttributeQueryEvaluator`] evaluates everything in memory.
pub trait QueryEvaluator: Send + Sync {
	/// Reject requests naming fields the resource does not expose
	fn validate(&self, _descriptor: &ResourceDescriptor, _context: &QueryContext) -> Result<()> {
		Ok(())
	}

	/// Whether `object` satisfies `predicate`
	fn matches(
		&self,
		descriptor: &ResourceDescriptor,
		object: &DomainObject,
		predicate: &FilterPredicate,
		expressions: &FilterExpressions,
	) -> Result<bool>;

	/// The value `object` is ordered by for `field`
	fn sort_key(&self, descriptor: &ResourceDescriptor, object: &DomainObject, field: &SortField) -> Result<Value>;

	/// Ascending order of two sort keys
	fn compare(&self, left: &Value, right: &Value) -> Ordering {
		compare_values(left, right)
	}
}

/// Filters and sorts on attribute values read through the descriptor
///
/// Field names match a declared attribute exactly or after normalising both
/// sides to snake case, so `birth-date`, `birthDate` and `birth_date` all
/// name the same attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeQueryEvaluator;

impl AttributeQueryEvaluator {
	pub fn new() -> Self {
		Self
	}

	fn attribute<'d>(descriptor: &'d ResourceDescriptor, name: &str) -> Option<&'d AttributeDescriptor> {
		descriptor.attribute(name).or_else(|| {
			let wanted = name.to_case(Case::Snake);
			descriptor
				.attributes()
				.iter()
				.find(|attribute| attribute.name().to_case(Case::Snake) == wanted)
		})
	}
}

impl QueryEvaluator for AttributeQueryEvaluator {
	fn validate(&self, descriptor: &ResourceDescriptor, context: &QueryContext) -> Result<()> {
		for predicate in &context.filtering.predicates {
			if Self::attribute(descriptor, &predicate.name).is_none() {
				return Err(Error::UnknownFilterField {
					resource: descriptor.type_name().to_string(),
					field: predicate.name.clone(),
				});
			}
		}
		for field in &context.sorting.ordered_fields {
			if Self::attribute(descriptor, &field.name).is_none() {
				return Err(Error::UnknownSortField {
					resource: descriptor.type_name().to_string(),
					field: field.name.clone(),
				});
			}
		}
		Ok(())
	}

	fn matches(
		&self,
		descriptor: &ResourceDescriptor,
		object: &DomainObject,
		predicate: &FilterPredicate,
		expressions: &FilterExpressions,
	) -> Result<bool> {
		let attribute =
			Self::attribute(descriptor, &predicate.name).ok_or_else(|| Error::UnknownFilterField {
				resource: descriptor.type_name().to_string(),
				field: predicate.name.clone(),
			})?;
		let value = descriptor.read_attribute(attribute, object)?;
		let name = if expressions.get(attribute.name()).is_some() {
			attribute.name()
		} else {
			predicate.name.as_str()
		};
		Ok(expressions.matches(name, &value, &predicate.value))
	}

	fn sort_key(&self, descriptor: &ResourceDescriptor, object: &DomainObject, field: &SortField) -> Result<Value> {
		let attribute = Self::attribute(descriptor, &field.name).ok_or_else(|| Error::UnknownSortField {
			resource: descriptor.type_name().to_string(),
			field: field.name.clone(),
		})?;
		descriptor.read_attribute(attribute, object)
	}
}

/// Total order over JSON values
///
/// Values of different kinds order as `null < bool < number < string < array
/// < object`. Numbers compare numerically, strings by code point, arrays
/// element by element; objects compare by size only.
///
/// # Examples
///
/// ```
/// use mosaic_serializers::compare_values;
/// use serde_json::json;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
/// assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
/// assert_eq!(compare_values(&json!(null), &json!(false)), Ordering::Less);
/// assert_eq!(compare_values(&json!([1, 2]), &json!([1, 2, 0])), Ordering::Less);
/// ```
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
	match (left, right) {
		(Value::Null, Value::Null) => Ordering::Equal,
		(Value::Bool(a), Value::Bool(b)) => a.cmp(b),
		(Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
			(Some(a), Some(b)) => a.cmp(&b),
			_ => {
				let a = a.as_f64().unwrap_or(f64::NAN);
				let b = b.as_f64().unwrap_or(f64::NAN);
				a.total_cmp(&b)
			}
		},
		(Value::String(a), Value::String(b)) => a.cmp(b),
		(Value::Array(a), Value::Array(b)) => a
			.iter()
			.zip(b)
			.map(|(a, b)| compare_values(a, b))
			.find(|ordering| ordering.is_ne())
			.unwrap_or_else(|| a.len().cmp(&b.len())),
		(Value::Object(a), Value::Object(b)) => a.len().cmp(&b.len()),
		_ => rank(left).cmp(&rank(right)),
	}
}

fn rank(value: &Value) -> u8 {
	match value {
		Value::Null => 0,
		Value::Bool(_) => 1,
		Value::Number(_) => 2,
		Value::String(_) => 3,
		Value::Array(_) => 4,
		Value::Object(_) => 5,
	}
}

/// Applies a request's `filter[...]` and `sort` parameters
///
/// Filtering runs first, then a stable sort, so objects with equal keys keep
/// their source order.
///
/// # Examples
///
/// ```
/// use mosaic_core::model::{DomainObject, ResourceModel};
/// use mosaic_core::query::QueryContext;
/// use mosaic_serializers::{AttributeQueryEvaluator, QueryInterpreter};
///
/// struct City { id: u32, name: &'static str, population: u32 }
///
/// let descriptor = ResourceModel::<City>::new()
///     .id(|c| c.id)
///     .attribute("name", |c| c.name)
///     .attribute("population", |c| c.population)
///     .build()?;
/// let cities = [
///     City { id: 1, name: "Oslo", population: 700 },
///     City { id: 2, name: "Bergen", population: 290 },
///     City { id: 3, name: "Oslo", population: 1 },
/// ];
///
/// let context = QueryContext::from_query_str("filter[name]=Oslo&sort=-population")?;
/// let evaluator = AttributeQueryEvaluator::new();
/// let objects: Vec<&DomainObject> = cities.iter().map(|c| c as &DomainObject).collect();
///
/// let selected = QueryInterpreter::new(&context, &evaluator).apply(&descriptor, objects)?;
/// let ids: Vec<u32> = selected.iter().map(|o| o.downcast_ref::<City>().unwrap().id).collect();
/// assert_eq!(ids, vec![1, 3]);
/// # Ok::<(), mosaic_core::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct QueryInterpreter<'a> {
	context: &'a QueryContext,
	evaluator: &'a dyn QueryEvaluator,
}

impl<'a> QueryInterpreter<'a> {
	pub fn new(context: &'a QueryContext, evaluator: &'a dyn QueryEvaluator) -> Self {
		Self { context, evaluator }
	}

	/// Whether the request filters or sorts at all
	pub fn is_applicable(&self) -> bool {
		!self.context.filtering.is_empty() || !self.context.sorting.is_empty()
	}

	pub fn apply<'o>(
		&self,
		descriptor: &ResourceDescriptor,
		objects: Vec<&'o DomainObject>,
	) -> Result<Vec<&'o DomainObject>> {
		if !self.is_applicable() {
			return Ok(objects);
		}
		self.evaluator.validate(descriptor, self.context)?;

		let before = objects.len();
		let filtered = self.filter(descriptor, objects)?;
		let sorted = self.sort(descriptor, filtered)?;
		tracing::debug!(
			resource = descriptor.type_name(),
			before,
			after = sorted.len(),
			sort = %self.context.sorting,
			"Applied filtering and sorting"
		);
		Ok(sorted)
	}

	fn filter<'o>(
		&self,
		descriptor: &ResourceDescriptor,
		objects: Vec<&'o DomainObject>,
	) -> Result<Vec<&'o DomainObject>> {
		let filtering = &self.context.filtering;
		if filtering.is_empty() {
			return Ok(objects);
		}
		let mut kept = Vec::with_capacity(objects.len());
		'objects: for object in objects {
			for predicate in &filtering.predicates {
				if !self.evaluator.matches(
					descriptor,
					object,
					predicate,
					&filtering.available_filter_expressions,
				)? {
					continue 'objects;
				}
			}
			kept.push(object);
		}
		Ok(kept)
	}

	fn sort<'o>(
		&self,
		descriptor: &ResourceDescriptor,
		objects: Vec<&'o DomainObject>,
	) -> Result<Vec<&'o DomainObject>> {
		let fields = &self.context.sorting.ordered_fields;
		if fields.is_empty() {
			return Ok(objects);
		}
		let mut keyed = objects
			.into_iter()
			.map(|object| {
				let keys = fields
					.iter()
					.map(|field| self.evaluator.sort_key(descriptor, object, field))
					.collect::<Result<Vec<_>>>()?;
				Ok((keys, object))
			})
			.collect::<Result<Vec<_>>>()?;

		keyed.sort_by(|(left, _), (right, _)| {
			left.iter()
				.zip(right)
				.zip(fields)
				.map(|((left, right), field)| {
					let ordering = self.evaluator.compare(left, right);
					match field.direction {
						SortDirection::Ascending => ordering,
						SortDirection::Descending => ordering.reverse(),
					}
				})
				.find(|ordering| ordering.is_ne())
				.unwrap_or(Ordering::Equal)
		});
		Ok(keyed.into_iter().map(|(_, object)| object).collect())
	}
}
