//! The serialization facade

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use mosaic_conf::JsonApiSettings;
use mosaic_core::document::Document;
use mosaic_core::exception::{Error, Result};
use mosaic_core::model::{DomainObject, ModelRef, ModelRegistry, ResourceDescriptor, concrete_type_id};
use mosaic_core::query::{Pagination, QueryContext};
use mosaic_pagination::{Candidate, PaginationInterpreter, RequestUri};
use mosaic_urls::{DefaultUrlPathBuilder, UrlPathBuilder};

use crate::converters::{Converters, ValueConverter};
use crate::error::ErrorSerializer;
use crate::interpreter::{AttributeQueryEvaluator, QueryEvaluator, QueryInterpreter};
use crate::provider::ResourceProvider;
use crate::resource::ResourceSerializer;

/// What a request handler hands to the facade
pub enum Content<'a> {
	Null,
	Single {
		object: &'a DomainObject,
		model: Option<ModelRef>,
	},
	Many {
		objects: Vec<&'a DomainObject>,
		/// Element type, when every object shares one
		model: Option<ModelRef>,
	},
	Fault(&'a (dyn StdError + 'static)),
	Faults(Vec<&'a (dyn StdError + 'static)>),
}

impl<'a> Content<'a> {
	pub fn single<T: Any + Send + Sync>(object: &'a T) -> Self {
		Content::Single {
			object,
			model: Some(ModelRef::of::<T>()),
		}
	}

	/// A homogeneous sequence; the element type is known even when it is empty
	pub fn many<T, I>(objects: I) -> Self
	where
		T: Any + Send + Sync,
		I: IntoIterator<Item = &'a T>,
	{
		Content::Many {
			objects: objects
				.into_iter()
				.map(|object| object as &DomainObject)
				.collect(),
			model: Some(ModelRef::of::<T>()),
		}
	}

	/// A single type-erased object
	pub fn object(object: &'a DomainObject) -> Self {
		Content::Single { object, model: None }
	}

	/// A sequence of type-erased objects, possibly of different types
	///
	/// `filter[...]` and `sort` only apply when every object has the same
	/// concrete type; a mixed sequence keeps its order and members.
	pub fn objects(objects: Vec<&'a DomainObject>) -> Self {
		Content::Many { objects, model: None }
	}

	pub fn fault<E: StdError + 'static>(fault: &'a E) -> Self {
		Content::Fault(fault)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Content::Null)
	}

	/// Whether this is data rather than a fault
	pub fn is_data(&self) -> bool {
		!matches!(self, Content::Fault(_) | Content::Faults(_))
	}

	/// Whether there is no domain object to describe
	fn is_vacant(&self) -> bool {
		match self {
			Content::Null => true,
			Content::Many { objects, model: None } => objects.is_empty(),
			_ => false,
		}
	}

	fn model(&self) -> Option<ModelRef> {
		match self {
			Content::Single { model, .. } | Content::Many { model, .. } => *model,
			_ => None,
		}
	}

	fn first(&self) -> Option<&'a DomainObject> {
		match self {
			Content::Single { object, .. } => Some(*object),
			Content::Many { objects, .. } => objects.first().copied(),
			_ => None,
		}
	}

	fn shape(&self) -> &'static str {
		match self {
			Content::Null => "null",
			Content::Single { .. } => "single",
			Content::Many { .. } => "many",
			Content::Fault(_) => "fault",
			Content::Faults(_) => "faults",
		}
	}
}

impl fmt::Debug for Content<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Content::Null => f.write_str("Null"),
			Content::Single { model, .. } => f.debug_struct("Single").field("model", model).finish_non_exhaustive(),
			Content::Many { objects, model } => f
				.debug_struct("Many")
				.field("len", &objects.len())
				.field("model", model)
				.finish(),
			Content::Fault(fault) => f.debug_tuple("Fault").field(&fault.to_string()).finish(),
			Content::Faults(faults) => f.debug_tuple("Faults").field(&faults.len()).finish(),
		}
	}
}

/// Turns handler output into JSON:API documents
///
/// Built once from [`JsonApiSettings`] and a [`ModelRegistry`], then shared
/// across requests; every call owns its own walk state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use mosaic_conf::JsonApiSettings;
/// use mosaic_core::model::{ModelRegistry, ResourceModel};
/// use mosaic_serializers::{Content, JsonApiSerializer};
///
/// struct Person { id: u32, name: String }
///
/// let registry = ModelRegistry::new().with(
///     ResourceModel::<Person>::named("PersonModel")
///         .id(|p| p.id)
///         .attribute("name", |p| p.name.clone())
///         .build()?,
/// )?;
/// let serializer = JsonApiSerializer::from_settings(
///     JsonApiSettings::default().with_url_prefix("api"),
///     Arc::new(registry),
/// );
///
/// let people = vec![Person { id: 1, name: "Ann".into() }, Person { id: 2, name: "Bob".into() }];
/// let query = serializer.parse_query("page[size]=1")?;
/// let document = serializer.serialize(
///     Content::many(&people),
///     None,
///     Some("http://x/api/people?page[size]=1"),
///     Some(&query),
/// )?;
///
/// let value = document.to_value().unwrap();
/// assert_eq!(value["data"][0]["attributes"]["name"], "Ann");
/// assert_eq!(value["data"][0]["links"]["self"], "http://x/api/people/1/");
/// assert_eq!(value["meta"]["page"]["total-pages"], 2);
/// # Ok::<(), mosaic_core::Error>(())
/// ```
pub struct JsonApiSerializer {
	settings: JsonApiSettings,
	registry: Arc<ModelRegistry>,
	url_builder: Arc<dyn UrlPathBuilder>,
	converters: Converters,
	provider: Option<Arc<dyn ResourceProvider>>,
	evaluator: Arc<dyn QueryEvaluator>,
}

impl JsonApiSerializer {
	/// Facade with default settings
	pub fn new(registry: Arc<ModelRegistry>) -> Self {
		Self::from_settings(JsonApiSettings::default(), registry)
	}

	/// Facade over `settings`
	///
	/// Page sizes that break [`JsonApiSettings::validate`] are clamped by
	/// [`page_defaults`](Self::page_defaults) rather than rejected.
	pub fn from_settings(settings: JsonApiSettings, registry: Arc<ModelRegistry>) -> Self {
		if let Err(error) = settings.validate() {
			tracing::warn!(error = %error, "Inconsistent page settings; clamping the default page size");
		}
		let url_builder = DefaultUrlPathBuilder::with_prefix(&settings.url_prefix);
		Self {
			settings,
			registry,
			url_builder: Arc::new(url_builder),
			converters: Converters::new(),
			provider: None,
			evaluator: Arc::new(AttributeQueryEvaluator::new()),
		}
	}

	/// Replace the path builder derived from `url_prefix`
	pub fn with_url_builder(mut self, url_builder: impl UrlPathBuilder + 'static) -> Self {
		self.url_builder = Arc::new(url_builder);
		self
	}

	/// Append a converter; converters run in the order they were added
	pub fn with_converter(mut self, converter: impl ValueConverter + 'static) -> Self {
		self.converters.push(Arc::new(converter));
		self
	}

	pub fn with_resource_provider(mut self, provider: impl ResourceProvider + 'static) -> Self {
		self.provider = Some(Arc::new(provider));
		self
	}

	pub fn with_query_evaluator(mut self, evaluator: impl QueryEvaluator + 'static) -> Self {
		self.evaluator = Arc::new(evaluator);
		self
	}

	pub fn settings(&self) -> &JsonApiSettings {
		&self.settings
	}

	pub fn registry(&self) -> &Arc<ModelRegistry> {
		&self.registry
	}

	pub fn url_builder(&self) -> &dyn UrlPathBuilder {
		&*self.url_builder
	}

	/// Pagination applied to `page[...]` parameters the request leaves out
	///
	/// The default page size never exceeds the limit, so a request without
	/// `page[size]` is always within bounds.
	pub fn page_defaults(&self) -> Pagination {
		let limit = self.settings.page_size_limit.max(1);
		Pagination::default()
			.with_page_size(self.settings.default_page_size.clamp(1, limit))
			.with_limit(limit)
	}

	/// Parse a raw query string with the configured page defaults
	pub fn parse_query(&self, query: &str) -> Result<QueryContext> {
		QueryContext::parse(query, self.page_defaults())
	}

	/// Error serializer carrying the configured help link
	pub fn error_serializer(&self) -> ErrorSerializer {
		ErrorSerializer::new().help_link(self.settings.help_link.clone())
	}

	/// Serialize handler output
	///
	/// Only a missing or malformed request URI fails the call; every other
	/// problem, including faults passed in as content, yields an error
	/// document.
	pub fn serialize(
		&self,
		content: Content<'_>,
		descriptor: Option<&Arc<ResourceDescriptor>>,
		request_uri: Option<&str>,
		query: Option<&QueryContext>,
	) -> Result<Document> {
		let Some(request_uri) = request_uri else {
			tracing::warn!("Serialization attempted without a request URI");
			return Err(Error::MissingRequestUri);
		};
		let request_uri = RequestUri::parse(request_uri)?;
		tracing::debug!(uri = request_uri.as_str(), content = content.shape(), "Serializing response");

		let errors = self.error_serializer();
		let content = match content {
			Content::Fault(fault) => return Ok(errors.serialize_fault(fault)),
			Content::Faults(faults) => return Ok(errors.serialize_faults(faults)),
			data => data,
		};

		let default_query;
		let query = match query {
			Some(query) => query,
			None => {
				default_query = QueryContext::new();
				&default_query
			}
		};

		match self.serialize_data(content, descriptor, &request_uri, query) {
			Ok(document) => Ok(document),
			Err(error) => {
				tracing::debug!(error = %error, kind = %error.kind(), "Responding with an error document");
				Ok(errors.serialize_error(&error))
			}
		}
	}

	fn serialize_data(
		&self,
		content: Content<'_>,
		descriptor: Option<&Arc<ResourceDescriptor>>,
		request_uri: &RequestUri,
		query: &QueryContext,
	) -> Result<Document> {
		let descriptor = self.resolve_descriptor(&content, descriptor)?;
		PaginationInterpreter::new(query).validate()?;

		let candidate = match content {
			Content::Null => Candidate::Null,
			Content::Single { object, .. } => Candidate::Single(object),
			Content::Many { objects, model } => {
				let objects = match &descriptor {
					Some(descriptor) if model.is_some() || is_homogeneous(&objects) => {
						QueryInterpreter::new(query, &*self.evaluator).apply(descriptor, objects)?
					}
					Some(_) => {
						tracing::debug!(len = objects.len(), "Mixed sequence; skipping filter and sort");
						objects
					}
					None => objects,
				};
				Candidate::Sequence(objects)
			}
			Content::Fault(fault) => return Ok(self.error_serializer().serialize_fault(fault)),
			Content::Faults(faults) => return Ok(self.error_serializer().serialize_faults(faults)),
		};
		let candidate = PaginationInterpreter::new(query).apply_if_applicable(candidate);

		ResourceSerializer::new(&self.registry, &*self.url_builder)
			.with_converters(&self.converters)
			.with_member_case(self.settings.member_case)
			.with_include_by_default(self.settings.include_by_default)
			.serialize(candidate, descriptor.as_ref(), request_uri, query)
	}

	/// Explicit descriptor, then the resource provider, then the registry
	fn resolve_descriptor(
		&self,
		content: &Content<'_>,
		explicit: Option<&Arc<ResourceDescriptor>>,
	) -> Result<Option<Arc<ResourceDescriptor>>> {
		if let Some(descriptor) = explicit {
			return Ok(Some(Arc::clone(descriptor)));
		}

		if let Some(provider) = &self.provider {
			return match provider.resolve(content) {
				Some(descriptor) => Ok(Some(descriptor)),
				None if content.is_null() => Ok(None),
				None => {
					tracing::warn!(content = content.shape(), "Resource provider returned no descriptor");
					Err(Error::ResourceProviderReturnedNothing)
				}
			};
		}

		let by_model = content
			.model()
			.and_then(|model| self.registry.get_by_type_id(model.type_id()));
		let resolved = by_model.or_else(|| content.first().and_then(|object| self.registry.resolve(object)));
		match resolved {
			Some(descriptor) => Ok(Some(Arc::clone(descriptor))),
			None if content.is_vacant() => Ok(None),
			None => {
				let type_name = content
					.model()
					.map(|model| model.rust_name())
					.unwrap_or("<unregistered type>");
				tracing::warn!(type_name, "No resource descriptor registered for response content");
				Err(Error::UnresolvedResource {
					type_name: type_name.to_string(),
				})
			}
		}
	}
}

fn is_homogeneous(objects: &[&DomainObject]) -> bool {
	match objects.split_first() {
		Some((first, rest)) => {
			let type_id = concrete_type_id(*first);
			rest.iter().all(|object| concrete_type_id(*object) == type_id)
		}
		None => true,
	}
}

impl fmt::Debug for JsonApiSerializer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("JsonApiSerializer")
			.field("settings", &self.settings)
			.field("registry", &self.registry)
			.field("converters", &self.converters)
			.field("provider", &self.provider.is_some())
			.finish_non_exhaustive()
	}
}
