//! Naming conventions for resource models
//!
//! Resource type names are derived from model names, and default URL path
//! segments are derived from resource type names.

use convert_case::{Case, Casing};

/// Suffix stripped from model names when deriving the wire-visible type name
pub const MODEL_SUFFIX: &str = "Model";

/// Derive the resource `type` from a model name
///
/// A trailing `Model` suffix is removed; any other name is used verbatim.
/// A name consisting only of the suffix is kept as-is so that the type is
/// never empty.
///
/// # Examples
///
/// ```
/// use mosaic_core::model::naming::derive_type_name;
///
/// assert_eq!(derive_type_name("PersonModel"), "Person");
/// assert_eq!(derive_type_name("Person"), "Person");
/// assert_eq!(derive_type_name("Model"), "Model");
/// ```
pub fn derive_type_name(model_name: &str) -> String {
	match model_name.strip_suffix(MODEL_SUFFIX) {
		Some(stripped) if !stripped.is_empty() => stripped.to_string(),
		_ => model_name.to_string(),
	}
}

/// Last path segment of a Rust type name, without generic arguments
///
/// # Examples
///
/// ```
/// use mosaic_core::model::naming::short_type_name;
///
/// assert_eq!(short_type_name("app::domain::PersonModel"), "PersonModel");
/// assert_eq!(short_type_name("app::Page<alloc::string::String>"), "Page");
/// ```
pub fn short_type_name(full_name: &str) -> &str {
	let without_generics = full_name.split('<').next().unwrap_or(full_name);
	without_generics
		.rsplit("::")
		.next()
		.unwrap_or(without_generics)
}

/// Default URL path segment for a resource type: kebab-cased and pluralised
///
/// # Examples
///
/// ```
/// use mosaic_core::model::naming::default_url_path;
///
/// assert_eq!(default_url_path("Person"), "people");
/// assert_eq!(default_url_path("BlogPost"), "blog-posts");
/// assert_eq!(default_url_path("Category"), "categories");
/// ```
pub fn default_url_path(type_name: &str) -> String {
	let kebab = type_name.to_case(Case::Kebab);
	match kebab.rsplit_once('-') {
		Some((head, last)) => format!("{}-{}", head, pluralize(last)),
		None => pluralize(&kebab),
	}
}

const IRREGULAR: &[(&str, &str)] = &[
	("person", "people"),
	("man", "men"),
	("woman", "women"),
	("child", "children"),
	("mouse", "mice"),
	("goose", "geese"),
	("foot", "feet"),
	("tooth", "teeth"),
	("ox", "oxen"),
	("datum", "data"),
];

const UNCOUNTABLE: &[&str] = &[
	"equipment",
	"information",
	"rice",
	"money",
	"species",
	"series",
	"fish",
	"sheep",
	"news",
	"data",
	"metadata",
];

/// Pluralise a single lowercase English word
///
/// Covers the regular suffix rules plus a small table of irregular and
/// uncountable nouns; anything else gets a trailing `s`.
///
/// # Examples
///
/// ```
/// use mosaic_core::model::naming::pluralize;
///
/// assert_eq!(pluralize("person"), "people");
/// assert_eq!(pluralize("box"), "boxes");
/// assert_eq!(pluralize("city"), "cities");
/// assert_eq!(pluralize("day"), "days");
/// assert_eq!(pluralize("knife"), "knives");
/// assert_eq!(pluralize("sheep"), "sheep");
/// assert_eq!(pluralize("article"), "articles");
/// ```
pub fn pluralize(word: &str) -> String {
	if word.is_empty() || UNCOUNTABLE.contains(&word) {
		return word.to_string();
	}
	if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
		return (*plural).to_string();
	}

	if ["s", "x", "z", "ch", "sh"]
		.iter()
		.any(|suffix| word.ends_with(suffix))
	{
		return format!("{}es", word);
	}
	if let Some(stem) = word.strip_suffix('y')
		&& stem.chars().last().is_some_and(|c| !"aeiou".contains(c))
	{
		return format!("{}ies", stem);
	}
	if let Some(stem) = word.strip_suffix("fe") {
		return format!("{}ves", stem);
	}

	format!("{}s", word)
}
