//! Sort parameters

use std::fmt;

use crate::exception::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
	#[default]
	Ascending,
	Descending,
}

/// One field of a `sort` parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortField {
	pub name: String,
	pub direction: SortDirection,
}

impl SortField {
	pub fn ascending(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			direction: SortDirection::Ascending,
		}
	}

	pub fn descending(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			direction: SortDirection::Descending,
		}
	}
}

impl fmt::Display for SortField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.direction == SortDirection::Descending {
			f.write_str("-")?;
		}
		f.write_str(&self.name)
	}
}

/// Ordered sort fields; earlier fields take precedence
///
/// # Examples
///
/// ```
/// use mosaic_core::query::{SortField, Sorting};
///
/// let sorting = Sorting::parse("-age,name").unwrap();
/// assert_eq!(
///     sorting.ordered_fields,
///     vec![SortField::descending("age"), SortField::ascending("name")]
/// );
/// assert_eq!(sorting.to_string(), "-age,name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sorting {
	pub ordered_fields: Vec<SortField>,
}

impl Sorting {
	pub fn new(ordered_fields: Vec<SortField>) -> Self {
		Self { ordered_fields }
	}

	/// Parse a comma separated `sort` value; `-` prefixes mean descending
	pub fn parse(value: &str) -> Result<Self> {
		let mut ordered_fields = Vec::new();
		for raw in value.split(',') {
			let raw = raw.trim();
			let field = match raw.strip_prefix('-') {
				Some(name) => SortField::descending(name),
				None => SortField::ascending(raw),
			};
			if field.name.is_empty() {
				return Err(Error::invalid_query("sort", "sort field names cannot be empty"));
			}
			ordered_fields.push(field);
		}
		Ok(Self { ordered_fields })
	}

	pub fn is_empty(&self) -> bool {
		self.ordered_fields.is_empty()
	}
}

impl fmt::Display for Sorting {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (index, field) in self.ordered_fields.iter().enumerate() {
			if index > 0 {
				f.write_str(",")?;
			}
			write!(f, "{}", field)?;
		}
		Ok(())
	}
}
