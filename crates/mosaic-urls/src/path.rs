//! Path joining helpers

/// Join path segments with single `/` separators
///
/// Each segment is trimmed of surrounding slashes first; empty segments are
/// dropped, so duplicate separators never appear.
///
/// # Examples
///
/// ```
/// use mosaic_urls::trim_join;
///
/// assert_eq!(trim_join(["/api/", "/people", "1/"]), "api/people/1");
/// assert_eq!(trim_join(["", "/", "people"]), "people");
/// ```
pub fn trim_join<'a, I>(segments: I) -> String
where
	I: IntoIterator<Item = &'a str>,
{
	let mut joined = String::new();
	for segment in segments {
		for part in segment.split('/').filter(|part| !part.is_empty()) {
			if !joined.is_empty() {
				joined.push('/');
			}
			joined.push_str(part);
		}
	}
	joined
}

/// Wrap a joined path in leading and trailing slashes
///
/// # Examples
///
/// ```
/// use mosaic_urls::ensure_slashes;
///
/// assert_eq!(ensure_slashes("api/people"), "/api/people/");
/// assert_eq!(ensure_slashes(""), "/");
/// ```
pub fn ensure_slashes(path: &str) -> String {
	let trimmed = path.trim_matches('/');
	if trimmed.is_empty() {
		"/".to_string()
	} else {
		format!("/{}/", trimmed)
	}
}
