//! Positional and named substitution over resolved templates
//!
//! Positional substitution replaces `%s` tokens left to right; named
//! interpolation replaces `{{path.to.value}}` tokens by dot-path traversal
//! of a structured argument object. The two modes are mutually exclusive
//! per call; the call's argument shape selects one.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static MUSTACHE_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("Invalid mustache token pattern")
});

/// Replaces each `%s` token, left to right, with the next positional
/// argument's string form. With fewer arguments than tokens the surplus
/// tokens are left in place.
///
/// # Example
/// ```
/// use gengo::interpolate::sprintf;
/// use serde_json::json;
///
/// let out = sprintf("Hello %s, my name is %s", &[json!("Luke"), json!("John")]);
/// assert_eq!(out, "Hello Luke, my name is John");
///
/// let short = sprintf("Hello %s, my name is %s", &[json!("Luke")]);
/// assert_eq!(short, "Hello Luke, my name is %s");
/// ```
pub fn sprintf(template: &str, args: &[Value]) -> String {
	let mut out = String::with_capacity(template.len());
	let mut rest = template;
	let mut next = 0;

	while let Some(pos) = rest.find("%s") {
		if next >= args.len() {
			break;
		}
		out.push_str(&rest[..pos]);
		out.push_str(&value_to_string(&args[next]));
		next += 1;
		rest = &rest[pos + 2..];
	}
	out.push_str(rest);
	out
}

/// Replaces `{{path.to.value}}` tokens by looking the dot path up in the
/// named-argument object. Missing paths interpolate to an empty string.
///
/// # Example
/// ```
/// use gengo::interpolate::mustache;
/// use serde_json::json;
///
/// let data = json!({"name": "John", "my": {"firstname": "Luke"}});
/// assert_eq!(mustache("Hello {{name}}", &data), "Hello John");
/// assert_eq!(mustache("{{my.firstname}} {{my.lastname}}", &data), "Luke ");
/// ```
pub fn mustache(template: &str, data: &Value) -> String {
	MUSTACHE_RE
		.replace_all(template, |caps: &Captures<'_>| {
			lookup_path(data, &caps[1])
				.map(value_to_string)
				.unwrap_or_default()
		})
		.into_owned()
}

/// Dot-path traversal into a structured argument object.
fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
	let mut current = data;
	for segment in path.split('.') {
		current = current.get(segment)?;
	}
	Some(current)
}

/// String form of an argument value. Strings render without quotes, null
/// renders empty, everything else uses its JSON rendering.
pub(crate) fn value_to_string(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_sprintf_single() {
		assert_eq!(sprintf("Hello %s", &[json!("John")]), "Hello John");
	}

	#[rstest]
	fn test_sprintf_multiple_in_order() {
		// Arrange / Act
		let out = sprintf(
			"Hello %s, my name is %s",
			&[json!("Luke"), json!("John")],
		);

		// Assert
		assert_eq!(out, "Hello Luke, my name is John");
	}

	#[rstest]
	fn test_sprintf_surplus_tokens_left_in_place() {
		assert_eq!(sprintf("%s and %s", &[json!("one")]), "one and %s");
	}

	#[rstest]
	fn test_sprintf_surplus_args_ignored() {
		assert_eq!(
			sprintf("just %s", &[json!("this"), json!("extra")]),
			"just this"
		);
	}

	#[rstest]
	fn test_sprintf_numeric_argument() {
		assert_eq!(sprintf("%s items", &[json!(3)]), "3 items");
	}

	#[rstest]
	fn test_mustache_nested_paths() {
		// Arrange
		let data = json!({
			"name": "John",
			"my": {"firstname": "Luke", "lastname": "Skywalker"}
		});

		// Act
		let out = mustache(
			"Hello {{name}}, my name is {{my.firstname}} {{my.lastname}}",
			&data,
		);

		// Assert
		assert_eq!(out, "Hello John, my name is Luke Skywalker");
	}

	#[rstest]
	fn test_mustache_missing_path_is_empty() {
		let out = mustache("Hi {{missing.path}}!", &json!({"name": "x"}));

		assert_eq!(out, "Hi !");
	}

	#[rstest]
	fn test_mustache_tolerates_inner_whitespace() {
		let out = mustache("Hi {{ name }}", &json!({"name": "John"}));

		assert_eq!(out, "Hi John");
	}

	#[rstest]
	fn test_mustache_leaves_non_tokens_alone() {
		let template = "a { b } {{ }} c";
		assert_eq!(mustache(template, &json!({})), template);
	}
}
