//! Pluggable message formatting
//!
//! A translate call may route its resolved template through a named format
//! plugin instead of the substitution engine, by supplying a
//! `{parser: name}` directive plus a data object. Plugins are registered by
//! name when the engine is built; referencing an unregistered name is a
//! configuration error raised at the call site, never a silent fallback to
//! plain substitution.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{I18nError, Result};
use crate::interpolate::value_to_string;

/// Capability interface each format plugin implements.
pub trait Formatter: Send + Sync {
	/// Renders a resolved template against structured data.
	fn format(&self, template: &str, data: &Value) -> Result<String>;
}

/// Name-keyed plugin registry, populated at engine construction.
///
/// # Example
/// ```
/// use gengo::{FormatterRegistry, I18nError};
/// use serde_json::json;
///
/// let registry = FormatterRegistry::with_defaults();
/// let out = registry
///     .format("format", "You have {numPhotos, number} photos.", &json!({"numPhotos": 1000}))
///     .unwrap();
/// assert_eq!(out, "You have 1,000 photos.");
///
/// let err = registry.format("nope", "x", &json!({})).unwrap_err();
/// assert!(matches!(err, I18nError::UnknownFormatter(_)));
/// ```
#[derive(Clone, Default)]
pub struct FormatterRegistry {
	plugins: HashMap<String, Arc<dyn Formatter>>,
}

impl FormatterRegistry {
	/// An empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry with the built-in [`MessageFormatter`] registered under
	/// `"format"`.
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		registry.register(MessageFormatter::NAME, Arc::new(MessageFormatter));
		registry
	}

	/// Registers a plugin under a name, replacing any previous plugin with
	/// the same name.
	pub fn register(&mut self, name: impl Into<String>, formatter: Arc<dyn Formatter>) {
		self.plugins.insert(name.into(), formatter);
	}

	pub fn contains(&self, name: &str) -> bool {
		self.plugins.contains_key(name)
	}

	/// Formats through the named plugin.
	///
	/// # Errors
	/// [`I18nError::UnknownFormatter`] when no plugin is registered under
	/// `name`; otherwise whatever the plugin itself raises.
	pub fn format(&self, name: &str, template: &str, data: &Value) -> Result<String> {
		let plugin = self
			.plugins
			.get(name)
			.ok_or_else(|| I18nError::UnknownFormatter(name.to_string()))?;
		plugin.format(template, data)
	}
}

/// Built-in ICU-style message formatter.
///
/// Supports the subset the engine's callers rely on:
///
/// - `{name}` — plain argument insertion
/// - `{name, number}` — numeric insertion with thousands grouping
/// - `{name, plural, =N {...} one {...} other {...}}` — branch selection on
///   a count, with `#` inside a branch standing for the grouped count
pub struct MessageFormatter;

impl MessageFormatter {
	pub const NAME: &'static str = "format";

	fn error(message: impl Into<String>) -> I18nError {
		I18nError::Format {
			plugin: Self::NAME.to_string(),
			message: message.into(),
		}
	}

	fn render_token(&self, token: &str, data: &Value) -> Result<String> {
		let (name, directive) = match token.split_once(',') {
			Some((name, directive)) => (name.trim(), Some(directive.trim())),
			None => (token.trim(), None),
		};
		let value = data
			.get(name)
			.ok_or_else(|| Self::error(format!("missing argument '{name}'")))?;

		match directive {
			None => Ok(value_to_string(value)),
			Some("number") => {
				group_number(value).ok_or_else(|| Self::error(format!("argument '{name}' is not a number")))
			}
			Some(directive) if directive.starts_with("plural") => {
				let branches = directive
					.strip_prefix("plural")
					.and_then(|rest| rest.trim_start().strip_prefix(','))
					.ok_or_else(|| Self::error("malformed plural directive"))?;
				self.render_plural(name, value, branches, data)
			}
			Some(other) => Err(Self::error(format!("unsupported directive '{other}'"))),
		}
	}

	fn render_plural(&self, name: &str, value: &Value, branch_list: &str, data: &Value) -> Result<String> {
		let count = value
			.as_i64()
			.ok_or_else(|| Self::error(format!("plural argument '{name}' is not an integer")))?;
		let branches = parse_branches(branch_list).map_err(Self::error)?;

		let selected = branches
			.iter()
			.find(|(selector, _)| {
				selector
					.strip_prefix('=')
					.and_then(|n| n.parse::<i64>().ok())
					.is_some_and(|n| n == count)
			})
			.or_else(|| {
				let keyword = match count {
					0 => "zero",
					1 => "one",
					2 => "two",
					_ => "",
				};
				branches.iter().find(|(selector, _)| selector == keyword)
			})
			.or_else(|| branches.iter().find(|(selector, _)| selector == "other"))
			.ok_or_else(|| Self::error(format!("no plural branch for count {count}")))?;

		let body = selected.1.replace('#', &group_int(count));
		// Branch bodies may themselves carry argument tokens
		self.format(&body, data)
	}
}

impl Formatter for MessageFormatter {
	fn format(&self, template: &str, data: &Value) -> Result<String> {
		let mut out = String::with_capacity(template.len());
		let mut rest = template;

		while let Some(start) = rest.find('{') {
			out.push_str(&rest[..start]);
			let (token, after) = take_braced(&rest[start..])
				.ok_or_else(|| Self::error("unbalanced braces in template"))?;
			out.push_str(&self.render_token(token, data)?);
			rest = after;
		}
		out.push_str(rest);
		Ok(out)
	}
}

/// Given input starting at `{`, returns the brace contents (with nested
/// braces intact) and the remainder after the matching close.
fn take_braced(input: &str) -> Option<(&str, &str)> {
	debug_assert!(input.starts_with('{'));
	let mut depth = 0usize;
	for (idx, ch) in input.char_indices() {
		match ch {
			'{' => depth += 1,
			'}' => {
				depth -= 1;
				if depth == 0 {
					return Some((&input[1..idx], &input[idx + 1..]));
				}
			}
			_ => {}
		}
	}
	None
}

/// Splits `=0 {...} one {...} other {...}` into (selector, body) pairs.
fn parse_branches(branch_list: &str) -> std::result::Result<Vec<(String, String)>, String> {
	let mut branches = Vec::new();
	let mut rest = branch_list.trim();

	while !rest.is_empty() {
		let brace = rest
			.find('{')
			.ok_or_else(|| format!("selector '{rest}' has no branch body"))?;
		let selector = rest[..brace].trim();
		if selector.is_empty() {
			return Err("empty plural selector".to_string());
		}
		let (body, after) =
			take_braced(&rest[brace..]).ok_or_else(|| "unbalanced branch body".to_string())?;
		branches.push((selector.to_string(), body.trim().to_string()));
		rest = after.trim_start();
	}

	Ok(branches)
}

/// Thousands-grouped rendering of a numeric argument.
fn group_number(value: &Value) -> Option<String> {
	if let Some(n) = value.as_i64() {
		return Some(group_int(n));
	}
	let f = value.as_f64()?;
	let rendered = f.to_string();
	// Split the sign off first: the integer part of e.g. -0.5 is "-0",
	// which would otherwise collapse to an unsigned zero
	let (sign, digits) = match rendered.strip_prefix('-') {
		Some(rest) => ("-", rest),
		None => ("", rendered.as_str()),
	};
	let grouped = match digits.split_once('.') {
		Some((int_part, frac)) => {
			let int: i64 = int_part.parse().ok()?;
			format!("{}.{}", group_int(int), frac)
		}
		None => group_int(digits.parse().ok()?),
	};
	Some(format!("{sign}{grouped}"))
}

fn group_int(n: i64) -> String {
	let digits = n.unsigned_abs().to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (idx, ch) in digits.chars().enumerate() {
		if idx > 0 && (digits.len() - idx) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}
	if n < 0 {
		format!("-{grouped}")
	} else {
		grouped
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(0, "0")]
	#[case(999, "999")]
	#[case(1000, "1,000")]
	#[case(1234567, "1,234,567")]
	#[case(-45000, "-45,000")]
	fn test_group_int(#[case] n: i64, #[case] expected: &str) {
		assert_eq!(group_int(n), expected);
	}

	#[rstest]
	#[case(json!(1234.5), "1,234.5")]
	#[case(json!(-0.5), "-0.5")] // integer part "-0" must not lose the sign
	#[case(json!(-1234.5), "-1,234.5")]
	#[case(json!(0.25), "0.25")]
	fn test_group_fractional_number(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(group_number(&value), Some(expected.to_string()));
	}

	#[rstest]
	fn test_number_token_negative_fraction_keeps_sign() {
		// Arrange
		let registry = FormatterRegistry::with_defaults();

		// Act
		let out = registry
			.format("format", "{delta, number}", &json!({"delta": -0.5}))
			.unwrap();

		// Assert
		assert_eq!(out, "-0.5");
	}

	#[rstest]
	fn test_plain_argument_token() {
		// Arrange
		let formatter = MessageFormatter;

		// Act
		let out = formatter
			.format("Hello {name}!", &json!({"name": "John"}))
			.unwrap();

		// Assert
		assert_eq!(out, "Hello John!");
	}

	#[rstest]
	fn test_number_token_groups_thousands() {
		// Arrange
		let formatter = MessageFormatter;

		// Act
		let out = formatter
			.format(
				"You have {numPhotos, number} photos.",
				&json!({"numPhotos": 1000}),
			)
			.unwrap();

		// Assert
		assert_eq!(out, "You have 1,000 photos.");
	}

	#[rstest]
	#[case(0, "You have no photos.")]
	#[case(1, "You have one photo.")]
	#[case(1000, "You have 1,000 photos.")]
	fn test_plural_token(#[case] count: i64, #[case] expected: &str) {
		// Arrange
		let formatter = MessageFormatter;
		let template =
			"You have {numPhotos, plural, =0 {no photos.} =1 {one photo.} other {# photos.}}";

		// Act
		let out = formatter
			.format(template, &json!({"numPhotos": count}))
			.unwrap();

		// Assert
		assert_eq!(out, expected);
	}

	#[rstest]
	fn test_plural_keyword_branch() {
		let formatter = MessageFormatter;
		let out = formatter
			.format(
				"{n, plural, one {an item} other {# items}}",
				&json!({"n": 1}),
			)
			.unwrap();

		assert_eq!(out, "an item");
	}

	#[rstest]
	fn test_missing_argument_is_an_error() {
		let formatter = MessageFormatter;
		let result = formatter.format("{absent}", &json!({}));

		assert!(matches!(result, Err(I18nError::Format { .. })));
	}

	#[rstest]
	fn test_unbalanced_braces_are_an_error() {
		let formatter = MessageFormatter;
		let result = formatter.format("broken {name", &json!({"name": "x"}));

		assert!(matches!(result, Err(I18nError::Format { .. })));
	}

	#[rstest]
	fn test_registry_contains_reports_wiring() {
		// Hosts verify plugin wiring at startup rather than at call time
		let registry = FormatterRegistry::with_defaults();

		assert!(registry.contains(MessageFormatter::NAME));
		assert!(!registry.contains("msgfmt"));
	}

	#[rstest]
	fn test_registry_unknown_plugin() {
		// Arrange
		let registry = FormatterRegistry::with_defaults();

		// Act
		let result = registry.format("msgfmt", "x", &json!({}));

		// Assert: raised synchronously, never a degraded string
		assert!(matches!(result, Err(I18nError::UnknownFormatter(name)) if name == "msgfmt"));
	}

	#[rstest]
	fn test_registry_register_custom_plugin() {
		// Arrange
		struct Upper;
		impl Formatter for Upper {
			fn format(&self, template: &str, _data: &Value) -> Result<String> {
				Ok(template.to_uppercase())
			}
		}
		let mut registry = FormatterRegistry::new();
		registry.register("upper", Arc::new(Upper));

		// Act
		let out = registry.format("upper", "hey", &json!({})).unwrap();

		// Assert
		assert_eq!(out, "HEY");
	}
}
