//! Locale negotiation based on client language preferences
//!
//! The negotiator is a pure function of the preference header, the supported
//! set, and the default locale: identical inputs always produce the identical
//! locale, with no shared state between requests.

use std::fmt;
use std::str::FromStr;

use unic_langid::LanguageIdentifier;

use crate::error::{I18nError, Result};

/// A normalized locale tag belonging to the configured supported set.
///
/// Tags are lowercased on construction (`en-US` and `en-us` are the same
/// locale) and validated as language identifiers, so an unsupported or
/// malformed tag never reaches catalog lookup.
///
/// # Example
/// ```
/// use gengo::Locale;
///
/// let locale = Locale::parse("en-US").unwrap();
/// assert_eq!(locale.as_str(), "en-us");
/// assert_eq!(locale.primary(), "en");
///
/// assert!(Locale::parse("not a locale").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
	tag: String,
	primary: String,
}

impl Locale {
	/// Parse and normalize a locale tag.
	pub fn parse(tag: &str) -> Result<Self> {
		if tag.trim().is_empty() {
			return Err(I18nError::InvalidLocale(tag.to_string()));
		}
		let id = LanguageIdentifier::from_str(tag.trim())
			.map_err(|_| I18nError::InvalidLocale(tag.to_string()))?;
		Ok(Self {
			tag: tag.trim().to_ascii_lowercase(),
			primary: id.language.as_str().to_string(),
		})
	}

	/// The full normalized tag, e.g. `en-us`.
	pub fn as_str(&self) -> &str {
		&self.tag
	}

	/// The primary language subtag, e.g. `en` for `en-us`.
	pub fn primary(&self) -> &str {
		&self.primary
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.tag)
	}
}

/// A single client preference parsed from an Accept-Language style header.
#[derive(Debug, Clone, PartialEq)]
struct Preference {
	tag: String,
	primary: String,
	quality: f32,
}

impl Preference {
	/// Parses one header entry, e.g. `en-US;q=0.9`. Returns `None` for
	/// entries that carry no usable tag; malformed quality parameters
	/// degrade to 1.0.
	fn parse(entry: &str) -> Option<Self> {
		let mut parts = entry.split(';');
		let tag = parts.next()?.trim();
		if tag.is_empty()
			|| !tag
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*')
		{
			return None;
		}

		let mut quality = 1.0;
		for param in parts {
			if let Some((key, value)) = param.trim().split_once('=')
				&& key.trim() == "q"
				&& let Ok(q) = value.trim().parse::<f32>()
			{
				quality = q.clamp(0.0, 1.0);
			}
		}

		let tag = tag.to_ascii_lowercase();
		let primary = tag
			.split(['-', '_'])
			.next()
			.unwrap_or(tag.as_str())
			.to_string();
		Some(Self {
			tag,
			primary,
			quality,
		})
	}

	fn is_wildcard(&self) -> bool {
		self.tag == "*"
	}

	fn matches(&self, locale: &Locale) -> bool {
		self.is_wildcard() || self.tag == locale.as_str() || self.primary == locale.primary()
	}
}

/// Chooses the active locale for a request from the client's preference
/// list and the configured supported set.
///
/// # Example
/// ```
/// use gengo::{Locale, LocaleNegotiator};
///
/// let supported = vec![
///     Locale::parse("en-us").unwrap(),
///     Locale::parse("ja").unwrap(),
/// ];
/// let default = Locale::parse("en-us").unwrap();
/// let negotiator = LocaleNegotiator::new(supported, default);
///
/// assert_eq!(negotiator.negotiate("ja").as_str(), "ja");
/// assert_eq!(negotiator.negotiate("ja-JP, en;q=0.9").as_str(), "ja");
/// assert_eq!(negotiator.negotiate("de, fr").as_str(), "en-us");
/// assert_eq!(negotiator.negotiate("").as_str(), "en-us");
/// ```
#[derive(Debug, Clone)]
pub struct LocaleNegotiator {
	supported: Vec<Locale>,
	default: Locale,
}

impl LocaleNegotiator {
	/// Creates a negotiator over the given supported set and default.
	pub fn new(supported: Vec<Locale>, default: Locale) -> Self {
		Self { supported, default }
	}

	/// The configured default locale.
	pub fn default_locale(&self) -> &Locale {
		&self.default
	}

	/// The configured supported set, in configuration order.
	pub fn supported(&self) -> &[Locale] {
		&self.supported
	}

	/// Negotiates the locale for one request.
	///
	/// Preferences are walked in descending quality order (header order
	/// breaks ties); the first one matching a supported locale exactly or
	/// by primary subtag wins. A wildcard entry matches the first supported
	/// locale. An empty, malformed, or fully non-matching header yields the
	/// default locale, never an error.
	pub fn negotiate(&self, header: &str) -> Locale {
		let mut preferences: Vec<Preference> = header
			.split(',')
			.filter_map(|entry| Preference::parse(entry))
			.collect();
		// Stable sort keeps header order within equal qualities
		preferences.sort_by(|a, b| {
			b.quality
				.partial_cmp(&a.quality)
				.unwrap_or(std::cmp::Ordering::Equal)
		});

		for preference in &preferences {
			for locale in &self.supported {
				if preference.matches(locale) {
					tracing::debug!(locale = %locale, preference = %preference.tag, "negotiated locale");
					return locale.clone();
				}
			}
		}

		tracing::debug!(locale = %self.default, "no preference matched, using default locale");
		self.default.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn negotiator() -> LocaleNegotiator {
		LocaleNegotiator::new(
			vec![
				Locale::parse("en-us").unwrap(),
				Locale::parse("ja").unwrap(),
			],
			Locale::parse("en-us").unwrap(),
		)
	}

	#[rstest]
	fn test_locale_normalization() {
		// Arrange / Act
		let locale = Locale::parse("EN-US").unwrap();

		// Assert
		assert_eq!(locale.as_str(), "en-us");
		assert_eq!(locale.primary(), "en");
	}

	#[rstest]
	fn test_locale_rejects_garbage() {
		assert!(Locale::parse("").is_err());
		assert!(Locale::parse("!!").is_err());
	}

	#[rstest]
	fn test_preference_parse_quality() {
		// Arrange / Act
		let pref = Preference::parse("en-US;q=0.9").unwrap();

		// Assert
		assert_eq!(pref.tag, "en-us");
		assert_eq!(pref.primary, "en");
		assert_eq!(pref.quality, 0.9);
	}

	#[rstest]
	fn test_preference_parse_clamps_quality() {
		let pref = Preference::parse("ja;q=7").unwrap();
		assert_eq!(pref.quality, 1.0);
	}

	#[rstest]
	#[case("ja", "ja")] // exact match
	#[case("ja-JP", "ja")] // primary subtag match
	#[case("en-US", "en-us")] // exact, case-insensitive
	#[case("en", "en-us")] // primary subtag of a regioned supported locale
	#[case("de, fr", "en-us")] // nothing matches -> default
	#[case("", "en-us")] // empty header -> default
	#[case(";;q=", "en-us")] // malformed header -> default
	#[case("de;q=0.9, ja;q=0.8", "ja")] // only ja is supported
	#[case("ja;q=0.5, en;q=0.9", "en-us")] // quality order wins
	#[case("*", "en-us")] // wildcard -> first supported
	fn test_negotiate(#[case] header: &str, #[case] expected: &str) {
		// Arrange
		let negotiator = negotiator();

		// Act
		let locale = negotiator.negotiate(header);

		// Assert
		assert_eq!(locale.as_str(), expected, "header {header:?}");
	}

	#[rstest]
	fn test_negotiator_exposes_configuration() {
		// Arrange
		let negotiator = negotiator();

		// Act / Assert: hosts introspect the configured set for diagnostics
		assert_eq!(negotiator.default_locale().as_str(), "en-us");
		let supported: Vec<&str> = negotiator.supported().iter().map(Locale::as_str).collect();
		assert_eq!(supported, vec!["en-us", "ja"]);
	}

	#[rstest]
	fn test_negotiate_is_deterministic() {
		// Arrange
		let negotiator = negotiator();

		// Act
		let first = negotiator.negotiate("ja, en;q=0.9");
		let second = negotiator.negotiate("ja, en;q=0.9");

		// Assert
		assert_eq!(first, second);
	}
}
