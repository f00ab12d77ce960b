//! Engine configuration

use serde::{Deserialize, Serialize};

/// Configuration for the localization engine.
///
/// Mirrors the deployment knobs of the host integration: which locales are
/// served, which one is the fallback, and whether catalog lookups consult
/// route-scoped overlays.
///
/// # Example
/// ```
/// use gengo::I18nConfig;
///
/// let config = I18nConfig {
///     supported: vec!["en-us".into(), "ja".into()],
///     default_locale: "en-us".into(),
///     router_enabled: true,
/// };
/// assert!(config.router_enabled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
	/// Locale tags the deployment serves. Every tag must parse as a
	/// language identifier; the set is fixed at engine construction.
	pub supported: Vec<String>,
	/// Fallback locale when negotiation finds no match. Must be a member
	/// of `supported`.
	pub default_locale: String,
	/// When false, route overlays are ignored and every lookup uses the
	/// global root for the negotiated locale.
	#[serde(default)]
	pub router_enabled: bool,
}

impl Default for I18nConfig {
	fn default() -> Self {
		Self {
			supported: vec!["en-us".to_string()],
			default_locale: "en-us".to_string(),
			router_enabled: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config() {
		let config = I18nConfig::default();

		assert_eq!(config.supported, vec!["en-us".to_string()]);
		assert_eq!(config.default_locale, "en-us");
		assert!(!config.router_enabled);
	}

	#[test]
	fn test_deserialize_without_router_flag() {
		let config: I18nConfig = serde_json::from_str(
			r#"{"supported": ["en-us", "ja"], "default_locale": "en-us"}"#,
		)
		.unwrap();

		assert_eq!(config.supported.len(), 2);
		assert!(!config.router_enabled);
	}
}
