//! Error types for the localization engine

use thiserror::Error;

/// Errors raised by catalog construction, engine configuration, and
/// translation calls.
///
/// Per-call lookup misses are never errors: phrase misses fall back to the
/// literal key and path misses resolve to an empty string. The only failure
/// a `translate` call can surface is [`I18nError::UnknownFormatter`].
#[derive(Debug, Error)]
pub enum I18nError {
	/// A translate call referenced a format plugin that was never registered.
	#[error("unknown format plugin: {0}")]
	UnknownFormatter(String),

	/// A locale tag could not be parsed as a language identifier.
	#[error("invalid locale: {0}")]
	InvalidLocale(String),

	/// The loaded resource data could not be shaped into a catalog.
	#[error("catalog build error: {0}")]
	CatalogBuild(String),

	/// The engine configuration is inconsistent (e.g. default locale not in
	/// the supported set).
	#[error("configuration error: {0}")]
	Config(String),

	/// A format plugin rejected its template or data.
	#[error("format error in plugin '{plugin}': {message}")]
	Format { plugin: String, message: String },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, I18nError>;
