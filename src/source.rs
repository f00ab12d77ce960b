//! Catalog-loading collaborator boundary
//!
//! How translation resources are authored and stored is outside this crate;
//! a host supplies a [`CatalogSource`] that materializes the full catalog
//! before the engine is built. Loading happens once at startup, never on
//! the request hot path, and a load failure must prevent the host from
//! serving requests.

use async_trait::async_trait;

use crate::catalog::Catalog;
use crate::error::Result;

/// Supplies a fully materialized catalog at startup.
///
/// Implementations must guarantee that every supported locale has a root
/// entry (possibly empty) and that overlay keys use the same path-segment
/// syntax the notation parser produces.
#[async_trait]
pub trait CatalogSource: Send + Sync {
	async fn load(&self) -> Result<Catalog>;
}

/// Source wrapping an already-built catalog, for hosts that assemble their
/// resources in process and for tests.
///
/// # Example
/// ```
/// use gengo::{Catalog, CatalogSource, Locale, StaticSource};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let en = Locale::parse("en-us").unwrap();
/// let catalog = Catalog::builder()
///     .root(en.clone(), json!({"Hello": "Hello"}))
///     .build(&[en.clone()])
///     .unwrap();
///
/// let source = StaticSource::new(catalog);
/// let loaded = source.load().await.unwrap();
/// assert_eq!(loaded.resolve(&en, None, &["Hello"]), Some("Hello"));
/// # });
/// ```
pub struct StaticSource {
	catalog: Catalog,
}

impl StaticSource {
	pub fn new(catalog: Catalog) -> Self {
		Self { catalog }
	}
}

#[async_trait]
impl CatalogSource for StaticSource {
	async fn load(&self) -> Result<Catalog> {
		Ok(self.catalog.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::negotiate::Locale;
	use serde_json::json;

	#[tokio::test]
	async fn test_static_source_round_trip() {
		// Arrange
		let en = Locale::parse("en-us").unwrap();
		let catalog = Catalog::builder()
			.root(en.clone(), json!({"Hello": "Hello"}))
			.build(&[en.clone()])
			.unwrap();
		let source = StaticSource::new(catalog);

		// Act
		let loaded = source.load().await.unwrap();

		// Assert
		assert_eq!(loaded.resolve(&en, None, &["Hello"]), Some("Hello"));
	}
}
