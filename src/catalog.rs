//! Immutable translation catalogs
//!
//! A [`Catalog`] holds one root entry tree per supported locale, plus
//! optional per-(locale, route) overlay trees. It is built once at startup
//! from loaded resource data and never mutated afterwards, so concurrent
//! requests read it without locking.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::error::{I18nError, Result};
use crate::negotiate::Locale;
use crate::scope::RoutePattern;

/// A node in a catalog tree: either a translated string or an ordered
/// mapping from key segment to child entries. No entry is both.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
	Leaf(String),
	Tree(BTreeMap<String, CatalogEntry>),
}

impl CatalogEntry {
	/// An empty subtree.
	pub fn empty() -> Self {
		Self::Tree(BTreeMap::new())
	}

	/// Builds an entry from loaded resource data: JSON strings become
	/// leaves, JSON objects become subtrees. Any other value shape is a
	/// build error, surfaced at startup rather than at lookup time.
	pub fn from_json(value: &Value) -> Result<Self> {
		match value {
			Value::String(s) => Ok(Self::Leaf(s.clone())),
			Value::Object(map) => {
				let mut children = BTreeMap::new();
				for (key, child) in map {
					children.insert(key.clone(), Self::from_json(child)?);
				}
				Ok(Self::Tree(children))
			}
			other => Err(I18nError::CatalogBuild(format!(
				"expected string or object, found {other}"
			))),
		}
	}

	/// The translated string, when this entry is a leaf.
	pub fn leaf(&self) -> Option<&str> {
		match self {
			Self::Leaf(s) => Some(s),
			Self::Tree(_) => None,
		}
	}

	/// The child entry for one key segment.
	pub fn child(&self, segment: &str) -> Option<&CatalogEntry> {
		match self {
			Self::Leaf(_) => None,
			Self::Tree(children) => children.get(segment),
		}
	}

	/// Walks a dot-path below this entry. An empty path yields the entry
	/// itself; the walk stops (returns `None`) as soon as a segment is
	/// missing or a leaf is reached early.
	pub fn traverse(&self, segments: &[&str]) -> Option<&CatalogEntry> {
		let mut current = self;
		for segment in segments {
			current = current.child(segment)?;
		}
		Some(current)
	}
}

/// The full set of loaded translations for all supported locales.
///
/// Route overlays are kept as separate trees and probed before the global
/// root at lookup time; they are never physically merged. A key absent from
/// an overlay falls through to the global root of the same locale, never to
/// a different locale.
///
/// # Example
/// ```
/// use gengo::{Catalog, Locale};
/// use serde_json::json;
///
/// let en = Locale::parse("en-us").unwrap();
/// let catalog = Catalog::builder()
///     .root(en.clone(), json!({"greeting": {"informal": "Hey"}}))
///     .build(&[en.clone()])
///     .unwrap();
///
/// assert_eq!(catalog.resolve(&en, None, &["greeting", "informal"]), Some("Hey"));
/// assert_eq!(catalog.resolve(&en, None, &["greeting", "missing"]), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	roots: HashMap<Locale, CatalogEntry>,
	overlays: HashMap<(Locale, RoutePattern), CatalogEntry>,
}

impl Catalog {
	pub fn builder() -> CatalogBuilder {
		CatalogBuilder::default()
	}

	/// The global root for a locale.
	pub fn root(&self, locale: &Locale) -> Option<&CatalogEntry> {
		self.roots.get(locale)
	}

	/// The overlay tree for a (locale, route) pair, when one was loaded.
	pub fn overlay(&self, locale: &Locale, route: &RoutePattern) -> Option<&CatalogEntry> {
		self.overlays.get(&(locale.clone(), route.clone()))
	}

	/// Finds the entry at a path, probing the route overlay first and
	/// falling through to the global root. With `route` absent only the
	/// global root is consulted.
	pub fn entry_at(
		&self,
		locale: &Locale,
		route: Option<&RoutePattern>,
		segments: &[&str],
	) -> Option<&CatalogEntry> {
		if let Some(route) = route
			&& let Some(overlay) = self.overlay(locale, route)
			&& let Some(entry) = overlay.traverse(segments)
		{
			return Some(entry);
		}
		self.root(locale)?.traverse(segments)
	}

	/// Resolves a path to a translated string. Paths that are missing or
	/// stop at a subtree yield `None`.
	pub fn resolve(
		&self,
		locale: &Locale,
		route: Option<&RoutePattern>,
		segments: &[&str],
	) -> Option<&str> {
		// A leaf hit in the overlay wins; an overlay subtree without the
		// leaf still falls through to the global root.
		if let Some(route) = route
			&& let Some(overlay) = self.overlay(locale, route)
			&& let Some(value) = overlay.traverse(segments).and_then(CatalogEntry::leaf)
		{
			return Some(value);
		}
		self.root(locale)?.traverse(segments)?.leaf()
	}

	/// The locales this catalog carries roots for.
	pub fn locales(&self) -> impl Iterator<Item = &Locale> {
		self.roots.keys()
	}
}

/// Builder consuming loaded resource data (JSON value trees) into an
/// immutable [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
	roots: Vec<(Locale, Value)>,
	overlays: Vec<(Locale, RoutePattern, Value)>,
}

impl CatalogBuilder {
	/// Adds the global root tree for a locale.
	pub fn root(mut self, locale: Locale, data: Value) -> Self {
		self.roots.push((locale, data));
		self
	}

	/// Adds a route-scoped overlay tree for a locale.
	pub fn overlay(mut self, locale: Locale, route: RoutePattern, data: Value) -> Self {
		self.overlays.push((locale, route, data));
		self
	}

	/// Validates and materializes the catalog. Supported locales without an
	/// explicit root receive an empty one, upholding the invariant that
	/// every supported locale is resolvable.
	pub fn build(self, supported: &[Locale]) -> Result<Catalog> {
		let mut roots = HashMap::new();
		for (locale, data) in self.roots {
			let entry = CatalogEntry::from_json(&data)?;
			if entry.leaf().is_some() {
				return Err(I18nError::CatalogBuild(format!(
					"root for locale '{locale}' must be an object, not a bare string"
				)));
			}
			roots.insert(locale, entry);
		}
		for locale in supported {
			roots.entry(locale.clone()).or_insert_with(CatalogEntry::empty);
		}

		let mut overlays = HashMap::new();
		for (locale, route, data) in self.overlays {
			if !roots.contains_key(&locale) {
				return Err(I18nError::CatalogBuild(format!(
					"overlay for unsupported locale '{locale}'"
				)));
			}
			overlays.insert((locale, route), CatalogEntry::from_json(&data)?);
		}

		Ok(Catalog { roots, overlays })
	}
}
