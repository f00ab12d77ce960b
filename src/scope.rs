//! Route-scoped catalog selection
//!
//! Hosts that resolve routing after the translator has been bound fill a
//! [`RouteBinding`] once the matched pattern is known; lookups read the
//! binding at call time, so no particular ordering between the binder and
//! the routing layer is required.

use std::sync::{Arc, OnceLock};

/// The path pattern the host router matched for a request, e.g. `/about`
/// or `/api/v1.0`. Used as the overlay key for route-scoped catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePattern(String);

impl RoutePattern {
	pub fn new(pattern: impl Into<String>) -> Self {
		Self(pattern.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for RoutePattern {
	fn from(pattern: &str) -> Self {
		Self::new(pattern)
	}
}

impl From<String> for RoutePattern {
	fn from(pattern: String) -> Self {
		Self::new(pattern)
	}
}

/// A late-bound cell holding the matched route pattern for one request.
///
/// Created empty by the request binder; the host's routing layer calls
/// [`RouteBinding::set`] at most once when the route is known. A request
/// whose route never resolves simply leaves the cell empty and lookups use
/// the global root only.
///
/// # Example
/// ```
/// use gengo::{RouteBinding, RoutePattern};
///
/// let binding = RouteBinding::new();
/// assert_eq!(binding.get(), None);
///
/// assert!(binding.set(RoutePattern::new("/about")));
/// assert_eq!(binding.get().unwrap().as_str(), "/about");
///
/// // A second set is rejected; the first pattern stays.
/// assert!(!binding.set(RoutePattern::new("/other")));
/// assert_eq!(binding.get().unwrap().as_str(), "/about");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteBinding {
	slot: Arc<OnceLock<RoutePattern>>,
}

impl RouteBinding {
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds the matched pattern. Returns false if a pattern was already
	/// bound, in which case the original binding is kept.
	pub fn set(&self, pattern: RoutePattern) -> bool {
		self.slot.set(pattern).is_ok()
	}

	/// The bound pattern, if routing has resolved.
	pub fn get(&self) -> Option<&RoutePattern> {
		self.slot.get()
	}

	/// The pattern lookups should scope to: the bound pattern when scoping
	/// is enabled, otherwise none. An unmatched route behaves exactly like
	/// disabled scoping for this request.
	pub(crate) fn effective(&self, router_enabled: bool) -> Option<&RoutePattern> {
		if router_enabled { self.get() } else { None }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_binding_set_once() {
		let binding = RouteBinding::new();

		assert!(binding.set(RoutePattern::new("/")));
		assert!(!binding.set(RoutePattern::new("/about")));

		assert_eq!(binding.get().unwrap().as_str(), "/");
	}

	#[test]
	fn test_binding_shared_across_clones() {
		// The binder hands one clone to the translator and one to the host;
		// a set through either side is visible to both.
		let binding = RouteBinding::new();
		let translator_side = binding.clone();

		binding.set(RoutePattern::new("/api/v1.0"));

		assert_eq!(translator_side.get().unwrap().as_str(), "/api/v1.0");
	}

	#[test]
	fn test_effective_respects_router_flag() {
		let binding = RouteBinding::new();
		binding.set(RoutePattern::new("/about"));

		assert!(binding.effective(true).is_some());
		assert!(binding.effective(false).is_none());
	}

	#[test]
	fn test_effective_unmatched_route() {
		let binding = RouteBinding::new();

		assert!(binding.effective(true).is_none());
	}
}
