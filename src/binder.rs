//! Engine construction and per-request binding
//!
//! A [`Gengo`] engine is built once at startup from a config, a catalog,
//! and a formatter registry. The host pipeline calls [`Gengo::bind`] once
//! per inbound request; the returned [`RequestContext`] carries the
//! negotiated locale and a [`Translator`] valid for that request's lifetime
//! only. Binding never mutates the shared catalog, so concurrent requests
//! need no synchronization.

use std::sync::Arc;

use http::HeaderMap;
use http::header::ACCEPT_LANGUAGE;
use serde_json::Value;

use crate::catalog::Catalog;
use crate::config::I18nConfig;
use crate::error::{I18nError, Result};
use crate::format::FormatterRegistry;
use crate::interpolate::{mustache, sprintf};
use crate::key::{Notation, ParsedKey};
use crate::negotiate::{Locale, LocaleNegotiator};
use crate::scope::{RouteBinding, RoutePattern};

/// Arguments to a translate call.
///
/// The original callable dispatched on argument shape: a flat list of
/// scalars selected positional substitution, a single structured object
/// selected named interpolation, and a `{parser: name}` directive plus data
/// selected a format plugin. `Args` makes that dispatch explicit, with
/// `From` impls covering the common call shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
	/// No substitution; the resolved template is returned as-is.
	None,
	/// `%s` tokens consumed left to right.
	Positional(Vec<Value>),
	/// `{{path}}` tokens resolved against one structured object.
	Named(Value),
	/// Route the template through the named format plugin.
	Format { parser: String, data: Value },
}

impl Args {
	pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
		Self::Positional(values.into_iter().collect())
	}

	pub fn named(data: Value) -> Self {
		Self::Named(data)
	}

	pub fn format(parser: impl Into<String>, data: Value) -> Self {
		Self::Format {
			parser: parser.into(),
			data,
		}
	}
}

impl From<()> for Args {
	fn from(_: ()) -> Self {
		Self::None
	}
}

impl From<&str> for Args {
	fn from(value: &str) -> Self {
		Self::Positional(vec![Value::String(value.to_string())])
	}
}

impl From<String> for Args {
	fn from(value: String) -> Self {
		Self::Positional(vec![Value::String(value)])
	}
}

impl From<Vec<Value>> for Args {
	fn from(values: Vec<Value>) -> Self {
		Self::Positional(values)
	}
}

/// Shape-based dispatch for a single JSON value: objects select named
/// interpolation, scalars select positional substitution.
impl From<Value> for Args {
	fn from(value: Value) -> Self {
		if value.is_object() {
			Self::Named(value)
		} else {
			Self::Positional(vec![value])
		}
	}
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Args {
	fn from((a, b): (A, B)) -> Self {
		Self::Positional(vec![a.into(), b.into()])
	}
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Args {
	fn from((a, b, c): (A, B, C)) -> Self {
		Self::Positional(vec![a.into(), b.into(), c.into()])
	}
}

/// The translation engine: immutable catalog, negotiator, and formatter
/// registry, assembled once at startup.
///
/// # Example
/// ```
/// use gengo::{Catalog, Gengo, I18nConfig, Locale};
/// use serde_json::json;
///
/// let en = Locale::parse("en-us").unwrap();
/// let catalog = Catalog::builder()
///     .root(en.clone(), json!({"greeting": {"informal": "Hey"}}))
///     .build(&[en])
///     .unwrap();
///
/// let engine = Gengo::builder()
///     .config(I18nConfig {
///         supported: vec!["en-us".into()],
///         default_locale: "en-us".into(),
///         router_enabled: false,
///     })
///     .catalog(catalog)
///     .build()
///     .unwrap();
///
/// let context = engine.bind_preferences("en-US");
/// assert_eq!(context.locale().as_str(), "en-us");
/// assert_eq!(context.translate("greeting.informal", ()).unwrap(), "Hey");
/// ```
pub struct Gengo {
	catalog: Arc<Catalog>,
	negotiator: LocaleNegotiator,
	formatters: Arc<FormatterRegistry>,
	router_enabled: bool,
}

impl Gengo {
	pub fn builder() -> GengoBuilder {
		GengoBuilder::default()
	}

	/// Binds a request from its headers, extracting the Accept-Language
	/// preference list. Invoked once per inbound request.
	pub fn bind(&self, headers: &HeaderMap) -> RequestContext {
		let header = headers
			.get(ACCEPT_LANGUAGE)
			.and_then(|value| value.to_str().ok())
			.unwrap_or("");
		self.bind_preferences(header)
	}

	/// Binds a request from a raw preference header, for hosts that extract
	/// it themselves.
	pub fn bind_preferences(&self, preference_header: &str) -> RequestContext {
		let locale = self.negotiator.negotiate(preference_header);
		let route = RouteBinding::new();
		tracing::debug!(locale = %locale, "bound request context");
		RequestContext {
			translator: Translator {
				catalog: Arc::clone(&self.catalog),
				locale: locale.clone(),
				formatters: Arc::clone(&self.formatters),
				route: route.clone(),
				router_enabled: self.router_enabled,
			},
			locale,
			route,
		}
	}

	/// The shared catalog.
	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}
}

/// Builder validating the engine configuration at startup. Construction
/// failures here are fatal: the host must not serve requests over a broken
/// localization setup.
#[derive(Default)]
pub struct GengoBuilder {
	config: I18nConfig,
	catalog: Option<Catalog>,
	formatters: Option<FormatterRegistry>,
}

impl GengoBuilder {
	pub fn config(mut self, config: I18nConfig) -> Self {
		self.config = config;
		self
	}

	pub fn catalog(mut self, catalog: Catalog) -> Self {
		self.catalog = Some(catalog);
		self
	}

	/// Replaces the default formatter registry (which carries the built-in
	/// `"format"` plugin).
	pub fn formatters(mut self, formatters: FormatterRegistry) -> Self {
		self.formatters = Some(formatters);
		self
	}

	pub fn build(self) -> Result<Gengo> {
		let supported = self
			.config
			.supported
			.iter()
			.map(|tag| Locale::parse(tag))
			.collect::<Result<Vec<_>>>()?;
		if supported.is_empty() {
			return Err(I18nError::Config(
				"at least one supported locale is required".to_string(),
			));
		}
		let default = Locale::parse(&self.config.default_locale)?;
		if !supported.contains(&default) {
			return Err(I18nError::Config(format!(
				"default locale '{default}' is not in the supported set"
			)));
		}

		let catalog = match self.catalog {
			Some(catalog) => catalog,
			None => Catalog::builder().build(&supported)?,
		};
		for locale in &supported {
			if catalog.root(locale).is_none() {
				return Err(I18nError::CatalogBuild(format!(
					"catalog has no root for supported locale '{locale}'"
				)));
			}
		}

		Ok(Gengo {
			catalog: Arc::new(catalog),
			negotiator: LocaleNegotiator::new(supported, default),
			formatters: Arc::new(self.formatters.unwrap_or_else(FormatterRegistry::with_defaults)),
			router_enabled: self.config.router_enabled,
		})
	}
}

/// Per-request context produced by [`Gengo::bind`]: the negotiated locale,
/// the bound translator, and the late-bound route cell for the host's
/// routing layer. Owned by its request and discarded with it.
pub struct RequestContext {
	locale: Locale,
	translator: Translator,
	route: RouteBinding,
}

impl RequestContext {
	/// The locale negotiated for this request.
	pub fn locale(&self) -> &Locale {
		&self.locale
	}

	/// The bound translator, e.g. to hand to downstream handlers.
	pub fn translator(&self) -> &Translator {
		&self.translator
	}

	/// The route cell the host's routing layer fills once the matched
	/// pattern is known. Filling it is optional; unrouted requests resolve
	/// against the global catalog root.
	pub fn route_binding(&self) -> &RouteBinding {
		&self.route
	}

	/// Translates a key; see [`Translator::translate`].
	pub fn translate(&self, key: &str, args: impl Into<Args>) -> Result<String> {
		self.translator.translate(key, args)
	}
}

/// The per-request translate callable.
pub struct Translator {
	catalog: Arc<Catalog>,
	locale: Locale,
	formatters: Arc<FormatterRegistry>,
	route: RouteBinding,
	router_enabled: bool,
}

impl Translator {
	/// Resolves a key written in phrase, bracket, or dot notation and
	/// applies the call's arguments.
	///
	/// Lookup misses are never errors: a phrase miss returns the literal
	/// key, a bracket or dot-path miss returns an empty string. The only
	/// failure surfaced is a format directive naming an unregistered
	/// plugin (or a plugin rejecting its input).
	pub fn translate(&self, key: &str, args: impl Into<Args>) -> Result<String> {
		let parsed = ParsedKey::parse(key);
		let template = self.resolve(&parsed);

		match args.into() {
			Args::None => Ok(template),
			Args::Positional(values) => Ok(sprintf(&template, &values)),
			Args::Named(data) => Ok(mustache(&template, &data)),
			Args::Format { parser, data } => self.formatters.format(&parser, &template, &data),
		}
	}

	/// The locale this translator is bound to.
	pub fn locale(&self) -> &Locale {
		&self.locale
	}

	fn resolve(&self, parsed: &ParsedKey) -> String {
		let route = self.route.effective(self.router_enabled);
		match parsed.notation() {
			Notation::Phrase => self.resolve_phrase(parsed.raw(), route),
			Notation::Dot(segments) => {
				let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
				if let Some(value) = self.catalog.resolve(&self.locale, route, &segments) {
					return value.to_string();
				}
				// Path exists but stops at a subtree: empty result.
				// Path absent entirely: this dotted string may simply be a
				// literal phrase, so degrade to phrase behavior.
				if self.catalog.entry_at(&self.locale, route, &segments).is_some() {
					tracing::trace!(key = parsed.raw(), "dot path resolved to a subtree");
					String::new()
				} else {
					self.resolve_phrase(parsed.raw(), route)
				}
			}
			Notation::Bracket { path, trailing } => {
				let mut segments: Vec<&str> = path.iter().map(String::as_str).collect();
				segments.extend(trailing.iter().map(String::as_str));
				match self.catalog.resolve(&self.locale, route, &segments) {
					Some(value) => value.to_string(),
					None => {
						tracing::trace!(key = parsed.raw(), "bracket path miss");
						String::new()
					}
				}
			}
		}
	}

	/// Phrase lookup: the whole key is one catalog segment; a miss falls
	/// back to the key itself.
	fn resolve_phrase(&self, raw: &str, route: Option<&RoutePattern>) -> String {
		match self.catalog.resolve(&self.locale, route, &[raw]) {
			Some(value) => value.to_string(),
			None => {
				tracing::trace!(key = raw, "phrase miss, falling back to literal");
				raw.to_string()
			}
		}
	}
}
