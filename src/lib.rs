//! Per-request localization for server pipelines.
//!
//! `gengo` resolves a locale for each inbound request, binds a translator
//! into the request's context, and resolves translation keys written in
//! one of three notations — literal phrase, bracketed dot-path, or plain
//! dot-path — with positional (`%s`) substitution, named (`{{path}}`)
//! interpolation, and pluggable message formatting.
//!
//! The engine is a pure in-process resolution layer: catalogs are built
//! once at startup and immutable afterwards, lookups are synchronous and
//! side-effect-free, and each request owns its context exclusively, so
//! concurrent requests share nothing mutable.
//!
//! # Example
//! ```
//! use gengo::{Catalog, Gengo, I18nConfig, Locale, RoutePattern};
//! use serde_json::json;
//!
//! let en = Locale::parse("en-us").unwrap();
//! let ja = Locale::parse("ja").unwrap();
//!
//! let catalog = Catalog::builder()
//!     .root(en.clone(), json!({
//!         "Hello": "Hello",
//!         "greeting": {"informal": "Hey"}
//!     }))
//!     .root(ja.clone(), json!({"Hello": "こんにちは"}))
//!     .build(&[en, ja])
//!     .unwrap();
//!
//! let engine = Gengo::builder()
//!     .config(I18nConfig {
//!         supported: vec!["en-us".into(), "ja".into()],
//!         default_locale: "en-us".into(),
//!         router_enabled: false,
//!     })
//!     .catalog(catalog)
//!     .build()
//!     .unwrap();
//!
//! // Once per request: negotiate the locale and bind a translator.
//! let context = engine.bind_preferences("ja, en;q=0.9");
//! assert_eq!(context.locale().as_str(), "ja");
//! assert_eq!(context.translate("Hello", ()).unwrap(), "こんにちは");
//!
//! // Phrase keys degrade to their own text when untranslated.
//! let context = engine.bind_preferences("en-US");
//! assert_eq!(context.translate("Hello %s", "John").unwrap(), "Hello John");
//! assert_eq!(context.translate("greeting.informal", ()).unwrap(), "Hey");
//! ```

pub mod binder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod interpolate;
pub mod key;
pub mod negotiate;
pub mod scope;
pub mod source;

pub use binder::{Args, Gengo, GengoBuilder, RequestContext, Translator};
pub use catalog::{Catalog, CatalogBuilder, CatalogEntry};
pub use config::I18nConfig;
pub use error::{I18nError, Result};
pub use format::{Formatter, FormatterRegistry, MessageFormatter};
pub use key::{Notation, ParsedKey};
pub use negotiate::{Locale, LocaleNegotiator};
pub use scope::{RouteBinding, RoutePattern};
pub use source::{CatalogSource, StaticSource};
