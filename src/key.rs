//! Translation key notation parsing
//!
//! Raw keys come in three notations:
//!
//! - **Phrase**: any literal string, e.g. `Hello %s`. The literal itself is
//!   the fallback translation when no catalog entry matches.
//! - **Bracket**: `[a.b.c]` selects a sub-tree; an optional trailing dot
//!   path, `[a.b.c].x.y`, resolves further from that sub-tree's root.
//! - **Dot**: a bare dot-separated path into the catalog root, e.g.
//!   `greeting.informal`.
//!
//! Classification is total: every input maps to exactly one notation.
//! Precedence is documented rather than inferred: bracket form is detected
//! first (leading `[` with a well-formed close), then dot form (contains
//! `.`), and phrase form is the default. A dot-form key whose path does not
//! exist in the catalog degrades to phrase behavior at resolution time, so
//! a sentence containing a period still falls back to its own text.

/// Notation a raw key was classified into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notation {
	/// Literal phrase; the key is its own fallback.
	Phrase,
	/// Bare dot path into the catalog root.
	Dot(Vec<String>),
	/// Bracketed dot path plus optional trailing path resolved from the
	/// bracketed sub-tree. Trailing paths are plain dot paths; bracket
	/// characters inside them are not re-parsed.
	Bracket {
		path: Vec<String>,
		trailing: Vec<String>,
	},
}

/// A raw translation key together with its classified notation.
///
/// # Example
/// ```
/// use gengo::{Notation, ParsedKey};
///
/// assert_eq!(ParsedKey::parse("Hello %s").notation(), &Notation::Phrase);
///
/// let dot = ParsedKey::parse("greeting.informal");
/// assert!(matches!(dot.notation(), Notation::Dot(_)));
///
/// let bracket = ParsedKey::parse("[greeting.informal.advanced].hey");
/// match bracket.notation() {
///     Notation::Bracket { path, trailing } => {
///         assert_eq!(path, &["greeting", "informal", "advanced"]);
///         assert_eq!(trailing, &["hey"]);
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
	raw: String,
	notation: Notation,
}

impl ParsedKey {
	/// Classifies a raw key. Never fails; unparseable bracket syntax is a
	/// phrase.
	pub fn parse(raw: &str) -> Self {
		let notation = classify(raw);
		Self {
			raw: raw.to_string(),
			notation,
		}
	}

	/// The original key string.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	pub fn notation(&self) -> &Notation {
		&self.notation
	}
}

fn classify(raw: &str) -> Notation {
	if let Some(notation) = parse_bracket(raw) {
		return notation;
	}
	if raw.contains('.') {
		let segments = split_path(raw);
		if !segments.is_empty() {
			return Notation::Dot(segments);
		}
	}
	Notation::Phrase
}

/// Parses `[path]` or `[path].trailing`. Returns `None` for anything that
/// is not a well-formed bracket key, which then classifies as phrase or dot.
fn parse_bracket(raw: &str) -> Option<Notation> {
	let inner_and_rest = raw.strip_prefix('[')?;
	let close = inner_and_rest.find(']')?;
	let inner = &inner_and_rest[..close];
	let rest = &inner_and_rest[close + 1..];

	let path = split_path(inner);
	if path.is_empty() {
		return None;
	}

	let trailing = if rest.is_empty() {
		Vec::new()
	} else {
		// Trailing content must be a dot path hung off the bracket
		let rest = rest.strip_prefix('.')?;
		let trailing = split_path(rest);
		if trailing.is_empty() {
			return None;
		}
		trailing
	};

	Some(Notation::Bracket { path, trailing })
}

/// Splits a dot path into segments, rejecting empty segments (`a..b`,
/// leading or trailing dots) by returning an empty vector.
fn split_path(path: &str) -> Vec<String> {
	let segments: Vec<String> = path.split('.').map(str::to_string).collect();
	if segments.iter().any(String::is_empty) {
		return Vec::new();
	}
	segments
}
