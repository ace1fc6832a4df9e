use std::fmt::Write;
use std::sync::LazyLock;

use logos::Logos;
use regex::Regex;
use serde::Serialize;

use crate::SpliceError;
use crate::SpliceResult;

/// Reserved class for citation markers.
pub const CITATION_CLASS: &str = "citation-host";
/// Index attribute for citation markers.
pub const CITATION_INDEX_ATTR: &str = "data-source-idx";
/// Reserved class for token markers.
pub const TOKEN_CLASS: &str = "token-host";
/// Index attribute for token markers.
pub const TOKEN_INDEX_ATTR: &str = "data-token-idx";

/// Matches any `<span …>` open tag; marker filtering happens on the parsed
/// attributes.
static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<span\b[^>]*>").unwrap());

/// The reserved class name and index attribute one engine emits and scans.
///
/// A marker is an inline span carrying both:
/// `<span class="citation-host" data-source-idx="3"></span>`. Emission
/// always produces that exact shape; [`scan_markers`] is looser about what
/// it accepts back.
///
/// The two shipped wirings are [`citations`](MarkerConfig::citations) and
/// [`tokens`](MarkerConfig::tokens); [`new`](MarkerConfig::new) builds a
/// custom one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerConfig {
	class: String,
	index_attr: String,
}

impl MarkerConfig {
	/// The citation wiring: `citation-host` / `data-source-idx`.
	pub fn citations() -> Self {
		Self {
			class: CITATION_CLASS.to_string(),
			index_attr: CITATION_INDEX_ATTR.to_string(),
		}
	}

	/// The token wiring: `token-host` / `data-token-idx`.
	pub fn tokens() -> Self {
		Self {
			class: TOKEN_CLASS.to_string(),
			index_attr: TOKEN_INDEX_ATTR.to_string(),
		}
	}

	/// A custom wiring. Both names must start with an ASCII letter and
	/// contain only letters, digits, `-` and `_`.
	pub fn new(class: impl Into<String>, index_attr: impl Into<String>) -> SpliceResult<Self> {
		let class = class.into();
		let index_attr = index_attr.into();

		if !is_valid_name(&class) {
			return Err(SpliceError::InvalidMarkerClass(class));
		}
		if !is_valid_name(&index_attr) {
			return Err(SpliceError::InvalidMarkerAttribute(index_attr));
		}

		Ok(Self { class, index_attr })
	}

	/// The reserved marker class.
	pub fn class(&self) -> &str {
		&self.class
	}

	/// The attribute holding the item index.
	pub fn index_attr(&self) -> &str {
		&self.index_attr
	}

	/// One marker element for `index` as a standalone string.
	pub fn marker_html(&self, index: usize) -> String {
		let mut out = String::new();
		self.write_marker(&mut out, index);
		out
	}

	/// Append one marker element for `index` to `out`.
	pub(crate) fn write_marker(&self, out: &mut String, index: usize) {
		let _ = write!(
			out,
			r#"<span class="{}" {}="{index}"></span>"#,
			self.class, self.index_attr
		);
	}
}

fn is_valid_name(name: &str) -> bool {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return false;
	};

	first.is_ascii_alphabetic()
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// One discovered marker in rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerRef {
	/// Byte offset of the marker's `<` in the rendered output.
	pub start: usize,
	/// Byte offset just past the open tag's `>`; attachments insert here.
	pub insert_at: usize,
	/// Raw value of the index attribute; empty when the attribute is
	/// missing. Reconciliation parses it and skips non-integers.
	pub index_value: String,
}

/// Raw tokens for an open tag's attribute region.
#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n/]+")]
enum AttrToken {
	#[token("=")]
	Eq,
	#[regex(r#""[^"]*""#)]
	DoubleQuoted,
	#[regex(r"'[^']*'")]
	SingleQuoted,
	#[regex(r#"[^ \t\r\n"'=/>]+"#)]
	Word,
}

/// Find every marker for `config` in rendered output, in document order.
///
/// The reserved class must appear as a whitespace-separated word of the
/// `class` attribute. Attribute names are matched case-insensitively; class
/// values are not. The index attribute's raw value is carried as-is for
/// reconciliation to parse.
pub fn scan_markers(html: &str, config: &MarkerConfig) -> Vec<MarkerRef> {
	let mut markers = Vec::new();

	for tag in OPEN_TAG.find_iter(html) {
		let interior = &html[tag.start() + "<span".len()..tag.end() - 1];
		let attributes = parse_attributes(interior);

		let has_class = attributes.iter().any(|(name, value)| {
			name == "class" && value.split_whitespace().any(|class| class == config.class)
		});
		if !has_class {
			continue;
		}

		let index_value = attributes
			.iter()
			.find(|(name, _)| name.eq_ignore_ascii_case(&config.index_attr))
			.map(|(_, value)| value.clone())
			.unwrap_or_default();

		markers.push(MarkerRef {
			start: tag.start(),
			insert_at: tag.end(),
			index_value,
		});
	}

	markers
}

/// Attribute names (lowercased) and values parsed from an open tag's
/// interior. Duplicate names keep their first value. Unparsable stretches
/// are skipped rather than aborting the tag.
fn parse_attributes(tag_interior: &str) -> Vec<(String, String)> {
	let tokens: Vec<_> = AttrToken::lexer(tag_interior).spanned().collect();
	let mut attributes: Vec<(String, String)> = Vec::new();
	let mut cursor = 0;

	while cursor < tokens.len() {
		let (Ok(AttrToken::Word), name_span) = &tokens[cursor] else {
			cursor += 1;
			continue;
		};
		let name = tag_interior[name_span.clone()].to_ascii_lowercase();
		cursor += 1;

		let mut value = String::new();
		if let Some((Ok(AttrToken::Eq), _)) = tokens.get(cursor) {
			cursor += 1;
			match tokens.get(cursor) {
				Some((Ok(AttrToken::DoubleQuoted | AttrToken::SingleQuoted), span)) => {
					let quoted = &tag_interior[span.clone()];
					value = quoted[1..quoted.len() - 1].to_string();
					cursor += 1;
				}
				Some((Ok(AttrToken::Word), span)) => {
					value = tag_interior[span.clone()].to_string();
					cursor += 1;
				}
				_ => {}
			}
		}

		if !attributes.iter().any(|(existing, _)| *existing == name) {
			attributes.push((name, value));
		}
	}

	attributes
}
