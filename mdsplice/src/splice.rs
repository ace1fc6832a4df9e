use derive_more::Deref;
use derive_more::Display;
use derive_more::From;
use serde::Deserialize;
use serde::Serialize;

use crate::CompiledMatcher;
use crate::MarkerConfig;

/// One occurrence of an item's pattern in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
	/// Byte offset of the first matched character.
	pub start: usize,
	/// Byte offset one past the last matched character.
	pub end: usize,
	/// Collection index of the item whose pattern matched.
	pub index: usize,
}

/// Source text with every surviving span replaced by a placeholder marker.
///
/// Everything outside the spans is preserved verbatim and in order, so the
/// text renders exactly as authored.
#[derive(Clone, Debug, Default, Deref, Display, Eq, From, Hash, PartialEq, Serialize, Deserialize)]
#[display("{_0}")]
pub struct AnnotatedText(String);

impl AnnotatedText {
	/// View the annotated text as a plain string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// Collect every positive-length occurrence of every matcher.
///
/// Zero-length matches are discarded; the scan still advances past them, so
/// patterns that can match the empty string terminate without producing
/// spans.
pub fn gather_spans(text: &str, matchers: &[CompiledMatcher]) -> Vec<MatchSpan> {
	let mut spans = Vec::new();

	for matcher in matchers {
		for found in matcher.regex.find_iter(text) {
			if found.start() < found.end() {
				spans.push(MatchSpan {
					start: found.start(),
					end: found.end(),
					index: matcher.index,
				});
			}
		}
	}

	spans
}

/// Resolve overlaps into a non-overlapping ordered set.
///
/// Spans are sorted by `(start, end, index)` and kept only when they begin
/// at or after the previous survivor's end: the earliest-starting span wins,
/// then the shortest, then the lowest index. Losing spans are dropped whole,
/// never clipped.
pub fn merge_spans(mut spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
	spans.sort_unstable_by_key(|span| (span.start, span.end, span.index));

	let mut last_end = 0;
	spans.retain(|span| {
		if span.start >= last_end {
			last_end = span.end;
			true
		} else {
			false
		}
	});

	spans
}

/// Replace every surviving span in `text` with a marker carrying its item
/// index.
///
/// Empty text, no matchers, and no surviving spans all return the input
/// unchanged.
pub fn splice(text: &str, matchers: &[CompiledMatcher], marker: &MarkerConfig) -> AnnotatedText {
	if text.is_empty() || matchers.is_empty() {
		return AnnotatedText::from(text.to_string());
	}

	let spans = merge_spans(gather_spans(text, matchers));

	if spans.is_empty() {
		return AnnotatedText::from(text.to_string());
	}

	let mut result = String::with_capacity(text.len() + spans.len() * 48);
	let mut cursor = 0;

	for span in &spans {
		result.push_str(&text[cursor..span.start]);
		marker.write_marker(&mut result, span.index);
		cursor = span.end;
	}
	result.push_str(&text[cursor..]);

	AnnotatedText::from(result)
}
