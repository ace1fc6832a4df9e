use regex::Regex;
use tracing::trace;

use crate::ItemCollection;
use crate::pattern::compile_expression;

/// A compiled pattern paired with the collection index of the item that
/// supplied it.
///
/// The index is positional at compile time, not a stable item identity: the
/// engine recomputes matchers whenever the collection signature changes so
/// the pairing never goes stale.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
	/// Position of the originating item in the collection.
	pub index: usize,
	/// The compiled matcher, run repeatedly over the full source text.
	pub regex: Regex,
}

/// Build matchers for every item whose pattern compiles.
///
/// Returns an empty list unless the collection is available. Items whose
/// accessor yields nothing, or whose expression fails to compile, are
/// skipped without disturbing their neighbors' indices.
pub fn collect_matchers<I>(
	collection: &ItemCollection<'_, I>,
	pattern_of: impl FnMut(&I) -> Option<String>,
) -> Vec<CompiledMatcher> {
	if !collection.status.is_available() {
		return Vec::new();
	}

	let patterns: Vec<Option<String>> = collection.items.iter().map(pattern_of).collect();
	matchers_from_patterns(&patterns)
}

/// Build matchers from already-extracted pattern strings, keeping each
/// pattern's position as its index.
pub fn matchers_from_patterns(patterns: &[Option<String>]) -> Vec<CompiledMatcher> {
	let matchers: Vec<CompiledMatcher> = patterns
		.iter()
		.enumerate()
		.filter_map(|(index, expression)| {
			let regex = compile_expression(expression.as_deref()?)?;
			Some(CompiledMatcher { index, regex })
		})
		.collect();

	trace!(
		total = patterns.len(),
		compiled = matchers.len(),
		"collected matchers"
	);

	matchers
}
