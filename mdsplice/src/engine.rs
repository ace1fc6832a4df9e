use std::fmt;
use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;
use tracing::debug;
use tracing::instrument;

use crate::AnnotatedText;
use crate::Attachment;
use crate::GfmRenderer;
use crate::ItemCollection;
use crate::MarkerConfig;
use crate::PassthroughSanitizer;
use crate::RenderedHtml;
use crate::Renderer;
use crate::Sanitizer;
use crate::SpliceResult;
use crate::apply_attachments;
use crate::matcher::matchers_from_patterns;
use crate::reconcile;
use crate::render::render_annotated;
use crate::scan_markers;
use crate::signature::input_signature;
use crate::splice;

/// Everything one update cycle produces.
///
/// Before the first completed update, and after [`SpliceEngine::clear`],
/// every field is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutcome<C> {
	/// Source text with surviving match spans replaced by markers.
	pub annotated: AnnotatedText,
	/// The rendered (and possibly sanitized) markup.
	pub html: RenderedHtml,
	/// Content bound to each resolvable marker, in document order.
	pub attachments: Vec<Attachment<C>>,
}

impl<C> Default for EngineOutcome<C> {
	fn default() -> Self {
		Self {
			annotated: AnnotatedText::default(),
			html: RenderedHtml::default(),
			attachments: Vec::new(),
		}
	}
}

impl<C: AsRef<str>> EngineOutcome<C> {
	/// Final markup with every attachment spliced into its marker.
	pub fn final_html(&self) -> String {
		apply_attachments(&self.html, &self.attachments)
	}
}

/// Update counters, in the manner of cache hit accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
	/// Update calls observed.
	pub update_count: u64,
	/// Updates answered from the memoized outcome.
	pub reuse_count: u64,
}

impl EngineStats {
	/// Updates that ran the full cycle.
	pub fn recompute_count(&self) -> u64 {
		self.update_count.saturating_sub(self.reuse_count)
	}
}

/// Drives the full cycle and memoizes the outcome on an input signature.
///
/// One engine serves one feature wiring. Create it with
/// [`citations`](SpliceEngine::citations), [`tokens`](SpliceEngine::tokens)
/// or [`with_config`](SpliceEngine::with_config), then call
/// [`update`](SpliceEngine::update) on every host change; unchanged inputs
/// reuse the previous outcome.
pub struct SpliceEngine<C, R = GfmRenderer, S = PassthroughSanitizer> {
	marker: MarkerConfig,
	renderer: R,
	sanitizer: S,
	sanitize: bool,
	last_signature: Option<u64>,
	outcome: EngineOutcome<C>,
	stats: EngineStats,
}

impl<C, R, S> fmt::Debug for SpliceEngine<C, R, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SpliceEngine")
			.field("marker", &self.marker)
			.field("sanitize", &self.sanitize)
			.field("last_signature", &self.last_signature)
			.field("stats", &self.stats)
			.finish_non_exhaustive()
	}
}

impl<C> SpliceEngine<C> {
	/// An engine with the citation wiring and the default renderer.
	pub fn citations() -> Self {
		Self::with_config(MarkerConfig::citations())
	}

	/// An engine with the token wiring and the default renderer.
	pub fn tokens() -> Self {
		Self::with_config(MarkerConfig::tokens())
	}

	/// An engine with a custom marker wiring and the default renderer.
	pub fn with_config(marker: MarkerConfig) -> Self {
		Self {
			marker,
			renderer: GfmRenderer,
			sanitizer: PassthroughSanitizer,
			sanitize: false,
			last_signature: None,
			outcome: EngineOutcome::default(),
			stats: EngineStats::default(),
		}
	}
}

impl<C, R, S> SpliceEngine<C, R, S> {
	/// Replace the renderer; the memoized outcome is discarded.
	pub fn with_renderer<R2>(self, renderer: R2) -> SpliceEngine<C, R2, S> {
		SpliceEngine {
			marker: self.marker,
			renderer,
			sanitizer: self.sanitizer,
			sanitize: self.sanitize,
			last_signature: None,
			outcome: EngineOutcome::default(),
			stats: self.stats,
		}
	}

	/// Replace the sanitizer; the memoized outcome is discarded.
	pub fn with_sanitizer<S2>(self, sanitizer: S2) -> SpliceEngine<C, R, S2> {
		SpliceEngine {
			marker: self.marker,
			renderer: self.renderer,
			sanitizer,
			sanitize: self.sanitize,
			last_signature: None,
			outcome: EngineOutcome::default(),
			stats: self.stats,
		}
	}

	/// Set whether rendered output passes through the sanitizer.
	pub fn sanitize(mut self, sanitize: bool) -> Self {
		self.sanitize = sanitize;
		self
	}

	/// The marker wiring this engine emits and scans.
	pub fn marker_config(&self) -> &MarkerConfig {
		&self.marker
	}

	/// The outcome of the last completed update.
	pub fn outcome(&self) -> &EngineOutcome<C> {
		&self.outcome
	}

	/// Attachments from the last completed update.
	pub fn attachments(&self) -> &[Attachment<C>] {
		&self.outcome.attachments
	}

	/// Update counters.
	pub fn stats(&self) -> EngineStats {
		self.stats
	}

	/// Force the next update to recompute.
	///
	/// Closures carry no identity, so a swapped content accessor cannot be
	/// observed through the input signature; hosts call this when they
	/// replace accessors.
	pub fn invalidate(&mut self) {
		self.last_signature = None;
	}

	/// Teardown: drop the memoized outcome and release every attachment.
	pub fn clear(&mut self) {
		self.last_signature = None;
		self.outcome = EngineOutcome::default();
	}
}

impl<C, R, S> SpliceEngine<C, R, S>
where
	R: Renderer,
	S: Sanitizer,
{
	/// Run one update cycle over the current inputs.
	///
	/// When the input signature matches the previous update, the memoized
	/// outcome is returned untouched. Otherwise the full cycle runs: build
	/// matchers, splice markers into the text, render, scan the output for
	/// markers, and reconcile them against the collection. A renderer
	/// failure is returned and leaves the previous outcome and signature in
	/// place, so the next update retries.
	#[instrument(level = "trace", skip_all)]
	pub fn update<I, E>(
		&mut self,
		text: &str,
		collection: ItemCollection<'_, I>,
		mut pattern_of: impl FnMut(&I) -> Option<String>,
		content_of: impl FnMut(&I) -> Result<Option<C>, E>,
	) -> SpliceResult<&EngineOutcome<C>>
	where
		I: Hash,
		E: Display,
	{
		self.stats.update_count = self.stats.update_count.saturating_add(1);

		let patterns: Option<Vec<Option<String>>> = collection
			.status
			.is_available()
			.then(|| collection.items.iter().map(&mut pattern_of).collect());

		let signature = input_signature(
			text,
			self.sanitize,
			&self.marker,
			collection.status,
			collection.items,
			patterns.as_deref(),
		);

		if self.last_signature == Some(signature) {
			self.stats.reuse_count = self.stats.reuse_count.saturating_add(1);
			debug!(signature, "inputs unchanged; reusing memoized outcome");
			return Ok(&self.outcome);
		}

		let matchers = patterns
			.as_deref()
			.map(matchers_from_patterns)
			.unwrap_or_default();
		let annotated = splice(text, &matchers, &self.marker);
		let html = render_annotated(&self.renderer, &self.sanitizer, &annotated, self.sanitize)?;
		let markers = scan_markers(html.as_str(), &self.marker);
		let attachments = reconcile(&markers, &collection, content_of);

		debug!(
			matchers = matchers.len(),
			markers = markers.len(),
			attachments = attachments.len(),
			"recomputed outcome"
		);

		self.outcome = EngineOutcome {
			annotated,
			html,
			attachments,
		};
		self.last_signature = Some(signature);

		Ok(&self.outcome)
	}
}
