//! `mdsplice` augments rendered markdown with externally supplied content
//! fragments. Each item in a host collection contributes a pattern (a
//! `/body/flags` regular expression or a plain literal); the engine finds
//! every occurrence in the source text, resolves overlapping matches
//! deterministically, replaces the surviving spans with inline placeholder
//! markers, renders the annotated text, and finally binds each item's
//! content fragment to its marker's position in the rendered output.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source text + item collection
//!   → Pattern compiler (envelope/literal detection, lenient compilation)
//!   → Matcher builder (one matcher per item that compiled, status-gated)
//!   → Match-and-splice (gather spans, merge overlaps, rewrite with markers)
//!   → Renderer (markdown → HTML, markers pass through verbatim)
//!   → Marker scan + reconciliation (markers → items → content attachments)
//! ```
//!
//! ## Modules
//!
//! - [`marker`] — marker wiring (reserved class and index attribute),
//!   emission, and discovery in rendered output.
//! - [`signature`] — change detection: input and collection signatures the
//!   memo layer keys on.
//!
//! ## Key Types
//!
//! - [`SpliceEngine`] — the stateful driver; memoizes one update cycle and
//!   reuses it while the inputs hold still.
//! - [`EngineOutcome`] — annotated text, rendered markup, and the attachment
//!   list one cycle produced.
//! - [`MarkerConfig`] — one feature wiring; `citations()` and `tokens()`
//!   are the shipped presets.
//! - [`ItemCollection`] — borrowed view of the host's items plus their
//!   tri-state readiness.
//! - [`Attachment`] — one content fragment bound to one marker's position.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdsplice::{ItemCollection, SpliceEngine, SpliceResult};
//!
//! #[derive(Hash)]
//! struct Source {
//! 	pattern: String,
//! 	note: String,
//! }
//!
//! fn main() -> SpliceResult<()> {
//! 	let sources = vec![Source {
//! 		pattern: "CITE1".to_string(),
//! 		note: "<cite>Knuth 1997</cite>".to_string(),
//! 	}];
//!
//! 	let mut engine: SpliceEngine<String> = SpliceEngine::citations();
//! 	let outcome = engine.update(
//! 		"See CITE1 for details.",
//! 		ItemCollection::available(&sources),
//! 		|source| Some(source.pattern.clone()),
//! 		|source| Ok::<_, std::convert::Infallible>(Some(source.note.clone())),
//! 	)?;
//!
//! 	assert_eq!(outcome.attachments.len(), 1);
//! 	assert!(outcome.final_html().contains("<cite>Knuth 1997</cite>"));
//! 	Ok(())
//! }
//! ```
//!
//! Every failure shaped by host data is absorbed rather than raised: an
//! expression that does not compile drops its matcher, a marker that does
//! not resolve stays empty, and an unavailable collection turns the cycle
//! into a pass-through render.

pub use collection::*;
pub use engine::*;
pub use error::*;
pub use marker::*;
pub use matcher::*;
pub use pattern::*;
pub use reconcile::*;
pub use render::*;
pub use signature::*;
pub use splice::*;

mod collection;
mod engine;
mod error;
pub mod marker;
mod matcher;
mod pattern;
mod reconcile;
mod render;
pub mod signature;
mod splice;

#[cfg(test)]
mod __fixtures;
