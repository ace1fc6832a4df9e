use derive_more::Deref;
use derive_more::Display;
use derive_more::From;
use markdown::CompileOptions;
use markdown::Options;
use markdown::ParseOptions;
use serde::Deserialize;
use serde::Serialize;

use crate::AnnotatedText;
use crate::SpliceError;
use crate::SpliceResult;

/// Rendered markup containing the placeholder markers verbatim.
#[derive(Clone, Debug, Default, Deref, Display, Eq, From, Hash, PartialEq, Serialize, Deserialize)]
#[display("{_0}")]
pub struct RenderedHtml(String);

impl RenderedHtml {
	/// View the rendered markup as a plain string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// Converts annotated text into markup.
///
/// Implementations must leave marker elements untouched. Any
/// `Fn(&str) -> SpliceResult<String>` closure implements this.
pub trait Renderer {
	fn render(&self, text: &str) -> SpliceResult<String>;
}

impl<F> Renderer for F
where
	F: Fn(&str) -> SpliceResult<String>,
{
	fn render(&self, text: &str) -> SpliceResult<String> {
		self(text)
	}
}

/// Post-render HTML sanitization, applied only when the engine's sanitize
/// flag is set.
pub trait Sanitizer {
	fn sanitize(&self, html: &str) -> String;
}

impl<F> Sanitizer for F
where
	F: Fn(&str) -> String,
{
	fn sanitize(&self, html: &str) -> String {
		self(html)
	}
}

/// GitHub-flavored markdown rendering with raw HTML allowed, so markers
/// survive into the output.
#[derive(Clone, Copy, Debug, Default)]
pub struct GfmRenderer;

impl Renderer for GfmRenderer {
	fn render(&self, text: &str) -> SpliceResult<String> {
		let options = Options {
			parse: ParseOptions::gfm(),
			compile: CompileOptions {
				allow_dangerous_html: true,
				..CompileOptions::gfm()
			},
		};

		markdown::to_html_with_options(text, &options)
			.map_err(|message| SpliceError::Render(message.to_string()))
	}
}

/// Leaves markup untouched; hosts supply a real sanitizer when they need
/// one.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
	fn sanitize(&self, html: &str) -> String {
		html.to_string()
	}
}

/// Render annotated text and, when `sanitize` is set, pass the result
/// through the sanitizer.
pub fn render_annotated<R, S>(
	renderer: &R,
	sanitizer: &S,
	annotated: &AnnotatedText,
	sanitize: bool,
) -> SpliceResult<RenderedHtml>
where
	R: Renderer + ?Sized,
	S: Sanitizer + ?Sized,
{
	let html = renderer.render(annotated.as_str())?;
	let html = if sanitize { sanitizer.sanitize(&html) } else { html };

	Ok(RenderedHtml::from(html))
}
