use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SpliceError {
	#[error("invalid marker class name: `{0}`")]
	#[diagnostic(
		code(mdsplice::invalid_marker_class),
		help("class names start with an ASCII letter and contain only letters, digits, `-` and `_`")
	)]
	InvalidMarkerClass(String),

	#[error("invalid marker index attribute: `{0}`")]
	#[diagnostic(
		code(mdsplice::invalid_marker_attribute),
		help("attribute names start with an ASCII letter and contain only letters, digits, `-` and `_`")
	)]
	InvalidMarkerAttribute(String),

	#[error("markdown rendering failed: {0}")]
	#[diagnostic(code(mdsplice::render))]
	Render(String),
}

pub type SpliceResult<T> = Result<T, SpliceError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
