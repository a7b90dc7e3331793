/* src/loader/error.rs */

/// Errors raised while loading a flag document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	/// Parsing error from format implementation.
	#[error("parse error: {0}")]
	Parse(String),

	/// Resource not found.
	#[error("not found")]
	NotFound,

	/// The requested section is absent from the document.
	#[error("missing section: {0}")]
	MissingSection(String),

	/// No registered format handles the extension.
	#[error("unsupported format: {0}")]
	UnsupportedFormat(String),

	/// IO error from source.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	/// Sandbox violation in file system source.
	#[cfg(feature = "fs")]
	#[error("sandbox violation")]
	SandboxViolation,
}
