//! Error types for corpus construction and text generation.
//!
//! Only fatal conditions are represented here. Attempts rejected during
//! generation (too short, verbatim quotation, missing source coverage)
//! are retried internally and never surface as errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the loader, the builder and the generator.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// A source file could not be read.
	#[error("Failed to read source {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// Invalid options, or a corpus that yields no keys at all.
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// No key starts with an uppercase letter, so no chain can begin.
	#[error("No initial key available: no source window starts with an uppercase letter")]
	EmptyInitialSet,

	/// The current key is absent from every table and is not a source tail.
	#[error("Key {key:?} is missing from every transition table")]
	LookupInconsistency { key: Vec<String> },

	/// The attempt cap was reached without an acceptable text.
	#[error("Gave up after {attempts} generation attempts")]
	GenerationExhausted { attempts: usize },
}

/// Result type alias using [`MarkovError`].
pub type Result<T> = std::result::Result<T, MarkovError>;

impl MarkovError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}
