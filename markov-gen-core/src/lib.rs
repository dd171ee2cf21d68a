//! Word-level Markov chain text generation library.
//!
//! This crate provides a small n-gram text generator including:
//! - Whitespace tokenizing of one or more source documents
//! - One transition table per source, keeping provenance
//! - Chain generation with length limits, sentence trimming and
//!   novelty / source-coverage validation
//! - Optional paragraph formatting of the generated text
//!
//! ```no_run
//! use markov_gen_core::model::corpus::{Corpus, CorpusOptions};
//! use markov_gen_core::model::generation_input::{GenerationInput, LimitUnit};
//! use markov_gen_core::model::generator::Generator;
//!
//! # fn main() -> markov_gen_core::error::Result<()> {
//! let corpus = Corpus::load(&["bible.txt"], &CorpusOptions::default())?;
//! let mut generator = Generator::from_entropy(corpus);
//! let verse = generator.generate(&GenerationInput::new(140, LimitUnit::Characters)?)?;
//! println!("{verse}");
//! # Ok(())
//! # }
//! ```

/// Corpus construction and text generation.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// Paragraph formatting of generated text.
pub mod format;

/// I/O utilities (source reading, tokenizing, path helpers).
pub mod io;
