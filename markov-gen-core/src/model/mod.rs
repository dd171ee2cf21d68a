//! Top-level module for the Markov chain generator.
//!
//! - Per-source transition tables (`TransitionTable`, `Successors`)
//! - The set of sources of a run (`Corpus`) and its novelty index
//! - Generation parameters (`GenerationInput`)
//! - The chain generator itself (`Generator`)

/// Chain generation: start, extend, trim, validate, retry.
pub mod generator;

/// All sources of a run, their tables and the corpus text.
///
/// Supports parallel loading from disk and building from memory.
pub mod corpus;

/// Key → successors mapping for one source.
pub mod transition_table;

/// Duplicate-preserving successor lists with uniform sampling.
pub mod successors;

/// Suffix-array substring index used to reject verbatim quotations.
pub mod novelty;

/// Generation parameters: limit, acceptance rules, formatting, retry cap.
pub mod generation_input;
