use serde::{Deserialize, Serialize};

use crate::error::{MarkovError, Result};

/// Minimum number of words an accepted text must have.
pub const DEFAULT_MINIMUM_WORDS: usize = 5;

/// A paragraph break is inserted at every `DEFAULT_PARAGRAPH_PERIOD`-th sentence end.
pub const DEFAULT_PARAGRAPH_PERIOD: usize = 4;

/// Attempts made before giving up, unless overridden.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

const DEFAULT_LIMIT: usize = 140;

/// Unit in which the generation limit is measured.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LimitUnit {
	/// Number of tokens in the chain.
	Words,
	/// Number of characters of the space-joined chain.
	#[default]
	Characters,
}

/// Input parameters for one generated text.
///
/// # Responsibilities
/// - Track the length target and its unit
/// - Track the acceptance rules (`minimum_words`, `sentence_complete`)
/// - Track output formatting (`paragraphs`, `paragraph_period`)
/// - Bound the retry loop (`max_attempts`)
///
/// # Invariants
/// - `limit` is always > 0
/// - `paragraph_period` is always >= 1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationInput {
	/// Target length, in `limit_unit`.
	limit: usize,

	/// Whether `limit` counts words or characters.
	pub limit_unit: LimitUnit,

	/// Texts with fewer words are rejected and generated again.
	pub minimum_words: usize,

	/// Trim the text back so it ends on `.`, `!` or `?`.
	pub sentence_complete: bool,

	/// Insert paragraph breaks into the accepted text.
	pub paragraphs: bool,

	/// Break after every `paragraph_period`-th sentence end.
	paragraph_period: usize,

	/// Attempts before giving up. `None` retries forever.
	pub max_attempts: Option<usize>,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			limit: DEFAULT_LIMIT,
			limit_unit: LimitUnit::default(),
			minimum_words: DEFAULT_MINIMUM_WORDS,
			sentence_complete: true,
			paragraphs: false,
			paragraph_period: DEFAULT_PARAGRAPH_PERIOD,
			max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
		}
	}
}

impl GenerationInput {
	/// Creates an input with the given limit and default rules.
	///
	/// # Errors
	/// Returns an error if `limit` is 0.
	pub fn new(limit: usize, limit_unit: LimitUnit) -> Result<Self> {
		let mut input = Self { limit_unit, ..Self::default() };
		input.set_limit(limit)?;
		Ok(input)
	}

	/// Returns the target length.
	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Returns the paragraph period.
	pub fn paragraph_period(&self) -> usize {
		self.paragraph_period
	}

	/// Sets the target length.
	///
	/// # Errors
	/// Returns an error if `limit` is 0.
	pub fn set_limit(&mut self, limit: usize) -> Result<()> {
		if limit == 0 {
			return Err(MarkovError::Configuration("limit must be > 0".to_owned()));
		}
		self.limit = limit;
		Ok(())
	}

	/// Sets how many sentence ends make a paragraph.
	///
	/// # Errors
	/// Returns an error if `period` is 0.
	pub fn set_paragraph_period(&mut self, period: usize) -> Result<()> {
		if period == 0 {
			return Err(MarkovError::Configuration("paragraph_period must be >= 1".to_owned()));
		}
		self.paragraph_period = period;
		Ok(())
	}

	/// Checks values that bypassed the setters (ex. deserialized ones).
	pub fn validate(&self) -> Result<()> {
		if self.limit == 0 {
			return Err(MarkovError::Configuration("limit must be > 0".to_owned()));
		}
		if self.paragraph_period == 0 {
			return Err(MarkovError::Configuration("paragraph_period must be >= 1".to_owned()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_follow_the_verse_sender() {
		let input = GenerationInput::default();
		assert_eq!(input.limit(), 140);
		assert_eq!(input.limit_unit, LimitUnit::Characters);
		assert_eq!(input.minimum_words, 5);
		assert!(input.sentence_complete);
		assert!(!input.paragraphs);
		assert_eq!(input.paragraph_period(), 4);
		assert_eq!(input.max_attempts, Some(10_000));
	}

	#[test]
	fn zero_limit_is_rejected() {
		assert!(GenerationInput::new(0, LimitUnit::Words).is_err());
		let mut input = GenerationInput::new(3, LimitUnit::Words).unwrap();
		assert!(input.set_limit(0).is_err());
		assert_eq!(input.limit(), 3);
	}

	#[test]
	fn zero_paragraph_period_is_rejected() {
		let mut input = GenerationInput::default();
		assert!(input.set_paragraph_period(0).is_err());
		assert!(input.set_paragraph_period(2).is_ok());
		assert_eq!(input.paragraph_period(), 2);
	}
}
