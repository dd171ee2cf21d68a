use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::corpus::Corpus;
use super::generation_input::{GenerationInput, LimitUnit};
use crate::error::{MarkovError, Result};
use crate::format;

/// Punctuation that ends a sentence.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// An accepted text and how it was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
	/// The generated text, formatted if paragraphs were requested.
	pub text: String,
	/// Sources whose tables produced at least one token of `text`.
	pub sources_used: BTreeSet<usize>,
	/// Attempts made, the accepted one included.
	pub attempts: usize,
}

/// Tokens of one attempt, with the source that produced each of them.
///
/// Seed tokens come from the initial key, not from a table lookup, and have
/// no source. The character count of the space-joined tokens is kept up to
/// date so measuring never re-joins the chain.
#[derive(Debug, Default)]
struct Chain {
	tokens: Vec<String>,
	provenance: Vec<Option<usize>>,
	chars: usize,
}

impl Chain {
	fn push(&mut self, token: String, source: Option<usize>) {
		if !self.tokens.is_empty() {
			self.chars += 1;
		}
		self.chars += token.chars().count();
		self.tokens.push(token);
		self.provenance.push(source);
	}

	fn pop(&mut self) {
		if let Some(token) = self.tokens.pop() {
			self.provenance.pop();
			self.chars -= token.chars().count();
			if !self.tokens.is_empty() {
				self.chars -= 1;
			}
		}
	}

	fn len(&self) -> usize {
		self.tokens.len()
	}

	fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	fn measure(&self, unit: LimitUnit) -> usize {
		match unit {
			LimitUnit::Words => self.tokens.len(),
			LimitUnit::Characters => self.chars,
		}
	}

	fn ends_sentence(&self) -> bool {
		self.tokens
			.last()
			.is_some_and(|token| token.ends_with(SENTENCE_TERMINATORS))
	}

	fn sources(&self) -> BTreeSet<usize> {
		self.provenance.iter().flatten().copied().collect()
	}

	fn text(&self) -> String {
		self.tokens.join(" ")
	}
}

/// Why an attempt was thrown away.
#[derive(Debug, PartialEq, Eq)]
enum Rejection {
	TooShort { words: usize, minimum: usize },
	Quotation,
	MissingSources(Vec<usize>),
}

impl fmt::Display for Rejection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Rejection::TooShort { words, minimum } => write!(f, "{words} words, minimum is {minimum}"),
			Rejection::Quotation => write!(f, "verbatim quotation of the corpus"),
			Rejection::MissingSources(missing) => write!(f, "sources {missing:?} unused"),
		}
	}
}

/// Markov chain text generator over a [`Corpus`].
///
/// # Responsibilities
/// - Start chains on sentence-start keys
/// - Extend them by drawing successors, picking a random source per step
///   when several sources are loaded
/// - Trim to the length limit and to a sentence end
/// - Reject short texts, verbatim quotations and texts that leave a source
///   unused, and try again
///
/// All randomness comes from the injected `rng`; a seeded generator always
/// produces the same texts for the same corpus and inputs.
pub struct Generator<R = StdRng> {
	corpus: Corpus,
	rng: R,
}

impl Generator<StdRng> {
	/// Creates a reproducible generator.
	pub fn from_seed(corpus: Corpus, seed: u64) -> Self {
		Self::new(corpus, StdRng::seed_from_u64(seed))
	}

	/// Creates a generator seeded from the operating system.
	pub fn from_entropy(corpus: Corpus) -> Self {
		Self::new(corpus, StdRng::from_os_rng())
	}
}

impl<R: Rng> Generator<R> {
	pub fn new(corpus: Corpus, rng: R) -> Self {
		Self { corpus, rng }
	}

	/// The corpus texts are generated from.
	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	/// Generates one text satisfying every rule of `input`.
	///
	/// # Errors
	/// See [`Generator::generate_report`].
	pub fn generate(&mut self, input: &GenerationInput) -> Result<String> {
		Ok(self.generate_report(input)?.text)
	}

	/// Generates one text and reports which sources it used.
	///
	/// # Behavior
	/// - Runs attempts until one passes validation.
	/// - Each attempt starts from scratch; nothing carries over.
	/// - Rejections are only logged.
	///
	/// # Errors
	/// - `Configuration` if `input` is invalid.
	/// - `GenerationExhausted` once `input.max_attempts` attempts failed.
	/// - `LookupInconsistency` if a chain reaches a key no table knows.
	pub fn generate_report(&mut self, input: &GenerationInput) -> Result<Generation> {
		input.validate()?;

		let mut attempts = 0;
		loop {
			if input.max_attempts.is_some_and(|max| attempts >= max) {
				return Err(MarkovError::GenerationExhausted { attempts });
			}
			attempts += 1;

			let chain = self.attempt(input)?;
			let text = chain.text();

			if let Some(rejection) = self.rejection(&chain, &text, input) {
				debug!("Attempt {attempts} rejected ({rejection}), trying again");
				continue;
			}

			info!("Accepted a {}-word text after {attempts} attempt(s)", chain.len());
			let text = if input.paragraphs {
				format::paragraphs(&text, input.paragraph_period())
			} else {
				text
			};

			return Ok(Generation { text, sources_used: chain.sources(), attempts });
		}
	}

	/// Runs one attempt up to, but not including, validation.
	fn attempt(&mut self, input: &GenerationInput) -> Result<Chain> {
		let count = self.corpus.initial_key_count();
		if count == 0 {
			return Err(MarkovError::EmptyInitialSet);
		}
		let pick = self.rng.random_range(0..count);
		let mut key = self
			.corpus
			.initial_key(pick)
			.ok_or(MarkovError::EmptyInitialSet)?
			.to_vec();

		let mut chain = Chain::default();
		for token in &key[..key.len() - 1] {
			chain.push(token.clone(), None);
		}

		let unit = input.limit_unit;
		let limit = input.limit();

		// Source of the last token of `key`, none for the initial key
		let mut pending = None;
		while chain.measure(unit) < limit {
			chain.push(key[key.len() - 1].clone(), pending);
			if chain.measure(unit) >= limit {
				break;
			}

			match self.draw(&key)? {
				Some((source, token)) => {
					pending = Some(source);
					key.remove(0);
					key.push(token);
				}
				None => {
					debug!("Dead end at the end of a source after {} words", chain.len());
					break;
				}
			}
		}

		// Words come one at a time but characters do not, so the last word
		// may overshoot a character limit
		if unit == LimitUnit::Characters && chain.measure(unit) > limit {
			chain.pop();
		}

		if input.sentence_complete {
			while !chain.is_empty() && !chain.ends_sentence() {
				chain.pop();
			}
		}

		Ok(chain)
	}

	/// Draws the token following `key` and the source it came from.
	///
	/// With several sources, the sources are shuffled and the first whose
	/// table knows `key` is used. Returns `None` if `key` is the final window
	/// of a source and no table continues it.
	fn draw(&mut self, key: &[String]) -> Result<Option<(usize, String)>> {
		let tables = self.corpus.tables();

		let source = if tables.len() == 1 {
			tables[0].contains(key).then_some(0)
		} else {
			let mut order: Vec<usize> = (0..tables.len()).collect();
			order.shuffle(&mut self.rng);
			order.into_iter().find(|&i| tables[i].contains(key))
		};

		match source {
			Some(i) => match tables[i].draw(key, &mut self.rng) {
				Some(token) => Ok(Some((i, token.to_owned()))),
				None => Err(MarkovError::LookupInconsistency { key: key.to_vec() }),
			},
			None if self.corpus.is_tail(key) => Ok(None),
			None => Err(MarkovError::LookupInconsistency { key: key.to_vec() }),
		}
	}

	fn rejection(&self, chain: &Chain, text: &str, input: &GenerationInput) -> Option<Rejection> {
		if chain.len() < input.minimum_words {
			return Some(Rejection::TooShort { words: chain.len(), minimum: input.minimum_words });
		}

		if self.corpus.is_quotation(text) {
			return Some(Rejection::Quotation);
		}

		if self.corpus.len() > 1 {
			let used = chain.sources();
			let missing: Vec<usize> = self
				.corpus
				.active_sources()
				.filter(|source| !used.contains(source))
				.collect();
			if !missing.is_empty() {
				return Some(Rejection::MissingSources(missing));
			}
		}

		None
	}
}
