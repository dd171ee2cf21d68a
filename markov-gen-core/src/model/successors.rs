use rand::Rng;
use rand::seq::IndexedRandom;

/// Tokens observed right after one key in one source.
///
/// Conceptually, this is the set of outgoing edges of a node in a Markov
/// chain. Unlike a counted map, every observation is stored: a token that
/// followed the key five times appears five times. A uniform draw over the
/// list is therefore already weighted by empirical frequency.
///
/// ## Invariants
/// - The list is never empty once the owning table has been built
/// - Insertion order is the order of appearance in the source
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Successors {
	tokens: Vec<String>
}

impl Successors {
	/// Creates a list holding a single observation.
	pub fn new(first: &str) -> Self {
		Self { tokens: vec![first.to_owned()] }
	}

	/// Records one more occurrence of `token` after the key.
	pub fn push(&mut self, token: &str) {
		self.tokens.push(token.to_owned());
	}

	/// Draws a successor uniformly over the stored observations.
	///
	/// Returns `None` if the list is empty.
	pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.tokens.choose(rng).map(String::as_str)
	}

	/// Number of observations, duplicates included.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Observations in source order.
	pub fn as_slice(&self) -> &[String] {
		&self.tokens
	}
}
