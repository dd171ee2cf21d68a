use super::successors::Successors;
use crate::error::{MarkovError, Result};
use rand::Rng;
use std::collections::HashMap;

/// Returns `true` if a token looks like the start of a sentence.
///
/// The heuristic is deliberately narrow: the first character must be an
/// ASCII uppercase letter (`'A'..='Z'`). No locale or Unicode case rules.
pub fn is_sentence_start(token: &str) -> bool {
	token.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Word-level transition table built from a single source.
///
/// The `TransitionTable` maps every window of `key_size` consecutive tokens
/// (a key) to the tokens that followed it in the source.
///
/// # Responsibilities
/// - Slide the key window over the source tokens
/// - Keep duplicate successors (they encode frequency)
/// - Collect the keys that may start a chain
/// - Remember the final window, which has no successor
///
/// # Invariants
/// - `key_size` is always >= 1
/// - Every key in `states` has exactly `key_size` tokens
/// - Every successor list is non-empty
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
	/// Number of tokens per key.
	key_size: usize, // must be >= 1

	/// Mapping from a key to its successors.
	states: HashMap<Vec<String>, Successors>,

	/// Keys whose first token starts a sentence, one entry per occurrence.
	initial: Vec<Vec<String>>,

	/// Last `key_size` tokens of the source, if the source produced any key.
	tail: Option<Vec<String>>,
}

impl TransitionTable {
	/// Builds the table of one source.
	///
	/// A source with fewer than `key_size + 1` tokens yields an empty table,
	/// no initial keys and no tail.
	///
	/// # Errors
	/// Returns an error if `key_size < 1`.
	pub fn build(tokens: &[String], key_size: usize) -> Result<Self> {
		if key_size < 1 {
			return Err(MarkovError::Configuration("key_size must be >= 1".to_owned()));
		}

		let mut table = Self {
			key_size,
			states: HashMap::new(),
			initial: Vec::new(),
			tail: None,
		};

		if tokens.len() < key_size + 1 {
			// Source too short, no key has a successor
			return Ok(table);
		}

		for window in tokens.windows(key_size + 1) {
			let (key, next) = window.split_at(key_size);
			let next = &next[0];

			match table.states.get_mut(key) {
				Some(successors) => successors.push(next),
				None => {
					table.states.insert(key.to_vec(), Successors::new(next));
				}
			}

			if is_sentence_start(&key[0]) {
				table.initial.push(key.to_vec());
			}
		}

		table.tail = Some(tokens[tokens.len() - key_size..].to_vec());
		Ok(table)
	}

	/// Returns the window length used by this table.
	pub fn key_size(&self) -> usize {
		self.key_size
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Returns `true` if `key` has at least one successor in this source.
	pub fn contains(&self, key: &[String]) -> bool {
		self.states.contains_key(key)
	}

	/// Returns the successors of `key`, if any.
	pub fn successors(&self, key: &[String]) -> Option<&Successors> {
		self.states.get(key)
	}

	/// Draws the next token after `key`.
	///
	/// Returns `None` if the key is unknown.
	pub fn draw<R: Rng + ?Sized>(&self, key: &[String], rng: &mut R) -> Option<&str> {
		self.states.get(key)?.draw(rng)
	}

	/// Keys eligible to start a chain, in source order, duplicates included.
	pub fn initial_keys(&self) -> &[Vec<String>] {
		&self.initial
	}

	/// The final window of the source, which has no successor of its own.
	pub fn tail_key(&self) -> Option<&[String]> {
		self.tail.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::io::tokenize;

	fn key(words: &str) -> Vec<String> {
		tokenize(words)
	}

	#[test]
	fn zero_key_size_is_rejected() {
		assert!(TransitionTable::build(&key("A b"), 0).is_err());
	}

	#[test]
	fn records_duplicate_successors_in_order() {
		let tokens = tokenize("The cat sat. The cat ran. A dog barked.");
		let table = TransitionTable::build(&tokens, 2).unwrap();

		assert_eq!(table.key_size(), 2);
		assert_eq!(table.len(), 6);
		assert_eq!(table.successors(&key("The cat")).unwrap().as_slice(), key("sat. ran.").as_slice());
		assert_eq!(table.successors(&key("sat. The")).unwrap().as_slice(), key("cat").as_slice());
		assert!(!table.contains(&key("dog barked.")));
		assert_eq!(table.tail_key(), Some(key("dog barked.").as_slice()));
	}

	#[test]
	fn initial_keys_keep_every_occurrence() {
		let tokens = tokenize("The cat sat. The cat ran. A dog barked.");
		let table = TransitionTable::build(&tokens, 2).unwrap();

		assert_eq!(table.initial_keys(), &[key("The cat"), key("The cat"), key("A dog")]);
	}

	#[test]
	fn sentence_start_is_ascii_uppercase_only() {
		assert!(is_sentence_start("Zion"));
		assert!(!is_sentence_start("zion"));
		assert!(!is_sentence_start("Élan"));
		assert!(!is_sentence_start("\"Behold"));
		assert!(!is_sentence_start(""));
	}

	#[test]
	fn source_of_exactly_key_size_tokens_is_inert() {
		let table = TransitionTable::build(&key("In the"), 2).unwrap();
		assert!(table.is_empty());
		assert!(table.initial_keys().is_empty());
		assert_eq!(table.tail_key(), None);
	}

	#[test]
	fn building_twice_yields_identical_tables() {
		let tokens = tokenize("And God said, Let there be light: and there was light. And God saw the light.");
		let first = TransitionTable::build(&tokens, 1).unwrap();
		let second = TransitionTable::build(&tokens, 1).unwrap();
		assert_eq!(first, second);
	}
}
