use std::mem;

use crate::error::{MarkovError, Result};

/// Substring index over the corpus text.
///
/// A generated text is only worth keeping if it is not a verbatim quotation
/// of the corpus. Scanning the whole corpus for every attempt is too slow on
/// book-sized inputs, so the index stores a suffix array over the bytes of
/// the corpus, built once. A lookup is a binary search over the sorted
/// suffixes: `O(m log n)` for a pattern of `m` bytes.
///
/// Byte-level matching is exact for UTF-8: a valid UTF-8 pattern occurs in
/// the byte string iff it occurs in the character string.
///
/// # Invariants
/// - `suffixes` is a permutation of `0..text.len()`
/// - `text[suffixes[i]..] < text[suffixes[i + 1]..]` for every `i`
#[derive(Clone, Debug)]
pub struct NoveltyIndex {
	text: String,
	suffixes: Vec<u32>,
}

impl NoveltyIndex {
	/// Builds the suffix array of `text` by prefix doubling.
	///
	/// Each round orders suffixes by the rank pair of their first `2k` bytes
	/// with two stable counting-sort passes, so a round is linear and the
	/// build is `O(n log n)`. It stops as soon as every rank is distinct.
	///
	/// # Errors
	/// Returns an error if the text is larger than 4 GiB.
	pub fn build(text: &str) -> Result<Self> {
		let bytes = text.as_bytes();
		let n = bytes.len();
		let len = u32::try_from(n)
			.map_err(|_| MarkovError::Configuration(format!("corpus text too large to index ({n} bytes)")))?;

		let mut suffixes: Vec<u32> = (0..len).collect();
		let mut scratch = vec![0u32; n];
		let mut rank: Vec<u32> = bytes.iter().map(|&b| u32::from(b)).collect();
		let mut next_rank = vec![0u32; n];
		// Ranks are always below `classes`
		let mut classes = 256;
		let mut step = 1;

		while n > 1 {
			// Suffixes shorter than `step` sort before any longer one sharing their prefix
			let second = |rank: &[u32], i: u32| -> usize {
				let i = i as usize;
				if i + step < n { rank[i + step] as usize + 1 } else { 0 }
			};

			counting_sort(&suffixes, &mut scratch, classes + 1, |i| second(&rank, i));
			counting_sort(&scratch, &mut suffixes, classes, |i| rank[i as usize] as usize);

			next_rank[suffixes[0] as usize] = 0;
			for w in 1..n {
				let (prev, cur) = (suffixes[w - 1], suffixes[w]);
				let differs = rank[prev as usize] != rank[cur as usize] || second(&rank, prev) != second(&rank, cur);
				next_rank[cur as usize] = next_rank[prev as usize] + u32::from(differs);
			}
			mem::swap(&mut rank, &mut next_rank);

			let top = rank[suffixes[n - 1] as usize] as usize;
			if top == n - 1 {
				break;
			}
			classes = top + 1;
			step *= 2;
		}

		Ok(Self { text: text.to_owned(), suffixes })
	}

	/// Returns `true` if `pattern` occurs contiguously in the indexed text.
	///
	/// The empty pattern is contained in every text.
	pub fn contains(&self, pattern: &str) -> bool {
		if pattern.is_empty() {
			return true;
		}

		let text = self.text.as_bytes();
		let pattern = pattern.as_bytes();

		// First suffix not smaller than the pattern; if any suffix starts with
		// the pattern, this one does.
		let first = self.suffixes.partition_point(|&s| &text[s as usize..] < pattern);
		self.suffixes
			.get(first)
			.is_some_and(|&s| text[s as usize..].starts_with(pattern))
	}

	/// The indexed text.
	pub fn text(&self) -> &str {
		&self.text
	}
}

/// Stable sort of `input` into `output` by a key below `classes`.
fn counting_sort(input: &[u32], output: &mut [u32], classes: usize, key: impl Fn(u32) -> usize) {
	let mut start = vec![0usize; classes];
	for &i in input {
		start[key(i)] += 1;
	}

	let mut total = 0;
	for slot in &mut start {
		let count = *slot;
		*slot = total;
		total += count;
	}

	for &i in input {
		let k = key(i);
		output[start[k]] = i;
		start[k] += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn suffixes_are_sorted() {
		let index = NoveltyIndex::build("mississippi").unwrap();
		let text = index.text().as_bytes();
		let sorted: Vec<&[u8]> = index.suffixes.iter().map(|&s| &text[s as usize..]).collect();

		assert_eq!(index.suffixes, vec![10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
		assert!(sorted.windows(2).all(|w| w[0] < w[1]));
	}

	#[test]
	fn repetitive_text_needs_every_doubling_round() {
		let text = "a".repeat(2000);
		let index = NoveltyIndex::build(&text).unwrap();

		let expected: Vec<u32> = (0..2000).rev().collect();
		assert_eq!(index.suffixes, expected);
		assert!(index.contains(&"a".repeat(2000)));
		assert!(!index.contains(&"a".repeat(2001)));
	}

	#[test]
	fn periodic_text_is_sorted() {
		let text = "In the beginning. ".repeat(300);
		let index = NoveltyIndex::build(&text).unwrap();
		let bytes = text.as_bytes();

		assert!(index.suffixes.windows(2).all(|w| bytes[w[0] as usize..] < bytes[w[1] as usize..]));
		assert!(index.contains("beginning. In the beginning."));
		assert!(!index.contains("beginning. In the end."));
	}

	#[test]
	fn finds_every_substring_and_nothing_else() {
		let corpus = "The cat sat. The cat ran. A dog barked.";
		let index = NoveltyIndex::build(corpus).unwrap();

		for start in 0..corpus.len() {
			for end in start + 1..=corpus.len() {
				assert!(index.contains(&corpus[start..end]), "{:?}", &corpus[start..end]);
			}
		}

		assert!(!index.contains("The cat ran. The cat sat."));
		assert!(!index.contains("barked. The"));
		assert!(!index.contains("cats"));
	}

	#[test]
	fn matches_across_word_boundaries_like_plain_containment() {
		let index = NoveltyIndex::build("the bobcat sat.").unwrap();
		assert!(index.contains("cat sat."));
		assert!(index.contains("e bob"));
	}

	#[test]
	fn handles_multibyte_text() {
		let index = NoveltyIndex::build("Ève dit: «Amen.» Ève rit.").unwrap();
		assert!(index.contains("«Amen.»"));
		assert!(index.contains("Ève rit."));
		assert!(!index.contains("Ève rit!"));
	}

	#[test]
	fn empty_inputs() {
		let empty = NoveltyIndex::build("").unwrap();
		assert!(empty.contains(""));
		assert!(!empty.contains("a"));

		let single = NoveltyIndex::build("a").unwrap();
		assert!(single.contains("a"));
		assert!(!single.contains("aa"));
	}
}
