use std::collections::{BTreeSet, HashSet};
use std::fs;

use markov_gen_core::error::MarkovError;
use markov_gen_core::io::expand_sources;
use markov_gen_core::model::corpus::{Corpus, CorpusOptions};
use markov_gen_core::model::generation_input::{GenerationInput, LimitUnit};
use markov_gen_core::model::generator::Generator;

const GENESIS: &str = "In the beginning God created the heaven and the earth. \
And the earth was without form, and void; and darkness was upon the face of the deep. \
And the Spirit of God moved upon the face of the waters. \
And God said, Let there be light: and there was light. \
And God saw the light, that it was good: and God divided the light from the darkness. \
And God called the light Day, and the darkness he called Night. \
And the evening and the morning were the first day. \
And God said, Let there be a firmament in the midst of the waters, and let it divide the waters from the waters. \
And God made the firmament, and divided the waters which were under the firmament from the waters which were above the firmament: and it was so. \
And God called the firmament Heaven. And the evening and the morning were the second day. \
And God said, Let the waters under the heaven be gathered together unto one place, and let the dry land appear: and it was so. \
And God called the dry land Earth; and the gathering together of the waters called he Seas: and God saw that it was good.";

const CAT_MAT: &str = "The cat sat on the mat. The dog ran to the park.";
const DOG_RUG: &str = "The dog sat on the rug. The cat ran to the barn.";

fn corpus(texts: &[&str], key_size: usize) -> Corpus {
	let options = CorpusOptions { key_size, ..CorpusOptions::default() };
	Corpus::from_texts(texts, &options).unwrap()
}

fn ends_sentence(text: &str) -> bool {
	text.ends_with(['.', '!', '?'])
}

#[test]
fn accepted_texts_satisfy_every_rule() {
	let mut input = GenerationInput::new(25, LimitUnit::Words).unwrap();
	input.minimum_words = 5;

	for seed in 0..30 {
		let mut generator = Generator::from_seed(corpus(&[GENESIS], 2), seed);
		let text = generator.generate(&input).unwrap();

		assert!(ends_sentence(&text), "seed {seed}: {text}");
		assert!(text.split_whitespace().count() >= 5, "seed {seed}: {text}");
		assert!(text.split_whitespace().count() <= 25, "seed {seed}: {text}");
		assert!(!generator.corpus().text().contains(&text), "seed {seed}: {text}");
	}
}

#[test]
fn character_limit_is_never_exceeded() {
	let input = GenerationInput::new(140, LimitUnit::Characters).unwrap();

	for seed in 0..30 {
		let mut generator = Generator::from_seed(corpus(&[GENESIS], 2), seed);
		let text = generator.generate(&input).unwrap();

		assert!(text.chars().count() <= 140, "seed {seed}: {text}");
		assert!(ends_sentence(&text), "seed {seed}: {text}");
		assert!(!generator.corpus().text().contains(&text), "seed {seed}: {text}");
	}
}

#[test]
fn same_seed_same_texts() {
	let input = GenerationInput::new(30, LimitUnit::Words).unwrap();
	let mut first = Generator::from_seed(corpus(&[GENESIS], 2), 2024);
	let mut second = Generator::from_seed(corpus(&[GENESIS], 2), 2024);

	for _ in 0..5 {
		assert_eq!(first.generate(&input).unwrap(), second.generate(&input).unwrap());
	}
}

#[test]
fn different_seeds_vary() {
	let input = GenerationInput::new(30, LimitUnit::Words).unwrap();
	let texts: HashSet<String> = (0..10)
		.map(|seed| Generator::from_seed(corpus(&[GENESIS], 1), seed).generate(&input).unwrap())
		.collect();

	assert!(texts.len() > 1);
}

#[test]
fn disjoint_sources_always_exhaust() {
	// No key is shared, so a chain never leaves the source it started in and
	// coverage can never hold
	let mut input = GenerationInput::new(10, LimitUnit::Words).unwrap();
	input.minimum_words = 1;
	input.sentence_complete = false;
	input.max_attempts = Some(100);

	for seed in 0..20 {
		let mut generator = Generator::from_seed(corpus(&["Alpha beta gamma.", "One two three."], 1), seed);
		match generator.generate(&input) {
			Err(MarkovError::GenerationExhausted { attempts }) => assert_eq!(attempts, 100),
			other => panic!("expected exhaustion, got {other:?}"),
		}
	}
}

#[test]
fn overlapping_sources_are_blended() {
	let mut input = GenerationInput::new(12, LimitUnit::Words).unwrap();
	input.minimum_words = 3;

	for seed in 0..20 {
		let mut generator = Generator::from_seed(corpus(&[CAT_MAT, DOG_RUG], 1), seed);
		let generated = generator.generate_report(&input).unwrap();

		assert_eq!(generated.sources_used, BTreeSet::from([0, 1]), "seed {seed}: {}", generated.text);
		assert!(ends_sentence(&generated.text));
		assert!(!generator.corpus().text().contains(&generated.text));
	}
}

#[test]
fn paragraphs_break_every_sentence_with_period_one() {
	let mut input = GenerationInput::new(60, LimitUnit::Words).unwrap();
	input.paragraphs = true;
	input.set_paragraph_period(1).unwrap();

	let mut generator = Generator::from_seed(corpus(&[GENESIS], 2), 8);
	let text = generator.generate(&input).unwrap();

	assert!(!text.contains(". "), "{text}");
	assert!(ends_sentence(&text));
}

#[test]
fn sources_load_from_a_directory() {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join("cat.txt"), CAT_MAT).unwrap();
	fs::write(dir.path().join("dog.txt"), DOG_RUG).unwrap();
	fs::write(dir.path().join("README.md"), "# not a source").unwrap();

	let paths = expand_sources(&[dir.path()]).unwrap();
	let corpus = Corpus::load(&paths, &CorpusOptions { key_size: 1, ..CorpusOptions::default() }).unwrap();

	assert_eq!(corpus.source_names(), &["cat", "dog"]);
	assert_eq!(corpus.text(), format!("{CAT_MAT} {DOG_RUG}"));

	let mut input = GenerationInput::new(12, LimitUnit::Words).unwrap();
	input.minimum_words = 3;
	let generated = Generator::from_seed(corpus, 1).generate_report(&input).unwrap();
	assert_eq!(generated.sources_used.len(), 2);
}
