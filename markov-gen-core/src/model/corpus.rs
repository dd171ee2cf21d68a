use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::novelty::NoveltyIndex;
use super::transition_table::TransitionTable;
use crate::error::{MarkovError, Result};
use crate::io::{read_text, source_name, strip_chars, tokenize};

/// Window length used when none is configured.
pub const DEFAULT_KEY_SIZE: usize = 2;

/// Construction parameters of a [`Corpus`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct CorpusOptions {
	/// Number of tokens per key (n-gram order minus one).
	pub key_size: usize,
	/// Remove `"` before tokenizing.
	pub strip_quotes: bool,
	/// Remove `(` and `)` before tokenizing.
	pub strip_parens: bool,
}

impl Default for CorpusOptions {
	fn default() -> Self {
		Self { key_size: DEFAULT_KEY_SIZE, strip_quotes: true, strip_parens: true }
	}
}

impl CorpusOptions {
	pub fn validate(&self) -> Result<()> {
		if self.key_size < 1 {
			return Err(MarkovError::Configuration("key_size must be >= 1".to_owned()));
		}
		Ok(())
	}
}

/// One source document after tokenizing and table building.
struct LoadedSource {
	name: String,
	tokens: Vec<String>,
	table: TransitionTable,
}

impl LoadedSource {
	fn from_text(name: String, text: &str, options: &CorpusOptions) -> Result<Self> {
		let text = strip_chars(text, options.strip_quotes, options.strip_parens);
		let tokens = tokenize(&text);
		let table = TransitionTable::build(&tokens, options.key_size)?;
		Ok(Self { name, tokens, table })
	}

	fn from_file(path: &Path, options: &CorpusOptions) -> Result<Self> {
		let name = source_name(path).map_err(|e| MarkovError::io(path, e))?;
		let text = read_text(path)?;
		Self::from_text(name, &text, options)
	}
}

/// Every source of a run, with its transition table and the shared
/// lookups used by the generator.
///
/// This struct manages:
/// - `tables`: one independent table per source, in input order. Tables are
///   never merged so the generator knows which source produced each token.
/// - `initial`: every sentence-start key of every source, as
///   `(source, position)` pairs into the tables' initial keys.
/// - `index`: the novelty index over the space-joined tokens of all sources.
///
/// Built once, read-only afterwards.
#[derive(Debug)]
pub struct Corpus {
	key_size: usize,
	names: Vec<String>,
	tables: Vec<TransitionTable>,
	initial: Vec<(usize, usize)>,
	index: NoveltyIndex,
}

impl Corpus {
	/// Loads and builds every source file.
	///
	/// - Sources are independent, so they are read and built on worker
	///   threads, chunked by CPU count.
	/// - Results are put back in input order; construction is deterministic.
	///
	/// # Errors
	/// - Returns an error if `paths` is empty or the options are invalid.
	/// - Returns the error of the first failing source, in input order.
	/// - Returns an error if no source produces a key, or none produces a
	///   sentence-start key.
	pub fn load<P: AsRef<Path>>(paths: &[P], options: &CorpusOptions) -> Result<Self> {
		options.validate()?;
		if paths.is_empty() {
			return Err(MarkovError::Configuration("at least one source is required".to_owned()));
		}

		let indexed: Vec<(usize, PathBuf)> = paths
			.iter()
			.map(|p| p.as_ref().to_path_buf())
			.enumerate()
			.collect();
		let chunk_size = indexed.len().div_ceil(num_cpus::get().max(1));

		let (tx, rx) = mpsc::channel();
		for chunk in indexed.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk = chunk.to_vec();
			let options = *options;

			thread::spawn(move || {
				for (position, path) in chunk {
					let loaded = LoadedSource::from_file(&path, &options);
					// The receiver outlives every worker
					let _ = tx.send((position, loaded));
				}
			});
		}
		drop(tx);

		let mut slots: Vec<Option<Result<LoadedSource>>> = paths.iter().map(|_| None).collect();
		for (position, loaded) in rx.iter() {
			slots[position] = Some(loaded);
		}

		let mut sources = Vec::with_capacity(slots.len());
		for (slot, path) in slots.into_iter().zip(paths) {
			match slot {
				Some(loaded) => sources.push(loaded?),
				None => {
					return Err(MarkovError::Configuration(format!(
						"worker stopped before building {}",
						path.as_ref().display()
					)));
				}
			}
		}

		Self::assemble(options.key_size, sources)
	}

	/// Builds a corpus from in-memory documents, named `source-0`, `source-1`, ...
	///
	/// # Errors
	/// Same as [`Corpus::load`], minus the I/O failures.
	pub fn from_texts<S: AsRef<str>>(texts: &[S], options: &CorpusOptions) -> Result<Self> {
		options.validate()?;
		if texts.is_empty() {
			return Err(MarkovError::Configuration("at least one source is required".to_owned()));
		}

		let sources = texts
			.iter()
			.enumerate()
			.map(|(i, text)| LoadedSource::from_text(format!("source-{i}"), text.as_ref(), options))
			.collect::<Result<Vec<_>>>()?;

		Self::assemble(options.key_size, sources)
	}

	fn assemble(key_size: usize, sources: Vec<LoadedSource>) -> Result<Self> {
		let text = sources
			.iter()
			.flat_map(|source| source.tokens.iter().map(String::as_str))
			.collect::<Vec<_>>()
			.join(" ");

		let mut names = Vec::with_capacity(sources.len());
		let mut tables = Vec::with_capacity(sources.len());
		let mut initial = Vec::new();

		for (i, source) in sources.into_iter().enumerate() {
			if source.table.is_empty() {
				warn!(
					"Source {} has {} tokens, fewer than key size {} + 1: it is ignored",
					source.name,
					source.tokens.len(),
					key_size
				);
			}
			initial.extend((0..source.table.initial_keys().len()).map(|position| (i, position)));
			names.push(source.name);
			tables.push(source.table);
		}

		if tables.iter().all(TransitionTable::is_empty) {
			return Err(MarkovError::Configuration(format!(
				"key size {key_size} leaves no key in any source"
			)));
		}
		if initial.is_empty() {
			return Err(MarkovError::EmptyInitialSet);
		}

		let index = NoveltyIndex::build(&text)?;

		info!(
			"Corpus built: {} source(s), {} keys, {} initial keys, {} bytes of text",
			tables.len(),
			tables.iter().map(TransitionTable::len).sum::<usize>(),
			initial.len(),
			text.len()
		);

		Ok(Self { key_size, names, tables, initial, index })
	}

	/// Number of tokens per key.
	pub fn key_size(&self) -> usize {
		self.key_size
	}

	/// Number of sources, inert ones included.
	pub fn len(&self) -> usize {
		self.tables.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// Source names, in input order.
	pub fn source_names(&self) -> &[String] {
		&self.names
	}

	/// Transition tables, in input order.
	pub fn tables(&self) -> &[TransitionTable] {
		&self.tables
	}

	/// Indices of the sources that produced at least one key.
	pub fn active_sources(&self) -> impl Iterator<Item = usize> + '_ {
		self.tables
			.iter()
			.enumerate()
			.filter(|(_, table)| !table.is_empty())
			.map(|(i, _)| i)
	}

	/// Number of initial keys, duplicates included.
	pub fn initial_key_count(&self) -> usize {
		self.initial.len()
	}

	/// Returns the `n`-th initial key, across all sources.
	pub fn initial_key(&self, n: usize) -> Option<&[String]> {
		let &(source, position) = self.initial.get(n)?;
		self.tables[source].initial_keys().get(position).map(Vec::as_slice)
	}

	/// Returns `true` if `key` is the final window of some source.
	pub fn is_tail(&self, key: &[String]) -> bool {
		self.tables.iter().any(|table| table.tail_key() == Some(key))
	}

	/// Space-joined tokens of every source.
	pub fn text(&self) -> &str {
		self.index.text()
	}

	/// Returns `true` if `text` appears verbatim in the corpus.
	pub fn is_quotation(&self, text: &str) -> bool {
		self.index.contains(text)
	}
}
