//! Configuration loading for the command-line tool.
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags. Every section is optional:
//!
//! ```toml
//! sources = ["bible.txt"]
//!
//! [corpus]
//! key_size = 3
//!
//! [generation]
//! limit = 140
//! limit_unit = "characters"
//!
//! [mail]
//! recipient = "trigger@ifttt.com"
//! subject = "#bible"
//! host = "smtp.gmail.com:587"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use markov_gen_core::model::corpus::CorpusOptions;
use markov_gen_core::model::generation_input::{GenerationInput, LimitUnit};

use crate::args::GenerateArgs;

const DEFAULT_SOURCE: &str = "bible.txt";
const DEFAULT_KEY_SIZE: usize = 3;

/// Root configuration, mapping the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Source documents or directories
	pub sources: Vec<PathBuf>,

	/// Reproducible output when set
	pub seed: Option<u64>,

	pub corpus: CorpusOptions,

	pub generation: GenerationInput,

	pub mail: MailConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			sources: vec![PathBuf::from(DEFAULT_SOURCE)],
			seed: None,
			corpus: CorpusOptions { key_size: DEFAULT_KEY_SIZE, ..CorpusOptions::default() },
			generation: GenerationInput::default(),
			mail: MailConfig::default(),
		}
	}
}

/// Message settings for the `send` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
	pub recipient: String,
	pub subject: String,
	/// SMTP server as `host[:port]`
	pub host: String,
}

impl Default for MailConfig {
	fn default() -> Self {
		Self {
			recipient: "trigger@ifttt.com".into(),
			subject: "#bible".into(),
			host: "smtp.gmail.com:587".into(),
		}
	}
}

impl AppConfig {
	/// Loads the file if one is given, defaults otherwise.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => Self::load_from(path),
			None => Ok(Self::default()),
		}
	}

	pub fn load_from(path: &Path) -> Result<Self> {
		let text = fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file at {}", path.display()))?;
		toml::from_str(&text).with_context(|| format!("Failed to parse config file at {}", path.display()))
	}

	/// Overrides file values with the flags that were given.
	pub fn apply(&mut self, args: &GenerateArgs) -> Result<()> {
		if !args.files.is_empty() {
			self.sources = args.files.clone();
		}
		if args.seed.is_some() {
			self.seed = args.seed;
		}

		if let Some(key_size) = args.key_size {
			self.corpus.key_size = key_size;
		}
		if args.keep_quotes {
			self.corpus.strip_quotes = false;
		}
		if args.keep_parens {
			self.corpus.strip_parens = false;
		}

		let generation = &mut self.generation;
		if let Some(characters) = args.characters {
			generation.set_limit(characters)?;
			generation.limit_unit = LimitUnit::Characters;
		}
		if let Some(words) = args.words {
			generation.set_limit(words)?;
			generation.limit_unit = LimitUnit::Words;
		}
		if let Some(minimum_words) = args.minimum_words {
			generation.minimum_words = minimum_words;
		}
		if args.no_sentence_complete {
			generation.sentence_complete = false;
		}
		if args.paragraphs {
			generation.paragraphs = true;
		}
		if let Some(period) = args.paragraph_period {
			generation.set_paragraph_period(period)?;
		}
		if let Some(max_attempts) = args.max_attempts {
			generation.max_attempts = (max_attempts > 0).then_some(max_attempts);
		}

		Ok(())
	}

	pub fn validate(&self) -> Result<()> {
		if self.sources.is_empty() {
			anyhow::bail!("Configuration validation failed: no source document");
		}
		self.corpus.validate()?;
		self.generation.validate()?;
		Ok(())
	}
}
