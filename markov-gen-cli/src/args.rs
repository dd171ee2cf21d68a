use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
	name = "markov-gen",
	about = "Generate pseudorandom text from source documents with a Markov chain",
	version
)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Enable verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// TOML configuration file; command-line flags override it
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Print generated text
	Generate {
		/// Number of texts to print
		#[arg(short = 'n', long, default_value_t = 1)]
		count: usize,

		#[command(flatten)]
		args: GenerateArgs,
	},

	/// Generate one text and email it
	Send {
		/// Send email from this account (an email address)
		user: String,

		/// Password for the email account
		#[arg(env = "MARKOV_GEN_PASSWORD", hide_env_values = true)]
		password: String,

		/// The recipient of the email
		#[arg(short, long)]
		recipient: Option<String>,

		/// The subject of the email
		#[arg(short, long)]
		subject: Option<String>,

		/// The SMTP host to use, as host[:port]
		#[arg(short = 't', long)]
		host: Option<String>,

		#[command(flatten)]
		args: GenerateArgs,
	},
}

/// Corpus and generation flags shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
	/// Source document, or directory of .txt documents (repeatable)
	#[arg(short = 'f', long = "file")]
	pub files: Vec<PathBuf>,

	/// The key size to use for Markov chain generation
	#[arg(short = 'k', long = "keysize")]
	pub key_size: Option<usize>,

	/// Character limit of the generated text
	#[arg(short = 'c', long, conflicts_with = "words")]
	pub characters: Option<usize>,

	/// Word limit of the generated text
	#[arg(short = 'w', long)]
	pub words: Option<usize>,

	/// Texts with fewer words are generated again
	#[arg(long)]
	pub minimum_words: Option<usize>,

	/// Do not trim the text back to a sentence end
	#[arg(long)]
	pub no_sentence_complete: bool,

	/// Insert paragraph breaks
	#[arg(long)]
	pub paragraphs: bool,

	/// Sentence ends per paragraph
	#[arg(long)]
	pub paragraph_period: Option<usize>,

	/// Keep quotation marks in the sources
	#[arg(long)]
	pub keep_quotes: bool,

	/// Keep parentheses in the sources
	#[arg(long)]
	pub keep_parens: bool,

	/// Seed for reproducible output
	#[arg(long)]
	pub seed: Option<u64>,

	/// Attempts before giving up (0 retries forever)
	#[arg(long)]
	pub max_attempts: Option<usize>,
}
