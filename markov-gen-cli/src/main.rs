//! markov-gen CLI: the main entry point.
//!
//! Commands:
//! - `generate`: print generated text
//! - `send`: generate one text and email it

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use markov_gen_core::io::expand_sources;
use markov_gen_core::model::corpus::Corpus;
use markov_gen_core::model::generator::Generator;

mod args;
mod config;
mod mail;

use args::{Cli, Commands, GenerateArgs};
use config::AppConfig;

fn main() -> Result<()> {
	let cli = Cli::parse();

	let filter = if cli.verbose { "debug" } else { "info" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
		.format_target(false)
		.init();

	let config = AppConfig::load(cli.config.as_deref())?;

	match cli.command {
		Commands::Generate { count, args } => {
			let (config, mut generator) = prepare(config, &args)?;
			for i in 0..count {
				if i > 0 {
					println!();
				}
				println!("{}", generator.generate(&config.generation)?);
			}
		}
		Commands::Send { user, password, recipient, subject, host, args } => {
			let (mut config, mut generator) = prepare(config, &args)?;
			if let Some(recipient) = recipient {
				config.mail.recipient = recipient;
			}
			if let Some(subject) = subject {
				config.mail.subject = subject;
			}
			if let Some(host) = host {
				config.mail.host = host;
			}

			let text = generator.generate(&config.generation)?;
			let message = mail::compose(&user, &config.mail.recipient, &config.mail.subject, text)?;
			mail::send(&message, &config.mail.host, &user, &password)?;
		}
	}

	Ok(())
}

/// Merges the flags into the configuration, then loads the corpus.
fn prepare(mut config: AppConfig, args: &GenerateArgs) -> Result<(AppConfig, Generator)> {
	config.apply(args)?;
	config.validate()?;
	debug!("Effective configuration: {config:?}");

	let sources = expand_sources(&config.sources)?;
	let corpus = Corpus::load(&sources, &config.corpus).context("Failed to build the corpus")?;

	let generator = match config.seed {
		Some(seed) => Generator::from_seed(corpus, seed),
		None => Generator::from_entropy(corpus),
	};
	Ok((config, generator))
}
