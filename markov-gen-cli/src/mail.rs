//! Plain-text email delivery of a generated text.

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::info;

/// Port used when the host does not name one (SMTP submission).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Splits `host[:port]` into its parts.
pub fn split_host(host: &str) -> Result<(&str, u16)> {
	match host.rsplit_once(':') {
		Some((server, port)) => {
			let port = port
				.parse()
				.with_context(|| format!("Invalid SMTP port in {host:?}"))?;
			Ok((server, port))
		}
		None => Ok((host, DEFAULT_SMTP_PORT)),
	}
}

/// Builds a single plain-text message.
pub fn compose(from: &str, to: &str, subject: &str, body: String) -> Result<Message> {
	let message = Message::builder()
		.from(from.parse().with_context(|| format!("Invalid sender address {from:?}"))?)
		.to(to.parse().with_context(|| format!("Invalid recipient address {to:?}"))?)
		.subject(subject)
		.header(ContentType::TEXT_PLAIN)
		.body(body)
		.context("Failed to build the message")?;
	Ok(message)
}

/// Sends `message` over an authenticated STARTTLS session.
pub fn send(message: &Message, host: &str, user: &str, password: &str) -> Result<()> {
	let (server, port) = split_host(host)?;

	let mailer = SmtpTransport::starttls_relay(server)
		.with_context(|| format!("Failed to set up TLS for {server}"))?
		.port(port)
		.credentials(Credentials::new(user.to_owned(), password.to_owned()))
		.build();

	mailer
		.send(message)
		.with_context(|| format!("Failed to send the message through {server}:{port}"))?;

	info!("Message sent through {server}:{port}");
	Ok(())
}
