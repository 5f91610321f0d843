use std::path::{Path, PathBuf};

use missive_common::{
    config::{Credentials, ServerConfig, SessionTimeouts},
    incoming, internal,
};
use missive_mime::{Letter, Message};
use missive_smtp::{Exchange, SmtpSession};
use serde::Deserialize;

use crate::{error::MissiveError, source::LetterSource};

/// One run of the mailer: where to send, who sends, and which files make up
/// the letter.
#[derive(Debug, Deserialize)]
pub struct Missive {
    server: ServerConfig,
    credentials: Credentials,

    #[serde(default)]
    timeouts: SessionTimeouts,

    /// JSON letter source with recipients, subject and attachment paths.
    ///
    /// Default: `conf/config.json`
    #[serde(default = "defaults::letter")]
    letter: PathBuf,

    /// UTF-8 text used as the single text part.
    ///
    /// Default: `conf/letter.txt`
    #[serde(default = "defaults::body")]
    body: PathBuf,

    #[serde(default = "defaults::boundary")]
    boundary: String,

    /// Abort on the first 4xx/5xx reply instead of logging it and carrying on.
    #[serde(default)]
    validate_replies: bool,
}

impl Missive {
    /// Reads a RON configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MissiveError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, MissiveError> {
        let content =
            std::fs::read_to_string(path).map_err(|err| MissiveError::config(path, err))?;
        Self::from_ron(path, &content)
    }

    fn from_ron(path: &Path, content: &str) -> Result<Self, MissiveError> {
        ron::from_str(content).map_err(|err| MissiveError::config(path, err))
    }

    #[must_use]
    pub fn with_letter(mut self, letter: impl Into<PathBuf>) -> Self {
        self.letter = letter.into();
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<PathBuf>) -> Self {
        self.body = body.into();
        self
    }

    /// Replaces the configured password with `MISSIVE_PASSWORD`, if set.
    #[must_use]
    pub fn with_env_password(mut self) -> Self {
        self.credentials = self.credentials.with_env_password();
        self
    }

    #[must_use]
    pub const fn server(&self) -> &ServerConfig {
        &self.server
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Builds and finalizes the message described by the letter source and
    /// body file, without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error if either input cannot be read, the letter fails
    /// validation, or an attachment cannot be read.
    #[tracing::instrument(level = "debug", skip_all, fields(letter = %self.letter.display()))]
    pub fn build_message(&self) -> Result<Message, MissiveError> {
        let source = LetterSource::load(&self.letter)?;
        let body = std::fs::read_to_string(&self.body).map_err(|source| MissiveError::Body {
            path: self.body.clone(),
            source,
        })?;

        let mut letter = Letter::create(
            &self.credentials.sender,
            source.recipients,
            source.subject,
        )?
        .with_boundary(&self.boundary);

        letter.add_text(normalize_newlines(&body));
        for attachment in &source.attachments {
            letter.add_attachment(attachment)?;
            internal!(level = DEBUG, "Attached {}", attachment.display());
        }

        let message = letter.finalize();
        internal!(
            "Built message of {} bytes for {} recipient(s)",
            message.len(),
            message.recipients().len()
        );

        Ok(message)
    }

    /// Sends `message` to the configured server and returns the transcript.
    ///
    /// # Errors
    ///
    /// Returns [`MissiveError::Session`] if the connection cannot be set up
    /// or breaks, or, with `validate_replies`, if the server rejects a step.
    pub async fn deliver(&self, message: Message) -> Result<Vec<Exchange>, MissiveError> {
        let session = SmtpSession::connect(&self.server, self.timeouts).await?;

        let transcript = if self.validate_replies {
            session.validating().deliver(&self.credentials, message).await?
        } else {
            session.deliver(&self.credentials, message).await?
        };

        for exchange in &transcript {
            match &exchange.command {
                Some(command) => incoming!(level = INFO, "{command} -> {}", exchange.reply),
                None => incoming!(level = INFO, "{}", exchange.reply),
            }
        }

        Ok(transcript)
    }

    /// Builds the message and delivers it.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Self::build_message`] or
    /// [`Self::deliver`].
    #[tracing::instrument(level = "trace", skip_all, err)]
    pub async fn run(self) -> Result<(), MissiveError> {
        internal!("Missive running");

        let message = self.build_message()?;
        self.deliver(message).await?;

        internal!(level = INFO, "Delivery finished");
        Ok(())
    }
}

/// Folds `\r\n` and lone `\r` into `\n`, the way text-mode reads do.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

mod defaults {
    use std::path::PathBuf;

    pub fn letter() -> PathBuf {
        PathBuf::from("conf/config.json")
    }

    pub fn body() -> PathBuf {
        PathBuf::from("conf/letter.txt")
    }

    pub fn boundary() -> String {
        missive_mime::DEFAULT_BOUNDARY.to_string()
    }
}
