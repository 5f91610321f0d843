use std::{io, path::PathBuf};

use missive_mime::LetterError;
use missive_smtp::SessionError;
use thiserror::Error;

/// Everything that can stop a run, from reading inputs to the last reply.
#[derive(Debug, Error)]
pub enum MissiveError {
    /// The RON configuration or the JSON letter source could not be read or
    /// parsed.
    #[error("Invalid configuration in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("Failed to read letter body from {}: {source}", path.display())]
    Body {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Letter(#[from] LetterError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl MissiveError {
    pub(crate) fn config(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
