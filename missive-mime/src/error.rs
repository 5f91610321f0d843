//! Error types for letter construction.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A letter that can never be sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No recipients given, where should this be sent?")]
    NoRecipients,

    #[error("Can't send a letter without a subject")]
    EmptySubject,
}

/// Errors that can occur while building a [`Letter`](crate::Letter).
#[derive(Debug, Error)]
pub enum LetterError {
    #[error("Invalid letter: {0}")]
    Validation(#[from] ValidationError),

    /// An attachment could not be opened or read.
    #[error("Failed to read attachment {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LetterError>;
