//! The letter description: who receives it, its subject and its attachments.
//!
//! Stored as JSON, keyed the way existing `conf/config.json` files are:
//!
//! ```json
//! { "to": ["a@x.com"], "Subject": "Hi", "Attachments": ["report.pdf"] }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MissiveError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSource {
    #[serde(rename = "to")]
    pub recipients: Vec<String>,

    #[serde(rename = "Subject")]
    pub subject: String,

    /// Attached in order; each path is also the displayed filename.
    #[serde(rename = "Attachments", default)]
    pub attachments: Vec<PathBuf>,
}

impl LetterSource {
    /// Reads and parses the letter source at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MissiveError::Config`] if the file cannot be read or is not
    /// a valid letter source.
    pub fn load(path: &Path) -> Result<Self, MissiveError> {
        let content =
            std::fs::read_to_string(path).map_err(|err| MissiveError::config(path, err))?;

        serde_json::from_str(&content).map_err(|err| MissiveError::config(path, err))
    }
}
