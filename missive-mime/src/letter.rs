//! Letter builder producing a hand-rolled `multipart/mixed` document.

use std::{fmt, path::Path};

use missive_common::internal;

use crate::{
    encoding::{SUBJECT_WORD_LEN, fold_encoded_words},
    error::{LetterError, Result, ValidationError},
    part::{DEFAULT_CONTENT_TYPE, Part},
};

/// Boundary used when none is configured.
pub const DEFAULT_BOUNDARY: &str = "someseparator";

/// A letter under construction.
///
/// Parts are appended in call order and never removed. [`Letter::finalize`]
/// consumes the letter, so nothing can be added once the closing boundary
/// has been written.
///
/// # Examples
///
/// ```
/// use missive_mime::Letter;
///
/// let mut letter = Letter::create("me@example.com", vec!["you@example.com".into()], "Hi")?;
/// letter.add_text("hello");
/// let message = letter.finalize();
///
/// assert!(message.as_bytes().ends_with(b"--someseparator--\n.\n"));
/// # Ok::<(), missive_mime::LetterError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    sender: String,
    recipients: Vec<String>,
    subject: String,
    boundary: String,
    parts: Vec<Part>,
}

impl Letter {
    /// Starts a letter from `sender` to `recipients`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoRecipients`] if `recipients` is empty and
    /// [`ValidationError::EmptySubject`] if `subject` is empty or blank.
    pub fn create(
        sender: impl Into<String>,
        recipients: Vec<String>,
        subject: impl Into<String>,
    ) -> Result<Self> {
        let subject = subject.into();

        if recipients.is_empty() {
            return Err(ValidationError::NoRecipients.into());
        }

        if subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject.into());
        }

        Ok(Self {
            sender: sender.into(),
            recipients,
            subject,
            boundary: DEFAULT_BOUNDARY.to_string(),
            parts: Vec::new(),
        })
    }

    /// Replaces the boundary token. It is not checked against the content.
    #[must_use]
    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = boundary.into();
        self
    }

    /// Appends a plain text part. Calling this twice adds two parts.
    pub fn add_text(&mut self, content: impl Into<String>) -> &mut Self {
        let content = content.into();
        internal!("Adding text part of {} bytes", content.len());
        self.parts.push(Part::Text { content });
        self
    }

    /// Reads `path` and appends it as an `application/octet-stream` attachment.
    ///
    /// # Errors
    ///
    /// Returns [`LetterError::Io`] if the file cannot be read. The letter is
    /// left unchanged.
    pub fn add_attachment(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.add_attachment_with_type(path, DEFAULT_CONTENT_TYPE)
    }

    /// Reads `path` and appends it as an attachment of `content_type`.
    ///
    /// The displayed filename is the path exactly as given, directories
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`LetterError::Io`] if the file cannot be read. The letter is
    /// left unchanged.
    pub fn add_attachment_with_type(
        &mut self,
        path: impl AsRef<Path>,
        content_type: impl Into<String>,
    ) -> Result<&mut Self> {
        let path = path.as_ref();
        let payload = std::fs::read(path).map_err(|source| LetterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.add_attachment_bytes(path.to_string_lossy(), content_type, payload))
    }

    /// Appends an attachment whose bytes are already in memory.
    pub fn add_attachment_bytes(
        &mut self,
        display_name: impl Into<String>,
        content_type: impl Into<String>,
        payload: Vec<u8>,
    ) -> &mut Self {
        let display_name = display_name.into();
        internal!(
            "Adding attachment {display_name} of {} bytes",
            payload.len()
        );
        self.parts.push(Part::Attachment {
            display_name,
            content_type: content_type.into(),
            payload,
        });
        self
    }

    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }

    #[must_use]
    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Writes the closing boundary and the lone `.` line, producing the
    /// bytes that follow `DATA`.
    #[must_use]
    pub fn finalize(self) -> Message {
        let bytes = format!("{self}--{}--\n.\n", self.boundary).into_bytes();
        internal!(
            "Finalised letter with {} parts, {} bytes",
            self.parts.len(),
            bytes.len()
        );

        Message {
            sender: self.sender,
            recipients: self.recipients,
            bytes,
        }
    }
}

/// Header block followed by every part, without the closing boundary.
impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "from: {}", self.sender)?;
        // Only the first recipient is shown; the envelope carries the rest
        writeln!(f, "to: {}", self.recipients[0])?;

        f.write_str("Subject: ")?;
        for (index, word) in fold_encoded_words(&self.subject, SUBJECT_WORD_LEN)
            .iter()
            .enumerate()
        {
            if index != 0 {
                f.write_str("\t")?;
            }
            writeln!(f, "{word}")?;
        }

        writeln!(f, "MIME-Version: 1.0")?;
        // The boundary value is left unterminated
        writeln!(f, "Content-Type: multipart/mixed; boundary=\"{}", self.boundary)?;
        writeln!(f)?;

        for part in &self.parts {
            write!(f, "{}", part.render(&self.boundary))?;
        }

        Ok(())
    }
}

/// A finalized letter together with its SMTP envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: String,
    recipients: Vec<String>,
    bytes: Vec<u8>,
}

impl Message {
    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Envelope recipients, in the order they were given.
    #[must_use]
    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
