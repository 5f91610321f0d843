//! The body parts of a `multipart/mixed` letter.

use std::fmt;

use crate::encoding::{FILENAME_WORD_LEN, encode_body, fold_encoded_words};

/// Content type used when an attachment does not specify one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// One part of a letter. Every part is transferred as base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// A `text/plain; charset="UTF-8"` part.
    Text { content: String },

    /// A file attachment, shown to the reader as `display_name`.
    Attachment {
        display_name: String,
        content_type: String,
        payload: Vec<u8>,
    },
}

impl Part {
    /// Renders this part, including its leading boundary delimiter.
    #[must_use]
    pub fn render<'a>(&'a self, boundary: &'a str) -> impl fmt::Display + 'a {
        Rendered {
            part: self,
            boundary,
        }
    }
}

struct Rendered<'a> {
    part: &'a Part,
    boundary: &'a str,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--{}", self.boundary)?;

        match self.part {
            Part::Text { content } => {
                writeln!(f, "Content-Type: text/plain; charset=\"UTF-8\"")?;
                writeln!(f, "Content-Transfer-Encoding: base64")?;
                writeln!(f)?;
                f.write_str(&encode_body(content.as_bytes()))
            }
            Part::Attachment {
                display_name,
                content_type,
                payload,
            } => {
                let words = fold_encoded_words(display_name, FILENAME_WORD_LEN);

                writeln!(f, "Content-Type: {content_type};")?;
                write_folded_param(f, "name", &words)?;
                writeln!(f, "Content-Disposition: attachment;")?;
                write_folded_param(f, "filename", &words)?;
                writeln!(f, "Content-Transfer-Encoding: base64")?;
                writeln!(f)?;
                f.write_str(&encode_body(payload))?;
                writeln!(f)
            }
        }
    }
}

/// Writes `name="<words>"` with one encoded word per tab-indented line. The
/// opening quote rides on the first word and the closing quote on the last.
fn write_folded_param(f: &mut fmt::Formatter<'_>, name: &str, words: &[String]) -> fmt::Result {
    let last = words.len().saturating_sub(1);

    for (index, word) in words.iter().enumerate() {
        f.write_str("\t")?;
        if index == 0 {
            write!(f, "{name}=\"")?;
        }
        f.write_str(word)?;
        if index == last {
            f.write_str("\"")?;
        }
        writeln!(f)?;
    }

    Ok(())
}
