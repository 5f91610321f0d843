//! Raw SMTP replies.

use std::{borrow::Cow, fmt};

/// Whatever a single read returned from the server.
///
/// A reply may hold several lines, a partial line, or nothing at all if the
/// peer closed the connection. The status code is only parsed on request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    raw: Vec<u8>,
}

impl Reply {
    #[must_use]
    pub const fn new(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// `true` when the read returned no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The reply decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// The three digit status code of the last complete line, if it has one.
    ///
    /// Multi-line replies repeat the code on every line, so the last line
    /// is as good as any and is the one that carries the final verdict.
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        self.text().lines().rev().find_map(|line| {
            let code = line.get(..3)?;
            if !code.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            match line.as_bytes().get(3) {
                None | Some(b' ' | b'-') => code.parse().ok(),
                Some(_) => None,
            }
        })
    }

    /// Returns `true` if this reply carries a 2xx or 3xx code.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.code().is_some_and(|code| (200..400).contains(&code))
    }

    /// Returns `true` if this reply carries a 4xx code.
    #[must_use]
    pub fn is_temporary_error(&self) -> bool {
        self.code().is_some_and(|code| (400..500).contains(&code))
    }

    /// Returns `true` if this reply carries a 5xx code.
    #[must_use]
    pub fn is_permanent_error(&self) -> bool {
        self.code().is_some_and(|code| (500..600).contains(&code))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_temporary_error() || self.is_permanent_error()
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text().trim_end())
    }
}

impl From<&[u8]> for Reply {
    fn from(raw: &[u8]) -> Self {
        Self::new(raw.to_vec())
    }
}

impl From<&str> for Reply {
    fn from(raw: &str) -> Self {
        Self::new(raw.as_bytes().to_vec())
    }
}
