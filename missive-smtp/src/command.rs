//! Commands written by the client, in the order the session sends them.

use std::fmt::{self, Display, Formatter};

use base64::{Engine, engine::general_purpose::STANDARD};

/// A single write made by the session.
///
/// Every command is terminated by a lone `\n`. [`Command::Data`] carries the
/// finalized message in the same write as the `DATA` verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Ehlo(&'a str),
    AuthLogin,
    AuthUsername(&'a str),
    AuthPassword(&'a str),
    MailFrom(&'a str),
    RcptTo(&'a str),
    Data(&'a [u8]),
    Quit,
}

impl Command<'_> {
    /// The exact bytes put on the wire.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Ehlo(id) => format!("EHLO {id}\n").into_bytes(),
            Self::AuthLogin => b"AUTH LOGIN\n".to_vec(),
            Self::AuthUsername(secret) | Self::AuthPassword(secret) => {
                format!("{}\n", STANDARD.encode(secret.as_bytes())).into_bytes()
            }
            Self::MailFrom(from) => format!("MAIL FROM: {from}\n").into_bytes(),
            Self::RcptTo(to) => format!("RCPT TO: {to}\n").into_bytes(),
            Self::Data(message) => {
                let mut bytes = Vec::with_capacity(message.len() + 5);
                bytes.extend_from_slice(b"DATA\n");
                bytes.extend_from_slice(message);
                bytes
            }
            Self::Quit => b"QUIT\n".to_vec(),
        }
    }
}

/// Log-safe rendering: credentials are redacted and message bodies are
/// summarised by size.
impl Display for Command<'_> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ehlo(id) => write!(fmt, "EHLO {id}"),
            Self::AuthLogin => fmt.write_str("AUTH LOGIN"),
            Self::AuthUsername(_) => fmt.write_str("<username>"),
            Self::AuthPassword(_) => fmt.write_str("<password>"),
            Self::MailFrom(from) => write!(fmt, "MAIL FROM: {from}"),
            Self::RcptTo(to) => write!(fmt, "RCPT TO: {to}"),
            Self::Data(message) => write!(fmt, "DATA <{} bytes>", message.len()),
            Self::Quit => fmt.write_str("QUIT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_wire_format() {
        assert_eq!(Command::Ehlo("mail@example.com").to_bytes(), b"EHLO mail@example.com\n");
        assert_eq!(Command::AuthLogin.to_bytes(), b"AUTH LOGIN\n");
        assert_eq!(
            Command::AuthUsername("mail@example.com").to_bytes(),
            b"bWFpbEBleGFtcGxlLmNvbQ==\n"
        );
        assert_eq!(Command::AuthPassword("password").to_bytes(), b"cGFzc3dvcmQ=\n");
        assert_eq!(
            Command::MailFrom("mail@example.com").to_bytes(),
            b"MAIL FROM: mail@example.com\n"
        );
        assert_eq!(Command::RcptTo("a@x.com").to_bytes(), b"RCPT TO: a@x.com\n");
        assert_eq!(Command::Data(b"body\n.\n").to_bytes(), b"DATA\nbody\n.\n");
        assert_eq!(Command::Quit.to_bytes(), b"QUIT\n");
    }

    #[test]
    fn test_display_redacts_credentials() {
        assert_eq!(Command::AuthPassword("hunter2").to_string(), "<password>");
        assert_eq!(Command::AuthUsername("someone").to_string(), "<username>");
        assert_eq!(Command::Data(&[0; 42]).to_string(), "DATA <42 bytes>");
    }
}
