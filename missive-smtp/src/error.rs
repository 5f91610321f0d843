//! Error types for the SMTP session.

use std::{io, time::Duration};

use thiserror::Error;

use crate::{phase::Phase, reply::Reply};

/// Errors that abort an SMTP session.
///
/// Server-side rejections are only errors when replies are validated (see
/// [`Validating`](crate::channel::Validating)); the default channel passes
/// every reply through untouched.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The TCP connection could not be established.
    #[error("Failed to connect to {address}: {source}")]
    Connection {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The TLS handshake failed or the TLS client could not be configured.
    #[error("TLS error: {0}")]
    Tls(String),

    /// A send or receive failed part way through the transcript.
    #[error("I/O error during {phase}: {source}")]
    ProtocolIo {
        phase: Phase,
        #[source]
        source: io::Error,
    },

    /// A step did not complete within its configured timeout.
    #[error("Timed out during {phase} after {after:?}")]
    Timeout { phase: Phase, after: Duration },

    /// The server answered with a 4xx/5xx code, or with no status code at all.
    #[error("Server rejected {phase}: {reply}")]
    Rejected { phase: Phase, reply: Reply },
}

impl SessionError {
    /// Returns `true` if the session never got as far as sending a command.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Tls(_))
            || matches!(
                self,
                Self::Timeout {
                    phase: Phase::Disconnected | Phase::Connected,
                    ..
                }
            )
    }
}

/// Specialized `Result` type for SMTP session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors() {
        assert!(SessionError::Tls("bad certificate".to_string()).is_transport());
        assert!(
            SessionError::Timeout {
                phase: Phase::Connected,
                after: Duration::from_secs(30),
            }
            .is_transport()
        );
    }

    #[test]
    fn test_protocol_errors_are_not_transport() {
        assert!(
            !SessionError::Timeout {
                phase: Phase::Greeted,
                after: Duration::from_secs(60),
            }
            .is_transport()
        );
        assert!(
            !SessionError::ProtocolIo {
                phase: Phase::Secured,
                source: io::Error::from(io::ErrorKind::BrokenPipe),
            }
            .is_transport()
        );
        assert!(
            !SessionError::Rejected {
                phase: Phase::MailFromSet,
                reply: Reply::from("550 no\r\n"),
            }
            .is_transport()
        );
    }
}
