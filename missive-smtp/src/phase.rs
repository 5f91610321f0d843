use std::fmt::{Display, Formatter};

/// Where an [`SmtpSession`](crate::SmtpSession) is in its fixed sequence.
///
/// Phases only move forward. Each one is entered once the step that leads to
/// it has completed, so an error reports the phase the session was in when
/// the next step failed.
#[derive(PartialEq, PartialOrd, Eq, Hash, Debug, Clone, Copy, Default)]
pub enum Phase {
    #[default]
    Disconnected,
    Connected,
    Secured,
    Greeted,
    Authenticated,
    MailFromSet,
    /// Number of `RCPT TO` commands sent so far.
    RcptToSet(usize),
    DataSent,
    MessageSent,
    Closed,
}

impl Display for Phase {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::Disconnected => fmt.write_str("Disconnected"),
            Self::Connected => fmt.write_str("Connected"),
            Self::Secured => fmt.write_str("Secured"),
            Self::Greeted => fmt.write_str("Greeted"),
            Self::Authenticated => fmt.write_str("Authenticated"),
            Self::MailFromSet => fmt.write_str("MAIL FROM"),
            Self::RcptToSet(count) => write!(fmt, "RCPT TO ({count})"),
            Self::DataSent => fmt.write_str("DATA"),
            Self::MessageSent => fmt.write_str("Message Sent"),
            Self::Closed => fmt.write_str("Closed"),
        }
    }
}
