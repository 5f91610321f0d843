//! The client side of one SMTP session.
//!
//! The session runs a single fixed sequence and never branches on what the
//! server says:
//!
//! ```text
//! <greeting>
//! EHLO <sender>
//! AUTH LOGIN
//! <base64 username>
//! <base64 password>
//! MAIL FROM: <sender>
//! RCPT TO: <recipient>        (once per recipient)
//! DATA\n<message>             (a single write)
//! QUIT
//! ```
//!
//! Every write is followed by exactly one read. The connection is closed on
//! every exit path.

use std::{future::Future, time::Duration};

use missive_common::{
    config::{Credentials, ServerConfig, SessionTimeouts},
    incoming, internal, outgoing,
};
use missive_mime::Message;
use tokio::time::timeout;

use crate::{
    channel::{CommandChannel, Validating},
    command::Command,
    connection::{self, Connection, TlsConnection},
    error::{Result, SessionError},
    phase::Phase,
    reply::Reply,
};

/// One step of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// What was written, rendered for logs (credentials redacted). `None`
    /// for the greeting, which is read without sending anything.
    pub command: Option<String>,
    pub reply: Reply,
}

pub struct SmtpSession<C> {
    channel: C,
    phase: Phase,
    timeouts: SessionTimeouts,
    transcript: Vec<Exchange>,
}

impl SmtpSession<TlsConnection> {
    /// Connects to `server` and completes the TLS handshake. The server is
    /// expected to speak TLS immediately; no protocol bytes are exchanged
    /// in the clear.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Connection`] or [`SessionError::Tls`] when the
    /// transport cannot be set up, and [`SessionError::Timeout`] when either
    /// step exceeds its timeout.
    #[tracing::instrument(level = "debug", skip_all, fields(server = %server.address()))]
    pub async fn connect(server: &ServerConfig, timeouts: SessionTimeouts) -> Result<Self> {
        let address = server.address();

        let stream = bounded(
            Phase::Disconnected,
            timeouts.connect(),
            connection::connect_tcp(&address),
        )
        .await?;
        internal!(level = DEBUG, "Connected to {address}");

        let connector = connection::tls_connector(server.tls)?;
        let stream = bounded(
            Phase::Connected,
            timeouts.tls(),
            connection::upgrade_to_tls(&connector, server.server_name(), stream),
        )
        .await?;
        internal!(level = DEBUG, "TLS established with {}", server.server_name());

        Ok(Self::new(Connection::new(stream), timeouts))
    }
}

impl<C: CommandChannel> SmtpSession<C> {
    /// Wraps a channel that is already connected and secured, ready for the
    /// server greeting.
    pub const fn new(channel: C, timeouts: SessionTimeouts) -> Self {
        Self {
            channel,
            phase: Phase::Secured,
            timeouts,
            transcript: Vec::new(),
        }
    }

    /// Switches to a channel that aborts on any 4xx/5xx or missing reply.
    #[must_use]
    pub fn validating(self) -> SmtpSession<Validating<C>> {
        SmtpSession {
            channel: Validating::new(self.channel),
            phase: self.phase,
            timeouts: self.timeouts,
            transcript: self.transcript,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    /// Runs the whole sequence for `message`, then closes the connection.
    ///
    /// Returns the transcript of every reply read. Replies are logged but not
    /// inspected, so a server that rejects the credentials or a recipient
    /// still produces `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the first send, receive or timeout failure. The remaining
    /// steps are skipped, but the connection is still closed.
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(recipients = message.recipients().len(), bytes = message.len())
    )]
    pub async fn deliver(
        mut self,
        credentials: &Credentials,
        message: Message,
    ) -> Result<Vec<Exchange>> {
        let outcome = self.transmit(credentials, &message).await;

        if let Err(err) = self.channel.close().await {
            internal!(level = DEBUG, "Connection did not close cleanly: {err}");
        }
        self.enter(Phase::Closed);

        match outcome {
            Ok(()) => Ok(self.transcript),
            Err(err) => {
                internal!(level = ERROR, "Session aborted: {err}");
                Err(err)
            }
        }
    }

    async fn transmit(&mut self, credentials: &Credentials, message: &Message) -> Result<()> {
        self.greeting().await?;
        self.enter(Phase::Greeted);

        self.exchange(Command::Ehlo(message.sender())).await?;

        self.exchange(Command::AuthLogin).await?;
        self.exchange(Command::AuthUsername(&credentials.sender)).await?;
        self.exchange(Command::AuthPassword(&credentials.password)).await?;
        self.enter(Phase::Authenticated);

        self.exchange(Command::MailFrom(message.sender())).await?;
        self.enter(Phase::MailFromSet);

        for (count, recipient) in message.recipients().iter().enumerate() {
            self.exchange(Command::RcptTo(recipient)).await?;
            self.enter(Phase::RcptToSet(count + 1));
        }

        // DATA and the message travel in one write with no read in between
        self.exchange(Command::Data(message.as_bytes())).await?;
        self.enter(Phase::DataSent);
        self.enter(Phase::MessageSent);

        self.exchange(Command::Quit).await?;

        Ok(())
    }

    async fn greeting(&mut self) -> Result<()> {
        let phase = self.phase;
        let reply = bounded(phase, self.timeouts.command(), self.channel.receive(phase)).await?;
        incoming!(level = INFO, "{}", reply);

        self.transcript.push(Exchange {
            command: None,
            reply,
        });
        Ok(())
    }

    /// Sends `command`, then reads one reply.
    async fn exchange(&mut self, command: Command<'_>) -> Result<()> {
        let phase = self.phase;
        let limit = if matches!(command, Command::Data(_)) {
            self.timeouts.data()
        } else {
            self.timeouts.command()
        };

        outgoing!(level = DEBUG, "{}", command);
        let bytes = command.to_bytes();
        let channel = &mut self.channel;
        let reply = bounded(phase, limit, async move {
            channel.send(phase, &bytes).await?;
            channel.receive(phase).await
        })
        .await?;
        incoming!(level = INFO, "{}", reply);

        self.transcript.push(Exchange {
            command: Some(command.to_string()),
            reply,
        });
        Ok(())
    }

    fn enter(&mut self, phase: Phase) {
        internal!("{} -> {}", self.phase, phase);
        self.phase = phase;
    }
}

/// Runs `step`, failing with [`SessionError::Timeout`] once `limit` elapses.
async fn bounded<T>(
    phase: Phase,
    limit: Duration,
    step: impl Future<Output = Result<T>>,
) -> Result<T> {
    timeout(limit, step)
        .await
        .map_err(|_| SessionError::Timeout {
            phase,
            after: limit,
        })?
}
