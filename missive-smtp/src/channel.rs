//! The "send a command, read the raw reply" seam of the session.
//!
//! [`SmtpSession`](crate::SmtpSession) only ever talks to a
//! [`CommandChannel`]. The stock implementation is
//! [`Connection`](crate::connection::Connection), which passes every reply
//! through unchecked. [`Validating`] layers status code checks on top of any
//! channel without changing the order of the transcript.

use std::{future::Future, io};

use missive_common::internal;

use crate::{
    error::{Result, SessionError},
    phase::Phase,
    reply::Reply,
};

pub trait CommandChannel {
    /// Writes `bytes` in full.
    fn send(&mut self, phase: Phase, bytes: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Performs a single read and returns whatever arrived, possibly nothing.
    fn receive(&mut self, phase: Phase) -> impl Future<Output = Result<Reply>> + Send;

    /// Releases the underlying connection.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// A channel that turns negative or missing replies into errors.
///
/// 2xx and 3xx replies pass; anything else, including a reply without a
/// status code, aborts the session with [`SessionError::Rejected`]. A peer
/// that closes the connection yields [`SessionError::ProtocolIo`].
#[derive(Debug)]
pub struct Validating<C> {
    inner: C,
}

impl<C> Validating<C> {
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: CommandChannel + Send> CommandChannel for Validating<C> {
    async fn send(&mut self, phase: Phase, bytes: &[u8]) -> Result<()> {
        self.inner.send(phase, bytes).await
    }

    async fn receive(&mut self, phase: Phase) -> Result<Reply> {
        let reply = self.inner.receive(phase).await?;

        if reply.is_empty() {
            return Err(SessionError::ProtocolIo {
                phase,
                source: io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "server closed the connection",
                ),
            });
        }

        if !reply.is_positive() {
            internal!(level = WARN, "Rejected during {phase}: {reply}");
            return Err(SessionError::Rejected { phase, reply });
        }

        Ok(reply)
    }

    async fn close(&mut self) -> Result<()> {
        self.inner.close().await
    }
}
