//! Timeout configuration for the client session.
//!
//! The session is strictly sequential, so every timeout bounds a single
//! blocking step. The defaults are generous: they only change behaviour when
//! the server stalls.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimeouts {
    /// Timeout for establishing the TCP connection.
    ///
    /// Default: 30 seconds
    #[serde(default = "defaults::connect_secs")]
    pub connect_secs: u64,

    /// Timeout for the TLS handshake.
    ///
    /// Default: 30 seconds
    #[serde(default = "defaults::tls_secs")]
    pub tls_secs: u64,

    /// Timeout for each command write and its reply read.
    ///
    /// Default: 60 seconds
    #[serde(default = "defaults::command_secs")]
    pub command_secs: u64,

    /// Timeout for the `DATA` write carrying the whole message, and its reply.
    ///
    /// Default: 300 seconds (5 minutes)
    #[serde(default = "defaults::data_secs")]
    pub data_secs: u64,
}

impl SessionTimeouts {
    #[must_use]
    pub const fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    #[must_use]
    pub const fn tls(&self) -> Duration {
        Duration::from_secs(self.tls_secs)
    }

    #[must_use]
    pub const fn command(&self) -> Duration {
        Duration::from_secs(self.command_secs)
    }

    #[must_use]
    pub const fn data(&self) -> Duration {
        Duration::from_secs(self.data_secs)
    }
}

impl Default for SessionTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: defaults::connect_secs(),
            tls_secs: defaults::tls_secs(),
            command_secs: defaults::command_secs(),
            data_secs: defaults::data_secs(),
        }
    }
}

mod defaults {
    pub const fn connect_secs() -> u64 {
        30
    }
    pub const fn tls_secs() -> u64 {
        30
    }
    pub const fn command_secs() -> u64 {
        60
    }
    pub const fn data_secs() -> u64 {
        300 // 5 minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_timeouts_defaults() {
        let timeouts = SessionTimeouts::default();
        assert_eq!(timeouts.connect(), Duration::from_secs(30));
        assert_eq!(timeouts.tls(), Duration::from_secs(30));
        assert_eq!(timeouts.command(), Duration::from_secs(60));
        assert_eq!(timeouts.data(), Duration::from_secs(300));
    }

    #[test]
    fn test_session_timeouts_partial_ron() {
        let timeouts: SessionTimeouts = ron::from_str("(command_secs: 5)").unwrap();
        assert_eq!(timeouts.command_secs, 5);
        assert_eq!(timeouts.data_secs, 300);
    }
}
