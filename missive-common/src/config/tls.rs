//! TLS settings for the implicit TLS layer of the SMTP session.
//!
//! The session always wraps the socket in TLS before any protocol bytes are
//! exchanged; there is no STARTTLS negotiation and therefore no policy to
//! choose. The only knob is certificate validation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TlsConfig {
    /// Whether to accept invalid TLS certificates (self-signed, expired, etc.).
    ///
    /// **SECURITY WARNING**: Setting this to `true` disables certificate validation
    /// and makes the connection vulnerable to man-in-the-middle attacks.
    ///
    /// Default: `false` (validate certificates)
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl TlsConfig {
    /// Validate certificates against the native root store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accept_invalid_certs: false,
        }
    }

    /// Accept any certificate the server presents.
    ///
    /// **WARNING**: Only use in test environments. Do not use in production.
    #[must_use]
    pub const fn insecure() -> Self {
        Self {
            accept_invalid_certs: true,
        }
    }

    #[must_use]
    pub const fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tls_config_default() {
        assert_eq!(TlsConfig::default(), TlsConfig::new());
        assert!(!TlsConfig::default().accepts_invalid_certs());
    }

    #[test]
    fn test_tls_config_insecure() {
        assert!(TlsConfig::insecure().accepts_invalid_certs());
    }
}
