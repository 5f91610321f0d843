//! Configuration types shared by the SMTP session and the `missive` binary.
//!
//! - [`timeouts`]: per-phase timeouts for the client session
//! - [`tls`]: certificate validation settings for the implicit TLS layer
//! - [`credentials`]: sender address and password used for `AUTH LOGIN`

pub mod credentials;
pub mod timeouts;
pub mod tls;

use serde::{Deserialize, Serialize};

pub use credentials::Credentials;
pub use timeouts::SessionTimeouts;
pub use tls::TlsConfig;

/// Where the SMTP server lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Hostname or IP address of the SMTP server.
    pub host: String,

    /// TCP port. The server is expected to speak TLS immediately on it.
    ///
    /// Default: 25
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Name presented for SNI and certificate validation.
    ///
    /// Default: the value of `host`
    #[serde(default)]
    pub server_name: Option<String>,

    #[serde(default)]
    pub tls: TlsConfig,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: defaults::port(),
            server_name: None,
            tls: TlsConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    #[must_use]
    pub const fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// The `host:port` pair used to open the TCP connection.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The name used for SNI, falling back to the host.
    #[must_use]
    pub fn server_name(&self) -> &str {
        self.server_name.as_deref().unwrap_or(&self.host)
    }
}

mod defaults {
    pub const fn port() -> u16 {
        25
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::new("smtp.example.com");
        assert_eq!(config.port, 25);
        assert_eq!(config.address(), "smtp.example.com:25");
        assert_eq!(config.server_name(), "smtp.example.com");
        assert!(!config.tls.accepts_invalid_certs());
    }

    #[test]
    fn test_server_name_override() {
        let config = ServerConfig::new("10.0.0.5")
            .with_port(465)
            .with_server_name("mail.example.com");
        assert_eq!(config.address(), "10.0.0.5:465");
        assert_eq!(config.server_name(), "mail.example.com");
    }

    #[test]
    fn test_server_config_from_ron() {
        let config: ServerConfig = ron::from_str(r#"(host: "smtp.example.com")"#).unwrap();
        assert_eq!(config, ServerConfig::new("smtp.example.com"));

        let config: ServerConfig = ron::from_str(
            r#"(host: "smtp.example.com", port: 465, tls: (accept_invalid_certs: true))"#,
        )
        .unwrap();
        assert_eq!(config.port, 465);
        assert!(config.tls.accepts_invalid_certs());
    }
}
