use std::fmt;

use serde::{Deserialize, Serialize};

/// Env var that, when set, replaces the configured password.
pub const PASSWORD_ENV: &str = "MISSIVE_PASSWORD";

/// The sender identity used for the `from:` header, `EHLO`, `MAIL FROM` and
/// as the `AUTH LOGIN` username.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub sender: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(sender: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            password: password.into(),
        }
    }

    /// Replace the password with the contents of [`PASSWORD_ENV`], if set.
    #[must_use]
    pub fn with_env_password(mut self) -> Self {
        if let Ok(password) = std::env::var(PASSWORD_ENV) {
            self.password = password;
        }
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .finish()
    }
}
