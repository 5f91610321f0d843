//! A minimal SMTP client that delivers one finalized message over an
//! implicitly secured connection.
//!
//! ```no_run
//! use missive_common::config::{Credentials, ServerConfig, SessionTimeouts};
//! use missive_mime::Letter;
//! use missive_smtp::SmtpSession;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new("mail@example.com", "password");
//! let mut letter = Letter::create(&credentials.sender, vec!["a@x.com".into()], "Hi")?;
//! letter.add_text("hello");
//!
//! let server = ServerConfig::new("smtp.example.com").with_port(465);
//! let transcript = SmtpSession::connect(&server, SessionTimeouts::default())
//!     .await?
//!     .deliver(&credentials, letter.finalize())
//!     .await?;
//!
//! for exchange in transcript {
//!     println!("{}", exchange.reply);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod command;
pub mod connection;
pub mod error;
pub mod phase;
pub mod reply;
pub mod session;

pub use channel::{CommandChannel, Validating};
pub use connection::{Connection, READ_BUFFER_SIZE, TlsConnection};
pub use error::{Result, SessionError};
pub use phase::Phase;
pub use reply::Reply;
pub use session::{Exchange, SmtpSession};
