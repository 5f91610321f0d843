//! Encode-only MIME support for a single outgoing letter.
//!
//! A [`Letter`] is a typed list of [`Part`]s. Serializing it produces a
//! `multipart/mixed` document with RFC 2047 encoded `Subject` and filename
//! headers and base64 bodies, terminated by the closing boundary and the
//! lone `.` line that ends SMTP `DATA`.

pub mod encoding;
pub mod error;
pub mod letter;
pub mod part;

pub use error::{LetterError, ValidationError};
pub use letter::{DEFAULT_BOUNDARY, Letter, Message};
pub use part::{DEFAULT_CONTENT_TYPE, Part};
