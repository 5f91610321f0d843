//! Sends one letter, described by a JSON source file and a text body, to an
//! SMTP server over implicit TLS.

pub mod controller;
pub mod error;
pub mod source;

pub use controller::Missive;
pub use error::MissiveError;
pub use source::LetterSource;
