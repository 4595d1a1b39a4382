//! Error types shared by every crate that accepts user-written cell names.
//!
//! The message format is part of the reporting contract: batch extraction
//! prints `"<text>: [ERROR] <message>"` for every input that fails to parse,
//! so `Display` must stay stable.

use std::{error::Error, fmt};

/// Failure to interpret a string as an A1-style cell reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum A1ParseError {
    /// The text is not a letter run followed by a digit run, or the digit
    /// run does not fit a row index.
    InvalidReference(String),
}

impl A1ParseError {
    pub fn invalid(text: impl Into<String>) -> Self {
        A1ParseError::InvalidReference(text.into())
    }

    /// The offending input, exactly as supplied.
    pub fn text(&self) -> &str {
        match self {
            A1ParseError::InvalidReference(text) => text,
        }
    }
}

impl fmt::Display for A1ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            A1ParseError::InvalidReference(text) => write!(f, "Invalid cell reference: {text}"),
        }
    }
}

impl Error for A1ParseError {}

impl From<A1ParseError> for String {
    fn from(error: A1ParseError) -> Self {
        format!("{error}")
    }
}
