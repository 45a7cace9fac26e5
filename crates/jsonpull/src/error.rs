//! Error kinds and the [`ParserError`] type returned by fallible parser
//! operations.

use alloc::string::String;

use thiserror::Error;

/// The closed set of ways a parser operation can fail.
///
/// `Internal` signals a violated invariant (a bug in this crate); every
/// other variant is a legitimate, user-facing outcome that a caller is
/// expected to handle.
///
/// The discriminants are stable and are used verbatim as process exit codes
/// by the validator CLI (see `jsonpull-cli`).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// An allocation failed while growing a chunk or the token buffer.
    #[error("out of memory")]
    OutOfMemory = 1,
    /// The lexer or grammar driver rejected the next byte.
    #[error("unexpected input")]
    UnexpectedInput = 2,
    /// The document ended with an incomplete structure after `finish()`.
    #[error("incomplete data")]
    IncompleteData = 3,
    /// A value accessor was called with no current token, or a token of the
    /// wrong kind.
    #[error("no value available for the current token")]
    NoValue = 4,
    /// A numeric accessor could not represent the token's value.
    #[error("value out of range")]
    OutOfRange = 5,
    /// Nesting would exceed `ParserOptions::max_depth`.
    #[error("maximum nesting depth exceeded")]
    MaxDepth = 6,
    /// An internal invariant was violated; this is always a bug.
    #[error("internal parser invariant violated")]
    Internal = 7,
}

/// An error produced by the parser, carrying the [`ErrorKind`], a
/// human-readable message, and the byte offset (counted from the first byte
/// ever fed) at which the error was detected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at byte {offset}: {message}")]
pub struct ParserError {
    pub kind: ErrorKind,
    message: String,
    pub offset: usize,
}

impl ParserError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            offset,
        }
    }

    /// The human-readable message, independent of [`ErrorKind`]'s own
    /// `Display` impl.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

