//! Scanner errors.
//!
//! End of source is an ordinary error value here, not a panic or a sentinel.
//! Several readers treat it as non-fatal in specific positions (a token that
//! runs into end of source, a `\r` with no following `\n`), and they do so by
//! matching on [`ScanError::EndOfSource`] explicitly.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type for every fallible scanner operation.
pub type ScanResult<T> = Result<T, ScanError>;

/// Lexical shape a numeric reader tried to recognize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenShape {
    /// One or more decimal digits.
    Digits,
    /// Digits with no sign.
    Unsigned,
    /// Digits with an optional leading `-`.
    Signed,
    /// Optional `-`, optional digits, optional `.` and fraction digits.
    Decimal,
}

impl fmt::Display for TokenShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenShape::Digits => "digits",
            TokenShape::Unsigned => "unsigned integer",
            TokenShape::Signed => "signed integer",
            TokenShape::Decimal => "decimal number",
        })
    }
}

/// Errors produced by [`Scanner`](crate::Scanner) operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A read or peek needed one more character and the source had none.
    #[error("unexpected end of source")]
    EndOfSource,

    /// The next characters do not form the requested token shape.
    ///
    /// Any characters consumed while trying have already been pushed back.
    #[error("malformed {0} token")]
    Malformed(TokenShape),

    /// A well-formed token does not fit the requested type.
    #[error("cannot convert `{token}` to {target}: {reason}")]
    Conversion {
        /// The token text, which stays consumed.
        token: String,
        /// Name of the requested type.
        target: &'static str,
        /// Message from the conversion routine.
        reason: String,
    },

    /// `read_until` / `read_through` was given an empty delimiter.
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    /// The character source itself failed.
    #[error("character source failed: {0}")]
    Source(#[from] io::Error),
}

impl ScanError {
    /// Returns `true` for [`ScanError::EndOfSource`].
    pub fn is_end_of_source(&self) -> bool {
        matches!(self, ScanError::EndOfSource)
    }

    /// Returns `true` for [`ScanError::Malformed`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, ScanError::Malformed(_))
    }
}
