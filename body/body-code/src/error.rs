//! Error types for shape code decoding.

use thiserror::Error;

/// Errors that can occur while decoding a shape code.
///
/// Encoding is total and never fails; only decoding validates input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodeError {
    /// The code string is empty.
    #[error("shape code is empty")]
    Empty,

    /// The leading body-type tag is not a known body type.
    #[error("unknown body-type tag '{tag}'")]
    UnknownBodyTag {
        /// The unrecognized tag character.
        tag: char,
    },

    /// The code length does not match the expected key set.
    #[error("shape code length mismatch: expected {expected} characters for {key_count} keys, found {found}")]
    LengthMismatch {
        /// Expected total code length.
        expected: usize,
        /// Number of shape keys the caller supplied.
        key_count: usize,
        /// Actual code length.
        found: usize,
    },

    /// A character is outside the base-36 alphabet.
    #[error("invalid shape code digit '{digit}'")]
    InvalidDigit {
        /// The offending character.
        digit: char,
    },

    /// The trailing checksum does not match the decoded payload.
    #[error("shape code checksum mismatch")]
    ChecksumMismatch,
}

/// Result type for shape code operations.
pub type CodeResult<T> = Result<T, CodeError>;
