//! Parse error type.
//!
//! Every failure carries the byte offset at which it was detected. The
//! first error aborts the parse and is returned to the caller unchanged;
//! there is no recovery or error accumulation.

use thiserror::Error;

/// What went wrong, without the position information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// A character that cannot begin or continue any token at the
    /// current grammar position.
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// Input ended inside a string literal before its closing quote.
    #[error("unterminated string")]
    UnterminatedString,
    /// Unrecognized escape sequence or malformed `\u` escape data.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// Numeric literal violates the grammar (leading zero, bare minus,
    /// trailing decimal point, empty exponent).
    #[error("invalid number literal")]
    InvalidNumber,
    /// A `true`/`false`/`null` keyword did not match in full.
    #[error("invalid literal")]
    InvalidLiteral,
    /// Object key not followed by `:`.
    #[error("malformed key-value pair")]
    MalformedKeyValuePair,
    /// Non-whitespace content remains after a complete top-level value.
    #[error("trailing characters after value")]
    TrailingCharacters,
    /// Container nesting exceeded the configured limit.
    #[error("nesting too deep")]
    NestingTooDeep,
}

/// A parse failure at a specific byte offset in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at byte offset {offset}")]
pub struct ParseError {
    kind: ErrorKind,
    offset: usize,
}

impl ParseError {
    /// Create an error of the given kind at the given byte offset.
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// The kind of failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset of the first offending character, or the input length
    /// if the input ended prematurely.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_accessors() {
        let err = ParseError::new(ErrorKind::InvalidNumber, 7);
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
        assert_eq!(err.offset(), 7);
    }

    #[test]
    fn test_error_display_includes_offset() {
        let err = ParseError::new(ErrorKind::UnterminatedString, 12);
        assert_eq!(err.to_string(), "unterminated string at byte offset 12");
    }
}
