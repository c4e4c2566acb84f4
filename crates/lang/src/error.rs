//! Defines the [`Error`] type of the crate.

/// An error that might occur while lexing, parsing or evaluating an
/// expression.
///
/// Positions are byte offsets into the source string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The scanner met a character that starts no token.
    #[error("invalid character {ch:?} at position {pos}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset of the character in the source.
        pos: usize,
    },

    /// An integer literal does not fit a signed 64-bit value.
    #[error("integer literal too large at position {pos}")]
    IntegerOverflow {
        /// Byte offset of the first digit of the literal.
        pos: usize,
    },

    /// The parser met a token it cannot use here.
    #[error("expected {expected} but found '{found}' at position {pos}")]
    UnexpectedToken {
        /// What the grammar required at this point.
        expected: &'static str,
        /// Name of the token actually found.
        found: &'static str,
        /// Byte offset of the found token.
        pos: usize,
    },

    /// A valid expression was followed by more tokens instead of the end of
    /// input.
    #[error("unexpected token '{found}' after expression at position {pos}")]
    TrailingInput {
        /// Name of the trailing token.
        found: &'static str,
        /// Byte offset of the trailing token.
        pos: usize,
    },

    /// The reference evaluator met a division whose right operand is zero.
    #[error("division by zero")]
    DivisionByZero,
}
