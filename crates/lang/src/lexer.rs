//! Defines the [`TokenStream`] type, a single-pass scanner over an
//! expression source string.

use crate::error::Error;
use crate::token::{Token, TokenKind};

/// A stream of [`Token`]s scanned on demand from a borrowed source string.
///
/// The stream owns nothing beyond its read position and a one-token
/// look-ahead cache; the source must outlive it.
///
/// The expression syntax is pure ASCII, so the scanner works directly on
/// bytes and byte offsets.
#[derive(Debug)]
pub struct TokenStream<'src> {
    /// The source bytes (not owned).
    src: &'src [u8],
    /// Current read head.
    pos: usize,
    /// One-token look-ahead cache, filled by [`TokenStream::peek`] and
    /// drained by the next [`TokenStream::next_token`].
    peeked: Option<Token>,
}

impl<'src> TokenStream<'src> {
    /// Creates a stream over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
            peeked: None,
        }
    }

    /// Scans and returns the next token, advancing the stream.
    ///
    /// Once the input is exhausted, every further call returns
    /// [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Result<Token, Error> {
        // Drain the look-ahead cache first.
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }

        while let Some(&c) = self.src.get(self.pos) {
            if !c.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }

        let start = self.pos;
        let Some(&c) = self.src.get(self.pos) else {
            return Ok(Token {
                kind: TokenKind::Eof,
                pos: start,
            });
        };

        if c.is_ascii_digit() {
            return self.scan_number(start);
        }

        self.pos += 1;
        let kind = match c {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            _ => {
                return Err(Error::InvalidCharacter {
                    ch: c as char,
                    pos: start,
                })
            }
        };

        Ok(Token { kind, pos: start })
    }

    /// Peeks at the next token without consuming it.
    ///
    /// Idempotent: repeated peeks return the same token and do not advance
    /// the stream. The cache is invalidated only by the next call to
    /// [`TokenStream::next_token`].
    pub fn peek(&mut self) -> Result<Token, Error> {
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.next_token()?;
        self.peeked = Some(token);
        Ok(token)
    }

    /// Scans a multi-digit decimal literal starting at `start`.
    ///
    /// Accumulation is overflow-checked: a literal that does not fit an
    /// `i64` is an error, never a silent wrap.
    fn scan_number(&mut self, start: usize) -> Result<Token, Error> {
        let mut value: i64 = 0;

        while let Some(&c) = self.src.get(self.pos) {
            if !c.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(c - b'0')))
                .ok_or(Error::IntegerOverflow { pos: start })?;
            self.pos += 1;
        }

        Ok(Token {
            kind: TokenKind::Number(value),
            pos: start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut stream = TokenStream::new(source);
        let mut kinds = Vec::new();
        loop {
            let token = stream.next_token().unwrap();
            kinds.push(token.kind);
            if token.kind == TokenKind::Eof {
                return kinds;
            }
        }
    }

    #[test]
    fn scans_operators_and_numbers() {
        assert_eq!(
            kinds("12 + 3*(45 - 6) / 7"),
            vec![
                TokenKind::Number(12),
                TokenKind::Plus,
                TokenKind::Number(3),
                TokenKind::Star,
                TokenKind::LParen,
                TokenKind::Number(45),
                TokenKind::Minus,
                TokenKind::Number(6),
                TokenKind::RParen,
                TokenKind::Slash,
                TokenKind::Number(7),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn records_byte_positions() {
        let mut stream = TokenStream::new("  12 +");
        assert_eq!(stream.next_token().unwrap().pos, 2);
        assert_eq!(stream.next_token().unwrap().pos, 5);
    }

    #[test]
    fn peek_is_idempotent() {
        let mut stream = TokenStream::new("1 + 2");
        assert_eq!(stream.peek().unwrap().kind, TokenKind::Number(1));
        assert_eq!(stream.peek().unwrap().kind, TokenKind::Number(1));
        assert_eq!(stream.next_token().unwrap().kind, TokenKind::Number(1));
        assert_eq!(stream.peek().unwrap().kind, TokenKind::Plus);
    }

    #[test]
    fn rejects_invalid_characters() {
        let mut stream = TokenStream::new("1 % 2");
        stream.next_token().unwrap();
        assert_eq!(
            stream.next_token(),
            Err(Error::InvalidCharacter { ch: '%', pos: 2 })
        );
    }

    #[test]
    fn rejects_overflowing_literals() {
        // One more digit than i64::MAX = 9223372036854775807.
        let mut stream = TokenStream::new("92233720368547758070");
        assert_eq!(
            stream.next_token(),
            Err(Error::IntegerOverflow { pos: 0 })
        );

        // i64::MAX itself still scans.
        let mut stream = TokenStream::new("9223372036854775807");
        assert_eq!(
            stream.next_token().unwrap().kind,
            TokenKind::Number(i64::MAX)
        );
    }

    #[test]
    fn exhausted_input_keeps_returning_eof() {
        let mut stream = TokenStream::new("");
        assert_eq!(stream.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(stream.next_token().unwrap().kind, TokenKind::Eof);
    }
}
