//! Recursive-descent parser for the expression grammar.
//!
//! ```text
//! expr   → term   (('+' | '-') term)*
//! term   → factor (('*' | '/') factor)*
//! factor → NUMBER | '(' expr ')'
//! ```
//!
//! The two-level split gives `*` and `/` higher precedence than `+` and
//! `-`; the iterative loops make both levels left-associative.

use crate::ast::{BinOp, Expr};
use crate::error::Error;
use crate::lexer::TokenStream;
use crate::token::TokenKind;

/// A recursive-descent parser over a [`TokenStream`].
#[derive(Debug)]
pub struct Parser<'src> {
    tokens: TokenStream<'src>,
}

impl<'src> Parser<'src> {
    /// Creates a parser over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: TokenStream::new(source),
        }
    }

    /// Parses the whole source as a single expression.
    ///
    /// The entire input must be consumed: tokens trailing a valid
    /// expression are an error.
    pub fn parse(mut self) -> Result<Expr, Error> {
        let root = self.expr()?;

        let token = self.tokens.peek()?;
        if token.kind != TokenKind::Eof {
            return Err(Error::TrailingInput {
                found: token.kind.name(),
                pos: token.pos,
            });
        }

        Ok(root)
    }

    /// `expr → term (('+' | '-') term)*`
    fn expr(&mut self) -> Result<Expr, Error> {
        let mut left = self.term()?;

        loop {
            let op = match self.tokens.peek()?.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.tokens.next_token()?;

            let right = self.term()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// `term → factor (('*' | '/') factor)*`
    fn term(&mut self) -> Result<Expr, Error> {
        let mut left = self.factor()?;

        loop {
            let op = match self.tokens.peek()?.kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.tokens.next_token()?;

            let right = self.factor()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// `factor → NUMBER | '(' expr ')'`
    fn factor(&mut self) -> Result<Expr, Error> {
        let token = self.tokens.next_token()?;

        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),

            TokenKind::LParen => {
                let inner = self.expr()?;

                let close = self.tokens.next_token()?;
                if close.kind != TokenKind::RParen {
                    return Err(Error::UnexpectedToken {
                        expected: "')'",
                        found: close.kind.name(),
                        pos: close.pos,
                    });
                }

                Ok(inner)
            }

            kind => Err(Error::UnexpectedToken {
                expected: "a number or '('",
                found: kind.name(),
                pos: token.pos,
            }),
        }
    }
}

/// Parses `source` into an expression tree.
pub fn parse(source: &str) -> Result<Expr, Error> {
    Parser::new(source).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: i64) -> Expr {
        Expr::Number(value)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("1 + 2 * 3").unwrap(),
            Expr::binary(BinOp::Add, num(1), Expr::binary(BinOp::Mul, num(2), num(3))),
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(
            parse("(1 + 2) * 3").unwrap(),
            Expr::binary(BinOp::Mul, Expr::binary(BinOp::Add, num(1), num(2)), num(3)),
        );
    }

    #[test]
    fn same_precedence_associates_left() {
        assert_eq!(
            parse("1 - 2 - 3").unwrap(),
            Expr::binary(BinOp::Sub, Expr::binary(BinOp::Sub, num(1), num(2)), num(3)),
        );
        assert_eq!(
            parse("8 / 4 / 2").unwrap(),
            Expr::binary(BinOp::Div, Expr::binary(BinOp::Div, num(8), num(4)), num(2)),
        );
    }

    #[test]
    fn dangling_operator_is_rejected() {
        assert_eq!(
            parse("1 +"),
            Err(Error::UnexpectedToken {
                expected: "a number or '('",
                found: "EOF",
                pos: 3,
            })
        );
    }

    #[test]
    fn unclosed_parenthesis_is_rejected() {
        assert_eq!(
            parse("(1 + 2"),
            Err(Error::UnexpectedToken {
                expected: "')'",
                found: "EOF",
                pos: 6,
            })
        );
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert_eq!(
            parse("1 2"),
            Err(Error::TrailingInput {
                found: "NUMBER",
                pos: 2,
            })
        );
    }

    #[test]
    fn leading_operator_is_rejected() {
        assert_eq!(
            parse(")"),
            Err(Error::UnexpectedToken {
                expected: "a number or '('",
                found: ")",
                pos: 0,
            })
        );
    }

    #[test]
    fn lexer_errors_bubble_up() {
        assert_eq!(
            parse("1 + $"),
            Err(Error::InvalidCharacter { ch: '$', pos: 4 })
        );
    }
}
