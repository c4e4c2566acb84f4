//! # Registeel language front end
//!
//! The expression-language front end of the registeel machine: a scanner, a
//! recursive-descent parser, a tree-walking reference evaluator and an
//! AST-to-IR code generator.
//!
//! # Pipeline
//!
//! ```text
//! source text → TokenStream → Expr → Program → machine execution
//! ```
//!
//! Each stage hands a plain data structure to the next; there are no cycles
//! and no shared state. The [`eval`](eval::eval) stage sits outside the
//! pipeline: it computes the expression's value directly from the tree and
//! is used to cross-check the result of executing the compiled program.
//!
//! # Example
//!
//! ```
//! use registeel_lang::{codegen, parser};
//!
//! let expr = parser::parse("1 + 2 * 3").unwrap();
//! let program = codegen::compile(&expr);
//!
//! assert_eq!(registeel_vm::execute(&program, None).unwrap(), 7);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub use ast::{BinOp, Expr};
pub use error::Error;
pub use lexer::TokenStream;
pub use parser::Parser;
pub use token::{Token, TokenKind};

pub mod ast;
pub mod codegen;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;
