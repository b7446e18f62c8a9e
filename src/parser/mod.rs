//! Source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state, helpers and errors (tokens → AST)
//! - [`ast`]: AST node definitions and the uniform kind/value/children view
//!
//! # Supported language
//!
//! - Types: `int`, `float`, `string`, `bool`
//! - Statements: declarations, assignments, `if`/`else`, `while`, `for`,
//!   expression statements
//! - Expressions: `+ - * / %`, comparisons, unary `-`, parentheses
//! - Line comments (`//`)
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one function per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{parse_source, ParseError, Parser};
