//! # Introduction
//!
//! astsim measures how structurally similar two snippets of a small C-like
//! language are, and checks a single snippet for declaration/use mistakes.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST ─┬→ Normalizer → Tree distance → Similarity
//!                                └→ Semantic checker → Errors, warnings, symbols
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds a typed AST, viewable as a
//!    uniform kind/value/children tree.
//! 2. [`compare`]: renames identifiers and erases literal values, then
//!    compares trees with an order-preserving edit distance.
//! 3. [`semantic`]: a single-scope symbol table walk reporting redeclared,
//!    undeclared, unused and uninitialized variables.
//! 4. [`api`]: the call-level operations (`tokenize`, `parse`, `compare`,
//!    `analyze`) returning serializable values.
//! 5. [`report`]: plain-text rendering used by the command-line front end.
//!
//! ## Language
//!
//! Types: `int`, `float`, `string`, `bool`.
//! Statements: declarations, assignments, `if/else`, `while`, `for`,
//! expression statements. Blocks always use braces.

pub mod api;
pub mod compare;
pub mod config;
pub mod parser;
pub mod report;
pub mod semantic;
