//! Flat semantic validation
//!
//! Tracks declarations and uses of variables over a whole program:
//! - [`symbols`]: the single-scope symbol table
//! - [`checker`]: the walker producing errors and warnings
//!
//! No type checking is done; types are only recorded.

pub mod checker;
pub mod symbols;

pub use checker::{Checker, SemanticError, SemanticWarning};
pub use symbols::{Symbol, SymbolTable};

use crate::parser::ast::Program;
use serde::Serialize;

/// Message reported when there is no program to analyze
pub const NO_AST_MESSAGE: &str = "No AST provided for semantic analysis";

/// Outcome of one semantic analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SemanticReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub symbol_table: SymbolTable,
}

impl SemanticReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Analyze `program` with a fresh symbol table.
pub fn analyze(program: Option<&Program>) -> SemanticReport {
    match program {
        Some(program) => Checker::new().check(program),
        None => SemanticReport {
            errors: vec![NO_AST_MESSAGE.to_string()],
            ..SemanticReport::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program() {
        let report = analyze(None);
        assert_eq!(report.errors, [NO_AST_MESSAGE]);
        assert!(report.warnings.is_empty());
        assert!(report.symbol_table.is_empty());
    }
}
