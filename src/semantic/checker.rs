//! Declaration/use checker
//!
//! A single pre-order walk over the program with one flat [`SymbolTable`].
//! Problems found during the walk are collected, never raised; the walk
//! always runs to the end. Unused and uninitialized warnings are computed
//! from the table once the walk is done.

use super::symbols::{Symbol, SymbolTable};
use super::SemanticReport;
use crate::parser::ast::*;
use std::fmt;
use thiserror::Error;

/// Semantic errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Redeclaration of variable '{0}'")]
    Redeclaration(String),
    #[error("Undeclared variable '{0}'")]
    Undeclared(String),
}

/// Semantic warnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticWarning {
    Unused(String),
    Uninitialized(String),
}

impl fmt::Display for SemanticWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticWarning::Unused(name) => write!(f, "Unused variable '{}'", name),
            SemanticWarning::Uninitialized(name) => {
                write!(f, "Variable '{}' declared but not initialized", name)
            }
        }
    }
}

/// Walk state for one analysis
#[derive(Debug, Default)]
pub struct Checker {
    symbols: SymbolTable,
    errors: Vec<SemanticError>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `program` and produce the final report
    pub fn check(mut self, program: &Program) -> SemanticReport {
        self.block(&program.body);

        let warnings = self.warnings();
        SemanticReport {
            errors: self.errors.iter().map(ToString::to_string).collect(),
            warnings: warnings.iter().map(ToString::to_string).collect(),
            symbol_table: self.symbols,
        }
    }

    fn warnings(&self) -> Vec<SemanticWarning> {
        let mut warnings = Vec::new();
        for (name, symbol) in self.symbols.iter() {
            if !symbol.used {
                warnings.push(SemanticWarning::Unused(name.to_string()));
            }
            if !symbol.initialized {
                warnings.push(SemanticWarning::Uninitialized(name.to_string()));
            }
        }
        warnings
    }

    fn block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.statement(stmt);
        }
    }

    fn declaration(&mut self, decl: &Declaration) {
        let symbol = Symbol::new(decl.var_type, decl.init.is_some());
        if !self.symbols.declare(&decl.name, symbol) {
            self.errors.push(SemanticError::Redeclaration(decl.name.clone()));
            return;
        }
        if let Some(init) = &decl.init {
            self.expr(init);
        }
    }

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Declaration(decl) => self.declaration(decl),
            Statement::Assignment { target, value, .. } => {
                // The right-hand side is skipped when the target is unknown.
                if self.symbols.mark_used(target) {
                    self.expr(value);
                } else {
                    self.errors.push(SemanticError::Undeclared(target.clone()));
                }
            }
            Statement::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                self.expr(condition);
                self.block(then_block);
                if let Some(else_block) = else_block {
                    self.block(else_block);
                }
            }
            Statement::While {
                condition, body, ..
            } => {
                self.expr(condition);
                self.block(body);
            }
            Statement::For {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                self.declaration(init);
                self.expr(condition);
                self.expr(increment);
                self.block(body);
            }
            Statement::Expression(expr) => self.expr(expr),
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(name, _) => {
                if !self.symbols.mark_used(name) {
                    self.errors.push(SemanticError::Undeclared(name.clone()));
                }
            }
            Expr::Number(..) | Expr::Float(..) | Expr::Str(..) => {}
            Expr::Binary { left, right, .. } => {
                self.expr(left);
                self.expr(right);
            }
            Expr::Unary { operand, .. } => self.expr(operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn check(source: &str) -> SemanticReport {
        Checker::new().check(&parse_source(source).unwrap())
    }

    #[test]
    fn test_declared_used_initialized() {
        let report = check("int a = 5; int b; int c = a + b;");

        assert!(report.errors.is_empty());
        assert_eq!(
            report.warnings,
            [
                "Variable 'b' declared but not initialized",
                "Unused variable 'c'"
            ]
        );

        let table = &report.symbol_table;
        assert_eq!(table.len(), 3);
        let flags = |name: &str| table.get(name).map(|s| (s.used, s.initialized));
        assert_eq!(flags("a"), Some((true, true)));
        assert_eq!(flags("b"), Some((true, false)));
        assert_eq!(flags("c"), Some((false, true)));
    }

    #[test]
    fn test_undeclared_assignment() {
        let report = check("a = 5;");
        assert_eq!(report.errors, ["Undeclared variable 'a'"]);
        assert!(report.symbol_table.is_empty());
    }

    #[test]
    fn test_undeclared_assignment_skips_right_hand_side() {
        let report = check("a = b;");
        assert_eq!(report.errors, ["Undeclared variable 'a'"]);
    }

    #[test]
    fn test_redeclaration() {
        let report = check("int a; int a;");
        assert_eq!(report.errors, ["Redeclaration of variable 'a'"]);
        assert_eq!(report.symbol_table.len(), 1);
    }

    #[test]
    fn test_redeclaration_keeps_first_type_and_skips_initializer() {
        let report = check("int a; float a = missing;");
        assert_eq!(report.errors, ["Redeclaration of variable 'a'"]);
        assert_eq!(
            report.symbol_table.get("a").map(|s| s.var_type),
            Some(TypeName::Int)
        );
    }

    #[test]
    fn test_undeclared_reference_in_expression() {
        let report = check("int a = b + c;");
        assert_eq!(
            report.errors,
            ["Undeclared variable 'b'", "Undeclared variable 'c'"]
        );
    }

    #[test]
    fn test_assignment_marks_target_used() {
        let report = check("int a; a = 1;");
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings, ["Variable 'a' declared but not initialized"]);
    }

    #[test]
    fn test_single_scope_for_blocks() {
        // Blocks do not open scopes: the inner declaration clashes and the
        // loop variable stays visible afterwards.
        let report = check(
            "int x = 0; if (x == 0) { int x = 1; } for (int i = 0; i < 3; i + 1) { x = i; } i;",
        );
        assert_eq!(report.errors, ["Redeclaration of variable 'x'"]);
        assert!(report.symbol_table.get("i").is_some_and(|s| s.used));
    }

    #[test]
    fn test_reference_before_declaration_is_undeclared() {
        let report = check("while (n > 0) { int n = 1; }");
        assert_eq!(report.errors, ["Undeclared variable 'n'"]);
        assert_eq!(report.warnings, ["Unused variable 'n'"]);
    }
}
