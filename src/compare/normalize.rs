//! AST normalization
//!
//! Rewrites a program so that two snippets differing only in variable names
//! or literal values become identical:
//!
//! - every identifier becomes `var<N>`, numbered by first appearance in a
//!   pre-order walk (a declaration's name is seen before its initializer, an
//!   assignment's target before its value, a left operand before the right);
//! - integer literals become `0`, floats `0.0`, strings `""`.
//!
//! The output is built as a fresh value, children first, and never shares
//! anything with the input. Each [`Normalizer`] owns its own name map.

use crate::config::CANONICAL_NAME_PREFIX;
use crate::parser::ast::*;
use rustc_hash::FxHashMap;

/// Identifier-renaming state for one normalization
#[derive(Debug, Default)]
pub struct Normalizer {
    names: FxHashMap<String, String>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Original name → canonical name, for every identifier seen so far
    pub fn mapping(&self) -> &FxHashMap<String, String> {
        &self.names
    }

    fn canonical(&mut self, name: &str) -> String {
        if let Some(canonical) = self.names.get(name) {
            return canonical.clone();
        }
        let canonical = format!("{}{}", CANONICAL_NAME_PREFIX, self.names.len() + 1);
        self.names.insert(name.to_string(), canonical.clone());
        canonical
    }

    pub fn program(&mut self, program: &Program) -> Program {
        Program {
            body: self.block(&program.body),
        }
    }

    fn block(&mut self, block: &Block) -> Block {
        Block {
            statements: block
                .statements
                .iter()
                .map(|stmt| self.statement(stmt))
                .collect(),
            location: block.location,
        }
    }

    fn declaration(&mut self, decl: &Declaration) -> Declaration {
        let name = self.canonical(&decl.name);
        let init = decl.init.as_ref().map(|init| self.expr(init));
        Declaration {
            var_type: decl.var_type,
            name,
            init,
            location: decl.location,
        }
    }

    fn statement(&mut self, stmt: &Statement) -> Statement {
        match stmt {
            Statement::Declaration(decl) => Statement::Declaration(self.declaration(decl)),
            Statement::Assignment {
                target,
                value,
                location,
            } => {
                let target = self.canonical(target);
                let value = self.expr(value);
                Statement::Assignment {
                    target,
                    value,
                    location: *location,
                }
            }
            Statement::If {
                condition,
                then_block,
                else_block,
                location,
            } => {
                let condition = self.expr(condition);
                let then_block = self.block(then_block);
                let else_block = else_block.as_ref().map(|block| self.block(block));
                Statement::If {
                    condition,
                    then_block,
                    else_block,
                    location: *location,
                }
            }
            Statement::While {
                condition,
                body,
                location,
            } => {
                let condition = self.expr(condition);
                let body = self.block(body);
                Statement::While {
                    condition,
                    body,
                    location: *location,
                }
            }
            Statement::For {
                init,
                condition,
                increment,
                body,
                location,
            } => {
                let init = self.declaration(init);
                let condition = self.expr(condition);
                let increment = self.expr(increment);
                let body = self.block(body);
                Statement::For {
                    init,
                    condition,
                    increment,
                    body,
                    location: *location,
                }
            }
            Statement::Expression(expr) => Statement::Expression(self.expr(expr)),
        }
    }

    fn expr(&mut self, expr: &Expr) -> Expr {
        match expr {
            Expr::Identifier(name, loc) => Expr::Identifier(self.canonical(name), *loc),
            Expr::Number(_, loc) => Expr::Number(0, *loc),
            Expr::Float(_, loc) => Expr::Float(0.0, *loc),
            Expr::Str(_, loc) => Expr::Str(String::new(), *loc),
            Expr::Binary {
                op,
                left,
                right,
                location,
            } => {
                let left = self.expr(left);
                let right = self.expr(right);
                Expr::Binary {
                    op: *op,
                    left: Box::new(left),
                    right: Box::new(right),
                    location: *location,
                }
            }
            Expr::Unary {
                op,
                operand,
                location,
            } => Expr::Unary {
                op: *op,
                operand: Box::new(self.expr(operand)),
                location: *location,
            },
        }
    }
}

/// Normalize `program` with a fresh name map.
pub fn normalize(program: &Program) -> Program {
    Normalizer::new().program(program)
}
