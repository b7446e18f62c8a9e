//! Expression parsing implementation
//!
//! # Precedence
//!
//! From loosest to tightest:
//!
//! | Level          | Operators              | Associativity |
//! |----------------|------------------------|---------------|
//! | comparison     | `== != < <= > >=`      | none          |
//! | additive       | `+ -`                  | left          |
//! | multiplicative | `* / %`                | left          |
//! | unary          | prefix `-`             | right         |
//! | primary        | literals, names, `( )` |               |
//!
//! Comparisons do not chain: `a < b < c` is rejected rather than grouped.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_comparison()
    }

    fn comparison_op(&self) -> Option<BinOp> {
        match self.peek() {
            Token::EqEq(_) => Some(BinOp::Eq),
            Token::NotEq(_) => Some(BinOp::Ne),
            Token::Lt(_) => Some(BinOp::Lt),
            Token::Le(_) => Some(BinOp::Le),
            Token::Gt(_) => Some(BinOp::Gt),
            Token::Ge(_) => Some(BinOp::Ge),
            _ => None,
        }
    }

    /// Parse comparison (== != < <= > >=), non-associative
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;

        let Some(op) = self.comparison_op() else {
            return Ok(left);
        };
        let loc = self.current_location();
        self.advance();
        let right = self.parse_additive()?;

        if self.comparison_op().is_some() {
            return Err(self.unexpected("comparison operators cannot be chained"));
        }

        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location: loc,
        })
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        let mut levels = 0;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Plus(loc)) {
                BinOp::Add
            } else if self.match_token(&Token::Minus(loc)) {
                BinOp::Sub
            } else {
                break;
            };

            // Each operator deepens the left spine by one.
            self.enter_nested()?;
            levels += 1;
            let right = Box::new(self.parse_multiplicative()?);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        self.leave_nested(levels);
        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        let mut levels = 0;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Star(loc)) {
                BinOp::Mul
            } else if self.match_token(&Token::Slash(loc)) {
                BinOp::Div
            } else if self.match_token(&Token::Percent(loc)) {
                BinOp::Mod
            } else {
                break;
            };

            self.enter_nested()?;
            levels += 1;
            let right = Box::new(self.parse_unary()?);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        self.leave_nested(levels);
        Ok(left)
    }

    /// Parse unary (prefix -)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Minus(loc)) {
            self.enter_nested()?;
            let operand = Box::new(self.parse_unary()?);
            self.leave_nested(1);
            return Ok(Expr::Unary {
                op: UnOp::Neg,
                operand,
                location: loc,
            });
        }

        self.parse_primary()
    }

    /// Parse primary: identifier, literal, or parenthesized expression
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let expr = match self.peek() {
            Token::Ident(name, _) => Expr::Identifier(name.clone(), loc),
            Token::IntLiteral(n, _) => Expr::Number(*n, loc),
            Token::FloatLiteral(x, _) => Expr::Float(*x, loc),
            Token::StringLiteral(s, _) => Expr::Str(s.clone(), loc),
            Token::LParen(_) => {
                self.advance();
                self.enter_nested()?;
                let inner = self.parse_expression()?;
                self.leave_nested(1);
                self.expect_rparen("after parenthesized expression")?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected("expected an expression")),
        };

        self.advance();
        Ok(expr)
    }
}
