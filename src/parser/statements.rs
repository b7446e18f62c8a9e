//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement_list ::= statement { statement }
//! statement      ::= declaration | assignment | if_stmt | while_stmt
//!                  | for_stmt | expr_stmt
//! declaration    ::= type IDENT [ '=' expression ] ';'
//! assignment     ::= IDENT '=' expression ';'
//! if_stmt        ::= 'if' '(' expression ')' '{' statement_list '}'
//!                    [ 'else' '{' statement_list '}' ]
//! while_stmt     ::= 'while' '(' expression ')' '{' statement_list '}'
//! for_stmt       ::= 'for' '(' declaration expression ';' expression ')'
//!                    '{' statement_list '}'
//! expr_stmt      ::= expression ';'
//! ```
//!
//! The `for` increment is an expression, so `i = i + 1` cannot appear there.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse one or more statements, stopping when `at_end` holds
    pub(crate) fn parse_statement_list(
        &mut self,
        at_end: impl Fn(&Parser) -> bool,
    ) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![self.parse_statement()?];

        while !at_end(self) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse `{ statement_list }`
    pub(crate) fn parse_block(&mut self, ctx: &str) -> Result<Block, ParseError> {
        self.expect_lbrace(ctx)?;
        let location = self.previous_location();
        self.enter_nested()?;
        let statements = self.parse_statement_list(|parser| {
            parser.check(&Token::RBrace(parser.current_location()))
        })?;
        self.leave_nested(1);
        self.expect_rbrace("after block")?;

        Ok(Block {
            statements,
            location,
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();

        if self.type_keyword().is_some() {
            return Ok(Statement::Declaration(self.parse_declaration()?));
        }

        if self.match_token(&Token::If(loc)) {
            return self.parse_if_statement();
        }

        if self.match_token(&Token::While(loc)) {
            return self.parse_while_statement();
        }

        if self.match_token(&Token::For(loc)) {
            return self.parse_for_statement();
        }

        // Assignment: identifier followed by '='
        if matches!(self.peek(), Token::Ident(..))
            && matches!(self.peek_ahead(1), Some(Token::Eq(_)))
        {
            return self.parse_assignment();
        }

        // Otherwise, it's an expression statement
        if self.is_at_end() || self.check(&Token::RBrace(loc)) {
            return Err(self.unexpected("expected a statement"));
        }
        let expr = self.parse_expression()?;
        self.expect_semicolon("after expression")?;
        Ok(Statement::Expression(expr))
    }

    /// Parse `type name [= expr];`
    pub(crate) fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let location = self.current_location();
        let var_type = self
            .type_keyword()
            .ok_or_else(|| self.unexpected("expected a type"))?;
        self.advance();

        let name = self.expect_identifier("in declaration")?;

        let init = if self.match_token(&Token::Eq(self.current_location())) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_semicolon("after declaration")?;

        Ok(Declaration {
            var_type,
            name,
            init,
            location,
        })
    }

    /// Parse `name = expr;`
    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let location = self.current_location();
        let target = self.expect_identifier("in assignment")?;
        self.expect_token(
            &Token::Eq(self.current_location()),
            "expected '=' in assignment",
        )?;
        let value = self.parse_expression()?;
        self.expect_semicolon("after assignment")?;

        Ok(Statement::Assignment {
            target,
            value,
            location,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.previous_location();

        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_block = self.parse_block("before if body")?;

        let else_block = if self.match_token(&Token::Else(self.current_location())) {
            Some(self.parse_block("after 'else'")?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_block,
            else_block,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.previous_location();

        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = self.parse_block("before while body")?;

        Ok(Statement::While {
            condition,
            body,
            location,
        })
    }

    /// Parse for statement
    fn parse_for_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.previous_location();

        self.expect_lparen("after 'for'")?;

        // Init: a full declaration, including its ';'
        if self.type_keyword().is_none() {
            return Err(self.unexpected("expected a declaration to start the for header"));
        }
        let init = self.parse_declaration()?;

        let condition = self.parse_expression()?;
        self.expect_semicolon("after for condition")?;

        let increment = self.parse_expression()?;
        self.expect_rparen("after for clauses")?;

        let body = self.parse_block("before for body")?;

        Ok(Statement::For {
            init,
            condition,
            increment,
            body,
            location,
        })
    }
}
