//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (declarations, assignments, if, while, for)
//! - `expressions`: Parsing expressions by precedence level
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::config::MAX_NESTING_DEPTH;
use crate::parser::ast::*;
use crate::parser::lexer::{LexDiagnostic, Lexer, Token};
use thiserror::Error;
use tracing::debug;

/// Syntax error. Parsing stops at the first one and no partial AST is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error {}: {message}", describe_location(.location))]
pub struct ParseError {
    pub message: String,
    /// Location of the offending token; `None` at end of input.
    pub location: Option<SourceLocation>,
}

fn describe_location(location: &Option<SourceLocation>) -> String {
    match location {
        Some(loc) => format!("at line {}, column {}", loc.line, loc.column),
        None => "at end of input".to_string(),
    }
}

/// Recursive descent parser for the toy language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Current nesting of blocks, parentheses, unary and binary operators
    pub(crate) depth: usize,
    diagnostics: Vec<LexDiagnostic>,
}

impl Parser {
    /// Lex `source` and prepare to parse it. Lexical problems are kept as
    /// diagnostics and never stop the parser from running.
    pub fn new(source: &str) -> Self {
        let lexed = Lexer::new(source).tokenize();
        Self::from_tokens(lexed.tokens, lexed.diagnostics)
    }

    pub fn from_tokens(mut tokens: Vec<Token>, diagnostics: Vec<LexDiagnostic>) -> Self {
        if !matches!(tokens.last(), Some(Token::Eof(_))) {
            let loc = tokens.last().map(Token::location).unwrap_or_default();
            tokens.push(Token::Eof(loc));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
            diagnostics,
        }
    }

    /// Lexical diagnostics collected while building the token stream
    pub fn diagnostics(&self) -> &[LexDiagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<LexDiagnostic> {
        self.diagnostics
    }

    /// Parse the entire program: one or more statements up to end of input
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let location = self.current_location();
        let statements = self.parse_statement_list(|parser| parser.is_at_end())?;
        debug!(statements = statements.len(), "parsed program");

        Ok(Program {
            body: Block {
                statements,
                location,
            },
        })
    }

    // ===== Helper methods =====

    pub(crate) fn type_keyword(&self) -> Option<TypeName> {
        match self.peek() {
            Token::Int(_) => Some(TypeName::Int),
            Token::Float(_) => Some(TypeName::Float),
            Token::Str(_) => Some(TypeName::String),
            Token::Bool(_) => Some(TypeName::Bool),
            _ => None,
        }
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    /// Go one nesting level deeper. Every recursive pass over the AST
    /// recurses once per level, so the depth is capped here.
    pub(crate) fn enter_nested(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError {
                message: format!("nested too deeply (limit {})", MAX_NESTING_DEPTH),
                location: (!self.is_at_end()).then(|| self.current_location()),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_nested(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Lexical diagnostic for input skipped between the previous and the
    /// current token, if any
    fn skipped_input(&self) -> Option<&LexDiagnostic> {
        let after = (self.position > 0).then(|| self.previous_location());
        let before = self.current_location();
        self.diagnostics
            .iter()
            .rev()
            .find(|d| d.location < before && after.map_or(true, |a| d.location > a))
    }

    /// Build an error pointing at the current token
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        let mut error = if self.is_at_end() {
            ParseError {
                message: format!("unexpected end of input, {}", expected),
                location: None,
            }
        } else {
            ParseError {
                message: format!("unexpected {}, {}", token, expected),
                location: Some(token.location()),
            }
        };
        if let Some(skipped) = self.skipped_input() {
            error.message = format!("{} ({} was skipped)", error.message, skipped.message);
        }
        error
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(message))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LBrace(self.current_location()),
            &format!("expected '{{' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("expected '}}' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("expected ';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected(&format!("expected identifier {ctx}")))
        }
    }
}

/// Parse `source` into a program, discarding lexical diagnostics.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    Parser::new(source).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let program = parse_source("int a = 5; float b;").unwrap();

        assert_eq!(program.body.statements.len(), 2);
        match &program.body.statements[0] {
            Statement::Declaration(Declaration {
                var_type,
                name,
                init,
                ..
            }) => {
                assert_eq!(*var_type, TypeName::Int);
                assert_eq!(name, "a");
                assert!(matches!(init, Some(Expr::Number(5, _))));
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
        assert!(matches!(
            &program.body.statements[1],
            Statement::Declaration(Declaration { init: None, .. })
        ));
    }

    #[test]
    fn test_empty_input_is_syntax_error() {
        let err = parse_source("   // nothing here\n").unwrap_err();

        assert_eq!(err.location, None);
        assert!(err.to_string().starts_with("Syntax error at end of input"));
    }

    #[test]
    fn test_error_names_offending_token() {
        let err = parse_source("int a = 5\nint b;").unwrap_err();

        assert_eq!(err.location, Some(SourceLocation::new(2, 1)));
        assert!(err.message.contains("'int'"), "{}", err.message);
    }

    #[test]
    fn test_return_is_reserved() {
        assert!(parse_source("return 1;").is_err());
    }

    #[test]
    fn test_error_mentions_skipped_literal() {
        let err = parse_source("int a = -9223372036854775808;").unwrap_err();

        assert!(
            err.message
                .contains("Integer literal out of range: 9223372036854775808 was skipped"),
            "{}",
            err.message
        );
    }

    #[test]
    fn test_error_without_skipped_input_has_no_note() {
        let err = parse_source("int a = 1; $ int b = ;").unwrap_err();
        assert!(!err.message.contains("skipped"), "{}", err.message);
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let depth = MAX_NESTING_DEPTH + 1;
        let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
        let err = parse_source(&source).unwrap_err();
        assert!(err.message.contains("nested too deeply"), "{}", err.message);

        let depth = MAX_NESTING_DEPTH / 2;
        let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
        assert!(parse_source(&source).is_ok());
    }

    #[test]
    fn test_long_operator_chain_is_rejected() {
        let source = format!("1{};", " + 1".repeat(MAX_NESTING_DEPTH + 1));
        let err = parse_source(&source).unwrap_err();
        assert!(err.message.contains("nested too deeply"), "{}", err.message);
    }

    #[test]
    fn test_deep_blocks_are_rejected() {
        let depth = MAX_NESTING_DEPTH + 1;
        let source = format!("{}x;{}", "if (x) {".repeat(depth), "}".repeat(depth));
        let err = parse_source(&source).unwrap_err();
        assert!(err.message.contains("nested too deeply"), "{}", err.message);
    }

    #[test]
    fn test_lexical_diagnostics_do_not_stop_parsing() {
        let mut parser = Parser::new("int a = 5 $;");
        let program = parser.parse_program().unwrap();

        assert_eq!(program.body.statements.len(), 1);
        assert_eq!(parser.diagnostics().len(), 1);
    }
}
