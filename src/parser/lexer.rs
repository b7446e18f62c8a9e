//! Lexer (tokenizer) for the toy C-like language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Lexing never fails: an unrecognised character is recorded as a
//! [`LexDiagnostic`], logged, and skipped, and tokenization carries on with the
//! next character.

use super::ast::SourceLocation;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i64, SourceLocation),
    FloatLiteral(f64, SourceLocation),
    StringLiteral(String, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Type keywords
    Int(SourceLocation),
    Float(SourceLocation),
    Str(SourceLocation),
    Bool(SourceLocation),

    // Control keywords
    If(SourceLocation),
    Else(SourceLocation),
    While(SourceLocation),
    For(SourceLocation),
    Return(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Assignment
    Eq(SourceLocation), // =

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::FloatLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Int(loc)
            | Token::Float(loc)
            | Token::Str(loc)
            | Token::Bool(loc)
            | Token::If(loc)
            | Token::Else(loc)
            | Token::While(loc)
            | Token::For(loc)
            | Token::Return(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::Eq(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Eof(loc) => *loc,
        }
    }

    /// Upper-case tag naming the token class, as shown by `tokenize`.
    pub fn tag(&self) -> &'static str {
        match self {
            Token::IntLiteral(..) => "NUMBER",
            Token::FloatLiteral(..) => "FLOAT_NUMBER",
            Token::StringLiteral(..) => "STRING_LITERAL",
            Token::Ident(..) => "ID",
            Token::Int(_) => "INT",
            Token::Float(_) => "FLOAT",
            Token::Str(_) => "STRING",
            Token::Bool(_) => "BOOL",
            Token::If(_) => "IF",
            Token::Else(_) => "ELSE",
            Token::While(_) => "WHILE",
            Token::For(_) => "FOR",
            Token::Return(_) => "RETURN",
            Token::Plus(_) => "PLUS",
            Token::Minus(_) => "MINUS",
            Token::Star(_) => "TIMES",
            Token::Slash(_) => "DIVIDE",
            Token::Percent(_) => "MODULO",
            Token::EqEq(_) => "EQ",
            Token::NotEq(_) => "NE",
            Token::Lt(_) => "LT",
            Token::Le(_) => "LE",
            Token::Gt(_) => "GT",
            Token::Ge(_) => "GE",
            Token::Eq(_) => "ASSIGN",
            Token::LParen(_) => "LPAREN",
            Token::RParen(_) => "RPAREN",
            Token::LBrace(_) => "LBRACE",
            Token::RBrace(_) => "RBRACE",
            Token::Semicolon(_) => "SEMICOLON",
            Token::Comma(_) => "COMMA",
            Token::Eof(_) => "EOF",
        }
    }

    /// The literal payload of the token, if it has one.
    pub fn payload(&self) -> Option<TokenValue> {
        match self {
            Token::IntLiteral(n, _) => Some(TokenValue::Int(*n)),
            Token::FloatLiteral(x, _) => Some(TokenValue::Float(*x)),
            Token::StringLiteral(s, _) | Token::Ident(s, _) => {
                Some(TokenValue::Str(s.clone()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "int literal {}", n),
            Token::FloatLiteral(x, _) => write!(f, "float literal {:?}", x),
            Token::StringLiteral(s, _) => write!(f, "string literal \"{}\"", s),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Int(_) => write!(f, "'int'"),
            Token::Float(_) => write!(f, "'float'"),
            Token::Str(_) => write!(f, "'string'"),
            Token::Bool(_) => write!(f, "'bool'"),
            Token::If(_) => write!(f, "'if'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::While(_) => write!(f, "'while'"),
            Token::For(_) => write!(f, "'for'"),
            Token::Return(_) => write!(f, "'return'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::Eq(_) => write!(f, "'='"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Literal payload carried by identifier and literal tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Int(i64),
    Float(f64),
    Str(String),
}

/// A recoverable lexical problem. The offending input was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexDiagnostic {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer warning at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

/// Output of a full tokenization pass.
#[derive(Debug, Clone, Default)]
pub struct Lexed {
    /// Tokens in source order, always terminated by [`Token::Eof`].
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LexDiagnostic>,
}

/// Lexer for the toy language
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    diagnostics: Vec<LexDiagnostic>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self) -> Lexed {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            if let Some(token) = self.next_token() {
                tokens.push(token);
            }
        }

        Lexed {
            tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Get next token, or `None` if the input at this position was skipped
    fn next_token(&mut self) -> Option<Token> {
        let loc = self.current_location();
        let ch = self.peek()?;

        match ch {
            '"' => return self.string_literal(),
            '0'..='9' => return self.number_literal(),
            'a'..='z' | 'A'..='Z' | '_' => return Some(self.identifier_or_keyword()),
            _ => {}
        }

        self.advance();
        let token = match ch {
            '+' => Token::Plus(loc),
            '-' => Token::Minus(loc),
            '*' => Token::Star(loc),
            '/' => Token::Slash(loc),
            '%' => Token::Percent(loc),
            '(' => Token::LParen(loc),
            ')' => Token::RParen(loc),
            '{' => Token::LBrace(loc),
            '}' => Token::RBrace(loc),
            ';' => Token::Semicolon(loc),
            ',' => Token::Comma(loc),
            '=' => {
                if self.match_char('=') {
                    Token::EqEq(loc)
                } else {
                    Token::Eq(loc)
                }
            }
            '<' => {
                if self.match_char('=') {
                    Token::Le(loc)
                } else {
                    Token::Lt(loc)
                }
            }
            '>' => {
                if self.match_char('=') {
                    Token::Ge(loc)
                } else {
                    Token::Gt(loc)
                }
            }
            '!' if self.match_char('=') => Token::NotEq(loc),
            _ => {
                self.report(format!("Illegal character '{}'", ch), loc);
                return None;
            }
        };

        Some(token)
    }

    /// Parse string literal
    ///
    /// The literal must close on the same line. Escapes are kept verbatim:
    /// a backslash and the character after it are both copied.
    fn string_literal(&mut self) -> Option<Token> {
        let loc = self.current_location();
        let mut offset = 1;

        let length = loop {
            match self.peek_ahead(offset) {
                Some('"') => break Some(offset - 1),
                Some('\\') => match self.peek_ahead(offset + 1) {
                    Some(c) if c != '\n' => offset += 2,
                    _ => break None,
                },
                Some('\n') | None => break None,
                Some(_) => offset += 1,
            }
        };

        let Some(length) = length else {
            self.advance();
            self.report("Illegal character '\"'".to_string(), loc);
            return None;
        };

        self.advance(); // opening quote
        let mut string = String::with_capacity(length);
        for _ in 0..length {
            if let Some(ch) = self.advance() {
                string.push(ch);
            }
        }
        self.advance(); // closing quote

        Some(Token::StringLiteral(string, loc))
    }

    /// Parse numeric literal: `digits.digits` is a float, `digits` an integer
    fn number_literal(&mut self) -> Option<Token> {
        let loc = self.current_location();
        let mut num_str = self.take_digits();

        let is_float = self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit());

        if is_float {
            self.advance(); // '.'
            num_str.push('.');
            num_str.push_str(&self.take_digits());
            return match num_str.parse::<f64>() {
                Ok(value) => Some(Token::FloatLiteral(value, loc)),
                Err(_) => {
                    self.report(format!("Invalid float literal: {}", num_str), loc);
                    None
                }
            };
        }

        match num_str.parse::<i64>() {
            Ok(value) => Some(Token::IntLiteral(value, loc)),
            Err(_) => {
                self.report(format!("Integer literal out of range: {}", num_str), loc);
                None
            }
        }
    }

    fn take_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        digits
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.current_location();
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Check if it's a keyword
        match ident.as_str() {
            "int" => Token::Int(loc),
            "float" => Token::Float(loc),
            "string" => Token::Str(loc),
            "bool" => Token::Bool(loc),
            "if" => Token::If(loc),
            "else" => Token::Else(loc),
            "while" => Token::While(loc),
            "for" => Token::For(loc),
            "return" => Token::Return(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Skip whitespace, newlines and `//` comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    // Stop before the newline; the loop consumes it.
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn report(&mut self, message: String, location: SourceLocation) {
        warn!(
            line = location.line,
            column = location.column,
            "{}",
            message
        );
        self.diagnostics.push(LexDiagnostic { message, location });
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Lexed {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("int x = 42;").tokens;

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[2], Token::Eq(_)));
        assert!(matches!(tokens[3], Token::IntLiteral(42, _)));
        assert!(matches!(tokens[4], Token::Semicolon(_)));
        assert!(matches!(tokens[5], Token::Eof(_)));
    }

    #[test]
    fn test_operators() {
        let tokens = tokenize("== != <= >= < > = + - * / %").tokens;

        assert!(matches!(tokens[0], Token::EqEq(_)));
        assert!(matches!(tokens[1], Token::NotEq(_)));
        assert!(matches!(tokens[2], Token::Le(_)));
        assert!(matches!(tokens[3], Token::Ge(_)));
        assert!(matches!(tokens[4], Token::Lt(_)));
        assert!(matches!(tokens[5], Token::Gt(_)));
        assert!(matches!(tokens[6], Token::Eq(_)));
        assert!(matches!(tokens[7], Token::Plus(_)));
        assert!(matches!(tokens[8], Token::Minus(_)));
        assert!(matches!(tokens[9], Token::Star(_)));
        assert!(matches!(tokens[10], Token::Slash(_)));
        assert!(matches!(tokens[11], Token::Percent(_)));
    }

    #[test]
    fn test_float_beats_integer() {
        let tokens = tokenize("3.14 7 1.").tokens;

        assert!(matches!(tokens[0], Token::FloatLiteral(x, _) if x == 3.14));
        assert!(matches!(tokens[1], Token::IntLiteral(7, _)));
        assert!(matches!(tokens[2], Token::IntLiteral(1, _)));
        // the trailing '.' is not a token
        assert!(matches!(tokens[3], Token::Eof(_)));
    }

    #[test]
    fn test_keywords_take_priority() {
        let tokens = tokenize("string bool return iffy").tokens;

        assert!(matches!(tokens[0], Token::Str(_)));
        assert!(matches!(tokens[1], Token::Bool(_)));
        assert!(matches!(tokens[2], Token::Return(_)));
        assert!(matches!(tokens[3], Token::Ident(ref s, _) if s == "iffy"));
    }

    #[test]
    fn test_comments_and_lines() {
        let tokens = tokenize("int x; // comment\nint y;").tokens;

        assert_eq!(tokens.len(), 7);
        assert!(matches!(tokens[3], Token::Int(_)));
        assert_eq!(tokens[3].location(), SourceLocation::new(2, 1));
        assert!(matches!(tokens[4], Token::Ident(ref s, _) if s == "y"));
    }

    #[test]
    fn test_string_literal_keeps_escapes() {
        let tokens = tokenize(r#""hello\n\"world\"""#).tokens;

        match &tokens[0] {
            Token::StringLiteral(s, _) => {
                assert_eq!(s, r#"hello\n\"world\""#);
            }
            _ => panic!("Expected string literal"),
        }
    }

    #[test]
    fn test_unterminated_string_skips_quote() {
        let lexed = tokenize("\"abc\nx");

        assert_eq!(lexed.diagnostics.len(), 1);
        assert_eq!(lexed.diagnostics[0].message, "Illegal character '\"'");
        assert!(matches!(lexed.tokens[0], Token::Ident(ref s, _) if s == "abc"));
        assert!(matches!(lexed.tokens[1], Token::Ident(ref s, _) if s == "x"));
    }

    #[test]
    fn test_illegal_character_is_skipped() {
        let lexed = tokenize("int @x = 1 # ;");

        assert_eq!(lexed.diagnostics.len(), 2);
        assert_eq!(lexed.diagnostics[0].message, "Illegal character '@'");
        assert_eq!(lexed.diagnostics[0].location, SourceLocation::new(1, 5));
        assert!(matches!(lexed.tokens[1], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(lexed.tokens[4], Token::Semicolon(_)));
    }

    #[test]
    fn test_lone_bang_is_illegal() {
        let lexed = tokenize("!x");

        assert_eq!(lexed.diagnostics.len(), 1);
        assert!(matches!(lexed.tokens[0], Token::Ident(ref s, _) if s == "x"));
    }

    #[test]
    fn test_integer_overflow_is_diagnosed() {
        let lexed = tokenize("99999999999999999999;");

        assert_eq!(lexed.diagnostics.len(), 1);
        assert!(matches!(lexed.tokens[0], Token::Semicolon(_)));
    }
}
