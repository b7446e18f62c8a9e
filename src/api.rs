//! Call-level operations for serving layers
//!
//! Every function here takes raw inputs and returns plain, serializable
//! values. Failures are values too: `compare` never returns an error, it
//! degrades to a zero score with the message attached.

use crate::compare;
use crate::parser::ast::Program;
use crate::parser::lexer::{LexDiagnostic, Lexer, Token, TokenValue};
use crate::parser::{ParseError, Parser};
use crate::semantic::{self, SemanticReport};
use serde::Serialize;
use tracing::{debug, warn};

/// One token as shown to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenInfo {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<TokenValue>,
    pub line: usize,
    pub column: usize,
}

/// Token stream plus lexical diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tokenized {
    pub tokens: Vec<TokenInfo>,
    pub diagnostics: Vec<LexDiagnostic>,
}

/// A parsed program and the lexical diagnostics met on the way
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parsed {
    pub program: Program,
    pub diagnostics: Vec<LexDiagnostic>,
}

/// Result of comparing two sources
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub similarity: f64,
    pub distance: usize,
    pub size1: usize,
    pub size2: usize,
    pub ast1: Option<Program>,
    pub ast2: Option<Program>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Comparison {
    fn failed(error: String) -> Self {
        Self {
            similarity: 0.0,
            distance: 0,
            size1: 0,
            size2: 0,
            ast1: None,
            ast2: None,
            error: Some(error),
        }
    }
}

/// Tokenize `source`. The end-of-input marker is not listed.
pub fn tokenize(source: &str) -> Tokenized {
    let lexed = Lexer::new(source).tokenize();
    let tokens = lexed
        .tokens
        .iter()
        .filter(|token| !matches!(token, Token::Eof(_)))
        .map(|token| {
            let location = token.location();
            TokenInfo {
                kind: token.tag(),
                value: token.payload(),
                line: location.line,
                column: location.column,
            }
        })
        .collect();

    Tokenized {
        tokens,
        diagnostics: lexed.diagnostics,
    }
}

/// Parse `source` into a program.
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(source);
    let program = parser.parse_program()?;
    Ok(Parsed {
        program,
        diagnostics: parser.into_diagnostics(),
    })
}

/// Parse both sources and measure their structural similarity.
pub fn compare(first: &str, second: &str) -> Comparison {
    let parsed = parse(first).and_then(|one| parse(second).map(|two| (one, two)));

    match parsed {
        Ok((one, two)) => {
            let measured = compare::measure(Some(&one.program), Some(&two.program));
            debug!(similarity = measured.score, "compared sources");
            Comparison {
                similarity: measured.score,
                distance: measured.distance,
                size1: measured.size1,
                size2: measured.size2,
                ast1: Some(one.program),
                ast2: Some(two.program),
                error: None,
            }
        }
        Err(err) => {
            warn!(error = %err, "comparison failed");
            Comparison::failed(err.to_string())
        }
    }
}

/// Run the semantic checker over an already parsed program.
pub fn analyze(program: Option<&Program>) -> SemanticReport {
    semantic::analyze(program)
}

/// Parse `source`, then run the semantic checker.
pub fn analyze_source(source: &str) -> Result<SemanticReport, ParseError> {
    let parsed = parse(source)?;
    Ok(semantic::analyze(Some(&parsed.program)))
}
