//! Plain-text rendering of results
//!
//! Used by the command-line front end. Colors come from crossterm and are
//! only emitted when `styled` is set, so the same renderers serve terminals
//! and pipes.

use crate::api::{Comparison, Tokenized};
use crate::parser::ast::{NodeKind, TreeNode};
use crate::parser::lexer::LexDiagnostic;
use crate::semantic::SemanticReport;
use crossterm::style::{style, Color, Stylize};
use std::fmt::Write;

pub struct Theme {
    pub structure: Color,
    pub name: Color,
    pub literal: Color,
    pub operator: Color,
    pub comment: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    structure: Color::Rgb { r: 137, g: 180, b: 250 }, // Blue
    name: Color::Rgb { r: 249, g: 226, b: 175 },      // Yellow
    literal: Color::Rgb { r: 250, g: 179, b: 135 },   // Orange
    operator: Color::Rgb { r: 148, g: 226, b: 213 },  // Cyan
    comment: Color::Rgb { r: 108, g: 112, b: 134 },   // Grey
    success: Color::Rgb { r: 166, g: 227, b: 161 },   // Green
    warning: Color::Rgb { r: 249, g: 226, b: 175 },   // Yellow
    error: Color::Rgb { r: 243, g: 139, b: 168 },     // Red
};

fn paint(text: &str, color: Color, styled: bool) -> String {
    if styled {
        style(text).with(color).to_string()
    } else {
        text.to_string()
    }
}

fn value_color(kind: NodeKind) -> Color {
    match kind {
        NodeKind::Identifier => DEFAULT_THEME.name,
        NodeKind::Number | NodeKind::Float | NodeKind::String => DEFAULT_THEME.literal,
        NodeKind::Binary | NodeKind::Unary | NodeKind::Type => DEFAULT_THEME.operator,
        _ => DEFAULT_THEME.comment,
    }
}

/// Indented tree, one node per line: kind, then value if present
pub fn render_tree(tree: &TreeNode, styled: bool) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, "", None, styled);
    out
}

fn write_node(out: &mut String, node: &TreeNode, prefix: &str, last: Option<bool>, styled: bool) {
    let (branch, child_prefix) = match last {
        None => ("", prefix.to_string()),
        Some(true) => ("└── ", format!("{prefix}    ")),
        Some(false) => ("├── ", format!("{prefix}│   ")),
    };

    let kind = paint(node.kind.as_str(), DEFAULT_THEME.structure, styled);
    let _ = match &node.value {
        Some(value) => {
            let value = paint(&value.to_string(), value_color(node.kind), styled);
            writeln!(out, "{prefix}{branch}{kind} {value}")
        }
        None => writeln!(out, "{prefix}{branch}{kind}"),
    };

    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        write_node(out, child, &child_prefix, Some(i + 1 == count), styled);
    }
}

pub fn render_diagnostics(diagnostics: &[LexDiagnostic], styled: bool) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        let _ = writeln!(
            out,
            "{} line {}, column {}: {}",
            paint("lexer:", DEFAULT_THEME.warning, styled),
            diagnostic.location.line,
            diagnostic.location.column,
            diagnostic.message
        );
    }
    out
}

pub fn render_tokens(tokenized: &Tokenized, styled: bool) -> String {
    let mut out = String::new();
    for token in &tokenized.tokens {
        let kind = paint(token.kind, DEFAULT_THEME.structure, styled);
        let _ = match &token.value {
            Some(value) => {
                let value = serde_json::to_string(value).unwrap_or_default();
                writeln!(out, "{:>4}:{:<4} {} {}", token.line, token.column, kind, value)
            }
            None => writeln!(out, "{:>4}:{:<4} {}", token.line, token.column, kind),
        };
    }
    out.push_str(&render_diagnostics(&tokenized.diagnostics, styled));
    out
}

pub fn render_comparison(comparison: &Comparison, styled: bool) -> String {
    let mut out = String::new();

    if let Some(error) = &comparison.error {
        let _ = writeln!(out, "{} {}", paint("error:", DEFAULT_THEME.error, styled), error);
    }

    let color = if comparison.similarity >= 80.0 {
        DEFAULT_THEME.error
    } else if comparison.similarity >= 50.0 {
        DEFAULT_THEME.warning
    } else {
        DEFAULT_THEME.success
    };
    let score = format!("{:.2}%", comparison.similarity);
    let _ = writeln!(out, "similarity: {}", paint(&score, color, styled));
    let _ = writeln!(
        out,
        "distance:   {} (sizes {} / {})",
        comparison.distance, comparison.size1, comparison.size2
    );

    for (label, ast) in [("first", &comparison.ast1), ("second", &comparison.ast2)] {
        if let Some(program) = ast {
            let _ = writeln!(out, "\n{} AST:", label);
            out.push_str(&render_tree(&program.to_tree(), styled));
        }
    }
    out
}

pub fn render_report(report: &SemanticReport, styled: bool) -> String {
    let mut out = String::new();

    for error in &report.errors {
        let _ = writeln!(out, "{} {}", paint("error:", DEFAULT_THEME.error, styled), error);
    }
    for warning in &report.warnings {
        let _ = writeln!(
            out,
            "{} {}",
            paint("warning:", DEFAULT_THEME.warning, styled),
            warning
        );
    }
    if report.errors.is_empty() && report.warnings.is_empty() {
        let _ = writeln!(out, "{}", paint("no problems found", DEFAULT_THEME.success, styled));
    }

    if !report.symbol_table.is_empty() {
        let _ = writeln!(
            out,
            "\n{:<16} {:<8} {:<8} {:<6} initialized",
            "name", "type", "scope", "used"
        );
        for (name, symbol) in report.symbol_table.iter() {
            let _ = writeln!(
                out,
                "{:<16} {:<8} {:<8} {:<6} {}",
                name,
                symbol.var_type.as_str(),
                symbol.scope,
                symbol.used,
                symbol.initialized
            );
        }
    }
    out
}
