// AST (Abstract Syntax Tree) definitions for the toy C-like language

use serde::{Serialize, Serializer};
use std::fmt;

/// Source location information for error reporting
///
/// Ordered by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// The closed set of node kinds exposed by the uniform tree view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Program,
    StatementList,
    Declaration,
    Assignment,
    If,
    While,
    For,
    Binary,
    Unary,
    Identifier,
    Number,
    Float,
    String,
    Type,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::StatementList => "statement_list",
            NodeKind::Declaration => "declaration",
            NodeKind::Assignment => "assignment",
            NodeKind::If => "if",
            NodeKind::While => "while",
            NodeKind::For => "for",
            NodeKind::Binary => "binary",
            NodeKind::Unary => "unary",
            NodeKind::Identifier => "identifier",
            NodeKind::Number => "number",
            NodeKind::Float => "float",
            NodeKind::String => "string",
            NodeKind::Type => "type",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarable variable types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeName {
    Int,
    Float,
    String,
    Bool,
}

impl TypeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Float => "float",
            TypeName::String => "string",
            TypeName::Bool => "bool",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Neg, // -x
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Neg => "-",
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String, SourceLocation),
    Number(i64, SourceLocation),
    Float(f64, SourceLocation),
    Str(String, SourceLocation),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this expression
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Identifier(_, loc)
            | Expr::Number(_, loc)
            | Expr::Float(_, loc)
            | Expr::Str(_, loc) => *loc,
            Expr::Binary { location, .. } | Expr::Unary { location, .. } => *location,
        }
    }
}

/// `type name;` or `type name = init;`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub var_type: TypeName,
    pub name: String,
    pub init: Option<Expr>,
    pub location: SourceLocation,
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(Declaration),
    Assignment {
        target: String,
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Block,
        location: SourceLocation,
    },
    For {
        init: Declaration,
        condition: Expr,
        increment: Expr,
        body: Block,
        location: SourceLocation,
    },
    Expression(Expr),
}

impl Statement {
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Declaration(decl) => decl.location,
            Statement::Assignment { location, .. }
            | Statement::If { location, .. }
            | Statement::While { location, .. }
            | Statement::For { location, .. } => *location,
            Statement::Expression(expr) => expr.location(),
        }
    }
}

/// A non-empty statement list
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Block,
}

// ===== Uniform tree view =====

/// Per-kind payload of a [`TreeNode`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeValue {
    Name(String),
    Int(i64),
    Float(f64),
    Str(String),
    Op(&'static str),
    Type(TypeName),
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Name(s) | NodeValue::Str(s) => f.write_str(s),
            NodeValue::Int(n) => write!(f, "{}", n),
            NodeValue::Float(x) => write!(f, "{:?}", x),
            NodeValue::Op(op) => f.write_str(op),
            NodeValue::Type(t) => f.write_str(t.as_str()),
        }
    }
}

/// Kind/value/children view of the AST.
///
/// Declarations expose their type and name as `type` and `identifier`
/// leaves, assignments expose their target as an `identifier` leaf. Source
/// locations are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<NodeValue>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(kind: NodeKind, value: NodeValue) -> Self {
        Self {
            kind,
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn branch(kind: NodeKind, value: Option<NodeValue>, children: Vec<TreeNode>) -> Self {
        Self {
            kind,
            value,
            children,
        }
    }

    /// Kind, followed by the value when there is one
    pub fn label(&self) -> String {
        match &self.value {
            Some(value) => format!("{} {}", self.kind, value),
            None => self.kind.to_string(),
        }
    }
}

impl Program {
    pub fn to_tree(&self) -> TreeNode {
        TreeNode::branch(NodeKind::Program, None, vec![self.body.to_tree()])
    }
}

impl Block {
    pub fn to_tree(&self) -> TreeNode {
        TreeNode::branch(
            NodeKind::StatementList,
            None,
            self.statements.iter().map(Statement::to_tree).collect(),
        )
    }
}

impl Declaration {
    pub fn to_tree(&self) -> TreeNode {
        let mut children = vec![
            TreeNode::leaf(NodeKind::Type, NodeValue::Type(self.var_type)),
            TreeNode::leaf(NodeKind::Identifier, NodeValue::Name(self.name.clone())),
        ];
        if let Some(init) = &self.init {
            children.push(init.to_tree());
        }
        TreeNode::branch(NodeKind::Declaration, None, children)
    }
}

impl Statement {
    pub fn to_tree(&self) -> TreeNode {
        match self {
            Statement::Declaration(decl) => decl.to_tree(),
            Statement::Assignment { target, value, .. } => TreeNode::branch(
                NodeKind::Assignment,
                None,
                vec![
                    TreeNode::leaf(NodeKind::Identifier, NodeValue::Name(target.clone())),
                    value.to_tree(),
                ],
            ),
            Statement::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                let mut children = vec![condition.to_tree(), then_block.to_tree()];
                if let Some(else_block) = else_block {
                    children.push(else_block.to_tree());
                }
                TreeNode::branch(NodeKind::If, None, children)
            }
            Statement::While {
                condition, body, ..
            } => TreeNode::branch(
                NodeKind::While,
                None,
                vec![condition.to_tree(), body.to_tree()],
            ),
            Statement::For {
                init,
                condition,
                increment,
                body,
                ..
            } => TreeNode::branch(
                NodeKind::For,
                None,
                vec![
                    init.to_tree(),
                    condition.to_tree(),
                    increment.to_tree(),
                    body.to_tree(),
                ],
            ),
            Statement::Expression(expr) => expr.to_tree(),
        }
    }
}

impl Expr {
    pub fn to_tree(&self) -> TreeNode {
        match self {
            Expr::Identifier(name, _) => {
                TreeNode::leaf(NodeKind::Identifier, NodeValue::Name(name.clone()))
            }
            Expr::Number(n, _) => TreeNode::leaf(NodeKind::Number, NodeValue::Int(*n)),
            Expr::Float(x, _) => TreeNode::leaf(NodeKind::Float, NodeValue::Float(*x)),
            Expr::Str(s, _) => TreeNode::leaf(NodeKind::String, NodeValue::Str(s.clone())),
            Expr::Binary {
                op, left, right, ..
            } => TreeNode::branch(
                NodeKind::Binary,
                Some(NodeValue::Op(op.symbol())),
                vec![left.to_tree(), right.to_tree()],
            ),
            Expr::Unary { op, operand, .. } => TreeNode::branch(
                NodeKind::Unary,
                Some(NodeValue::Op(op.symbol())),
                vec![operand.to_tree()],
            ),
        }
    }
}

impl Serialize for Program {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_tree().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::default()
    }

    #[test]
    fn test_declaration_view_has_type_and_identifier_leaves() {
        let decl = Declaration {
            var_type: TypeName::Int,
            name: "a".to_string(),
            init: Some(Expr::Number(5, loc())),
            location: loc(),
        };
        let tree = decl.to_tree();

        assert_eq!(tree.kind, NodeKind::Declaration);
        assert_eq!(tree.value, None);
        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.children[0].value, Some(NodeValue::Type(TypeName::Int)));
        assert_eq!(tree.children[1].label(), "identifier a");
        assert_eq!(tree.children[2].kind, NodeKind::Number);
    }

    #[test]
    fn test_program_serializes_as_uniform_tree() {
        let program = Program {
            body: Block {
                statements: vec![Statement::Expression(Expr::Unary {
                    op: UnOp::Neg,
                    operand: Box::new(Expr::Float(1.5, loc())),
                    location: loc(),
                })],
                location: loc(),
            },
        };

        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "program",
                "children": [{
                    "kind": "statement_list",
                    "children": [{
                        "kind": "unary",
                        "value": "-",
                        "children": [{ "kind": "float", "value": 1.5, "children": [] }]
                    }]
                }]
            })
        );
    }

    #[test]
    fn test_float_value_label_keeps_decimal_point() {
        assert_eq!(NodeValue::Float(0.0).to_string(), "0.0");
    }
}
