use std::fmt::Display;

use crate::SourcePosition;

use super::nodes::Terminal;
use super::types::ExprType;

/// An expression node. The type is provisional: literal and comparison
/// expressions receive one at construction, everything else is left for
/// a later resolution phase.
#[derive(Debug, Clone)]
pub struct Expression {
    pub position: SourcePosition,
    pub ty: Option<ExprType>,
    pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    /// A bare identifier.
    Symbol(Terminal),
    /// A keyword constant such as `true` or `null`.
    Constant(Terminal),
    /// An integer literal.
    ConstInteger(Terminal),
    /// A string literal.
    ConstString(Terminal),
    /// The member name on the right of an access operator.
    Member(Terminal),
    /// Indexing, either positional (`base.0`) or general (`base[expr]`).
    Indexer {
        base: Box<Expression>,
        index: Box<Expression>,
    },
    Unary {
        operator: Terminal,
        operand: Box<Expression>,
    },
    Binary {
        operator: Terminal,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        if_true: Box<Expression>,
        if_false: Box<Expression>,
    },
    /// A parenthesized list of two or more elements. A single
    /// parenthesized expression is never represented as a tuple.
    Tuple(Vec<Expression>),
    /// A brace-delimited statement sequence.
    Block(Vec<Expression>),
}

impl Expression {
    pub fn new(position: SourcePosition, ty: Option<ExprType>, kind: ExprKind) -> Self {
        Expression { position, ty, kind }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, ExprKind::Block(_))
    }

    pub fn write_indented(&self, tab: usize, builder: &mut String) {
        match &self.kind {
            ExprKind::Block(statements) => {
                for _ in 0..tab {
                    builder.push('\t');
                }
                builder.push_str("{\n");
                for statement in statements {
                    statement.write_indented(tab + 1, builder);
                    builder.push('\n');
                }
                for _ in 0..tab {
                    builder.push('\t');
                }
                builder.push_str("}\n");
            }
            _ => {
                for _ in 0..tab {
                    builder.push('\t');
                }
                builder.push_str(&self.to_string());
            }
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::Symbol(terminal)
            | ExprKind::Constant(terminal)
            | ExprKind::ConstInteger(terminal)
            | ExprKind::ConstString(terminal)
            | ExprKind::Member(terminal) => write!(f, "{}", terminal),
            ExprKind::Indexer { base, index } => {
                if matches!(index.kind, ExprKind::ConstInteger(_)) {
                    write!(f, "{}.{}", base, index)
                } else {
                    write!(f, "{}[{}]", base, index)
                }
            }
            ExprKind::Unary { operator, operand } => write!(f, "{}{}", operator, operand),
            ExprKind::Binary {
                operator,
                left,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
            ExprKind::Conditional {
                condition,
                if_true,
                if_false,
            } => write!(f, "if {} {} else {}", condition, if_true, if_false),
            ExprKind::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "({})", elements)
            }
            ExprKind::Block(statements) => {
                let statements = statements
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<String>>()
                    .join("\n");
                write!(f, "{{ {} }}", statements)
            }
        }
    }
}
