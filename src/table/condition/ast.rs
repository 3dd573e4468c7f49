// SPDX-License-Identifier: MIT

//! Parsed form of a condition cell

/// A single condition: operator plus operand
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub op: CompareOp,
    pub operand: Literal,
    /// Operand text exactly as written after the operator, used for string comparison
    pub raw: String,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// =
    Eq,
    /// !=
    NotEq,
    /// >
    Gt,
    /// >=
    Gte,
    /// <
    Lt,
    /// <=
    Lte,
}

/// Operand literal, classified once at parse time
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl CompareOp {
    /// Operator prefixes, two-character operators ahead of their
    /// one-character prefixes so `>=5` is never read as `>` with `=5`.
    const PREFIXES: [(&'static str, CompareOp); 6] = [
        ("!=", CompareOp::NotEq),
        (">=", CompareOp::Gte),
        ("<=", CompareOp::Lte),
        ("=", CompareOp::Eq),
        (">", CompareOp::Gt),
        ("<", CompareOp::Lt),
    ];

    /// Split an expression into its operator and the remaining operand text
    pub fn split(expr: &str) -> Option<(CompareOp, &str)> {
        Self::PREFIXES
            .iter()
            .find_map(|(prefix, op)| expr.strip_prefix(prefix).map(|rest| (*op, rest)))
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "="),
            CompareOp::NotEq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.op, self.raw)
    }
}
