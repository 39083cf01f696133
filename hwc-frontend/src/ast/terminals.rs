//! Terminal wrappers
//!
//! Leaf values carrying the semantic payload of a lexical token: the base
//! type keyword, identifier text, and operator tags. Punctuation that carries
//! no meaning (`;`, `,`, braces, parentheses) has no wrapper.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base type keyword
///
/// Function return types and declaration base types share this tag; which
/// of the two a given occurrence may legally be (`void` is only valid as a
/// return type) is left to semantic analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BaseType {
    Void,
    Int,
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Void => write!(f, "void"),
            BaseType::Int => write!(f, "int"),
        }
    }
}

/// Identifier text
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier {
    pub text: String,
}

impl Identifier {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Identifier {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Identifier {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Positive,
    Negative,
    LogicalNot,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            UnaryOp::Positive => "+",
            UnaryOp::Negative => "-",
            UnaryOp::LogicalNot => "!",
        };
        write!(f, "{}", op_str)
    }
}

/// Infix operators
///
/// No integer/floating distinction is made, and relational or logical
/// operators are not restricted to conditional contexts here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Plus, Minus, Multiply, Divide, Modulo,

    // Relational
    Greater, Less, GreaterEqual, LessEqual, Equal, NotEqual,

    // Logical
    LogicalAnd, LogicalOr,
}

impl BinaryOp {
    /// Binding strength, higher binds tighter. All levels are left-associative.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::LogicalOr => 1,
            BinaryOp::LogicalAnd => 2,
            BinaryOp::Equal | BinaryOp::NotEqual => 3,
            BinaryOp::Greater | BinaryOp::Less
            | BinaryOp::GreaterEqual | BinaryOp::LessEqual => 4,
            BinaryOp::Plus | BinaryOp::Minus => 5,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 6,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Greater => ">",
            BinaryOp::Less => "<",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
        };
        write!(f, "{}", op_str)
    }
}

/// Operator token payload, either arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl From<UnaryOp> for Operator {
    fn from(op: UnaryOp) -> Self {
        Operator::Unary(op)
    }
}

impl From<BinaryOp> for Operator {
    fn from(op: BinaryOp) -> Self {
        Operator::Binary(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Unary(op) => write!(f, "{}", op),
            Operator::Binary(op) => write!(f, "{}", op),
        }
    }
}
