//! Expression nodes
//!
//! Expressions are represented, never evaluated. Operand kinds are not
//! checked: `&&` may wrap arithmetic operands and `+` may wrap a comparison.

use super::terminals::{BinaryOp, Identifier};
use super::{Shared, SharedList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// `!operand`
    LogicalNot(Shared<Expression>),

    /// `-operand`
    Negate(Shared<Expression>),

    Binary {
        op: BinaryOp,
        lhs: Shared<Expression>,
        rhs: Shared<Expression>,
    },

    /// Variable or array element reference
    LValue(Shared<LValue>),

    /// 32-bit signed literal, stored bit-exact
    IntegerLiteral(i32),

    /// Function call
    Call {
        callee: Identifier,
        args: SharedList<Expression>,
    },
}

impl Expression {
    pub fn binary(op: BinaryOp, lhs: Shared<Expression>, rhs: Shared<Expression>) -> Self {
        Expression::Binary { op, lhs, rhs }
    }

    pub fn call(callee: impl Into<Identifier>, args: SharedList<Expression>) -> Self {
        Expression::Call { callee: callee.into(), args }
    }

    /// Literal value, if this is an integer literal
    pub fn as_literal(&self) -> Option<i32> {
        match self {
            Expression::IntegerLiteral(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_lvalue(&self) -> Option<&Shared<LValue>> {
        match self {
            Expression::LValue(lvalue) => Some(lvalue),
            _ => None,
        }
    }

    /// Direct operands in source order
    pub fn operands(&self) -> Vec<&Shared<Expression>> {
        match self {
            Expression::LogicalNot(operand) | Expression::Negate(operand) => vec![operand],
            Expression::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            Expression::LValue(lvalue) => lvalue.indices.iter().collect(),
            Expression::IntegerLiteral(_) => Vec::new(),
            Expression::Call { args, .. } => args.iter().collect(),
        }
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Expression::IntegerLiteral(value)
    }
}

impl From<LValue> for Expression {
    fn from(lvalue: LValue) -> Self {
        Expression::LValue(Arc::new(lvalue))
    }
}

/// Addressable expression: an identifier plus zero or more indices
///
/// An empty index list is a scalar access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LValue {
    pub ident: Identifier,
    pub indices: SharedList<Expression>,
}

impl LValue {
    pub fn new(ident: impl Into<Identifier>, indices: SharedList<Expression>) -> Self {
        Self { ident: ident.into(), indices }
    }

    pub fn scalar(ident: impl Into<Identifier>) -> Self {
        Self::new(ident, Vec::new())
    }

    pub fn is_scalar(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_extremes_are_bit_exact() {
        for value in [i32::MAX, i32::MIN, 0, -1] {
            let expr = Expression::from(value);
            assert_eq!(expr.as_literal(), Some(value));
            assert_eq!(expr.as_literal().map(i32::to_ne_bytes), Some(value.to_ne_bytes()));
        }
    }

    #[test]
    fn test_literal_wraps_like_twos_complement() {
        let wrapped = i32::MAX.wrapping_add(1);
        assert_eq!(Expression::IntegerLiteral(wrapped).as_literal(), Some(i32::MIN));
    }

    #[test]
    fn test_operands_in_source_order() {
        let one = Arc::new(Expression::IntegerLiteral(1));
        let two = Arc::new(Expression::IntegerLiteral(2));
        let sum = Expression::binary(BinaryOp::Plus, one.clone(), two.clone());

        let operands = sum.operands();
        assert_eq!(operands.len(), 2);
        assert!(Arc::ptr_eq(operands[0], &one));
        assert!(Arc::ptr_eq(operands[1], &two));

        let call = Expression::call("f", vec![two.clone(), one.clone()]);
        assert_eq!(call.operands()[0].as_literal(), Some(2));
    }

    #[test]
    fn test_lvalue_scalar_and_indexed() {
        let scalar = LValue::scalar("x");
        assert!(scalar.is_scalar());

        let indexed = LValue::new("a", vec![Arc::new(Expression::IntegerLiteral(0))]);
        assert!(!indexed.is_scalar());
        assert_eq!(indexed.ident, "a");

        let expr = Expression::from(indexed);
        assert!(expr.as_lvalue().is_some());
    }
}
