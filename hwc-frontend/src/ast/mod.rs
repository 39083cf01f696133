//! Abstract Syntax Tree definitions
//!
//! One node type per production of the source grammar. Nodes are built once,
//! bottom-up, from already-built children and never mutated afterwards.
//! Children are held through `Arc`, so a subtree may be attached in several
//! places (e.g. after common-subexpression sharing) while the ownership edges
//! still form a DAG: a node can only point at nodes that existed before it.

pub mod terminals;
pub mod expressions;
pub mod declarations;
pub mod statements;
pub mod functions;
pub mod unit;

use std::sync::Arc;

// Re-export commonly used types at module level
pub use terminals::{BaseType, BinaryOp, Identifier, Operator, UnaryOp};
pub use expressions::{Expression, LValue};
pub use declarations::{
    ConstDecl, ConstDef, ConstInitializer, Declaration, Initializer, VarDecl, VarDef,
};
pub use statements::{stmt_items, Block, BlockItem, Statement};
pub use functions::{FunctionDefinition, ParamShape, Parameter};
pub use unit::{CompUnit, CompUnitItem};

/// Shared ownership edge from a parent to a child node
pub type Shared<T> = Arc<T>;

/// Ordered list of shared children
pub type SharedList<T> = Vec<Arc<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_tree_can_be_shared_across_threads() {
        assert_send_sync::<CompUnit>();
        assert_send_sync::<Shared<Expression>>();
        assert_send_sync::<Shared<Statement>>();
    }

    #[test]
    fn test_concurrent_readers() {
        let expr: Shared<Expression> = Arc::new(Expression::binary(
            BinaryOp::Plus,
            Arc::new(Expression::IntegerLiteral(40)),
            Arc::new(Expression::IntegerLiteral(2)),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let expr = Arc::clone(&expr);
                std::thread::spawn(move || expr.operands().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
        assert_eq!(Arc::strong_count(&expr), 1);
    }
}
