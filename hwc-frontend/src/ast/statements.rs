//! Statement and block nodes
//!
//! Control flow is represented, not interpreted. Whether `break`/`continue`
//! sit inside a loop and whether `return` matches the enclosing function's
//! type are questions for later stages.

use super::declarations::Declaration;
use super::expressions::{Expression, LValue};
use super::{Shared, SharedList};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `target = value;`
    Assign {
        target: Shared<LValue>,
        value: Shared<Expression>,
    },

    /// Expression evaluated for its effects
    Expr(Shared<Expression>),

    /// Nested `{ ... }`
    Block(Shared<Block>),

    /// `else_branch` is `None` exactly when the source had no `else`
    If {
        cond: Shared<Expression>,
        then_branch: Shared<Statement>,
        else_branch: Option<Shared<Statement>>,
    },

    While {
        cond: Shared<Expression>,
        body: Shared<Statement>,
    },

    Break,

    Continue,

    Return(Option<Shared<Expression>>),
}

impl Statement {
    pub fn if_then(cond: Shared<Expression>, then_branch: Shared<Statement>) -> Self {
        Statement::If { cond, then_branch, else_branch: None }
    }

    pub fn if_else(
        cond: Shared<Expression>,
        then_branch: Shared<Statement>,
        else_branch: Shared<Statement>,
    ) -> Self {
        Statement::If { cond, then_branch, else_branch: Some(else_branch) }
    }

    /// True for `break`, `continue` and `return`
    pub fn is_jump(&self) -> bool {
        matches!(self, Statement::Break | Statement::Continue | Statement::Return(_))
    }
}

/// Ordered `{ ... }` contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub items: Vec<BlockItem>,
}

impl Block {
    pub fn new(items: Vec<BlockItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn statements(&self) -> impl Iterator<Item = &Shared<Statement>> {
        self.items.iter().filter_map(|item| match item {
            BlockItem::Stmt(stmt) => Some(stmt),
            BlockItem::Decl(_) => None,
        })
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter().filter_map(|item| match item {
            BlockItem::Decl(decl) => Some(decl),
            BlockItem::Stmt(_) => None,
        })
    }
}

impl FromIterator<BlockItem> for Block {
    fn from_iter<I: IntoIterator<Item = BlockItem>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockItem {
    Decl(Declaration),
    Stmt(Shared<Statement>),
}

impl From<Declaration> for BlockItem {
    fn from(decl: Declaration) -> Self {
        BlockItem::Decl(decl)
    }
}

impl From<Shared<Statement>> for BlockItem {
    fn from(stmt: Shared<Statement>) -> Self {
        BlockItem::Stmt(stmt)
    }
}

/// Wraps each statement as a block item, keeping order
pub fn stmt_items(stmts: SharedList<Statement>) -> Vec<BlockItem> {
    stmts.into_iter().map(BlockItem::Stmt).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn assign(name: &str, value: i32) -> Shared<Statement> {
        Arc::new(Statement::Assign {
            target: Arc::new(LValue::scalar(name)),
            value: Arc::new(Expression::IntegerLiteral(value)),
        })
    }

    #[test]
    fn test_if_without_else_is_explicitly_absent() {
        let cond: Shared<Expression> = Arc::new(LValue::scalar("a").into());
        let stmt = Statement::if_then(cond, assign("b", 1));

        match stmt {
            Statement::If { else_branch, .. } => assert!(else_branch.is_none()),
            _ => panic!("Expected If"),
        }
    }

    #[test]
    fn test_if_with_else_is_present() {
        let cond: Shared<Expression> = Arc::new(LValue::scalar("a").into());
        let stmt = Statement::if_else(cond, assign("b", 1), assign("b", 2));

        match stmt {
            Statement::If { else_branch: Some(else_branch), .. } => {
                assert_eq!(*else_branch, *assign("b", 2));
            }
            _ => panic!("Expected If with else"),
        }
    }

    #[test]
    fn test_block_partitions_items() {
        let block: Block = stmt_items(vec![assign("x", 1), Arc::new(Statement::Break)])
            .into_iter()
            .collect();

        assert!(!block.is_empty());
        assert_eq!(block.statements().count(), 2);
        assert_eq!(block.declarations().count(), 0);
        assert!(block.statements().last().is_some_and(|s| s.is_jump()));
    }
}
