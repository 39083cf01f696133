//! Language constructs
//!
//! Every node kind is a "construct". `ConstructKind` names them, the
//! `Construct` trait reports a node's kind, and `ConstructRef` is a borrowed
//! handle to any node that can list its ownership edges. Consumers that only
//! need to walk the graph (verification, statistics, dumps) use these instead
//! of matching every concrete type.

use crate::ast::*;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstructKind {
    // Terminal wrappers
    BaseType,
    Identifier,
    Operator,

    CompUnit,
    FunctionDefinition,
    Parameter,
    Block,

    ConstDecl,
    ConstDef,
    ConstInitializerScalar,
    ConstInitializerArray,
    VarDecl,
    VarDefOnly,
    VarDefWithInit,
    InitializerScalar,
    InitializerArray,

    StmtAssign,
    StmtExpr,
    StmtBlock,
    StmtIf,
    StmtWhile,
    StmtBreak,
    StmtContinue,
    StmtReturn,

    ExprLogicalNot,
    ExprNegate,
    ExprBinary,
    ExprLValue,
    ExprIntegerLiteral,
    ExprCall,
    LValue,
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Type identity shared by every node
pub trait Construct {
    fn kind(&self) -> ConstructKind;
}

impl Construct for BaseType {
    fn kind(&self) -> ConstructKind {
        ConstructKind::BaseType
    }
}

impl Construct for Identifier {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Identifier
    }
}

impl Construct for Operator {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Operator
    }
}

impl Construct for CompUnit {
    fn kind(&self) -> ConstructKind {
        ConstructKind::CompUnit
    }
}

impl Construct for FunctionDefinition {
    fn kind(&self) -> ConstructKind {
        ConstructKind::FunctionDefinition
    }
}

impl Construct for Parameter {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Parameter
    }
}

impl Construct for Block {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Block
    }
}

impl Construct for ConstDecl {
    fn kind(&self) -> ConstructKind {
        ConstructKind::ConstDecl
    }
}

impl Construct for ConstDef {
    fn kind(&self) -> ConstructKind {
        ConstructKind::ConstDef
    }
}

impl Construct for ConstInitializer {
    fn kind(&self) -> ConstructKind {
        match self {
            ConstInitializer::Scalar(_) => ConstructKind::ConstInitializerScalar,
            ConstInitializer::Array(_) => ConstructKind::ConstInitializerArray,
        }
    }
}

impl Construct for VarDecl {
    fn kind(&self) -> ConstructKind {
        ConstructKind::VarDecl
    }
}

impl Construct for VarDef {
    fn kind(&self) -> ConstructKind {
        match self {
            VarDef::DefinitionOnly { .. } => ConstructKind::VarDefOnly,
            VarDef::DefinitionWithInit { .. } => ConstructKind::VarDefWithInit,
        }
    }
}

impl Construct for Initializer {
    fn kind(&self) -> ConstructKind {
        match self {
            Initializer::Scalar(_) => ConstructKind::InitializerScalar,
            Initializer::Array(_) => ConstructKind::InitializerArray,
        }
    }
}

impl Construct for Statement {
    fn kind(&self) -> ConstructKind {
        match self {
            Statement::Assign { .. } => ConstructKind::StmtAssign,
            Statement::Expr(_) => ConstructKind::StmtExpr,
            Statement::Block(_) => ConstructKind::StmtBlock,
            Statement::If { .. } => ConstructKind::StmtIf,
            Statement::While { .. } => ConstructKind::StmtWhile,
            Statement::Break => ConstructKind::StmtBreak,
            Statement::Continue => ConstructKind::StmtContinue,
            Statement::Return(_) => ConstructKind::StmtReturn,
        }
    }
}

impl Construct for Expression {
    fn kind(&self) -> ConstructKind {
        match self {
            Expression::LogicalNot(_) => ConstructKind::ExprLogicalNot,
            Expression::Negate(_) => ConstructKind::ExprNegate,
            Expression::Binary { .. } => ConstructKind::ExprBinary,
            Expression::LValue(_) => ConstructKind::ExprLValue,
            Expression::IntegerLiteral(_) => ConstructKind::ExprIntegerLiteral,
            Expression::Call { .. } => ConstructKind::ExprCall,
        }
    }
}

impl Construct for LValue {
    fn kind(&self) -> ConstructKind {
        ConstructKind::LValue
    }
}

/// Borrowed handle to a node reachable through an ownership edge
///
/// The compilation unit is the only node not held behind an `Arc`.
#[derive(Debug, Clone, Copy)]
pub enum ConstructRef<'a> {
    CompUnit(&'a CompUnit),
    FunctionDefinition(&'a Shared<FunctionDefinition>),
    Parameter(&'a Shared<Parameter>),
    Block(&'a Shared<Block>),
    ConstDecl(&'a Shared<ConstDecl>),
    ConstDef(&'a Shared<ConstDef>),
    ConstInitializer(&'a Shared<ConstInitializer>),
    VarDecl(&'a Shared<VarDecl>),
    VarDef(&'a Shared<VarDef>),
    Initializer(&'a Shared<Initializer>),
    Statement(&'a Shared<Statement>),
    Expression(&'a Shared<Expression>),
    LValue(&'a Shared<LValue>),
}

/// An ownership edge: the child plus the field/index it hangs off
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub field: &'static str,
    pub index: Option<usize>,
    pub child: ConstructRef<'a>,
}

impl<'a> Edge<'a> {
    fn single(field: &'static str, child: ConstructRef<'a>) -> Self {
        Self { field, index: None, child }
    }

    fn list<T>(
        field: &'static str,
        children: &'a [Shared<T>],
        wrap: fn(&'a Shared<T>) -> ConstructRef<'a>,
    ) -> impl Iterator<Item = Edge<'a>> + 'a
    where
        T: 'a,
    {
        children.iter().enumerate().map(move |(index, child)| Self {
            field,
            index: Some(index),
            child: wrap(child),
        })
    }
}

fn declaration_ref(decl: &Declaration) -> ConstructRef<'_> {
    match decl {
        Declaration::Const(decl) => ConstructRef::ConstDecl(decl),
        Declaration::Var(decl) => ConstructRef::VarDecl(decl),
    }
}

impl<'a> ConstructRef<'a> {
    pub fn kind(&self) -> ConstructKind {
        match self {
            ConstructRef::CompUnit(node) => node.kind(),
            ConstructRef::FunctionDefinition(node) => node.kind(),
            ConstructRef::Parameter(node) => node.kind(),
            ConstructRef::Block(node) => node.kind(),
            ConstructRef::ConstDecl(node) => node.kind(),
            ConstructRef::ConstDef(node) => node.kind(),
            ConstructRef::ConstInitializer(node) => node.kind(),
            ConstructRef::VarDecl(node) => node.kind(),
            ConstructRef::VarDef(node) => node.kind(),
            ConstructRef::Initializer(node) => node.kind(),
            ConstructRef::Statement(node) => node.kind(),
            ConstructRef::Expression(node) => node.kind(),
            ConstructRef::LValue(node) => node.kind(),
        }
    }

    /// Address of the referenced node; equal addresses mean the same node
    pub fn addr(&self) -> usize {
        match self {
            ConstructRef::CompUnit(node) => *node as *const CompUnit as usize,
            ConstructRef::FunctionDefinition(node) => Arc::as_ptr(node) as usize,
            ConstructRef::Parameter(node) => Arc::as_ptr(node) as usize,
            ConstructRef::Block(node) => Arc::as_ptr(node) as usize,
            ConstructRef::ConstDecl(node) => Arc::as_ptr(node) as usize,
            ConstructRef::ConstDef(node) => Arc::as_ptr(node) as usize,
            ConstructRef::ConstInitializer(node) => Arc::as_ptr(node) as usize,
            ConstructRef::VarDecl(node) => Arc::as_ptr(node) as usize,
            ConstructRef::VarDef(node) => Arc::as_ptr(node) as usize,
            ConstructRef::Initializer(node) => Arc::as_ptr(node) as usize,
            ConstructRef::Statement(node) => Arc::as_ptr(node) as usize,
            ConstructRef::Expression(node) => Arc::as_ptr(node) as usize,
            ConstructRef::LValue(node) => Arc::as_ptr(node) as usize,
        }
    }

    /// Live owners of the referenced node, `None` for the root
    pub fn owner_count(&self) -> Option<usize> {
        match self {
            ConstructRef::CompUnit(_) => None,
            ConstructRef::FunctionDefinition(node) => Some(Arc::strong_count(node)),
            ConstructRef::Parameter(node) => Some(Arc::strong_count(node)),
            ConstructRef::Block(node) => Some(Arc::strong_count(node)),
            ConstructRef::ConstDecl(node) => Some(Arc::strong_count(node)),
            ConstructRef::ConstDef(node) => Some(Arc::strong_count(node)),
            ConstructRef::ConstInitializer(node) => Some(Arc::strong_count(node)),
            ConstructRef::VarDecl(node) => Some(Arc::strong_count(node)),
            ConstructRef::VarDef(node) => Some(Arc::strong_count(node)),
            ConstructRef::Initializer(node) => Some(Arc::strong_count(node)),
            ConstructRef::Statement(node) => Some(Arc::strong_count(node)),
            ConstructRef::Expression(node) => Some(Arc::strong_count(node)),
            ConstructRef::LValue(node) => Some(Arc::strong_count(node)),
        }
    }

    /// Outgoing ownership edges in source order
    pub fn edges(&self) -> Vec<Edge<'a>> {
        let mut edges = Vec::new();
        match *self {
            ConstructRef::CompUnit(unit) => {
                for (index, item) in unit.items.iter().enumerate() {
                    let child = match item {
                        CompUnitItem::Decl(decl) => declaration_ref(decl),
                        CompUnitItem::FuncDef(func) => ConstructRef::FunctionDefinition(func),
                    };
                    edges.push(Edge { field: "items", index: Some(index), child });
                }
            }
            ConstructRef::FunctionDefinition(func) => {
                edges.extend(Edge::list("params", &func.params, ConstructRef::Parameter));
                edges.push(Edge::single("body", ConstructRef::Block(&func.body)));
            }
            ConstructRef::Parameter(param) => {
                if let ParamShape::Array { trailing_dims } = &param.shape {
                    let dims = Edge::list("trailing_dims", trailing_dims, ConstructRef::Expression);
                    edges.extend(dims);
                }
            }
            ConstructRef::Block(block) => {
                for (index, item) in block.items.iter().enumerate() {
                    let child = match item {
                        BlockItem::Decl(decl) => declaration_ref(decl),
                        BlockItem::Stmt(stmt) => ConstructRef::Statement(stmt),
                    };
                    edges.push(Edge { field: "items", index: Some(index), child });
                }
            }
            ConstructRef::ConstDecl(decl) => {
                edges.extend(Edge::list("defs", &decl.defs, ConstructRef::ConstDef));
            }
            ConstructRef::ConstDef(def) => {
                edges.extend(Edge::list("array_dims", &def.array_dims, ConstructRef::Expression));
                edges.push(Edge::single("init", ConstructRef::ConstInitializer(&def.init)));
            }
            ConstructRef::ConstInitializer(init) => match init.as_ref() {
                ConstInitializer::Scalar(expr) => {
                    edges.push(Edge::single("expr", ConstructRef::Expression(expr)));
                }
                ConstInitializer::Array(elements) => {
                    edges.extend(Edge::list("elements", elements, ConstructRef::ConstInitializer));
                }
            },
            ConstructRef::VarDecl(decl) => {
                edges.extend(Edge::list("defs", &decl.defs, ConstructRef::VarDef));
            }
            ConstructRef::VarDef(def) => {
                edges.extend(Edge::list("array_dims", def.array_dims(), ConstructRef::Expression));
                if let Some(init) = def.init() {
                    edges.push(Edge::single("init", ConstructRef::Initializer(init)));
                }
            }
            ConstructRef::Initializer(init) => match init.as_ref() {
                Initializer::Scalar(expr) => {
                    edges.push(Edge::single("expr", ConstructRef::Expression(expr)));
                }
                Initializer::Array(elements) => {
                    edges.extend(Edge::list("elements", elements, ConstructRef::Initializer));
                }
            },
            ConstructRef::Statement(stmt) => match stmt.as_ref() {
                Statement::Assign { target, value } => {
                    edges.push(Edge::single("target", ConstructRef::LValue(target)));
                    edges.push(Edge::single("value", ConstructRef::Expression(value)));
                }
                Statement::Expr(expr) => {
                    edges.push(Edge::single("expr", ConstructRef::Expression(expr)));
                }
                Statement::Block(block) => {
                    edges.push(Edge::single("block", ConstructRef::Block(block)));
                }
                Statement::If { cond, then_branch, else_branch } => {
                    edges.push(Edge::single("cond", ConstructRef::Expression(cond)));
                    edges.push(Edge::single("then_branch", ConstructRef::Statement(then_branch)));
                    if let Some(else_branch) = else_branch {
                        let child = ConstructRef::Statement(else_branch);
                        edges.push(Edge::single("else_branch", child));
                    }
                }
                Statement::While { cond, body } => {
                    edges.push(Edge::single("cond", ConstructRef::Expression(cond)));
                    edges.push(Edge::single("body", ConstructRef::Statement(body)));
                }
                Statement::Return(Some(value)) => {
                    edges.push(Edge::single("value", ConstructRef::Expression(value)));
                }
                Statement::Break | Statement::Continue | Statement::Return(None) => {}
            },
            ConstructRef::Expression(expr) => match expr.as_ref() {
                Expression::LogicalNot(operand) | Expression::Negate(operand) => {
                    edges.push(Edge::single("operand", ConstructRef::Expression(operand)));
                }
                Expression::Binary { lhs, rhs, .. } => {
                    edges.push(Edge::single("lhs", ConstructRef::Expression(lhs)));
                    edges.push(Edge::single("rhs", ConstructRef::Expression(rhs)));
                }
                Expression::LValue(lvalue) => {
                    edges.push(Edge::single("lvalue", ConstructRef::LValue(lvalue)));
                }
                Expression::IntegerLiteral(_) => {}
                Expression::Call { args, .. } => {
                    edges.extend(Edge::list("args", args, ConstructRef::Expression));
                }
            },
            ConstructRef::LValue(lvalue) => {
                edges.extend(Edge::list("indices", &lvalue.indices, ConstructRef::Expression));
            }
        }
        edges
    }

    pub fn children(&self) -> Vec<ConstructRef<'a>> {
        self.edges().into_iter().map(|edge| edge.child).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_variants() {
        assert_eq!(Statement::Break.kind(), ConstructKind::StmtBreak);
        assert_eq!(Expression::IntegerLiteral(3).kind(), ConstructKind::ExprIntegerLiteral);
        assert_eq!(BaseType::Int.kind(), ConstructKind::BaseType);
        assert_eq!(ConstructKind::ExprCall.to_string(), "ExprCall");
    }

    #[test]
    fn test_edges_in_source_order() {
        let one = Arc::new(Expression::IntegerLiteral(1));
        let two = Arc::new(Expression::IntegerLiteral(2));
        let call = Arc::new(Expression::call("f", vec![one.clone(), two.clone()]));

        let edges = ConstructRef::Expression(&call).edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].field, "args");
        assert_eq!(edges[0].index, Some(0));
        assert_eq!(edges[0].child.addr(), Arc::as_ptr(&one) as usize);
        assert_eq!(edges[1].child.addr(), Arc::as_ptr(&two) as usize);
    }

    #[test]
    fn test_absent_else_has_no_edge() {
        let cond = Arc::new(Expression::IntegerLiteral(1));
        let stmt = Arc::new(Statement::if_then(cond, Arc::new(Statement::Break)));

        let kinds: Vec<_> = ConstructRef::Statement(&stmt)
            .children()
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(kinds, vec![ConstructKind::ExprIntegerLiteral, ConstructKind::StmtBreak]);
    }

    #[test]
    fn test_owner_count_tracks_sharing() {
        let shared = Arc::new(Expression::IntegerLiteral(7));
        let sum = Arc::new(Expression::binary(BinaryOp::Plus, shared.clone(), shared.clone()));

        let children = ConstructRef::Expression(&sum).children();
        assert_eq!(children[0].addr(), children[1].addr());
        assert_eq!(children[0].owner_count(), Some(3));
    }
}
