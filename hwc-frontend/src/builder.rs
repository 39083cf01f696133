//! Reduce-style tree construction
//!
//! `AstBuilder` has one method per grammar reduction. Each takes the
//! already-built children and returns the new node behind an `Arc`, so a
//! parser can hand the result straight to the next reduction. None of these
//! calls validate anything; the input is assumed grammatical.

use crate::ast::*;
use log::trace;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct AstBuilder {
    nodes_built: usize,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self { nodes_built: 0 }
    }

    /// Number of nodes constructed so far
    pub fn nodes_built(&self) -> usize {
        self.nodes_built
    }

    fn node<T>(&mut self, production: &str, node: T) -> Shared<T> {
        self.nodes_built += 1;
        trace!("reduce {} (node #{})", production, self.nodes_built);
        Arc::new(node)
    }

    // Expressions

    pub fn int_literal(&mut self, value: i32) -> Shared<Expression> {
        self.node("Number", Expression::IntegerLiteral(value))
    }

    pub fn lvalue(
        &mut self,
        ident: impl Into<Identifier>,
        indices: SharedList<Expression>,
    ) -> Shared<LValue> {
        self.node("LVal", LValue::new(ident, indices))
    }

    /// LVal used in an expression position
    pub fn lvalue_expr(&mut self, lvalue: Shared<LValue>) -> Shared<Expression> {
        self.node("PrimaryExp", Expression::LValue(lvalue))
    }

    /// Shorthand for a scalar variable reference
    pub fn var(&mut self, ident: impl Into<Identifier>) -> Shared<Expression> {
        let lvalue = self.lvalue(ident, Vec::new());
        self.lvalue_expr(lvalue)
    }

    /// `UnaryOp UnaryExp`. Unary plus builds no node and yields the operand.
    pub fn unary(&mut self, op: UnaryOp, operand: Shared<Expression>) -> Shared<Expression> {
        match op {
            UnaryOp::Positive => {
                trace!("reduce UnaryExp (+ elided)");
                operand
            }
            UnaryOp::Negative => self.node("UnaryExp", Expression::Negate(operand)),
            UnaryOp::LogicalNot => self.node("UnaryExp", Expression::LogicalNot(operand)),
        }
    }

    pub fn binary(
        &mut self,
        op: BinaryOp,
        lhs: Shared<Expression>,
        rhs: Shared<Expression>,
    ) -> Shared<Expression> {
        self.node("BinaryExp", Expression::binary(op, lhs, rhs))
    }

    pub fn call(
        &mut self,
        callee: impl Into<Identifier>,
        args: SharedList<Expression>,
    ) -> Shared<Expression> {
        self.node("FuncCall", Expression::call(callee, args))
    }

    // Declarations

    pub fn const_def(
        &mut self,
        ident: impl Into<Identifier>,
        array_dims: SharedList<Expression>,
        init: Shared<ConstInitializer>,
    ) -> Shared<ConstDef> {
        self.node("ConstDef", ConstDef::new(ident, array_dims, init))
    }

    pub fn const_init_scalar(&mut self, expr: Shared<Expression>) -> Shared<ConstInitializer> {
        self.node("ConstInitVal", ConstInitializer::Scalar(expr))
    }

    pub fn const_init_array(
        &mut self,
        elements: SharedList<ConstInitializer>,
    ) -> Shared<ConstInitializer> {
        self.node("ConstInitVal", ConstInitializer::Array(elements))
    }

    pub fn const_decl(
        &mut self,
        base_type: BaseType,
        first: Shared<ConstDef>,
        rest: SharedList<ConstDef>,
    ) -> Declaration {
        Declaration::Const(self.node("ConstDecl", ConstDecl::new(base_type, first, rest)))
    }

    pub fn var_def(
        &mut self,
        ident: impl Into<Identifier>,
        array_dims: SharedList<Expression>,
    ) -> Shared<VarDef> {
        let def = VarDef::DefinitionOnly { ident: ident.into(), array_dims };
        self.node("VarDef", def)
    }

    pub fn var_def_init(
        &mut self,
        ident: impl Into<Identifier>,
        array_dims: SharedList<Expression>,
        init: Shared<Initializer>,
    ) -> Shared<VarDef> {
        let def = VarDef::DefinitionWithInit { ident: ident.into(), array_dims, init };
        self.node("VarDef", def)
    }

    pub fn init_scalar(&mut self, expr: Shared<Expression>) -> Shared<Initializer> {
        self.node("InitVal", Initializer::Scalar(expr))
    }

    pub fn init_array(&mut self, elements: SharedList<Initializer>) -> Shared<Initializer> {
        self.node("InitVal", Initializer::Array(elements))
    }

    pub fn var_decl(
        &mut self,
        base_type: BaseType,
        first: Shared<VarDef>,
        rest: SharedList<VarDef>,
    ) -> Declaration {
        Declaration::Var(self.node("VarDecl", VarDecl::new(base_type, first, rest)))
    }

    // Statements

    pub fn assign(
        &mut self,
        target: Shared<LValue>,
        value: Shared<Expression>,
    ) -> Shared<Statement> {
        self.node("Stmt", Statement::Assign { target, value })
    }

    pub fn expr_stmt(&mut self, expr: Shared<Expression>) -> Shared<Statement> {
        self.node("Stmt", Statement::Expr(expr))
    }

    pub fn block_stmt(&mut self, block: Shared<Block>) -> Shared<Statement> {
        self.node("Stmt", Statement::Block(block))
    }

    pub fn if_stmt(
        &mut self,
        cond: Shared<Expression>,
        then_branch: Shared<Statement>,
        else_branch: Option<Shared<Statement>>,
    ) -> Shared<Statement> {
        self.node("Stmt", Statement::If { cond, then_branch, else_branch })
    }

    pub fn while_stmt(
        &mut self,
        cond: Shared<Expression>,
        body: Shared<Statement>,
    ) -> Shared<Statement> {
        self.node("Stmt", Statement::While { cond, body })
    }

    pub fn break_stmt(&mut self) -> Shared<Statement> {
        self.node("Stmt", Statement::Break)
    }

    pub fn continue_stmt(&mut self) -> Shared<Statement> {
        self.node("Stmt", Statement::Continue)
    }

    pub fn return_stmt(&mut self, value: Option<Shared<Expression>>) -> Shared<Statement> {
        self.node("Stmt", Statement::Return(value))
    }

    pub fn block(&mut self, items: Vec<BlockItem>) -> Shared<Block> {
        self.node("Block", Block::new(items))
    }

    // Functions and the unit

    pub fn param(
        &mut self,
        base_type: BaseType,
        ident: impl Into<Identifier>,
    ) -> Shared<Parameter> {
        self.node("FuncFParam", Parameter::scalar(base_type, ident))
    }

    /// `BType Ident '[' ']' { '[' Exp ']' }`
    pub fn array_param(
        &mut self,
        base_type: BaseType,
        ident: impl Into<Identifier>,
        trailing_dims: SharedList<Expression>,
    ) -> Shared<Parameter> {
        self.node("FuncFParam", Parameter::array(base_type, ident, trailing_dims))
    }

    pub fn func_def(
        &mut self,
        return_type: BaseType,
        ident: impl Into<Identifier>,
        params: SharedList<Parameter>,
        body: Shared<Block>,
    ) -> Shared<FunctionDefinition> {
        let func = FunctionDefinition::new(return_type, ident, params, body);
        self.node("FuncDef", func)
    }

    pub fn comp_unit(&mut self, items: Vec<CompUnitItem>) -> CompUnit {
        self.nodes_built += 1;
        trace!("reduce CompUnit ({} items, {} nodes)", items.len(), self.nodes_built);
        CompUnit::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_every_reduction() {
        let mut b = AstBuilder::new();
        let zero = b.int_literal(0);
        let ret = b.return_stmt(Some(zero));
        let body = b.block(vec![ret.into()]);
        let main = b.func_def(BaseType::Int, "main", Vec::new(), body);
        let _unit = b.comp_unit(vec![main.into()]);

        assert_eq!(b.nodes_built(), 5);
    }

    #[test]
    fn test_unary_plus_is_elided() {
        let mut b = AstBuilder::new();
        let x = b.var("x");
        let plus = b.unary(UnaryOp::Positive, x.clone());
        assert!(Arc::ptr_eq(&plus, &x));

        let neg = b.unary(UnaryOp::Negative, x.clone());
        assert!(matches!(neg.as_ref(), Expression::Negate(_)));
        let not = b.unary(UnaryOp::LogicalNot, neg);
        assert!(matches!(not.as_ref(), Expression::LogicalNot(_)));
    }

    #[test]
    fn test_logical_operator_in_arithmetic_context() {
        // x = (a && b) + 1;
        let mut b = AstBuilder::new();
        let a = b.var("a");
        let bv = b.var("b");
        let and = b.binary(BinaryOp::LogicalAnd, a, bv);
        let one = b.int_literal(1);
        let sum = b.binary(BinaryOp::Plus, and, one);
        let x = b.lvalue("x", Vec::new());
        let stmt = b.assign(x, sum);

        match stmt.as_ref() {
            Statement::Assign { value, .. } => match value.as_ref() {
                Expression::Binary { op, lhs, .. } => {
                    assert_eq!(*op, BinaryOp::Plus);
                    assert!(matches!(
                        lhs.as_ref(),
                        Expression::Binary { op: BinaryOp::LogicalAnd, .. }
                    ));
                }
                other => panic!("Expected binary expression, got {:?}", other),
            },
            other => panic!("Expected assignment, got {:?}", other),
        }
    }
}
