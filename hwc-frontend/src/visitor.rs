//! Read-only tree traversal
//!
//! Override the `visit_*` methods of interest and call the matching `walk_*`
//! function to keep descending. Children are visited in source order. A
//! subtree attached in several places is visited once per attachment.

use crate::ast::*;
use crate::construct::{Construct, ConstructKind};
use std::collections::BTreeMap;

pub trait Visitor {
    fn visit_comp_unit(&mut self, unit: &CompUnit) {
        walk_comp_unit(self, unit)
    }

    fn visit_declaration(&mut self, decl: &Declaration) {
        walk_declaration(self, decl)
    }

    fn visit_const_def(&mut self, def: &ConstDef) {
        walk_const_def(self, def)
    }

    fn visit_const_initializer(&mut self, init: &ConstInitializer) {
        walk_const_initializer(self, init)
    }

    fn visit_var_def(&mut self, def: &VarDef) {
        walk_var_def(self, def)
    }

    fn visit_initializer(&mut self, init: &Initializer) {
        walk_initializer(self, init)
    }

    fn visit_function(&mut self, func: &FunctionDefinition) {
        walk_function(self, func)
    }

    fn visit_parameter(&mut self, param: &Parameter) {
        walk_parameter(self, param)
    }

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block)
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt)
    }

    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr)
    }

    fn visit_lvalue(&mut self, lvalue: &LValue) {
        walk_lvalue(self, lvalue)
    }
}

pub fn walk_comp_unit<V: Visitor + ?Sized>(v: &mut V, unit: &CompUnit) {
    for item in &unit.items {
        match item {
            CompUnitItem::Decl(decl) => v.visit_declaration(decl),
            CompUnitItem::FuncDef(func) => v.visit_function(func),
        }
    }
}

pub fn walk_declaration<V: Visitor + ?Sized>(v: &mut V, decl: &Declaration) {
    match decl {
        Declaration::Const(decl) => decl.defs.iter().for_each(|def| v.visit_const_def(def)),
        Declaration::Var(decl) => decl.defs.iter().for_each(|def| v.visit_var_def(def)),
    }
}

pub fn walk_const_def<V: Visitor + ?Sized>(v: &mut V, def: &ConstDef) {
    for dim in &def.array_dims {
        v.visit_expression(dim);
    }
    v.visit_const_initializer(&def.init);
}

pub fn walk_const_initializer<V: Visitor + ?Sized>(v: &mut V, init: &ConstInitializer) {
    match init {
        ConstInitializer::Scalar(expr) => v.visit_expression(expr),
        ConstInitializer::Array(elements) => {
            elements.iter().for_each(|e| v.visit_const_initializer(e))
        }
    }
}

pub fn walk_var_def<V: Visitor + ?Sized>(v: &mut V, def: &VarDef) {
    for dim in def.array_dims() {
        v.visit_expression(dim);
    }
    if let Some(init) = def.init() {
        v.visit_initializer(init);
    }
}

pub fn walk_initializer<V: Visitor + ?Sized>(v: &mut V, init: &Initializer) {
    match init {
        Initializer::Scalar(expr) => v.visit_expression(expr),
        Initializer::Array(elements) => elements.iter().for_each(|e| v.visit_initializer(e)),
    }
}

pub fn walk_function<V: Visitor + ?Sized>(v: &mut V, func: &FunctionDefinition) {
    for param in &func.params {
        v.visit_parameter(param);
    }
    v.visit_block(&func.body);
}

pub fn walk_parameter<V: Visitor + ?Sized>(v: &mut V, param: &Parameter) {
    if let ParamShape::Array { trailing_dims } = &param.shape {
        trailing_dims.iter().for_each(|dim| v.visit_expression(dim));
    }
}

pub fn walk_block<V: Visitor + ?Sized>(v: &mut V, block: &Block) {
    for item in &block.items {
        match item {
            BlockItem::Decl(decl) => v.visit_declaration(decl),
            BlockItem::Stmt(stmt) => v.visit_statement(stmt),
        }
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, stmt: &Statement) {
    match stmt {
        Statement::Assign { target, value } => {
            v.visit_lvalue(target);
            v.visit_expression(value);
        }
        Statement::Expr(expr) => v.visit_expression(expr),
        Statement::Block(block) => v.visit_block(block),
        Statement::If { cond, then_branch, else_branch } => {
            v.visit_expression(cond);
            v.visit_statement(then_branch);
            if let Some(else_branch) = else_branch {
                v.visit_statement(else_branch);
            }
        }
        Statement::While { cond, body } => {
            v.visit_expression(cond);
            v.visit_statement(body);
        }
        Statement::Return(Some(value)) => v.visit_expression(value),
        Statement::Break | Statement::Continue | Statement::Return(None) => {}
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(v: &mut V, expr: &Expression) {
    match expr {
        Expression::LogicalNot(operand) | Expression::Negate(operand) => {
            v.visit_expression(operand)
        }
        Expression::Binary { lhs, rhs, .. } => {
            v.visit_expression(lhs);
            v.visit_expression(rhs);
        }
        Expression::LValue(lvalue) => v.visit_lvalue(lvalue),
        Expression::IntegerLiteral(_) => {}
        Expression::Call { args, .. } => args.iter().for_each(|arg| v.visit_expression(arg)),
    }
}

pub fn walk_lvalue<V: Visitor + ?Sized>(v: &mut V, lvalue: &LValue) {
    for index in &lvalue.indices {
        v.visit_expression(index);
    }
}

/// Tallies constructs by kind, counting shared subtrees once per attachment
#[derive(Debug, Clone, Default)]
pub struct ConstructCounter {
    counts: BTreeMap<ConstructKind, usize>,
}

impl ConstructCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(unit: &CompUnit) -> Self {
        let mut counter = Self::new();
        counter.visit_comp_unit(unit);
        counter
    }

    fn bump(&mut self, kind: ConstructKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn get(&self, kind: ConstructKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstructKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

impl Visitor for ConstructCounter {
    fn visit_comp_unit(&mut self, unit: &CompUnit) {
        self.bump(unit.kind());
        walk_comp_unit(self, unit);
    }

    fn visit_declaration(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Const(decl) => self.bump(decl.kind()),
            Declaration::Var(decl) => self.bump(decl.kind()),
        }
        walk_declaration(self, decl);
    }

    fn visit_const_def(&mut self, def: &ConstDef) {
        self.bump(def.kind());
        walk_const_def(self, def);
    }

    fn visit_const_initializer(&mut self, init: &ConstInitializer) {
        self.bump(init.kind());
        walk_const_initializer(self, init);
    }

    fn visit_var_def(&mut self, def: &VarDef) {
        self.bump(def.kind());
        walk_var_def(self, def);
    }

    fn visit_initializer(&mut self, init: &Initializer) {
        self.bump(init.kind());
        walk_initializer(self, init);
    }

    fn visit_function(&mut self, func: &FunctionDefinition) {
        self.bump(func.kind());
        walk_function(self, func);
    }

    fn visit_parameter(&mut self, param: &Parameter) {
        self.bump(param.kind());
        walk_parameter(self, param);
    }

    fn visit_block(&mut self, block: &Block) {
        self.bump(block.kind());
        walk_block(self, block);
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        self.bump(stmt.kind());
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &Expression) {
        self.bump(expr.kind());
        walk_expression(self, expr);
    }

    fn visit_lvalue(&mut self, lvalue: &LValue) {
        self.bump(lvalue.kind());
        walk_lvalue(self, lvalue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AstBuilder;

    #[test]
    fn test_counter_counts_shared_subtree_per_attachment() {
        let mut b = AstBuilder::new();
        let shared = b.int_literal(4);
        let sum = b.binary(BinaryOp::Plus, shared.clone(), shared);
        let ret = b.return_stmt(Some(sum));
        let body = b.block(vec![ret.into()]);
        let main = b.func_def(BaseType::Int, "main", Vec::new(), body);
        let unit = b.comp_unit(vec![main.into()]);

        let counts = ConstructCounter::count(&unit);
        assert_eq!(counts.get(ConstructKind::ExprIntegerLiteral), 2);
        assert_eq!(counts.get(ConstructKind::ExprBinary), 1);
        assert_eq!(counts.get(ConstructKind::StmtReturn), 1);
        assert_eq!(counts.get(ConstructKind::CompUnit), 1);
        assert_eq!(counts.total(), 7);
    }

    #[derive(Default)]
    struct CallCollector {
        callees: Vec<String>,
    }

    impl Visitor for CallCollector {
        fn visit_expression(&mut self, expr: &Expression) {
            if let Expression::Call { callee, .. } = expr {
                self.callees.push(callee.text.clone());
            }
            walk_expression(self, expr);
        }
    }

    #[test]
    fn test_partial_visitor_reaches_nested_calls() {
        // g(f(1));  while (h()) break;
        let mut b = AstBuilder::new();
        let one = b.int_literal(1);
        let inner = b.call("f", vec![one]);
        let outer = b.call("g", vec![inner]);
        let first = b.expr_stmt(outer);
        let cond = b.call("h", Vec::new());
        let brk = b.break_stmt();
        let second = b.while_stmt(cond, brk);
        let body = b.block(stmt_items(vec![first, second]));
        let main = b.func_def(BaseType::Void, "main", Vec::new(), body);
        let unit = b.comp_unit(vec![main.into()]);

        let mut collector = CallCollector::default();
        collector.visit_comp_unit(&unit);
        assert_eq!(collector.callees, vec!["g", "f", "h"]);
    }
}
