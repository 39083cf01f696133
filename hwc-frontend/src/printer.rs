//! Source printer
//!
//! Renders a tree back to source-grammar text. Parentheses are emitted only
//! where precedence or associativity needs them, and braces are added around
//! a then-branch whose trailing `if` would otherwise capture the `else`.

use crate::ast::*;
use std::fmt;

/// Unary operators bind tighter than every binary level
const UNARY_PRECEDENCE: u8 = 7;

fn fmt_expr(
    expr: &Expression,
    f: &mut fmt::Formatter<'_>,
    parent: u8,
    right_operand: bool,
) -> fmt::Result {
    match expr {
        Expression::IntegerLiteral(value) => write!(f, "{}", value),
        Expression::LValue(lvalue) => write!(f, "{}", lvalue),
        Expression::Call { callee, args } => {
            write!(f, "{}(", callee)?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                fmt_expr(arg, f, 0, false)?;
            }
            write!(f, ")")
        }
        Expression::LogicalNot(operand) => fmt_unary(UnaryOp::LogicalNot, operand, f),
        Expression::Negate(operand) => fmt_unary(UnaryOp::Negative, operand, f),
        Expression::Binary { op, lhs, rhs } => {
            let prec = op.precedence();
            let parens = prec < parent || (prec == parent && right_operand);
            if parens {
                write!(f, "(")?;
            }
            fmt_expr(lhs, f, prec, false)?;
            write!(f, " {} ", op)?;
            fmt_expr(rhs, f, prec, true)?;
            if parens {
                write!(f, ")")?;
            }
            Ok(())
        }
    }
}

fn fmt_unary(op: UnaryOp, operand: &Expression, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", op)?;
    // `- -x` and `-(-1)` must not print as `--x` / `--1`
    let parens = match operand {
        Expression::Negate(_) | Expression::LogicalNot(_) => true,
        Expression::IntegerLiteral(value) => *value < 0,
        _ => false,
    };
    if parens {
        write!(f, "(")?;
        fmt_expr(operand, f, 0, false)?;
        write!(f, ")")
    } else {
        fmt_expr(operand, f, UNARY_PRECEDENCE, false)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_expr(self, f, 0, false)
    }
}

impl fmt::Display for LValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ident)?;
        for index in &self.indices {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

fn fmt_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, elements: &[Shared<T>]) -> fmt::Result {
    write!(f, "{{")?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", element)?;
    }
    write!(f, "}}")
}

impl fmt::Display for ConstInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstInitializer::Scalar(expr) => write!(f, "{}", expr),
            ConstInitializer::Array(elements) => fmt_list(f, elements),
        }
    }
}

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Initializer::Scalar(expr) => write!(f, "{}", expr),
            Initializer::Array(elements) => fmt_list(f, elements),
        }
    }
}

fn dims(array_dims: &[Shared<Expression>]) -> String {
    array_dims.iter().map(|dim| format!("[{}]", dim)).collect()
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defs: Vec<String> = match self {
            Declaration::Const(decl) => {
                write!(f, "const {} ", decl.base_type)?;
                decl.defs
                    .iter()
                    .map(|def| format!("{}{} = {}", def.ident, dims(&def.array_dims), def.init))
                    .collect()
            }
            Declaration::Var(decl) => {
                write!(f, "{} ", decl.base_type)?;
                decl.defs
                    .iter()
                    .map(|def| {
                        let declarator = format!("{}{}", def.ident(), dims(def.array_dims()));
                        match def.init() {
                            Some(init) => format!("{} = {}", declarator, init),
                            None => declarator,
                        }
                    })
                    .collect()
            }
        };
        write!(f, "{};", defs.join(", "))
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.base_type, self.ident)?;
        if let ParamShape::Array { trailing_dims } = &self.shape {
            write!(f, "[]{}", dims(trailing_dims))?;
        }
        Ok(())
    }
}

/// True when `stmt` ends in an `if` without `else`, which would capture a
/// following `else` if printed unbraced.
fn ends_in_open_if(stmt: &Statement) -> bool {
    match stmt {
        Statement::If { else_branch: None, .. } => true,
        Statement::If { else_branch: Some(else_branch), .. } => ends_in_open_if(else_branch),
        Statement::While { body, .. } => ends_in_open_if(body),
        _ => false,
    }
}

struct SourcePrinter {
    out: String,
    indent: usize,
}

impl SourcePrinter {
    fn new() -> Self {
        Self { out: String::new(), indent: 0 }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn write_unit(&mut self, unit: &CompUnit) {
        let mut previous_was_func = false;
        for (i, item) in unit.items.iter().enumerate() {
            let is_func = matches!(item, CompUnitItem::FuncDef(_));
            if i > 0 && (is_func || previous_was_func) {
                self.out.push('\n');
            }
            match item {
                CompUnitItem::Decl(decl) => self.out.push_str(&format!("{}\n", decl)),
                CompUnitItem::FuncDef(func) => self.write_function(func),
            }
            previous_was_func = is_func;
        }
    }

    fn write_function(&mut self, func: &FunctionDefinition) {
        let params: Vec<String> = func.params.iter().map(|p| p.to_string()).collect();
        self.out.push_str(&format!(
            "{} {}({}) ",
            func.return_type,
            func.ident,
            params.join(", ")
        ));
        self.write_braced(&func.body);
        self.out.push('\n');
    }

    /// Writes `{ ... }` without a trailing newline
    fn write_braced(&mut self, block: &Block) {
        if block.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.indent += 1;
        for item in &block.items {
            match item {
                BlockItem::Decl(decl) => {
                    self.write_indent();
                    self.out.push_str(&format!("{}\n", decl));
                }
                BlockItem::Stmt(stmt) => self.write_stmt(stmt),
            }
        }
        self.indent -= 1;
        self.write_indent();
        self.out.push('}');
    }

    fn write_stmt(&mut self, stmt: &Statement) {
        self.write_indent();
        self.write_stmt_inline(stmt);
    }

    /// Writes `stmt` at the current position, through its final newline
    fn write_stmt_inline(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Assign { target, value } => {
                self.out.push_str(&format!("{} = {};\n", target, value));
            }
            Statement::Expr(expr) => self.out.push_str(&format!("{};\n", expr)),
            Statement::Block(block) => {
                self.write_braced(block);
                self.out.push('\n');
            }
            Statement::If { cond, then_branch, else_branch } => {
                self.out.push_str(&format!("if ({})", cond));
                let force_braces = else_branch.is_some() && ends_in_open_if(then_branch);
                let closed_inline = self.write_branch(then_branch, force_braces);
                match else_branch {
                    None => {
                        if closed_inline {
                            self.out.push('\n');
                        }
                    }
                    Some(else_branch) => {
                        if closed_inline {
                            self.out.push_str(" else");
                        } else {
                            self.write_indent();
                            self.out.push_str("else");
                        }
                        if let Statement::If { .. } = else_branch.as_ref() {
                            self.out.push(' ');
                            self.write_stmt_inline(else_branch);
                        } else if self.write_branch(else_branch, false) {
                            self.out.push('\n');
                        }
                    }
                }
            }
            Statement::While { cond, body } => {
                self.out.push_str(&format!("while ({})", cond));
                if self.write_branch(body, false) {
                    self.out.push('\n');
                }
            }
            Statement::Break => self.out.push_str("break;\n"),
            Statement::Continue => self.out.push_str("continue;\n"),
            Statement::Return(None) => self.out.push_str("return;\n"),
            Statement::Return(Some(value)) => self.out.push_str(&format!("return {};\n", value)),
        }
    }

    /// Writes the body of an `if`/`else`/`while`. Returns true when the body
    /// ended with a closing brace on the current line.
    fn write_branch(&mut self, stmt: &Statement, force_braces: bool) -> bool {
        match stmt {
            Statement::Block(block) => {
                self.out.push(' ');
                self.write_braced(block);
                true
            }
            _ if force_braces => {
                self.out.push_str(" {\n");
                self.indent += 1;
                self.write_stmt(stmt);
                self.indent -= 1;
                self.write_indent();
                self.out.push('}');
                true
            }
            _ => {
                self.out.push('\n');
                self.indent += 1;
                self.write_stmt(stmt);
                self.indent -= 1;
                false
            }
        }
    }
}

/// Render a whole compilation unit
pub fn print_unit(unit: &CompUnit) -> String {
    let mut printer = SourcePrinter::new();
    printer.write_unit(unit);
    printer.out
}

/// Render a single statement at top-level indentation
pub fn print_statement(stmt: &Statement) -> String {
    let mut printer = SourcePrinter::new();
    printer.write_stmt(stmt);
    printer.out
}
