//! Built-in sample trees
//!
//! There is no parser in this repository, so these stand in for parsed
//! programs in the driver and in tests. Each is assembled bottom-up through
//! `AstBuilder` exactly as a parser's reductions would.

use crate::ast::*;
use crate::builder::AstBuilder;

pub const SAMPLE_NAMES: &[&str] = &["main", "array", "loop", "shared"];

/// Look up a sample by name
pub fn sample(name: &str) -> Option<CompUnit> {
    match name {
        "main" => Some(return_zero()),
        "array" => Some(const_array()),
        "loop" => Some(sum_loop()),
        "shared" => Some(shared_subexpression()),
        _ => None,
    }
}

/// `int main(){return 0;}`
pub fn return_zero() -> CompUnit {
    let mut b = AstBuilder::new();
    let zero = b.int_literal(0);
    let ret = b.return_stmt(Some(zero));
    let body = b.block(vec![ret.into()]);
    let main = b.func_def(BaseType::Int, "main", Vec::new(), body);
    b.comp_unit(vec![main.into()])
}

/// `const int a[2] = {1,2};`
pub fn const_array() -> CompUnit {
    let mut b = AstBuilder::new();
    let two = b.int_literal(2);
    let one = b.int_literal(1);
    let first = b.const_init_scalar(one);
    let second_value = b.int_literal(2);
    let second = b.const_init_scalar(second_value);
    let init = b.const_init_array(vec![first, second]);
    let def = b.const_def("a", vec![two], init);
    let decl = b.const_decl(BaseType::Int, def, Vec::new());
    b.comp_unit(vec![decl.into()])
}

/// Summing loop over an array parameter, with globals and a nested
/// initializer:
///
/// ```text
/// int n = 4;
/// int data[2][2] = {{1, 2}, {3}};
///
/// int sum(int a[], int len) {
///     int i = 0, s;
///     s = 0;
///     while (i < len) {
///         if (a[i] < 0)
///             break;
///         else
///             s = s + a[i];
///         i = i + 1;
///     }
///     return s;
/// }
///
/// int main() {
///     return sum(data[0], n);
/// }
/// ```
pub fn sum_loop() -> CompUnit {
    let mut b = AstBuilder::new();

    // int n = 4;
    let four = b.int_literal(4);
    let n_init = b.init_scalar(four);
    let n_def = b.var_def_init("n", Vec::new(), n_init);
    let n_decl = b.var_decl(BaseType::Int, n_def, Vec::new());

    // int data[2][2] = {{1, 2}, {3}};
    let rows = b.int_literal(2);
    let cols = b.int_literal(2);
    let mut scalars = Vec::new();
    for value in [1, 2, 3] {
        let lit = b.int_literal(value);
        scalars.push(b.init_scalar(lit));
    }
    let third = scalars.pop().into_iter().collect();
    let row0 = b.init_array(scalars);
    let row1 = b.init_array(third);
    let data_init = b.init_array(vec![row0, row1]);
    let data_def = b.var_def_init("data", vec![rows, cols], data_init);
    let data_decl = b.var_decl(BaseType::Int, data_def, Vec::new());

    // int sum(int a[], int len) { ... }
    let a_param = b.array_param(BaseType::Int, "a", Vec::new());
    let len_param = b.param(BaseType::Int, "len");

    let zero = b.int_literal(0);
    let i_init = b.init_scalar(zero);
    let i_def = b.var_def_init("i", Vec::new(), i_init);
    let s_def = b.var_def("s", Vec::new());
    let locals = b.var_decl(BaseType::Int, i_def, vec![s_def]);

    let s_target = b.lvalue("s", Vec::new());
    let zero = b.int_literal(0);
    let reset = b.assign(s_target, zero);

    let i = b.var("i");
    let len = b.var("len");
    let cond = b.binary(BinaryOp::Less, i, len);

    let i = b.var("i");
    let a_i = b.lvalue("a", vec![i]);
    let a_i = b.lvalue_expr(a_i);
    let zero = b.int_literal(0);
    let negative = b.binary(BinaryOp::Less, a_i.clone(), zero);
    let stop = b.break_stmt();
    let s = b.var("s");
    let total = b.binary(BinaryOp::Plus, s, a_i);
    let s_target = b.lvalue("s", Vec::new());
    let accumulate = b.assign(s_target, total);
    let check = b.if_stmt(negative, stop, Some(accumulate));

    let i = b.var("i");
    let one = b.int_literal(1);
    let next = b.binary(BinaryOp::Plus, i, one);
    let i_target = b.lvalue("i", Vec::new());
    let step = b.assign(i_target, next);

    let loop_body = b.block(stmt_items(vec![check, step]));
    let loop_body = b.block_stmt(loop_body);
    let loop_stmt = b.while_stmt(cond, loop_body);

    let s = b.var("s");
    let ret = b.return_stmt(Some(s));

    let mut items = vec![BlockItem::Decl(locals)];
    items.extend(stmt_items(vec![reset, loop_stmt, ret]));
    let sum_body = b.block(items);
    let sum = b.func_def(BaseType::Int, "sum", vec![a_param, len_param], sum_body);

    // int main() { return sum(data[0], n); }
    let zero = b.int_literal(0);
    let row = b.lvalue("data", vec![zero]);
    let row = b.lvalue_expr(row);
    let n = b.var("n");
    let call = b.call("sum", vec![row, n]);
    let ret = b.return_stmt(Some(call));
    let main_body = b.block(vec![ret.into()]);
    let main = b.func_def(BaseType::Int, "main", Vec::new(), main_body);

    b.comp_unit(vec![n_decl.into(), data_decl.into(), sum.into(), main.into()])
}

/// `int f(int x) { return (x * x) + (x * x); }` with the product built once
/// and attached twice
pub fn shared_subexpression() -> CompUnit {
    let mut b = AstBuilder::new();
    let param = b.param(BaseType::Int, "x");
    let x = b.var("x");
    let square = b.binary(BinaryOp::Multiply, x.clone(), x);
    let sum = b.binary(BinaryOp::Plus, square.clone(), square);
    let ret = b.return_stmt(Some(sum));
    let body = b.block(vec![ret.into()]);
    let f = b.func_def(BaseType::Int, "f", vec![param], body);
    b.comp_unit(vec![f.into()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_sample_exists() {
        for name in SAMPLE_NAMES {
            assert!(sample(name).is_some(), "missing sample {}", name);
        }
        assert!(sample("nope").is_none());
    }

    #[test]
    fn test_loop_sample_layout() {
        let unit = sum_loop();
        assert_eq!(unit.items.len(), 4);
        assert_eq!(unit.declarations().count(), 2);

        let sum = unit.function("sum").expect("sum is defined");
        assert_eq!(sum.params.len(), 2);
        assert!(sum.params[0].is_array());
        assert_eq!(sum.body.items.len(), 4);
    }
}
