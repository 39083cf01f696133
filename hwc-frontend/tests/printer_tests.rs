//! Source printing of whole programs

use hwc_frontend::ast::*;
use hwc_frontend::printer::print_statement;
use hwc_frontend::{print_unit, samples, AstBuilder};
use pretty_assertions::assert_eq;

#[test]
fn test_print_return_zero() {
    assert_eq!(print_unit(&samples::return_zero()), "int main() {\n    return 0;\n}\n");
}

#[test]
fn test_print_const_array() {
    assert_eq!(print_unit(&samples::const_array()), "const int a[2] = {1, 2};\n");
}

#[test]
fn test_print_loop_sample() {
    let expected = "\
int n = 4;
int data[2][2] = {{1, 2}, {3}};

int sum(int a[], int len) {
    int i = 0, s;
    s = 0;
    while (i < len) {
        if (a[i] < 0)
            break;
        else
            s = s + a[i];
        i = i + 1;
    }
    return s;
}

int main() {
    return sum(data[0], n);
}
";
    assert_eq!(print_unit(&samples::sum_loop()), expected);
}

#[test]
fn test_print_shared_subexpression() {
    // Sharing is invisible in the printed form
    assert_eq!(
        print_unit(&samples::shared_subexpression()),
        "int f(int x) {\n    return x * x + x * x;\n}\n"
    );
}

#[test]
fn test_print_logical_and_in_arithmetic() {
    let mut b = AstBuilder::new();
    let a = b.var("a");
    let bv = b.var("b");
    let and = b.binary(BinaryOp::LogicalAnd, a, bv);
    let one = b.int_literal(1);
    let sum = b.binary(BinaryOp::Plus, and, one);
    let x = b.lvalue("x", Vec::new());
    let stmt = b.assign(x, sum);

    assert_eq!(print_statement(&stmt), "x = (a && b) + 1;\n");
}

#[test]
fn test_print_void_function_and_empty_block() {
    let mut b = AstBuilder::new();
    let three = b.int_literal(3);
    let m = b.array_param(BaseType::Int, "m", vec![three]);
    let ret = b.return_stmt(None);
    let body = b.block(vec![ret.into()]);
    let f = b.func_def(BaseType::Void, "f", vec![m], body);
    let empty = b.block(Vec::new());
    let g = b.func_def(BaseType::Void, "g", Vec::new(), empty);
    let unit = b.comp_unit(vec![f.into(), g.into()]);

    let expected = "\
void f(int m[][3]) {
    return;
}

void g() {}
";
    assert_eq!(print_unit(&unit), expected);
}
