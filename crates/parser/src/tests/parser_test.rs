use ast::expr::Expr;
use ast::op::BinOp;
use ast::types::{ParameterDirection, Type};
use ast::Program;

use crate::{parse, ParseError};

fn parse_ok(source: &str) -> Program {
    parse(source, "test.defun").expect("parse failed")
}

fn parse_err(source: &str) -> ParseError {
    parse(source, "test.defun").expect_err("parse should fail")
}

const MINIMAL: &str = "def main = fun(out exitCode: i32) { exitCode = 0i32; };";

#[test]
fn test_minimal_program() {
    let program = parse_ok(MINIMAL);

    // One interned i32, one interned fun(out exitCode: i32).
    assert_eq!(program.types.len(), 2);
    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.main_function, Some(0));
    assert_eq!(program.main().unwrap().name, "main");
    assert_eq!(program.main().unwrap().source_file, "test.defun");
    assert_eq!(
        program.type_rep(program.main().unwrap().type_id),
        "fun(out exitCode: i32)"
    );
}

#[test]
fn test_body_is_init_assignment() {
    let program = parse_ok(MINIMAL);
    match &program.functions[0].body.node {
        Expr::InitAssign { var, value } => {
            assert_eq!(var, "exitCode");
            match &value.node {
                Expr::Literal(0) => {}
                other => panic!("expected Literal(0), got {:?}", other),
            }
        }
        other => panic!("expected InitAssign, got {:?}", other),
    }
}

#[test]
fn test_body_span_covers_braces() {
    let program = parse_ok(MINIMAL);
    let span = &program.functions[0].body.span;
    assert_eq!(&MINIMAL[span.clone()], "{ exitCode = 0i32; }");
}

#[test]
fn test_left_associative_equal_precedence() {
    let program = parse_ok("def main = fun(out exitCode: i32) { exitCode = 1i32 + 2i32 * 3i32; };");
    let Expr::InitAssign { value, .. } = &program.functions[0].body.node else {
        panic!("expected InitAssign");
    };
    // (1 + 2) * 3 — the fold is strictly left-to-right.
    let Expr::BinOp { op, lhs, rhs } = &value.node else {
        panic!("expected BinOp");
    };
    assert_eq!(*op, BinOp::Mul);
    assert!(matches!(rhs.node, Expr::Literal(3)));
    let Expr::BinOp { op, lhs, rhs } = &lhs.node else {
        panic!("expected nested BinOp");
    };
    assert_eq!(*op, BinOp::Add);
    assert!(matches!(lhs.node, Expr::Literal(1)));
    assert!(matches!(rhs.node, Expr::Literal(2)));
}

#[test]
fn test_parentheses_group_right_operand() {
    let program =
        parse_ok("def main = fun(out exitCode: i32) { exitCode = 1i32 + (2i32 * 3i32); };");
    let Expr::InitAssign { value, .. } = &program.functions[0].body.node else {
        panic!("expected InitAssign");
    };
    let Expr::BinOp { op, lhs, rhs } = &value.node else {
        panic!("expected BinOp");
    };
    assert_eq!(*op, BinOp::Add);
    assert!(matches!(lhs.node, Expr::Literal(1)));
    assert!(matches!(rhs.node, Expr::BinOp { op: BinOp::Mul, .. }));
}

#[test]
fn test_call_with_argument() {
    let program = parse_ok(
        "def id = fun(in x: i32, out r: i32) { r = x; }; \
         def main = fun(out exitCode: i32) { exitCode = id(in x: 5i32); };",
    );
    assert_eq!(program.functions.len(), 2);

    let Expr::InitAssign { value, .. } = &program.functions[1].body.node else {
        panic!("expected InitAssign");
    };
    let Expr::Call {
        function,
        arguments,
    } = &value.node
    else {
        panic!("expected Call");
    };
    assert_eq!(function, "id");
    assert_eq!(arguments.len(), 1);
    assert_eq!(arguments[0].name, "x");
    assert_eq!(arguments[0].direction, ParameterDirection::In);
    assert!(matches!(arguments[0].expr.node, Expr::Literal(5)));
}

#[test]
fn test_call_without_arguments() {
    let program = parse_ok(
        "def zero = fun(out r: i32) { r = 0i32; }; \
         def main = fun(out exitCode: i32) { exitCode = zero(); };",
    );
    let Expr::InitAssign { value, .. } = &program.functions[1].body.node else {
        panic!("expected InitAssign");
    };
    assert!(matches!(&value.node, Expr::Call { arguments, .. } if arguments.is_empty()));
}

#[test]
fn test_multiple_call_arguments_rejected() {
    let err = parse_err(
        "def add = fun(in a: i32, in b: i32, out r: i32) { r = a + b; }; \
         def main = fun(out exitCode: i32) { exitCode = add(in a: 1i32, in b: 2i32); };",
    );
    assert_eq!(err.message, "Multiple arguments not implemented");
}

#[test]
fn test_multi_parameter_function_type_accepted() {
    let program = parse_ok(
        "def add = fun(in a: i32, in b: i32, out r: i32) { r = a + b; }; \
         def main = fun(out exitCode: i32) { exitCode = 0i32; };",
    );
    let Some(Type::Func(func_type)) = program.get_type(program.functions[0].type_id) else {
        panic!("expected a function type");
    };
    assert_eq!(func_type.parameters.len(), 3);
    assert_eq!(func_type.parameters[0].direction, ParameterDirection::In);
    assert_eq!(func_type.parameters[2].direction, ParameterDirection::Out);
}

#[test]
fn test_inout_direction() {
    let program = parse_ok(
        "def bump = fun(inout x: i32) { x = x + 1i32; }; \
         def main = fun(out exitCode: i32) { exitCode = 0i32; };",
    );
    let Some(Type::Func(func_type)) = program.get_type(program.functions[0].type_id) else {
        panic!("expected a function type");
    };
    assert_eq!(func_type.parameters[0].direction, ParameterDirection::Inout);
    assert_eq!(func_type.parameters[0].name, "x");
}

#[test]
fn test_identifier_with_digits() {
    let program = parse_ok(
        "def f2 = fun(out r1: i32) { r1 = 0i32; }; \
         def main = fun(out exitCode: i32) { exitCode = 0i32; };",
    );
    assert_eq!(program.functions[0].name, "f2");
}

#[test]
fn test_identifier_with_leading_digit_rejected() {
    let err = parse_err("def 2f = fun(out r: i32) { r = 0i32; };");
    assert_eq!(err.message, "Missing name after 'def'");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 5);
}

#[test]
fn test_type_interning_is_idempotent() {
    let source = "def a = fun(out r: i32) { r = 1i32; }; \
                  def b = fun(out r: i32) { r = 2i32; }; \
                  def main = fun(out exitCode: i32) { exitCode = 3i32; };";
    let program = parse_ok(source);

    // i32, fun(out r: i32), fun(out exitCode: i32) — no duplicates.
    assert_eq!(program.types.len(), 3);
    assert_eq!(program.functions[0].type_id, program.functions[1].type_id);
    assert_ne!(program.functions[0].type_id, program.functions[2].type_id);

    let again = parse_ok(source);
    assert_eq!(program.types, again.types);
}

#[test]
fn test_every_type_ref_resolves() {
    let program = parse_ok(
        "def id = fun(in x: i32, out r: i32) { r = x; }; \
         def main = fun(out exitCode: i32) { exitCode = 0i32; };",
    );
    for function in &program.functions {
        let Some(Type::Func(func_type)) = program.get_type(function.type_id) else {
            panic!("function type not interned");
        };
        for param in &func_type.parameters {
            assert!(program.get_type(param.type_id).is_some());
        }
    }
}

#[test]
fn test_missing_main_rejected() {
    let err = parse_err("def other = fun(out exitCode: i32) { exitCode = 0i32; };");
    assert_eq!(err.message, "No main function");
}

#[test]
fn test_wrong_main_signature_rejected() {
    let err = parse_err("def main = fun(in exitCode: i32) { exitCode = 0i32; };");
    assert_eq!(err.message, "Wrong type for main, expected fun(out exitCode: i32)");
    // Located at the type assigned to main.
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 12);

    parse_err("def main = fun(out code: i32) { code = 0i32; };");
    parse_err("def main = fun(out exitCode: i32, out extra: i32) { exitCode = 0i32; };");
    parse_err("def main = i32 { exitCode = 0i32; };");
}

#[test]
fn test_second_main_rejected() {
    let err = parse_err(
        "def main = fun(out exitCode: i32) { exitCode = 0i32; };\n\
         def main = fun(out exitCode: i32) { exitCode = 1i32; };",
    );
    assert_eq!(err.message, "Multiple main functions found");
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 5);
}

#[test]
fn test_missing_semicolon_rejected() {
    let err = parse_err("def main = fun(out exitCode: i32) { exitCode = 0i32; }");
    assert_eq!(err.message, "Missing ';' after definition");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 55);
    assert_eq!(
        err.to_string(),
        "test.defun(1:55): Missing ';' after definition"
    );
}

#[test]
fn test_error_location_on_later_line() {
    let err = parse_err("def a = fun(out r: i32) { r = 1i32; };\ndef = fun(out r: i32) { r = 2i32; };");
    assert_eq!(err.message, "Missing name after 'def'");
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 5);
}

#[test]
fn test_empty_body_rejected() {
    let err = parse_err("def main = fun(out exitCode: i32) { };");
    assert_eq!(err.message, "Empty function body");
}

#[test]
fn test_second_expression_rejected() {
    let err =
        parse_err("def main = fun(out exitCode: i32) { exitCode = 1i32; exitCode = 2i32; };");
    assert_eq!(err.message, "Only one expression allowed per function body");
}

#[test]
fn test_missing_i32_suffix_rejected() {
    let err = parse_err("def main = fun(out exitCode: i32) { exitCode = 5; };");
    assert_eq!(err.message, "Expected 'i32' suffix after number value");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 48);
}

#[test]
fn test_number_out_of_range_rejected() {
    let err = parse_err("def main = fun(out exitCode: i32) { exitCode = 99999999999i32; };");
    assert_eq!(err.message, "Number does not fit in i32: 99999999999");

    // i32::MIN itself still fits.
    parse_ok("def main = fun(out exitCode: i32) { exitCode = -2147483648i32; };");
}

#[test]
fn test_keyword_requires_boundary() {
    // "defmain" is an identifier, not the def keyword.
    let err = parse_err("defmain = fun(out exitCode: i32) { exitCode = 0i32; };");
    assert_eq!(err.message, "Expected 'def'");
    assert_eq!(err.column, 1);
}

#[test]
fn test_whitespace_variations() {
    let program = parse_ok(
        "def main\n\t= fun( out exitCode : i32 )\n{ exitCode = 1i32+2i32 ; };\n",
    );
    assert_eq!(program.main().unwrap().name, "main");
}
