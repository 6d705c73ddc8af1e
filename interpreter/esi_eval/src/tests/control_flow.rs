//! Loop, switch, and exception control-flow scenarios.

use esi_ast::{AssignOp, BinaryOp, DeclKind, Node, UpdateOp};
use pretty_assertions::assert_eq;

use crate::value::Value;

use super::support::*;

fn incr(name: &str) -> Node {
    Node::UpdateExpression {
        operator: UpdateOp::Incr,
        prefix: false,
        argument: Box::new(ident(name)),
    }
}

// var s = 0; var i = 0; while (i < 5) { i++; if (i === 3) continue; s += i; }
#[test]
fn while_loop_with_continue() {
    let result = run_program(vec![
        decl(DeclKind::Var, "s", Some(num(0.0))),
        decl(DeclKind::Var, "i", Some(num(0.0))),
        while_stmt(
            binary(BinaryOp::Lt, ident("i"), num(5.0)),
            block(vec![
                expr_stmt(incr("i")),
                if_stmt(
                    binary(BinaryOp::EqStrict, ident("i"), num(3.0)),
                    Node::ContinueStatement { label: None },
                    None,
                ),
                expr_stmt(assign_op(AssignOp::AddAssign, ident("s"), ident("i"))),
            ]),
        ),
        expr_stmt(ident("s")),
    ]);
    // 1 + 2 + 4 + 5
    assert_eq!(result, Value::Number(12.0));
}

// var i = 0; while (true) { i++; if (i === 4) break; } i;
#[test]
fn break_stops_the_nearest_loop() {
    let result = run_program(vec![
        decl(DeclKind::Var, "i", Some(num(0.0))),
        while_stmt(
            Node::Literal {
                value: esi_ast::Lit::Bool(true),
            },
            block(vec![
                expr_stmt(incr("i")),
                if_stmt(
                    binary(BinaryOp::EqStrict, ident("i"), num(4.0)),
                    Node::BreakStatement { label: None },
                    None,
                ),
            ]),
        ),
        expr_stmt(ident("i")),
    ]);
    assert_eq!(result, Value::Number(4.0));
}

// var n = 0; do { n++; } while (false); n;
#[test]
fn do_while_runs_the_body_at_least_once() {
    let result = run_program(vec![
        decl(DeclKind::Var, "n", Some(num(0.0))),
        Node::DoWhileStatement {
            body: Box::new(block(vec![expr_stmt(incr("n"))])),
            test: Box::new(Node::Literal {
                value: esi_ast::Lit::Bool(false),
            }),
        },
        expr_stmt(ident("n")),
    ]);
    assert_eq!(result, Value::Number(1.0));
}

// var s = 0; for (var i = 0; i < 4; i++) { s += i; } s;
#[test]
fn for_loop_accumulates() {
    let result = run_program(vec![
        decl(DeclKind::Var, "s", Some(num(0.0))),
        Node::ForStatement {
            init: Some(Box::new(decl(DeclKind::Var, "i", Some(num(0.0))))),
            test: Some(Box::new(binary(BinaryOp::Lt, ident("i"), num(4.0)))),
            update: Some(Box::new(incr("i"))),
            body: Box::new(block(vec![expr_stmt(assign_op(
                AssignOp::AddAssign,
                ident("s"),
                ident("i"),
            ))])),
        },
        expr_stmt(ident("s")),
    ]);
    assert_eq!(result, Value::Number(6.0));
}

// var fs = []; for (let i = 0; i < 3; i++) { fs[i] = function() { return i; }; }
// fs[0]();
//
// The loop owns one frame for its whole run, so every stored closure
// observes the final value of i.
#[test]
fn for_let_closures_share_one_loop_frame() {
    let result = run_program(vec![
        decl(
            DeclKind::Var,
            "fs",
            Some(Node::ArrayExpression { elements: vec![] }),
        ),
        Node::ForStatement {
            init: Some(Box::new(decl(DeclKind::Let, "i", Some(num(0.0))))),
            test: Some(Box::new(binary(BinaryOp::Lt, ident("i"), num(3.0)))),
            update: Some(Box::new(incr("i"))),
            body: Box::new(block(vec![expr_stmt(assign(
                member_computed(ident("fs"), ident("i")),
                func_expr(&[], vec![ret(Some(ident("i")))]),
            ))])),
        },
        expr_stmt(call(member_computed(ident("fs"), num(0.0)), vec![])),
    ]);
    assert_eq!(result, Value::Number(3.0));
}

// var ks = ""; for (var k in {a: 1, b: 2, c: 3}) { ks += k; } ks;
#[test]
fn for_in_enumerates_keys_in_insertion_order() {
    let object = Node::ObjectExpression {
        properties: vec![
            property("a", num(1.0)),
            property("b", num(2.0)),
            property("c", num(3.0)),
        ],
    };
    let result = run_program(vec![
        decl(DeclKind::Var, "ks", Some(str_lit(""))),
        Node::ForInStatement {
            left: Box::new(decl(DeclKind::Var, "k", None)),
            right: Box::new(object),
            body: Box::new(block(vec![expr_stmt(assign_op(
                AssignOp::AddAssign,
                ident("ks"),
                ident("k"),
            ))])),
        },
        expr_stmt(ident("ks")),
    ]);
    assert_eq!(result, Value::string("abc"));
}

fn property(key: &str, value: Node) -> esi_ast::Property {
    esi_ast::Property {
        key: Box::new(ident(key)),
        value: Box::new(value),
    }
}

// var r; switch (2) { case 1: r = 1; case 2: r = 2; case 3: r = 3; break;
// default: r = 0; } r;
#[test]
fn switch_falls_through_until_break() {
    let result = run_program(vec![
        decl(DeclKind::Var, "r", None),
        switch_stmt(
            num(2.0),
            vec![
                switch_case(Some(num(1.0)), vec![expr_stmt(assign(ident("r"), num(1.0)))]),
                switch_case(Some(num(2.0)), vec![expr_stmt(assign(ident("r"), num(2.0)))]),
                switch_case(
                    Some(num(3.0)),
                    vec![
                        expr_stmt(assign(ident("r"), num(3.0))),
                        Node::BreakStatement { label: None },
                    ],
                ),
                switch_case(None, vec![expr_stmt(assign(ident("r"), num(0.0)))]),
            ],
        ),
        expr_stmt(ident("r")),
    ]);
    assert_eq!(result, Value::Number(3.0));
}

// var r; switch (9) { case 1: r = 1; break; default: r = 0; } r;
#[test]
fn switch_runs_default_when_nothing_matches() {
    let result = run_program(vec![
        decl(DeclKind::Var, "r", None),
        switch_stmt(
            num(9.0),
            vec![
                switch_case(
                    Some(num(1.0)),
                    vec![
                        expr_stmt(assign(ident("r"), num(1.0))),
                        Node::BreakStatement { label: None },
                    ],
                ),
                switch_case(None, vec![expr_stmt(assign(ident("r"), num(0.0)))]),
            ],
        ),
        expr_stmt(ident("r")),
    ]);
    assert_eq!(result, Value::Number(0.0));
}

// var r; try { throw 1; } catch (e) { r = e + 1; } r;
#[test]
fn catch_binds_the_thrown_value() {
    let result = run_program(vec![
        decl(DeclKind::Var, "r", None),
        try_stmt(
            block(vec![Node::ThrowStatement {
                argument: Box::new(num(1.0)),
            }]),
            Some("e"),
            Some(block(vec![expr_stmt(assign(
                ident("r"),
                binary(BinaryOp::Add, ident("e"), num(1.0)),
            ))])),
            None,
        ),
        expr_stmt(ident("r")),
    ]);
    assert_eq!(result, Value::Number(2.0));
}

// function f() { try { throw 1; } catch (e) { return e + 1; }
//                finally { return 99; } } f();
#[test]
fn finally_return_overrides_catch_return() {
    let result = run_program(vec![
        func_decl(
            "f",
            &[],
            vec![try_stmt(
                block(vec![Node::ThrowStatement {
                    argument: Box::new(num(1.0)),
                }]),
                Some("e"),
                Some(block(vec![ret(Some(binary(
                    BinaryOp::Add,
                    ident("e"),
                    num(1.0),
                )))])),
                Some(block(vec![ret(Some(num(99.0)))])),
            )],
        ),
        expr_stmt(call(ident("f"), vec![])),
    ]);
    assert_eq!(result, Value::Number(99.0));
}

// var log = ""; try { log += "t"; } finally { log += "f"; } log;
#[test]
fn normal_finally_preserves_the_try_outcome() {
    let result = run_program(vec![
        decl(DeclKind::Var, "log", Some(str_lit(""))),
        try_stmt(
            block(vec![expr_stmt(assign_op(
                AssignOp::AddAssign,
                ident("log"),
                str_lit("t"),
            ))]),
            None,
            None,
            Some(block(vec![expr_stmt(assign_op(
                AssignOp::AddAssign,
                ident("log"),
                str_lit("f"),
            ))])),
        ),
        expr_stmt(ident("log")),
    ]);
    assert_eq!(result, Value::string("tf"));
}

// try { missing; } catch (e) { e; }
//
// Structural errors travel the same raise channel as thrown values, so
// a program catch observes them as their message string.
#[test]
fn catch_observes_internal_reference_errors() {
    let result = run_program(vec![try_stmt(
        block(vec![expr_stmt(ident("missing"))]),
        Some("e"),
        Some(block(vec![expr_stmt(ident("e"))])),
        None,
    )]);
    assert_eq!(result, Value::string("missing is not defined"));
}

// function f() { try { throw "boom"; } finally { } } f();
#[test]
fn uncaught_throw_escapes_past_finally() {
    let error = run_err(vec![
        func_decl(
            "f",
            &[],
            vec![try_stmt(
                block(vec![Node::ThrowStatement {
                    argument: Box::new(str_lit("boom")),
                }]),
                None,
                None,
                Some(block(vec![])),
            )],
        ),
        expr_stmt(call(ident("f"), vec![])),
    ]);
    assert_eq!(error.catch_value(), Value::string("boom"));
}
