//! AST construction helpers and run harnesses for the scenario tests.
//!
//! Building nodes programmatically keeps scenarios compile-checked;
//! the `programs` module covers the JSON path separately.

use esi_ast::{
    AssignOp, BinaryOp, CatchClause, DeclKind, Declarator, Ident, Lit, Node, SwitchCase,
};

use crate::errors::RuntimeError;
use crate::print_handler::buffer_handler;
use crate::value::Value;
use crate::Interpreter;

pub fn program(body: Vec<Node>) -> Node {
    Node::Program { body }
}

pub fn block(body: Vec<Node>) -> Node {
    Node::BlockStatement { body }
}

pub fn expr_stmt(expression: Node) -> Node {
    Node::ExpressionStatement {
        expression: Box::new(expression),
    }
}

pub fn num(n: f64) -> Node {
    Node::Literal { value: Lit::Num(n) }
}

pub fn str_lit(s: &str) -> Node {
    Node::Literal {
        value: Lit::Str(s.to_string()),
    }
}

pub fn ident(name: &str) -> Node {
    Node::Identifier {
        name: name.to_string(),
    }
}

pub fn decl(kind: DeclKind, name: &str, init: Option<Node>) -> Node {
    Node::VariableDeclaration {
        kind,
        declarations: vec![Declarator {
            id: Ident {
                name: name.to_string(),
            },
            init: init.map(Box::new),
        }],
    }
}

pub fn assign(target: Node, value: Node) -> Node {
    assign_op(AssignOp::Assign, target, value)
}

pub fn assign_op(operator: AssignOp, target: Node, value: Node) -> Node {
    Node::AssignmentExpression {
        operator,
        left: Box::new(target),
        right: Box::new(value),
    }
}

pub fn binary(operator: BinaryOp, left: Node, right: Node) -> Node {
    Node::BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn member(object: Node, name: &str) -> Node {
    Node::MemberExpression {
        object: Box::new(object),
        property: Box::new(ident(name)),
        computed: false,
    }
}

pub fn member_computed(object: Node, key: Node) -> Node {
    Node::MemberExpression {
        object: Box::new(object),
        property: Box::new(key),
        computed: true,
    }
}

pub fn call(callee: Node, arguments: Vec<Node>) -> Node {
    Node::CallExpression {
        callee: Box::new(callee),
        arguments,
    }
}

pub fn ret(argument: Option<Node>) -> Node {
    Node::ReturnStatement {
        argument: argument.map(Box::new),
    }
}

pub fn func_decl(name: &str, params: &[&str], body: Vec<Node>) -> Node {
    Node::FunctionDeclaration {
        id: Ident {
            name: name.to_string(),
        },
        params: idents(params),
        body: Box::new(block(body)),
    }
}

pub fn func_expr(params: &[&str], body: Vec<Node>) -> Node {
    Node::FunctionExpression {
        id: None,
        params: idents(params),
        body: Box::new(block(body)),
    }
}

pub fn if_stmt(test: Node, consequent: Node, alternate: Option<Node>) -> Node {
    Node::IfStatement {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: alternate.map(Box::new),
    }
}

pub fn while_stmt(test: Node, body: Node) -> Node {
    Node::WhileStatement {
        test: Box::new(test),
        body: Box::new(body),
    }
}

pub fn switch_case(test: Option<Node>, consequent: Vec<Node>) -> SwitchCase {
    SwitchCase {
        test: test.map(Box::new),
        consequent,
    }
}

pub fn switch_stmt(discriminant: Node, cases: Vec<SwitchCase>) -> Node {
    Node::SwitchStatement {
        discriminant: Box::new(discriminant),
        cases,
    }
}

pub fn try_stmt(block: Node, param: Option<&str>, handler: Option<Node>, finalizer: Option<Node>) -> Node {
    Node::TryStatement {
        block: Box::new(block),
        handler: handler.map(|body| CatchClause {
            param: Ident {
                name: param.unwrap_or("e").to_string(),
            },
            body: Box::new(body),
        }),
        finalizer: finalizer.map(Box::new),
    }
}

fn idents(names: &[&str]) -> Vec<Ident> {
    names
        .iter()
        .map(|name| Ident {
            name: (*name).to_string(),
        })
        .collect()
}

/// Run a program built from `body` and return its final value.
pub fn run_program(body: Vec<Node>) -> Value {
    buffered_interpreter().run(&program(body)).unwrap()
}

/// Run a program expected to raise, returning the error.
pub fn run_err(body: Vec<Node>) -> RuntimeError {
    buffered_interpreter().run(&program(body)).unwrap_err()
}

/// Run a program and return its final value together with everything
/// it printed.
pub fn run_with_output(body: Vec<Node>) -> (Value, String) {
    let handler = buffer_handler();
    let interpreter = Interpreter::builder().print_handler(handler.clone()).build();
    let value = interpreter.run(&program(body)).unwrap();
    (value, handler.get_output())
}

pub fn buffered_interpreter() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}
