//! The closed AST node enum and its supporting shapes.
//!
//! Mirrors the ESTree JSON layout: every node object carries a `type`
//! tag, which serde maps onto the enum variant. Fields the interpreter
//! does not consume (`start`, `end`, `raw`, `sourceType`, ...) are
//! ignored by deserialization.

use serde::Deserialize;

use crate::operators::{AssignOp, BinaryOp, LogicalOp, UnaryOp, UpdateOp};

/// Declaration kind for `VariableDeclaration` and for bindings in the
/// evaluator's scope frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// Function-scoped, hoisted past block frames.
    Var,
    /// Block-scoped, no redeclaration in the same frame.
    Let,
    /// Block-scoped, no redeclaration, no reassignment.
    Const,
}

impl DeclKind {
    pub const fn as_keyword(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// A bare identifier reference in a fixed slot (declarator ids, function
/// params, break/continue labels). Expression-position identifiers are
/// [`Node::Identifier`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Ident {
    pub name: String,
}

/// One `id = init` pair of a `VariableDeclaration`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Declarator {
    pub id: Ident,
    pub init: Option<Box<Node>>,
}

/// A key/value entry of an `ObjectExpression`.
///
/// The key must be a `Literal` or `Identifier` node; the evaluator
/// rejects anything else (computed keys are ES6).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Property {
    pub key: Box<Node>,
    pub value: Box<Node>,
}

/// One arm of a `SwitchStatement`; `test: None` is the `default` case.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SwitchCase {
    pub test: Option<Box<Node>>,
    pub consequent: Vec<Node>,
}

/// The `catch (param) { ... }` clause of a `TryStatement`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CatchClause {
    pub param: Ident,
    pub body: Box<Node>,
}

/// AST node for the ES5 subset.
///
/// Closed enum: a JSON node whose `type` is outside this vocabulary
/// fails at deserialization, so unsupported syntax can never silently
/// no-op at run time.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    // Top level
    Program {
        body: Vec<Node>,
    },

    // Statements
    ExpressionStatement {
        expression: Box<Node>,
    },
    BlockStatement {
        body: Vec<Node>,
    },
    EmptyStatement,
    VariableDeclaration {
        kind: DeclKind,
        declarations: Vec<Declarator>,
    },
    FunctionDeclaration {
        id: Ident,
        params: Vec<Ident>,
        body: Box<Node>,
    },
    ReturnStatement {
        argument: Option<Box<Node>>,
    },
    BreakStatement {
        label: Option<Ident>,
    },
    ContinueStatement {
        label: Option<Ident>,
    },
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    SwitchStatement {
        discriminant: Box<Node>,
        cases: Vec<SwitchCase>,
    },
    WhileStatement {
        test: Box<Node>,
        body: Box<Node>,
    },
    DoWhileStatement {
        body: Box<Node>,
        test: Box<Node>,
    },
    ForStatement {
        init: Option<Box<Node>>,
        test: Option<Box<Node>>,
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    ForInStatement {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
    },
    ThrowStatement {
        argument: Box<Node>,
    },
    TryStatement {
        block: Box<Node>,
        handler: Option<CatchClause>,
        finalizer: Option<Box<Node>>,
    },

    // Expressions
    Identifier {
        name: String,
    },
    Literal {
        value: Lit,
    },
    ThisExpression,
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        #[serde(default)]
        computed: bool,
    },
    ObjectExpression {
        properties: Vec<Property>,
    },
    ArrayExpression {
        /// `None` entries are elisions (`[1, , 3]`), which evaluate to
        /// `undefined`.
        elements: Vec<Option<Node>>,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    NewExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    FunctionExpression {
        id: Option<Ident>,
        params: Vec<Ident>,
        body: Box<Node>,
    },
    UpdateExpression {
        operator: UpdateOp,
        prefix: bool,
        argument: Box<Node>,
    },
    AssignmentExpression {
        operator: AssignOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryExpression {
        operator: UnaryOp,
        argument: Box<Node>,
    },
    BinaryExpression {
        operator: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    LogicalExpression {
        operator: LogicalOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
}

impl Node {
    /// The ESTree `type` tag for this node, for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Node::Program { .. } => "Program",
            Node::ExpressionStatement { .. } => "ExpressionStatement",
            Node::BlockStatement { .. } => "BlockStatement",
            Node::EmptyStatement => "EmptyStatement",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::FunctionDeclaration { .. } => "FunctionDeclaration",
            Node::ReturnStatement { .. } => "ReturnStatement",
            Node::BreakStatement { .. } => "BreakStatement",
            Node::ContinueStatement { .. } => "ContinueStatement",
            Node::IfStatement { .. } => "IfStatement",
            Node::SwitchStatement { .. } => "SwitchStatement",
            Node::WhileStatement { .. } => "WhileStatement",
            Node::DoWhileStatement { .. } => "DoWhileStatement",
            Node::ForStatement { .. } => "ForStatement",
            Node::ForInStatement { .. } => "ForInStatement",
            Node::ThrowStatement { .. } => "ThrowStatement",
            Node::TryStatement { .. } => "TryStatement",
            Node::Identifier { .. } => "Identifier",
            Node::Literal { .. } => "Literal",
            Node::ThisExpression => "ThisExpression",
            Node::MemberExpression { .. } => "MemberExpression",
            Node::ObjectExpression { .. } => "ObjectExpression",
            Node::ArrayExpression { .. } => "ArrayExpression",
            Node::CallExpression { .. } => "CallExpression",
            Node::NewExpression { .. } => "NewExpression",
            Node::FunctionExpression { .. } => "FunctionExpression",
            Node::UpdateExpression { .. } => "UpdateExpression",
            Node::AssignmentExpression { .. } => "AssignmentExpression",
            Node::UnaryExpression { .. } => "UnaryExpression",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::LogicalExpression { .. } => "LogicalExpression",
            Node::ConditionalExpression { .. } => "ConditionalExpression",
        }
    }
}

/// Literal payload of a `Literal` node.
///
/// Untagged: the JSON value's own type selects the variant. Regex
/// literals (whose `value` is an object) fall outside every variant and
/// are rejected, which is intended; they are not part of the subset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Lit {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Acorn output for: var a = 2; (positions trimmed for brevity,
    // extra fields are ignored either way)
    const VAR_DECL: &str = r#"{
        "type": "Program",
        "start": 0, "end": 10, "sourceType": "script",
        "body": [{
            "type": "VariableDeclaration",
            "kind": "var",
            "declarations": [{
                "type": "VariableDeclarator",
                "id": { "type": "Identifier", "name": "a" },
                "init": { "type": "Literal", "value": 2, "raw": "2" }
            }]
        }]
    }"#;

    #[test]
    fn deserializes_variable_declaration() {
        let node: Node = serde_json::from_str(VAR_DECL).unwrap();
        let Node::Program { body } = node else {
            panic!("expected Program");
        };
        assert_eq!(
            body,
            vec![Node::VariableDeclaration {
                kind: DeclKind::Var,
                declarations: vec![Declarator {
                    id: Ident { name: "a".into() },
                    init: Some(Box::new(Node::Literal { value: Lit::Num(2.0) })),
                }],
            }]
        );
    }

    #[test]
    fn member_expression_computed_defaults_to_false() {
        let json = r#"{
            "type": "MemberExpression",
            "object": { "type": "Identifier", "name": "o" },
            "property": { "type": "Identifier", "name": "x" }
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let Node::MemberExpression { computed, .. } = node else {
            panic!("expected MemberExpression");
        };
        assert!(!computed);
    }

    #[test]
    fn null_literal_and_elision() {
        let json = r#"{
            "type": "ArrayExpression",
            "elements": [
                { "type": "Literal", "value": null, "raw": "null" },
                null,
                { "type": "Literal", "value": true, "raw": "true" }
            ]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let Node::ArrayExpression { elements } = node else {
            panic!("expected ArrayExpression");
        };
        assert_eq!(elements[0], Some(Node::Literal { value: Lit::Null }));
        assert_eq!(elements[1], None);
        assert_eq!(elements[2], Some(Node::Literal { value: Lit::Bool(true) }));
    }

    #[test]
    fn unknown_node_type_is_rejected() {
        let json = r#"{ "type": "ArrowFunctionExpression", "params": [], "body": [] }"#;
        let res: Result<Node, _> = serde_json::from_str(json);
        assert!(res.is_err());
    }

    #[test]
    fn try_statement_round_trips_shape() {
        let json = r#"{
            "type": "TryStatement",
            "block": { "type": "BlockStatement", "body": [] },
            "handler": {
                "type": "CatchClause",
                "param": { "type": "Identifier", "name": "e" },
                "body": { "type": "BlockStatement", "body": [] }
            },
            "finalizer": null
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let Node::TryStatement {
            handler, finalizer, ..
        } = node
        else {
            panic!("expected TryStatement");
        };
        assert_eq!(handler.unwrap().param.name, "e");
        assert!(finalizer.is_none());
    }
}
