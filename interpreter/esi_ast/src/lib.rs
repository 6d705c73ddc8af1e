//! Esi AST - node vocabulary for the esi interpreter.
//!
//! The interpreter never tokenizes or parses source text. An external
//! ESTree-producing parser (acorn, or anything emitting the same JSON
//! shape) supplies the tree; this crate deserializes that JSON into a
//! closed [`Node`] enum keyed on the ESTree `type` tag.
//!
//! Because the enum is closed, unsupported syntax fails at
//! deserialization time rather than silently evaluating to nothing.

mod node;
mod operators;

pub use node::{CatchClause, DeclKind, Declarator, Ident, Lit, Node, Property, SwitchCase};
pub use operators::{AssignOp, BinaryOp, LogicalOp, UnaryOp, UpdateOp};

/// Deserialize an ESTree JSON document into a [`Node`].
///
/// The root is normally a `Program`, but any node shape is accepted;
/// [`crate::Node`] consumers decide what roots they allow.
pub fn from_json(source: &str) -> Result<Node, serde_json::Error> {
    serde_json::from_str(source)
}
