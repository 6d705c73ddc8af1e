//! Esi Eval - tree-walking evaluator for the esi ES5 subset.
//!
//! This crate consumes the AST vocabulary from `esi_ast` and executes
//! it with ES5 scoping, control-flow, and operator semantics.
//!
//! # Architecture
//!
//! - `Value`: the closed runtime value union, with `Rc`-shared object
//!   and array storage (assignment copies the reference, never the
//!   contents)
//! - `Scope` / `ScopeRef`: the lexical environment chain with
//!   var/let/const hoisting rules and a shared global table
//! - `Place`: the assignable-location abstraction over named bindings
//!   and object/array properties
//! - `Completion`: the control signal threaded through statement
//!   evaluation (`return`/`break`/`continue`)
//! - `Interpreter`: the dispatcher plus per-node evaluation rules
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//!
//! Thrown program values and internal structural faults share one raise
//! channel (`RuntimeError`), so an interpreted `catch` observes both.

mod builtins;
mod environment;
pub mod errors;
mod interpreter;
mod operators;
mod place;
mod print_handler;
mod shared;
mod signal;
mod stack;
mod unary_operators;
mod value;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

pub use builtins::console_object;
pub use environment::{Globals, Scope, ScopeKind, ScopeRef};
pub use errors::{
    cannot_read_property, const_assignment, duplicate_declaration, not_callable, reference_error,
    type_error, unknown_node_type, unsupported_assignment_target, unsupported_operator,
    unsupported_property_key, ErrorKind, EvalResult, RuntimeError,
};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, loose_equals, strict_equals};
pub use place::Place;
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use shared::Shared;
pub use signal::{Completion, ExecResult};
pub use stack::ensure_sufficient_stack;
pub use unary_operators::evaluate_unary;
pub use value::{
    convert, FunctionValue, NativeFn, NativeFunction, ObjectValue, Value,
};
