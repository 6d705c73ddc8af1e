//! The evaluation engine.
//!
//! [`Interpreter`] owns the global declaration table and the root scope
//! frame; [`InterpreterBuilder`] configures both before a run. The node
//! dispatch is split by position: `exec` drives statements and returns
//! a [`Completion`], `eval` drives expressions and returns a [`Value`].
//! Statement rules live in `stmt`, expression rules in `expr`, call and
//! construction mechanics in `function_call`.

mod builder;
mod expr;
mod function_call;
mod stmt;

pub use builder::InterpreterBuilder;

use esi_ast::Node;
use tracing::trace;

use crate::environment::{Globals, ScopeRef};
use crate::errors::{unknown_node_type, EvalResult};
use crate::print_handler::SharedPrintHandler;
use crate::signal::{Completion, ExecResult};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Tree-walking evaluator over the `esi_ast` vocabulary.
pub struct Interpreter {
    globals: Globals,
    global_scope: ScopeRef,
    print: SharedPrintHandler,
}

impl Interpreter {
    /// An interpreter with the default configuration: `console` bound,
    /// output to stdout/stderr.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Run a parsed `Program` against the global frame.
    ///
    /// Top-level statements evaluate strictly in source order with no
    /// hoisting prepass (that is a block rule), so a forward reference
    /// to a later function declaration raises. Returns the value of the
    /// last completed statement (`undefined` for an empty program); an
    /// uncaught raise is the `Err` case.
    pub fn run(&self, program: &Node) -> EvalResult {
        let Node::Program { body } = program else {
            return Err(unknown_node_type(program.kind_name()));
        };
        trace!(statements = body.len(), "run program");
        match self.run_in_order(body, &self.global_scope)? {
            Completion::Normal(value) | Completion::Return(value) => Ok(value),
            // Loop signals have nowhere left to go at the top level.
            Completion::Break(_) | Completion::Continue(_) => Ok(Value::Undefined),
        }
    }

    /// Read a name from the global declaration table.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name).cloned()
    }

    /// The print handler console output goes through (buffered in
    /// tests).
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Statement dispatch. Grows the native stack ahead of deeply
    /// nested programs.
    pub(crate) fn exec(&self, node: &Node, scope: &ScopeRef) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_inner(node, scope))
    }

    /// Expression dispatch.
    pub(crate) fn eval(&self, node: &Node, scope: &ScopeRef) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(node, scope))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
