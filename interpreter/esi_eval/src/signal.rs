//! Control signals for return/break/continue.
//!
//! These are not errors: they thread non-local control through nested
//! statement evaluation as ordinary data. Every statement-sequencing
//! rule checks the completion it gets back and either consumes it
//! (loops eat `Break`/`Continue`, function bodies eat `Return`) or
//! propagates it upward unchanged.

use crate::errors::RuntimeError;
use crate::value::Value;

/// Result of statement evaluation: a completion, or a raised error.
pub type ExecResult = Result<Completion, RuntimeError>;

/// How a statement finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    /// Ran to the end; expression statements carry their value.
    Normal(Value),
    /// A `return`, with its (possibly undefined) value.
    Return(Value),
    /// A `break`, with its optional label.
    ///
    /// Labels are carried but never matched: `LabeledStatement` is
    /// outside the node vocabulary, so loops and switches consume only
    /// the unlabeled form and labeled signals propagate until they die
    /// at a function boundary.
    Break(Option<String>),
    /// A `continue`, with its optional label.
    Continue(Option<String>),
}

impl Completion {
    /// Shorthand for the completion of a value-less statement.
    pub const fn normal() -> Self {
        Completion::Normal(Value::Undefined)
    }

    /// `true` for `Return`/`Break`/`Continue`.
    pub const fn is_abrupt(&self) -> bool {
        !matches!(self, Completion::Normal(_))
    }

    /// The value this completion carries (`Undefined` for
    /// break/continue).
    pub fn into_value(self) -> Value {
        match self {
            Completion::Normal(v) | Completion::Return(v) => v,
            Completion::Break(_) | Completion::Continue(_) => Value::Undefined,
        }
    }
}
