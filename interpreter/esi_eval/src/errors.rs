//! Runtime error types for the evaluator.
//!
//! One raise channel carries two categories:
//!
//! - **structural faults** the interpreter itself detects (unbound
//!   identifier, const assignment, unsupported operator, ...), each with
//!   a typed [`ErrorKind`];
//! - **program throws** (`throw expr`), which carry an arbitrary
//!   [`Value`] payload.
//!
//! An interpreted `try/catch` observes both: the catch parameter binds
//! the thrown value for program throws and the message string for
//! structural faults.

use std::fmt;

use crate::value::Value;

/// Result of expression evaluation.
pub type EvalResult = Result<Value, RuntimeError>;

/// Typed error category.
///
/// Factory functions populate both `kind` and `message`; `Display`
/// produces the human-readable message.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    /// Unbound identifier on get or set.
    Reference { name: String },
    /// Re-declaring a `let`/`const` name in the same frame.
    DuplicateDeclaration { name: String },
    /// Writing to a `const` binding.
    ConstAssignment { name: String },
    /// A node reached an evaluation position that has no rule for it.
    UnknownNodeType { kind: String },
    /// `**`/`**=` and friends outside the ES5 subset.
    UnsupportedOperator { symbol: String },
    /// Object literal key that is neither `Literal` nor `Identifier`.
    UnsupportedPropertyKey { kind: String },
    /// Assignment target that is neither `Identifier` nor
    /// `MemberExpression`.
    UnsupportedAssignmentTarget { kind: String },
    /// Host-level type fault (not callable, property of undefined, ...).
    Type { message: String },
    /// A program-level `throw`; the payload lives on the error.
    Thrown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference { name } => write!(f, "{name} is not defined"),
            Self::DuplicateDeclaration { name } => {
                write!(f, "Identifier '{name}' has already been declared")
            }
            Self::ConstAssignment { .. } => write!(f, "Assignment to constant variable"),
            Self::UnknownNodeType { kind } => write!(f, "unknown node type \"{kind}\""),
            Self::UnsupportedOperator { symbol } => {
                write!(f, "operator \"{symbol}\" is not supported")
            }
            Self::UnsupportedPropertyKey { kind } => {
                write!(f, "unsupported property key type \"{kind}\"")
            }
            Self::UnsupportedAssignmentTarget { kind } => {
                write!(f, "cannot assign to node type \"{kind}\"")
            }
            Self::Type { message } => write!(f, "{message}"),
            Self::Thrown => write!(f, "uncaught thrown value"),
        }
    }
}

/// Error raised during evaluation, unwinding to the nearest enclosing
/// `TryStatement` or to the embedder.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeError {
    /// Structured category for programmatic matching.
    pub kind: ErrorKind,
    /// Human-readable message (a `throw` formats its payload).
    pub message: String,
    /// The thrown value, for `ErrorKind::Thrown`.
    pub payload: Option<Value>,
}

impl RuntimeError {
    fn from_kind(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            payload: None,
        }
    }

    /// Wrap a program-level thrown value.
    pub fn thrown(value: Value) -> Self {
        Self {
            kind: ErrorKind::Thrown,
            message: format!("Uncaught {value}"),
            payload: Some(value),
        }
    }

    /// The value an interpreted `catch` parameter binds.
    ///
    /// Program throws yield their payload unchanged; structural faults
    /// surface as their message string so programs can still observe
    /// them.
    pub fn catch_value(&self) -> Value {
        match &self.payload {
            Some(value) => value.clone(),
            None => Value::string(self.message.clone()),
        }
    }

    /// Whether this is an unbound-identifier fault (`typeof` swallows
    /// these).
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, ErrorKind::Reference { .. })
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

// Factory functions

pub fn reference_error(name: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::Reference { name: name.into() })
}

pub fn duplicate_declaration(name: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::DuplicateDeclaration { name: name.into() })
}

pub fn const_assignment(name: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::ConstAssignment { name: name.into() })
}

pub fn unknown_node_type(kind: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::UnknownNodeType { kind: kind.into() })
}

pub fn unsupported_operator(symbol: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::UnsupportedOperator {
        symbol: symbol.into(),
    })
}

pub fn unsupported_property_key(kind: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::UnsupportedPropertyKey { kind: kind.into() })
}

pub fn unsupported_assignment_target(kind: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::UnsupportedAssignmentTarget { kind: kind.into() })
}

pub fn type_error(message: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::Type {
        message: message.into(),
    })
}

pub fn not_callable(type_name: &str) -> RuntimeError {
    type_error(format!("{type_name} is not a function"))
}

pub fn cannot_read_property(key: &str, of: &str) -> RuntimeError {
    type_error(format!("Cannot read property '{key}' of {of}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_error_message_matches_source_language() {
        let err = reference_error("foo");
        assert_eq!(err.message, "foo is not defined");
        assert!(err.is_reference());
    }

    #[test]
    fn thrown_error_carries_payload() {
        let err = RuntimeError::thrown(Value::Number(1.0));
        assert_eq!(err.kind, ErrorKind::Thrown);
        assert_eq!(err.catch_value(), Value::Number(1.0));
    }

    #[test]
    fn structural_fault_surfaces_as_string() {
        let err = const_assignment("x");
        assert_eq!(
            err.catch_value(),
            Value::string("Assignment to constant variable")
        );
    }
}
