//! Runtime values for the esi interpreter.
//!
//! The union is closed: every expression evaluation yields exactly one
//! `Value` (or raises). There is no implicit absence; missing things
//! are the `Undefined` variant.
//!
//! Objects and arrays are reference types behind [`Shared`]: assignment
//! copies the handle, mutation is visible through every holder. This is
//! load-bearing for member assignment and `this` aliasing, not an
//! optimization.

mod function;
mod object;

pub mod convert;

use std::fmt;
use std::rc::Rc;

use crate::shared::Shared;

pub use function::{FunctionValue, NativeFn, NativeFunction};
pub use object::ObjectValue;

/// Runtime value in the esi interpreter.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    /// IEEE-754 double, as in the source language. Bitwise operators
    /// truncate through 32-bit integers (see `convert::to_int32`).
    Number(f64),
    Str(Rc<String>),
    Object(Shared<ObjectValue>),
    Array(Shared<Vec<Value>>),
    Function(Rc<FunctionValue>),
    /// Host-registered callable (e.g. the `console.log` sink).
    Native(Rc<NativeFunction>),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Rc::new(s.into()))
    }

    /// Create an object value with fresh backing storage.
    #[inline]
    pub fn object(obj: ObjectValue) -> Self {
        Value::Object(Shared::new(obj))
    }

    /// Create an array value with fresh backing storage.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Shared::new(items))
    }

    /// Create a function value.
    #[inline]
    pub fn function(f: FunctionValue) -> Self {
        Value::Function(Rc::new(f))
    }

    /// Create a native callable.
    #[inline]
    pub fn native(name: &'static str, f: impl Fn(&Value, &[Value]) -> crate::errors::EvalResult + 'static) -> Self {
        Value::Native(Rc::new(NativeFunction::new(name, f)))
    }

    /// The `typeof` string for this value. `null` is `"object"`, as in
    /// the source language.
    pub const fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Object(_) | Value::Array(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) | Value::Native(_) => "function",
        }
    }

    /// ES5 ToBoolean.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Object(_) | Value::Array(_) | Value::Function(_) | Value::Native(_) => true,
        }
    }
}

/// Program-facing string conversion (ES5 ToString, pragmatically).
///
/// Arrays join their elements with commas (`undefined`/`null` elements
/// become empty, as in the source language); plain objects render as
/// `[object Object]`; functions render a short header rather than their
/// source text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", convert::format_number(*n)),
            Value::Str(s) => write!(f, "{s}"),
            Value::Object(_) => write!(f, "[object Object]"),
            Value::Array(items) => {
                let items = items.borrow();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    match item {
                        Value::Undefined | Value::Null => {}
                        other => write!(f, "{other}")?,
                    }
                }
                Ok(())
            }
            Value::Function(func) => {
                write!(f, "function {}() {{ ... }}", func.name.as_deref().unwrap_or(""))
            }
            Value::Native(native) => write!(f, "function {}() {{ [native code] }}", native.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Object(obj) => {
                let obj = obj.borrow();
                write!(f, "Object({} props)", obj.len())
            }
            Value::Array(items) => write!(f, "Array({} items)", items.borrow().len()),
            Value::Function(func) => {
                write!(f, "Function({})", func.name.as_deref().unwrap_or("<anonymous>"))
            }
            Value::Native(native) => write!(f, "Native({})", native.name),
            other => write!(f, "{other}"),
        }
    }
}

/// Structural equality for tests and internal comparisons.
///
/// Reference types compare by identity, matching `===`. This is NOT
/// loose equality; see `operators::loose_equals`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn typeof_strings() {
        assert_eq!(Value::Undefined.type_of(), "undefined");
        assert_eq!(Value::Null.type_of(), "object");
        assert_eq!(Value::Number(1.0).type_of(), "number");
        assert_eq!(Value::string("x").type_of(), "string");
        assert_eq!(Value::array(vec![]).type_of(), "object");
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(Value::object(ObjectValue::new()).is_truthy());
        assert!(Value::string("0").is_truthy());
    }

    #[test]
    fn arrays_compare_by_identity() {
        let a = Value::array(vec![Value::Number(1.0)]);
        let b = a.clone();
        let c = Value::array(vec![Value::Number(1.0)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn array_display_joins_with_commas() {
        let arr = Value::array(vec![
            Value::Number(1.0),
            Value::Undefined,
            Value::string("x"),
        ]);
        assert_eq!(arr.to_string(), "1,,x");
    }

    #[test]
    fn shared_array_mutation_is_visible_through_aliases() {
        let a = Value::array(vec![]);
        let b = a.clone();
        if let Value::Array(storage) = &a {
            storage.borrow_mut().push(Value::Number(5.0));
        }
        if let Value::Array(storage) = &b {
            assert_eq!(storage.borrow().len(), 1);
        }
    }
}
