//! Binary operator evaluation.
//!
//! Both operands are already evaluated when this module runs; logical
//! `&&`/`||` short-circuit in the dispatcher and never reach here.
//! Coercions follow ES5: `+` concatenates when either side is
//! string-like, relational operators compare strings lexicographically
//! and everything else numerically, bitwise operators wrap through
//! 32-bit integers.

use std::cmp::Ordering;
use std::rc::Rc;

use esi_ast::BinaryOp;

use crate::convert;
use crate::errors::{type_error, unsupported_operator, EvalResult};
use crate::value::Value;

/// Apply `op` to two evaluated operands.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(add(left, right)),
        BinaryOp::Sub => Ok(numeric(left, right, |a, b| a - b)),
        BinaryOp::Mul => Ok(numeric(left, right, |a, b| a * b)),
        BinaryOp::Div => Ok(numeric(left, right, |a, b| a / b)),
        // f64 `%` truncates toward zero, matching the source `%`.
        BinaryOp::Mod => Ok(numeric(left, right, |a, b| a % b)),
        BinaryOp::Pow => Err(unsupported_operator(op.as_symbol())),

        BinaryOp::EqLoose => Ok(Value::Bool(loose_equals(left, right))),
        BinaryOp::NotEqLoose => Ok(Value::Bool(!loose_equals(left, right))),
        BinaryOp::EqStrict => Ok(Value::Bool(strict_equals(left, right))),
        BinaryOp::NotEqStrict => Ok(Value::Bool(!strict_equals(left, right))),

        BinaryOp::Lt => Ok(relational(left, right, |o| o == Ordering::Less)),
        BinaryOp::Gt => Ok(relational(left, right, |o| o == Ordering::Greater)),
        BinaryOp::LtEq => Ok(relational(left, right, |o| o != Ordering::Greater)),
        BinaryOp::GtEq => Ok(relational(left, right, |o| o != Ordering::Less)),

        BinaryOp::BitAnd => Ok(bitwise(left, right, |a, b| a & b)),
        BinaryOp::BitOr => Ok(bitwise(left, right, |a, b| a | b)),
        BinaryOp::BitXor => Ok(bitwise(left, right, |a, b| a ^ b)),
        BinaryOp::Shl => Ok(bitwise(left, right, |a, b| a << (b & 31))),
        BinaryOp::Shr => Ok(bitwise(left, right, |a, b| a >> (b & 31))),
        BinaryOp::ShrUnsigned => {
            let a = convert::to_uint32(convert::to_number(left));
            let b = convert::to_uint32(convert::to_number(right));
            Ok(Value::Number(f64::from(a >> (b & 31))))
        }

        BinaryOp::In => contains_key(left, right),
        BinaryOp::Instanceof => instance_of(left, right),
    }
}

fn numeric(left: &Value, right: &Value, op: impl Fn(f64, f64) -> f64) -> Value {
    Value::Number(op(convert::to_number(left), convert::to_number(right)))
}

fn bitwise(left: &Value, right: &Value, op: impl Fn(i32, i32) -> i32) -> Value {
    let a = convert::to_int32(convert::to_number(left));
    let b = convert::to_int32(convert::to_number(right));
    Value::Number(f64::from(op(a, b)))
}

/// `+`: string concatenation when either operand is string-like
/// (a string, object, or array), numeric addition otherwise.
fn add(left: &Value, right: &Value) -> Value {
    if is_string_like(left) || is_string_like(right) {
        Value::string(format!("{left}{right}"))
    } else {
        numeric(left, right, |a, b| a + b)
    }
}

fn is_string_like(value: &Value) -> bool {
    matches!(value, Value::Str(_) | Value::Object(_) | Value::Array(_))
}

/// Relational comparison: lexicographic when both sides are strings,
/// numeric otherwise. `NaN` on either side compares false.
fn relational(left: &Value, right: &Value, accept: impl Fn(Ordering) -> bool) -> Value {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => convert::to_number(left).partial_cmp(&convert::to_number(right)),
    };
    Value::Bool(ordering.is_some_and(accept))
}

/// Strict equality (`===`): no coercion, reference identity for
/// objects, arrays, and functions. `NaN !== NaN`.
pub fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
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

/// Loose equality (`==`): `null == undefined`, number/string and
/// boolean operands coerce through `to_number`, reference types
/// compare by identity against each other and are unequal to
/// primitives they do not coerce to.
pub fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
        (Value::Number(a), Value::Str(_)) => *a == convert::to_number(right),
        (Value::Str(_), Value::Number(b)) => convert::to_number(left) == *b,
        (Value::Bool(_), _) => {
            loose_equals(&Value::Number(convert::to_number(left)), right)
        }
        (_, Value::Bool(_)) => {
            loose_equals(left, &Value::Number(convert::to_number(right)))
        }
        (Value::Str(a), Value::Object(_) | Value::Array(_)) => a.as_str() == right.to_string(),
        (Value::Object(_) | Value::Array(_), Value::Str(b)) => left.to_string() == b.as_str(),
        (Value::Number(a), Value::Object(_) | Value::Array(_)) => {
            *a == convert::to_number(right)
        }
        (Value::Object(_) | Value::Array(_), Value::Number(b)) => {
            convert::to_number(left) == *b
        }
        _ => strict_equals(left, right),
    }
}

/// `key in container`: property presence on objects, index-in-bounds
/// on arrays.
fn contains_key(key: &Value, container: &Value) -> EvalResult {
    let key = convert::to_property_key(key);
    match container {
        Value::Object(object) => Ok(Value::Bool(object.borrow().contains(&key))),
        Value::Array(items) => {
            let present = key == "length"
                || convert::array_index(&key).is_some_and(|i| i < items.borrow().len());
            Ok(Value::Bool(present))
        }
        other => Err(type_error(format!(
            "Cannot use 'in' operator to search for '{key}' in {other}"
        ))),
    }
}

/// `value instanceof ctor`: true when `value` is an object constructed
/// by exactly `ctor` (no prototype chains in this subset).
fn instance_of(value: &Value, ctor: &Value) -> EvalResult {
    let Value::Function(ctor) = ctor else {
        return Err(type_error("Right-hand side of 'instanceof' is not callable"));
    };
    match value {
        Value::Object(object) => {
            let matched = object
                .borrow()
                .constructed_by()
                .is_some_and(|c| Rc::ptr_eq(c, ctor));
            Ok(Value::Bool(matched))
        }
        _ => Ok(Value::Bool(false)),
    }
}
