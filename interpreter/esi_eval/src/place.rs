//! Assignable locations.
//!
//! Assignment, compound assignment, update expressions, `delete`, and
//! `for...in` targets all resolve their target once into a [`Place`]
//! and then read or write through it. A place is either a named
//! variable in some scope frame or a property slot on a container
//! value.

use crate::convert;
use crate::environment::ScopeRef;
use crate::errors::{cannot_read_property, type_error, EvalResult, RuntimeError};
use crate::value::Value;

/// A resolved storage location.
pub enum Place {
    /// A variable binding, looked up through `scope`'s chain.
    Variable { scope: ScopeRef, name: String },
    /// A property slot `base[key]` on an object, array, string, or
    /// function value.
    Member { base: Value, key: String },
}

impl Place {
    /// Read the current value at this location.
    pub fn read(&self) -> EvalResult {
        match self {
            Place::Variable { scope, name } => scope.borrow().get(name),
            Place::Member { base, key } => read_member(base, key),
        }
    }

    /// Store `value` at this location.
    pub fn write(&self, value: Value) -> Result<(), RuntimeError> {
        match self {
            Place::Variable { scope, name } => scope.borrow_mut().set(name, value),
            Place::Member { base, key } => write_member(base, key, value),
        }
    }

    /// Remove this location, as the `delete` operator does.
    ///
    /// Deleting a property removes it (array slots clear to
    /// `undefined`, leaving the length alone) and yields `true` whether
    /// or not it existed. Deleting a variable is a refusal: `false`.
    pub fn delete(&self) -> bool {
        match self {
            Place::Variable { .. } => false,
            Place::Member { base, key } => {
                match base {
                    Value::Object(object) => {
                        object.borrow_mut().remove(key);
                    }
                    Value::Array(items) => {
                        if let Some(index) = convert::array_index(key) {
                            let mut items = items.borrow_mut();
                            if index < items.len() {
                                items[index] = Value::Undefined;
                            }
                        }
                    }
                    _ => {}
                }
                true
            }
        }
    }
}

/// Property read, `base[key]`, over every container shape.
///
/// Missing properties read as `undefined`; only `undefined` and `null`
/// bases are errors.
pub fn read_member(base: &Value, key: &str) -> EvalResult {
    match base {
        Value::Undefined => Err(cannot_read_property(key, "undefined")),
        Value::Null => Err(cannot_read_property(key, "null")),
        Value::Object(object) => Ok(object.borrow().get(key).unwrap_or(Value::Undefined)),
        Value::Array(items) => {
            let items = items.borrow();
            if key == "length" {
                return Ok(Value::Number(items.len() as f64));
            }
            match convert::array_index(key) {
                Some(index) => Ok(items.get(index).cloned().unwrap_or(Value::Undefined)),
                None => Ok(Value::Undefined),
            }
        }
        Value::Str(text) => {
            if key == "length" {
                return Ok(Value::Number(text.chars().count() as f64));
            }
            match convert::array_index(key) {
                Some(index) => Ok(text
                    .chars()
                    .nth(index)
                    .map(|ch| Value::string(ch.to_string()))
                    .unwrap_or(Value::Undefined)),
                None => Ok(Value::Undefined),
            }
        }
        Value::Function(function) => match key {
            "name" => Ok(function
                .name
                .as_deref()
                .map(|name| Value::string(name.to_string()))
                .unwrap_or_else(|| Value::string(String::new()))),
            "length" => Ok(Value::Number(function.arity() as f64)),
            _ => Ok(Value::Undefined),
        },
        Value::Native(native) => match key {
            "name" => Ok(Value::string(native.name.to_string())),
            _ => Ok(Value::Undefined),
        },
        Value::Bool(_) | Value::Number(_) => Ok(Value::Undefined),
    }
}

/// Property write, `base[key] = value`.
pub fn write_member(base: &Value, key: &str, value: Value) -> Result<(), RuntimeError> {
    match base {
        Value::Object(object) => {
            object.borrow_mut().insert(key.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let mut items = items.borrow_mut();
            if key == "length" {
                let length = convert::to_uint32(convert::to_number(&value)) as usize;
                items.resize(length, Value::Undefined);
                return Ok(());
            }
            match convert::array_index(key) {
                Some(index) => {
                    if index >= items.len() {
                        items.resize(index + 1, Value::Undefined);
                    }
                    items[index] = value;
                    Ok(())
                }
                // Non-index keys on arrays are silently dropped.
                None => Ok(()),
            }
        }
        Value::Undefined => Err(cannot_read_property(key, "undefined")),
        Value::Null => Err(cannot_read_property(key, "null")),
        other => Err(type_error(format!(
            "Cannot set property '{key}' on {}",
            other.type_of()
        ))),
    }
}
