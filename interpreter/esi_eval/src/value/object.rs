//! Object backing storage.
//!
//! Property lookup goes through an `FxHashMap`; a parallel key list
//! preserves insertion order, which is observable through `for...in`
//! enumeration and must stay stable.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::function::FunctionValue;
use super::Value;

/// String-keyed property storage for one object.
#[derive(Default)]
pub struct ObjectValue {
    props: FxHashMap<String, Value>,
    order: Vec<String>,
    /// The function this object was constructed by, when it came from a
    /// `new` expression. Drives `instanceof`.
    constructor: Option<Rc<FunctionValue>>,
}

impl ObjectValue {
    /// Create an empty object (object literals, host objects).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object tagged with its constructor (`new f()`).
    pub fn with_constructor(constructor: Rc<FunctionValue>) -> Self {
        Self {
            props: FxHashMap::default(),
            order: Vec::new(),
            constructor: Some(constructor),
        }
    }

    /// Read a property; `None` when absent (the evaluator maps that to
    /// `Undefined`).
    pub fn get(&self, key: &str) -> Option<Value> {
        self.props.get(key).cloned()
    }

    /// Write a property, appending to the enumeration order on first
    /// insertion.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if !self.props.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.props.insert(key, value);
    }

    /// `delete obj.key`; returns whether the property existed.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.props.remove(key).is_some() {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Own enumerable keys in insertion order (`for...in`).
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// The constructor tag, if this object came from `new`.
    pub fn constructed_by(&self) -> Option<&Rc<FunctionValue>> {
        self.constructor.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keys_keep_insertion_order() {
        let mut obj = ObjectValue::new();
        obj.insert("b", Value::Number(1.0));
        obj.insert("a", Value::Number(2.0));
        obj.insert("c", Value::Number(3.0));
        // Overwriting must not move the key.
        obj.insert("b", Value::Number(4.0));
        let keys: Vec<_> = obj.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(obj.get("b"), Some(Value::Number(4.0)));
    }

    #[test]
    fn remove_drops_key_from_order() {
        let mut obj = ObjectValue::new();
        obj.insert("x", Value::Null);
        obj.insert("y", Value::Null);
        assert!(obj.remove("x"));
        assert!(!obj.remove("x"));
        let keys: Vec<_> = obj.keys().cloned().collect();
        assert_eq!(keys, vec!["y"]);
    }
}
