//! Function values: closures and host-registered natives.

use std::fmt;
use std::rc::Rc;

use esi_ast::Node;

use crate::environment::ScopeRef;
use crate::errors::EvalResult;
use crate::value::Value;

/// A closure: parameter names, the body AST, and the environment active
/// at definition time.
///
/// Free-variable lookups at call time resolve against the captured
/// defining scope, never the caller's. The name/params pair doubles as
/// the introspection surface (`f.name`, `f.length`).
pub struct FunctionValue {
    /// `None` for anonymous function expressions.
    pub name: Option<String>,
    /// Ordered parameter names, bound with `var` semantics per call.
    pub params: Vec<String>,
    /// The `BlockStatement` body.
    pub body: Rc<Node>,
    /// Defining scope (keeps the whole enclosing chain alive).
    pub scope: ScopeRef,
}

impl FunctionValue {
    /// Declared arity (`f.length`).
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Signature of a host-registered callable: receiver plus ordered
/// arguments, yielding a value or raising.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> EvalResult;

/// Host-registered function, installed into the global table before a
/// run (the `preDeclaration` mechanism of the source system).
pub struct NativeFunction {
    pub name: &'static str,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new(name: &'static str, f: impl Fn(&Value, &[Value]) -> EvalResult + 'static) -> Self {
        Self {
            name,
            func: Box::new(f),
        }
    }

    /// Invoke with a receiver (`this`) and argument values.
    pub fn call(&self, this: &Value, args: &[Value]) -> EvalResult {
        (self.func)(this, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn native_receives_this_and_args() {
        let native = NativeFunction::new("first", |this, args| {
            assert_eq!(*this, Value::Null);
            Ok(args.first().cloned().unwrap_or(Value::Undefined))
        });
        let out = native
            .call(&Value::Null, &[Value::Number(3.0), Value::Number(4.0)])
            .unwrap();
        assert_eq!(out, Value::Number(3.0));
    }
}
