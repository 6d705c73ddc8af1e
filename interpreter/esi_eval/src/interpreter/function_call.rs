//! Function creation, invocation, and construction.

use std::rc::Rc;

use esi_ast::{DeclKind, Ident, Node};
use tracing::trace;

use crate::environment::{Scope, ScopeKind, ScopeRef};
use crate::errors::{not_callable, EvalResult, RuntimeError};
use crate::signal::Completion;
use crate::value::{FunctionValue, ObjectValue, Value};

use super::Interpreter;

impl Interpreter {
    /// Build a closure over the current scope.
    pub(super) fn make_function(
        &self,
        name: Option<String>,
        params: &[Ident],
        body: &Node,
        scope: &ScopeRef,
    ) -> Value {
        Value::function(FunctionValue {
            name,
            params: params.iter().map(|param| param.name.clone()).collect(),
            body: Rc::new(body.clone()),
            scope: scope.clone(),
        })
    }

    /// Evaluate a call expression.
    ///
    /// Order: callee, then arguments left to right, then (for a member
    /// callee) the object subexpression once more as the receiver.
    /// That re-evaluation is source behavior and observable when the
    /// object expression has side effects.
    pub(super) fn eval_call(
        &self,
        callee: &Node,
        arguments: &[Node],
        scope: &ScopeRef,
    ) -> EvalResult {
        let function = self.eval(callee, scope)?;
        let args = self.eval_arguments(arguments, scope)?;
        let receiver = match callee {
            Node::MemberExpression { object, .. } => self.eval(object, scope)?,
            _ => Value::Undefined,
        };
        self.call_value(&function, &receiver, &args)
    }

    /// Invoke any callable value.
    pub(crate) fn call_value(
        &self,
        function: &Value,
        receiver: &Value,
        args: &[Value],
    ) -> EvalResult {
        match function {
            Value::Function(function) => self.call_function(function, receiver.clone(), args),
            Value::Native(native) => native.call(receiver, args),
            other => Err(not_callable(other.type_of())),
        }
    }

    /// `new Ctor(...)`: a fresh object tagged with its constructor is
    /// the receiver; the result is the constructor's explicit return
    /// when that is object-typed (an object, array, or function), the
    /// new instance otherwise.
    pub(super) fn eval_new(
        &self,
        callee: &Node,
        arguments: &[Node],
        scope: &ScopeRef,
    ) -> EvalResult {
        let callee = self.eval(callee, scope)?;
        let Value::Function(constructor) = callee else {
            return Err(not_callable(callee.type_of()));
        };
        let args = self.eval_arguments(arguments, scope)?;
        let instance = Value::object(ObjectValue::with_constructor(constructor.clone()));
        let returned = self.call_function(&constructor, instance.clone(), &args)?;
        match returned {
            Value::Object(_) | Value::Array(_) | Value::Function(_) | Value::Native(_) => {
                Ok(returned)
            }
            _ => Ok(instance),
        }
    }

    fn eval_arguments(
        &self,
        arguments: &[Node],
        scope: &ScopeRef,
    ) -> Result<Vec<Value>, RuntimeError> {
        arguments
            .iter()
            .map(|argument| self.eval(argument, scope))
            .collect()
    }

    /// Invoke a closure.
    ///
    /// The call frame is a `function` child of the captured defining
    /// scope, never of the caller's scope. `this` and an `arguments`
    /// array bind as `const`; parameters bind with `var` semantics, so
    /// missing arguments read as `undefined`. A `return` unwinds here
    /// into a plain value; stray `break`/`continue` signals die at the
    /// function boundary.
    fn call_function(
        &self,
        function: &Rc<FunctionValue>,
        receiver: Value,
        args: &[Value],
    ) -> EvalResult {
        trace!(
            name = function.name.as_deref().unwrap_or("<anonymous>"),
            args = args.len(),
            "call"
        );
        let call_scope = Scope::child(&function.scope, ScopeKind::Function);
        {
            let mut frame = call_scope.borrow_mut();
            frame.declare("this", receiver, DeclKind::Const)?;
            frame.declare(
                "arguments",
                Value::array(args.to_vec()),
                DeclKind::Const,
            )?;
            for (index, param) in function.params.iter().enumerate() {
                frame.declare(
                    param,
                    args.get(index).cloned().unwrap_or(Value::Undefined),
                    DeclKind::Var,
                )?;
            }
        }
        match self.exec(&function.body, &call_scope)? {
            Completion::Return(value) => Ok(value),
            _ => Ok(Value::Undefined),
        }
    }
}
