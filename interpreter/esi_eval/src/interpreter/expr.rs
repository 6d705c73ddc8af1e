//! Expression evaluation rules.

use esi_ast::{AssignOp, Lit, LogicalOp, Node, Property, UnaryOp, UpdateOp};
use tracing::trace;

use crate::convert;
use crate::environment::ScopeRef;
use crate::errors::{
    unknown_node_type, unsupported_assignment_target, unsupported_property_key, EvalResult,
    RuntimeError,
};
use crate::operators::evaluate_binary;
use crate::place::{read_member, Place};
use crate::unary_operators::evaluate_unary;
use crate::value::{ObjectValue, Value};

use super::Interpreter;

impl Interpreter {
    pub(super) fn eval_inner(&self, node: &Node, scope: &ScopeRef) -> EvalResult {
        trace!(node = node.kind_name(), "eval");
        match node {
            Node::Identifier { name } => self.eval_identifier(name, scope),
            Node::Literal { value } => Ok(literal_value(value)),
            // `this` is an ordinary binding installed at invocation, so
            // at the top level the lookup raises like any unbound name.
            Node::ThisExpression => scope.borrow().get("this"),
            Node::MemberExpression {
                object,
                property,
                computed,
            } => {
                let base = self.eval(object, scope)?;
                let key = self.member_key(property, *computed, scope)?;
                read_member(&base, &key)
            }
            Node::ObjectExpression { properties } => self.eval_object(properties, scope),
            Node::ArrayExpression { elements } => {
                let items = elements
                    .iter()
                    .map(|element| match element {
                        Some(element) => self.eval(element, scope),
                        None => Ok(Value::Undefined),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(items))
            }
            Node::FunctionExpression { id, params, body } => Ok(self.make_function(
                id.as_ref().map(|id| id.name.clone()),
                params,
                body,
                scope,
            )),
            Node::CallExpression { callee, arguments } => {
                self.eval_call(callee, arguments, scope)
            }
            Node::NewExpression { callee, arguments } => {
                self.eval_new(callee, arguments, scope)
            }
            Node::UpdateExpression {
                operator,
                prefix,
                argument,
            } => self.eval_update(*operator, *prefix, argument, scope),
            Node::AssignmentExpression {
                operator,
                left,
                right,
            } => self.eval_assignment(*operator, left, right, scope),
            Node::UnaryExpression { operator, argument } => {
                self.eval_unary_expr(*operator, argument, scope)
            }
            Node::BinaryExpression {
                operator,
                left,
                right,
            } => {
                let left = self.eval(left, scope)?;
                let right = self.eval(right, scope)?;
                evaluate_binary(*operator, &left, &right)
            }
            Node::LogicalExpression {
                operator,
                left,
                right,
            } => {
                // Short-circuit yields the deciding operand itself, not
                // a boolean.
                let left = self.eval(left, scope)?;
                let short_circuits = match operator {
                    LogicalOp::Or => left.is_truthy(),
                    LogicalOp::And => !left.is_truthy(),
                };
                if short_circuits {
                    Ok(left)
                } else {
                    self.eval(right, scope)
                }
            }
            Node::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                if self.eval(test, scope)?.is_truthy() {
                    self.eval(consequent, scope)
                } else {
                    self.eval(alternate, scope)
                }
            }
            // A statement node in expression position is a parser bug
            // upstream; fail the same way as unsupported syntax.
            statement => Err(unknown_node_type(statement.kind_name())),
        }
    }

    fn eval_identifier(&self, name: &str, scope: &ScopeRef) -> EvalResult {
        // `undefined` is a plain identifier in the AST but always the
        // undefined value here.
        if name == "undefined" {
            return Ok(Value::Undefined);
        }
        scope.borrow().get(name)
    }

    /// The property key of a member expression: an evaluated expression
    /// when `computed` (`o[k]`), the identifier's own name otherwise
    /// (`o.k`).
    pub(super) fn member_key(
        &self,
        property: &Node,
        computed: bool,
        scope: &ScopeRef,
    ) -> Result<String, RuntimeError> {
        if computed {
            return Ok(convert::to_property_key(&self.eval(property, scope)?));
        }
        match property {
            Node::Identifier { name } => Ok(name.clone()),
            Node::Literal { value } => Ok(convert::to_property_key(&literal_value(value))),
            other => Err(unsupported_property_key(other.kind_name())),
        }
    }

    fn eval_object(&self, properties: &[Property], scope: &ScopeRef) -> EvalResult {
        let mut object = ObjectValue::new();
        for property in properties {
            let key = match property.key.as_ref() {
                Node::Identifier { name } => name.clone(),
                Node::Literal { value } => convert::to_property_key(&literal_value(value)),
                other => return Err(unsupported_property_key(other.kind_name())),
            };
            let value = self.eval(&property.value, scope)?;
            object.insert(key, value);
        }
        Ok(Value::object(object))
    }

    /// Resolve an assignment or update target into a [`Place`].
    pub(super) fn resolve_place(
        &self,
        node: &Node,
        scope: &ScopeRef,
    ) -> Result<Place, RuntimeError> {
        match node {
            Node::Identifier { name } => Ok(Place::Variable {
                scope: scope.clone(),
                name: name.clone(),
            }),
            Node::MemberExpression {
                object,
                property,
                computed,
            } => {
                let base = self.eval(object, scope)?;
                let key = self.member_key(property, *computed, scope)?;
                Ok(Place::Member { base, key })
            }
            other => Err(unsupported_assignment_target(other.kind_name())),
        }
    }

    fn eval_assignment(
        &self,
        operator: AssignOp,
        left: &Node,
        right: &Node,
        scope: &ScopeRef,
    ) -> EvalResult {
        let place = self.resolve_place(left, scope)?;
        let value = match operator.binary_op() {
            None => self.eval(right, scope)?,
            Some(binary) => {
                let current = place.read()?;
                let rhs = self.eval(right, scope)?;
                evaluate_binary(binary, &current, &rhs)?
            }
        };
        place.write(value.clone())?;
        Ok(value)
    }

    fn eval_update(
        &self,
        operator: UpdateOp,
        prefix: bool,
        argument: &Node,
        scope: &ScopeRef,
    ) -> EvalResult {
        let place = self.resolve_place(argument, scope)?;
        let before = convert::to_number(&place.read()?);
        let after = match operator {
            UpdateOp::Incr => before + 1.0,
            UpdateOp::Decr => before - 1.0,
        };
        place.write(Value::Number(after))?;
        Ok(Value::Number(if prefix { after } else { before }))
    }

    fn eval_unary_expr(
        &self,
        operator: UnaryOp,
        argument: &Node,
        scope: &ScopeRef,
    ) -> EvalResult {
        match (operator, argument) {
            // `typeof` on an undeclared name answers "undefined"
            // instead of raising.
            (UnaryOp::Typeof, Node::Identifier { name }) => {
                match self.eval_identifier(name, scope) {
                    Ok(value) => Ok(Value::string(value.type_of())),
                    Err(error) if error.is_reference() => {
                        Ok(Value::string("undefined"))
                    }
                    Err(error) => Err(error),
                }
            }
            (
                UnaryOp::Delete,
                target @ (Node::Identifier { .. } | Node::MemberExpression { .. }),
            ) => {
                let place = self.resolve_place(target, scope)?;
                Ok(Value::Bool(place.delete()))
            }
            (UnaryOp::Delete, other) => {
                // Deleting a non-reference evaluates it and succeeds.
                self.eval(other, scope)?;
                Ok(Value::Bool(true))
            }
            _ => evaluate_unary(operator, &self.eval(argument, scope)?),
        }
    }
}

pub(super) fn literal_value(lit: &Lit) -> Value {
    match lit {
        Lit::Null => Value::Null,
        Lit::Bool(b) => Value::Bool(*b),
        Lit::Num(n) => Value::Number(*n),
        Lit::Str(s) => Value::string(s.clone()),
    }
}
