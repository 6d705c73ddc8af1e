//! Unary operator evaluation over an already-evaluated operand.
//!
//! `typeof` on a bare identifier and `delete` on a member expression
//! are resolved in the dispatcher, because they act on the operand's
//! location rather than its value. Everything that falls through to a
//! plain value lands here.

use esi_ast::UnaryOp;

use crate::convert;
use crate::errors::EvalResult;
use crate::value::Value;

pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Neg => Ok(Value::Number(-convert::to_number(operand))),
        UnaryOp::Plus => Ok(Value::Number(convert::to_number(operand))),
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::BitNot => Ok(Value::Number(f64::from(
            !convert::to_int32(convert::to_number(operand)),
        ))),
        UnaryOp::Typeof => Ok(Value::string(operand.type_of().to_string())),
        UnaryOp::Void => Ok(Value::Undefined),
        // `delete` on anything that is not a property reference
        // evaluates the operand and yields true.
        UnaryOp::Delete => Ok(Value::Bool(true)),
    }
}
