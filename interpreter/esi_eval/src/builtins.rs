//! Host-provided globals.
//!
//! The runtime itself defines no ambient names; everything a program
//! sees beyond its own declarations is registered through the builder.
//! This module supplies the one table the CLI installs by default:
//! `console` with `log` and `error`.

use crate::print_handler::SharedPrintHandler;
use crate::value::{ObjectValue, Value};

/// Build a `console` object whose `log`/`error` methods write through
/// `handler`.
///
/// Arguments are stringified with the runtime's display rules and
/// joined by single spaces, one line per call.
pub fn console_object(handler: &SharedPrintHandler) -> Value {
    let mut console = ObjectValue::new();

    let log_handler = handler.clone();
    console.insert(
        "log".to_string(),
        Value::native("log", move |_this, args| {
            log_handler.println(&join_args(args));
            Ok(Value::Undefined)
        }),
    );

    let error_handler = handler.clone();
    console.insert(
        "error".to_string(),
        Value::native("error", move |_this, args| {
            error_handler.error_line(&join_args(args));
            Ok(Value::Undefined)
        }),
    );

    Value::object(console)
}

fn join_args(args: &[Value]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
