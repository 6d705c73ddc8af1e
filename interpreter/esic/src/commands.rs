//! The `run` command: load an ESTree JSON file and evaluate it.

use std::fs;

use esi_eval::{Interpreter, Value};
use tracing::debug;

/// Options parsed from the command line.
#[derive(Default)]
pub struct RunOptions {
    /// Print the program's final value (`--print-result`).
    pub print_result: bool,
}

/// Run a program from a JSON AST file. Returns the process exit code.
pub fn run_file(path: &str, options: &RunOptions) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: cannot read {path}: {error}");
            return 1;
        }
    };
    run_source(&source, options)
}

/// Run a program from JSON text. Returns the process exit code.
pub fn run_source(source: &str, options: &RunOptions) -> i32 {
    let program = match esi_ast::from_json(source) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("error: invalid program JSON: {error}");
            return 1;
        }
    };

    let interpreter = Interpreter::new();
    match interpreter.run(&program) {
        Ok(value) => {
            debug!("program completed");
            if options.print_result {
                println!("{}", print_value(&value));
            }
            0
        }
        Err(error) => {
            eprintln!("{error}");
            1
        }
    }
}

/// Render a result value the way the program would see it, except that
/// strings keep their quotes so `--print-result` output is unambiguous.
pub fn print_value(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn run_source_reports_success() {
        let source = r#"{
            "type": "Program",
            "body": [{
                "type": "ExpressionStatement",
                "expression": {"type": "Literal", "value": 1}
            }]
        }"#;
        assert_eq!(run_source(source, &RunOptions::default()), 0);
    }

    #[test]
    fn run_source_rejects_bad_json() {
        assert_eq!(run_source("not json", &RunOptions::default()), 1);
    }

    #[test]
    fn uncaught_throw_is_a_failure_exit() {
        let source = r#"{
            "type": "Program",
            "body": [{
                "type": "ThrowStatement",
                "argument": {"type": "Literal", "value": "boom"}
            }]
        }"#;
        assert_eq!(run_source(source, &RunOptions::default()), 1);
    }

    #[test]
    fn print_value_quotes_strings() {
        assert_eq!(print_value(&Value::string("hi")), "\"hi\"");
        assert_eq!(print_value(&Value::Number(1.5)), "1.5");
    }
}
