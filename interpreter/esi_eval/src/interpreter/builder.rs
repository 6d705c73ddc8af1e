//! Builder for configuring an [`Interpreter`] before a run.
//!
//! The embedder registers every ambient name here; the runtime itself
//! defines none. `console` is installed by default and can be turned
//! off for embeddings that bring their own.

use rustc_hash::FxHashMap;

use crate::builtins::console_object;
use crate::environment::Scope;
use crate::errors::EvalResult;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::shared::Shared;
use crate::value::Value;

use super::Interpreter;

pub struct InterpreterBuilder {
    globals: FxHashMap<String, Value>,
    print: SharedPrintHandler,
    console: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            globals: FxHashMap::default(),
            print: stdout_handler(),
            console: true,
        }
    }

    /// Register a global binding visible to the program.
    #[must_use]
    pub fn global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.insert(name.into(), value);
        self
    }

    /// Register a host function as a global.
    #[must_use]
    pub fn native(
        mut self,
        name: &'static str,
        f: impl Fn(&Value, &[Value]) -> EvalResult + 'static,
    ) -> Self {
        self.globals.insert(name.to_string(), Value::native(name, f));
        self
    }

    /// Route console output through `handler` instead of stdout/stderr.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print = handler;
        self
    }

    /// Whether to install the default `console` object.
    #[must_use]
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    pub fn build(self) -> Interpreter {
        let mut table = self.globals;
        if self.console {
            table.insert("console".to_string(), console_object(&self.print));
        }
        let globals = Shared::new(table);
        let global_scope = Scope::root(globals.clone());
        Interpreter {
            globals,
            global_scope,
            print: self.print,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
