//! Statement evaluation rules.
//!
//! Every rule returns a [`Completion`] and must propagate abrupt
//! completions from child statements immediately; the loops below are
//! the only places `break`/`continue` signals are consumed.

use esi_ast::{CatchClause, DeclKind, Declarator, Node, SwitchCase};
use tracing::trace;

use crate::environment::{Scope, ScopeKind, ScopeRef};
use crate::errors::{unsupported_assignment_target, RuntimeError};
use crate::operators::strict_equals;
use crate::signal::{Completion, ExecResult};
use crate::value::Value;

use super::Interpreter;

/// What a loop does after one body iteration.
enum LoopStep {
    KeepGoing,
    Stop,
    Out(Completion),
}

/// An unlabeled `break` stops the loop, an unlabeled `continue` (and a
/// normal completion) moves to the next iteration, everything else
/// (`return`, labeled signals) propagates past the loop.
fn loop_step(completion: Completion) -> LoopStep {
    match completion {
        Completion::Normal(_) | Completion::Continue(None) => LoopStep::KeepGoing,
        Completion::Break(None) => LoopStep::Stop,
        other => LoopStep::Out(other),
    }
}

impl Interpreter {
    pub(super) fn exec_inner(&self, node: &Node, scope: &ScopeRef) -> ExecResult {
        trace!(node = node.kind_name(), "exec");
        match node {
            Node::Program { body } => self.run_in_order(body, scope),
            Node::ExpressionStatement { expression } => {
                Ok(Completion::Normal(self.eval(expression, scope)?))
            }
            Node::EmptyStatement => Ok(Completion::normal()),
            Node::BlockStatement { body } => {
                let block_scope = Scope::child(scope, ScopeKind::Block);
                self.run_body(body, &block_scope)
            }
            Node::VariableDeclaration { kind, declarations } => {
                self.exec_var_decl(*kind, declarations, scope)?;
                Ok(Completion::normal())
            }
            Node::FunctionDeclaration { id, params, body } => {
                // Inside a block this is pre-installed by the hoisting
                // prepass; at the top level it runs here, in order.
                let function = self.make_function(Some(id.name.clone()), params, body, scope);
                scope
                    .borrow_mut()
                    .declare(&id.name, function, DeclKind::Var)?;
                Ok(Completion::normal())
            }
            Node::ReturnStatement { argument } => {
                let value = match argument {
                    Some(argument) => self.eval(argument, scope)?,
                    None => Value::Undefined,
                };
                Ok(Completion::Return(value))
            }
            Node::BreakStatement { label } => {
                Ok(Completion::Break(label.as_ref().map(|l| l.name.clone())))
            }
            Node::ContinueStatement { label } => {
                Ok(Completion::Continue(label.as_ref().map(|l| l.name.clone())))
            }
            Node::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                if self.eval(test, scope)?.is_truthy() {
                    self.exec(consequent, scope)
                } else if let Some(alternate) = alternate {
                    self.exec(alternate, scope)
                } else {
                    Ok(Completion::normal())
                }
            }
            Node::WhileStatement { test, body } => self.exec_while(test, body, scope),
            Node::DoWhileStatement { body, test } => self.exec_do_while(body, test, scope),
            Node::ForStatement {
                init,
                test,
                update,
                body,
            } => self.exec_for(init.as_deref(), test.as_deref(), update.as_deref(), body, scope),
            Node::ForInStatement { left, right, body } => {
                self.exec_for_in(left, right, body, scope)
            }
            Node::SwitchStatement { discriminant, cases } => {
                self.exec_switch(discriminant, cases, scope)
            }
            Node::ThrowStatement { argument } => {
                Err(RuntimeError::thrown(self.eval(argument, scope)?))
            }
            Node::TryStatement {
                block,
                handler,
                finalizer,
            } => self.exec_try(block, handler.as_ref(), finalizer.as_deref(), scope),
            // Expression node in statement position.
            expression => Ok(Completion::Normal(self.eval(expression, scope)?)),
        }
    }

    /// Evaluate a statement list strictly in source order, no hoisting.
    ///
    /// The `Program` rule: each statement runs as it is reached, the
    /// value of the last normal completion carries forward, and the
    /// first abrupt completion stops the list and propagates.
    pub(super) fn run_in_order(&self, body: &[Node], scope: &ScopeRef) -> ExecResult {
        let mut last = Value::Undefined;
        for statement in body {
            match self.exec(statement, scope)? {
                Completion::Normal(value) => last = value,
                abrupt => return Ok(abrupt),
            }
        }
        Ok(Completion::Normal(last))
    }

    /// Evaluate a block's statement list with the two-pass hoisting
    /// rule.
    ///
    /// Pass one walks the list in source order and installs every
    /// `FunctionDeclaration` (fully initialized) and every direct
    /// `var` declarator (initializer evaluated, or `undefined`).
    /// Nested blocks are not recursed into; their own pass handles
    /// them, and `var` still lands in the function frame because
    /// `declare` hoists past block frames.
    ///
    /// Pass two evaluates statements in order, skipping the already
    /// installed function declarations (`var` initializers run again,
    /// as in the source system). The first abrupt completion stops the
    /// list and propagates.
    pub(super) fn run_body(&self, body: &[Node], scope: &ScopeRef) -> ExecResult {
        for statement in body {
            match statement {
                Node::FunctionDeclaration {
                    id,
                    params,
                    body: fn_body,
                } => {
                    let function =
                        self.make_function(Some(id.name.clone()), params, fn_body, scope);
                    scope
                        .borrow_mut()
                        .declare(&id.name, function, DeclKind::Var)?;
                }
                Node::VariableDeclaration {
                    kind: DeclKind::Var,
                    declarations,
                } => {
                    self.exec_var_decl(DeclKind::Var, declarations, scope)?;
                }
                _ => {}
            }
        }

        let mut last = Value::Undefined;
        for statement in body {
            if matches!(statement, Node::FunctionDeclaration { .. }) {
                continue;
            }
            match self.exec(statement, scope)? {
                Completion::Normal(value) => last = value,
                abrupt => return Ok(abrupt),
            }
        }
        Ok(Completion::Normal(last))
    }

    fn exec_var_decl(
        &self,
        kind: DeclKind,
        declarations: &[Declarator],
        scope: &ScopeRef,
    ) -> Result<(), RuntimeError> {
        for declarator in declarations {
            let value = match &declarator.init {
                Some(init) => self.eval(init, scope)?,
                None => Value::Undefined,
            };
            scope
                .borrow_mut()
                .declare(&declarator.id.name, value, kind)?;
        }
        Ok(())
    }

    fn exec_while(&self, test: &Node, body: &Node, scope: &ScopeRef) -> ExecResult {
        while self.eval(test, scope)?.is_truthy() {
            match loop_step(self.exec(body, scope)?) {
                LoopStep::KeepGoing => {}
                LoopStep::Stop => break,
                LoopStep::Out(completion) => return Ok(completion),
            }
        }
        Ok(Completion::normal())
    }

    fn exec_do_while(&self, body: &Node, test: &Node, scope: &ScopeRef) -> ExecResult {
        loop {
            match loop_step(self.exec(body, scope)?) {
                LoopStep::KeepGoing => {}
                LoopStep::Stop => break,
                LoopStep::Out(completion) => return Ok(completion),
            }
            if !self.eval(test, scope)?.is_truthy() {
                break;
            }
        }
        Ok(Completion::normal())
    }

    fn exec_for(
        &self,
        init: Option<&Node>,
        test: Option<&Node>,
        update: Option<&Node>,
        body: &Node,
        scope: &ScopeRef,
    ) -> ExecResult {
        // One frame for the whole loop, created only when the init
        // clause declares a block-scoped binding. Closures stored by
        // the body all capture this single frame, not one per
        // iteration.
        let loop_scope = match init {
            Some(Node::VariableDeclaration {
                kind: DeclKind::Let | DeclKind::Const,
                ..
            }) => Scope::child(scope, ScopeKind::Block),
            _ => scope.clone(),
        };

        if let Some(init) = init {
            self.exec(init, &loop_scope)?;
        }
        loop {
            if let Some(test) = test {
                if !self.eval(test, &loop_scope)?.is_truthy() {
                    break;
                }
            }
            match loop_step(self.exec(body, &loop_scope)?) {
                LoopStep::KeepGoing => {}
                LoopStep::Stop => break,
                LoopStep::Out(completion) => return Ok(completion),
            }
            if let Some(update) = update {
                self.eval(update, &loop_scope)?;
            }
        }
        Ok(Completion::normal())
    }

    fn exec_for_in(
        &self,
        left: &Node,
        right: &Node,
        body: &Node,
        scope: &ScopeRef,
    ) -> ExecResult {
        let loop_scope = Scope::child(scope, ScopeKind::Block);

        // The loop variable is declared once and rebound per key; the
        // rebind bypasses the const check so `for (const k in o)`
        // iterates, as it does in the source system.
        let declared = match left {
            Node::VariableDeclaration { kind, declarations } => {
                let declarator = declarations
                    .first()
                    .ok_or_else(|| unsupported_assignment_target("VariableDeclaration"))?;
                loop_scope
                    .borrow_mut()
                    .declare(&declarator.id.name, Value::Undefined, *kind)?;
                Some(declarator.id.name.as_str())
            }
            _ => None,
        };

        let keys = enumerate_keys(&self.eval(right, &loop_scope)?);
        for key in keys {
            match declared {
                Some(name) => {
                    loop_scope.borrow_mut().rebind(name, Value::string(key))?;
                }
                None => {
                    let place = self.resolve_place(left, &loop_scope)?;
                    place.write(Value::string(key))?;
                }
            }
            match loop_step(self.exec(body, &loop_scope)?) {
                LoopStep::KeepGoing => {}
                LoopStep::Stop => break,
                LoopStep::Out(completion) => return Ok(completion),
            }
        }
        Ok(Completion::normal())
    }

    /// Evaluate the discriminant once, then scan cases top to bottom
    /// for the first whose test is absent (`default`) or strictly
    /// equal. From there execution falls through every following case
    /// list until an unlabeled `break` consumes it or the cases run
    /// out.
    fn exec_switch(
        &self,
        discriminant: &Node,
        cases: &[SwitchCase],
        scope: &ScopeRef,
    ) -> ExecResult {
        let discriminant = self.eval(discriminant, scope)?;
        let switch_scope = Scope::child(scope, ScopeKind::Block);

        let mut start = None;
        for (index, case) in cases.iter().enumerate() {
            let matched = match &case.test {
                None => true,
                Some(test) => {
                    strict_equals(&self.eval(test, &switch_scope)?, &discriminant)
                }
            };
            if matched {
                start = Some(index);
                break;
            }
        }
        let Some(start) = start else {
            return Ok(Completion::normal());
        };

        let mut last = Value::Undefined;
        for case in &cases[start..] {
            for statement in &case.consequent {
                match self.exec(statement, &switch_scope)? {
                    Completion::Normal(value) => last = value,
                    Completion::Break(None) => return Ok(Completion::Normal(last)),
                    abrupt => return Ok(abrupt),
                }
            }
        }
        Ok(Completion::Normal(last))
    }

    /// `try`/`catch`/`finally`.
    ///
    /// The catch parameter binds with `let` semantics in a fresh block
    /// frame. The finalizer always runs; when it completes abruptly
    /// (control signal or raise) that outcome replaces the try/catch
    /// outcome, including an in-flight `return`.
    fn exec_try(
        &self,
        block: &Node,
        handler: Option<&CatchClause>,
        finalizer: Option<&Node>,
        scope: &ScopeRef,
    ) -> ExecResult {
        let mut outcome = self.exec(block, scope);

        if let Some(clause) = handler {
            outcome = match outcome {
                Err(error) => {
                    let catch_scope = Scope::child(scope, ScopeKind::Block);
                    catch_scope.borrow_mut().declare(
                        &clause.param.name,
                        error.catch_value(),
                        DeclKind::Let,
                    )?;
                    self.exec(&clause.body, &catch_scope)
                }
                completed => completed,
            };
        }

        if let Some(finalizer) = finalizer {
            match self.exec(finalizer, scope)? {
                Completion::Normal(_) => {}
                abrupt => return Ok(abrupt),
            }
        }
        outcome
    }
}

/// Own enumerable keys of a `for...in` subject, snapshotted before the
/// first iteration. Objects enumerate in insertion order, arrays and
/// strings by index; every other value yields nothing.
fn enumerate_keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(object) => object.borrow().keys().cloned().collect(),
        Value::Array(items) => (0..items.borrow().len()).map(|i| i.to_string()).collect(),
        Value::Str(text) => (0..text.chars().count()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}
