//! Lexical environment (scope chain) for the interpreter.
//!
//! A frame chain implements var/let/const resolution: lookups walk the
//! local frame, then the parent chain, then the shared global table.
//! `var` declarations hoist past block frames to the nearest `function`
//! frame; `let`/`const` stay in the frame that declared them.
//!
//! Frames are `Shared` (reference counted) because closures keep their
//! defining frame alive after the block or call that created it ends.

use rustc_hash::FxHashMap;

use esi_ast::DeclKind;

use crate::errors::{const_assignment, duplicate_declaration, reference_error, RuntimeError};
use crate::shared::Shared;
use crate::value::Value;

/// What kind of construct created a frame. Determines where `var`
/// hoisting stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// Function invocation frame (also the root/global frame).
    Function,
    /// Block, loop header, or catch-clause frame.
    Block,
}

/// A named mutable storage cell with its declaration kind.
#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    kind: DeclKind,
}

/// The host-registered global declaration table, shared by every frame
/// of one interpreter. Consulted last by `get`/`set`, as a fallback
/// rather than an override.
pub type Globals = Shared<FxHashMap<String, Value>>;

/// A reference-counted handle to one scope frame.
pub type ScopeRef = Shared<Scope>;

/// One level of the lexical scope chain.
pub struct Scope {
    kind: ScopeKind,
    bindings: FxHashMap<String, Binding>,
    /// Parent frame; the child keeps the parent alive.
    parent: Option<ScopeRef>,
    globals: Globals,
}

impl Scope {
    /// Create the root frame (kind `function`) over a global table.
    pub fn root(globals: Globals) -> ScopeRef {
        Shared::new(Scope {
            kind: ScopeKind::Function,
            bindings: FxHashMap::default(),
            parent: None,
            globals,
        })
    }

    /// Create a child frame of `parent`.
    pub fn child(parent: &ScopeRef, kind: ScopeKind) -> ScopeRef {
        let globals = parent.borrow().globals.clone();
        Shared::new(Scope {
            kind,
            bindings: FxHashMap::default(),
            parent: Some(parent.clone()),
            globals,
        })
    }

    /// Look a name up: local frame, then parents, then globals.
    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        if let Some(binding) = self.bindings.get(name) {
            return Ok(binding.value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().get(name);
        }
        if let Some(value) = self.globals.borrow().get(name) {
            return Ok(value.clone());
        }
        Err(reference_error(name))
    }

    /// Assign to an existing binding, respecting `const`.
    ///
    /// No implicit global creation: an undeclared name is a
    /// `ReferenceError` even in assignment position.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if binding.kind == DeclKind::Const {
                return Err(const_assignment(name));
            }
            binding.value = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().set(name, value);
        }
        let mut globals = self.globals.borrow_mut();
        if let Some(slot) = globals.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        Err(reference_error(name))
    }

    /// Declare a name, dispatching on kind.
    ///
    /// `var` walks up past block frames and installs at the nearest
    /// `function` frame (hoisting); `let`/`const` install here and
    /// reject duplicates in this frame.
    pub fn declare(
        &mut self,
        name: &str,
        value: Value,
        kind: DeclKind,
    ) -> Result<(), RuntimeError> {
        match kind {
            DeclKind::Var => self.declare_var(name, value),
            DeclKind::Let | DeclKind::Const => {
                if self.bindings.contains_key(name) {
                    return Err(duplicate_declaration(name));
                }
                self.bindings.insert(
                    name.to_string(),
                    Binding { value, kind },
                );
                Ok(())
            }
        }
    }

    fn declare_var(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        match &self.parent {
            Some(parent) if self.kind == ScopeKind::Block => {
                parent.borrow_mut().declare_var(name, value)
            }
            _ => {
                // Re-declaring a var overwrites; duplicates are legal.
                self.bindings.insert(
                    name.to_string(),
                    Binding {
                        value,
                        kind: DeclKind::Var,
                    },
                );
                Ok(())
            }
        }
    }

    /// Overwrite a binding wherever it lives, skipping the `const`
    /// check. Used only for the `for...in` loop variable, which the
    /// source language rebinds directly through its storage cell.
    pub(crate) fn rebind(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if let Some(binding) = self.bindings.get_mut(name) {
            binding.value = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().rebind(name, value);
        }
        let mut globals = self.globals.borrow_mut();
        if let Some(slot) = globals.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        Err(reference_error(name))
    }

    /// Whether this frame (not the chain) already declares `name`.
    pub fn declares_locally(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }
}
