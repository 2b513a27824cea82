//! Lexical scope frames.
//!
//! A frame maps symbols to values and links to its parent. Frames are
//! shared: a closure holds the same `ScopeRef` as the call that created it,
//! so a binding added or reassigned through either path is visible to both.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt::{self, Write as _};
use std::ops::Deref;
use std::rc::Rc;

use zy_ir::{Name, Symbol};

use crate::errors::{symbol_not_found, EvalResult, RuntimeError};
use crate::value::Value;

/// Single-threaded shared, mutable cell.
///
/// Wraps `Rc<RefCell<T>>` so every shared frame, record and package is
/// allocated through `LocalScope::new` and compared by identity with
/// `LocalScope::ptr_eq`. Not `Send`: one evaluation session runs on one
/// thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Shared handle to a scope frame.
pub type ScopeRef = LocalScope<Scope>;

#[derive(Clone)]
struct Binding {
    symbol: Symbol,
    value: Value,
}

/// One frame of the scope chain.
#[derive(Clone, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Binding>,
    parent: Option<ScopeRef>,
    /// Set on the frame a function call creates for its parameters.
    is_function: bool,
}

impl Scope {
    /// A root frame.
    pub fn new() -> Self {
        Scope::default()
    }

    /// A block frame nested in `parent`.
    pub fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
            is_function: false,
        }
    }

    /// The frame a function body runs in; bounds `lookup_until_function`.
    pub fn function_frame(parent: Option<ScopeRef>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent,
            is_function: true,
        }
    }

    /// Allocate this frame behind a shared handle.
    pub fn into_ref(self) -> ScopeRef {
        LocalScope::new(self)
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        self.is_function
    }

    #[inline]
    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    /// Number of bindings in this frame only.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bind in this frame, replacing any existing binding of the same symbol.
    #[inline]
    pub fn define(&mut self, symbol: Symbol, value: Value) {
        self.bindings.insert(symbol.id(), Binding { symbol, value });
    }

    /// Whether this frame itself binds `name`.
    #[inline]
    pub fn contains_local(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Walk from this frame to the root and return the first binding.
    pub fn lookup(&self, symbol: Symbol) -> EvalResult {
        if let Some(binding) = self.bindings.get(&symbol.id()) {
            return Ok(binding.value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(symbol),
            None => Err(symbol_not_found(symbol.name())),
        }
    }

    /// Like `lookup`, but stops after the nearest enclosing function frame.
    ///
    /// Bindings captured from outside the current function are invisible to
    /// this form.
    pub fn lookup_until_function(&self, symbol: Symbol) -> EvalResult {
        if let Some(binding) = self.bindings.get(&symbol.id()) {
            return Ok(binding.value.clone());
        }
        if self.is_function {
            return Err(symbol_not_found(symbol.name()));
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup_until_function(symbol),
            None => Err(symbol_not_found(symbol.name())),
        }
    }

    /// Rebind the nearest existing binding of `symbol`.
    pub fn assign(&mut self, symbol: Symbol, value: Value) -> Result<(), RuntimeError> {
        if let Some(binding) = self.bindings.get_mut(&symbol.id()) {
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(symbol, value),
            None => Err(symbol_not_found(symbol.name())),
        }
    }

    /// Bindings of this frame sorted by name.
    pub fn local_bindings(&self) -> Vec<(Symbol, Value)> {
        let mut out: Vec<(Symbol, Value)> = self
            .bindings
            .values()
            .map(|b| (b.symbol, b.value.clone()))
            .collect();
        out.sort_by(|a, b| a.0.name().cmp(b.0.name()));
        out
    }

    /// Multi-line dump of the chain, innermost frame first.
    pub fn show(&self, indent: usize, label: &str) -> String {
        let pad = " ".repeat(indent);
        let mut out = format!("{pad}{label} scope chain:\n");
        self.show_frames(&mut out, &pad, 0);
        out
    }

    fn show_frames(&self, out: &mut String, pad: &str, depth: usize) {
        let kind = if self.is_function { " (function)" } else { "" };
        let _ = writeln!(out, "{pad}  frame {depth}{kind}:");
        for (symbol, value) in self.local_bindings() {
            let _ = writeln!(out, "{pad}    {symbol} = {value}");
        }
        if let Some(parent) = &self.parent {
            parent.borrow().show_frames(out, pad, depth + 1);
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("bindings", &self.bindings.len())
            .field("is_function", &self.is_function)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
