//! Function values and closures.
//!
//! A user-defined function captures the scope chain live at its creation.
//! The capture is a shared handle, never a snapshot: bindings added to the
//! captured frames later are visible when the closure runs.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use zy_ir::Symbol;

use crate::environment::Environment;
use crate::errors::{symbol_not_found, EvalResult};
use crate::scope::ScopeRef;
use crate::value::Value;

/// Signature of a built-in callable.
pub type NativeFn = Rc<dyn Fn(&mut Environment, &[Value]) -> EvalResult>;

/// Parameters and body form of a user-defined function.
///
/// The body is an expression tree; the installed `Evaluator` walks it.
#[derive(Clone, Debug)]
pub struct UserBody {
    pub params: Vec<Symbol>,
    pub body: Value,
}

/// What runs when the function is called.
#[derive(Clone)]
pub enum Callable {
    Native(NativeFn),
    User(UserBody),
}

/// A callable value.
pub struct FunctionValue {
    name: String,
    arity: usize,
    variadic: bool,
    callable: Callable,
    closing: RefCell<Option<ScopeRef>>,
    /// Receives unevaluated argument forms.
    is_builder: bool,
    /// Source form, used for rendering when present.
    orig: Option<Value>,
}

impl FunctionValue {
    /// A built-in function taking exactly `arity` arguments, or at least
    /// `arity` when `variadic`.
    pub fn native(
        name: &str,
        arity: usize,
        variadic: bool,
        f: impl Fn(&mut Environment, &[Value]) -> EvalResult + 'static,
    ) -> Self {
        FunctionValue {
            name: name.to_string(),
            arity,
            variadic,
            callable: Callable::Native(Rc::new(f)),
            closing: RefCell::new(None),
            is_builder: false,
            orig: None,
        }
    }

    /// A built-in that receives its argument forms unevaluated.
    pub fn builder(
        name: &str,
        f: impl Fn(&mut Environment, &[Value]) -> EvalResult + 'static,
    ) -> Self {
        FunctionValue {
            is_builder: true,
            ..FunctionValue::native(name, 0, true, f)
        }
    }

    /// A user-defined closure over `closing`.
    ///
    /// Arity is the parameter count; a variadic function accepts extra
    /// arguments beyond it.
    pub fn user(
        name: &str,
        params: Vec<Symbol>,
        variadic: bool,
        body: Value,
        closing: ScopeRef,
    ) -> Self {
        FunctionValue {
            name: name.to_string(),
            arity: params.len(),
            variadic,
            callable: Callable::User(UserBody { params, body }),
            closing: RefCell::new(Some(closing)),
            is_builder: false,
            orig: None,
        }
    }

    /// Attach the source form this function was built from.
    #[must_use]
    pub fn with_source(mut self, orig: Value) -> Self {
        self.orig = Some(orig);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    #[inline]
    pub fn is_builder(&self) -> bool {
        self.is_builder
    }

    #[inline]
    pub fn is_user(&self) -> bool {
        matches!(self.callable, Callable::User(_))
    }

    #[inline]
    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    pub fn source(&self) -> Option<&Value> {
        self.orig.as_ref()
    }

    /// Whether `got` arguments satisfy the declared arity.
    pub fn accepts(&self, got: usize) -> bool {
        if self.variadic {
            got >= self.arity
        } else {
            got == self.arity
        }
    }

    /// The captured scope chain, if any.
    pub fn closing(&self) -> Option<ScopeRef> {
        self.closing.borrow().clone()
    }

    /// Re-point the captured chain.
    ///
    /// Every holder of this function sees the new chain from now on.
    pub fn set_closing(&self, closing: ScopeRef) {
        tracing::trace!(function = %self.name, "re-pointing captured scope");
        *self.closing.borrow_mut() = Some(closing);
    }

    /// Look `symbol` up through the captured chain.
    pub fn closing_lookup(&self, symbol: Symbol) -> EvalResult {
        match &*self.closing.borrow() {
            Some(scope) => scope.borrow().lookup(symbol),
            None => Err(symbol_not_found(symbol.name())),
        }
    }

    /// Bounded lookup through the captured chain; stops at the nearest
    /// function frame.
    pub fn closing_lookup_until_function(&self, symbol: Symbol) -> EvalResult {
        match &*self.closing.borrow() {
            Some(scope) => scope.borrow().lookup_until_function(symbol),
            None => Err(symbol_not_found(symbol.name())),
        }
    }

    /// Diagnostic dump of the captured chain.
    pub fn show_closing(&self, indent: usize, label: &str) -> String {
        match &*self.closing.borrow() {
            Some(scope) => scope.borrow().show(indent, label),
            None => format!("{} has no captured scopes.", self.name),
        }
    }

    /// Shallow duplicate sharing the same captured chain.
    ///
    /// Re-pointing the copy's chain later leaves the original untouched.
    #[must_use]
    pub fn copy(&self) -> Self {
        FunctionValue {
            name: self.name.clone(),
            arity: self.arity,
            variadic: self.variadic,
            callable: self.callable.clone(),
            closing: RefCell::new(self.closing.borrow().clone()),
            is_builder: self.is_builder,
            orig: self.orig.clone(),
        }
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("variadic", &self.variadic)
            .field("user", &self.is_user())
            .field("is_builder", &self.is_builder)
            .field("has_closing", &self.closing.borrow().is_some())
            .finish()
    }
}

/// The source form when known, otherwise `fn [name]`.
impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.orig {
            Some(orig) => write!(f, "{orig}"),
            None => write!(f, "fn [{}]", self.name),
        }
    }
}
