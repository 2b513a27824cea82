//! One evaluation session.
//!
//! Owns the symbol table, the global scope, the package registry and the
//! type registry. Calls into user-defined function bodies go through an
//! installed `Evaluator`; this crate never walks expression trees itself.

use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;

use zy_ir::{SharedSymbolTable, Symbol};

use crate::errors::{
    method_not_found, no_evaluator, unknown_package, wrong_arg_count, EvalResult, RuntimeError,
};
use crate::function::{Callable, FunctionValue, UserBody};
use crate::package::{Package, PackageRef};
use crate::record::RecordRef;
use crate::scope::{Scope, ScopeRef};
use crate::types::{NativeBridge, TypeRegistry};
use crate::value::{Heap, Value};

/// The external evaluator seam.
pub trait Evaluator {
    /// Run a user-defined function body.
    ///
    /// Arity has already been checked against `func`.
    fn call_user(
        &self,
        env: &mut Environment,
        func: &Heap<FunctionValue>,
        body: &UserBody,
        args: &[Value],
    ) -> EvalResult;
}

pub struct Environment {
    symbols: SharedSymbolTable,
    global: ScopeRef,
    packages: FxHashMap<String, PackageRef>,
    types: TypeRegistry,
    evaluator: Option<Rc<dyn Evaluator>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_symbols(SharedSymbolTable::new())
    }

    /// A session sharing an existing symbol table.
    pub fn with_symbols(symbols: SharedSymbolTable) -> Self {
        Environment {
            symbols,
            global: Scope::new().into_ref(),
            packages: FxHashMap::default(),
            types: TypeRegistry::new(),
            evaluator: None,
        }
    }

    pub fn symbols(&self) -> &SharedSymbolTable {
        &self.symbols
    }

    /// Intern `text` as a plain symbol.
    pub fn symbol(&self, text: &str) -> Symbol {
        self.symbols.symbol(text)
    }

    pub fn global(&self) -> &ScopeRef {
        &self.global
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn set_native_bridge(&mut self, bridge: Box<dyn NativeBridge>) {
        self.types.set_native_bridge(bridge);
    }

    pub fn set_evaluator(&mut self, evaluator: Rc<dyn Evaluator>) {
        self.evaluator = Some(evaluator);
    }

    /// Bind `name` in the global scope.
    pub fn add_global(&mut self, name: &str, value: Value) {
        let symbol = self.symbol(name);
        self.global.borrow_mut().define(symbol, value);
    }

    pub fn lookup_global(&self, name: &str) -> EvalResult {
        let symbol = self.symbol(name);
        self.global.borrow().lookup(symbol)
    }

    /// Bind a built-in function globally under its own name.
    pub fn add_function(&mut self, func: FunctionValue) {
        let name = func.name().to_string();
        self.add_global(&name, Value::function(func));
    }

    /// Call `func` with already-evaluated (or, for builders, unevaluated)
    /// arguments.
    pub fn call_function(&mut self, func: &Heap<FunctionValue>, args: &[Value]) -> EvalResult {
        if !func.accepts(args.len()) {
            return Err(wrong_arg_count(
                func.name(),
                func.arity(),
                args.len(),
                func.is_variadic(),
            ));
        }
        tracing::trace!(function = func.name(), argc = args.len(), "call");
        match func.callable() {
            Callable::Native(f) => f(self, args),
            Callable::User(body) => {
                let evaluator = self
                    .evaluator
                    .clone()
                    .ok_or_else(|| no_evaluator(func.name()))?;
                evaluator.call_user(self, func, body, args)
            }
        }
    }

    /// Dispatch `method` on `record`'s own method table.
    ///
    /// Arguments are passed through unchanged. The delegation chain is not
    /// consulted: a method defined only on the super record is not found.
    pub fn call_method(&mut self, record: &RecordRef, method: Symbol, args: &[Value]) -> EvalResult {
        let func = {
            let rec = record.borrow();
            rec.method(method)
                .ok_or_else(|| method_not_found(method.name(), rec.type_name()))?
        };
        tracing::trace!(method = method.name(), "record method dispatch");
        self.call_function(&func, args)
    }

    // Packages

    /// The package named `name`, created empty on first request.
    pub fn create_or_get_package(&mut self, name: &str) -> PackageRef {
        self.packages
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(package = name, "new package");
                Package::new(name).into_ref()
            })
            .clone()
    }

    /// Register an already-built package, replacing any of the same name.
    pub fn register_package(&mut self, package: Package) -> PackageRef {
        let name = package.name().to_string();
        let pkg = package.into_ref();
        self.packages.insert(name, pkg.clone());
        pkg
    }

    pub fn package(&self, name: &str) -> Option<PackageRef> {
        self.packages.get(name).cloned()
    }

    /// Bind every export of `name` globally as `name/func`.
    pub fn import_package(&mut self, name: &str) -> Result<PackageRef, RuntimeError> {
        let pkg = self.package(name).ok_or_else(|| unknown_package(name))?;
        let exports = pkg.borrow().qualified_exports();
        tracing::debug!(package = name, count = exports.len(), "import");
        for (qualified, func) in exports {
            self.add_global(&qualified, Value::Function(func));
        }
        Ok(pkg)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("globals", &self.global.borrow().len())
            .field("packages", &self.packages.len())
            .field("types", &self.types)
            .field("has_evaluator", &self.evaluator.is_some())
            .finish()
    }
}
