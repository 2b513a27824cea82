//! Package namespaces.
//!
//! A package is a flat, named registry of exported functions. Importing a
//! package binds each export into the global scope under its qualified
//! name `pkg/func`; unqualified names are never bound by import.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::function::FunctionValue;
use crate::scope::LocalScope;
use crate::value::{Heap, Value};

/// Shared handle to a package.
pub type PackageRef = LocalScope<Package>;

pub struct Package {
    name: String,
    funcs: FxHashMap<String, Heap<FunctionValue>>,
}

impl Package {
    pub fn new(name: &str) -> Self {
        Package {
            name: name.to_string(),
            funcs: FxHashMap::default(),
        }
    }

    /// A package of built-in variadic functions, one per entry.
    pub fn from_functions<F>(name: &str, funcs: impl IntoIterator<Item = (&'static str, F)>) -> Self
    where
        F: Fn(&mut Environment, &[Value]) -> EvalResult + 'static,
    {
        let mut pkg = Package::new(name);
        for (func_name, f) in funcs {
            pkg.export(Heap::new(FunctionValue::native(func_name, 0, true, f)));
        }
        pkg
    }

    pub fn into_ref(self) -> PackageRef {
        LocalScope::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `func` under its own name, replacing any earlier export of
    /// that name.
    pub fn export(&mut self, func: Heap<FunctionValue>) {
        tracing::debug!(package = %self.name, function = func.name(), "export");
        self.funcs.insert(func.name().to_string(), func);
    }

    pub fn get(&self, name: &str) -> Option<Heap<FunctionValue>> {
        self.funcs.get(name).cloned()
    }

    /// `pkg/name`.
    pub fn qualified_name(&self, name: &str) -> String {
        format!("{}/{}", self.name, name)
    }

    /// Exported names, sorted.
    pub fn export_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Exports paired with their qualified names, sorted by name.
    pub fn qualified_exports(&self) -> Vec<(String, Heap<FunctionValue>)> {
        self.export_names()
            .into_iter()
            .filter_map(|name| Some((self.qualified_name(name), self.get(name)?)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("name", &self.name)
            .field("exports", &self.export_names())
            .finish()
    }
}

/// One export per line, sorted by name.
impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{\n")?;
        for name in self.export_names() {
            if let Some(func) = self.funcs.get(name) {
                writeln!(f, "\t{name}:\t {}", &**func)?;
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests;
