//! Zygo runtime core.
//!
//! The value model and everything it needs to run closures: scope frames,
//! records with method dispatch, package namespaces and the type registry.
//! Parsing and evaluation live outside this crate; an evaluator plugs in
//! through the `Evaluator` trait and receives `Environment` and `Value`s.
//!
//! # Ownership
//!
//! Scope frames, records and packages are shared, mutable and
//! single-threaded (`LocalScope`, an `Rc<RefCell<_>>`). A frame stays alive
//! as long as its creating call or any closure that captured it does. Cycles
//! (a closure stored in the frame it captured) are not collected.

mod builtins;
mod environment;
pub mod errors;
mod function;
mod literal;
mod package;
mod record;
mod scope;
pub mod strings;
mod types;
mod value;

pub use builtins::register as register_builtins;
pub use environment::{Environment, Evaluator};
pub use errors::{EvalResult, RuntimeError};
pub use function::{Callable, FunctionValue, NativeFn, UserBody};
pub use literal::decode_literal;
pub use package::{Package, PackageRef};
pub use record::{hash_key, Record, RecordRef};
pub use scope::{LocalScope, Scope, ScopeRef};
pub use types::{NativeBridge, RegisteredType, TypeHandle, TypeKind, TypeRegistry, BUILTIN_TYPES};
pub use value::{
    cons, is_proper_list, list_to_vec, ArrayValue, Heap, NativeObject, Pair, RawBytes, Sentinel,
    Value,
};

pub use zy_ir::{Name, SharedSymbolTable, Symbol, SymbolTable};
