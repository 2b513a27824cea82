//! Runtime error types.
//!
//! Every failure surfaced by the value layer is a typed, recoverable
//! `RuntimeError`. Factory functions below are the public API for building
//! them; call sites never assemble variants by hand.

use thiserror::Error;

use crate::value::Value;

/// Result of a runtime operation that produces a value.
pub type EvalResult = Result<Value, RuntimeError>;

/// Typed runtime failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Scope lookup reached the root (or a function boundary) without a binding.
    #[error("symbol `{name}` not found")]
    SymbolNotFound { name: String },

    /// Record method dispatch found no method of that name on the record itself.
    #[error("method `{method}` not found on record `{type_name}`")]
    MethodNotFound { method: String, type_name: String },

    #[error("`{name}` expects {} {expected} argument{}, got {got}",
        arity_qualifier(.variadic), plural(.expected))]
    WrongArgumentCount {
        name: String,
        expected: usize,
        got: usize,
        variadic: bool,
    },

    /// An operation received a value of the wrong variant.
    #[error("{context}: expected {expected}, got {got}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("unknown package `{name}`")]
    UnknownPackage { name: String },

    #[error("key `{key}` not found")]
    KeyNotFound { key: String },

    /// Record keys must be scalars, strings, symbols or sentinels.
    #[error("value of type {type_name} cannot be used as a record key")]
    UnhashableKey { type_name: &'static str },

    #[error("expected a proper list, found a chain ending in `{tail}`")]
    ImproperList { tail: String },

    #[error("invalid {kind} literal `{text}`")]
    InvalidLiteral { kind: &'static str, text: String },

    /// A user-defined function was called with no evaluator installed.
    #[error("cannot call `{name}`: no evaluator installed")]
    NoEvaluator { name: String },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn arity_qualifier(variadic: &bool) -> &'static str {
    if *variadic {
        "at least"
    } else {
        "exactly"
    }
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

#[cold]
pub fn symbol_not_found(name: &str) -> RuntimeError {
    RuntimeError::SymbolNotFound {
        name: name.to_string(),
    }
}

#[cold]
pub fn method_not_found(method: &str, type_name: &str) -> RuntimeError {
    RuntimeError::MethodNotFound {
        method: method.to_string(),
        type_name: type_name.to_string(),
    }
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize, variadic: bool) -> RuntimeError {
    RuntimeError::WrongArgumentCount {
        name: name.to_string(),
        expected,
        got,
        variadic,
    }
}

/// `got` is the offending value; its variant name goes in the message.
#[cold]
pub fn type_mismatch(context: impl Into<String>, expected: &'static str, got: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        context: context.into(),
        expected,
        got: got.type_name(),
    }
}

#[cold]
pub fn unknown_package(name: &str) -> RuntimeError {
    RuntimeError::UnknownPackage {
        name: name.to_string(),
    }
}

#[cold]
pub fn key_not_found(key: &Value) -> RuntimeError {
    RuntimeError::KeyNotFound {
        key: key.to_string(),
    }
}

#[cold]
pub fn unhashable_key(key: &Value) -> RuntimeError {
    RuntimeError::UnhashableKey {
        type_name: key.type_name(),
    }
}

#[cold]
pub fn improper_list(tail: &Value) -> RuntimeError {
    RuntimeError::ImproperList {
        tail: tail.to_string(),
    }
}

#[cold]
pub fn invalid_literal(kind: &'static str, text: &str) -> RuntimeError {
    RuntimeError::InvalidLiteral {
        kind,
        text: text.to_string(),
    }
}

#[cold]
pub fn no_evaluator(name: &str) -> RuntimeError {
    RuntimeError::NoEvaluator {
        name: name.to_string(),
    }
}
