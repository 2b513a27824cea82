//! Core built-in functions registered into a session.
//!
//! | name | arity | effect |
//! |---|---|---|
//! | `package` | 1 | create or fetch a package by name |
//! | `export` | 2 | export a function from a package |
//! | `import` | 1 | bind a package's exports as `pkg/func` globals |
//! | `_call` | 2+ | dispatch a method on a record |
//! | `concat` | 1+ | join strings |
//! | `append` | 2 | append a char to a string |
//! | `chomp` | 1 | drop one trailing newline |
//! | `trim` | 1 | strip surrounding whitespace |

use crate::environment::Environment;
use crate::errors::{type_mismatch, EvalResult};
use crate::function::FunctionValue;
use crate::strings;
use crate::value::Value;

/// Bind every core built-in into `env`'s global scope.
pub fn register(env: &mut Environment) {
    env.add_function(FunctionValue::native("package", 1, false, package));
    env.add_function(FunctionValue::native("export", 2, false, export));
    env.add_function(FunctionValue::native("import", 1, false, import));
    env.add_function(FunctionValue::native("_call", 2, true, call_method));
    env.add_function(FunctionValue::native("concat", 1, true, |_, args| {
        strings::concat_str(&args[0], &args[1..])
    }));
    env.add_function(FunctionValue::native("append", 2, false, |_, args| {
        strings::append_char(&args[0], &args[1])
    }));
    env.add_function(FunctionValue::native("chomp", 1, false, |_, args| {
        strings::chomp(&args[0])
    }));
    env.add_function(FunctionValue::native("trim", 1, false, |_, args| {
        strings::trim(&args[0])
    }));
}

fn package(env: &mut Environment, args: &[Value]) -> EvalResult {
    let name = args[0]
        .as_str()
        .ok_or_else(|| type_mismatch("package: name", "string", &args[0]))?;
    Ok(Value::Package(env.create_or_get_package(name)))
}

fn export(_env: &mut Environment, args: &[Value]) -> EvalResult {
    let pkg = args[0]
        .as_package()
        .ok_or_else(|| type_mismatch("export: first argument", "package", &args[0]))?;
    let func = args[1]
        .as_function()
        .ok_or_else(|| type_mismatch("export: second argument", "function", &args[1]))?;
    pkg.borrow_mut().export(func.clone());
    Ok(Value::NULL)
}

fn import(env: &mut Environment, args: &[Value]) -> EvalResult {
    let name = args[0]
        .as_str()
        .ok_or_else(|| type_mismatch("import: name", "string", &args[0]))?;
    Ok(Value::Package(env.import_package(name)?))
}

/// `(_call record method args...)`; the method is a symbol or a string.
fn call_method(env: &mut Environment, args: &[Value]) -> EvalResult {
    let record = args[0]
        .as_record()
        .ok_or_else(|| type_mismatch("_call: receiver", "record", &args[0]))?
        .clone();
    let method = match &args[1] {
        Value::Symbol(s) => *s,
        Value::Str { text, .. } => env.symbol(text),
        other => return Err(type_mismatch("_call: method name", "symbol or string", other)),
    };
    env.call_method(&record, method, &args[2..])
}
