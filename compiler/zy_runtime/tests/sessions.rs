#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test code, panics give clear failure messages"
)]

//! Whole-session behavior with a minimal evaluator plugged in.
//!
//! The evaluator here understands three forms: a symbol is looked up in the
//! current frame chain, a list is a call, and anything else evaluates to
//! itself. That is enough to drive closures, builtins, records and packages
//! end to end.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use zy_runtime::{
    list_to_vec, register_builtins, Environment, EvalResult, Evaluator, FunctionValue, Heap,
    NativeBridge, NativeObject, Record, RuntimeError, Scope, ScopeRef, Symbol, TypeHandle,
    TypeKind, UserBody, Value,
};

struct MiniEval;

fn eval(env: &mut Environment, scope: &ScopeRef, expr: &Value) -> EvalResult {
    match expr {
        Value::Symbol(sym) => scope.borrow().lookup(*sym),
        Value::Pair(_) => {
            let items = list_to_vec(expr)?;
            let head = eval(env, scope, &items[0])?;
            let func = head.as_function().cloned().ok_or_else(|| {
                zy_runtime::errors::type_mismatch("call head", "function", &head)
            })?;
            let args = items[1..]
                .iter()
                .map(|arg| eval(env, scope, arg))
                .collect::<Result<Vec<_>, _>>()?;
            env.call_function(&func, &args)
        }
        other => Ok(other.clone()),
    }
}

impl Evaluator for MiniEval {
    fn call_user(
        &self,
        env: &mut Environment,
        func: &Heap<FunctionValue>,
        body: &UserBody,
        args: &[Value],
    ) -> EvalResult {
        let frame = Scope::function_frame(func.closing()).into_ref();
        for (param, arg) in body.params.iter().zip(args) {
            frame.borrow_mut().define(*param, arg.clone());
        }
        eval(env, &frame, &body.body)
    }
}

fn session() -> Environment {
    let mut env = Environment::new();
    register_builtins(&mut env);
    env.set_evaluator(Rc::new(MiniEval));
    env
}

fn sym(env: &Environment, text: &str) -> Value {
    Value::Symbol(env.symbol(text))
}

fn user_fn(env: &Environment, name: &str, params: &[&str], body: Value, closing: ScopeRef) -> Value {
    let params: Vec<Symbol> = params.iter().map(|p| env.symbol(p)).collect();
    Value::function(FunctionValue::user(name, params, false, body, closing))
}

fn call(env: &mut Environment, f: &Value, args: &[Value]) -> EvalResult {
    let f = f.as_function().cloned().unwrap();
    env.call_function(&f, args)
}

#[test]
fn user_function_calls_builtins_with_captured_and_bound_values() {
    let mut env = session();
    env.add_global("greeting", Value::string("hello, "));

    let body = Value::list([sym(&env, "concat"), sym(&env, "greeting"), sym(&env, "who")]);
    let greet = user_fn(&env, "greet", &["who"], body, env.global().clone());

    assert_eq!(
        call(&mut env, &greet, &[Value::string("world")]),
        Ok(Value::string("hello, world"))
    );
    assert!(matches!(
        call(&mut env, &greet, &[]),
        Err(RuntimeError::WrongArgumentCount { expected: 1, got: 0, .. })
    ));
}

#[test]
fn closure_sees_rebinding_in_captured_frame() {
    let mut env = session();
    let outer = Scope::with_parent(env.global().clone()).into_ref();
    let suffix = env.symbol("suffix");
    outer.borrow_mut().define(suffix, Value::string("!"));

    let body = Value::list([sym(&env, "concat"), sym(&env, "s"), sym(&env, "suffix")]);
    let shout = user_fn(&env, "shout", &["s"], body, outer.clone());

    assert_eq!(call(&mut env, &shout, &[Value::string("hey")]), Ok(Value::string("hey!")));
    outer.borrow_mut().assign(suffix, Value::string("?")).unwrap();
    assert_eq!(call(&mut env, &shout, &[Value::string("hey")]), Ok(Value::string("hey?")));
}

#[test]
fn call_frames_do_not_leak_into_callers() {
    let mut env = session();
    let body = sym(&env, "x");
    let id = user_fn(&env, "id", &["x"], body, env.global().clone());

    assert_eq!(call(&mut env, &id, &[Value::Int(3)]), Ok(Value::Int(3)));
    assert_eq!(
        env.lookup_global("x"),
        Err(RuntimeError::SymbolNotFound {
            name: "x".to_string()
        })
    );
}

#[test]
fn exported_user_function_is_callable_after_import() {
    let mut env = session();
    let body = Value::list([sym(&env, "trim"), sym(&env, "s")]);
    let clean = user_fn(&env, "clean", &["s"], body, env.global().clone());

    let package = env.lookup_global("package").unwrap();
    let export = env.lookup_global("export").unwrap();
    let import = env.lookup_global("import").unwrap();

    let text = call(&mut env, &package, &[Value::string("text")]).unwrap();
    call(&mut env, &export, &[text, clean]).unwrap();
    call(&mut env, &import, &[Value::string("text")]).unwrap();

    let caller_body = Value::list([sym(&env, "text/clean"), Value::string("  padded  ")]);
    let caller = user_fn(&env, "caller", &[], caller_body, env.global().clone());
    assert_eq!(call(&mut env, &caller, &[]), Ok(Value::string("padded")));
}

#[test]
fn record_methods_receive_arguments_verbatim() {
    let mut env = session();
    let describe = env.symbol("describe");

    let body = Value::list([sym(&env, "concat"), sym(&env, "a"), sym(&env, "b")]);
    let method = user_fn(&env, "describe", &["a", "b"], body, env.global().clone());

    let mut rec = Record::new("Widget");
    rec.add_method(describe, method.as_function().cloned().unwrap());
    let rec = Value::record(rec);

    let dispatch = env.lookup_global("_call").unwrap();
    assert_eq!(
        call(
            &mut env,
            &dispatch,
            &[rec.clone(), Value::string("describe"), Value::string("x"), Value::string("y")]
        ),
        Ok(Value::string("xy"))
    );
    assert!(matches!(
        call(&mut env, &dispatch, &[rec, Value::string("describe"), Value::string("x")]),
        Err(RuntimeError::WrongArgumentCount { expected: 2, got: 1, .. })
    ));
}

#[derive(Debug)]
struct Socket;

impl NativeObject for Socket {
    fn native_type_name(&self) -> &str {
        "net.Conn"
    }

    fn render(&self) -> String {
        "&{net.Conn}".to_string()
    }
}

struct NetTypes;

impl NativeBridge for NetTypes {
    fn resolve_native_type(&self, name: &str) -> Option<TypeHandle> {
        (name == "net.Conn").then(|| TypeHandle::new(name, TypeKind::Native))
    }
}

#[test]
fn native_values_resolve_types_through_the_bridge() {
    let mut env = session();
    let conn = Value::native(Rc::new(Socket));
    assert!(conn.type_handle(env.types()).is_none());

    env.set_native_bridge(Box::new(NetTypes));
    let first = conn.type_handle(env.types()).unwrap();
    let second = conn.type_handle(env.types()).unwrap();
    assert_eq!(first.name(), "net.Conn");
    assert_eq!(first, second);
    assert_eq!(conn.to_string(), "&{net.Conn}");
}
