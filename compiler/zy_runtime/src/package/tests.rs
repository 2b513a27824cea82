use super::*;
use pretty_assertions::assert_eq;

fn func(name: &str) -> Heap<FunctionValue> {
    Heap::new(FunctionValue::native(name, 0, false, |_, _| Ok(Value::NULL)))
}

#[test]
fn export_registers_under_function_name() {
    let mut pkg = Package::new("math");
    pkg.export(func("sq"));
    pkg.export(func("abs"));
    assert_eq!(pkg.export_names(), vec!["abs", "sq"]);
    assert_eq!(pkg.qualified_name("sq"), "math/sq");
}

#[test]
fn re_export_overwrites() {
    let mut pkg = Package::new("p");
    let first = func("f");
    let second = func("f");
    pkg.export(first.clone());
    pkg.export(second.clone());
    assert_eq!(pkg.len(), 1);
    assert!(Heap::ptr_eq(&pkg.get("f").unwrap(), &second));
}

#[test]
fn qualified_exports_are_sorted() {
    let mut pkg = Package::new("p");
    pkg.export(func("b"));
    pkg.export(func("a"));
    let names: Vec<String> = pkg.qualified_exports().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["p/a", "p/b"]);
}

#[test]
fn from_functions_builds_variadic_natives() {
    type Builtin = fn(&mut Environment, &[Value]) -> EvalResult;
    let funcs: [(&'static str, Builtin); 2] = [
        ("one", |_, _| Ok(Value::Int(1))),
        ("two", |_, _| Ok(Value::Int(2))),
    ];
    let pkg = Package::from_functions("util", funcs);
    assert_eq!(pkg.name(), "util");
    let one = pkg.get("one").unwrap();
    assert!(one.is_variadic());
    assert_eq!(one.arity(), 0);
}

#[test]
fn display_lists_exports() {
    let mut pkg = Package::new("p");
    pkg.export(func("g"));
    pkg.export(func("f"));
    assert_eq!(pkg.to_string(), "{\n\tf:\t fn [f]\n\tg:\t fn [g]\n}");
}
