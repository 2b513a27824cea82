//! Runtime values.
//!
//! `Value` is the closed tagged union every other layer switches over:
//! scalars are stored inline, everything else sits behind a shared handle.
//! Heap payloads are only constructed through the factory methods here.
//!
//! Sharing semantics differ per variant and are fixed:
//! - strings, pairs and arrays are immutable; operations return new values.
//! - records and packages are shared and mutated in place through
//!   `LocalScope`; every holder observes the change.
//! - functions are shared; only their captured scope can be re-pointed.

mod heap;

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use zy_ir::{Name, Symbol};
use zy_lexer::{escape_char_literal, escape_str_literal};

use crate::errors::{improper_list, type_mismatch, RuntimeError};
use crate::function::FunctionValue;
use crate::package::PackageRef;
use crate::record::{Record, RecordRef};
use crate::scope::LocalScope;
use crate::types::{TypeHandle, TypeRegistry};

pub use heap::Heap;

/// Singleton marker values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// Empty list and "no value".
    Null,
    /// End of input.
    End,
    /// Internal stack marker.
    Marker,
}

impl Sentinel {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentinel::Null => "nil",
            Sentinel::End => "End",
            Sentinel::Marker => "Marker",
        }
    }
}

/// A cons cell.
#[derive(Clone, Debug)]
pub struct Pair {
    pub head: Value,
    pub tail: Value,
}

/// Tails are unlinked iteratively so long lists drop in constant stack.
impl Drop for Pair {
    fn drop(&mut self) {
        let mut tail = std::mem::replace(&mut self.tail, Value::NULL);
        while let Value::Pair(next) = tail {
            match Heap::into_inner(next) {
                Some(mut pair) => tail = std::mem::replace(&mut pair.tail, Value::NULL),
                None => break,
            }
        }
    }
}

/// An array with its element type memoized on first request.
pub struct ArrayValue {
    items: Vec<Value>,
    elem_type: OnceCell<TypeHandle>,
}

impl ArrayValue {
    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

impl fmt::Debug for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

/// Byte payload with an optional type handle.
#[derive(Clone, Debug)]
pub struct RawBytes {
    pub bytes: Vec<u8>,
    pub typ: Option<TypeHandle>,
}

/// An opaque host object.
///
/// The runtime never looks inside; rendering and the type name come from
/// the host, and the type handle is resolved through the registry's native
/// bridge.
pub trait NativeObject: fmt::Debug {
    /// Host type name, used as the native-bridge lookup key.
    fn native_type_name(&self) -> &str;

    /// Canonical rendering.
    fn render(&self) -> String;
}

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Inline scalars
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Symbol(Symbol),
    Sentinel(Sentinel),

    // Heap values
    /// String; `raw` strings render between backticks.
    Str { text: Heap<str>, raw: bool },
    Raw(Heap<RawBytes>),
    Pair(Heap<Pair>),
    Array(Heap<ArrayValue>),
    Function(Heap<FunctionValue>),
    Record(RecordRef),
    Package(PackageRef),
    /// Failure description carried as data.
    Error(Heap<str>),
    Native(Rc<dyn NativeObject>),
    /// A type descriptor as a first-class value.
    Type(TypeHandle),
}

// Factory methods

impl Value {
    pub const NULL: Value = Value::Sentinel(Sentinel::Null);
    pub const END: Value = Value::Sentinel(Sentinel::End);
    pub const MARKER: Value = Value::Sentinel(Sentinel::Marker);

    #[inline]
    pub fn string(text: &str) -> Self {
        Value::Str {
            text: Heap::from_text(text),
            raw: false,
        }
    }

    /// A string that renders between backticks.
    #[inline]
    pub fn raw_string(text: &str) -> Self {
        Value::Str {
            text: Heap::from_text(text),
            raw: true,
        }
    }

    pub fn raw_bytes(bytes: Vec<u8>, typ: Option<TypeHandle>) -> Self {
        Value::Raw(Heap::new(RawBytes { bytes, typ }))
    }

    #[inline]
    pub fn cons(head: Value, tail: Value) -> Self {
        Value::Pair(Heap::new(Pair { head, tail }))
    }

    /// A proper list of `items`, terminated by `NULL`.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        let items: Vec<Value> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Value::NULL, |tail, head| Value::cons(head, tail))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(ArrayValue {
            items,
            elem_type: OnceCell::new(),
        }))
    }

    #[inline]
    pub fn function(func: FunctionValue) -> Self {
        Value::Function(Heap::new(func))
    }

    #[inline]
    pub fn record(record: Record) -> Self {
        Value::Record(LocalScope::new(record))
    }

    pub fn error(message: &str) -> Self {
        Value::Error(Heap::from_text(message))
    }

    pub fn native(obj: Rc<dyn NativeObject>) -> Self {
        Value::Native(obj)
    }
}

// Accessors and predicates

impl Value {
    /// Conditional truth: booleans are themselves, integers and characters
    /// are true iff nonzero, `nil` is the only false sentinel, and every
    /// other value is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Char(c) => *c != '\0',
            Value::Sentinel(s) => *s != Sentinel::Null,
            _ => true,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Sentinel(Sentinel::Null))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Value::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Value::Pair(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a.items()),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Heap<FunctionValue>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordRef> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_package(&self) -> Option<&PackageRef> {
        match self {
            Value::Package(p) => Some(p),
            _ => None,
        }
    }

    /// Variant name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int64",
            Value::Float(_) => "float64",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Symbol(_) => "symbol",
            Value::Sentinel(_) => "sentinel",
            Value::Str { .. } => "string",
            Value::Raw(_) => "raw",
            Value::Pair(_) => "pair",
            Value::Array(_) => "array",
            Value::Function(_) => "function",
            Value::Record(_) => "record",
            Value::Package(_) => "package",
            Value::Error(_) => "error",
            Value::Native(_) => "native",
            Value::Type(_) => "type",
        }
    }

    /// Registered type of this value, if it has one.
    ///
    /// An array takes `[]T` from its first element's type `T`; the answer is
    /// memoized once found. Symbols, pairs, functions, packages, sentinels
    /// and errors carry no type.
    pub fn type_handle(&self, types: &TypeRegistry) -> Option<TypeHandle> {
        match self {
            Value::Int(_) => types.get("int64"),
            Value::Float(_) => types.get("float64"),
            Value::Bool(_) => types.get("bool"),
            Value::Char(_) => types.get("int32"),
            Value::Str { .. } => types.get("string"),
            Value::Raw(raw) => raw.typ.clone(),
            Value::Array(arr) => {
                if let Some(found) = arr.elem_type.get() {
                    return Some(found.clone());
                }
                let elem = arr.items.first()?.type_handle(types)?;
                let slice = types.get_or_create_slice_type(&elem);
                Some(arr.elem_type.get_or_init(|| slice).clone())
            }
            Value::Record(rec) => types.get(rec.borrow().type_name()),
            Value::Native(obj) => types.resolve_native(obj.native_type_name()),
            Value::Type(t) => Some(t.clone()),
            Value::Symbol(_)
            | Value::Sentinel(_)
            | Value::Pair(_)
            | Value::Function(_)
            | Value::Package(_)
            | Value::Error(_) => None,
        }
    }
}

// Lists

/// A fresh pair.
#[inline]
pub fn cons(head: Value, tail: Value) -> Value {
    Value::cons(head, tail)
}

/// Whether following tails from `value` ends at `nil`.
pub fn is_proper_list(value: &Value) -> bool {
    let mut cur = value;
    loop {
        match cur {
            Value::Pair(p) => cur = &p.tail,
            other => return other.is_null(),
        }
    }
}

/// Collect the elements of a proper list.
pub fn list_to_vec(value: &Value) -> Result<Vec<Value>, RuntimeError> {
    let mut out = Vec::new();
    let mut cur = value;
    loop {
        match cur {
            Value::Pair(p) => {
                out.push(p.head.clone());
                cur = &p.tail;
            }
            Value::Sentinel(Sentinel::Null) => return Ok(out),
            tail if out.is_empty() => return Err(type_mismatch("list_to_vec", "list", tail)),
            tail => return Err(improper_list(tail)),
        }
    }
}

// Equality

/// Structural for data, identity for shared entities (records, packages,
/// functions, native objects, types). Strings compare by text only.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Sentinel(a), Value::Sentinel(b)) => a == b,
            (Value::Str { text: a, .. }, Value::Str { text: b, .. })
            | (Value::Error(a), Value::Error(b)) => **a == **b,
            (Value::Raw(a), Value::Raw(b)) => a.bytes == b.bytes,
            (Value::Pair(a), Value::Pair(b)) => pairs_eq(a, b),
            (Value::Array(a), Value::Array(b)) => a.items == b.items,
            (Value::Function(a), Value::Function(b)) => Heap::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => LocalScope::ptr_eq(a, b),
            (Value::Package(a), Value::Package(b)) => LocalScope::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Type(a), Value::Type(b)) => a == b,
            _ => false,
        }
    }
}

/// Walks both tail chains side by side.
fn pairs_eq(mut a: &Pair, mut b: &Pair) -> bool {
    loop {
        if a.head != b.head {
            return false;
        }
        match (&a.tail, &b.tail) {
            (Value::Pair(x), Value::Pair(y)) => {
                if Heap::ptr_eq(x, y) {
                    return true;
                }
                a = x;
                b = y;
            }
            (x, y) => return x == y,
        }
    }
}

// Rendering

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Symbol(s) => write!(f, "{s:?}"),
            Value::Sentinel(s) => write!(f, "{s:?}"),
            Value::Str { text, raw } => {
                if *raw {
                    write!(f, "RawStr({:?})", &**text)
                } else {
                    write!(f, "Str({:?})", &**text)
                }
            }
            Value::Raw(r) => write!(f, "Raw({:?})", r.bytes),
            Value::Pair(_) | Value::Array(_) => write!(f, "{self}"),
            Value::Function(func) => write!(f, "Function({})", func.name()),
            Value::Record(r) => write!(f, "Record({})", r.borrow().type_name()),
            Value::Package(p) => write!(f, "Package({})", p.borrow().name()),
            Value::Error(msg) => write!(f, "Error({})", &**msg),
            Value::Native(obj) => write!(f, "Native({obj:?})"),
            Value::Type(t) => write!(f, "Type({})", t.name()),
        }
    }
}

/// Canonical source rendering.
///
/// Literal variants render so that re-lexing the text yields an equal
/// token: strings are quoted and escaped, characters are `#c`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "#{}", escape_char_literal(*c)),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Sentinel(s) => f.write_str(s.as_str()),
            Value::Str { text, raw: true } => write!(f, "`{}`", &**text),
            Value::Str { text, raw: false } => write!(f, "\"{}\"", escape_str_literal(text)),
            Value::Raw(r) => {
                f.write_str("[]byte{")?;
                for (i, b) in r.bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{b:#x}")?;
                }
                f.write_str("}")
            }
            Value::Pair(p) => fmt_pair(p, f),
            Value::Array(arr) => {
                f.write_str("[")?;
                for (i, item) in arr.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Function(func) => write!(f, "{}", &**func),
            Value::Record(r) => write!(f, "{}", &*r.borrow()),
            Value::Package(p) => write!(f, "{}", &*p.borrow()),
            Value::Error(msg) => f.write_str(msg),
            Value::Native(obj) => f.write_str(&obj.render()),
            Value::Type(t) => write!(f, "{t}"),
        }
    }
}

/// `(a b c)` for proper lists, `(a b \ c)` when the chain ends in a non-nil.
fn fmt_pair(pair: &Pair, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("(")?;
    let mut cur = pair;
    loop {
        write!(f, "{}", cur.head)?;
        match &cur.tail {
            Value::Pair(next) => {
                f.write_str(" ")?;
                cur = next;
            }
            Value::Sentinel(Sentinel::Null) => break,
            tail => {
                write!(f, " \\ {tail}")?;
                break;
            }
        }
    }
    f.write_str(")")
}

/// Record key for the defining environment.
pub(crate) const PARENT_KEY: Symbol = Symbol::reserved(Name::PARENT);
/// Record key for the main callable.
pub(crate) const MAIN_KEY: Symbol = Symbol::reserved(Name::MAIN);
/// Record key for the delegation record.
pub(crate) const SUPER_KEY: Symbol = Symbol::reserved(Name::SUPER);
