//! Record objects: ordered hash maps that double as user-defined types.
//!
//! Entries live in hash buckets keyed by a 64-bit key hash; colliding keys
//! share a bucket and are told apart by value equality. `key_order` keeps
//! first-insertion order for iteration and display. Re-setting a key
//! updates its value in place without moving it.
//!
//! The defining environment, the delegation record and the main callable
//! are stored as ordinary entries under the reserved keys `.parent`,
//! `.super` and `.main`, so generic key traversal reaches them too.

use rustc_hash::{FxHashMap, FxHasher};
use std::fmt;
use std::hash::{Hash, Hasher};

use zy_ir::{Name, Symbol};

use crate::errors::{key_not_found, unhashable_key, RuntimeError};
use crate::function::FunctionValue;
use crate::scope::LocalScope;
use crate::value::{Heap, Value, MAIN_KEY, PARENT_KEY, SUPER_KEY};

/// Shared handle to a record; two handles are the same record iff
/// `LocalScope::ptr_eq`.
pub type RecordRef = LocalScope<Record>;

/// Hash of a record key.
///
/// Only scalars, strings, symbols and sentinels are keys. Strings hash by
/// text, so raw and quoted spellings of the same text are the same key.
pub fn hash_key(key: &Value) -> Result<u64, RuntimeError> {
    let mut h = FxHasher::default();
    std::mem::discriminant(key).hash(&mut h);
    match key {
        Value::Int(n) => n.hash(&mut h),
        Value::Float(x) => x.to_bits().hash(&mut h),
        Value::Bool(b) => b.hash(&mut h),
        Value::Char(c) => c.hash(&mut h),
        Value::Symbol(s) => s.hash(&mut h),
        Value::Sentinel(s) => s.hash(&mut h),
        Value::Str { text, .. } => text.hash(&mut h),
        _ => return Err(unhashable_key(key)),
    }
    Ok(h.finish())
}

/// A record instance.
pub struct Record {
    type_name: String,
    buckets: FxHashMap<u64, Vec<(Value, Value)>>,
    key_order: Vec<Value>,
    methods: FxHashMap<Name, Heap<FunctionValue>>,
}

impl Record {
    pub fn new(type_name: &str) -> Self {
        Record {
            type_name: type_name.to_string(),
            buckets: FxHashMap::default(),
            key_order: Vec::new(),
            methods: FxHashMap::default(),
        }
    }

    /// Allocate this record behind a shared handle.
    pub fn into_ref(self) -> RecordRef {
        LocalScope::new(self)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Number of keys, reserved keys included.
    pub fn len(&self) -> usize {
        self.key_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_order.is_empty()
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> &[Value] {
        &self.key_order
    }

    fn find(&self, key: &Value) -> Result<Option<&Value>, RuntimeError> {
        let hash = hash_key(key)?;
        Ok(self
            .buckets
            .get(&hash)
            .and_then(|bucket| bucket.iter().find(|(k, _)| k == key))
            .map(|(_, v)| v))
    }

    pub fn get(&self, key: &Value) -> Result<Value, RuntimeError> {
        self.find(key)?.cloned().ok_or_else(|| key_not_found(key))
    }

    /// Like `get`, with a fallback for missing keys.
    pub fn get_or(&self, key: &Value, default: Value) -> Result<Value, RuntimeError> {
        Ok(self.find(key)?.cloned().unwrap_or(default))
    }

    pub fn contains_key(&self, key: &Value) -> Result<bool, RuntimeError> {
        Ok(self.find(key)?.is_some())
    }

    /// Insert or update in place.
    ///
    /// A fresh key is appended to the key order; an existing key keeps its
    /// position.
    pub fn set(&mut self, key: Value, value: Value) -> Result<(), RuntimeError> {
        let hash = hash_key(&key)?;
        let bucket = self.buckets.entry(hash).or_default();
        if let Some(slot) = bucket.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
            return Ok(());
        }
        bucket.push((key.clone(), value));
        self.key_order.push(key);
        Ok(())
    }

    /// Bind a symbol key.
    pub fn bind_symbol(&mut self, key: Symbol, value: Value) {
        // Symbols always hash.
        let _ = self.set(Value::Symbol(key), value);
    }

    fn reserved(&self, key: Symbol) -> Option<Value> {
        self.find(&Value::Symbol(key)).ok().flatten().cloned()
    }

    /// Entries in key order.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.key_order
            .iter()
            .filter_map(|k| Some((k.clone(), self.find(k).ok()??.clone())))
            .collect()
    }

    /// Set the defining environment (`.parent`).
    pub fn set_defn_env(&mut self, env: RecordRef) {
        self.bind_symbol(PARENT_KEY, Value::Record(env));
    }

    pub fn defn_env(&self) -> Option<RecordRef> {
        match self.reserved(PARENT_KEY)? {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Set the delegation record (`.super`).
    pub fn set_super(&mut self, parent: RecordRef) {
        self.bind_symbol(SUPER_KEY, Value::Record(parent));
    }

    pub fn super_record(&self) -> Option<RecordRef> {
        match self.reserved(SUPER_KEY)? {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Set the main callable (`.main`).
    pub fn set_main(&mut self, main: Heap<FunctionValue>) {
        self.bind_symbol(MAIN_KEY, Value::Function(main));
    }

    pub fn main_function(&self) -> Option<Heap<FunctionValue>> {
        match self.reserved(MAIN_KEY)? {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Register a method, replacing any previous one of that name.
    pub fn add_method(&mut self, name: Symbol, func: Heap<FunctionValue>) {
        self.methods.insert(name.id(), func);
    }

    /// Method from this record's own table. The super chain is not searched.
    pub fn method(&self, name: Symbol) -> Option<Heap<FunctionValue>> {
        self.methods.get(&name.id()).cloned()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type_name", &self.type_name)
            .field("keys", &self.key_order.len())
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// `(TypeName k1:v1 k2:v2)` in key order. Reserved keys are omitted since
/// they point back into the record graph.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.type_name)?;
        for (key, value) in self.entries() {
            if matches!(&key, Value::Symbol(s) if s.id().is_reserved()) {
                continue;
            }
            write!(f, " {key}:{value}")?;
        }
        f.write_str(")")
    }
}
