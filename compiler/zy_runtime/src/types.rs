//! Runtime type registry.
//!
//! Every value can report a type handle. Built-in scalar types are
//! registered up front; slice types are created on demand from an element
//! type; record types are registered by name when declared. Types of
//! native host objects are resolved through a `NativeBridge`, the single
//! seam where an embedding plugs in host-side introspection.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// What a registered type describes.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
    /// `int64`, `float64`, `bool`, `int32` (characters), `string`.
    Builtin,
    /// `[]elem`.
    Slice(TypeHandle),
    /// A user-declared record type.
    Record,
    /// A host type resolved through the native bridge.
    Native,
}

/// A registered type.
#[derive(Debug, PartialEq)]
pub struct RegisteredType {
    name: String,
    kind: TypeKind,
}

impl RegisteredType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }
}

/// Shared handle to a registered type; equal iff the same registration.
#[derive(Clone)]
pub struct TypeHandle(Rc<RegisteredType>);

impl TypeHandle {
    /// A handle not owned by any registry (used by native bridges).
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeHandle(Rc::new(RegisteredType {
            name: name.into(),
            kind,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHandle({})", self.0.name)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// Host-side type resolution for opaque native objects.
pub trait NativeBridge {
    /// Resolve a host type by name, or `None` if the host does not know it.
    fn resolve_native_type(&self, name: &str) -> Option<TypeHandle>;
}

/// Names of the scalar types every registry starts with.
pub const BUILTIN_TYPES: [&str; 5] = ["int64", "float64", "bool", "int32", "string"];

/// Name-keyed registry of type handles.
///
/// Interior mutability lets lazily computed types (array element slices,
/// bridged native types) register through a shared reference.
pub struct TypeRegistry {
    types: RefCell<FxHashMap<String, TypeHandle>>,
    bridge: Option<Box<dyn NativeBridge>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut types = FxHashMap::default();
        for name in BUILTIN_TYPES {
            types.insert(name.to_string(), TypeHandle::new(name, TypeKind::Builtin));
        }
        TypeRegistry {
            types: RefCell::new(types),
            bridge: None,
        }
    }

    /// Install the collaborator that resolves native host types.
    pub fn set_native_bridge(&mut self, bridge: Box<dyn NativeBridge>) {
        self.bridge = Some(bridge);
    }

    pub fn get(&self, name: &str) -> Option<TypeHandle> {
        self.types.borrow().get(name).cloned()
    }

    /// Register `name`, or return the existing registration unchanged.
    pub fn register(&self, name: &str, kind: TypeKind) -> TypeHandle {
        self.types
            .borrow_mut()
            .entry(name.to_string())
            .or_insert_with(|| TypeHandle::new(name, kind))
            .clone()
    }

    pub fn register_record(&self, name: &str) -> TypeHandle {
        self.register(name, TypeKind::Record)
    }

    /// The `[]elem` type for `elem`, created on first request.
    pub fn get_or_create_slice_type(&self, elem: &TypeHandle) -> TypeHandle {
        let name = format!("[]{}", elem.name());
        self.register(&name, TypeKind::Slice(elem.clone()))
    }

    /// Resolve a native type: registered names first, then the bridge.
    ///
    /// Bridge answers are cached so repeated lookups yield the same handle.
    pub fn resolve_native(&self, name: &str) -> Option<TypeHandle> {
        if let Some(found) = self.get(name) {
            return Some(found);
        }
        let resolved = self.bridge.as_ref()?.resolve_native_type(name)?;
        tracing::trace!(name, "native type resolved through bridge");
        self.types
            .borrow_mut()
            .insert(name.to_string(), resolved.clone());
        Some(resolved)
    }

    pub fn len(&self) -> usize {
        self.types.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.borrow().is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.len())
            .field("has_bridge", &self.bridge.is_some())
            .finish()
    }
}
