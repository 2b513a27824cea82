//! Session-wide symbol table.
//!
//! Interning is idempotent within one table: the same text always yields
//! the same `Name`. Strings are leaked so lookups hand out `&'static str`
//! without holding the lock.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Table exceeded `u32` capacity.
    Overflow { count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "symbol table exceeded capacity: {count} symbols, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

#[derive(Default)]
struct Storage {
    map: FxHashMap<&'static str, Name>,
    names: Vec<&'static str>,
}

/// Interning table mapping symbol text to dense `Name` ids.
pub struct SymbolTable {
    storage: RwLock<Storage>,
}

impl SymbolTable {
    /// Create a table with the reserved names pre-interned at their fixed ids.
    pub fn new() -> Self {
        let mut storage = Storage::default();
        for (i, text) in Name::RESERVED.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let name = Name::from_raw(i as u32);
            storage.map.insert(text, name);
            storage.names.push(text);
        }
        SymbolTable {
            storage: RwLock::new(storage),
        }
    }

    /// Try to intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: already interned
        if let Some(&name) = self.storage.read().map.get(s) {
            return Ok(name);
        }

        let mut guard = self.storage.write();
        // Double-check after acquiring write lock
        if let Some(&name) = guard.map.get(s) {
            return Ok(name);
        }

        let raw = u32::try_from(guard.names.len()).map_err(|_| InternError::Overflow {
            count: guard.names.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::from_raw(raw);
        guard.names.push(leaked);
        guard.map.insert(leaked, name);
        Ok(name)
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if the table exceeds `u32` capacity. Use `try_intern` for
    /// fallible interning.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the text for a `Name`.
    ///
    /// Names from another table resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.storage
            .read()
            .names
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Intern `text` as a plain symbol.
    pub fn symbol(&self, text: &str) -> Symbol {
        let id = self.intern(text);
        Symbol {
            name: self.lookup(id),
            id,
            dotted: false,
        }
    }

    /// Intern `text` as a dotted-path symbol (`.a.b`).
    pub fn dotted_symbol(&self, text: &str) -> Symbol {
        let id = self.intern(text);
        Symbol {
            name: self.lookup(id),
            id,
            dotted: true,
        }
    }

    /// Number of interned names, reserved names included.
    pub fn len(&self) -> usize {
        self.storage.read().names.len()
    }

    /// Whether only the reserved names are present.
    pub fn is_empty(&self) -> bool {
        self.len() <= Name::RESERVED.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to one session's symbol table.
#[derive(Clone, Default)]
pub struct SharedSymbolTable(Arc<SymbolTable>);

impl SharedSymbolTable {
    pub fn new() -> Self {
        SharedSymbolTable(Arc::new(SymbolTable::new()))
    }
}

impl std::ops::Deref for SharedSymbolTable {
    type Target = SymbolTable;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// An interned symbol.
///
/// Equality and hashing use the id only; the display text rides along so
/// values can render without access to the table.
#[derive(Copy, Clone)]
pub struct Symbol {
    name: &'static str,
    id: Name,
    dotted: bool,
}

impl Symbol {
    /// Symbol for one of the reserved record keys.
    pub const fn reserved(id: Name) -> Self {
        Symbol {
            name: Name::RESERVED[id.index()],
            id,
            dotted: true,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn id(&self) -> Name {
        self.id
    }

    /// Whether this symbol came from a dotted-path token.
    #[inline]
    pub fn is_dotted(&self) -> bool {
        self.dotted
    }

    /// The `.`-separated segments of a dotted symbol (`.a.b` -> `["a", "b"]`).
    pub fn path_segments(&self) -> Vec<&'static str> {
        if !self.dotted {
            return vec![self.name];
        }
        self.name.split('.').filter(|s| !s.is_empty()).collect()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}#{})", self.name, self.id.raw())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
