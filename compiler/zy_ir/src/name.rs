//! Interned identifier ids.

use std::fmt;

/// Interned symbol id.
///
/// Ids are dense indices into the owning `SymbolTable`. Two ids from the
/// same table are equal iff they were interned from the same text.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Reserved record key for the defining environment.
    pub const PARENT: Name = Name(1);

    /// Reserved record key for the record's main callable.
    pub const MAIN: Name = Name(2);

    /// Reserved record key for the delegation ("super") record.
    pub const SUPER: Name = Name(3);

    /// Texts interned at fixed ids by every fresh table, in id order.
    pub(crate) const RESERVED: [&'static str; 4] = ["", ".parent", ".main", ".super"];

    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the table's storage.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this id is one of the fixed reserved names.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::RESERVED.len() as u32
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}
