//! Zygo IR - shared identifier types.
//!
//! Every symbol the tokenizer hands to the runtime is interned once per
//! session: `Name(u32)` ids make symbol comparison O(1), and the display
//! text is leaked to `'static` so a `Symbol` can render itself without a
//! back-reference to the table that produced it.

mod interner;
mod name;

pub use interner::{InternError, SharedSymbolTable, Symbol, SymbolTable};
pub use name::Name;
