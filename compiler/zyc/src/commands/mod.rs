//! Command handlers for the `zyc` CLI.
//!
//! `lex` and `repl` both drive a `TokenPrinter`: input is fed line by line
//! so a lex error can be recovered from by resetting the tokenizer and
//! carrying on with the next line.

mod lex;
mod printer;
mod repl;

pub use lex::{lex_source, lex_text};
pub use printer::{DriverError, TokenPrinter};
pub use repl::{run_repl, PROMPT, CONTINUATION_PROMPT};

use std::path::Path;

/// Read a source file, exiting with a message on failure.
pub(crate) fn read_file(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: cannot read '{}': {e}", path.display());
            std::process::exit(1);
        }
    }
}
