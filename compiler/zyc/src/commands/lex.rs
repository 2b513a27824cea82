//! `zyc lex`: tokenize a file or `-c` text.

use std::io::Write;

use crate::config::Source;

use super::printer::{DriverError, TokenPrinter};
use super::read_file;

/// Tokenize `source` and print the tokens to stdout.
///
/// Returns the number of lex errors recovered from.
pub fn lex_source(source: &Source, exit_on_fail: bool) -> Result<usize, DriverError> {
    let text = match source {
        Source::File(path) => read_file(path),
        Source::Text(text) => text.clone(),
    };
    let stdout = std::io::stdout();
    lex_text(&text, stdout.lock(), exit_on_fail).map(|(_, errors)| errors)
}

/// Tokenize `text` line by line into `out`.
pub fn lex_text<W: Write>(text: &str, out: W, exit_on_fail: bool) -> Result<(W, usize), DriverError> {
    let mut printer = TokenPrinter::new(out, exit_on_fail);
    for line in text.split_inclusive('\n') {
        printer.feed(line)?;
    }
    printer.finish()?;
    let errors = printer.errors().len();
    Ok((printer.into_inner(), errors))
}
