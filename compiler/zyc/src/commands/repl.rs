//! `zyc repl`: line-oriented tokenizer loop.

use std::io::{self, BufRead, Write};

use super::printer::{DriverError, TokenPrinter};

pub const PROMPT: &str = "zygo> ";
pub const CONTINUATION_PROMPT: &str = "...   ";

/// Read lines from `input` until EOF, printing tokens as they complete.
///
/// A line that leaves a literal or atom open gets the continuation prompt;
/// the next line resumes it. Prompts are written to `out` unless `quiet`.
pub fn run_repl<R: BufRead, W: Write>(
    input: R,
    out: W,
    quiet: bool,
    exit_on_fail: bool,
) -> Result<W, DriverError> {
    let mut printer = TokenPrinter::new(out, exit_on_fail);
    let mut lines = input.lines();

    loop {
        if !quiet {
            let prompt = if printer.is_idle() {
                PROMPT
            } else {
                CONTINUATION_PROMPT
            };
            prompt_to(&mut printer, prompt)?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let mut line = line?;
        line.push('\n');
        printer.feed(&line)?;
    }

    printer.finish()?;
    Ok(printer.into_inner())
}

fn prompt_to<W: Write>(printer: &mut TokenPrinter<W>, prompt: &str) -> io::Result<()> {
    let out = printer.writer();
    out.write_all(prompt.as_bytes())?;
    out.flush()
}
