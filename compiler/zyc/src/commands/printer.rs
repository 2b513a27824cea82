//! Token printing driver shared by `lex` and `repl`.

use std::io::{self, Write};

use zy_lexer::{LexError, Lexer, Token};
use zy_runtime::{decode_literal, RuntimeError, SymbolTable};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Feeds input to a `Lexer` and writes one line per completed token.
///
/// Literal tokens are followed by the value they decode to. Lex errors are
/// fatal with `exit_on_fail`; otherwise they are reported on stderr, the
/// tokenizer is reset and the next fed chunk starts clean.
pub struct TokenPrinter<W: Write> {
    lexer: Lexer,
    symbols: SymbolTable,
    out: W,
    exit_on_fail: bool,
    /// Lines fed before the current tokenizer epoch, so reported line
    /// numbers stay absolute across resets.
    line_base: u32,
    lines_fed: u32,
    errors: Vec<LexError>,
}

impl<W: Write> TokenPrinter<W> {
    pub fn new(out: W, exit_on_fail: bool) -> Self {
        TokenPrinter {
            lexer: Lexer::new(),
            symbols: SymbolTable::new(),
            out,
            exit_on_fail,
            line_base: 0,
            lines_fed: 0,
            errors: Vec::new(),
        }
    }

    /// Whether the tokenizer sits between tokens.
    pub fn is_idle(&self) -> bool {
        self.lexer.is_idle()
    }

    /// Errors recovered from so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Queue `chunk` and print every token it completes.
    pub fn feed(&mut self, chunk: &str) -> Result<(), DriverError> {
        self.lexer.add_stream(chunk);
        let drained = self.drain();
        let newlines = u32::try_from(chunk.matches('\n').count()).unwrap_or(u32::MAX);
        self.lines_fed = self.lines_fed.saturating_add(newlines);
        self.recover(drained)
    }

    /// Declare end of input and print whatever that completes.
    pub fn finish(&mut self) -> Result<(), DriverError> {
        let result = match self.lexer.finish() {
            Ok(()) => self.drain(),
            Err(err) => Err(err.into()),
        };
        self.recover(result)
    }

    fn drain(&mut self) -> Result<(), DriverError> {
        loop {
            let tok = self.lexer.next_token()?;
            if tok.is_end() {
                return Ok(());
            }
            let line = self.render(&tok);
            writeln!(self.out, "{line}")?;
        }
    }

    fn recover(&mut self, result: Result<(), DriverError>) -> Result<(), DriverError> {
        match result {
            Err(DriverError::Lex(err)) => {
                let err = LexError {
                    line: self.line_base + err.line,
                    ..err
                };
                if self.exit_on_fail {
                    return Err(err.into());
                }
                eprintln!("error: {err}");
                if let Some(hint) = err.hint() {
                    eprintln!("  hint: {hint}");
                }
                tracing::debug!(
                    line = err.line,
                    state = ?self.lexer.state(),
                    "tokenizer reset after error"
                );
                self.errors.push(err);
                self.lexer.reset();
                self.line_base = self.lines_fed;
                Ok(())
            }
            other => other,
        }
    }

    fn render(&self, tok: &Token) -> String {
        let head = format!("{:<12} {tok}", tok.kind.name());
        if !tok.kind.is_literal() {
            return head;
        }
        match decode_literal(tok, &self.symbols) {
            Ok(Some(value)) => format!("{head}  => {value:?}"),
            Ok(None) => head,
            Err(RuntimeError::InvalidLiteral { kind, .. }) => format!("{head}  => invalid {kind}"),
            Err(other) => format!("{head}  => {other}"),
        }
    }
}

#[cfg(test)]
mod tests;
