//! Streaming tokenizer for zygo.
//!
//! The lexer is a hand-written finite-state machine fed one character at a
//! time from a queue of character streams. A stream that runs dry in the
//! middle of an atom does not end the atom: the next queued stream picks up
//! where it left off, so REPL input arriving line by line lexes exactly as
//! if it had been concatenated.
//!
//! # Architecture
//!
//! ```text
//! CharStream ─┐
//! CharStream ─┼─► Lexer (LexState machine + pending buffer) ─► Token queue
//! CharStream ─┘                    │
//!                                  └─► decode_atom (ordered literal patterns)
//! ```
//!
//! The parser pulls tokens with `peek_token` / `next_token`; the lexer only
//! reads as many characters as it needs to produce the next token.

mod atom;
mod escape;
mod lex_error;
mod lexer;
mod stream;
mod token;

pub use atom::decode_atom;
pub use escape::{escape_char_literal, escape_str_literal, unescape};
pub use lex_error::{LexError, LexErrorKind};
pub use lexer::{LexState, Lexer};
pub use stream::CharStream;
pub use token::{Token, TokenKind};

/// Tokenize a complete source text.
///
/// The trailing atom is flushed at end of input, so `lex("foo")` yields
/// the symbol `foo`. The returned list never contains the `End` token.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new();
    lexer.add_stream(source);

    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token()?;
        if tok.is_end() {
            break;
        }
        tokens.push(tok);
    }

    lexer.finish()?;
    loop {
        let tok = lexer.next_token()?;
        if tok.is_end() {
            break;
        }
        tokens.push(tok);
    }
    Ok(tokens)
}
