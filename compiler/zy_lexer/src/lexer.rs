//! The tokenizer state machine.
//!
//! Exactly one `LexState` is active. Each character read from the active
//! stream drives one transition; some transitions hand the same character
//! back to `Normal` for reprocessing (the one-character lookahead after `:`
//! and `~`). Produced tokens queue up until the parser pulls them.

use std::collections::VecDeque;

use crate::atom::decode_atom;
use crate::escape::unescape;
use crate::lex_error::LexError;
use crate::stream::CharStream;
use crate::token::{Token, TokenKind};

/// Lexer automaton state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum LexState {
    #[default]
    Normal,
    /// After `;`, until end of line.
    Comment,
    /// Inside `"..."`.
    StringLiteral,
    /// After `\` inside a string.
    StringEscaped,
    /// After `~`, deciding between `~` and `~@`.
    Unquote,
    /// Inside `` `...` ``.
    RawString,
    /// After `:`, deciding between `:` and `:=`.
    ColonOrFreshAssign,
}

/// Streaming tokenizer over a queue of character streams.
#[derive(Debug)]
pub struct Lexer {
    state: LexState,
    /// Produced but not yet consumed tokens.
    tokens: VecDeque<Token>,
    /// Pending atom or literal text.
    buffer: String,
    stream: Option<CharStream>,
    next: VecDeque<CharStream>,
    line: u32,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer {
            state: LexState::Normal,
            tokens: VecDeque::with_capacity(10),
            buffer: String::new(),
            stream: None,
            next: VecDeque::new(),
            line: 1,
        }
    }

    /// Current 1-based line number, for diagnostics.
    pub fn current_line(&self) -> u32 {
        self.line
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    /// Whether no partial token is pending: the automaton is in `Normal`
    /// with an empty buffer. A REPL uses this to decide between a fresh
    /// prompt and a continuation prompt.
    pub fn is_idle(&self) -> bool {
        self.state == LexState::Normal && self.buffer.is_empty()
    }

    /// Drop all input, queued tokens and partial state.
    pub fn reset(&mut self) {
        self.stream = None;
        self.next.clear();
        self.tokens.clear();
        self.state = LexState::Normal;
        self.line = 1;
        self.buffer.clear();
    }

    /// Queue a character source.
    ///
    /// With no active stream, or an active stream that has been fully read,
    /// the new source is promoted immediately. Otherwise it waits until the
    /// active stream runs dry.
    pub fn add_stream(&mut self, stream: impl Into<CharStream>) {
        self.next.push_back(stream.into());

        let active_has_input = self
            .stream
            .as_mut()
            .is_some_and(CharStream::has_remaining);
        if !active_has_input {
            self.promote_next_stream();
        }
    }

    fn promote_next_stream(&mut self) -> bool {
        match self.next.pop_front() {
            Some(stream) => {
                tracing::trace!(queued = self.next.len(), "promoting next stream");
                self.stream = Some(stream);
                true
            }
            None => false,
        }
    }

    /// Return the next token without consuming it.
    ///
    /// Returns `Token::END` once every queued stream is exhausted. A pending
    /// atom is not flushed at that point; it continues with the next stream
    /// added (see `finish` for true end of input).
    pub fn peek_token(&mut self) -> Result<Token, LexError> {
        loop {
            if let Some(tok) = self.tokens.front() {
                return Ok(tok.clone());
            }

            let next = self.stream.as_mut().and_then(CharStream::next_char);
            match next {
                Some(ch) => {
                    if let Err(err) = self.lex_char(ch) {
                        tracing::debug!(line = err.line, error = %err.kind, "lex error");
                        return Err(err);
                    }
                }
                None => {
                    if !self.promote_next_stream() {
                        return Ok(Token::END);
                    }
                }
            }
        }
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let tok = self.peek_token()?;
        if !tok.is_end() {
            self.tokens.pop_front();
        }
        Ok(tok)
    }

    /// Declare that no further input will arrive.
    ///
    /// Flushes a trailing atom and resolves pending one-character decisions.
    /// Fails if input ended inside a string literal. Call once `peek_token`
    /// has returned `End`; tokens produced here are then available through
    /// `next_token`.
    pub fn finish(&mut self) -> Result<(), LexError> {
        match self.state {
            LexState::Normal => self.flush_atom(),
            LexState::Comment => {
                self.state = LexState::Normal;
                Ok(())
            }
            LexState::Unquote => {
                self.state = LexState::Normal;
                self.emit(TokenKind::Tilde);
                Ok(())
            }
            LexState::ColonOrFreshAssign => {
                self.state = LexState::Normal;
                self.flush_atom()?;
                self.emit(TokenKind::ColonOperator);
                Ok(())
            }
            LexState::StringLiteral | LexState::StringEscaped => {
                Err(LexError::unterminated_string(self.line))
            }
            LexState::RawString => Err(LexError::unterminated_raw_string(self.line)),
        }
    }

    /// The line advances after the newline is processed, so an atom ended
    /// by a newline reports the line it was written on.
    fn lex_char(&mut self, ch: char) -> Result<(), LexError> {
        self.step(ch)?;
        if ch == '\n' {
            self.line += 1;
        }
        Ok(())
    }

    fn step(&mut self, ch: char) -> Result<(), LexError> {
        match self.state {
            LexState::Comment => {
                if ch == '\n' {
                    self.state = LexState::Normal;
                }
                Ok(())
            }

            LexState::RawString => {
                if ch == '`' {
                    self.emit_buffer(TokenKind::RawString);
                    self.state = LexState::Normal;
                } else {
                    self.buffer.push(ch);
                }
                Ok(())
            }

            LexState::StringLiteral => {
                match ch {
                    '\\' => self.state = LexState::StringEscaped,
                    '"' => {
                        self.emit_buffer(TokenKind::String);
                        self.state = LexState::Normal;
                    }
                    _ => self.buffer.push(ch),
                }
                Ok(())
            }

            LexState::StringEscaped => {
                let decoded = unescape(ch).ok_or_else(|| LexError::invalid_escape(ch, self.line))?;
                self.buffer.push(decoded);
                self.state = LexState::StringLiteral;
                Ok(())
            }

            LexState::Unquote => {
                self.state = LexState::Normal;
                if ch == '@' {
                    self.emit(TokenKind::TildeAt);
                    Ok(())
                } else {
                    self.emit(TokenKind::Tilde);
                    self.step(ch)
                }
            }

            // `:` ends a keyword (`key: value`) unless it starts `:=`.
            LexState::ColonOrFreshAssign => {
                self.state = LexState::Normal;
                self.flush_atom()?;
                if ch == '=' {
                    self.tokens.push_back(Token::new(TokenKind::FreshAssign, ":="));
                    Ok(())
                } else {
                    self.emit(TokenKind::ColonOperator);
                    self.step(ch)
                }
            }

            LexState::Normal => self.step_normal(ch),
        }
    }

    fn step_normal(&mut self, ch: char) -> Result<(), LexError> {
        match ch {
            '`' => {
                if !self.buffer.is_empty() {
                    return Err(LexError::unexpected_backtick(self.line));
                }
                self.state = LexState::RawString;
            }
            '"' => {
                if !self.buffer.is_empty() {
                    return Err(LexError::unexpected_quote(self.line));
                }
                self.state = LexState::StringLiteral;
            }
            ';' => {
                self.flush_atom()?;
                self.state = LexState::Comment;
            }
            ':' => self.state = LexState::ColonOrFreshAssign,
            // `$` is always a token on its own, with implicit whitespace around it.
            '$' => {
                self.flush_atom()?;
                self.tokens.push_back(Token::new(TokenKind::Dollar, "$"));
            }
            '\'' => {
                if !self.buffer.is_empty() {
                    return Err(LexError::unexpected_quote(self.line));
                }
                self.emit(TokenKind::Quote);
            }
            '^' => {
                if !self.buffer.is_empty() {
                    return Err(LexError::unexpected_caret(self.line));
                }
                self.emit(TokenKind::Caret);
            }
            '~' => {
                if !self.buffer.is_empty() {
                    return Err(LexError::unexpected_tilde(self.line));
                }
                self.state = LexState::Unquote;
            }
            '(' | ')' | '[' | ']' | '{' | '}' => {
                self.flush_atom()?;
                self.emit(bracket_kind(ch));
            }
            '\n' | ',' | ' ' | '\t' | '\r' => self.flush_atom()?,
            _ => self.buffer.push(ch),
        }
        Ok(())
    }

    #[inline]
    fn emit(&mut self, kind: TokenKind) {
        self.tokens.push_back(Token::bare(kind));
    }

    fn emit_buffer(&mut self, kind: TokenKind) {
        let text = std::mem::take(&mut self.buffer);
        self.tokens.push_back(Token::new(kind, text));
    }

    /// Decode and queue the pending atom, if any.
    fn flush_atom(&mut self) -> Result<(), LexError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let tok = decode_atom(&self.buffer, self.line)?;
        self.buffer.clear();
        self.tokens.push_back(tok);
        Ok(())
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

fn bracket_kind(ch: char) -> TokenKind {
    match ch {
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '[' => TokenKind::LSquare,
        ']' => TokenKind::RSquare,
        '{' => TokenKind::LCurly,
        _ => TokenKind::RCurly,
    }
}

#[cfg(test)]
mod tests;
