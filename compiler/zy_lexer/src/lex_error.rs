//! Lexer error types.
//!
//! Every lex error is fatal to the current tokenization call. The lexer
//! never resynchronises on its own; the caller decides whether to abort or
//! `reset()` and continue with fresh input.

use std::fmt;

/// A lexer error: what went wrong and the line it was detected on.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// WHAT went wrong.
    pub kind: LexErrorKind,
    /// WHERE: 1-based line number at the point of detection.
    pub line: u32,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Backslash inside a string followed by a character outside the escape table.
    InvalidEscape { escape_char: char },
    /// `` ` `` directly after a pending atom.
    UnexpectedBacktick,
    /// `"` or `'` directly after a pending atom.
    UnexpectedQuote,
    /// `^` directly after a pending atom.
    UnexpectedCaret,
    /// `~` directly after a pending atom.
    UnexpectedTilde,
    /// Buffered text matched no literal pattern.
    UnrecognizedAtom { text: String },
    /// Input ended inside a `"` string.
    UnterminatedString,
    /// Input ended inside a `` ` `` raw string.
    UnterminatedRawString,
}

impl LexError {
    #[cold]
    pub fn invalid_escape(escape_char: char, line: u32) -> Self {
        LexError {
            kind: LexErrorKind::InvalidEscape { escape_char },
            line,
        }
    }

    #[cold]
    pub fn unexpected_backtick(line: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnexpectedBacktick,
            line,
        }
    }

    #[cold]
    pub fn unexpected_quote(line: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnexpectedQuote,
            line,
        }
    }

    #[cold]
    pub fn unexpected_caret(line: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnexpectedCaret,
            line,
        }
    }

    #[cold]
    pub fn unexpected_tilde(line: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnexpectedTilde,
            line,
        }
    }

    #[cold]
    pub fn unrecognized_atom(text: impl Into<String>, line: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnrecognizedAtom { text: text.into() },
            line,
        }
    }

    #[cold]
    pub fn unterminated_string(line: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedString,
            line,
        }
    }

    #[cold]
    pub fn unterminated_raw_string(line: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedRawString,
            line,
        }
    }

    /// HOW to fix, when there is an obvious answer.
    pub fn hint(&self) -> Option<&'static str> {
        match self.kind {
            LexErrorKind::InvalidEscape { .. } => {
                Some(r#"valid escapes are: \n, \r, \a, \t, \\, \", \', \#"#)
            }
            LexErrorKind::UnexpectedBacktick
            | LexErrorKind::UnexpectedQuote
            | LexErrorKind::UnexpectedCaret
            | LexErrorKind::UnexpectedTilde => {
                Some("separate the preceding word from this character with whitespace")
            }
            LexErrorKind::UnterminatedString => Some("add closing `\"`"),
            LexErrorKind::UnterminatedRawString => Some("add closing `` ` ``"),
            LexErrorKind::UnrecognizedAtom { .. } => None,
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::InvalidEscape { escape_char } => {
                write!(f, "invalid escape sequence `\\{escape_char}`")
            }
            LexErrorKind::UnexpectedBacktick => write!(f, "unexpected backtick"),
            LexErrorKind::UnexpectedQuote => write!(f, "unexpected quote"),
            LexErrorKind::UnexpectedCaret => write!(f, "unexpected ^ caret"),
            LexErrorKind::UnexpectedTilde => write!(f, "unexpected tilde"),
            LexErrorKind::UnrecognizedAtom { text } => write!(f, "unrecognized atom: '{text}'"),
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::UnterminatedRawString => write!(f, "unterminated raw string literal"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for LexError {}
