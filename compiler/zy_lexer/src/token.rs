//! Token types produced by the lexer.

use std::fmt;

use crate::escape::{escape_char_literal, escape_str_literal};

/// Token kind.
///
/// Closed set: the parser switches over every variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LSquare,
    /// `]`
    RSquare,
    /// `{`
    LCurly,
    /// `}`
    RCurly,
    /// Bare `.` (the text carries the dot itself).
    Dot,
    /// `'`
    Quote,
    /// `` ` `` used as a template opener by the parser.
    Backtick,
    /// `~` (unquote).
    Tilde,
    /// `~@` (splice-unquote).
    TildeAt,
    /// `^` (macro template).
    Caret,
    /// `\` standing alone (improper-list separator).
    Backslash,
    /// `$`, always standalone.
    Dollar,
    /// `:` terminating a keyword or standing alone.
    ColonOperator,
    /// `:=` fresh assignment.
    FreshAssign,
    /// Plain symbol.
    Symbol,
    /// Dotted path symbol (`.a.b`).
    DotSymbol,
    /// `true` / `false`.
    Bool,
    /// Decimal integer, text includes an optional leading `-`.
    Decimal,
    /// Hex integer, text holds the digits after `0x`.
    Hex,
    /// Octal integer, text holds the digits after `0o`.
    Oct,
    /// Binary integer, text holds the digits after `0b`.
    Binary,
    /// Floating-point literal.
    Float,
    /// Character literal, text holds the decoded character.
    Char,
    /// `"..."` string, text holds the unescaped content.
    String,
    /// `` `...` `` raw string, text is verbatim.
    RawString,
    /// End of all queued input.
    End,
}

impl TokenKind {
    /// Short name used by tooling output.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::LSquare => "lsquare",
            TokenKind::RSquare => "rsquare",
            TokenKind::LCurly => "lcurly",
            TokenKind::RCurly => "rcurly",
            TokenKind::Dot => "dot",
            TokenKind::Quote => "quote",
            TokenKind::Backtick => "backtick",
            TokenKind::Tilde => "tilde",
            TokenKind::TildeAt => "tilde-at",
            TokenKind::Caret => "caret",
            TokenKind::Backslash => "backslash",
            TokenKind::Dollar => "dollar",
            TokenKind::ColonOperator => "colon",
            TokenKind::FreshAssign => "fresh-assign",
            TokenKind::Symbol => "symbol",
            TokenKind::DotSymbol => "dot-symbol",
            TokenKind::Bool => "bool",
            TokenKind::Decimal => "decimal",
            TokenKind::Hex => "hex",
            TokenKind::Oct => "oct",
            TokenKind::Binary => "binary",
            TokenKind::Float => "float",
            TokenKind::Char => "char",
            TokenKind::String => "string",
            TokenKind::RawString => "raw-string",
            TokenKind::End => "end",
        }
    }

    /// Whether tokens of this kind denote a self-evaluating literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Bool
                | TokenKind::Decimal
                | TokenKind::Hex
                | TokenKind::Oct
                | TokenKind::Binary
                | TokenKind::Float
                | TokenKind::Char
                | TokenKind::String
                | TokenKind::RawString
        )
    }
}

/// A lexed token: kind plus payload text.
///
/// Structural tokens carry empty text; literal tokens carry their decoded
/// payload (see the per-kind notes on `TokenKind`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// The end-of-input token.
    pub const END: Token = Token {
        kind: TokenKind::End,
        text: String::new(),
    };

    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    /// A token whose kind fully determines it.
    pub fn bare(kind: TokenKind) -> Self {
        Token {
            kind,
            text: String::new(),
        }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}

/// Canonical source rendering; re-lexing it yields an equal token.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LSquare => f.write_str("["),
            TokenKind::RSquare => f.write_str("]"),
            TokenKind::LCurly => f.write_str("{"),
            TokenKind::RCurly => f.write_str("}"),
            TokenKind::Quote => f.write_str("'"),
            TokenKind::Backtick => f.write_str("`"),
            TokenKind::Caret => f.write_str("^"),
            TokenKind::Tilde => f.write_str("~"),
            TokenKind::TildeAt => f.write_str("~@"),
            TokenKind::Backslash => f.write_str("\\"),
            TokenKind::Dollar => f.write_str("$"),
            TokenKind::ColonOperator => f.write_str(":"),
            TokenKind::FreshAssign => f.write_str(":="),
            TokenKind::Hex => write!(f, "0x{}", self.text),
            TokenKind::Oct => write!(f, "0o{}", self.text),
            TokenKind::Binary => write!(f, "0b{}", self.text),
            TokenKind::Char => {
                let c = self.text.chars().next().unwrap_or('\0');
                write!(f, "#{}", escape_char_literal(c))
            }
            TokenKind::String => write!(f, "\"{}\"", escape_str_literal(&self.text)),
            TokenKind::RawString => write!(f, "`{}`", self.text),
            TokenKind::Dot
            | TokenKind::Symbol
            | TokenKind::DotSymbol
            | TokenKind::Bool
            | TokenKind::Decimal
            | TokenKind::Float
            | TokenKind::End => f.write_str(&self.text),
        }
    }
}
