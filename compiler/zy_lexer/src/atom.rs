//! Atom classification.
//!
//! A flushed buffer is matched against an ordered list of literal patterns;
//! the first pattern that accepts the whole text wins. Reserved characters
//! never appear in plain symbols, so classification is a single scan of the
//! atom with no backtracking.

use crate::escape::unescape;
use crate::lex_error::LexError;
use crate::token::{Token, TokenKind};

/// Characters that may never appear inside a symbol.
const RESERVED: &[char] = &[
    '\'', '#', ':', ';', '\\', '~', '@', '[', ']', '{', '}', '^', '|', '"', '(', ')', '%', ',',
];

#[inline]
fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && !RESERVED.contains(&c)
}

#[inline]
fn is_symbol_start(c: char) -> bool {
    is_symbol_char(c) && !c.is_ascii_digit()
}

fn is_bool(atom: &str) -> bool {
    atom == "true" || atom == "false"
}

fn all_nonempty(digits: &str, pred: impl Fn(char) -> bool) -> bool {
    !digits.is_empty() && digits.chars().all(pred)
}

fn is_decimal(atom: &str) -> bool {
    let digits = atom.strip_prefix('-').unwrap_or(atom);
    all_nonempty(digits, |c| c.is_ascii_digit())
}

fn radix_digits<'a>(atom: &'a str, prefix: &str, pred: impl Fn(char) -> bool) -> Option<&'a str> {
    atom.strip_prefix(prefix)
        .filter(|digits| all_nonempty(digits, pred))
}

/// `-?` mantissa exponent?, where the mantissa is `d+.d*` or `.d+` or `d+`,
/// and at least one of a decimal point or an exponent is present.
fn is_float(atom: &str) -> bool {
    let body = atom.strip_prefix('-').unwrap_or(atom);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            int.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
                && (!int.is_empty() || !frac.is_empty())
        }
        None => exponent.is_some() && all_nonempty(mantissa, |c| c.is_ascii_digit()),
    };
    if !mantissa_ok {
        return false;
    }

    match exponent {
        None => mantissa.contains('.'),
        Some(exp) => {
            let digits = exp
                .strip_prefix('-')
                .or_else(|| exp.strip_prefix('+'))
                .unwrap_or(exp);
            all_nonempty(digits, |c| c.is_ascii_digit())
        }
    }
}

/// `.` alone, or one or more `.name` segments where each name starts with
/// a non-digit symbol character and contains no further dots.
fn is_dot_symbol(atom: &str) -> bool {
    if atom == "." {
        return true;
    }
    let Some(rest) = atom.strip_prefix('.') else {
        return false;
    };
    rest.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) => is_symbol_start(first) && chars.all(is_symbol_char),
            None => false,
        }
    })
}

fn is_plain_symbol(atom: &str) -> bool {
    let mut chars = atom.chars();
    match chars.next() {
        Some(first) => is_symbol_start(first) && chars.all(is_symbol_char),
        None => false,
    }
}

/// Decode `#c` or `#\c` into its character.
///
/// Returns `Ok(None)` when the text is not shaped like a character literal.
fn char_literal(atom: &str, line: u32) -> Result<Option<char>, LexError> {
    let Some(body) = atom.strip_prefix('#') else {
        return Ok(None);
    };
    let chars: Vec<char> = body.chars().collect();
    match chars.as_slice() {
        [c] => Ok(Some(*c)),
        ['\\', esc] => unescape(*esc)
            .map(Some)
            .ok_or_else(|| LexError::invalid_escape(*esc, line)),
        _ => Ok(None),
    }
}

/// Classify buffered atom text into a token.
///
/// Pattern order (first match wins): `$`, `\`, boolean, decimal, hex,
/// octal, binary, float, dotted symbol, plain symbol, character.
pub fn decode_atom(atom: &str, line: u32) -> Result<Token, LexError> {
    if atom == "$" {
        return Ok(Token::new(TokenKind::Dollar, "$"));
    }
    if atom == "\\" {
        return Ok(Token::bare(TokenKind::Backslash));
    }
    if is_bool(atom) {
        return Ok(Token::new(TokenKind::Bool, atom));
    }
    if is_decimal(atom) {
        return Ok(Token::new(TokenKind::Decimal, atom));
    }
    if let Some(digits) = radix_digits(atom, "0x", |c| c.is_ascii_hexdigit()) {
        return Ok(Token::new(TokenKind::Hex, digits));
    }
    if let Some(digits) = radix_digits(atom, "0o", |c| ('0'..='7').contains(&c)) {
        return Ok(Token::new(TokenKind::Oct, digits));
    }
    if let Some(digits) = radix_digits(atom, "0b", |c| c == '0' || c == '1') {
        return Ok(Token::new(TokenKind::Binary, digits));
    }
    if is_float(atom) {
        return Ok(Token::new(TokenKind::Float, atom));
    }
    if is_dot_symbol(atom) {
        return Ok(Token::new(TokenKind::DotSymbol, atom));
    }
    if is_plain_symbol(atom) {
        return Ok(Token::new(TokenKind::Symbol, atom));
    }
    if let Some(c) = char_literal(atom, line)? {
        return Ok(Token::new(TokenKind::Char, c.to_string()));
    }
    Err(LexError::unrecognized_atom(atom, line))
}
