//! Token to value conversion for literal and symbol tokens.

use zy_ir::SymbolTable;
use zy_lexer::{Token, TokenKind};

use crate::errors::{invalid_literal, RuntimeError};
use crate::value::Value;

fn parse_radix(text: &str, radix: u32, kind: &'static str) -> Result<Value, RuntimeError> {
    i64::from_str_radix(text, radix)
        .map(Value::Int)
        .map_err(|_| invalid_literal(kind, text))
}

/// Decode a literal, symbol or dotted-symbol token.
///
/// Structural tokens (brackets, quote marks, operators, end) return
/// `Ok(None)`; the parser handles those. Integer literals that overflow
/// 64 bits are an `InvalidLiteral` error.
pub fn decode_literal(tok: &Token, symbols: &SymbolTable) -> Result<Option<Value>, RuntimeError> {
    let text = tok.text.as_str();
    let value = match tok.kind {
        TokenKind::Bool => Value::Bool(text == "true"),
        TokenKind::Decimal => parse_radix(text, 10, "decimal")?,
        TokenKind::Hex => parse_radix(text, 16, "hex")?,
        TokenKind::Oct => parse_radix(text, 8, "octal")?,
        TokenKind::Binary => parse_radix(text, 2, "binary")?,
        TokenKind::Float => Value::Float(
            text.parse::<f64>()
                .map_err(|_| invalid_literal("float", text))?,
        ),
        TokenKind::Char => match text.chars().next() {
            Some(c) => Value::Char(c),
            None => return Err(invalid_literal("char", text)),
        },
        TokenKind::String => Value::string(text),
        TokenKind::RawString => Value::raw_string(text),
        TokenKind::Symbol => Value::Symbol(symbols.symbol(text)),
        TokenKind::DotSymbol => Value::Symbol(symbols.dotted_symbol(text)),
        TokenKind::LParen
        | TokenKind::RParen
        | TokenKind::LSquare
        | TokenKind::RSquare
        | TokenKind::LCurly
        | TokenKind::RCurly
        | TokenKind::Dot
        | TokenKind::Quote
        | TokenKind::Backtick
        | TokenKind::Tilde
        | TokenKind::TildeAt
        | TokenKind::Caret
        | TokenKind::Backslash
        | TokenKind::Dollar
        | TokenKind::ColonOperator
        | TokenKind::FreshAssign
        | TokenKind::End => return Ok(None),
    };
    Ok(Some(value))
}
