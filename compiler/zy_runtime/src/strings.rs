//! String helpers.
//!
//! Strings are immutable; every helper returns a new string value.

use crate::errors::{type_mismatch, EvalResult, RuntimeError};
use crate::value::Value;

fn expect_str<'a>(value: &'a Value, context: &str) -> Result<&'a str, RuntimeError> {
    value
        .as_str()
        .ok_or_else(|| type_mismatch(context, "string", value))
}

/// `first` followed by every string in `rest`.
///
/// A non-string in `rest` fails naming its 0-based position.
pub fn concat_str(first: &Value, rest: &[Value]) -> EvalResult {
    let mut out = expect_str(first, "concat: first argument")?.to_string();
    for (i, item) in rest.iter().enumerate() {
        let text = item.as_str().ok_or_else(|| {
            type_mismatch(
                format!("concat: argument {i} (0-based) of the rest"),
                "string",
                item,
            )
        })?;
        out.push_str(text);
    }
    Ok(Value::string(&out))
}

/// `s` with the character `ch` appended.
pub fn append_char(s: &Value, ch: &Value) -> EvalResult {
    let mut out = expect_str(s, "append: first argument")?.to_string();
    match ch {
        Value::Char(c) => out.push(*c),
        other => return Err(type_mismatch("append: second argument", "char", other)),
    }
    Ok(Value::string(&out))
}

/// `s` without one trailing newline.
pub fn chomp(s: &Value) -> EvalResult {
    let text = expect_str(s, "chomp")?;
    Ok(Value::string(text.strip_suffix('\n').unwrap_or(text)))
}

/// `s` without surrounding whitespace.
pub fn trim(s: &Value) -> EvalResult {
    Ok(Value::string(expect_str(s, "trim")?.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn concat_joins_and_leaves_inputs_alone() {
        let a = Value::string("ab");
        let out = concat_str(&a, &[Value::string("c"), Value::raw_string("d")]).unwrap();
        assert_eq!(out.as_str(), Some("abcd"));
        assert_eq!(a.as_str(), Some("ab"));
    }

    #[test]
    fn concat_names_offending_position() {
        let err = concat_str(
            &Value::string("a"),
            &[Value::string("b"), Value::Int(1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            RuntimeError::TypeMismatch {
                context: "concat: argument 1 (0-based) of the rest".to_string(),
                expected: "string",
                got: "int64",
            }
        );
    }

    #[test]
    fn append_requires_char() {
        assert_eq!(
            append_char(&Value::string("ab"), &Value::Char('c')).unwrap(),
            Value::string("abc")
        );
        assert!(append_char(&Value::string("ab"), &Value::string("c")).is_err());
    }

    #[test]
    fn chomp_drops_a_single_newline() {
        assert_eq!(chomp(&Value::string("line\n\n")).unwrap(), Value::string("line\n"));
        assert_eq!(chomp(&Value::string("line")).unwrap(), Value::string("line"));
        assert_eq!(chomp(&Value::string("")).unwrap(), Value::string(""));
    }

    #[test]
    fn trim_strips_whitespace() {
        assert_eq!(trim(&Value::string(" \t x y \n")).unwrap(), Value::string("x y"));
        assert!(trim(&Value::Int(0)).is_err());
    }
}
