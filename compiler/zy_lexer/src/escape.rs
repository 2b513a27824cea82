//! Escape decoding and canonical re-escaping.
//!
//! String and character literals share one escape table:
//! `\n` `\r` `\a` `\t` `\\` `\"` `\'` `\#`.

use std::borrow::Cow;

/// Decode the character following a backslash.
///
/// Returns `None` for characters outside the escape table.
#[inline]
pub fn unescape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        'a' => Some('\u{7}'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '#' => Some('#'),
        _ => None,
    }
}

/// Escape form of a control character, if it has one.
#[inline]
fn control_escape(c: char) -> Option<&'static str> {
    match c {
        '\n' => Some("\\n"),
        '\r' => Some("\\r"),
        '\u{7}' => Some("\\a"),
        '\t' => Some("\\t"),
        '\\' => Some("\\\\"),
        _ => None,
    }
}

/// Render the body of a character literal (everything after `#`).
pub fn escape_char_literal(c: char) -> Cow<'static, str> {
    match c {
        '"' => Cow::Borrowed("\\\""),
        _ => match control_escape(c) {
            Some(esc) => Cow::Borrowed(esc),
            None => Cow::Owned(c.to_string()),
        },
    }
}

/// Render the body of a string literal (everything between the quotes).
///
/// Fast path: text with nothing to escape is returned borrowed.
pub fn escape_str_literal(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c == '"' || control_escape(c).is_some()) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if c == '"' {
            out.push_str("\\\"");
        } else if let Some(esc) = control_escape(c) {
            out.push_str(esc);
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escape_table() {
        assert_eq!(unescape('n'), Some('\n'));
        assert_eq!(unescape('a'), Some('\u{7}'));
        assert_eq!(unescape('#'), Some('#'));
        assert_eq!(unescape('z'), None);
        assert_eq!(unescape('0'), None);
    }

    #[test]
    fn string_escaping_round_trips_through_table() {
        let original = "tab\there \"quoted\" back\\slash\nbell\u{7}";
        let escaped = escape_str_literal(original);
        let mut decoded = String::new();
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                let next = chars.next().and_then(unescape);
                decoded.push(next.unwrap_or('?'));
            } else {
                decoded.push(c);
            }
        }
        assert_eq!(decoded, original);
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_str_literal("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn char_literal_bodies() {
        assert_eq!(escape_char_literal('a'), "a");
        assert_eq!(escape_char_literal('\n'), "\\n");
        assert_eq!(escape_char_literal('\\'), "\\\\");
        assert_eq!(escape_char_literal('"'), "\\\"");
    }
}
