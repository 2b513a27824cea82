//! Character sources queued into the lexer.

use std::fmt;

/// One character source.
///
/// Wraps any character iterator with a single character of lookahead so the
/// lexer can ask whether a stream still has input without consuming it.
pub struct CharStream {
    chars: Box<dyn Iterator<Item = char>>,
    peeked: Option<char>,
}

impl CharStream {
    pub fn new<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
        I::IntoIter: 'static,
    {
        CharStream {
            chars: Box::new(chars.into_iter()),
            peeked: None,
        }
    }

    /// Consume the next character.
    #[inline]
    pub fn next_char(&mut self) -> Option<char> {
        self.peeked.take().or_else(|| self.chars.next())
    }

    /// Whether at least one unread character remains.
    pub fn has_remaining(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = self.chars.next();
        }
        self.peeked.is_some()
    }
}

impl From<String> for CharStream {
    fn from(text: String) -> Self {
        let chars: Vec<char> = text.chars().collect();
        CharStream::new(chars)
    }
}

impl From<&str> for CharStream {
    fn from(text: &str) -> Self {
        CharStream::new(text.chars().collect::<Vec<_>>())
    }
}

impl fmt::Debug for CharStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharStream")
            .field("peeked", &self.peeked)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_remaining_does_not_consume() {
        let mut s = CharStream::from("ab");
        assert!(s.has_remaining());
        assert!(s.has_remaining());
        assert_eq!(s.next_char(), Some('a'));
        assert_eq!(s.next_char(), Some('b'));
        assert!(!s.has_remaining());
        assert_eq!(s.next_char(), None);
    }

    #[test]
    fn wraps_arbitrary_iterators() {
        let mut s = CharStream::new("xyz".chars().rev().collect::<Vec<_>>());
        assert_eq!(s.next_char(), Some('z'));
    }
}
