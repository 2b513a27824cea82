use super::*;
use crate::lex;
use crate::lex_error::LexErrorKind;
use pretty_assertions::assert_eq;

fn tok(kind: TokenKind, text: &str) -> Token {
    Token::new(kind, text)
}

fn sym(text: &str) -> Token {
    tok(TokenKind::Symbol, text)
}

fn dec(text: &str) -> Token {
    tok(TokenKind::Decimal, text)
}

/// Pull tokens until the queued streams run dry.
fn drain(lexer: &mut Lexer) -> Vec<Token> {
    let mut out = Vec::new();
    loop {
        let tok = lexer.next_token().unwrap();
        if tok.is_end() {
            return out;
        }
        out.push(tok);
    }
}

fn lex_err(source: &str) -> LexError {
    match lex(source) {
        Ok(tokens) => panic!("`{source}` lexed without error: {tokens:?}"),
        Err(err) => err,
    }
}

// === Colon disambiguation ===

#[test]
fn keyword_colon_follows_symbol() {
    assert_eq!(
        lex("foo: 1").unwrap(),
        vec![sym("foo"), Token::bare(TokenKind::ColonOperator), dec("1")]
    );
}

#[test]
fn trailing_colon_resolved_at_finish() {
    assert_eq!(
        lex("foo:").unwrap(),
        vec![sym("foo"), Token::bare(TokenKind::ColonOperator)]
    );
}

#[test]
fn fresh_assign_with_and_without_spaces() {
    let expected = vec![sym("x"), tok(TokenKind::FreshAssign, ":="), dec("1")];
    assert_eq!(lex("x := 1").unwrap(), expected);
    assert_eq!(lex("x:=1").unwrap(), expected);
}

#[test]
fn colon_before_bracket_reprocesses_bracket() {
    assert_eq!(
        lex("a:(b)").unwrap(),
        vec![
            sym("a"),
            Token::bare(TokenKind::ColonOperator),
            Token::bare(TokenKind::LParen),
            sym("b"),
            Token::bare(TokenKind::RParen),
        ]
    );
}

// === Multi-stream continuity ===

#[test]
fn queued_streams_lex_as_one() {
    let mut lexer = Lexer::new();
    lexer.add_stream("(+ 1");
    lexer.add_stream(" 2)");
    assert_eq!(drain(&mut lexer), lex("(+ 1 2)").unwrap());
}

#[test]
fn atom_continues_across_seam() {
    let mut lexer = Lexer::new();
    lexer.add_stream("(foo");
    lexer.add_stream("bar)");
    assert_eq!(
        drain(&mut lexer),
        vec![
            Token::bare(TokenKind::LParen),
            sym("foobar"),
            Token::bare(TokenKind::RParen),
        ]
    );
}

#[test]
fn stream_added_after_exhaustion_is_promoted() {
    let mut lexer = Lexer::new();
    lexer.add_stream("(+ 1");
    assert_eq!(
        drain(&mut lexer),
        vec![Token::bare(TokenKind::LParen), sym("+")]
    );
    assert!(!lexer.is_idle());

    lexer.add_stream(" 2)");
    assert_eq!(
        drain(&mut lexer),
        vec![dec("1"), dec("2"), Token::bare(TokenKind::RParen)]
    );
    assert!(lexer.is_idle());
}

#[test]
fn string_spans_streams() {
    let mut lexer = Lexer::new();
    lexer.add_stream("\"ab");
    assert_eq!(drain(&mut lexer), vec![]);
    assert_eq!(lexer.state(), LexState::StringLiteral);
    lexer.add_stream("cd\"");
    assert_eq!(drain(&mut lexer), vec![tok(TokenKind::String, "abcd")]);
}

// === Literals ===

#[test]
fn string_escapes_decode() {
    assert_eq!(
        lex(r#""a\nb\t\\\"""#).unwrap(),
        vec![tok(TokenKind::String, "a\nb\t\\\"")]
    );
}

#[test]
fn unknown_string_escape_is_error() {
    let err = lex_err(r#""\z""#);
    assert_eq!(err.kind, LexErrorKind::InvalidEscape { escape_char: 'z' });
    assert_eq!(err.line, 1);
}

#[test]
fn raw_string_is_verbatim() {
    assert_eq!(
        lex("`a\\n\"b`").unwrap(),
        vec![tok(TokenKind::RawString, "a\\n\"b")]
    );
}

#[test]
fn unquote_and_splice() {
    assert_eq!(
        lex("~x ~@xs ~(y)").unwrap(),
        vec![
            Token::bare(TokenKind::Tilde),
            sym("x"),
            Token::bare(TokenKind::TildeAt),
            sym("xs"),
            Token::bare(TokenKind::Tilde),
            Token::bare(TokenKind::LParen),
            sym("y"),
            Token::bare(TokenKind::RParen),
        ]
    );
}

#[test]
fn quote_and_caret() {
    assert_eq!(
        lex("'(a) ^b").unwrap(),
        vec![
            Token::bare(TokenKind::Quote),
            Token::bare(TokenKind::LParen),
            sym("a"),
            Token::bare(TokenKind::RParen),
            Token::bare(TokenKind::Caret),
            sym("b"),
        ]
    );
}

#[test]
fn dollar_splits_atoms() {
    assert_eq!(
        lex("a$b").unwrap(),
        vec![sym("a"), tok(TokenKind::Dollar, "$"), sym("b")]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(lex("a ; (ignored\nb").unwrap(), vec![sym("a"), sym("b")]);
    assert_eq!(lex("a;c\nb").unwrap(), vec![sym("a"), sym("b")]);
    assert_eq!(lex("; only a comment").unwrap(), vec![]);
}

#[test]
fn separators_flush() {
    assert_eq!(
        lex("a,b\tc\r\nd").unwrap(),
        vec![sym("a"), sym("b"), sym("c"), sym("d")]
    );
}

#[test]
fn brackets_and_braces() {
    let kinds: Vec<TokenKind> = lex("[{}]").unwrap().into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LSquare,
            TokenKind::LCurly,
            TokenKind::RCurly,
            TokenKind::RSquare,
        ]
    );
}

#[test]
fn literal_tokens_render_to_source() {
    for source in [
        "0x1A", "0o17", "0b101", "3.14", "true", "-5", "#a", "#\\n", "\"a\\tb\"", "`raw`",
    ] {
        let tokens = lex(source).unwrap();
        assert_eq!(tokens.len(), 1, "{source}");
        assert!(tokens[0].kind.is_literal(), "{source}");
        assert_eq!(tokens[0].to_string(), source);
    }
}

// === Errors ===

#[test]
fn openers_after_pending_atom_are_errors() {
    assert_eq!(lex_err("a\"b\"").kind, LexErrorKind::UnexpectedQuote);
    assert_eq!(lex_err("a'b").kind, LexErrorKind::UnexpectedQuote);
    assert_eq!(lex_err("a^").kind, LexErrorKind::UnexpectedCaret);
    assert_eq!(lex_err("a~b").kind, LexErrorKind::UnexpectedTilde);
    assert_eq!(lex_err("a`b`").kind, LexErrorKind::UnexpectedBacktick);
}

#[test]
fn unterminated_literals() {
    assert_eq!(lex_err("\"abc").kind, LexErrorKind::UnterminatedString);
    assert_eq!(lex_err("\"abc\\").kind, LexErrorKind::UnterminatedString);
    assert_eq!(lex_err("`abc").kind, LexErrorKind::UnterminatedRawString);
}

#[test]
fn error_reports_line() {
    let err = lex_err("a\n\nb\"x\"");
    assert_eq!(err.line, 3);
    assert_eq!(lex_err("ok\n1abc").line, 2);
    assert_eq!(lex_err("1abc\nok").line, 1);
}

// === Pull interface ===

#[test]
fn peek_is_idempotent() {
    let mut lexer = Lexer::new();
    lexer.add_stream("(a)");
    let first = lexer.peek_token().unwrap();
    assert_eq!(lexer.peek_token().unwrap(), first);
    assert_eq!(lexer.next_token().unwrap(), first);
    assert_eq!(lexer.peek_token().unwrap(), sym("a"));
    assert_eq!(lexer.next_token().unwrap(), sym("a"));
}

#[test]
fn end_is_sticky() {
    let mut lexer = Lexer::new();
    assert!(lexer.next_token().unwrap().is_end());
    lexer.add_stream("x ");
    assert_eq!(lexer.next_token().unwrap(), sym("x"));
    assert!(lexer.next_token().unwrap().is_end());
    assert!(lexer.next_token().unwrap().is_end());
}

#[test]
fn newlines_counted_in_every_state() {
    let mut lexer = Lexer::new();
    lexer.add_stream("a ; c\n\"s\nt\" `r\n`\n");
    drain(&mut lexer);
    assert_eq!(lexer.current_line(), 5);
}

#[test]
fn reset_discards_partial_input() {
    let mut lexer = Lexer::new();
    lexer.add_stream("\"dangling");
    assert_eq!(drain(&mut lexer), vec![]);
    assert!(!lexer.is_idle());

    lexer.reset();
    assert!(lexer.is_idle());
    assert_eq!(lexer.current_line(), 1);
    lexer.add_stream("ok ");
    assert_eq!(drain(&mut lexer), vec![sym("ok")]);
}

#[test]
fn finish_emits_pending_tilde() {
    let mut lexer = Lexer::new();
    lexer.add_stream("~");
    assert_eq!(drain(&mut lexer), vec![]);
    lexer.finish().unwrap();
    assert_eq!(drain(&mut lexer), vec![Token::bare(TokenKind::Tilde)]);
}

// === Properties ===

mod props {
    use super::*;
    use proptest::prelude::*;

    const VOCAB: &[&str] = &[
        "(", ")", "[", "]", "{", "}", "foo", "x1", "42", "-7", "0x1f", "3.5", "\"s t\"",
        "\"e\\n\"", "`r w`", "'", ":", ":=", "~", "~@", "$", ";c\n", "#a", ".a.b", "\n",
    ];

    fn source() -> impl Strategy<Value = String> {
        proptest::collection::vec(proptest::sample::select(VOCAB), 0..24)
            .prop_map(|words| format!("{}\n", words.join(" ")))
    }

    fn lex_split(first: &str, second: &str, drain_between: bool) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new();
        let mut out = Vec::new();
        lexer.add_stream(first.to_owned());
        if drain_between {
            loop {
                let tok = lexer.next_token()?;
                if tok.is_end() {
                    break;
                }
                out.push(tok);
            }
        }
        lexer.add_stream(second.to_owned());
        loop {
            let tok = lexer.next_token()?;
            if tok.is_end() {
                break;
            }
            out.push(tok);
        }
        lexer.finish()?;
        loop {
            let tok = lexer.next_token()?;
            if tok.is_end() {
                break;
            }
            out.push(tok);
        }
        Ok(out)
    }

    proptest! {
        #[test]
        fn split_point_does_not_change_tokens(
            text in source(),
            split in any::<proptest::sample::Index>(),
            drain_between in any::<bool>(),
        ) {
            let chars: Vec<char> = text.chars().collect();
            let at = split.index(chars.len() + 1);
            let first: String = chars[..at].iter().collect();
            let second: String = chars[at..].iter().collect();

            prop_assert_eq!(lex_split(&first, &second, drain_between), lex(&text));
        }

        #[test]
        fn decimal_literals_render_back(n in any::<i64>()) {
            let text = n.to_string();
            let tokens = lex(&text).unwrap();
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(tokens[0].kind, TokenKind::Decimal);
            prop_assert_eq!(tokens[0].to_string(), text);
        }
    }
}
