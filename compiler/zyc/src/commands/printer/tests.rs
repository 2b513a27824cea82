use super::*;
use pretty_assertions::assert_eq;
use zy_lexer::LexErrorKind;

fn output(printer: TokenPrinter<Vec<u8>>) -> String {
    String::from_utf8(printer.into_inner()).unwrap()
}

#[test]
fn prints_kind_text_and_decoded_value() {
    let mut printer = TokenPrinter::new(Vec::new(), false);
    printer.feed("(f 0x1f \"a\")\n").unwrap();
    printer.finish().unwrap();
    assert_eq!(
        output(printer),
        "lparen       (\n\
         symbol       f\n\
         hex          0x1f  => Int(31)\n\
         string       \"a\"  => Str(\"a\")\n\
         rparen       )\n"
    );
}

#[test]
fn continuation_across_chunks() {
    let mut printer = TokenPrinter::new(Vec::new(), false);
    printer.feed("\"open\n").unwrap();
    assert!(!printer.is_idle());
    printer.feed("close\"\n").unwrap();
    assert!(printer.is_idle());
    printer.finish().unwrap();
    assert_eq!(
        output(printer),
        "string       \"open\\nclose\"  => Str(\"open\\nclose\")\n"
    );
}

#[test]
fn recovers_with_absolute_line_numbers() {
    let mut printer = TokenPrinter::new(Vec::new(), false);
    printer.feed("a\n").unwrap();
    printer.feed("b\n").unwrap();
    printer.feed("\"bad \\z\"\n").unwrap();
    printer.feed("c\n").unwrap();
    printer.finish().unwrap();

    assert_eq!(
        printer.errors(),
        &[LexError {
            kind: LexErrorKind::InvalidEscape { escape_char: 'z' },
            line: 3,
        }]
    );
    assert_eq!(output(printer), "symbol       a\nsymbol       b\nsymbol       c\n");
}

#[test]
fn exit_on_fail_stops_at_first_error() {
    let mut printer = TokenPrinter::new(Vec::new(), true);
    printer.feed("x\n").unwrap();
    let err = printer.feed("#\\q\n").unwrap_err();
    assert!(matches!(
        err,
        DriverError::Lex(LexError {
            kind: LexErrorKind::InvalidEscape { escape_char: 'q' },
            line: 2,
        })
    ));
}

#[test]
fn unterminated_string_reported_at_finish() {
    let mut printer = TokenPrinter::new(Vec::new(), false);
    printer.feed("\"never closed\n").unwrap();
    printer.finish().unwrap();
    assert_eq!(printer.errors().len(), 1);
    assert_eq!(printer.errors()[0].kind, LexErrorKind::UnterminatedString);
}
