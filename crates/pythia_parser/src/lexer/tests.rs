use super::*;
use crate::token::Keyword as Kw;
use TokenKind::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source)
        .lex()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn lex_err(source: &str) -> TokenizeErrorKind {
    Lexer::new(source).lex().unwrap_err().kind
}

fn name(s: &str) -> TokenKind {
    Name(s.into())
}

#[test]
fn simple_statement() {
    assert_eq!(
        kinds("x = 1 + 2\n"),
        vec![name("x"), Eq, Int("1".into()), Plus, Int("2".into()), Newline, Eof]
    );
}

#[test]
fn final_newline_synthesized() {
    assert_eq!(kinds("pass"), vec![Keyword(Kw::Pass), Newline, Eof]);
    assert_eq!(kinds(""), vec![Eof]);
    assert_eq!(kinds("# only a comment\n"), vec![Eof]);
}

#[test]
fn keywords_and_soft_keywords() {
    assert_eq!(
        kinds("while match case type _ await\n"),
        vec![
            Keyword(Kw::While),
            name("match"),
            name("case"),
            name("type"),
            name("_"),
            Keyword(Kw::Await),
            Newline,
            Eof
        ]
    );
}

#[test]
fn indent_dedent_balanced() {
    let toks = kinds("if x:\n    a\n    if y:\n        b\nc\n");
    let indents = toks.iter().filter(|t| **t == Indent).count();
    let dedents = toks.iter().filter(|t| **t == Dedent).count();
    assert_eq!(indents, 2);
    assert_eq!(dedents, 2);
}

#[test]
fn multi_level_dedent() {
    let toks = kinds("if a:\n if b:\n  if c:\n   x\ny\n");
    let tail: Vec<_> = toks
        .iter()
        .skip_while(|t| **t != Name("x".into()))
        .cloned()
        .collect();
    assert_eq!(
        tail,
        vec![name("x"), Newline, Dedent, Dedent, Dedent, name("y"), Newline, Eof]
    );
}

#[test]
fn dedents_closed_at_eof() {
    let toks = kinds("if x:\n    a");
    assert_eq!(
        toks,
        vec![
            Keyword(Kw::If),
            name("x"),
            Colon,
            Newline,
            Indent,
            name("a"),
            Newline,
            Dedent,
            Eof
        ]
    );
}

#[test]
fn tabs_advance_to_multiple_of_eight() {
    // one tab and eight spaces land on the same level
    let toks = kinds("if x:\n\ta\n        b\n");
    assert_eq!(toks.iter().filter(|t| **t == Indent).count(), 1);
    assert_eq!(toks.iter().filter(|t| **t == Dedent).count(), 1);
}

#[test]
fn indent_mismatch_is_an_error() {
    assert_eq!(
        lex_err("if x:\n        a\n    b\n"),
        TokenizeErrorKind::IndentMismatch
    );
}

#[test]
fn blank_and_comment_lines_do_not_affect_indentation() {
    let toks = kinds("if x:\n    a\n\n  # comment deeper than nothing\n    b\n");
    assert_eq!(toks.iter().filter(|t| **t == Indent).count(), 1);
    assert_eq!(toks.iter().filter(|t| **t == Dedent).count(), 1);
}

#[test]
fn brackets_suppress_newline_and_indentation() {
    let toks = kinds("x = (1 +\n        2)\n");
    assert_eq!(
        toks,
        vec![
            name("x"),
            Eq,
            LParen,
            Int("1".into()),
            Plus,
            Int("2".into()),
            RParen,
            Newline,
            Eof
        ]
    );
}

#[test]
fn backslash_joins_lines() {
    assert_eq!(
        kinds("x = 1 + \\\n    2\n"),
        vec![name("x"), Eq, Int("1".into()), Plus, Int("2".into()), Newline, Eof]
    );
}

#[test]
fn int_literals_normalize_to_decimal() {
    assert_eq!(kinds("0xff\n")[0], Int("255".into()));
    assert_eq!(kinds("0o755\n")[0], Int("493".into()));
    assert_eq!(kinds("0b1010\n")[0], Int("10".into()));
    assert_eq!(kinds("1_000_000\n")[0], Int("1000000".into()));
    assert_eq!(kinds("0\n")[0], Int("0".into()));
    assert_eq!(kinds("000\n")[0], Int("0".into()));
}

#[test]
fn big_int_survives() {
    let digits = "123456789012345678901234567890123456789";
    assert_eq!(kinds(&format!("{digits}\n"))[0], Int(digits.into()));
    // 2**128
    assert_eq!(
        kinds("0x100000000000000000000000000000000\n")[0],
        Int("340282366920938463463374607431768211456".into())
    );
}

#[test]
fn float_literals() {
    assert_eq!(kinds("3.14\n")[0], Float(3.14));
    assert_eq!(kinds(".5\n")[0], Float(0.5));
    assert_eq!(kinds("1.\n")[0], Float(1.0));
    assert_eq!(kinds("1e3\n")[0], Float(1000.0));
    assert_eq!(kinds("2.5e-1\n")[0], Float(0.25));
    assert_eq!(kinds("2j\n")[0], Complex(2.0));
    assert_eq!(kinds("1.5J\n")[0], Complex(1.5));
}

#[test]
fn bad_number_literals() {
    assert!(matches!(lex_err("05\n"), TokenizeErrorKind::InvalidNumber(_)));
    assert!(matches!(lex_err("1__0\n"), TokenizeErrorKind::InvalidNumber(_)));
    assert!(matches!(lex_err("1_\n"), TokenizeErrorKind::InvalidNumber(_)));
    assert!(matches!(lex_err("0x\n"), TokenizeErrorKind::InvalidNumber(_)));
    assert!(matches!(lex_err("1e\n"), TokenizeErrorKind::InvalidNumber(_)));
    assert!(matches!(lex_err("1abc\n"), TokenizeErrorKind::InvalidNumber(_)));
}

#[test]
fn string_escapes() {
    assert_eq!(kinds("'a\\nb'\n")[0], Str("a\nb".into()));
    assert_eq!(kinds("'\\x41\\u0042'\n")[0], Str("AB".into()));
    assert_eq!(kinds("'\\''\n")[0], Str("'".into()));
    // unknown escapes keep the backslash
    assert_eq!(kinds("'\\d'\n")[0], Str("\\d".into()));
}

#[test]
fn raw_strings_keep_backslashes() {
    assert_eq!(kinds("r'a\\nb'\n")[0], Str("a\\nb".into()));
    assert_eq!(kinds("R'\\d+'\n")[0], Str("\\d+".into()));
}

#[test]
fn triple_quoted_strings() {
    assert_eq!(kinds("'''line\nline'''\n")[0], Str("line\nline".into()));
    // one or two quotes inside are content
    assert_eq!(kinds("\"\"\"a\"b\"\"c\"\"\"\n")[0], Str("a\"b\"\"c".into()));
}

#[test]
fn bytes_literals() {
    assert_eq!(kinds("b'abc'\n")[0], Bytes(b"abc".to_vec()));
    assert_eq!(kinds("b'\\x00\\xff'\n")[0], Bytes(vec![0, 255]));
    assert!(matches!(
        lex_err("b'é'\n"),
        TokenizeErrorKind::InvalidCharacter(_)
    ));
}

#[test]
fn unterminated_strings() {
    assert_eq!(lex_err("'abc\n"), TokenizeErrorKind::UnterminatedString);
    assert_eq!(lex_err("'''abc\n"), TokenizeErrorKind::UnterminatedString);
}

#[test]
fn fstring_splits_text_and_fields() {
    let toks = kinds("f'a{x}b'\n");
    let FString(parts) = &toks[0] else {
        panic!("expected f-string, got {:?}", toks[0]);
    };
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], FStringPart::Text("a".into()));
    assert_eq!(parts[2], FStringPart::Text("b".into()));
    let FStringPart::Field {
        tokens,
        conversion,
        format_spec,
    } = &parts[1]
    else {
        panic!("expected field");
    };
    assert_eq!(tokens[0].kind, name("x"));
    assert_eq!(*conversion, None);
    assert!(format_spec.is_none());
}

#[test]
fn fstring_conversion_and_spec() {
    let toks = kinds("f'{v!r:>{w}}'\n");
    let FString(parts) = &toks[0] else { panic!() };
    let FStringPart::Field {
        conversion,
        format_spec,
        ..
    } = &parts[0]
    else {
        panic!("expected field");
    };
    assert_eq!(*conversion, Some('r'));
    let spec = format_spec.as_ref().unwrap();
    assert_eq!(spec[0], FStringPart::Text(">".into()));
    assert!(matches!(spec[1], FStringPart::Field { .. }));
}

#[test]
fn fstring_brace_escapes() {
    let toks = kinds("f'{{literal}}'\n");
    let FString(parts) = &toks[0] else { panic!() };
    assert_eq!(parts, &vec![FStringPart::Text("{literal}".into())]);
}

#[test]
fn fstring_field_operators() {
    // `!=` and `:=` are expression tokens, not conversion or spec markers
    let toks = kinds("f'{a != (b := 1)}'\n");
    let FString(parts) = &toks[0] else { panic!() };
    let FStringPart::Field { tokens, .. } = &parts[0] else {
        panic!("expected field");
    };
    assert!(tokens.iter().any(|t| t.kind == NotEq));
    assert!(tokens.iter().any(|t| t.kind == Walrus));
}

#[test]
fn fstring_field_tolerates_surrounding_space() {
    // a field is a bare expression, so padding is not indentation
    let toks = kinds("f'{ {1: 2} }'\n");
    let FString(parts) = &toks[0] else { panic!() };
    let FStringPart::Field { tokens, .. } = &parts[0] else {
        panic!("expected field");
    };
    assert_eq!(tokens[0].kind, LBrace);
    assert!(tokens
        .iter()
        .all(|t| !matches!(t.kind, Indent | Dedent)));
}

#[test]
fn operators_and_punctuation() {
    assert_eq!(
        kinds("a **= b // c -> ... := @\n"),
        vec![
            name("a"),
            DoubleStarEq,
            name("b"),
            DoubleSlash,
            name("c"),
            Arrow,
            Ellipsis,
            Walrus,
            At,
            Newline,
            Eof
        ]
    );
}

#[test]
fn positions_are_tracked() {
    let toks = Lexer::new("x = 1\ny\n").lex().unwrap();
    assert_eq!(toks[0].span.start, Pos::new(1, 0));
    assert_eq!(toks[1].span.start, Pos::new(1, 2));
    assert_eq!(toks[2].span.start, Pos::new(1, 4));
    // `y` on the second line
    assert_eq!(toks[4].span.start, Pos::new(2, 0));
}

#[test]
fn invalid_character() {
    assert_eq!(lex_err("x = $\n"), TokenizeErrorKind::InvalidCharacter('$'));
}
