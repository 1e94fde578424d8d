#[cfg(test)]
mod tests;

use std::str::Chars;

use pythia_ast::span::{Pos, Span};
use pythia_utils::peek::Peek;

use crate::error::{TokenizeError, TokenizeErrorKind};
use crate::token::{FStringPart, Keyword, Token, TokenKind};

pub type LexResult<T> = Result<T, TokenizeError>;

/// Converts source text into a fully materialized token sequence ending in
/// `Eof`. The parser needs arbitrary lookahead and checkpointing, so tokens
/// are not streamed.
pub struct Lexer<'src> {
    chars: Chars<'src>,

    line: u32,
    column: u32,
    token_start: Pos,

    /// Pending indentation widths; always starts `[0]`.
    indents: Vec<u32>,
    /// Depth of open `(` `[` `{`. While non-zero, NEWLINE/INDENT/DEDENT are
    /// suppressed so bracketed expressions span lines freely.
    nesting: u32,
    at_line_start: bool,

    tokens: Vec<Token>,
}

/// The result of processing one escape sequence.
enum Escaped {
    /// Backslash-newline: contributes nothing.
    LineJoin,
    Char(char),
    /// Unknown escape: the backslash is kept, like CPython.
    Verbatim(char),
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars(),
            line: 1,
            column: 0,
            token_start: Pos::new(1, 0),
            indents: vec![0],
            nesting: 0,
            at_line_start: true,
            tokens: vec![],
        }
    }

    /// A lexer for an f-string field expression. The bracket nesting
    /// starts open so the snippet lexes as a bare expression: leading
    /// whitespace is not indentation and no NEWLINE/INDENT/DEDENT are
    /// emitted.
    fn nested(source: &'src str) -> Self {
        Self {
            nesting: 1,
            at_line_start: false,
            ..Self::new(source)
        }
    }

    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        loop {
            if self.at_line_start && self.nesting == 0 {
                self.handle_line_start()?;
                self.at_line_start = false;
            }

            while matches!(self.chars.peek(), Some(' ' | '\t' | '\x0c')) {
                self.bump();
            }

            self.token_start = self.pos();

            let Some(ch) = self.chars.peek() else { break };

            match ch {
                '\r' => {
                    self.bump();
                }

                '\n' => {
                    self.bump();
                    if self.nesting == 0 {
                        self.push(TokenKind::Newline);
                        self.at_line_start = true;
                    }
                }

                '#' => self.skip_comment(),

                '\\' => {
                    self.bump();
                    if self.chars.peek() == Some('\r') {
                        self.bump();
                    }
                    if self.chars.peek() != Some('\n') {
                        return Err(self.error(TokenizeErrorKind::InvalidCharacter('\\')));
                    }
                    self.bump();
                    // explicit line join: the next line continues this
                    // logical line, so no indent handling
                }

                '0'..='9' => {
                    let kind = self.lex_number()?;
                    self.push(kind);
                }

                '.' if self.chars.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                    let kind = self.lex_number()?;
                    self.push(kind);
                }

                ch if is_ident_start(ch) => {
                    let kind = self.lex_name_or_string()?;
                    self.push(kind);
                }

                '\'' | '"' => {
                    let kind = self.lex_string(StrPrefix::default())?;
                    self.push(kind);
                }

                _ => {
                    let kind = self.lex_operator()?;
                    self.push(kind);
                }
            }
        }

        // close the final logical line and any open blocks
        self.token_start = self.pos();
        if self
            .tokens
            .last()
            .is_some_and(|t| !matches!(t.kind, TokenKind::Newline))
        {
            self.push(TokenKind::Newline);
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Dedent);
        }
        self.push(TokenKind::Eof);

        Ok(self.tokens)
    }

    /// Measure the indentation of the upcoming line, skipping blank and
    /// comment-only lines, then emit INDENT/DEDENT for the first line with
    /// real content.
    fn handle_line_start(&mut self) -> LexResult<()> {
        loop {
            let mut width = 0u32;
            loop {
                match self.chars.peek() {
                    Some(' ') => {
                        self.bump();
                        width += 1;
                    }
                    Some('\t') => {
                        self.bump();
                        // tabs advance to the next multiple of 8
                        width = (width / 8 + 1) * 8;
                    }
                    Some('\x0c') => {
                        self.bump();
                        width = 0;
                    }
                    _ => break,
                }
            }

            match self.chars.peek() {
                None => return Ok(()),
                Some('\r' | '\n') => {
                    self.bump();
                }
                Some('#') => {
                    self.skip_comment();
                }
                Some(_) => {
                    self.token_start = self.pos();
                    return self.apply_indent(width);
                }
            }
        }
    }

    /// Compare the measured width against the indentation stack, emitting
    /// one INDENT or as many DEDENTs as levels closed. A width that matches
    /// no outer level is an error.
    fn apply_indent(&mut self, width: u32) -> LexResult<()> {
        let current = self.indents.last().copied().unwrap_or(0);

        if width > current {
            self.indents.push(width);
            self.push(TokenKind::Indent);
        } else if width < current {
            while self.indents.last().is_some_and(|&top| top > width) {
                self.indents.pop();
                self.push(TokenKind::Dedent);
            }
            if self.indents.last() != Some(&width) {
                return Err(self.error(TokenizeErrorKind::IndentMismatch));
            }
        }
        Ok(())
    }

    fn skip_comment(&mut self) {
        while matches!(self.chars.peek(), Some(ch) if ch != '\n') {
            self.bump();
        }
    }

    // --- identifiers, keywords and string prefixes ---

    fn lex_name_or_string(&mut self) -> LexResult<TokenKind> {
        let mut word = String::new();
        while matches!(self.chars.peek(), Some(ch) if is_ident_continue(ch)) {
            if let Some(ch) = self.bump() {
                word.push(ch);
            }
        }

        if matches!(self.chars.peek(), Some('\'' | '"')) {
            if let Some(prefix) = StrPrefix::parse(&word) {
                return self.lex_string(prefix);
            }
        }

        // soft keywords (`match`, `case`, `type`, `_`) are absent from the
        // hard keyword table and fall through to `Name`
        Ok(match Keyword::from_str(&word) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Name(word),
        })
    }

    // --- numbers ---

    fn lex_number(&mut self) -> LexResult<TokenKind> {
        if self.chars.peek() == Some('0')
            && matches!(
                self.chars.peek_second(),
                Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')
            )
        {
            return self.lex_radix_int();
        }

        let mut text = String::new();
        let mut is_float = false;

        if matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
            self.take_digits(&mut text)?;
        }

        if self.chars.peek() == Some('.')
            && self
                .chars
                .peek_second()
                .map_or(true, |c| !is_ident_start(c) && c != '.')
        {
            is_float = true;
            self.bump();
            text.push('.');
            if matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
                self.take_digits(&mut text)?;
            }
        }

        if matches!(self.chars.peek(), Some('e' | 'E')) {
            let signed = match self.chars.peek_second() {
                Some('+' | '-') => true,
                Some(c) if c.is_ascii_digit() => false,
                _ => return Err(self.invalid_number(&text)),
            };
            is_float = true;
            self.bump();
            text.push('e');
            if signed {
                if let Some(sign) = self.bump() {
                    text.push(sign);
                }
            }
            if !matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.invalid_number(&text));
            }
            self.take_digits(&mut text)?;
        }

        let imaginary = matches!(self.chars.peek(), Some('j' | 'J'));
        if imaginary {
            self.bump();
        }

        if matches!(self.chars.peek(), Some(c) if is_ident_continue(c)) {
            return Err(self.invalid_number(&text));
        }

        if is_float || imaginary {
            let value: f64 = text.parse().map_err(|_| self.invalid_number(&text))?;
            Ok(if imaginary {
                TokenKind::Complex(value)
            } else {
                TokenKind::Float(value)
            })
        } else {
            if text.len() > 1 && text.starts_with('0') && text.bytes().any(|b| b != b'0') {
                // decimal literals may not have leading zeros
                return Err(self.invalid_number(&text));
            }
            let normalized = text.trim_start_matches('0');
            Ok(TokenKind::Int(if normalized.is_empty() {
                "0".into()
            } else {
                normalized.into()
            }))
        }
    }

    /// Consume a run of digits with `_` separators into `out`, underscores
    /// dropped. Misplaced underscores are an error.
    fn take_digits(&mut self, out: &mut String) -> LexResult<()> {
        let mut last_underscore = false;
        let mut any = false;
        loop {
            match self.chars.peek() {
                Some(c) if c.is_ascii_digit() => {
                    self.bump();
                    out.push(c);
                    any = true;
                    last_underscore = false;
                }
                Some('_') if any && !last_underscore => {
                    self.bump();
                    last_underscore = true;
                }
                Some('_') => return Err(self.invalid_number(out)),
                _ => break,
            }
        }
        if last_underscore || !any {
            return Err(self.invalid_number(out));
        }
        Ok(())
    }

    fn lex_radix_int(&mut self) -> LexResult<TokenKind> {
        self.bump(); // `0`
        let base = match self.bump() {
            Some('x' | 'X') => 16,
            Some('o' | 'O') => 8,
            _ => 2,
        };

        let mut digits: Vec<u32> = vec![];
        let mut last_underscore = true; // a leading underscore is invalid too
        loop {
            match self.chars.peek() {
                Some('_') if !last_underscore => {
                    self.bump();
                    last_underscore = true;
                }
                Some(c) => match c.to_digit(base) {
                    Some(d) => {
                        self.bump();
                        digits.push(d);
                        last_underscore = false;
                    }
                    None => break,
                },
                None => break,
            }
        }

        if digits.is_empty() || last_underscore {
            return Err(self.invalid_number(""));
        }
        if matches!(self.chars.peek(), Some(c) if is_ident_continue(c)) {
            return Err(self.invalid_number(""));
        }

        Ok(TokenKind::Int(to_decimal(&digits, base)))
    }

    fn invalid_number(&self, text: &str) -> TokenizeError {
        self.error(TokenizeErrorKind::InvalidNumber(text.into()))
    }

    // --- strings ---

    fn lex_string(&mut self, prefix: StrPrefix) -> LexResult<TokenKind> {
        let Some(quote) = self.bump() else {
            return Err(self.error(TokenizeErrorKind::UnterminatedString));
        };
        let triple = self.chars.peek() == Some(quote) && self.chars.peek_second() == Some(quote);
        if triple {
            self.bump();
            self.bump();
        }

        if prefix.fstring {
            let parts = self.lex_fstring_body(prefix.raw, quote, triple)?;
            Ok(TokenKind::FString(parts))
        } else if prefix.bytes {
            let value = self.lex_bytes_body(prefix.raw, quote, triple)?;
            Ok(TokenKind::Bytes(value))
        } else {
            let value = self.lex_str_body(prefix.raw, quote, triple)?;
            Ok(TokenKind::Str(value))
        }
    }

    fn lex_str_body(&mut self, raw: bool, quote: char, triple: bool) -> LexResult<String> {
        let mut value = String::new();
        loop {
            match self.chars.peek() {
                None => return Err(self.error(TokenizeErrorKind::UnterminatedString)),
                Some('\n') if !triple => {
                    return Err(self.error(TokenizeErrorKind::UnterminatedString))
                }
                Some(q) if q == quote => {
                    if self.close_quote(quote, triple) {
                        return Ok(value);
                    }
                    value.push(quote);
                }
                Some('\\') => {
                    self.bump();
                    if raw {
                        value.push('\\');
                        if let Some(next) = self.bump() {
                            value.push(next);
                        }
                    } else {
                        match self.lex_escape()? {
                            Escaped::LineJoin => {}
                            Escaped::Char(c) => value.push(c),
                            Escaped::Verbatim(c) => {
                                value.push('\\');
                                value.push(c);
                            }
                        }
                    }
                }
                Some(ch) => {
                    self.bump();
                    value.push(ch);
                }
            }
        }
    }

    fn lex_bytes_body(&mut self, raw: bool, quote: char, triple: bool) -> LexResult<Vec<u8>> {
        let mut value = Vec::new();
        loop {
            match self.chars.peek() {
                None => return Err(self.error(TokenizeErrorKind::UnterminatedString)),
                Some('\n') if !triple => {
                    return Err(self.error(TokenizeErrorKind::UnterminatedString))
                }
                Some(q) if q == quote => {
                    if self.close_quote(quote, triple) {
                        return Ok(value);
                    }
                    value.push(quote as u8);
                }
                Some('\\') => {
                    self.bump();
                    if raw {
                        value.push(b'\\');
                        if let Some(next) = self.bump() {
                            value.push(self.ascii_byte(next)?);
                        }
                    } else {
                        match self.lex_escape()? {
                            Escaped::LineJoin => {}
                            Escaped::Char(c) if (c as u32) <= 0xff => value.push(c as u32 as u8),
                            Escaped::Char(c) => {
                                return Err(
                                    self.error(TokenizeErrorKind::InvalidCharacter(c))
                                )
                            }
                            Escaped::Verbatim(c) => {
                                value.push(b'\\');
                                value.push(self.ascii_byte(c)?);
                            }
                        }
                    }
                }
                Some(ch) => {
                    self.bump();
                    value.push(self.ascii_byte(ch)?);
                }
            }
        }
    }

    /// Bytes literals may only contain ASCII outside of escapes.
    fn ascii_byte(&self, ch: char) -> LexResult<u8> {
        if ch.is_ascii() {
            Ok(ch as u8)
        } else {
            Err(self.error(TokenizeErrorKind::InvalidCharacter(ch)))
        }
    }

    /// At a quote char: consume the closing delimiter if this is one.
    /// Returns true when the literal is finished. In triple mode one or two
    /// quotes in a row are content; a single quote is consumed and the
    /// caller pushes it.
    fn close_quote(&mut self, quote: char, triple: bool) -> bool {
        if !triple {
            self.bump();
            return true;
        }
        if self.chars.peek_second() == Some(quote) {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            lookahead.next();
            if lookahead.next() == Some(quote) {
                self.bump();
                self.bump();
                self.bump();
                return true;
            }
        }
        self.bump();
        false
    }

    /// Process one escape sequence, the backslash already consumed.
    fn lex_escape(&mut self) -> LexResult<Escaped> {
        let Some(ch) = self.bump() else {
            return Err(self.error(TokenizeErrorKind::UnterminatedString));
        };
        Ok(match ch {
            '\n' => Escaped::LineJoin,
            '\r' => {
                if self.chars.peek() == Some('\n') {
                    self.bump();
                }
                Escaped::LineJoin
            }
            '\\' => Escaped::Char('\\'),
            '\'' => Escaped::Char('\''),
            '"' => Escaped::Char('"'),
            'n' => Escaped::Char('\n'),
            't' => Escaped::Char('\t'),
            'r' => Escaped::Char('\r'),
            'a' => Escaped::Char('\x07'),
            'b' => Escaped::Char('\x08'),
            'f' => Escaped::Char('\x0c'),
            'v' => Escaped::Char('\x0b'),
            '0'..='7' => {
                let mut n = ch as u32 - '0' as u32;
                for _ in 0..2 {
                    match self.chars.peek() {
                        Some(d @ '0'..='7') => {
                            self.bump();
                            n = n * 8 + (d as u32 - '0' as u32);
                        }
                        _ => break,
                    }
                }
                Escaped::Char(char::from_u32(n).unwrap_or('\u{fffd}'))
            }
            'x' => Escaped::Char(self.hex_escape(2)?),
            'u' => Escaped::Char(self.hex_escape(4)?),
            'U' => Escaped::Char(self.hex_escape(8)?),
            other => Escaped::Verbatim(other),
        })
    }

    fn hex_escape(&mut self, len: u32) -> LexResult<char> {
        let mut n = 0u32;
        for _ in 0..len {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error(TokenizeErrorKind::UnterminatedString))?;
            n = n * 16 + digit;
        }
        char::from_u32(n).ok_or_else(|| self.error(TokenizeErrorKind::InvalidCharacter('\\')))
    }

    // --- f-strings ---

    fn lex_fstring_body(
        &mut self,
        raw: bool,
        quote: char,
        triple: bool,
    ) -> LexResult<Vec<FStringPart>> {
        let mut parts = Vec::new();
        let mut text = String::new();

        macro_rules! flush {
            () => {
                if !text.is_empty() {
                    parts.push(FStringPart::Text(std::mem::take(&mut text)));
                }
            };
        }

        loop {
            match self.chars.peek() {
                None => return Err(self.error(TokenizeErrorKind::UnterminatedString)),
                Some('\n') if !triple => {
                    return Err(self.error(TokenizeErrorKind::UnterminatedString))
                }
                Some(q) if q == quote => {
                    if self.close_quote(quote, triple) {
                        flush!();
                        return Ok(parts);
                    }
                    text.push(quote);
                }
                Some('{') => {
                    self.bump();
                    if self.eat_op('{') {
                        text.push('{');
                    } else {
                        flush!();
                        parts.push(self.lex_fstring_field(quote, triple)?);
                    }
                }
                Some('}') => {
                    self.bump();
                    if self.eat_op('}') {
                        text.push('}');
                    } else {
                        return Err(self.error(TokenizeErrorKind::InvalidCharacter('}')));
                    }
                }
                Some('\\') => {
                    self.bump();
                    if raw {
                        text.push('\\');
                        if let Some(next) = self.bump() {
                            text.push(next);
                        }
                    } else {
                        match self.lex_escape()? {
                            Escaped::LineJoin => {}
                            Escaped::Char(c) => text.push(c),
                            Escaped::Verbatim(c) => {
                                text.push('\\');
                                text.push(c);
                            }
                        }
                    }
                }
                Some(ch) => {
                    self.bump();
                    text.push(ch);
                }
            }
        }
    }

    /// Lex one `{expr[!conv][:spec]}` field, the `{` already consumed.
    /// The expression span is re-tokenized recursively with the same
    /// grammar as top-level expressions; spans within it are relative to
    /// the field, not the enclosing file.
    fn lex_fstring_field(&mut self, quote: char, triple: bool) -> LexResult<FStringPart> {
        let field_start = self.pos();
        let mut expr_text = String::new();
        let mut depth = 0u32;
        let mut conversion = None;
        let mut format_spec = None;

        loop {
            match self.chars.peek() {
                None => return Err(self.error(TokenizeErrorKind::UnterminatedString)),
                Some('\n') if !triple => {
                    return Err(self.error(TokenizeErrorKind::UnterminatedString))
                }
                Some(ch @ ('(' | '[' | '{')) => {
                    depth += 1;
                    self.bump();
                    expr_text.push(ch);
                }
                Some(ch @ (')' | ']')) => {
                    depth = depth.saturating_sub(1);
                    self.bump();
                    expr_text.push(ch);
                }
                Some('}') if depth > 0 => {
                    depth -= 1;
                    self.bump();
                    expr_text.push('}');
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                Some('!') if depth == 0 && self.chars.peek_second() != Some('=') => {
                    self.bump();
                    let conv = self.bump();
                    if !matches!(conv, Some('s' | 'r' | 'a')) {
                        return Err(self.error(TokenizeErrorKind::InvalidCharacter(
                            conv.unwrap_or('!'),
                        )));
                    }
                    conversion = conv;
                    match self.chars.peek() {
                        Some(':') => {
                            self.bump();
                            format_spec = Some(self.lex_fstring_spec(quote, triple)?);
                            break;
                        }
                        Some('}') => {
                            self.bump();
                            break;
                        }
                        other => {
                            return Err(self.error(TokenizeErrorKind::InvalidCharacter(
                                other.unwrap_or('}'),
                            )))
                        }
                    }
                }
                Some(':') if depth == 0 && self.chars.peek_second() == Some('=') => {
                    // walrus, part of the expression
                    self.bump();
                    self.bump();
                    expr_text.push_str(":=");
                }
                Some(':') if depth == 0 => {
                    self.bump();
                    format_spec = Some(self.lex_fstring_spec(quote, triple)?);
                    break;
                }
                Some(q @ ('\'' | '"')) => {
                    // nested string literal; copy it through verbatim
                    self.bump();
                    expr_text.push(q);
                    loop {
                        match self.bump() {
                            None => {
                                return Err(self.error(TokenizeErrorKind::UnterminatedString))
                            }
                            Some('\\') => {
                                expr_text.push('\\');
                                if let Some(next) = self.bump() {
                                    expr_text.push(next);
                                }
                            }
                            Some(c) if c == q => {
                                expr_text.push(q);
                                break;
                            }
                            Some(c) => expr_text.push(c),
                        }
                    }
                }
                Some(ch) => {
                    self.bump();
                    expr_text.push(ch);
                }
            }
        }

        let field_span = Span::new(field_start, self.pos());
        let tokens = Lexer::nested(&expr_text).lex().map_err(|mut err| {
            // surface the error at the field, not at a snippet-relative spot
            err.span = field_span;
            err
        })?;

        Ok(FStringPart::Field {
            tokens,
            conversion,
            format_spec,
        })
    }

    /// Lex a format spec up to and including the field's closing `}`. Specs
    /// may contain nested `{...}` fields of their own.
    fn lex_fstring_spec(&mut self, quote: char, triple: bool) -> LexResult<Vec<FStringPart>> {
        let mut parts = Vec::new();
        let mut text = String::new();

        loop {
            match self.chars.peek() {
                None => return Err(self.error(TokenizeErrorKind::UnterminatedString)),
                Some('\n') if !triple => {
                    return Err(self.error(TokenizeErrorKind::UnterminatedString))
                }
                Some('}') => {
                    self.bump();
                    if !text.is_empty() {
                        parts.push(FStringPart::Text(text));
                    }
                    return Ok(parts);
                }
                Some('{') => {
                    self.bump();
                    if !text.is_empty() {
                        parts.push(FStringPart::Text(std::mem::take(&mut text)));
                    }
                    parts.push(self.lex_fstring_field(quote, triple)?);
                }
                Some(ch) => {
                    self.bump();
                    text.push(ch);
                }
            }
        }
    }

    // --- operators ---

    fn lex_operator(&mut self) -> LexResult<TokenKind> {
        let Some(ch) = self.bump() else {
            return Err(self.error(TokenizeErrorKind::InvalidCharacter('\0')));
        };

        Ok(match ch {
            '(' => {
                self.nesting += 1;
                TokenKind::LParen
            }
            '[' => {
                self.nesting += 1;
                TokenKind::LBracket
            }
            '{' => {
                self.nesting += 1;
                TokenKind::LBrace
            }
            ')' => {
                self.nesting = self.nesting.saturating_sub(1);
                TokenKind::RParen
            }
            ']' => {
                self.nesting = self.nesting.saturating_sub(1);
                TokenKind::RBracket
            }
            '}' => {
                self.nesting = self.nesting.saturating_sub(1);
                TokenKind::RBrace
            }

            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,

            ':' if self.chars.peek() == Some('=') => {
                self.bump();
                TokenKind::Walrus
            }
            ':' => TokenKind::Colon,

            '.' if self.chars.peek() == Some('.') && self.chars.peek_second() == Some('.') => {
                self.bump();
                self.bump();
                TokenKind::Ellipsis
            }
            '.' => TokenKind::Dot,

            '+' if self.eat_op('=') => TokenKind::PlusEq,
            '+' => TokenKind::Plus,

            '-' if self.eat_op('=') => TokenKind::MinusEq,
            '-' if self.eat_op('>') => TokenKind::Arrow,
            '-' => TokenKind::Minus,

            '*' if self.chars.peek() == Some('*') => {
                self.bump();
                if self.eat_op('=') {
                    TokenKind::DoubleStarEq
                } else {
                    TokenKind::DoubleStar
                }
            }
            '*' if self.eat_op('=') => TokenKind::StarEq,
            '*' => TokenKind::Star,

            '/' if self.chars.peek() == Some('/') => {
                self.bump();
                if self.eat_op('=') {
                    TokenKind::DoubleSlashEq
                } else {
                    TokenKind::DoubleSlash
                }
            }
            '/' if self.eat_op('=') => TokenKind::SlashEq,
            '/' => TokenKind::Slash,

            '%' if self.eat_op('=') => TokenKind::PercentEq,
            '%' => TokenKind::Percent,

            '@' if self.eat_op('=') => TokenKind::AtEq,
            '@' => TokenKind::At,

            '&' if self.eat_op('=') => TokenKind::AmpEq,
            '&' => TokenKind::Amp,

            '|' if self.eat_op('=') => TokenKind::PipeEq,
            '|' => TokenKind::Pipe,

            '^' if self.eat_op('=') => TokenKind::CaretEq,
            '^' => TokenKind::Caret,

            '<' if self.chars.peek() == Some('<') => {
                self.bump();
                if self.eat_op('=') {
                    TokenKind::LShiftEq
                } else {
                    TokenKind::LShift
                }
            }
            '<' if self.eat_op('=') => TokenKind::LtE,
            '<' => TokenKind::Lt,

            '>' if self.chars.peek() == Some('>') => {
                self.bump();
                if self.eat_op('=') {
                    TokenKind::RShiftEq
                } else {
                    TokenKind::RShift
                }
            }
            '>' if self.eat_op('=') => TokenKind::GtE,
            '>' => TokenKind::Gt,

            '=' if self.eat_op('=') => TokenKind::EqEq,
            '=' => TokenKind::Eq,

            '!' if self.eat_op('=') => TokenKind::NotEq,

            other => return Err(self.error(TokenizeErrorKind::InvalidCharacter(other))),
        })
    }

    /// Like `chars.eat` but keeps the column count honest.
    fn eat_op(&mut self, ch: char) -> bool {
        if self.chars.peek() == Some(ch) {
            self.bump();
            true
        } else {
            false
        }
    }

    // --- plumbing ---

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn pos(&self) -> Pos {
        Pos::new(self.line, self.column)
    }

    fn push(&mut self, kind: TokenKind) {
        self.tokens.push(Token {
            kind,
            span: Span::new(self.token_start, self.pos()),
        });
    }

    fn error(&self, kind: TokenizeErrorKind) -> TokenizeError {
        TokenizeError {
            kind,
            span: Span::new(self.token_start, self.pos()),
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// String literal prefix flags (`r"..."`, `b"..."`, `f"..."` and combos).
#[derive(Debug, Clone, Copy, Default)]
struct StrPrefix {
    raw: bool,
    bytes: bool,
    fstring: bool,
}

impl StrPrefix {
    fn parse(word: &str) -> Option<StrPrefix> {
        if word.is_empty() || word.len() > 2 {
            return None;
        }
        let mut prefix = StrPrefix::default();
        for ch in word.chars() {
            match ch {
                'r' | 'R' if !prefix.raw => prefix.raw = true,
                'b' | 'B' if !prefix.bytes && !prefix.fstring => prefix.bytes = true,
                'f' | 'F' if !prefix.fstring && !prefix.bytes => prefix.fstring = true,
                // `u` combines with nothing
                'u' | 'U' if word.len() == 1 => {}
                _ => return None,
            }
        }
        Some(prefix)
    }
}

/// Convert digits of `base` to a decimal string. Python ints are arbitrary
/// precision, so this is schoolbook multiply-and-add over decimal digits.
fn to_decimal(digits: &[u32], base: u32) -> String {
    let mut dec: Vec<u32> = vec![0]; // little-endian decimal digits
    for &d in digits {
        let mut carry = d;
        for slot in &mut dec {
            let v = *slot * base + carry;
            *slot = v % 10;
            carry = v / 10;
        }
        while carry > 0 {
            dec.push(carry % 10);
            carry /= 10;
        }
    }
    while dec.len() > 1 && dec.last() == Some(&0) {
        dec.pop();
    }
    dec.iter()
        .rev()
        .map(|&d| char::from_digit(d, 10).unwrap_or('0'))
        .collect()
}
