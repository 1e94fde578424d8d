mod expr;
mod pattern;
mod stmt;


use pythia_ast::span::{Pos, Span};
use pythia_ast::{Expr, Mod, Stmt};

use crate::error::ParseError;
use crate::token::{Keyword, Token, TokenKind};

pub type ParseResult<T> = Result<T, ParseError>;

/// A recursive-descent parser over a materialized token sequence.
///
/// The cursor never advances past the trailing `Eof`, so lookahead is safe
/// at any depth. Soft keywords are disambiguated by checkpointing the
/// cursor, attempting the keyword reading and rewinding if it fails.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| &t.kind),
            Some(TokenKind::Eof)
        ));
        Self { tokens, pos: 0 }
    }

    // --- entry points ---

    pub fn parse_module(mut self) -> ParseResult<Mod> {
        let body = self.parse_statements_until_eof()?;
        Ok(Mod::Module { body })
    }

    pub fn parse_interactive(mut self) -> ParseResult<Mod> {
        let body = self.parse_statements_until_eof()?;
        Ok(Mod::Interactive { body })
    }

    /// Parse a single expression, as fed to `eval`. A bare comma-separated
    /// list is a tuple.
    pub fn parse_expression_root(mut self) -> ParseResult<Mod> {
        let body = self.parse_star_expressions()?;
        self.eat(&TokenKind::Newline);
        self.expect_eof()?;
        Ok(Mod::Expression {
            body: Box::new(body),
        })
    }

    /// Parse a `(int, str) -> bool` signature, as written in `.pyi`-style
    /// type comments.
    pub fn parse_function_type_root(mut self) -> ParseResult<Mod> {
        self.expect(&TokenKind::LParen)?;
        let mut arg_types = Vec::new();
        while !self.at(&TokenKind::RParen) {
            arg_types.push(self.parse_star_expression()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        self.expect(&TokenKind::Arrow)?;
        let returns = self.parse_expression()?;
        self.eat(&TokenKind::Newline);
        self.expect_eof()?;
        Ok(Mod::FunctionType {
            arg_types,
            returns: Box::new(returns),
        })
    }

    fn parse_statements_until_eof(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut body = Vec::new();
        while !self.at(&TokenKind::Eof) {
            self.parse_statement(&mut body)?;
        }
        Ok(body)
    }

    // --- cursor ---

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn peek_nth(&self, n: usize) -> &TokenKind {
        let i = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[i].kind
    }

    fn bump(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn at_kw(&self, kw: Keyword) -> bool {
        matches!(self.peek(), TokenKind::Keyword(k) if *k == kw)
    }

    fn at_name(&self, name: &str) -> bool {
        matches!(self.peek(), TokenKind::Name(n) if n == name)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_kw(&mut self, kw: Keyword) -> bool {
        if self.at_kw(kw) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn checkpoint(&self) -> usize {
        self.pos
    }

    fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    // --- spans ---

    fn start(&self) -> Pos {
        self.tokens[self.pos].span.start
    }

    fn cur_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    /// The end of the last consumed *content* token. Skips back over layout
    /// tokens so that a block statement ends at its last real token, not at
    /// the DEDENT that closed it.
    fn prev_end(&self) -> Pos {
        let mut i = self.pos;
        while i > 0 {
            i -= 1;
            match self.tokens[i].kind {
                TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent => {}
                _ => return self.tokens[i].span.end,
            }
        }
        self.tokens[0].span.start
    }

    /// The span from `start` up to the end of the last consumed token.
    fn span_from(&self, start: Pos) -> Span {
        Span::new(start, self.prev_end())
    }

    // --- expectations ---

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error_expected(&[&kind.token_name()]))
        }
    }

    fn expect_kw(&mut self, kw: Keyword) -> ParseResult<()> {
        if self.eat_kw(kw) {
            Ok(())
        } else {
            Err(self.error_expected(&[&format!("keyword `{}`", kw.as_str())]))
        }
    }

    fn expect_name(&mut self) -> ParseResult<String> {
        match self.peek() {
            TokenKind::Name(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(self.error_expected(&["name"])),
        }
    }

    fn expect_colon(&mut self) -> ParseResult<()> {
        if self.eat(&TokenKind::Colon) {
            Ok(())
        } else {
            let mut err = self.error_expected(&["`:`"]);
            err.suggestion = Some("missing `:`".into());
            Err(err)
        }
    }

    fn expect_newline(&mut self) -> ParseResult<()> {
        if self.eat(&TokenKind::Newline) {
            Ok(())
        } else {
            Err(self.error_expected(&["end of line"]))
        }
    }

    fn expect_eof(&mut self) -> ParseResult<()> {
        if self.at(&TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.error_expected(&["end of file"]))
        }
    }

    // --- diagnostics ---

    fn error_expected(&self, expected: &[&str]) -> ParseError {
        let found = self.peek().token_name();
        ParseError {
            message: format!("expected {}, found {found}", expected.join(" or ")),
            expected: expected.iter().map(|s| (*s).to_owned()).collect(),
            found,
            span: self.cur_span(),
            suggestion: None,
        }
    }

    fn error_msg(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            expected: Vec::new(),
            found: self.peek().token_name(),
            span: self.cur_span(),
            suggestion: None,
        }
    }
}

/// Targets of assignments, `for` loops and comprehensions must be
/// assignable expressions.
fn check_target(expr: &Expr) -> ParseResult<()> {
    use pythia_ast::ExprKind::*;
    match &expr.kind {
        Name { .. } | Attribute { .. } | Subscript { .. } => Ok(()),
        Starred { value } => check_target(value),
        List { elts } | Tuple { elts } => {
            for elt in elts {
                check_target(elt)?;
            }
            Ok(())
        }
        _ => Err(ParseError {
            message: "cannot assign to this expression".into(),
            expected: Vec::new(),
            found: "expression".into(),
            span: expr.span,
            suggestion: None,
        }),
    }
}
