//! The pattern grammar of `match` statements.

use pythia_ast::op::{Operator, UnaryOp};
use pythia_ast::{Constant, Expr, ExprKind, MatchCase, Pattern, PatternKind};

use super::{ParseResult, Parser};
use crate::token::{Keyword, TokenKind};

impl Parser {
    pub(super) fn parse_match_case(&mut self) -> ParseResult<MatchCase> {
        if !self.at_name("case") {
            return Err(self.error_expected(&["`case`"]));
        }
        self.bump();
        let pattern = self.parse_open_pattern()?;
        let guard = if self.eat_kw(Keyword::If) {
            Some(self.parse_namedexpr()?)
        } else {
            None
        };
        let body = self.parse_block()?;
        Ok(MatchCase {
            pattern,
            guard,
            body,
        })
    }

    /// The top-level pattern of a `case`: commas make an open sequence, as
    /// in `case x, *rest:`.
    fn parse_open_pattern(&mut self) -> ParseResult<Pattern> {
        let start = self.start();
        let first = self.parse_maybe_star_pattern()?;
        if !self.at(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut patterns = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.at(&TokenKind::Colon) || self.at_kw(Keyword::If) {
                break;
            }
            patterns.push(self.parse_maybe_star_pattern()?);
        }
        Ok(Pattern::new(
            PatternKind::MatchSequence { patterns },
            self.span_from(start),
        ))
    }

    fn parse_maybe_star_pattern(&mut self) -> ParseResult<Pattern> {
        if self.at(&TokenKind::Star) {
            let start = self.start();
            self.bump();
            let name = self.expect_name()?;
            let name = if name == "_" { None } else { Some(name) };
            return Ok(Pattern::new(
                PatternKind::MatchStar { name },
                self.span_from(start),
            ));
        }
        self.parse_as_pattern()
    }

    fn parse_as_pattern(&mut self) -> ParseResult<Pattern> {
        let start = self.start();
        let pattern = self.parse_or_pattern()?;
        if !self.eat_kw(Keyword::As) {
            return Ok(pattern);
        }
        let name = self.expect_name()?;
        if name == "_" {
            return Err(self.error_msg("cannot use `_` as a capture name"));
        }
        Ok(Pattern::new(
            PatternKind::MatchAs {
                pattern: Some(Box::new(pattern)),
                name: Some(name),
            },
            self.span_from(start),
        ))
    }

    fn parse_or_pattern(&mut self) -> ParseResult<Pattern> {
        let start = self.start();
        let first = self.parse_closed_pattern()?;
        if !self.at(&TokenKind::Pipe) {
            return Ok(first);
        }
        let mut patterns = vec![first];
        while self.eat(&TokenKind::Pipe) {
            patterns.push(self.parse_closed_pattern()?);
        }
        Ok(Pattern::new(
            PatternKind::MatchOr { patterns },
            self.span_from(start),
        ))
    }

    fn parse_closed_pattern(&mut self) -> ParseResult<Pattern> {
        let start = self.start();
        match self.peek() {
            TokenKind::Minus
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Complex(_) => {
                let value = self.parse_literal_number()?;
                Ok(Pattern::new(
                    PatternKind::MatchValue {
                        value: Box::new(value),
                    },
                    self.span_from(start),
                ))
            }

            TokenKind::Str(_) => {
                let mut text = String::new();
                while let TokenKind::Str(s) = self.peek() {
                    text.push_str(s);
                    self.bump();
                }
                let value = Expr::new(
                    ExprKind::Constant {
                        value: Constant::Str(text),
                    },
                    self.span_from(start),
                );
                Ok(Pattern::new(
                    PatternKind::MatchValue {
                        value: Box::new(value),
                    },
                    self.span_from(start),
                ))
            }

            TokenKind::Bytes(_) => {
                let mut bytes = Vec::new();
                while let TokenKind::Bytes(b) = self.peek() {
                    bytes.extend_from_slice(b);
                    self.bump();
                }
                let value = Expr::new(
                    ExprKind::Constant {
                        value: Constant::Bytes(bytes),
                    },
                    self.span_from(start),
                );
                Ok(Pattern::new(
                    PatternKind::MatchValue {
                        value: Box::new(value),
                    },
                    self.span_from(start),
                ))
            }

            TokenKind::Keyword(Keyword::None) => {
                self.bump();
                Ok(Pattern::new(
                    PatternKind::MatchSingleton {
                        value: Constant::None,
                    },
                    self.span_from(start),
                ))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.bump();
                Ok(Pattern::new(
                    PatternKind::MatchSingleton {
                        value: Constant::Bool(true),
                    },
                    self.span_from(start),
                ))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.bump();
                Ok(Pattern::new(
                    PatternKind::MatchSingleton {
                        value: Constant::Bool(false),
                    },
                    self.span_from(start),
                ))
            }

            TokenKind::Name(_) => self.parse_name_pattern(),

            TokenKind::LParen => {
                self.bump();
                if self.eat(&TokenKind::RParen) {
                    return Ok(Pattern::new(
                        PatternKind::MatchSequence { patterns: vec![] },
                        self.span_from(start),
                    ));
                }
                let first = self.parse_maybe_star_pattern()?;
                if self.at(&TokenKind::Comma) {
                    let mut patterns = vec![first];
                    while self.eat(&TokenKind::Comma) {
                        if self.at(&TokenKind::RParen) {
                            break;
                        }
                        patterns.push(self.parse_maybe_star_pattern()?);
                    }
                    self.expect(&TokenKind::RParen)?;
                    return Ok(Pattern::new(
                        PatternKind::MatchSequence { patterns },
                        self.span_from(start),
                    ));
                }
                self.expect(&TokenKind::RParen)?;
                Ok(first)
            }

            TokenKind::LBracket => {
                self.bump();
                let mut patterns = Vec::new();
                while !self.at(&TokenKind::RBracket) {
                    patterns.push(self.parse_maybe_star_pattern()?);
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RBracket)?;
                Ok(Pattern::new(
                    PatternKind::MatchSequence { patterns },
                    self.span_from(start),
                ))
            }

            TokenKind::LBrace => self.parse_mapping_pattern(),

            _ => Err(self.error_expected(&["a pattern"])),
        }
    }

    /// A bare name is a capture, a dotted name is a value comparison, and
    /// either followed by `(` opens a class pattern. The bare `_` is the
    /// wildcard.
    fn parse_name_pattern(&mut self) -> ParseResult<Pattern> {
        let start = self.start();
        let id = self.expect_name()?;

        if id == "_" && !self.at(&TokenKind::Dot) && !self.at(&TokenKind::LParen) {
            return Ok(Pattern::new(
                PatternKind::MatchAs {
                    pattern: None,
                    name: None,
                },
                self.span_from(start),
            ));
        }

        let mut dotted = false;
        let mut value = Expr::new(ExprKind::Name { id: id.clone() }, self.span_from(start));
        while self.eat(&TokenKind::Dot) {
            dotted = true;
            let attr = self.expect_name()?;
            value = Expr::new(
                ExprKind::Attribute {
                    value: Box::new(value),
                    attr,
                },
                self.span_from(start),
            );
        }

        if self.eat(&TokenKind::LParen) {
            return self.parse_class_pattern(start, value);
        }

        if dotted {
            return Ok(Pattern::new(
                PatternKind::MatchValue {
                    value: Box::new(value),
                },
                self.span_from(start),
            ));
        }

        Ok(Pattern::new(
            PatternKind::MatchAs {
                pattern: None,
                name: Some(id),
            },
            self.span_from(start),
        ))
    }

    /// `Cls(p1, p2, attr=p3)`, the `(` already consumed.
    fn parse_class_pattern(
        &mut self,
        start: pythia_ast::span::Pos,
        cls: Expr,
    ) -> ParseResult<Pattern> {
        let mut patterns = Vec::new();
        let mut kwd_attrs = Vec::new();
        let mut kwd_patterns = Vec::new();
        while !self.at(&TokenKind::RParen) {
            if matches!(self.peek(), TokenKind::Name(_))
                && matches!(self.peek_nth(1), TokenKind::Eq)
            {
                let attr = self.expect_name()?;
                self.bump(); // `=`
                kwd_attrs.push(attr);
                kwd_patterns.push(self.parse_as_pattern()?);
            } else {
                if !kwd_attrs.is_empty() {
                    return Err(
                        self.error_msg("positional pattern follows keyword pattern")
                    );
                }
                patterns.push(self.parse_as_pattern()?);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(Pattern::new(
            PatternKind::MatchClass {
                cls: Box::new(cls),
                patterns,
                kwd_attrs,
                kwd_patterns,
            },
            self.span_from(start),
        ))
    }

    fn parse_mapping_pattern(&mut self) -> ParseResult<Pattern> {
        let start = self.start();
        self.bump(); // `{`
        let mut keys = Vec::new();
        let mut patterns = Vec::new();
        let mut rest = None;
        while !self.at(&TokenKind::RBrace) {
            if self.eat(&TokenKind::DoubleStar) {
                if rest.is_some() {
                    return Err(self.error_msg("only one `**` capture is allowed"));
                }
                rest = Some(self.expect_name()?);
            } else {
                keys.push(self.parse_mapping_key()?);
                self.expect(&TokenKind::Colon)?;
                patterns.push(self.parse_as_pattern()?);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Pattern::new(
            PatternKind::MatchMapping {
                keys,
                patterns,
                rest,
            },
            self.span_from(start),
        ))
    }

    /// Mapping keys are restricted to literals and dotted names.
    fn parse_mapping_key(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        match self.peek() {
            TokenKind::Minus
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Complex(_) => self.parse_literal_number(),

            TokenKind::Str(s) => {
                let s = s.clone();
                self.bump();
                Ok(Expr::new(
                    ExprKind::Constant {
                        value: Constant::Str(s),
                    },
                    self.span_from(start),
                ))
            }
            TokenKind::Bytes(b) => {
                let b = b.clone();
                self.bump();
                Ok(Expr::new(
                    ExprKind::Constant {
                        value: Constant::Bytes(b),
                    },
                    self.span_from(start),
                ))
            }
            TokenKind::Keyword(Keyword::None) => {
                self.bump();
                Ok(Expr::new(
                    ExprKind::Constant {
                        value: Constant::None,
                    },
                    self.span_from(start),
                ))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.bump();
                Ok(Expr::new(
                    ExprKind::Constant {
                        value: Constant::Bool(true),
                    },
                    self.span_from(start),
                ))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.bump();
                Ok(Expr::new(
                    ExprKind::Constant {
                        value: Constant::Bool(false),
                    },
                    self.span_from(start),
                ))
            }
            TokenKind::Name(_) => {
                let id = self.expect_name()?;
                let mut value =
                    Expr::new(ExprKind::Name { id }, self.span_from(start));
                if !self.at(&TokenKind::Dot) {
                    return Err(self.error_msg(
                        "mapping pattern keys must be literals or dotted names",
                    ));
                }
                while self.eat(&TokenKind::Dot) {
                    let attr = self.expect_name()?;
                    value = Expr::new(
                        ExprKind::Attribute {
                            value: Box::new(value),
                            attr,
                        },
                        self.span_from(start),
                    );
                }
                Ok(value)
            }
            _ => Err(self.error_expected(&["a literal", "a dotted name"])),
        }
    }

    /// A literal number with an optional leading minus and an optional
    /// `+ imag` / `- imag` complex tail, kept as the expression nodes the
    /// source spells out.
    fn parse_literal_number(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let left = self.parse_signed_number()?;

        let op = match self.peek() {
            TokenKind::Plus => Operator::Add,
            TokenKind::Minus => Operator::Sub,
            _ => return Ok(left),
        };
        if !matches!(self.peek_nth(1), TokenKind::Complex(_)) {
            return Ok(left);
        }
        self.bump();
        let imag_start = self.start();
        let imag = match self.peek() {
            TokenKind::Complex(imag) => *imag,
            _ => unreachable!("checked above"),
        };
        self.bump();
        let right = Expr::new(
            ExprKind::Constant {
                value: Constant::Complex { real: 0.0, imag },
            },
            self.span_from(imag_start),
        );
        Ok(Expr::new(
            ExprKind::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            self.span_from(start),
        ))
    }

    fn parse_signed_number(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        if self.eat(&TokenKind::Minus) {
            let operand = self.parse_number_constant()?;
            return Ok(Expr::new(
                ExprKind::UnaryOp {
                    op: UnaryOp::USub,
                    operand: Box::new(operand),
                },
                self.span_from(start),
            ));
        }
        self.parse_number_constant()
    }

    fn parse_number_constant(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let value = match self.peek() {
            TokenKind::Int(digits) => Constant::Int(digits.clone()),
            TokenKind::Float(value) => Constant::Float(*value),
            TokenKind::Complex(imag) => Constant::Complex {
                real: 0.0,
                imag: *imag,
            },
            _ => return Err(self.error_expected(&["number"])),
        };
        self.bump();
        Ok(Expr::new(
            ExprKind::Constant { value },
            self.span_from(start),
        ))
    }
}
