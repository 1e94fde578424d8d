//! The expression grammar, from the precedence ladder down to atoms.

use pythia_ast::op::{BoolOp, CmpOp, Operator, UnaryOp};
use pythia_ast::{Comprehension, Constant, Expr, ExprKind, Keyword as KeywordArg};

use super::{check_target, ParseResult, Parser};
use crate::token::{FStringPart, Keyword, Token, TokenKind};

impl Parser {
    /// One or more star-or-plain expressions; a comma makes a tuple. This is
    /// the grammar of expression statements, `return` values and assignment
    /// sides.
    pub(super) fn parse_star_expressions(&mut self) -> ParseResult<Expr> {
        self.parse_comma_list(Self::parse_star_expression)
    }

    /// Like [`Self::parse_star_expressions`] but allowing `:=` in elements,
    /// as in a `match` subject.
    pub(super) fn parse_star_named_expressions(&mut self) -> ParseResult<Expr> {
        self.parse_comma_list(Self::parse_star_named_expression)
    }

    fn parse_comma_list(
        &mut self,
        elem: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let start = self.start();
        let first = elem(self)?;
        if !self.at(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if !self.at_expression_start() {
                break;
            }
            elts.push(elem(self)?);
        }
        Ok(Expr::new(ExprKind::Tuple { elts }, self.span_from(start)))
    }

    /// `*bitwise_or` or a plain expression.
    pub(super) fn parse_star_expression(&mut self) -> ParseResult<Expr> {
        if self.at(&TokenKind::Star) {
            let start = self.start();
            self.bump();
            let value = self.parse_bitor()?;
            Ok(Expr::new(
                ExprKind::Starred {
                    value: Box::new(value),
                },
                self.span_from(start),
            ))
        } else {
            self.parse_expression()
        }
    }

    fn parse_star_named_expression(&mut self) -> ParseResult<Expr> {
        if self.at(&TokenKind::Star) {
            let start = self.start();
            self.bump();
            let value = self.parse_bitor()?;
            Ok(Expr::new(
                ExprKind::Starred {
                    value: Box::new(value),
                },
                self.span_from(start),
            ))
        } else {
            self.parse_namedexpr()
        }
    }

    /// `name := value` or a plain expression. The walrus target must be a
    /// bare name, so two tokens of lookahead decide the reading.
    pub(super) fn parse_namedexpr(&mut self) -> ParseResult<Expr> {
        if matches!(self.peek(), TokenKind::Name(_))
            && matches!(self.peek_nth(1), TokenKind::Walrus)
        {
            let start = self.start();
            let id = self.expect_name()?;
            let target = Expr::new(ExprKind::Name { id }, self.span_from(start));
            self.bump(); // `:=`
            let value = self.parse_expression()?;
            return Ok(Expr::new(
                ExprKind::NamedExpr {
                    target: Box::new(target),
                    value: Box::new(value),
                },
                self.span_from(start),
            ));
        }
        self.parse_expression()
    }

    /// The conditional-expression level: `body if test else orelse`, or a
    /// lambda, or anything below.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        if self.at_kw(Keyword::Lambda) {
            return self.parse_lambda();
        }
        let start = self.start();
        let body = self.parse_or_test()?;
        if !self.eat_kw(Keyword::If) {
            return Ok(body);
        }
        let test = self.parse_or_test()?;
        self.expect_kw(Keyword::Else)?;
        let orelse = self.parse_expression()?;
        Ok(Expr::new(
            ExprKind::IfExp {
                test: Box::new(test),
                body: Box::new(body),
                orelse: Box::new(orelse),
            },
            self.span_from(start),
        ))
    }

    fn parse_lambda(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        self.bump(); // `lambda`
        let args = self.parse_params(false)?;
        self.expect_colon()?;
        let body = self.parse_expression()?;
        Ok(Expr::new(
            ExprKind::Lambda {
                args: Box::new(args),
                body: Box::new(body),
            },
            self.span_from(start),
        ))
    }

    /// An operator run like `a or b or c` becomes one node with all the
    /// values, matching how chains compare and print.
    pub(super) fn parse_or_test(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let first = self.parse_and_test()?;
        if !self.at_kw(Keyword::Or) {
            return Ok(first);
        }
        let mut values = vec![first];
        while self.eat_kw(Keyword::Or) {
            values.push(self.parse_and_test()?);
        }
        Ok(Expr::new(
            ExprKind::BoolOp {
                op: BoolOp::Or,
                values,
            },
            self.span_from(start),
        ))
    }

    fn parse_and_test(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let first = self.parse_not_test()?;
        if !self.at_kw(Keyword::And) {
            return Ok(first);
        }
        let mut values = vec![first];
        while self.eat_kw(Keyword::And) {
            values.push(self.parse_not_test()?);
        }
        Ok(Expr::new(
            ExprKind::BoolOp {
                op: BoolOp::And,
                values,
            },
            self.span_from(start),
        ))
    }

    fn parse_not_test(&mut self) -> ParseResult<Expr> {
        if self.at_kw(Keyword::Not) {
            let start = self.start();
            self.bump();
            let operand = self.parse_not_test()?;
            return Ok(Expr::new(
                ExprKind::UnaryOp {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                },
                self.span_from(start),
            ));
        }
        self.parse_comparison()
    }

    /// `a < b <= c` is one chained node, not a nest of binaries.
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let left = self.parse_bitor()?;
        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        loop {
            let op = match self.peek() {
                TokenKind::Lt => CmpOp::Lt,
                TokenKind::Gt => CmpOp::Gt,
                TokenKind::LtE => CmpOp::LtE,
                TokenKind::GtE => CmpOp::GtE,
                TokenKind::EqEq => CmpOp::Eq,
                TokenKind::NotEq => CmpOp::NotEq,
                TokenKind::Keyword(Keyword::In) => CmpOp::In,
                TokenKind::Keyword(Keyword::Is) => {
                    self.bump();
                    let op = if self.eat_kw(Keyword::Not) {
                        CmpOp::IsNot
                    } else {
                        CmpOp::Is
                    };
                    ops.push(op);
                    comparators.push(self.parse_bitor()?);
                    continue;
                }
                TokenKind::Keyword(Keyword::Not)
                    if matches!(self.peek_nth(1), TokenKind::Keyword(Keyword::In)) =>
                {
                    self.bump();
                    self.bump();
                    ops.push(CmpOp::NotIn);
                    comparators.push(self.parse_bitor()?);
                    continue;
                }
                _ => break,
            };
            self.bump();
            ops.push(op);
            comparators.push(self.parse_bitor()?);
        }
        if ops.is_empty() {
            return Ok(left);
        }
        Ok(Expr::new(
            ExprKind::Compare {
                left: Box::new(left),
                ops,
                comparators,
            },
            self.span_from(start),
        ))
    }

    fn parse_binary_level(
        &mut self,
        ops: &[(TokenKind, Operator)],
        next: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let start = self.start();
        let mut left = next(self)?;
        'outer: loop {
            for (tok, op) in ops {
                if self.eat(tok) {
                    let right = next(self)?;
                    left = Expr::new(
                        ExprKind::BinOp {
                            left: Box::new(left),
                            op: *op,
                            right: Box::new(right),
                        },
                        self.span_from(start),
                    );
                    continue 'outer;
                }
            }
            break;
        }
        Ok(left)
    }

    fn parse_bitor(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(&[(TokenKind::Pipe, Operator::BitOr)], Self::parse_bitxor)
    }

    fn parse_bitxor(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(&[(TokenKind::Caret, Operator::BitXor)], Self::parse_bitand)
    }

    fn parse_bitand(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(&[(TokenKind::Amp, Operator::BitAnd)], Self::parse_shift)
    }

    fn parse_shift(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            &[
                (TokenKind::LShift, Operator::LShift),
                (TokenKind::RShift, Operator::RShift),
            ],
            Self::parse_arith,
        )
    }

    fn parse_arith(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            &[
                (TokenKind::Plus, Operator::Add),
                (TokenKind::Minus, Operator::Sub),
            ],
            Self::parse_term,
        )
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            &[
                (TokenKind::Star, Operator::Mult),
                (TokenKind::Slash, Operator::Div),
                (TokenKind::DoubleSlash, Operator::FloorDiv),
                (TokenKind::Percent, Operator::Mod),
                (TokenKind::At, Operator::MatMult),
            ],
            Self::parse_factor,
        )
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let op = match self.peek() {
            TokenKind::Plus => UnaryOp::UAdd,
            TokenKind::Minus => UnaryOp::USub,
            TokenKind::Tilde => UnaryOp::Invert,
            _ => return self.parse_power(),
        };
        let start = self.start();
        self.bump();
        let operand = self.parse_factor()?;
        Ok(Expr::new(
            ExprKind::UnaryOp {
                op,
                operand: Box::new(operand),
            },
            self.span_from(start),
        ))
    }

    /// `**` binds right and tighter than unary on its left, looser on its
    /// right: `-2 ** -3` is `-(2 ** (-3))`.
    fn parse_power(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let base = self.parse_await_primary()?;
        if !self.eat(&TokenKind::DoubleStar) {
            return Ok(base);
        }
        let exponent = self.parse_factor()?;
        Ok(Expr::new(
            ExprKind::BinOp {
                left: Box::new(base),
                op: Operator::Pow,
                right: Box::new(exponent),
            },
            self.span_from(start),
        ))
    }

    fn parse_await_primary(&mut self) -> ParseResult<Expr> {
        if self.at_kw(Keyword::Await) {
            let start = self.start();
            self.bump();
            let value = self.parse_postfix()?;
            return Ok(Expr::new(
                ExprKind::Await {
                    value: Box::new(value),
                },
                self.span_from(start),
            ));
        }
        self.parse_postfix()
    }

    /// An atom followed by any number of `.attr`, `(...)` and `[...]`
    /// trailers.
    pub(super) fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let mut expr = self.parse_atom()?;
        loop {
            if self.eat(&TokenKind::Dot) {
                let attr = self.expect_name()?;
                expr = Expr::new(
                    ExprKind::Attribute {
                        value: Box::new(expr),
                        attr,
                    },
                    self.span_from(start),
                );
            } else if self.eat(&TokenKind::LParen) {
                let (args, keywords) = self.parse_call_args()?;
                expr = Expr::new(
                    ExprKind::Call {
                        func: Box::new(expr),
                        args,
                        keywords,
                    },
                    self.span_from(start),
                );
            } else if self.eat(&TokenKind::LBracket) {
                let slice = self.parse_subscript_index()?;
                self.expect(&TokenKind::RBracket)?;
                expr = Expr::new(
                    ExprKind::Subscript {
                        value: Box::new(expr),
                        slice: Box::new(slice),
                    },
                    self.span_from(start),
                );
            } else {
                return Ok(expr);
            }
        }
    }

    /// Call arguments, the opening `(` already consumed. Consumes the `)`.
    pub(super) fn parse_call_args(&mut self) -> ParseResult<(Vec<Expr>, Vec<KeywordArg>)> {
        let mut args = Vec::new();
        let mut keywords = Vec::new();
        while !self.at(&TokenKind::RParen) {
            if self.eat(&TokenKind::DoubleStar) {
                let value = self.parse_expression()?;
                keywords.push(KeywordArg { arg: None, value });
            } else if self.at(&TokenKind::Star) {
                let start = self.start();
                self.bump();
                let value = self.parse_expression()?;
                args.push(Expr::new(
                    ExprKind::Starred {
                        value: Box::new(value),
                    },
                    self.span_from(start),
                ));
            } else if matches!(self.peek(), TokenKind::Name(_))
                && matches!(self.peek_nth(1), TokenKind::Eq)
            {
                let arg = self.expect_name()?;
                self.bump(); // `=`
                let value = self.parse_expression()?;
                keywords.push(KeywordArg {
                    arg: Some(arg),
                    value,
                });
            } else {
                let start = self.start();
                let mut value = self.parse_namedexpr()?;
                if self.at_comp_start() {
                    let generators = self.parse_comprehensions()?;
                    value = Expr::new(
                        ExprKind::GeneratorExp {
                            elt: Box::new(value),
                            generators,
                        },
                        self.span_from(start),
                    );
                } else if !keywords.is_empty() {
                    return Err(
                        self.error_msg("positional argument follows keyword argument")
                    );
                }
                args.push(value);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok((args, keywords))
    }

    /// The index expression of `value[...]`: one slice item, or a tuple of
    /// them.
    fn parse_subscript_index(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let first = self.parse_slice_item()?;
        if !self.at(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.at(&TokenKind::RBracket) {
                break;
            }
            elts.push(self.parse_slice_item()?);
        }
        Ok(Expr::new(ExprKind::Tuple { elts }, self.span_from(start)))
    }

    fn parse_slice_item(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        if self.at(&TokenKind::Star) {
            return self.parse_star_expression();
        }

        let lower = if self.at(&TokenKind::Colon) {
            None
        } else {
            Some(self.parse_namedexpr()?)
        };
        if !self.eat(&TokenKind::Colon) {
            // a plain index; lower is present by construction
            return lower.ok_or_else(|| self.error_expected(&["an expression"]));
        }

        let upper = if self.at_slice_boundary() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        let step = if self.eat(&TokenKind::Colon) {
            if self.at_slice_boundary() {
                None
            } else {
                Some(self.parse_expression()?)
            }
        } else {
            None
        };
        Ok(Expr::new(
            ExprKind::Slice {
                lower: lower.map(Box::new),
                upper: upper.map(Box::new),
                step: step.map(Box::new),
            },
            self.span_from(start),
        ))
    }

    fn at_slice_boundary(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Colon | TokenKind::Comma | TokenKind::RBracket
        )
    }

    // --- atoms ---

    fn parse_atom(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let kind = match self.peek() {
            TokenKind::Name(name) => {
                let id = name.clone();
                self.bump();
                ExprKind::Name { id }
            }
            TokenKind::Keyword(Keyword::True) => {
                self.bump();
                ExprKind::Constant {
                    value: Constant::Bool(true),
                }
            }
            TokenKind::Keyword(Keyword::False) => {
                self.bump();
                ExprKind::Constant {
                    value: Constant::Bool(false),
                }
            }
            TokenKind::Keyword(Keyword::None) => {
                self.bump();
                ExprKind::Constant {
                    value: Constant::None,
                }
            }
            TokenKind::Ellipsis => {
                self.bump();
                ExprKind::Constant {
                    value: Constant::Ellipsis,
                }
            }
            TokenKind::Int(digits) => {
                let digits = digits.clone();
                self.bump();
                ExprKind::Constant {
                    value: Constant::Int(digits),
                }
            }
            TokenKind::Float(value) => {
                let value = *value;
                self.bump();
                ExprKind::Constant {
                    value: Constant::Float(value),
                }
            }
            TokenKind::Complex(imag) => {
                let imag = *imag;
                self.bump();
                ExprKind::Constant {
                    value: Constant::Complex { real: 0.0, imag },
                }
            }
            TokenKind::Str(_) | TokenKind::Bytes(_) | TokenKind::FString(_) => {
                return self.parse_string_group()
            }
            TokenKind::LParen => return self.parse_paren_atom(),
            TokenKind::LBracket => return self.parse_list_atom(),
            TokenKind::LBrace => return self.parse_brace_atom(),
            _ => return Err(self.error_expected(&["an expression"])),
        };
        Ok(Expr::new(kind, self.span_from(start)))
    }

    /// A run of adjacent string-ish literals, implicitly concatenated.
    /// Plain strings fold into one constant; any f-string in the run makes
    /// the whole thing a `JoinedStr`; bytes only concatenate with bytes.
    fn parse_string_group(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let mut values: Vec<Expr> = Vec::new();
        let mut bytes: Vec<u8> = Vec::new();
        let mut seen_str = false;
        let mut seen_bytes = false;
        let mut seen_fstring = false;

        loop {
            let span = self.cur_span();
            match self.peek() {
                TokenKind::Str(s) => {
                    let s = s.clone();
                    self.bump();
                    seen_str = true;
                    push_text(&mut values, &s, span);
                }
                TokenKind::Bytes(b) => {
                    let b = b.clone();
                    self.bump();
                    seen_bytes = true;
                    bytes.extend_from_slice(&b);
                }
                TokenKind::FString(parts) => {
                    let parts = parts.clone();
                    self.bump();
                    seen_fstring = true;
                    self.append_fstring_parts(&mut values, parts, span)?;
                }
                _ => break,
            }
        }

        if seen_bytes && (seen_str || seen_fstring) {
            return Err(self.error_msg("cannot mix bytes and string literals"));
        }

        let span = self.span_from(start);
        if seen_bytes {
            return Ok(Expr::new(
                ExprKind::Constant {
                    value: Constant::Bytes(bytes),
                },
                span,
            ));
        }
        if seen_fstring {
            return Ok(Expr::new(ExprKind::JoinedStr { values }, span));
        }
        // a run of plain strings folded into push_text's single constant
        match values.pop() {
            Some(value) if values.is_empty() => Ok(value),
            _ => Ok(Expr::new(
                ExprKind::Constant {
                    value: Constant::Str(String::new()),
                },
                span,
            )),
        }
    }

    fn append_fstring_parts(
        &mut self,
        values: &mut Vec<Expr>,
        parts: Vec<FStringPart>,
        span: pythia_ast::span::Span,
    ) -> ParseResult<()> {
        for part in parts {
            match part {
                FStringPart::Text(text) => push_text(values, &text, span),
                FStringPart::Field {
                    tokens,
                    conversion,
                    format_spec,
                } => {
                    let value = parse_field_tokens(tokens, span)?;
                    let format_spec = match format_spec {
                        None => None,
                        Some(spec_parts) => {
                            let mut spec_values = Vec::new();
                            self.append_fstring_parts(&mut spec_values, spec_parts, span)?;
                            Some(Box::new(Expr::new(
                                ExprKind::JoinedStr {
                                    values: spec_values,
                                },
                                span,
                            )))
                        }
                    };
                    values.push(Expr::new(
                        ExprKind::FormattedValue {
                            value: Box::new(value),
                            conversion,
                            format_spec,
                        },
                        span,
                    ));
                }
            }
        }
        Ok(())
    }

    // --- bracketed atoms ---

    fn parse_paren_atom(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        self.bump(); // `(`

        if self.eat(&TokenKind::RParen) {
            return Ok(Expr::new(
                ExprKind::Tuple { elts: vec![] },
                self.span_from(start),
            ));
        }

        if self.at_kw(Keyword::Yield) {
            let value = self.parse_yield()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(value);
        }

        let first = self.parse_star_named_expression()?;

        if self.at_comp_start() {
            let generators = self.parse_comprehensions()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(Expr::new(
                ExprKind::GeneratorExp {
                    elt: Box::new(first),
                    generators,
                },
                self.span_from(start),
            ));
        }

        if self.at(&TokenKind::Comma) {
            let mut elts = vec![first];
            while self.eat(&TokenKind::Comma) {
                if self.at(&TokenKind::RParen) {
                    break;
                }
                elts.push(self.parse_star_named_expression()?);
            }
            self.expect(&TokenKind::RParen)?;
            return Ok(Expr::new(ExprKind::Tuple { elts }, self.span_from(start)));
        }

        // a parenthesized group; the node keeps its inner span
        self.expect(&TokenKind::RParen)?;
        Ok(first)
    }

    fn parse_list_atom(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        self.bump(); // `[`

        if self.eat(&TokenKind::RBracket) {
            return Ok(Expr::new(
                ExprKind::List { elts: vec![] },
                self.span_from(start),
            ));
        }

        let first = self.parse_star_named_expression()?;

        if self.at_comp_start() {
            let generators = self.parse_comprehensions()?;
            self.expect(&TokenKind::RBracket)?;
            return Ok(Expr::new(
                ExprKind::ListComp {
                    elt: Box::new(first),
                    generators,
                },
                self.span_from(start),
            ));
        }

        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.at(&TokenKind::RBracket) {
                break;
            }
            elts.push(self.parse_star_named_expression()?);
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::new(ExprKind::List { elts }, self.span_from(start)))
    }

    fn parse_brace_atom(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        self.bump(); // `{`

        if self.eat(&TokenKind::RBrace) {
            return Ok(Expr::new(
                ExprKind::Dict {
                    keys: vec![],
                    values: vec![],
                },
                self.span_from(start),
            ));
        }

        if self.eat(&TokenKind::DoubleStar) {
            let value = self.parse_bitor()?;
            return self.parse_dict_rest(start, vec![None], vec![value]);
        }

        let first = self.parse_star_named_expression()?;

        if self.eat(&TokenKind::Colon) {
            let value = self.parse_expression()?;
            if self.at_comp_start() {
                let generators = self.parse_comprehensions()?;
                self.expect(&TokenKind::RBrace)?;
                return Ok(Expr::new(
                    ExprKind::DictComp {
                        key: Box::new(first),
                        value: Box::new(value),
                        generators,
                    },
                    self.span_from(start),
                ));
            }
            return self.parse_dict_rest(start, vec![Some(first)], vec![value]);
        }

        if self.at_comp_start() {
            let generators = self.parse_comprehensions()?;
            self.expect(&TokenKind::RBrace)?;
            return Ok(Expr::new(
                ExprKind::SetComp {
                    elt: Box::new(first),
                    generators,
                },
                self.span_from(start),
            ));
        }

        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.at(&TokenKind::RBrace) {
                break;
            }
            elts.push(self.parse_star_named_expression()?);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::Set { elts }, self.span_from(start)))
    }

    fn parse_dict_rest(
        &mut self,
        start: pythia_ast::span::Pos,
        mut keys: Vec<Option<Expr>>,
        mut values: Vec<Expr>,
    ) -> ParseResult<Expr> {
        while self.eat(&TokenKind::Comma) {
            if self.at(&TokenKind::RBrace) {
                break;
            }
            if self.eat(&TokenKind::DoubleStar) {
                keys.push(None);
                values.push(self.parse_bitor()?);
            } else {
                let key = self.parse_expression()?;
                self.expect(&TokenKind::Colon)?;
                let value = self.parse_expression()?;
                keys.push(Some(key));
                values.push(value);
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Expr::new(
            ExprKind::Dict { keys, values },
            self.span_from(start),
        ))
    }

    // --- comprehensions ---

    pub(super) fn at_comp_start(&self) -> bool {
        self.at_kw(Keyword::For)
            || (self.at_kw(Keyword::Async)
                && matches!(self.peek_nth(1), TokenKind::Keyword(Keyword::For)))
    }

    fn parse_comprehensions(&mut self) -> ParseResult<Vec<Comprehension>> {
        let mut generators = Vec::new();
        loop {
            let is_async = if self.at_kw(Keyword::Async)
                && matches!(self.peek_nth(1), TokenKind::Keyword(Keyword::For))
            {
                self.bump();
                self.bump();
                true
            } else if self.eat_kw(Keyword::For) {
                false
            } else {
                break;
            };

            let target = self.parse_target_list()?;
            self.expect_kw(Keyword::In)?;
            let iter = self.parse_or_test()?;
            let mut ifs = Vec::new();
            while self.eat_kw(Keyword::If) {
                ifs.push(self.parse_or_test()?);
            }
            generators.push(Comprehension {
                target,
                iter,
                ifs,
                is_async,
            });
        }
        if generators.is_empty() {
            return Err(self.error_expected(&["keyword `for`"]));
        }
        Ok(generators)
    }

    // --- assignment and loop targets ---

    /// A target list parses at postfix level, so the `in` of a `for` is
    /// never swallowed by a comparison.
    pub(super) fn parse_target_list(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        let first = self.parse_target()?;
        if !self.at(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat(&TokenKind::Comma) {
            if !self.at_expression_start() {
                break;
            }
            elts.push(self.parse_target()?);
        }
        Ok(Expr::new(ExprKind::Tuple { elts }, self.span_from(start)))
    }

    pub(super) fn parse_target(&mut self) -> ParseResult<Expr> {
        if self.at(&TokenKind::Star) {
            let start = self.start();
            self.bump();
            let value = self.parse_target()?;
            return Ok(Expr::new(
                ExprKind::Starred {
                    value: Box::new(value),
                },
                self.span_from(start),
            ));
        }
        let expr = self.parse_postfix()?;
        check_target(&expr)?;
        Ok(expr)
    }

    // --- yield ---

    pub(super) fn parse_yield(&mut self) -> ParseResult<Expr> {
        let start = self.start();
        self.bump(); // `yield`
        if self.eat_kw(Keyword::From) {
            let value = self.parse_expression()?;
            return Ok(Expr::new(
                ExprKind::YieldFrom {
                    value: Box::new(value),
                },
                self.span_from(start),
            ));
        }
        let value = if self.at_expression_start() {
            Some(Box::new(self.parse_star_expressions()?))
        } else {
            None
        };
        Ok(Expr::new(ExprKind::Yield { value }, self.span_from(start)))
    }

    pub(super) fn at_expression_start(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Name(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Complex(_)
                | TokenKind::Str(_)
                | TokenKind::Bytes(_)
                | TokenKind::FString(_)
                | TokenKind::Ellipsis
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Tilde
                | TokenKind::Star
                | TokenKind::Keyword(
                    Keyword::True
                        | Keyword::False
                        | Keyword::None
                        | Keyword::Not
                        | Keyword::Lambda
                        | Keyword::Await
                        | Keyword::Yield
                )
        )
    }
}

/// Append literal text to a `JoinedStr` value list, folding into the
/// preceding constant so that formatting-variant sources parse identically.
fn push_text(values: &mut Vec<Expr>, text: &str, span: pythia_ast::span::Span) {
    if let Some(Expr {
        kind: ExprKind::Constant {
            value: Constant::Str(prev),
        },
        ..
    }) = values.last_mut()
    {
        prev.push_str(text);
        return;
    }
    values.push(Expr::new(
        ExprKind::Constant {
            value: Constant::Str(text.to_owned()),
        },
        span,
    ));
}

/// Parse the re-tokenized expression of one f-string field.
fn parse_field_tokens(
    tokens: Vec<Token>,
    span: pythia_ast::span::Span,
) -> ParseResult<Expr> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_star_named_expressions();
    let expr = match expr {
        Ok(expr) => expr,
        Err(mut err) => {
            err.span = span;
            return Err(err);
        }
    };
    parser.eat(&TokenKind::Newline);
    if let Err(mut err) = parser.expect_eof() {
        err.span = span;
        return Err(err);
    }
    Ok(expr)
}
