//! Statement dispatch, suites and definitions.

use pythia_ast::op::Operator;
use pythia_ast::span::Pos;
use pythia_ast::{
    Alias, Arg, Arguments, ExceptHandler, ExprKind, Stmt, StmtKind, TypeParam, WithItem,
};

use super::{check_target, ParseResult, Parser};
use crate::token::{Keyword, TokenKind};

impl Parser {
    pub(super) fn parse_statement(&mut self, out: &mut Vec<Stmt>) -> ParseResult<()> {
        match self.peek() {
            TokenKind::Keyword(Keyword::If) => {
                let stmt = self.parse_if()?;
                out.push(stmt);
            }
            TokenKind::Keyword(Keyword::While) => {
                let stmt = self.parse_while()?;
                out.push(stmt);
            }
            TokenKind::Keyword(Keyword::For) => {
                let start = self.start();
                let stmt = self.parse_for(start, false)?;
                out.push(stmt);
            }
            TokenKind::Keyword(Keyword::Try) => {
                let stmt = self.parse_try()?;
                out.push(stmt);
            }
            TokenKind::Keyword(Keyword::With) => {
                let start = self.start();
                let stmt = self.parse_with(start, false)?;
                out.push(stmt);
            }
            TokenKind::Keyword(Keyword::Def) => {
                let start = self.start();
                let stmt = self.parse_def(start, Vec::new(), false)?;
                out.push(stmt);
            }
            TokenKind::Keyword(Keyword::Class) => {
                let start = self.start();
                let stmt = self.parse_class(start, Vec::new())?;
                out.push(stmt);
            }
            TokenKind::Keyword(Keyword::Async) => {
                let stmt = self.parse_async()?;
                out.push(stmt);
            }
            TokenKind::At => {
                let stmt = self.parse_decorated()?;
                out.push(stmt);
            }
            TokenKind::Name(name) if name == "match" => {
                return self.parse_match_or_simple_line(out);
            }
            _ => return self.parse_simple_line(out),
        }
        Ok(())
    }

    /// A suite: either an indented block after `:` NEWLINE, or simple
    /// statements on the same line.
    pub(super) fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect_colon()?;
        let mut body = Vec::new();
        if self.eat(&TokenKind::Newline) {
            if !self.eat(&TokenKind::Indent) {
                return Err(self.error_msg("expected an indented block"));
            }
            while !self.at(&TokenKind::Dedent) && !self.at(&TokenKind::Eof) {
                self.parse_statement(&mut body)?;
            }
            self.expect(&TokenKind::Dedent)?;
        } else {
            self.parse_simple_line(&mut body)?;
        }
        Ok(body)
    }

    // --- compound statements ---

    /// Also parses `elif` arms, which nest as a single `If` in the parent's
    /// else branch.
    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let start = self.start();
        self.bump(); // `if` or `elif`
        let test = self.parse_namedexpr()?;
        let body = self.parse_block()?;
        let orelse = if self.at_kw(Keyword::Elif) {
            vec![self.parse_if()?]
        } else if self.eat_kw(Keyword::Else) {
            self.parse_block()?
        } else {
            Vec::new()
        };
        Ok(Stmt::new(
            StmtKind::If {
                test: Box::new(test),
                body,
                orelse,
            },
            self.span_from(start),
        ))
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let start = self.start();
        self.bump();
        let test = self.parse_namedexpr()?;
        let body = self.parse_block()?;
        let orelse = if self.eat_kw(Keyword::Else) {
            self.parse_block()?
        } else {
            Vec::new()
        };
        Ok(Stmt::new(
            StmtKind::While {
                test: Box::new(test),
                body,
                orelse,
            },
            self.span_from(start),
        ))
    }

    fn parse_for(&mut self, start: Pos, is_async: bool) -> ParseResult<Stmt> {
        self.bump(); // `for`
        let target = self.parse_target_list()?;
        self.expect_kw(Keyword::In)?;
        let iter = self.parse_star_expressions()?;
        let body = self.parse_block()?;
        let orelse = if self.eat_kw(Keyword::Else) {
            self.parse_block()?
        } else {
            Vec::new()
        };
        let target = Box::new(target);
        let iter = Box::new(iter);
        let kind = if is_async {
            StmtKind::AsyncFor {
                target,
                iter,
                body,
                orelse,
            }
        } else {
            StmtKind::For {
                target,
                iter,
                body,
                orelse,
            }
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    fn parse_with(&mut self, start: Pos, is_async: bool) -> ParseResult<Stmt> {
        self.bump(); // `with`
        let items = self.parse_with_items()?;
        let body = self.parse_block()?;
        let kind = if is_async {
            StmtKind::AsyncWith { items, body }
        } else {
            StmtKind::With { items, body }
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    fn parse_with_items(&mut self) -> ParseResult<Vec<WithItem>> {
        // `with (a as x, b as y):` parenthesizes the item list itself, which
        // is only distinguishable from a tuple context manager by reading
        // ahead; try that form first and rewind if it does not hold up
        if self.at(&TokenKind::LParen) {
            let checkpoint = self.checkpoint();
            match self.parse_paren_with_items() {
                Ok(items) => return Ok(items),
                Err(_) => self.rewind(checkpoint),
            }
        }

        let mut items = Vec::new();
        loop {
            items.push(self.parse_with_item()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    fn parse_paren_with_items(&mut self) -> ParseResult<Vec<WithItem>> {
        self.bump(); // `(`
        let mut items = Vec::new();
        let mut committed = false;
        loop {
            let item = self.parse_with_item()?;
            committed |= item.optional_vars.is_some();
            items.push(item);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            if self.at(&TokenKind::RParen) {
                // trailing comma rules out the tuple reading
                committed = true;
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        if !committed || !self.at(&TokenKind::Colon) {
            // without `as` anywhere this is a parenthesized expression
            return Err(self.error_expected(&["`:`"]));
        }
        Ok(items)
    }

    fn parse_with_item(&mut self) -> ParseResult<WithItem> {
        let context_expr = self.parse_expression()?;
        let optional_vars = if self.eat_kw(Keyword::As) {
            Some(self.parse_target()?)
        } else {
            None
        };
        Ok(WithItem {
            context_expr,
            optional_vars,
        })
    }

    fn parse_try(&mut self) -> ParseResult<Stmt> {
        let start = self.start();
        self.bump(); // `try`
        let body = self.parse_block()?;

        let mut handlers = Vec::new();
        let mut star_handlers = None;
        while self.at_kw(Keyword::Except) {
            self.bump();
            let star = self.eat(&TokenKind::Star);
            match star_handlers {
                None => star_handlers = Some(star),
                Some(prev) if prev != star => {
                    return Err(self.error_msg("cannot mix `except` and `except*` handlers"))
                }
                Some(_) => {}
            }
            let ty = if self.at(&TokenKind::Colon) {
                if star {
                    return Err(self.error_msg("`except*` requires an exception type"));
                }
                None
            } else {
                Some(self.parse_expression()?)
            };
            let name = if self.eat_kw(Keyword::As) {
                Some(self.expect_name()?)
            } else {
                None
            };
            let body = self.parse_block()?;
            handlers.push(ExceptHandler { ty, name, body });
        }

        let orelse = if self.eat_kw(Keyword::Else) {
            self.parse_block()?
        } else {
            Vec::new()
        };
        let finalbody = if self.eat_kw(Keyword::Finally) {
            self.parse_block()?
        } else {
            Vec::new()
        };

        if handlers.is_empty() && finalbody.is_empty() {
            return Err(self.error_expected(&["keyword `except`", "keyword `finally`"]));
        }
        if !orelse.is_empty() && handlers.is_empty() {
            return Err(self.error_msg("`else` requires at least one `except` handler"));
        }

        let kind = if star_handlers == Some(true) {
            StmtKind::TryStar {
                body,
                handlers,
                orelse,
                finalbody,
            }
        } else {
            StmtKind::Try {
                body,
                handlers,
                orelse,
                finalbody,
            }
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    fn parse_async(&mut self) -> ParseResult<Stmt> {
        let start = self.start();
        self.bump(); // `async`
        match self.peek() {
            TokenKind::Keyword(Keyword::Def) => self.parse_def(start, Vec::new(), true),
            TokenKind::Keyword(Keyword::For) => self.parse_for(start, true),
            TokenKind::Keyword(Keyword::With) => self.parse_with(start, true),
            _ => Err(self.error_expected(&[
                "keyword `def`",
                "keyword `for`",
                "keyword `with`",
            ])),
        }
    }

    fn parse_decorated(&mut self) -> ParseResult<Stmt> {
        let start = self.start();
        let mut decorator_list = Vec::new();
        while self.eat(&TokenKind::At) {
            decorator_list.push(self.parse_namedexpr()?);
            self.expect_newline()?;
        }
        match self.peek() {
            TokenKind::Keyword(Keyword::Def) => self.parse_def(start, decorator_list, false),
            TokenKind::Keyword(Keyword::Class) => self.parse_class(start, decorator_list),
            TokenKind::Keyword(Keyword::Async)
                if matches!(self.peek_nth(1), TokenKind::Keyword(Keyword::Def)) =>
            {
                self.bump();
                self.parse_def(start, decorator_list, true)
            }
            _ => Err(self.error_expected(&["keyword `def`", "keyword `class`"])),
        }
    }

    fn parse_def(
        &mut self,
        start: Pos,
        decorator_list: Vec<pythia_ast::Expr>,
        is_async: bool,
    ) -> ParseResult<Stmt> {
        self.bump(); // `def`
        let name = self.expect_name()?;
        let type_params = self.parse_type_params()?;
        self.expect(&TokenKind::LParen)?;
        let args = self.parse_params(true)?;
        self.expect(&TokenKind::RParen)?;
        let returns = if self.eat(&TokenKind::Arrow) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        let body = self.parse_block()?;

        let args = Box::new(args);
        let kind = if is_async {
            StmtKind::AsyncFunctionDef {
                name,
                type_params,
                args,
                body,
                decorator_list,
                returns,
            }
        } else {
            StmtKind::FunctionDef {
                name,
                type_params,
                args,
                body,
                decorator_list,
                returns,
            }
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    fn parse_class(
        &mut self,
        start: Pos,
        decorator_list: Vec<pythia_ast::Expr>,
    ) -> ParseResult<Stmt> {
        self.bump(); // `class`
        let name = self.expect_name()?;
        let type_params = self.parse_type_params()?;
        let (bases, keywords) = if self.eat(&TokenKind::LParen) {
            self.parse_call_args()?
        } else {
            (Vec::new(), Vec::new())
        };
        let body = self.parse_block()?;
        Ok(Stmt::new(
            StmtKind::ClassDef {
                name,
                type_params,
                bases,
                keywords,
                body,
                decorator_list,
            },
            self.span_from(start),
        ))
    }

    /// The full parameter grammar: positional-only parameters before `/`,
    /// `*args` or a bare `*` opening the keyword-only section, `**kwargs`
    /// last. Annotations are rejected in lambda parameter lists.
    pub(super) fn parse_params(&mut self, allow_annotations: bool) -> ParseResult<Arguments> {
        let mut args = Arguments::default();
        let mut keyword_only = false;
        loop {
            match self.peek() {
                TokenKind::Slash => {
                    if args.args.is_empty() || !args.posonlyargs.is_empty() || keyword_only {
                        return Err(self.error_msg("unexpected `/` in parameter list"));
                    }
                    self.bump();
                    args.posonlyargs = std::mem::take(&mut args.args);
                }
                TokenKind::Star => {
                    if keyword_only {
                        return Err(
                            self.error_msg("only one `*` is allowed in a parameter list")
                        );
                    }
                    self.bump();
                    keyword_only = true;
                    if matches!(self.peek(), TokenKind::Name(_)) {
                        args.vararg = Some(self.parse_param(allow_annotations)?);
                    }
                }
                TokenKind::DoubleStar => {
                    self.bump();
                    args.kwarg = Some(self.parse_param(allow_annotations)?);
                    self.eat(&TokenKind::Comma);
                    break;
                }
                TokenKind::Name(_) => {
                    let param = self.parse_param(allow_annotations)?;
                    let default = if self.eat(&TokenKind::Eq) {
                        Some(self.parse_expression()?)
                    } else {
                        None
                    };
                    if keyword_only {
                        args.kwonlyargs.push(param);
                        args.kw_defaults.push(default);
                    } else {
                        match default {
                            Some(default) => args.defaults.push(default),
                            None if !args.defaults.is_empty() => {
                                return Err(self.error_msg(
                                    "parameter without a default follows parameter with a default",
                                ));
                            }
                            None => {}
                        }
                        args.args.push(param);
                    }
                }
                _ => break,
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if keyword_only && args.vararg.is_none() && args.kwonlyargs.is_empty() {
            return Err(self.error_msg("named arguments must follow bare `*`"));
        }
        Ok(args)
    }

    fn parse_param(&mut self, allow_annotations: bool) -> ParseResult<Arg> {
        let arg = self.expect_name()?;
        let annotation = if allow_annotations && self.eat(&TokenKind::Colon) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(Arg { arg, annotation })
    }

    /// A `[T, U: bound]` type-parameter list, empty when absent.
    fn parse_type_params(&mut self) -> ParseResult<Vec<TypeParam>> {
        if !self.eat(&TokenKind::LBracket) {
            return Ok(Vec::new());
        }
        let mut params = Vec::new();
        while !self.at(&TokenKind::RBracket) {
            let name = self.expect_name()?;
            let bound = if self.eat(&TokenKind::Colon) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            params.push(TypeParam { name, bound });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;
        if params.is_empty() {
            return Err(self.error_expected(&["name"]));
        }
        Ok(params)
    }

    /// `match` is a soft keyword: commit to the statement reading only when
    /// a subject expression, `:` and a line break all follow; otherwise
    /// rewind and read the line as an ordinary statement.
    fn parse_match_or_simple_line(&mut self, out: &mut Vec<Stmt>) -> ParseResult<()> {
        let start = self.start();
        let checkpoint = self.checkpoint();
        self.bump(); // `match`

        let subject = match self.parse_star_named_expressions() {
            Ok(subject)
                if self.at(&TokenKind::Colon)
                    && matches!(self.peek_nth(1), TokenKind::Newline) =>
            {
                subject
            }
            _ => {
                self.rewind(checkpoint);
                return self.parse_simple_line(out);
            }
        };

        self.expect_colon()?;
        self.expect_newline()?;
        if !self.eat(&TokenKind::Indent) {
            return Err(self.error_msg("expected an indented block"));
        }
        let mut cases = Vec::new();
        while !self.at(&TokenKind::Dedent) && !self.at(&TokenKind::Eof) {
            cases.push(self.parse_match_case()?);
        }
        self.expect(&TokenKind::Dedent)?;
        if cases.is_empty() {
            return Err(self.error_expected(&["`case`"]));
        }

        out.push(Stmt::new(
            StmtKind::Match {
                subject: Box::new(subject),
                cases,
            },
            self.span_from(start),
        ));
        Ok(())
    }

    // --- simple statements ---

    fn parse_simple_line(&mut self, out: &mut Vec<Stmt>) -> ParseResult<()> {
        loop {
            out.push(self.parse_simple_stmt()?);
            if !self.eat(&TokenKind::Semicolon) {
                break;
            }
            if self.at(&TokenKind::Newline) || self.at(&TokenKind::Eof) {
                break;
            }
        }
        self.expect_newline()
    }

    fn parse_simple_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.start();
        let kind = match self.peek() {
            TokenKind::Keyword(Keyword::Pass) => {
                self.bump();
                StmtKind::Pass
            }
            TokenKind::Keyword(Keyword::Break) => {
                self.bump();
                StmtKind::Break
            }
            TokenKind::Keyword(Keyword::Continue) => {
                self.bump();
                StmtKind::Continue
            }
            TokenKind::Keyword(Keyword::Return) => {
                self.bump();
                let value = if self.at_expression_start() {
                    Some(Box::new(self.parse_star_expressions()?))
                } else {
                    None
                };
                StmtKind::Return { value }
            }
            TokenKind::Keyword(Keyword::Raise) => {
                self.bump();
                let exc = if self.at_expression_start() {
                    Some(Box::new(self.parse_expression()?))
                } else {
                    None
                };
                let cause = if exc.is_some() && self.eat_kw(Keyword::From) {
                    Some(Box::new(self.parse_expression()?))
                } else {
                    None
                };
                StmtKind::Raise { exc, cause }
            }
            TokenKind::Keyword(Keyword::Del) => {
                self.bump();
                let mut targets = vec![self.parse_del_target()?];
                while self.eat(&TokenKind::Comma) {
                    if !self.at_expression_start() {
                        break;
                    }
                    targets.push(self.parse_del_target()?);
                }
                StmtKind::Delete { targets }
            }
            TokenKind::Keyword(Keyword::Assert) => {
                self.bump();
                let test = Box::new(self.parse_expression()?);
                let msg = if self.eat(&TokenKind::Comma) {
                    Some(Box::new(self.parse_expression()?))
                } else {
                    None
                };
                StmtKind::Assert { test, msg }
            }
            TokenKind::Keyword(Keyword::Global) => {
                self.bump();
                StmtKind::Global {
                    names: self.parse_name_list()?,
                }
            }
            TokenKind::Keyword(Keyword::Nonlocal) => {
                self.bump();
                StmtKind::Nonlocal {
                    names: self.parse_name_list()?,
                }
            }
            TokenKind::Keyword(Keyword::Import) => self.parse_import()?,
            TokenKind::Keyword(Keyword::From) => self.parse_import_from()?,
            TokenKind::Name(name)
                if name == "type"
                    && matches!(self.peek_nth(1), TokenKind::Name(_))
                    && matches!(self.peek_nth(2), TokenKind::Eq | TokenKind::LBracket) =>
            {
                self.parse_type_alias()?
            }
            _ => self.parse_expr_stmt()?,
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    fn parse_name_list(&mut self) -> ParseResult<Vec<String>> {
        let mut names = vec![self.expect_name()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_name()?);
        }
        Ok(names)
    }

    fn parse_del_target(&mut self) -> ParseResult<pythia_ast::Expr> {
        let expr = self.parse_postfix()?;
        check_target(&expr)?;
        Ok(expr)
    }

    fn parse_import(&mut self) -> ParseResult<StmtKind> {
        self.bump(); // `import`
        let mut names = Vec::new();
        loop {
            let name = self.parse_dotted_name()?;
            let asname = if self.eat_kw(Keyword::As) {
                Some(self.expect_name()?)
            } else {
                None
            };
            names.push(Alias { name, asname });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(StmtKind::Import { names })
    }

    fn parse_import_from(&mut self) -> ParseResult<StmtKind> {
        self.bump(); // `from`

        let mut level = 0u32;
        loop {
            if self.eat(&TokenKind::Dot) {
                level += 1;
            } else if self.eat(&TokenKind::Ellipsis) {
                // `...` lexes as one token but counts as three dots here
                level += 3;
            } else {
                break;
            }
        }

        let module = if matches!(self.peek(), TokenKind::Name(_)) {
            Some(self.parse_dotted_name()?)
        } else if level == 0 {
            return Err(self.error_expected(&["name"]));
        } else {
            None
        };

        self.expect_kw(Keyword::Import)?;

        let names = if self.eat(&TokenKind::Star) {
            vec![Alias {
                name: "*".into(),
                asname: None,
            }]
        } else if self.eat(&TokenKind::LParen) {
            let names = self.parse_import_aliases(true)?;
            self.expect(&TokenKind::RParen)?;
            names
        } else {
            self.parse_import_aliases(false)?
        };

        Ok(StmtKind::ImportFrom {
            module,
            names,
            level,
        })
    }

    fn parse_import_aliases(&mut self, in_parens: bool) -> ParseResult<Vec<Alias>> {
        let mut names = Vec::new();
        loop {
            let name = self.expect_name()?;
            let asname = if self.eat_kw(Keyword::As) {
                Some(self.expect_name()?)
            } else {
                None
            };
            names.push(Alias { name, asname });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            if in_parens && self.at(&TokenKind::RParen) {
                break;
            }
        }
        Ok(names)
    }

    fn parse_dotted_name(&mut self) -> ParseResult<String> {
        let mut name = self.expect_name()?;
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_name()?);
        }
        Ok(name)
    }

    fn parse_type_alias(&mut self) -> ParseResult<StmtKind> {
        self.bump(); // `type`
        let name_start = self.start();
        let id = self.expect_name()?;
        let name = pythia_ast::Expr::new(ExprKind::Name { id }, self.span_from(name_start));
        let type_params = self.parse_type_params()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expression()?;
        Ok(StmtKind::TypeAlias {
            name: Box::new(name),
            type_params,
            value: Box::new(value),
        })
    }

    /// An expression line, which may turn out to be an assignment, an
    /// augmented assignment or an annotated assignment.
    fn parse_expr_stmt(&mut self) -> ParseResult<StmtKind> {
        let parenthesized = self.at(&TokenKind::LParen);
        let first = self.parse_assign_side()?;

        if self.at(&TokenKind::Eq) {
            let mut targets = vec![first];
            let value = loop {
                self.bump(); // `=`
                let next = self.parse_assign_side()?;
                if self.at(&TokenKind::Eq) {
                    targets.push(next);
                } else {
                    break next;
                }
            };
            for target in &targets {
                check_target(target)?;
            }
            return Ok(StmtKind::Assign {
                targets,
                value: Box::new(value),
            });
        }

        if let Some(op) = aug_op(self.peek()) {
            if !matches!(
                first.kind,
                ExprKind::Name { .. } | ExprKind::Attribute { .. } | ExprKind::Subscript { .. }
            ) {
                return Err(self.error_msg("illegal target for augmented assignment"));
            }
            self.bump();
            let value = self.parse_assign_side()?;
            return Ok(StmtKind::AugAssign {
                target: Box::new(first),
                op,
                value: Box::new(value),
            });
        }

        if self.eat(&TokenKind::Colon) {
            check_target(&first)?;
            let annotation = self.parse_expression()?;
            let value = if self.eat(&TokenKind::Eq) {
                Some(Box::new(self.parse_assign_side()?))
            } else {
                None
            };
            let simple = !parenthesized && matches!(first.kind, ExprKind::Name { .. });
            return Ok(StmtKind::AnnAssign {
                target: Box::new(first),
                annotation: Box::new(annotation),
                value,
                simple,
            });
        }

        Ok(StmtKind::Expr {
            value: Box::new(first),
        })
    }

    /// Either side of an `=`: a yield expression or a star-expression list.
    fn parse_assign_side(&mut self) -> ParseResult<pythia_ast::Expr> {
        if self.at_kw(Keyword::Yield) {
            self.parse_yield()
        } else {
            self.parse_star_expressions()
        }
    }
}

fn aug_op(kind: &TokenKind) -> Option<Operator> {
    Some(match kind {
        TokenKind::PlusEq => Operator::Add,
        TokenKind::MinusEq => Operator::Sub,
        TokenKind::StarEq => Operator::Mult,
        TokenKind::DoubleStarEq => Operator::Pow,
        TokenKind::SlashEq => Operator::Div,
        TokenKind::DoubleSlashEq => Operator::FloorDiv,
        TokenKind::PercentEq => Operator::Mod,
        TokenKind::AtEq => Operator::MatMult,
        TokenKind::LShiftEq => Operator::LShift,
        TokenKind::RShiftEq => Operator::RShift,
        TokenKind::AmpEq => Operator::BitAnd,
        TokenKind::PipeEq => Operator::BitOr,
        TokenKind::CaretEq => Operator::BitXor,
        _ => return None,
    })
}
