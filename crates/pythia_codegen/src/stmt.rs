//! Statement and pattern rendering.

use std::fmt::Write;

use pythia_ast::{
    Alias, Arguments, Constant, ExceptHandler, Expr, ExprKind, MatchCase, Pattern, PatternKind,
    Stmt, StmtKind, TypeParam, WithItem,
};

use crate::expr::{ATOM, NAMED, TERNARY};
use crate::Generator;

impl Generator<'_> {
    pub(crate) fn write_stmt(&mut self, stmt: &Stmt, level: usize) {
        self.indent(level);
        match &stmt.kind {
            StmtKind::FunctionDef {
                name,
                type_params,
                args,
                body,
                decorator_list,
                returns,
            } => self.write_def(
                false,
                name,
                type_params,
                args,
                body,
                decorator_list,
                returns.as_deref(),
                level,
            ),

            StmtKind::AsyncFunctionDef {
                name,
                type_params,
                args,
                body,
                decorator_list,
                returns,
            } => self.write_def(
                true,
                name,
                type_params,
                args,
                body,
                decorator_list,
                returns.as_deref(),
                level,
            ),

            StmtKind::ClassDef {
                name,
                type_params,
                bases,
                keywords,
                body,
                decorator_list,
            } => {
                self.write_decorators(decorator_list, level);
                self.out.push_str("class ");
                self.out.push_str(name);
                self.write_type_params(type_params);
                if !bases.is_empty() || !keywords.is_empty() {
                    self.out.push('(');
                    for (i, base) in bases.iter().enumerate() {
                        if i > 0 {
                            self.out.push_str(", ");
                        }
                        self.write_expr(base, TERNARY);
                    }
                    for (i, keyword) in keywords.iter().enumerate() {
                        if i > 0 || !bases.is_empty() {
                            self.out.push_str(", ");
                        }
                        self.write_keyword(keyword);
                    }
                    self.out.push(')');
                }
                self.out.push_str(":\n");
                self.write_block(body, level);
            }

            StmtKind::Return { value } => {
                self.out.push_str("return");
                if let Some(value) = value {
                    self.out.push(' ');
                    self.write_bare(value);
                }
                self.out.push('\n');
            }

            StmtKind::Delete { targets } => {
                self.out.push_str("del ");
                for (i, target) in targets.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write_expr(target, TERNARY);
                }
                self.out.push('\n');
            }

            StmtKind::Assign { targets, value } => {
                for target in targets {
                    self.write_bare(target);
                    self.out.push_str(" = ");
                }
                self.write_value(value);
                self.out.push('\n');
            }

            StmtKind::AugAssign { target, op, value } => {
                self.write_expr(target, TERNARY);
                let _ = write!(self.out, " {}= ", op.as_str());
                self.write_value(value);
                self.out.push('\n');
            }

            StmtKind::AnnAssign {
                target,
                annotation,
                value,
                simple,
            } => {
                // `(x): int` and `x: int` parse differently; the
                // parentheses are load-bearing on a bare name.
                if !simple && matches!(target.kind, ExprKind::Name { .. }) {
                    self.out.push('(');
                    self.write_expr(target, TERNARY);
                    self.out.push(')');
                } else {
                    self.write_expr(target, TERNARY);
                }
                self.out.push_str(": ");
                self.write_expr(annotation, TERNARY);
                if let Some(value) = value {
                    self.out.push_str(" = ");
                    self.write_value(value);
                }
                self.out.push('\n');
            }

            StmtKind::For {
                target,
                iter,
                body,
                orelse,
            } => self.write_for(false, target, iter, body, orelse, level),

            StmtKind::AsyncFor {
                target,
                iter,
                body,
                orelse,
            } => self.write_for(true, target, iter, body, orelse, level),

            StmtKind::While { test, body, orelse } => {
                self.out.push_str("while ");
                self.write_expr(test, NAMED);
                self.out.push_str(":\n");
                self.write_block(body, level);
                self.write_orelse(orelse, level);
            }

            StmtKind::If { test, body, orelse } => {
                self.out.push_str("if ");
                self.write_if(test, body, orelse, level);
            }

            StmtKind::With { items, body } => self.write_with(false, items, body, level),

            StmtKind::AsyncWith { items, body } => self.write_with(true, items, body, level),

            StmtKind::Match { subject, cases } => {
                self.out.push_str("match ");
                self.write_bare(subject);
                self.out.push_str(":\n");
                for case in cases {
                    self.write_case(case, level + 1);
                }
            }

            StmtKind::Raise { exc, cause } => {
                self.out.push_str("raise");
                if let Some(exc) = exc {
                    self.out.push(' ');
                    self.write_expr(exc, TERNARY);
                    if let Some(cause) = cause {
                        self.out.push_str(" from ");
                        self.write_expr(cause, TERNARY);
                    }
                }
                self.out.push('\n');
            }

            StmtKind::Try {
                body,
                handlers,
                orelse,
                finalbody,
            } => self.write_try(false, body, handlers, orelse, finalbody, level),

            StmtKind::TryStar {
                body,
                handlers,
                orelse,
                finalbody,
            } => self.write_try(true, body, handlers, orelse, finalbody, level),

            StmtKind::Assert { test, msg } => {
                self.out.push_str("assert ");
                self.write_expr(test, TERNARY);
                if let Some(msg) = msg {
                    self.out.push_str(", ");
                    self.write_expr(msg, TERNARY);
                }
                self.out.push('\n');
            }

            StmtKind::Import { names } => {
                self.out.push_str("import ");
                self.write_aliases(names);
                self.out.push('\n');
            }

            StmtKind::ImportFrom {
                module,
                names,
                level: dots,
            } => {
                self.out.push_str("from ");
                for _ in 0..*dots {
                    self.out.push('.');
                }
                if let Some(module) = module {
                    self.out.push_str(module);
                }
                self.out.push_str(" import ");
                self.write_aliases(names);
                self.out.push('\n');
            }

            StmtKind::Global { names } => {
                self.out.push_str("global ");
                self.out.push_str(&names.join(", "));
                self.out.push('\n');
            }

            StmtKind::Nonlocal { names } => {
                self.out.push_str("nonlocal ");
                self.out.push_str(&names.join(", "));
                self.out.push('\n');
            }

            StmtKind::Expr { value } => {
                self.write_value(value);
                self.out.push('\n');
            }

            StmtKind::Pass => self.out.push_str("pass\n"),
            StmtKind::Break => self.out.push_str("break\n"),
            StmtKind::Continue => self.out.push_str("continue\n"),

            StmtKind::TypeAlias {
                name,
                type_params,
                value,
            } => {
                self.out.push_str("type ");
                self.write_expr(name, ATOM);
                self.write_type_params(type_params);
                self.out.push_str(" = ");
                self.write_expr(value, TERNARY);
                self.out.push('\n');
            }
        }
    }

    fn write_block(&mut self, body: &[Stmt], level: usize) {
        for stmt in body {
            self.write_stmt(stmt, level + 1);
        }
    }

    fn write_orelse(&mut self, orelse: &[Stmt], level: usize) {
        if !orelse.is_empty() {
            self.indent(level);
            self.out.push_str("else:\n");
            self.write_block(orelse, level);
        }
    }

    /// Writes everything after the `if `/`elif ` prefix, collapsing a
    /// nested lone `If` in the else-branch back into `elif`.
    fn write_if(&mut self, test: &Expr, body: &[Stmt], orelse: &[Stmt], level: usize) {
        self.write_expr(test, NAMED);
        self.out.push_str(":\n");
        self.write_block(body, level);
        if let [only] = orelse {
            if let StmtKind::If {
                test: elif_test,
                body: elif_body,
                orelse: elif_orelse,
            } = &only.kind
            {
                self.indent(level);
                self.out.push_str("elif ");
                self.write_if(elif_test, elif_body, elif_orelse, level);
                return;
            }
        }
        self.write_orelse(orelse, level);
    }

    #[allow(clippy::too_many_arguments)]
    fn write_def(
        &mut self,
        is_async: bool,
        name: &str,
        type_params: &[TypeParam],
        args: &Arguments,
        body: &[Stmt],
        decorator_list: &[Expr],
        returns: Option<&Expr>,
        level: usize,
    ) {
        self.write_decorators(decorator_list, level);
        if is_async {
            self.out.push_str("async ");
        }
        self.out.push_str("def ");
        self.out.push_str(name);
        self.write_type_params(type_params);
        self.out.push('(');
        self.write_params(args, true);
        self.out.push(')');
        if let Some(returns) = returns {
            self.out.push_str(" -> ");
            self.write_expr(returns, TERNARY);
        }
        self.out.push_str(":\n");
        self.write_block(body, level);
    }

    /// The leading indent of the first decorator is already written by
    /// `write_stmt`; later lines indent themselves.
    fn write_decorators(&mut self, decorator_list: &[Expr], level: usize) {
        for (i, decorator) in decorator_list.iter().enumerate() {
            if i > 0 {
                self.indent(level);
            }
            self.out.push('@');
            self.write_expr(decorator, NAMED);
            self.out.push('\n');
            if i + 1 == decorator_list.len() {
                self.indent(level);
            }
        }
    }

    fn write_type_params(&mut self, type_params: &[TypeParam]) {
        if type_params.is_empty() {
            return;
        }
        self.out.push('[');
        for (i, param) in type_params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(&param.name);
            if let Some(bound) = &param.bound {
                self.out.push_str(": ");
                self.write_expr(bound, TERNARY);
            }
        }
        self.out.push(']');
    }

    fn write_for(
        &mut self,
        is_async: bool,
        target: &Expr,
        iter: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
        level: usize,
    ) {
        if is_async {
            self.out.push_str("async ");
        }
        self.out.push_str("for ");
        self.write_bare(target);
        self.out.push_str(" in ");
        self.write_bare(iter);
        self.out.push_str(":\n");
        self.write_block(body, level);
        self.write_orelse(orelse, level);
    }

    fn write_with(&mut self, is_async: bool, items: &[WithItem], body: &[Stmt], level: usize) {
        if is_async {
            self.out.push_str("async ");
        }
        self.out.push_str("with ");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.write_expr(&item.context_expr, TERNARY);
            if let Some(vars) = &item.optional_vars {
                self.out.push_str(" as ");
                self.write_expr(vars, TERNARY);
            }
        }
        self.out.push_str(":\n");
        self.write_block(body, level);
    }

    fn write_try(
        &mut self,
        star: bool,
        body: &[Stmt],
        handlers: &[ExceptHandler],
        orelse: &[Stmt],
        finalbody: &[Stmt],
        level: usize,
    ) {
        self.out.push_str("try:\n");
        self.write_block(body, level);
        for handler in handlers {
            self.indent(level);
            self.out
                .push_str(if star { "except*" } else { "except" });
            if let Some(ty) = &handler.ty {
                self.out.push(' ');
                self.write_expr(ty, TERNARY);
                if let Some(name) = &handler.name {
                    self.out.push_str(" as ");
                    self.out.push_str(name);
                }
            }
            self.out.push_str(":\n");
            self.write_block(&handler.body, level);
        }
        self.write_orelse(orelse, level);
        if !finalbody.is_empty() {
            self.indent(level);
            self.out.push_str("finally:\n");
            self.write_block(finalbody, level);
        }
    }

    fn write_aliases(&mut self, names: &[Alias]) {
        for (i, alias) in names.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(&alias.name);
            if let Some(asname) = &alias.asname {
                self.out.push_str(" as ");
                self.out.push_str(asname);
            }
        }
    }

    // --- match cases ---

    fn write_case(&mut self, case: &MatchCase, level: usize) {
        self.indent(level);
        self.out.push_str("case ");
        self.write_pattern(&case.pattern);
        if let Some(guard) = &case.guard {
            self.out.push_str(" if ");
            self.write_expr(guard, NAMED);
        }
        self.out.push_str(":\n");
        self.write_block(&case.body, level);
    }

    fn write_pattern(&mut self, pattern: &Pattern) {
        match &pattern.kind {
            PatternKind::MatchValue { value } => self.write_expr(value, TERNARY),

            PatternKind::MatchSingleton { value } => match value {
                Constant::None => self.out.push_str("None"),
                Constant::Bool(true) => self.out.push_str("True"),
                _ => self.out.push_str("False"),
            },

            PatternKind::MatchSequence { patterns } => {
                self.out.push('[');
                for (i, pattern) in patterns.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write_pattern(pattern);
                }
                self.out.push(']');
            }

            PatternKind::MatchMapping {
                keys,
                patterns,
                rest,
            } => {
                self.out.push('{');
                for (i, (key, pattern)) in keys.iter().zip(patterns).enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write_expr(key, TERNARY);
                    self.out.push_str(": ");
                    self.write_pattern(pattern);
                }
                if let Some(rest) = rest {
                    if !keys.is_empty() {
                        self.out.push_str(", ");
                    }
                    self.out.push_str("**");
                    self.out.push_str(rest);
                }
                self.out.push('}');
            }

            PatternKind::MatchClass {
                cls,
                patterns,
                kwd_attrs,
                kwd_patterns,
            } => {
                self.write_expr(cls, ATOM);
                self.out.push('(');
                for (i, pattern) in patterns.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write_pattern(pattern);
                }
                for (i, (attr, pattern)) in kwd_attrs.iter().zip(kwd_patterns).enumerate() {
                    if i > 0 || !patterns.is_empty() {
                        self.out.push_str(", ");
                    }
                    self.out.push_str(attr);
                    self.out.push('=');
                    self.write_pattern(pattern);
                }
                self.out.push(')');
            }

            PatternKind::MatchStar { name } => {
                self.out.push('*');
                self.out.push_str(name.as_deref().unwrap_or("_"));
            }

            PatternKind::MatchAs { pattern, name } => match (pattern, name) {
                (Some(pattern), Some(name)) => {
                    self.write_closed_pattern(pattern);
                    self.out.push_str(" as ");
                    self.out.push_str(name);
                }
                (None, Some(name)) => self.out.push_str(name),
                _ => self.out.push('_'),
            },

            PatternKind::MatchOr { patterns } => {
                for (i, pattern) in patterns.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(" | ");
                    }
                    self.write_closed_pattern(pattern);
                }
            }
        }
    }

    /// An operand of `|` or `as`. A nested `as` pattern binds looser than
    /// both, so it needs parentheses; `|` runs are flat, so a bare `MatchOr`
    /// operand can only be the left side of `as`, where it round-trips.
    fn write_closed_pattern(&mut self, pattern: &Pattern) {
        if matches!(
            &pattern.kind,
            PatternKind::MatchAs {
                pattern: Some(_),
                ..
            }
        ) {
            self.out.push('(');
            self.write_pattern(pattern);
            self.out.push(')');
        } else {
            self.write_pattern(pattern);
        }
    }
}
