//! Expression rendering.
//!
//! Every expression form has a binding strength, and every rendering site
//! passes the minimum strength it can embed without parentheses. An
//! expression weaker than its context is wrapped; everything else is
//! emitted bare. This drops parentheses that grouping made redundant while
//! keeping the ones that change the tree.

use std::fmt::Write;

use pythia_ast::op::{BoolOp, Operator, UnaryOp};
use pythia_ast::{Arguments, Comprehension, Constant, Expr, ExprKind, Keyword};

use crate::{other_quote, Generator};

pub(crate) const TUPLE: u8 = 0;
pub(crate) const YIELD: u8 = 1;
pub(crate) const NAMED: u8 = 2;
pub(crate) const TERNARY: u8 = 3;
pub(crate) const OR: u8 = 4;
pub(crate) const AND: u8 = 5;
pub(crate) const NOT: u8 = 6;
pub(crate) const CMP: u8 = 7;
pub(crate) const BOR: u8 = 8;
pub(crate) const BXOR: u8 = 9;
pub(crate) const BAND: u8 = 10;
pub(crate) const SHIFT: u8 = 11;
pub(crate) const ARITH: u8 = 12;
pub(crate) const TERM: u8 = 13;
pub(crate) const FACTOR: u8 = 14;
pub(crate) const POWER: u8 = 15;
pub(crate) const AWAIT: u8 = 16;
pub(crate) const ATOM: u8 = 17;

fn binding(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Tuple { .. } => TUPLE,
        // A yield is only ever bare as a whole statement value; everywhere
        // else (tuple elements, conditions) it must keep its parentheses.
        ExprKind::Yield { .. } | ExprKind::YieldFrom { .. } => YIELD,
        ExprKind::NamedExpr { .. } => NAMED,
        ExprKind::Lambda { .. } | ExprKind::IfExp { .. } => TERNARY,
        ExprKind::BoolOp { op, .. } => match op {
            BoolOp::Or => OR,
            BoolOp::And => AND,
        },
        ExprKind::Compare { .. } => CMP,
        ExprKind::BinOp { op, .. } => match op {
            Operator::BitOr => BOR,
            Operator::BitXor => BXOR,
            Operator::BitAnd => BAND,
            Operator::LShift | Operator::RShift => SHIFT,
            Operator::Add | Operator::Sub => ARITH,
            Operator::Mult
            | Operator::MatMult
            | Operator::Div
            | Operator::FloorDiv
            | Operator::Mod => TERM,
            Operator::Pow => POWER,
        },
        ExprKind::UnaryOp { op, .. } => match op {
            UnaryOp::Not => NOT,
            _ => FACTOR,
        },
        ExprKind::Await { .. } => AWAIT,
        _ => ATOM,
    }
}

impl Generator<'_> {
    /// Render the value of an expression statement or the right-hand side
    /// of an assignment, the one place a yield is grammatical without
    /// parentheses.
    pub(crate) fn write_value(&mut self, expr: &Expr) {
        if matches!(
            expr.kind,
            ExprKind::Yield { .. } | ExprKind::YieldFrom { .. }
        ) {
            self.write_expr_inner(expr);
        } else {
            self.write_bare(expr);
        }
    }

    /// Render in a context that admits a bare (unparenthesized) tuple:
    /// statement values, assignment sides, `return`, `for` iterators.
    pub(crate) fn write_bare(&mut self, expr: &Expr) {
        if let ExprKind::Tuple { elts } = &expr.kind {
            if elts.is_empty() {
                self.out.push_str("()");
            } else {
                self.write_tuple_elts(elts);
            }
        } else {
            self.write_expr(expr, TERNARY);
        }
    }

    fn write_tuple_elts(&mut self, elts: &[Expr]) {
        for (i, elt) in elts.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.write_expr(elt, TERNARY);
        }
        if elts.len() == 1 {
            self.out.push(',');
        }
    }

    pub(crate) fn write_expr(&mut self, expr: &Expr, ctx: u8) {
        if binding(expr) < ctx {
            self.out.push('(');
            self.write_expr_inner(expr);
            self.out.push(')');
        } else {
            self.write_expr_inner(expr);
        }
    }

    fn write_expr_inner(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::BoolOp { op, values } => {
                let operand_ctx = binding(expr) + 1;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        let _ = write!(self.out, " {} ", op.as_str());
                    }
                    self.write_expr(value, operand_ctx);
                }
            }

            ExprKind::NamedExpr { target, value } => {
                self.write_expr(target, ATOM);
                self.out.push_str(" := ");
                self.write_expr(value, TERNARY);
            }

            ExprKind::BinOp { left, op, right } => {
                let own = binding(expr);
                // Power is the one right-associative operator.
                let (lhs, rhs) = if matches!(op, Operator::Pow) {
                    (own + 1, own)
                } else {
                    (own, own + 1)
                };
                self.write_expr(left, lhs);
                let _ = write!(self.out, " {} ", op.as_str());
                self.write_expr(right, rhs);
            }

            ExprKind::UnaryOp { op, operand } => {
                self.out.push_str(op.as_str());
                if matches!(op, UnaryOp::Not) {
                    self.out.push(' ');
                    self.write_expr(operand, NOT);
                } else {
                    self.write_expr(operand, FACTOR);
                }
            }

            ExprKind::Lambda { args, body } => {
                self.out.push_str("lambda");
                if has_params(args) {
                    self.out.push(' ');
                    self.write_params(args, false);
                }
                self.out.push_str(": ");
                self.write_expr(body, TERNARY);
            }

            ExprKind::IfExp { test, body, orelse } => {
                self.write_expr(body, OR);
                self.out.push_str(" if ");
                self.write_expr(test, OR);
                self.out.push_str(" else ");
                self.write_expr(orelse, TERNARY);
            }

            ExprKind::Dict { keys, values } => {
                self.out.push('{');
                for (i, (key, value)) in keys.iter().zip(values).enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    match key {
                        Some(key) => {
                            self.write_expr(key, TERNARY);
                            self.out.push_str(": ");
                            self.write_expr(value, TERNARY);
                        }
                        None => {
                            self.out.push_str("**");
                            self.write_expr(value, BOR);
                        }
                    }
                }
                if self.config.trailing_comma && keys.len() > 1 {
                    self.out.push(',');
                }
                self.out.push('}');
            }

            ExprKind::Set { elts } => {
                self.out.push('{');
                self.write_display_elts(elts);
                self.out.push('}');
            }

            ExprKind::List { elts } => {
                self.out.push('[');
                self.write_display_elts(elts);
                self.out.push(']');
            }

            ExprKind::Tuple { elts } => {
                // Parenthesized by the caller; a lone element still needs
                // its trailing comma.
                self.write_tuple_elts(elts);
                if self.config.trailing_comma && elts.len() > 1 {
                    self.out.push(',');
                }
            }

            ExprKind::ListComp { elt, generators } => {
                self.out.push('[');
                self.write_expr(elt, TERNARY);
                self.write_generators(generators);
                self.out.push(']');
            }

            ExprKind::SetComp { elt, generators } => {
                self.out.push('{');
                self.write_expr(elt, TERNARY);
                self.write_generators(generators);
                self.out.push('}');
            }

            ExprKind::DictComp {
                key,
                value,
                generators,
            } => {
                self.out.push('{');
                self.write_expr(key, TERNARY);
                self.out.push_str(": ");
                self.write_expr(value, TERNARY);
                self.write_generators(generators);
                self.out.push('}');
            }

            ExprKind::GeneratorExp { elt, generators } => {
                self.out.push('(');
                self.write_genexp_inner(elt, generators);
                self.out.push(')');
            }

            ExprKind::Await { value } => {
                self.out.push_str("await ");
                self.write_expr(value, ATOM);
            }

            ExprKind::Yield { value } => {
                self.out.push_str("yield");
                if let Some(value) = value {
                    self.out.push(' ');
                    self.write_bare(value);
                }
            }

            ExprKind::YieldFrom { value } => {
                self.out.push_str("yield from ");
                self.write_expr(value, TERNARY);
            }

            ExprKind::Compare {
                left,
                ops,
                comparators,
            } => {
                self.write_expr(left, BOR);
                for (op, comparator) in ops.iter().zip(comparators) {
                    let _ = write!(self.out, " {} ", op.as_str());
                    self.write_expr(comparator, BOR);
                }
            }

            ExprKind::Call {
                func,
                args,
                keywords,
            } => {
                self.write_expr(func, ATOM);
                self.out.push('(');
                // A generator expression that is the sole argument shares
                // the call's parentheses.
                if let [arg] = args.as_slice() {
                    if keywords.is_empty() {
                        if let ExprKind::GeneratorExp { elt, generators } = &arg.kind {
                            self.write_genexp_inner(elt, generators);
                            self.out.push(')');
                            return;
                        }
                    }
                }
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write_expr(arg, TERNARY);
                }
                for (i, keyword) in keywords.iter().enumerate() {
                    if i > 0 || !args.is_empty() {
                        self.out.push_str(", ");
                    }
                    self.write_keyword(keyword);
                }
                self.out.push(')');
            }

            ExprKind::FormattedValue {
                value,
                conversion,
                format_spec,
            } => {
                // A field outside an f-string; render it as a one-field
                // f-string so the output stays parseable.
                let quote = self.config.quote;
                self.out.push('f');
                self.out.push(quote);
                self.write_field(value, *conversion, format_spec.as_deref(), quote);
                self.out.push(quote);
            }

            ExprKind::JoinedStr { values } => self.write_fstring(values),

            ExprKind::Constant { value } => self.write_constant(value),

            ExprKind::Attribute { value, attr } => {
                self.write_expr(value, ATOM);
                self.out.push('.');
                self.out.push_str(attr);
            }

            ExprKind::Subscript { value, slice } => {
                self.write_expr(value, ATOM);
                self.out.push('[');
                self.write_subscript_index(slice);
                self.out.push(']');
            }

            ExprKind::Starred { value } => {
                self.out.push('*');
                self.write_expr(value, BOR);
            }

            ExprKind::Name { id } => self.out.push_str(id),

            ExprKind::Slice { .. } => self.write_slice_item(expr),
        }
    }

    fn write_display_elts(&mut self, elts: &[Expr]) {
        for (i, elt) in elts.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.write_expr(elt, TERNARY);
        }
        if self.config.trailing_comma && elts.len() > 1 {
            self.out.push(',');
        }
    }

    pub(crate) fn write_keyword(&mut self, keyword: &Keyword) {
        match &keyword.arg {
            Some(name) => {
                self.out.push_str(name);
                self.out.push('=');
            }
            None => self.out.push_str("**"),
        }
        self.write_expr(&keyword.value, TERNARY);
    }

    fn write_genexp_inner(&mut self, elt: &Expr, generators: &[Comprehension]) {
        self.write_expr(elt, TERNARY);
        self.write_generators(generators);
    }

    fn write_generators(&mut self, generators: &[Comprehension]) {
        for comp in generators {
            self.out
                .push_str(if comp.is_async { " async for " } else { " for " });
            self.write_bare(&comp.target);
            self.out.push_str(" in ");
            self.write_expr(&comp.iter, OR);
            for cond in &comp.ifs {
                self.out.push_str(" if ");
                self.write_expr(cond, OR);
            }
        }
    }

    fn write_subscript_index(&mut self, slice: &Expr) {
        if let ExprKind::Tuple { elts } = &slice.kind {
            if elts.is_empty() {
                self.out.push_str("()");
                return;
            }
            for (i, elt) in elts.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.write_slice_item(elt);
            }
            if elts.len() == 1 {
                self.out.push(',');
            }
        } else {
            self.write_slice_item(slice);
        }
    }

    fn write_slice_item(&mut self, item: &Expr) {
        if let ExprKind::Slice { lower, upper, step } = &item.kind {
            if let Some(lower) = lower {
                self.write_expr(lower, TERNARY);
            }
            self.out.push(':');
            if let Some(upper) = upper {
                self.write_expr(upper, TERNARY);
            }
            if let Some(step) = step {
                self.out.push(':');
                self.write_expr(step, TERNARY);
            }
        } else {
            self.write_expr(item, TERNARY);
        }
    }

    // --- parameter lists ---

    /// Shared by `def` headers (`annotated`) and lambdas.
    pub(crate) fn write_params(&mut self, args: &Arguments, annotated: bool) {
        let mut sep = false;
        let mut comma = |out: &mut String| {
            if sep {
                out.push_str(", ");
            }
            sep = true;
        };

        let positional = args.posonlyargs.iter().chain(&args.args);
        let total = args.posonlyargs.len() + args.args.len();
        let without_default = total - args.defaults.len();

        for (i, arg) in positional.enumerate() {
            comma(&mut self.out);
            self.write_param(arg, annotated);
            if i >= without_default {
                self.write_default(&args.defaults[i - without_default], arg, annotated);
            }
            if i + 1 == args.posonlyargs.len() {
                self.out.push_str(", /");
            }
        }

        if let Some(vararg) = &args.vararg {
            comma(&mut self.out);
            self.out.push('*');
            self.write_param(vararg, annotated);
        } else if !args.kwonlyargs.is_empty() {
            comma(&mut self.out);
            self.out.push('*');
        }

        for (arg, default) in args.kwonlyargs.iter().zip(&args.kw_defaults) {
            comma(&mut self.out);
            self.write_param(arg, annotated);
            if let Some(default) = default {
                self.write_default(default, arg, annotated);
            }
        }

        if let Some(kwarg) = &args.kwarg {
            comma(&mut self.out);
            self.out.push_str("**");
            self.write_param(kwarg, annotated);
        }
    }

    fn write_param(&mut self, arg: &pythia_ast::Arg, annotated: bool) {
        self.out.push_str(&arg.arg);
        if annotated {
            if let Some(annotation) = &arg.annotation {
                self.out.push_str(": ");
                self.write_expr(annotation, TERNARY);
            }
        }
    }

    fn write_default(&mut self, default: &Expr, arg: &pythia_ast::Arg, annotated: bool) {
        // `x: int = 1` but `x=1`.
        if annotated && arg.annotation.is_some() {
            self.out.push_str(" = ");
        } else {
            self.out.push('=');
        }
        self.write_expr(default, TERNARY);
    }

    // --- literals ---

    fn write_constant(&mut self, value: &Constant) {
        match value {
            Constant::None => self.out.push_str("None"),
            Constant::Ellipsis => self.out.push_str("..."),
            Constant::Bool(true) => self.out.push_str("True"),
            Constant::Bool(false) => self.out.push_str("False"),
            Constant::Int(digits) => self.out.push_str(digits),
            Constant::Float(value) => self.out.push_str(&crate::float_repr(*value)),
            Constant::Complex { real, imag } => {
                if *real == 0.0 {
                    let _ = write!(self.out, "{}j", crate::float_repr(*imag));
                } else {
                    let _ = write!(
                        self.out,
                        "({} + {}j)",
                        crate::float_repr(*real),
                        crate::float_repr(*imag)
                    );
                }
            }
            Constant::Str(text) => self.write_str(text),
            Constant::Bytes(bytes) => self.write_bytes(bytes),
        }
    }

    fn write_str(&mut self, text: &str) {
        let quote = self.pick_quote(
            text.contains(self.config.quote),
            text.contains(other_quote(self.config.quote)),
        );
        self.out.push(quote);
        for ch in text.chars() {
            push_escaped(&mut self.out, ch, quote, false);
        }
        self.out.push(quote);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let quote = self.pick_quote(
            bytes.contains(&(self.config.quote as u8)),
            bytes.contains(&(other_quote(self.config.quote) as u8)),
        );
        self.out.push('b');
        self.out.push(quote);
        for &byte in bytes {
            match byte {
                b'\\' => self.out.push_str("\\\\"),
                b'\n' => self.out.push_str("\\n"),
                b'\r' => self.out.push_str("\\r"),
                b'\t' => self.out.push_str("\\t"),
                b if b == quote as u8 => {
                    self.out.push('\\');
                    self.out.push(quote);
                }
                b' '..=b'~' => self.out.push(byte as char),
                _ => {
                    let _ = write!(self.out, "\\x{byte:02x}");
                }
            }
        }
        self.out.push(quote);
    }

    // --- f-strings ---

    fn write_fstring(&mut self, values: &[Expr]) {
        let mut has_preferred = false;
        let mut has_other = false;
        collect_text_quotes(
            values,
            self.config.quote,
            &mut has_preferred,
            &mut has_other,
        );
        let quote = self.pick_quote(has_preferred, has_other);

        self.out.push('f');
        self.out.push(quote);
        self.write_fstring_parts(values, quote, false);
        self.out.push(quote);
    }

    fn write_fstring_parts(&mut self, values: &[Expr], quote: char, in_spec: bool) {
        for value in values {
            match &value.kind {
                ExprKind::Constant {
                    value: Constant::Str(text),
                } => {
                    for ch in text.chars() {
                        // Format-spec text is taken verbatim by the reader,
                        // so backslash escapes must not be introduced there.
                        if in_spec {
                            self.out.push(ch);
                        } else {
                            push_escaped(&mut self.out, ch, quote, true);
                        }
                    }
                }
                ExprKind::FormattedValue {
                    value,
                    conversion,
                    format_spec,
                } => self.write_field(value, *conversion, format_spec.as_deref(), quote),
                _ => self.write_field(value, None, None, quote),
            }
        }
    }

    fn write_field(
        &mut self,
        value: &Expr,
        conversion: Option<char>,
        format_spec: Option<&Expr>,
        quote: char,
    ) {
        self.out.push('{');
        let start = self.out.len();
        self.write_expr(value, NAMED);
        // `{{` would read as an escaped brace.
        if self.out[start..].starts_with('{') {
            self.out.insert(start, ' ');
        }
        if let Some(conversion) = conversion {
            self.out.push('!');
            self.out.push(conversion);
        }
        if let Some(spec) = format_spec {
            self.out.push(':');
            if let ExprKind::JoinedStr { values } = &spec.kind {
                self.write_fstring_parts(values, quote, true);
            }
        } else if conversion.is_none() && self.out.ends_with('}') {
            // Keep the expression's `}` from pairing with the closing brace.
            self.out.push(' ');
        }
        self.out.push('}');
    }
}

fn has_params(args: &Arguments) -> bool {
    !args.posonlyargs.is_empty()
        || !args.args.is_empty()
        || args.vararg.is_some()
        || !args.kwonlyargs.is_empty()
        || args.kwarg.is_some()
}

fn push_escaped(out: &mut String, ch: char, quote: char, in_fstring: bool) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '{' | '}' if in_fstring => {
            out.push(ch);
            out.push(ch);
        }
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if (c as u32) < 0x20 || c as u32 == 0x7f => {
            let _ = write!(out, "\\x{:02x}", c as u32);
        }
        c => out.push(c),
    }
}

/// Scan the literal text of an f-string (including nested format specs) for
/// quote characters, to choose an enclosing quote that needs no escapes.
fn collect_text_quotes(values: &[Expr], preferred: char, has_preferred: &mut bool, has_other: &mut bool) {
    for value in values {
        match &value.kind {
            ExprKind::Constant {
                value: Constant::Str(text),
            } => {
                *has_preferred |= text.contains(preferred);
                *has_other |= text.contains(other_quote(preferred));
            }
            ExprKind::FormattedValue {
                format_spec: Some(spec),
                ..
            } => {
                if let ExprKind::JoinedStr { values } = &spec.kind {
                    collect_text_quotes(values, preferred, has_preferred, has_other);
                }
            }
            _ => {}
        }
    }
}
