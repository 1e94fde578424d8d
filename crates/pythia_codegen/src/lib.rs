//! Rendering of [`pythia_ast`] trees back into Python source.
//!
//! [`generate`] is pure: it never fails and never consults anything but the
//! tree and the [`Config`]. Output is normalized rather than preserved, with
//! one statement per line, a single space around operators and the
//! configured indentation. Parentheses are emitted only where precedence
//! requires them, so `(a + b) * c` keeps its parentheses and `(a * b) + c`
//! loses them. Re-parsing the output yields a tree equal (under the
//! position-ignoring `PartialEq`) to the input.

mod expr;
mod stmt;

#[cfg(test)]
mod tests;

use pythia_ast::Mod;

/// Formatting knobs for [`generate`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Spaces per indentation level.
    pub indent_width: usize,

    /// Preferred quote character for string literals. The other quote is
    /// used instead when it avoids escaping.
    pub quote: char,

    /// Emit a trailing comma in multi-element bracketed displays.
    pub trailing_comma: bool,

    /// Advisory line-length limit. Recorded for callers that post-process
    /// the output; the generator itself never breaks lines.
    pub max_line_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: 4,
            quote: '\'',
            trailing_comma: false,
            max_line_length: 88,
        }
    }
}

/// Render a tree as Python source.
pub fn generate(module: &Mod, config: &Config) -> String {
    let mut w = Generator {
        config,
        out: String::new(),
    };

    match module {
        Mod::Module { body } | Mod::Interactive { body } => {
            for stmt in body {
                w.write_stmt(stmt, 0);
            }
        }
        Mod::Expression { body } => {
            w.write_bare(body);
            w.out.push('\n');
        }
        Mod::FunctionType { arg_types, returns } => {
            w.out.push('(');
            for (i, ty) in arg_types.iter().enumerate() {
                if i > 0 {
                    w.out.push_str(", ");
                }
                w.write_expr(ty, expr::TERNARY);
            }
            w.out.push_str(") -> ");
            w.write_expr(returns, expr::TERNARY);
            w.out.push('\n');
        }
    }

    w.out
}

struct Generator<'a> {
    config: &'a Config,
    out: String,
}

impl Generator<'_> {
    fn indent(&mut self, level: usize) {
        for _ in 0..level * self.config.indent_width {
            self.out.push(' ');
        }
    }

    /// The quote to use for a literal whose text may contain either quote
    /// character.
    fn pick_quote(&self, has_preferred: bool, has_other: bool) -> char {
        let other = if self.config.quote == '\'' { '"' } else { '\'' };
        if has_preferred && !has_other {
            other
        } else {
            self.config.quote
        }
    }
}

fn other_quote(quote: char) -> char {
    if quote == '\'' {
        '"'
    } else {
        '\''
    }
}

/// Render a float so that parsing it back yields the same value. Rust's
/// `Display` already produces the shortest such digit string; it only needs
/// a `.0` suffix to stay a float literal, and infinities need an
/// overflowing exponent since Python has no `inf` literal.
fn float_repr(value: f64) -> String {
    if value.is_infinite() {
        return if value < 0.0 { "-1e400" } else { "1e400" }.to_owned();
    }
    if value.is_nan() {
        return "nan".to_owned();
    }
    let mut repr = format!("{value}");
    if !repr.contains('.') {
        repr.push_str(".0");
    }
    repr
}
