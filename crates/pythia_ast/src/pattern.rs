use crate::expr::{Constant, Expr};
use crate::span::Span;
use crate::Node;

/// A pattern inside a `match` statement.
///
/// Equality ignores the span; see [`Expr`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Node!)]
pub enum PatternKind {
    /// A literal or dotted-name value compared with `==`.
    MatchValue { value: Box<Expr> },

    /// `None`, `True` or `False`, compared with `is`.
    MatchSingleton { value: Constant },

    MatchSequence { patterns: Vec<Pattern> },

    /// `{"key": p, **rest}`; `rest` is the `**` capture name if present.
    MatchMapping {
        keys: Vec<Expr>,
        patterns: Vec<Pattern>,
        rest: Option<String>,
    },

    /// `Cls(p1, p2, attr=p3)`
    MatchClass {
        cls: Box<Expr>,
        patterns: Vec<Pattern>,
        kwd_attrs: Vec<String>,
        kwd_patterns: Vec<Pattern>,
    },

    /// `*name` in a sequence pattern; `None` for `*_`.
    MatchStar { name: Option<String> },

    /// `pattern as name`. With both fields `None` this is the wildcard `_`;
    /// with only `pattern` absent it is a bare capture.
    MatchAs {
        pattern: Option<Box<Pattern>>,
        name: Option<String>,
    },

    MatchOr { patterns: Vec<Pattern> },
}
