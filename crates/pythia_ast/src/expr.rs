use crate::helpers::{Arguments, Comprehension, Keyword};
use crate::op::{BoolOp, CmpOp, Operator, UnaryOp};
use crate::span::Span;
use crate::Node;

/// An expression together with its source range.
///
/// Equality ignores the span, so trees that differ only in layout compare
/// equal. This is the relation the round-trip contract is stated in.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Node!)]
pub enum ExprKind {
    /// `a and b and c` / `a or b` — one node per operator run, values in
    /// source order.
    BoolOp { op: BoolOp, values: Vec<Expr> },

    /// `target := value`
    NamedExpr { target: Box<Expr>, value: Box<Expr> },

    BinOp {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },

    UnaryOp { op: UnaryOp, operand: Box<Expr> },

    Lambda {
        args: Box<Arguments>,
        body: Box<Expr>,
    },

    /// `body if test else orelse`
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },

    /// A `None` key marks a `**expansion` entry.
    Dict {
        keys: Vec<Option<Expr>>,
        values: Vec<Expr>,
    },

    Set { elts: Vec<Expr> },

    ListComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },

    SetComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },

    DictComp {
        key: Box<Expr>,
        value: Box<Expr>,
        generators: Vec<Comprehension>,
    },

    GeneratorExp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },

    Await { value: Box<Expr> },

    Yield { value: Option<Box<Expr>> },

    YieldFrom { value: Box<Expr> },

    /// Chained comparison: `left ops[0] comparators[0] ops[1] ...`.
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },

    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
    },

    /// One `{value!conversion:format_spec}` field of an f-string.
    FormattedValue {
        value: Box<Expr>,
        conversion: Option<char>,
        format_spec: Option<Box<Expr>>,
    },

    /// An f-string: a run of `Constant` text pieces and `FormattedValue`s.
    JoinedStr { values: Vec<Expr> },

    Constant { value: Constant },

    Attribute { value: Box<Expr>, attr: String },

    Subscript { value: Box<Expr>, slice: Box<Expr> },

    Starred { value: Box<Expr> },

    Name { id: String },

    List { elts: Vec<Expr> },

    Tuple { elts: Vec<Expr> },

    /// Only ever appears (possibly inside a `Tuple`) as the slice of a
    /// `Subscript`.
    Slice {
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
}

/// A literal value. Integers keep arbitrary precision by storing their
/// normalized decimal digits.
#[derive(Node!)]
pub enum Constant {
    None,
    Ellipsis,
    Bool(bool),
    Int(String),
    Float(f64),
    Complex { real: f64, imag: f64 },
    Str(String),
    Bytes(Vec<u8>),
}
