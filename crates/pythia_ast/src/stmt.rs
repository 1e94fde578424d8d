use crate::expr::Expr;
use crate::helpers::{Arguments, ExceptHandler, Keyword, MatchCase, TypeParam, WithItem};
use crate::op::Operator;
use crate::span::Span;
use crate::Node;

/// A statement together with its source range.
///
/// Equality ignores the span; see [`Expr`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl PartialEq for Stmt {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Node!)]
pub enum StmtKind {
    FunctionDef {
        name: String,
        type_params: Vec<TypeParam>,
        args: Box<Arguments>,
        body: Vec<Stmt>,
        decorator_list: Vec<Expr>,
        returns: Option<Box<Expr>>,
    },

    AsyncFunctionDef {
        name: String,
        type_params: Vec<TypeParam>,
        args: Box<Arguments>,
        body: Vec<Stmt>,
        decorator_list: Vec<Expr>,
        returns: Option<Box<Expr>>,
    },

    ClassDef {
        name: String,
        type_params: Vec<TypeParam>,
        bases: Vec<Expr>,
        keywords: Vec<Keyword>,
        body: Vec<Stmt>,
        decorator_list: Vec<Expr>,
    },

    Return { value: Option<Box<Expr>> },

    Delete { targets: Vec<Expr> },

    /// `a = b = value`; one target per `=`.
    Assign { targets: Vec<Expr>, value: Box<Expr> },

    /// `target op= value`
    AugAssign {
        target: Box<Expr>,
        op: Operator,
        value: Box<Expr>,
    },

    /// `target: annotation [= value]`. `simple` is true for a bare name
    /// target written without parentheses.
    AnnAssign {
        target: Box<Expr>,
        annotation: Box<Expr>,
        value: Option<Box<Expr>>,
        simple: bool,
    },

    For {
        target: Box<Expr>,
        iter: Box<Expr>,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },

    AsyncFor {
        target: Box<Expr>,
        iter: Box<Expr>,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },

    While {
        test: Box<Expr>,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },

    /// `elif` chains are represented by nesting: the else-branch of the
    /// parent holds a single `If` statement.
    If {
        test: Box<Expr>,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },

    With {
        items: Vec<WithItem>,
        body: Vec<Stmt>,
    },

    AsyncWith {
        items: Vec<WithItem>,
        body: Vec<Stmt>,
    },

    Match {
        subject: Box<Expr>,
        cases: Vec<MatchCase>,
    },

    Raise {
        exc: Option<Box<Expr>>,
        cause: Option<Box<Expr>>,
    },

    Try {
        body: Vec<Stmt>,
        handlers: Vec<ExceptHandler>,
        orelse: Vec<Stmt>,
        finalbody: Vec<Stmt>,
    },

    /// `try` with `except*` handlers.
    TryStar {
        body: Vec<Stmt>,
        handlers: Vec<ExceptHandler>,
        orelse: Vec<Stmt>,
        finalbody: Vec<Stmt>,
    },

    Assert {
        test: Box<Expr>,
        msg: Option<Box<Expr>>,
    },

    Import { names: Vec<Alias> },

    /// `from .module import names`; `level` counts the leading dots.
    ImportFrom {
        module: Option<String>,
        names: Vec<Alias>,
        level: u32,
    },

    Global { names: Vec<String> },

    Nonlocal { names: Vec<String> },

    Expr { value: Box<Expr> },

    Pass,

    Break,

    Continue,

    /// `type Name[params] = value`
    TypeAlias {
        name: Box<Expr>,
        type_params: Vec<TypeParam>,
        value: Box<Expr>,
    },
}

/// One name in an import statement: `name [as asname]`.
#[derive(Node!)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}
