use crate::expr::Expr;
use crate::pattern::Pattern;
use crate::stmt::Stmt;
use crate::Node;

/// The full parameter list of a function or lambda.
///
/// `defaults` aligns with the *tail* of `posonlyargs + args`; `kw_defaults`
/// aligns one-to-one with `kwonlyargs` (`None` for no default).
#[derive(Node!, Default)]
pub struct Arguments {
    pub posonlyargs: Vec<Arg>,
    pub args: Vec<Arg>,
    pub vararg: Option<Arg>,
    pub kwonlyargs: Vec<Arg>,
    pub kw_defaults: Vec<Option<Expr>>,
    pub kwarg: Option<Arg>,
    pub defaults: Vec<Expr>,
}

/// A single parameter.
#[derive(Node!)]
pub struct Arg {
    pub arg: String,
    pub annotation: Option<Expr>,
}

/// A call-site keyword argument; `arg: None` means `**value`.
#[derive(Node!)]
pub struct Keyword {
    pub arg: Option<String>,
    pub value: Expr,
}

/// One item of a `with` statement: `context_expr [as optional_vars]`.
#[derive(Node!)]
pub struct WithItem {
    pub context_expr: Expr,
    pub optional_vars: Option<Expr>,
}

/// One `case` clause of a `match` statement.
#[derive(Node!)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// One `except` (or `except*`) clause.
#[derive(Node!)]
pub struct ExceptHandler {
    pub ty: Option<Expr>,
    pub name: Option<String>,
    pub body: Vec<Stmt>,
}

/// One `for target in iter [if cond]*` clause of a comprehension.
#[derive(Node!)]
pub struct Comprehension {
    pub target: Expr,
    pub iter: Expr,
    pub ifs: Vec<Expr>,
    pub is_async: bool,
}

/// A PEP 695 type parameter: `T` or `T: bound`.
#[derive(Node!)]
pub struct TypeParam {
    pub name: String,
    pub bound: Option<Expr>,
}
