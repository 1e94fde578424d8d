//! The syntax tree produced by parsing Python source.
//!
//! The tree is a plain owned value: nodes are exclusively owned by their
//! parents, recursive fields are boxed, and a tree only exists if the parse
//! that built it fully succeeded. `PartialEq` on [`Stmt`], [`Expr`] and
//! [`Pattern`] ignores source positions, so two parses of formatting-variant
//! sources compare equal.

#[macro_use]
extern crate macro_rules_attribute;

pub mod op;
pub mod span;

mod expr;
mod helpers;
mod pattern;
mod stmt;

pub use expr::{Constant, Expr, ExprKind};
pub use helpers::{
    Arg, Arguments, Comprehension, ExceptHandler, Keyword, MatchCase, TypeParam, WithItem,
};
pub use pattern::{Pattern, PatternKind};
pub use stmt::{Alias, Stmt, StmtKind};

use span::Span;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

/// The root of a compilation unit.
#[derive(Node!)]
pub enum Mod {
    /// An ordinary source file.
    Module { body: Vec<Stmt> },

    /// A unit fed to a REPL.
    Interactive { body: Vec<Stmt> },

    /// A single bare expression.
    Expression { body: Box<Expr> },

    /// A `(int, str) -> bool` function signature, as written in
    /// `.pyi`-style type comments.
    FunctionType {
        arg_types: Vec<Expr>,
        returns: Box<Expr>,
    },
}

impl Mod {
    /// The statements of a `Module` or `Interactive` root, if that is what
    /// this is.
    pub fn body(&self) -> Option<&[Stmt]> {
        match self {
            Mod::Module { body } | Mod::Interactive { body } => Some(body),
            _ => None,
        }
    }
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Self { kind, span }
    }
}
