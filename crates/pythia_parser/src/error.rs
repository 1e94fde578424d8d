use pythia_ast::span::Span;

/// A lexical error. Tokenizing aborts at the first one; no partial token
/// sequence is produced.
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[error("{kind} at {span}")]
pub struct TokenizeError {
    pub kind: TokenizeErrorKind,
    pub span: Span,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error, serde::Serialize)]
pub enum TokenizeErrorKind {
    #[error("unindent does not match any outer indentation level")]
    IndentMismatch,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),
}

/// A syntax error. Parsing aborts at the first one; no partial tree is
/// produced.
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub message: String,
    /// Descriptions of the tokens that would have been valid here.
    pub expected: Vec<String>,
    /// Description of the token actually found.
    pub found: String,
    pub span: Span,
    /// Best-effort hint, e.g. "missing `:`".
    pub suggestion: Option<String>,
}

/// Either failure mode of a full source-to-tree call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Error::Tokenize(err) => err.span,
            Error::Parse(err) => err.span,
        }
    }
}
