//! Tokenizing and parsing of Python source.
//!
//! The pipeline is two stages: [`tokenize`] turns source text into a flat
//! token sequence (indentation already resolved into INDENT/DEDENT tokens),
//! and the parser builds the [`pythia_ast`] tree from it. Both stages stop
//! at the first error; there is no recovery and no partial output.

mod error;
mod lexer;
mod parser;
mod token;

pub use error::{Error, ParseError, TokenizeError, TokenizeErrorKind};
pub use token::{FStringPart, Keyword, Token, TokenKind};

use pythia_ast::Mod;

/// Tokenize a source file, without parsing it.
pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenizeError> {
    lexer::Lexer::new(source).lex()
}

/// Parse a source file into a [`Mod::Module`] tree.
pub fn parse(source: &str) -> Result<Mod, Error> {
    let tokens = tokenize(source)?;
    Ok(parser::Parser::new(tokens).parse_module()?)
}

/// Parse REPL input into a [`Mod::Interactive`] tree.
pub fn parse_interactive(source: &str) -> Result<Mod, Error> {
    let tokens = tokenize(source)?;
    Ok(parser::Parser::new(tokens).parse_interactive()?)
}

/// Parse a single expression, as `eval` would, into a [`Mod::Expression`]
/// tree.
pub fn parse_expression(source: &str) -> Result<Mod, Error> {
    let tokens = tokenize(source)?;
    Ok(parser::Parser::new(tokens).parse_expression_root()?)
}

/// Parse a `(int, str) -> bool` signature into a [`Mod::FunctionType`]
/// tree.
pub fn parse_function_type(source: &str) -> Result<Mod, Error> {
    let tokens = tokenize(source)?;
    Ok(parser::Parser::new(tokens).parse_function_type_root()?)
}
