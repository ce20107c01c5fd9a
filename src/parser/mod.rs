//! Parser: logos lexer, recursive-descent parser, typed AST wrappers.
//!
//! Produces a lossless rowan CST for the expression/type/directive surface
//! the rebind engines operate on.

pub mod ast;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;
mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse, parse_expression, parse_name, parse_type};
pub use syntax_kind::{
    SourceLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};
