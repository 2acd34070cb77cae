//! llxml Lexer
//!
//! Tokenizes XML-like markup into a stream of tokens: tag markers
//! (`<`, `</`, `>`, `/>`), identifiers, quoted strings, the `=` operator
//! and text runs between tags.
//!
//! The parser pulls tokens one at a time through the [`TokenSource`] trait.
//! [`Scanner`] lexes source text lazily; [`TokenStream`] replays a scripted
//! token list.
//!
//! # Example
//!
//! ```
//! use llxml_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("").unwrap();
//! assert_eq!(tokens.len(), 1); // Just EOF
//! assert_eq!(tokens[0].kind, TokenKind::Eof);
//! ```

pub mod scanner;
pub mod source;
pub mod token;

pub use scanner::Scanner;
pub use source::{TokenSource, TokenStream};
pub use token::{Span, Token, TokenKind};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
