//! llxml Parser
//!
//! Parses a pulled token stream into an Abstract Syntax Tree of tag blocks,
//! self-closing tags, attributes and text runs.
//!
//! The parser is a predictive LL(1) recursive-descent engine: one method per
//! grammar production, one token of lookahead, no backtracking. The first
//! syntax error aborts the parse.
//!
//! ```text
//! element     := tag-start ( children tag-end-marker )?
//! tag-start   := "<" IDENT attr* ( ">" | "/>" )
//! attr        := IDENT ( "=" STRING )?
//! children    := ( TEXT | IDENT | element )*
//! tag-end     := "</" IDENT ">"
//! ```
//!
//! # Example
//!
//! ```
//! use llxml_parser::Parser;
//!
//! let root = Parser::parse("<a><b/></a>").unwrap();
//! assert_eq!(root.name(), "a");
//! ```

pub mod ast;
pub mod parser;

pub use ast::{Attribute, Child, Node, OpenTag, SingleTag, TagBlock, TagEndMarker, TagStart, Text};
pub use parser::{Parser, ParserOptions};

use llxml_lexer::{LexerError, Span};

/// Syntax error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Syntax error at {line}:{column}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, at: Span) -> Self {
        Self {
            message: message.into(),
            line: at.line,
            column: at.column,
        }
    }
}

impl From<LexerError> for SyntaxError {
    fn from(e: LexerError) -> Self {
        Self {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}
