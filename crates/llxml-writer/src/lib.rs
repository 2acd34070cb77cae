//! llxml Writer
//!
//! Serializes a parsed AST back into markup. Output re-parses to an AST equal
//! to the one it was written from.
//!
//! ```text
//! Node AST → render() / render_pretty() → markup text
//! ```
//!
//! # Example
//!
//! ```
//! let root = llxml_parser::Parser::parse("<a  k = 'v' >hi</a>").unwrap();
//! assert_eq!(llxml_writer::render(&root).unwrap(), "<a k=\"v\">hi</a>");
//! ```

pub mod markup;

pub use markup::{render, render_pretty};

/// Raised for trees the scanner could never have produced, which would not
/// survive a write/parse round trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Write error: {message}")]
pub struct WriteError {
    pub message: String,
}

impl WriteError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
