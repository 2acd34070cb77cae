use std::fmt;

/// A position in source text, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Empty span at the very beginning of a document (1:1).
    pub fn origin() -> Self {
        Self::new(0, 0, 1, 1)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token classification for markup source.
///
/// Data-carrying variants embed their value directly (no separate `value` field on Token).
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Markers
    TagStart,     // <
    TagEndStart,  // </
    TagEnd,       // >
    SingleTagEnd, // />

    // Literals (carry data)
    Identifier(String),
    Text(String),
    String(String),

    // Operators
    Equals,

    // End of input
    Eof,
}

impl TokenKind {
    /// The string payload of identifiers, text runs and string literals.
    pub fn value(&self) -> Option<&str> {
        match self {
            TokenKind::Identifier(s) | TokenKind::Text(s) | TokenKind::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::TagStart => f.write_str("`<`"),
            TokenKind::TagEndStart => f.write_str("`</`"),
            TokenKind::TagEnd => f.write_str("`>`"),
            TokenKind::SingleTagEnd => f.write_str("`/>`"),
            TokenKind::Identifier(name) => write!(f, "identifier `{name}`"),
            TokenKind::Text(text) => write!(f, "text \"{text}\""),
            TokenKind::String(value) => write!(f, "string \"{value}\""),
            TokenKind::Equals => f.write_str("`=`"),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

/// A token produced by the markup lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
