//! Document parser for llxml.
//!
//! Pulls tokens from a [`TokenSource`] and builds the AST by recursive
//! descent. Each nested element is one recursive `parse_element` call; the
//! closing tag name is checked against the opening one as the call unwinds.

use crate::ast::{Attribute, Child, Node, OpenTag, SingleTag, TagBlock, TagEndMarker, TagStart, Text};
use crate::SyntaxError;
use llxml_lexer::{Scanner, Span, Token, TokenKind, TokenSource};

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of nested elements. Deeper input fails with a
    /// `SyntaxError` instead of exhausting the stack.
    pub max_depth: usize,
}

impl ParserOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Predictive recursive-descent parser.
///
/// Holds no state besides the token source cursor and the current nesting
/// depth. One token of lookahead always determines the next production.
pub struct Parser<S> {
    source: S,
    options: ParserOptions,
    depth: usize,
}

impl Parser<Scanner> {
    /// Parse source text into its root element.
    pub fn parse(source: &str) -> Result<Node, SyntaxError> {
        Self::parse_with(source, ParserOptions::default())
    }

    /// Parse source text with explicit options.
    pub fn parse_with(source: &str, options: ParserOptions) -> Result<Node, SyntaxError> {
        let mut parser = Parser::with_options(Scanner::new(source), options)?;
        parser.parse_document()
    }
}

impl<S: TokenSource> Parser<S> {
    /// Create a parser and prime the token source with its first token.
    pub fn new(source: S) -> Result<Self, SyntaxError> {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(mut source: S, options: ParserOptions) -> Result<Self, SyntaxError> {
        source.advance()?;
        Ok(Self {
            source,
            options,
            depth: 0,
        })
    }

    /// The lookahead token.
    pub fn current(&self) -> &Token {
        self.source.current()
    }

    /// Give back the token source, positioned wherever parsing stopped.
    pub fn into_source(self) -> S {
        self.source
    }

    // =========================================================================
    // Productions
    // =========================================================================

    /// Parse the root element and require the input to end after it.
    pub fn parse_document(&mut self) -> Result<Node, SyntaxError> {
        let root = self.parse_element()?;
        if self.peek().kind != TokenKind::Eof {
            return Err(self.error(format!(
                "unexpected {} after the root element",
                self.peek().kind
            )));
        }
        Ok(root)
    }

    /// Parse an element:
    /// ```text
    /// <name attr*/>
    /// <name attr*> (text | element)* </name>
    /// ```
    pub fn parse_element(&mut self) -> Result<Node, SyntaxError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(format!(
                "nesting depth exceeds the limit of {}",
                self.options.max_depth
            )));
        }

        self.depth += 1;
        let result = self.parse_element_body();
        self.depth -= 1;
        result
    }

    fn parse_element_body(&mut self) -> Result<Node, SyntaxError> {
        tracing::trace!(token = %self.peek().kind, depth = self.depth, "element");

        let open = match self.parse_tag_start()? {
            TagStart::Single(tag) => return Ok(Node::Single(tag)),
            TagStart::Open(tag) => tag,
        };

        let mut block = TagBlock::from(open);

        while self.peek().kind != TokenKind::TagEndStart {
            match &self.peek().kind {
                TokenKind::Identifier(_) | TokenKind::Text(_) => {
                    let text = self.parse_text()?;
                    block.children.push(Child::Text(text));
                }
                TokenKind::TagStart => {
                    let node = self.parse_element()?;
                    block.children.push(Child::Element(node));
                }
                other => {
                    return Err(self.error(format!(
                        "unknown child node kind: {other} inside <{}>",
                        block.name
                    )));
                }
            }
        }

        let end = self.parse_tag_end_marker()?;
        if end.name != block.name {
            return Err(self.error_at(
                format!("expected `</{}>`, found `</{}>`", block.name, end.name),
                end.span,
            ));
        }

        tracing::debug!(tag = %block.name, children = block.children.len(), "closed block");
        Ok(Node::Block(block))
    }

    /// Parse `<name attr* >` or `<name attr* />`.
    pub fn parse_tag_start(&mut self) -> Result<TagStart, SyntaxError> {
        tracing::trace!(token = %self.peek().kind, "tag start");

        if self.peek().kind != TokenKind::TagStart {
            return Err(self.error(format!(
                "expected a tag-start marker `<`, found {}",
                self.peek().kind
            )));
        }
        self.advance()?; // consume <

        let name = match &self.peek().kind {
            TokenKind::Identifier(name) => name.clone(),
            other => return Err(self.error(format!("expected a tag name, found {other}"))),
        };
        self.advance()?;

        let mut attributes = Vec::new();
        while !matches!(
            self.peek().kind,
            TokenKind::TagEnd | TokenKind::SingleTagEnd | TokenKind::Eof
        ) {
            attributes.push(self.parse_attr()?);
        }

        let tag = match &self.peek().kind {
            TokenKind::TagEnd => TagStart::Open(OpenTag { name, attributes }),
            TokenKind::SingleTagEnd => TagStart::Single(SingleTag { name, attributes }),
            other => {
                return Err(self.error(format!(
                    "expected a tag-end marker `>` or `/>` for <{name}>, found {other}"
                )));
            }
        };
        self.advance()?; // consume > or />

        Ok(tag)
    }

    /// Parse `name="value"` or a bare `name`.
    pub fn parse_attr(&mut self) -> Result<Attribute, SyntaxError> {
        // The caller's loop guard decides this is a key; any payload becomes
        // the name and payload-less markers give an empty one.
        let key = self.peek().clone();
        let name = key.kind.value().unwrap_or_default().to_string();
        self.advance()?;

        match &self.peek().kind {
            TokenKind::Equals => {
                self.advance()?; // consume =
                let value = match &self.peek().kind {
                    TokenKind::String(value) => value.clone(),
                    _ => {
                        return Err(
                            self.error_at(format!("attribute `{name}` has no value"), key.span)
                        );
                    }
                };
                self.advance()?;
                Ok(Attribute { name, value })
            }
            // Bare attribute: leave the terminator for the caller.
            TokenKind::Identifier(_) | TokenKind::TagEnd | TokenKind::SingleTagEnd => {
                Ok(Attribute::bare(name))
            }
            other => Err(self.error_at(
                format!("unrecognized token {other} after attribute `{name}`"),
                key.span,
            )),
        }
    }

    /// Parse `</name>`.
    pub fn parse_tag_end_marker(&mut self) -> Result<TagEndMarker, SyntaxError> {
        tracing::trace!(token = %self.peek().kind, "tag end");

        if self.peek().kind != TokenKind::TagEndStart {
            return Err(self.error(format!("expected `</`, found {}", self.peek().kind)));
        }
        let span = self.peek().span;
        self.advance()?; // consume </

        let name = match &self.peek().kind {
            TokenKind::Identifier(name) => name.clone(),
            other => return Err(self.error(format!("expected a tag name, found {other}"))),
        };
        self.advance()?;

        if self.peek().kind != TokenKind::TagEnd {
            return Err(self.error(format!(
                "expected a tag-end marker `>` for </{name}>, found {}",
                self.peek().kind
            )));
        }
        self.advance()?; // consume >

        Ok(TagEndMarker { name, span })
    }

    /// Parse a text run. Identifiers are accepted as text too.
    pub fn parse_text(&mut self) -> Result<Text, SyntaxError> {
        let value = match self.peek().kind.value() {
            Some(value) => value.to_string(),
            None => return Err(self.error(format!("expected text, found {}", self.peek().kind))),
        };
        self.advance()?;
        Ok(Text { value })
    }

    // =========================================================================
    // Token navigation helpers
    // =========================================================================

    fn peek(&self) -> &Token {
        self.source.current()
    }

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.source.advance()?;
        Ok(())
    }

    fn error(&self, message: String) -> SyntaxError {
        self.error_at(message, self.peek().span)
    }

    fn error_at(&self, message: String, at: Span) -> SyntaxError {
        tracing::debug!(%message, line = at.line, column = at.column, "syntax error");
        SyntaxError::new(message, at)
    }
}
