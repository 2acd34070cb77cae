//! Pull interface between a lexer and the parser.

use crate::token::{Span, Token, TokenKind};
use crate::LexerError;

/// A cursor over a token sequence with one token of lookahead.
///
/// Before the first call to [`advance`](TokenSource::advance), `current`
/// yields an `Eof` token at 1:1. Once `Eof` is reached, `advance` keeps
/// yielding `Eof`.
pub trait TokenSource {
    /// The lookahead token. Never fails.
    fn current(&self) -> &Token;

    /// Discard the current token and lex the next one.
    fn advance(&mut self) -> Result<&Token, LexerError>;
}

/// A token source replaying a fixed list of tokens.
///
/// Lets the parser run against scripted input without any source text.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    current: Token,
    consumed: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            current: Token::new(TokenKind::Eof, Span::origin()),
            consumed: 0,
        }
    }

    /// Number of tokens pulled from the stream so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl TokenSource for TokenStream {
    fn current(&self) -> &Token {
        &self.current
    }

    fn advance(&mut self) -> Result<&Token, LexerError> {
        self.current = match self.tokens.next() {
            Some(token) => {
                self.consumed += 1;
                token
            }
            None => {
                // Exhausted: park on EOF right after the last token.
                let span = self.current.span;
                let end = Span::new(span.end, span.end, span.line, span.column);
                Token::new(TokenKind::Eof, end)
            }
        };
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tok(kind: TokenKind, column: usize) -> Token {
        Token::new(kind, Span::new(column - 1, column, 1, column))
    }

    #[test]
    fn test_starts_on_eof() {
        let stream = TokenStream::new(vec![tok(TokenKind::TagStart, 1)]);
        assert_eq!(stream.current().kind, TokenKind::Eof);
        assert_eq!(stream.consumed(), 0);
    }

    #[test]
    fn test_advance_walks_tokens() {
        let mut stream = TokenStream::new(vec![
            tok(TokenKind::TagStart, 1),
            tok(TokenKind::Identifier("a".into()), 2),
        ]);
        assert_eq!(stream.advance().unwrap().kind, TokenKind::TagStart);
        assert_eq!(stream.current().kind, TokenKind::TagStart);
        assert_eq!(
            stream.advance().unwrap().kind,
            TokenKind::Identifier("a".into())
        );
        assert_eq!(stream.consumed(), 2);
    }

    #[test]
    fn test_exhausted_stream_yields_eof() {
        let mut stream = TokenStream::new(vec![tok(TokenKind::TagEnd, 4)]);
        stream.advance().unwrap();
        let eof = stream.advance().unwrap().clone();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span.start, 4);
        assert_eq!(stream.advance().unwrap().kind, TokenKind::Eof);
        assert_eq!(stream.consumed(), 1);
    }
}
