use crate::source::TokenSource;
use crate::token::{Span, Token, TokenKind};
use crate::LexerError;

/// Scanner mode determines how characters between markers are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerMode {
    /// Between tags: everything up to the next `<` is a text run.
    Content,
    /// Inside `<...>`: identifiers, strings, `=` and the closing markers.
    Tag,
}

/// Markup source scanner.
///
/// Lexes one token per [`advance`](TokenSource::advance) call, so the parser
/// drives the scanner rather than consuming a pre-built vector.
///
/// - `Vec<char>` source for index-based navigation
/// - Mode switch on every tag marker
/// - Position tracking on every token
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    mode: ScannerMode,
    current: Token,
}

impl Scanner {
    /// Create a new scanner for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            mode: ScannerMode::Content,
            current: Token::new(TokenKind::Eof, Span::origin()),
        }
    }

    /// Tokenize the entire source into a vector of tokens ending in `Eof`.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.advance()?.clone();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    /// The mode the next token will be lexed in.
    pub fn mode(&self) -> ScannerMode {
        self.mode
    }

    /// Scan the next token.
    fn scan_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Ok(self.token_here(TokenKind::Eof));
        }

        let ch = self.peek();

        match (self.mode, ch) {
            (_, '<') => Ok(self.scan_tag_open()),

            (ScannerMode::Content, _) => Ok(self.scan_text()),

            (ScannerMode::Tag, '>') => {
                let token = self.token_here(TokenKind::TagEnd);
                self.bump();
                self.mode = ScannerMode::Content;
                Ok(self.finish(token))
            }
            (ScannerMode::Tag, '/') if self.peek_next() == '>' => {
                let token = self.token_here(TokenKind::SingleTagEnd);
                self.bump();
                self.bump();
                self.mode = ScannerMode::Content;
                Ok(self.finish(token))
            }
            (ScannerMode::Tag, '=') => {
                let token = self.token_here(TokenKind::Equals);
                self.bump();
                Ok(self.finish(token))
            }
            (ScannerMode::Tag, '"' | '\'') => self.scan_string(),
            (ScannerMode::Tag, c) if c.is_alphabetic() || c == '_' => Ok(self.scan_identifier()),

            (ScannerMode::Tag, c) => Err(self.error(format!("Unexpected character: '{c}'"))),
        }
    }

    // --- Scanners ---

    /// Scan `<` or `</`. Either way the scanner enters tag mode.
    fn scan_tag_open(&mut self) -> Token {
        let start = self.token_here(TokenKind::TagStart);
        self.bump(); // consume `<`

        let token = if self.peek() == '/' {
            self.bump(); // consume `/`
            Token::new(TokenKind::TagEndStart, start.span)
        } else {
            start
        };

        self.mode = ScannerMode::Tag;
        self.finish(token)
    }

    /// Scan a text run up to the next `<`. Surrounding whitespace is dropped.
    fn scan_text(&mut self) -> Token {
        let start_line = self.line;
        let start_col = self.column;
        let start_pos = self.pos;

        let mut text = String::new();
        while !self.is_at_end() && self.peek() != '<' {
            text.push(self.peek());
            self.bump();
        }

        let value = text.trim_end().to_string();
        let end = start_pos + value.chars().count();
        let span = Span::new(start_pos, end, start_line, start_col);
        Token::new(TokenKind::Text(value), span)
    }

    /// Scan a quoted string literal. The value excludes the quotes and has
    /// escapes resolved.
    fn scan_string(&mut self) -> Result<Token, LexerError> {
        let quote = self.peek();
        let start_line = self.line;
        let start_col = self.column;
        let start_pos = self.pos;
        self.bump(); // consume opening quote

        let mut value = String::new();

        while !self.is_at_end() && self.peek() != quote {
            if self.peek() == '\\' {
                self.bump(); // consume backslash
                if self.is_at_end() {
                    return Err(self.error("Unterminated escape sequence".into()));
                }
                match self.peek() {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    '\'' => value.push('\''),
                    c => {
                        value.push('\\');
                        value.push(c);
                    }
                }
                self.bump();
            } else {
                value.push(self.peek());
                self.bump();
            }
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unterminated string".into(),
                line: start_line,
                column: start_col,
            });
        }

        self.bump(); // consume closing quote

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        Ok(Token::new(TokenKind::String(value), span))
    }

    /// Scan a tag or attribute name. Besides alphanumerics and `_`, names may
    /// contain `-`, `.` and `:` (`data-id`, `xml:lang`).
    fn scan_identifier(&mut self) -> Token {
        let start_line = self.line;
        let start_col = self.column;
        let start_pos = self.pos;

        let mut ident = String::new();
        while !self.is_at_end() && is_name_char(self.peek()) {
            ident.push(self.peek());
            self.bump();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        Token::new(TokenKind::Identifier(ident), span)
    }

    // --- Helpers ---

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.bump();
        }
    }

    /// A zero-width token at the current position. Marker scanners widen it
    /// with [`finish`](Self::finish) once they have consumed the marker.
    fn token_here(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.pos, self.pos, self.line, self.column))
    }

    fn finish(&self, mut token: Token) -> Token {
        token.span.end = self.pos;
        token
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn peek_next(&self) -> char {
        if self.pos + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.pos + 1]
        }
    }

    /// Consume one character, keeping line and column in step.
    /// `\r\n` counts as a single line break.
    fn bump(&mut self) {
        if self.is_at_end() {
            return;
        }
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch == '\n' || (ch == '\r' && self.peek() != '\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
        }
    }
}

impl TokenSource for Scanner {
    fn current(&self) -> &Token {
        &self.current
    }

    fn advance(&mut self) -> Result<&Token, LexerError> {
        let token = self.scan_token()?;
        tracing::trace!(kind = ?token.kind, at = %token.span, "token");
        self.current = token;
        Ok(&self.current)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}
