//! DDL tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes MySQL DDL input.
#[derive(Clone)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips the rest of the current line.
    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Skips whitespace and comments.
    ///
    /// MySQL only treats `--` as a comment when it is followed by whitespace,
    /// so `DEFAULT --1` stays an expression. Versioned comments (`/*!40101 ... */`)
    /// are skipped like ordinary block comments. An unterminated block comment
    /// is returned as an error token.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.peek() == Some('#') {
                self.skip_line();
                continue;
            }

            if self.peek() == Some('-')
                && self.peek_next() == Some('-')
                && self.input[self.pos + 2..]
                    .chars()
                    .next()
                    .is_none_or(char::is_whitespace)
            {
                self.skip_line();
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.start = self.pos;
                self.advance(); // /
                self.advance(); // *
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => {
                            return Some(self.make_token(TokenKind::Error(String::from(
                                "Unterminated block comment",
                            ))));
                        }
                        _ => {}
                    }
                }
                continue;
            }

            return None;
        }
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(String::from(text)))
        }
    }

    /// Scans a backquoted identifier (e.g., `order`). A doubled backquote
    /// stands for a literal one.
    fn scan_quoted_identifier(&mut self) -> Token {
        self.advance(); // opening `
        let mut name = String::new();

        loop {
            match self.advance() {
                Some('`') if self.peek() == Some('`') => {
                    self.advance();
                    name.push('`');
                }
                Some('`') => break,
                Some(c) => name.push(c),
                None => {
                    return self.make_token(TokenKind::Error(String::from(
                        "Unterminated quoted identifier",
                    )));
                }
            }
        }

        self.make_token(TokenKind::Identifier(name))
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> Token {
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance(); // .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E')
            && self
                .peek_next()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            is_float = true;
            self.advance(); // e/E
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];

        if is_float {
            match text.parse::<f64>() {
                Ok(f) => self.make_token(TokenKind::Float(f)),
                Err(e) => self.make_token(TokenKind::Error(format!("Invalid float: {e}"))),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => self.make_token(TokenKind::Integer(i)),
                Err(e) => self.make_token(TokenKind::Error(format!("Invalid integer: {e}"))),
            }
        }
    }

    /// Scans a string literal quoted with `quote`.
    ///
    /// Both the SQL doubled-quote escape and MySQL backslash escapes are
    /// understood.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        value.push(quote);
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some('Z') => value.push('\u{1a}'),
                    // MySQL keeps the backslash for the LIKE wildcards.
                    Some(c @ ('%' | '_')) => {
                        value.push('\\');
                        value.push(c);
                    }
                    Some(c) => value.push(c),
                    None => {
                        return self.make_token(TokenKind::Error(String::from(
                            "Unterminated string literal",
                        )));
                    }
                },
                Some(c) => value.push(c),
                None => {
                    return self.make_token(TokenKind::Error(String::from(
                        "Unterminated string literal",
                    )));
                }
            }
        }

        self.make_token(TokenKind::String(value))
    }

    /// Scans a blob literal (X'...' or x'...').
    fn scan_blob(&mut self) -> Token {
        self.advance(); // X/x
        self.advance(); // opening quote

        let mut bytes = Vec::new();
        let mut hex_chars = String::new();

        loop {
            match self.peek() {
                Some('\'') => break,
                Some(c) if c.is_ascii_hexdigit() => {
                    hex_chars.push(c);
                    self.advance();

                    if hex_chars.len() == 2 {
                        if let Ok(byte) = u8::from_str_radix(&hex_chars, 16) {
                            bytes.push(byte);
                        }
                        hex_chars.clear();
                    }
                }
                Some(_) => {
                    return self.make_token(TokenKind::Error(String::from(
                        "Invalid character in blob literal",
                    )));
                }
                None => {
                    return self
                        .make_token(TokenKind::Error(String::from("Unterminated blob literal")));
                }
            }
        }

        if !hex_chars.is_empty() {
            return self.make_token(TokenKind::Error(String::from(
                "Odd number of hex digits in blob literal",
            )));
        }

        self.advance(); // closing quote
        self.make_token(TokenKind::Blob(bytes))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if let Some(error) = self.skip_whitespace_and_comments() {
            return error;
        }
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '.' => self.make_token(TokenKind::Dot),
            ':' => self.make_token(TokenKind::Colon),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '~' => self.make_token(TokenKind::BitNot),
            '?' => self.make_token(TokenKind::Question),
            '@' => self.make_token(TokenKind::At),
            '&' => self.make_token(TokenKind::BitAnd),
            '=' => self.make_token(TokenKind::Eq),
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                }
                Some('>') => {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                }
                _ => self.make_token(TokenKind::Lt),
            },
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Error(String::from("Unexpected character: !")))
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }

            '\'' | '"' => {
                self.pos = self.start;
                self.scan_string(c)
            }

            '`' => {
                self.pos = self.start;
                self.scan_quoted_identifier()
            }

            'X' | 'x' if self.peek() == Some('\'') => {
                self.pos = self.start;
                self.scan_blob()
            }

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            c if c.is_alphabetic() || c == '_' || c == '$' => {
                self.pos = self.start;
                self.scan_identifier()
            }

            _ => self.make_token(TokenKind::Error(format!("Unexpected character: {c}"))),
        }
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
