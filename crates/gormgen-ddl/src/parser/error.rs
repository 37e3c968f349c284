//! Parser error types.

use crate::lexer::{Span, TokenKind};

/// A parse error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        if found == TokenKind::Eof {
            return Self::unexpected_eof(expected, span);
        }
        let expected_str: String = expected.into();
        let message = match &found {
            TokenKind::Error(lex) => format!("{lex} (expected {expected_str})"),
            other => format!("Unexpected token: expected {expected_str}, found {other:?}"),
        };
        Self {
            message,
            span,
            expected: Some(expected_str),
            found: Some(found),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected_str: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected_str}"),
            span,
            expected: Some(expected_str),
            found: Some(TokenKind::Eof),
        }
    }

    /// Returns the 1-based line and column of the error within `source`.
    #[must_use]
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        self.span.line_col(source)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} at position {}..{}",
            self.message, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for ParseError {}
