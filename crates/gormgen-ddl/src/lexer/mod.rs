//! MySQL DDL lexer.
//!
//! A hand-written lexer that turns DDL text (as produced by `SHOW CREATE TABLE`
//! or `mysqldump`) into a stream of tokens.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
