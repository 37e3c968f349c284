//! DDL Parser
//!
//! A hand-written recursive descent parser for MySQL `CREATE TABLE`
//! statements. Other statements in a dump are recognised and skipped.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::{ParseOptions, Parser};
