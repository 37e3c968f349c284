//! # gormgen-ddl
//!
//! A MySQL DDL parser tuned for `CREATE TABLE` statements as produced by
//! `SHOW CREATE TABLE` and `mysqldump`.
//!
//! This crate provides:
//! - A hand-written lexer understanding MySQL quoting and comment rules
//! - A recursive descent parser producing a typed AST for table definitions
//! - The database-reported type string of every column
//!
//! Statements other than `CREATE TABLE` are recognised and skipped, so a
//! whole schema dump can be fed in at once:
//!
//! ```rust
//! use gormgen_ddl::{Parser, Statement};
//!
//! let sql = "SET NAMES utf8mb4;
//!     CREATE TABLE `users` (
//!         `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,
//!         `email` varchar(255) NOT NULL,
//!         PRIMARY KEY (`id`)
//!     ) ENGINE=InnoDB COMMENT='accounts';";
//!
//! let statements = Parser::new(sql).parse_statements().unwrap();
//! let Statement::CreateTable(users) = &statements[1] else { panic!() };
//!
//! assert_eq!(users.name, "users");
//! assert_eq!(users.comment(), Some("accounts"));
//! assert_eq!(users.columns[0].field_type.info_schema_str(), "bigint(20) unsigned");
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{ColumnDef, ColumnOption, CreateTableStatement, DataType, Expr, FieldType, Statement};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, ParseOptions, Parser};
