#![allow(dead_code)]

use gormgen_ddl::ast::{ColumnDef, CreateTableStatement, Statement};
use gormgen_ddl::{ParseError, Parser};

pub fn parse_all(sql: &str) -> Vec<Statement> {
    Parser::new(sql)
        .parse_statements()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statements()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_table(sql: &str) -> CreateTableStatement {
    let mut tables: Vec<CreateTableStatement> = parse_all(sql)
        .into_iter()
        .filter_map(|s| match s {
            Statement::CreateTable(c) => Some(c),
            Statement::Other => None,
        })
        .collect();
    assert_eq!(tables.len(), 1, "Expected exactly one CREATE TABLE in: {sql}");
    tables.remove(0)
}

/// Parses `CREATE TABLE t (<column>)` and returns the single column.
pub fn parse_column(column: &str) -> ColumnDef {
    let mut table = parse_table(&format!("CREATE TABLE t ({column})"));
    assert_eq!(table.columns.len(), 1);
    table.columns.remove(0)
}

pub fn type_str(column: &str) -> String {
    parse_column(column).field_type.info_schema_str()
}
