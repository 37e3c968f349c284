//! Schema driver: statements in, one Go module out.

use std::collections::BTreeSet;

use gormgen_ddl::ast::{CreateTableStatement, Statement};
use gormgen_ddl::{ParseOptions, Parser};
use tracing::debug;

use crate::error::Result;
use crate::options::Options;
use crate::render::{render_file, render_struct};
use crate::transform::transform;

/// A generated Go source file, kept in parts until rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Go package name.
    pub package: String,
    /// Import paths, sorted and unique.
    pub imports: Vec<String>,
    /// Formatted struct fragments in statement order.
    pub structs: Vec<String>,
}

impl GeneratedModule {
    /// Returns true if no table produced a struct.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Renders the complete Go file.
    #[must_use]
    pub fn render(&self) -> String {
        render_file(&self.package, &self.imports, &self.structs)
    }
}

/// Generates one module from parsed statements.
///
/// Only `CREATE TABLE` statements contribute. The first failing table aborts
/// the whole generation.
///
/// # Errors
///
/// Returns the first [`GenerateError`](crate::GenerateError) raised by a
/// table.
pub fn generate(statements: &[Statement], options: &Options) -> Result<GeneratedModule> {
    let mut imports = BTreeSet::new();
    let mut structs = Vec::new();

    for table in statements.iter().filter_map(Statement::as_create_table) {
        let decl = transform(table, options)?;
        structs.push(render_struct(&decl)?);
        imports.extend(decl.imports);
    }

    debug!(
        tables = structs.len(),
        imports = imports.len(),
        package = %options.package,
        "Generated module"
    );

    Ok(GeneratedModule {
        package: options.package.clone(),
        imports: imports.into_iter().collect(),
        structs,
    })
}

/// Parses `sql` and generates a module from every table it declares.
///
/// # Errors
///
/// Returns [`GenerateError::Parse`](crate::GenerateError::Parse) when the
/// text does not parse, otherwise as [`generate`].
pub fn generate_sql(
    sql: &str,
    parse_options: &ParseOptions,
    options: &Options,
) -> Result<GeneratedModule> {
    let statements = Parser::with_options(sql, parse_options.clone()).parse_statements()?;
    debug!(statements = statements.len(), "Parsed DDL");
    generate(&statements, options)
}

/// Generates the module for exactly one table.
///
/// # Errors
///
/// As [`generate`].
pub fn generate_table(table: &CreateTableStatement, options: &Options) -> Result<GeneratedModule> {
    let decl = transform(table, options)?;
    let rendered = render_struct(&decl)?;
    Ok(GeneratedModule {
        package: options.package.clone(),
        imports: decl.imports.into_iter().collect(),
        structs: vec![rendered],
    })
}
