//! Table to struct transformation.

use std::collections::{BTreeSet, HashSet};

use gormgen_ddl::ast::CreateTableStatement;
use tracing::debug;

use crate::error::{GenerateError, Result};
use crate::inflect::is_plural;
use crate::naming::{field_name, to_camel};
use crate::options::{NullStyle, Options};
use crate::tags::build_tags;
use crate::types::map_type;

/// One field of a generated struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Go field name.
    pub name: String,
    /// Go type.
    pub go_type: String,
    /// Struct tag, without backquotes.
    pub tag: String,
    /// Trailing comment taken from the column COMMENT.
    pub comment: Option<String>,
}

/// A generated struct, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Go type name.
    pub name: String,
    /// Table name as declared, returned by the `TableName()` accessor.
    pub raw_table_name: String,
    /// Fields in column declaration order.
    pub fields: Vec<FieldDecl>,
    /// Doc comment line.
    pub comment: String,
    /// Emit the `TableName()` accessor.
    pub table_name_func: bool,
    /// Import paths the field types need.
    pub imports: BTreeSet<String>,
}

/// Strips `prefix` from `raw`. Returns the name to camel-case and whether
/// the prefix matched.
///
/// A matching prefix is kept when stripping it would leave an empty name or
/// one starting with a digit.
fn strip_table_prefix<'a>(raw: &'a str, prefix: &str) -> (&'a str, bool) {
    if prefix.is_empty() {
        return (raw, false);
    }
    match raw.strip_prefix(prefix) {
        Some(rest) if rest.chars().next().is_some_and(|c| !c.is_numeric()) => (rest, true),
        Some(_) => (raw, true),
        None => (raw, false),
    }
}

/// Transforms one `CREATE TABLE` into a struct declaration.
///
/// # Errors
///
/// Returns [`GenerateError::UnsupportedType`] for the first column whose type
/// has no Go mapping; no partial struct is produced.
pub fn transform(table: &CreateTableStatement, options: &Options) -> Result<StructDecl> {
    let raw_table = table.name.as_str();
    let (stripped, prefix_matched) = strip_table_prefix(raw_table, &options.table_prefix);
    let table_name_func = prefix_matched || options.force_table_name || !is_plural(raw_table);

    let name = to_camel(stripped, &options.acronyms);
    let comment = table.comment().map_or_else(
        || format!("{name} ."),
        |c| format!("{name} {}", c.replace('\n', "")),
    );

    debug!(
        table = raw_table,
        name = %name,
        table_name_func,
        "Transforming table"
    );

    let mut primary_keys: HashSet<String> =
        table.primary_key_columns().map(str::to_string).collect();
    let style = options.effective_null_style();
    let mut fields = Vec::with_capacity(table.columns.len());
    let mut imports = BTreeSet::new();

    for column in &table.columns {
        let raw_column = column.name.as_str();
        let base = if options.column_prefix.is_empty() {
            raw_column
        } else {
            raw_column
                .strip_prefix(options.column_prefix.as_str())
                .unwrap_or(raw_column)
        };

        let tags = build_tags(column, &mut primary_keys, options.json_tag, options.gorm_type);

        // Only an explicit NULL option makes a column nullable.
        let column_style = if tags.nullable {
            style
        } else {
            NullStyle::Disabled
        };
        let go_type = map_type(&column.field_type, column_style, options.judge_unsigned)
            .ok_or_else(|| GenerateError::UnsupportedType {
                table: raw_table.to_string(),
                column: raw_column.to_string(),
                data_type: column.field_type.info_schema_str(),
            })?;

        debug!(
            table = raw_table,
            column = raw_column,
            go_type = %go_type.name,
            "Resolved column type"
        );

        if let Some(import) = go_type.import {
            imports.insert(import.to_string());
        }
        fields.push(FieldDecl {
            name: field_name(base, &options.acronyms),
            go_type: go_type.name,
            tag: tags.tag,
            comment: tags.comment,
        });
    }

    Ok(StructDecl {
        name,
        raw_table_name: raw_table.to_string(),
        fields,
        comment,
        table_name_func,
        imports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gormgen_ddl::ast::{ColumnDef, ColumnOption, Constraint, ConstraintKind, DataType, TableOption};

    fn table(name: &str, columns: Vec<ColumnDef>) -> CreateTableStatement {
        CreateTableStatement {
            name: name.to_string(),
            columns,
            ..CreateTableStatement::default()
        }
    }

    fn id_column() -> ColumnDef {
        ColumnDef::new("id", DataType::Bigint(Some(20))).with_option(ColumnOption::NotNull)
    }

    #[test]
    fn test_strip_table_prefix() {
        assert_eq!(strip_table_prefix("t_users", "t_"), ("users", true));
        assert_eq!(strip_table_prefix("t_2fa", "t_"), ("t_2fa", true));
        assert_eq!(strip_table_prefix("t_", "t_"), ("t_", true));
        assert_eq!(strip_table_prefix("users", "t_"), ("users", false));
        assert_eq!(strip_table_prefix("users", ""), ("users", false));
    }

    #[test]
    fn test_plural_table_has_no_accessor() {
        let decl = transform(&table("users", vec![id_column()]), &Options::new()).unwrap();
        assert_eq!(decl.name, "Users");
        assert!(!decl.table_name_func);
        assert_eq!(decl.comment, "Users .");
    }

    #[test]
    fn test_singular_table_gets_accessor() {
        let decl = transform(&table("user", vec![id_column()]), &Options::new()).unwrap();
        assert!(decl.table_name_func);
    }

    #[test]
    fn test_forced_accessor() {
        let options = Options::new().with_force_table_name(true);
        let decl = transform(&table("users", vec![id_column()]), &options).unwrap();
        assert!(decl.table_name_func);
    }

    #[test]
    fn test_prefix_match_sets_accessor() {
        let options = Options::new().with_table_prefix("t_");
        let decl = transform(&table("t_users", vec![id_column()]), &options).unwrap();
        assert_eq!(decl.name, "Users");
        assert_eq!(decl.raw_table_name, "t_users");
        assert!(decl.table_name_func);

        let decl = transform(&table("t_2fa_codes", vec![id_column()]), &options).unwrap();
        assert_eq!(decl.name, "T2FaCodes");
        assert!(decl.table_name_func);
    }

    #[test]
    fn test_table_comment() {
        let mut stmt = table("orders", vec![id_column()]);
        stmt.options
            .push(TableOption::Comment(String::from("customer\norders")));
        let decl = transform(&stmt, &Options::new()).unwrap();
        assert_eq!(decl.comment, "Orders customerorders");
    }

    #[test]
    fn test_nullable_override() {
        let stmt = table(
            "items",
            vec![
                ColumnDef::new("a", DataType::Varchar(Some(10))),
                ColumnDef::new("b", DataType::Varchar(Some(10))).with_option(ColumnOption::Null),
            ],
        );
        let decl = transform(&stmt, &Options::new()).unwrap();
        assert_eq!(decl.fields[0].go_type, "string");
        assert_eq!(decl.fields[1].go_type, "sql.NullString");
        assert!(decl.imports.contains("database/sql"));

        let options = Options::new().with_no_null_type(true);
        let decl = transform(&stmt, &options).unwrap();
        assert_eq!(decl.fields[1].go_type, "string");
        assert!(decl.imports.is_empty());
    }

    #[test]
    fn test_composite_primary_key() {
        let mut stmt = table(
            "user_roles",
            vec![
                ColumnDef::new("user_id", DataType::Int(None)).with_option(ColumnOption::NotNull),
                ColumnDef::new("role_id", DataType::Int(None)).with_option(ColumnOption::NotNull),
            ],
        );
        stmt.constraints.push(Constraint {
            kind: ConstraintKind::PrimaryKey,
            name: None,
            columns: vec![String::from("user_id"), String::from("role_id")],
        });
        let decl = transform(&stmt, &Options::new()).unwrap();
        assert_eq!(decl.fields[0].tag, r#"gorm:"column:user_id;primary_key""#);
        assert_eq!(decl.fields[1].tag, r#"gorm:"column:role_id;primary_key""#);
    }

    #[test]
    fn test_column_prefix() {
        let stmt = table(
            "users",
            vec![ColumnDef::new("f_user_name", DataType::Varchar(Some(10)))],
        );
        let options = Options::new().with_column_prefix("f_");
        let decl = transform(&stmt, &options).unwrap();
        assert_eq!(decl.fields[0].name, "UserName");
        assert_eq!(decl.fields[0].tag, r#"gorm:"column:f_user_name""#);
    }

    #[test]
    fn test_unsupported_type_aborts() {
        let stmt = table(
            "events",
            vec![
                id_column(),
                ColumnDef::new("kind", DataType::Enum(vec![String::from("a")])),
            ],
        );
        let err = transform(&stmt, &Options::new()).unwrap_err();
        match err {
            GenerateError::UnsupportedType {
                table,
                column,
                data_type,
            } => {
                assert_eq!(table, "events");
                assert_eq!(column, "kind");
                assert_eq!(data_type, "enum('a')");
            }
            other => panic!("Expected UnsupportedType, got {other:?}"),
        }
    }
}
