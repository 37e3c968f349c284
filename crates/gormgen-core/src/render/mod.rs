//! Go source rendering.

mod format;

pub use format::{format_source, FormatError};

use crate::error::{GenerateError, Result};
use crate::transform::StructDecl;

/// Quotes `value` as a Go interpreted string literal.
#[must_use]
pub fn go_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Renders a struct declaration, followed by its `TableName()` accessor when
/// requested, as formatted Go source.
///
/// # Errors
///
/// Returns [`GenerateError::Format`] with the unformatted text when the
/// generated source does not pass the formatter.
pub fn render_struct(decl: &StructDecl) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!("// {}\n", decl.comment));
    out.push_str(&format!("type {} struct {{\n", decl.name));
    for field in &decl.fields {
        out.push_str(&format!("\t{} {} `{}`", field.name, field.go_type, field.tag));
        if let Some(comment) = &field.comment {
            out.push_str(&format!(" // {comment}"));
        }
        out.push('\n');
    }
    out.push_str("}\n");

    if decl.table_name_func {
        out.push_str("\n// TableName .\n");
        out.push_str(&format!("func (m *{}) TableName() string {{\n", decl.name));
        out.push_str(&format!("\treturn {}\n", go_quote(&decl.raw_table_name)));
        out.push_str("}\n");
    }

    format_source(&out).map_err(|err| GenerateError::Format {
        table: decl.raw_table_name.clone(),
        message: err.to_string(),
        unformatted: out,
    })
}

/// Assembles a complete Go file from a package name, import paths and
/// already rendered structs.
#[must_use]
pub fn render_file(package: &str, imports: &[String], structs: &[String]) -> String {
    let mut out = format!("package {package}\n");

    if !imports.is_empty() {
        out.push_str("\nimport (\n");
        for import in imports {
            out.push_str(&format!("\t{}\n", go_quote(import)));
        }
        out.push_str(")\n");
    }

    for decl in structs {
        out.push('\n');
        out.push_str(decl);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::FieldDecl;
    use std::collections::BTreeSet;

    fn decl(table_name_func: bool) -> StructDecl {
        StructDecl {
            name: String::from("User"),
            raw_table_name: String::from("user"),
            fields: vec![
                FieldDecl {
                    name: String::from("ID"),
                    go_type: String::from("int64"),
                    tag: String::from(r#"gorm:"column:id;primary_key""#),
                    comment: Some(String::from("key")),
                },
                FieldDecl {
                    name: String::from("Nickname"),
                    go_type: String::from("string"),
                    tag: String::from(r#"gorm:"column:nickname""#),
                    comment: None,
                },
            ],
            comment: String::from("User ."),
            table_name_func,
            imports: BTreeSet::new(),
        }
    }

    #[test]
    fn test_render_struct_with_accessor() {
        let out = render_struct(&decl(true)).unwrap();
        let expected = concat!(
            "// User .\n",
            "type User struct {\n",
            "\tID       int64  `gorm:\"column:id;primary_key\"` // key\n",
            "\tNickname string `gorm:\"column:nickname\"`\n",
            "}\n",
            "\n",
            "// TableName .\n",
            "func (m *User) TableName() string {\n",
            "\treturn \"user\"\n",
            "}\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_struct_without_accessor() {
        let out = render_struct(&decl(false)).unwrap();
        assert!(!out.contains("TableName"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_render_struct_format_failure() {
        let mut bad = decl(false);
        bad.fields[0].name = String::from("2Fa");
        match render_struct(&bad).unwrap_err() {
            GenerateError::Format {
                table, unformatted, ..
            } => {
                assert_eq!(table, "user");
                assert!(unformatted.contains("\t2Fa int64"));
            }
            other => panic!("Expected Format, got {other:?}"),
        }
    }

    #[test]
    fn test_render_file() {
        let out = render_file(
            "model",
            &[String::from("database/sql"), String::from("time")],
            &[String::from("type A struct {\n}\n")],
        );
        assert_eq!(
            out,
            "package model\n\nimport (\n\t\"database/sql\"\n\t\"time\"\n)\n\ntype A struct {\n}\n"
        );
        assert_eq!(render_file("model", &[], &[]), "package model\n");
    }

    #[test]
    fn test_go_quote() {
        assert_eq!(go_quote("user"), "\"user\"");
        assert_eq!(go_quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }
}
