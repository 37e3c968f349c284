//! Struct tag construction.

use std::collections::HashSet;

use gormgen_ddl::ast::{ColumnDef, ColumnOption, Expr};

/// Everything the column scan learns while building the gorm tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnTags {
    /// The complete tag string, e.g. `json:"id" gorm:"column:id;primary_key"`.
    pub tag: String,
    /// The column carried an explicit `NULL` option.
    pub nullable: bool,
    /// Text of the column `COMMENT`, newlines removed.
    pub comment: Option<String>,
}

/// Resolves a DEFAULT value to the text written after `;default:`.
///
/// Literals print their value (strings unquoted, booleans as `1`/`0`, NULL
/// as nothing) and function calls their bare name. Any other expression
/// yields an empty string, meaning no default is emitted.
#[must_use]
pub fn default_value(expr: &Expr) -> String {
    match expr {
        Expr::Literal(literal) => literal.to_string(),
        Expr::Function(call) => call.name.clone(),
        Expr::Raw(_) => String::new(),
    }
}

/// Builds the gorm tag value for a column.
///
/// `primary_keys` holds the columns already marked by table-level
/// constraints; a column-level `PRIMARY KEY` adds the column to it so the
/// marker is written once.
pub fn build_gorm_tag(
    column: &ColumnDef,
    primary_keys: &mut HashSet<String>,
    gorm_type: bool,
) -> (String, bool, Option<String>) {
    let name = column.name.as_str();
    let mut tag = format!("column:{name}");

    if gorm_type {
        tag.push_str(";type:");
        tag.push_str(&column.field_type.info_schema_str());
    }
    if primary_keys.contains(name) {
        tag.push_str(";primary_key");
    }

    let mut not_null = false;
    let mut nullable = false;
    let mut comment = None;

    for option in &column.options {
        match option {
            ColumnOption::PrimaryKey => {
                if primary_keys.insert(name.to_string()) {
                    tag.push_str(";primary_key");
                }
            }
            ColumnOption::NotNull => not_null = true,
            ColumnOption::AutoIncrement => tag.push_str(";AUTO_INCREMENT"),
            ColumnOption::Default(expr) => {
                let value = default_value(expr);
                if !value.is_empty() {
                    tag.push_str(";default:");
                    tag.push_str(&value);
                }
            }
            ColumnOption::UniqueKey => tag.push_str(";unique"),
            ColumnOption::Null => nullable = true,
            ColumnOption::Comment(text) => comment = Some(text.replace('\n', "")),
            ColumnOption::OnUpdate(_)
            | ColumnOption::Collate(_)
            | ColumnOption::Generated { .. }
            | ColumnOption::Check(_)
            | ColumnOption::References(_) => {}
        }
    }

    if not_null && !primary_keys.contains(name) {
        tag.push_str(";NOT NULL");
    }

    (tag, nullable, comment)
}

/// Joins `(key, value)` pairs as `key:"value"` separated by single spaces.
#[must_use]
pub fn join_tags(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}:\"{value}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the full tag string for a column: the optional `json` pair, then
/// the `gorm` pair.
pub fn build_tags(
    column: &ColumnDef,
    primary_keys: &mut HashSet<String>,
    json_tag: bool,
    gorm_type: bool,
) -> ColumnTags {
    let (gorm, nullable, comment) = build_gorm_tag(column, primary_keys, gorm_type);

    let mut pairs = Vec::with_capacity(2);
    if json_tag {
        pairs.push(("json", column.name.as_str()));
    }
    pairs.push(("gorm", gorm.as_str()));

    ColumnTags {
        tag: join_tags(&pairs),
        nullable,
        comment,
    }
}
