//! Statement AST types.

use super::{Expr, FieldType};

/// A parsed top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `CREATE TABLE`.
    CreateTable(CreateTableStatement),
    /// Any other statement (`SET`, `DROP TABLE`, `INSERT`, ...), skipped.
    Other,
}

impl Statement {
    /// Returns the table definition if this is a `CREATE TABLE`.
    #[must_use]
    pub const fn as_create_table(&self) -> Option<&CreateTableStatement> {
        match self {
            Self::CreateTable(create) => Some(create),
            Self::Other => None,
        }
    }
}

/// A `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateTableStatement {
    /// Raw table name, unquoted.
    pub name: String,
    /// Schema qualifier (`db.table`).
    pub schema: Option<String>,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// `TEMPORARY`.
    pub temporary: bool,
    /// Column definitions in declaration order.
    pub columns: Vec<ColumnDef>,
    /// Table-level keys and constraints in declaration order.
    pub constraints: Vec<Constraint>,
    /// Table options in declaration order.
    pub options: Vec<TableOption>,
    /// Effective default charset (table option, else parser default).
    pub charset: Option<String>,
    /// Effective default collation (table option, else parser default).
    pub collation: Option<String>,
}

impl CreateTableStatement {
    /// Returns the `COMMENT='...'` table option, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.options.iter().find_map(|opt| match opt {
            TableOption::Comment(c) => Some(c.as_str()),
            _ => None,
        })
    }

    /// Returns every column named by a table-level `PRIMARY KEY`.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &str> {
        self.constraints
            .iter()
            .filter(|c| c.kind == ConstraintKind::PrimaryKey)
            .flat_map(|c| c.columns.iter().map(String::as_str))
    }

    /// Looks up a column by name (case-insensitive, as MySQL does).
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Raw column name, unquoted.
    pub name: String,
    /// Declared type.
    pub field_type: FieldType,
    /// Column options in declaration order.
    pub options: Vec<ColumnOption>,
}

impl ColumnDef {
    /// Creates a column with no options.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            options: vec![],
        }
    }

    /// Adds an option (builder style).
    #[must_use]
    pub fn with_option(mut self, option: ColumnOption) -> Self {
        self.options.push(option);
        self
    }

    /// Returns true if the column carries an explicit `NULL` option.
    #[must_use]
    pub fn is_explicitly_nullable(&self) -> bool {
        self.options.contains(&ColumnOption::Null)
    }

    /// Returns true if the column carries `NOT NULL`.
    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.options.contains(&ColumnOption::NotNull)
    }
}

/// A column-level option.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOption {
    /// `PRIMARY KEY` (or bare `KEY`).
    PrimaryKey,
    /// `NOT NULL`.
    NotNull,
    /// `NULL`.
    Null,
    /// `AUTO_INCREMENT`.
    AutoIncrement,
    /// `DEFAULT expr`.
    Default(Expr),
    /// `UNIQUE [KEY]`.
    UniqueKey,
    /// `COMMENT 'text'`.
    Comment(String),
    /// `ON UPDATE expr`.
    OnUpdate(Expr),
    /// `COLLATE name`.
    Collate(String),
    /// `[GENERATED ALWAYS] AS (expr) [VIRTUAL | STORED]`.
    Generated {
        /// Expression source text.
        expr: String,
        /// `STORED` rather than `VIRTUAL`.
        stored: bool,
    },
    /// `CHECK (expr)`, kept as source text.
    Check(String),
    /// `REFERENCES table (cols) ...`, kept as source text.
    References(String),
}

/// The kind of a table-level constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// `PRIMARY KEY (...)`.
    PrimaryKey,
    /// `UNIQUE [KEY | INDEX] (...)`.
    Unique,
    /// `KEY` / `INDEX (...)`.
    Index,
    /// `FULLTEXT` / `SPATIAL` index.
    Fulltext,
    /// `FOREIGN KEY (...) REFERENCES ...`.
    ForeignKey,
    /// `CHECK (...)`.
    Check,
}

/// A table-level key or constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Constraint kind.
    pub kind: ConstraintKind,
    /// Constraint or index name.
    pub name: Option<String>,
    /// Key columns in declaration order.
    pub columns: Vec<String>,
}

/// A table option following the column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOption {
    /// `COMMENT='text'`.
    Comment(String),
    /// `ENGINE=name`.
    Engine(String),
    /// `[DEFAULT] CHARSET=name` / `CHARACTER SET=name`.
    Charset(String),
    /// `[DEFAULT] COLLATE=name`.
    Collate(String),
    /// `AUTO_INCREMENT=n`.
    AutoIncrement(u64),
    /// Anything else, e.g. `ROW_FORMAT=DYNAMIC`.
    Other {
        /// Option name, upper-cased.
        name: String,
        /// Option value as written.
        value: String,
    },
}
