//! Error types for model generation.

use gormgen_ddl::ParseError;

/// Errors that can occur while generating Go models.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerateError {
    /// The DDL text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A column type has no Go mapping.
    #[error("Table '{table}': column '{column}' has unsupported type '{data_type}'")]
    UnsupportedType {
        /// Raw table name.
        table: String,
        /// Raw column name.
        column: String,
        /// Type as the database reports it.
        data_type: String,
    },

    /// The rendered struct is not well-formed Go source.
    #[error("Table '{table}': failed to format generated code: {message}")]
    Format {
        /// Raw table name.
        table: String,
        /// Formatter diagnostic.
        message: String,
        /// The raw, unformatted struct text.
        unformatted: String,
    },
}

impl GenerateError {
    /// Returns the raw name of the table that failed, if the error is tied
    /// to one.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Parse(_) => None,
            Self::UnsupportedType { table, .. } | Self::Format { table, .. } => Some(table),
        }
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
