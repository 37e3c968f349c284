//! Error types for the command-line tool.

use std::path::PathBuf;

use gormgen_core::{GenerateError, UnknownNullStyle};
use gormgen_ddl::ParseError;

/// Errors that can occur while running the generator from the command line.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// IO error (reading input, writing model files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be used.
    #[error("Invalid config file '{path}': {message}")]
    Config {
        /// Path to the configuration file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The configuration file is not valid JSON for the expected layout.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested profile is not declared in the configuration file.
    #[error("Profile '{0}' not found in config")]
    UnknownProfile(String),

    /// The null style is none of `sql`, `ptr` or `disabled`.
    #[error(transparent)]
    InvalidNullStyle(#[from] UnknownNullStyle),

    /// Neither `--sql` nor `--file` was given.
    #[error("No input: pass --sql or --file")]
    NoInput,

    /// The DDL input could not be parsed.
    #[error("Parse error at line {line}, column {column}: {source}")]
    Parse {
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// The parser diagnostic.
        source: ParseError,
    },

    /// `update` with every table selected, without `enforcement`.
    #[error("Refusing to overwrite the models of all tables: name tables with --table or pass --enforcement")]
    UnguardedUpdate,

    /// Two selected tables map to the same model file.
    #[error("Table '{table}' would overwrite {path}, already generated for table '{claimed_by}'")]
    DuplicateOutput {
        /// The model file both tables map to.
        path: PathBuf,
        /// The table that was refused.
        table: String,
        /// The earlier table that owns the file.
        claimed_by: String,
    },

    /// Model generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// A generation task did not complete.
    #[error("Generation task failed: {0}")]
    Join(String),
}


impl CliError {
    /// Wraps a parse error with its line and column within `source`.
    #[must_use]
    pub fn parse(err: ParseError, source: &str) -> Self {
        let (line, column) = err.line_col(source);
        Self::Parse {
            line,
            column,
            source: err,
        }
    }
}

/// Result type for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;
