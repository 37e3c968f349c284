//! Command-line flags.
//!
//! Switches take an optional value so a profile setting can be turned off
//! from the command line: `--json` sets it, `--json=false` clears it, and
//! leaving the flag out keeps the profile value.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Profile;

/// Generate gorm-annotated Go structs from MySQL table definitions.
#[derive(Debug, Parser)]
#[command(name = "gormgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(long, env = "GORMGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Configuration profile (the file's default_profile if not specified).
    #[arg(long)]
    pub profile: Option<String>,

    /// File holding the CREATE TABLE statements.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// CREATE TABLE statements given inline.
    #[arg(short, long)]
    pub sql: Option<String>,

    /// Output directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Tables to generate, comma separated (`*` for all).
    #[arg(short, long)]
    pub table: Option<String>,

    /// Add a json tag to every field.
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub json: Option<bool>,

    /// Table name prefix stripped from struct and file names.
    #[arg(long)]
    pub table_prefix: Option<String>,

    /// Column name prefix stripped from field names.
    #[arg(long)]
    pub col_prefix: Option<String>,

    /// Never use nullable types.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub no_null: Option<bool>,

    /// Nullable types: sql.NullXxx (`sql`), *T (`ptr`) or none (`disabled`).
    #[arg(long)]
    pub null_style: Option<String>,

    /// Go package name.
    #[arg(short, long)]
    pub pkg: Option<String>,

    /// Write the column type into the gorm tag.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub with_type: Option<bool>,

    /// Always write the TableName method.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub with_tablename: Option<bool>,

    /// Map unsigned integers to uint32/uint64.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub unsigned: Option<bool>,

    /// Words written fully upper-case in names, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub acronyms: Option<Vec<String>>,

    /// Overwrite existing model files.
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub update: Option<bool>,

    /// Allow --update to overwrite the models of all tables.
    #[arg(short, long)]
    pub enforcement: bool,

    /// Maximum number of tables generated at once.
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Charset assumed for tables that declare none.
    #[arg(long)]
    pub charset: Option<String>,

    /// Collation assumed for tables that declare none.
    #[arg(long)]
    pub collation: Option<String>,

    /// Print all models as a single file instead of writing files.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The settings given as flags, as the top configuration layer.
    #[must_use]
    pub fn overrides(&self) -> Profile {
        Profile {
            file: self.file.clone(),
            sql: self.sql.clone(),
            output: self.output.clone(),
            table: self.table.clone(),
            json_tag: self.json,
            table_prefix: self.table_prefix.clone(),
            column_prefix: self.col_prefix.clone(),
            no_null_type: self.no_null,
            null_style: self.null_style.clone(),
            package: self.pkg.clone(),
            gorm_type: self.with_type,
            force_table_name: self.with_tablename,
            judge_unsigned: self.unsigned,
            acronyms: self.acronyms.clone(),
            update: self.update,
            enforcement: self.enforcement.then_some(true),
            jobs: self.jobs,
            charset: self.charset.clone(),
            collation: self.collation.clone(),
        }
    }
}
