//! Command-line front end for gormgen.
//!
//! Reads MySQL DDL from a file or the command line, resolves settings from
//! an optional JSON configuration file and the flags, and writes one Go
//! model file per table.
//!
//! # CLI Usage
//!
//! ```bash
//! # One file per table under ./model, stripping the t_ prefix
//! gormgen -f schema.sql -o model --table-prefix t_
//!
//! # Print the models of two tables as a single file
//! gormgen -f schema.sql -t users,orders --dry-run
//!
//! # Use the "shop" profile of gormgen.json, overwriting every existing model
//! gormgen --profile shop -u -e
//!
//! # Turn off the json tags the profile enables
//! gormgen --profile shop --json=false
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

pub use cli::Cli;
pub use config::{ConfigFile, Input, Profile, Settings, TableFilter};
pub use error::{CliError, Result};
pub use runner::{OutcomeStatus, RunReport, Runner, TableOutcome};
