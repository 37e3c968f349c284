//! Concurrent generation of one model file per table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gormgen_core::{generate_table, Options};
use gormgen_ddl::ast::{CreateTableStatement, Statement};
use gormgen_ddl::Parser;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::config::{Input, Settings, TableFilter};
use crate::error::{CliError, Result};

/// What happened to one table.
#[derive(Debug)]
pub enum OutcomeStatus {
    /// The model file already existed and `update` was off.
    Skipped(PathBuf),
    /// The model file was written.
    Written(PathBuf),
    /// Generation or the write failed.
    Failed(CliError),
}

/// The outcome of generating one table.
#[derive(Debug)]
pub struct TableOutcome {
    /// Raw table name.
    pub table: String,
    pub status: OutcomeStatus,
}

impl TableOutcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }
}

/// Outcomes of a run, in table declaration order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<TableOutcome>,
}

impl RunReport {
    /// Outcomes of the tables that failed.
    pub fn failures(&self) -> impl Iterator<Item = &TableOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    #[must_use]
    pub fn written(&self) -> usize {
        self.count(|status| matches!(status, OutcomeStatus::Written(_)))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|status| matches!(status, OutcomeStatus::Skipped(_)))
    }

    fn count(&self, pred: impl Fn(&OutcomeStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Reads the DDL source of a run.
///
/// # Errors
///
/// Returns an IO error if the input file cannot be read.
pub async fn read_input(input: &Input) -> Result<String> {
    match input {
        Input::Sql(sql) => Ok(sql.clone()),
        Input::File(path) => {
            debug!(path = %path.display(), "Reading DDL file");
            Ok(tokio::fs::read_to_string(path).await?)
        }
    }
}

/// Parses `sql` and keeps the tables selected by the settings, in
/// declaration order. Requested names that match no table are logged.
///
/// # Errors
///
/// Returns the parse error if the DDL is malformed.
pub fn select_tables(sql: &str, settings: &Settings) -> Result<Vec<CreateTableStatement>> {
    let statements = Parser::with_options(sql, settings.parse_options.clone())
        .parse_statements()
        .map_err(|err| CliError::parse(err, sql))?;
    let tables: Vec<CreateTableStatement> = statements
        .into_iter()
        .filter_map(|statement| match statement {
            Statement::CreateTable(table) => Some(table),
            Statement::Other => None,
        })
        .filter(|table| settings.tables.matches(&table.name))
        .collect();

    if let TableFilter::Only(names) = &settings.tables {
        for name in names {
            if !tables.iter().any(|table| &table.name == name) {
                warn!(table = %name, "Table not found in input");
            }
        }
    }
    Ok(tables)
}

/// Path of the model file for `table`: the table name without the table
/// prefix, under `output`.
#[must_use]
pub fn output_path(output: &Path, table: &str, prefix: &str) -> PathBuf {
    let stem = match table.strip_prefix(prefix) {
        Some(rest) if !prefix.is_empty() && !rest.is_empty() => rest,
        _ => table,
    };
    output.join(format!("{stem}.go"))
}

/// Generates and writes one model file per table, several tables at once.
///
/// A failing table never stops the others; every table gets an outcome.
#[derive(Debug, Clone)]
pub struct Runner {
    options: Arc<Options>,
    output: PathBuf,
    update: bool,
    jobs: usize,
}

impl Runner {
    /// Creates a runner writing into `output`, skipping existing files and
    /// running one table per available CPU.
    pub fn new(options: Options, output: impl Into<PathBuf>) -> Self {
        Self {
            options: Arc::new(options),
            output: output.into(),
            update: false,
            jobs: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.options.clone(), settings.output.clone())
            .with_update(settings.update)
            .with_jobs(settings.jobs)
    }

    /// Overwrite existing model files.
    #[must_use]
    pub const fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Maximum number of tables generated concurrently.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Runs every table and waits for all of them.
    ///
    /// A table whose model file is already claimed by an earlier table is
    /// not generated and fails with [`CliError::DuplicateOutput`].
    ///
    /// # Errors
    ///
    /// Returns an IO error if the output directory cannot be created.
    /// Per-table failures are reported in the [`RunReport`].
    pub async fn run(&self, tables: Vec<CreateTableStatement>) -> Result<RunReport> {
        tokio::fs::create_dir_all(&self.output).await?;

        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let mut join_set = JoinSet::new();
        let mut pending = HashMap::new();
        let mut outcomes = Vec::with_capacity(tables.len());
        let mut claimed: HashMap<PathBuf, String> = HashMap::new();

        for (index, table) in tables.into_iter().enumerate() {
            let path = output_path(&self.output, &table.name, &self.options.table_prefix);
            if let Some(owner) = claimed.get(&path) {
                let err = CliError::DuplicateOutput {
                    path,
                    table: table.name.clone(),
                    claimed_by: owner.clone(),
                };
                error!(table = %table.name, error = %err, "Model generation failed");
                outcomes.push((
                    index,
                    TableOutcome {
                        table: table.name,
                        status: OutcomeStatus::Failed(err),
                    },
                ));
                continue;
            }
            claimed.insert(path.clone(), table.name.clone());

            let semaphore = Arc::clone(&semaphore);
            let options = Arc::clone(&self.options);
            let update = self.update;
            let name = table.name.clone();

            let handle = join_set.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    let status = OutcomeStatus::Failed(CliError::Join(String::from(
                        "task limiter closed",
                    )));
                    return (index, TableOutcome { table: table.name, status });
                };
                (index, generate_one(table, &options, path, update).await)
            });
            pending.insert(handle.id(), (index, name));
        }

        while let Some(joined) = join_set.join_next_with_id().await {
            match joined {
                Ok((_, outcome)) => outcomes.push(outcome),
                Err(err) => {
                    let (index, table) = pending.remove(&err.id()).unwrap_or_default();
                    error!(table = %table, error = %err, "Generation task panicked");
                    outcomes.push((
                        index,
                        TableOutcome {
                            table,
                            status: OutcomeStatus::Failed(CliError::Join(err.to_string())),
                        },
                    ));
                }
            }
        }

        outcomes.sort_by_key(|(index, _)| *index);
        Ok(RunReport {
            outcomes: outcomes.into_iter().map(|(_, outcome)| outcome).collect(),
        })
    }
}

async fn generate_one(
    table: CreateTableStatement,
    options: &Options,
    path: PathBuf,
    update: bool,
) -> TableOutcome {
    let status = match write_model(&table, options, &path, update).await {
        Ok(true) => {
            info!(table = %table.name, path = %path.display(), "Model written");
            OutcomeStatus::Written(path)
        }
        Ok(false) => {
            info!(table = %table.name, path = %path.display(), "Model exists, skipping");
            OutcomeStatus::Skipped(path)
        }
        Err(err) => {
            error!(table = %table.name, error = %err, "Model generation failed");
            OutcomeStatus::Failed(err)
        }
    };
    TableOutcome {
        table: table.name,
        status,
    }
}

/// Returns false when the file exists and was left alone.
async fn write_model(
    table: &CreateTableStatement,
    options: &Options,
    path: &Path,
    update: bool,
) -> Result<bool> {
    if !update && tokio::fs::try_exists(path).await? {
        return Ok(false);
    }
    info!(table = %table.name, "Generating model");
    let module = generate_table(table, options)?;
    tokio::fs::write(path, module.render()).await?;
    Ok(true)
}
