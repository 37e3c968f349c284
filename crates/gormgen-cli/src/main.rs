//! gormgen CLI
//!
//! Command-line tool generating gorm models from MySQL `CREATE TABLE`
//! statements.

use std::path::PathBuf;

use clap::Parser;
use gormgen_ddl::Statement;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use gormgen_cli::cli::Cli;
use gormgen_cli::config::{ConfigFile, DEFAULT_CONFIG_FILE, Settings};
use gormgen_cli::runner::{Runner, read_input, select_tables};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = ConfigFile::load(&config_path, cli.config.is_some()).await?;
    let profile = config.select(cli.profile.as_deref())?.merge(cli.overrides());
    let settings = Settings::resolve(profile)?;

    let sql = read_input(&settings.input).await?;
    let tables = select_tables(&sql, &settings)?;
    if tables.is_empty() {
        warn!("No CREATE TABLE statement selected, nothing to do.");
        return Ok(());
    }

    if cli.dry_run {
        let statements: Vec<Statement> = tables.into_iter().map(Statement::CreateTable).collect();
        let module = gormgen_core::generate(&statements, &settings.options)?;
        print!("{}", module.render());
        return Ok(());
    }

    let total = tables.len();
    let report = Runner::from_settings(&settings).run(tables).await?;
    let failed = report.failures().count();
    info!(
        written = report.written(),
        skipped = report.skipped(),
        failed,
        "Generation finished"
    );

    if failed > 0 {
        anyhow::bail!("{failed} of {total} tables failed");
    }
    Ok(())
}
