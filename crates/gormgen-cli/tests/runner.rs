use std::path::PathBuf;

use gormgen_cli::config::{Input, Profile, Settings, TableFilter};
use gormgen_cli::error::CliError;
use gormgen_cli::runner::{output_path, read_input, select_tables, OutcomeStatus, Runner};
use gormgen_core::Options;
use gormgen_ddl::ast::CreateTableStatement;

const SCHEMA: &str = "
SET NAMES utf8mb4;

CREATE TABLE `t_users` (
  `id` bigint(20) NOT NULL AUTO_INCREMENT,
  `user_name` varchar(64) NOT NULL,
  `created_at` datetime NULL,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB COMMENT='accounts';

CREATE TABLE `t_events` (
  `id` int NOT NULL,
  `kind` enum('a','b') NOT NULL
);

CREATE TABLE `t_orders` (
  `id` int PRIMARY KEY,
  `amount` decimal(10,2) NOT NULL
);
";

fn settings(profile: Profile) -> Settings {
    Settings::resolve(profile).unwrap()
}

fn tables(filter: &str) -> Vec<CreateTableStatement> {
    let settings = settings(Profile {
        sql: Some(SCHEMA.to_string()),
        table: Some(filter.to_string()),
        ..Profile::default()
    });
    select_tables(SCHEMA, &settings).unwrap()
}

fn options() -> Options {
    Options::new().with_table_prefix("t_")
}

#[test]
fn test_select_tables() {
    let all = tables("*");
    let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["t_users", "t_events", "t_orders"]);

    let some = tables("t_orders,missing");
    assert_eq!(some.len(), 1);
    assert_eq!(some[0].name, "t_orders");
}

#[test]
fn test_select_tables_parse_error() {
    let settings = settings(Profile {
        sql: Some(String::new()),
        ..Profile::default()
    });
    let err = select_tables("SET NAMES utf8mb4;\nCREATE TABLE t (id INT", &settings).unwrap_err();
    assert!(matches!(err, CliError::Parse { line: 2, column: 23, .. }));
    assert!(err.to_string().starts_with("Parse error at line 2, column 23: "));
}

#[tokio::test]
async fn test_read_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.sql");
    std::fs::write(&path, SCHEMA).unwrap();

    assert_eq!(read_input(&Input::File(path)).await.unwrap(), SCHEMA);
    assert_eq!(
        read_input(&Input::Sql(String::from("x"))).await.unwrap(),
        "x"
    );
    assert!(read_input(&Input::File(dir.path().join("missing.sql")))
        .await
        .is_err());
}

#[tokio::test]
async fn test_run_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("model");

    let report = Runner::new(options(), &out)
        .with_jobs(2)
        .run(tables("*"))
        .await
        .unwrap();

    let names: Vec<&str> = report.outcomes.iter().map(|o| o.table.as_str()).collect();
    assert_eq!(names, vec!["t_users", "t_events", "t_orders"]);
    assert_eq!(report.written(), 2);
    assert!(report.has_failures());
    assert_eq!(report.failures().next().unwrap().table, "t_events");

    let users = std::fs::read_to_string(out.join("users.go")).unwrap();
    assert!(users.starts_with("package model\n\nimport (\n\t\"database/sql\"\n)\n"));
    assert!(users.contains("// Users accounts\ntype Users struct {\n"));
    assert!(users.contains("\treturn \"t_users\"\n"));

    let orders = std::fs::read_to_string(out.join("orders.go")).unwrap();
    assert!(orders.contains("\"github.com/shopspring/decimal\""));
    assert!(orders.contains("decimal.Decimal"));
    assert!(!out.join("events.go").exists());
}

#[tokio::test]
async fn test_existing_files_skipped_unless_update() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("orders.go");
    std::fs::write(&existing, "keep me").unwrap();

    let report = Runner::new(options(), dir.path())
        .run(tables("t_orders"))
        .await
        .unwrap();
    assert!(matches!(
        &report.outcomes[0].status,
        OutcomeStatus::Skipped(path) if path == &existing
    ));
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");

    let report = Runner::new(options(), dir.path())
        .with_update(true)
        .run(tables("t_orders"))
        .await
        .unwrap();
    assert_eq!(report.written(), 1);
    assert!(std::fs::read_to_string(&existing)
        .unwrap()
        .contains("type Orders struct {"));
}

#[tokio::test]
async fn test_run_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(Profile {
        sql: Some(SCHEMA.to_string()),
        output: Some(dir.path().join("entity")),
        table: Some(String::from("t_users")),
        table_prefix: Some(String::from("t_")),
        package: Some(String::from("entity")),
        null_style: Some(String::from("ptr")),
        json_tag: Some(true),
        jobs: Some(1),
        ..Profile::default()
    });
    assert_eq!(settings.tables, TableFilter::Only(vec![String::from("t_users")]));

    let sql = read_input(&settings.input).await.unwrap();
    let selected = select_tables(&sql, &settings).unwrap();
    let report = Runner::from_settings(&settings).run(selected).await.unwrap();
    assert!(!report.has_failures());

    let path: PathBuf = output_path(&settings.output, "t_users", "t_");
    let users = std::fs::read_to_string(path).unwrap();
    assert!(users.starts_with("package entity\n\nimport (\n\t\"time\"\n)\n"));
    assert!(users.contains("*time.Time"));
    assert!(users.contains("json:\"user_name\""));
}

#[tokio::test]
async fn test_run_refuses_colliding_model_files() {
    let sql = "CREATE TABLE t_users (id INT); CREATE TABLE users (uid INT); CREATE TABLE t_orders (id INT);";
    let settings = settings(Profile {
        sql: Some(sql.to_string()),
        ..Profile::default()
    });
    let dir = tempfile::tempdir().unwrap();

    let report = Runner::new(options(), dir.path())
        .with_jobs(2)
        .run(select_tables(sql, &settings).unwrap())
        .await
        .unwrap();

    assert_eq!(report.written(), 2);
    let failed: Vec<_> = report.failures().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].table, "users");
    match &failed[0].status {
        OutcomeStatus::Failed(err @ CliError::DuplicateOutput { path, claimed_by, .. }) => {
            assert_eq!(path, &dir.path().join("users.go"));
            assert_eq!(claimed_by, "t_users");
            assert!(err.to_string().contains("Table 'users' would overwrite"));
        }
        other => panic!("unexpected status: {other:?}"),
    }

    let users = std::fs::read_to_string(dir.path().join("users.go")).unwrap();
    assert!(users.contains("\treturn \"t_users\"\n"));
    assert!(!users.contains("uid"));
}

#[tokio::test]
async fn test_run_empty() {
    let dir = tempfile::tempdir().unwrap();
    let report = Runner::new(Options::new(), dir.path()).run(vec![]).await.unwrap();
    assert!(report.outcomes.is_empty());
    assert!(!report.has_failures());
}
