//! Configuration file, profiles and setting resolution.
//!
//! Settings come from three layers, later layers winning: built-in defaults,
//! the selected profile of the JSON configuration file, and the flags given
//! on the command line.
//!
//! ```json
//! {
//!   "default_profile": "shop",
//!   "profiles": {
//!     "shop": { "file": "schema.sql", "output": "model", "table_prefix": "t_" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use gormgen_core::{Acronyms, NullStyle, Options};
use gormgen_ddl::ParseOptions;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "gormgen.json";

/// Profile used when neither `--profile` nor `default_profile` names one.
pub const DEFAULT_PROFILE: &str = "default";

/// One named set of settings. Every field is optional; unset fields fall
/// through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// File holding the DDL.
    pub file: Option<PathBuf>,
    /// DDL given inline; takes precedence over `file`.
    pub sql: Option<String>,
    /// Directory receiving one `.go` file per table.
    pub output: Option<PathBuf>,
    /// Comma-separated table names, or `*` for all.
    pub table: Option<String>,
    pub json_tag: Option<bool>,
    pub table_prefix: Option<String>,
    pub column_prefix: Option<String>,
    pub no_null_type: Option<bool>,
    /// `sql`, `ptr` or `disabled`.
    pub null_style: Option<String>,
    pub package: Option<String>,
    pub gorm_type: Option<bool>,
    pub force_table_name: Option<bool>,
    pub judge_unsigned: Option<bool>,
    /// Replaces the default acronym set.
    pub acronyms: Option<Vec<String>>,
    /// Overwrite existing model files.
    pub update: Option<bool>,
    /// Allow `update` with every table selected. Command line only.
    #[serde(skip)]
    pub enforcement: Option<bool>,
    /// Maximum number of tables generated at once.
    pub jobs: Option<usize>,
    /// Charset assumed for tables that declare none.
    pub charset: Option<String>,
    /// Collation assumed for tables that declare none.
    pub collation: Option<String>,
}

impl Profile {
    /// Layers `over` on top of `self`: every field set in `over` wins.
    #[must_use]
    pub fn merge(self, over: Self) -> Self {
        Self {
            file: over.file.or(self.file),
            sql: over.sql.or(self.sql),
            output: over.output.or(self.output),
            table: over.table.or(self.table),
            json_tag: over.json_tag.or(self.json_tag),
            table_prefix: over.table_prefix.or(self.table_prefix),
            column_prefix: over.column_prefix.or(self.column_prefix),
            no_null_type: over.no_null_type.or(self.no_null_type),
            null_style: over.null_style.or(self.null_style),
            package: over.package.or(self.package),
            gorm_type: over.gorm_type.or(self.gorm_type),
            force_table_name: over.force_table_name.or(self.force_table_name),
            judge_unsigned: over.judge_unsigned.or(self.judge_unsigned),
            acronyms: over.acronyms.or(self.acronyms),
            update: over.update.or(self.update),
            enforcement: over.enforcement.or(self.enforcement),
            jobs: over.jobs.or(self.jobs),
            charset: over.charset.or(self.charset),
            collation: over.collation.or(self.collation),
        }
    }
}

/// The JSON configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Profile selected when `--profile` is not given.
    pub default_profile: Option<String>,
    /// Profiles by name.
    pub profiles: BTreeMap<String, Profile>,
}

impl ConfigFile {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Json`] if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads the configuration file at `path`.
    ///
    /// A missing file yields an empty configuration, unless `required` is
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if a required file is missing, and an IO
    /// or JSON error if the file cannot be read or parsed.
    pub async fn load(path: &Path, required: bool) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                debug!(path = %path.display(), "Loaded config file");
                Self::from_json(&text)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(CliError::Config {
                path: path.to_path_buf(),
                message: String::from("file not found"),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the profile named `requested`, else the file's
    /// `default_profile`, else the `default` profile.
    ///
    /// A missing `default` profile is empty; any other missing name is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownProfile`] for an undeclared profile name.
    pub fn select(&self, requested: Option<&str>) -> Result<Profile> {
        let name = requested
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE);
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if name == DEFAULT_PROFILE => Ok(Profile::default()),
            None => Err(CliError::UnknownProfile(name.to_string())),
        }
    }
}

/// Where the DDL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Sql(String),
    File(PathBuf),
}

/// Which tables to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableFilter {
    All,
    Only(Vec<String>),
}

impl TableFilter {
    /// Parses `*` (or an empty value) as all tables, anything else as a
    /// comma-separated list of names.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let names: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        if names.is_empty() || names.iter().any(|name| name == "*") {
            Self::All
        } else {
            Self::Only(names)
        }
    }

    #[must_use]
    pub fn matches(&self, table: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.iter().any(|name| name == table),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: Input,
    pub output: PathBuf,
    pub tables: TableFilter,
    pub update: bool,
    pub jobs: usize,
    pub options: Options,
    pub parse_options: ParseOptions,
}

fn default_jobs() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

impl Settings {
    /// Resolves a merged profile against the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NoInput`] when no DDL source is set,
    /// [`CliError::UnguardedUpdate`] when `update` would overwrite every
    /// table without `enforcement`, and [`CliError::InvalidNullStyle`] for
    /// an unknown null style.
    pub fn resolve(profile: Profile) -> Result<Self> {
        let input = match (profile.sql, profile.file) {
            (Some(sql), _) => Input::Sql(sql),
            (None, Some(file)) => Input::File(file),
            (None, None) => return Err(CliError::NoInput),
        };

        let tables = profile
            .table
            .as_deref()
            .map_or(TableFilter::All, TableFilter::parse);
        let update = profile.update.unwrap_or(false);
        if update && tables == TableFilter::All && !profile.enforcement.unwrap_or(false) {
            return Err(CliError::UnguardedUpdate);
        }

        let mut options = Options::new()
            .with_json_tag(profile.json_tag.unwrap_or(false))
            .with_no_null_type(profile.no_null_type.unwrap_or(false))
            .with_gorm_type(profile.gorm_type.unwrap_or(false))
            .with_force_table_name(profile.force_table_name.unwrap_or(false))
            .with_judge_unsigned(profile.judge_unsigned.unwrap_or(false));
        if let Some(prefix) = profile.table_prefix {
            options = options.with_table_prefix(prefix);
        }
        if let Some(prefix) = profile.column_prefix {
            options = options.with_column_prefix(prefix);
        }
        if let Some(style) = profile.null_style.filter(|s| !s.trim().is_empty()) {
            options = options.with_null_style(style.parse::<NullStyle>()?);
        }
        if let Some(package) = profile.package {
            options = options.with_package(package);
        }
        if let Some(words) = profile.acronyms {
            options = options.with_acronyms(Acronyms::new(words));
        }

        let mut parse_options = ParseOptions::new();
        if let Some(charset) = profile.charset {
            parse_options = parse_options.with_charset(charset);
        }
        if let Some(collation) = profile.collation {
            parse_options = parse_options.with_collation(collation);
        }

        Ok(Self {
            input,
            output: profile.output.unwrap_or_else(|| PathBuf::from(".")),
            tables,
            update,
            jobs: profile.jobs.unwrap_or_else(default_jobs).max(1),
            options,
            parse_options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "default_profile": "shop",
        "profiles": {
            "shop": {
                "file": "schema.sql",
                "output": "model",
                "table_prefix": "t_",
                "null_style": "ptr",
                "json_tag": true
            },
            "blog": { "sql": "CREATE TABLE posts (id INT);", "package": "blog" }
        }
    }"#;

    #[test]
    fn test_parse_config() {
        let config = ConfigFile::from_json(CONFIG).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("shop"));
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(
            config.profiles["shop"].file.as_deref(),
            Some(Path::new("schema.sql"))
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ConfigFile::from_json(r#"{"profiles": {"x": {"json": true}}}"#).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn test_select_profile() {
        let config = ConfigFile::from_json(CONFIG).unwrap();
        assert_eq!(config.select(None).unwrap().table_prefix.as_deref(), Some("t_"));
        assert_eq!(
            config.select(Some("blog")).unwrap().package.as_deref(),
            Some("blog")
        );
        assert!(matches!(
            config.select(Some("missing")),
            Err(CliError::UnknownProfile(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_missing_default_profile_is_empty() {
        let config = ConfigFile::default();
        assert_eq!(config.select(None).unwrap(), Profile::default());
        assert_eq!(config.select(Some("default")).unwrap(), Profile::default());
        assert!(config.select(Some("prod")).is_err());
    }

    #[test]
    fn test_cli_layer_wins() {
        let config = ConfigFile::from_json(CONFIG).unwrap();
        let cli = Profile {
            table_prefix: Some(String::from("tbl_")),
            update: Some(true),
            ..Profile::default()
        };
        let merged = config.select(None).unwrap().merge(cli);
        assert_eq!(merged.table_prefix.as_deref(), Some("tbl_"));
        assert_eq!(merged.update, Some(true));
        assert_eq!(merged.null_style.as_deref(), Some("ptr"));
        assert_eq!(merged.json_tag, Some(true));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(Profile {
            sql: Some(String::from("CREATE TABLE a (id INT);")),
            ..Profile::default()
        })
        .unwrap();
        assert_eq!(settings.output, PathBuf::from("."));
        assert_eq!(settings.tables, TableFilter::All);
        assert!(!settings.update);
        assert!(settings.jobs >= 1);
        assert_eq!(settings.options, Options::new());
        assert_eq!(settings.parse_options, ParseOptions::default());
    }

    #[test]
    fn test_resolve_profile() {
        let config = ConfigFile::from_json(CONFIG).unwrap();
        let profile = config.select(None).unwrap().merge(Profile {
            acronyms: Some(vec![String::from("api")]),
            jobs: Some(0),
            charset: Some(String::from("utf8mb4")),
            ..Profile::default()
        });
        let settings = Settings::resolve(profile).unwrap();
        assert_eq!(settings.input, Input::File(PathBuf::from("schema.sql")));
        assert_eq!(settings.output, PathBuf::from("model"));
        assert_eq!(settings.jobs, 1);
        assert_eq!(settings.options.null_style, NullStyle::Pointer);
        assert_eq!(settings.options.table_prefix, "t_");
        assert!(settings.options.json_tag);
        assert!(settings.options.acronyms.contains("API"));
        assert!(!settings.options.acronyms.contains("ID"));
        assert_eq!(settings.parse_options.charset.as_deref(), Some("utf8mb4"));
    }

    #[test]
    fn test_inline_sql_preferred_over_file() {
        let settings = Settings::resolve(Profile {
            sql: Some(String::from("CREATE TABLE a (id INT);")),
            file: Some(PathBuf::from("schema.sql")),
            ..Profile::default()
        })
        .unwrap();
        assert!(matches!(settings.input, Input::Sql(_)));
    }

    #[test]
    fn test_resolve_errors() {
        assert!(matches!(
            Settings::resolve(Profile::default()),
            Err(CliError::NoInput)
        ));
        let err = Settings::resolve(Profile {
            sql: Some(String::new()),
            null_style: Some(String::from("maybe")),
            ..Profile::default()
        })
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidNullStyle(_)));
    }

    #[test]
    fn test_update_all_tables_needs_enforcement() {
        let profile = Profile {
            sql: Some(String::new()),
            update: Some(true),
            ..Profile::default()
        };
        assert!(matches!(
            Settings::resolve(profile.clone()),
            Err(CliError::UnguardedUpdate)
        ));
        assert!(matches!(
            Settings::resolve(Profile {
                table: Some(String::from("*")),
                ..profile.clone()
            }),
            Err(CliError::UnguardedUpdate)
        ));

        let forced = Settings::resolve(Profile {
            enforcement: Some(true),
            ..profile.clone()
        })
        .unwrap();
        assert!(forced.update);

        let named = Settings::resolve(Profile {
            table: Some(String::from("users")),
            ..profile
        })
        .unwrap();
        assert!(named.update);
    }

    #[test]
    fn test_enforcement_not_read_from_file() {
        let config =
            ConfigFile::from_json(r#"{"profiles": {"default": {"update": true}}}"#).unwrap();
        assert_eq!(config.select(None).unwrap().enforcement, None);
        assert!(ConfigFile::from_json(r#"{"profiles": {"x": {"enforcement": true}}}"#).is_err());
    }

    #[test]
    fn test_table_filter() {
        assert_eq!(TableFilter::parse("*"), TableFilter::All);
        assert_eq!(TableFilter::parse(""), TableFilter::All);
        let filter = TableFilter::parse("users, orders");
        assert!(filter.matches("users"));
        assert!(filter.matches("orders"));
        assert!(!filter.matches("items"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let config = tokio_test::block_on(ConfigFile::load(&path, false)).unwrap();
        assert_eq!(config, ConfigFile::default());

        let err = tokio_test::block_on(ConfigFile::load(&path, true)).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, CONFIG).unwrap();
        let config = tokio_test::block_on(ConfigFile::load(&path, true)).unwrap();
        assert_eq!(config.profiles.len(), 2);
    }
}
