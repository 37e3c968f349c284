//! Generation options.

use core::fmt;
use core::str::FromStr;

use crate::naming::Acronyms;

/// How a nullable column is represented in Go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullStyle {
    /// Plain value type; NULL is not representable.
    Disabled,
    /// `database/sql` wrapper types such as `sql.NullString`.
    #[default]
    Wrapped,
    /// Pointer to the plain type, e.g. `*string`.
    Pointer,
}

impl NullStyle {
    /// Returns the canonical flag value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Wrapped => "sql",
            Self::Pointer => "ptr",
        }
    }
}

impl fmt::Display for NullStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`NullStyle`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNullStyle(pub String);

impl fmt::Display for UnknownNullStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown null style '{}' (expected sql, ptr or disabled)",
            self.0
        )
    }
}

impl std::error::Error for UnknownNullStyle {}

impl FromStr for NullStyle {
    type Err = UnknownNullStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "disable" | "none" => Ok(Self::Disabled),
            "sql" | "wrapped" => Ok(Self::Wrapped),
            "ptr" | "pointer" => Ok(Self::Pointer),
            _ => Err(UnknownNullStyle(s.to_string())),
        }
    }
}

/// Options controlling how tables are turned into Go structs.
///
/// Built once per run and shared read-only by every transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Emit a `json:"<column>"` tag before the gorm tag.
    pub json_tag: bool,
    /// Prefix stripped from table names before naming the struct.
    pub table_prefix: String,
    /// Prefix stripped from column names before naming fields.
    pub column_prefix: String,
    /// Never use nullable types, whatever `null_style` says.
    pub no_null_type: bool,
    /// Representation of nullable columns.
    pub null_style: NullStyle,
    /// Go package name of the generated file.
    pub package: String,
    /// Embed the database type in the gorm tag (`;type:varchar(255)`).
    pub gorm_type: bool,
    /// Always emit the `TableName()` accessor.
    pub force_table_name: bool,
    /// Map UNSIGNED integers to `uint32` / `uint64`.
    pub judge_unsigned: bool,
    /// Words rendered fully upper-case in identifiers.
    pub acronyms: Acronyms,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            json_tag: false,
            table_prefix: String::new(),
            column_prefix: String::new(),
            no_null_type: false,
            null_style: NullStyle::default(),
            package: String::from("model"),
            gorm_type: false,
            force_table_name: false,
            judge_unsigned: false,
            acronyms: Acronyms::default(),
        }
    }
}

impl Options {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The null style actually applied: `no_null_type` always wins.
    #[must_use]
    pub const fn effective_null_style(&self) -> NullStyle {
        if self.no_null_type {
            NullStyle::Disabled
        } else {
            self.null_style
        }
    }

    #[must_use]
    pub const fn with_json_tag(mut self, enabled: bool) -> Self {
        self.json_tag = enabled;
        self
    }

    #[must_use]
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_column_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.column_prefix = prefix.into();
        self
    }

    #[must_use]
    pub const fn with_no_null_type(mut self, enabled: bool) -> Self {
        self.no_null_type = enabled;
        self
    }

    #[must_use]
    pub const fn with_null_style(mut self, style: NullStyle) -> Self {
        self.null_style = style;
        self
    }

    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    #[must_use]
    pub const fn with_gorm_type(mut self, enabled: bool) -> Self {
        self.gorm_type = enabled;
        self
    }

    #[must_use]
    pub const fn with_force_table_name(mut self, enabled: bool) -> Self {
        self.force_table_name = enabled;
        self
    }

    #[must_use]
    pub const fn with_judge_unsigned(mut self, enabled: bool) -> Self {
        self.judge_unsigned = enabled;
        self
    }

    #[must_use]
    pub fn with_acronyms(mut self, acronyms: Acronyms) -> Self {
        self.acronyms = acronyms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::new();
        assert_eq!(options.package, "model");
        assert_eq!(options.null_style, NullStyle::Wrapped);
        assert_eq!(options.acronyms, Acronyms::default());
        assert!(!options.json_tag);
    }

    #[test]
    fn test_no_null_type_wins() {
        let options = Options::new()
            .with_null_style(NullStyle::Pointer)
            .with_no_null_type(true);
        assert_eq!(options.effective_null_style(), NullStyle::Disabled);
        let options = options.with_no_null_type(false);
        assert_eq!(options.effective_null_style(), NullStyle::Pointer);
    }

    #[test]
    fn test_null_style_from_str() {
        assert_eq!("sql".parse::<NullStyle>(), Ok(NullStyle::Wrapped));
        assert_eq!("PTR".parse::<NullStyle>(), Ok(NullStyle::Pointer));
        assert_eq!("pointer".parse::<NullStyle>(), Ok(NullStyle::Pointer));
        assert_eq!("disabled".parse::<NullStyle>(), Ok(NullStyle::Disabled));
        let err = "maybe".parse::<NullStyle>().unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_builders_are_independent() {
        let options = Options::new()
            .with_json_tag(true)
            .with_table_prefix("t_")
            .with_column_prefix("f_")
            .with_package("entity")
            .with_gorm_type(true)
            .with_force_table_name(true)
            .with_judge_unsigned(true)
            .with_acronyms(Acronyms::new(["API"]));
        assert!(options.json_tag);
        assert_eq!(options.table_prefix, "t_");
        assert_eq!(options.column_prefix, "f_");
        assert_eq!(options.package, "entity");
        assert!(options.gorm_type);
        assert!(options.force_table_name);
        assert!(options.judge_unsigned);
        assert!(options.acronyms.contains("api"));
        assert_eq!(options.null_style, NullStyle::Wrapped);
    }
}
