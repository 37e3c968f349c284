//! MySQL column type definitions.

use core::fmt;

/// MySQL data types as declared in `CREATE TABLE`.
///
/// Widths, lengths and fractional-second precisions are kept exactly as
/// written so the database-reported type string can be reproduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    // Integer types
    /// 1-byte integer, with optional display width.
    Tinyint(Option<u32>),
    /// 2-byte integer.
    Smallint(Option<u32>),
    /// 3-byte integer.
    Mediumint(Option<u32>),
    /// 4-byte integer (`INT` / `INTEGER`).
    Int(Option<u32>),
    /// 8-byte integer.
    Bigint(Option<u32>),

    // Floating point
    /// Single precision float.
    Float {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// Double precision float (`DOUBLE`, `DOUBLE PRECISION`).
    Double {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// `REAL` (a `DOUBLE` alias unless `REAL_AS_FLOAT` is set).
    Real {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// Fixed-point decimal.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// Numeric (alias for Decimal).
    Numeric {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Text up to 255 bytes.
    Tinytext,
    /// Text up to 64 KiB.
    Text(Option<u32>),
    /// Text up to 16 MiB.
    Mediumtext,
    /// Text up to 4 GiB.
    Longtext,

    // Binary types
    /// Fixed-length binary string.
    Binary(Option<u32>),
    /// Variable-length binary string.
    Varbinary(Option<u32>),
    /// Blob up to 255 bytes.
    Tinyblob,
    /// Blob up to 64 KiB.
    Blob(Option<u32>),
    /// Blob up to 16 MiB.
    Mediumblob,
    /// Blob up to 4 GiB.
    Longblob,

    // Date/time types
    /// Date.
    Date,
    /// Time of day, with optional fractional seconds precision.
    Time(Option<u32>),
    /// Date and time, with optional fractional seconds precision.
    Datetime(Option<u32>),
    /// Timestamp, with optional fractional seconds precision.
    Timestamp(Option<u32>),
    /// Year.
    Year(Option<u32>),

    // Other
    /// Bit field.
    Bit(Option<u32>),
    /// `BOOL` / `BOOLEAN` (a `TINYINT(1)` alias).
    Boolean,
    /// JSON document.
    Json,
    /// Enumeration of string members.
    Enum(Vec<String>),
    /// Set of string members.
    Set(Vec<String>),

    /// Any type name the parser does not model (e.g. `GEOMETRY`).
    Custom(String),
}

impl DataType {
    /// Returns the lower-case type string as MySQL reports it in
    /// `information_schema.COLUMNS.COLUMN_TYPE`, without modifiers.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Tinyint(w) => with_width("tinyint", *w),
            Self::Smallint(w) => with_width("smallint", *w),
            Self::Mediumint(w) => with_width("mediumint", *w),
            Self::Int(w) => with_width("int", *w),
            Self::Bigint(w) => with_width("bigint", *w),
            Self::Float { precision, scale } => with_precision("float", *precision, *scale),
            Self::Double { precision, scale } => with_precision("double", *precision, *scale),
            Self::Real { precision, scale } => with_precision("real", *precision, *scale),
            Self::Decimal { precision, scale } => with_precision("decimal", *precision, *scale),
            Self::Numeric { precision, scale } => with_precision("numeric", *precision, *scale),
            Self::Char(n) => with_width("char", *n),
            Self::Varchar(n) => with_width("varchar", *n),
            Self::Tinytext => String::from("tinytext"),
            Self::Text(n) => with_width("text", *n),
            Self::Mediumtext => String::from("mediumtext"),
            Self::Longtext => String::from("longtext"),
            Self::Binary(n) => with_width("binary", *n),
            Self::Varbinary(n) => with_width("varbinary", *n),
            Self::Tinyblob => String::from("tinyblob"),
            Self::Blob(n) => with_width("blob", *n),
            Self::Mediumblob => String::from("mediumblob"),
            Self::Longblob => String::from("longblob"),
            Self::Date => String::from("date"),
            Self::Time(fsp) => with_width("time", *fsp),
            Self::Datetime(fsp) => with_width("datetime", *fsp),
            Self::Timestamp(fsp) => with_width("timestamp", *fsp),
            Self::Year(w) => with_width("year", *w),
            Self::Bit(w) => with_width("bit", *w),
            Self::Boolean => String::from("tinyint(1)"),
            Self::Json => String::from("json"),
            Self::Enum(members) => with_members("enum", members),
            Self::Set(members) => with_members("set", members),
            Self::Custom(name) => name.to_ascii_lowercase(),
        }
    }

    /// Returns true for the integer family (including `BOOL`).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Tinyint(_)
                | Self::Smallint(_)
                | Self::Mediumint(_)
                | Self::Int(_)
                | Self::Bigint(_)
                | Self::Boolean
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

fn with_width(name: &str, width: Option<u32>) -> String {
    match width {
        Some(w) => format!("{name}({w})"),
        None => String::from(name),
    }
}

fn with_precision(name: &str, precision: Option<u16>, scale: Option<u16>) -> String {
    match (precision, scale) {
        (Some(p), Some(s)) => format!("{name}({p},{s})"),
        (Some(p), None) => format!("{name}({p})"),
        _ => String::from(name),
    }
}

fn with_members(name: &str, members: &[String]) -> String {
    let quoted: Vec<String> = members
        .iter()
        .map(|m| format!("'{}'", m.replace('\'', "''")))
        .collect();
    format!("{name}({})", quoted.join(","))
}

/// A column's declared type together with its modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    /// The base type.
    pub data_type: DataType,
    /// `UNSIGNED` modifier.
    pub unsigned: bool,
    /// `ZEROFILL` modifier (implies unsigned in MySQL).
    pub zerofill: bool,
    /// `CHARACTER SET` given on the type.
    pub charset: Option<String>,
    /// `COLLATE` given on the type.
    pub collation: Option<String>,
}

impl FieldType {
    /// Creates a field type with no modifiers.
    #[must_use]
    pub const fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            unsigned: false,
            zerofill: false,
            charset: None,
            collation: None,
        }
    }

    /// Returns the type string the database reports for this column,
    /// e.g. `bigint(20) unsigned` or `decimal(10,2)`.
    #[must_use]
    pub fn info_schema_str(&self) -> String {
        let mut out = self.data_type.to_sql();
        if self.unsigned || self.zerofill {
            out.push_str(" unsigned");
        }
        if self.zerofill {
            out.push_str(" zerofill");
        }
        out
    }
}

impl From<DataType> for FieldType {
    fn from(data_type: DataType) -> Self {
        Self::new(data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_widths() {
        assert_eq!(DataType::Int(Some(11)).to_sql(), "int(11)");
        assert_eq!(DataType::Int(None).to_sql(), "int");
        assert_eq!(DataType::Varchar(Some(255)).to_sql(), "varchar(255)");
        assert_eq!(DataType::Datetime(Some(3)).to_sql(), "datetime(3)");
        assert_eq!(DataType::Boolean.to_sql(), "tinyint(1)");
    }

    #[test]
    fn test_to_sql_precision() {
        let dt = DataType::Decimal {
            precision: Some(10),
            scale: Some(2),
        };
        assert_eq!(dt.to_sql(), "decimal(10,2)");
        let dt = DataType::Double {
            precision: None,
            scale: None,
        };
        assert_eq!(dt.to_sql(), "double");
    }

    #[test]
    fn test_to_sql_members() {
        let dt = DataType::Enum(vec![String::from("a"), String::from("it's")]);
        assert_eq!(dt.to_sql(), "enum('a','it''s')");
    }

    #[test]
    fn test_info_schema_str_modifiers() {
        let mut ft = FieldType::new(DataType::Bigint(Some(20)));
        ft.unsigned = true;
        assert_eq!(ft.info_schema_str(), "bigint(20) unsigned");

        let mut ft = FieldType::new(DataType::Int(Some(5)));
        ft.zerofill = true;
        assert_eq!(ft.info_schema_str(), "int(5) unsigned zerofill");
    }

    #[test]
    fn test_is_integer() {
        assert!(DataType::Boolean.is_integer());
        assert!(DataType::Mediumint(None).is_integer());
        assert!(!DataType::Json.is_integer());
    }
}
