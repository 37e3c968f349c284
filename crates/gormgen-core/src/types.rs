//! MySQL to Go type mapping.

use gormgen_ddl::ast::{DataType, FieldType};

use crate::options::NullStyle;

/// Import path of the `database/sql` package.
pub const SQL_IMPORT: &str = "database/sql";
/// Import path of the `time` package.
pub const TIME_IMPORT: &str = "time";
/// Import path of the shopspring decimal package.
pub const DECIMAL_IMPORT: &str = "github.com/shopspring/decimal";

/// A Go field type together with the package it needs, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoType {
    /// The type as written in Go source, e.g. `*int64` or `sql.NullTime`.
    pub name: String,
    /// Import path required by the type.
    pub import: Option<&'static str>,
}

impl GoType {
    fn plain(name: &str, import: Option<&'static str>) -> Self {
        Self {
            name: name.to_string(),
            import,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeClass {
    Int,
    BigInt,
    Float,
    Decimal,
    Text,
    Time,
    Json,
}

const fn classify(data_type: &DataType) -> Option<TypeClass> {
    let class = match data_type {
        DataType::Tinyint(_)
        | DataType::Smallint(_)
        | DataType::Mediumint(_)
        | DataType::Int(_)
        | DataType::Boolean => TypeClass::Int,
        DataType::Bigint(_) => TypeClass::BigInt,
        DataType::Float { .. } | DataType::Double { .. } | DataType::Real { .. } => {
            TypeClass::Float
        }
        DataType::Decimal { .. } | DataType::Numeric { .. } => TypeClass::Decimal,
        DataType::Char(_)
        | DataType::Varchar(_)
        | DataType::Binary(_)
        | DataType::Varbinary(_)
        | DataType::Tinytext
        | DataType::Text(_)
        | DataType::Mediumtext
        | DataType::Longtext
        | DataType::Tinyblob
        | DataType::Blob(_)
        | DataType::Mediumblob
        | DataType::Longblob => TypeClass::Text,
        DataType::Date | DataType::Datetime(_) | DataType::Timestamp(_) => TypeClass::Time,
        DataType::Json => TypeClass::Json,
        DataType::Time(_)
        | DataType::Year(_)
        | DataType::Bit(_)
        | DataType::Enum(_)
        | DataType::Set(_)
        | DataType::Custom(_) => return None,
    };
    Some(class)
}

/// Maps a column type to a Go type under the given null style.
///
/// Returns `None` for types with no mapping (TIME, YEAR, BIT, ENUM, SET and
/// unrecognised types). With `judge_unsigned`, UNSIGNED integers become
/// `uint32` / `uint64` in the non-wrapped styles; `database/sql` has no
/// unsigned wrappers.
///
/// DECIMAL maps to `decimal.Decimal` in the plain and pointer styles but to
/// `sql.NullFloat64` when wrapped.
#[must_use]
pub fn map_type(field_type: &FieldType, style: NullStyle, judge_unsigned: bool) -> Option<GoType> {
    let class = classify(&field_type.data_type)?;
    let unsigned = judge_unsigned && (field_type.unsigned || field_type.zerofill);

    if style == NullStyle::Wrapped {
        let name = match class {
            TypeClass::Int => "sql.NullInt32",
            TypeClass::BigInt => "sql.NullInt64",
            TypeClass::Float | TypeClass::Decimal => "sql.NullFloat64",
            TypeClass::Text | TypeClass::Json => "sql.NullString",
            TypeClass::Time => "sql.NullTime",
        };
        return Some(GoType::plain(name, Some(SQL_IMPORT)));
    }

    let (name, import) = match class {
        TypeClass::Int if unsigned => ("uint32", None),
        TypeClass::Int => ("int32", None),
        TypeClass::BigInt if unsigned => ("uint64", None),
        TypeClass::BigInt => ("int64", None),
        TypeClass::Float => ("float64", None),
        TypeClass::Decimal => ("decimal.Decimal", Some(DECIMAL_IMPORT)),
        TypeClass::Text | TypeClass::Json => ("string", None),
        TypeClass::Time => ("time.Time", Some(TIME_IMPORT)),
    };

    if style == NullStyle::Pointer {
        Some(GoType {
            name: format!("*{name}"),
            import,
        })
    } else {
        Some(GoType::plain(name, import))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(data_type: DataType, style: NullStyle) -> Option<String> {
        map_type(&FieldType::new(data_type), style, false).map(|t| t.name)
    }

    #[test]
    fn test_integer_family() {
        for dt in [
            DataType::Tinyint(Some(4)),
            DataType::Smallint(None),
            DataType::Mediumint(None),
            DataType::Int(Some(11)),
            DataType::Boolean,
        ] {
            assert_eq!(go(dt.clone(), NullStyle::Disabled).as_deref(), Some("int32"));
            assert_eq!(go(dt.clone(), NullStyle::Pointer).as_deref(), Some("*int32"));
            assert_eq!(go(dt, NullStyle::Wrapped).as_deref(), Some("sql.NullInt32"));
        }
        assert_eq!(
            go(DataType::Bigint(Some(20)), NullStyle::Wrapped).as_deref(),
            Some("sql.NullInt64")
        );
    }

    #[test]
    fn test_decimal_asymmetry() {
        let decimal = FieldType::new(DataType::Decimal {
            precision: Some(10),
            scale: Some(2),
        });
        let plain = map_type(&decimal, NullStyle::Disabled, false).unwrap();
        assert_eq!(plain.name, "decimal.Decimal");
        assert_eq!(plain.import, Some(DECIMAL_IMPORT));

        let pointer = map_type(&decimal, NullStyle::Pointer, false).unwrap();
        assert_eq!(pointer.name, "*decimal.Decimal");

        let wrapped = map_type(&decimal, NullStyle::Wrapped, false).unwrap();
        assert_eq!(wrapped.name, "sql.NullFloat64");
        assert_eq!(wrapped.import, Some(SQL_IMPORT));
    }

    #[test]
    fn test_text_time_json() {
        assert_eq!(
            go(DataType::Varchar(Some(10)), NullStyle::Disabled).as_deref(),
            Some("string")
        );
        assert_eq!(
            go(DataType::Longblob, NullStyle::Wrapped).as_deref(),
            Some("sql.NullString")
        );
        let time = map_type(&FieldType::new(DataType::Datetime(None)), NullStyle::Pointer, false)
            .unwrap();
        assert_eq!(time.name, "*time.Time");
        assert_eq!(time.import, Some(TIME_IMPORT));
        assert_eq!(
            go(DataType::Json, NullStyle::Pointer).as_deref(),
            Some("*string")
        );
    }

    #[test]
    fn test_unsupported_types() {
        for dt in [
            DataType::Time(None),
            DataType::Year(None),
            DataType::Bit(Some(1)),
            DataType::Enum(vec![String::from("a")]),
            DataType::Set(vec![]),
            DataType::Custom(String::from("geometry")),
        ] {
            assert_eq!(go(dt, NullStyle::Disabled), None);
        }
    }

    #[test]
    fn test_judge_unsigned() {
        let mut ft = FieldType::new(DataType::Int(Some(10)));
        ft.unsigned = true;
        assert_eq!(map_type(&ft, NullStyle::Disabled, true).unwrap().name, "uint32");
        assert_eq!(map_type(&ft, NullStyle::Pointer, true).unwrap().name, "*uint32");
        assert_eq!(map_type(&ft, NullStyle::Disabled, false).unwrap().name, "int32");
        assert_eq!(
            map_type(&ft, NullStyle::Wrapped, true).unwrap().name,
            "sql.NullInt32"
        );

        let mut ft = FieldType::new(DataType::Bigint(None));
        ft.unsigned = true;
        assert_eq!(map_type(&ft, NullStyle::Disabled, true).unwrap().name, "uint64");
    }
}
