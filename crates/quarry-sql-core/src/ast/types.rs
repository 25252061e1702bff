//! Static result types and store data types for the query plan.

use core::fmt;

/// The static (semantic) result type of a plan expression.
///
/// Every expression node in a compiled plan resolves to one of these.
/// Dialects consult it to decide type-sensitive rewrites (for example
/// wrapping decimal aggregates, or coercing boolean projections on
/// engines without a native boolean type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlType {
    /// Boolean.
    Boolean,
    /// Any integer width.
    Integer,
    /// Fixed-point decimal.
    Decimal,
    /// Floating point.
    Float,
    /// Character data.
    Text,
    /// Binary data.
    Binary,
    /// Date without time.
    Date,
    /// Date and time.
    Timestamp,
    /// Not statically known.
    #[default]
    Unknown,
}

/// SQL store data types, as they appear in CAST targets and DDL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// Small integer (2 bytes).
    Smallint,
    /// Integer (4 bytes).
    Integer,
    /// Big integer (8 bytes).
    Bigint,
    /// Real (4-byte float).
    Real,
    /// Double precision (8-byte float).
    Double,
    /// Decimal with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Text (variable length, no limit).
    Text,
    /// Binary large object.
    Blob,
    /// Variable-length binary.
    Varbinary(Option<u32>),
    /// Date.
    Date,
    /// Timestamp.
    Timestamp,
    /// Boolean.
    Boolean,
    /// Custom type (for database-specific types).
    Custom(String),
}

impl DataType {
    /// Returns the generic SQL representation of the data type.
    ///
    /// Dialects with their own type names map this through their type
    /// mapper instead.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Smallint => String::from("SMALLINT"),
            Self::Integer => String::from("INTEGER"),
            Self::Bigint => String::from("BIGINT"),
            Self::Real => String::from("REAL"),
            Self::Double => String::from("DOUBLE"),
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => String::from("DECIMAL"),
            },
            Self::Char(len) => match len {
                Some(n) => format!("CHAR({n})"),
                None => String::from("CHAR"),
            },
            Self::Varchar(len) => match len {
                Some(n) => format!("VARCHAR({n})"),
                None => String::from("VARCHAR"),
            },
            Self::Text => String::from("TEXT"),
            Self::Blob => String::from("BLOB"),
            Self::Varbinary(len) => match len {
                Some(n) => format!("VARBINARY({n})"),
                None => String::from("VARBINARY"),
            },
            Self::Date => String::from("DATE"),
            Self::Timestamp => String::from("TIMESTAMP"),
            Self::Boolean => String::from("BOOLEAN"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Returns the semantic type this store type resolves to.
    #[must_use]
    pub const fn semantic_type(&self) -> SqlType {
        match self {
            Self::Smallint | Self::Integer | Self::Bigint => SqlType::Integer,
            Self::Real | Self::Double => SqlType::Float,
            Self::Decimal { .. } => SqlType::Decimal,
            Self::Char(_) | Self::Varchar(_) | Self::Text => SqlType::Text,
            Self::Blob | Self::Varbinary(_) => SqlType::Binary,
            Self::Date => SqlType::Date,
            Self::Timestamp => SqlType::Timestamp,
            Self::Boolean => SqlType::Boolean,
            Self::Custom(_) => SqlType::Unknown,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// A column definition for CREATE TABLE templating.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Whether the column is nullable.
    pub nullable: bool,
    /// Whether this is a primary key.
    pub primary_key: bool,
    /// Whether this column's value is generated by the store.
    pub generated: bool,
}

impl ColumnDef {
    /// Creates a new nullable column definition.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            primary_key: false,
            generated: false,
        }
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the column as PRIMARY KEY.
    ///
    /// Primary keys are implicitly NOT NULL.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Marks the column's value as store-generated.
    #[must_use]
    pub const fn generated(mut self) -> Self {
        self.generated = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_to_sql() {
        assert_eq!(DataType::Integer.to_sql(), "INTEGER");
        assert_eq!(
            DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
            .to_sql(),
            "DECIMAL(10, 2)"
        );
        assert_eq!(DataType::Varchar(Some(255)).to_sql(), "VARCHAR(255)");
    }

    #[test]
    fn test_semantic_type() {
        assert_eq!(DataType::Bigint.semantic_type(), SqlType::Integer);
        assert_eq!(
            DataType::Decimal {
                precision: None,
                scale: None
            }
            .semantic_type(),
            SqlType::Decimal
        );
        assert_eq!(DataType::Boolean.semantic_type(), SqlType::Boolean);
    }

    #[test]
    fn test_column_def_builder() {
        let col = ColumnDef::new("id", DataType::Bigint).primary_key();
        assert!(col.primary_key);
        assert!(!col.nullable);
    }
}
