//! Oracle store-type mapping.

use quarry_sql_core::ast::DataType;

/// Maps the generic data-type model to Oracle store types.
///
/// Notable differences from the generic names: character data is
/// `VARCHAR2`/`NVARCHAR2` (plain `VARCHAR` is reserved by the engine
/// for future use), every numeric type is a `NUMBER` shape, booleans
/// are `NUMBER(1)`, and unbounded text/binary map to LOBs.
#[must_use]
pub fn map_data_type(dt: &DataType) -> String {
    match dt {
        DataType::Smallint => String::from("NUMBER(5)"),
        DataType::Integer => String::from("NUMBER(10)"),
        DataType::Bigint => String::from("NUMBER(19)"),
        DataType::Real => String::from("BINARY_FLOAT"),
        DataType::Double => String::from("BINARY_DOUBLE"),
        DataType::Decimal { precision, scale } => match (precision, scale) {
            (Some(p), Some(s)) => format!("NUMBER({p},{s})"),
            (Some(p), None) => format!("NUMBER({p})"),
            // Default store shape for unconstrained decimals.
            _ => String::from("NUMBER(29,4)"),
        },
        DataType::Char(len) => match len {
            Some(n) => format!("CHAR({n})"),
            None => String::from("CHAR(1)"),
        },
        DataType::Varchar(len) => match len {
            Some(n) => format!("NVARCHAR2({n})"),
            // NVARCHAR2 caps at 2000 chars; unbounded text is a LOB.
            None => String::from("NCLOB"),
        },
        DataType::Text => String::from("NCLOB"),
        DataType::Blob => String::from("BLOB"),
        DataType::Varbinary(len) => match len {
            Some(n) => format!("RAW({n})"),
            None => String::from("BLOB"),
        },
        DataType::Date => String::from("DATE"),
        DataType::Timestamp => String::from("TIMESTAMP"),
        DataType::Boolean => String::from("NUMBER(1)"),
        DataType::Custom(name) => name.clone(),
    }
}
