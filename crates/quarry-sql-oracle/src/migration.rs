//! Migration DDL surface for the Oracle provider.
//!
//! The migration runner itself lives with the host framework; this
//! module only supplies the Oracle-shaped SQL it needs: the history
//! table scripts, idempotent DDL guards, and the sequence/trigger
//! pair that stands in for identity columns on the legacy dialect.

use quarry_sql_core::ast::ColumnDef;
use quarry_sql_core::dialect::Dialect;

use crate::dialect::OracleDialect;
use crate::types::map_data_type;

/// Name of the migration history table.
pub const HISTORY_TABLE: &str = "__QuarryMigrations";

/// Returns the query that reports whether the history table exists.
///
/// The result is a single count; zero means the table is missing.
#[must_use]
pub fn history_table_exists_sql(schema: Option<&str>) -> String {
    schema.map_or_else(
        || {
            format!(
                "SELECT COUNT(*)\nFROM user_tables\nWHERE table_name = N'{HISTORY_TABLE}'"
            )
        },
        |schema| {
            format!(
                "SELECT COUNT(*)\nFROM all_tables\nWHERE table_name = N'{HISTORY_TABLE}' AND owner = N'{schema}'"
            )
        },
    )
}

/// Returns the script that creates the history table.
#[must_use]
pub fn create_history_table_sql(schema: Option<&str>) -> String {
    let dialect = OracleDialect::new();
    let name = qualified(&dialect, schema, HISTORY_TABLE);
    format!(
        "CREATE TABLE {name} (\n    \"MigrationId\" NVARCHAR2(150) NOT NULL,\n    \"ProductVersion\" NVARCHAR2(32) NOT NULL,\n    CONSTRAINT \"PK_{HISTORY_TABLE}\" PRIMARY KEY (\"MigrationId\")\n)"
    )
}

/// Wraps a DDL statement in a PL/SQL block that swallows only the
/// "name is already used" error, making the script re-runnable.
#[must_use]
pub fn if_not_exists(ddl: &str) -> String {
    let escaped = ddl.replace('\'', "''");
    format!(
        "BEGIN\nEXECUTE IMMEDIATE '{escaped}';\nEXCEPTION\nWHEN OTHERS THEN\nIF SQLCODE <> -955 THEN RAISE; END IF;\nEND;"
    )
}

/// Builds a CREATE TABLE script from column definitions.
#[must_use]
pub fn create_table_sql(schema: Option<&str>, table: &str, columns: &[ColumnDef]) -> String {
    let dialect = OracleDialect::new();
    let name = qualified(&dialect, schema, table);
    let mut sql = format!("CREATE TABLE {name} (");
    for (i, column) in columns.iter().enumerate() {
        sql.push_str(if i > 0 { ",\n    " } else { "\n    " });
        sql.push_str(&column_definition(&dialect, column));
    }
    let keys: Vec<&ColumnDef> = columns.iter().filter(|c| c.primary_key).collect();
    if !keys.is_empty() {
        sql.push_str(",\n    CONSTRAINT ");
        sql.push_str(&dialect.quote_identifier(&format!("PK_{table}")));
        sql.push_str(" PRIMARY KEY (");
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&dialect.quote_identifier(&key.name));
        }
        sql.push(')');
    }
    sql.push_str("\n)");
    tracing::debug!(table, columns = columns.len(), "templated CREATE TABLE");
    sql
}

/// Returns the sequence backing a store-generated key on the legacy
/// dialect, which predates identity columns.
#[must_use]
pub fn create_sequence_sql(schema: Option<&str>, sequence: &str) -> String {
    let dialect = OracleDialect::new();
    let name = qualified(&dialect, schema, sequence);
    format!("CREATE SEQUENCE {name} START WITH 1 INCREMENT BY 1 NOCACHE")
}

/// Returns the trigger that assigns the sequence value on insert,
/// completing the legacy identity emulation.
#[must_use]
pub fn create_identity_trigger_sql(
    schema: Option<&str>,
    table: &str,
    column: &str,
    sequence: &str,
) -> String {
    let dialect = OracleDialect::new();
    let trigger = qualified(&dialect, schema, &format!("TR_{table}_{column}"));
    let table = qualified(&dialect, schema, table);
    let sequence = qualified(&dialect, schema, sequence);
    let column = dialect.quote_identifier(column);
    format!(
        "CREATE OR REPLACE TRIGGER {trigger}\nBEFORE INSERT ON {table}\nFOR EACH ROW\nWHEN (NEW.{column} IS NULL)\nBEGIN\nSELECT {sequence}.NEXTVAL INTO :NEW.{column} FROM DUAL;\nEND;"
    )
}

fn qualified(dialect: &OracleDialect, schema: Option<&str>, name: &str) -> String {
    schema.map_or_else(
        || dialect.quote_identifier(name),
        |schema| {
            format!(
                "{}.{}",
                dialect.quote_identifier(schema),
                dialect.quote_identifier(name)
            )
        },
    )
}

fn column_definition(dialect: &OracleDialect, column: &ColumnDef) -> String {
    let mut sql = format!(
        "{} {}",
        dialect.quote_identifier(&column.name),
        map_data_type(&column.data_type)
    );
    if !column.nullable {
        sql.push_str(" NOT NULL");
    }
    sql
}
