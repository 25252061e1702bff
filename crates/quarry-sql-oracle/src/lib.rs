//! # quarry-sql-oracle
//!
//! Oracle-specific SQL generation for `quarry-sql-core`.
//!
//! # How Oracle differs from other dialects
//!
//! - **Row limiting**: 12c and later support `OFFSET .. ROWS` and
//!   `FETCH FIRST/NEXT .. ROWS ONLY`. Before that the only primitive
//!   is the `rownum` pseudo-column, which is assigned in scan order
//!   *before* `ORDER BY` and cannot be filtered under its own alias
//!   in the same SELECT — paging on the legacy dialect therefore
//!   rewrites the statement into nested ranked subqueries.
//! - **Bitwise operators**: no infix `&`/`|`; `BITAND` is the only
//!   built-in, so OR is derived from it arithmetically.
//! - **Modulo**: `MOD(a, b)`, not an infix operator.
//! - **Empty strings**: `''` is stored as NULL, so comparisons and
//!   string searches against empty strings desugar to NULL tests.
//! - **Booleans**: no boolean column type; `NUMBER(1)` stands in and
//!   ambiguous boolean projections need an explicit cast.
//! - **Table-less selects**: a FROM clause is mandatory; the
//!   single-row `DUAL` table fills in.
//! - **Aliases**: `AS` is rejected before table aliases, every
//!   inlined subquery from raw SQL must be aliased, and identifiers
//!   are capped at 30 bytes.
//! - **Lateral joins**: spelled `CROSS APPLY`.
//!
//! # Example
//!
//! ```rust
//! use quarry_sql_core::ast::{Expr, SelectStatement, TableRef};
//! use quarry_sql_core::value::ParameterValues;
//! use quarry_sql_oracle::{OracleCompatibility, OracleOptions, OracleSqlGenerator};
//!
//! let stmt = SelectStatement::new()
//!     .column(Expr::column("id"))
//!     .from(TableRef::table("orders"))
//!     .take(Expr::integer(3));
//!
//! let generator = OracleSqlGenerator::new(&OracleOptions::new(OracleCompatibility::Modern));
//! let sql = generator.generate(&stmt, &ParameterValues::new()).unwrap();
//!
//! assert_eq!(sql.text, "SELECT \"id\"\nFROM \"orders\"\nFETCH FIRST 3 ROWS ONLY");
//! ```

mod dialect;
mod generator;
pub mod migration;
mod options;
mod rownum;
pub mod types;

pub use dialect::{OracleDialect, MAX_IDENTIFIER_LENGTH};
pub use generator::OracleHooks;
pub use options::{OracleCompatibility, OracleConfigError, OracleOptions};

use quarry_sql_core::ast::SelectStatement;
use quarry_sql_core::generator::{GeneratedSql, Generation};
use quarry_sql_core::value::ParameterValues;

/// Per-data-source SQL generator for Oracle.
///
/// The compatibility tag is captured once at construction — the same
/// place configuration validates it — and decides, for every
/// generation call, whether the legacy `rownum` paging path or the
/// modern native syntax runs. The generator itself is stateless
/// across calls: each call owns a fresh [`Generation`] with its own
/// buffer and counters, so one instance may serve concurrent calls
/// from multiple threads.
#[derive(Debug, Clone, Copy)]
pub struct OracleSqlGenerator {
    dialect: OracleDialect,
    hooks: OracleHooks,
    compatibility: OracleCompatibility,
}

impl OracleSqlGenerator {
    /// Creates a generator for a configured data source.
    #[must_use]
    pub const fn new(options: &OracleOptions) -> Self {
        Self {
            dialect: OracleDialect::new(),
            hooks: OracleHooks::new(options.compatibility),
            compatibility: options.compatibility,
        }
    }

    /// Creates a generator from the string-coded compatibility tag.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the tag is not one of the
    /// two accepted values; nothing is generated in that case.
    pub fn from_compatibility_tag(tag: &str) -> Result<Self, OracleConfigError> {
        let compatibility: OracleCompatibility = tag.parse()?;
        Ok(Self::new(&OracleOptions::new(compatibility)))
    }

    /// The compatibility level this generator targets.
    #[must_use]
    pub const fn compatibility(&self) -> OracleCompatibility {
        self.compatibility
    }

    /// Generates the SQL text and bound-parameter list for one
    /// compiled statement tree.
    ///
    /// # Errors
    ///
    /// Propagates any generation failure unchanged; on failure no SQL
    /// text is returned and other in-flight generations are
    /// unaffected.
    pub fn generate(
        &self,
        stmt: &SelectStatement,
        params: &ParameterValues,
    ) -> quarry_sql_core::Result<GeneratedSql> {
        let sql = Generation::new(&self.dialect, &self.hooks, params).generate(stmt)?;
        tracing::debug!(
            compatibility = %self.compatibility,
            bytes = sql.text.len(),
            params = sql.params.len(),
            "generated SQL"
        );
        Ok(sql)
    }
}
