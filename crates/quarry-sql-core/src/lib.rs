//! # quarry-sql-core
//!
//! The shared core of the quarry-sql stack: a compiled query-plan
//! model and a dialect-pluggable SQL generator.
//!
//! The [`ast`] module holds the plan tree an upstream query compiler
//! hands to a provider — selects, expressions, orderings, typed
//! columns and parameters. The tree is immutable input: a generator
//! borrows it for one pass and writes SQL text into its own buffer.
//!
//! The [`generator`] module walks that tree and emits ANSI-flavored
//! SQL by default. Engine providers do not subclass the generator;
//! they implement [`generator::DialectHooks`] and override only the
//! emission points where their dialect actually differs:
//!
//! ```rust
//! use quarry_sql_core::ast::{Expr, SelectStatement, TableRef};
//! use quarry_sql_core::dialect::GenericDialect;
//! use quarry_sql_core::generator::{DefaultHooks, Generation};
//! use quarry_sql_core::value::ParameterValues;
//!
//! let stmt = SelectStatement::new()
//!     .column(Expr::column("id"))
//!     .from(TableRef::table("orders"))
//!     .filter(Expr::column("total").gt(Expr::parameter("p0")));
//!
//! let params = ParameterValues::new().bind("p0", 100_i64);
//! let sql = Generation::new(&GenericDialect, &DefaultHooks, &params)
//!     .generate(&stmt)
//!     .unwrap();
//!
//! assert_eq!(sql.text, "SELECT \"id\"\nFROM \"orders\"\nWHERE \"total\" > ?");
//! ```
//!
//! Generation is synchronous and free of I/O; one [`generator::Generation`]
//! instance serves exactly one call, so concurrent passes need no
//! coordination beyond owning distinct instances.

pub mod ast;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod value;
pub mod writer;

pub use ast::{Expr, SelectStatement};
pub use dialect::{Dialect, GenericDialect};
pub use error::{Result, SqlGenError};
pub use generator::{DialectHooks, Emitted, GeneratedSql, Generation};
pub use value::{ParameterValues, SqlValue, ToSqlValue};
pub use writer::SqlWriter;
