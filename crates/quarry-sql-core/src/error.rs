//! Error types for SQL generation.

use thiserror::Error;

/// Errors raised while generating SQL from a query plan.
///
/// A failed generation aborts that one query; partial output is never
/// returned as success, and no error is swallowed along the way.
#[derive(Debug, Error)]
pub enum SqlGenError {
    /// The plan contains a construct the generator cannot emit.
    #[error("unsupported construct: {0}")]
    Unsupported(String),

    /// A parameter appears in the plan with no bound value.
    #[error("no value bound for parameter '{0}'")]
    UnboundParameter(String),

    /// The plan shape is invalid (produced by a broken upstream
    /// compiler, not by user input).
    #[error("invalid query plan: {0}")]
    InvalidPlan(String),
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, SqlGenError>;
