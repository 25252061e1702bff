//! Provider configuration.
//!
//! The compatibility tag is resolved once, when the data source is
//! configured, and threaded through every generation call for that
//! connection. An invalid tag is a setup error — it never survives to
//! query time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while configuring the Oracle provider.
#[derive(Debug, Error)]
pub enum OracleConfigError {
    /// The SQL-compatibility option was not one of the accepted
    /// values.
    #[error("invalid SQL compatibility '{0}': expected \"11\" or \"12\"")]
    InvalidCompatibility(String),
}

/// Which generation of the Oracle SQL dialect to target.
///
/// The tag is string-coded in configuration: `"11"` selects the
/// legacy dialect (no native row limiting; paging is emulated with
/// `rownum` wrappers), `"12"` selects the modern dialect with native
/// `OFFSET`/`FETCH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OracleCompatibility {
    /// Oracle 11g and earlier: `rownum` emulation.
    Legacy,
    /// Oracle 12c and later: native `OFFSET`/`FETCH`.
    #[default]
    Modern,
}

impl OracleCompatibility {
    /// Returns the string-coded form used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "11",
            Self::Modern => "12",
        }
    }
}

impl FromStr for OracleCompatibility {
    type Err = OracleConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "11" => Ok(Self::Legacy),
            "12" => Ok(Self::Modern),
            other => Err(OracleConfigError::InvalidCompatibility(String::from(
                other,
            ))),
        }
    }
}

impl TryFrom<String> for OracleCompatibility {
    type Error = OracleConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OracleCompatibility> for String {
    fn from(compat: OracleCompatibility) -> Self {
        Self::from(compat.as_str())
    }
}

impl fmt::Display for OracleCompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options governing the provider for one configured data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleOptions {
    /// The SQL-compatibility tag.
    #[serde(default)]
    pub compatibility: OracleCompatibility,
    /// Default schema for unqualified object names, if any.
    #[serde(default)]
    pub default_schema: Option<String>,
}

impl OracleOptions {
    /// Creates options for the given compatibility tag.
    #[must_use]
    pub const fn new(compatibility: OracleCompatibility) -> Self {
        Self {
            compatibility,
            default_schema: None,
        }
    }

    /// Sets the default schema.
    #[must_use]
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }
}
