//! Dialect configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use oxide_sql_core::{Error, Paramstyle, Result};

/// Driver the dialect connects through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// The MonetDB network client.
    #[default]
    Monetdb,
    /// The embedded MonetDBLite engine.
    Monetdblite,
}

impl DriverKind {
    /// Driver name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monetdb => "monetdb",
            Self::Monetdblite => "monetdblite",
        }
    }
}

/// What reflection does with a catalog type it cannot map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTypePolicy {
    /// Log a warning and report the column as untyped.
    #[default]
    Warn,
    /// Fail the reflection call.
    Error,
}

/// Options of a [`MonetDialect`](crate::MonetDialect).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectOptions {
    /// Placeholder style of compiled statements.
    pub paramstyle: Paramstyle,
    /// Driver to connect through.
    pub driver: DriverKind,
    /// Handling of unrecognized catalog types.
    pub unknown_types: UnknownTypePolicy,
    /// Quote every identifier, not only reserved or irregular ones.
    pub quote_all_identifiers: bool,
}

impl Default for DialectOptions {
    fn default() -> Self {
        Self {
            paramstyle: Paramstyle::Pyformat,
            driver: DriverKind::Monetdb,
            unknown_types: UnknownTypePolicy::Warn,
            quote_all_identifiers: false,
        }
    }
}

impl DialectOptions {
    /// Query-string keys consumed as dialect options.
    pub const KEYS: &'static [&'static str] = &[
        "paramstyle",
        "driver",
        "unknown_types",
        "quote_all_identifiers",
    ];

    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidRequest(format!("invalid dialect options: {e}")))
    }

    /// Reads options from a connection URL's query string, on top of the
    /// defaults. Keys other than [`Self::KEYS`] are ignored.
    pub fn from_url(url: &Url) -> Result<Self> {
        let mut options = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "paramstyle" => {
                    options.paramstyle = Paramstyle::from_name(&value)
                        .ok_or_else(|| invalid_value(&key, &value))?;
                }
                "driver" => {
                    options.driver = match value.as_ref() {
                        "monetdb" => DriverKind::Monetdb,
                        "monetdblite" => DriverKind::Monetdblite,
                        _ => return Err(invalid_value(&key, &value)),
                    };
                }
                "unknown_types" => {
                    options.unknown_types = match value.as_ref() {
                        "warn" => UnknownTypePolicy::Warn,
                        "error" => UnknownTypePolicy::Error,
                        _ => return Err(invalid_value(&key, &value)),
                    };
                }
                "quote_all_identifiers" => {
                    options.quote_all_identifiers = match value.as_ref() {
                        "true" | "1" => true,
                        "false" | "0" => false,
                        _ => return Err(invalid_value(&key, &value)),
                    };
                }
                _ => {}
            }
        }
        Ok(options)
    }
}

fn invalid_value(key: &str, value: &str) -> Error {
    Error::InvalidUrl(format!("invalid value '{value}' for option '{key}'"))
}
