//! Error types shared by dialects, compilers and reflection.

/// Errors raised while compiling statements or talking to a database.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A schema name did not resolve to a catalog id.
    #[error("No such schema: {0}")]
    NoSuchSchema(String),

    /// A table (or view) name did not resolve to a catalog id.
    #[error("No such table: {0}")]
    NoSuchTable(String),

    /// A sequence does not exist.
    #[error("No such sequence: {0}")]
    NoSuchSequence(String),

    /// The request cannot be honoured in its current form.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A statement or DDL element could not be rendered.
    #[error("Compile error: {0}")]
    Compile(String),

    /// The dialect has no DDL spelling for an abstract type.
    #[error("Type {0} is not supported by this dialect")]
    UnsupportedType(String),

    /// The catalog reported a type name the dialect does not know.
    #[error("Unrecognized type '{type_name}' for column '{column}'")]
    UnknownType {
        /// Catalog type name.
        type_name: String,
        /// Column being reflected.
        column: String,
    },

    /// A result row did not have the expected shape.
    #[error("Cannot decode column '{column}': expected {expected}, found {found}")]
    RowDecode {
        /// Column name.
        column: String,
        /// Expected value kind.
        expected: &'static str,
        /// Actual value kind.
        found: &'static str,
    },

    /// A scalar query returned no value.
    #[error("Query returned no value: {0}")]
    NoResult(String),

    /// A connection URL could not be understood.
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    /// Error raised by the underlying driver, passed through unchanged.
    #[error("Driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a driver error.
    pub fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Driver(Box::new(err))
    }

    /// Returns whether this error reports a missing catalog object.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoSuchSchema(_) | Self::NoSuchTable(_) | Self::NoSuchSequence(_)
        )
    }
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, Error>;
