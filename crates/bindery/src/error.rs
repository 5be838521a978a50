//! Types for working with errors produced by bindery.

use std::error::Error as StdError;

/// A specialized `Result` type for bindery.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents all the ways a method can fail within bindery.
///
/// Values that fail to parse are not errors: parsers fall back to `None` or the zero value of
/// the requested type. Everything here is fatal for the current call and is raised before any
/// command reaches the database.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No parser is registered for the requested type.
    #[error("the requested type {type_name} has no registered parser")]
    UnsupportedType { type_name: &'static str },

    /// Required binding metadata is missing, or a command is in the wrong mode.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A bound member could not be read from its configuration object.
    #[error("could not read member `{member}`: {message}")]
    Reflection { member: String, message: String },

    /// Two bindings resolved to the same parameter name.
    #[error("parameter {0} has already been bound")]
    DuplicateParameter(String),

    /// No column found for the given name.
    #[error("no column found for name: {0}")]
    ColumnNotFound(String),

    /// Column index was out of bounds.
    #[error("column index out of bounds: the len is {len}, but the index is {index}")]
    ColumnIndexOutOfBounds { index: usize, len: usize },

    /// No rows returned by a command that expected to return at least one row.
    #[error("no rows returned by a command that expected to return at least one row")]
    RowNotFound,

    /// Two rows produced the same key while building a dictionary.
    #[error("duplicate key in result set: {0}")]
    DuplicateKey(String),

    /// Unexpected or invalid data encountered in a result set.
    #[error("encountered unexpected or invalid data: {0}")]
    Protocol(String),

    /// Error returned from the underlying database driver.
    #[error("error returned from database: {0}")]
    Database(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Wrap a driver error.
    pub fn database<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error::Database(Box::new(err))
    }

    /// Build a [`Error::Reflection`] for `member`.
    pub fn reflection(member: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Reflection {
            member: member.into(),
            message: message.into(),
        }
    }

    /// Returns the driver error, if this is one.
    pub fn into_database_error(self) -> Option<Box<dyn StdError + Send + Sync>> {
        match self {
            Error::Database(err) => Some(err),
            _ => None,
        }
    }
}
