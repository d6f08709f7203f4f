//! Database helper error type.

use thiserror::Error;

/// Failure of a database helper call.
///
/// The execute helpers report failures through this type instead of a bare
/// `false`; the offending SQL and the driver error travel with it.
#[derive(Debug, Error)]
pub enum DbError {
    /// Required connection settings are missing or unusable.
    #[error("database configuration: {0}")]
    Config(String),

    /// The driver could not establish a session.
    #[error("could not connect to {target}")]
    Connect {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    /// A statement run through `query` failed.
    #[error("query failed: {sql}")]
    Query {
        sql: String,
        #[source]
        source: sqlx::Error,
    },

    /// A statement run through one of the execute helpers failed and was
    /// rolled back.
    #[error("execute failed after {attempts} attempt(s): {sql}")]
    Execute {
        sql: String,
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    /// A column value had a type the row model cannot represent.
    #[error("cannot decode column {column:?} of type {type_name}")]
    Decode { column: String, type_name: String },

    /// The runtime that drives the driver could not be started.
    #[error("failed to start database runtime")]
    Runtime(#[from] std::io::Error),
}

impl DbError {
    /// Number of attempts made, for errors from the execute helpers.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            DbError::Execute { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }

    /// True for failures that happened before any statement ran.
    pub fn is_connection(&self) -> bool {
        matches!(self, DbError::Config(_) | DbError::Connect { .. })
    }
}
