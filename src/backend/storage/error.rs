/**
 * Storage Error Types
 *
 * Every driver classifies its failures into one of these variants before
 * returning, so callers can branch on the kind of failure without knowing
 * which backend produced it.
 *
 * # Error Kinds
 *
 * - `Validation` - bad or missing input, never retried
 * - `Connection` - transport, timeout or authentication failure
 * - `SchemaMissing` - the backend is reachable but a table does not exist
 * - `Constraint` - the database rejected a write (e.g. duplicate unique key)
 */

use thiserror::Error;

use crate::shared::SharedError;

/// SQLSTATE for "relation does not exist"
pub const UNDEFINED_TABLE: &str = "42P01";

/// SQLSTATE for "unique_violation"
pub const UNIQUE_VIOLATION: &str = "23505";

/// Classified storage failure
#[derive(Debug, Error)]
pub enum StorageError {
    /// Missing or empty required input
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Transport, timeout or authentication failure against a configured backend
    #[error("Connection error: {message}")]
    Connection {
        /// Human-readable error message
        message: String,
    },

    /// An expected table does not exist
    #[error("Table '{table}' does not exist")]
    SchemaMissing {
        /// Name of the missing table
        table: String,
    },

    /// The database rejected a write
    #[error("Constraint violation: {message}")]
    Constraint {
        /// Human-readable error message
        message: String,
    },
}

impl StorageError {
    /// Create a new connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a new schema-missing error
    pub fn schema_missing(table: impl Into<String>) -> Self {
        Self::SchemaMissing {
            table: table.into(),
        }
    }

    /// Create a new constraint error
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    /// Classify a database error code (SQLSTATE) raised while touching `table`
    pub fn from_code(code: Option<&str>, table: &str, message: impl Into<String>) -> Self {
        match code {
            Some(UNDEFINED_TABLE) => Self::schema_missing(table),
            Some(UNIQUE_VIOLATION) => Self::constraint(message),
            _ => Self::connection(message),
        }
    }

    pub fn is_schema_missing(&self) -> bool {
        matches!(self, Self::SchemaMissing { .. })
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint { .. })
    }
}
