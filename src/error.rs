//! Error types for the review store
//!
//! Absence is never an error here: lookups return `Option` and deletes
//! return `bool`. `StoreError` covers real storage failures only --
//! rejected writes, referential-integrity breakage, and an unreachable
//! database.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Result alias used across the repository layer
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage failure surfaced by the repository layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness or check constraint rejected the write.
    ///
    /// The statement was rolled back; retrying without changing the input
    /// will fail again.
    #[error("{operation}: constraint {} violated", .constraint.as_deref().unwrap_or("<unreported>"))]
    ConstraintViolation {
        operation: &'static str,
        /// Constraint name as reported by PostgreSQL, when available
        constraint: Option<String>,
    },

    /// A foreign key rejected the write: either the referenced row does
    /// not exist, or the deleted row is still referenced by dependents.
    #[error("{operation}: referential integrity violated ({})", .constraint.as_deref().unwrap_or("<unreported>"))]
    ReferentialIntegrity {
        operation: &'static str,
        constraint: Option<String>,
    },

    /// The database is unreachable or the pool timed out. Not retried
    /// by this crate; retry policy belongs to the caller.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// Any other engine error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify an sqlx error raised by `operation` into the domain taxonomy
    pub(crate) fn from_sqlx(operation: &'static str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().map(str::to_owned);
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation => {
                    return StoreError::ConstraintViolation {
                        operation,
                        constraint,
                    };
                }
                ErrorKind::ForeignKeyViolation => {
                    return StoreError::ReferentialIntegrity {
                        operation,
                        constraint,
                    };
                }
                _ => {}
            }
        }

        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err)
            }
            _ => StoreError::Database(err),
        }
    }

    /// Name of the violated constraint, if this is a rejected write
    pub fn constraint(&self) -> Option<&str> {
        match self {
            StoreError::ConstraintViolation { constraint, .. }
            | StoreError::ReferentialIntegrity { constraint, .. } => constraint.as_deref(),
            _ => None,
        }
    }

    /// Whether the failure came from an unreachable database rather than
    /// a rejected write
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
