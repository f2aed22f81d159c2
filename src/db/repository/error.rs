//! Error types for repository operations.

use crate::models::ConflictDimension;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
///
/// `ConstraintViolation` is the storage layer's uniqueness rejection: a
/// write lost the race for a slot claim after the application-level scan had
/// already passed. The service layer translates it into the same conflict
/// error the scan produces.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    /// Connection or backend availability error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness constraint rejected a write.
    #[error("{dimension} already booked for time slot '{time_slot}' in year {academic_year}")]
    ConstraintViolation {
        dimension: ConflictDimension,
        academic_year: i32,
        time_slot: String,
    },

    /// Configuration or initialization error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal/unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
