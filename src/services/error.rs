//! Caller-facing error taxonomy for the scheduling service.

use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::models::ConflictDimension;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Machine-readable error kind, serialized verbatim into the API envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationError,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

/// Error type for scheduling operations.
///
/// All kinds are generated at the service boundary and passed through
/// unchanged; nothing downgrades one kind into another. A `Conflict` is
/// never retried internally: resubmitting the identical request would
/// deterministically conflict again.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// Malformed/missing input or a dangling directory reference.
    #[error("{0}")]
    Validation(String),

    /// No authenticated actor.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated actor lacking the required role.
    #[error("{0}")]
    Forbidden(String),

    /// Operation targets a nonexistent entry.
    #[error("{0}")]
    NotFound(String),

    /// Booking invariant violation, from the scan or the storage constraint.
    #[error("{0}")]
    Conflict(String),

    /// Storage or infrastructure failure unrelated to the invariant.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::ValidationError,
            ServiceError::Unauthorized(_) => ErrorKind::Unauthorized,
            ServiceError::Forbidden(_) => ErrorKind::Forbidden,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Conflict(_) => ErrorKind::Conflict,
            ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The conflict error for one colliding dimension. Both detection paths
    /// (application scan and storage constraint) go through here so the
    /// caller cannot tell them apart.
    pub fn conflict_on(dimension: ConflictDimension, academic_year: i32, time_slot: &str) -> Self {
        Self::Conflict(format!(
            "schedule conflict detected: {} already scheduled for time slot '{}' in year {}",
            dimension, time_slot, academic_year
        ))
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConstraintViolation {
                dimension,
                academic_year,
                ref time_slot,
            } => ServiceError::conflict_on(dimension, academic_year, time_slot),
            RepositoryError::NotFound(message) => ServiceError::NotFound(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_maps_to_conflict() {
        let err: ServiceError = RepositoryError::ConstraintViolation {
            dimension: ConflictDimension::Room,
            academic_year: 2081,
            time_slot: "Sun-10-11".to_string(),
        }
        .into();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        // Identical to the scan path's error for the same collision.
        let scan_err = ServiceError::conflict_on(ConflictDimension::Room, 2081, "Sun-10-11");
        assert_eq!(err.to_string(), scan_err.to_string());
    }

    #[test]
    fn repository_not_found_keeps_its_kind() {
        let err: ServiceError = RepositoryError::not_found("schedule entry 9 not found").into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn connection_errors_become_internal() {
        let err: ServiceError = RepositoryError::connection("down").into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn kind_serializes_verbatim() {
        let json = serde_json::to_string(&ErrorKind::ValidationError).unwrap();
        assert_eq!(json, "\"ValidationError\"");
    }
}
