//! Core schedule repository trait.
//!
//! Storage of committed schedule entries. Implementations must enforce slot
//! uniqueness atomically inside `insert_entry` and `update_entry`: the
//! check-then-commit sequence in the service layer is only an optimization,
//! and two concurrent writers racing for the same claim must be decided
//! here, with the loser receiving `RepositoryError::ConstraintViolation`.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{ScheduleEntry, ScheduleFilter, ScheduleRecord};

/// Repository trait for schedule entry storage.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Check if the storage backend is healthy.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert a new entry, assigning its id.
    ///
    /// The uniqueness check and the write are one atomic unit: no two
    /// committed entries may share a slot claim, regardless of interleaving.
    ///
    /// # Returns
    /// * `Ok(ScheduleEntry)` - The committed entry with its assigned id
    /// * `Err(RepositoryError::ConstraintViolation)` - A claim is taken
    async fn insert_entry(&self, record: &ScheduleRecord) -> RepositoryResult<ScheduleEntry>;

    /// Replace the entry's record, keeping its id.
    ///
    /// Uniqueness is re-validated against the new record, excluding the
    /// entry's own prior claims, under the same atomic unit as insert.
    ///
    /// # Returns
    /// * `Ok(ScheduleEntry)` - The committed entry
    /// * `Err(RepositoryError::NotFound)` - No entry with this id
    /// * `Err(RepositoryError::ConstraintViolation)` - A claim is taken
    async fn update_entry(
        &self,
        id: i64,
        record: &ScheduleRecord,
    ) -> RepositoryResult<ScheduleEntry>;

    /// Delete an entry. Removal never violates the booking invariant.
    async fn delete_entry(&self, id: i64) -> RepositoryResult<()>;

    /// Fetch a single entry by id.
    async fn get_entry(&self, id: i64) -> RepositoryResult<ScheduleEntry>;

    /// Fetch all entries matching the filter, ordered by id.
    async fn find_entries(&self, filter: &ScheduleFilter) -> RepositoryResult<Vec<ScheduleEntry>>;

    /// Distinct academic years present in storage, ascending.
    async fn distinct_years(&self) -> RepositoryResult<Vec<i32>>;
}
