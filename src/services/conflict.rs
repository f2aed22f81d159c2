//! Slot conflict scanning.
//!
//! The scan answers "would this record collide with a committed entry" by
//! reading the entries in the same (academic year, time slot) partition and
//! comparing each conflict dimension. This is read-then-decide: it cannot by
//! itself prevent two concurrent writers from both observing a clean slot.
//! The repository's atomic uniqueness check is the correctness backstop; the
//! scan exists to give a fast, descriptive error in the common case.

use crate::db::repository::{FullRepository, RepositoryResult, ScheduleRepository};
use crate::models::{ConflictDimension, ScheduleFilter, ScheduleRecord};

/// Find the first dimension on which the candidate collides with a
/// committed entry, excluding `exclude_id` (an entry being updated must not
/// conflict with its own prior state).
pub async fn find_conflict(
    repo: &dyn FullRepository,
    candidate: &ScheduleRecord,
    exclude_id: Option<i64>,
) -> RepositoryResult<Option<ConflictDimension>> {
    let filter = ScheduleFilter {
        academic_year: Some(candidate.academic_year),
        time_slot: Some(candidate.time_slot.clone()),
        ..Default::default()
    };

    let entries = repo.find_entries(&filter).await?;

    for entry in entries {
        if exclude_id == Some(entry.id) {
            continue;
        }
        for dimension in ConflictDimension::ALL {
            if dimension.collides(candidate, &entry) {
                return Ok(Some(dimension));
            }
        }
    }

    Ok(None)
}

/// Boolean view of [`find_conflict`].
pub async fn has_conflict(
    repo: &dyn FullRepository,
    candidate: &ScheduleRecord,
    exclude_id: Option<i64>,
) -> RepositoryResult<bool> {
    Ok(find_conflict(repo, candidate, exclude_id).await?.is_some())
}
