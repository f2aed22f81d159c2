//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory, providing fast, deterministic, and isolated execution.
//!
//! One write lock guards the whole uniqueness-check-then-write sequence in
//! `insert_entry` and `update_entry`. That critical section is the
//! equivalent of a transactional unique index: of two racing writers for
//! the same slot claim, exactly one commits and the other receives
//! `RepositoryError::ConstraintViolation`.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::db::repository::{
    DirectoryRepository, RepositoryError, RepositoryResult, ScheduleRepository,
};
use crate::models::{ScheduleEntry, ScheduleFilter, ScheduleRecord, SlotClaim};

/// In-memory local repository.
///
/// Cloning is cheap and all clones share the same state, so a clone can be
/// handed to each concurrent task in tests.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    entries: HashMap<i64, ScheduleEntry>,
    /// Uniqueness index: one owner per slot claim.
    slot_index: HashMap<SlotClaim, i64>,

    // Directory data
    rooms: HashSet<i64>,
    teachers: HashSet<String>,
    groups: HashSet<i64>,
    subjects: HashSet<i64>,

    next_entry_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            slot_index: HashMap::new(),
            rooms: HashSet::new(),
            teachers: HashSet::new(),
            groups: HashSet::new(),
            subjects: HashSet::new(),
            next_entry_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    // ==================== Directory seeding ====================

    pub fn add_room(&self, room_id: i64) {
        self.data.write().rooms.insert(room_id);
    }

    pub fn add_teacher(&self, email: impl Into<String>) {
        self.data.write().teachers.insert(email.into());
    }

    pub fn add_group(&self, group_id: i64) {
        self.data.write().groups.insert(group_id);
    }

    pub fn add_subject(&self, subject_id: i64) {
        self.data.write().subjects.insert(subject_id);
    }

    // ==================== Test helpers ====================

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Get the number of committed entries.
    pub fn entry_count(&self) -> usize {
        self.data.read().entries.len()
    }

    /// Clear all schedule entries, keeping directory data.
    pub fn clear_entries(&self) {
        let mut data = self.data.write();
        data.entries.clear();
        data.slot_index.clear();
        data.next_entry_id = 1;
    }

    fn check_health(data: &LocalData) -> RepositoryResult<()> {
        if !data.is_healthy {
            return Err(RepositoryError::connection("storage is not healthy"));
        }
        Ok(())
    }

    /// Reject the record if any of its claims is owned by another entry.
    /// Must be called with the write lock held so the subsequent write stays
    /// in the same critical section.
    fn check_claims(
        data: &LocalData,
        record: &ScheduleRecord,
        exclude_id: Option<i64>,
    ) -> RepositoryResult<()> {
        for claim in record.slot_claims() {
            if let Some(&owner) = data.slot_index.get(&claim) {
                if exclude_id != Some(owner) {
                    return Err(RepositoryError::ConstraintViolation {
                        dimension: claim.dimension(),
                        academic_year: record.academic_year,
                        time_slot: record.time_slot.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn remove_claims(data: &mut LocalData, entry: &ScheduleEntry) {
        for claim in entry.record().slot_claims() {
            data.slot_index.remove(&claim);
        }
    }

    fn insert_claims(data: &mut LocalData, entry: &ScheduleEntry) {
        for claim in entry.record().slot_claims() {
            data.slot_index.insert(claim, entry.id);
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_entry(&self, record: &ScheduleRecord) -> RepositoryResult<ScheduleEntry> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        Self::check_claims(&data, record, None)?;

        let id = data.next_entry_id;
        data.next_entry_id += 1;

        let entry = record.clone().into_entry(id);
        Self::insert_claims(&mut data, &entry);
        data.entries.insert(id, entry.clone());

        Ok(entry)
    }

    async fn update_entry(
        &self,
        id: i64,
        record: &ScheduleRecord,
    ) -> RepositoryResult<ScheduleEntry> {
        let mut data = self.data.write();
        Self::check_health(&data)?;

        let previous = data
            .entries
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("schedule entry {} not found", id)))?;

        Self::check_claims(&data, record, Some(id))?;

        Self::remove_claims(&mut data, &previous);
        let entry = record.clone().into_entry(id);
        Self::insert_claims(&mut data, &entry);
        data.entries.insert(id, entry.clone());

        Ok(entry)
    }

    async fn delete_entry(&self, id: i64) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::check_health(&data)?;

        let entry = data
            .entries
            .remove(&id)
            .ok_or_else(|| RepositoryError::not_found(format!("schedule entry {} not found", id)))?;
        Self::remove_claims(&mut data, &entry);

        Ok(())
    }

    async fn get_entry(&self, id: i64) -> RepositoryResult<ScheduleEntry> {
        let data = self.data.read();
        Self::check_health(&data)?;

        data.entries
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("schedule entry {} not found", id)))
    }

    async fn find_entries(&self, filter: &ScheduleFilter) -> RepositoryResult<Vec<ScheduleEntry>> {
        let data = self.data.read();
        Self::check_health(&data)?;

        let mut entries: Vec<ScheduleEntry> = data
            .entries
            .values()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();

        entries.sort_by_key(|entry| entry.id);
        Ok(entries)
    }

    async fn distinct_years(&self) -> RepositoryResult<Vec<i32>> {
        let data = self.data.read();
        Self::check_health(&data)?;

        let years: BTreeSet<i32> = data.entries.values().map(|e| e.academic_year).collect();
        Ok(years.into_iter().collect())
    }
}

#[async_trait]
impl DirectoryRepository for LocalRepository {
    async fn room_exists(&self, room_id: i64) -> RepositoryResult<bool> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data.rooms.contains(&room_id))
    }

    async fn teacher_exists(&self, email: &str) -> RepositoryResult<bool> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data.teachers.contains(email))
    }

    async fn group_exists(&self, group_id: i64) -> RepositoryResult<bool> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data.groups.contains(&group_id))
    }

    async fn subject_exists(&self, subject_id: i64) -> RepositoryResult<bool> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data.subjects.contains(&subject_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConflictDimension;

    fn record(year: i32, slot: &str, room: i64, teacher: &str, group: i64) -> ScheduleRecord {
        ScheduleRecord {
            academic_year: year,
            time_slot: slot.to_string(),
            room_id: room,
            teacher_email: teacher.to_string(),
            group_id: group,
            subject_id: 1,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = LocalRepository::new();

        let first = repo
            .insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
            .await
            .unwrap();
        let second = repo
            .insert_entry(&record(2081, "Sun-10-11", 2, "b@x.com", 2))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_room_claim_is_exclusive() {
        let repo = LocalRepository::new();
        repo.insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
            .await
            .unwrap();

        let err = repo
            .insert_entry(&record(2081, "Sun-10-11", 1, "b@x.com", 2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::ConstraintViolation {
                dimension: ConflictDimension::Room,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unhealthy_repository_rejects_writes() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let err = repo
            .insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Connection(_)));
    }

    #[tokio::test]
    async fn test_directory_membership() {
        let repo = LocalRepository::new();
        repo.add_room(1);
        repo.add_teacher("a@x.com");

        assert!(repo.room_exists(1).await.unwrap());
        assert!(!repo.room_exists(2).await.unwrap());
        assert!(repo.teacher_exists("a@x.com").await.unwrap());
        assert!(!repo.group_exists(1).await.unwrap());
    }
}
