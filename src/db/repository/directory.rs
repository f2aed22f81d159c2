//! Directory store contract.
//!
//! Rooms, teachers, groups and subjects are owned by the directory; the
//! scheduling engine only asks whether a reference resolves. A dangling
//! reference is a validation failure, never a conflict.

use async_trait::async_trait;

use super::error::RepositoryResult;

/// Existence checks for directory-owned references.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn room_exists(&self, room_id: i64) -> RepositoryResult<bool>;
    async fn teacher_exists(&self, email: &str) -> RepositoryResult<bool>;
    async fn group_exists(&self, group_id: i64) -> RepositoryResult<bool>;
    async fn subject_exists(&self, subject_id: i64) -> RepositoryResult<bool>;
}
