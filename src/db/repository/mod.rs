//! Repository trait definitions for storage operations.
//!
//! This module provides focused repository traits that abstract storage
//! operations. By splitting responsibilities across multiple traits,
//! implementations can be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`schedule`]: Schedule entry storage with atomic slot uniqueness
//! - [`directory`]: Existence checks for directory-owned references
//!
//! # Convenience Trait Bound
//!
//! For code that needs both capabilities, use the [`FullRepository`] bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository>(repo: &R) -> RepositoryResult<()> {
//!     if repo.room_exists(1).await? {
//!         repo.insert_entry(&record).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod directory;
pub mod error;
pub mod schedule;

// Re-export error types
pub use error::{RepositoryError, RepositoryResult};

// Re-export all traits
pub use directory::DirectoryRepository;
pub use schedule::ScheduleRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements both repository
/// traits.
pub trait FullRepository: ScheduleRepository + DirectoryRepository {}

// Blanket implementation: both traits together make a full repository
impl<T> FullRepository for T where T: ScheduleRepository + DirectoryRepository {}
