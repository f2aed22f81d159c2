//! Storage module for schedule data.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, binaries)                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Business Logic              │
//! │  - Validation and authorization                          │
//! │  - Conflict scanning                                     │
//! │  - Academic year resolution                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! │  - ScheduleRepository (entries + slot uniqueness)        │
//! │  - DirectoryRepository (reference existence)             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The uniqueness constraint on slot claims lives inside the repository:
//! `insert_entry`/`update_entry` are atomic check-and-write units, which is
//! what makes the service layer's check-then-commit race-free.

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod repositories;
pub mod repository;

#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
pub use repository::{
    DirectoryRepository, FullRepository, RepositoryError, RepositoryResult, ScheduleRepository,
};
