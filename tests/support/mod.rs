//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use routiney::auth::{Actor, Role, RoleAuthorizer};
use routiney::db::repository::FullRepository;
use routiney::db::LocalRepository;
use routiney::models::NewScheduleEntry;
use routiney::services::SchedulingService;

/// A repository with a small seeded directory: rooms 1-3, groups 1-3,
/// subjects 101-103, and three teachers.
pub fn seeded_repository() -> LocalRepository {
    let repo = LocalRepository::new();
    for room in [1, 2, 3] {
        repo.add_room(room);
    }
    for teacher in ["a@x.com", "b@x.com", "c@x.com"] {
        repo.add_teacher(teacher);
    }
    for group in [1, 2, 3] {
        repo.add_group(group);
    }
    for subject in [101, 102, 103] {
        repo.add_subject(subject);
    }
    repo
}

pub fn service_over(repo: LocalRepository) -> SchedulingService {
    SchedulingService::new(
        Arc::new(repo) as Arc<dyn FullRepository>,
        Arc::new(RoleAuthorizer),
    )
}

/// A seeded repository and a service sharing it.
pub fn seeded_service() -> (LocalRepository, SchedulingService) {
    let repo = seeded_repository();
    (repo.clone(), service_over(repo))
}

pub fn admin() -> Actor {
    Actor::new("head@school.edu.np", Role::Admin)
}

pub fn plain_teacher() -> Actor {
    Actor::new("a@x.com", Role::Teacher)
}

pub fn draft(year: i32, slot: &str, room: i64, teacher: &str, group: i64) -> NewScheduleEntry {
    NewScheduleEntry {
        academic_year: Some(year),
        time_slot: slot.to_string(),
        room_id: room,
        teacher_email: teacher.to_string(),
        group_id: group,
        subject_id: 101,
    }
}
