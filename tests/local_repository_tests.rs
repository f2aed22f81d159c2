//! Storage-level tests for the local repository: the uniqueness index is
//! the correctness backstop and must hold regardless of what the service
//! layer scanned.

mod support;

use routiney::db::repository::{RepositoryError, ScheduleRepository};
use routiney::models::{ConflictDimension, ScheduleFilter, ScheduleRecord};
use support::seeded_repository;

fn record(year: i32, slot: &str, room: i64, teacher: &str, group: i64) -> ScheduleRecord {
    ScheduleRecord {
        academic_year: year,
        time_slot: slot.to_string(),
        room_id: room,
        teacher_email: teacher.to_string(),
        group_id: group,
        subject_id: 101,
    }
}

fn violated_dimension(err: RepositoryError) -> ConflictDimension {
    match err {
        RepositoryError::ConstraintViolation { dimension, .. } => dimension,
        other => panic!("expected constraint violation, got {:?}", other),
    }
}

#[tokio::test]
async fn insert_rejects_each_dimension_collision() {
    let repo = seeded_repository();
    repo.insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
        .await
        .unwrap();

    let err = repo
        .insert_entry(&record(2081, "Sun-10-11", 1, "b@x.com", 2))
        .await
        .unwrap_err();
    assert_eq!(violated_dimension(err), ConflictDimension::Room);

    let err = repo
        .insert_entry(&record(2081, "Sun-10-11", 2, "a@x.com", 2))
        .await
        .unwrap_err();
    assert_eq!(violated_dimension(err), ConflictDimension::Teacher);

    let err = repo
        .insert_entry(&record(2081, "Sun-10-11", 2, "b@x.com", 1))
        .await
        .unwrap_err();
    assert_eq!(violated_dimension(err), ConflictDimension::Group);
}

#[tokio::test]
async fn update_excludes_its_own_claims() {
    let repo = seeded_repository();
    let entry = repo
        .insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
        .await
        .unwrap();

    // Re-writing the same record under the same id keeps its own claims.
    let updated = repo.update_entry(entry.id, &entry.record()).await.unwrap();
    assert_eq!(updated, entry);
}

#[tokio::test]
async fn update_cannot_steal_anothers_claim() {
    let repo = seeded_repository();
    repo.insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
        .await
        .unwrap();
    let second = repo
        .insert_entry(&record(2081, "Sun-10-11", 2, "b@x.com", 2))
        .await
        .unwrap();

    let mut onto_first = second.record();
    onto_first.room_id = 1;
    let err = repo.update_entry(second.id, &onto_first).await.unwrap_err();
    assert_eq!(violated_dimension(err), ConflictDimension::Room);
}

#[tokio::test]
async fn update_releases_old_claims() {
    let repo = seeded_repository();
    let entry = repo
        .insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
        .await
        .unwrap();

    let mut moved = entry.record();
    moved.time_slot = "Mon-10-11".to_string();
    repo.update_entry(entry.id, &moved).await.unwrap();

    // The old slot's claims are all free again.
    repo.insert_entry(&record(2081, "Sun-10-11", 1, "b@x.com", 2))
        .await
        .unwrap();

    // The new slot's claims are held.
    let err = repo
        .insert_entry(&record(2081, "Mon-10-11", 1, "c@x.com", 3))
        .await
        .unwrap_err();
    assert_eq!(violated_dimension(err), ConflictDimension::Room);
}

#[tokio::test]
async fn delete_releases_claims_and_reports_missing() {
    let repo = seeded_repository();
    let entry = repo
        .insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
        .await
        .unwrap();

    repo.delete_entry(entry.id).await.unwrap();
    assert!(matches!(
        repo.delete_entry(entry.id).await.unwrap_err(),
        RepositoryError::NotFound(_)
    ));

    // All three claims are free again.
    repo.insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
        .await
        .unwrap();
}

#[tokio::test]
async fn find_entries_filters_and_orders() {
    let repo = seeded_repository();
    repo.insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
        .await
        .unwrap();
    repo.insert_entry(&record(2081, "Mon-10-11", 1, "b@x.com", 2))
        .await
        .unwrap();
    repo.insert_entry(&record(2082, "Sun-10-11", 2, "a@x.com", 1))
        .await
        .unwrap();

    let by_year = repo
        .find_entries(&ScheduleFilter {
            academic_year: Some(2081),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_year.len(), 2);
    assert!(by_year.windows(2).all(|w| w[0].id < w[1].id));

    let by_room = repo
        .find_entries(&ScheduleFilter {
            academic_year: Some(2081),
            room_id: Some(1),
            time_slot: Some("Sun-10-11".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_room.len(), 1);

    let none = repo
        .find_entries(&ScheduleFilter {
            academic_year: Some(2099),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn distinct_years_are_sorted_and_unique() {
    let repo = seeded_repository();
    assert!(repo.distinct_years().await.unwrap().is_empty());

    repo.insert_entry(&record(2082, "Sun-10-11", 1, "a@x.com", 1))
        .await
        .unwrap();
    repo.insert_entry(&record(2081, "Sun-10-11", 2, "b@x.com", 2))
        .await
        .unwrap();
    repo.insert_entry(&record(2081, "Mon-10-11", 1, "c@x.com", 3))
        .await
        .unwrap();

    assert_eq!(repo.distinct_years().await.unwrap(), vec![2081, 2082]);
}

#[tokio::test]
async fn unhealthy_storage_reports_connection_errors() {
    let repo = seeded_repository();
    repo.set_healthy(false);

    assert!(matches!(
        repo.get_entry(1).await.unwrap_err(),
        RepositoryError::Connection(_)
    ));
    assert!(matches!(
        repo.find_entries(&ScheduleFilter::default()).await.unwrap_err(),
        RepositoryError::Connection(_)
    ));

    repo.set_healthy(true);
    repo.insert_entry(&record(2081, "Sun-10-11", 1, "a@x.com", 1))
        .await
        .unwrap();
}
