//! Scheduling service: orchestration of schedule entry mutations.
//!
//! Every mutating operation runs the same pipeline: authorize the explicit
//! actor, validate the input, check directory references, resolve the
//! academic year from a single captured date, scan for conflicts, and commit
//! against the repository. The repository's uniqueness constraint decides
//! writer races; a late `ConstraintViolation` surfaces as the same conflict
//! error the scan would have produced.

use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::auth::{Actor, Authorizer, Role};
use crate::db::repository::{
    DirectoryRepository, FullRepository, RepositoryError, ScheduleRepository,
};
use crate::models::{
    academic_year_for, current_academic_year, NewScheduleEntry, ScheduleEntry, ScheduleFilter,
    SchedulePatch, ScheduleRecord,
};
use crate::services::conflict::find_conflict;
use crate::services::error::{ServiceError, ServiceResult};

/// Scheduling service over a repository and an authorizer.
///
/// Cloning is cheap; all clones share the same collaborators.
#[derive(Clone)]
pub struct SchedulingService {
    repository: Arc<dyn FullRepository>,
    authorizer: Arc<dyn Authorizer>,
}

impl SchedulingService {
    pub fn new(repository: Arc<dyn FullRepository>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            repository,
            authorizer,
        }
    }

    pub fn repository(&self) -> &Arc<dyn FullRepository> {
        &self.repository
    }

    // ==================== Mutations ====================

    /// Create a schedule entry.
    ///
    /// Resolves the academic year from today's date when the input omits
    /// it. Fails with `Conflict` when the slot is taken on any dimension,
    /// with `Validation` on malformed input or dangling references, and
    /// with `Unauthorized`/`Forbidden` when the actor may not mutate
    /// schedules.
    pub async fn create(
        &self,
        actor: Option<&Actor>,
        input: NewScheduleEntry,
    ) -> ServiceResult<ScheduleEntry> {
        self.require_admin(actor, "create schedules")?;
        validate_new_entry(&input)?;
        self.check_references(input.room_id, &input.teacher_email, input.group_id)
            .await?;
        if !self.repository.subject_exists(input.subject_id).await? {
            return Err(ServiceError::validation(format!(
                "subject {} does not exist",
                input.subject_id
            )));
        }

        // One "now" per request; the year must not split across midnight.
        let today = Utc::now().date_naive();
        let academic_year = input
            .academic_year
            .unwrap_or_else(|| academic_year_for(today));

        let record = ScheduleRecord {
            academic_year,
            time_slot: input.time_slot,
            room_id: input.room_id,
            teacher_email: input.teacher_email,
            group_id: input.group_id,
            subject_id: input.subject_id,
        };

        if let Some(dimension) = find_conflict(self.repository.as_ref(), &record, None).await? {
            return Err(ServiceError::conflict_on(
                dimension,
                record.academic_year,
                &record.time_slot,
            ));
        }

        let entry = self
            .repository
            .insert_entry(&record)
            .await
            .map_err(Self::commit_error)?;

        info!(
            "created schedule entry {} (year {}, slot '{}', room {}, group {})",
            entry.id, entry.academic_year, entry.time_slot, entry.room_id, entry.group_id
        );
        Ok(entry)
    }

    /// Update a schedule entry.
    ///
    /// Unset patch fields retain the current value. The conflict scan runs
    /// against the fully merged record with the entry itself excluded, and
    /// is skipped entirely when the merged year, slot, and all three
    /// dimensions are unchanged.
    pub async fn update(
        &self,
        actor: Option<&Actor>,
        id: i64,
        patch: SchedulePatch,
    ) -> ServiceResult<ScheduleEntry> {
        self.require_admin(actor, "update schedules")?;
        validate_patch(&patch)?;

        let current = self.repository.get_entry(id).await?;
        let merged = patch.apply_to(&current);

        if patch.room_id.is_some() && !self.repository.room_exists(merged.room_id).await? {
            return Err(ServiceError::validation(format!(
                "room {} does not exist",
                merged.room_id
            )));
        }
        if patch.teacher_email.is_some()
            && !self.repository.teacher_exists(&merged.teacher_email).await?
        {
            return Err(ServiceError::validation(format!(
                "teacher {} does not exist",
                merged.teacher_email
            )));
        }
        if patch.group_id.is_some() && !self.repository.group_exists(merged.group_id).await? {
            return Err(ServiceError::validation(format!(
                "group {} does not exist",
                merged.group_id
            )));
        }
        if patch.subject_id.is_some() && !self.repository.subject_exists(merged.subject_id).await? {
            return Err(ServiceError::validation(format!(
                "subject {} does not exist",
                merged.subject_id
            )));
        }

        // No conflict-relevant field moved: the committed state cannot gain
        // a collision, so the scan is skipped.
        if !merged.same_slot_assignment(&current.record()) {
            if let Some(dimension) =
                find_conflict(self.repository.as_ref(), &merged, Some(id)).await?
            {
                return Err(ServiceError::conflict_on(
                    dimension,
                    merged.academic_year,
                    &merged.time_slot,
                ));
            }
        }

        let entry = self
            .repository
            .update_entry(id, &merged)
            .await
            .map_err(Self::commit_error)?;

        info!("updated schedule entry {}", entry.id);
        Ok(entry)
    }

    /// Delete a schedule entry. Deletion can never violate the booking
    /// invariant, so it is unconditional once the entry resolves.
    pub async fn delete(&self, actor: Option<&Actor>, id: i64) -> ServiceResult<()> {
        self.require_admin(actor, "delete schedules")?;
        self.repository.delete_entry(id).await?;
        info!("deleted schedule entry {}", id);
        Ok(())
    }

    // ==================== Reads ====================

    pub async fn get(&self, id: i64) -> ServiceResult<ScheduleEntry> {
        Ok(self.repository.get_entry(id).await?)
    }

    /// List entries for a room, defaulting the year to the current one.
    pub async fn list_by_room(
        &self,
        room_id: i64,
        year: Option<i32>,
    ) -> ServiceResult<Vec<ScheduleEntry>> {
        let filter = ScheduleFilter {
            academic_year: Some(year.unwrap_or_else(current_academic_year)),
            room_id: Some(room_id),
            ..Default::default()
        };
        Ok(self.repository.find_entries(&filter).await?)
    }

    /// List entries for a teacher, defaulting the year to the current one.
    pub async fn list_by_teacher(
        &self,
        teacher_email: &str,
        year: Option<i32>,
    ) -> ServiceResult<Vec<ScheduleEntry>> {
        let filter = ScheduleFilter {
            academic_year: Some(year.unwrap_or_else(current_academic_year)),
            teacher_email: Some(teacher_email.to_string()),
            ..Default::default()
        };
        Ok(self.repository.find_entries(&filter).await?)
    }

    /// List entries for a student group, defaulting the year to the current
    /// one.
    pub async fn list_by_group(
        &self,
        group_id: i64,
        year: Option<i32>,
    ) -> ServiceResult<Vec<ScheduleEntry>> {
        let filter = ScheduleFilter {
            academic_year: Some(year.unwrap_or_else(current_academic_year)),
            group_id: Some(group_id),
            ..Default::default()
        };
        Ok(self.repository.find_entries(&filter).await?)
    }

    /// Distinct academic years present in storage. An empty store yields the
    /// current resolved year so callers always have a year to query.
    pub async fn list_available_years(&self) -> ServiceResult<Vec<i32>> {
        let years = self.repository.distinct_years().await?;
        if years.is_empty() {
            return Ok(vec![current_academic_year()]);
        }
        Ok(years)
    }

    /// Probe whether a candidate assignment would conflict, without
    /// committing anything. The result is advisory: a clean probe can still
    /// lose a race at commit time.
    pub async fn check_slot(&self, candidate: &ScheduleRecord) -> ServiceResult<bool> {
        Ok(find_conflict(self.repository.as_ref(), candidate, None)
            .await?
            .is_some())
    }

    // ==================== Internals ====================

    fn require_admin(&self, actor: Option<&Actor>, action: &str) -> ServiceResult<()> {
        let actor = actor.ok_or_else(|| {
            ServiceError::unauthorized(format!("authentication required to {}", action))
        })?;
        if !self.authorizer.has_role(actor, Role::Admin) {
            warn!("{} denied: {} is not an admin", action, actor.email);
            return Err(ServiceError::forbidden(format!(
                "not authorized to {}",
                action
            )));
        }
        Ok(())
    }

    async fn check_references(
        &self,
        room_id: i64,
        teacher_email: &str,
        group_id: i64,
    ) -> ServiceResult<()> {
        if !self.repository.room_exists(room_id).await? {
            return Err(ServiceError::validation(format!(
                "room {} does not exist",
                room_id
            )));
        }
        if !self.repository.teacher_exists(teacher_email).await? {
            return Err(ServiceError::validation(format!(
                "teacher {} does not exist",
                teacher_email
            )));
        }
        if !self.repository.group_exists(group_id).await? {
            return Err(ServiceError::validation(format!(
                "group {} does not exist",
                group_id
            )));
        }
        Ok(())
    }

    /// Map a commit-time repository error. A `ConstraintViolation` here
    /// means the scan passed and a concurrent writer won the slot; the
    /// caller sees the ordinary conflict error, nothing internal.
    fn commit_error(err: RepositoryError) -> ServiceError {
        if matches!(err, RepositoryError::ConstraintViolation { .. }) {
            warn!("commit lost a slot race: {}", err);
        }
        err.into()
    }
}

fn validate_new_entry(input: &NewScheduleEntry) -> ServiceResult<()> {
    if input.time_slot.trim().is_empty() {
        return Err(ServiceError::validation("time slot must not be empty"));
    }
    if !is_well_formed_email(&input.teacher_email) {
        return Err(ServiceError::validation(format!(
            "teacher email '{}' is not well-formed",
            input.teacher_email
        )));
    }
    for (field, value) in [
        ("room_id", input.room_id),
        ("group_id", input.group_id),
        ("subject_id", input.subject_id),
    ] {
        if value <= 0 {
            return Err(ServiceError::validation(format!(
                "{} must be a positive identifier",
                field
            )));
        }
    }
    if let Some(year) = input.academic_year {
        if year <= 0 {
            return Err(ServiceError::validation("year must be positive"));
        }
    }
    Ok(())
}

fn validate_patch(patch: &SchedulePatch) -> ServiceResult<()> {
    if let Some(slot) = &patch.time_slot {
        if slot.trim().is_empty() {
            return Err(ServiceError::validation("time slot must not be empty"));
        }
    }
    if let Some(email) = &patch.teacher_email {
        if !is_well_formed_email(email) {
            return Err(ServiceError::validation(format!(
                "teacher email '{}' is not well-formed",
                email
            )));
        }
    }
    for (field, value) in [
        ("room_id", patch.room_id),
        ("group_id", patch.group_id),
        ("subject_id", patch.subject_id),
    ] {
        if let Some(value) = value {
            if value <= 0 {
                return Err(ServiceError::validation(format!(
                    "{} must be a positive identifier",
                    field
                )));
            }
        }
    }
    if let Some(year) = patch.academic_year {
        if year <= 0 {
            return Err(ServiceError::validation("year must be positive"));
        }
    }
    Ok(())
}

/// Minimal shape check: one '@', non-empty local part, dotted domain.
fn is_well_formed_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}
