//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::models::{NewScheduleEntry, ScheduleEntry, SchedulePatch};

/// Request body for creating a schedule entry. The year may be omitted; the
/// service resolves it from the current date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub group_id: i64,
    pub room_id: i64,
    pub subject_id: i64,
    pub teacher_email: String,
    pub time_slot: String,
    #[serde(default)]
    pub year: Option<i32>,
}

impl From<CreateScheduleRequest> for NewScheduleEntry {
    fn from(req: CreateScheduleRequest) -> Self {
        Self {
            academic_year: req.year,
            time_slot: req.time_slot,
            room_id: req.room_id,
            teacher_email: req.teacher_email,
            group_id: req.group_id,
            subject_id: req.subject_id,
        }
    }
}

/// Request body for updating a schedule entry. Absent fields retain their
/// current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub teacher_email: Option<String>,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl From<UpdateScheduleRequest> for SchedulePatch {
    fn from(req: UpdateScheduleRequest) -> Self {
        Self {
            academic_year: req.year,
            time_slot: req.time_slot,
            room_id: req.room_id,
            teacher_email: req.teacher_email,
            group_id: req.group_id,
            subject_id: req.subject_id,
        }
    }
}

/// A committed schedule entry as returned by the API. The year is always
/// present on output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub id: i64,
    pub group_id: i64,
    pub room_id: i64,
    pub subject_id: i64,
    pub teacher_email: String,
    pub time_slot: String,
    pub year: i32,
}

impl From<ScheduleEntry> for ScheduleResponse {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            id: entry.id,
            group_id: entry.group_id,
            room_id: entry.room_id,
            subject_id: entry.subject_id,
            teacher_email: entry.teacher_email,
            time_slot: entry.time_slot,
            year: entry.academic_year,
        }
    }
}

/// Query parameters for the list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearQuery {
    #[serde(default)]
    pub year: Option<i32>,
}

/// Response for the available-years endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableYearsResponse {
    pub years: Vec<i32>,
}

/// Request body for the conflict probe endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConflictRequest {
    pub time_slot: String,
    pub room_id: i64,
    pub teacher_email: String,
    pub group_id: i64,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Response for the conflict probe endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConflictResponse {
    pub conflict: bool,
}

/// Plain message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage backend status
    pub storage: String,
}
