//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! scheduling service for business logic. The caller's identity arrives in
//! identity headers set by the authenticating reverse proxy; token
//! verification happens upstream.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::dto::{
    AvailableYearsResponse, CheckConflictRequest, CheckConflictResponse, CreateScheduleRequest,
    HealthResponse, MessageResponse, ScheduleResponse, UpdateScheduleRequest, YearQuery,
};
use super::state::AppState;
use crate::auth::Actor;
use crate::db::repository::ScheduleRepository;
use crate::models::{current_academic_year, ScheduleRecord};
use crate::services::ServiceError;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, ServiceError>;

/// Identity header carrying the verified actor email.
pub const ACTOR_EMAIL_HEADER: &str = "x-actor-email";
/// Identity header carrying the verified actor role.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Read the verified actor identity from the proxy headers. Both headers
/// must be present and parsable; anything else means "no authenticated
/// caller".
pub fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
    let email = headers.get(ACTOR_EMAIL_HEADER)?.to_str().ok()?;
    let role = headers
        .get(ACTOR_ROLE_HEADER)?
        .to_str()
        .ok()?
        .parse()
        .ok()?;
    if email.is_empty() {
        return None;
    }
    Some(Actor::new(email, role))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and storage is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let storage = match state.scheduling.repository().health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        storage,
    }))
}

// =============================================================================
// Schedule CRUD
// =============================================================================

/// POST /v1/schedules
///
/// Create a schedule entry after a clean conflict check.
pub async fn create_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), ServiceError> {
    let actor = actor_from_headers(&headers);
    let entry = state
        .scheduling
        .create(actor.as_ref(), request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// GET /v1/schedules/{id}
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ScheduleResponse> {
    let entry = state.scheduling.get(id).await?;
    Ok(Json(entry.into()))
}

/// PUT /v1/schedules/{id}
///
/// Update a schedule entry. Absent fields retain their current values.
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateScheduleRequest>,
) -> HandlerResult<ScheduleResponse> {
    let actor = actor_from_headers(&headers);
    let entry = state
        .scheduling
        .update(actor.as_ref(), id, request.into())
        .await?;
    Ok(Json(entry.into()))
}

/// DELETE /v1/schedules/{id}
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> HandlerResult<MessageResponse> {
    let actor = actor_from_headers(&headers);
    state.scheduling.delete(actor.as_ref(), id).await?;
    Ok(Json(MessageResponse {
        message: "schedule deleted successfully".to_string(),
    }))
}

// =============================================================================
// Conflict probe
// =============================================================================

/// POST /v1/schedules/check-conflict
///
/// Advisory probe: reports whether the candidate assignment would collide
/// with a committed entry. A clean probe can still lose the race at commit
/// time.
pub async fn check_conflict(
    State(state): State<AppState>,
    Json(request): Json<CheckConflictRequest>,
) -> HandlerResult<CheckConflictResponse> {
    let candidate = ScheduleRecord {
        academic_year: request.year.unwrap_or_else(current_academic_year),
        time_slot: request.time_slot,
        room_id: request.room_id,
        teacher_email: request.teacher_email,
        group_id: request.group_id,
        // Not a conflict dimension; never stored by this probe.
        subject_id: 0,
    };
    let conflict = state.scheduling.check_slot(&candidate).await?;
    Ok(Json(CheckConflictResponse { conflict }))
}

// =============================================================================
// List projections
// =============================================================================

/// GET /v1/schedules/room/{room_id}?year=...
pub async fn list_by_room(
    State(state): State<AppState>,
    Path(room_id): Path<i64>,
    Query(query): Query<YearQuery>,
) -> HandlerResult<Vec<ScheduleResponse>> {
    let entries = state.scheduling.list_by_room(room_id, query.year).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// GET /v1/schedules/teacher/{email}?year=...
pub async fn list_by_teacher(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(query): Query<YearQuery>,
) -> HandlerResult<Vec<ScheduleResponse>> {
    let entries = state.scheduling.list_by_teacher(&email, query.year).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// GET /v1/schedules/group/{group_id}?year=...
pub async fn list_by_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Query(query): Query<YearQuery>,
) -> HandlerResult<Vec<ScheduleResponse>> {
    let entries = state.scheduling.list_by_group(group_id, query.year).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// GET /v1/schedules/years
///
/// Distinct academic years present in storage; never empty.
pub async fn available_years(
    State(state): State<AppState>,
) -> HandlerResult<AvailableYearsResponse> {
    let years = state.scheduling.list_available_years().await?;
    Ok(Json(AvailableYearsResponse { years }))
}
