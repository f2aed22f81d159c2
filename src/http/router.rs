//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Schedule CRUD
        .route("/schedules", post(handlers::create_schedule))
        .route(
            "/schedules/{id}",
            get(handlers::get_schedule)
                .put(handlers::update_schedule)
                .delete(handlers::delete_schedule),
        )
        // Conflict probe
        .route("/schedules/check-conflict", post(handlers::check_conflict))
        // List projections
        .route("/schedules/years", get(handlers::available_years))
        .route("/schedules/room/{room_id}", get(handlers::list_by_room))
        .route("/schedules/teacher/{email}", get(handlers::list_by_teacher))
        .route("/schedules/group/{group_id}", get(handlers::list_by_group));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RoleAuthorizer;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::FullRepository;
    use crate::services::SchedulingService;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
        let service = SchedulingService::new(repo, Arc::new(RoleAuthorizer));
        let state = AppState::new(service);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
