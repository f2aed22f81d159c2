//! Application state for the HTTP server.

use crate::services::SchedulingService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Scheduling service instance
    pub scheduling: SchedulingService,
}

impl AppState {
    /// Create a new application state with the given service.
    pub fn new(scheduling: SchedulingService) -> Self {
        Self { scheduling }
    }
}
