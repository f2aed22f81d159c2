//! Routiney HTTP Server Binary
//!
//! This is the main entry point for the routiney REST API server.
//! It loads configuration, seeds the local repository's directory, sets up
//! the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin routiney-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0, overrides routiney.toml)
//! - `PORT`: Server port (default: 8080, overrides routiney.toml)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use routiney::auth::RoleAuthorizer;
use routiney::config::AppConfig;
use routiney::db::repository::FullRepository;
use routiney::db::LocalRepository;
use routiney::http::{create_router, AppState};
use routiney::services::SchedulingService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting routiney HTTP server");

    let config = AppConfig::from_default_location()?.apply_env_overrides();

    // Build the repository and seed its directory from configuration
    let repository = LocalRepository::new();
    for room in &config.directory.rooms {
        repository.add_room(*room);
    }
    for teacher in &config.directory.teachers {
        repository.add_teacher(teacher.clone());
    }
    for group in &config.directory.groups {
        repository.add_group(*group);
    }
    for subject in &config.directory.subjects {
        repository.add_subject(*subject);
    }
    info!(
        "Directory seeded: {} rooms, {} teachers, {} groups, {} subjects",
        config.directory.rooms.len(),
        config.directory.teachers.len(),
        config.directory.groups.len(),
        config.directory.subjects.len()
    );

    let repository = Arc::new(repository) as Arc<dyn FullRepository>;
    let scheduling = SchedulingService::new(repository, Arc::new(RoleAuthorizer));

    // Create application state and router
    let state = AppState::new(scheduling);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
