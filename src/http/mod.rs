//! Axum-based HTTP server surface.
//!
//! - [`router`]: route table and middleware stack
//! - [`handlers`]: request handlers delegating to the service layer
//! - [`dto`]: request/response shapes
//! - [`error`]: uniform `{kind, message}` error envelope
//! - [`state`]: shared application state

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
