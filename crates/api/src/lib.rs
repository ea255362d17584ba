//! # SolveTrack App
//!
//! REST delivery layer: axum routing, JWT authentication, role
//! authorization, and application wiring.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
