//! Router assembly

pub mod admin;
pub mod auth;
pub mod health;
pub mod students;
pub mod teachers;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::json;

use crate::auth::middleware::authenticate;
use crate::state::AppState;

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/health", get(health::health));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .nest("/students", students::router())
        .nest("/teachers", teachers::router())
        .nest("/admin", admin::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .nest("/api", public.merge(protected))
        .fallback(|| async {
            (StatusCode::NOT_FOUND, Json(json!({ "success": false, "message": "Endpoint not found" })))
        })
        .with_state(state)
}
