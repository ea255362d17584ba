//! Registration, login, and the current-user endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use solvetrack_domain::{Role, SolveTrackError, UserAccount};
use uuid::Uuid;

use crate::auth::middleware::CurrentUser;
use crate::auth::password::Hasher as _;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub batch: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/register`
///
/// Creates an unapproved student or teacher account. Admin accounts are
/// seeded at startup, never registered.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if request.role == Role::Admin {
        return Err(ApiError(SolveTrackError::Validation(
            "Cannot register an admin account".into(),
        )));
    }
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(ApiError(SolveTrackError::Validation("Name and email are required".into())));
    }
    if request.password.len() < 6 {
        return Err(ApiError(SolveTrackError::Validation(
            "Password must be at least 6 characters".into(),
        )));
    }

    if state.users.get_by_email(&request.email).await?.is_some() {
        return Err(ApiError(SolveTrackError::Conflict("Email already registered".into())));
    }

    let now = Utc::now().timestamp();
    let user = UserAccount {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        email: request.email.trim().to_lowercase(),
        password_hash: state.hasher.hash(&request.password)?,
        role: request.role,
        batch: request.batch,
        assigned_teacher: None,
        is_approved: false,
        created_at: now,
        updated_at: now,
    };
    state.users.create(user.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Registered successfully, awaiting approval",
            "user": user,
        })),
    ))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let invalid = || ApiError(SolveTrackError::Auth("Invalid credentials".into()));

    let user = state
        .users
        .get_by_email(&request.email.trim().to_lowercase())
        .await?
        .ok_or_else(invalid)?;

    if !state.hasher.verify(&request.password, &user.password_hash)? {
        return Err(invalid());
    }

    let token = state.tokens.create_token(&user)?;

    Ok(Json(json!({ "success": true, "token": token, "user": user })))
}

/// `GET /api/auth/me`
pub async fn me(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({ "success": true, "user": user }))
}
