//! Admin routes: user administration and system analytics

use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use solvetrack_core::users::ports::{StudentFilter, UserRepository as _};
use solvetrack_domain::{Role, SolveTrackError};

use crate::auth::middleware::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .route("/users/{id}/approve", put(approve_user))
        .route("/assign-teacher", post(assign_teacher))
        .route("/analytics", get(system_analytics))
}

#[derive(Debug, Deserialize)]
struct ListUsersQuery {
    role: Option<Role>,
}

#[derive(Debug, Deserialize)]
struct UpdateUserRequest {
    name: Option<String>,
    email: Option<String>,
    role: Option<Role>,
    batch: Option<String>,
    is_approved: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct AssignTeacherRequest {
    teacher_id: String,
    student_ids: Option<Vec<String>>,
    batch: Option<String>,
}

/// `GET /api/admin/users?role=` (admin)
async fn list_users(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Admin])?;

    let users = state.users.list(query.role).await?;
    Ok(Json(json!({
        "success": true,
        "count": users.len(),
        "users": users,
    })))
}

/// `PUT /api/admin/users/{id}` (admin)
async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Admin])?;

    let mut user = state
        .users
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError(SolveTrackError::NotFound("User not found".into())))?;

    if let Some(name) = request.name {
        user.name = name;
    }
    if let Some(email) = request.email {
        user.email = email.trim().to_lowercase();
    }
    if let Some(role) = request.role {
        user.role = role;
    }
    if let Some(batch) = request.batch {
        user.batch = Some(batch);
    }
    if let Some(is_approved) = request.is_approved {
        user.is_approved = is_approved;
    }
    user.updated_at = Utc::now().timestamp();

    state.users.update(user.clone()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "User updated successfully",
        "user": user,
    })))
}

/// `PUT /api/admin/users/{id}/approve` (admin)
async fn approve_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Admin])?;

    let mut user = state
        .users
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError(SolveTrackError::NotFound("User not found".into())))?;

    user.is_approved = true;
    user.updated_at = Utc::now().timestamp();
    state.users.update(user.clone()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "User approved successfully",
        "user": user,
    })))
}

/// `DELETE /api/admin/users/{id}` (admin)
///
/// Profile, progress and feedback rows cascade with the account.
async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Admin])?;

    let user = state
        .users
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError(SolveTrackError::NotFound("User not found".into())))?;

    if user.role == Role::Admin {
        return Err(ApiError(SolveTrackError::Forbidden("Cannot delete admin users".into())));
    }

    state.users.delete(&id).await?;

    Ok(Json(json!({ "success": true, "message": "User deleted successfully" })))
}

/// `POST /api/admin/assign-teacher` (admin)
///
/// Assigns by explicit student ids, or by batch when ids are absent.
async fn assign_teacher(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<AssignTeacherRequest>,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Admin])?;

    let teacher_exists = state
        .users
        .get_by_id(&request.teacher_id)
        .await?
        .filter(|user| user.role == Role::Teacher)
        .is_some();
    if !teacher_exists {
        return Err(ApiError(SolveTrackError::NotFound("Teacher not found".into())));
    }

    let student_ids = match (request.student_ids, request.batch) {
        (Some(ids), _) if !ids.is_empty() => ids,
        (_, Some(batch)) => state
            .users
            .list_students(&StudentFilter {
                assigned_teacher: None,
                batch: Some(batch),
                approved_only: false,
            })
            .await?
            .into_iter()
            .map(|student| student.id)
            .collect(),
        _ => {
            return Err(ApiError(SolveTrackError::Validation(
                "Please provide either student_ids or batch".into(),
            )))
        }
    };

    let modified = state.users.assign_teacher(&request.teacher_id, &student_ids).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Assigned teacher to {modified} students"),
        "modified_count": modified,
    })))
}

/// `GET /api/admin/analytics` (admin)
async fn system_analytics(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Admin])?;

    let report = state.analytics.system_report().await?;
    Ok(Json(json!({ "success": true, "analytics": report })))
}
