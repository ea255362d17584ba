//! Student-facing routes, plus the teacher/admin student views

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use solvetrack_core::users::ports::{StudentFilter, UserRepository as _};
use solvetrack_core::{ProfileRepository as _, ProgressRepository as _};
use solvetrack_domain::{ProfileLinks, Role, SolveTrackError};

use crate::auth::middleware::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/sync-progress", post(sync_progress))
        .route("/progress", get(get_progress))
        .route("/", get(list_students))
        .route("/{id}/progress", get(student_progress))
}

/// `GET /api/students/profile` (student)
async fn get_profile(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Student])?;

    let profile = state.profile_service.get_or_create(&current.0.id).await?;
    Ok(Json(json!({ "success": true, "profile": profile })))
}

/// `PUT /api/students/profile` (student)
async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(links): Json<ProfileLinks>,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Student])?;

    let profile = state.profile_service.update_links(&current.0.id, links).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully",
        "profile": profile,
    })))
}

/// `POST /api/students/sync-progress` (student)
///
/// Runs the sync orchestrator for the caller. A missing profile surfaces as
/// 404; individual platform failures are reported inside `results`.
async fn sync_progress(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Student])?;

    let results = state.sync_service.sync_progress(&current.0.id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Progress sync completed",
        "results": results,
    })))
}

/// `GET /api/students/progress` (student)
async fn get_progress(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Student])?;

    let progress = state.progress.list_by_user(&current.0.id).await?;
    Ok(Json(json!({
        "success": true,
        "count": progress.len(),
        "progress": progress,
    })))
}

/// `GET /api/students` (teacher | admin)
///
/// Teachers only see the students assigned to them.
async fn list_students(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Teacher, Role::Admin])?;

    let filter = StudentFilter {
        assigned_teacher: (current.0.role == Role::Teacher).then(|| current.0.id.clone()),
        batch: None,
        approved_only: false,
    };
    let students = state.users.list_students(&filter).await?;

    Ok(Json(json!({
        "success": true,
        "count": students.len(),
        "students": students,
    })))
}

/// `GET /api/students/{id}/progress` (teacher | admin)
async fn student_progress(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Teacher, Role::Admin])?;

    let student = state
        .users
        .get_by_id(&id)
        .await?
        .filter(|user| user.role == Role::Student)
        .ok_or_else(|| ApiError(SolveTrackError::NotFound("Student not found".into())))?;

    if current.0.role == Role::Teacher
        && student.assigned_teacher.as_deref() != Some(current.0.id.as_str())
    {
        return Err(ApiError(SolveTrackError::Forbidden(
            "Not authorized to view this student".into(),
        )));
    }

    let profile = state.profiles.get_by_user(&id).await?;
    let progress = state.progress.list_by_user(&id).await?;

    Ok(Json(json!({
        "success": true,
        "student": {
            "id": student.id,
            "name": student.name,
            "email": student.email,
            "batch": student.batch,
        },
        "profile": profile,
        "progress": progress,
    })))
}
