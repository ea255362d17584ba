//! Teacher routes: assigned students, analytics, and feedback

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use solvetrack_core::users::ports::{StudentFilter, UserRepository as _};
use solvetrack_core::AnalyticsScope;
use solvetrack_domain::{AnalyticsFilter, FeedbackCategory, Platform, Role};

use crate::auth::middleware::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students", get(assigned_students))
        .route("/analytics", get(analytics))
        .route("/feedback", post(add_feedback).get(list_feedback))
        .route("/my-feedback", get(my_feedback))
}

#[derive(Debug, Deserialize)]
struct AnalyticsQuery {
    batch: Option<String>,
    platform: Option<Platform>,
}

#[derive(Debug, Deserialize)]
struct FeedbackRequest {
    student_id: String,
    message: String,
    category: Option<FeedbackCategory>,
}

/// `GET /api/teachers/students` (teacher)
async fn assigned_students(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Teacher])?;

    let students = state
        .users
        .list_students(&StudentFilter {
            assigned_teacher: Some(current.0.id.clone()),
            batch: None,
            approved_only: true,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "count": students.len(),
        "students": students,
    })))
}

/// `GET /api/teachers/analytics?batch=&platform=` (teacher)
async fn analytics(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Teacher])?;

    let report = state
        .analytics
        .cohort_report(
            AnalyticsScope::Teacher(current.0.id.clone()),
            AnalyticsFilter { batch: query.batch, platform: query.platform },
        )
        .await?;

    Ok(Json(json!({ "success": true, "analytics": report })))
}

/// `POST /api/teachers/feedback` (teacher)
async fn add_feedback(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    current.require(&[Role::Teacher])?;

    let feedback = state
        .feedback_service
        .create(&current.0.id, &request.student_id, &request.message, request.category)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Feedback added successfully",
            "feedback": feedback,
        })),
    ))
}

/// `GET /api/teachers/feedback` (teacher)
async fn list_feedback(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Teacher])?;

    let feedback = state.feedback_service.list_for_teacher(&current.0.id).await?;
    Ok(Json(json!({
        "success": true,
        "count": feedback.len(),
        "feedback": feedback,
    })))
}

/// `GET /api/teachers/my-feedback` (student)
async fn my_feedback(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    current.require(&[Role::Student])?;

    let feedback = state.feedback_service.list_for_student(&current.0.id).await?;
    Ok(Json(json!({
        "success": true,
        "count": feedback.len(),
        "feedback": feedback,
    })))
}
