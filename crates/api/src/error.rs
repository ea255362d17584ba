//! API error type mapped onto HTTP statuses
//!
//! Every handler returns `Result<_, ApiError>`; the conversion into a JSON
//! `{success: false, message}` envelope happens once here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use solvetrack_domain::SolveTrackError;

use crate::auth::jwt::JwtError;
use crate::auth::password::HashingError;

/// Wrapper that carries the domain error out of a handler
#[derive(Debug)]
pub struct ApiError(pub SolveTrackError);

impl From<SolveTrackError> for ApiError {
    fn from(err: SolveTrackError) -> Self {
        ApiError(err)
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenCreation => {
                ApiError(SolveTrackError::Internal("failed to create token".into()))
            }
            other => ApiError(SolveTrackError::Auth(other.to_string())),
        }
    }
}

impl From<HashingError> for ApiError {
    fn from(err: HashingError) -> Self {
        tracing::error!(error = %err, "password hashing error");
        ApiError(SolveTrackError::Internal("password hashing failed".into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SolveTrackError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            SolveTrackError::Validation(msg) | SolveTrackError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            SolveTrackError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            SolveTrackError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            SolveTrackError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            // Internal tool: the raised message is echoed on 500s
            other => {
                tracing::error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError(SolveTrackError::NotFound("nope".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = ApiError(SolveTrackError::Validation("bad url".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn expired_token_maps_to_401() {
        let response = ApiError::from(JwtError::TokenExpired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
