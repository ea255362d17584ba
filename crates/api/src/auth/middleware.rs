//! Request authentication middleware and the authenticated-user extractor.
//!
//! The middleware validates the bearer token, loads the account, and rejects
//! unapproved students/teachers before the request reaches a handler.
//! Per-route role checks happen in the handlers via `CurrentUser::require`.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;
use solvetrack_core::users::ports::UserRepository as _;
use solvetrack_domain::{Role, SolveTrackError, UserAccount};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated account for this request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserAccount);

impl CurrentUser {
    /// Reject the request unless the caller holds one of the given roles.
    pub fn require(&self, roles: &[Role]) -> Result<(), ApiError> {
        if roles.contains(&self.0.role) {
            Ok(())
        } else {
            Err(ApiError(SolveTrackError::Forbidden(format!(
                "Role '{}' is not authorized to access this resource",
                self.0.role
            ))))
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            ApiError(SolveTrackError::Auth("Authentication required".into()))
        })
    }
}

/// Validate the bearer token, load the account, and enforce approval.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            ApiError(SolveTrackError::Auth("Missing or invalid authorization header".into()))
        })?;

    let claims = state.tokens.validate_token(token)?;

    let user = state
        .users
        .get_by_id(&claims.sub)
        .await?
        .ok_or_else(|| ApiError(SolveTrackError::Auth("User no longer exists".into())))?;

    // Admins are implicitly approved; everyone else waits for an admin
    if user.role != Role::Admin && !user.is_approved {
        return Err(ApiError(SolveTrackError::Forbidden(
            "Your account is pending approval".into(),
        )));
    }

    let (mut parts, body) = req.into_parts();
    parts.extensions.insert(CurrentUser(user));
    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
