//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use solvetrack_domain::SolveTrackError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SolveTrackError);

impl From<InfraError> for SolveTrackError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SolveTrackError> for InfraError {
    fn from(value: SolveTrackError) -> Self {
        InfraError(value)
    }
}

impl From<SqlError> for InfraError {
    fn from(err: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        let mapped = match err {
            RE::SqliteFailure(code, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match code.code {
                    ErrorCode::DatabaseBusy => SolveTrackError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        SolveTrackError::Database("database is locked".into())
                    }
                    ErrorCode::ConstraintViolation if code.extended_code == 2067 => {
                        SolveTrackError::Conflict("unique constraint violation".into())
                    }
                    ErrorCode::ConstraintViolation if code.extended_code == 1555 => {
                        SolveTrackError::Conflict("unique constraint violation".into())
                    }
                    ErrorCode::ConstraintViolation => {
                        SolveTrackError::Database("constraint violation".into())
                    }
                    _ => SolveTrackError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        code.code, code.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                SolveTrackError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                SolveTrackError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                SolveTrackError::Database(format!("invalid column type: {ty}"))
            }
            other => SolveTrackError::Database(format!("sqlite error: {other}")),
        };

        InfraError(mapped)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        InfraError(SolveTrackError::Database(format!("connection pool error: {err}")))
    }
}

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        let mapped = if err.is_timeout() {
            SolveTrackError::Network(format!("http request timed out: {err}"))
        } else if err.is_connect() {
            SolveTrackError::Network(format!("http connection failed: {err}"))
        } else if err.is_decode() {
            SolveTrackError::InvalidInput(format!("failed to decode http response: {err}"))
        } else {
            SolveTrackError::Network(format!("http error: {err}"))
        };

        InfraError(mapped)
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        InfraError(SolveTrackError::Internal(format!("json serialization error: {err}")))
    }
}

impl From<tokio::task::JoinError> for InfraError {
    fn from(err: tokio::task::JoinError) -> Self {
        InfraError(SolveTrackError::Internal(format!("task join error: {err}")))
    }
}
