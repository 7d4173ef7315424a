use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// ApiError
///
/// The application-wide error taxonomy. Every collaborator failure (database,
/// hashing, signing) is translated into one of these kinds before a response is
/// written; raw driver errors are logged server-side and never echoed to clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input. The detail string is safe to surface.
    #[error("Invalid request data")]
    Validation(String),
    /// Missing/invalid/expired token or bad credentials. The message is deliberately
    /// non-specific so callers cannot distinguish "no such user" from "wrong password".
    #[error("Invalid credentials")]
    Unauthenticated,
    /// Valid identity, insufficient role for the route.
    #[error("Insufficient permissions")]
    Forbidden,
    /// Duplicate unique key (e.g. email already registered).
    #[error("{0}")]
    Conflict(String),
    /// Missing entity.
    #[error("{0}")]
    NotFound(String),
    /// Storage/hash/signing failure. Detail stays in the logs.
    #[error("Internal server error")]
    Internal,
}

/// Uniform failure envelope. `error` detail is only populated for validation-class
/// failures; authentication failures never carry detail.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            ApiError::Validation(detail) => Some(detail.clone()),
            _ => None,
        };
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
            error: detail,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return ApiError::Conflict("Duplicate record".to_string());
            }
        }
        tracing::error!("database error: {:?}", err);
        ApiError::Internal
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("password hashing error: {:?}", err);
        ApiError::Internal
    }
}
