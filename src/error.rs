use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure taxonomy for the user-document core. Handlers catch these at the
/// boundary and respond with fixed generic messages; the cause is logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("user not found")]
    NotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error("password hashing failed: {0}")]
    Hashing(#[source] bcrypt::BcryptError),
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("invalid document: {0}")]
    Validation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "User not found"),
            AppError::EmailTaken => (StatusCode::CONFLICT, "Email already registered"),
            AppError::Hashing(err) => {
                error!(error = %err, "password hashing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
            AppError::Store(err) => {
                error!(error = %err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
            AppError::Validation(err) => {
                error!(error = %err, "document validation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
