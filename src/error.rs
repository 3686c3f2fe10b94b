use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Email already registered")]
    EmailTaken,
    #[error("Company name already taken")]
    NameTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Cannot delete your own account")]
    SelfDeletion,
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("User not found")]
    UserNotFound,
    #[error("Insufficient permissions")]
    Forbidden,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    /// Maps a unique-constraint violation onto `taken`, leaving every other
    /// storage error as `Database`.
    pub fn unique_or(err: sqlx::Error, taken: AppError) -> AppError {
        if let Some(db_err) = err.as_database_error()
            && db_err.is_unique_violation() {
            return taken;
        }
        AppError::Database(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{} {}", field, reason)
            })
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error. Database operation failed.".to_string())
            }
            AppError::Validation(_)
            | AppError::EmailTaken
            | AppError::NameTaken
            | AppError::InvalidCredentials
            | AppError::SelfDeletion => {
                warn!("Business logic error: {}", self);
                let message = match &self {
                    AppError::Validation(msg) => msg.clone(),
                    other => other.to_string(),
                };
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Unauthenticated | AppError::InvalidToken | AppError::UserNotFound => {
                warn!("Authentication rejected: {}", self);
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.".to_string()),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.".to_string())
            }
        };

        let mut response = (status, Json(json!({ "detail": message }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}
