//! Translation of core errors into HTTP responses.
//!
//! The core never encodes transport concerns; this is the only place status
//! codes are decided.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

#[derive(Debug)]
pub enum ApiError {
    Database(quill_core::Error),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl From<quill_core::Error> for ApiError {
    fn from(err: quill_core::Error) -> Self {
        match &err {
            quill_core::Error::Unauthorized(msg) => ApiError::Unauthorized(msg.clone()),
            quill_core::Error::NoteNotFound(_) => ApiError::NotFound(err.to_string()),
            quill_core::Error::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            quill_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            quill_core::Error::Reminder(msg) => ApiError::Conflict(msg.clone()),
            quill_core::Error::Conflict(msg) => ApiError::Conflict(msg.clone()),
            quill_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            quill_core::Error::Database(sqlx_err) => {
                let msg = sqlx_err.to_string();
                if msg.contains("duplicate key") || msg.contains("unique constraint") {
                    return ApiError::Conflict(msg);
                }
                ApiError::Database(err)
            }
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
