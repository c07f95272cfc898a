use crate::store::StoreError;
use crate::validation::{FieldError, ValidationErrors};
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("student '{id}' not found")]
    NotFound { id: Uuid },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn bad_request(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(FieldError::InvalidFormat {
            field,
            reason: reason.into(),
        }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("body", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request("id", rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": errors.to_string(),
                    "fields": errors.details(),
                }),
            ),
            Self::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": self.to_string(),
                }),
            ),
            Self::Store(err) => {
                tracing::error!("store error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
