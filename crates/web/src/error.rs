use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use raffle_storage::dto::common::FieldErrors;
use raffle_storage::error::StorageError;
use serde_json::json;
use std::fmt;

use crate::features::uploads::services::UploadError;
use crate::features::winners::services::WinnerImportError;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(FieldErrors),
    BadRequest(String),
    /// One item of a winner batch was rejected
    InvalidItem {
        index: usize,
        saved: usize,
        details: FieldErrors,
    },
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {:?}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::InvalidItem { index, .. } => write!(f, "Invalid item at index {}", index),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidItem { .. } => StatusCode::BAD_REQUEST,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::InvalidItem {
                index,
                saved,
                details,
            } => {
                json!({
                    "error": "Invalid data",
                    "details": details,
                    "index": index,
                    "saved": saved
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<FieldErrors> for WebError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<UploadError> for WebError {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::Storage(e) => Self::Storage(e),
            other => Self::BadRequest(other.to_string()),
        }
    }
}

impl From<WinnerImportError> for WebError {
    fn from(error: WinnerImportError) -> Self {
        match error {
            WinnerImportError::Invalid {
                index,
                saved,
                details,
            } => Self::InvalidItem {
                index,
                saved,
                details,
            },
            WinnerImportError::Storage(e) => Self::Storage(e),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;
