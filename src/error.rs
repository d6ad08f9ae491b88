//! Application error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`; the [`IntoResponse`] impl turns
//! an error into the JSON envelope shared by all endpoints:
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "buttonId is required",
//!   "error": "validation_error",
//!   "details": { "field": "buttonId" }
//! }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or malformed. Maps to 400.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The requested resource does not exist. Maps to 404.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The event store could not be reached or rejected a write. Maps to 500.
    #[error("{message}")]
    StorageUnavailable { message: String, details: Value },
}

/// Serialisable error payload written into the response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    error: &'static str,
    details: Value,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StorageUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::StorageUnavailable { .. } => "storage_error",
        }
    }

    /// Converts the error into a serialisable payload without consuming it.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::StorageUnavailable { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let info = self.to_error_info();

        if status.is_server_error() {
            tracing::error!(code = info.code, details = %info.details, "{}", info.message);
        }

        let body = ErrorBody {
            success: false,
            message: info.message,
            error: info.code,
            details: info.details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", e);
        AppError::storage("Event store unavailable", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = e
            .field_errors()
            .keys()
            .map(|k| camel_case(k))
            .collect();
        fields.sort();
        AppError::bad_request("Invalid request payload", json!({ "fields": fields }))
    }
}

/// `button_id` -> `buttonId`, matching the JSON field names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request("Malformed JSON body", json!({ "reason": e.body_text() }))
    }
}
