/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("External API error: {0}")]
    ExternalApi(#[from] reqwest::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            ApiError::ExternalApi(e) => {
                if let Some(status) = e.status() {
                    (
                        match status.as_u16() {
                            403 => "UPSTREAM_403",
                            404 => "UPSTREAM_404",
                            429 => "UPSTREAM_429",
                            500..=599 => "UPSTREAM_5XX",
                            _ => "UPSTREAM_ERROR",
                        },
                        format!("External API error: {}", e),
                    )
                } else {
                    ("UPSTREAM_ERROR", format!("External API error: {}", e))
                }
            }
            ApiError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            ApiError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
            ApiError::InvalidInput(msg) => ("INVALID_INPUT", msg.clone()),
        };

        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: code.to_string(),
                message,
                trace_id: None, // TODO: thread a per-request trace ID through
            },
        };

        // Errors travel in-band with ok=false; the HTTP status stays 200
        (StatusCode::OK, Json(error_response)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
