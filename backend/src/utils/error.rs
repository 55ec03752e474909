use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::services::llm::LLMError;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// API Error mapped onto the public error bodies
///
/// - 400: `{ "error": <message> }`
/// - 500: `{ "error": "Internal server error", "details": <message> }`
#[derive(Error, Debug)]
pub enum ApiError {
    // Client errors
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // Completion API failures - auto-convert from LLMError
    #[error("Completion request failed: {0}")]
    Upstream(#[from] LLMError),
}

impl ApiError {
    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Helper to create invalid body error
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text for the `details` field of 500 responses
    pub fn details(&self) -> String {
        let details = match self {
            Self::Upstream(err) => err.details(),
            Self::ValidationError(msg) | Self::InvalidBody(msg) => msg.clone(),
        };
        if details.trim().is_empty() { "Unknown error".to_string() } else { details }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Self::ValidationError(msg) | Self::InvalidBody(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                ErrorResponse { error: msg.clone(), details: None }
            },
            Self::Upstream(_) => {
                let details = self.details();
                tracing::error!("Request failed: {} (details: {})", self, details);
                ErrorResponse { error: INTERNAL_SERVER_ERROR.to_string(), details: Some(details) }
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
