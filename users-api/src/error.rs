//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::repository::RepositoryError;
use crate::validation::ValidationErrors;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed request: absent body, undecodable payload, bad id or query (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// None of the acceptable media types can be produced (406)
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    /// One or more field rules failed (422)
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Config(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,

    /// Field-level messages, present for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status: status.as_u16(),
            errors: None,
        }
    }

    /// Attach field-level messages
    pub fn with_field_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Error::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                ErrorResponse::with_code(status, "CONFIG_ERROR", "Service misconfigured")
            }

            Error::Io(e) => {
                tracing::error!("I/O error: {}", e);
                ErrorResponse::with_code(status, "IO_ERROR", "I/O operation failed")
            }

            Error::BadRequest(msg) => ErrorResponse::with_code(status, "BAD_REQUEST", msg),

            Error::NotFound(msg) => ErrorResponse::with_code(status, "NOT_FOUND", msg),

            Error::NotAcceptable(msg) => ErrorResponse::with_code(status, "NOT_ACCEPTABLE", msg),

            Error::Validation(errors) => {
                ErrorResponse::with_code(status, "VALIDATION_ERROR", "Validation failed")
                    .with_field_errors(errors.into_map())
            }

            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::with_code(status, "INTERNAL_ERROR", "Internal server error")
            }
        };

        (status, Json(body)).into_response()
    }
}

// Manual From implementations for boxed errors
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidId(_) => Error::BadRequest(err.to_string()),
        }
    }
}
