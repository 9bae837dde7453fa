//! API error type returned by services and handlers
//!
//! Every failure that reaches a client is an [`ApiError`]: an HTTP status, a
//! short machine-readable code, a human message, and optional structured
//! details. Storage failures are mapped from [`RepositoryError`] with a fixed
//! message per kind so driver text never leaks into responses.
//!
//! # Example
//!
//! ```rust
//! use hub_admin::services::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found();
//! assert_eq!(error.kind, ApiErrorKind::NotFound);
//! assert_eq!(error.kind.code(), "not_found");
//! assert_eq!(error.message, "Record not found");
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::repository::{RepositoryError, RepositoryErrorKind};

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Record absent or soft-deleted
    NotFound,
    /// Unique value already taken
    Conflict,
    /// Malformed input or a rejected constraint
    BadRequest,
    /// Input failed DTO validation
    ValidationFailed,
    /// Anything else
    InternalServerError,
}

impl ApiErrorKind {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wire code for this kind
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "duplicate_entry",
            Self::BadRequest => "bad_request",
            Self::ValidationFailed => "validation_failed",
            Self::InternalServerError => "internal_server_error",
        }
    }

    /// Message used when the caller supplies none
    #[must_use]
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::NotFound => "Record not found",
            Self::Conflict => "A record with this value already exists",
            Self::BadRequest => "Bad request",
            Self::ValidationFailed => "Validation failed",
            Self::InternalServerError => "A database error occurred",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Structured API error
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub details: Option<Value>,
}

/// Result type for service operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Error of `kind` with its default message
    pub fn new(kind: ApiErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            details: None,
        }
    }

    pub fn not_found() -> Self {
        Self::new(ApiErrorKind::NotFound)
    }

    pub fn conflict() -> Self {
        Self::new(ApiErrorKind::Conflict)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::BadRequest).with_message(message)
    }

    pub fn internal() -> Self {
        Self::new(ApiErrorKind::InternalServerError)
    }

    /// Validation failure carrying per-field details
    pub fn validation_failed(details: Value) -> Self {
        Self::new(ApiErrorKind::ValidationFailed).with_details(details)
    }

    /// Replace the default message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.status_code().as_u16(),
            self.kind.code(),
            self.message
        )
    }
}

impl std::error::Error for ApiError {}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err.kind {
            RepositoryErrorKind::NotFound => Self::not_found(),
            RepositoryErrorKind::AlreadyExists => {
                tracing::debug!(error = %err, "unique constraint rejected write");
                Self::conflict()
            }
            RepositoryErrorKind::ForeignKeyViolation => {
                Self::bad_request("Foreign key constraint violation")
            }
            RepositoryErrorKind::InvalidTransaction => Self::bad_request("Invalid transaction"),
            RepositoryErrorKind::CheckViolation => Self::bad_request("Check constraint violation"),
            // Sort-column rejections carry no driver text
            RepositoryErrorKind::ValidationFailed => Self::bad_request(err.message),
            RepositoryErrorKind::ConnectionFailed
            | RepositoryErrorKind::Timeout
            | RepositoryErrorKind::SerializationError
            | RepositoryErrorKind::DatabaseError => {
                tracing::error!(
                    operation = %err.operation,
                    kind = %err.kind,
                    entity_type = err.entity_type.as_deref().unwrap_or("-"),
                    retriable = err.is_retriable(),
                    error = %err.message,
                    "repository operation failed"
                );
                Self::internal()
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: u16,
    code: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            status: status.as_u16(),
            code: self.kind.code(),
            message: &self.message,
            details: self.details.as_ref(),
        };
        (status, Json(body)).into_response()
    }
}
