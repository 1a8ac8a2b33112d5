//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use byline_core::RepoError;
use byline_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    DuplicateEmail(String),
    InvalidReference(i32),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::DuplicateEmail(email) => write!(f, "Duplicate email: {}", email),
            AppError::InvalidReference(id) => write!(f, "Invalid author reference: {}", id),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::DuplicateEmail(_) => ErrorResponse::bad_request("Email already registered"),
            AppError::InvalidReference(_) => {
                ErrorResponse::bad_request("Author ID does not exist")
            }
            AppError::Internal(detail) => {
                // Log internal errors; the body stays generic.
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::DuplicateEmail(email) => AppError::DuplicateEmail(email),
            RepoError::InvalidReference(author_id) => AppError::InvalidReference(author_id),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl AppError {
    /// Like `From<RepoError>`, but with an entity-specific detail for
    /// repository-level not-found results.
    pub fn from_repo(err: RepoError, missing: &str) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound(missing.to_string()),
            other => other.into(),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
