//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! various error conditions that can occur, from database issues to validation failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly convert
//! application errors into appropriate HTTP responses with JSON bodies.
//! It also provides `From` trait implementations for common error types like `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError`,
//! allowing for easy conversion using the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific type of error, often carrying a message
/// detailing the issue. These errors are then converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Represents an unauthorized access attempt (HTTP 401).
    /// Used when the credential is missing, malformed, expired, or its session revoked.
    Unauthorized(String),
    /// Represents a client-side error due to a malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// Represents a situation where a requested resource was not found, including
    /// list endpoints that match zero rows (HTTP 404).
    NotFound(String),
    /// Represents an attempt to create a resource that already exists (HTTP 409).
    Conflict(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Represents an error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate. The detail is logged, never sent to the client.
    DatabaseError(String),
    /// Represents an error due to failed input validation (HTTP 400).
    /// Wraps errors from the `validator` crate.
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error responses.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "internal server error"
                }))
            }
            // Database errors are logged server-side and masked as generic 500s.
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "internal server error"
                }))
            }
            AppError::ValidationError(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` is mapped to `AppError::NotFound`,
/// while other database errors become `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// This is typically used when JWT processing (e.g., verification) fails.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
