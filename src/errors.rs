//! Unified application error type.
//! All modules (db, core, auth, http) return AppError so the handlers can
//! map every failure onto the HTTP taxonomy in one place.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Validation (400)
    // ---------------------------
    #[error("{0}")]
    MissingFields(String),

    #[error("Invalid time interval format (use HH:MM-HH:MM)")]
    InvalidInterval,

    #[error("Invalid date or cannot book in the past")]
    InvalidDate,

    #[error("Password must be at least 8 characters with uppercase, lowercase, number, and special character")]
    WeakPassword,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Phone number must be 10 digits")]
    InvalidPhone,

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("{0}")]
    BadRequest(String),

    // ---------------------------
    // Conflicts (400)
    // ---------------------------
    #[error("Lecturer ID already in use")]
    DuplicateId,

    #[error("Email already in use")]
    DuplicateEmail,

    #[error("Venue already booked for this time slot")]
    SlotTaken,

    #[error("Cannot modify a booking that has already ended")]
    PastBooking,

    // ---------------------------
    // Auth (401 / 403 / 404)
    // ---------------------------
    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden: Admin access required")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    // ---------------------------
    // Internal (500)
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingFields(_)
            | AppError::InvalidInterval
            | AppError::InvalidDate
            | AppError::WeakPassword
            | AppError::InvalidEmail
            | AppError::InvalidPhone
            | AppError::MalformedPayload
            | AppError::BadRequest(_)
            | AppError::DuplicateId
            | AppError::DuplicateEmail
            | AppError::SlotTaken
            | AppError::PastBooking => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Hash(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal detail is logged, never sent to the caller.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("internal error: {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
