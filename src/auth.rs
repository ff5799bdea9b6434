//! Access gate: bearer-token authentication and the admin check.
//!
//! Every authenticated route takes an [`AuthLecturer`] extractor. The
//! credential is an opaque session token issued at login, not the raw
//! lecturer id, so presenting it proves possession rather than knowledge
//! of a guessable identifier.

use crate::db::sessions;
use crate::errors::{AppError, AppResult};
use crate::models::lecturer::Lecturer;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Local;
use tracing::warn;

/// The authenticated caller, resolved from the Authorization header.
pub struct AuthLecturer(pub Lecturer);

impl FromRequestParts<AppState> for AuthLecturer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| {
                warn!("authentication failed: no token provided");
                AppError::Unauthorized("Unauthorized: No token provided".to_string())
            })?;

        let now = Local::now().naive_local();
        let lecturer = state
            .db
            .with_conn(|conn| sessions::lookup(conn, token, now))?
            .ok_or_else(|| {
                warn!("authentication failed: invalid or expired token");
                AppError::Unauthorized("Unauthorized: Invalid or expired token".to_string())
            })?;

        Ok(Self(lecturer))
    }
}

pub fn require_admin(lecturer: &Lecturer) -> AppResult<()> {
    if lecturer.is_admin {
        Ok(())
    } else {
        warn!("admin access denied for lecturer {}", lecturer.id);
        Err(AppError::Forbidden)
    }
}
