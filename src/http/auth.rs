//! Login and registration.

use crate::core::validate::{validate_email, validate_password, validate_phone};
use crate::db::{lecturers, sessions};
use crate::errors::{AppError, AppResult};
use crate::models::lecturer::{LoginRequest, LoginResponse, RegisterRequest};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Local;
use serde_json::json;
use tracing::info;

pub type Payload<T> = Result<Json<T>, JsonRejection>;

fn required(field: Option<String>) -> Option<String> {
    field.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn invalid_credentials() -> AppError {
    // Identical message for unknown id and wrong password.
    AppError::Unauthorized("Invalid lecturer ID or password".to_string())
}

pub async fn login(
    State(state): State<AppState>,
    payload: Payload<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload.map_err(|_| AppError::MalformedPayload)?;
    let (Some(id), Some(password)) = (required(req.id), req.password.filter(|p| !p.is_empty()))
    else {
        return Err(AppError::MissingFields(
            "Lecturer ID and password required".to_string(),
        ));
    };

    info!("login request for {id}");
    let lecturer = state
        .db
        .with_conn(|conn| lecturers::find_by_id(conn, &id))?
        .ok_or_else(invalid_credentials)?;

    if !bcrypt::verify(&password, &lecturer.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = state
        .db
        .with_conn(|conn| sessions::create(conn, &lecturer.id, Local::now().naive_local()))?;

    info!("login successful for {id}");
    Ok(Json(LoginResponse {
        token,
        user: (&lecturer).into(),
    }))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Payload<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload.map_err(|_| AppError::MalformedPayload)?;
    let fields = (
        required(req.id),
        required(req.title),
        required(req.name),
        required(req.email),
        required(req.phone),
        required(req.department),
        req.password.filter(|p| !p.is_empty()),
    );
    let (Some(id), Some(title), Some(name), Some(email), Some(phone), Some(department), Some(password)) =
        fields
    else {
        return Err(AppError::MissingFields(
            "All fields are required".to_string(),
        ));
    };

    validate_email(&email)?;
    validate_phone(&phone)?;
    validate_password(&password)?;

    // Hash outside the connection closure so the lock is not held for the
    // bcrypt work.
    let password_hash = bcrypt::hash(&password, 10)?;

    state.db.with_conn(|conn| {
        if lecturers::find_by_id(conn, &id)?.is_some() {
            return Err(AppError::DuplicateId);
        }
        if lecturers::email_taken(conn, &email)? {
            return Err(AppError::DuplicateEmail);
        }
        lecturers::insert(
            conn,
            &id,
            &title,
            &name,
            &email,
            &phone,
            &department,
            &password_hash,
        )
    })?;

    info!("lecturer registered: {id}");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful" })),
    ))
}
