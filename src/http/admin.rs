//! Admin-only list views.

use crate::auth::{AuthLecturer, require_admin};
use crate::db::{bookings, lecturers};
use crate::errors::AppResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;

pub async fn lecturers(
    State(state): State<AppState>,
    AuthLecturer(caller): AuthLecturer,
) -> AppResult<impl IntoResponse> {
    require_admin(&caller)?;
    let rows = state.db.with_conn(lecturers::list_all)?;
    Ok(Json(json!({ "lecturers": rows })))
}

pub async fn all_bookings(
    State(state): State<AppState>,
    AuthLecturer(caller): AuthLecturer,
) -> AppResult<impl IntoResponse> {
    require_admin(&caller)?;
    let rows = state.db.with_conn(bookings::list_all)?;
    Ok(Json(json!({ "bookings": rows })))
}
