//! Booking endpoints: list, read, create, update, delete.
//!
//! Create and update share the same validation pipeline: interval format
//! (with start < end), date not in the past, then the conflict check whose
//! authoritative form is the storage uniqueness constraint. Ownership
//! failures surface as the not-found message so non-owners learn nothing
//! about a booking's existence.

use crate::auth::AuthLecturer;
use crate::core::slot::{TimeSlot, has_ended, parse_booking_date};
use crate::db::bookings;
use crate::errors::{AppError, AppResult};
use crate::http::auth::Payload;
use crate::models::booking::{BookingFilter, BookingRequest, SortDir, SortField};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

fn not_found_or_unauthorized() -> AppError {
    AppError::NotFound("Booking not found or unauthorized".to_string())
}

/// Pull the three booking fields out of a payload and validate them.
fn validated_slot(req: BookingRequest) -> AppResult<(i64, NaiveDate, String)> {
    let (Some(venue_id), Some(date_raw), Some(interval_raw)) =
        (req.venue_id, req.date, req.time_interval)
    else {
        return Err(AppError::MissingFields("All fields required".to_string()));
    };
    let slot = TimeSlot::parse(&interval_raw)?;
    let date = parse_booking_date(&date_raw, Local::now().date_naive())?;
    Ok((venue_id, date, slot.encode()))
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub dir: Option<String>,
}

fn parse_sort(query: &ListQuery) -> AppResult<Option<(SortField, SortDir)>> {
    let Some(sort_raw) = query.sort.as_deref() else {
        return Ok(None);
    };
    let field = SortField::from_query(sort_raw)
        .ok_or_else(|| AppError::BadRequest("Invalid sort field".to_string()))?;
    let dir = match query.dir.as_deref() {
        None => SortDir::Asc,
        Some(raw) => SortDir::from_query(raw)
            .ok_or_else(|| AppError::BadRequest("Invalid sort direction".to_string()))?,
    };
    Ok(Some((field, dir)))
}

pub async fn list(
    State(state): State<AppState>,
    AuthLecturer(caller): AuthLecturer,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = BookingFilter::from_query(query.filter.as_deref());
    let sort = parse_sort(&query)?;
    let now = Local::now().naive_local();

    let rows = state
        .db
        .with_conn(|conn| bookings::list_for_lecturer(conn, &caller.id, filter, sort, now))?;
    Ok(Json(json!({ "bookings": rows })))
}

pub async fn get_one(
    State(state): State<AppState>,
    AuthLecturer(caller): AuthLecturer,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let booking = state
        .db
        .with_conn(|conn| bookings::find_for_caller(conn, id, &caller.id, caller.is_admin))?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
    Ok(Json(json!({ "booking": booking })))
}

pub async fn create(
    State(state): State<AppState>,
    AuthLecturer(caller): AuthLecturer,
    payload: Payload<BookingRequest>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload.map_err(|_| AppError::MalformedPayload)?;
    let (venue_id, date, interval) = validated_slot(req)?;

    let booking_id = state
        .db
        .with_conn(|conn| bookings::insert(conn, &caller.id, venue_id, date, &interval))?;

    info!("booking {booking_id} created by {}", caller.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Booking created successfully",
            "bookingId": booking_id,
        })),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    AuthLecturer(caller): AuthLecturer,
    Path(id): Path<i64>,
    payload: Payload<BookingRequest>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload.map_err(|_| AppError::MalformedPayload)?;
    let (venue_id, date, interval) = validated_slot(req)?;
    let now = Local::now().naive_local();

    state.db.with_conn(|conn| {
        let existing =
            bookings::find_owned(conn, id, &caller.id)?.ok_or_else(not_found_or_unauthorized)?;
        if has_ended(existing.date, &existing.time_interval, now) {
            return Err(AppError::PastBooking);
        }
        bookings::update_slot(conn, id, venue_id, date, &interval)
    })?;

    info!("booking {id} updated by {}", caller.id);
    Ok(Json(json!({ "message": "Booking updated successfully" })))
}

pub async fn remove(
    State(state): State<AppState>,
    AuthLecturer(caller): AuthLecturer,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let now = Local::now().naive_local();

    state.db.with_conn(|conn| {
        let existing = bookings::find_by_id(conn, id)?.ok_or_else(not_found_or_unauthorized)?;
        if existing.lecturer_id != caller.id && !caller.is_admin {
            return Err(not_found_or_unauthorized());
        }
        // Owners cannot cancel a slot that has already ended; admins can
        // always clean up.
        if !caller.is_admin && has_ended(existing.date, &existing.time_interval, now) {
            return Err(AppError::PastBooking);
        }
        bookings::delete(conn, id)
    })?;

    info!("booking {id} deleted by {}", caller.id);
    Ok(Json(json!({ "message": "Booking deleted successfully" })))
}
