//! Booking lifecycle tests: validation, conflicts, ownership, the
//! upcoming/past partition and the end-of-slot edit window.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Local, NaiveDate};
use common::*;
use rusqlite::params;
use serde_json::json;
use venuebook::db::bookings;
use venuebook::errors::AppError;
use venuebook::models::booking::BookingFilter;

fn booking_payload(venue_id: i64, date: &str, interval: &str) -> serde_json::Value {
    json!({ "venue_id": venue_id, "date": date, "time_interval": interval })
}

#[tokio::test]
async fn create_then_get_roundtrip() {
    let (app, _state) = test_app("booking_roundtrip");
    let token = lecturer_token(&app, "BOOK01", "book1@must.edu").await;
    let date = days_from_today(1);

    let (status, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(booking_payload(5, &date, "09:00-10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Booking created successfully");
    let id = body["bookingId"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/bookings/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let booking = &body["booking"];
    assert_eq!(booking["venue_id"], 5);
    assert_eq!(booking["date"], date);
    assert_eq!(booking["time_interval"], "09:00-10:00");
    assert_eq!(booking["lecturer_id"], "BOOK01");
    assert_eq!(booking["venue_name"], "Room 105");
    assert_eq!(booking["block"], "A");
}

#[tokio::test]
async fn create_requires_all_fields() {
    let (app, _state) = test_app("booking_fields");
    let token = lecturer_token(&app, "BOOK02", "book2@must.edu").await;

    let (status, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(json!({ "venue_id": 5, "date": days_from_today(1) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields required");
}

#[tokio::test]
async fn duplicate_slot_is_rejected_but_adjacent_is_not() {
    let (app, _state) = test_app("booking_conflict");
    let first = lecturer_token(&app, "BOOK03", "book3@must.edu").await;
    let second = lecturer_token(&app, "BOOK04", "book4@must.edu").await;
    let date = days_from_today(2);

    let (status, _) = send(
        &app,
        "POST",
        "/bookings",
        Some(&first),
        Some(booking_payload(7, &date, "09:00-10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&second),
        Some(booking_payload(7, &date, "09:00-10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Venue already booked for this time slot");

    // Back-to-back slot in the same venue is a different key.
    let (status, _) = send(
        &app,
        "POST",
        "/bookings",
        Some(&second),
        Some(booking_payload(7, &date, "10:00-11:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn malformed_intervals_are_rejected() {
    let (app, _state) = test_app("booking_intervals");
    let token = lecturer_token(&app, "BOOK05", "book5@must.edu").await;
    let date = days_from_today(1);

    for interval in [
        "9:00-10:00",
        "09:00",
        "09:00 - 10:00",
        "09:00-09:00",
        "10:00-09:00",
        "25:00-26:00",
        "09:60-10:30",
    ] {
        let (status, body) = send(
            &app,
            "POST",
            "/bookings",
            Some(&token),
            Some(booking_payload(5, &date, interval)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {interval}");
        assert_eq!(body["message"], "Invalid time interval format (use HH:MM-HH:MM)");
    }
}

#[tokio::test]
async fn past_and_malformed_dates_are_rejected() {
    let (app, _state) = test_app("booking_dates");
    let token = lecturer_token(&app, "BOOK06", "book6@must.edu").await;

    for date in [days_from_today(-1), "2020-01-01".to_string(), "not-a-date".to_string()] {
        let (status, body) = send(
            &app,
            "POST",
            "/bookings",
            Some(&token),
            Some(booking_payload(5, &date, "09:00-10:00")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {date}");
        assert_eq!(body["message"], "Invalid date or cannot book in the past");
    }

    // Booking for today is allowed.
    let (status, _) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(booking_payload(5, &days_from_today(0), "23:00-23:30")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn non_owner_sees_not_found() {
    let (app, _state) = test_app("booking_ownership");
    let owner = lecturer_token(&app, "BOOK07", "book7@must.edu").await;
    let other = lecturer_token(&app, "BOOK08", "book8@must.edu").await;
    let date = days_from_today(3);

    let (_, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&owner),
        Some(booking_payload(9, &date, "11:00-12:00")),
    )
    .await;
    let id = body["bookingId"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/bookings/{id}"), Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/bookings/{id}"),
        Some(&other),
        Some(booking_payload(9, &date, "12:00-13:00")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found or unauthorized");

    let (status, body) =
        send(&app, "DELETE", &format!("/bookings/{id}"), Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found or unauthorized");

    // Still there for the owner.
    let (status, _) = send(&app, "GET", &format!("/bookings/{id}"), Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn owner_can_move_a_booking() {
    let (app, _state) = test_app("booking_update");
    let token = lecturer_token(&app, "BOOK09", "book9@must.edu").await;
    let date = days_from_today(4);

    let (_, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(booking_payload(11, &date, "08:00-09:00")),
    )
    .await;
    let id = body["bookingId"].as_i64().unwrap();

    // Re-submitting the same slot does not conflict with itself.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/bookings/{id}"),
        Some(&token),
        Some(booking_payload(11, &date, "08:00-09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/bookings/{id}"),
        Some(&token),
        Some(booking_payload(12, &date, "14:00-15:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking updated successfully");

    let (_, body) = send(&app, "GET", &format!("/bookings/{id}"), Some(&token), None).await;
    assert_eq!(body["booking"]["venue_id"], 12);
    assert_eq!(body["booking"]["time_interval"], "14:00-15:00");
}

#[tokio::test]
async fn update_cannot_land_on_an_occupied_slot() {
    let (app, _state) = test_app("booking_update_conflict");
    let token = lecturer_token(&app, "BOOK10", "book10@must.edu").await;
    let date = days_from_today(5);

    send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(booking_payload(13, &date, "09:00-10:00")),
    )
    .await;
    let (_, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(booking_payload(13, &date, "10:00-11:00")),
    )
    .await;
    let second = body["bookingId"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/bookings/{second}"),
        Some(&token),
        Some(booking_payload(13, &date, "09:00-10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Venue already booked for this time slot");
}

#[tokio::test]
async fn delete_by_owner_and_admin() {
    let (app, _state) = test_app("booking_delete");
    let owner = lecturer_token(&app, "BOOK11", "book11@must.edu").await;
    let admin = admin_token(&app).await;
    let date = days_from_today(6);

    let (_, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&owner),
        Some(booking_payload(15, &date, "09:00-10:00")),
    )
    .await;
    let first = body["bookingId"].as_i64().unwrap();

    let (status, body) =
        send(&app, "DELETE", &format!("/bookings/{first}"), Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking deleted successfully");

    // Gone now, deleting again is a 404.
    let (status, _) =
        send(&app, "DELETE", &format!("/bookings/{first}"), Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&owner),
        Some(booking_payload(15, &date, "10:00-11:00")),
    )
    .await;
    let second = body["bookingId"].as_i64().unwrap();

    let (status, _) =
        send(&app, "DELETE", &format!("/bookings/{second}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn ended_bookings_are_locked_for_owners_but_not_admins() {
    let (app, state) = test_app("booking_edit_window");
    let owner = lecturer_token(&app, "BOOK12", "book12@must.edu").await;
    let admin = admin_token(&app).await;

    // Plant a booking that ended yesterday, below the request-level date
    // validation.
    let yesterday = (Local::now().date_naive() - Duration::days(1)).to_string();
    let id = state
        .db
        .with_conn(|conn| {
            conn.execute(
                "INSERT INTO bookings (lecturer_id, venue_id, date, time_interval)
                 VALUES (?1, ?2, ?3, ?4)",
                params!["BOOK12", 17, yesterday, "08:00-09:00"],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/bookings/{id}"),
        Some(&owner),
        Some(booking_payload(17, &days_from_today(1), "08:00-09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot modify a booking that has already ended");

    let (status, body) =
        send(&app, "DELETE", &format!("/bookings/{id}"), Some(&owner), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot modify a booking that has already ended");

    // Admins may clear out history.
    let (status, _) = send(&app, "DELETE", &format!("/bookings/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn list_filters_split_upcoming_from_past() {
    let (app, state) = test_app("booking_filters");
    let token = lecturer_token(&app, "BOOK13", "book13@must.edu").await;

    let (_, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(booking_payload(19, &days_from_today(1), "09:00-10:00")),
    )
    .await;
    let future_id = body["bookingId"].as_i64().unwrap();

    let yesterday = (Local::now().date_naive() - Duration::days(1)).to_string();
    let past_id = state
        .db
        .with_conn(|conn| {
            conn.execute(
                "INSERT INTO bookings (lecturer_id, venue_id, date, time_interval)
                 VALUES (?1, ?2, ?3, ?4)",
                params!["BOOK13", 19, yesterday, "09:00-10:00"],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .unwrap();

    let (status, body) = send(&app, "GET", "/bookings?filter=upcoming", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["bookings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![future_id]);

    let (_, body) = send(&app, "GET", "/bookings?filter=past", Some(&token), None).await;
    let ids: Vec<i64> = body["bookings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![past_id]);

    // Unknown filter values fall back to the full list.
    let (_, body) = send(&app, "GET", "/bookings?filter=bogus", Some(&token), None).await;
    assert_eq!(body["bookings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_sorting_is_whitelisted() {
    let (app, _state) = test_app("booking_sort");
    let token = lecturer_token(&app, "BOOK14", "book14@must.edu").await;
    let date = days_from_today(7);

    // Venue 1 is "Room 101" in block A, venue 215 is "Library Room 1".
    send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(booking_payload(1, &date, "09:00-10:00")),
    )
    .await;
    send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(booking_payload(215, &date, "09:00-10:00")),
    )
    .await;

    let (status, body) =
        send(&app, "GET", "/bookings?sort=venue_name", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["bookings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["venue_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Library Room 1", "Room 101"]);

    let (_, body) =
        send(&app, "GET", "/bookings?sort=venue_name&dir=desc", Some(&token), None).await;
    let names: Vec<&str> = body["bookings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["venue_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Room 101", "Library Room 1"]);

    let (status, body) =
        send(&app, "GET", "/bookings?sort=password", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid sort field");

    let (status, body) =
        send(&app, "GET", "/bookings?sort=date&dir=sideways", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid sort direction");
}

#[test]
fn partition_is_exhaustive_and_disjoint() {
    let state = test_state("booking_partition");
    let now = NaiveDate::from_ymd_opt(2026, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

    state
        .db
        .with_conn(|conn| {
            bookings::insert(conn, "JACOB01", 1, day(2026, 1, 10), "09:00-10:00")?;
            bookings::insert(conn, "JACOB01", 1, day(2026, 1, 15), "10:00-11:00")?;
            // Ends exactly at noon, which counts as past.
            bookings::insert(conn, "JACOB01", 1, day(2026, 1, 15), "11:00-12:00")?;
            bookings::insert(conn, "JACOB01", 1, day(2026, 1, 15), "11:30-12:30")?;
            bookings::insert(conn, "JACOB01", 1, day(2026, 1, 20), "09:00-10:00")?;
            Ok(())
        })
        .unwrap();

    let list = |filter| {
        state
            .db
            .with_conn(|conn| bookings::list_for_lecturer(conn, "JACOB01", filter, None, now))
            .unwrap()
    };

    let all = list(BookingFilter::All);
    let upcoming = list(BookingFilter::Upcoming);
    let past = list(BookingFilter::Past);

    assert_eq!(all.len(), 5);
    assert_eq!(upcoming.len(), 2);
    assert_eq!(past.len(), 3);

    let mut combined: Vec<i64> = upcoming.iter().chain(past.iter()).map(|b| b.id).collect();
    combined.sort_unstable();
    let mut everything: Vec<i64> = all.iter().map(|b| b.id).collect();
    everything.sort_unstable();
    assert_eq!(combined, everything);

    // Default order is date then interval.
    let dates: Vec<_> = all.iter().map(|b| (b.date, b.time_interval.clone())).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[test]
fn concurrent_inserts_grant_the_slot_once() {
    let state = test_state("booking_race");
    let date = Local::now().date_naive() + Duration::days(3);

    let mut handles = Vec::new();
    for _ in 0..2 {
        let db = state.db.clone();
        handles.push(std::thread::spawn(move || {
            db.with_conn(|conn| bookings::insert(conn, "JACOB01", 21, date, "09:00-10:00"))
        }));
    }

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(AppError::SlotTaken)))
    );
}

#[test]
fn unique_constraint_backstops_the_precheck() {
    let state = test_state("booking_constraint");
    let err = state
        .db
        .with_conn(|conn| {
            for _ in 0..2 {
                conn.execute(
                    "INSERT INTO bookings (lecturer_id, venue_id, date, time_interval)
                     VALUES (?1, ?2, ?3, ?4)",
                    params!["JACOB01", 23, "2026-06-01", "09:00-10:00"],
                )?;
            }
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
}
