//! HTTP surface: one module per area, assembled into the router here.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod venues;

use crate::state::AppState;
use axum::Router;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/venues", get(venues::list))
        .route("/bookings", get(bookings::list).post(bookings::create))
        .route("/bookings/all", get(admin::all_bookings))
        .route(
            "/bookings/{id}",
            get(bookings::get_one)
                .put(bookings::update)
                .delete(bookings::remove),
        )
        .route("/lecturers", get(admin::lecturers))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
