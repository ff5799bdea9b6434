#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::env;
use std::path::PathBuf;
use tower::ServiceExt;
use venuebook::db::initialize::init_db;
use venuebook::db::pool::Db;
use venuebook::http::router;
use venuebook::state::AppState;

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_venuebook.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    std::fs::remove_file(&db_path).ok();
    db_path
}

/// Open a fresh database (schema + seed data) for one test.
pub fn test_state(name: &str) -> AppState {
    let db_path = setup_test_db(name);
    let db = Db::open(&db_path).expect("open db");
    db.with_conn(init_db).expect("init db");
    AppState { db }
}

pub fn test_app(name: &str) -> (Router, AppState) {
    let state = test_state(name);
    (router(state.clone()), state)
}

/// Fire one request at the router and decode the JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("Authorization", format!("Bearer {t}"));
    }
    let request = match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn register(app: &Router, id: &str, email: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/register",
        None,
        Some(json!({
            "id": id,
            "title": "Dr",
            "name": format!("Lecturer {id}"),
            "email": email,
            "phone": "0712345678",
            "department": "ICT",
            "password": "Passw0rd!",
        })),
    )
    .await
}

pub async fn login_token(app: &Router, id: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "id": id, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token in response").to_string()
}

/// Register a lecturer with default fields and return a session token.
pub async fn lecturer_token(app: &Router, id: &str, email: &str) -> String {
    let (status, body) = register(app, id, email).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    login_token(app, id, "Passw0rd!").await
}

pub async fn admin_token(app: &Router) -> String {
    login_token(app, "JACOB01", "Jacob12!").await
}

pub fn days_from_today(days: i64) -> String {
    (chrono::Local::now().date_naive() + chrono::Duration::days(days)).to_string()
}
