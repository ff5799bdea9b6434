//! Venue catalog reads.

use crate::db::venues;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct VenueQuery {
    #[serde(default)]
    pub block: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<VenueQuery>,
) -> AppResult<impl IntoResponse> {
    let block = query
        .block
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::MissingFields("Block parameter required".to_string()))?;

    let venues = state.db.with_conn(|conn| venues::list_by_block(conn, &block))?;
    Ok(Json(json!({ "venues": venues })))
}
