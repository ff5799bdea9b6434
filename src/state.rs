use crate::db::pool::Db;

/// Shared handler state: just the database handle.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
}
