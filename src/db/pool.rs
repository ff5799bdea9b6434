//! Shared SQLite handle.
//!
//! One connection guarded by a mutex, cloned into every handler. Requests
//! serialize on the lock; the UNIQUE constraint on bookings stays the
//! authoritative conflict guard either way.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection. Check-then-write sequences
    /// inside one closure execute atomically with respect to other handlers.
    pub fn with_conn<T>(&self, func: impl FnOnce(&Connection) -> AppResult<T>) -> AppResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| AppError::Internal("database lock poisoned".to_string()))?;
        func(&conn)
    }
}
