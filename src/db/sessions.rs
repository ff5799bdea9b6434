//! Session tokens: the bearer credential behind authenticated requests.
//!
//! A token is 32 random bytes, hex-encoded, stored with an expiry. Lookup
//! is a single join to the lecturer row; expired rows are deleted when seen.

use crate::db::lecturers;
use crate::errors::AppResult;
use crate::models::lecturer::Lecturer;
use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use rusqlite::{Connection, OptionalExtension, params};

pub const SESSION_TTL_HOURS: i64 = 12;

const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Issue a fresh token for a lecturer.
pub fn create(conn: &Connection, lecturer_id: &str, now: NaiveDateTime) -> AppResult<String> {
    let token = generate_token();
    let expires_at = now + Duration::hours(SESSION_TTL_HOURS);
    conn.execute(
        "INSERT INTO sessions (token, lecturer_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            token,
            lecturer_id,
            now.format(TIMESTAMP_FMT).to_string(),
            expires_at.format(TIMESTAMP_FMT).to_string(),
        ],
    )?;
    Ok(token)
}

/// Resolve a token to its lecturer. Unknown and expired tokens both come
/// back as None; expired rows are removed on the way.
pub fn lookup(conn: &Connection, token: &str, now: NaiveDateTime) -> AppResult<Option<Lecturer>> {
    let mut stmt = conn.prepare(
        "SELECT l.*, s.expires_at AS session_expires_at
         FROM sessions s JOIN lecturers l ON s.lecturer_id = l.id
         WHERE s.token = ?1",
    )?;
    let found = stmt
        .query_row(params![token], |row| {
            let lecturer = lecturers::map_row(row)?;
            let expires_at: String = row.get("session_expires_at")?;
            Ok((lecturer, expires_at))
        })
        .optional()?;

    let Some((lecturer, expires_at)) = found else {
        return Ok(None);
    };

    // Both sides share the same fixed-width format, so a string comparison
    // orders correctly.
    if expires_at <= now.format(TIMESTAMP_FMT).to_string() {
        conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
        return Ok(None);
    }

    Ok(Some(lecturer))
}
