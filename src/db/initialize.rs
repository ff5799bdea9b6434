//! Schema creation and one-time seed data.

use crate::errors::AppResult;
use rusqlite::{Connection, params};
use tracing::info;

/// Initialize the database: create all tables, then seed the default admin
/// account and the venue catalog if they are missing.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    create_tables(conn)?;
    seed_admin(conn)?;
    seed_venues(conn)?;
    Ok(())
}

fn create_tables(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS lecturers (
            id            TEXT PRIMARY KEY,
            title         TEXT NOT NULL,
            name          TEXT NOT NULL,
            email         TEXT NOT NULL UNIQUE,
            phone         TEXT NOT NULL,
            department    TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            is_admin      INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS venues (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            block       TEXT NOT NULL,
            capacity    INTEGER NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS bookings (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            lecturer_id   TEXT NOT NULL REFERENCES lecturers(id) ON DELETE CASCADE,
            venue_id      INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            date          TEXT NOT NULL,
            time_interval TEXT NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (venue_id, date, time_interval)
        );

        CREATE TABLE IF NOT EXISTS sessions (
            token       TEXT PRIMARY KEY,
            lecturer_id TEXT NOT NULL REFERENCES lecturers(id) ON DELETE CASCADE,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            expires_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_bookings_lecturer ON bookings(lecturer_id, date, time_interval);
        "#,
    )?;
    Ok(())
}

/// Default admin, created only if absent.
fn seed_admin(conn: &Connection) -> AppResult<()> {
    let mut stmt = conn.prepare("SELECT 1 FROM lecturers WHERE id = ?1 LIMIT 1")?;
    if stmt.exists(params!["JACOB01"])? {
        return Ok(());
    }

    let password_hash = bcrypt::hash("Jacob12!", 10)?;
    conn.execute(
        "INSERT INTO lecturers (id, title, name, email, phone, department, password_hash, is_admin)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)",
        params![
            "JACOB01",
            "Admin",
            "System Administrator",
            "jacob@must.edu",
            "0765897012",
            "ICT",
            password_hash,
        ],
    )?;
    info!("default admin created");
    Ok(())
}

/// Venue catalog, created only if the table is empty: five blocks with
/// fixed room ranges.
fn seed_venues(conn: &Connection) -> AppResult<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM venues", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(());
    }

    let mut rows: Vec<(String, &str, i64, String)> = Vec::new();
    for i in 101..=201 {
        rows.push((
            format!("Room {i}"),
            "A",
            50,
            format!("Lecture room {i} in Block A"),
        ));
    }
    for i in 10..=101 {
        rows.push((
            format!("Room {i}"),
            "B",
            40,
            format!("Lecture room {i} in Block B"),
        ));
    }
    for i in 30..=50 {
        rows.push((
            format!("Room {i}"),
            "C",
            30,
            format!("Lecture room {i} in Block C"),
        ));
    }
    for i in 1..=5 {
        rows.push((
            format!("Library Room {i}"),
            "Library",
            20,
            format!("Library room {i}"),
        ));
    }
    for i in 1..=20 {
        rows.push((
            format!("Lab {i}"),
            "ComputerLab",
            30,
            format!("Computer laboratory {i}"),
        ));
    }

    let mut stmt =
        conn.prepare("INSERT INTO venues (name, block, capacity, description) VALUES (?1, ?2, ?3, ?4)")?;
    for (name, block, capacity, description) in rows {
        stmt.execute(params![name, block, capacity, description])?;
    }
    info!("venue catalog seeded");
    Ok(())
}
