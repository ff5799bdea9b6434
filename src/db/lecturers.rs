use crate::errors::{AppError, AppResult};
use crate::models::lecturer::{Lecturer, LecturerRow};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Lecturer> {
    Ok(Lecturer {
        id: row.get("id")?,
        title: row.get("title")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        department: row.get("department")?,
        password_hash: row.get("password_hash")?,
        is_admin: row.get::<_, i64>("is_admin")? != 0,
        created_at: row.get("created_at")?,
    })
}

pub fn find_by_id(conn: &Connection, id: &str) -> AppResult<Option<Lecturer>> {
    let mut stmt = conn.prepare("SELECT * FROM lecturers WHERE id = ?1")?;
    Ok(stmt.query_row(params![id], map_row).optional()?)
}

pub fn email_taken(conn: &Connection, email: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM lecturers WHERE email = ?1 LIMIT 1")?;
    Ok(stmt.exists(params![email])?)
}

pub fn insert(
    conn: &Connection,
    id: &str,
    title: &str,
    name: &str,
    email: &str,
    phone: &str,
    department: &str,
    password_hash: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO lecturers (id, title, name, email, phone, department, password_hash)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![id, title, name, email, phone, department, password_hash],
    )
    .map_err(map_unique)?;
    Ok(())
}

pub fn list_all(conn: &Connection) -> AppResult<Vec<LecturerRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, name, email, phone, department, is_admin, created_at
         FROM lecturers ORDER BY name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(LecturerRow {
            id: row.get("id")?,
            title: row.get("title")?,
            name: row.get("name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            department: row.get("department")?,
            is_admin: row.get::<_, i64>("is_admin")? != 0,
            created_at: row.get("created_at")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The uniqueness constraints back the duplicate pre-checks; a violation
/// that slips past them maps to the same error the pre-check raises.
fn map_unique(err: rusqlite::Error) -> AppError {
    if let rusqlite::Error::SqliteFailure(e, Some(msg)) = &err {
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        {
            return if msg.contains("email") {
                AppError::DuplicateEmail
            } else {
                AppError::DuplicateId
            };
        }
    }
    AppError::Db(err)
}
