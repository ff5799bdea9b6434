//! Booking ledger queries.
//!
//! The `UNIQUE(venue_id, date, time_interval)` constraint is the
//! authoritative double-booking guard: the SELECT pre-checks exist only to
//! give the fast path the same error, and a violation raised by the insert
//! or update itself maps back to that error.

use crate::errors::{AppError, AppResult};
use crate::models::booking::{
    AdminBookingView, Booking, BookingFilter, BookingView, SortDir, SortField,
};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const DATE_FMT: &str = "%Y-%m-%d";
const CLOCK_FMT: &str = "%H:%M";

pub fn map_row(row: &Row) -> Result<Booking> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate),
        )
    })?;

    Ok(Booking {
        id: row.get("id")?,
        lecturer_id: row.get("lecturer_id")?,
        venue_id: row.get("venue_id")?,
        date,
        time_interval: row.get("time_interval")?,
        created_at: row.get("created_at")?,
    })
}

fn map_view(row: &Row) -> Result<BookingView> {
    let booking = map_row(row)?;
    Ok(BookingView {
        id: booking.id,
        lecturer_id: booking.lecturer_id,
        venue_id: booking.venue_id,
        date: booking.date,
        time_interval: booking.time_interval,
        created_at: booking.created_at,
        venue_name: row.get("venue_name")?,
        block: row.get("block")?,
    })
}

/// Advisory fast-path check for an occupied slot, optionally ignoring one
/// booking id (the one being updated).
pub fn slot_taken(
    conn: &Connection,
    venue_id: i64,
    date: NaiveDate,
    time_interval: &str,
    exclude: Option<i64>,
) -> AppResult<bool> {
    let date_str = date.format(DATE_FMT).to_string();
    let taken = match exclude {
        Some(id) => {
            let mut stmt = conn.prepare(
                "SELECT 1 FROM bookings
                 WHERE venue_id = ?1 AND date = ?2 AND time_interval = ?3 AND id != ?4 LIMIT 1",
            )?;
            stmt.exists(params![venue_id, date_str, time_interval, id])?
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT 1 FROM bookings
                 WHERE venue_id = ?1 AND date = ?2 AND time_interval = ?3 LIMIT 1",
            )?;
            stmt.exists(params![venue_id, date_str, time_interval])?
        }
    };
    Ok(taken)
}

/// Insert a booking; returns the new id. Fails with the slot-taken error
/// whether the pre-check or the constraint catches the collision.
pub fn insert(
    conn: &Connection,
    lecturer_id: &str,
    venue_id: i64,
    date: NaiveDate,
    time_interval: &str,
) -> AppResult<i64> {
    if slot_taken(conn, venue_id, date, time_interval, None)? {
        return Err(AppError::SlotTaken);
    }
    conn.execute(
        "INSERT INTO bookings (lecturer_id, venue_id, date, time_interval) VALUES (?1, ?2, ?3, ?4)",
        params![
            lecturer_id,
            venue_id,
            date.format(DATE_FMT).to_string(),
            time_interval,
        ],
    )
    .map_err(map_unique)?;
    Ok(conn.last_insert_rowid())
}

/// Replace venue/date/interval in place; id, owner and created_at are
/// immutable.
pub fn update_slot(
    conn: &Connection,
    id: i64,
    venue_id: i64,
    date: NaiveDate,
    time_interval: &str,
) -> AppResult<()> {
    if slot_taken(conn, venue_id, date, time_interval, Some(id))? {
        return Err(AppError::SlotTaken);
    }
    conn.execute(
        "UPDATE bookings SET venue_id = ?1, date = ?2, time_interval = ?3 WHERE id = ?4",
        params![
            venue_id,
            date.format(DATE_FMT).to_string(),
            time_interval,
            id,
        ],
    )
    .map_err(map_unique)?;
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<Booking>> {
    let mut stmt = conn.prepare("SELECT * FROM bookings WHERE id = ?1")?;
    Ok(stmt.query_row(params![id], map_row).optional()?)
}

pub fn find_owned(conn: &Connection, id: i64, lecturer_id: &str) -> AppResult<Option<Booking>> {
    let mut stmt = conn.prepare("SELECT * FROM bookings WHERE id = ?1 AND lecturer_id = ?2")?;
    Ok(stmt.query_row(params![id, lecturer_id], map_row).optional()?)
}

/// One booking with joined venue fields, visible to its owner or an admin.
pub fn find_for_caller(
    conn: &Connection,
    id: i64,
    caller_id: &str,
    caller_is_admin: bool,
) -> AppResult<Option<BookingView>> {
    let mut stmt = conn.prepare(
        "SELECT b.id, b.lecturer_id, b.venue_id, b.date, b.time_interval, b.created_at,
                v.name AS venue_name, v.block
         FROM bookings b JOIN venues v ON b.venue_id = v.id
         WHERE b.id = ?1 AND (b.lecturer_id = ?2 OR ?3)",
    )?;
    Ok(stmt
        .query_row(params![id, caller_id, caller_is_admin], map_view)
        .optional()?)
}

/// All bookings owned by a lecturer, joined with venue name/block.
///
/// `upcoming` keeps bookings on a later date, or today with an end time
/// still ahead of the clock; `past` is the complement. `now` is supplied
/// by the caller so the partition is stable under test.
pub fn list_for_lecturer(
    conn: &Connection,
    lecturer_id: &str,
    filter: BookingFilter,
    sort: Option<(SortField, SortDir)>,
    now: NaiveDateTime,
) -> AppResult<Vec<BookingView>> {
    let mut sql = String::from(
        "SELECT b.id, b.lecturer_id, b.venue_id, b.date, b.time_interval, b.created_at,
                v.name AS venue_name, v.block
         FROM bookings b JOIN venues v ON b.venue_id = v.id
         WHERE b.lecturer_id = ?1",
    );
    match filter {
        BookingFilter::Upcoming => sql.push_str(
            " AND (b.date > ?2 OR (b.date = ?2
               AND substr(b.time_interval, instr(b.time_interval, '-') + 1) > ?3))",
        ),
        BookingFilter::Past => sql.push_str(
            " AND (b.date < ?2 OR (b.date = ?2
               AND substr(b.time_interval, instr(b.time_interval, '-') + 1) <= ?3))",
        ),
        BookingFilter::All => {}
    }
    sql.push_str(&order_clause(sort));

    let mut binds = vec![lecturer_id.to_string()];
    if filter != BookingFilter::All {
        binds.push(now.date().format(DATE_FMT).to_string());
        binds.push(now.time().format(CLOCK_FMT).to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(binds), map_view)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn order_clause(sort: Option<(SortField, SortDir)>) -> String {
    match sort {
        None => " ORDER BY b.date, b.time_interval".to_string(),
        Some((field, dir)) => format!(
            " ORDER BY {} {}, b.date, b.time_interval",
            field.sql_column(),
            dir.sql_keyword()
        ),
    }
}

/// Admin view over every booking, newest date first, the lecturer name
/// prefixed with their title.
pub fn list_all(conn: &Connection) -> AppResult<Vec<AdminBookingView>> {
    let mut stmt = conn.prepare(
        "SELECT b.id, b.lecturer_id, b.venue_id, b.date, b.time_interval, b.created_at,
                v.name AS venue_name, l.title, l.name AS lecturer_name
         FROM bookings b
         JOIN venues v ON b.venue_id = v.id
         JOIN lecturers l ON b.lecturer_id = l.id
         ORDER BY b.date DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        let booking = map_row(row)?;
        let title: String = row.get("title")?;
        let name: String = row.get("lecturer_name")?;
        Ok(AdminBookingView {
            id: booking.id,
            lecturer_id: booking.lecturer_id,
            venue_id: booking.venue_id,
            date: booking.date,
            time_interval: booking.time_interval,
            created_at: booking.created_at,
            venue_name: row.get("venue_name")?,
            lecturer_name: format!("{title} {name}"),
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_unique(err: rusqlite::Error) -> AppError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return AppError::SlotTaken;
        }
    }
    AppError::Db(err)
}
