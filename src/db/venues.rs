use crate::errors::AppResult;
use crate::models::venue::Venue;
use rusqlite::{Connection, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Venue> {
    Ok(Venue {
        id: row.get("id")?,
        name: row.get("name")?,
        block: row.get("block")?,
        capacity: row.get("capacity")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
    })
}

pub fn list_by_block(conn: &Connection, block: &str) -> AppResult<Vec<Venue>> {
    let mut stmt = conn.prepare("SELECT * FROM venues WHERE block = ?1 ORDER BY id")?;
    let rows = stmt.query_map(params![block], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
