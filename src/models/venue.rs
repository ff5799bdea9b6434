use serde::Serialize;

/// Immutable reference data, seeded once at first boot.
#[derive(Debug, Clone, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub block: String, // categorical location tag: A, B, C, Library, ComputerLab
    pub capacity: i64,
    pub description: String,
    pub created_at: String,
}
