use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw booking row.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i64,
    pub lecturer_id: String,
    pub venue_id: i64,
    pub date: NaiveDate,       // ⇔ bookings.date (TEXT "YYYY-MM-DD")
    pub time_interval: String, // ⇔ bookings.time_interval ("HH:MM-HH:MM")
    pub created_at: String,
}

/// Booking joined with its venue, as returned to the owning lecturer.
#[derive(Debug, Serialize)]
pub struct BookingView {
    pub id: i64,
    pub lecturer_id: String,
    pub venue_id: i64,
    pub date: NaiveDate,
    pub time_interval: String,
    pub created_at: String,
    pub venue_name: String,
    pub block: String,
}

/// Admin list view: joined with venue and lecturer, the lecturer name
/// prefixed with their title.
#[derive(Debug, Serialize)]
pub struct AdminBookingView {
    pub id: i64,
    pub lecturer_id: String,
    pub venue_id: i64,
    pub date: NaiveDate,
    pub time_interval: String,
    pub created_at: String,
    pub venue_name: String,
    pub lecturer_name: String,
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub venue_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time_interval: Option<String>,
}

/// List filter relative to "now". Unknown filter strings mean no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    All,
    Upcoming,
    Past,
}

impl BookingFilter {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("upcoming") => BookingFilter::Upcoming,
            Some("past") => BookingFilter::Past,
            _ => BookingFilter::All,
        }
    }
}

/// Whitelisted sort columns for the booking list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    TimeInterval,
    VenueName,
    Block,
}

impl SortField {
    pub fn from_query(raw: &str) -> Option<Self> {
        match raw {
            "date" => Some(SortField::Date),
            "time_interval" => Some(SortField::TimeInterval),
            "venue_name" => Some(SortField::VenueName),
            "block" => Some(SortField::Block),
            _ => None,
        }
    }

    pub fn sql_column(self) -> &'static str {
        match self {
            SortField::Date => "b.date",
            SortField::TimeInterval => "b.time_interval",
            SortField::VenueName => "v.name",
            SortField::Block => "v.block",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn from_query(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }

    pub fn sql_keyword(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}
