//! Time-slot logic: parsing "HH:MM-HH:MM" intervals, validating booking
//! dates, and deciding whether a booking's slot has already elapsed.
//!
//! "Now" is always passed in by the caller so the rules can be tested
//! against a pinned clock.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static INTERVAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}-\d{2}:\d{2}$").unwrap());

/// A parsed, validated booking slot: start strictly before end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Parse "HH:MM-HH:MM". Rejects malformed shapes, impossible clock
    /// times and intervals where start is not strictly before end.
    pub fn parse(raw: &str) -> AppResult<Self> {
        if !INTERVAL_RE.is_match(raw) {
            return Err(AppError::InvalidInterval);
        }
        let (start_raw, end_raw) = raw.split_once('-').ok_or(AppError::InvalidInterval)?;
        let start =
            NaiveTime::parse_from_str(start_raw, "%H:%M").map_err(|_| AppError::InvalidInterval)?;
        let end =
            NaiveTime::parse_from_str(end_raw, "%H:%M").map_err(|_| AppError::InvalidInterval)?;
        if start >= end {
            return Err(AppError::InvalidInterval);
        }
        Ok(Self { start, end })
    }

    /// Canonical "HH:MM-HH:MM" encoding, as stored in the ledger.
    pub fn encode(&self) -> String {
        format!(
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Parse a booking date and reject dates strictly before `today`
/// (calendar-day granularity, time-of-day ignored).
pub fn parse_booking_date(raw: &str, today: NaiveDate) -> AppResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| AppError::InvalidDate)?;
    if date < today {
        return Err(AppError::InvalidDate);
    }
    Ok(date)
}

/// End time of a stored interval, if it parses. Rows written before strict
/// validation may hold arbitrary strings.
pub fn end_time_of(interval: &str) -> Option<NaiveTime> {
    let (_, end_raw) = interval.split_once('-')?;
    NaiveTime::parse_from_str(end_raw, "%H:%M").ok()
}

/// True once the slot's end datetime is behind `now`. An unparseable
/// interval falls back to the calendar-day rule.
pub fn has_ended(date: NaiveDate, interval: &str, now: NaiveDateTime) -> bool {
    match end_time_of(interval) {
        Some(end) => date.and_time(end) < now,
        None => date < now.date(),
    }
}

/// A booking is editable while its date is not past and its end time on
/// that date has not yet elapsed.
pub fn is_editable(date: NaiveDate, interval: &str, now: NaiveDateTime) -> bool {
    date >= now.date() && !has_ended(date, interval, now)
}
