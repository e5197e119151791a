//! DateRange value object for inclusive rental periods.

use chrono::{DateTime, NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar date as entered in the form (`YYYY-MM-DD`).
///
/// Full RFC 3339 datetimes (as returned by the booking service) are accepted
/// too and truncated to their UTC date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc().date())
        .map_err(|_| ValidationError::invalid_format(field, "expected YYYY-MM-DD"))
}

/// Inclusive range of rental days.
///
/// Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting an end before the start.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ValidationError> {
        if end_date < start_date {
            return Err(ValidationError::invalid_format(
                "endDate",
                "end date must not be before start date",
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Parses a range from the form's `startDate` / `endDate` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start_date = parse_date("startDate", start)?;
        let end_date = parse_date("endDate", end)?;
        Self::new(start_date, end_date)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns true if the two ranges share at least one day.
    ///
    /// `newStart <= existingEnd AND newEnd >= existingStart`
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start_date <= other.end_date && self.end_date >= other.start_date
    }

    /// Number of rental days, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Start of the first day as an ISO-8601 UTC datetime
    /// (`2024-06-01T00:00:00.000Z`).
    pub fn start_datetime(&self) -> String {
        midnight_utc(self.start_date)
    }

    /// Start of the last day as an ISO-8601 UTC datetime.
    pub fn end_datetime(&self) -> String {
        midnight_utc(self.end_date)
    }
}

fn midnight_utc(date: NaiveDate) -> String {
    date.and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..={}",
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT)
        )
    }
}
