//! Date parameters: single days, inclusive ranges, and month keys.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::region::non_blank;
use crate::{Error, Result};

/// Wire format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` request parameter.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        Error::validation_field(
            field,
            format!("{field} must be a date in the format YYYY-MM-DD, got '{value}'"),
        )
    })
}

/// Parses a parameter that must be present.
pub fn require_date(field: &str, value: Option<&str>) -> Result<NaiveDate> {
    match non_blank(value) {
        Some(v) => parse_date(field, v),
        None => Err(Error::validation_field(
            field,
            format!("{field} is required (YYYY-MM-DD)"),
        )),
    }
}

/// Inclusive date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::validation_field(
                "inicio",
                format!("inicio ({start}) must not be after fim ({end})"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Builds a range from the `inicio`/`fim` request parameters, both required.
    pub fn from_params(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        if non_blank(start).is_none() || non_blank(end).is_none() {
            return Err(Error::validation(
                "inicio and fim are required (YYYY-MM-DD)",
            ));
        }
        Self::new(require_date("inicio", start)?, require_date("fim", end)?)
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days between `start` and `end`.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Rejects ranges longer than `max_days`.
    pub fn ensure_at_most(self, max_days: u32) -> Result<Self> {
        if self.days() > i64::from(max_days) {
            return Err(Error::validation(format!(
                "the maximum allowed interval is {max_days} days, got {}",
                self.days()
            )));
        }
        Ok(self)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Calendar month used to address monthly burned-area files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey(u8);

impl MonthKey {
    /// Creates a month key from 1..=12.
    pub fn new(month: u32) -> Result<Self> {
        match u8::try_from(month) {
            Ok(m) if (1..=12).contains(&m) => Ok(Self(m)),
            _ => Err(Error::validation_field(
                "inicio",
                format!("month must be between 1 and 12, got {month}"),
            )),
        }
    }

    /// Month of a date.
    pub fn of(date: NaiveDate) -> Self {
        // chrono months are always 1..=12
        Self(date.month() as u8)
    }

    /// Parses `3`, `03` or `2024-03`.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let month = match value.split_once('-') {
            Some((year, month)) if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) => {
                month
            }
            Some(_) => return Err(invalid_month(value)),
            None => value,
        };
        if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_month(value));
        }
        let month: u32 = month.parse().map_err(|_| invalid_month(value))?;
        Self::new(month)
    }

    /// Month number 1..=12.
    pub fn get(&self) -> u8 {
        self.0
    }
}

fn invalid_month(value: &str) -> Error {
    Error::validation_field(
        "inicio",
        format!("inicio must be a month (MM or YYYY-MM), got '{value}'"),
    )
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}
