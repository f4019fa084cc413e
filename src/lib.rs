#![doc = include_str!("../README.md")]

mod config;
mod consts;
mod convert;
mod format;
mod grid;
mod input;
mod picker;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use config::PickerConfig;
pub use consts::*;
pub use convert::{to_calendar_date, to_calendar_date_in, today};
pub use format::{DateFormat, parse_and_validate, to_canonical_string};
pub use grid::{DateCell, GridRequest, MonthGrid, build_month_grid};
pub use input::{DateInput, InputEvent};
pub use picker::{DatePicker, PickerEvent, SelectionMode};
pub use range::{Bound, DateRangeBounds, RangeError, is_valid_date};
pub use types::{MonthIndex, YearMonth};

use crate::prelude::*;
use std::cmp::Ordering;
use std::str::FromStr;

/// A single calendar day, or the invalid value produced by unparseable input.
///
/// Comparisons happen at day granularity. An invalid date is only ever equal
/// to another invalid date and is unordered relative to every valid one, so
/// `is_before`/`is_after`/`is_same_day` all answer `false` when it is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CalendarDate {
    /// A day that exists in the proleptic Gregorian calendar
    #[display(fmt = "{}", "to_canonical_string(*_0)")]
    Valid(NaiveDate),
    /// Input that did not denote a real day
    #[display(fmt = "{}", INVALID_DATE_TEXT)]
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date pattern: {_0}")]
    InvalidPattern(String),
    #[display(fmt = "Date pattern {pattern:?} has no {field} field")]
    MissingField { pattern: String, field: &'static str },
    #[display(fmt = "Input {input:?} does not match pattern {pattern:?}")]
    Mismatch { input: String, pattern: String },
    #[display(fmt = "Invalid year: {_0}")]
    InvalidYear(i32),
    #[display(fmt = "Invalid month index: {} (must be 0-{})", "_0", MAX_MONTH_INDEX)]
    InvalidMonthIndex(u8),
    #[display(fmt = "Invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Builds a date from a 1-based month, yielding `Invalid` for days that
    /// do not exist (no rollover: Feb 30 is invalid, not Mar 2).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day).map_or(Self::Invalid, Self::Valid)
    }

    /// Like [`CalendarDate::from_ymd`] but reports why the date is rejected.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDate` if the triple is not a real day.
    pub fn try_from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ParseError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::Valid)
            .ok_or(ParseError::InvalidDate { year, month, day })
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the underlying day if valid
    #[inline]
    pub const fn as_naive(&self) -> Option<NaiveDate> {
        match *self {
            Self::Valid(date) => Some(date),
            Self::Invalid => None,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.as_naive().map(|d| d.year())
    }

    /// 1-based month
    pub fn month(&self) -> Option<u32> {
        self.as_naive().map(|d| d.month())
    }

    pub fn day(&self) -> Option<u32> {
        self.as_naive().map(|d| d.day())
    }

    /// Strictly earlier day; `false` if either side is invalid.
    pub fn is_before(&self, other: &Self) -> bool {
        matches!(self.day_cmp(other), Some(Ordering::Less))
    }

    /// Strictly later day; `false` if either side is invalid.
    pub fn is_after(&self, other: &Self) -> bool {
        matches!(self.day_cmp(other), Some(Ordering::Greater))
    }

    /// Same day; `false` if either side is invalid.
    pub fn is_same_day(&self, other: &Self) -> bool {
        matches!(self.day_cmp(other), Some(Ordering::Equal))
    }

    fn day_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Valid(a), Self::Valid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Invalid, Self::Invalid) => Some(Ordering::Equal),
            _ => self.day_cmp(other),
        }
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl From<Option<NaiveDate>> for CalendarDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(Self::Invalid, Self::Valid)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses the canonical `YYYY-MM-DD` form, or the invalid marker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == INVALID_DATE_TEXT {
            return Ok(Self::Invalid);
        }
        DateFormat::canonical().try_parse(trimmed).map(Self::Valid)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
