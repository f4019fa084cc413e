//! Conversion from native timestamps to day-granularity calendar dates.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::{CalendarDate, prelude::*};

/// Truncates a timestamp to its calendar day in the local time zone.
/// `None` stands for "now", so the result is today.
pub fn to_calendar_date(native: Option<DateTime<Utc>>) -> CalendarDate {
    to_calendar_date_in(native, &Local)
}

/// Same as [`to_calendar_date`] for an explicit time zone.
pub fn to_calendar_date_in<Tz: TimeZone>(native: Option<DateTime<Utc>>, tz: &Tz) -> CalendarDate {
    let instant = native.unwrap_or_else(Utc::now);
    CalendarDate::Valid(instant.with_timezone(tz).date_naive())
}

/// Today's date in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl<Tz: TimeZone> From<DateTime<Tz>> for CalendarDate {
    /// Keeps the day as seen in the timestamp's own offset
    fn from(value: DateTime<Tz>) -> Self {
        Self::Valid(value.date_naive())
    }
}

impl From<NaiveDateTime> for CalendarDate {
    fn from(value: NaiveDateTime) -> Self {
        Self::Valid(value.date())
    }
}
