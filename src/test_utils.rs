//! Fixture helpers shared by the unit tests.

#![allow(clippy::unwrap_used)]

use crate::{CalendarDate, MonthIndex, prelude::*};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn cal(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::Valid(date(year, month, day))
}

pub fn month(index: u8) -> MonthIndex {
    MonthIndex::new(index).unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
