use crate::ParseError;
use crate::consts::{MAX_MONTH_INDEX, MONTHS_PER_YEAR};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based month index guaranteed to be in the range `0..=MAX_MONTH_INDEX` (0..=11),
/// so January is 0 and December is 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MonthIndex(u8);

impl MonthIndex {
    pub const JANUARY: Self = Self(0);
    pub const DECEMBER: Self = Self(MAX_MONTH_INDEX);

    /// Creates a new `MonthIndex`, validating that it's <= `MAX_MONTH_INDEX`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonthIndex` if the value is > `MAX_MONTH_INDEX`.
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_MONTH_INDEX {
            return Err(ParseError::InvalidMonthIndex(value));
        }
        Ok(Self(value))
    }

    /// Returns the zero-based index
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the 1-based month number chrono expects
    #[inline]
    pub const fn number(self) -> u32 {
        self.0 as u32 + 1
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        // chrono's month0 is always 0..=11
        Self(u8::try_from(date.month0()).unwrap_or(MAX_MONTH_INDEX))
    }
}

impl TryFrom<u8> for MonthIndex {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthIndex> for u8 {
    fn from(month: MonthIndex) -> Self {
        month.0
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The month a picker is showing: a year plus a zero-based month index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "{:04}-{:02}", year, "month.number()")]
pub struct YearMonth {
    year:  i32,
    month: MonthIndex,
}

impl YearMonth {
    pub const fn new(year: i32, month: MonthIndex) -> Self {
        Self { year, month }
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), MonthIndex::of(date))
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month_index(&self) -> MonthIndex {
        self.month
    }

    /// First day of the month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the year is outside chrono's supported range.
    pub fn first_day(&self) -> Result<NaiveDate, ParseError> {
        NaiveDate::from_ymd_opt(self.year, self.month.number(), 1).ok_or(ParseError::InvalidYear(self.year))
    }

    /// Whether `date` falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == u32::from(self.month.get())
    }

    /// The following month, rolling December over into January of the next year.
    /// December of `i32::MAX` is the last month and has no successor.
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.month.get() == MAX_MONTH_INDEX {
            match self.year.checked_add(1) {
                Some(year) => Self::new(year, MonthIndex::JANUARY),
                None => *self,
            }
        } else {
            Self::new(self.year, MonthIndex(self.month.get() + 1))
        }
    }

    /// The preceding month, rolling January back into December of the previous year.
    /// January of `i32::MIN` is the first month and has no predecessor.
    #[must_use]
    pub const fn previous(&self) -> Self {
        if self.month.get() == 0 {
            match self.year.checked_sub(1) {
                Some(year) => Self::new(year, MonthIndex::DECEMBER),
                None => *self,
            }
        } else {
            Self::new(self.year, MonthIndex(self.month.get() - 1))
        }
    }

    /// Shifts by a signed number of months, stopping at the first or last month
    /// an `i32` year can hold
    #[must_use]
    pub fn offset(&self, months: i32) -> Self {
        let per_year = i64::from(MONTHS_PER_YEAR);
        let linear = i64::from(self.year) * per_year + i64::from(self.month.get()) + i64::from(months);
        match i32::try_from(linear.div_euclid(per_year)) {
            Ok(year) => {
                let month = u8::try_from(linear.rem_euclid(per_year)).unwrap_or(MAX_MONTH_INDEX);
                Self::new(year, MonthIndex(month))
            },
            Err(_) if months > 0 => Self::new(i32::MAX, MonthIndex::DECEMBER),
            Err(_) => Self::new(i32::MIN, MonthIndex::JANUARY),
        }
    }
}
