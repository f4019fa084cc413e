//! Month grid generation.
//!
//! A month is always shown as 6 rows of 7 days. The first row starts on the
//! configured first weekday, so the grid usually opens with a few trailing days
//! of the previous month and closes with leading days of the next one. Those
//! padding cells are flagged `hidden`.

use std::collections::BTreeSet;

use chrono::Days;
use log::trace;
use serde::Serialize;

use crate::{
    CALENDAR_DATES_SIZE, CalendarDate, DAYS_PER_WEEK, DateRangeBounds, GRID_ROWS, MonthIndex, ParseError, YearMonth,
    prelude::*, to_canonical_string,
};

/// Everything one grid cell needs to render.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateCell {
    pub date:     NaiveDate,
    pub year:     i32,
    /// 1-based
    pub month:    u32,
    pub day:      u32,
    /// 0 = Sunday .. 6 = Saturday
    pub weekday:  u32,
    /// Padding from an adjacent month
    pub hidden:   bool,
    /// Outside the allowed range
    pub disabled: bool,
    pub selected: bool,
    pub is_today: bool,
    pub is_start: bool,
    pub is_end:   bool,
    pub in_range: bool,
}

impl DateCell {
    pub fn date_string(&self) -> String {
        to_canonical_string(self.date)
    }
}

/// 42 cells, row-major, always 6 rows of 7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    cells: Vec<DateCell>,
}

impl MonthGrid {
    /// The month this grid displays
    pub const fn month(&self) -> YearMonth {
        self.month
    }

    /// All cells, top-left to bottom-right
    pub fn cells(&self) -> &[DateCell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DateCell]> {
        self.cells.chunks_exact(DAYS_PER_WEEK)
    }

    pub fn row(&self, index: usize) -> Option<&[DateCell]> {
        self.rows().nth(index)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&DateCell> {
        if column >= DAYS_PER_WEEK {
            return None;
        }
        self.cells.get(row * DAYS_PER_WEEK + column)
    }

    /// Cell showing `date`, if the grid covers it
    pub fn find(&self, date: NaiveDate) -> Option<&DateCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

impl Serialize for MonthGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.rows())
    }
}

/// Inputs to [`build_month_grid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRequest {
    pub month:         YearMonth,
    pub current_date:  CalendarDate,
    pub start:         Option<CalendarDate>,
    pub end:           Option<CalendarDate>,
    pub selected:      BTreeSet<NaiveDate>,
    pub bounds:        DateRangeBounds,
    pub first_weekday: Weekday,
}

impl GridRequest {
    /// A request with no selection, no bounds and weeks starting on Sunday
    pub fn new(year: i32, month_index: MonthIndex, current_date: CalendarDate) -> Self {
        Self {
            month: YearMonth::new(year, month_index),
            current_date,
            start: None,
            end: None,
            selected: BTreeSet::new(),
            bounds: DateRangeBounds::unbounded(),
            first_weekday: Weekday::Sun,
        }
    }

    #[must_use]
    pub fn with_start(mut self, start: Option<CalendarDate>) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: Option<CalendarDate>) -> Self {
        self.end = end;
        self
    }

    /// Invalid dates are dropped; they could never match a cell.
    #[must_use]
    pub fn with_selected<I>(mut self, selected: I) -> Self
    where
        I: IntoIterator<Item = CalendarDate>,
    {
        self.selected = selected.into_iter().filter_map(|d| d.as_naive()).collect();
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: DateRangeBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }
}

/// Builds the 6×7 grid for the requested month.
///
/// Pure: the same request always yields an equal grid.
///
/// # Errors
/// Returns `ParseError::InvalidYear` when the month or its padding falls outside
/// the range of dates chrono can represent.
pub fn build_month_grid(request: &GridRequest) -> Result<MonthGrid, ParseError> {
    let month = request.month;
    let month_first = month.first_day()?;
    let padding = leading_padding(month_first.weekday(), request.first_weekday);
    let grid_first = month_first
        .checked_sub_days(Days::new(padding))
        .ok_or(ParseError::InvalidYear(month.year()))?;

    let start = request.start.and_then(|d| d.as_naive());
    let end = request.end.and_then(|d| d.as_naive());
    let today = request.current_date.as_naive();

    let cells: Vec<DateCell> = grid_first
        .iter_days()
        .take(CALENDAR_DATES_SIZE)
        .map(|date| DateCell {
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday().num_days_from_sunday(),
            hidden: !month.contains(date),
            disabled: !request.bounds.admits(date),
            selected: start == Some(date) || end == Some(date) || request.selected.contains(&date),
            is_today: today == Some(date),
            is_start: start == Some(date),
            is_end: end == Some(date),
            in_range: matches!((start, end), (Some(s), Some(e)) if s <= date && date <= e),
        })
        .collect();

    if cells.len() != CALENDAR_DATES_SIZE {
        return Err(ParseError::InvalidYear(month.year()));
    }

    trace!(
        "built {GRID_ROWS}x{DAYS_PER_WEEK} grid for {month} from {grid_first} ({padding} leading days)"
    );
    Ok(MonthGrid { month, cells })
}

/// Days between the start of the week and `weekday`
fn leading_padding(weekday: Weekday, first_weekday: Weekday) -> u64 {
    let days = DAYS_PER_WEEK as u32;
    u64::from((weekday.num_days_from_sunday() + days - first_weekday.num_days_from_sunday()) % days)
}
