//! Headless month-picker controller.
//!
//! Tracks the displayed month and the current selection. The grid is rebuilt
//! from that state on every [`DatePicker::grid`] call; nothing is cached.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, DateCell, GridRequest, MonthGrid, ParseError, PickerConfig, YearMonth, build_month_grid, prelude::*,
    today,
};

/// How clicks on the grid change the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// One day at a time
    #[default]
    Single,
    /// A start day then an end day
    Range,
    /// Any set of days, toggled individually
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Select(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    config:   PickerConfig,
    mode:     SelectionMode,
    today:    NaiveDate,
    view:     YearMonth,
    start:    Option<NaiveDate>,
    end:      Option<NaiveDate>,
    selected: BTreeSet<NaiveDate>,
}

impl DatePicker {
    /// Opens on the month of `today`, pulled into the configured bounds.
    pub fn new(config: PickerConfig, mode: SelectionMode, today: NaiveDate) -> Self {
        let view = YearMonth::of(config.bounds.clamp(today));
        Self {
            config,
            mode,
            today,
            view,
            start: None,
            end: None,
            selected: BTreeSet::new(),
        }
    }

    /// Opens on the current local day
    pub fn for_today(config: PickerConfig, mode: SelectionMode) -> Self {
        Self::new(config, mode, today())
    }

    pub const fn view(&self) -> YearMonth {
        self.view
    }

    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub const fn selected(&self) -> &BTreeSet<NaiveDate> {
        &self.selected
    }

    pub const fn show_month(&mut self, month: YearMonth) {
        self.view = month;
    }

    pub fn next_month(&mut self) -> YearMonth {
        self.view = self.view.next();
        self.view
    }

    pub fn previous_month(&mut self) -> YearMonth {
        self.view = self.view.previous();
        self.view
    }

    pub fn clear_selection(&mut self) {
        self.start = None;
        self.end = None;
        self.selected.clear();
    }

    /// The grid for the displayed month and current selection.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if navigation ran past chrono's date range.
    pub fn grid(&self) -> Result<MonthGrid, ParseError> {
        let request = GridRequest::new(self.view.year(), self.view.month_index(), CalendarDate::Valid(self.today))
            .with_start(self.start.map(CalendarDate::Valid))
            .with_end(self.end.map(CalendarDate::Valid))
            .with_selected(self.selected.iter().copied().map(CalendarDate::Valid))
            .with_bounds(self.config.bounds)
            .with_first_weekday(self.config.first_weekday);
        build_month_grid(&request)
    }

    /// Handles a click on a grid cell. Disabled cells are ignored.
    pub fn select_cell(&mut self, cell: &DateCell) -> Option<PickerEvent> {
        if cell.disabled {
            return None;
        }
        self.select(cell.date)
    }

    /// Applies a pick of `date` to the selection.
    ///
    /// Days outside the bounds are ignored. Picking a day of another month also
    /// moves the view there.
    pub fn select(&mut self, date: NaiveDate) -> Option<PickerEvent> {
        if !self.config.bounds.admits(date) {
            debug!("ignoring pick of {date} outside {}", self.config.bounds);
            return None;
        }
        if !self.view.contains(date) {
            self.view = YearMonth::of(date);
        }

        match self.mode {
            SelectionMode::Single => {
                self.selected.clear();
                self.selected.insert(date);
            },
            SelectionMode::Range => match (self.start, self.end) {
                (Some(start), None) if date < start => {
                    self.end = Some(start);
                    self.start = Some(date);
                },
                (Some(_), None) => self.end = Some(date),
                _ => {
                    self.start = Some(date);
                    self.end = None;
                },
            },
            SelectionMode::Multiple => {
                if !self.selected.remove(&date) {
                    self.selected.insert(date);
                }
            },
        }
        Some(PickerEvent::Select(date))
    }
}
