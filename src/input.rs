//! Headless text-entry controller.
//!
//! Holds what the user typed and turns focus/blur/enter/clear into the
//! events a date field emits. Committing always goes through the strict
//! parser and the range check, so a listener only ever sees a canonical
//! date string or `None`.

use chrono::{DateTime, Utc};
use log::debug;

use crate::{Bound, DateFormat, DateRangeBounds, ParseError, PickerConfig, to_calendar_date};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Focus,
    Blur,
    /// Canonical `YYYY-MM-DD`, or `None` when the text is empty, unparseable or out of range
    Input(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInput {
    format:  DateFormat,
    bounds:  DateRangeBounds,
    text:    String,
    focused: bool,
}

impl DateInput {
    /// # Errors
    /// Returns the pattern error if `config.input_format` does not compile.
    pub fn new(config: &PickerConfig) -> Result<Self, ParseError> {
        Ok(Self {
            format:  config.compiled_format()?,
            bounds:  config.bounds,
            text:    String::new(),
            focused: false,
        })
    }

    /// Initial text, without emitting anything
    #[must_use]
    pub fn with_value(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Replaces the bounds with native timestamps, each truncated to its local day.
    /// `None` leaves that side unbounded.
    pub fn set_native_bounds(&mut self, lower: Option<DateTime<Utc>>, upper: Option<DateTime<Utc>>) {
        let to_bound = |ts: Option<DateTime<Utc>>| {
            ts.map_or(Bound::Absent, |ts| Bound::from(to_calendar_date(Some(ts))))
        };
        self.bounds = DateRangeBounds::new(to_bound(lower), to_bound(upper));
    }

    pub const fn set_bounds(&mut self, bounds: DateRangeBounds) {
        self.bounds = bounds;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    pub const fn bounds(&self) -> DateRangeBounds {
        self.bounds
    }

    /// Whether there is anything to clear
    pub fn has_value(&self) -> bool {
        !self.text.is_empty()
    }

    /// What committing right now would emit
    pub fn committed_value(&self) -> Option<String> {
        self.format.parse_and_validate(&self.text, &self.bounds)
    }

    pub fn focus(&mut self) -> InputEvent {
        self.focused = true;
        InputEvent::Focus
    }

    /// Commits the current text and leaves the field
    pub fn blur(&mut self) -> [InputEvent; 2] {
        self.focused = false;
        [self.commit(), InputEvent::Blur]
    }

    /// Enter commits the same way leaving the field does
    pub fn key_enter(&mut self) -> [InputEvent; 2] {
        debug!("enter pressed, committing {:?}", self.text);
        self.blur()
    }

    /// Updates the text as the user types; nothing is emitted until commit
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replaces the text and commits it in one step
    pub fn change(&mut self, text: impl Into<String>) -> InputEvent {
        self.set_text(text);
        self.commit()
    }

    pub fn commit(&self) -> InputEvent {
        InputEvent::Input(self.committed_value())
    }

    pub fn clear(&mut self) -> InputEvent {
        self.text.clear();
        InputEvent::Input(None)
    }
}
