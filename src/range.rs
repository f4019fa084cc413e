use std::{fmt, str::FromStr};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{CalendarDate, INVALID_DATE_TEXT, ParseError, RANGE_SEPARATOR, prelude::*, to_canonical_string};

/// One side of an allowed date range.
///
/// Keeps "not provided" apart from "provided but unparseable". Neither
/// constrains anything, but callers can still tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bound {
    /// No bound was given
    #[default]
    Absent,
    /// A bound was given but did not denote a real day; ignored when validating
    Invalid,
    /// Inclusive limit
    At(NaiveDate),
}

impl Bound {
    /// The limiting day, if this bound constrains anything
    #[inline]
    pub const fn date(self) -> Option<NaiveDate> {
        match self {
            Self::At(date) => Some(date),
            Self::Absent | Self::Invalid => None,
        }
    }

    #[inline]
    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl From<CalendarDate> for Bound {
    fn from(date: CalendarDate) -> Self {
        match date {
            CalendarDate::Valid(d) => Self::At(d),
            CalendarDate::Invalid => Self::Invalid,
        }
    }
}

impl From<Option<CalendarDate>> for Bound {
    fn from(date: Option<CalendarDate>) -> Self {
        date.map_or(Self::Absent, Self::from)
    }
}

impl From<NaiveDate> for Bound {
    fn from(date: NaiveDate) -> Self {
        Self::At(date)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Absent => Ok(()),
            Self::Invalid => f.write_str(INVALID_DATE_TEXT),
            Self::At(date) => f.write_str(&to_canonical_string(date)),
        }
    }
}

impl FromStr for Bound {
    type Err = ParseError;

    /// An empty string is an absent bound; anything else must be a canonical date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::Absent);
        }
        trimmed.parse::<CalendarDate>().map(Self::from)
    }
}

/// Inclusive lower and upper limits on which days may be picked or typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[display(fmt = "{lower}/{upper}")]
pub struct DateRangeBounds {
    lower: Bound,
    upper: Bound,
}

/// Error type for range bound operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Lower bound is after upper bound.
    #[error("Invalid date range: lower bound ({lower}) is after upper bound ({upper})")]
    InvertedBounds { lower: NaiveDate, upper: NaiveDate },

    /// Error parsing a bound.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

/// Whether `target` is a valid day inside the optional inclusive bounds.
///
/// Bounds that are present but invalid are ignored rather than failing the check.
pub fn is_valid_date(target: &CalendarDate, lower: Option<&CalendarDate>, upper: Option<&CalendarDate>) -> bool {
    DateRangeBounds::from_options(lower, upper).contains(target)
}

impl DateRangeBounds {
    /// Creates bounds without checking their order. An inverted pair admits no day.
    pub const fn new(lower: Bound, upper: Bound) -> Self {
        Self { lower, upper }
    }

    /// Creates bounds, rejecting a lower bound after the upper bound.
    ///
    /// # Errors
    /// Returns `RangeError::InvertedBounds` if both bounds are valid and lower > upper.
    pub fn try_new(lower: Bound, upper: Bound) -> Result<Self, RangeError> {
        match (lower.date(), upper.date()) {
            (Some(lo), Some(hi)) if lo > hi => Err(RangeError::InvertedBounds { lower: lo, upper: hi }),
            _ => Ok(Self::new(lower, upper)),
        }
    }

    /// No limit on either side
    pub const fn unbounded() -> Self {
        Self::new(Bound::Absent, Bound::Absent)
    }

    pub fn from_options(lower: Option<&CalendarDate>, upper: Option<&CalendarDate>) -> Self {
        Self::new(Bound::from(lower.copied()), Bound::from(upper.copied()))
    }

    #[inline]
    pub const fn lower(&self) -> Bound {
        self.lower
    }

    #[inline]
    pub const fn upper(&self) -> Bound {
        self.upper
    }

    /// Checks a possibly-invalid date; invalid dates are never contained.
    pub fn contains(&self, target: &CalendarDate) -> bool {
        target.as_naive().is_some_and(|date| self.admits(date))
    }

    /// Checks a known-good day against both limits, inclusively.
    pub fn admits(&self, date: NaiveDate) -> bool {
        !self.is_before_lower(date) && !self.is_after_upper(date)
    }

    pub fn is_before_lower(&self, date: NaiveDate) -> bool {
        self.lower.date().is_some_and(|lo| date < lo)
    }

    pub fn is_after_upper(&self, date: NaiveDate) -> bool {
        self.upper.date().is_some_and(|hi| date > hi)
    }

    /// Pulls `date` onto the nearest limit when it falls outside.
    /// With inverted bounds the lower limit wins.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        let clamped = match (self.lower.date(), self.upper.date()) {
            (Some(lo), _) if date < lo => lo,
            (_, Some(hi)) if date > hi => self.lower.date().map_or(hi, |lo| hi.max(lo)),
            _ => date,
        };
        if clamped != date {
            trace!("clamped {date} into {self}");
        }
        clamped
    }
}

impl FromStr for DateRangeBounds {
    type Err = RangeError;

    /// Parses `lower/upper`, where either side may be left empty for "unbounded".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (lower_str, upper_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let lower = lower_str.parse::<Bound>()?;
                let upper = upper_str.parse::<Bound>()?;

                Self::try_new(lower, upper)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRangeBounds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRangeBounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
