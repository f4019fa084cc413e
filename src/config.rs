use serde::{Deserialize, Serialize};

use crate::{DEFAULT_INPUT_FORMAT, DateFormat, DateRangeBounds, ParseError, prelude::*};

/// Settings shared by the input field and the month picker.
///
/// Deserializes from partial documents; missing fields fall back to the defaults
/// (`YYYY.M.D`, weeks starting on Sunday, no bounds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub input_format:  String,
    pub first_weekday: Weekday,
    pub bounds:        DateRangeBounds,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            input_format:  DEFAULT_INPUT_FORMAT.to_owned(),
            first_weekday: Weekday::Sun,
            bounds:        DateRangeBounds::unbounded(),
        }
    }
}

impl PickerConfig {
    #[must_use]
    pub fn with_input_format(mut self, pattern: impl Into<String>) -> Self {
        self.input_format = pattern.into();
        self
    }

    #[must_use]
    pub fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: DateRangeBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Compiles `input_format`.
    ///
    /// # Errors
    /// Returns the pattern error from [`DateFormat::compile`].
    pub fn compiled_format(&self) -> Result<DateFormat, ParseError> {
        DateFormat::compile(&self.input_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bound;
    use crate::test_utils::date;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.input_format, "YYYY.M.D");
        assert_eq!(config.first_weekday, Weekday::Sun);
        assert_eq!(config.bounds, DateRangeBounds::unbounded());
        assert!(config.compiled_format().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PickerConfig = serde_json::from_str(r#"{"first_weekday": "Mon"}"#).unwrap();
        assert_eq!(config.first_weekday, Weekday::Mon);
        assert_eq!(config.input_format, "YYYY.M.D");

        let config: PickerConfig = serde_json::from_str(r#"{"bounds": "2022-06-03/"}"#).unwrap();
        assert_eq!(config.bounds.lower(), Bound::At(date(2022, 6, 3)));
        assert_eq!(config.bounds.upper(), Bound::Absent);
    }

    #[test]
    fn test_deserialize_rejects_bad_bounds() {
        let result: Result<PickerConfig, _> = serde_json::from_str(r#"{"bounds": "2022-06-12/2022-06-03"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_every_field() {
        let config = PickerConfig::default()
            .with_input_format("DD/MM/YYYY")
            .with_first_weekday(Weekday::Mon)
            .with_bounds(DateRangeBounds::new(Bound::Absent, Bound::At(date(2022, 6, 12))));

        let json = serde_json::to_string(&config).unwrap();
        let parsed: PickerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_compiled_format_error() {
        let config = PickerConfig::default().with_input_format("YYYY");
        assert!(matches!(config.compiled_format(), Err(ParseError::MissingField { .. })));
    }
}
