//! Format patterns for typed dates.
//!
//! A pattern is made of field tokens and literals:
//!
//! | token  | meaning                                            |
//! |--------|----------------------------------------------------|
//! | `YYYY` | four-digit year, signed outside `0000..=9999`      |
//! | `YY`   | two-digit year, `69..=99` → 19xx, `00..=68` → 20xx |
//! | `M`    | month, one or two digits                           |
//! | `MM`   | month, exactly two digits                          |
//! | `D`    | day of month, one or two digits                    |
//! | `DD`   | day of month, exactly two digits                   |
//! | `[..]` | escaped literal text                               |
//!
//! Any other character is a literal that has to appear verbatim.
//!
//! Years outside `0000..=9999` follow ISO 8601 expanded notation under `YYYY`:
//! an explicit sign and four to six digits (`+10000`, `-0001`).

use std::{fmt, str::FromStr};

use log::{debug, warn};

use crate::{
    CANONICAL_FORMAT, CalendarDate, DateRangeBounds, MAX_EXPANDED_YEAR_DIGITS, ParseError, TWO_DIGIT_YEAR_PIVOT,
    prelude::*,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year4,
    Year2,
    Month,
    Month2,
    Day,
    Day2,
    Literal(char),
}

const CANONICAL_TOKENS: [Token; 5] = [
    Token::Year4,
    Token::Literal('-'),
    Token::Month2,
    Token::Literal('-'),
    Token::Day2,
];

/// A compiled date pattern, used both to read typed input and to print dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    tokens:  Vec<Token>,
}

/// Renders a day in the canonical `YYYY-MM-DD` form.
///
/// Years outside `0000..=9999` are signed, as chrono prints them.
pub fn to_canonical_string(date: NaiveDate) -> String {
    date.to_string()
}

impl DateFormat {
    /// Compiles a pattern.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidPattern` for an empty pattern, an unsupported
    /// run of field letters or an unterminated `[`, and `ParseError::MissingField`
    /// when the year, month or day field is absent.
    pub fn compile(pattern: &str) -> Result<Self, ParseError> {
        if pattern.is_empty() {
            return Err(ParseError::InvalidPattern("empty pattern".to_owned()));
        }

        let mut tokens = Vec::with_capacity(pattern.len());
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                'Y' | 'M' | 'D' => {
                    let mut run = 1;
                    while chars.next_if_eq(&c).is_some() {
                        run += 1;
                    }
                    tokens.push(field_token(c, run).ok_or_else(|| {
                        ParseError::InvalidPattern(format!(
                            "unsupported field {} in {pattern:?}",
                            c.to_string().repeat(run)
                        ))
                    })?);
                },
                '[' => {
                    let mut closed = false;
                    for escaped in chars.by_ref() {
                        if escaped == ']' {
                            closed = true;
                            break;
                        }
                        tokens.push(Token::Literal(escaped));
                    }
                    if !closed {
                        return Err(ParseError::InvalidPattern(format!("unterminated '[' in {pattern:?}")));
                    }
                },
                other => tokens.push(Token::Literal(other)),
            }
        }

        for (field, present) in [
            ("year", tokens.iter().any(|t| matches!(t, Token::Year4 | Token::Year2))),
            ("month", tokens.iter().any(|t| matches!(t, Token::Month | Token::Month2))),
            ("day", tokens.iter().any(|t| matches!(t, Token::Day | Token::Day2))),
        ] {
            if !present {
                return Err(ParseError::MissingField {
                    pattern: pattern.to_owned(),
                    field,
                });
            }
        }

        Ok(Self {
            pattern: pattern.to_owned(),
            tokens,
        })
    }

    /// The `YYYY-MM-DD` format all emitted values use
    pub fn canonical() -> Self {
        Self {
            pattern: CANONICAL_FORMAT.to_owned(),
            tokens:  CANONICAL_TOKENS.to_vec(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Strictly parses `text`, ignoring surrounding whitespace.
    ///
    /// # Errors
    /// Returns `ParseError::EmptyInput` for blank input, `ParseError::Mismatch` when
    /// the text does not follow the pattern, and `ParseError::InvalidDate` when it
    /// does but names a day that does not exist.
    pub fn try_parse(&self, text: &str) -> Result<NaiveDate, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let mismatch = || ParseError::Mismatch {
            input:   trimmed.to_owned(),
            pattern: self.pattern.clone(),
        };

        let mut rest = trimmed;
        let (mut year, mut month, mut day) = (None, None, None);
        for token in &self.tokens {
            match *token {
                Token::Literal(c) => {
                    rest = rest.strip_prefix(c).ok_or_else(mismatch)?;
                },
                Token::Year4 => {
                    let (value, tail) = take_year(rest).ok_or_else(mismatch)?;
                    year = Some(value);
                    rest = tail;
                },
                Token::Year2 => {
                    let (value, tail) = take_digits(rest, 2, 2).ok_or_else(mismatch)?;
                    year = Some(expand_two_digit_year(value));
                    rest = tail;
                },
                Token::Month | Token::Month2 => {
                    let min = if *token == Token::Month2 { 2 } else { 1 };
                    let (value, tail) = take_digits(rest, min, 2).ok_or_else(mismatch)?;
                    month = Some(value);
                    rest = tail;
                },
                Token::Day | Token::Day2 => {
                    let min = if *token == Token::Day2 { 2 } else { 1 };
                    let (value, tail) = take_digits(rest, min, 2).ok_or_else(mismatch)?;
                    day = Some(value);
                    rest = tail;
                },
            }
        }
        if !rest.is_empty() {
            return Err(mismatch());
        }

        let (Some(year), Some(month), Some(day)) = (year, month, day) else {
            return Err(mismatch());
        };
        NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDate { year, month, day })
    }

    /// Parses `text` into a calendar date, yielding `CalendarDate::Invalid` on any failure.
    pub fn parse(&self, text: &str) -> CalendarDate {
        match self.try_parse(text) {
            Ok(date) => CalendarDate::Valid(date),
            Err(err) => {
                debug!("{err}");
                CalendarDate::Invalid
            },
        }
    }

    /// Prints `date` following this pattern.
    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::with_capacity(self.pattern.len() + 2);
        for token in &self.tokens {
            match *token {
                Token::Literal(c) => out.push(c),
                Token::Year4 => out.push_str(&format_year(date.year())),
                Token::Year2 => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
                Token::Month => out.push_str(&date.month().to_string()),
                Token::Month2 => out.push_str(&format!("{:02}", date.month())),
                Token::Day => out.push_str(&date.day().to_string()),
                Token::Day2 => out.push_str(&format!("{:02}", date.day())),
            }
        }
        out
    }

    /// Parses `text`, checks it against `bounds` and returns the canonical form,
    /// or `None` when the text is unparseable or out of range.
    pub fn parse_and_validate(&self, text: &str, bounds: &DateRangeBounds) -> Option<String> {
        let date = self.parse(text);
        if !bounds.contains(&date) {
            debug!("rejecting {text:?} for {} within {bounds}", self.pattern);
            return None;
        }
        date.as_naive().map(to_canonical_string)
    }
}

/// Parses `text` against `format` and validates it against the optional inclusive
/// bounds, returning the canonical `YYYY-MM-DD` string or `None`.
///
/// A pattern that does not compile rejects every input.
pub fn parse_and_validate(
    text: &str,
    format: &str,
    lower: Option<&CalendarDate>,
    upper: Option<&CalendarDate>,
) -> Option<String> {
    match DateFormat::compile(format) {
        Ok(compiled) => compiled.parse_and_validate(text, &DateRangeBounds::from_options(lower, upper)),
        Err(err) => {
            warn!("{err}");
            None
        },
    }
}

fn field_token(letter: char, run: usize) -> Option<Token> {
    match (letter, run) {
        ('Y', 4) => Some(Token::Year4),
        ('Y', 2) => Some(Token::Year2),
        ('M', 1) => Some(Token::Month),
        ('M', 2) => Some(Token::Month2),
        ('D', 1) => Some(Token::Day),
        ('D', 2) => Some(Token::Day2),
        _ => None,
    }
}

/// Takes between `min` and `max` leading ASCII digits, greedily.
fn take_digits(input: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = input.bytes().take(max).take_while(u8::is_ascii_digit).count();
    if len < min {
        return None;
    }
    let (digits, rest) = input.split_at(len);
    digits.parse::<u32>().ok().map(|value| (value, rest))
}

/// Reads a `YYYY` year: four bare digits, or a sign followed by four to six digits.
fn take_year(input: &str) -> Option<(i32, &str)> {
    let (negative, unsigned) = if let Some(rest) = input.strip_prefix('+') {
        (false, rest)
    } else if let Some(rest) = input.strip_prefix('-') {
        (true, rest)
    } else {
        let (value, rest) = take_digits(input, 4, 4)?;
        return Some((i32::try_from(value).ok()?, rest));
    };
    let (value, rest) = take_digits(unsigned, 4, MAX_EXPANDED_YEAR_DIGITS)?;
    let value = i32::try_from(value).ok()?;
    Some((if negative { -value } else { value }, rest))
}

fn format_year(year: i32) -> String {
    if (0..=9999).contains(&year) { format!("{year:04}") } else { format!("{year:+05}") }
}

fn expand_two_digit_year(value: u32) -> i32 {
    // value is at most 99
    let value = i32::try_from(value).unwrap_or(0);
    if value > i32::from(TWO_DIGIT_YEAR_PIVOT) { 1900 + value } else { 2000 + value }
}

impl FromStr for DateFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bound;
    use crate::test_utils::{cal, date, init_logging};

    const DOTTED: &str = "YYYY.M.D";

    #[test]
    fn test_canonical_matches_compiled_constant() {
        assert_eq!(DateFormat::compile(CANONICAL_FORMAT), Ok(DateFormat::canonical()));
        assert_eq!(DateFormat::default().pattern(), "YYYY-MM-DD");
    }

    #[test]
    fn test_parse_and_validate_unbounded() {
        init_logging();
        assert_eq!(parse_and_validate("2022.234", DOTTED, None, None), None);
        assert_eq!(
            parse_and_validate("2022.12.1", DOTTED, None, None),
            Some("2022-12-01".to_owned())
        );
    }

    #[test]
    fn test_parse_and_validate_bounded() {
        init_logging();
        let lower = cal(2022, 6, 3);
        let upper = cal(2022, 6, 12);

        assert_eq!(parse_and_validate("2022.6.1", DOTTED, Some(&lower), Some(&upper)), None);
        assert_eq!(parse_and_validate("2022.7.1", DOTTED, Some(&lower), Some(&upper)), None);
        assert_eq!(
            parse_and_validate("2022.6.6", DOTTED, Some(&lower), Some(&upper)),
            Some("2022-06-06".to_owned())
        );
        assert_eq!(
            parse_and_validate("2022.6.3", DOTTED, Some(&lower), Some(&upper)),
            Some("2022-06-03".to_owned())
        );
        assert_eq!(
            parse_and_validate("2022.6.12", DOTTED, Some(&lower), Some(&upper)),
            Some("2022-06-12".to_owned())
        );
    }

    #[test]
    fn test_parse_and_validate_no_rollover() {
        assert_eq!(parse_and_validate("2022.2.30", DOTTED, None, None), None);
        assert_eq!(parse_and_validate("2022.13.1", DOTTED, None, None), None);
        assert_eq!(parse_and_validate("2022.0.1", DOTTED, None, None), None);
    }

    #[test]
    fn test_parse_and_validate_bad_pattern() {
        init_logging();
        assert_eq!(parse_and_validate("2022.6.6", "", None, None), None);
        assert_eq!(parse_and_validate("2022.6.6", "YYYY.M", None, None), None);
    }

    #[test]
    fn test_parse_and_validate_ignores_invalid_bounds() {
        let invalid = CalendarDate::Invalid;
        assert_eq!(
            parse_and_validate("2022.6.6", DOTTED, Some(&invalid), Some(&invalid)),
            Some("2022-06-06".to_owned())
        );
    }

    #[test]
    fn test_try_parse_cases() {
        struct TestCase {
            pattern:     &'static str,
            input:       &'static str,
            expected:    Option<(i32, u32, u32)>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                pattern:     DOTTED,
                input:       "2022.12.1",
                expected:    Some((2022, 12, 1)),
                description: "two-digit month, one-digit day",
            },
            TestCase {
                pattern:     DOTTED,
                input:       "2022.06.06",
                expected:    Some((2022, 6, 6)),
                description: "single-letter fields accept zero padding",
            },
            TestCase {
                pattern:     DOTTED,
                input:       " 2022.6.6 ",
                expected:    Some((2022, 6, 6)),
                description: "surrounding whitespace",
            },
            TestCase {
                pattern:     DOTTED,
                input:       "2022.6.6.",
                expected:    None,
                description: "trailing characters",
            },
            TestCase {
                pattern:     DOTTED,
                input:       "22.6.6",
                expected:    None,
                description: "short year for YYYY",
            },
            TestCase {
                pattern:     DOTTED,
                input:       "2022-6-6",
                expected:    None,
                description: "wrong separator",
            },
            TestCase {
                pattern:     "YYYY-MM-DD",
                input:       "2022-6-06",
                expected:    None,
                description: "MM needs two digits",
            },
            TestCase {
                pattern:     "DD/MM/YYYY",
                input:       "01/12/2022",
                expected:    Some((2022, 12, 1)),
                description: "day-first",
            },
            TestCase {
                pattern:     "M/D/YY",
                input:       "6/3/22",
                expected:    Some((2022, 6, 3)),
                description: "two-digit year after pivot",
            },
            TestCase {
                pattern:     "M/D/YY",
                input:       "6/3/69",
                expected:    Some((1969, 6, 3)),
                description: "two-digit year past pivot",
            },
            TestCase {
                pattern:     "M/D/YY",
                input:       "6/3/68",
                expected:    Some((2068, 6, 3)),
                description: "two-digit year at pivot",
            },
            TestCase {
                pattern:     "YYYYMMDD",
                input:       "20220606",
                expected:    Some((2022, 6, 6)),
                description: "no separators",
            },
            TestCase {
                pattern:     "YYYY[년] M[월] D[일]",
                input:       "2022년 6월 6일",
                expected:    Some((2022, 6, 6)),
                description: "escaped non-ascii literals",
            },
            TestCase {
                pattern:     "[Day] D, YYYY.M",
                input:       "Day 6, 2022.6",
                expected:    Some((2022, 6, 6)),
                description: "escaped field letters",
            },
        ];

        for case in &cases {
            let format = DateFormat::compile(case.pattern).unwrap();
            let expected = case.expected.map(|(y, m, d)| date(y, m, d));
            assert_eq!(format.try_parse(case.input).ok(), expected, "{}", case.description);
        }
    }

    #[test]
    fn test_try_parse_errors() {
        let format = DateFormat::compile(DOTTED).unwrap();

        assert!(matches!(format.try_parse(""), Err(ParseError::EmptyInput)));
        assert!(matches!(format.try_parse("   "), Err(ParseError::EmptyInput)));
        assert!(matches!(format.try_parse("2022.234"), Err(ParseError::Mismatch { .. })));
        assert!(matches!(
            format.try_parse("2021.2.29"),
            Err(ParseError::InvalidDate {
                year: 2021,
                month: 2,
                day: 29
            })
        ));
        assert!(format.try_parse("2020.2.29").is_ok());
    }

    #[test]
    fn test_mismatch_message_names_input_and_pattern() {
        let format = DateFormat::compile(DOTTED).unwrap();
        let err = format.try_parse("2022.234").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Input "2022.234" does not match pattern "YYYY.M.D""#
        );
    }

    #[test]
    fn test_parse_returns_invalid_marker() {
        let format = DateFormat::compile(DOTTED).unwrap();
        assert_eq!(format.parse("2022.6.6"), cal(2022, 6, 6));
        assert_eq!(format.parse("not a date"), CalendarDate::Invalid);
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(DateFormat::compile(""), Err(ParseError::InvalidPattern(_))));
        assert!(matches!(DateFormat::compile("YYY.M.D"), Err(ParseError::InvalidPattern(_))));
        assert!(matches!(DateFormat::compile("YYYY.MMM.D"), Err(ParseError::InvalidPattern(_))));
        assert!(matches!(DateFormat::compile("YYYY.M.D [oops"), Err(ParseError::InvalidPattern(_))));
        assert!(matches!(
            DateFormat::compile("YYYY.M"),
            Err(ParseError::MissingField { field: "day", .. })
        ));
        assert!(matches!(
            DateFormat::compile("M/D"),
            Err(ParseError::MissingField { field: "year", .. })
        ));
    }

    #[test]
    fn test_format() {
        let d = date(2022, 6, 6);
        assert_eq!(DateFormat::canonical().format(d), "2022-06-06");
        assert_eq!(DateFormat::compile(DOTTED).unwrap().format(d), "2022.6.6");
        assert_eq!(DateFormat::compile("DD/MM/YY").unwrap().format(d), "06/06/22");
        assert_eq!(DateFormat::compile("YYYY[년] M[월] D[일]").unwrap().format(d), "2022년 6월 6일");
    }

    #[test]
    fn test_format_then_parse_user_pattern() {
        let format = DateFormat::compile(DOTTED).unwrap();
        let d = date(2024, 2, 29);
        assert_eq!(format.try_parse(&format.format(d)), Ok(d));
    }

    #[test]
    fn test_method_form_uses_tagged_bounds() {
        let format = DateFormat::compile(DOTTED).unwrap();
        let bounds = DateRangeBounds::new(Bound::Absent, Bound::At(date(2022, 6, 12)));

        assert_eq!(format.parse_and_validate("2022.6.13", &bounds), None);
        assert_eq!(format.parse_and_validate("1900.1.1", &bounds), Some("1900-01-01".to_owned()));
    }

    #[test]
    fn test_canonical_string() {
        assert_eq!(to_canonical_string(date(2022, 12, 1)), "2022-12-01");
        assert_eq!(to_canonical_string(date(5, 1, 1)), "0005-01-01");
        assert_eq!(to_canonical_string(date(10000, 1, 1)), "+10000-01-01");
        assert_eq!(to_canonical_string(date(-1, 6, 6)), "-0001-06-06");
    }

    #[test]
    fn test_canonical_expanded_years() {
        let canonical = DateFormat::canonical();
        for d in [date(10000, 1, 1), date(-1, 6, 6), date(0, 1, 1), date(9999, 12, 31)] {
            let text = canonical.format(d);
            assert_eq!(text, to_canonical_string(d));
            assert_eq!(canonical.try_parse(&text), Ok(d), "{text}");
        }

        assert_eq!(canonical.try_parse("+2022-06-06"), Ok(date(2022, 6, 6)));
        assert!(matches!(canonical.try_parse("10000-01-01"), Err(ParseError::Mismatch { .. })));
        assert!(matches!(canonical.try_parse("+999-01-01"), Err(ParseError::Mismatch { .. })));
        assert!(matches!(
            canonical.try_parse("+999999-01-01"),
            Err(ParseError::InvalidDate { year: 999_999, .. })
        ));
    }

    #[test]
    fn test_unsigned_year_does_not_swallow_month() {
        let format = DateFormat::compile("YYYYMMDD").unwrap();
        assert_eq!(format.try_parse("20220606"), Ok(date(2022, 6, 6)));
    }

    #[test]
    fn test_from_str_and_display() {
        let format: DateFormat = DOTTED.parse().unwrap();
        assert_eq!(format.to_string(), DOTTED);
    }
}
