/// Days in one grid row
pub const DAYS_PER_WEEK: usize = 7;

/// Rows in a month grid
pub const GRID_ROWS: usize = 6;

/// Cells in a month grid, fixed regardless of month length
pub const CALENDAR_DATES_SIZE: usize = DAYS_PER_WEEK * GRID_ROWS;

/// Months in a year
pub const MONTHS_PER_YEAR: u8 = 12;

/// Highest zero-based month index (December)
pub const MAX_MONTH_INDEX: u8 = MONTHS_PER_YEAR - 1;

/// Canonical pattern every emitted date string uses
pub const CANONICAL_FORMAT: &str = "YYYY-MM-DD";

/// Pattern the input widget accepts when none is configured
pub const DEFAULT_INPUT_FORMAT: &str = "YYYY.M.D";

/// Two-digit years above this pivot land in the 1900s, the rest in the 2000s
pub const TWO_DIGIT_YEAR_PIVOT: u16 = 68;

/// Most digits a signed `YYYY` year may carry; chrono tops out at six
pub const MAX_EXPANDED_YEAR_DIGITS: usize = 6;

/// Separates the lower and upper bound in the string form of a range
pub const RANGE_SEPARATOR: char = '/';

/// Display form of a date that failed to parse
pub const INVALID_DATE_TEXT: &str = "Invalid Date";
