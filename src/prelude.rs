//! Prelude module for date_picker_core crate.
//!
//! Re-exports commonly used derive macros from derive_more and the chrono
//! traits most modules lean on.

#[allow(unused_imports)]
pub use derive_more::{Deref, Display, From, FromStr, Into, TryInto};

#[allow(unused_imports)]
pub use chrono::{Datelike, NaiveDate, Weekday};
