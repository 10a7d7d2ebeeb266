//! Core abstractions for quicktask.
//!
//! This module provides the clock and date arithmetic shared by the parser
//! and the ingestion boundary.

pub mod clock;
mod datetime;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{
    days_ahead, days_until, end_of_today, end_of_week, next_weekday, to_iso_millis, weekday_in,
    WEEKDAY_NAMES,
};
