//! School-day calendar construction.
//!
//! Turns the school year definition and the class birthdays into the
//! sequence of school days the duty rotates over.
//!
//! # Stages
//!
//! 1. `build_calendar`: every day of the year plus the summer buffer,
//!    with birthdays on their exact dates.
//! 2. `relocate`: once per vacation window (summer, then the in-year
//!    vacations in declaration order), move birthdays out and drop the
//!    window.
//! 3. `drop_days_off`: remove weekends and homedays, carrying their
//!    birthdays to the previous free school day.
//!
//! After the last stage, every remaining day is a school day and every
//! child owns exactly one day: their (possibly relocated) birthday.

mod builder;
mod filter;
mod relocate;

pub use builder::build_calendar;
pub use filter::drop_days_off;
pub use relocate::relocate;

use tracing::info;

use crate::error::ScheduleError;
use crate::models::{AssignmentSequence, Birthday, SchoolCalendar};

/// Runs all three stages.
pub fn school_days(
    school: &SchoolCalendar,
    summer_length: u32,
    birthdays: &[Birthday],
) -> Result<AssignmentSequence, ScheduleError> {
    let mut sequence = build_calendar(school, summer_length, birthdays)?;
    for window in school.relocation_windows(summer_length) {
        info!(window = %window.name, "checking vacation birthdays");
        sequence = relocate(sequence, &window)?;
    }
    info!("checking weekends and homedays");
    drop_days_off(sequence, school)
}
