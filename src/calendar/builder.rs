//! Calendar builder.
//!
//! Lays out every calendar day from the first school day through the
//! end of the summer buffer and marks each birthday on its exact date.
//! Vacations, weekends and homedays are still present at this point;
//! the relocator and the day-off filter remove them later.

use tracing::{debug, error};

use crate::error::ScheduleError;
use crate::models::{AssignmentSequence, Birthday, SchoolCalendar};

/// Builds the full-span sequence with birthdays placed.
///
/// # Errors
/// - `InvalidRange` if the school year ends before it starts.
/// - `BirthdayOutOfRange` if a birthday lies outside the modelled span.
/// - `DuplicateBirthday` if two children share a date. The first child
///   in date-then-name order is the one reported as already placed.
pub fn build_calendar(
    school: &SchoolCalendar,
    summer_length: u32,
    birthdays: &[Birthday],
) -> Result<AssignmentSequence, ScheduleError> {
    if school.end < school.start {
        return Err(ScheduleError::InvalidRange {
            name: "school_year".into(),
            start: school.start,
            end: school.end,
        });
    }

    let mut sequence = AssignmentSequence::span(school.start, school.modelled_end(summer_length));

    let mut ordered: Vec<&Birthday> = birthdays.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));

    for birthday in ordered {
        let slot =
            sequence
                .position(birthday.date)
                .ok_or_else(|| ScheduleError::BirthdayOutOfRange {
                    name: birthday.name.clone(),
                    date: birthday.date,
                })?;
        if !sequence.claim(slot, &birthday.name) {
            let first = sequence.owner(slot).unwrap_or_default().to_string();
            error!(date = %birthday.date, %first, second = %birthday.name, "two birthdays on the same date");
            return Err(ScheduleError::DuplicateBirthday {
                date: birthday.date,
                first,
                second: birthday.name.clone(),
            });
        }
        debug!(child = %birthday.name, date = %birthday.date, slot, "birthday placed");
    }

    Ok(sequence)
}
