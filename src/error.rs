//! Error types for the snack-schedule crate.

use chrono::NaiveDate;

use crate::validation::ValidationError;

/// Error type for all fallible operations in the snack-schedule crate.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Returned when two children share a birthday date.
    #[error("birthday {date} is claimed by both {first} and {second}")]
    DuplicateBirthday {
        /// The shared date.
        date: NaiveDate,
        /// Child already placed on the date.
        first: String,
        /// Child that could not be placed.
        second: String,
    },

    /// Returned when input validation finds problems.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Returned when there are no children to schedule.
    #[error("no children to schedule")]
    EmptyClass,

    /// Returned when a date range ends before it starts.
    #[error("range {name} ends ({end}) before it starts ({start})")]
    InvalidRange {
        /// Range name.
        name: String,
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
    },

    /// Returned when a birthday lies outside the modelled span.
    #[error("birthday of {name} ({date}) is outside the modelled calendar")]
    BirthdayOutOfRange {
        /// Child name.
        name: String,
        /// Birthday date.
        date: NaiveDate,
    },

    /// Returned when a vacation window is not fully inside the sequence.
    #[error("vacation {window} is not inside the modelled calendar")]
    VacationOutOfRange {
        /// Window name.
        window: String,
    },

    /// Returned when relocating a birthday runs past either end of the calendar.
    #[error("no free school day left to relocate {child} out of vacation {window}")]
    VacationBoundaryOverrun {
        /// Window name.
        window: String,
        /// Child being relocated.
        child: String,
    },

    /// Returned when a weekend or homeday birthday has no earlier school day.
    #[error("no school day before {date} to carry the birthday of {name}")]
    NoSchoolDayBefore {
        /// Child name.
        name: String,
        /// Birthday date that fell on a day off.
        date: NaiveDate,
    },

    /// Returned when a child's birthday was lost before phase correction.
    #[error("birthday of {name} is missing from the school-day sequence")]
    MissingBirthday {
        /// Child name.
        name: String,
    },

    /// Returned when days are not in strictly increasing date order.
    #[error("day {date} does not come after {previous}")]
    UnorderedDays {
        /// Date of the day before.
        previous: NaiveDate,
        /// Out-of-order date.
        date: NaiveDate,
    },

    /// Returned when a calendar file line cannot be parsed.
    #[error("line {line}: malformed calendar entry {content:?}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// Offending line.
        content: String,
    },

    /// Returned when reading or writing a calendar file fails.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_duplicate_birthday_message() {
        let e = ScheduleError::DuplicateBirthday {
            date: date("2024-09-10"),
            first: "Ann".into(),
            second: "Bob".into(),
        };
        assert_eq!(
            e.to_string(),
            "birthday 2024-09-10 is claimed by both Ann and Bob"
        );
    }

    #[test]
    fn test_boundary_overrun_message() {
        let e = ScheduleError::VacationBoundaryOverrun {
            window: "winter".into(),
            child: "Ann".into(),
        };
        assert_eq!(
            e.to_string(),
            "no free school day left to relocate Ann out of vacation winter"
        );
    }

    #[test]
    fn test_malformed_line_message() {
        let e = ScheduleError::MalformedLine {
            line: 3,
            content: "garbage".into(),
        };
        assert_eq!(e.to_string(), "line 3: malformed calendar entry \"garbage\"");
    }

    #[test]
    fn test_unordered_days_message() {
        let e = ScheduleError::UnorderedDays {
            previous: date("2024-09-05"),
            date: date("2024-09-01"),
        };
        assert_eq!(e.to_string(), "day 2024-09-01 does not come after 2024-09-05");
    }

    #[test]
    fn test_invalid_input_lists_all() {
        let e = ScheduleError::InvalidInput(vec![
            ValidationError {
                kind: ValidationErrorKind::EmptyClass,
                message: "No children to schedule".into(),
            },
            ValidationError {
                kind: ValidationErrorKind::InvalidRange,
                message: "School year ends before it starts".into(),
            },
        ]);
        assert_eq!(
            e.to_string(),
            "invalid input: No children to schedule; School year ends before it starts"
        );
    }

    #[test]
    fn test_is_std_error() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<ScheduleError>();
    }
}
