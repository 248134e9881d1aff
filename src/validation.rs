//! Input validation for snack calendars.
//!
//! Checks the class roster and the school calendar before any day is
//! laid out. Detects:
//! - Empty class
//! - Duplicate or unusable child names
//! - Two children sharing a birthday
//! - Inverted date ranges
//! - Vacations outside the school year or overlapping each other
//! - Birthdays outside the modelled span (year plus summer buffer)

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::{Birthday, SchoolCalendar};

/// Name written for unassigned days in calendar files.
pub const UNASSIGNED: &str = "None";

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No children given.
    EmptyClass,
    /// Two children share the same name.
    DuplicateName,
    /// A name that cannot be written to and read back from a calendar file.
    InvalidName,
    /// Two children share the same birthday date.
    DuplicateBirthday,
    /// A range ends before it starts.
    InvalidRange,
    /// A vacation is not inside the school year.
    VacationOutsideYear,
    /// Two vacations share a day.
    OverlappingVacations,
    /// A birthday is outside the modelled span.
    BirthdayOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the roster and calendar.
///
/// Checks:
/// 1. At least one child
/// 2. No duplicate names; names are non-empty, trimmed, single-line
///    and not the unassigned marker
/// 3. No two birthdays on the same date
/// 4. School year and vacations are not inverted
/// 5. Vacations lie inside the school year and do not overlap
/// 6. Birthdays lie between the first school day and the end of the
///    summer buffer
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    school: &SchoolCalendar,
    birthdays: &[Birthday],
    summer_length: u32,
) -> ValidationResult {
    let mut errors = Vec::new();

    if birthdays.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyClass,
            "No children to schedule",
        ));
    }

    // Names
    let mut names = HashSet::new();
    for b in birthdays {
        if !names.insert(b.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate child name: {}", b.name),
            ));
        }
        if !is_valid_name(&b.name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidName,
                format!("Invalid child name: {:?}", b.name),
            ));
        }
    }

    // Birthday dates
    let mut by_date: HashMap<_, &str> = HashMap::new();
    for b in birthdays {
        if let Some(first) = by_date.insert(b.date, b.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateBirthday,
                format!("{} and {} share birthday {}", first, b.name, b.date),
            ));
        }
    }

    // Ranges
    let year_ok = school.start <= school.end;
    if !year_ok {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRange,
            format!(
                "School year ends ({}) before it starts ({})",
                school.end, school.start
            ),
        ));
    }
    for v in &school.vacations {
        if v.end < v.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRange,
                format!("Vacation '{}' ends ({}) before it starts ({})", v.name, v.end, v.start),
            ));
        } else if year_ok && (v.start < school.start || v.end > school.end) {
            errors.push(ValidationError::new(
                ValidationErrorKind::VacationOutsideYear,
                format!(
                    "Vacation '{}' ({} to {}) is outside the school year",
                    v.name, v.start, v.end
                ),
            ));
        }
    }
    for (i, a) in school.vacations.iter().enumerate() {
        for b in &school.vacations[i + 1..] {
            if a.start <= a.end && b.start <= b.end && a.overlaps(b) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OverlappingVacations,
                    format!("Vacations '{}' and '{}' overlap", a.name, b.name),
                ));
            }
        }
    }

    // Birthdays inside the modelled span
    if year_ok {
        let last = school.modelled_end(summer_length);
        for b in birthdays {
            if b.date < school.start || b.date > last {
                errors.push(ValidationError::new(
                    ValidationErrorKind::BirthdayOutOfRange,
                    format!(
                        "Birthday of {} ({}) is outside {} to {}",
                        b.name, b.date, school.start, last
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Whether a name survives the `date: name` calendar file format.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != UNASSIGNED
        && name.trim() == name
        && !name.chars().any(char::is_control)
}
