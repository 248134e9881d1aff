//! Weekend and homeday filter.
//!
//! A single backward pass keeps only school days. Birthdays found on a
//! dropped day are queued and handed, oldest first, to the next free
//! school day met while walking back in time.

use std::collections::VecDeque;

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::error::ScheduleError;
use crate::models::{AssignmentSequence, Day, SchoolCalendar};

/// Drops weekends and homedays, carrying their birthdays back.
///
/// # Errors
/// `NoSchoolDayBefore` if a displaced birthday reaches the start of the
/// sequence without finding a free school day.
pub fn drop_days_off(
    sequence: AssignmentSequence,
    school: &SchoolCalendar,
) -> Result<AssignmentSequence, ScheduleError> {
    let mut pending: VecDeque<(String, NaiveDate)> = VecDeque::new();
    let mut kept: Vec<Day> = Vec::with_capacity(sequence.len());

    for mut day in sequence.into_days().into_iter().rev() {
        if school.is_day_off(day.date) {
            if let Some(name) = day.owner.take() {
                debug!(child = %name, date = %day.date, "birthday on a day off");
                pending.push_back((name, day.date));
                if pending.len() > 1 {
                    error!(
                        waiting = pending.len(),
                        date = %day.date,
                        "several displaced birthdays compete for the same school day"
                    );
                }
            }
            continue;
        }
        if day.is_free() {
            if let Some((name, from)) = pending.pop_front() {
                debug!(child = %name, %from, to = %day.date, "birthday carried back");
                day.owner = Some(name);
            }
        }
        kept.push(day);
    }

    if let Some((name, date)) = pending.pop_front() {
        return Err(ScheduleError::NoSchoolDayBefore { name, date });
    }

    kept.reverse();
    AssignmentSequence::from_days(kept)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::models::is_weekend;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs the filter and returns what was logged at error level.
    fn errors_logged(seq: AssignmentSequence, school: &SchoolCalendar) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::ERROR)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || drop_days_off(seq, school).unwrap());
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn owner_on(seq: &AssignmentSequence, d: &str) -> Option<String> {
        seq.position(date(d))
            .and_then(|slot| seq.owner(slot))
            .map(str::to_owned)
    }

    fn with_birthdays(start: &str, end: &str, birthdays: &[(&str, &str)]) -> AssignmentSequence {
        let mut seq = AssignmentSequence::span(date(start), date(end));
        for (d, name) in birthdays {
            let slot = seq.position(date(d)).unwrap();
            assert!(seq.claim(slot, name));
        }
        seq
    }

    #[test]
    fn test_sunday_birthday_moves_to_friday() {
        let school = SchoolCalendar::new(date("2024-08-26"), date("2024-09-13"));
        let seq = with_birthdays(
            "2024-08-26",
            "2024-09-13",
            &[("2024-09-01", "Ann"), ("2024-09-02", "Bob")],
        );
        let seq = drop_days_off(seq, &school).unwrap();

        assert_eq!(owner_on(&seq, "2024-08-30").as_deref(), Some("Ann"));
        assert_eq!(owner_on(&seq, "2024-09-02").as_deref(), Some("Bob"));
        assert_eq!(seq.len(), 15);
        assert!(seq.days().iter().all(|d| !is_weekend(d.date)));
    }

    #[test]
    fn test_homeday_dropped() {
        let school = SchoolCalendar::new(date("2024-09-23"), date("2024-09-30"))
            .with_homeday(date("2024-09-27"));
        let seq = with_birthdays("2024-09-23", "2024-09-30", &[("2024-09-27", "Ann")]);
        let seq = drop_days_off(seq, &school).unwrap();

        assert_eq!(seq.position(date("2024-09-27")), None);
        assert_eq!(owner_on(&seq, "2024-09-26").as_deref(), Some("Ann"));
    }

    #[test]
    fn test_both_weekend_days_queue_in_order() {
        // Sunday is met first walking back, so it takes Friday
        let school = SchoolCalendar::new(date("2024-09-02"), date("2024-09-13"));
        let seq = with_birthdays(
            "2024-09-02",
            "2024-09-13",
            &[("2024-09-07", "Sat"), ("2024-09-08", "Sun")],
        );
        let seq = drop_days_off(seq, &school).unwrap();

        assert_eq!(owner_on(&seq, "2024-09-06").as_deref(), Some("Sun"));
        assert_eq!(owner_on(&seq, "2024-09-05").as_deref(), Some("Sat"));
    }

    #[test]
    fn test_both_weekend_days_logged_as_error() {
        let school = SchoolCalendar::new(date("2024-09-02"), date("2024-09-13"));
        let both = with_birthdays(
            "2024-09-02",
            "2024-09-13",
            &[("2024-09-07", "Sat"), ("2024-09-08", "Sun")],
        );
        let logged = errors_logged(both, &school);
        assert!(logged.contains("ERROR"), "{logged}");
        assert!(logged.contains("several displaced birthdays"), "{logged}");

        let single = with_birthdays("2024-09-02", "2024-09-13", &[("2024-09-08", "Sun")]);
        assert_eq!(errors_logged(single, &school), "");
    }

    #[test]
    fn test_occupied_friday_passes_to_thursday() {
        let school = SchoolCalendar::new(date("2024-09-02"), date("2024-09-13"));
        let seq = with_birthdays(
            "2024-09-02",
            "2024-09-13",
            &[("2024-09-06", "Fri"), ("2024-09-08", "Sun")],
        );
        let seq = drop_days_off(seq, &school).unwrap();

        assert_eq!(owner_on(&seq, "2024-09-06").as_deref(), Some("Fri"));
        assert_eq!(owner_on(&seq, "2024-09-05").as_deref(), Some("Sun"));
    }

    #[test]
    fn test_no_school_day_before() {
        let school = SchoolCalendar::new(date("2024-08-31"), date("2024-09-13"));
        let seq = with_birthdays("2024-08-31", "2024-09-13", &[("2024-08-31", "Ann")]);
        let err = drop_days_off(seq, &school).unwrap_err();
        assert!(matches!(err, ScheduleError::NoSchoolDayBefore { .. }));
    }
}
