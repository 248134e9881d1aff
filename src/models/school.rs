//! School year calendar: year bounds, vacations and homedays.
//!
//! The modelled span runs from the first school day to the last school
//! day plus a summer buffer. Summer is itself treated as a vacation
//! window (all birthdays before) so summer birthdays land at the end of
//! the school year.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::VacationWindow;

/// Default summer buffer in days. Must cover the actual summer break.
pub const DEFAULT_SUMMER_LENGTH: u32 = 60;

/// School year definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolCalendar {
    /// First school day.
    pub start: NaiveDate,
    /// Last school day before summer.
    pub end: NaiveDate,
    /// Vacations inside the year, relocated in this order after summer.
    pub vacations: Vec<VacationWindow>,
    /// Ad-hoc non-school weekdays.
    pub homedays: BTreeSet<NaiveDate>,
}

impl SchoolCalendar {
    /// Creates a calendar with no vacations or homedays.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            vacations: Vec::new(),
            homedays: BTreeSet::new(),
        }
    }

    /// Adds a vacation window.
    pub fn with_vacation(mut self, window: VacationWindow) -> Self {
        self.vacations.push(window);
        self
    }

    /// Adds a homeday.
    pub fn with_homeday(mut self, date: NaiveDate) -> Self {
        self.homedays.insert(date);
        self
    }

    /// Adds several homedays.
    pub fn with_homedays(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.homedays.extend(dates);
        self
    }

    /// Last modelled day: year end plus the summer buffer.
    pub fn modelled_end(&self, summer_length: u32) -> NaiveDate {
        self.end
            .checked_add_days(Days::new(u64::from(summer_length)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Summer window: the day after the year end through the buffer end.
    pub fn summer(&self, summer_length: u32) -> VacationWindow {
        let start = self.end.succ_opt().unwrap_or(self.end);
        VacationWindow::all_before("summer", start, self.modelled_end(summer_length))
    }

    /// Windows in relocation order: summer first, then the vacations.
    pub fn relocation_windows(&self, summer_length: u32) -> Vec<VacationWindow> {
        let mut windows = Vec::with_capacity(self.vacations.len() + 1);
        if summer_length > 0 {
            windows.push(self.summer(summer_length));
        }
        windows.extend(self.vacations.iter().cloned());
        windows
    }

    /// Whether `date` is an explicit homeday.
    #[inline]
    pub fn is_homeday(&self, date: NaiveDate) -> bool {
        self.homedays.contains(&date)
    }

    /// Whether `date` is a weekend day or a homeday.
    pub fn is_day_off(&self, date: NaiveDate) -> bool {
        is_weekend(date) || self.is_homeday(date)
    }

    /// Whether `date` is a school day: inside the year, not a weekend,
    /// not a homeday and not inside any vacation.
    pub fn is_school_day(&self, date: NaiveDate) -> bool {
        date >= self.start
            && date <= self.end
            && !self.is_day_off(date)
            && !self.vacations.iter().any(|v| v.contains(date))
    }
}

/// Saturday or Sunday.
#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelocationPolicy;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample() -> SchoolCalendar {
        SchoolCalendar::new(date("2024-08-26"), date("2025-07-04"))
            .with_vacation(VacationWindow::new(
                "all_saints",
                date("2024-10-19"),
                date("2024-11-03"),
            ))
            .with_homeday(date("2024-09-27"))
    }

    #[test]
    fn test_summer_window() {
        let cal = sample();
        let summer = cal.summer(60);
        assert_eq!(summer.start, date("2025-07-05"));
        assert_eq!(summer.end, date("2025-09-02"));
        assert_eq!(summer.len_days(), 60);
        assert_eq!(summer.policy, RelocationPolicy::AllBefore);
    }

    #[test]
    fn test_relocation_order_summer_first() {
        let names: Vec<String> = sample()
            .relocation_windows(60)
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["summer", "all_saints"]);
    }

    #[test]
    fn test_school_day() {
        let cal = sample();
        assert!(cal.is_school_day(date("2024-09-02"))); // Monday
        assert!(!cal.is_school_day(date("2024-09-01"))); // Sunday
        assert!(!cal.is_school_day(date("2024-09-27"))); // homeday
        assert!(!cal.is_school_day(date("2024-10-23"))); // all saints
        assert!(!cal.is_school_day(date("2025-07-07"))); // summer
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date("2024-08-31")));
        assert!(is_weekend(date("2024-09-01")));
        assert!(!is_weekend(date("2024-08-30")));
    }
}
