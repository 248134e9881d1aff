//! Vacation windows and their birthday relocation policy.
//!
//! # Midpoint rule
//! For a window of `len` days, the first half is offsets `0..=mid` where
//! `mid = len / 2` when `len > 9`, otherwise `mid = len - 1` (a short
//! break sends everything before it).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Windows of this many days or fewer relocate every birthday before them.
pub const SHORT_WINDOW_DAYS: usize = 9;

/// Where birthdays inside a vacation are moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelocationPolicy {
    /// Every birthday moves to the school days before the window.
    AllBefore,
    /// First half moves before, second half moves after.
    SplitAtMidpoint,
}

/// An inclusive range of non-school days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationWindow {
    /// Window name, used in diagnostics.
    pub name: String,
    /// First vacation day (inclusive).
    pub start: NaiveDate,
    /// Last vacation day (inclusive).
    pub end: NaiveDate,
    /// Relocation policy.
    pub policy: RelocationPolicy,
}

impl VacationWindow {
    /// Creates a window with the split-at-midpoint policy.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            policy: RelocationPolicy::SplitAtMidpoint,
        }
    }

    /// Creates a window that sends every birthday before it.
    pub fn all_before(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(name, start, end).with_policy(RelocationPolicy::AllBefore)
    }

    /// Sets the relocation policy.
    pub fn with_policy(mut self, policy: RelocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of days in the window (0 if inverted).
    pub fn len_days(&self) -> usize {
        let days = (self.end - self.start).num_days() + 1;
        usize::try_from(days).unwrap_or(0)
    }

    /// Whether the window is longer than a short break.
    #[inline]
    pub fn is_long(&self) -> bool {
        self.len_days() > SHORT_WINDOW_DAYS
    }

    /// Last offset belonging to the first half.
    pub fn midpoint(&self) -> usize {
        let len = self.len_days();
        if len > SHORT_WINDOW_DAYS {
            len / 2
        } else {
            len.saturating_sub(1)
        }
    }

    /// Whether birthdays in the second half move after the window.
    pub fn splits(&self) -> bool {
        self.policy == RelocationPolicy::SplitAtMidpoint && self.is_long()
    }

    /// Whether `date` falls inside the window.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether two windows share a day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_len_inclusive() {
        let w = VacationWindow::new("all_saints", date("2024-10-19"), date("2024-11-03"));
        assert_eq!(w.len_days(), 16);
        assert!(w.contains(date("2024-10-19")));
        assert!(w.contains(date("2024-11-03")));
        assert!(!w.contains(date("2024-11-04")));
    }

    #[test]
    fn test_midpoint_long_window() {
        let w = VacationWindow::new("winter", date("2024-12-21"), date("2025-01-05"));
        assert_eq!(w.midpoint(), 8);
        assert!(w.splits());
    }

    #[test]
    fn test_midpoint_short_window() {
        // 5 days: every offset belongs to the first half
        let w = VacationWindow::new("break", date("2024-10-21"), date("2024-10-25"));
        assert_eq!(w.midpoint(), 4);
        assert!(!w.is_long());
        assert!(!w.splits());
    }

    #[test]
    fn test_nine_days_is_short() {
        let w = VacationWindow::new("break", date("2024-10-19"), date("2024-10-27"));
        assert_eq!(w.len_days(), 9);
        assert_eq!(w.midpoint(), 8);
        assert!(!w.splits());
    }

    #[test]
    fn test_all_before_never_splits() {
        let w = VacationWindow::all_before("summer", date("2025-07-05"), date("2025-09-02"));
        assert!(w.is_long());
        assert!(!w.splits());
    }

    #[test]
    fn test_overlaps() {
        let a = VacationWindow::new("a", date("2024-10-19"), date("2024-11-03"));
        let b = VacationWindow::new("b", date("2024-11-03"), date("2024-11-10"));
        let c = VacationWindow::new("c", date("2024-11-04"), date("2024-11-10"));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
