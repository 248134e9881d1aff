//! Calendar day and assignment sequence models.
//!
//! The assignment sequence is the single piece of state threaded through
//! the whole pipeline: built once by the calendar builder, pruned by the
//! vacation relocator and the weekend filter, then filled in place by
//! the schedulers.
//!
//! # Invariants
//! - Days are strictly increasing by date.
//! - A day has at most one owner.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// A calendar date with an optional duty owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Calendar date.
    pub date: NaiveDate,
    /// Child holding the duty on this day (`None` = unassigned).
    pub owner: Option<String>,
}

impl Day {
    /// Creates an unassigned day.
    pub fn new(date: NaiveDate) -> Self {
        Self { date, owner: None }
    }

    /// Sets the owner.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Whether nobody holds this day.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    /// Whether `name` holds this day.
    #[inline]
    pub fn is_owned_by(&self, name: &str) -> bool {
        self.owner.as_deref() == Some(name)
    }
}

/// Ordered sequence of days with their owners.
///
/// Slots are indices into this sequence. Index arithmetic (periodic
/// stepping, local search) is done on slots, never on dates, so the
/// sequence only ever holds the days still eligible at the current stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSequence")]
pub struct AssignmentSequence {
    days: Vec<Day>,
}

#[derive(Deserialize)]
struct RawSequence {
    days: Vec<Day>,
}

impl TryFrom<RawSequence> for AssignmentSequence {
    type Error = ScheduleError;

    fn try_from(raw: RawSequence) -> Result<Self, Self::Error> {
        Self::from_days(raw.days)
    }
}

impl AssignmentSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence from days in chronological order.
    ///
    /// # Errors
    /// `UnorderedDays` if a date does not come strictly after the one
    /// before it.
    pub fn from_days(days: Vec<Day>) -> Result<Self, ScheduleError> {
        if let Some(w) = days.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(ScheduleError::UnorderedDays {
                previous: w[0].date,
                date: w[1].date,
            });
        }
        Ok(Self { days })
    }

    /// Unassigned days covering `start..=end`.
    pub fn span(start: NaiveDate, end: NaiveDate) -> Self {
        let days = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(Day::new)
            .collect();
        Self { days }
    }

    /// Number of days.
    #[inline]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the sequence has no days.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// All days in order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Consumes the sequence, returning its days.
    pub fn into_days(self) -> Vec<Day> {
        self.days
    }

    /// Day at a slot.
    pub fn get(&self, slot: usize) -> Option<&Day> {
        self.days.get(slot)
    }

    /// Owner at a slot.
    pub fn owner(&self, slot: usize) -> Option<&str> {
        self.days.get(slot).and_then(|d| d.owner.as_deref())
    }

    /// Whether the slot exists and is unassigned.
    #[inline]
    pub fn is_free(&self, slot: usize) -> bool {
        self.days.get(slot).is_some_and(Day::is_free)
    }

    /// Assigns `name` to a free slot.
    ///
    /// Returns `false` (and changes nothing) if the slot is out of range
    /// or already owned.
    pub fn claim(&mut self, slot: usize, name: &str) -> bool {
        match self.days.get_mut(slot) {
            Some(day) if day.is_free() => {
                day.owner = Some(name.to_string());
                true
            }
            _ => false,
        }
    }

    /// Slot holding `date`, if present.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.days.binary_search_by_key(&date, |d| d.date).ok()
    }

    /// First slot owned by `name`.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.days.iter().position(|d| d.is_owned_by(name))
    }

    /// Number of days owned by `name`.
    pub fn count_for(&self, name: &str) -> usize {
        self.days.iter().filter(|d| d.is_owned_by(name)).count()
    }

    /// Number of unassigned days.
    pub fn free_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_free()).count()
    }

    /// Owners in order of first appearance, each listed once.
    pub fn owners(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for name in self.days.iter().filter_map(|d| d.owner.as_deref()) {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }

    /// Removes the slots in `range`, keeping order.
    pub(crate) fn remove_range(&mut self, range: std::ops::Range<usize>) {
        self.days.drain(range);
    }
}
