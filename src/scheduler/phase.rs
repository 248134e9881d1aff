//! Phase correction.
//!
//! Each child's periodic slots are `start + k * n` for class size `n`,
//! so a child's phase is its start slot modulo `n`. Birthdays cluster,
//! which would make phases collide. The corrector ranks children by
//! the natural phase of their birthday slot and gives each child its
//! rank as target phase, so the targets are exactly `0..n`.
//!
//! # Algorithm
//! 1. `natural = birthday_slot % n`
//! 2. Stable sort by `natural` (ties keep birthday order).
//! 3. `target = rank`, `correction = target - natural`.
//!
//! The start slot `birthday_slot + correction` is never negative: it
//! equals `birthday_slot - natural + target`.

use serde::Serialize;
use tracing::debug;

use crate::error::ScheduleError;
use crate::models::AssignmentSequence;

/// Phase correction for one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseCorrection {
    /// Child name.
    pub name: String,
    /// Slot of the child's birthday in the school-day sequence.
    pub birthday_slot: usize,
    /// `birthday_slot % class_size`.
    pub natural_phase: usize,
    /// Assigned phase, unique per child.
    pub target_phase: usize,
}

impl PhaseCorrection {
    /// Signed offset added to the birthday slot.
    pub fn correction(&self) -> isize {
        self.target_phase as isize - self.natural_phase as isize
    }

    /// Slot the periodic stepping starts from.
    pub fn start_slot(&self) -> usize {
        self.birthday_slot - self.natural_phase + self.target_phase
    }
}

/// Computes phase corrections, returned in birthday-slot order.
///
/// # Errors
/// - `EmptyClass` if `children` is empty.
/// - `MissingBirthday` if a child owns no day in the sequence.
pub fn correct_phases(
    sequence: &AssignmentSequence,
    children: &[String],
) -> Result<Vec<PhaseCorrection>, ScheduleError> {
    let class_size = children.len();
    if class_size == 0 {
        return Err(ScheduleError::EmptyClass);
    }

    let mut corrections = children
        .iter()
        .map(|name| {
            let birthday_slot =
                sequence
                    .slot_of(name)
                    .ok_or_else(|| ScheduleError::MissingBirthday {
                        name: name.clone(),
                    })?;
            Ok(PhaseCorrection {
                name: name.clone(),
                birthday_slot,
                natural_phase: birthday_slot % class_size,
                target_phase: 0,
            })
        })
        .collect::<Result<Vec<_>, ScheduleError>>()?;
    corrections.sort_by_key(|c| c.birthday_slot);

    let mut ranking: Vec<usize> = (0..class_size).collect();
    ranking.sort_by_key(|&i| corrections[i].natural_phase);
    for (rank, &i) in ranking.iter().enumerate() {
        corrections[i].target_phase = rank;
    }

    for c in &corrections {
        debug!(
            child = %c.name,
            slot = c.birthday_slot,
            natural = c.natural_phase,
            target = c.target_phase,
            correction = c.correction(),
            "phase corrected"
        );
    }

    Ok(corrections)
}
