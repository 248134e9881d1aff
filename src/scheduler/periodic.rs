//! Periodic slot assignment.
//!
//! # Algorithm
//! For each child, latest birthday first:
//! 1. Start at the phase-corrected slot; the birthday already counts as
//!    one day.
//! 2. Step forward by the class size while the next slot is in range
//!    and the child is below `⌈days / n⌉`. Claim free slots; record
//!    occupied ones as conflicts.
//! 3. Step backward from the start slot the same way.
//!
//! Conflicts are left for the collision resolver.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use super::phase::PhaseCorrection;
use super::tally::fair_share;
use crate::models::AssignmentSequence;

/// Slots a child wanted but found already taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictRegistry {
    slots: BTreeMap<String, Vec<usize>>,
}

impl ConflictRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a conflicted slot for a child.
    pub fn record(&mut self, name: &str, slot: usize) {
        self.slots.entry(name.to_string()).or_default().push(slot);
    }

    /// Conflicted slots of a child, in recording order.
    pub fn slots_for(&self, name: &str) -> &[usize] {
        self.slots.get(name).map_or(&[], Vec::as_slice)
    }

    /// Removes and returns a child's conflicted slots.
    pub fn take(&mut self, name: &str) -> Vec<usize> {
        self.slots.remove(name).unwrap_or_default()
    }

    /// Puts back slots that are still unresolved.
    pub fn restore(&mut self, name: &str, slots: Vec<usize>) {
        if !slots.is_empty() {
            self.slots.entry(name.to_string()).or_default().extend(slots);
        }
    }

    /// Whether no conflicts are recorded.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total number of conflicted slots.
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Children with at least one conflict, by name.
    pub fn children(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// All entries, by child name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Claims periodic slots for every child.
///
/// `plan` must list every child of the class, in birthday-slot order,
/// as produced by [`correct_phases`](super::correct_phases).
pub fn assign_periodic(
    sequence: &mut AssignmentSequence,
    plan: &[PhaseCorrection],
) -> ConflictRegistry {
    let class_size = plan.len();
    let len = sequence.len();
    let mut conflicts = ConflictRegistry::new();
    if class_size == 0 {
        return conflicts;
    }
    let max_slots = fair_share(len, class_size);

    for child in plan.iter().rev() {
        let name = child.name.as_str();
        let start = child.start_slot();
        let mut count = 1;

        let mut slot = start;
        while slot + class_size < len && count < max_slots {
            slot += class_size;
            step(sequence, &mut conflicts, name, slot, &mut count);
        }

        let mut slot = start;
        while slot >= class_size && count < max_slots {
            slot -= class_size;
            step(sequence, &mut conflicts, name, slot, &mut count);
        }

        debug!(child = %name, start, assigned = count, wanted = max_slots, "periodic slots assigned");
    }

    info!(conflicts = conflicts.len(), "periodic assignment done");
    conflicts
}

fn step(
    sequence: &mut AssignmentSequence,
    conflicts: &mut ConflictRegistry,
    name: &str,
    slot: usize,
    count: &mut usize,
) {
    if sequence.claim(slot, name) {
        *count += 1;
    } else {
        debug!(child = %name, slot, holder = ?sequence.owner(slot), "slot taken");
        conflicts.record(name, slot);
    }
}
