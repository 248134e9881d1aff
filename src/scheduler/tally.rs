//! Per-child duty tallies.
//!
//! Computes how the days of a sequence are spread over the children.
//! Used for the checkpoint reports and for the resolver's
//! least-served-first ordering.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | count | Days owned by the child |
//! | slots | Slot indices of those days, ascending |
//! | min_gap | Smallest distance between two consecutive owned slots |
//! | unassigned | Days without an owner |

use serde::Serialize;

use crate::models::AssignmentSequence;

/// Ideal number of days per child: `⌈days / class_size⌉`.
pub fn fair_share(days: usize, class_size: usize) -> usize {
    if class_size == 0 {
        return 0;
    }
    days.div_ceil(class_size)
}

/// Guaranteed number of days per child: `⌊days / class_size⌋`.
pub fn minimum_share(days: usize, class_size: usize) -> usize {
    if class_size == 0 {
        return 0;
    }
    days / class_size
}

/// Tally for a single owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerTally {
    /// Child name.
    pub owner: String,
    /// Number of owned days.
    pub count: usize,
    /// Owned slots, ascending.
    pub slots: Vec<usize>,
    /// Smallest gap between consecutive owned slots (`None` with one day).
    pub min_gap: Option<usize>,
}

/// Tally of a whole sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Owners in order of first appearance.
    pub owners: Vec<OwnerTally>,
    /// Days without an owner.
    pub unassigned: usize,
    /// Total days in the sequence.
    pub total_days: usize,
}

impl Tally {
    /// Tallies a sequence.
    pub fn calculate(sequence: &AssignmentSequence) -> Self {
        let mut owners: Vec<OwnerTally> = Vec::new();
        let mut unassigned = 0;

        for (slot, day) in sequence.days().iter().enumerate() {
            let Some(name) = day.owner.as_deref() else {
                unassigned += 1;
                continue;
            };
            match owners.iter_mut().find(|t| t.owner == name) {
                Some(entry) => {
                    if let Some(&prev) = entry.slots.last() {
                        let gap = slot - prev;
                        entry.min_gap = Some(entry.min_gap.map_or(gap, |g| g.min(gap)));
                    }
                    entry.count += 1;
                    entry.slots.push(slot);
                }
                None => owners.push(OwnerTally {
                    owner: name.to_string(),
                    count: 1,
                    slots: vec![slot],
                    min_gap: None,
                }),
            }
        }

        Self {
            owners,
            unassigned,
            total_days: sequence.len(),
        }
    }

    /// Tally entry for a child.
    pub fn get(&self, name: &str) -> Option<&OwnerTally> {
        self.owners.iter().find(|t| t.owner == name)
    }

    /// Days owned by a child (0 if absent).
    pub fn count(&self, name: &str) -> usize {
        self.get(name).map_or(0, |t| t.count)
    }

    /// Owners sorted by ascending count; ties keep first-appearance order.
    pub fn ascending_by_count(&self) -> Vec<&OwnerTally> {
        let mut sorted: Vec<&OwnerTally> = self.owners.iter().collect();
        sorted.sort_by_key(|t| t.count);
        sorted
    }

    /// Smallest and largest count over all owners.
    pub fn count_range(&self) -> Option<(usize, usize)> {
        let min = self.owners.iter().map(|t| t.count).min()?;
        let max = self.owners.iter().map(|t| t.count).max()?;
        Some((min, max))
    }

    /// Whether every owner holds between `⌊days/n⌋` and `⌈days/n⌉` days.
    pub fn is_fair(&self, class_size: usize) -> bool {
        let low = minimum_share(self.total_days, class_size);
        let high = fair_share(self.total_days, class_size);
        self.owners.len() == class_size
            && self.owners.iter().all(|t| t.count >= low && t.count <= high)
    }
}
