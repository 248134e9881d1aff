//! Collision resolution.
//!
//! Children that lost periodic slots to someone else get a day close to
//! each lost slot instead.
//!
//! # Algorithm
//! 1. Order children by ascending day count (least served first).
//! 2. For each conflicted slot of a child still below `⌈days / n⌉`,
//!    search `slot + d`, then `slot - d`, for `d = 1..=radius`, and
//!    claim the first free day.
//! 3. Repeat for the slots left over with the radius widened by
//!    `radius_step`, until nothing is left or `max_radius` is passed.
//!
//! Whatever is still in the registry afterwards is unresolved.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::periodic::ConflictRegistry;
use super::tally::{fair_share, Tally};
use crate::models::AssignmentSequence;

/// Collision resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Search radius of the first pass.
    pub initial_radius: usize,
    /// Radius increase per extra pass (0 disables extra passes).
    pub radius_step: usize,
    /// Largest radius tried.
    pub max_radius: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            initial_radius: 10,
            radius_step: 5,
            max_radius: 30,
        }
    }
}

impl ResolverOptions {
    /// Creates the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first-pass radius.
    pub fn with_initial_radius(mut self, radius: usize) -> Self {
        self.initial_radius = radius;
        self
    }

    /// Sets the radius increase per pass.
    pub fn with_radius_step(mut self, step: usize) -> Self {
        self.radius_step = step;
        self
    }

    /// Sets the largest radius.
    pub fn with_max_radius(mut self, radius: usize) -> Self {
        self.max_radius = radius;
        self
    }
}

/// Result of collision resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Tally after the first pass.
    pub first_pass: Tally,
    /// Passes run, including the first.
    pub passes: usize,
    /// Radius of the last pass.
    pub final_radius: usize,
    /// Slots that could not be placed.
    pub unresolved: ConflictRegistry,
}

/// Claims the free day nearest to `slot` for `name`, trying the later
/// day first at each distance. Returns the claimed slot.
pub fn find_free_day(
    sequence: &mut AssignmentSequence,
    name: &str,
    slot: usize,
    max_delta: usize,
) -> Option<usize> {
    for delta in 1..=max_delta {
        debug!(child = %name, slot, delta, "trying delta");
        if let Some(after) = slot.checked_add(delta) {
            if sequence.claim(after, name) {
                return Some(after);
            }
        }
        if let Some(before) = slot.checked_sub(delta) {
            if sequence.claim(before, name) {
                return Some(before);
            }
        }
    }
    None
}

/// One resolution pass. Returns the number of days claimed.
pub fn resolve_pass(
    sequence: &mut AssignmentSequence,
    conflicts: &mut ConflictRegistry,
    class_size: usize,
    radius: usize,
) -> usize {
    let quota = fair_share(sequence.len(), class_size);
    let order: Vec<(String, usize)> = Tally::calculate(sequence)
        .ascending_by_count()
        .into_iter()
        .map(|t| (t.owner.clone(), t.count))
        .collect();

    let mut claimed = 0;
    for (name, mut count) in order {
        let slots = conflicts.take(&name);
        let mut left = Vec::new();
        for slot in slots {
            if count >= quota {
                break;
            }
            match find_free_day(sequence, &name, slot, radius) {
                Some(day) => {
                    count += 1;
                    claimed += 1;
                    info!(
                        child = %name,
                        wanted = slot,
                        got = day,
                        date = %sequence.days()[day].date,
                        "collision resolved"
                    );
                }
                None => {
                    debug!(child = %name, slot, radius, "no free day within radius");
                    left.push(slot);
                }
            }
        }
        if count < quota {
            conflicts.restore(&name, left);
        }
    }
    claimed
}

/// Resolves conflicts, widening the radius until stable.
pub fn resolve(
    sequence: &mut AssignmentSequence,
    mut conflicts: ConflictRegistry,
    class_size: usize,
    options: &ResolverOptions,
) -> Resolution {
    let mut radius = options.initial_radius;
    resolve_pass(sequence, &mut conflicts, class_size, radius);
    let first_pass = Tally::calculate(sequence);
    let mut passes = 1;

    while !conflicts.is_empty()
        && options.radius_step > 0
        && radius + options.radius_step <= options.max_radius
    {
        radius += options.radius_step;
        let claimed = resolve_pass(sequence, &mut conflicts, class_size, radius);
        passes += 1;
        debug!(radius, claimed, left = conflicts.len(), "resolution pass");
    }

    info!(passes, radius, left = conflicts.len(), "collision resolution done");
    Resolution {
        first_pass,
        passes,
        final_radius: radius,
        unresolved: conflicts,
    }
}
