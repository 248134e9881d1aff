//! Vacation relocator.
//!
//! Moves birthdays out of a vacation window onto the closest free days
//! around it, then deletes the window from the sequence.
//!
//! # Algorithm
//! 1. Locate the window's slots; they must be contiguous.
//! 2. Walk the first half from its latest day back to the window start.
//!    Each birthday goes to the nearest free day before the window; the
//!    scan cursor only moves further back, so successive birthdays stack
//!    up in front of the window in reverse order.
//! 3. If the window splits, walk the second half forward and place each
//!    birthday on the nearest free day after the window the same way.
//! 4. Drop the window's slots.
//!
//! Days in front of the window may still be weekends at this stage; the
//! day-off filter carries such birthdays further back afterwards.

use tracing::{debug, info};

use crate::error::ScheduleError;
use crate::models::{AssignmentSequence, RelocationPolicy, VacationWindow};

/// Relocates the window's birthdays and removes the window.
///
/// # Errors
/// - `VacationOutOfRange` if the window is not fully and contiguously
///   present in the sequence (outside the span, or overlapping a window
///   already removed).
/// - `VacationBoundaryOverrun` if a scan runs off either end of the
///   sequence before finding a free day.
pub fn relocate(
    mut sequence: AssignmentSequence,
    window: &VacationWindow,
) -> Result<AssignmentSequence, ScheduleError> {
    let out_of_range = || ScheduleError::VacationOutOfRange {
        window: window.name.clone(),
    };
    let first = sequence.position(window.start).ok_or_else(out_of_range)?;
    let last = sequence.position(window.end).ok_or_else(out_of_range)?;
    let len = window.len_days();
    if last < first || last + 1 - first != len {
        return Err(out_of_range());
    }

    let first_half_end = match window.policy {
        RelocationPolicy::AllBefore => len - 1,
        RelocationPolicy::SplitAtMidpoint => window.midpoint(),
    };

    let mut cursor = first.checked_sub(1);
    for offset in (0..=first_half_end).rev() {
        let Some(name) = sequence.owner(first + offset).map(str::to_owned) else {
            continue;
        };
        let target = loop {
            let slot = cursor.ok_or_else(|| overrun(window, &name))?;
            if sequence.is_free(slot) {
                break slot;
            }
            cursor = slot.checked_sub(1);
        };
        sequence.claim(target, &name);
        info!(
            window = %window.name,
            child = %name,
            from = %sequence.days()[first + offset].date,
            to = %sequence.days()[target].date,
            "birthday moved before vacation"
        );
        cursor = target.checked_sub(1);
    }

    if window.splits() {
        let mut cursor = last + 1;
        for offset in first_half_end + 1..len {
            let Some(name) = sequence.owner(first + offset).map(str::to_owned) else {
                continue;
            };
            let target = loop {
                if cursor >= sequence.len() {
                    return Err(overrun(window, &name));
                }
                if sequence.is_free(cursor) {
                    break cursor;
                }
                cursor += 1;
            };
            sequence.claim(target, &name);
            info!(
                window = %window.name,
                child = %name,
                from = %sequence.days()[first + offset].date,
                to = %sequence.days()[target].date,
                "birthday moved after vacation"
            );
            cursor = target + 1;
        }
    }

    sequence.remove_range(first..last + 1);
    debug!(window = %window.name, removed = len, remaining = sequence.len(), "vacation removed");
    Ok(sequence)
}

fn overrun(window: &VacationWindow, child: &str) -> ScheduleError {
    ScheduleError::VacationBoundaryOverrun {
        window: window.name.clone(),
        child: child.to_string(),
    }
}
