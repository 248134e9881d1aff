//! Duty assignment over the school-day sequence.
//!
//! Takes the sequence produced by [`calendar`](crate::calendar), where
//! every child owns exactly their birthday, and fills the remaining days
//! so each child gets about `days / n` duties spread a class size apart.
//!
//! # Algorithm
//!
//! 1. `correct_phases`: rank children by birthday slot modulo `n` and
//!    give each a distinct lane `0..n`.
//! 2. `assign_periodic`: walk each lane forward and backward in steps of
//!    `n`, claiming free days and recording taken ones as conflicts.
//! 3. `resolve`: give conflicted children the nearest free day, least
//!    served first, widening the search until stable.
//!
//! `SnackScheduler` runs the calendar stages and these three steps and
//! reports tallies at each checkpoint.

mod periodic;
mod phase;
mod pipeline;
mod resolve;
mod tally;

pub use periodic::{assign_periodic, ConflictRegistry};
pub use phase::{correct_phases, PhaseCorrection};
pub use pipeline::{
    Checkpoint, ScheduleOptions, ScheduleOutcome, SnackScheduler, Stage, UnresolvedCollision,
};
pub use resolve::{find_free_day, resolve, resolve_pass, Resolution, ResolverOptions};
pub use tally::{fair_share, minimum_share, OwnerTally, Tally};
