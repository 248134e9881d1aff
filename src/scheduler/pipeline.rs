//! Snack calendar pipeline.
//!
//! Chains the calendar stages and the schedulers:
//!
//! ```text
//! validate → build → relocate (summer, vacations…) → drop days off
//!          → correct phases → assign periodic → resolve → report
//! ```
//!
//! The assignment sequence is owned by the pipeline and handed from
//! stage to stage; nothing else holds a reference to it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::periodic::{assign_periodic, ConflictRegistry};
use super::phase::{correct_phases, PhaseCorrection};
use super::resolve::{resolve, ResolverOptions};
use super::tally::{minimum_share, Tally};
use crate::calendar::school_days;
use crate::error::ScheduleError;
use crate::models::{AssignmentSequence, Birthday, SchoolCalendar, DEFAULT_SUMMER_LENGTH};
use crate::validation::validate_input;

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    /// Summer buffer appended after the school year (days).
    pub summer_length: u32,
    /// Collision resolver settings.
    pub resolver: ResolverOptions,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            summer_length: DEFAULT_SUMMER_LENGTH,
            resolver: ResolverOptions::default(),
        }
    }
}

impl ScheduleOptions {
    /// Sets the summer buffer.
    pub fn with_summer_length(mut self, days: u32) -> Self {
        self.summer_length = days;
        self
    }

    /// Sets the resolver settings.
    pub fn with_resolver(mut self, resolver: ResolverOptions) -> Self {
        self.resolver = resolver;
        self
    }
}

/// Pipeline checkpoint at which a tally is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// After periodic assignment.
    Initial,
    /// After the first resolution pass.
    Resolved,
    /// After resolution converged.
    Final,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Initial => write!(f, "initial"),
            Stage::Resolved => write!(f, "after resolution"),
            Stage::Final => write!(f, "final"),
        }
    }
}

/// Tally taken at a checkpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Checkpoint {
    /// Pipeline stage.
    pub stage: Stage,
    /// Day counts at that stage.
    pub tally: Tally,
}

/// A child left below the guaranteed share of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedCollision {
    /// Child name.
    pub child: String,
    /// Days the child holds.
    pub assigned: usize,
    /// Days missing to reach `⌊days / n⌋`.
    pub missing: usize,
    /// Dates of the periodic slots that found no replacement.
    pub slots: Vec<NaiveDate>,
}

/// Pipeline result.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Final school-day sequence with owners.
    pub sequence: AssignmentSequence,
    /// Phase corrections, in birthday order.
    pub phases: Vec<PhaseCorrection>,
    /// Tallies at the initial, resolved and final stages.
    pub checkpoints: Vec<Checkpoint>,
    /// Children below their guaranteed share.
    pub unresolved: Vec<UnresolvedCollision>,
}

impl ScheduleOutcome {
    /// Number of children.
    pub fn class_size(&self) -> usize {
        self.phases.len()
    }

    /// Whether every child got at least the guaranteed share.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Tally at a stage.
    pub fn tally(&self, stage: Stage) -> Option<&Tally> {
        self.checkpoints
            .iter()
            .find(|c| c.stage == stage)
            .map(|c| &c.tally)
    }
}

/// Birthday-anchored snack day scheduler.
///
/// # Example
///
/// ```
/// use snack_schedule::models::{Birthday, SchoolCalendar};
/// use snack_schedule::scheduler::SnackScheduler;
///
/// let date = |s: &str| s.parse().unwrap();
/// let school = SchoolCalendar::new(date("2024-08-26"), date("2024-12-20"));
/// let birthdays = vec![
///     Birthday::new(date("2024-09-01"), "Ann"),
///     Birthday::new(date("2024-09-02"), "Bob"),
/// ];
///
/// let outcome = SnackScheduler::new().schedule(&school, &birthdays).unwrap();
/// let friday = outcome.sequence.position(date("2024-08-30")).unwrap();
/// assert_eq!(outcome.sequence.owner(friday), Some("Ann"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnackScheduler {
    options: ScheduleOptions,
}

impl SnackScheduler {
    /// Creates a scheduler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pipeline settings.
    pub fn with_options(mut self, options: ScheduleOptions) -> Self {
        self.options = options;
        self
    }

    /// Current settings.
    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    /// `InvalidInput` when validation fails, or any fatal calendar error
    /// (boundary overruns, birthdays with no school day to land on).
    /// Unresolved collisions are not errors; see
    /// [`ScheduleOutcome::unresolved`].
    pub fn schedule(
        &self,
        school: &SchoolCalendar,
        birthdays: &[Birthday],
    ) -> Result<ScheduleOutcome, ScheduleError> {
        let summer_length = self.options.summer_length;
        validate_input(school, birthdays, summer_length).map_err(ScheduleError::InvalidInput)?;

        let mut sequence = school_days(school, summer_length, birthdays)?;
        let children: Vec<String> = birthdays.iter().map(|b| b.name.clone()).collect();
        let class_size = children.len();
        info!(days = sequence.len(), class_size, "school days ready");

        let phases = correct_phases(&sequence, &children)?;
        let conflicts = assign_periodic(&mut sequence, &phases);
        let initial = Tally::calculate(&sequence);

        let resolution = resolve(&mut sequence, conflicts, class_size, &self.options.resolver);
        let last = Tally::calculate(&sequence);
        let unresolved = unresolved_collisions(&sequence, &phases, &last, &resolution.unresolved);

        Ok(ScheduleOutcome {
            sequence,
            phases,
            checkpoints: vec![
                Checkpoint {
                    stage: Stage::Initial,
                    tally: initial,
                },
                Checkpoint {
                    stage: Stage::Resolved,
                    tally: resolution.first_pass,
                },
                Checkpoint {
                    stage: Stage::Final,
                    tally: last,
                },
            ],
            unresolved,
        })
    }
}

fn unresolved_collisions(
    sequence: &AssignmentSequence,
    phases: &[PhaseCorrection],
    tally: &Tally,
    leftovers: &ConflictRegistry,
) -> Vec<UnresolvedCollision> {
    let guaranteed = minimum_share(sequence.len(), phases.len());
    let mut unresolved = Vec::new();

    for phase in phases {
        let assigned = tally.count(&phase.name);
        if assigned >= guaranteed {
            continue;
        }
        let slots: Vec<NaiveDate> = leftovers
            .slots_for(&phase.name)
            .iter()
            .filter_map(|&slot| sequence.get(slot).map(|d| d.date))
            .collect();
        for date in &slots {
            error!(child = %phase.name, %date, "no date found around slot");
        }
        let missing = guaranteed - assigned;
        warn!(child = %phase.name, assigned, missing, "unresolved collision");
        unresolved.push(UnresolvedCollision {
            child: phase.name.clone(),
            assigned,
            missing,
            slots,
        });
    }

    unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VacationWindow;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn autumn() -> SchoolCalendar {
        SchoolCalendar::new(date("2024-08-26"), date("2024-12-20"))
            .with_vacation(VacationWindow::new(
                "all_saints",
                date("2024-10-19"),
                date("2024-11-03"),
            ))
            .with_homeday(date("2024-11-11"))
    }

    fn class() -> Vec<Birthday> {
        vec![
            Birthday::new(date("2024-09-01"), "Ann"),
            Birthday::new(date("2024-09-02"), "Bob"),
            Birthday::new(date("2024-09-17"), "Cid"),
            Birthday::new(date("2024-10-25"), "Dee"),
            Birthday::new(date("2024-11-20"), "Eve"),
        ]
    }

    #[test]
    fn test_pipeline_fair_and_ordered() {
        let school = autumn();
        let outcome = SnackScheduler::new()
            .with_options(ScheduleOptions::default().with_summer_length(30))
            .schedule(&school, &class())
            .unwrap();

        let seq = &outcome.sequence;
        assert!(seq.days().windows(2).all(|w| w[0].date < w[1].date));
        assert!(seq.days().iter().all(|d| school.is_school_day(d.date)));
        assert_eq!(outcome.class_size(), 5);
        assert_eq!(outcome.checkpoints.len(), 3);

        let last = outcome.tally(Stage::Final).unwrap();
        assert!(outcome.is_complete());
        assert!(last.is_fair(5), "{last:?}");
    }

    #[test]
    fn test_birthdays_kept() {
        let outcome = SnackScheduler::new()
            .with_options(ScheduleOptions::default().with_summer_length(30))
            .schedule(&autumn(), &class())
            .unwrap();
        let seq = &outcome.sequence;
        let on = |d: &str| seq.owner(seq.position(date(d)).unwrap());

        assert_eq!(on("2024-08-30"), Some("Ann"));
        assert_eq!(on("2024-09-02"), Some("Bob"));
        assert_eq!(on("2024-09-17"), Some("Cid"));
        assert_eq!(on("2024-10-18"), Some("Dee"));
        assert_eq!(on("2024-11-20"), Some("Eve"));
    }

    #[test]
    fn test_unresolved_itemized_without_search() {
        let options = ScheduleOptions::default()
            .with_summer_length(30)
            .with_resolver(
                ResolverOptions::new()
                    .with_initial_radius(0)
                    .with_radius_step(0),
            );
        let outcome = SnackScheduler::new()
            .with_options(options)
            .schedule(&autumn(), &class())
            .unwrap();

        // 74 days for 5 children: 14 guaranteed, 15 at most
        assert_eq!(outcome.sequence.len(), 74);
        assert!(!outcome.is_complete());
        assert_eq!(
            outcome.unresolved,
            vec![UnresolvedCollision {
                child: "Dee".into(),
                assigned: 13,
                missing: 1,
                slots: vec![date("2024-08-30")],
            }]
        );

        // Cid keeps a lost slot but already holds the guaranteed share
        let last = outcome.tally(Stage::Final).unwrap();
        assert_eq!(last.count("Cid"), 14);
        assert_eq!(last.count("Dee"), 13);
        assert_eq!(outcome.tally(Stage::Initial), Some(last));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut birthdays = class();
        birthdays.push(Birthday::new(date("2024-09-17"), "Fay"));
        let err = SnackScheduler::new()
            .schedule(&autumn(), &birthdays)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn test_deterministic() {
        let scheduler = SnackScheduler::new();
        let a = scheduler.schedule(&autumn(), &class()).unwrap();
        let b = scheduler.schedule(&autumn(), &class()).unwrap();
        assert_eq!(a.sequence, b.sequence);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Initial.to_string(), "initial");
        assert_eq!(Stage::Resolved.to_string(), "after resolution");
        assert_eq!(Stage::Final.to_string(), "final");
    }
}
