//! Snack calendar domain models.
//!
//! Provides the data types shared by every pipeline stage: the school
//! calendar the duty runs over, the children's birthdays, and the
//! assignment sequence that the stages transform in place.
//!
//! # Mapping
//!
//! | snack-schedule | Generic scheduling |
//! |----------------|--------------------|
//! | Child | Resource |
//! | Day | Time slot |
//! | AssignmentSequence | Schedule |
//! | VacationWindow | Blocked period |

mod child;
mod day;
mod school;
mod vacation;

pub use child::Birthday;
pub use day::{AssignmentSequence, Day};
pub use school::{is_weekend, SchoolCalendar, DEFAULT_SUMMER_LENGTH};
pub use vacation::{RelocationPolicy, VacationWindow, SHORT_WINDOW_DAYS};
