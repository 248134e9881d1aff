//! Birthday-anchored classroom duty calendars.
//!
//! Assigns a recurring duty ("snack day") to each child of a class over a
//! school year. Every child gets their birthday when it is a school day,
//! birthdays on non-school days move to the nearest school day, and the
//! remaining days rotate through the class roughly one class size apart.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Day`, `AssignmentSequence`, `Birthday`,
//!   `VacationWindow`, `SchoolCalendar`
//! - **`calendar`**: School-day sequence construction (span, vacation
//!   relocation, weekend and homeday filtering)
//! - **`scheduler`**: Phase correction, periodic assignment, collision
//!   resolution, tallies and the `SnackScheduler` pipeline
//! - **`report`**: Calendar file output and parsing, tally rendering
//! - **`validation`**: Input integrity checks (duplicate names and
//!   birthdays, range sanity)
//!
//! # Example
//!
//! ```
//! use snack_schedule::models::{Birthday, SchoolCalendar, VacationWindow};
//! use snack_schedule::scheduler::{SnackScheduler, Stage};
//!
//! let date = |s: &str| s.parse().unwrap();
//! let school = SchoolCalendar::new(date("2024-08-26"), date("2024-12-20"))
//!     .with_vacation(VacationWindow::new("all_saints", date("2024-10-19"), date("2024-11-03")));
//! let birthdays = vec![
//!     Birthday::new(date("2024-09-10"), "Ann"),
//!     Birthday::new(date("2024-10-02"), "Bob"),
//!     Birthday::new(date("2024-11-29"), "Cid"),
//! ];
//!
//! let outcome = SnackScheduler::new().schedule(&school, &birthdays).unwrap();
//! assert!(outcome.tally(Stage::Final).is_some());
//! ```

pub mod calendar;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;
