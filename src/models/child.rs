//! Child and birthday model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A child's birthday within the modelled school year.
///
/// The date is the one the child celebrates during this school year, not
/// the date of birth: `2024-09-10`, not `2017-09-10`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    /// Birthday date inside the modelled span.
    pub date: NaiveDate,
    /// Unique child name.
    pub name: String,
}

impl Birthday {
    /// Creates a birthday entry.
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}
