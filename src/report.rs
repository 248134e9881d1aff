//! Calendar file output, parsing and tally rendering.
//!
//! # File format
//! One line per school day, chronological:
//!
//! ```text
//! 2024-08-26: Bbb
//! 2024-08-27: None
//! ```
//!
//! `None` marks an unassigned day. Reading a written file back yields
//! the same sequence.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::models::{AssignmentSequence, Day};
use crate::scheduler::{Tally, UnresolvedCollision};
use crate::validation::UNASSIGNED;

/// Writes the calendar in `date: name` format.
pub fn write_calendar<W: Write>(
    sequence: &AssignmentSequence,
    mut writer: W,
) -> Result<(), ScheduleError> {
    for day in sequence.days() {
        writeln!(
            writer,
            "{}: {}",
            day.date,
            day.owner.as_deref().unwrap_or(UNASSIGNED)
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the calendar to a file, replacing it.
pub fn save_calendar(sequence: &AssignmentSequence, path: &Path) -> Result<(), ScheduleError> {
    let file = File::create(path)?;
    write_calendar(sequence, BufWriter::new(file))
}

/// Parses a calendar written by [`write_calendar`].
///
/// Blank lines are skipped. Dates must be strictly increasing.
pub fn read_calendar<R: BufRead>(reader: R) -> Result<AssignmentSequence, ScheduleError> {
    let mut days: Vec<Day> = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let malformed = || ScheduleError::MalformedLine {
            line: i + 1,
            content: line.clone(),
        };
        let (date, name) = line.split_once(": ").ok_or_else(malformed)?;
        let date: NaiveDate = date.trim().parse().map_err(|_| malformed())?;
        if days.last().is_some_and(|prev| prev.date >= date) {
            return Err(malformed());
        }
        let owner = match name.trim_end() {
            "" => return Err(malformed()),
            UNASSIGNED => None,
            name => Some(name.to_string()),
        };
        days.push(Day { date, owner });
    }
    AssignmentSequence::from_days(days)
}

/// Reads a calendar file.
pub fn load_calendar(path: &Path) -> Result<AssignmentSequence, ScheduleError> {
    let file = File::open(path)?;
    read_calendar(BufReader::new(file))
}

/// Renders per-child counts, fewest first, followed by unassigned days.
///
/// ```text
/// Ccc : 7 (min gap 18)
/// Aaa : 8 (min gap 20)
/// None : 0
/// ```
pub fn render_tally(tally: &Tally) -> String {
    let mut out = String::new();
    for t in tally.ascending_by_count() {
        let line = match t.min_gap {
            Some(gap) => format!("{} : {} (min gap {})\n", t.owner, t.count, gap),
            None => format!("{} : {}\n", t.owner, t.count),
        };
        out.push_str(&line);
    }
    out.push_str(&format!("{} : {}\n", UNASSIGNED, tally.unassigned));
    out
}

/// Renders one line per child left short.
pub fn render_unresolved(unresolved: &[UnresolvedCollision]) -> String {
    unresolved
        .iter()
        .map(|u| {
            let slots = if u.slots.is_empty() {
                "-".to_string()
            } else {
                u.slots
                    .iter()
                    .map(NaiveDate::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            format!(
                "{} : {} assigned, {} missing (slots {})\n",
                u.child, u.assigned, u.missing, slots
            )
        })
        .collect()
}
