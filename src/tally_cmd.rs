//! Tally command: re-read a calendar file and print its counts.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use snack_schedule::report::{load_calendar, render_tally};
use snack_schedule::scheduler::Tally;

use crate::cli::TallyArgs;

/// Print per-child counts of a calendar file.
pub fn run(args: TallyArgs) -> Result<()> {
    let _cmd = info_span!("tally").entered();

    let sequence = load_calendar(&args.input)
        .with_context(|| format!("failed to read calendar: {}", args.input.display()))?;
    let tally = Tally::calculate(&sequence);
    info!(days = tally.total_days, children = tally.owners.len(), "calendar loaded");

    println!("{} school days, {} children", tally.total_days, tally.owners.len());
    if let Some((low, high)) = tally.count_range() {
        println!("days per child: {low} to {high}");
    }
    print!("{}", render_tally(&tally));
    Ok(())
}
