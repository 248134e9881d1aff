//! Generate command: build the snack calendar and write it out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use snack_schedule::report::{render_tally, render_unresolved, save_calendar};
use snack_schedule::scheduler::SnackScheduler;

use crate::cli::GenerateArgs;
use crate::config::SnackConfig;

/// Output path used when neither config nor CLI sets one.
const DEFAULT_OUTPUT: &str = "dates_collation.auto.txt";

/// Run the calendar pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();

    // 1. Load config and merge CLI flags
    let mut config = SnackConfig::load(args.config.as_deref())?;
    config.apply(&args);
    let school = config.school_calendar()?;
    info!(
        children = config.birthdays.len(),
        vacations = school.vacations.len(),
        homedays = school.homedays.len(),
        "configuration loaded"
    );

    // 2. Schedule
    let outcome = SnackScheduler::new()
        .with_options(config.schedule_options())
        .schedule(&school, &config.birthdays)
        .context("failed to build the snack calendar")?;

    // 3. Report
    for checkpoint in &outcome.checkpoints {
        println!("Number of slots assigned ({}):", checkpoint.stage);
        print!("{}", render_tally(&checkpoint.tally));
        println!();
    }
    if !outcome.is_complete() {
        warn!(children = outcome.unresolved.len(), "some children are short of days");
        println!("Unresolved collisions:");
        print!("{}", render_unresolved(&outcome.unresolved));
    }

    // 4. Write
    let output = config
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    save_calendar(&outcome.sequence, &output)
        .with_context(|| format!("failed to write calendar: {}", output.display()))?;
    info!(path = %output.display(), days = outcome.sequence.len(), "calendar written");

    Ok(())
}
