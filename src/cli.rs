use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use snack_schedule::models::Birthday;

/// Birthday-anchored classroom snack calendar.
#[derive(Parser)]
#[command(
    name = "snack-schedule",
    version,
    about = "Assign snack days to a class across a school year"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Explicit logging level; overrides -v.
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Logging levels accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build the snack calendar and write it to a file.
    Generate(GenerateArgs),
    /// Print per-child counts of an existing calendar file.
    Tally(TallyArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file (default: ./snack.toml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override output calendar path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override summer buffer length in days.
    #[arg(long)]
    pub summer_length: Option<u32>,

    /// Add a birthday, as DATE=NAME (repeatable).
    #[arg(short, long = "birthday", value_parser = parse_birthday)]
    pub birthdays: Vec<Birthday>,

    /// Add a non-school weekday (repeatable).
    #[arg(long = "homeday")]
    pub homedays: Vec<NaiveDate>,

    /// First and last school day, as START..END.
    #[arg(long, value_parser = parse_range)]
    pub school_year: Option<[NaiveDate; 2]>,

    /// All saints vacation, as START..END.
    #[arg(long, value_parser = parse_range)]
    pub all_saints: Option<[NaiveDate; 2]>,

    /// Winter vacation, as START..END.
    #[arg(long, value_parser = parse_range)]
    pub winter: Option<[NaiveDate; 2]>,

    /// Spring vacation, as START..END.
    #[arg(long, value_parser = parse_range)]
    pub spring: Option<[NaiveDate; 2]>,

    /// Easter vacation, as START..END.
    #[arg(long, value_parser = parse_range)]
    pub easter: Option<[NaiveDate; 2]>,
}

/// Arguments for the `tally` subcommand.
#[derive(clap::Args)]
pub struct TallyArgs {
    /// Calendar file written by `generate`.
    #[arg(short, long)]
    pub input: PathBuf,
}

fn parse_birthday(s: &str) -> Result<Birthday, String> {
    let (date, name) = s
        .split_once('=')
        .ok_or_else(|| format!("expected DATE=NAME, got {s:?}"))?;
    let date: NaiveDate = date
        .trim()
        .parse()
        .map_err(|e| format!("invalid date {date:?}: {e}"))?;
    Ok(Birthday::new(date, name.trim()))
}

fn parse_range(s: &str) -> Result<[NaiveDate; 2], String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {s:?}"))?;
    let parse = |d: &str| {
        d.trim()
            .parse::<NaiveDate>()
            .map_err(|e| format!("invalid date {d:?}: {e}"))
    };
    Ok([parse(start)?, parse(end)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birthday() {
        let b = parse_birthday("2024-09-10=Hhh").unwrap();
        assert_eq!(b, Birthday::new("2024-09-10".parse().unwrap(), "Hhh"));
        assert!(parse_birthday("2024-09-10 Hhh").is_err());
        assert!(parse_birthday("2024-19-10=Hhh").is_err());
    }

    #[test]
    fn test_parse_range() {
        let [start, end] = parse_range("2024-12-21..2025-01-05").unwrap();
        assert_eq!(start.to_string(), "2024-12-21");
        assert_eq!(end.to_string(), "2025-01-05");
        assert!(parse_range("2024-12-21").is_err());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "snack-schedule",
            "-vv",
            "generate",
            "--school-year",
            "2024-08-26..2025-07-04",
            "-b",
            "2024-09-10=Hhh",
            "--birthday",
            "2025-01-16=Iii",
            "--homeday",
            "2024-09-27",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.birthdays.len(), 2);
        assert_eq!(args.homedays.len(), 1);
        assert!(args.school_year.is_some());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_cli_log_level() {
        let cli =
            Cli::try_parse_from(["snack-schedule", "tally", "-i", "x.txt", "-l", "warning"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Warning));
    }
}
