use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use snack_schedule::models::{Birthday, SchoolCalendar, VacationWindow, DEFAULT_SUMMER_LENGTH};
use snack_schedule::scheduler::{ResolverOptions, ScheduleOptions};

use crate::cli::GenerateArgs;

/// Config file picked up when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "snack.toml";

/// Top-level snack-schedule configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnackConfig {
    /// Output calendar path.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Summer buffer after the last school day (days).
    #[serde(default = "default_summer_length")]
    pub summer_length: u32,

    /// First and last school day.
    #[serde(default)]
    pub school_year: Option<[NaiveDate; 2]>,

    /// Non-school weekdays.
    #[serde(default)]
    pub homedays: Vec<NaiveDate>,

    /// Vacation windows.
    #[serde(default)]
    pub vacations: VacationsToml,

    /// Class roster.
    #[serde(default)]
    pub birthdays: Vec<Birthday>,

    /// Collision resolver settings.
    #[serde(default)]
    pub resolver: ResolverToml,
}

impl Default for SnackConfig {
    fn default() -> Self {
        Self {
            output: None,
            summer_length: default_summer_length(),
            school_year: None,
            homedays: Vec::new(),
            vacations: VacationsToml::default(),
            birthdays: Vec::new(),
            resolver: ResolverToml::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct VacationsToml {
    pub all_saints: Option<[NaiveDate; 2]>,
    pub winter: Option<[NaiveDate; 2]>,
    pub spring: Option<[NaiveDate; 2]>,
    pub easter: Option<[NaiveDate; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverToml {
    #[serde(default = "default_initial_radius")]
    pub initial_radius: usize,
    #[serde(default = "default_radius_step")]
    pub radius_step: usize,
    #[serde(default = "default_max_radius")]
    pub max_radius: usize,
}

impl Default for ResolverToml {
    fn default() -> Self {
        Self {
            initial_radius: default_initial_radius(),
            radius_step: default_radius_step(),
            max_radius: default_max_radius(),
        }
    }
}

fn default_summer_length() -> u32 {
    DEFAULT_SUMMER_LENGTH
}
fn default_initial_radius() -> usize {
    ResolverOptions::default().initial_radius
}
fn default_radius_step() -> usize {
    ResolverOptions::default().radius_step
}
fn default_max_radius() -> usize {
    ResolverOptions::default().max_radius
}

impl SnackConfig {
    /// Loads the config file.
    ///
    /// An explicit path must exist. Without one, `snack.toml` in the
    /// working directory is used when present, otherwise an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None if Path::new(DEFAULT_CONFIG).exists() => Path::new(DEFAULT_CONFIG),
            None => return Ok(Self::default()),
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }

    /// Merges CLI flags: scalar flags override, lists extend.
    pub fn apply(&mut self, args: &GenerateArgs) {
        if let Some(output) = &args.output {
            self.output = Some(output.clone());
        }
        if let Some(days) = args.summer_length {
            self.summer_length = days;
        }
        if args.school_year.is_some() {
            self.school_year = args.school_year;
        }
        let vacations = &mut self.vacations;
        for (slot, flag) in [
            (&mut vacations.all_saints, args.all_saints),
            (&mut vacations.winter, args.winter),
            (&mut vacations.spring, args.spring),
            (&mut vacations.easter, args.easter),
        ] {
            if flag.is_some() {
                *slot = flag;
            }
        }
        self.homedays.extend(args.homedays.iter().copied());
        self.birthdays.extend(args.birthdays.iter().cloned());
    }

    /// Builds the school calendar.
    pub fn school_calendar(&self) -> Result<SchoolCalendar> {
        let Some([start, end]) = self.school_year else {
            bail!("no school year: set school_year in config or use --school-year");
        };
        let mut school =
            SchoolCalendar::new(start, end).with_homedays(self.homedays.iter().copied());
        let v = &self.vacations;
        for (name, range) in [
            ("all_saints", v.all_saints),
            ("winter", v.winter),
            ("spring", v.spring),
            ("easter", v.easter),
        ] {
            if let Some([start, end]) = range {
                school = school.with_vacation(VacationWindow::new(name, start, end));
            }
        }
        Ok(school)
    }

    /// Builds the pipeline settings.
    pub fn schedule_options(&self) -> ScheduleOptions {
        ScheduleOptions::default()
            .with_summer_length(self.summer_length)
            .with_resolver(
                ResolverOptions::new()
                    .with_initial_radius(self.resolver.initial_radius)
                    .with_radius_step(self.resolver.radius_step)
                    .with_max_radius(self.resolver.max_radius),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Command};

    const SAMPLE: &str = r#"
output = "out.txt"
school_year = ["2024-08-26", "2025-07-04"]
homedays = ["2024-09-27"]

[vacations]
all_saints = ["2024-10-19", "2024-11-03"]
winter = ["2024-12-21", "2025-01-05"]

[[birthdays]]
date = "2024-09-10"
name = "Hhh"

[resolver]
max_radius = 40
"#;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let config: SnackConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.summer_length, 60);
        assert_eq!(config.birthdays.len(), 1);
        assert_eq!(config.resolver.initial_radius, 10);
        assert_eq!(config.resolver.max_radius, 40);

        let school = config.school_calendar().unwrap();
        assert_eq!(school.vacations.len(), 2);
        assert_eq!(school.vacations[1].name, "winter");
        assert!(school.is_homeday(date("2024-09-27")));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<SnackConfig>("colour = \"red\"").is_err());
    }

    #[test]
    fn test_missing_school_year() {
        assert!(SnackConfig::default().school_calendar().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config: SnackConfig = toml::from_str(SAMPLE).unwrap();
        let cli = Cli::try_parse_from([
            "snack-schedule",
            "generate",
            "--winter",
            "2024-12-23..2025-01-03",
            "--birthday",
            "2025-01-16=Iii",
            "--summer-length",
            "70",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        config.apply(&args);

        assert_eq!(config.summer_length, 70);
        assert_eq!(config.birthdays.len(), 2);
        assert_eq!(config.vacations.winter, Some([date("2024-12-23"), date("2025-01-03")]));
        assert_eq!(config.vacations.all_saints, Some([date("2024-10-19"), date("2024-11-03")]));
        assert_eq!(config.output, Some(PathBuf::from("out.txt")));
        assert_eq!(config.schedule_options().summer_length, 70);
    }
}
