use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &["snack_schedule"];

/// Initialize tracing from the CLI flags.
///
/// Mapping for `-v`:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// `--log-level` replaces the `-v` mapping. `RUST_LOG` overrides both.
pub fn init(verbosity: u8, level: Option<LogLevel>) {
    let default_filter: String = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={}", level_name(verbosity, level)))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn level_name(verbosity: u8, level: Option<LogLevel>) -> &'static str {
    match level {
        Some(LogLevel::Error) => "error",
        Some(LogLevel::Warning) => "warn",
        Some(LogLevel::Info) => "info",
        Some(LogLevel::Debug) => "debug",
        None => match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name() {
        assert_eq!(level_name(0, None), "warn");
        assert_eq!(level_name(2, None), "debug");
        assert_eq!(level_name(7, None), "trace");
        assert_eq!(level_name(3, Some(LogLevel::Error)), "error");
        assert_eq!(level_name(0, Some(LogLevel::Info)), "info");
    }
}
