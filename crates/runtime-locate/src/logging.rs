//! Logging setup for the `runtime-locate` binary.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `RUNTIME_LOCATE_LOG` environment variable (any `EnvFilter` directive)
//! 3. default to `warn`
//!
//! Logs go to stderr so stdout carries only the resolved path.

use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable consulted when no level is given on the CLI.
pub const LOG_ENV: &str = "RUNTIME_LOCATE_LOG";

/// Initialise the global logging subscriber.
///
/// Call once at startup; later calls are ignored.
pub fn init_logging(cli_level: Option<LogLevel>) {
    let _ = fmt()
        .with_env_filter(filter(cli_level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn filter(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins() {
        assert_eq!(filter(Some(LogLevel::Debug)).to_string(), "debug");
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(Some(LogLevel::Error));
        init_logging(Some(LogLevel::Trace));
    }
}
