//! Command-line arguments for the `runtime-locate` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::platform::Platform;

/// Command-line arguments for `runtime-locate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runtime-locate",
    version,
    about = "Find a working language runtime executable and print its path.",
    long_about = None
)]
pub struct CliArgs {
    /// Runtime identifier from the candidate table.
    #[arg(long, value_name = "NAME", default_value = "julia")]
    pub runtime: String,

    /// Explicit executable: a path (`~` allowed) or a bare command name.
    ///
    /// If omitted, conventional install locations are probed.
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    /// YAML candidate table to use instead of the builtin one.
    #[arg(long, value_name = "FILE")]
    pub table: Option<PathBuf>,

    /// Search another platform's candidate list.
    #[arg(long, value_enum, value_name = "PLATFORM")]
    pub platform: Option<Platform>,

    /// Also run the resolved executable's version query and print it.
    #[arg(long)]
    pub version_probe: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNTIME_LOCATE_LOG` or `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
