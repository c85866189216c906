#![doc = include_str!("../README.md")]
//!
//! ## Modules
//!
//! - [`candidates`] - Candidate install locations per platform
//! - [`cli`] - Command-line arguments of the `runtime-locate` binary
//! - [`detection`] - Search-path lookup
//! - [`error`] - Error types
//! - [`logging`] - `tracing` subscriber setup for the binary
//! - [`platform`] - Platform identification and `~` expansion
//! - [`probe`] - Child-process probing
//! - [`resolver`] - The caching executable resolver
//! - [`settings`] - Host settings and change channel
//! - [`telemetry`] - Version and event reporting

pub mod candidates;
pub mod cli;
pub mod detection;
pub mod error;
pub mod logging;
pub mod platform;
pub mod probe;
pub mod resolver;
pub mod settings;
pub mod telemetry;

pub use candidates::{Candidate, CandidateTable, RuntimeDescriptor};
pub use detection::{ExecutableSearch, PathSearch, find_binary};
pub use error::{Error, Result};
pub use platform::Platform;
pub use probe::{ProcessOutput, ProcessRunner, SystemRunner};
pub use resolver::{ExecutableResolver, Resolution, Subscription};
pub use settings::Settings;
pub use telemetry::{CONFIGURED_EVENT, Telemetry, TracingTelemetry};
