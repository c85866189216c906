//! Error types for runtime executable resolution.

/// Errors that can occur while locating a runtime executable.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A configured command or required directory was not found on this system.
    #[error("not found: {0}")]
    NotFound(String),

    /// No candidate location produced a working executable.
    #[error("no working {runtime} executable found (tried {})", tried.join(", "))]
    Unresolved {
        /// Display name of the runtime being searched for.
        runtime: String,
        /// Candidates that were probed, in order.
        tried: Vec<String>,
    },

    /// Invoking a candidate executable failed or produced no output.
    #[error("probe of {program} failed: {reason}")]
    ProbeFailed {
        /// The program that was invoked.
        program: String,
        /// Why the probe was rejected.
        reason: String,
    },

    /// Binary detection failed due to system error.
    #[error("binary detection error: {0}")]
    BinaryDetection(String),

    /// The candidate table could not be parsed.
    #[error("invalid candidate table: {0}")]
    InvalidTable(#[from] serde_yaml::Error),

    /// Host settings could not be parsed.
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    /// The current platform is not supported.
    #[error("unsupported platform")]
    UnsupportedPlatform,

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_lists_candidates() {
        let err = Error::Unresolved {
            runtime: "Julia".into(),
            tried: vec!["julia".into(), "/opt/julia/bin/julia".into()],
        };
        assert_eq!(
            err.to_string(),
            "no working Julia executable found (tried julia, /opt/julia/bin/julia)"
        );
    }

    #[test]
    fn probe_failed_display() {
        let err = Error::ProbeFailed {
            program: "julia".into(),
            reason: "exit status 1".into(),
        };
        assert_eq!(err.to_string(), "probe of julia failed: exit status 1");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
