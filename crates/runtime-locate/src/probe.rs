//! Child-process probing of candidate executables.
//!
//! A probe runs a candidate with a fixed argument list and accepts it only
//! if the process exits with status zero and prints something on stdout.
//! No timeout is applied: a candidate that never exits stalls the caller.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Captured result of running a program to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Everything the process wrote to stdout, lossily decoded.
    pub stdout: String,
}

/// Runs a program with arguments and captures its output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `args` to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput>;
}

/// Spawns real child processes through Tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Runs `program` and returns its trimmed stdout if the probe succeeds.
///
/// # Errors
///
/// Returns [`Error::ProbeFailed`] if the process cannot be started, exits
/// with a non-zero status, or prints nothing.
pub async fn probe(runner: &dyn ProcessRunner, program: &Path, args: &[String]) -> Result<String> {
    let failed = |reason: String| Error::ProbeFailed {
        program: program.display().to_string(),
        reason,
    };

    let output = runner
        .run(program, args)
        .await
        .map_err(|e| failed(e.to_string()))?;

    if !output.success {
        return Err(failed(match output.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".into(),
        }));
    }

    let stdout = output.stdout.trim();
    if stdout.is_empty() {
        return Err(failed("no output".into()));
    }
    Ok(stdout.to_string())
}
