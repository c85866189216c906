//! Candidate install locations, loaded from a data table.
//!
//! The table is YAML keyed by runtime and then by [`Platform`]. A default
//! table is embedded in the crate; hosts can supply their own with
//! [`CandidateTable::from_yaml`] when new releases ship.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::platform::{self, Platform};

const BUILTIN_TABLE: &str = include_str!("candidates.yaml");

/// A set of runtime descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTable {
    /// Known runtimes, in table order.
    pub runtimes: Vec<RuntimeDescriptor>,
}

impl CandidateTable {
    /// Parses a table from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTable`] if the YAML does not match the table
    /// schema.
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads and parses a table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    /// Returns the table embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded table is malformed.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_TABLE)
    }

    /// Looks up a runtime by its identifier (e.g. `"julia"`).
    #[must_use]
    pub fn runtime(&self, id: &str) -> Option<&RuntimeDescriptor> {
        self.runtimes.iter().find(|r| r.id == id)
    }
}

/// Everything needed to discover and probe one runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeDescriptor {
    /// Table key, e.g. `julia`.
    pub id: String,
    /// Human-readable name, e.g. `Julia`.
    pub name: String,
    /// Bare command name per platform.
    pub command: HashMap<Platform, String>,
    /// Arguments that suppress startup side effects and print the
    /// installation's binary directory on a single line.
    pub probe_args: Vec<String>,
    /// Arguments that print the runtime version.
    pub version_args: Vec<String>,
    /// Install location templates per platform, newest first.
    #[serde(default)]
    pub candidates: HashMap<Platform, Vec<String>>,
}

impl RuntimeDescriptor {
    /// Returns the Julia descriptor from the embedded table.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded table is malformed.
    pub fn julia() -> Result<Self> {
        CandidateTable::builtin()?
            .runtime("julia")
            .cloned()
            .ok_or_else(|| Error::NotFound("julia in the builtin candidate table".into()))
    }

    /// Returns the bare command name on `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] if the table has no command
    /// for `platform`.
    pub fn command_for(&self, platform: Platform) -> Result<&str> {
        self.command
            .get(&platform)
            .map(String::as_str)
            .ok_or(Error::UnsupportedPlatform)
    }

    /// Builds the ordered candidate list for `platform`.
    ///
    /// The bare command comes first, followed by the expanded install
    /// locations in table order. Templates under `~` are skipped when the
    /// home directory is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] if the table has no command
    /// for `platform`.
    pub fn candidates_for(&self, platform: Platform) -> Result<Vec<Candidate>> {
        let mut list = vec![Candidate::Command(self.command_for(platform)?.to_string())];

        let templates = self.candidates.get(&platform).map_or(&[][..], Vec::as_slice);
        for template in templates {
            match expand_template(template) {
                Ok(path) => list.push(Candidate::Path(path)),
                Err(e) => debug!(template = %template, error = %e, "skipping candidate"),
            }
        }

        Ok(list)
    }
}

/// One place to look for a runtime executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A bare command name, looked up on the search path by the OS.
    Command(String),
    /// A concrete filesystem path.
    Path(PathBuf),
}

impl Candidate {
    /// Returns the program to hand to the process runner.
    #[must_use]
    pub fn program(&self) -> &Path {
        match self {
            Self::Command(name) => Path::new(name),
            Self::Path(path) => path,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(name) => f.write_str(name),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Turns a `/`-separated template into a native path.
fn expand_template(template: &str) -> Result<PathBuf> {
    let mut segments = template.split('/').filter(|s| !s.is_empty());
    let mut path = if template.starts_with('~') {
        segments.next();
        platform::home_dir()?
    } else if template.starts_with('/') {
        PathBuf::from(std::path::MAIN_SEPARATOR_STR)
    } else {
        PathBuf::new()
    };
    path.extend(segments);
    Ok(path)
}
