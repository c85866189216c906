//! Host configuration consumed by the resolver.
//!
//! The host owns the settings and publishes updates through a
//! [`tokio::sync::watch`] channel; the resolver only ever reads them.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Result;

/// The host settings relevant to executable resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// User-specified executable: a filesystem path or a bare command name.
    #[serde(default)]
    pub executable_path: Option<String>,
}

impl Settings {
    /// Creates settings with an explicit executable path.
    #[must_use]
    pub fn with_executable_path(path: impl Into<String>) -> Self {
        Self {
            executable_path: Some(path.into()),
        }
    }

    /// Parses settings from the host's JSON form.
    ///
    /// Unknown keys are ignored, so the full settings object of the host
    /// can be passed as is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`](crate::Error::InvalidSettings) if
    /// the JSON is malformed.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Returns the configured path, treating blank values as unset.
    #[must_use]
    pub fn explicit_path(&self) -> Option<&str> {
        self.executable_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Creates a settings channel seeded with `initial`.
///
/// The host keeps the sender and publishes changes with
/// [`watch::Sender::send_replace`]; resolvers take receivers.
#[must_use]
pub fn channel(initial: Settings) -> (watch::Sender<Settings>, watch::Receiver<Settings>) {
    watch::channel(initial)
}
