//! Platform identification and home-directory handling.
//!
//! Candidate tables are keyed by [`Platform`], and configured paths may
//! start with `~`, which is expanded against the user's home directory.

use std::fmt;
use std::path::{MAIN_SEPARATOR, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Operating system families with distinct install conventions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    Macos,
    /// Linux and any other Unix-like system.
    Linux,
}

impl Platform {
    /// Returns the platform this binary was compiled for.
    ///
    /// Systems other than Windows and macOS share the Linux conventions.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else {
            Self::Linux
        }
    }

    /// Returns the lowercase identifier used as a table key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Macos => "macos",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the user's home directory.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the home directory cannot be determined.
#[cfg(any(unix, windows))]
pub fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or_else(|| Error::NotFound("home directory".into()))
}

/// Returns the user's home directory.
///
/// # Errors
///
/// Returns [`Error::UnsupportedPlatform`] on unsupported platforms.
#[cfg(not(any(unix, windows)))]
pub fn home_dir() -> Result<PathBuf> {
    Err(Error::UnsupportedPlatform)
}

/// Returns `true` if `raw` names a filesystem path rather than a bare command.
///
/// `/` counts as a separator on every platform, in addition to the native one.
#[must_use]
pub fn has_separator(raw: &str) -> bool {
    raw.contains('/') || raw.contains(MAIN_SEPARATOR)
}

/// Expands a leading `~` to the user's home directory.
///
/// Only a bare `~` or `~` followed by a separator is expanded; `~user`
/// forms and everything else are returned unchanged.
///
/// # Errors
///
/// Returns an error if expansion is needed and the home directory cannot
/// be determined.
pub fn expand_tilde(raw: &str) -> Result<PathBuf> {
    let Some(rest) = raw.strip_prefix('~') else {
        return Ok(PathBuf::from(raw));
    };
    if rest.is_empty() {
        return home_dir();
    }
    match rest.strip_prefix(['/', MAIN_SEPARATOR]) {
        Some(tail) => Ok(home_dir()?.join(tail)),
        None => Ok(PathBuf::from(raw)),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_dir_exists() {
        let result = home_dir();
        assert!(result.is_ok(), "home_dir should succeed");
        assert!(
            result.unwrap().is_absolute(),
            "home_dir should return an absolute path"
        );
    }

    #[test]
    fn current_platform_matches_target() {
        #[cfg(target_os = "windows")]
        assert_eq!(Platform::current(), Platform::Windows);
        #[cfg(target_os = "macos")]
        assert_eq!(Platform::current(), Platform::Macos);
        #[cfg(target_os = "linux")]
        assert_eq!(Platform::current(), Platform::Linux);
    }

    #[test]
    fn platform_keys_are_lowercase() {
        assert_eq!(Platform::Macos.to_string(), "macos");
        let parsed: Platform = serde_yaml::from_str("windows").unwrap();
        assert_eq!(parsed, Platform::Windows);
    }

    #[test]
    fn cli_names_match_table_keys() {
        use clap::ValueEnum;

        for platform in Platform::value_variants() {
            let value = platform.to_possible_value().unwrap();
            assert_eq!(value.get_name(), platform.as_str());
        }
        assert_eq!(Platform::value_variants().len(), 3);
    }

    #[test]
    fn separator_detection() {
        assert!(has_separator("/opt/lang/bin/run"));
        assert!(has_separator("bin/julia"));
        assert!(has_separator("~/julia"));
        assert!(!has_separator("julia"));
        assert!(!has_separator("julia.exe"));
    }

    #[test]
    fn absolute_path_is_not_expanded() {
        let path = expand_tilde("/opt/lang/bin/run").unwrap();
        assert_eq!(path, PathBuf::from("/opt/lang/bin/run"));
    }

    #[test]
    fn tilde_user_form_is_left_alone() {
        let path = expand_tilde("~alice/bin/julia").unwrap();
        assert_eq!(path, PathBuf::from("~alice/bin/julia"));
    }

    #[cfg(unix)]
    #[test]
    fn leading_tilde_expands_to_home() {
        let mut env = test_utils::EnvGuard::new();
        env.set("HOME", "/home/tester");

        let path = expand_tilde("~/julia-1.9/bin/julia").unwrap();
        assert_eq!(path, PathBuf::from("/home/tester/julia-1.9/bin/julia"));

        let bare = expand_tilde("~").unwrap();
        assert_eq!(bare, PathBuf::from("/home/tester"));
    }
}
