//! Binary detection utilities.
//!
//! This module provides cross-platform search-path lookup using the `which`
//! crate, behind the [`ExecutableSearch`] trait so resolvers can be tested
//! without touching the real `PATH`.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Resolves bare command names to absolute paths.
pub trait ExecutableSearch: Send + Sync {
    /// Looks `name` up on the search path.
    ///
    /// Returns `Ok(None)` when the command is not on the search path.
    ///
    /// # Errors
    ///
    /// Returns an error for system failures during the search.
    fn find(&self, name: &str) -> Result<Option<PathBuf>>;

    /// Looks `name` up on the search path, treating absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `name` is not on the search path.
    fn require(&self, name: &str) -> Result<PathBuf> {
        self.find(name)?
            .ok_or_else(|| Error::NotFound(format!("`{name}` on the search path")))
    }
}

/// Searches the process `PATH` (and `PATHEXT` on Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSearch;

impl ExecutableSearch for PathSearch {
    fn find(&self, name: &str) -> Result<Option<PathBuf>> {
        find_binary(name)
    }
}

/// Finds a binary executable in PATH.
///
/// Returns `Ok(Some(path))` if found, `Ok(None)` if not found,
/// or `Err` for system errors (e.g., canonicalization failures).
///
/// Cross-platform: handles Windows extensions (.exe, .cmd, etc.) automatically.
///
/// # Errors
///
/// Returns `Error::BinaryDetection` if a system error occurs during search.
///
/// # Examples
///
/// ```no_run
/// use runtime_locate::detection::find_binary;
///
/// match find_binary("julia") {
///     Ok(Some(path)) => println!("Found at: {}", path.display()),
///     Ok(None) => println!("Not installed"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn find_binary(name: &str) -> Result<Option<PathBuf>> {
    match which::which(name) {
        Ok(path) => Ok(Some(path)),
        Err(which::Error::CannotFindBinaryPath) => Ok(None),
        Err(e) => Err(Error::BinaryDetection(e.to_string())),
    }
}
