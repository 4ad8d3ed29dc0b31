//! Path resolution utilities for the CLI.
//!
//! Handles working directory changes and tilde expansion.

use std::path::{Path, PathBuf};

use crate::commands::{CliError, Result};

/// Change the current working directory.
pub fn set_cwd(path: &Path) -> Result<()> {
    let resolved = resolve_path(path)?;

    if !resolved.exists() {
        return Err(CliError::Path(format!(
            "Directory does not exist: {}",
            resolved.display()
        )));
    }

    if !resolved.is_dir() {
        return Err(CliError::Path(format!(
            "Not a directory: {}",
            resolved.display()
        )));
    }

    std::env::set_current_dir(&resolved)
        .map_err(|e| CliError::Path(format!("Failed to change to {}: {}", resolved.display(), e)))
}

/// Resolve a path, expanding ~ and making it absolute.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    let expanded = if let Some(rest) = path_str.strip_prefix("~/") {
        match home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        }
    } else if path_str == "~" {
        home_dir().unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    };

    if expanded.is_absolute() {
        Ok(lsync_core::paths::normalize_path(&expanded))
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| CliError::Path(format!("Failed to get current directory: {}", e)))?;
        Ok(lsync_core::paths::normalize_path(&cwd.join(expanded)))
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
