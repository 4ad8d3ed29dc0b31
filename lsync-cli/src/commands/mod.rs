//! lsync command implementations.
//!
//! Each subcommand is implemented in its own module and delegates
//! to lsync-core for the actual work.

pub mod completions;
pub mod info;
pub mod init;
pub mod pull;
pub mod push;

use std::io;

use lsync_core::{Config, LsyncPaths, PatternError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// lsync-core error.
    #[error("{0:#}")]
    Core(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("Path error: {0}")]
    Path(String),

    /// Some files could not be transferred.
    #[error("{0}")]
    Failed(String),
}

impl CliError {
    /// Stable identifier of the error kind, used in `--json` output.
    pub fn error_type(&self) -> &'static str {
        match self {
            CliError::Core(e) => e
                .downcast_ref::<PatternError>()
                .map(PatternError::error_type)
                .unwrap_or("error"),
            CliError::Io(_) => "io",
            CliError::InvalidArg(_) => "invalid_argument",
            CliError::Path(_) => "path",
            CliError::Failed(_) => "transfer_failed",
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Core(e.into())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Paths and configuration of the project the user is in.
pub fn load_project() -> Result<(LsyncPaths, Config)> {
    let paths = LsyncPaths::from_cwd()?;
    let config = Config::find(paths.cwd())
        .ok_or_else(|| CliError::Path("Not in an lsync project, run `lsync init` first".to_string()))??;
    Ok((paths, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_type_looks_through_anyhow() {
        let err: CliError = anyhow::Error::from(PatternError::MissingLocaleId {
            pattern: "./x.json".to_string(),
        })
        .into();
        assert_eq!(err.error_type(), "missing_locale_id");
        assert_eq!(err.to_string(), "no target locale id specified for './x.json'");

        let err: CliError = anyhow::anyhow!("boom").into();
        assert_eq!(err.error_type(), "error");
    }
}
