//! lsync init command.

use std::path::PathBuf;

use lsync_core::config::Config;
use lsync_core::find_project_root;
use lsync_core::paths::DEFAULT_REMOTE_FOLDER_NAME;
use serde_json::json;

use super::{CliError, Result};
use crate::output::Output;
use crate::paths;

/// Run the init command.
pub fn run(
    output: &Output,
    project_id: String,
    file_format: Option<String>,
    remote: Option<PathBuf>,
) -> Result<()> {
    if project_id.trim().is_empty() {
        return Err(CliError::InvalidArg("project id cannot be empty".to_string()));
    }

    let current_dir = std::env::current_dir()?;
    let remote_dir = match remote {
        Some(dir) => paths::resolve_path(&dir)?,
        None => find_project_root(&current_dir)
            .ok_or_else(|| CliError::Path("Cannot find project root".to_string()))?
            .join(DEFAULT_REMOTE_FOLDER_NAME),
    };

    let config = Config::new_local(Some(project_id), file_format, &remote_dir);
    lsync_core::init::init(&current_dir, config)?;

    if output.is_json() {
        output.json(&json!({"status": "initialized", "remote": remote_dir}))?;
    } else {
        output.success(&format!(
            "Initialized lsync with remote at: {}",
            remote_dir.display()
        ));
    }
    Ok(())
}
