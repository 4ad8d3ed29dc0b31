use std::path::Path;

use anyhow::{anyhow, bail, Result};

use crate::config::Config;
use crate::paths::find_project_root;

/// Starts a new lsync project.
/// Writes the config at the project root and prepares its remote.
pub fn init(current_dir: impl AsRef<Path>, config: Config) -> Result<()> {
    if Config::find(&current_dir).is_some() {
        bail!(
            "Configuration already exists in {}",
            current_dir.as_ref().display()
        );
    }
    let project_root =
        find_project_root(&current_dir).ok_or_else(|| anyhow!("Cannot find project root"))?;
    config.validate()?;
    config.save(&project_root)?;
    log::debug!("Initializing remote");
    config.remote().init()?;
    log::info!("lsync project initialized successfully");
    Ok(())
}
