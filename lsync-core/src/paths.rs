use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Result};
use fs_err as fs;

pub const CONFIG_FILE_NAME: &str = ".lsync.toml";
pub const DEFAULT_REMOTE_FOLDER_NAME: &str = ".lsync-remote";

/// Finds the root of a project by walking up from the given directory
/// until a `.lsync.toml` or a `.git` folder is found.
///
/// Returns `None` if neither is found before reaching the filesystem root.
pub fn find_project_root(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut dir = start_dir.as_ref();
    log::debug!("Searching for project root starting from {}", dir.display());

    loop {
        if dir.join(CONFIG_FILE_NAME).exists() || dir.join(".git").exists() {
            log::debug!("Found project root at {}", dir.display());
            return Some(dir.to_path_buf());
        }

        dir = dir.parent()?;
    }
}

/// Normalize a path by resolving `.` and `..` components, without touching
/// the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            Component::CurDir => {}
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// `base` joined with `user_path`, normalized. An absolute `user_path` wins.
pub fn absolute_path(base: &Path, user_path: &str) -> PathBuf {
    normalize_path(&base.join(user_path))
}

/// Where the user is and where the project root is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LsyncPaths {
    /// Canonicalized path of where the user currently is
    cwd: PathBuf,
    /// Canonicalized path of the directory holding `.lsync.toml`
    root: PathBuf,
}

impl LsyncPaths {
    /// Create with explicit paths (for testing)
    pub fn new(cwd: PathBuf, root: PathBuf) -> Self {
        Self { cwd, root }
    }

    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let cwd = fs::canonicalize(dir.as_ref())?;
        let root = fs::canonicalize(
            find_project_root(&cwd).ok_or_else(|| anyhow!("Not in an lsync project"))?,
        )?;

        log::debug!(
            "Resolved paths: cwd={}, root={}",
            cwd.display(),
            root.display()
        );
        Ok(Self { cwd, root })
    }

    pub fn from_cwd() -> Result<Self> {
        Self::from_dir(std::env::current_dir()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Path for display: relative to cwd with a leading `.`, or unchanged
    /// when outside of it.
    pub fn display_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.cwd) {
            Ok(rel) => Path::new(".").join(rel).display().to_string(),
            Err(_) => path.display().to_string(),
        }
    }
}
