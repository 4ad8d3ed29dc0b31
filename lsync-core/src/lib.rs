pub mod config;
pub mod error;
pub mod expand;
pub mod init;
pub mod locale;
pub mod paths;
pub mod pattern;
pub mod pull;
pub mod push;
pub mod remote;

pub use config::{Config, Source, Target};
pub use error::PatternError;
pub use expand::{expand_paths_with_locale, Expansion, LocaleIdPolicy};
pub use locale::{locale_for_id, locale_for_name_and_code, locale_id_for_path, LocalePath, RemoteLocale};
pub use paths::{find_project_root, LsyncPaths};
pub use pattern::{MatchResult, Matcher, PathPattern, PlaceholderKind};
pub use pull::{pull, PullResult, PullSummary};
pub use push::{push, LocaleFile, PushResult, PushSummary};
pub use remote::Remote;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub mod testutil {
    use crate::locale::RemoteLocale;
    use fs_err as fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Creates a temporary directory with a .git folder, so it is found as
    /// a project root. Returns the TempDir (owns the directory) and its path.
    ///
    /// IMPORTANT: Keep the TempDir alive for the duration of the test,
    /// otherwise the directory gets deleted.
    pub fn create_temp_project() -> (TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        fs::create_dir(root.join(".git")).unwrap();
        (tmp, root)
    }

    /// Creates a file with the given content, and its parent directories.
    /// Returns the full path to the created file.
    pub fn create_file(dir: &Path, relative_path: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// en and de are complete, the others lack a name or a code.
    pub fn remote_locales() -> Vec<RemoteLocale> {
        vec![
            RemoteLocale::new("en-locale-id", "en", "english"),
            RemoteLocale::new("de-locale-id", "de", "german"),
            RemoteLocale::new("nameless-locale-id", "pt-BR", ""),
            RemoteLocale::new("legacy-locale-id", "", "legacy"),
        ]
    }
}
