use std::path::Path;

use anyhow::{Context, Result};
use fs_err as fs;
use serde::Serialize;

use crate::config::{Config, Target};
use crate::error::PatternError;
use crate::expand::{expand_paths_with_locale, LocaleIdPolicy};
use crate::locale::{LocalePath, RemoteLocale};
use crate::pattern::{PathPattern, PlaceholderKind, TAG_TOKEN};
use crate::remote::Download;

#[derive(Debug, Clone, Serialize)]
pub struct PullResult {
    pub locale_path: LocalePath,
    /// Bytes written, `None` when nothing was written (dry run or error).
    pub bytes: Option<usize>,
    pub error: Option<String>,
}

impl PullResult {
    pub fn success(locale_path: LocalePath, bytes: Option<usize>) -> Self {
        Self {
            locale_path,
            bytes,
            error: None,
        }
    }

    pub fn error(locale_path: LocalePath, message: String) -> Self {
        Self {
            locale_path,
            bytes: None,
            error: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PullSummary {
    pub downloaded: usize,
    /// Paths listed but not written, in a dry run.
    pub planned: usize,
    pub failed: usize,
    pub results: Vec<PullResult>,
}

impl PullSummary {
    fn record(&mut self, result: PullResult) {
        if result.is_error() {
            self.failed += 1;
        } else if result.bytes.is_some() {
            self.downloaded += 1;
        } else {
            self.planned += 1;
        }
        self.results.push(result);
    }
}

/// The target pattern with its tag filled in, checked to name concrete files.
pub fn target_pattern(target: &Target) -> Result<PathPattern, PatternError> {
    let raw = match target.params.tag.as_deref().filter(|t| !t.is_empty()) {
        Some(tag) => target.file.replace(TAG_TOKEN, tag),
        None => target.file.clone(),
    };
    let pattern = PathPattern::decompose(&raw)?;

    if pattern.has_wildcard() {
        return Err(PatternError::invalid(
            &target.file,
            "pull targets cannot contain wildcards",
        ));
    }
    if pattern.uses(PlaceholderKind::Tag) {
        return Err(PatternError::invalid(
            &target.file,
            format!("{TAG_TOKEN} needs a tag in the target params"),
        ));
    }
    Ok(pattern)
}

/// Local paths a target resolves to, given the remote locales.
pub fn plan_target(
    target: &Target,
    root: &Path,
    locales: &[RemoteLocale],
    policy: LocaleIdPolicy,
) -> Result<Vec<LocalePath>, PatternError> {
    let pattern = target_pattern(target)?;
    expand_paths_with_locale(
        &pattern,
        root,
        target.params.locale_id.as_deref(),
        locales,
        policy,
    )
}

/// Create an empty file, and its parent directories, unless it exists.
pub fn create_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::File::create(path)?;
    Ok(())
}

/// Download every configured target into its local files.
///
/// With `dry_run` the paths are only planned: locale ids are not verified
/// and nothing is written.
pub fn pull(root: &Path, config: &Config, dry_run: bool) -> Result<PullSummary> {
    let remote = config.remote();
    let policy = if dry_run {
        LocaleIdPolicy::Attach
    } else {
        LocaleIdPolicy::Verify
    };
    let mut summary = PullSummary::default();

    for target in config.targets() {
        let pattern = target_pattern(target)?;
        let project_id = config.project_id_for(target.project_id.as_deref(), &target.file)?;
        let file_format = config.file_format_for(target.file_format.as_deref(), &pattern)?;
        let locales = remote
            .locales(project_id)
            .with_context(|| format!("Cannot list locales of project {}", project_id))?;

        let locale_paths = plan_target(target, root, &locales, policy)
            .with_context(|| format!("Cannot resolve pull target '{}'", target.file))?;

        for locale_path in locale_paths {
            if dry_run {
                summary.record(PullResult::success(locale_path, None));
                continue;
            }

            let download = Download {
                locale_id: locale_path.locale_id.clone(),
                file_format: file_format.clone(),
                tag: target.params.tag.clone().filter(|t| !t.is_empty()),
            };
            let written = remote.download(project_id, &download).and_then(|content| {
                create_file(&locale_path.path)?;
                fs::write(&locale_path.path, &content)?;
                Ok(content.len())
            });

            let result = match written {
                Ok(bytes) => {
                    log::info!(
                        "Downloaded locale {} into {}",
                        locale_path.locale_id,
                        locale_path.path.display()
                    );
                    PullResult::success(locale_path, Some(bytes))
                }
                Err(e) => PullResult::error(locale_path, format!("{e:#}")),
            };
            summary.record(result);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::remote::local::LocalRemote;
    use crate::remote::{Remote, Upload};
    use crate::testutil::{create_file as write_file, create_temp_project, remote_locales};

    fn setup() -> (tempfile::TempDir, PathBuf, Config, LocalRemote) {
        let (tmp, root) = create_temp_project();
        let config = Config::new_local(Some("p".to_string()), None, root.join(".lsync-remote"));
        let remote = LocalRemote::new(root.join(".lsync-remote"));
        remote.init().unwrap();
        remote.save_locales("p", &remote_locales()).unwrap();
        (tmp, root, config, remote)
    }

    fn seed(root: &Path, remote: &LocalRemote, locale_id: &str, format: &str, tags: &[&str], content: &[u8]) {
        let source = write_file(root, &format!("seed/{locale_id}.{format}"), content);
        remote
            .upload(
                "p",
                &Upload {
                    path: source,
                    locale_id: locale_id.to_string(),
                    file_format: format.to_string(),
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                    update_translations: true,
                },
            )
            .unwrap();
    }

    #[test]
    fn target_pattern_fills_tag() {
        let mut target = Target::new("./play/<tag>/play.<locale_code>");
        let err = target_pattern(&target).unwrap_err();
        assert!(err.to_string().contains("needs a tag"));

        target.params.tag = Some("app".to_string());
        let pattern = target_pattern(&target).unwrap();
        assert_eq!(pattern.user_path(), "./play/app/play.<locale_code>");
    }

    #[test]
    fn target_pattern_rejects_wildcards() {
        for raw in ["./locales/<locale_code>/*", "./**/<locale_code>.yml", "./<locale_code>/*.yml"] {
            let err = target_pattern(&Target::new(raw)).unwrap_err();
            assert!(matches!(err, PatternError::InvalidPattern { .. }), "{raw}");
        }
    }

    #[test]
    fn plan_target_policies() {
        let root = Path::new("/work");
        let locales = remote_locales();
        let target = Target::new("./all.json");

        let planned = plan_target(&target, root, &locales, LocaleIdPolicy::Attach).unwrap();
        assert_eq!(planned, vec![LocalePath::with_locale_id("/work/all.json", "")]);

        let err = plan_target(&target, root, &locales, LocaleIdPolicy::Verify).unwrap_err();
        assert!(matches!(err, PatternError::MissingLocaleId { .. }));

        let planned = plan_target(&Target::new("./<locale_code>.json"), root, &locales, LocaleIdPolicy::Verify).unwrap();
        assert_eq!(planned.len(), 3);
    }

    #[test]
    fn create_file_makes_parents_and_keeps_content() {
        let (_tmp, root) = create_temp_project();
        let path = root.join("a/b/en.yml");
        create_file(&path).unwrap();
        assert!(path.is_file());

        fs::write(&path, b"keep").unwrap();
        create_file(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"keep");
    }

    #[test]
    fn pull_writes_every_locale() {
        let (_tmp, root, mut config, remote) = setup();
        seed(&root, &remote, "en-locale-id", "yml", &[], b"en: hi");
        seed(&root, &remote, "de-locale-id", "yml", &[], b"de: hallo");
        config.add_target(Target::new("./config/<locale_name>/<locale_code>.yml"));

        let summary = pull(&root, &config, false).unwrap();
        assert_eq!(summary.downloaded, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(fs::read(root.join("config/english/en.yml")).unwrap(), b"en: hi");
        assert_eq!(fs::read(root.join("config/german/de.yml")).unwrap(), b"de: hallo");
    }

    #[test]
    fn pull_with_tag_and_explicit_locale() {
        let (_tmp, root, mut config, remote) = setup();
        seed(&root, &remote, "de-locale-id", "properties", &["app"], b"x=y");

        let mut target = Target::new("./<tag>/play.<locale_code>");
        target.file_format = Some("properties".to_string());
        target.params.tag = Some("app".to_string());
        target.params.locale_id = Some("de-locale-id".to_string());
        config.add_target(target);

        let summary = pull(&root, &config, false).unwrap();
        assert_eq!(summary.downloaded, 1);
        assert_eq!(fs::read(root.join("app/play.de")).unwrap(), b"x=y");
    }

    #[test]
    fn pull_locale_agnostic_target_needs_known_id() {
        let (_tmp, root, mut config, _remote) = setup();
        let mut target = Target::new("./all.json");
        target.params.locale_id = Some("fr-locale-id".to_string());
        config.add_target(target);

        let err = pull(&root, &config, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PatternError>(),
            Some(PatternError::LocaleNotFound { .. })
        ));
        assert!(!root.join("all.json").exists());
    }

    #[test]
    fn failed_download_leaves_no_file() {
        let (_tmp, root, mut config, remote) = setup();
        let mut locales = remote_locales();
        locales.push(RemoteLocale::new("bad/id", "xx", "broken"));
        remote.save_locales("p", &locales).unwrap();
        seed(&root, &remote, "en-locale-id", "yml", &[], b"en: hi");
        config.add_target(Target::new("./out/<locale_code>.yml"));

        let summary = pull(&root, &config, false).unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.downloaded, 3);
        assert!(!root.join("out/xx.yml").exists());
        assert_eq!(fs::read(root.join("out/en.yml")).unwrap(), b"en: hi");
        assert!(root.join("out/de.yml").is_file());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let (_tmp, root, mut config, _remote) = setup();
        config.add_target(Target::new("./locales/<locale_code>.yml"));
        config.add_target(Target::new("./all.yml"));

        let summary = pull(&root, &config, true).unwrap();
        assert_eq!(summary.planned, 4);
        assert_eq!(summary.downloaded, 0);
        assert!(!root.join("locales").exists());
        assert!(!root.join("all.yml").exists());
    }
}
