use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use fs_err::{self as fs, OpenOptions};
use serde::{Deserialize, Serialize};

use crate::locale::RemoteLocale;
use crate::remote::{Download, NewLocale, Remote, Upload};

const LOCALES_FILENAME: &str = "locales.json";
const UPLOAD_LOG_FILENAME: &str = "uploads.jsonl";

/// One line of the upload log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub timestamp: String,
    pub source: PathBuf,
    pub locale_id: String,
    pub file_format: String,
    pub tags: Vec<String>,
    /// The stored content was kept because updates were not allowed.
    pub skipped: bool,
}

/// A remote kept in a plain directory:
///
/// ```text
/// <path>/projects/<project_id>/locales.json
/// <path>/projects/<project_id>/files/<locale_id>.<format>
/// <path>/projects/<project_id>/files/tags/<tag>/<locale_id>.<format>
/// <path>/projects/<project_id>/uploads.jsonl
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocalRemote {
    pub path: PathBuf,
}

impl LocalRemote {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn project_dir(&self, project_id: &str) -> Result<PathBuf> {
        check_name("project id", project_id)?;
        Ok(self.path.join("projects").join(project_id))
    }

    fn file_path(
        &self,
        project_id: &str,
        locale_id: &str,
        file_format: &str,
        tag: Option<&str>,
    ) -> Result<PathBuf> {
        check_name("locale id", locale_id)?;
        check_name("file format", file_format)?;
        let mut dir = self.project_dir(project_id)?.join("files");
        if let Some(tag) = tag {
            check_name("tag", tag)?;
            dir = dir.join("tags").join(tag);
        }
        Ok(dir.join(format!("{locale_id}.{file_format}")))
    }

    /// Replace the locale list of a project.
    pub fn save_locales(&self, project_id: &str, locales: &[RemoteLocale]) -> Result<()> {
        let dir = self.project_dir(project_id)?;
        fs::create_dir_all(&dir)?;
        let content = serde_json::to_string_pretty(locales)?;
        fs::write(dir.join(LOCALES_FILENAME), content)?;
        Ok(())
    }

    /// Every upload recorded for a project, oldest first.
    pub fn uploads(&self, project_id: &str) -> Result<Vec<UploadRecord>> {
        let log_path = self.project_dir(project_id)?.join(UPLOAD_LOG_FILENAME);
        if !log_path.is_file() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&log_path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .with_context(|| format!("Invalid entry in {}", log_path.display()))
            })
            .collect()
    }

    fn log_upload(&self, project_id: &str, record: &UploadRecord) -> Result<()> {
        let log_path = self.project_dir(project_id)?.join(UPLOAD_LOG_FILENAME);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        let json = serde_json::to_string(record)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}

impl Remote for LocalRemote {
    fn init(&self) -> Result<()> {
        log::debug!("Creating remote directory: {}", self.path.display());
        fs::create_dir_all(self.path.join("projects"))?;
        log::info!("Initialized local remote at {}", self.path.display());
        Ok(())
    }

    fn locales(&self, project_id: &str) -> Result<Vec<RemoteLocale>> {
        let path = self.project_dir(project_id)?.join(LOCALES_FILENAME);
        if !path.is_file() {
            log::debug!("No locales stored for project {}", project_id);
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn create_locale(&self, project_id: &str, locale: &NewLocale) -> Result<RemoteLocale> {
        let mut locales = self.locales(project_id)?;
        let id = unique_id(&locale.code, &locale.name, &locales)?;
        let created = RemoteLocale::new(id, locale.code.as_str(), locale.name.as_str());
        locales.push(created.clone());
        self.save_locales(project_id, &locales)?;
        log::info!("Created locale {} in project {}", created.id, project_id);
        Ok(created)
    }

    fn upload(&self, project_id: &str, upload: &Upload) -> Result<()> {
        let content = fs::read(&upload.path)?;

        let mut targets = vec![self.file_path(project_id, &upload.locale_id, &upload.file_format, None)?];
        for tag in &upload.tags {
            targets.push(self.file_path(project_id, &upload.locale_id, &upload.file_format, Some(tag.as_str()))?);
        }

        let mut skipped = false;
        for target in &targets {
            if target.is_file() && !upload.update_translations {
                log::debug!("Keeping existing {}", target.display());
                skipped = true;
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, &content)?;
        }

        self.log_upload(
            project_id,
            &UploadRecord {
                timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                source: upload.path.clone(),
                locale_id: upload.locale_id.clone(),
                file_format: upload.file_format.clone(),
                tags: upload.tags.clone(),
                skipped,
            },
        )?;
        Ok(())
    }

    fn download(&self, project_id: &str, download: &Download) -> Result<Vec<u8>> {
        let path = self.file_path(
            project_id,
            &download.locale_id,
            &download.file_format,
            download.tag.as_deref(),
        )?;
        if path.is_file() {
            Ok(fs::read(&path)?)
        } else {
            log::debug!("Nothing stored at {}", path.display());
            Ok(Vec::new())
        }
    }
}

/// Names are used as path components in the store.
fn check_name(what: &str, value: &str) -> Result<()> {
    if value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(|c: char| c == '/' || c == '\\')
    {
        bail!("Invalid {} '{}'", what, value);
    }
    Ok(())
}

/// `<code>-locale-id` (or from the name when there is no code), suffixed
/// with a counter when already taken.
fn unique_id(code: &str, name: &str, existing: &[RemoteLocale]) -> Result<String> {
    let source = if code.is_empty() { name } else { code };
    let slug: String = source
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        bail!("Cannot create a locale without a code or a name");
    }

    let base = format!("{slug}-locale-id");
    let taken = |id: &str| existing.iter().any(|l| l.id == id);
    let mut id = base.clone();
    let mut n = 1;
    while taken(&id) {
        n += 1;
        id = format!("{base}-{n}");
    }
    Ok(id)
}
