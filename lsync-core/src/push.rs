use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::config::{Config, PushParams, Source};
use crate::error::PatternError;
use crate::locale::{locale_for_name_and_code, locale_id_for_path, LocalePath, RemoteLocale};
use crate::paths::absolute_path;
use crate::pattern::{Matcher, PathPattern, LOCALE_CODE_TOKEN, LOCALE_NAME_TOKEN};
use crate::remote::{NewLocale, Remote, Upload};

/// A local file found for a push source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocaleFile {
    /// Absolute path.
    pub path: PathBuf,
    /// Locale code read from the path.
    pub rfc: String,
    /// Locale name read from the path.
    pub name: String,
    pub tag: String,
    /// Remote locale id, once resolved.
    pub id: String,
    /// The locale exists remotely, either found or created by this push.
    pub exists_remote: bool,
}

impl LocaleFile {
    pub fn locale_path(&self) -> LocalePath {
        LocalePath {
            path: self.path.clone(),
            locale_id: self.id.clone(),
            locale_name: self.name.clone(),
            locale_code: self.rfc.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PushResult {
    pub file: LocaleFile,
    /// The locale was created remotely for this file.
    pub created_locale: bool,
    pub error: Option<String>,
}

impl PushResult {
    pub fn success(file: LocaleFile, created_locale: bool) -> Self {
        Self {
            file,
            created_locale,
            error: None,
        }
    }

    pub fn error(file: LocaleFile, message: String) -> Self {
        Self {
            file,
            created_locale: false,
            error: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PushSummary {
    pub uploaded: usize,
    /// Locales created remotely along the way.
    pub created: usize,
    pub failed: usize,
    pub results: Vec<PushResult>,
}

impl PushSummary {
    fn record(&mut self, result: PushResult) {
        if result.is_error() {
            self.failed += 1;
        } else {
            self.uploaded += 1;
            if result.created_locale {
                self.created += 1;
            }
        }
        self.results.push(result);
    }
}

/// Files on disk satisfying a source pattern, with their placeholder values.
///
/// Relative patterns are resolved against `root`. A pattern without
/// placeholders or wildcards names a single file, which must exist.
pub fn locale_files(source: &Source, root: &Path) -> Result<Vec<LocaleFile>> {
    let pattern = PathPattern::decompose(&source.file)?;

    if pattern.is_literal() {
        let path = absolute_path(root, pattern.user_path());
        if !path.is_file() {
            bail!("No such file: {}", path.display());
        }
        return Ok(vec![LocaleFile {
            path,
            ..Default::default()
        }]);
    }

    let matcher = Matcher::compile(&pattern)?;
    let glob_pattern = if pattern.is_absolute() {
        pattern.to_glob()
    } else {
        format!(
            "{}/{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            pattern.to_glob()
        )
    };
    log::debug!("Scanning {} for '{}'", glob_pattern, source.file);

    let mut files = Vec::new();
    for entry in glob::glob(&glob_pattern)
        .with_context(|| format!("Cannot scan files for '{}'", source.file))?
    {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        let candidate = if pattern.is_absolute() {
            path.to_string_lossy().to_string()
        } else {
            match path.strip_prefix(root) {
                Ok(rel) => rel.to_string_lossy().to_string(),
                Err(_) => continue,
            }
        };

        match matcher.eval(&candidate) {
            Ok(m) => files.push(LocaleFile {
                path: absolute_path(root, &candidate),
                rfc: m.rfc,
                name: m.name,
                tag: m.tag,
                ..Default::default()
            }),
            Err(e) => log::debug!("Skipping {}: {}", candidate, e),
        }
    }

    log::debug!("Found {} file(s) for '{}'", files.len(), source.file);
    Ok(files)
}

/// The params' locale id with `<locale_code>` and `<locale_name>` filled
/// from the file.
pub fn replace_placeholders_in_params(params: &PushParams, file: &LocaleFile) -> Option<String> {
    params.locale_id.as_ref().map(|id| {
        id.replace(LOCALE_CODE_TOKEN, &file.rfc)
            .replace(LOCALE_NAME_TOKEN, &file.name)
    })
}

/// Find the remote locale a file belongs to, creating it when the file names
/// a locale that doesn't exist yet. Newly created locales are appended to
/// `locales`. Returns whether a locale was created.
pub fn resolve_locale(
    file: &mut LocaleFile,
    source: &Source,
    locales: &mut Vec<RemoteLocale>,
    remote: &dyn Remote,
    project_id: &str,
) -> Result<bool> {
    let explicit = replace_placeholders_in_params(&source.params, file).filter(|id| !id.is_empty());

    if let Some(id) = explicit {
        let found = locale_id_for_path(&id, locales).ok_or_else(|| PatternError::locale_not_found(&id))?;
        file.id = found.to_string();
        file.exists_remote = true;
        return Ok(false);
    }

    if let Some(found) = locale_for_name_and_code(&file.name, &file.rfc, locales) {
        file.id = found.id.clone();
        if file.name.is_empty() {
            file.name = found.name.clone();
        }
        if file.rfc.is_empty() {
            file.rfc = found.code.clone();
        }
        file.exists_remote = true;
        return Ok(false);
    }

    if file.name.is_empty() && file.rfc.is_empty() {
        return Err(PatternError::MissingLocaleId {
            pattern: source.file.clone(),
        }
        .into());
    }

    let created = remote.create_locale(
        project_id,
        &NewLocale {
            code: file.rfc.clone(),
            name: file.name.clone(),
        },
    )?;
    file.id = created.id.clone();
    file.exists_remote = true;
    locales.push(created);
    Ok(true)
}

fn upload_tags(params: &PushParams, file: &LocaleFile) -> Vec<String> {
    let mut tags = params.tags.clone();
    if !file.tag.is_empty() && !tags.contains(&file.tag) {
        tags.push(file.tag.clone());
    }
    tags
}

fn push_file(
    file: &mut LocaleFile,
    source: &Source,
    locales: &mut Vec<RemoteLocale>,
    remote: &dyn Remote,
    project_id: &str,
    file_format: &str,
) -> Result<bool> {
    let created = resolve_locale(file, source, locales, remote, project_id)?;
    remote.upload(
        project_id,
        &Upload {
            path: file.path.clone(),
            locale_id: file.id.clone(),
            file_format: file_format.to_string(),
            tags: upload_tags(&source.params, file),
            update_translations: source.params.update_translations.unwrap_or(false),
        },
    )?;
    log::info!("Uploaded {} to locale {}", file.path.display(), file.id);
    Ok(created)
}

/// Upload every file of every configured source.
///
/// Errors in a source (bad pattern, missing project, unreachable remote)
/// abort the push. Errors for a single file are recorded in its result.
pub fn push(root: &Path, config: &Config) -> Result<PushSummary> {
    let remote = config.remote();
    let mut summary = PushSummary::default();
    let mut seen = HashSet::new();

    for source in config.sources() {
        let pattern = PathPattern::decompose(&source.file)?;
        let project_id = config.project_id_for(source.project_id.as_deref(), &source.file)?;
        let file_format = config.file_format_for(source.file_format.as_deref(), &pattern)?;
        let mut locales = remote
            .locales(project_id)
            .with_context(|| format!("Cannot list locales of project {}", project_id))?;

        let files = locale_files(source, root)
            .with_context(|| format!("Cannot collect files for '{}'", source.file))?;

        for mut file in files {
            if !seen.insert(file.path.clone()) {
                log::debug!("Already pushed {}", file.path.display());
                continue;
            }
            let result = match push_file(&mut file, source, &mut locales, remote, project_id, &file_format) {
                Ok(created) => PushResult::success(file, created),
                Err(e) => PushResult::error(file, format!("{e:#}")),
            };
            summary.record(result);
        }
    }

    Ok(summary)
}
