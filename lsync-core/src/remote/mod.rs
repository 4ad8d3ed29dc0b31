use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::locale::RemoteLocale;

pub mod local;

/// A locale to be created remotely. At least one of the fields is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLocale {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Local file whose content is sent.
    pub path: PathBuf,
    pub locale_id: String,
    pub file_format: String,
    pub tags: Vec<String>,
    /// Overwrite translations that already exist remotely.
    pub update_translations: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub locale_id: String,
    pub file_format: String,
    /// Restrict the content to keys uploaded with this tag.
    pub tag: Option<String>,
}

pub trait Remote: Send + Sync {
    /// Prepare the remote storage (create directories, etc.)
    fn init(&self) -> Result<()>;

    /// All locales of a project, in the order the remote lists them.
    fn locales(&self, project_id: &str) -> Result<Vec<RemoteLocale>>;

    /// Create a locale and return the stored record, including its new id.
    fn create_locale(&self, project_id: &str, locale: &NewLocale) -> Result<RemoteLocale>;

    fn upload(&self, project_id: &str, upload: &Upload) -> Result<()>;

    /// Content of a locale in the given format. Empty when nothing was uploaded.
    fn download(&self, project_id: &str, download: &Download) -> Result<Vec<u8>>;
}
