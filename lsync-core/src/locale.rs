//! Remote locale records and lookups over them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A locale as known by the remote service. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLocale {
    pub id: String,
    pub code: String,
    pub name: String,
}

impl RemoteLocale {
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A concrete local path paired with the locale it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalePath {
    /// Absolute path of the local file.
    pub path: PathBuf,
    pub locale_id: String,
    pub locale_name: String,
    pub locale_code: String,
}

impl LocalePath {
    pub fn with_locale(path: impl Into<PathBuf>, locale: &RemoteLocale) -> Self {
        Self {
            path: path.into(),
            locale_id: locale.id.clone(),
            locale_name: locale.name.clone(),
            locale_code: locale.code.clone(),
        }
    }

    pub fn with_locale_id(path: impl Into<PathBuf>, locale_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            locale_id: locale_id.into(),
            locale_name: String::new(),
            locale_code: String::new(),
        }
    }
}

/// Find the record with the given id.
pub fn locale_for_id<'a>(locale_id: &str, locales: &'a [RemoteLocale]) -> Option<&'a RemoteLocale> {
    locales.iter().find(|locale| locale.id == locale_id)
}

/// Returns the id back if a record with that id exists.
pub fn locale_id_for_path<'a>(locale_id: &str, locales: &'a [RemoteLocale]) -> Option<&'a str> {
    locale_for_id(locale_id, locales).map(|locale| locale.id.as_str())
}

/// Find the record matching a locale name and/or code taken from a file path.
///
/// Empty inputs are not compared. With both empty nothing can match.
pub fn locale_for_name_and_code<'a>(
    name: &str,
    code: &str,
    locales: &'a [RemoteLocale],
) -> Option<&'a RemoteLocale> {
    if name.is_empty() && code.is_empty() {
        return None;
    }
    locales.iter().find(|locale| {
        (name.is_empty() || locale.name == name) && (code.is_empty() || locale.code == code)
    })
}
