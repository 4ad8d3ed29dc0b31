//! Expansion of a pattern into concrete per-locale paths.
//!
//! Which expansion applies depends on whether the pattern carries a locale
//! placeholder, whether an explicit locale id was given, and whether the
//! caller needs that id verified. See [`Expansion::select`].

use std::path::Path;

use crate::error::PatternError;
use crate::locale::{locale_for_id, locale_id_for_path, LocalePath, RemoteLocale};
use crate::paths::absolute_path;
use crate::pattern::PathPattern;

/// What to do with a locale id given for a pattern without locale placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleIdPolicy {
    /// Attach the id as given, even when empty.
    #[default]
    Attach,
    /// Require a non-empty id that exists remotely.
    Verify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion<'a> {
    /// Placeholder pattern, explicit id: exactly one path for that locale.
    ExplicitLocaleMatch { locale_id: &'a str },
    /// Placeholder pattern, no id: one path per usable remote locale.
    AllLocales,
    /// No placeholder: the pattern path itself, id attached unchecked.
    LocaleAgnostic { locale_id: &'a str },
    /// No placeholder: the pattern path itself, id checked against the list.
    FallbackDefault { locale_id: &'a str },
}

impl<'a> Expansion<'a> {
    pub fn select(pattern: &PathPattern, locale_id: Option<&'a str>, policy: LocaleIdPolicy) -> Self {
        let locale_id = locale_id.unwrap_or_default();
        match (pattern.has_locale_placeholder(), locale_id.is_empty(), policy) {
            (true, false, _) => Expansion::ExplicitLocaleMatch { locale_id },
            (true, true, _) => Expansion::AllLocales,
            (false, _, LocaleIdPolicy::Attach) => Expansion::LocaleAgnostic { locale_id },
            (false, _, LocaleIdPolicy::Verify) => Expansion::FallbackDefault { locale_id },
        }
    }

    /// Run the expansion. Either every path is produced or an error is.
    pub fn expand(
        &self,
        pattern: &PathPattern,
        base: &Path,
        locales: &[RemoteLocale],
    ) -> Result<Vec<LocalePath>, PatternError> {
        match *self {
            Expansion::ExplicitLocaleMatch { locale_id } => {
                let locale = locale_for_id(locale_id, locales)
                    .filter(|locale| pattern.is_path_for_locale(locale))
                    .ok_or_else(|| PatternError::locale_not_found(locale_id))?;
                Ok(vec![locale_path(pattern, base, locale)])
            }
            Expansion::AllLocales => Ok(locales
                .iter()
                .filter(|locale| pattern.is_path_for_locale(locale))
                .map(|locale| locale_path(pattern, base, locale))
                .collect()),
            Expansion::LocaleAgnostic { locale_id } => Ok(vec![LocalePath::with_locale_id(
                absolute_path(base, pattern.user_path()),
                locale_id,
            )]),
            Expansion::FallbackDefault { locale_id } => {
                if locale_id.is_empty() {
                    return Err(PatternError::MissingLocaleId {
                        pattern: pattern.raw().to_string(),
                    });
                }
                let matched = locale_id_for_path(locale_id, locales)
                    .ok_or_else(|| PatternError::locale_not_found(locale_id))?;
                Ok(vec![LocalePath::with_locale_id(
                    absolute_path(base, pattern.user_path()),
                    matched,
                )])
            }
        }
    }
}

fn locale_path(pattern: &PathPattern, base: &Path, locale: &RemoteLocale) -> LocalePath {
    let path = absolute_path(base, &pattern.substitute(&locale.name, &locale.code));
    LocalePath::with_locale(path, locale)
}

/// Turn a pattern into the concrete paths it stands for, relative to `base`.
pub fn expand_paths_with_locale(
    pattern: &PathPattern,
    base: &Path,
    locale_id: Option<&str>,
    locales: &[RemoteLocale],
    policy: LocaleIdPolicy,
) -> Result<Vec<LocalePath>, PatternError> {
    let expansion = Expansion::select(pattern, locale_id, policy);
    log::debug!("Expanding '{}' as {:?}", pattern.raw(), expansion);
    let paths = expansion.expand(pattern, base, locales)?;
    log::debug!("Pattern '{}' expanded to {} path(s)", pattern.raw(), paths.len());
    Ok(paths)
}
