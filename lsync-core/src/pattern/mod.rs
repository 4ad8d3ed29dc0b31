//! Path patterns with locale placeholders.
//!
//! A pattern such as `./config/<tag>/<locale_code>.yml` is decomposed into
//! segments made of literal text, placeholders and inline `*` wildcards.
//! The decomposed form is then compiled into a [`Matcher`] or expanded
//! against remote locales (see [`crate::expand`]).

mod matcher;

use std::path::is_separator;

use crate::error::PatternError;
use crate::locale::RemoteLocale;

pub use matcher::{MatchResult, Matcher};

pub const LOCALE_CODE_TOKEN: &str = "<locale_code>";
pub const LOCALE_NAME_TOKEN: &str = "<locale_name>";
pub const TAG_TOKEN: &str = "<tag>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    LocaleCode,
    LocaleName,
    Tag,
}

impl PlaceholderKind {
    pub const ALL: [PlaceholderKind; 3] = [
        PlaceholderKind::LocaleCode,
        PlaceholderKind::LocaleName,
        PlaceholderKind::Tag,
    ];

    /// The literal text of the placeholder in a pattern.
    pub fn token(self) -> &'static str {
        match self {
            PlaceholderKind::LocaleCode => LOCALE_CODE_TOKEN,
            PlaceholderKind::LocaleName => LOCALE_NAME_TOKEN,
            PlaceholderKind::Tag => TAG_TOKEN,
        }
    }
}

/// One piece of a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Literal(String),
    Placeholder(PlaceholderKind),
    /// An inline `*`, matching any text inside the segment.
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A single path component, e.g. `<tag>.<locale_code>` or `locales`.
    Parts(Vec<Part>),
    /// A whole-component `**`: zero or more directories.
    AnyDirs,
}

impl Segment {
    fn uses(&self, kind: PlaceholderKind) -> bool {
        match self {
            Segment::Parts(parts) => parts.contains(&Part::Placeholder(kind)),
            Segment::AnyDirs => false,
        }
    }

    fn is_literal(&self) -> bool {
        match self {
            Segment::Parts(parts) => parts.iter().all(|p| matches!(p, Part::Literal(_))),
            Segment::AnyDirs => false,
        }
    }
}

/// The extension slot of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    None,
    Literal(String),
    /// The file extension is the locale code, as in `play.<locale_code>`.
    LocaleCode,
}

/// Glob suffix of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobMode {
    None,
    /// Trailing `/*`: exactly one arbitrary segment.
    SingleSegment,
    /// Trailing `**/*`: any number of directories, then one segment.
    RecursiveAny,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    /// The raw pattern without its glob suffix, trimmed.
    user_path: String,
    absolute: bool,
    segments: Vec<Segment>,
    extension: Extension,
    glob_mode: GlobMode,
}

impl PathPattern {
    /// Split a user path into segments and classify them.
    pub fn decompose(raw: &str) -> Result<Self, PatternError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PatternError::invalid(raw, "pattern is empty"));
        }

        let (glob_mode, rest) = split_glob_suffix(trimmed);
        let user_path = rest.trim().to_string();
        let absolute = user_path.starts_with(is_separator);

        let mut components: Vec<&str> = user_path
            .split(is_separator)
            .filter(|c| !c.is_empty() && *c != ".")
            .collect();

        // `dir/**` reads the same as `dir/**/*`
        let glob_mode = if glob_mode == GlobMode::None && components.last() == Some(&"**") {
            components.pop();
            GlobMode::RecursiveAny
        } else {
            glob_mode
        };

        if components.is_empty() && glob_mode == GlobMode::None {
            return Err(PatternError::invalid(raw, "pattern has no path components"));
        }

        let segments: Vec<Segment> = components.iter().map(|c| parse_segment(c)).collect();

        let extension = match (glob_mode, components.last()) {
            (GlobMode::None, Some(last)) => parse_extension(raw, last)?,
            _ => Extension::None,
        };

        if extension == Extension::LocaleCode {
            let code_segments = segments
                .iter()
                .filter(|s| s.uses(PlaceholderKind::LocaleCode))
                .count();
            let code_parts = components
                .iter()
                .map(|c| c.matches(LOCALE_CODE_TOKEN).count())
                .sum::<usize>();
            if code_segments > 1 || code_parts > 1 {
                return Err(PatternError::invalid(
                    raw,
                    format!("{LOCALE_CODE_TOKEN} is the extension and cannot appear elsewhere"),
                ));
            }
        }

        log::debug!(
            "Decomposed pattern '{}' into {} segment(s), glob {:?}, extension {:?}",
            raw,
            segments.len(),
            glob_mode,
            extension
        );

        Ok(Self {
            raw: raw.to_string(),
            user_path,
            absolute,
            segments,
            extension,
            glob_mode,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn user_path(&self) -> &str {
        &self.user_path
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    pub fn glob_mode(&self) -> GlobMode {
        self.glob_mode
    }

    pub fn uses(&self, kind: PlaceholderKind) -> bool {
        self.segments.iter().any(|s| s.uses(kind))
    }

    /// Placeholder kinds present in the pattern (code, name, tag order).
    pub fn placeholders(&self) -> Vec<PlaceholderKind> {
        PlaceholderKind::ALL
            .into_iter()
            .filter(|kind| self.uses(*kind))
            .collect()
    }

    pub fn has_locale_placeholder(&self) -> bool {
        self.uses(PlaceholderKind::LocaleCode) || self.uses(PlaceholderKind::LocaleName)
    }

    /// True when the pattern names exactly one file: no placeholders, no
    /// wildcards, no glob suffix.
    pub fn is_literal(&self) -> bool {
        self.glob_mode == GlobMode::None && self.segments.iter().all(Segment::is_literal)
    }

    /// Inline `*`, `**` components or a glob suffix.
    pub fn has_wildcard(&self) -> bool {
        self.glob_mode != GlobMode::None
            || self.segments.iter().any(|s| match s {
                Segment::AnyDirs => true,
                Segment::Parts(parts) => parts.contains(&Part::Wildcard),
            })
    }

    /// Whether the pattern can produce a path for this locale: every locale
    /// field the pattern uses must be non-empty on the record.
    pub fn is_path_for_locale(&self, locale: &RemoteLocale) -> bool {
        self.has_locale_placeholder()
            && (!self.uses(PlaceholderKind::LocaleCode) || !locale.code.is_empty())
            && (!self.uses(PlaceholderKind::LocaleName) || !locale.name.is_empty())
    }

    /// The user path with the locale name then the locale code substituted.
    pub fn substitute(&self, locale_name: &str, locale_code: &str) -> String {
        self.user_path
            .replace(LOCALE_NAME_TOKEN, locale_name)
            .replace(LOCALE_CODE_TOKEN, locale_code)
    }

    /// The pattern as a filesystem glob, placeholders turned into `*`.
    pub fn to_glob(&self) -> String {
        let mut components: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::AnyDirs => "**".to_string(),
                Segment::Parts(parts) => {
                    let mut out = String::new();
                    for part in parts {
                        match part {
                            Part::Literal(lit) => out.push_str(&glob::Pattern::escape(lit)),
                            Part::Placeholder(_) | Part::Wildcard => {
                                if !out.ends_with('*') {
                                    out.push('*');
                                }
                            }
                        }
                    }
                    out
                }
            })
            .collect();

        match self.glob_mode {
            GlobMode::None => {}
            GlobMode::SingleSegment => components.push("*".to_string()),
            GlobMode::RecursiveAny => {
                components.push("**".to_string());
                components.push("*".to_string());
            }
        }

        let joined = components.join("/");
        if self.absolute {
            format!("/{joined}")
        } else {
            joined
        }
    }
}

/// Strip a trailing `**/*` or `/*`. A `*` glued to other text stays in
/// its segment as an inline wildcard.
fn split_glob_suffix(s: &str) -> (GlobMode, &str) {
    let Some(head) = s.strip_suffix('*') else {
        return (GlobMode::None, s);
    };

    if let Some(dirs) = head
        .strip_suffix(is_separator)
        .and_then(|h| h.strip_suffix("**"))
    {
        if dirs.is_empty() || dirs.ends_with(is_separator) {
            return (GlobMode::RecursiveAny, dirs);
        }
    }

    if head.is_empty() || head.ends_with(is_separator) {
        return (GlobMode::SingleSegment, head);
    }

    (GlobMode::None, s)
}

fn parse_segment(component: &str) -> Segment {
    if component == "**" {
        return Segment::AnyDirs;
    }

    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = component;

    while let Some(ch) = rest.chars().next() {
        let placeholder = PlaceholderKind::ALL
            .into_iter()
            .find_map(|kind| rest.strip_prefix(kind.token()).map(|tail| (kind, tail)));

        if let Some((kind, tail)) = placeholder {
            flush_literal(&mut literal, &mut parts);
            parts.push(Part::Placeholder(kind));
            rest = tail;
            continue;
        }

        if ch == '*' {
            flush_literal(&mut literal, &mut parts);
            if parts.last() != Some(&Part::Wildcard) {
                parts.push(Part::Wildcard);
            }
        } else {
            literal.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }
    flush_literal(&mut literal, &mut parts);

    Segment::Parts(parts)
}

fn flush_literal(literal: &mut String, parts: &mut Vec<Part>) {
    if !literal.is_empty() {
        parts.push(Part::Literal(std::mem::take(literal)));
    }
}

fn parse_extension(raw: &str, last: &str) -> Result<Extension, PatternError> {
    // A leading dot names a dotfile, not an extension
    let dot = match last.rfind('.') {
        Some(0) | None => return Ok(Extension::None),
        Some(i) => i,
    };
    let ext = &last[dot + 1..];

    if ext == LOCALE_CODE_TOKEN {
        return Ok(Extension::LocaleCode);
    }
    if let Some(kind) = PlaceholderKind::ALL
        .into_iter()
        .find(|kind| ext.contains(kind.token()))
    {
        return Err(PatternError::invalid(
            raw,
            format!(
                "extension placeholder must be exactly {LOCALE_CODE_TOKEN}, found {}",
                kind.token()
            ),
        ));
    }
    if ext.is_empty() {
        return Ok(Extension::None);
    }
    Ok(Extension::Literal(ext.to_string()))
}
