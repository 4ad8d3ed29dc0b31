// Compilation of a PathPattern into a single regex over `/`-joined paths.

use std::path::is_separator;

use regex::Regex;
use serde::Serialize;

use super::{Extension, GlobMode, Part, PathPattern, PlaceholderKind, Segment};
use crate::error::PatternError;

/// Values extracted from a path. Empty when the pattern lacks the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Locale code.
    pub rfc: String,
    /// Locale name.
    pub name: String,
    pub tag: String,
}

impl MatchResult {
    fn slot_mut(&mut self, kind: PlaceholderKind) -> &mut String {
        match kind {
            PlaceholderKind::LocaleCode => &mut self.rfc,
            PlaceholderKind::LocaleName => &mut self.name,
            PlaceholderKind::Tag => &mut self.tag,
        }
    }
}

/// An immutable, compiled pattern.
///
/// Relative patterns are anchored at the end of the candidate path only, so
/// leading directories (a checkout prefix, an absolute base) are ignored.
/// Absolute patterns must match the whole path.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    regex: Regex,
    /// Capture group name for every placeholder occurrence, in order.
    groups: Vec<(PlaceholderKind, String)>,
}

impl Matcher {
    pub fn compile(pattern: &PathPattern) -> Result<Self, PatternError> {
        let mut pat = String::from("^");
        if pattern.is_absolute() {
            pat.push('/');
        } else {
            pat.push_str("(?:[^/]*/)*");
        }

        let mut groups: Vec<(PlaceholderKind, String)> = Vec::new();
        let last_index = pattern.segments().len().saturating_sub(1);

        for (i, segment) in pattern.segments().iter().enumerate() {
            match segment {
                Segment::AnyDirs => pat.push_str("(?:[^/]+/)*"),
                Segment::Parts(parts) => {
                    let is_file = i == last_index && pattern.glob_mode() == GlobMode::None;
                    for (j, part) in parts.iter().enumerate() {
                        match part {
                            Part::Literal(lit) => pat.push_str(&regex::escape(lit)),
                            Part::Wildcard => pat.push_str("[^/]*"),
                            Part::Placeholder(kind) => {
                                let reads_extension = is_file
                                    && j == parts.len() - 1
                                    && *kind == PlaceholderKind::LocaleCode
                                    && *pattern.extension() == Extension::LocaleCode;
                                let class = if reads_extension { "[^/.]+" } else { "[^/]+" };

                                let seen = groups.iter().filter(|(k, _)| k == kind).count();
                                let name = group_name(*kind, seen);
                                pat.push_str(&format!("(?P<{name}>{class})"));
                                groups.push((*kind, name));
                            }
                        }
                    }
                    pat.push('/');
                }
            }
        }

        match pattern.glob_mode() {
            GlobMode::None => {
                if pat.ends_with('/') {
                    pat.pop();
                }
            }
            GlobMode::SingleSegment => pat.push_str("[^/]+"),
            GlobMode::RecursiveAny => pat.push_str("(?:[^/]+/)*[^/]+"),
        }
        pat.push('$');

        let regex = Regex::new(&pat).map_err(|e| {
            PatternError::invalid(pattern.raw(), format!("cannot compile matcher: {e}"))
        })?;
        log::debug!("Compiled pattern '{}' to {}", pattern.raw(), regex.as_str());

        Ok(Self {
            pattern: pattern.raw().to_string(),
            regex,
            groups,
        })
    }

    /// Structural test; never fails.
    pub fn matches_path(&self, path: &str) -> bool {
        self.eval(path).is_ok()
    }

    /// Extract placeholder values from a path.
    ///
    /// Fails with `PatternMismatch` when the literal anchors are missing or
    /// repeated placeholders disagree.
    pub fn eval(&self, path: &str) -> Result<MatchResult, PatternError> {
        let candidate = to_slash(path);
        let caps = self
            .regex
            .captures(&candidate)
            .ok_or_else(|| PatternError::mismatch(&self.pattern, path))?;

        let mut result = MatchResult::default();
        for (kind, group) in &self.groups {
            let value = caps.name(group).map(|m| m.as_str()).unwrap_or_default();
            let slot = result.slot_mut(*kind);
            if slot.is_empty() {
                *slot = value.to_string();
            } else if slot != value {
                return Err(PatternError::mismatch(&self.pattern, path));
            }
        }
        Ok(result)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn group_name(kind: PlaceholderKind, seen: usize) -> String {
    let base = match kind {
        PlaceholderKind::LocaleCode => "code",
        PlaceholderKind::LocaleName => "name",
        PlaceholderKind::Tag => "tag",
    };
    if seen == 0 {
        base.to_string()
    } else {
        format!("{base}{seen}")
    }
}

fn to_slash(path: &str) -> String {
    path.split(is_separator).collect::<Vec<_>>().join("/")
}
