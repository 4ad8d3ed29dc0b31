//! Pattern engine error types.
//!
//! These are returned by the decomposer, matcher and expander. Orchestration
//! code wraps them in `anyhow::Error`, so callers can still `downcast_ref`
//! to find out which kind of failure happened.

use thiserror::Error;

/// Errors produced by the path-pattern engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern string is empty or declares an unusable extension.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// `eval` was called on a path whose literal anchors are not there.
    #[error("path '{path}' does not match pattern '{pattern}'")]
    PatternMismatch { pattern: String, path: String },

    /// A locale id is unknown, or its record lacks the field the pattern needs.
    #[error("could not find remote locale with id '{locale_id}'")]
    LocaleNotFound { locale_id: String },

    /// A target locale id is required but none was given.
    #[error("no target locale id specified for '{pattern}'")]
    MissingLocaleId { pattern: String },
}

impl PatternError {
    pub(crate) fn invalid(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(pattern: impl Into<String>, path: impl Into<String>) -> Self {
        Self::PatternMismatch {
            pattern: pattern.into(),
            path: path.into(),
        }
    }

    pub(crate) fn locale_not_found(locale_id: impl Into<String>) -> Self {
        Self::LocaleNotFound {
            locale_id: locale_id.into(),
        }
    }

    /// Stable identifier of the error kind, used in `--json` output.
    pub fn error_type(&self) -> &'static str {
        match self {
            PatternError::InvalidPattern { .. } => "invalid_pattern",
            PatternError::PatternMismatch { .. } => "pattern_mismatch",
            PatternError::LocaleNotFound { .. } => "locale_not_found",
            PatternError::MissingLocaleId { .. } => "missing_locale_id",
        }
    }
}
