//! Errors raised while turning step-definition patterns into regular
//! expressions.

use std::fmt;
use thiserror::Error;

/// Where and why a brace placeholder failed to parse.
///
/// # Examples
/// ```
/// use gherkin_assist_patterns::PlaceholderErrorInfo;
/// let info = PlaceholderErrorInfo::new("invalid placeholder", 3, Some("count".into()));
/// assert_eq!(info.placeholder.as_deref(), Some("count"));
/// assert_eq!(info.position, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderErrorInfo {
    /// Human readable description of the failure.
    pub message: &'static str,
    /// Byte offset of the offending brace within the pattern.
    pub position: usize,
    /// Placeholder name, when one had been read before the failure.
    pub placeholder: Option<String>,
}

impl PlaceholderErrorInfo {
    /// Describe a placeholder failure at `position`.
    #[must_use]
    pub fn new(message: &'static str, position: usize, placeholder: Option<String>) -> Self {
        Self {
            message,
            position,
            placeholder,
        }
    }
}

impl fmt::Display for PlaceholderErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.placeholder {
            Some(name) if !name.is_empty() => write!(
                f,
                "{} for placeholder `{}` at byte {}",
                self.message, name, self.position
            ),
            _ => write!(f, "{} at byte {}", self.message, self.position),
        }
    }
}

/// Failure to compile a step-definition pattern.
///
/// # Examples
/// ```
/// use gherkin_assist_patterns::{PatternError, PlaceholderErrorInfo};
/// let info = PlaceholderErrorInfo::new("invalid placeholder", 2, Some("count".into()));
/// let err = PatternError::Placeholder(info.clone());
/// assert_eq!(err.to_string(), info.to_string());
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern contained no text at all.
    #[error("step pattern is empty")]
    Empty,
    /// A brace placeholder was malformed.
    #[error("{0}")]
    Placeholder(PlaceholderErrorInfo),
    /// The generated (or raw) regular expression did not compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub(crate) fn placeholder_error(
    message: &'static str,
    position: usize,
    placeholder: Option<String>,
) -> PatternError {
    PatternError::Placeholder(PlaceholderErrorInfo::new(message, position, placeholder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_placeholder_with_name() {
        let info = PlaceholderErrorInfo::new("invalid placeholder", 4, Some("count".into()));
        assert_eq!(
            info.to_string(),
            "invalid placeholder for placeholder `count` at byte 4"
        );
    }

    #[test]
    fn omits_empty_placeholder_names() {
        let info = PlaceholderErrorInfo::new("missing closing '}'", 1, Some(String::new()));
        assert_eq!(info.to_string(), "missing closing '}' at byte 1");
    }

    #[test]
    fn regex_errors_convert_transparently() {
        let err: PatternError = regex::Error::Syntax("bad".into()).into();
        assert_eq!(err.to_string(), regex::Error::Syntax("bad".into()).to_string());
    }
}
