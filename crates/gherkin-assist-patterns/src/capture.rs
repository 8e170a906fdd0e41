//! Argument extraction from step text matched against a compiled pattern.

use regex::Regex;
use std::ops::Range;

/// One argument captured from step text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepArgument {
    /// Name of the capture group, when the pattern named it.
    pub name: Option<String>,
    /// Captured text (empty for optional groups that did not participate).
    pub value: String,
    /// Byte range of the value within the step text, if it participated.
    pub range: Option<Range<usize>>,
}

/// Extract the argument values when `text` matches `re`.
///
/// Group 0 (the whole match) is skipped; optional groups that did not take
/// part yield empty strings so positions stay aligned with the pattern.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use gherkin_assist_patterns::extract_captured_values;
/// let regex = Regex::new(r"^(\d+)-(\w+)$").expect("valid regex");
/// let values = extract_captured_values(&regex, "42-answer").expect("matches");
/// assert_eq!(values, vec!["42".to_string(), "answer".to_string()]);
/// assert!(extract_captured_values(&regex, "nope").is_none());
/// ```
#[must_use]
pub fn extract_captured_values(re: &Regex, text: &str) -> Option<Vec<String>> {
    extract_arguments(re, text).map(|args| args.into_iter().map(|arg| arg.value).collect())
}

/// Extract the arguments, with names and ranges, when `text` matches `re`.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use gherkin_assist_patterns::extract_arguments;
/// let regex = Regex::new(r"^I have (?P<count>\d+) items$").expect("valid regex");
/// let args = extract_arguments(&regex, "I have 5 items").expect("matches");
/// assert_eq!(args[0].name.as_deref(), Some("count"));
/// assert_eq!(args[0].range, Some(7..8));
/// ```
#[must_use]
pub fn extract_arguments(re: &Regex, text: &str) -> Option<Vec<StepArgument>> {
    let caps = re.captures(text)?;
    let arguments = re
        .capture_names()
        .zip(caps.iter())
        .skip(1)
        .map(|(name, capture)| StepArgument {
            name: name.map(str::to_string),
            value: capture.map_or_else(String::new, |m| m.as_str().to_string()),
            range: capture.map(|m| m.range()),
        })
        .collect();
    Some(arguments)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require descriptive panic messages")]
mod tests {
    use super::*;

    #[test]
    fn returns_none_without_a_match() {
        let regex = Regex::new(r"^(\d+)$").expect("test regex must compile");
        assert!(extract_arguments(&regex, "nope").is_none());
    }

    #[test]
    fn keeps_positions_for_optional_groups() {
        let regex = Regex::new(r"^(a)?(b)?$").expect("test regex must compile");
        let args = extract_arguments(&regex, "a").expect("input should match");
        assert_eq!(args.len(), 2);
        assert_eq!(args.first().map(|a| a.value.as_str()), Some("a"));
        assert_eq!(args.get(1).map(|a| a.value.as_str()), Some(""));
        assert_eq!(args.get(1).and_then(|a| a.range.clone()), None);
    }

    #[test]
    fn reports_group_names_and_ranges() {
        let regex = Regex::new(r"^(?P<left>\w+) and (\w+)$").expect("test regex must compile");
        let args = extract_arguments(&regex, "salt and pepper").expect("input should match");
        assert_eq!(
            args,
            vec![
                StepArgument {
                    name: Some("left".into()),
                    value: "salt".into(),
                    range: Some(0..4),
                },
                StepArgument {
                    name: None,
                    value: "pepper".into(),
                    range: Some(9..15),
                },
            ]
        );
    }
}
