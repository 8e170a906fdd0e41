//! Brace placeholder parsing used by the pattern lexer.

use crate::errors::{PatternError, placeholder_error};

const INVALID: &str = "invalid placeholder in step pattern";
const UNCLOSED: &str = "missing closing '}' for placeholder";

/// A parsed `{name}`, `{name:hint}` or `{}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderSpec {
    /// Placeholder name; empty for anonymous `{}`.
    pub name: String,
    pub hint: Option<String>,
    pub start: usize,
    /// Byte offset just past the closing brace.
    pub end: usize,
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn skip_ascii_whitespace(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
        index += 1;
    }
    index
}

/// Find the brace closing a placeholder body, allowing nested pairs.
fn find_closing_brace(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &b) in bytes.get(from..)?.iter().enumerate() {
        match b {
            b'{' => depth = depth.saturating_add(1),
            b'}' if depth == 0 => return Some(from + offset),
            b'}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn parse_hint(
    pattern: &str,
    hint_start: usize,
    start: usize,
    name: &str,
) -> Result<(String, usize), PatternError> {
    let bytes = pattern.as_bytes();
    let mut index = hint_start;
    while bytes.get(index).is_some_and(|&b| b != b'}') {
        index += 1;
    }
    let raw = pattern
        .get(hint_start..index)
        .ok_or_else(|| placeholder_error(INVALID, start, Some(name.to_string())))?;
    if raw.is_empty() || raw.contains(|c: char| c.is_whitespace() || c == '{' || c == '}') {
        return Err(placeholder_error(INVALID, start, Some(name.to_string())));
    }
    Ok((raw.to_string(), index))
}

/// Parse the placeholder whose opening brace sits at byte `start`.
///
/// Returns the byte offset after the closing brace together with the
/// parsed specification.
pub(crate) fn parse_placeholder(
    pattern: &str,
    start: usize,
) -> Result<(usize, PlaceholderSpec), PatternError> {
    let bytes = pattern.as_bytes();
    let mut index = start + 1;
    while bytes.get(index).copied().is_some_and(is_name_byte) {
        index += 1;
    }
    let name = pattern.get(start + 1..index).unwrap_or_default().to_string();

    if bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
        let after = skip_ascii_whitespace(bytes, index);
        if matches!(bytes.get(after), Some(b':' | b'}')) {
            return Err(placeholder_error(INVALID, start, Some(name)));
        }
        index = after;
    }

    let mut hint = None;
    if bytes.get(index) == Some(&b':') {
        let (parsed, next) = parse_hint(pattern, index + 1, start, &name)?;
        hint = Some(parsed);
        index = next;
    } else {
        index = find_closing_brace(bytes, index)
            .ok_or_else(|| placeholder_error(UNCLOSED, start, Some(name.clone())))?;
    }

    if bytes.get(index) != Some(&b'}') {
        return Err(placeholder_error(UNCLOSED, start, Some(name)));
    }
    index += 1;

    Ok((
        index,
        PlaceholderSpec {
            name,
            hint,
            start,
            end: index,
        },
    ))
}
