//! Convert lexed brace expressions into anchored regular-expression sources.

use crate::errors::{PatternError, placeholder_error};
use crate::hint::{get_type_pattern, is_cucumber_type};

use super::lexer::{Token, lex_pattern};

/// Pick the effective type of a placeholder: an explicit hint wins, then a
/// name that spells a Cucumber parameter type (`{int}`).
pub(crate) fn effective_hint<'a>(name: &'a str, hint: Option<&'a str>) -> Option<&'a str> {
    hint.or_else(|| is_cucumber_type(name).then_some(name))
}

/// Build an anchored regular expression from a brace-expression pattern.
///
/// Optional text and alternations become non-capturing groups, so only
/// placeholders produce captures.
///
/// # Errors
/// Returns [`PatternError`] when placeholders are malformed or braces are
/// unbalanced.
///
/// # Examples
/// ```
/// use gherkin_assist_patterns::build_regex_from_pattern;
/// let regex = build_regex_from_pattern("I have {count:u32} items").expect("valid pattern");
/// assert_eq!(regex, r"^I have (\d+) items$");
/// ```
pub fn build_regex_from_pattern(pat: &str) -> Result<String, PatternError> {
    let tokens = lex_pattern(pat)?;
    let mut regex = String::with_capacity(pat.len().saturating_mul(2) + 2);
    regex.push('^');
    let mut stray_depth = 0usize;

    for token in tokens {
        match token {
            Token::Literal(text) => regex.push_str(&regex::escape(&text)),
            Token::Optional(text) => {
                regex.push_str("(?:");
                regex.push_str(&regex::escape(&text));
                regex.push_str(")?");
            }
            Token::Alternation(words) => {
                let escaped: Vec<String> = words.iter().map(|word| regex::escape(word)).collect();
                regex.push_str("(?:");
                regex.push_str(&escaped.join("|"));
                regex.push(')');
            }
            Token::Placeholder { name, hint, .. } => {
                regex.push('(');
                regex.push_str(get_type_pattern(effective_hint(&name, hint.as_deref())));
                regex.push(')');
            }
            Token::OpenBrace { .. } => {
                stray_depth = stray_depth.saturating_add(1);
                regex.push_str(r"\{");
            }
            Token::CloseBrace { index } => {
                if stray_depth == 0 {
                    return Err(placeholder_error(
                        "unmatched closing brace '}' in step pattern",
                        index,
                        None,
                    ));
                }
                stray_depth -= 1;
                regex.push_str(r"\}");
            }
        }
    }

    if stray_depth != 0 {
        return Err(placeholder_error(
            "unbalanced braces in step pattern",
            pat.len(),
            None,
        ));
    }

    regex.push('$');
    Ok(regex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("I have {count:u32} cukes", r"^I have (\d+) cukes$")]
    #[case("I have {int} cukes", r"^I have ([+-]?\d+) cukes$")]
    #[case("I have {count} cukes", r"^I have (.+?) cukes$")]
    #[case("I have {} cukes", r"^I have (.+?) cukes$")]
    #[case("a.b", r"^a\.b$")]
    #[case("I have {int} cucumber(s)", r"^I have ([+-]?\d+) cucumber(?:s)?$")]
    #[case("I eat an apple/pear", r"^I eat an (?:apple|pear)$")]
    fn builds_regex_sources(#[case] pattern: &str, #[case] expected: &str) {
        let regex = build_regex_from_pattern(pattern)
            .unwrap_or_else(|err| panic!("pattern should compile: {err}"));
        assert_eq!(regex, expected);
    }

    #[test]
    fn optional_text_and_alternation_match_every_form() {
        let source = build_regex_from_pattern("I have {int} cucumber(s) in my belly/stomach")
            .unwrap_or_else(|err| panic!("pattern should compile: {err}"));
        let regex = regex::Regex::new(&source)
            .unwrap_or_else(|err| panic!("regex should compile: {err}"));
        for text in [
            "I have 1 cucumber in my belly",
            "I have 2 cucumbers in my belly",
            "I have 3 cucumbers in my stomach",
        ] {
            assert!(regex.is_match(text), "{text:?} should match");
        }
        assert!(!regex.is_match("I have 3 cucumber(s) in my belly"));
        assert!(!regex.is_match("I have 3 cucumbers in my belly/stomach"));
    }

    #[test]
    fn errors_when_closing_brace_unmatched() {
        let Err(err) = build_regex_from_pattern("broken}") else {
            panic!("should fail");
        };
        assert!(err.to_string().contains("unmatched closing brace"));
    }

    #[test]
    fn errors_when_open_brace_remains() {
        let Err(err) = build_regex_from_pattern("broken { brace") else {
            panic!("should fail");
        };
        assert!(err.to_string().contains("unbalanced braces"));
    }

    #[test]
    fn explicit_hint_beats_type_name() {
        assert_eq!(effective_hint("int", Some("word")), Some("word"));
        assert_eq!(effective_hint("count", None), None);
    }
}
