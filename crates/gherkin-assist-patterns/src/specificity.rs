//! Pattern specificity used to order ambiguous step matches.
//!
//! When several definitions match the same step text the most specific one
//! is listed first: more literal text, fewer placeholders, more typed
//! placeholders.

use crate::PatternError;
use crate::pattern::{StepPattern, Token, effective_hint, lex_pattern};
use std::cmp::Ordering;

/// Specificity score for a step pattern. Higher is more specific.
///
/// # Examples
///
/// ```
/// use gherkin_assist_patterns::SpecificityScore;
///
/// let specific = SpecificityScore::calculate("the total is 5").expect("valid pattern");
/// let generic = SpecificityScore::calculate("the total is {n}").expect("valid pattern");
/// assert!(specific > generic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificityScore {
    /// Number of literal characters.
    pub literal_chars: usize,
    /// Number of placeholders or capture groups.
    pub placeholder_count: usize,
    /// Number of placeholders restricted to a type.
    pub typed_placeholder_count: usize,
}

impl SpecificityScore {
    /// Score a brace-expression pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is malformed.
    pub fn calculate(pattern: &str) -> Result<Self, PatternError> {
        let mut score = Self::default();
        for token in lex_pattern(pattern)? {
            match token {
                Token::Literal(text) | Token::Optional(text) => {
                    score.literal_chars += text.chars().count();
                }
                Token::Alternation(words) => {
                    score.literal_chars += words
                        .iter()
                        .map(|word| word.chars().count())
                        .min()
                        .unwrap_or_default();
                }
                Token::Placeholder { name, hint, .. } => {
                    score.placeholder_count += 1;
                    if effective_hint(&name, hint.as_deref()).is_some() {
                        score.typed_placeholder_count += 1;
                    }
                }
                Token::OpenBrace { .. } | Token::CloseBrace { .. } => score.literal_chars += 1,
            }
        }
        Ok(score)
    }

    /// Score a pattern in either notation.
    ///
    /// Regular expressions are scored approximately: escaped characters and
    /// plain characters count as literals, capturing groups as placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if a brace expression is malformed.
    pub fn for_pattern(pattern: &StepPattern) -> Result<Self, PatternError> {
        match pattern {
            StepPattern::Expression(text) => Self::calculate(text),
            StepPattern::Regex(text) => Ok(Self::score_regex(text)),
        }
    }

    fn score_regex(source: &str) -> Self {
        let mut score = Self::default();
        let mut chars = source.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => {
                    // `\d`, `\w` and friends are classes, `\.` is a literal.
                    if chars.next().is_some_and(|next| !next.is_ascii_alphanumeric()) {
                        score.literal_chars += 1;
                    }
                }
                '(' => {
                    if chars.peek() != Some(&'?') {
                        score.placeholder_count += 1;
                    }
                }
                '.' | '^' | '$' | '*' | '+' | '?' | ')' | '[' | ']' | '{' | '}' | '|' => {}
                _ => score.literal_chars += 1,
            }
        }
        score
    }
}

impl Ord for SpecificityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.literal_chars
            .cmp(&other.literal_chars)
            .then_with(|| other.placeholder_count.cmp(&self.placeholder_count))
            .then_with(|| {
                self.typed_placeholder_count
                    .cmp(&other.typed_placeholder_count)
            })
    }
}

impl PartialOrd for SpecificityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(pattern: &str) -> SpecificityScore {
        SpecificityScore::calculate(pattern)
            .unwrap_or_else(|e| panic!("pattern {pattern:?} should score: {e}"))
    }

    #[test]
    fn literal_pattern_beats_placeholder() {
        assert!(score("overlap apples") > score("overlap {item}"));
    }

    #[test]
    fn fewer_placeholders_win_with_equal_literals() {
        let a = score("ab {x}");
        let b = score("a {x} {y}");
        assert_eq!(a.literal_chars, b.literal_chars);
        assert!(a > b);
    }

    #[test]
    fn typed_placeholder_breaks_ties() {
        assert!(score("count is {n:u32}") > score("count is {n}"));
        assert!(score("count is {int}") > score("count is {n}"));
    }

    #[test]
    fn multibyte_characters_count_once() {
        assert_eq!(score("café {value}").literal_chars, 5);
    }

    #[test]
    fn regex_scoring_counts_literals_and_groups() {
        let pattern = StepPattern::parse(r"^I have (\d+) \.items$");
        let Ok(scored) = SpecificityScore::for_pattern(&pattern) else {
            panic!("regex patterns always score");
        };
        assert_eq!(scored.placeholder_count, 1);
        assert_eq!(scored.literal_chars, "I have  .items".len());
    }

    #[test]
    fn non_capturing_groups_are_not_placeholders() {
        let Ok(scored) = SpecificityScore::for_pattern(&StepPattern::parse(r"^a (?:b|c)$")) else {
            panic!("regex patterns always score");
        };
        assert_eq!(scored.placeholder_count, 0);
    }
}
