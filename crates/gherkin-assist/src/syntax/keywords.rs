//! English Gherkin keyword table.

use gherkin_assist_patterns::StepKeyword;

use super::token::KeywordKind;

/// Keywords ordered so that longer spellings sharing a prefix come first.
const KEYWORDS: &[(&str, KeywordKind)] = &[
    ("Scenario Outline", KeywordKind::ScenarioOutline),
    ("Scenario Template", KeywordKind::ScenarioOutline),
    ("Business Need", KeywordKind::Feature),
    ("Background", KeywordKind::Background),
    ("Scenarios", KeywordKind::Examples),
    ("Scenario", KeywordKind::Scenario),
    ("Examples", KeywordKind::Examples),
    ("Example", KeywordKind::Scenario),
    ("Feature", KeywordKind::Feature),
    ("Ability", KeywordKind::Feature),
    ("Rule", KeywordKind::Rule),
    ("Given", KeywordKind::Step(StepKeyword::Given)),
    ("When", KeywordKind::Step(StepKeyword::When)),
    ("Then", KeywordKind::Step(StepKeyword::Then)),
    ("And", KeywordKind::Step(StepKeyword::And)),
    ("But", KeywordKind::Step(StepKeyword::But)),
    ("*", KeywordKind::Step(StepKeyword::And)),
];

/// Match a keyword at the start of `line` (indentation already removed,
/// line break excluded).
///
/// Structural keywords must be followed directly by `:`; step keywords by
/// whitespace or the end of the line. Returns the kind and the keyword's
/// byte length.
pub(crate) fn match_keyword(line: &str) -> Option<(KeywordKind, usize)> {
    KEYWORDS.iter().find_map(|&(word, kind)| {
        let after = line.strip_prefix(word)?;
        let terminated = if kind.is_step() {
            after.is_empty() || after.starts_with([' ', '\t'])
        } else {
            after.starts_with(':')
        };
        terminated.then_some((kind, word.len()))
    })
}
