//! Token types produced by the tokenizer.

use gherkin_assist_patterns::StepKeyword;

use crate::span::TextSpan;

/// Structural or step keyword recognised at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordKind {
    /// `Feature:` (also `Business Need:`, `Ability:`).
    Feature,
    /// `Rule:`.
    Rule,
    /// `Background:`.
    Background,
    /// `Scenario:` (also `Example:`).
    Scenario,
    /// `Scenario Outline:` (also `Scenario Template:`).
    ScenarioOutline,
    /// `Examples:` (also `Scenarios:`).
    Examples,
    /// A step keyword; `*` is recorded as `And`.
    Step(StepKeyword),
}

impl KeywordKind {
    /// The step keyword, when this is a step keyword.
    #[must_use]
    pub fn step_keyword(self) -> Option<StepKeyword> {
        match self {
            Self::Step(keyword) => Some(keyword),
            _ => None,
        }
    }

    /// Whether the keyword starts a step.
    #[must_use]
    pub fn is_step(self) -> bool {
        matches!(self, Self::Step(_))
    }
}

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A structural or step keyword.
    Keyword(KeywordKind),
    /// The `:` following a structural keyword.
    Colon,
    /// A run of spaces and tabs.
    Whitespace,
    /// A line break: `\n`, `\r\n` or `\r`.
    Newline,
    /// A `#` comment running to the end of the line.
    Comment,
    /// An `@tag`.
    Tag,
    /// A word of a title, description or step, or a doc string line.
    Text,
    /// `<` opening a step placeholder.
    ParameterStart,
    /// The name between `<` and `>`.
    ParameterName,
    /// `>` closing a step placeholder.
    ParameterEnd,
    /// A `|` table cell separator.
    Pipe,
    /// Trimmed contents of a table cell.
    TableCell,
    /// `"""` or three backticks delimiting a doc string.
    DocStringDelimiter,
}

impl TokenKind {
    /// Whitespace, line breaks and comments.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }

    /// The keyword kind, when this is a keyword token.
    #[must_use]
    pub fn keyword(self) -> Option<KeywordKind> {
        match self {
            Self::Keyword(kind) => Some(kind),
            _ => None,
        }
    }
}

/// A typed slice of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// What the token is.
    pub kind: TokenKind,
    /// Where it sits in the source.
    pub span: TextSpan,
    /// The raw source text of the token.
    pub text: &'a str,
}
