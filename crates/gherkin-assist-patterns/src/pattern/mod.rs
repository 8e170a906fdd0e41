//! Step-definition pattern parsing and compilation.

mod compiler;
mod lexer;
mod placeholder;
#[cfg(test)]
pub(crate) mod test_support;

use crate::errors::PatternError;
use regex::Regex;

pub use compiler::build_regex_from_pattern;
pub(crate) use compiler::effective_hint;
pub(crate) use lexer::{Token, lex_pattern};

/// A step-definition pattern in one of the two supported notations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepPattern {
    /// A regular expression such as `^I have (\d+) items$`.
    Regex(String),
    /// A brace expression such as `I have {count:int} items`.
    Expression(String),
}

impl StepPattern {
    /// Classify pattern text by its notation.
    ///
    /// Text anchored with `^` or `$` is a regular expression; anything else
    /// is a brace expression.
    ///
    /// # Examples
    /// ```
    /// use gherkin_assist_patterns::StepPattern;
    /// assert!(matches!(StepPattern::parse(r"^I have (\d+)$"), StepPattern::Regex(_)));
    /// assert!(matches!(StepPattern::parse("I have {int}"), StepPattern::Expression(_)));
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.starts_with('^') || text.ends_with('$') {
            Self::Regex(text.to_string())
        } else {
            Self::Expression(text.to_string())
        }
    }

    /// The pattern text as written.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Regex(text) | Self::Expression(text) => text,
        }
    }

    /// Produce the anchored regular-expression source for this pattern.
    ///
    /// # Errors
    /// Returns [`PatternError::Empty`] for empty patterns and placeholder
    /// errors for malformed brace expressions.
    pub fn to_regex_source(&self) -> Result<String, PatternError> {
        if self.source().is_empty() {
            return Err(PatternError::Empty);
        }
        match self {
            Self::Expression(text) => build_regex_from_pattern(text),
            Self::Regex(text) => {
                let mut source = String::with_capacity(text.len() + 2);
                if !text.starts_with('^') {
                    source.push('^');
                }
                source.push_str(text);
                if !text.ends_with('$') {
                    source.push('$');
                }
                Ok(source)
            }
        }
    }

    /// Compile the pattern into a regular expression.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the pattern is malformed or the regular
    /// expression does not compile.
    pub fn compile(&self) -> Result<Regex, PatternError> {
        Ok(Regex::new(&self.to_regex_source()?)?)
    }
}

/// Build and compile a regular expression from step pattern text in either
/// notation.
///
/// # Errors
/// Returns [`PatternError`] when placeholder parsing fails or the regular
/// expression cannot be compiled.
pub fn compile_regex_from_pattern(pat: &str) -> Result<Regex, PatternError> {
    StepPattern::parse(pat).compile()
}
