//! Step keyword type shared by the syntax tree and the step catalog.
//!
//! Feature files use five step keywords. `And` and `But` carry no meaning of
//! their own: they continue the previous `Given`, `When` or `Then`, which is
//! the keyword used when matching the step against definitions.

use gherkin::StepType;
use std::fmt;
use std::str::FromStr;

/// Keyword introducing a Gherkin step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action.
    When,
    /// Assert an outcome.
    Then,
    /// Continue the previous step's keyword.
    And,
    /// Continue the previous step's keyword with a contrasting condition.
    But,
}

impl StepKeyword {
    /// Return the canonical English spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_assist_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Then.as_str(), "Then");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// Whether this keyword continues the previous step (`And`/`But`).
    #[must_use]
    pub const fn is_conjunction(&self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    /// Resolve conjunctions to the keyword of the previous concrete step.
    ///
    /// `prev` tracks the last `Given`/`When`/`Then` seen in the current
    /// sequence. Conjunctions return it (or `Given` when nothing precedes
    /// them) and leave it untouched; concrete keywords replace it.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_assist_patterns::StepKeyword;
    ///
    /// let mut prev = None;
    /// assert_eq!(StepKeyword::But.resolve(&mut prev), StepKeyword::Given);
    /// assert_eq!(StepKeyword::When.resolve(&mut prev), StepKeyword::When);
    /// assert_eq!(StepKeyword::And.resolve(&mut prev), StepKeyword::When);
    /// ```
    #[must_use]
    pub fn resolve(self, prev: &mut Option<Self>) -> Self {
        if self.is_conjunction() {
            prev.unwrap_or(Self::Given)
        } else {
            *prev = Some(self);
            self
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a step keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepKeywordParseError(pub String);

impl fmt::Display for StepKeywordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid step keyword: {}", self.0)
    }
}

impl std::error::Error for StepKeywordParseError {}

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [Self::Given, Self::When, Self::Then, Self::And, Self::But]
            .into_iter()
            .find(|kw| trimmed.eq_ignore_ascii_case(kw.as_str()))
            .ok_or_else(|| StepKeywordParseError(trimmed.to_string()))
    }
}

/// A [`StepType`] produced by the `gherkin` parser that has no
/// [`StepKeyword`] counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedStepType(pub StepType);

impl fmt::Display for UnsupportedStepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported step type: {:?}", self.0)
    }
}

impl std::error::Error for UnsupportedStepType {}

impl TryFrom<StepType> for StepKeyword {
    type Error = UnsupportedStepType;

    fn try_from(ty: StepType) -> Result<Self, Self::Error> {
        match ty {
            StepType::Given => Ok(Self::Given),
            StepType::When => Ok(Self::When),
            StepType::Then => Ok(Self::Then),
            #[expect(unreachable_patterns, reason = "guard future StepType variants")]
            _ => Err(UnsupportedStepType(ty)),
        }
    }
}
