//! In-memory catalog of compiled step definitions.
//!
//! Definitions are compiled with `gherkin-assist-patterns` when inserted and
//! kept per keyword. Lookups return every matching definition, most
//! specific first, with the arguments captured from the step text.

use std::collections::HashMap;
use std::path::Path;

use gherkin_assist_patterns::{
    PatternError, SpecificityScore, StepKeyword, StepPattern, extract_arguments,
};
use regex::Regex;
use tracing::{debug, warn};

use super::{DefinitionLocation, StepDefinitionCatalog, StepMatch};

/// A step definition with its compiled pattern.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    /// Keyword the definition is registered for.
    pub keyword: StepKeyword,
    /// The pattern as written.
    pub pattern: StepPattern,
    /// Compiled, anchored expression.
    pub regex: Regex,
    /// Ranking among competing matches.
    pub specificity: SpecificityScore,
    /// Where the definition is declared.
    pub location: DefinitionLocation,
}

impl StepDefinition {
    /// Compile a definition.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the pattern is malformed or `keyword`
    /// is `And`/`But`, which steps never resolve to.
    pub fn compile(
        keyword: StepKeyword,
        pattern: &str,
        location: DefinitionLocation,
    ) -> Result<Self, CatalogError> {
        if keyword.is_conjunction() {
            return Err(CatalogError::Conjunction {
                path: location.path.display().to_string().into_boxed_str(),
                name: location.name.into_boxed_str(),
                keyword,
            });
        }
        let parsed = StepPattern::parse(pattern);
        let compiled = parsed
            .compile()
            .and_then(|regex| Ok((regex, SpecificityScore::for_pattern(&parsed)?)));
        let (regex, specificity) = compiled
            .map_err(|source| CatalogError::pattern(keyword, pattern, &location, source))?;
        Ok(Self {
            keyword,
            pattern: parsed,
            regex,
            specificity,
            location,
        })
    }

    fn match_text(&self, step_text: &str) -> Option<StepMatch> {
        let arguments = extract_arguments(&self.regex, step_text)?;
        Some(StepMatch {
            location: self.location.clone(),
            pattern: self.pattern.source().to_owned(),
            arguments,
        })
    }
}

/// Error raised when a step definition cannot join the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The pattern does not compile.
    #[error(
        "failed to compile step pattern '{pattern}' for {keyword} step '{name}' in {path}: \
         {source}"
    )]
    Pattern {
        /// Source file of the definition.
        path: Box<str>,
        /// Display name of the definition.
        name: Box<str>,
        /// Keyword the definition was registered for.
        keyword: StepKeyword,
        /// The pattern as written.
        pattern: Box<str>,
        /// Why compilation failed.
        #[source]
        source: PatternError,
    },
    /// The definition was registered for `And` or `But`.
    #[error("step '{name}' in {path} is registered for {keyword}; use Given, When or Then")]
    Conjunction {
        /// Source file of the definition.
        path: Box<str>,
        /// Display name of the definition.
        name: Box<str>,
        /// The rejected keyword.
        keyword: StepKeyword,
    },
}

impl CatalogError {
    fn pattern(
        keyword: StepKeyword,
        pattern: &str,
        location: &DefinitionLocation,
        source: PatternError,
    ) -> Self {
        Self::Pattern {
            path: location.path.display().to_string().into_boxed_str(),
            name: location.name.clone().into_boxed_str(),
            keyword,
            pattern: pattern.into(),
            source,
        }
    }
}

/// Step definitions indexed by keyword.
///
/// # Examples
///
/// ```
/// use gherkin_assist::reference::{DefinitionLocation, PatternCatalog, StepDefinitionCatalog};
/// use gherkin_assist_patterns::StepKeyword;
///
/// let mut catalog = PatternCatalog::new();
/// catalog
///     .insert(
///         StepKeyword::Given,
///         "I have {count:int} items",
///         DefinitionLocation::new("steps.rs", 3, "have_items"),
///     )
///     .expect("valid pattern");
/// let matches = catalog.find_matches_for(StepKeyword::Given, "I have 5 items");
/// assert_eq!(matches.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PatternCatalog {
    by_keyword: HashMap<StepKeyword, Vec<StepDefinition>>,
}

impl PatternCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and add one definition.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the pattern is malformed or the
    /// keyword is a conjunction; the catalog is left unchanged.
    pub fn insert(
        &mut self,
        keyword: StepKeyword,
        pattern: &str,
        location: DefinitionLocation,
    ) -> Result<(), CatalogError> {
        let definition = StepDefinition::compile(keyword, pattern, location)?;
        self.by_keyword
            .entry(keyword)
            .or_default()
            .push(definition);
        Ok(())
    }

    /// Add many definitions, collecting the ones that failed to compile.
    pub fn extend<I, P>(&mut self, entries: I) -> Vec<CatalogError>
    where
        I: IntoIterator<Item = (StepKeyword, P, DefinitionLocation)>,
        P: AsRef<str>,
    {
        let mut errors = Vec::new();
        for (keyword, pattern, location) in entries {
            if let Err(err) = self.insert(keyword, pattern.as_ref(), location) {
                warn!(error = %err, "skipping step definition");
                errors.push(err);
            }
        }
        errors
    }

    /// Remove every definition declared in `path`.
    pub fn remove_path(&mut self, path: &Path) {
        for definitions in self.by_keyword.values_mut() {
            definitions.retain(|definition| definition.location.path != path);
        }
        self.by_keyword.retain(|_, definitions| !definitions.is_empty());
    }

    /// Definitions registered for `keyword`.
    #[must_use]
    pub fn definitions_for(&self, keyword: StepKeyword) -> &[StepDefinition] {
        self.by_keyword
            .get(&keyword)
            .map_or(&[], Vec::as_slice)
    }

    /// Total number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_keyword.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_keyword.is_empty()
    }

    fn collect_matches<'c>(
        definitions: impl Iterator<Item = &'c StepDefinition>,
        step_text: &str,
    ) -> Vec<StepMatch> {
        let mut found: Vec<(SpecificityScore, StepMatch)> = definitions
            .filter_map(|definition| {
                definition
                    .match_text(step_text)
                    .map(|found| (definition.specificity, found))
            })
            .collect();
        // Stable, so equally specific definitions keep insertion order.
        found.sort_by(|(a, _), (b, _)| b.cmp(a));
        debug!(step_text, matches = found.len(), "matched step text");
        found.into_iter().map(|(_, found)| found).collect()
    }
}

const CONCRETE_KEYWORDS: [StepKeyword; 3] =
    [StepKeyword::Given, StepKeyword::When, StepKeyword::Then];

impl StepDefinitionCatalog for PatternCatalog {
    fn find_matches(&self, step_text: &str) -> Vec<StepMatch> {
        let definitions = CONCRETE_KEYWORDS
            .iter()
            .flat_map(|&keyword| self.definitions_for(keyword));
        Self::collect_matches(definitions, step_text)
    }

    /// Conjunctions carry no keyword of their own and search every
    /// definition.
    fn find_matches_for(&self, keyword: StepKeyword, step_text: &str) -> Vec<StepMatch> {
        if keyword.is_conjunction() {
            return self.find_matches(step_text);
        }
        Self::collect_matches(self.definitions_for(keyword).iter(), step_text)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests use explicit failures for clarity"
)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    fn location(name: &str) -> DefinitionLocation {
        DefinitionLocation::new("tests/steps.rs", 1, name)
    }

    fn catalog() -> PatternCatalog {
        let mut catalog = PatternCatalog::new();
        let errors = catalog.extend([
            (StepKeyword::Given, "I have {count:int} items", location("typed")),
            (StepKeyword::Given, "I have {count} items", location("untyped")),
            (StepKeyword::Given, "I have 5 items", location("literal")),
            (StepKeyword::When, r"^I remove (\d+) items?$", location("remove")),
        ]);
        assert!(errors.is_empty());
        catalog
    }

    #[test]
    fn ambiguous_matches_are_most_specific_first() {
        let matches = catalog().find_matches_for(StepKeyword::Given, "I have 5 items");
        let names: Vec<&str> = matches
            .iter()
            .map(|found| found.location.name.as_str())
            .collect();
        assert_eq!(names, vec!["literal", "typed", "untyped"]);
    }

    #[test]
    fn matches_capture_arguments() {
        let matches = catalog().find_matches_for(StepKeyword::When, "I remove 3 items");
        let found = matches.first().expect("one match");
        let values: Vec<&str> = found
            .arguments
            .iter()
            .map(|argument| argument.value.as_str())
            .collect();
        assert_eq!(values, vec!["3"]);
        assert_eq!(found.pattern, r"^I remove (\d+) items?$");
    }

    #[test]
    fn keyword_filters_definitions() {
        let catalog = catalog();
        assert!(
            catalog
                .find_matches_for(StepKeyword::Then, "I have 5 items")
                .is_empty()
        );
        assert_eq!(
            catalog
                .find_matches_for(StepKeyword::And, "I remove 1 item")
                .len(),
            1
        );
        assert_eq!(catalog.find_matches("I have 5 items").len(), 3);
    }

    #[test]
    fn invalid_patterns_are_reported() {
        let mut catalog = PatternCatalog::new();
        let err = catalog
            .insert(StepKeyword::Then, "broken {count", location("broken"))
            .expect_err("unterminated placeholder");
        assert!(err.to_string().contains("broken {count"));
        assert!(catalog.is_empty());
    }

    #[rstest]
    #[case(StepKeyword::And)]
    #[case(StepKeyword::But)]
    fn conjunction_definitions_are_rejected(#[case] keyword: StepKeyword) {
        let mut catalog = PatternCatalog::new();
        let err = catalog
            .insert(keyword, "a pear", location("pear"))
            .expect_err("conjunctions never resolve");
        assert!(matches!(
            err,
            CatalogError::Conjunction { keyword: found, .. } if found == keyword
        ));
        assert!(err.to_string().contains("use Given, When or Then"));
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn extend_reports_conjunctions_and_keeps_the_rest() {
        let mut catalog = PatternCatalog::new();
        let errors = catalog.extend([
            (StepKeyword::Given, "x", location("x")),
            (StepKeyword::And, "a pear", location("pear")),
        ]);
        assert_eq!(errors.len(), 1);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find_matches_for(StepKeyword::And, "x").len(), 1);
    }

    #[test]
    fn remove_path_drops_definitions() {
        let mut catalog = catalog();
        catalog
            .insert(
                StepKeyword::Then,
                "done",
                DefinitionLocation::new(PathBuf::from("other.rs"), 0, "done"),
            )
            .expect("valid pattern");
        assert_eq!(catalog.len(), 5);
        catalog.remove_path(Path::new("tests/steps.rs"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.definitions_for(StepKeyword::Then).len(), 1);
    }
}
