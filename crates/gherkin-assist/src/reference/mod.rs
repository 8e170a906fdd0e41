//! Step references and their resolution against step definitions.
//!
//! A [`StepReference`] captures what is needed to look a step up: its
//! effective keyword and reconstructed text. Resolution goes through a
//! [`StepDefinitionCatalog`], which hosts implement over their own index of
//! step definitions; [`PatternCatalog`] is an in-memory implementation.

mod catalog;

use std::collections::HashMap;
use std::path::PathBuf;

use gherkin_assist_patterns::{StepArgument, StepKeyword};
use tracing::{debug, trace};

use crate::step::Step;
use crate::tree::NodeId;

pub use catalog::{CatalogError, PatternCatalog, StepDefinition};

/// Where a step definition is declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefinitionLocation {
    /// Source file of the definition.
    pub path: PathBuf,
    /// Zero-based line of the declaration.
    pub line: usize,
    /// Display name, usually the implementing function.
    pub name: String,
}

impl DefinitionLocation {
    /// Describe a definition location.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, line: usize, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            name: name.into(),
        }
    }
}

/// A step definition matching a step's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMatch {
    /// Where the definition lives.
    pub location: DefinitionLocation,
    /// The definition's pattern as written.
    pub pattern: String,
    /// Values captured from the step text.
    pub arguments: Vec<StepArgument>,
}

/// Lookup of step definitions by step text.
pub trait StepDefinitionCatalog {
    /// Every definition whose pattern matches `step_text`.
    fn find_matches(&self, step_text: &str) -> Vec<StepMatch>;

    /// Definitions for `keyword` matching `step_text`.
    ///
    /// Catalogs that do not distinguish keywords can rely on the default,
    /// which ignores the keyword.
    fn find_matches_for(&self, _keyword: StepKeyword, step_text: &str) -> Vec<StepMatch> {
        self.find_matches(step_text)
    }
}

/// Outcome of resolving a step reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No definition matches.
    Unresolved,
    /// Exactly one definition matches.
    Resolved(StepMatch),
    /// Several definitions match, in the catalog's order.
    Ambiguous(Vec<StepMatch>),
}

impl Resolution {
    fn from_matches(mut matches: Vec<StepMatch>) -> Self {
        match matches.len() {
            0 => Self::Unresolved,
            1 => matches.pop().map_or(Self::Unresolved, Self::Resolved),
            _ => Self::Ambiguous(matches),
        }
    }

    /// Whether exactly one definition matched.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// All matching definitions.
    #[must_use]
    pub fn matches(&self) -> &[StepMatch] {
        match self {
            Self::Unresolved => &[],
            Self::Resolved(found) => std::slice::from_ref(found),
            Self::Ambiguous(found) => found,
        }
    }
}

/// Resolvable link from a step to its definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReference {
    node: NodeId,
    keyword: StepKeyword,
    text: String,
}

impl StepReference {
    pub(crate) fn new(node: NodeId, keyword: StepKeyword, text: String) -> Self {
        Self {
            node,
            keyword,
            text,
        }
    }

    /// The step node the reference was built from.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Effective keyword used for lookup.
    #[must_use]
    pub fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// Step text used for lookup.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Look the step up in `catalog`.
    ///
    /// Several matches are reported as [`Resolution::Ambiguous`], not as an
    /// error.
    pub fn resolve<C>(&self, catalog: &C) -> Resolution
    where
        C: StepDefinitionCatalog + ?Sized,
    {
        let matches = catalog.find_matches_for(self.keyword, &self.text);
        debug!(
            keyword = %self.keyword,
            text = %self.text,
            matches = matches.len(),
            "resolved step reference"
        );
        Resolution::from_matches(matches)
    }
}

/// References of one tree, built on first use.
///
/// The cache belongs to a tree generation. Handing it a step from a
/// different tree drops everything cached for the previous one.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    generation: Option<u64>,
    references: HashMap<NodeId, StepReference>,
}

impl ReferenceCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the tree the cached references belong to.
    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Number of cached references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Drop every cached reference.
    pub fn clear(&mut self) {
        self.references.clear();
        self.generation = None;
    }

    /// The reference for `step`, building it on first request.
    pub fn reference(&mut self, step: &Step<'_, '_>) -> &StepReference {
        let generation = step.tree().generation();
        if self.generation != Some(generation) {
            if !self.references.is_empty() {
                trace!(
                    stale = self.references.len(),
                    generation,
                    "tree rebuilt, dropping cached step references"
                );
            }
            self.references.clear();
            self.generation = Some(generation);
        }
        self.references
            .entry(step.id())
            .or_insert_with(|| step.reference())
    }

    /// Resolve `step` through its cached reference.
    pub fn resolve<C>(&mut self, step: &Step<'_, '_>, catalog: &C) -> Resolution
    where
        C: StepDefinitionCatalog + ?Sized,
    {
        self.reference(step).resolve(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SyntaxTree;

    struct FixedCatalog(Vec<&'static str>);

    impl StepDefinitionCatalog for FixedCatalog {
        fn find_matches(&self, step_text: &str) -> Vec<StepMatch> {
            self.0
                .iter()
                .filter(|name| step_text.contains(**name))
                .map(|name| StepMatch {
                    location: DefinitionLocation::new("steps.rs", 0, *name),
                    pattern: (*name).to_owned(),
                    arguments: Vec::new(),
                })
                .collect()
        }
    }

    const SOURCE: &str = "Feature: f\n  Scenario: s\n    Given an apple\n    And a pear\n";

    #[test]
    fn resolution_counts_matches() {
        let tree = SyntaxTree::parse(SOURCE);
        let catalog = FixedCatalog(vec!["apple", "pear", "a"]);
        let resolutions: Vec<Resolution> = tree
            .steps()
            .map(|step| step.reference().resolve(&catalog))
            .collect();
        assert!(resolutions.iter().all(|resolution| resolution.matches().len() == 2));

        let unresolved = FixedCatalog(vec!["plum"]).find_matches("an apple");
        assert_eq!(Resolution::from_matches(unresolved), Resolution::Unresolved);
    }

    #[test]
    fn references_use_effective_keyword() {
        let tree = SyntaxTree::parse(SOURCE);
        let keywords: Vec<StepKeyword> = tree
            .steps()
            .map(|step| step.reference().keyword())
            .collect();
        assert_eq!(keywords, vec![StepKeyword::Given, StepKeyword::Given]);
    }

    #[test]
    fn cache_is_dropped_for_a_new_tree() {
        let mut cache = ReferenceCache::new();
        let first = SyntaxTree::parse(SOURCE);
        for step in first.steps() {
            cache.reference(&step);
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.generation(), Some(first.generation()));

        let second = SyntaxTree::parse(SOURCE);
        let resolved = second
            .steps()
            .next()
            .map(|step| cache.resolve(&step, &FixedCatalog(vec!["apple"])));
        assert!(resolved.is_some_and(|resolution| resolution.is_resolved()));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.generation(), Some(second.generation()));

        cache.clear();
        assert!(cache.is_empty());
    }
}
