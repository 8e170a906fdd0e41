//! Behavioural tests for resolving steps against step definitions.

use gherkin_assist::reference::{
    CatalogError, DefinitionLocation, PatternCatalog, ReferenceCache, Resolution,
    StepDefinitionCatalog,
};
use gherkin_assist::tree::NodeKind;
use gherkin_assist::{StepKeyword, SyntaxTree};
use rstest::{fixture, rstest};

const FEATURE: &str = "\
Feature: Basket
  Scenario: single
    Given I have 3 items
    And the basket is red
    When I remove 1 item
    Then nothing matches this step

  Scenario Outline: many
    Given I have <count> items
    When I remove <taken> items
    Examples:
      | count | taken |
      | 5     | 2     |
      | 7     | 1     |
";

#[fixture]
fn catalog() -> PatternCatalog {
    let mut catalog = PatternCatalog::new();
    let errors = catalog.extend([
        (
            StepKeyword::Given,
            "I have {count:int} items",
            DefinitionLocation::new("tests/steps/basket.rs", 10, "have_items"),
        ),
        (
            StepKeyword::Given,
            "the basket is {colour}",
            DefinitionLocation::new("tests/steps/basket.rs", 20, "basket_colour"),
        ),
        (
            StepKeyword::Given,
            "the basket is red",
            DefinitionLocation::new("tests/steps/basket.rs", 25, "red_basket"),
        ),
        (
            StepKeyword::When,
            r"^I remove (\d+) items?$",
            DefinitionLocation::new("tests/steps/basket.rs", 30, "remove_items"),
        ),
        (
            StepKeyword::Then,
            "broken {pattern",
            DefinitionLocation::new("tests/steps/basket.rs", 40, "broken"),
        ),
    ]);
    assert_eq!(errors.len(), 1);
    catalog
}

#[rstest]
fn steps_resolve_by_effective_keyword(catalog: PatternCatalog) {
    let tree = SyntaxTree::parse(FEATURE);
    let names: Vec<Vec<String>> = tree
        .steps()
        .take(4)
        .map(|step| {
            step.reference()
                .resolve(&catalog)
                .matches()
                .iter()
                .map(|found| found.location.name.clone())
                .collect()
        })
        .collect();
    assert_eq!(
        names,
        vec![
            vec!["have_items"],
            vec!["red_basket", "basket_colour"],
            vec!["remove_items"],
            Vec::<&str>::new(),
        ]
    );
}

#[rstest]
fn resolution_reports_ambiguity_and_absence(catalog: PatternCatalog) {
    let tree = SyntaxTree::parse(FEATURE);
    let resolutions: Vec<Resolution> = tree
        .steps()
        .take(4)
        .map(|step| step.reference().resolve(&catalog))
        .collect();
    assert!(matches!(resolutions.first(), Some(Resolution::Resolved(_))));
    assert!(matches!(resolutions.get(1), Some(Resolution::Ambiguous(found)) if found.len() == 2));
    assert_eq!(resolutions.get(3), Some(&Resolution::Unresolved));
}

#[rstest]
fn resolved_matches_carry_arguments(catalog: PatternCatalog) {
    let tree = SyntaxTree::parse(FEATURE);
    let resolution = tree.steps().next().map(|step| step.reference().resolve(&catalog));
    let Some(Resolution::Resolved(found)) = resolution else {
        panic!("expected a single match, got {resolution:?}");
    };
    let values: Vec<&str> = found
        .arguments
        .iter()
        .map(|argument| argument.value.as_str())
        .collect();
    assert_eq!(values, vec!["3"]);
    assert_eq!(found.location.line, 10);
}

#[rstest]
fn outline_expansions_resolve_with_example_values(catalog: PatternCatalog) {
    let tree = SyntaxTree::parse(FEATURE);
    let outline = tree
        .descendants(tree.root())
        .find(|&id| tree.kind(id) == Some(NodeKind::ScenarioOutline));
    let expansions = outline.map(|id| tree.outline_expansions(id)).unwrap_or_default();
    let texts: Vec<String> = expansions
        .iter()
        .map(|(step, row)| step.text_for_example(row))
        .collect();
    assert_eq!(
        texts,
        vec![
            "I have 5 items",
            "I remove 2 items",
            "I have 7 items",
            "I remove 1 items",
        ]
    );
    assert!(expansions
        .iter()
        .all(|(step, row)| step.reference_for_example(row).resolve(&catalog).is_resolved()));
}

#[rstest]
fn cached_references_follow_tree_generations(catalog: PatternCatalog) {
    let mut cache = ReferenceCache::new();
    let tree = SyntaxTree::parse(FEATURE);
    for step in tree.steps() {
        let _ = cache.resolve(&step, &catalog);
    }
    assert_eq!(cache.len(), tree.steps().count());

    let edited = FEATURE.replace("3 items", "4 items");
    let rebuilt = SyntaxTree::parse(&edited);
    let first = rebuilt.steps().next().map(|step| cache.reference(&step).text().to_owned());
    assert_eq!(first.as_deref(), Some("I have 4 items"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn custom_catalogs_only_need_find_matches() {
    struct Nothing;
    impl StepDefinitionCatalog for Nothing {
        fn find_matches(&self, _step_text: &str) -> Vec<gherkin_assist::reference::StepMatch> {
            Vec::new()
        }
    }
    let tree = SyntaxTree::parse(FEATURE);
    assert!(tree
        .steps()
        .all(|step| step.reference().resolve(&Nothing) == Resolution::Unresolved));
}

#[test]
fn conjunction_steps_resolve_through_their_concrete_keyword() {
    let mut catalog = PatternCatalog::new();
    let errors = catalog.extend([
        (
            StepKeyword::Given,
            "x",
            DefinitionLocation::new("tests/steps/fruit.rs", 1, "x"),
        ),
        (
            StepKeyword::And,
            "a pear",
            DefinitionLocation::new("tests/steps/fruit.rs", 5, "and_pear"),
        ),
        (
            StepKeyword::Given,
            "a pear",
            DefinitionLocation::new("tests/steps/fruit.rs", 9, "pear"),
        ),
    ]);
    assert!(matches!(
        errors.as_slice(),
        [CatalogError::Conjunction { keyword: StepKeyword::And, .. }]
    ));
    assert_eq!(catalog.len(), 2);

    let tree = SyntaxTree::parse("Feature: f\n  Scenario: s\n    Given x\n    And a pear\n");
    let resolved: Vec<bool> = tree
        .steps()
        .map(|step| step.reference().resolve(&catalog).is_resolved())
        .collect();
    assert_eq!(resolved, vec![true, true]);
}

#[rstest]
#[case("Given I have 1 cucumber in my belly")]
#[case("Given I have 4 cucumbers in my stomach")]
fn cucumber_expressions_resolve_steps(#[case] line: &str) {
    let mut catalog = PatternCatalog::new();
    let errors = catalog.extend([(
        StepKeyword::Given,
        "I have {int} cucumber(s) in my belly/stomach",
        DefinitionLocation::new("tests/steps/cukes.rs", 3, "cukes"),
    )]);
    assert!(errors.is_empty());

    let source = format!("Feature: f\n  Scenario: s\n    {line}\n");
    let tree = SyntaxTree::parse(&source);
    let resolution = tree.steps().next().map(|step| step.reference().resolve(&catalog));
    let Some(Resolution::Resolved(found)) = resolution else {
        panic!("expected a single match, got {resolution:?}");
    };
    assert_eq!(found.arguments.len(), 1);
}
