//! Unit tests for tree construction.

use gherkin_assist_patterns::StepKeyword::{self, Given, Then, When};
use rstest::rstest;

use super::*;
use crate::syntax::KeywordKind;

fn kinds_below(tree: &SyntaxTree<'_>, id: NodeId) -> Vec<NodeKind> {
    tree.children(id)
        .iter()
        .filter_map(|child| child.as_node())
        .filter_map(|child| tree.kind(child))
        .collect()
}

fn first_of(tree: &SyntaxTree<'_>, kind: NodeKind) -> Option<NodeId> {
    tree.descendants(tree.root())
        .find(|&id| tree.kind(id) == Some(kind))
}

fn degradation_kinds(tree: &SyntaxTree<'_>) -> Vec<DegradationKind> {
    tree.degradations().iter().map(|found| found.kind).collect()
}

const BASKET: &str = "\
# language: en
@shop
Feature: Basket
  Shoppers fill a basket.

  Background:
    Given an empty basket

  Rule: adding

    Scenario: add one
      Given a shop
      When I add an apple
      And I add a pear
      Then the basket holds:
        | fruit |
        | apple |
        | pear  |

    Scenario Outline: add many
      When I add <count> <fruit>
      Then the note says
        \"\"\"
        Given is not a step here
        \"\"\"

      Examples:
        | count | fruit |
        | 2     | plums |
";

#[test]
fn nests_blocks_under_feature_and_rule() {
    let tree = SyntaxTree::parse(BASKET);
    assert!(tree.degradations().is_empty());
    assert_eq!(kinds_below(&tree, tree.root()), vec![NodeKind::Feature]);

    let feature = tree.feature().unwrap_or(tree.root());
    assert_eq!(
        kinds_below(&tree, feature),
        vec![NodeKind::Background, NodeKind::Rule]
    );
    let rule = first_of(&tree, NodeKind::Rule).unwrap_or(tree.root());
    assert_eq!(
        kinds_below(&tree, rule),
        vec![NodeKind::Scenario, NodeKind::ScenarioOutline]
    );
    let outline = first_of(&tree, NodeKind::ScenarioOutline).unwrap_or(tree.root());
    assert_eq!(kinds_below(&tree, outline).last(), Some(&NodeKind::Examples));
}

#[test]
fn leaves_reproduce_the_source() {
    let tree = SyntaxTree::parse(BASKET);
    assert_eq!(tree.leaf_text(), BASKET);
    assert_eq!(tree.node_text(tree.root()), BASKET);
}

#[test]
fn node_spans_cover_their_children_contiguously() {
    let tree = SyntaxTree::parse(BASKET);
    for id in tree.descendants(tree.root()) {
        let span = tree.span_of(Element::Node(id));
        let mut cursor = span.start;
        for &child in tree.children(id) {
            let child_span = tree.span_of(child);
            assert_eq!(child_span.start, cursor, "gap or overlap in {id}");
            cursor = child_span.end;
            if let Element::Node(child_id) = child {
                assert_eq!(tree.parent(child_id), Some(id));
            }
        }
        assert_eq!(cursor, span.end, "children of {id} do not reach its end");
    }
}

#[test]
fn steps_end_at_their_last_significant_token() {
    let tree = SyntaxTree::parse(BASKET);
    let texts: Vec<&str> = tree
        .steps()
        .take(3)
        .map(|step| tree.node_text(step.id()))
        .collect();
    assert_eq!(
        texts,
        vec!["Given an empty basket", "Given a shop", "When I add an apple"]
    );
}

#[test]
fn tables_and_doc_strings_attach_to_steps() {
    let tree = SyntaxTree::parse(BASKET);
    let holder = tree
        .steps()
        .find(|step| step.text(false) == "the basket holds:")
        .map(|step| step.id());
    let table = holder.and_then(|id| tree.child_nodes(id, NodeKind::Table).next());
    let rows = table.map_or(0, |id| tree.child_nodes(id, NodeKind::TableRow).count());
    assert_eq!(rows, 3);

    let note = tree
        .steps()
        .find(|step| step.text(false) == "the note says")
        .map(|step| step.id());
    let doc_string = note.and_then(|id| tree.child_nodes(id, NodeKind::DocString).next());
    let text = doc_string.map_or("", |id| tree.node_text(id));
    assert!(text.starts_with("\"\"\""));
    assert!(text.ends_with("\"\"\""));
    assert!(text.contains("Given is not a step here"));
}

#[test]
fn doc_string_lines_do_not_open_steps() {
    let tree = SyntaxTree::parse(BASKET);
    assert!(tree.steps().all(|step| step.text(false) != "is not a step here"));
    assert_eq!(tree.steps().count(), 7);
}

#[test]
fn placeholders_become_step_parameters() {
    let tree = SyntaxTree::parse(BASKET);
    let names: Vec<&str> = tree
        .steps()
        .flat_map(|step| {
            step.parameters()
                .map(|parameter| parameter.name())
                .collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(names, vec!["count", "fruit"]);
}

#[rstest]
#[case(
    "Feature: f\n  Scenario: s\n    Given a\n    And b\n    But c\n    When d\n    And e\n",
    vec![Given, Given, Given, When, When]
)]
#[case(
    "Feature: f\n  Scenario: s\n    And a\n    But b\n    Then c\n",
    vec![Given, Given, Then]
)]
#[case(
    "Feature: f\n  Scenario: s\n    When a\n  Scenario: t\n    And b\n",
    vec![When, Given]
)]
#[case("Feature: f\n  Scenario: s\n    Then a\n    * b\n", vec![Then, Then])]
fn resolves_effective_keywords(#[case] source: &str, #[case] expected: Vec<StepKeyword>) {
    let tree = SyntaxTree::parse(source);
    let effective: Vec<StepKeyword> = tree.steps().map(|step| step.effective_keyword()).collect();
    assert_eq!(effective, expected);
}

#[test]
fn missing_feature_still_builds_a_tree() {
    let source = "  Given a stray step\n";
    let tree = SyntaxTree::parse(source);
    assert_eq!(tree.feature(), Err(ParseError::MissingFeature));
    assert_eq!(parse_feature(source).err(), Some(ParseError::MissingFeature));
    assert_eq!(
        degradation_kinds(&tree),
        vec![
            DegradationKind::Misplaced(KeywordKind::Step(StepKeyword::Given)),
            DegradationKind::MissingFeature,
        ]
    );
    assert_eq!(tree.steps().count(), 1);
    assert_eq!(tree.leaf_text(), source);
}

const LATE_STEP: &str = "\
Feature: f
  Scenario Outline: s
    Given <a>
    Examples:
      | a |
    Then late
";

#[rstest]
#[case(
    "Feature: f\n  Given orphan\n",
    DegradationKind::Misplaced(KeywordKind::Step(Given))
)]
#[case("Feature: f\n  Examples:\n", DegradationKind::Misplaced(KeywordKind::Examples))]
#[case("Feature: a\nFeature: b\n", DegradationKind::DuplicateFeature)]
#[case("Feature: f\n  Scenario: s\n  | a |\n", DegradationKind::TableOutsideStep)]
#[case("Feature: f\n  \"\"\"\n  x\n  \"\"\"\n", DegradationKind::DocStringOutsideStep)]
#[case(
    "Feature: f\n  Scenario: s\n    Given a\n      \"\"\"\n      open\n",
    DegradationKind::UnclosedDocString
)]
#[case(LATE_STEP, DegradationKind::StepAfterExamples)]
fn records_degradations(#[case] source: &str, #[case] expected: DegradationKind) {
    let tree = SyntaxTree::parse(source);
    assert_eq!(degradation_kinds(&tree), vec![expected]);
    assert_eq!(tree.leaf_text(), source);
}

#[test]
fn step_after_examples_rejoins_its_outline() {
    let tree = SyntaxTree::parse(LATE_STEP);
    let late = tree.steps().last().map(|step| step.id());
    let parent = late.and_then(|id| tree.parent(id));
    assert_eq!(
        parent.and_then(|id| tree.kind(id)),
        Some(NodeKind::ScenarioOutline)
    );
}

#[test]
fn generations_are_unique() {
    let first = SyntaxTree::parse("Feature: f\n");
    let second = SyntaxTree::parse("Feature: f\n");
    assert_ne!(first.generation(), second.generation());
}

#[test]
fn step_at_finds_enclosing_step() {
    let source = "Feature: f\n  Scenario: s\n    Given a\n    When b\n";
    let tree = SyntaxTree::parse(source);
    let offset = source.find("When b").map_or(0, |start| start + 6);
    let found = tree.step_at(offset).map(|step| step.keyword());
    assert_eq!(found, Some(StepKeyword::When));
    assert!(tree.step_at(2).is_none());
}

#[test]
fn empty_source_has_only_a_root() {
    let tree = SyntaxTree::parse("");
    assert!(tree.children(tree.root()).is_empty());
    assert!(tree.tokens().is_empty());
    assert_eq!(tree.span_of(Element::Node(tree.root())), TextSpan::empty(0));
}
