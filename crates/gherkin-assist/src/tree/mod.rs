//! Arena-based Gherkin syntax tree.
//!
//! A [`SyntaxTree`] owns the token list and an arena of [`Node`]s addressed
//! by [`NodeId`]. The root is always a [`NodeKind::File`] node spanning the
//! whole source; every token is reachable from it exactly once, so walking
//! the leaves reproduces the input.
//!
//! Building never fails. Problems are recorded as [`Degradation`]s and the
//! offending element is attached to the nearest sensible node.

mod builder;
mod node;

#[cfg(test)]
mod tests;

pub use node::{Degradation, DegradationKind, Element, Node, NodeId, NodeKind, TokenId};

use crate::error::ParseError;
use crate::examples::{ExampleRow, ExamplesTable};
use crate::span::TextSpan;
use crate::step::Step;
use crate::syntax::Token;

/// Lossless syntax tree over a borrowed source text.
#[derive(Debug, Clone)]
pub struct SyntaxTree<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    nodes: Vec<Node>,
    degradations: Vec<Degradation>,
    generation: u64,
}

/// Build a tree and require a `Feature` keyword.
///
/// # Errors
///
/// Returns [`ParseError::MissingFeature`] when the source contains no
/// `Feature` keyword. Use [`SyntaxTree::parse`] to keep the partial tree.
///
/// # Examples
///
/// ```
/// use gherkin_assist::tree::parse_feature;
///
/// assert!(parse_feature("Feature: Basket\n").is_ok());
/// assert!(parse_feature("Given a step\n").is_err());
/// ```
pub fn parse_feature(source: &str) -> Result<SyntaxTree<'_>, ParseError> {
    let tree = SyntaxTree::parse(source);
    tree.feature()?;
    Ok(tree)
}

impl<'a> SyntaxTree<'a> {
    /// Build a tree from `source`, recovering from malformed input.
    #[must_use]
    pub fn parse(source: &'a str) -> Self {
        builder::build(source)
    }

    /// The text the tree was built from.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Process-wide unique number identifying this build.
    ///
    /// Two trees never share a generation, even when built from the same
    /// text, so caches keyed by [`NodeId`] can tell a rebuilt tree apart.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The [`NodeKind::File`] root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(Node::kind)
    }

    /// Look up a token.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token<'a>> {
        self.tokens.get(id.0)
    }

    /// Every token in document order.
    #[must_use]
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Children of a node; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[Element] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Span of a child element.
    #[must_use]
    pub fn span_of(&self, element: Element) -> TextSpan {
        match element {
            Element::Node(id) => self.node(id).map_or_else(TextSpan::default, Node::span),
            Element::Token(id) => self.token(id).map_or_else(TextSpan::default, |token| token.span),
        }
    }

    /// Source text covered by a child element.
    #[must_use]
    pub fn element_text(&self, element: Element) -> &'a str {
        self.source
            .get(self.span_of(element).range())
            .unwrap_or_default()
    }

    /// Source text covered by a node.
    #[must_use]
    pub fn node_text(&self, id: NodeId) -> &'a str {
        self.element_text(Element::Node(id))
    }

    /// `id` and every node below it, in document order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(
                self.children(next)
                    .iter()
                    .rev()
                    .filter_map(|child| child.as_node()),
            );
            Some(next)
        })
    }

    /// Child nodes of `id` with the given kind.
    pub fn child_nodes(&self, id: NodeId, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .filter_map(|child| child.as_node())
            .filter(move |&child| self.kind(child) == Some(kind))
    }

    /// Every token reachable from the root, in tree order.
    pub fn leaves(&self) -> impl Iterator<Item = &Token<'a>> + '_ {
        let mut stack = vec![Element::Node(self.root())];
        std::iter::from_fn(move || {
            loop {
                match stack.pop()? {
                    Element::Token(id) => return self.token(id),
                    Element::Node(id) => stack.extend(self.children(id).iter().rev().copied()),
                }
            }
        })
    }

    /// Concatenated text of every leaf token in tree order.
    ///
    /// Equals [`source`](Self::source) for every tree.
    #[must_use]
    pub fn leaf_text(&self) -> String {
        self.leaves().map(|token| token.text).collect()
    }

    /// The first `Feature` node.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingFeature`] when the source has none.
    pub fn feature(&self) -> Result<NodeId, ParseError> {
        self.child_nodes(self.root(), NodeKind::Feature)
            .next()
            .ok_or(ParseError::MissingFeature)
    }

    /// Problems recovered from while building.
    #[must_use]
    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    /// Every step in document order.
    pub fn steps(&self) -> impl Iterator<Item = Step<'_, 'a>> + '_ {
        self.descendants(self.root())
            .filter_map(move |id| self.step(id))
    }

    /// View a node as a step; `None` when it is not a step node.
    #[must_use]
    pub fn step(&self, id: NodeId) -> Option<Step<'_, 'a>> {
        Step::new(self, id)
    }

    /// The step whose span contains `offset` or ends exactly at it.
    #[must_use]
    pub fn step_at(&self, offset: usize) -> Option<Step<'_, 'a>> {
        self.steps().find(|step| {
            let span = step.span();
            span.start <= offset && offset <= span.end
        })
    }

    /// Examples tables of a Scenario Outline, in document order.
    #[must_use]
    pub fn examples_tables(&self, outline: NodeId) -> Vec<ExamplesTable> {
        self.child_nodes(outline, NodeKind::Examples)
            .filter_map(|examples| ExamplesTable::from_node(self, examples))
            .collect()
    }

    /// Every step of an outline paired with every example row.
    ///
    /// Rows are the outer loop, so the pairs for one example are adjacent
    /// and in step order.
    #[must_use]
    pub fn outline_expansions(&self, outline: NodeId) -> Vec<(Step<'_, 'a>, ExampleRow)> {
        let steps: Vec<Step<'_, 'a>> = self
            .children(outline)
            .iter()
            .filter_map(|child| child.as_node())
            .filter_map(|id| self.step(id))
            .collect();
        self.examples_tables(outline)
            .iter()
            .flat_map(|table| table.rows())
            .flat_map(|row| steps.iter().map(move |step| (*step, row.clone())))
            .collect()
    }
}
