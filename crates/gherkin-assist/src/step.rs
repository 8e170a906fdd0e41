//! Text views over step nodes.
//!
//! A step's text comes from its own line only: the children before the
//! first line break. Tables and doc strings attached below the line are
//! part of the node but never of its text.

use gherkin_assist_patterns::StepKeyword;

use crate::examples::ExampleRow;
use crate::reference::StepReference;
use crate::span::TextSpan;
use crate::syntax::TokenKind;
use crate::tree::{Element, NodeId, NodeKind, SyntaxTree};

/// Borrowed view of a step node.
#[derive(Debug, Clone, Copy)]
pub struct Step<'t, 'a> {
    tree: &'t SyntaxTree<'a>,
    id: NodeId,
    keyword: StepKeyword,
    effective: StepKeyword,
}

impl<'t, 'a> Step<'t, 'a> {
    pub(crate) fn new(tree: &'t SyntaxTree<'a>, id: NodeId) -> Option<Self> {
        match tree.kind(id)? {
            NodeKind::Step { keyword, effective } => Some(Self {
                tree,
                id,
                keyword,
                effective,
            }),
            _ => None,
        }
    }

    /// The underlying node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree the step belongs to.
    #[must_use]
    pub fn tree(&self) -> &'t SyntaxTree<'a> {
        self.tree
    }

    /// Keyword as written; `*` reads as `And`.
    #[must_use]
    pub fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// `Given`, `When` or `Then`, with conjunctions resolved against the
    /// preceding steps of the same block.
    #[must_use]
    pub fn effective_keyword(&self) -> StepKeyword {
        self.effective
    }

    /// Source text of the keyword token.
    #[must_use]
    pub fn keyword_text(&self) -> &'a str {
        self.line_elements()
            .find(|&element| self.is_keyword(element))
            .map_or("", |element| self.tree.element_text(element))
    }

    /// Span of the whole node, including any attached table or doc string.
    #[must_use]
    pub fn span(&self) -> TextSpan {
        self.tree.span_of(Element::Node(self.id))
    }

    /// The `<name>` placeholders on the step line.
    pub fn parameters(&self) -> impl Iterator<Item = StepParameter<'t, 'a>> + '_ {
        let tree = self.tree;
        self.line_elements()
            .filter_map(Element::as_node)
            .filter_map(move |id| StepParameter::new(tree, id))
    }

    /// Children on the step's own line.
    fn line_elements(&self) -> impl Iterator<Item = Element> + 't {
        let tree = self.tree;
        tree.children(self.id).iter().copied().take_while(move |&element| {
            element
                .as_token()
                .and_then(|id| tree.token(id))
                .is_none_or(|token| token.kind != TokenKind::Newline)
        })
    }

    fn is_keyword(&self, element: Element) -> bool {
        self.token_kind(element)
            .is_some_and(|kind| kind.keyword().is_some())
    }

    fn token_kind(&self, element: Element) -> Option<TokenKind> {
        element
            .as_token()
            .and_then(|id| self.tree.token(id))
            .map(|token| token.kind)
    }

    /// Line elements from the first one that is neither the keyword nor
    /// whitespace.
    fn text_elements(&self) -> impl Iterator<Item = Element> + 't {
        let step = *self;
        self.line_elements().skip_while(move |&element| {
            step.is_keyword(element) || step.token_kind(element) == Some(TokenKind::Whitespace)
        })
    }

    /// Range of the step text, keyword excluded.
    ///
    /// Runs from the first element that is neither the keyword nor
    /// whitespace to the end of the node, so an attached table or doc
    /// string is covered. A step with nothing after its keyword yields an
    /// empty range at the node's end.
    #[must_use]
    pub fn text_range(&self) -> TextSpan {
        let end = self.span().end;
        self.text_elements().next().map_or_else(
            || TextSpan::empty(end),
            |first| TextSpan::new(self.tree.span_of(first).start, end),
        )
    }

    /// Step text up to `caret`, keyword excluded, trimmed.
    ///
    /// An element containing the caret contributes only the part before
    /// it. When the cut would remove everything gathered so far the result
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_assist::tree::SyntaxTree;
    ///
    /// let source = "Feature: f\n  Scenario: s\n    Given I have <count> items\n";
    /// let tree = SyntaxTree::parse(source);
    /// let step = tree.steps().next().expect("one step");
    /// let caret = source.find("<count>").expect("placeholder") + 3;
    /// assert_eq!(step.text_before_caret(caret), "I have <co");
    /// ```
    #[must_use]
    pub fn text_before_caret(&self, caret: usize) -> String {
        let mut text = String::new();
        for element in self.text_elements() {
            let span = self.tree.span_of(element);
            if span.start > caret {
                break;
            }
            text.push_str(self.tree.element_text(element));
            if span.end > caret {
                let cut = span.end - caret;
                if cut >= text.len() {
                    return String::new();
                }
                let mut keep = text.len() - cut;
                while !text.is_char_boundary(keep) {
                    keep -= 1;
                }
                text.truncate(keep);
                break;
            }
        }
        text.trim().to_owned()
    }

    /// Full step text with placeholders as written, trimmed.
    ///
    /// This is the string matched against step definitions.
    #[must_use]
    pub fn text(&self, with_keyword: bool) -> String {
        let text: String = self
            .line_elements()
            .filter(|&element| with_keyword || !self.is_keyword(element))
            .map(|element| self.tree.element_text(element))
            .collect();
        text.trim().to_owned()
    }

    /// Step text with each placeholder replaced by its value in `row`.
    ///
    /// A placeholder missing from the row is written as its bare name, so
    /// `<count>` becomes `count`. Angle brackets of placeholders never
    /// appear in the result.
    #[must_use]
    pub fn text_for_example(&self, row: &ExampleRow) -> String {
        let text: String = self
            .line_elements()
            .filter(|&element| !self.is_keyword(element))
            .map(|element| match element {
                Element::Node(id) => StepParameter::new(self.tree, id).map_or_else(
                    || self.tree.element_text(element),
                    |parameter| row.get(parameter.name()).unwrap_or_else(|| parameter.name()),
                ),
                Element::Token(_) => self.tree.element_text(element),
            })
            .collect();
        text.trim().to_owned()
    }

    /// Resolvable reference built from [`text(false)`](Self::text).
    #[must_use]
    pub fn reference(&self) -> StepReference {
        StepReference::new(self.id, self.effective, self.text(false))
    }

    /// Reference for one expansion of a Scenario Outline step.
    #[must_use]
    pub fn reference_for_example(&self, row: &ExampleRow) -> StepReference {
        StepReference::new(self.id, self.effective, self.text_for_example(row))
    }
}

/// Borrowed view of a `<name>` placeholder node.
#[derive(Debug, Clone, Copy)]
pub struct StepParameter<'t, 'a> {
    tree: &'t SyntaxTree<'a>,
    id: NodeId,
}

impl<'t, 'a> StepParameter<'t, 'a> {
    fn new(tree: &'t SyntaxTree<'a>, id: NodeId) -> Option<Self> {
        (tree.kind(id)? == NodeKind::StepParameter).then_some(Self { tree, id })
    }

    /// The underlying node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Text between the angle brackets.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.tree
            .children(self.id)
            .iter()
            .filter_map(|child| child.as_token())
            .filter_map(|id| self.tree.token(id))
            .find(|token| token.kind == TokenKind::ParameterName)
            .map_or("", |token| token.text)
    }

    /// Span of `<name>`.
    #[must_use]
    pub fn span(&self) -> TextSpan {
        self.tree.span_of(Element::Node(self.id))
    }

    /// The placeholder as written, brackets included.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.tree.node_text(self.id)
    }
}
