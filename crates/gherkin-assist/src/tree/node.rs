//! Arena entries of the syntax tree.

use std::fmt;

use gherkin_assist_patterns::StepKeyword;

use crate::span::TextSpan;
use crate::syntax::KeywordKind;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena. Nodes are numbered in document
    /// order, parents before their children.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a token in its tree's token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub(crate) usize);

impl TokenId {
    /// Position of the token in document order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A child of a node: either another node or a plain token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// A nested node.
    Node(NodeId),
    /// A token owned directly by the parent.
    Token(TokenId),
}

impl Element {
    /// The node id, when the element is a node.
    #[must_use]
    pub fn as_node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            Self::Token(_) => None,
        }
    }

    /// The token id, when the element is a plain token.
    #[must_use]
    pub fn as_token(self) -> Option<TokenId> {
        match self {
            Self::Token(id) => Some(id),
            Self::Node(_) => None,
        }
    }
}

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The whole file, including anything before the `Feature` keyword.
    File,
    /// A `Feature` block.
    Feature,
    /// A `Rule` block.
    Rule,
    /// A `Background` block.
    Background,
    /// A `Scenario` (or `Example`) block.
    Scenario,
    /// A `Scenario Outline` block.
    ScenarioOutline,
    /// An `Examples` block.
    Examples,
    /// A step line with its attached table or doc string.
    Step {
        /// Keyword as written.
        keyword: StepKeyword,
        /// `Given`, `When` or `Then` after resolving conjunctions.
        effective: StepKeyword,
    },
    /// A `<name>` placeholder inside a step.
    StepParameter,
    /// A data table.
    Table,
    /// One row of a data table.
    TableRow,
    /// A doc string including its delimiters.
    DocString,
}

impl NodeKind {
    /// Whether the node groups steps, descriptions or other blocks.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::File
                | Self::Feature
                | Self::Rule
                | Self::Background
                | Self::Scenario
                | Self::ScenarioOutline
                | Self::Examples
        )
    }

    /// Whether the node may hold steps.
    #[must_use]
    pub fn holds_steps(self) -> bool {
        matches!(
            self,
            Self::Background | Self::Scenario | Self::ScenarioOutline
        )
    }

    pub(crate) fn from_keyword(keyword: KeywordKind, effective: StepKeyword) -> Self {
        match keyword {
            KeywordKind::Feature => Self::Feature,
            KeywordKind::Rule => Self::Rule,
            KeywordKind::Background => Self::Background,
            KeywordKind::Scenario => Self::Scenario,
            KeywordKind::ScenarioOutline => Self::ScenarioOutline,
            KeywordKind::Examples => Self::Examples,
            KeywordKind::Step(keyword) => Self::Step { keyword, effective },
        }
    }
}

/// One arena entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) span: TextSpan,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<Element>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            span: TextSpan::default(),
            parent,
            children: Vec::new(),
        }
    }

    /// What the node represents.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Union of the children's spans.
    #[must_use]
    pub fn span(&self) -> TextSpan {
        self.span
    }

    /// The enclosing node; `None` only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

/// What went wrong while building a tree from malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegradationKind {
    /// The source has no `Feature` keyword.
    MissingFeature,
    /// A second `Feature` keyword was found.
    DuplicateFeature,
    /// A keyword appeared where its block is not allowed.
    Misplaced(KeywordKind),
    /// A step follows an `Examples` block.
    StepAfterExamples,
    /// A table is not attached to a step or an `Examples` block.
    TableOutsideStep,
    /// A doc string is not attached to a step.
    DocStringOutsideStep,
    /// A doc string runs to the end of the file.
    UnclosedDocString,
}

impl fmt::Display for DegradationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFeature => f.write_str("no Feature keyword"),
            Self::DuplicateFeature => f.write_str("more than one Feature"),
            Self::Misplaced(keyword) => write!(f, "misplaced {keyword:?} keyword"),
            Self::StepAfterExamples => f.write_str("step after Examples"),
            Self::TableOutsideStep => f.write_str("table outside a step or Examples"),
            Self::DocStringOutsideStep => f.write_str("doc string outside a step"),
            Self::UnclosedDocString => f.write_str("unclosed doc string"),
        }
    }
}

/// A recovered problem in the source, recorded instead of failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Degradation {
    /// What was wrong.
    pub kind: DegradationKind,
    /// Where in the source.
    pub span: TextSpan,
}
