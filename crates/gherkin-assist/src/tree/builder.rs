//! Single-pass construction of a [`SyntaxTree`] from tokens.
//!
//! The builder keeps a stack of open nodes. Keywords close open nodes down
//! to a valid parent and open a new one; every other significant token goes
//! to the innermost open node. Trivia is held back until the next
//! significant token so that elements end at their last significant token.

use std::sync::atomic::{AtomicU64, Ordering};

use gherkin_assist_patterns::StepKeyword;
use tracing::debug;

use super::node::{Degradation, DegradationKind, Element, Node, NodeId, NodeKind, TokenId};
use super::SyntaxTree;
use crate::span::TextSpan;
use crate::syntax::{KeywordKind, Token, TokenKind, Tokenizer};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

const ROOT: NodeId = NodeId(0);

pub(super) fn build(source: &str) -> SyntaxTree<'_> {
    let mut builder = Builder::new(Tokenizer::new(source).collect());
    for index in 0..builder.tokens.len() {
        builder.push_token(TokenId(index));
    }
    builder.finish(source)
}

struct Builder<'a> {
    tokens: Vec<Token<'a>>,
    nodes: Vec<Node>,
    stack: Vec<NodeId>,
    pending: Vec<TokenId>,
    degradations: Vec<Degradation>,
    last_concrete: Option<StepKeyword>,
    at_line_start: bool,
    doc_string_open: bool,
    has_feature: bool,
}

impl<'a> Builder<'a> {
    fn new(tokens: Vec<Token<'a>>) -> Self {
        Self {
            tokens,
            nodes: vec![Node::new(NodeKind::File, None)],
            stack: vec![ROOT],
            pending: Vec::new(),
            degradations: Vec::new(),
            last_concrete: None,
            at_line_start: true,
            doc_string_open: false,
            has_feature: false,
        }
    }

    fn kind_of(&self, id: TokenId) -> Option<TokenKind> {
        self.tokens.get(id.0).map(|token| token.kind)
    }

    fn span_of(&self, id: TokenId) -> TextSpan {
        self.tokens
            .get(id.0)
            .map_or_else(TextSpan::default, |token| token.span)
    }

    fn top(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(ROOT)
    }

    fn top_kind(&self) -> NodeKind {
        self.node_kind(self.top())
    }

    fn node_kind(&self, id: NodeId) -> NodeKind {
        self.nodes.get(id.0).map_or(NodeKind::File, |node| node.kind)
    }

    fn append(&mut self, parent: NodeId, element: Element) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(element);
        }
    }

    fn flush_into(&mut self, parent: NodeId) {
        let pending = std::mem::take(&mut self.pending);
        for id in pending {
            self.append(parent, Element::Token(id));
        }
    }

    /// Flush trivia into the innermost node and append `token` to it.
    fn attach(&mut self, token: TokenId) {
        let top = self.top();
        self.flush_into(top);
        self.append(top, Element::Token(token));
    }

    /// Open a node under the innermost node, flushing trivia into the
    /// parent first, and make it the innermost node.
    fn open(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.top();
        self.flush_into(parent);
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, Some(parent)));
        self.append(parent, Element::Node(id));
        self.stack.push(id);
        id
    }

    fn degrade(&mut self, kind: DegradationKind, span: TextSpan) {
        debug!(%kind, %span, "recovered from malformed gherkin");
        self.degradations.push(Degradation { kind, span });
    }

    fn close_leaves(&mut self) {
        while self.stack.len() > 1 && !self.top_kind().is_container() {
            self.stack.pop();
        }
    }

    fn push_token(&mut self, id: TokenId) {
        let Some(kind) = self.kind_of(id) else {
            return;
        };
        if kind.is_trivia() {
            self.pending.push(id);
            if kind == TokenKind::Newline {
                self.at_line_start = true;
            }
            return;
        }

        let line_start = std::mem::replace(&mut self.at_line_start, false);

        if self.doc_string_open {
            if kind == TokenKind::DocStringDelimiter {
                self.doc_string_open = false;
            }
            self.attach(id);
            return;
        }

        match kind {
            TokenKind::Keyword(keyword) => self.open_keyword(keyword, id),
            TokenKind::ParameterStart => {
                self.open(NodeKind::StepParameter);
                self.attach(id);
            }
            TokenKind::ParameterEnd => {
                self.attach(id);
                if self.top_kind() == NodeKind::StepParameter {
                    self.stack.pop();
                }
            }
            TokenKind::Pipe if line_start => self.open_row(id),
            TokenKind::DocStringDelimiter => self.open_doc_string(id),
            TokenKind::Text | TokenKind::Tag if line_start => {
                self.close_leaves();
                self.attach(id);
            }
            _ => self.attach(id),
        }
    }

    fn open_keyword(&mut self, keyword: KeywordKind, id: TokenId) {
        self.close_leaves();
        let span = self.span_of(id);

        match keyword {
            KeywordKind::Feature => {
                if self.has_feature {
                    self.degrade(DegradationKind::DuplicateFeature, span);
                }
                self.has_feature = true;
                self.stack.truncate(1);
            }
            KeywordKind::Rule => self.close_to(keyword, span, |kind| kind == NodeKind::Feature),
            KeywordKind::Background | KeywordKind::Scenario | KeywordKind::ScenarioOutline => {
                self.close_to(keyword, span, |kind| {
                    matches!(kind, NodeKind::Feature | NodeKind::Rule)
                });
            }
            KeywordKind::Examples => self.close_to(keyword, span, |kind| {
                matches!(kind, NodeKind::Scenario | NodeKind::ScenarioOutline)
            }),
            KeywordKind::Step(_) => {
                let passed_examples = self
                    .stack
                    .iter()
                    .rev()
                    .take_while(|&&open| !self.node_kind(open).holds_steps())
                    .any(|&open| self.node_kind(open) == NodeKind::Examples);
                self.close_to(keyword, span, NodeKind::holds_steps);
                if passed_examples && self.top_kind().holds_steps() {
                    self.degrade(DegradationKind::StepAfterExamples, span);
                }
            }
        }

        let effective = match keyword {
            KeywordKind::Step(step) => step.resolve(&mut self.last_concrete),
            KeywordKind::Examples => StepKeyword::Given,
            _ => {
                self.last_concrete = None;
                StepKeyword::Given
            }
        };
        self.open(NodeKind::from_keyword(keyword, effective));
        self.attach(id);
    }

    /// Pop open nodes until the innermost one satisfies `allowed`. When no
    /// open node does, the stack is left alone and the keyword is recorded
    /// as misplaced.
    fn close_to(
        &mut self,
        keyword: KeywordKind,
        span: TextSpan,
        allowed: impl Fn(NodeKind) -> bool,
    ) {
        let found = self
            .stack
            .iter()
            .rposition(|&open| allowed(self.node_kind(open)));
        let Some(position) = found else {
            self.degrade(DegradationKind::Misplaced(keyword), span);
            return;
        };
        self.stack.truncate(position + 1);
    }

    fn open_row(&mut self, id: TokenId) {
        if self.top_kind() == NodeKind::TableRow {
            self.stack.pop();
        }
        if self.top_kind() != NodeKind::Table {
            while matches!(
                self.top_kind(),
                NodeKind::StepParameter | NodeKind::DocString
            ) {
                self.stack.pop();
            }
            if !matches!(self.top_kind(), NodeKind::Step { .. } | NodeKind::Examples) {
                self.close_leaves();
                self.degrade(DegradationKind::TableOutsideStep, self.span_of(id));
            }
            self.open(NodeKind::Table);
        }
        self.open(NodeKind::TableRow);
        self.attach(id);
    }

    fn open_doc_string(&mut self, id: TokenId) {
        while matches!(
            self.top_kind(),
            NodeKind::StepParameter | NodeKind::Table | NodeKind::TableRow | NodeKind::DocString
        ) {
            self.stack.pop();
        }
        if !matches!(self.top_kind(), NodeKind::Step { .. }) {
            self.close_leaves();
            self.degrade(DegradationKind::DocStringOutsideStep, self.span_of(id));
        }
        self.open(NodeKind::DocString);
        self.attach(id);
        self.doc_string_open = true;
    }

    fn finish(mut self, source: &'a str) -> SyntaxTree<'a> {
        if self.doc_string_open {
            let start = self
                .stack
                .last()
                .and_then(|id| self.nodes.get(id.0))
                .and_then(|node| node.children.first())
                .and_then(|first| first.as_token())
                .map_or(0, |token| self.span_of(token).start);
            self.degrade(
                DegradationKind::UnclosedDocString,
                TextSpan::new(start, source.len()),
            );
        } else {
            self.close_leaves();
        }
        let top = self.top();
        self.flush_into(top);

        if !self.has_feature {
            self.degrade(
                DegradationKind::MissingFeature,
                TextSpan::new(0, source.len()),
            );
        }

        self.compute_spans();
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        debug!(
            generation,
            nodes = self.nodes.len(),
            tokens = self.tokens.len(),
            degradations = self.degradations.len(),
            "built syntax tree"
        );

        SyntaxTree {
            source,
            tokens: self.tokens,
            nodes: self.nodes,
            degradations: self.degradations,
            generation,
        }
    }

    /// Children always have larger ids than their parent, so a reverse
    /// sweep sees every child span before the parent needs it.
    fn compute_spans(&mut self) {
        for index in (0..self.nodes.len()).rev() {
            let span = self.nodes.get(index).and_then(|node| {
                node.children
                    .iter()
                    .map(|&child| match child {
                        Element::Token(token) => self.span_of(token),
                        Element::Node(id) => self
                            .nodes
                            .get(id.0)
                            .map_or_else(TextSpan::default, |node| node.span),
                    })
                    .reduce(TextSpan::cover)
            });
            if let Some(node) = self.nodes.get_mut(index) {
                node.span = span.unwrap_or_default();
            }
        }
    }
}
