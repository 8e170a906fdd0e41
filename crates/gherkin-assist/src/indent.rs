//! Structure-aware indentation for line breaks.
//!
//! Pressing Enter after a keyword line starts the next line at the indent
//! the following element conventionally uses: a scenario below `Feature`,
//! a step below `Scenario`, a table row below `Examples`, another step
//! below a step.

use tracing::{debug, trace};

use crate::config::{AssistConfig, IndentOptions, IndentStyle};
use crate::document::{EditableDocument, TextControl};
use crate::error::AssistError;
use crate::syntax::{KeywordKind, Token, TokenKind, tokenize};

/// The nearest keyword token starting before `offset`.
///
/// Returns the token's index in `tokens` so callers can inspect its
/// neighbours. `tokens` must be in document order, as produced by the
/// tokenizer.
#[must_use]
pub fn last_keyword_before<'t, 'a>(
    tokens: &'t [Token<'a>],
    offset: usize,
) -> Option<(usize, &'t Token<'a>)> {
    if offset == 0 {
        return None;
    }
    // Tokens are contiguous, so this is the token holding `offset - 1`
    // plus everything before it.
    let end = tokens.partition_point(|token| token.span.start < offset);
    tokens
        .get(..end)?
        .iter()
        .enumerate()
        .rev()
        .find(|(_, token)| token.kind.keyword().is_some())
}

/// Indentation levels added below `keyword`.
#[must_use]
pub fn extra_indent(keyword: KeywordKind, options: &IndentOptions) -> usize {
    match keyword {
        KeywordKind::Feature | KeywordKind::Rule => options.scenario_indent_size,
        KeywordKind::Background | KeywordKind::Scenario | KeywordKind::ScenarioOutline => {
            options.step_indent_size
        }
        KeywordKind::Examples => options.table_indent_size,
        KeywordKind::Step(_) => 0,
    }
}

/// The indentation of the keyword at `index`: the whitespace token right
/// before it, or nothing when the keyword starts the line.
#[must_use]
pub fn base_indent<'a>(tokens: &[Token<'a>], index: usize) -> &'a str {
    index
        .checked_sub(1)
        .and_then(|previous| tokens.get(previous))
        .filter(|token| token.kind == TokenKind::Whitespace)
        .map_or("", |token| token.text)
}

/// Text for `levels` indentation levels.
#[must_use]
pub fn indent_text(levels: usize, options: &IndentOptions) -> String {
    match options.indent_style {
        IndentStyle::Tab => "\t".repeat(levels),
        IndentStyle::Space => " ".repeat(levels.saturating_mul(options.indent_size)),
    }
}

/// Line terminator convention of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`.
    #[default]
    Lf,
    /// `\r\n`.
    CrLf,
    /// `\r`.
    Cr,
}

impl LineEnding {
    /// The convention of the first line break in `text`; `Lf` when there is
    /// none.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let Some(position) = text.find(['\n', '\r']) else {
            return Self::Lf;
        };
        let rest = text.get(position..).unwrap_or_default();
        if rest.starts_with("\r\n") {
            Self::CrLf
        } else if rest.starts_with('\r') {
            Self::Cr
        } else {
            Self::Lf
        }
    }

    /// The terminator characters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }
}

/// Text to insert for a line break at `offset` in `source`.
///
/// `None` when no keyword precedes the offset, in which case the host's
/// default line break applies.
///
/// # Examples
///
/// ```
/// use gherkin_assist::config::IndentOptions;
/// use gherkin_assist::indent::line_break_text;
///
/// let source = "Feature: f\n  Scenario: foo";
/// let text = line_break_text(source, source.len(), &IndentOptions::default());
/// assert_eq!(text.as_deref(), Some("\n      "));
/// ```
#[must_use]
pub fn line_break_text(source: &str, offset: usize, options: &IndentOptions) -> Option<String> {
    let tokens = tokenize(source);
    let (index, token) = last_keyword_before(&tokens, offset)?;
    let keyword = token.kind.keyword()?;
    let levels = extra_indent(keyword, options);
    let base = base_indent(&tokens, index);
    trace!(?keyword, levels, base_len = base.len(), "computed line break indent");

    let mut text = String::from(LineEnding::detect(source).as_str());
    text.push_str(base);
    text.push_str(&indent_text(levels, options));
    Some(text)
}

/// Enter-key handler inserting structure-aware indentation.
#[derive(Debug, Clone, Default)]
pub struct SmartLineBreak {
    enabled: bool,
    options: IndentOptions,
}

impl SmartLineBreak {
    /// A handler using the configured indentation.
    #[must_use]
    pub fn new(config: &AssistConfig) -> Self {
        Self {
            enabled: config.smart_indent_on_enter,
            options: config.indent,
        }
    }

    /// The indentation settings in use.
    #[must_use]
    pub fn options(&self) -> &IndentOptions {
        &self.options
    }

    /// Handle a line break at the caret.
    ///
    /// Returns `Ok(true)` after inserting the line break and indentation,
    /// or `Ok(false)` when the host should fall back to its default
    /// behaviour: smart indentation is off, text is selected, the caret is
    /// at the start of the document, or no keyword precedes the caret.
    ///
    /// # Errors
    ///
    /// [`AssistError::WriteBlocked`] when the document is read-only and
    /// [`AssistError::OffsetOutOfRange`] when the caret is past the end of
    /// the document. Both are checked before anything else.
    pub fn handle<D, C>(&self, document: &mut D, control: &C) -> Result<bool, AssistError>
    where
        D: EditableDocument + ?Sized,
        C: TextControl + ?Sized,
    {
        if !document.is_writable() {
            return Err(AssistError::WriteBlocked);
        }
        let caret = control.caret_offset();
        let len = document.text().len();
        if caret > len {
            return Err(AssistError::OffsetOutOfRange { offset: caret, len });
        }
        if !self.enabled {
            debug!("smart line break disabled");
            return Ok(false);
        }
        if !control.selection().is_empty() {
            debug!("selection present, using default line break");
            return Ok(false);
        }
        if caret == 0 {
            return Ok(false);
        }
        let Some(text) = line_break_text(document.text(), caret, &self.options) else {
            debug!(caret, "no keyword before caret");
            return Ok(false);
        };

        document.insert_text(caret, &text)?;
        debug!(caret, inserted = text.len(), "inserted smart line break");
        Ok(true)
    }
}
