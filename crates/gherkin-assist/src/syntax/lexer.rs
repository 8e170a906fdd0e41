//! Line-aware Gherkin tokenizer.
//!
//! The tokenizer decides what each line is (comment, tags, table row, doc
//! string, keyword line or free text) from the first character after the
//! indentation, then splits the rest of the line accordingly. Which keyword
//! may appear where is left to the tree builder.
//!
//! Every byte of the input ends up in exactly one token.

use std::iter::FusedIterator;

use super::keywords::match_keyword;
use super::token::{KeywordKind, Token, TokenKind};
use crate::span::TextSpan;

const DOC_STRING_DELIMITERS: [&str; 2] = ["\"\"\"", "```"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    LineStart,
    Colon,
    Words,
    Step,
    ParameterName,
    ParameterEnd,
    Tags,
    Table,
}

/// Lazy tokenizer over Gherkin source.
///
/// # Examples
///
/// ```
/// use gherkin_assist::syntax::{TokenKind, Tokenizer};
///
/// let kinds: Vec<TokenKind> = Tokenizer::new("Given <n> items")
///     .map(|token| token.kind)
///     .collect();
/// assert_eq!(kinds.get(2), Some(&TokenKind::ParameterStart));
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
    mode: Mode,
    doc_string: Option<&'static str>,
}

impl<'a> Tokenizer<'a> {
    /// Start tokenizing `source` from its first byte.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            mode: Mode::LineStart,
            doc_string: None,
        }
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        let start = self.pos;
        let mut end = start.saturating_add(len.max(1)).min(self.source.len());
        while !self.source.is_char_boundary(end) {
            end += 1;
        }
        self.pos = end;
        Token {
            kind,
            span: TextSpan::new(start, end),
            text: self.source.get(start..end).unwrap_or_default(),
        }
    }

    fn line_start(&mut self, line: &str) -> Token<'a> {
        let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
        if indent > 0 {
            return self.emit(TokenKind::Whitespace, indent);
        }

        if let Some(delimiter) = self.doc_string {
            self.mode = Mode::Words;
            if line.starts_with(delimiter) {
                self.doc_string = None;
                return self.emit(TokenKind::DocStringDelimiter, delimiter.len());
            }
            return self.emit(TokenKind::Text, line.len());
        }

        if line.starts_with('#') {
            self.mode = Mode::Words;
            return self.emit(TokenKind::Comment, line.len());
        }
        if line.starts_with('@') {
            self.mode = Mode::Tags;
            return self.tags(line);
        }
        if line.starts_with('|') {
            self.mode = Mode::Table;
            return self.table(line);
        }
        if let Some(delimiter) = DOC_STRING_DELIMITERS
            .into_iter()
            .find(|delimiter| line.starts_with(delimiter))
        {
            self.doc_string = Some(delimiter);
            self.mode = Mode::Words;
            return self.emit(TokenKind::DocStringDelimiter, delimiter.len());
        }
        if let Some((kind, len)) = match_keyword(line) {
            self.mode = match kind {
                KeywordKind::Step(_) => Mode::Step,
                _ => Mode::Colon,
            };
            return self.emit(TokenKind::Keyword(kind), len);
        }

        self.mode = Mode::Words;
        self.words(line)
    }

    fn whitespace(&mut self, line: &str) -> Option<Token<'a>> {
        let len = line.len() - line.trim_start_matches([' ', '\t']).len();
        (len > 0).then(|| self.emit(TokenKind::Whitespace, len))
    }

    fn words(&mut self, line: &str) -> Token<'a> {
        if let Some(token) = self.whitespace(line) {
            return token;
        }
        let len = line.find([' ', '\t']).unwrap_or(line.len());
        self.emit(TokenKind::Text, len)
    }

    fn step(&mut self, line: &str) -> Token<'a> {
        if let Some(token) = self.whitespace(line) {
            return token;
        }
        if placeholder_name_len(line).is_some() {
            self.mode = Mode::ParameterName;
            return self.emit(TokenKind::ParameterStart, 1);
        }
        let len = line
            .char_indices()
            .skip(1)
            .find(|&(index, ch)| {
                ch == ' '
                    || ch == '\t'
                    || (ch == '<'
                        && line
                            .get(index..)
                            .and_then(placeholder_name_len)
                            .is_some())
            })
            .map_or(line.len(), |(index, _)| index);
        self.emit(TokenKind::Text, len)
    }

    fn tags(&mut self, line: &str) -> Token<'a> {
        if let Some(token) = self.whitespace(line) {
            return token;
        }
        if line.starts_with('#') {
            return self.emit(TokenKind::Comment, line.len());
        }
        let len = line.find([' ', '\t']).unwrap_or(line.len());
        self.emit(TokenKind::Tag, len)
    }

    fn table(&mut self, line: &str) -> Token<'a> {
        if let Some(token) = self.whitespace(line) {
            return token;
        }
        if line.starts_with('|') {
            return self.emit(TokenKind::Pipe, 1);
        }
        let cell = table_cell_len(line);
        let trimmed = line
            .get(..cell)
            .map_or(cell, |text| text.trim_end_matches([' ', '\t']).len());
        self.emit(TokenKind::TableCell, trimmed)
    }
}

/// Length of the placeholder name when `text` starts with `<name>`.
fn placeholder_name_len(text: &str) -> Option<usize> {
    let body = text.strip_prefix('<')?;
    let close = body.find(|c: char| c == '>' || c == '<' || c.is_whitespace())?;
    (close > 0 && body.get(close..)?.starts_with('>')).then_some(close)
}

/// Byte length of a table cell up to the next unescaped `|` or line end.
fn table_cell_len(line: &str) -> usize {
    let mut chars = line.char_indices();
    while let Some((index, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '|' => return index,
            _ => {}
        }
    }
    line.len()
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = self.source.get(self.pos..)?;
        let first = rest.chars().next()?;

        if first == '\n' || first == '\r' {
            self.mode = Mode::LineStart;
            let len = if rest.starts_with("\r\n") { 2 } else { 1 };
            return Some(self.emit(TokenKind::Newline, len));
        }

        let line_len = rest.find(['\n', '\r']).unwrap_or(rest.len());
        let line = rest.get(..line_len).unwrap_or(rest);

        let token = match self.mode {
            Mode::LineStart => self.line_start(line),
            Mode::Colon => {
                self.mode = Mode::Words;
                self.emit(TokenKind::Colon, 1)
            }
            Mode::Words => self.words(line),
            Mode::Step => self.step(line),
            Mode::ParameterName => {
                self.mode = Mode::ParameterEnd;
                let len = line.find('>').unwrap_or(line.len());
                self.emit(TokenKind::ParameterName, len)
            }
            Mode::ParameterEnd => {
                self.mode = Mode::Step;
                self.emit(TokenKind::ParameterEnd, 1)
            }
            Mode::Tags => self.tags(line),
            Mode::Table => self.table(line),
        };
        Some(token)
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Tokenize `source` eagerly.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Tokenizer::new(source).collect()
}
