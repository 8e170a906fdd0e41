//! Example rows for Scenario Outline substitution.

use crate::syntax::TokenKind;
use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// Placeholder values for one example, keyed by parameter name.
///
/// Keys are unique and keep their insertion order.
///
/// # Examples
///
/// ```
/// use gherkin_assist::ExampleRow;
///
/// let row = ExampleRow::from_pairs([("count", "5"), ("item", "apple")]);
/// assert_eq!(row.get("count"), Some("5"));
/// assert_eq!(row.get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleRow {
    entries: Vec<(String, String)>,
}

impl ExampleRow {
    /// An empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from name/value pairs; later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Set `name` to `value`, returning the previous value.
    ///
    /// Replacing a value keeps the key's original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((name, value));
        None
    }

    /// Value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row has no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExampleRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// The data table of an `Examples` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamplesTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ExamplesTable {
    /// Read the table under an `Examples` node.
    ///
    /// Returns `None` when `examples` is not an `Examples` node or has no
    /// table. The first row is the header.
    #[must_use]
    pub fn from_node(tree: &SyntaxTree<'_>, examples: NodeId) -> Option<Self> {
        if tree.kind(examples)? != NodeKind::Examples {
            return None;
        }
        let table = tree.child_nodes(examples, NodeKind::Table).next()?;
        let mut rows = tree
            .child_nodes(table, NodeKind::TableRow)
            .map(|row| row_cells(tree, row));
        let header = rows.next()?;
        Some(Self {
            header,
            rows: rows.collect(),
        })
    }

    /// Parameter names from the header row.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has a header only.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows keyed by the header. Missing cells read as `""`; cells
    /// beyond the header are ignored.
    pub fn rows(&self) -> impl Iterator<Item = ExampleRow> + '_ {
        self.rows.iter().map(|cells| {
            self.header
                .iter()
                .enumerate()
                .map(|(column, name)| {
                    (
                        name.as_str(),
                        cells.get(column).map_or("", String::as_str),
                    )
                })
                .collect()
        })
    }
}

/// Cell values of a table row, including empty cells between adjacent
/// pipes.
fn row_cells(tree: &SyntaxTree<'_>, row: NodeId) -> Vec<String> {
    let mut cells = Vec::new();
    let mut seen_pipe = false;
    let mut current: Option<&str> = None;
    let tokens = tree
        .children(row)
        .iter()
        .filter_map(|child| child.as_token())
        .filter_map(|id| tree.token(id));
    for token in tokens {
        match token.kind {
            TokenKind::Pipe => {
                if seen_pipe {
                    cells.push(unescape_cell(current.take().unwrap_or_default()));
                }
                seen_pipe = true;
            }
            TokenKind::TableCell => current = Some(token.text),
            _ => {}
        }
    }
    if let Some(cell) = current {
        cells.push(unescape_cell(cell));
    }
    cells
}

/// Resolve `\|`, `\\` and `\n` escapes in a table cell.
fn unescape_cell(cell: &str) -> String {
    let mut out = String::with_capacity(cell.len());
    let mut chars = cell.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(escaped @ ('|' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn insert_replaces_in_place() {
        let mut row = ExampleRow::from_pairs([("a", "1"), ("b", "2")]);
        assert_eq!(row.insert("a", "3"), Some("1".to_owned()));
        let pairs: Vec<_> = row.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn empty_row_has_no_values() {
        let row = ExampleRow::new();
        assert!(row.is_empty());
        assert_eq!(row.get("x"), None);
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("a \\| b", "a | b")]
    #[case("back\\\\slash", "back\\slash")]
    #[case("two\\nlines", "two\nlines")]
    #[case("odd\\x", "odd\\x")]
    #[case("trailing\\", "trailing\\")]
    fn unescapes_cells(#[case] cell: &str, #[case] expected: &str) {
        assert_eq!(unescape_cell(cell), expected);
    }

    #[expect(clippy::expect_used, reason = "test fixtures are well formed")]
    #[test]
    fn reads_examples_with_empty_and_short_cells() {
        let source = "\
Feature: f
  Scenario Outline: o
    Given <a> and <b>
    Examples:
      | a | b |
      |   | 2 |
      | 3 |
      | x \\| y | z |
";
        let tree = SyntaxTree::parse(source);
        let outline = tree
            .descendants(tree.root())
            .find(|&id| tree.kind(id) == Some(NodeKind::ScenarioOutline))
            .expect("outline");
        let tables = tree.examples_tables(outline);
        let table = tables.first().expect("examples table");
        assert_eq!(table.header(), ["a", "b"]);
        assert_eq!(table.len(), 3);
        let rows: Vec<ExampleRow> = table.rows().collect();
        assert_eq!(rows, vec![
            ExampleRow::from_pairs([("a", ""), ("b", "2")]),
            ExampleRow::from_pairs([("a", "3"), ("b", "")]),
            ExampleRow::from_pairs([("a", "x | y"), ("b", "z")]),
        ]);
    }

    #[test]
    fn non_examples_nodes_have_no_table() {
        let tree = SyntaxTree::parse("Feature: f\n");
        assert_eq!(ExamplesTable::from_node(&tree, tree.root()), None);
    }
}
