//! Host collaborator traits for caret state and document edits.
//!
//! Editors implement [`TextControl`] and [`EditableDocument`] over their own
//! buffers. [`Caret`] and [`MemoryDocument`] are plain in-memory versions.

use std::ops::Range;

use crate::error::AssistError;

/// Read-only view of the caret and selection.
pub trait TextControl {
    /// Byte offset of the caret.
    fn caret_offset(&self) -> usize;

    /// The selected byte range; empty when nothing is selected.
    fn selection(&self) -> Range<usize>;
}

/// A document the core may read and insert into.
pub trait EditableDocument {
    /// Current contents.
    fn text(&self) -> &str;

    /// Whether edits are currently allowed.
    fn is_writable(&self) -> bool;

    /// Insert `text` at byte `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::WriteBlocked`] when the document is read-only
    /// and [`AssistError::OffsetOutOfRange`] when `offset` is past the end
    /// or not on a character boundary.
    fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), AssistError>;
}

/// Caret position with an optional selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caret {
    /// Byte offset of the caret.
    pub offset: usize,
    /// Selected byte range.
    pub selection: Range<usize>,
}

impl Caret {
    /// A caret at `offset` with nothing selected.
    #[must_use]
    pub fn at(offset: usize) -> Self {
        Self {
            offset,
            selection: offset..offset,
        }
    }

    /// A caret at the end of `selection`.
    #[must_use]
    pub fn selecting(selection: Range<usize>) -> Self {
        Self {
            offset: selection.end,
            selection,
        }
    }
}

impl TextControl for Caret {
    fn caret_offset(&self) -> usize {
        self.offset
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }
}

/// An owned text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    text: String,
    writable: bool,
}

impl MemoryDocument {
    /// A writable document holding `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            writable: true,
        }
    }

    /// A document that rejects every edit.
    #[must_use]
    pub fn read_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            writable: false,
        }
    }

    /// Toggle write access.
    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
    }

    /// Take the contents.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl EditableDocument for MemoryDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), AssistError> {
        if !self.writable {
            return Err(AssistError::WriteBlocked);
        }
        if !self.text.is_char_boundary(offset) {
            return Err(AssistError::OffsetOutOfRange {
                offset,
                len: self.text.len(),
            });
        }
        self.text.insert_str(offset, text);
        Ok(())
    }
}
