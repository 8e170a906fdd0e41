//! Error types for the editing core.
//!
//! Malformed Gherkin is never an error: the tree builder records
//! [`Degradation`](crate::tree::Degradation)s and keeps going. The variants
//! here cover the few conditions callers must react to.

use thiserror::Error;

/// Errors returned by editing operations.
#[derive(Debug, Error)]
pub enum AssistError {
    /// The host document refused modification.
    #[error("document is not writable")]
    WriteBlocked,

    /// An offset lies beyond the end of the document.
    #[error("offset {offset} is outside the document (length {len})")]
    OffsetOutOfRange {
        /// The rejected offset.
        offset: usize,
        /// Length of the document in bytes.
        len: usize,
    },

    /// A configuration value could not be understood.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The source could not be interpreted as a feature file.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failure to locate the structure a caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source contains no `Feature` keyword.
    #[error("no Feature keyword found")]
    MissingFeature,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_blocked_displays_message() {
        assert_eq!(
            AssistError::WriteBlocked.to_string(),
            "document is not writable"
        );
    }

    #[test]
    fn offset_out_of_range_reports_bounds() {
        let error = AssistError::OffsetOutOfRange { offset: 12, len: 4 };
        assert_eq!(
            error.to_string(),
            "offset 12 is outside the document (length 4)"
        );
    }

    #[test]
    fn parse_errors_convert_transparently() {
        let error: AssistError = ParseError::MissingFeature.into();
        assert_eq!(error.to_string(), "no Feature keyword found");
    }
}
