//! Step keyword and step-definition pattern utilities for gherkin-assist.
//!
//! Step definitions are registered against patterns written either as raw
//! regular expressions (`^I have (\d+) items$`) or as brace expressions
//! (`I have {count:int} items`). This crate turns both forms into anchored
//! regular expressions, extracts argument values from matching step text and
//! ranks competing patterns by specificity.

mod capture;
mod errors;
mod hint;
mod keyword;
mod pattern;
mod specificity;

pub use capture::{StepArgument, extract_arguments, extract_captured_values};
pub use errors::{PatternError, PlaceholderErrorInfo};
pub use hint::get_type_pattern;
pub use keyword::{StepKeyword, StepKeywordParseError, UnsupportedStepType};
pub use pattern::{StepPattern, build_regex_from_pattern, compile_regex_from_pattern};
pub use specificity::SpecificityScore;
