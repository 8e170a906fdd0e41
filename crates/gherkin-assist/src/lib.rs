//! Editing core for Gherkin feature files.
//!
//! This crate holds the host-independent parts of editor support for
//! Gherkin: syntax trees that keep every byte of the source, text views of
//! steps, structure-aware line breaks, and resolution of steps against step
//! definitions.
//!
//! # Overview
//!
//! - [`syntax`] splits source text into tokens, whitespace and comments
//!   included.
//! - [`tree`] groups tokens into an arena-based tree and records
//!   [`tree::Degradation`]s instead of failing on malformed input.
//! - [`step`] reconstructs step text: raw, up to a caret, or with Scenario
//!   Outline placeholders substituted from an [`ExampleRow`].
//! - [`indent`] computes the indentation inserted on Enter.
//! - [`reference`] resolves steps through a
//!   [`reference::StepDefinitionCatalog`].
//!
//! The host editor is reached only through the traits in [`document`].
//!
//! # Configuration
//!
//! Indentation and logging are configured with [`config::AssistConfig`],
//! either from the host's settings or from `GHERKIN_ASSIST_*` environment
//! variables.
//!
//! # Example
//!
//! ```
//! use gherkin_assist::{ExampleRow, SyntaxTree};
//!
//! let source = "Feature: Basket\n  Scenario Outline: add\n    Given I have <count> items\n";
//! let tree = SyntaxTree::parse(source);
//! let step = tree.steps().next().expect("one step");
//! assert_eq!(step.text(false), "I have <count> items");
//!
//! let row = ExampleRow::from_pairs([("count", "5")]);
//! assert_eq!(step.text_for_example(&row), "I have 5 items");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod examples;
pub mod indent;
pub mod logging;
pub mod reference;
pub mod span;
pub mod step;
pub mod syntax;
pub mod tree;

pub use error::{AssistError, ParseError};
pub use examples::{ExampleRow, ExamplesTable};
pub use gherkin_assist_patterns::StepKeyword;
pub use indent::SmartLineBreak;
pub use span::TextSpan;
pub use step::{Step, StepParameter};
pub use tree::{SyntaxTree, parse_feature};
