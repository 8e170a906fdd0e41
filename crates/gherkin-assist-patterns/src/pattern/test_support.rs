//! Helpers asserting placeholder parser outcomes.
use super::placeholder::{PlaceholderSpec, parse_placeholder};
use crate::errors::PatternError;

pub(crate) fn parse_ok(pattern: &str) -> (usize, PlaceholderSpec) {
    parse_placeholder(pattern, 0).unwrap_or_else(|err| panic!("placeholder should parse: {err}"))
}

pub(crate) fn parse_err(pattern: &str) -> PatternError {
    match parse_placeholder(pattern, 0) {
        Ok(_) => panic!("placeholder parsing should fail for {pattern:?}"),
        Err(err) => err,
    }
}
