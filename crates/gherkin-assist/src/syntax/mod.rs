//! Lossless tokenization of Gherkin source.

mod keywords;
mod lexer;
mod token;

pub use lexer::{Tokenizer, tokenize};
pub use token::{KeywordKind, Token, TokenKind};
