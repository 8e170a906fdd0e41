//! Lexer splitting brace-expression patterns into literals and placeholders.
//!
//! Cucumber optional text `(s)` and alternation `apple/pear` are lexed as
//! their own tokens; `\(` and `\/` keep the characters literal.

use crate::errors::PatternError;

use super::placeholder::{PlaceholderSpec, parse_placeholder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Placeholder {
        start: usize,
        name: String,
        hint: Option<String>,
    },
    /// Text that may be absent, written `(text)`.
    Optional(String),
    /// Words of which exactly one must appear, written `a/b/c`.
    Alternation(Vec<String>),
    OpenBrace {
        index: usize,
    },
    CloseBrace {
        index: usize,
    },
}

fn flush(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

fn starts_placeholder(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('{')
        && chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '}')
}

/// Read `(text)` at the start of `rest`, returning the text and the bytes
/// consumed. `None` when the parenthesis is never closed.
fn optional_text(rest: &str) -> Option<(String, usize)> {
    let mut text = String::new();
    let mut chars = rest.char_indices().skip(1);
    while let Some((index, ch)) = chars.next() {
        match ch {
            ')' => return Some((text, index + 1)),
            '\\' => text.push(chars.next().map_or('\\', |(_, escaped)| escaped)),
            '(' | '{' | '}' => return None,
            other => text.push(other),
        }
    }
    None
}

/// Read the alternatives following the first `/`, returning them and the
/// bytes consumed. Alternatives end at whitespace, a brace or a parenthesis.
fn alternatives(rest: &str) -> (Vec<String>, usize) {
    let mut found = vec![String::new()];
    let mut consumed = rest.len();
    let mut chars = rest.char_indices().skip(1);
    while let Some((index, ch)) = chars.next() {
        match ch {
            '/' => found.push(String::new()),
            '\\' => {
                if let (Some(current), Some((_, escaped))) = (found.last_mut(), chars.next()) {
                    current.push(escaped);
                }
            }
            c if c.is_whitespace() || matches!(c, '{' | '}' | '(' | ')') => {
                consumed = index;
                break;
            }
            other => {
                if let Some(current) = found.last_mut() {
                    current.push(other);
                }
            }
        }
    }
    (found, consumed)
}

/// Split the word the alternation starts with off the end of `literal`.
fn take_last_word(literal: &mut String) -> String {
    let start = literal
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(0, |(index, ch)| index + ch.len_utf8());
    literal.split_off(start)
}

pub(crate) fn lex_pattern(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while let Some(rest) = pattern.get(pos..) {
        let Some(ch) = rest.chars().next() else {
            break;
        };
        match ch {
            '\\' => {
                let escaped = rest.chars().nth(1);
                literal.push(escaped.unwrap_or('\\'));
                pos += 1 + escaped.map_or(0, char::len_utf8);
            }
            '{' if rest.starts_with("{{") => {
                literal.push('{');
                pos += 2;
            }
            '}' if rest.starts_with("}}") => {
                literal.push('}');
                pos += 2;
            }
            '{' if starts_placeholder(rest) => {
                flush(&mut literal, &mut tokens);
                let (next, PlaceholderSpec { start, name, hint, .. }) =
                    parse_placeholder(pattern, pos)?;
                tokens.push(Token::Placeholder { start, name, hint });
                pos = next;
            }
            '{' => {
                flush(&mut literal, &mut tokens);
                tokens.push(Token::OpenBrace { index: pos });
                pos += 1;
            }
            '}' => {
                flush(&mut literal, &mut tokens);
                tokens.push(Token::CloseBrace { index: pos });
                pos += 1;
            }
            '(' => {
                if let Some((text, consumed)) = optional_text(rest) {
                    flush(&mut literal, &mut tokens);
                    tokens.push(Token::Optional(text));
                    pos += consumed;
                } else {
                    literal.push('(');
                    pos += 1;
                }
            }
            '/' => {
                let first = take_last_word(&mut literal);
                if first.is_empty() {
                    literal.push('/');
                    pos += 1;
                    continue;
                }
                flush(&mut literal, &mut tokens);
                let (rest_alternatives, consumed) = alternatives(rest);
                let mut words = vec![first];
                words.extend(rest_alternatives);
                tokens.push(Token::Alternation(words));
                pos += consumed;
            }
            other => {
                literal.push(other);
                pos += other.len_utf8();
            }
        }
    }

    flush(&mut literal, &mut tokens);
    Ok(tokens)
}
