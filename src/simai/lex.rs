//! Lexical analyzer of the simai note body.
//!
//! The body is split on `,` into tokens with their source positions. Whitespace, control
//! characters and `||` comments are dropped before splitting, so a token is the compact text of
//! one beat. The token `E` ends the chart and everything after it is ignored.

mod cursor;
pub mod grammar;

use self::cursor::Cursor;
use super::{
    command::mixin::{SourcePosition, SourceRangeMixin},
    metadata::BodyLine,
};

/// The text of a beat with its source range. Empty for a beat without notes.
pub type TokenWithRange = SourceRangeMixin<String>;

/// Result of [`tokenize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct LexOutput {
    /// The beats in written order.
    pub tokens: Vec<TokenWithRange>,
    /// Whether the `E` terminator was found.
    pub terminated: bool,
}

/// Splits the note body into tokens.
///
/// An empty token after the last `,` is dropped, so `1,2,` has two tokens.
pub fn tokenize(lines: &[BodyLine<'_>]) -> LexOutput {
    let mut cursor = Cursor::new(lines);
    let mut tokens = vec![];
    let mut text = String::new();
    let mut start: Option<SourcePosition> = None;
    let mut end = 0;

    while let Some((position, ch)) = cursor.next_char() {
        if ch != ',' {
            start.get_or_insert(position);
            text.push(ch);
            end = position.index + ch.len_utf8();
            continue;
        }
        if text == "E" {
            return LexOutput {
                tokens,
                terminated: true,
            };
        }
        let (token_start, token_end) = match start.take() {
            Some(token_start) => (token_start, end),
            None => (position, position.index),
        };
        tokens.push(TokenWithRange::new(
            std::mem::take(&mut text),
            token_start,
            token_end,
        ));
    }

    if text == "E" {
        return LexOutput {
            tokens,
            terminated: true,
        };
    }
    if let Some(token_start) = start {
        tokens.push(TokenWithRange::new(text, token_start, end));
    }
    LexOutput {
        tokens,
        terminated: false,
    }
}
