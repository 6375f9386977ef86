//! Lexical analyzer of the highscore format.
//!
//! Raw [`str`] == [`TokenStream`] ==> [`TokenWithLine`]s == [`parse`](super::parse) ==> [`HiscoreEntry`](super::model::HiscoreEntry)s

mod cursor;
pub mod token;

use self::{
    cursor::Cursor,
    token::{Token, TokenWithLine},
};
use super::{ParseError, Result};

/// Lazy stream of tokens, one per non-blank line.
///
/// It yields the terminator [`Token::End`] or the first error as its last item, so the lines after them are never analyzed.
pub struct TokenStream<'a> {
    cursor: Cursor<'a>,
    finished: bool,
}

impl<'a> TokenStream<'a> {
    /// Starts analyzing the source text.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            finished: false,
        }
    }

    /// The number of the last line read, starts with 1. It is 0 before reading anything.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.cursor.line()
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<TokenWithLine<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        while let Some(line) = self.cursor.next_line() {
            let content: &'a str = *line.content();
            if content.trim().is_empty() {
                continue;
            }
            let item = match Token::parse(content) {
                Ok(token) => Ok(line.map(|_| token)),
                Err(kind) => Err(ParseError::new(kind, line.line(), line.range())),
            };
            self.finished = matches!(&item, Ok(token) if *token.content() == Token::End)
                || item.is_err();
            return Some(item);
        }
        self.finished = true;
        None
    }
}
