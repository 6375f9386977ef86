//! Definitions of the token in the highscore format.

use std::fmt;

use crate::sco::{
    Directive, ParseErrorKind,
    mixin::SourceLineMixin,
    model::PlayerIndex,
};

/// A token content of the highscore format. Each of them occupies a whole line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Token<'a> {
    /// `#PLAYER[0-9]:[name]`. The name is the rest of the line after the first colon, including any spaces.
    Player {
        /// The slot of the pair.
        index: PlayerIndex,
        /// The name, never empty.
        name: &'a str,
    },
    /// `#SCORE[0-9]:[u32]`. The score of the player in the same slot. It must come after `#PLAYER` of the slot.
    Score {
        /// The slot of the pair.
        index: PlayerIndex,
        /// The score.
        score: u32,
    },
    /// `E`. Ends the file, the following lines are ignored.
    End,
}

/// A token with its source line.
pub type TokenWithLine<'a> = SourceLineMixin<Token<'a>>;

impl<'a> Token<'a> {
    /// Analyzes a non-blank line (without its line break) into a token.
    pub(crate) fn parse(line: &'a str) -> Result<Self, ParseErrorKind> {
        if line.trim_end() == "E" {
            return Ok(Self::End);
        }
        let unrecognized = || ParseErrorKind::UnrecognizedLine(line.trim().to_owned());
        let command = line.strip_prefix('#').ok_or_else(unrecognized)?;
        let (directive, rest) = Directive::strip_keyword(command).ok_or_else(unrecognized)?;

        let digits_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (digits, rest) = rest.split_at(digits_len);
        if digits.is_empty() {
            let found = rest.split(':').next().unwrap_or_default();
            return Err(ParseErrorKind::InvalidIndex {
                directive,
                found: found.to_owned(),
            });
        }
        let value = rest
            .strip_prefix(':')
            .ok_or(ParseErrorKind::MissingColon(directive))?;
        // Too many digits for u32 is out of range anyway.
        let index = digits.parse::<u32>().unwrap_or(u32::MAX);
        let index = PlayerIndex::try_from(index)
            .map_err(|index| ParseErrorKind::IndexOutOfRange { directive, index })?;

        match directive {
            Directive::Player => {
                if value.is_empty() {
                    return Err(ParseErrorKind::EmptyValue(directive));
                }
                Ok(Self::Player { index, name: value })
            }
            Directive::Score => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(ParseErrorKind::EmptyValue(directive));
                }
                // Digits only, `u32::from_str` would also take a sign.
                let score = value
                    .bytes()
                    .all(|b| b.is_ascii_digit())
                    .then(|| value.parse::<u32>().ok())
                    .flatten()
                    .ok_or_else(|| ParseErrorKind::InvalidScore(value.to_owned()))?;
                Ok(Self::Score { index, score })
            }
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Player { index, name } => {
                write!(f, "{}{index}:{name}", Directive::Player)
            }
            Token::Score { index, score } => {
                write!(f, "{}{index}:{score}", Directive::Score)
            }
            Token::End => write!(f, "E"),
        }
    }
}
