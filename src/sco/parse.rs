//! Pairs `#PLAYERn` and `#SCOREn` tokens into highscore entries.

use std::{collections::BTreeMap, ops::Range};

use super::{
    ParseError, ParseErrorKind, Result,
    lex::token::{Token, TokenWithLine},
    model::{HiscoreEntry, PlayerIndex, rank_entries},
};

/// Parsing result of a highscore file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseOutput {
    /// The entries, ranked by score in descending order.
    pub entries: Vec<HiscoreEntry>,
    /// Whether the terminator line `E` was found.
    pub terminated: bool,
}

#[derive(Debug, Default)]
struct Slot<'a> {
    /// The name and its line number.
    player: Option<(&'a str, usize)>,
    score: Option<u32>,
}

impl ParseOutput {
    /// Consumes tokens until the terminator, building the entries.
    ///
    /// # Errors
    ///
    /// Returns the first error from `tokens`, or the first slot violation in the order of lines.
    pub fn from_token_stream<'a>(
        tokens: impl IntoIterator<Item = Result<TokenWithLine<'a>>>,
    ) -> Result<Self> {
        Self::pair_tokens(tokens, false)
    }

    /// Like [`ParseOutput::from_token_stream`], but for a source cut off in the middle.
    ///
    /// Unless the terminator was reached, a `#PLAYERn` still waiting for its `#SCOREn` is left out instead of rejected, since the score may be in the part cut off.
    pub(crate) fn from_truncated_token_stream<'a>(
        tokens: impl IntoIterator<Item = Result<TokenWithLine<'a>>>,
    ) -> Result<Self> {
        Self::pair_tokens(tokens, true)
    }

    fn pair_tokens<'a>(
        tokens: impl IntoIterator<Item = Result<TokenWithLine<'a>>>,
        truncated: bool,
    ) -> Result<Self> {
        let mut slots: BTreeMap<PlayerIndex, Slot<'a>> = BTreeMap::new();
        let mut terminated = false;
        // Where an incomplete pair is reported: the terminator, or the last line at end of input.
        let mut last: Option<(usize, Range<usize>)> = None;

        for token in tokens {
            let token = token?;
            let (line, range) = (token.line(), token.range());
            let error = |kind| ParseError::new(kind, line, range.clone());
            match *token.content() {
                Token::Player { index, name } => {
                    let slot = slots.entry(index).or_default();
                    if slot.player.is_some() {
                        return Err(error(ParseErrorKind::DuplicatePlayer(index)));
                    }
                    slot.player = Some((name, line));
                }
                Token::Score { index, score } => {
                    let slot = slots.entry(index).or_default();
                    if slot.player.is_none() {
                        return Err(error(ParseErrorKind::ScoreWithoutPlayer(index)));
                    }
                    if slot.score.is_some() {
                        return Err(error(ParseErrorKind::DuplicateScore(index)));
                    }
                    slot.score = Some(score);
                }
                Token::End => terminated = true,
            }
            last = Some((line, range));
            if terminated {
                break;
            }
        }
        let cut_off = truncated && !terminated;
        if !terminated && !truncated {
            log::warn!("highscore source ended without the terminator line `E`");
        }

        let mut entries = Vec::with_capacity(slots.len());
        for (index, slot) in slots {
            match slot {
                Slot {
                    player: Some((name, _)),
                    score: Some(score),
                } => entries.push(HiscoreEntry::new(name, score)),
                Slot {
                    player: Some(_),
                    score: None,
                } if cut_off => {}
                Slot {
                    player: Some((_, player_line)),
                    score: None,
                } => {
                    let (line, range) = last.unwrap_or((player_line, 0..0));
                    return Err(ParseError::new(
                        ParseErrorKind::UnpairedPlayer { index, player_line },
                        line,
                        range,
                    ));
                }
                // A score without its player is rejected on the spot.
                Slot { player: None, .. } => {}
            }
        }
        rank_entries(&mut entries);
        Ok(Self {
            entries,
            terminated,
        })
    }
}
