//! The parser module of the Ultrastar highscore (`High.sco`) format.
//!
//! This module consists of three phases: lexical analyzing, token parsing and unparsing.
//!
//! `lex` module provides the tokens of the format and a lazy translator from string into them. Every non-blank line is one token, and lexing stops at the terminator line `E`.
//!
//! `parse` module pairs `#PLAYERn` and `#SCOREn` tokens into [`HiscoreEntry`]s, rejecting anything which breaks the pairing.
//!
//! `unparse` module brings entries back into tokens and the format text.
//!
//! In detail, our policies are:
//!
//! - Text is UTF-8 and a leading byte order mark is skipped. Legacy files written in Windows-1252 are decoded by [`decode_sco`] before parsing.
//! - Any violation aborts the whole parse, reporting the 1-based line number of the first violating line.
//! - Content after the terminator line is never looked at.
//!
//! # Example
//!
//! ```
//! use sco_rs::sco::{parse_sco, unparse_sco};
//!
//! let source = "#PLAYER0:Mika\n#SCORE0:9120\n#PLAYER1:Ren\n#SCORE1:7400\nE\n";
//! let entries = parse_sco(source).unwrap();
//! assert_eq!(entries[0].name, "Mika");
//! assert_eq!(unparse_sco(&entries), source);
//! ```

pub mod lex;
pub mod mixin;
pub mod model;
pub mod parse;
pub mod unparse;

use std::{borrow::Cow, fmt, ops::Range};

use encoding_rs::WINDOWS_1252;

use thiserror::Error;

use self::{
    lex::TokenStream,
    model::{HiscoreEntry, PlayerIndex},
    parse::ParseOutput,
};

pub use self::unparse::unparse_sco;

/// A directive keyword which is followed by a player index, a colon and a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Directive {
    /// `#PLAYERn:name`
    Player,
    /// `#SCOREn:score`
    Score,
}

impl Directive {
    /// The keyword between `#` and the index, in uppercase.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Player => "PLAYER",
            Self::Score => "SCORE",
        }
    }

    /// Strips a directive keyword (ASCII case insensitive) from the start of `command`.
    pub(crate) fn strip_keyword(command: &str) -> Option<(Self, &str)> {
        [Self::Player, Self::Score].into_iter().find_map(|directive| {
            let keyword = directive.keyword();
            let head = command.get(..keyword.len())?;
            if !head.eq_ignore_ascii_case(keyword) {
                return None;
            }
            Some((directive, command.get(keyword.len()..)?))
        })
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.keyword())
    }
}

/// What went wrong on a line of the highscore file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    /// A non-blank line which is neither a directive nor the terminator.
    #[error("unrecognized line `{0}`")]
    UnrecognizedLine(String),
    /// The directive has no colon after its index.
    #[error("expected `:` after the index of {0}")]
    MissingColon(Directive),
    /// The directive is not followed by a decimal index.
    #[error("expected a player index after {directive}, but found `{found}`")]
    InvalidIndex {
        /// The directive found.
        directive: Directive,
        /// What was there instead of the index.
        found: String,
    },
    /// The index is not in `0..=9`.
    #[error("player index {index} of {directive} is out of range 0..=9")]
    IndexOutOfRange {
        /// The directive found.
        directive: Directive,
        /// The index, saturated to `u32::MAX`.
        index: u32,
    },
    /// Nothing after the colon.
    #[error("{0} has no value")]
    EmptyValue(Directive),
    /// The score is not a non-negative integer.
    #[error("expected a non-negative integer score, but found `{0}`")]
    InvalidScore(String),
    /// `#SCOREn` appeared before `#PLAYERn`.
    #[error("#SCORE{0} appeared without a preceding #PLAYER{0}")]
    ScoreWithoutPlayer(PlayerIndex),
    /// `#PLAYERn` appeared twice.
    #[error("#PLAYER{0} appeared twice")]
    DuplicatePlayer(PlayerIndex),
    /// `#SCOREn` appeared twice.
    #[error("#SCORE{0} appeared twice")]
    DuplicateScore(PlayerIndex),
    /// `#PLAYERn` never got its `#SCOREn`.
    #[error("#PLAYER{index} at line {player_line} has no #SCORE{index}")]
    UnpairedPlayer {
        /// The slot left incomplete.
        index: PlayerIndex,
        /// The line of the `#PLAYERn` directive.
        player_line: usize,
    },
    /// The file is not valid UTF-8.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
}

/// An error occurred when parsing the highscore file. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// The line number, starts with 1.
    pub line: usize,
    /// The byte range of the line in the source, without its line break.
    pub range: Range<usize>,
}

impl ParseError {
    /// Creates a new error at the line.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, line: usize, range: Range<usize>) -> Self {
        Self { kind, line, range }
    }
}

/// type alias of `core::result::Result<T, ParseError>`
pub type Result<T> = core::result::Result<T, ParseError>;

/// Parses the highscore format text into entries, ranked by score in descending order.
///
/// # Errors
///
/// Returns the first violation found in the lines before the terminator.
pub fn parse_sco(source: &str) -> Result<Vec<HiscoreEntry>> {
    ParseOutput::from_token_stream(TokenStream::new(source)).map(|output| output.entries)
}

/// Decodes the raw bytes of a highscore file into text.
///
/// UTF-8 is borrowed as is. Anything else is taken as a legacy file in Windows-1252, which maps every byte to a character, so this never fails. A UTF-8 byte order mark found on that path switches the decoder back to UTF-8 with replacement characters.
#[must_use]
pub fn decode_sco(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(source) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(source);
    }
    let (source, encoding, _) = WINDOWS_1252.decode(bytes);
    log::warn!("highscore source is not UTF-8, decoded as {}", encoding.name());
    source
}

/// Parses the raw bytes of a highscore file, accepting UTF-8 only.
///
/// Bytes which are not UTF-8 are an error unless they come after the terminator line. Use [`decode_sco`] and [`parse_sco`] to accept legacy encodings instead.
///
/// # Errors
///
/// Returns any error of [`parse_sco`] found in the lines before the first invalid byte, or else [`ParseErrorKind::InvalidUtf8`] at the line of that byte.
pub fn parse_sco_bytes(bytes: &[u8]) -> Result<Vec<HiscoreEntry>> {
    let err = match std::str::from_utf8(bytes) {
        Ok(source) => return parse_sco(source),
        Err(err) => err,
    };
    let valid = bytes.get(..err.valid_up_to()).unwrap_or_default();
    let line_start = valid
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;

    // Lines before the broken one are valid UTF-8, and may already terminate the file.
    let complete_lines = std::str::from_utf8(valid.get(..line_start).unwrap_or_default())
        .unwrap_or_default();
    let output = ParseOutput::from_truncated_token_stream(TokenStream::new(complete_lines))?;
    if output.terminated {
        return Ok(output.entries);
    }
    let line_end = bytes
        .iter()
        .skip(line_start)
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |i| line_start + i);
    Err(ParseError::new(
        ParseErrorKind::InvalidUtf8,
        line,
        line_start..line_end,
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn keyword_is_case_insensitive() {
        assert_eq!(
            Directive::strip_keyword("player3:x"),
            Some((Directive::Player, "3:x"))
        );
        assert_eq!(
            Directive::strip_keyword("SCORE0:1"),
            Some((Directive::Score, "0:1"))
        );
        assert_eq!(Directive::strip_keyword("TITLE:x"), None);
        assert_eq!(Directive::strip_keyword("SCO"), None);
    }

    #[test]
    fn error_display_has_line() {
        let err = ParseError::new(ParseErrorKind::InvalidScore("abc".into()), 2, 13..24);
        assert_eq!(
            err.to_string(),
            "line 2: expected a non-negative integer score, but found `abc`"
        );
    }

    #[test]
    fn invalid_utf8_reports_its_line() {
        let mut bytes = b"#PLAYER0:Mika\n#SCORE0:9000\n#PLAYER1:".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"\n#SCORE1:10\nE\n");
        let err = parse_sco_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidUtf8);
        assert_eq!(err.line, 3);
        assert_eq!(err.range, 27..38);
    }

    #[test]
    fn invalid_utf8_after_terminator_is_ignored() {
        let mut bytes = b"#PLAYER0:Mika\n#SCORE0:9000\nE\n".to_vec();
        bytes.extend_from_slice(&[0xc3, 0x28]);
        let entries = parse_sco_bytes(&bytes).unwrap();
        assert_eq!(entries, vec![HiscoreEntry::new("Mika", 9000)]);
    }

    #[test]
    fn invalid_utf8_wins_over_pair_cut_off_before_it() {
        let bytes = b"#PLAYER0:A\n#PLAYER1:Jos\xe9\n#SCORE0:900\n#SCORE1:800\nE\n";
        let err = parse_sco_bytes(bytes).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidUtf8);
        assert_eq!(err.line, 2);
        assert_eq!(err.range, 11..24);
    }

    #[test]
    fn violation_before_invalid_utf8_still_wins() {
        let bytes = b"#PLAYER0:A\n#SCORE0:abc\n#PLAYER1:Jos\xe9\n";
        let err = parse_sco_bytes(bytes).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidScore("abc".into()));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn unpaired_player_before_terminator_and_invalid_utf8() {
        let bytes = b"#PLAYER0:A\nE\n\xff\n";
        let err = parse_sco_bytes(bytes).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnpairedPlayer {
                index: PlayerIndex::try_from(0u32).unwrap(),
                player_line: 1
            }
        );
        assert_eq!(err.line, 2);
    }

    #[test]
    fn legacy_encoding_is_decoded() {
        let bytes = b"#PLAYER0:Jos\xe9\r\n#SCORE0:8200\r\n#PLAYER1:M\xfcller\r\n#SCORE1:700\r\nE\r\n";
        let source = decode_sco(bytes);
        assert!(matches!(source, Cow::Owned(_)));
        assert_eq!(
            parse_sco(&source).unwrap(),
            vec![
                HiscoreEntry::new("José", 8200),
                HiscoreEntry::new("Müller", 700)
            ]
        );
    }

    #[test]
    fn utf8_is_borrowed() {
        let bytes = "\u{feff}#PLAYER0:José\n#SCORE0:8200\nE\n".as_bytes();
        let source = decode_sco(bytes);
        assert!(matches!(source, Cow::Borrowed(_)));
        assert_eq!(parse_sco(&source).unwrap(), vec![HiscoreEntry::new("José", 8200)]);
    }
}
