//! Unparse highscore entries into tokens and the format text.

use std::fmt::Write;

use super::{
    lex::token::Token,
    model::{HiscoreEntry, PlayerIndex},
};

/// Converts entries into tokens in stored order: a `#PLAYERi`/`#SCOREi` pair per entry from slot 0, then `E`.
///
/// Entries beyond the 10 slots are not representable and dropped.
#[must_use]
pub fn unparse(entries: &[HiscoreEntry]) -> Vec<Token<'_>> {
    PlayerIndex::all()
        .zip(entries)
        .flat_map(|(index, entry)| {
            [
                Token::Player {
                    index,
                    name: &entry.name,
                },
                Token::Score {
                    index,
                    score: entry.score,
                },
            ]
        })
        .chain(std::iter::once(Token::End))
        .collect()
}

/// Converts entries into the format text, each line ends with `\n`.
#[must_use]
pub fn unparse_sco(entries: &[HiscoreEntry]) -> String {
    let mut out = String::new();
    for token in unparse(entries) {
        // Writing into a String never fails.
        let _ = writeln!(out, "{token}");
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sco::parse_sco;

    #[test]
    fn no_entries_is_only_terminator() {
        assert_eq!(unparse_sco(&[]), "E\n");
    }

    #[test]
    fn contiguous_slots_from_zero() {
        let entries = vec![
            HiscoreEntry::new("Mika", 9120),
            HiscoreEntry::new("#PLAYER5:Ren", 400),
        ];
        let text = unparse_sco(&entries);
        assert_eq!(
            text,
            "#PLAYER0:Mika\n#SCORE0:9120\n#PLAYER1:#PLAYER5:Ren\n#SCORE1:400\nE\n"
        );
        assert_eq!(parse_sco(&text).unwrap(), entries);
    }
}
