//! Semantic objects of the highscore format.

use std::{cmp::Reverse, fmt};

/// Number of numbered player slots in a highscore file, and so the capacity of a highscore table.
pub const MAX_ENTRIES: usize = 10;

/// Upper bound of a score produced by the game. Greater values are kept as is.
pub const SCORE_MAX: u32 = 10000;

/// A slot number of `#PLAYERn`/`#SCOREn`, which is in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct PlayerIndex(u8);

impl PlayerIndex {
    /// Returns the slot number as `usize`, for indexing the slot table.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Iterates over all the valid slots in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..MAX_ENTRIES as u8).map(Self)
    }
}

impl TryFrom<u32> for PlayerIndex {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (value as usize) < MAX_ENTRIES {
            Ok(Self(value as u8))
        } else {
            Err(value)
        }
    }
}

impl TryFrom<usize> for PlayerIndex {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < MAX_ENTRIES {
            Ok(Self(value as u8))
        } else {
            Err(value)
        }
    }
}

impl From<PlayerIndex> for u32 {
    fn from(value: PlayerIndex) -> Self {
        value.0 as u32
    }
}

impl fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single record of the highscore table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HiscoreEntry {
    /// Name entered by the player. Never empty for a stored entry.
    pub name: String,
    /// Score of the performance, conventionally in `0..=SCORE_MAX`.
    pub score: u32,
}

impl HiscoreEntry {
    /// Creates a new entry.
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

impl fmt::Display for HiscoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.score)
    }
}

/// Sorts entries by score in descending order and drops the ones beyond [`MAX_ENTRIES`].
///
/// The sort is stable, so entries with an equal score keep their relative order.
pub(crate) fn rank_entries(entries: &mut Vec<HiscoreEntry>) {
    entries.sort_by_key(|entry| Reverse(entry.score));
    entries.truncate(MAX_ENTRIES);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_index_bounds() {
        assert_eq!(PlayerIndex::try_from(0u32).map(u32::from), Ok(0));
        assert_eq!(PlayerIndex::try_from(9u32).map(u32::from), Ok(9));
        assert_eq!(PlayerIndex::try_from(10u32), Err(10));
        assert_eq!(PlayerIndex::try_from(usize::MAX), Err(usize::MAX));
        assert_eq!(PlayerIndex::all().count(), MAX_ENTRIES);
    }

    #[test]
    fn rank_is_stable_and_bounded() {
        let mut entries: Vec<_> = (0..12)
            .map(|i| HiscoreEntry::new(format!("p{i}"), if i % 2 == 0 { 600 } else { 700 }))
            .collect();
        rank_entries(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["p1", "p3", "p5", "p7", "p9", "p11", "p0", "p2", "p4", "p6"]
        );
    }

    #[test]
    fn entry_display() {
        assert_eq!(HiscoreEntry::new("Mika", 8120).to_string(), "Mika: 8120");
    }
}
