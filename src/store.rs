//! The highscore table of a song, bound to its file on disk.
//!
//! # Example
//!
//! ```no_run
//! use sco_rs::store::SongHiscore;
//!
//! # fn main() -> Result<(), sco_rs::store::HiscoreError> {
//! let mut hiscore = SongHiscore::in_song_dir("songs/My Song");
//! hiscore.load()?;
//! if hiscore.reached_new_hiscore(8200) && hiscore.is_writable() {
//!     hiscore.add_new_hiscore("Mika", 8200);
//!     hiscore.save()?;
//! }
//! # Ok(())
//! # }
//! ```

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::Builder;
use thiserror::Error;

use crate::sco::{
    ParseError, decode_sco,
    model::{HiscoreEntry, MAX_ENTRIES, rank_entries},
    parse_sco, unparse_sco,
};

/// The conventional file name of a song's highscore table.
pub const DEFAULT_FILE_NAME: &str = "High.sco";

/// Scores below this never qualify for the table.
pub const MIN_QUALIFYING_SCORE: u32 = 500;

/// The 0-based rank a new score has to beat to qualify.
pub const QUALIFYING_RANK: usize = 2;

/// An error occurred when loading or saving the highscore table.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HiscoreError {
    /// The file exists but could not be read.
    #[error("failed to read `{}`", path.display())]
    Read {
        /// The highscore file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The file content is malformed.
    #[error("malformed highscore file `{}`: {source}", path.display())]
    Parse {
        /// The highscore file.
        path: PathBuf,
        /// Where and what.
        #[source]
        source: ParseError,
    },
    /// The location does not accept writes.
    #[error("`{}` is not writable", path.display())]
    NotWritable {
        /// The highscore file.
        path: PathBuf,
    },
    /// Writing the file failed.
    #[error("failed to write `{}`", path.display())]
    Write {
        /// The highscore file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl HiscoreError {
    /// The 1-based line number of the violation, if this is a parse error.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { source, .. } => Some(source.line),
            _ => None,
        }
    }
}

/// Ranked highscore table of a single song.
///
/// It holds at most [`MAX_ENTRIES`] entries sorted by score in descending order. Nothing is saved implicitly, call [`SongHiscore::save`] to persist changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongHiscore {
    path: PathBuf,
    file_path: PathBuf,
    entries: Vec<HiscoreEntry>,
}

impl SongHiscore {
    /// Binds an empty table to the file `filename` in the directory `path`. No I/O happens.
    pub fn new(path: impl Into<PathBuf>, filename: impl AsRef<Path>) -> Self {
        let path = path.into();
        let file_path = path.join(filename);
        Self {
            path,
            file_path,
            entries: Vec::with_capacity(MAX_ENTRIES),
        }
    }

    /// Binds an empty table to [`DEFAULT_FILE_NAME`] in the song directory.
    pub fn in_song_dir(path: impl Into<PathBuf>) -> Self {
        Self::new(path, DEFAULT_FILE_NAME)
    }

    /// The directory holding the file.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.path
    }

    /// The highscore file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// The entries, best first.
    #[must_use]
    pub fn entries(&self) -> &[HiscoreEntry] {
        &self.entries
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The best score, if any.
    #[must_use]
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|entry| entry.score)
    }

    /// Replaces the entries with the content of the file.
    ///
    /// A missing file is not an error, it leaves the table empty.
    ///
    /// # Errors
    ///
    /// [`HiscoreError::Read`] if the file cannot be read, or [`HiscoreError::Parse`] with the line number of the first violation. On error the entries are left as they were.
    ///
    /// A file which is not UTF-8 is read as Windows-1252, see [`decode_sco`].
    pub fn load(&mut self) -> Result<(), HiscoreError> {
        let bytes = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no highscore file at {}", self.file_path.display());
                self.entries.clear();
                return Ok(());
            }
            Err(source) => {
                return Err(HiscoreError::Read {
                    path: self.file_path.clone(),
                    source,
                });
            }
        };
        let source = decode_sco(&bytes);
        let mut entries = parse_sco(&source).map_err(|source| HiscoreError::Parse {
            path: self.file_path.clone(),
            source,
        })?;
        rank_entries(&mut entries);
        log::debug!(
            "loaded {} highscore entries from {}",
            entries.len(),
            self.file_path.display()
        );
        self.entries = entries;
        Ok(())
    }

    /// Writes the entries to the file, replacing it atomically.
    ///
    /// A replaced file keeps its permissions. A new file gets the permissions of a newly created file, subject to the umask.
    ///
    /// # Errors
    ///
    /// [`HiscoreError::NotWritable`] if [`SongHiscore::is_writable`] fails, or [`HiscoreError::Write`] if writing fails. The file is untouched on error.
    pub fn save(&self) -> Result<(), HiscoreError> {
        if !self.is_writable() {
            return Err(HiscoreError::NotWritable {
                path: self.file_path.clone(),
            });
        }
        let write_error = |source| HiscoreError::Write {
            path: self.file_path.clone(),
            source,
        };
        #[cfg_attr(not(unix), allow(unused_mut))]
        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut file = builder.tempfile_in(&self.path).map_err(write_error)?;
        file.write_all(unparse_sco(&self.entries).as_bytes())
            .map_err(write_error)?;
        match fs::metadata(&self.file_path) {
            Ok(meta) => file
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(write_error)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(write_error(err)),
        }
        file.as_file().sync_all().map_err(write_error)?;
        file.persist(&self.file_path)
            .map_err(|err| write_error(err.error))?;
        log::debug!(
            "saved {} highscore entries to {}",
            self.entries.len(),
            self.file_path.display()
        );
        Ok(())
    }

    /// Checks whether [`SongHiscore::save`] could write to the location.
    ///
    /// The directory must accept a new file, which is tried with an anonymous temporary file that is gone right away. An existing file must be a regular file that opens for writing. Neither the directory listing nor the file content is changed.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        if !fs::metadata(&self.path).is_ok_and(|meta| meta.is_dir()) {
            return false;
        }
        if let Err(err) = tempfile::tempfile_in(&self.path) {
            log::debug!("cannot create files in {}: {err}", self.path.display());
            return false;
        }
        match fs::metadata(&self.file_path) {
            Ok(meta) if meta.is_file() => OpenOptions::new()
                .write(true)
                .open(&self.file_path)
                .is_ok(),
            Ok(_) => false,
            Err(err) => err.kind() == io::ErrorKind::NotFound,
        }
    }

    /// Writes a human readable listing of the entries.
    ///
    /// # Errors
    ///
    /// Any error from `sink`.
    pub fn get_info(&self, sink: &mut impl Write) -> io::Result<()> {
        writeln!(sink, "Highscores in {}", self.file_path.display())?;
        if self.entries.is_empty() {
            return writeln!(sink, "  (no entries)");
        }
        for (rank, entry) in self.entries.iter().enumerate() {
            writeln!(sink, "{:>2}. {:>5} {}", rank + 1, entry.score, entry.name)?;
        }
        Ok(())
    }

    /// Checks whether the score is worth asking the player for a name.
    ///
    /// Scores below [`MIN_QUALIFYING_SCORE`] never qualify. Otherwise the score must be greater than the one at rank [`QUALIFYING_RANK`] (the 3rd place), where a missing entry counts as 0.
    #[must_use]
    pub fn reached_new_hiscore(&self, score: u32) -> bool {
        if score < MIN_QUALIFYING_SCORE {
            return false;
        }
        let to_beat = self
            .entries
            .get(QUALIFYING_RANK)
            .map_or(0, |entry| entry.score);
        score > to_beat
    }

    /// Records a new entry, keeping the table ranked and bounded.
    ///
    /// Does nothing on an empty name. Line breaks in the name are replaced with spaces. An entry tying with existing ones is placed after them.
    ///
    /// Returns the 0-based rank of the new entry, or `None` if it was not recorded.
    pub fn add_new_hiscore(&mut self, name: impl Into<String>, score: u32) -> Option<usize> {
        let mut name: String = name.into();
        if name.is_empty() {
            return None;
        }
        if name.contains(['\r', '\n']) {
            name = name.replace(['\r', '\n'], " ");
        }
        // Every present entry ranks before the new one on a tie.
        let rank = self
            .entries
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(self.entries.len());
        if rank >= MAX_ENTRIES {
            return None;
        }
        log::info!("new highscore {score} by {name} at rank {}", rank + 1);
        self.entries.insert(rank, HiscoreEntry::new(name, score));
        rank_entries(&mut self.entries);
        Some(rank)
    }
}
