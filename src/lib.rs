//! Highscore tables of karaoke songs, in the Ultrastar `High.sco` format.
//!
//! A song directory holds one `High.sco` file with up to 10 name/score pairs:
//!
//! ```text
//! #PLAYER0:Mika
//! #SCORE0:9120
//! #PLAYER1:Ren
//! #SCORE1:7400
//! E
//! ```
//!
//! - [`sco`] parses and writes the format, reporting the line of any violation.
//! - [`store`] provides [`SongHiscore`](store::SongHiscore), the ranked table bound to a song's file.
//! - [`diagnostics`] renders parse errors with `ariadne` (feature `diagnostics`).
//!
//! # Features
//!
//! - `diagnostics` (default): fancy error reports via `ariadne`.
//! - `serde`: `Serialize`/`Deserialize` for entries and errors.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "diagnostics")]
#[cfg_attr(docsrs, doc(cfg(feature = "diagnostics")))]
pub mod diagnostics;
pub mod prelude;
pub mod sco;
pub mod store;
