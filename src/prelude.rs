//! Prelude module for the crate.
//!
//! You can use `use sco_rs::prelude::*;` to import the common types at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, collect_report, emit_parse_error};

pub use crate::{
    sco::{
        Directive, ParseError, ParseErrorKind, decode_sco,
        lex::{
            TokenStream,
            token::{Token, TokenWithLine},
        },
        mixin::SourceLineMixin,
        model::{HiscoreEntry, MAX_ENTRIES, PlayerIndex, SCORE_MAX},
        parse::ParseOutput,
        parse_sco, parse_sco_bytes,
        unparse::unparse,
        unparse_sco,
    },
    store::{
        DEFAULT_FILE_NAME, HiscoreError, MIN_QUALIFYING_SCORE, QUALIFYING_RANK, SongHiscore,
    },
};
