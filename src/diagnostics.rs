//! Fancy diagnostics support using `ariadne`.
//!
//! [`ParseError`] carries the byte range of the offending line, so a report can point right at it while ariadne handles the row/column calculations for display.
//!
//! # Usage Example
//!
//! ```rust
//! use sco_rs::{diagnostics::emit_parse_error, sco::parse_sco};
//!
//! let source = "#PLAYER0:Mika\n#SCORE0:lots\nE\n";
//! if let Err(err) = parse_sco(source) {
//!     emit_parse_error("High.sco", source, &err);
//! }
//! ```

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::sco::{ParseError, ParseErrorKind};

/// A highscore file's display name and decoded text, as the report needs them.
pub struct SimpleSource<'a> {
    name: &'a str,
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Pairs the display name with the text the error was found in.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// The text, which the byte ranges of [`ParseError`] point into.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// The name shown in the report header.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Builds an `ariadne` report out of an error with a position.
pub trait ToAriadne {
    /// Builds the report, labelled under `src`'s name.
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

impl ToAriadne for ParseError {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let filename = src.name().to_string();
        let mut builder = Report::build(ReportKind::Error, (filename.clone(), self.range.clone()))
            .with_message(format!("malformed highscore file at line {}", self.line))
            .with_label(
                Label::new((filename, self.range.clone()))
                    .with_message(self.kind.to_string())
                    .with_color(Color::Red),
            );
        if let Some(help) = help_for(&self.kind) {
            builder = builder.with_help(help);
        }
        builder.finish()
    }
}

fn help_for(kind: &ParseErrorKind) -> Option<&'static str> {
    match kind {
        ParseErrorKind::UnrecognizedLine(_) => {
            Some("lines must be `#PLAYERn:name`, `#SCOREn:score` or the terminator `E`")
        }
        ParseErrorKind::IndexOutOfRange { .. } | ParseErrorKind::InvalidIndex { .. } => {
            Some("player indices are 0 to 9")
        }
        ParseErrorKind::ScoreWithoutPlayer(_) | ParseErrorKind::UnpairedPlayer { .. } => {
            Some("each #PLAYERn must be followed by its #SCOREn")
        }
        _ => None,
    }
}

/// Builds the report for an error without printing it.
#[must_use]
pub fn collect_report<'a>(
    name: &'a str,
    source: &'a str,
    error: &ParseError,
) -> Report<'a, (String, std::ops::Range<usize>)> {
    error.to_report(&SimpleSource::new(name, source))
}

/// Prints the report of `error` to stderr.
///
/// `source` must be the whole text `error` came from, as returned by [`decode_sco`](crate::sco::decode_sco) for a file.
pub fn emit_parse_error(name: &str, source: &str, error: &ParseError) {
    let report = collect_report(name, source, error);
    let _ = report.eprint((name.to_string(), Source::from(source)));
}
