use crate::sco::mixin::SourceLineMixin;

const BYTE_ORDER_MARK: &str = "\u{feff}";

/// Walks the source text line by line.
pub struct Cursor<'a> {
    /// The number of the last line returned, starts with 1. It is 0 before the first line.
    line: usize,
    /// The byte index of the next line.
    index: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    pub const fn new(source: &'a str) -> Self {
        // U+FEFF encoded in UTF-8
        let index = if matches!(source.as_bytes(), [0xef, 0xbb, 0xbf, ..]) {
            BYTE_ORDER_MARK.len()
        } else {
            0
        };
        Self {
            line: 0,
            index,
            source,
        }
    }

    pub const fn is_end(&self) -> bool {
        self.index >= self.source.len()
    }

    pub const fn line(&self) -> usize {
        self.line
    }

    /// Move cursor, through and return the next line without its line break (`\n` or `\r\n`).
    pub fn next_line(&mut self) -> Option<SourceLineMixin<&'a str>> {
        if self.is_end() {
            return None;
        }
        let start = self.index;
        let rest = self.source.get(start..)?;
        let (line_len, consumed) = rest
            .find('\n')
            .map_or((rest.len(), rest.len()), |i| (i, i + 1));
        let raw = rest.get(..line_len)?;
        let content = raw.strip_suffix('\r').unwrap_or(raw);

        self.index += consumed;
        self.line += 1;
        Some(SourceLineMixin::new(
            content,
            self.line,
            start..start + content.len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_with_mixed_breaks() {
        let mut cursor = Cursor::new("a\r\n\nbc");
        let first = cursor.next_line().unwrap();
        assert_eq!((*first.content(), first.line(), first.range()), ("a", 1, 0..1));
        let second = cursor.next_line().unwrap();
        assert_eq!((*second.content(), second.line(), second.range()), ("", 2, 3..3));
        let third = cursor.next_line().unwrap();
        assert_eq!((*third.content(), third.line(), third.range()), ("bc", 3, 4..6));
        assert!(cursor.is_end());
        assert!(cursor.next_line().is_none());
        assert_eq!(cursor.line(), 3);
    }

    #[test]
    fn skips_byte_order_mark() {
        let mut cursor = Cursor::new("\u{feff}E\n");
        let line = cursor.next_line().unwrap();
        assert_eq!((*line.content(), line.line(), line.range()), ("E", 1, 3..4));
        assert!(cursor.next_line().is_none());
    }

    #[test]
    fn empty_source_has_no_lines() {
        assert!(Cursor::new("").next_line().is_none());
    }
}
