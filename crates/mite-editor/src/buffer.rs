//! Text buffer — the ordered sequence of lines being edited.
//!
//! A `TextBuffer` is a `Vec<String>`, one owned string per line, with no
//! line terminators stored. It knows nothing about cursors or modes: callers
//! hand it coordinates and it either applies the edit or reports
//! [`Error::OutOfRange`].
//!
//! # Invariants
//!
//! - There is always at least one line (possibly empty).
//! - A position `(row, col)` is valid when `row < line_count()` and
//!   `col <= line_length(row)`. The column may equal the line length,
//!   denoting the slot after the last character.
//! - Columns are char offsets. Every char counts as one column; byte offsets
//!   never leak out of this module.
//!
//! # On-disk form
//!
//! [`serialize`](TextBuffer::serialize) joins lines with a single `\n` and
//! writes no trailing newline. [`from_text`](TextBuffer::from_text) is its
//! exact inverse, so a file ending in `\n` round-trips through a trailing
//! empty line.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::position::Position;

// ---------------------------------------------------------------------------
// TextBuffer
// ---------------------------------------------------------------------------

/// An editable, line-oriented text buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    // -- Construction -------------------------------------------------------

    /// Create a buffer holding a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Create a buffer by splitting `text` on `\n`.
    ///
    /// Empty text yields one empty line. A trailing `\n` yields a trailing
    /// empty line, so `from_text(s).serialize() == s` for every `s`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read or is not UTF-8.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self::from_text(&text))
    }

    // -- Accessors ----------------------------------------------------------

    /// Number of lines. Never zero.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The text of a line, or `None` if `row` is past the end.
    #[inline]
    #[must_use]
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Number of chars in a line. Rows past the end have length 0.
    #[must_use]
    pub fn line_length(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| line.chars().count())
    }

    /// All lines, in order.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Size of [`serialize`](Self::serialize)'s output in bytes, without
    /// building the string.
    #[must_use]
    pub fn len_bytes(&self) -> usize {
        let text: usize = self.lines.iter().map(String::len).sum();
        text + self.lines.len() - 1
    }

    /// True if `pos` satisfies the buffer invariant.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.lines.len() && pos.col <= self.line_length(pos.row)
    }

    /// Clamp a position to the nearest valid one: the row to the last line,
    /// then the column to that line's length.
    #[must_use]
    pub fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.lines.len() - 1);
        Position::new(row, pos.col.min(self.line_length(row)))
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `ch` at `pos`, shifting the rest of the line right.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos` is not a valid position.
    pub fn insert_char(&mut self, pos: Position, ch: char) -> Result<()> {
        let byte = self.byte_offset(pos)?;
        self.lines[pos.row].insert(byte, ch);
        Ok(())
    }

    /// Delete the character before `pos` (backspace) and return where the
    /// cursor lands.
    ///
    /// - `col > 0`: removes the char at `col - 1`; returns `(row, col - 1)`.
    /// - `col == 0`, `row > 0`: joins this line onto the end of the previous
    ///   one; returns `(row - 1, old length of previous line)`. This is the
    ///   only edit that shrinks the line count.
    /// - `(0, 0)`: no-op; returns `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos` is not a valid position.
    pub fn delete_char_before(&mut self, pos: Position) -> Result<Position> {
        if pos.col > 0 {
            let byte = self.byte_offset(Position::new(pos.row, pos.col - 1))?;
            if !self.contains(pos) {
                return Err(out_of_range(pos));
            }
            self.lines[pos.row].remove(byte);
            return Ok(Position::new(pos.row, pos.col - 1));
        }

        if pos.row >= self.lines.len() {
            return Err(out_of_range(pos));
        }
        if pos.row == 0 {
            return Ok(Position::ZERO);
        }

        let tail = self.lines.remove(pos.row);
        let prev = &mut self.lines[pos.row - 1];
        let join_col = prev.chars().count();
        prev.push_str(&tail);
        Ok(Position::new(pos.row - 1, join_col))
    }

    /// Split the line at `pos`: the line keeps `[0, col)` and a new line
    /// holding `[col, end)` is inserted below it. Returns `(row + 1, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos` is not a valid position.
    pub fn split_line(&mut self, pos: Position) -> Result<Position> {
        let byte = self.byte_offset(pos)?;
        let tail = self.lines[pos.row].split_off(byte);
        self.lines.insert(pos.row + 1, tail);
        Ok(Position::new(pos.row + 1, 0))
    }

    /// Append an empty line at the end of the buffer.
    pub fn push_line(&mut self) {
        self.lines.push(String::new());
    }

    // -- Search -------------------------------------------------------------

    /// Every row containing `query`, in ascending order.
    ///
    /// An empty query matches nothing rather than everything.
    #[must_use]
    pub fn find_all(&self, query: &str) -> Vec<usize> {
        if query.is_empty() {
            return Vec::new();
        }
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.contains(query))
            .map(|(row, _)| row)
            .collect()
    }

    /// Column of the first occurrence of `query` in `row`, if any.
    #[must_use]
    pub fn find_in_line(&self, row: usize, query: &str) -> Option<usize> {
        if query.is_empty() {
            return None;
        }
        let line = self.lines.get(row)?;
        line.find(query).map(|byte| line[..byte].chars().count())
    }

    // -- Persistence --------------------------------------------------------

    /// The exact on-disk representation: lines joined by `\n`, no trailing
    /// newline.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.lines.join("\n")
    }

    /// Write [`serialize`](Self::serialize)'s output to `path`, replacing any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the write fails. The buffer is untouched
    /// either way.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.serialize()).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    // -- Helpers ------------------------------------------------------------

    /// Byte offset of `pos` within its line, validating the position.
    fn byte_offset(&self, pos: Position) -> Result<usize> {
        let line = self.lines.get(pos.row).ok_or_else(|| out_of_range(pos))?;
        if pos.col == 0 {
            return Ok(0);
        }
        line.char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(line.len()))
            .nth(pos.col)
            .ok_or_else(|| out_of_range(pos))
    }
}

const fn out_of_range(pos: Position) -> Error {
    Error::OutOfRange {
        row: pos.row,
        col: pos.col,
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.line_count())
            .field("bytes", &self.len_bytes())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn lines(buf: &TextBuffer) -> Vec<&str> {
        buf.lines().iter().map(String::as_str).collect()
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_buffer_has_one_empty_line() {
        let buf = TextBuffer::new();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(0), Some(""));
        assert_eq!(buf.len_bytes(), 0);
    }

    #[test]
    fn from_text_splits_on_newline() {
        let buf = TextBuffer::from_text("hello\nworld");
        assert_eq!(lines(&buf), vec!["hello", "world"]);
    }

    #[test]
    fn from_text_trailing_newline_keeps_empty_line() {
        let buf = TextBuffer::from_text("a\n");
        assert_eq!(lines(&buf), vec!["a", ""]);
        assert_eq!(buf.serialize(), "a\n");
    }

    #[test]
    fn from_empty_text_is_new() {
        assert_eq!(TextBuffer::from_text(""), TextBuffer::new());
    }

    // -- Accessors ----------------------------------------------------------

    #[test]
    fn line_length_counts_chars() {
        let buf = TextBuffer::from_text("abc\ncafé");
        assert_eq!(buf.line_length(0), 3);
        assert_eq!(buf.line_length(1), 4);
        assert_eq!(buf.line_length(7), 0);
    }

    #[test]
    fn contains_allows_end_of_line() {
        let buf = TextBuffer::from_text("abc");
        assert!(buf.contains(Position::new(0, 3)));
        assert!(!buf.contains(Position::new(0, 4)));
        assert!(!buf.contains(Position::new(1, 0)));
    }

    #[test]
    fn clamp_pulls_row_then_col() {
        let buf = TextBuffer::from_text("long line\nab");
        assert_eq!(buf.clamp(Position::new(9, 9)), Position::new(1, 2));
        assert_eq!(buf.clamp(Position::new(0, 4)), Position::new(0, 4));
    }

    #[test]
    fn len_bytes_matches_serialize() {
        let buf = TextBuffer::from_text("one\ntwo\n\nthree");
        assert_eq!(buf.len_bytes(), buf.serialize().len());
    }

    // -- insert_char --------------------------------------------------------

    #[test]
    fn insert_char_middle() {
        let mut buf = TextBuffer::from_text("hllo");
        buf.insert_char(Position::new(0, 1), 'e').unwrap();
        assert_eq!(buf.line(0), Some("hello"));
    }

    #[test]
    fn insert_char_at_end() {
        let mut buf = TextBuffer::from_text("hell");
        buf.insert_char(Position::new(0, 4), 'o').unwrap();
        assert_eq!(buf.line(0), Some("hello"));
    }

    #[test]
    fn insert_char_after_multibyte() {
        let mut buf = TextBuffer::from_text("é");
        buf.insert_char(Position::new(0, 1), '!').unwrap();
        assert_eq!(buf.line(0), Some("é!"));
    }

    #[test]
    fn insert_char_out_of_range() {
        let mut buf = TextBuffer::from_text("ab");
        assert!(matches!(
            buf.insert_char(Position::new(0, 3), 'x'),
            Err(Error::OutOfRange { row: 0, col: 3 })
        ));
        assert!(matches!(
            buf.insert_char(Position::new(1, 0), 'x'),
            Err(Error::OutOfRange { row: 1, col: 0 })
        ));
        assert_eq!(buf.line(0), Some("ab"));
    }

    // -- delete_char_before -------------------------------------------------

    #[test]
    fn delete_before_within_line() {
        let mut buf = TextBuffer::from_text("hello");
        let pos = buf.delete_char_before(Position::new(0, 5)).unwrap();
        assert_eq!(pos, Position::new(0, 4));
        assert_eq!(buf.line(0), Some("hell"));
    }

    #[test]
    fn delete_before_joins_lines() {
        let mut buf = TextBuffer::from_text("foo\nbar\nbaz");
        let pos = buf.delete_char_before(Position::new(1, 0)).unwrap();
        assert_eq!(pos, Position::new(0, 3));
        assert_eq!(lines(&buf), vec!["foobar", "baz"]);
    }

    #[test]
    fn delete_before_at_origin_is_noop() {
        let mut buf = TextBuffer::from_text("abc");
        let pos = buf.delete_char_before(Position::ZERO).unwrap();
        assert_eq!(pos, Position::ZERO);
        assert_eq!(lines(&buf), vec!["abc"]);
    }

    #[test]
    fn delete_before_out_of_range() {
        let mut buf = TextBuffer::from_text("abc");
        assert!(buf.delete_char_before(Position::new(0, 9)).is_err());
        assert!(buf.delete_char_before(Position::new(4, 0)).is_err());
        assert_eq!(lines(&buf), vec!["abc"]);
    }

    // -- split_line ---------------------------------------------------------

    #[test]
    fn split_line_middle() {
        let mut buf = TextBuffer::from_text("helloworld");
        let pos = buf.split_line(Position::new(0, 5)).unwrap();
        assert_eq!(pos, Position::new(1, 0));
        assert_eq!(lines(&buf), vec!["hello", "world"]);
    }

    #[test]
    fn split_line_at_end_adds_empty_line() {
        let mut buf = TextBuffer::from_text("abc\nxyz");
        buf.split_line(Position::new(0, 3)).unwrap();
        assert_eq!(lines(&buf), vec!["abc", "", "xyz"]);
    }

    #[test]
    fn split_line_at_start_pushes_line_down() {
        let mut buf = TextBuffer::from_text("abc");
        buf.split_line(Position::ZERO).unwrap();
        assert_eq!(lines(&buf), vec!["", "abc"]);
    }

    #[test]
    fn split_line_out_of_range() {
        let mut buf = TextBuffer::from_text("abc");
        assert!(buf.split_line(Position::new(0, 4)).is_err());
        assert_eq!(buf.line_count(), 1);
    }

    // -- find ---------------------------------------------------------------

    #[test]
    fn find_all_returns_matching_rows() {
        let buf = TextBuffer::from_text("foo bar\nbaz\nbar bar\nqux");
        assert_eq!(buf.find_all("bar"), vec![0, 2]);
    }

    #[test]
    fn find_all_empty_query_matches_nothing() {
        let buf = TextBuffer::from_text("a\nb");
        assert!(buf.find_all("").is_empty());
    }

    #[test]
    fn find_all_absent_query() {
        let buf = TextBuffer::from_text("a\nb");
        assert!(buf.find_all("zzz").is_empty());
    }

    #[test]
    fn find_in_line_returns_char_column() {
        let buf = TextBuffer::from_text("añb needle");
        assert_eq!(buf.find_in_line(0, "needle"), Some(4));
        assert_eq!(buf.find_in_line(0, "hay"), None);
        assert_eq!(buf.find_in_line(3, "needle"), None);
    }

    // -- Persistence --------------------------------------------------------

    #[test]
    fn serialize_has_no_trailing_newline() {
        let buf = TextBuffer::from_text("hello\nworld");
        assert_eq!(buf.serialize(), "hello\nworld");
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let buf = TextBuffer::from_text("one\ntwo");
        buf.save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo");
        assert_eq!(TextBuffer::load(&path).unwrap(), buf);
    }

    #[test]
    fn save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old contents that are longer").unwrap();
        TextBuffer::from_text("new").save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = TextBuffer::new().save(&path).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextBuffer::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    // -- Properties ---------------------------------------------------------

    proptest! {
        #[test]
        fn insert_then_delete_before_restores_line(
            line in "[a-z ]{0,20}",
            ch in proptest::char::range('a', 'z'),
            frac in 0.0f64..=1.0,
        ) {
            let mut buf = TextBuffer::from_text(&line);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            let col = (frac * line.len() as f64) as usize;
            buf.insert_char(Position::new(0, col), ch).unwrap();
            let pos = buf.delete_char_before(Position::new(0, col + 1)).unwrap();
            prop_assert_eq!(pos, Position::new(0, col));
            prop_assert_eq!(buf.line(0), Some(line.as_str()));
        }

        #[test]
        fn split_then_join_restores_line(
            line in "[a-z ]{0,20}",
            frac in 0.0f64..=1.0,
        ) {
            let mut buf = TextBuffer::from_text(&line);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            let col = (frac * line.len() as f64) as usize;
            let below = buf.split_line(Position::new(0, col)).unwrap();
            let joined = buf.delete_char_before(below).unwrap();
            prop_assert_eq!(joined, Position::new(0, col));
            prop_assert_eq!(buf.line_count(), 1);
            prop_assert_eq!(buf.line(0), Some(line.as_str()));
        }

        #[test]
        fn serialize_round_trips(rows in proptest::collection::vec("[a-z ]{0,10}", 1..8)) {
            let buf = TextBuffer::from_text(&rows.join("\n"));
            let reloaded = TextBuffer::from_text(&buf.serialize());
            prop_assert_eq!(reloaded.lines(), rows.as_slice());
        }
    }
}
