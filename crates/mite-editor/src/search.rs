//! Search — the `/` prompt and its results.
//!
//! Pressing `/` opens an empty query. Printable keys append to it and
//! Backspace trims it. Enter runs the search over the whole buffer and jumps
//! to the first match; Escape leaves without searching.
//!
//! Matching is a literal substring test, one flag per row. The row list is
//! kept after the prompt closes, but only its first entry is ever used:
//! there is no "next match" motion.

use crate::buffer::TextBuffer;
use crate::position::Position;

/// The prompt shown before the query on the status line.
pub const PREFIX: char = '/';

/// The query being typed and the rows the last search matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    results: Vec<usize>,
}

impl SearchState {
    /// An empty query with no results.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
        }
    }

    /// Start a fresh search: empty query, no results.
    pub fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
    }

    /// The query typed so far.
    #[inline]
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows matched by the last executed search, ascending.
    #[inline]
    #[must_use]
    pub fn results(&self) -> &[usize] {
        &self.results
    }

    /// Append a character to the query.
    pub fn push(&mut self, ch: char) {
        self.query.push(ch);
    }

    /// Remove the last character of the query, if any.
    pub fn backspace(&mut self) {
        self.query.pop();
    }

    /// Run the query against `buf`, replacing the stored results.
    ///
    /// Returns the position of the first match (first matching row, column
    /// where the query starts in it), or `None` when nothing matched. An
    /// empty query matches nothing.
    pub fn execute(&mut self, buf: &TextBuffer) -> Option<Position> {
        self.results = buf.find_all(&self.query);
        let row = *self.results.first()?;
        let col = buf.find_in_line(row, &self.query)?;
        Some(Position::new(row, col))
    }
}
