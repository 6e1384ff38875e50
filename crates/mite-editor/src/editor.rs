//! Editor state — the modal state machine that turns keys into edits.
//!
//! [`EditorState`] owns the buffer, the cursor, the viewport, the current
//! [`Mode`] and the transient prompt input. The outside world talks to it
//! through two calls:
//!
//! ```text
//!   key ──▶ apply_key ──▶ per-mode handler ──▶ buffer / cursor / mode
//!                                   │
//!                                   ▼
//!                      clamp cursor, adjust viewport
//!
//!   renderer ◀── snapshot ◀── visible lines, cursor, status text
//! ```
//!
//! # Key rules
//!
//! | Mode    | Key         | Effect                                         |
//! |---------|-------------|------------------------------------------------|
//! | Normal  | `i`         | → Insert                                       |
//! | Normal  | `:`         | → Command, command line reset to `:`           |
//! | Normal  | `/`         | → Search, query and results cleared            |
//! | Normal  | `h` `l`     | column −1 / +1, clamped to the line            |
//! | Normal  | `j` `k`     | row +1 / −1, clamped to the buffer             |
//! | Insert  | Esc         | → Normal                                       |
//! | Insert  | Backspace   | delete before cursor, joining lines at col 0   |
//! | Insert  | Enter       | split line at cursor                           |
//! | Insert  | char        | insert at cursor, advance                      |
//! | Command | Esc         | → Normal, command line cleared                 |
//! | Command | Enter       | run `:w` / `:q` (others ignored), → Normal     |
//! | Command | Backspace   | trim, but never the `:` marker                 |
//! | Search  | Esc         | → Normal, last results kept                    |
//! | Search  | Enter       | search, jump to first match, → Normal          |
//! | Search  | Backspace   | trim query                                     |
//!
//! Every other key in every mode is a no-op (or, in the prompt modes, text).
//! After each key the cursor is clamped into the buffer and the viewport is
//! adjusted to keep it on screen, whatever the mode.

use std::io;
use std::path::{Path, PathBuf};

use crate::buffer::TextBuffer;
use crate::command::{Command, CommandLine};
use crate::error::{Error, Result};
use crate::key::Key;
use crate::mode::Mode;
use crate::position::Position;
use crate::search::{self, SearchState};
use crate::snapshot::{Snapshot, VisibleLine};
use crate::viewport::{Viewport, ViewportSize, gutter_width};

/// Save target used when no filename is given.
pub const DEFAULT_FILENAME: &str = "newfile.txt";

// ---------------------------------------------------------------------------
// EditorState
// ---------------------------------------------------------------------------

/// The whole editing session.
#[derive(Debug, Clone)]
pub struct EditorState {
    mode: Mode,
    buffer: TextBuffer,
    cursor: Position,
    viewport: Viewport,
    size: ViewportSize,

    command: CommandLine,
    search: SearchState,

    /// One-shot status message, cleared by the next key.
    message: Option<String>,

    filename: PathBuf,
    running: bool,
}

impl EditorState {
    // -- Construction -------------------------------------------------------

    /// A session on a single empty line, saving to [`DEFAULT_FILENAME`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer(TextBuffer::new(), DEFAULT_FILENAME)
    }

    /// A session editing `buffer`, saving to `filename`.
    #[must_use]
    pub fn with_buffer(buffer: TextBuffer, filename: impl Into<PathBuf>) -> Self {
        Self {
            mode: Mode::Normal,
            buffer,
            cursor: Position::ZERO,
            viewport: Viewport::new(),
            size: ViewportSize::DEFAULT,
            command: CommandLine::new(),
            search: SearchState::new(),
            message: None,
            filename: filename.into(),
            running: true,
        }
    }

    /// A session on `path`: its contents if the file exists, one empty line
    /// if it does not. Either way `:w` writes back to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let buffer = match TextBuffer::load(path) {
            Ok(buffer) => buffer,
            Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::info!("{} does not exist yet, starting empty", path.display());
                TextBuffer::new()
            }
            Err(err) => return Err(err),
        };
        Ok(Self::with_buffer(buffer, path))
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> ViewportSize {
        self.size
    }

    /// The command line text, `:` marker included. Empty outside command
    /// mode.
    #[inline]
    #[must_use]
    pub fn command_text(&self) -> &str {
        self.command.text()
    }

    /// The search query as last typed.
    #[inline]
    #[must_use]
    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    /// Rows matched by the last executed search.
    #[inline]
    #[must_use]
    pub fn search_results(&self) -> &[usize] {
        self.search.results()
    }

    /// The pending status message, if any.
    #[inline]
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// False once `:q` has run. The event loop must stop feeding keys.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    // -- Input --------------------------------------------------------------

    /// Resize the text area and re-scroll to keep the cursor visible.
    pub fn set_size(&mut self, size: ViewportSize) {
        self.size = size;
        self.settle();
    }

    /// Apply one key event.
    ///
    /// Keys arriving after `:q` are dropped.
    pub fn apply_key(&mut self, key: Key) {
        if !self.running {
            log::debug!("dropping {key} after quit");
            return;
        }
        log::trace!("{} {key}", self.mode);

        self.message = None;
        match self.mode {
            Mode::Normal => self.normal_key(key),
            Mode::Insert => self.insert_key(key),
            Mode::Command => self.command_key(key),
            Mode::Search => self.search_key(key),
        }
        self.settle();
    }

    /// Apply a sequence of keys in order.
    pub fn apply_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.apply_key(key);
        }
    }

    // -- Mode handlers ------------------------------------------------------

    fn normal_key(&mut self, key: Key) {
        let Key::Char(ch) = key else {
            return;
        };
        match ch {
            'i' => self.set_mode(Mode::Insert),
            ':' => {
                self.command.open();
                self.set_mode(Mode::Command);
            }
            '/' => {
                self.search.reset();
                self.set_mode(Mode::Search);
            }
            'h' => self.cursor.col = self.cursor.col.saturating_sub(1),
            'l' => {
                let max = self.buffer.line_length(self.cursor.row);
                self.cursor.col = (self.cursor.col + 1).min(max);
            }
            'j' => {
                let last = self.buffer.line_count() - 1;
                self.cursor.row = (self.cursor.row + 1).min(last);
            }
            'k' => self.cursor.row = self.cursor.row.saturating_sub(1),
            _ => {}
        }
    }

    fn insert_key(&mut self, key: Key) {
        debug_assert!(
            self.buffer.contains(self.cursor),
            "cursor {:?} outside buffer before edit",
            self.cursor
        );
        match key {
            Key::Escape => self.set_mode(Mode::Normal),
            Key::Backspace => match self.buffer.delete_char_before(self.cursor) {
                Ok(pos) => self.cursor = pos,
                Err(err) => log::error!("backspace rejected: {err}"),
            },
            Key::Enter => match self.buffer.split_line(self.cursor) {
                Ok(pos) => self.cursor = pos,
                Err(err) => log::error!("line split rejected: {err}"),
            },
            Key::Char(ch) => {
                if self.cursor.row >= self.buffer.line_count() {
                    self.buffer.push_line();
                }
                match self.buffer.insert_char(self.cursor, ch) {
                    Ok(()) => self.cursor.col += 1,
                    Err(err) => log::error!("insert rejected: {err}"),
                }
            }
        }
    }

    fn command_key(&mut self, key: Key) {
        match key {
            Key::Escape => {
                self.command.clear();
                self.set_mode(Mode::Normal);
            }
            Key::Enter => {
                let command = self.command.parse();
                self.execute(&command);
                self.command.clear();
                self.set_mode(Mode::Normal);
            }
            Key::Backspace => self.command.backspace(),
            Key::Char(ch) => self.command.push(ch),
        }
    }

    fn search_key(&mut self, key: Key) {
        match key {
            Key::Escape => self.set_mode(Mode::Normal),
            Key::Enter => {
                match self.search.execute(&self.buffer) {
                    Some(pos) => {
                        log::debug!(
                            "search {:?} matched rows {:?}",
                            self.search.query(),
                            self.search.results()
                        );
                        self.cursor = pos;
                    }
                    None => log::debug!("search {:?} found nothing", self.search.query()),
                }
                self.set_mode(Mode::Normal);
            }
            Key::Backspace => self.search.backspace(),
            Key::Char(ch) => self.search.push(ch),
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::debug!("mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Clamp the cursor into the buffer and scroll it into view.
    fn settle(&mut self) {
        self.cursor = self.buffer.clamp(self.cursor);
        let text_cols = self.size.text_cols(self.buffer.line_count());
        self.viewport.adjust(self.cursor, self.size.rows, text_cols);
    }

    // -- Commands -----------------------------------------------------------

    fn execute(&mut self, command: &Command) {
        log::debug!("execute {command}");
        match command {
            Command::Write => self.write(),
            Command::Quit => self.running = false,
            Command::Unknown(_) => {}
        }
    }

    /// `:w` — save and report the outcome on the status line.
    fn write(&mut self) {
        let name = self.filename.display().to_string();
        self.message = Some(match self.save() {
            Ok(()) => format!(
                "\"{name}\" {}L, {}B written",
                self.buffer.line_count(),
                self.buffer.len_bytes()
            ),
            Err(err) => {
                log::warn!("save failed: {err}");
                let reason = match err {
                    Error::Io { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                format!("E: cannot write \"{name}\": {reason}")
            }
        });
    }

    /// Write the whole buffer to the session's filename.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the write fails. The session is unaffected.
    pub fn save(&self) -> Result<()> {
        self.buffer.save(&self.filename)?;
        log::info!(
            "wrote {} ({} bytes)",
            self.filename.display(),
            self.buffer.len_bytes()
        );
        Ok(())
    }

    // -- Rendering ----------------------------------------------------------

    /// The status line for the current mode.
    #[must_use]
    pub fn status_text(&self) -> String {
        match self.mode {
            Mode::Command => format!("{}{}", crate::command::MARKER, self.command.input()),
            Mode::Search => format!("{}{}", search::PREFIX, self.search.query()),
            Mode::Normal | Mode::Insert => {
                let mut status = format!(
                    "-- {} -- | {} | {}",
                    self.mode,
                    self.filename.display(),
                    self.cursor
                );
                if let Some(message) = &self.message {
                    status.push_str(" | ");
                    status.push_str(message);
                }
                status
            }
        }
    }

    /// Everything needed to draw a `size` text area.
    ///
    /// Uses the current scroll offset, nudged (on a copy) so the cursor is
    /// visible even if `size` differs from the size the editor last saw.
    #[must_use]
    pub fn snapshot(&self, size: ViewportSize) -> Snapshot {
        let line_count = self.buffer.line_count();
        let gutter = gutter_width(line_count);
        let text_cols = size.text_cols(line_count);

        let mut viewport = self.viewport;
        viewport.adjust(self.cursor, size.rows, text_cols);

        let top = viewport.scroll_row();
        let bottom = (top + size.rows).min(line_count);
        let visible_lines = self.buffer.lines()[top.min(bottom)..bottom]
            .iter()
            .enumerate()
            .map(|(i, line)| VisibleLine {
                number: top + i + 1,
                text: line
                    .chars()
                    .skip(viewport.scroll_col())
                    .take(text_cols)
                    .collect(),
            })
            .collect();

        let screen = viewport.to_screen(self.cursor);
        Snapshot {
            mode: self.mode,
            visible_lines,
            gutter_width: gutter,
            cursor_screen_row: screen.row,
            cursor_screen_col: gutter + screen.col,
            status_text: self.status_text(),
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
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
    use std::fs;

    // -- Helpers ------------------------------------------------------------

    fn editor_with(text: &str) -> EditorState {
        EditorState::with_buffer(TextBuffer::from_text(text), "test.txt")
    }

    /// Feed typed text: every char becomes its key (`\x1b` is Escape,
    /// `\n` is Enter, `\x7f` is Backspace).
    fn feed(e: &mut EditorState, text: &str) {
        e.apply_keys(Key::from_str_lossy(text));
    }

    fn contents(e: &EditorState) -> String {
        e.buffer().serialize()
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_editor_defaults() {
        let e = EditorState::new();
        assert_eq!(e.mode(), Mode::Normal);
        assert_eq!(e.cursor(), Position::ZERO);
        assert_eq!(e.buffer().lines(), [""]);
        assert_eq!(e.filename(), Path::new(DEFAULT_FILENAME));
        assert!(e.is_running());
        assert_eq!(e.command_text(), "");
        assert!(e.search_results().is_empty());
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        let e = EditorState::open(&path).unwrap();
        assert_eq!(e.buffer().lines(), [""]);
        assert_eq!(e.filename(), path);
    }

    #[test]
    fn open_existing_file_loads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.txt");
        fs::write(&path, "first\nsecond").unwrap();
        let e = EditorState::open(&path).unwrap();
        assert_eq!(contents(&e), "first\nsecond");
    }

    #[test]
    fn open_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorState::open(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    // -- Normal mode --------------------------------------------------------

    #[test]
    fn i_enters_insert_without_editing() {
        let mut e = editor_with("abc");
        feed(&mut e, "i");
        assert_eq!(e.mode(), Mode::Insert);
        assert_eq!(contents(&e), "abc");
    }

    #[test]
    fn hl_move_within_line() {
        let mut e = editor_with("abc");
        feed(&mut e, "lll");
        assert_eq!(e.cursor(), Position::new(0, 3));
        feed(&mut e, "l");
        assert_eq!(e.cursor(), Position::new(0, 3));
        feed(&mut e, "hhhh");
        assert_eq!(e.cursor(), Position::new(0, 0));
    }

    #[test]
    fn jk_move_and_reclamp_column() {
        let mut e = editor_with("long line\nab\nlonger line");
        feed(&mut e, "lllllll");
        assert_eq!(e.cursor(), Position::new(0, 7));
        feed(&mut e, "j");
        assert_eq!(e.cursor(), Position::new(1, 2));
        feed(&mut e, "j");
        assert_eq!(e.cursor(), Position::new(2, 2));
        feed(&mut e, "jjj");
        assert_eq!(e.cursor().row, 2);
        feed(&mut e, "kkkk");
        assert_eq!(e.cursor(), Position::new(0, 2));
    }

    #[test]
    fn unbound_normal_keys_are_noops() {
        let mut e = editor_with("abc");
        let before = e.clone();
        e.apply_keys([Key::Char('x'), Key::Enter, Key::Backspace, Key::Escape, Key::Char('q')]);
        assert_eq!(e.mode(), Mode::Normal);
        assert_eq!(e.cursor(), before.cursor());
        assert_eq!(e.buffer(), before.buffer());
    }

    // -- Insert mode --------------------------------------------------------

    #[test]
    fn typing_inserts_at_cursor() {
        let mut e = editor_with("world");
        feed(&mut e, "ihello ");
        assert_eq!(contents(&e), "hello world");
        assert_eq!(e.cursor(), Position::new(0, 6));
    }

    #[test]
    fn escape_returns_to_normal() {
        let mut e = editor_with("");
        feed(&mut e, "iab\x1b");
        assert_eq!(e.mode(), Mode::Normal);
        assert_eq!(e.cursor(), Position::new(0, 2));
    }

    #[test]
    fn enter_splits_line() {
        let mut e = editor_with("helloworld");
        feed(&mut e, "lllll");
        feed(&mut e, "i\n");
        assert_eq!(contents(&e), "hello\nworld");
        assert_eq!(e.cursor(), Position::new(1, 0));
    }

    #[test]
    fn backspace_deletes_and_joins() {
        let mut e = editor_with("ab\ncd");
        feed(&mut e, "jli\x7f");
        assert_eq!(contents(&e), "ab\nd");
        assert_eq!(e.cursor(), Position::new(1, 0));
        feed(&mut e, "\x7f");
        assert_eq!(contents(&e), "abd");
        assert_eq!(e.cursor(), Position::new(0, 2));
    }

    #[test]
    fn backspace_at_origin_is_noop() {
        let mut e = editor_with("abc");
        feed(&mut e, "i\x7f\x7f");
        assert_eq!(contents(&e), "abc");
        assert_eq!(e.cursor(), Position::ZERO);
    }

    // -- Command mode -------------------------------------------------------

    #[test]
    fn colon_opens_command_line() {
        let mut e = editor_with("");
        feed(&mut e, ":");
        assert_eq!(e.mode(), Mode::Command);
        assert_eq!(e.command_text(), ":");
        assert_eq!(e.status_text(), ":");
        feed(&mut e, "wq");
        assert_eq!(e.command_text(), ":wq");
        assert_eq!(e.status_text(), ":wq");
    }

    #[test]
    fn command_backspace_keeps_marker_and_mode() {
        let mut e = editor_with("");
        feed(&mut e, ":x\x7f\x7f\x7f");
        assert_eq!(e.mode(), Mode::Command);
        assert_eq!(e.command_text(), ":");
    }

    #[test]
    fn command_escape_clears() {
        let mut e = editor_with("");
        feed(&mut e, ":q\x1b");
        assert_eq!(e.mode(), Mode::Normal);
        assert_eq!(e.command_text(), "");
        assert!(e.is_running());
    }

    #[test]
    fn unknown_command_is_ignored() {
        let mut e = editor_with("abc");
        feed(&mut e, ":set number\n");
        assert_eq!(e.mode(), Mode::Normal);
        assert_eq!(e.command_text(), "");
        assert!(e.is_running());
        assert_eq!(e.message(), None);
        assert_eq!(contents(&e), "abc");
    }

    #[test]
    fn quit_without_write_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut e = EditorState::open(&path).unwrap();
        feed(&mut e, "itext\x1b:q\n");
        assert!(!e.is_running());
        assert!(!path.exists());
    }

    #[test]
    fn keys_after_quit_are_dropped() {
        let mut e = editor_with("abc");
        feed(&mut e, ":q\ni");
        assert!(!e.is_running());
        assert_eq!(e.mode(), Mode::Normal);
    }

    #[test]
    fn write_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut e = EditorState::with_buffer(TextBuffer::from_text("ab\ncd"), &path);
        feed(&mut e, ":w\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "ab\ncd");
        let message = e.message().unwrap();
        assert!(message.ends_with("2L, 5B written"), "{message}");
        assert!(e.status_text().contains(message));
        feed(&mut e, "l");
        assert_eq!(e.message(), None);
    }

    #[test]
    fn write_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let mut e = EditorState::with_buffer(TextBuffer::from_text("keep me"), &path);
        feed(&mut e, ":w\n");
        assert!(e.is_running());
        assert_eq!(e.mode(), Mode::Normal);
        assert!(e.message().unwrap().starts_with("E: cannot write"));
        assert_eq!(contents(&e), "keep me");
        feed(&mut e, "i!");
        assert_eq!(contents(&e), "!keep me");
    }

    // -- Search mode --------------------------------------------------------

    #[test]
    fn slash_opens_search() {
        let mut e = editor_with("abc");
        feed(&mut e, "/b");
        assert_eq!(e.mode(), Mode::Search);
        assert_eq!(e.search_query(), "b");
        assert_eq!(e.status_text(), "/b");
    }

    #[test]
    fn search_jumps_to_match() {
        let mut e = editor_with("one\ntwo\nthree needle here\nfour");
        feed(&mut e, "/needle\n");
        assert_eq!(e.mode(), Mode::Normal);
        assert_eq!(e.cursor(), Position::new(2, 6));
        assert_eq!(e.search_results(), &[2]);
    }

    #[test]
    fn search_miss_leaves_cursor() {
        let mut e = editor_with("one\ntwo");
        feed(&mut e, "jl/zzz\n");
        assert_eq!(e.cursor(), Position::new(1, 1));
        assert!(e.search_results().is_empty());
        assert_eq!(e.mode(), Mode::Normal);
    }

    #[test]
    fn search_empty_query_matches_nothing() {
        let mut e = editor_with("a\nb");
        feed(&mut e, "j/\n");
        assert_eq!(e.cursor(), Position::new(1, 0));
        assert!(e.search_results().is_empty());
    }

    #[test]
    fn search_backspace_trims_query() {
        let mut e = editor_with("");
        feed(&mut e, "/ab\x7f\x7f\x7f");
        assert_eq!(e.search_query(), "");
        assert_eq!(e.mode(), Mode::Search);
    }

    #[test]
    fn search_escape_keeps_last_results() {
        let mut e = editor_with("x\ny\nx");
        feed(&mut e, "/x\n");
        assert_eq!(e.search_results(), &[0, 2]);
        // Reopening clears, but escaping a typed query does not search.
        feed(&mut e, "/y\x1b");
        assert_eq!(e.mode(), Mode::Normal);
        assert!(e.search_results().is_empty());
        assert_eq!(e.search_query(), "y");
        assert_eq!(e.cursor(), Position::ZERO);
    }

    // -- Viewport -----------------------------------------------------------

    #[test]
    fn scrolls_down_and_back_up() {
        let text = (1..=30).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut e = editor_with(&text);
        e.set_size(ViewportSize::new(10, 80));
        feed(&mut e, &"j".repeat(15));
        assert_eq!(e.viewport().scroll_row(), 6);
        feed(&mut e, &"k".repeat(13));
        assert_eq!(e.cursor().row, 2);
        assert_eq!(e.viewport().scroll_row(), 2);
    }

    #[test]
    fn scrolls_horizontally_past_gutter_width() {
        let mut e = editor_with(&"x".repeat(50));
        // 20 columns minus a 2-column gutter leaves 18 for text.
        e.set_size(ViewportSize::new(5, 20));
        feed(&mut e, &"l".repeat(30));
        assert_eq!(e.viewport().scroll_col(), 13);
        let snap = e.snapshot(e.size());
        assert_eq!(snap.cursor_screen_col, 2 + 17);
        assert_eq!(snap.visible_lines[0].text.len(), 18);
    }

    #[test]
    fn resize_rescrolls() {
        let text = vec!["line"; 40].join("\n");
        let mut e = editor_with(&text);
        e.set_size(ViewportSize::new(30, 80));
        feed(&mut e, &"j".repeat(25));
        assert_eq!(e.viewport().scroll_row(), 0);
        e.set_size(ViewportSize::new(10, 80));
        assert_eq!(e.viewport().scroll_row(), 16);
    }

    // -- Snapshot -----------------------------------------------------------

    #[test]
    fn snapshot_of_short_buffer() {
        let mut e = editor_with("alpha\nbeta");
        feed(&mut e, "jl");
        let snap = e.snapshot(ViewportSize::new(5, 40));
        assert_eq!(
            snap.visible_lines,
            vec![
                VisibleLine { number: 1, text: "alpha".into() },
                VisibleLine { number: 2, text: "beta".into() },
            ]
        );
        assert_eq!(snap.gutter_width, 2);
        assert_eq!(snap.cursor_screen_row, 1);
        assert_eq!(snap.cursor_screen_col, 3);
        assert_eq!(snap.status_text, "-- NORMAL -- | test.txt | 2:2");
        assert_eq!(snap.mode, Mode::Normal);
    }

    #[test]
    fn snapshot_windows_scrolled_lines() {
        let text = (1..=20).map(|n| format!("l{n}")).collect::<Vec<_>>().join("\n");
        let mut e = editor_with(&text);
        e.set_size(ViewportSize::new(4, 40));
        feed(&mut e, &"j".repeat(10));
        let snap = e.snapshot(e.size());
        let numbers: Vec<usize> = snap.visible_lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![8, 9, 10, 11]);
        assert_eq!(snap.visible_lines[3].text, "l11");
        assert_eq!(snap.cursor_screen_row, 3);
        assert_eq!(snap.gutter_width, 3);
    }

    #[test]
    fn snapshot_with_other_size_keeps_cursor_visible() {
        let text = vec!["x"; 50].join("\n");
        let mut e = editor_with(&text);
        feed(&mut e, &"j".repeat(20));
        let snap = e.snapshot(ViewportSize::new(5, 40));
        assert_eq!(snap.cursor_screen_row, 4);
        assert_eq!(snap.visible_lines.last().unwrap().number, 21);
    }

    #[test]
    fn insert_status_shows_mode() {
        let mut e = editor_with("");
        feed(&mut e, "iab");
        assert_eq!(e.status_text(), "-- INSERT -- | test.txt | 1:3");
    }

    // -- End to end ---------------------------------------------------------

    #[test]
    fn type_save_and_quit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        let mut e = EditorState::open(&path).unwrap();
        feed(&mut e, "ihello\nworld\x1b:w\n:q\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nworld");
        assert!(!e.is_running());
    }

    // -- Properties ---------------------------------------------------------

    proptest! {
        #[test]
        fn motions_keep_cursor_in_bounds(
            rows in proptest::collection::vec("[a-z]{0,12}", 1..12),
            keys in proptest::collection::vec(prop_oneof![Just('h'), Just('j'), Just('k'), Just('l')], 0..80),
        ) {
            let mut e = EditorState::with_buffer(TextBuffer::from_text(&rows.join("\n")), "p.txt");
            e.set_size(ViewportSize::new(4, 10));
            for key in keys {
                e.apply_key(Key::Char(key));
                let cursor = e.cursor();
                prop_assert!(cursor.row < e.buffer().line_count());
                prop_assert!(cursor.col <= e.buffer().line_length(cursor.row));
                let screen = e.viewport().to_screen(cursor);
                prop_assert!(screen.row < 4);
                prop_assert!(screen.col < e.size().text_cols(e.buffer().line_count()));
            }
        }

        #[test]
        fn editing_keys_keep_cursor_in_bounds(
            keys in proptest::collection::vec(
                prop_oneof![
                    Just(Key::Char('a')),
                    Just(Key::Char('i')),
                    Just(Key::Char('h')),
                    Just(Key::Char('j')),
                    Just(Key::Char('k')),
                    Just(Key::Char('l')),
                    Just(Key::Enter),
                    Just(Key::Backspace),
                    Just(Key::Escape),
                ],
                0..120,
            ),
        ) {
            let mut e = editor_with("seed\ntext");
            for key in keys {
                e.apply_key(key);
                prop_assert!(e.buffer().contains(e.cursor()));
                prop_assert!(e.buffer().line_count() >= 1);
            }
        }
    }
}
