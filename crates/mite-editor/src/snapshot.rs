//! Render snapshot — everything a renderer needs to draw one frame.
//!
//! Produced by [`EditorState::snapshot`](crate::editor::EditorState::snapshot).
//! The snapshot is plain owned data: the renderer never touches the buffer
//! or the viewport directly.

use crate::mode::Mode;

/// One buffer line as it appears in the text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLine {
    /// 1-based line number for the gutter.
    pub number: usize,
    /// The horizontally scrolled slice of the line that fits the text area.
    pub text: String,
}

/// A frame's worth of editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Mode at the time of the snapshot.
    pub mode: Mode,
    /// Visible lines, top to bottom. May be shorter than the text area when
    /// the buffer ends before the bottom of the screen.
    pub visible_lines: Vec<VisibleLine>,
    /// Width of the line-number gutter, separator column included. Numbers
    /// are right-aligned in `gutter_width - 1` columns.
    pub gutter_width: usize,
    /// Cursor row relative to the top of the text area.
    pub cursor_screen_row: usize,
    /// Cursor column relative to the left edge of the screen, gutter
    /// included.
    pub cursor_screen_col: usize,
    /// Status line contents.
    pub status_text: String,
}

impl Snapshot {
    /// Right-aligned gutter label for a line number, separator included.
    #[must_use]
    pub fn gutter_label(&self, number: usize) -> String {
        let digits = self.gutter_width.saturating_sub(1);
        format!("{number:>digits$} ")
    }
}
