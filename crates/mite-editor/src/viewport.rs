//! Viewport — which part of the buffer is on screen.
//!
//! The viewport is just a scroll offset: the buffer cell shown at the top-left
//! of the text area. It is never set directly by input handling. After every
//! key the editor calls [`Viewport::adjust`], which moves the offset the
//! minimum amount needed to keep the cursor inside the visible window.
//!
//! The text area sits to the right of a line-number gutter and above the
//! status line:
//!
//! ```text
//! ┌──────┬────────────────────────┐
//! │gutter│      text area         │ ← ViewportSize::rows
//! │      │                        │
//! ├──────┴────────────────────────┤
//! │         status line           │ ← 1 row
//! └───────────────────────────────┘
//! ```

use crate::position::Position;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute gutter width for line numbers.
///
/// Right-aligned line numbers plus one separator column. The gutter grows
/// with the line count:
///
/// | Lines   | Digits | Gutter |
/// |---------|--------|--------|
/// | 1–9     | 1      | 2      |
/// | 10–99   | 2      | 3      |
/// | 100–999 | 3      | 4      |
#[must_use]
pub const fn gutter_width(line_count: usize) -> usize {
    // At least 1, so ilog10 doesn't panic on 0.
    let n = if line_count == 0 { 1 } else { line_count };
    n.ilog10() as usize + 1 + 1
}

/// Scroll one axis so that `cursor` lies within `[scroll, scroll + visible)`.
///
/// Snaps the leading edge to the cursor when it moved before the window and
/// the trailing edge when it moved past it. A zero-sized window leaves the
/// offset alone.
#[must_use]
pub const fn scroll_axis(cursor: usize, scroll: usize, visible: usize) -> usize {
    if visible == 0 {
        scroll
    } else if cursor < scroll {
        cursor
    } else if cursor >= scroll + visible {
        cursor - visible + 1
    } else {
        scroll
    }
}

// ---------------------------------------------------------------------------
// ViewportSize
// ---------------------------------------------------------------------------

/// Dimensions of the text area including the gutter, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    /// Text rows (screen height minus the status line).
    pub rows: usize,
    /// Full width, gutter included.
    pub cols: usize,
}

impl ViewportSize {
    /// Fallback used when the terminal does not report its size.
    pub const DEFAULT: Self = Self::for_screen(24, 80);

    /// Create a size from text-area dimensions.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// The text area of a `rows × cols` screen: everything but the bottom
    /// row, which belongs to the status line. Arguments are in the same
    /// order as [`new`](Self::new).
    #[must_use]
    pub const fn for_screen(rows: u16, cols: u16) -> Self {
        Self {
            rows: rows.saturating_sub(1) as usize,
            cols: cols as usize,
        }
    }

    /// Columns left for text once the gutter for `line_count` lines is taken.
    #[must_use]
    pub const fn text_cols(self, line_count: usize) -> usize {
        self.cols.saturating_sub(gutter_width(line_count))
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The scroll offset of the text area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible buffer row.
    scroll_row: usize,
    /// First visible column.
    scroll_col: usize,
}

impl Viewport {
    /// A viewport scrolled to the top-left corner.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scroll_row: 0,
            scroll_col: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    #[inline]
    #[must_use]
    pub const fn scroll_col(&self) -> usize {
        self.scroll_col
    }

    /// Recompute the offset so the cursor is visible in a window of
    /// `visible_rows × visible_cols` text cells.
    pub const fn adjust(&mut self, cursor: Position, visible_rows: usize, visible_cols: usize) {
        self.scroll_row = scroll_axis(cursor.row, self.scroll_row, visible_rows);
        self.scroll_col = scroll_axis(cursor.col, self.scroll_col, visible_cols);
    }

    /// The cursor's position relative to the top-left visible cell.
    ///
    /// Only meaningful after [`adjust`](Self::adjust) has run for the same
    /// cursor.
    #[must_use]
    pub const fn to_screen(&self, cursor: Position) -> Position {
        Position::new(
            cursor.row.saturating_sub(self.scroll_row),
            cursor.col.saturating_sub(self.scroll_col),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
