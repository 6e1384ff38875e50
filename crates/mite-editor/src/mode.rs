//! Modal editing.
//!
//! The editor is always in exactly one [`Mode`]. Each mode changes how keys
//! are interpreted:
//!
//! | Mode    | Entered by     | Keys mean                       | Cursor shape |
//! |---------|----------------|---------------------------------|--------------|
//! | Normal  | start, `Esc`   | `hjkl` motions, mode switches   | Block        |
//! | Insert  | `i`            | text typed into the buffer      | Bar          |
//! | Command | `:`            | text typed into the command line | Bar         |
//! | Search  | `/`            | text typed into the search query | Bar         |
//!
//! This is a pure data type. The per-mode key rules live in
//! [`crate::editor`].

use std::fmt;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// The current editing mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Default mode. Keys are motions and mode switches, not text.
    #[default]
    Normal,
    /// Text entry mode. Printable keys go into the buffer.
    Insert,
    /// `:` prompt. Printable keys go into the command line.
    Command,
    /// `/` prompt. Printable keys go into the search query.
    Search,
}

impl Mode {
    /// Human-readable name for the status line.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Command => "COMMAND",
            Self::Search => "SEARCH",
        }
    }

    /// The terminal cursor shape for this mode.
    #[must_use]
    pub const fn cursor_shape(self) -> CursorShape {
        match self {
            Self::Normal => CursorShape::SteadyBlock,
            Self::Insert | Self::Command | Self::Search => CursorShape::SteadyBar,
        }
    }

    /// True for the modes whose input lives on the status line rather than
    /// in the buffer. The renderer parks the cursor there.
    #[inline]
    #[must_use]
    pub const fn is_prompt(self) -> bool {
        matches!(self, Self::Command | Self::Search)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// CursorShape
// ---------------------------------------------------------------------------

/// Cursor shape for terminal display.
///
/// Kept here so the core does not depend on the terminal crate; the
/// renderer maps it to the DECSCUSR sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    /// `█` — solid block cursor.
    SteadyBlock,
    /// `▏` — thin vertical bar.
    SteadyBar,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
