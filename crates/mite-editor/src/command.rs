//! Command-line mode — the `:` prompt on the status line.
//!
//! Pressing `:` in normal mode opens the command line with a leading `:`
//! marker already in place. Printable keys append to it, Backspace trims it
//! (but never removes the marker), Enter executes it and Escape abandons it.
//!
//! # Supported commands
//!
//! | Command | Action                          |
//! |---------|---------------------------------|
//! | `:w`    | Save the buffer to its filename |
//! | `:q`    | Stop the editor, discarding any unsaved text |
//!
//! Anything else parses to [`Command::Unknown`] and does nothing when
//! executed. No error is shown for it.

use std::fmt;

/// The marker that opens every command line.
pub const MARKER: char = ':';

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed command-line command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:w` — save to the current filename.
    Write,
    /// `:q` — stop the editor without saving.
    Quit,
    /// Anything else, kept verbatim for logging.
    Unknown(String),
}

impl Command {
    /// Look `text` (marker included) up in the command table. Matching is
    /// exact: `:w ` and `: w` are unknown.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            ":w" => Self::Write,
            ":q" => Self::Quit,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write => f.write_str(":w"),
            Self::Quit => f.write_str(":q"),
            Self::Unknown(text) => f.write_str(text),
        }
    }
}

// ---------------------------------------------------------------------------
// CommandLine
// ---------------------------------------------------------------------------

/// The command-line input buffer.
///
/// Holds the full text including the leading marker while the prompt is
/// open, and nothing once it is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    text: String,
}

impl CommandLine {
    /// Create a closed (empty) command line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Reset to just the marker, ready for typing.
    pub fn open(&mut self) {
        self.text.clear();
        self.text.push(MARKER);
    }

    /// Discard everything, marker included.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// The full text, marker included.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text after the marker, as shown after the `:` on the status line.
    #[must_use]
    pub fn input(&self) -> &str {
        self.text.strip_prefix(MARKER).unwrap_or(&self.text)
    }

    /// Append a character.
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Remove the last character unless only the marker is left.
    pub fn backspace(&mut self) {
        if self.text.chars().count() > 1 {
            self.text.pop();
        }
    }

    /// Parse the current text into a [`Command`].
    #[must_use]
    pub fn parse(&self) -> Command {
        Command::parse(&self.text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
