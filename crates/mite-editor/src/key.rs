//! Decoded key events — the only input the editor core understands.
//!
//! Turning terminal bytes into keys is the terminal crate's job. By the time
//! a key reaches [`EditorState::apply_key`](crate::editor::EditorState::apply_key)
//! it is either a printable character or one of three named control keys.
//! Anything else has already been dropped.

use std::fmt;

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    Escape,
    Enter,
    Backspace,
}

impl Key {
    /// Classify a single character code.
    ///
    /// `ESC` maps to [`Key::Escape`], `\r` and `\n` to [`Key::Enter`], `DEL`
    /// and `BS` to [`Key::Backspace`]. Other control characters are not keys
    /// the editor handles and yield `None`.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\x1b' => Some(Self::Escape),
            '\r' | '\n' => Some(Self::Enter),
            '\x7f' | '\x08' => Some(Self::Backspace),
            c if c.is_control() => None,
            c => Some(Self::Char(c)),
        }
    }

    /// Keys for every character of `text`, skipping non-keys. Handy for
    /// feeding typed text in tests and scripts.
    pub fn from_str_lossy(text: &str) -> impl Iterator<Item = Self> + '_ {
        text.chars().filter_map(Self::from_char)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Escape => f.write_str("<Esc>"),
            Self::Enter => f.write_str("<CR>"),
            Self::Backspace => f.write_str("<BS>"),
        }
    }
}
