// SPDX-License-Identifier: MIT
//
// mite-term — Terminal shell for the mite editor.
//
// Direct terminal control via raw termios and ANSI escape sequences, with
// no TUI framework in between. The shell is deliberately thin: it decodes
// stdin bytes into editor keys, hands them to an `App`, and paints the
// app's snapshot as one synchronized full-screen frame per iteration.

pub mod ansi;
pub mod event_loop;
pub mod input;
pub mod render;
pub mod terminal;

pub use event_loop::{Action, App, EventLoop};
pub use terminal::Size;
