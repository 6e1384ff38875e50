// SPDX-License-Identifier: MIT
//
// Frame renderer.
//
// Paints an editor [`Snapshot`] onto the screen. Every frame is a full
// repaint: each text row is cleared and redrawn, then the status line, then
// the cursor. The frame is assembled in one byte buffer and written with a
// single `write_all`, wrapped in synchronized output so the terminal shows
// it atomically.
//
// Layout:
//
// - Rows `0..rows-1`: dim right-aligned line number, then the line text.
//   Rows past the end of the buffer are left blank.
// - Row `rows-1`: the status text in reverse video, padded to full width.
// - Cursor: at the snapshot's cursor cell, or at the end of the status
//   text while a `:` or `/` prompt is open.

use std::io::{self, Write};

use mite_editor::Snapshot;

use crate::ansi::{self, Attr, CursorShape};
use crate::terminal::Size;

/// Reusable frame assembler. Keeps its output buffer between frames.
#[derive(Debug, Default)]
pub struct Renderer {
    out: Vec<u8>,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Paint one frame to `w` and flush it.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `w`.
    pub fn paint(&mut self, w: &mut impl Write, snap: &Snapshot, size: Size) -> io::Result<()> {
        let frame = self.frame(snap, size)?;
        w.write_all(frame)?;
        w.flush()
    }

    /// Assemble the bytes of one frame without writing them anywhere.
    ///
    /// # Errors
    ///
    /// Writing into the internal buffer cannot fail in practice; the
    /// `io::Result` comes from the `Write` plumbing.
    pub fn frame(&mut self, snap: &Snapshot, size: Size) -> io::Result<&[u8]> {
        self.out.clear();
        let out = &mut self.out;

        ansi::begin_sync(out)?;
        ansi::cursor_hide(out)?;

        let text_rows = size.rows.saturating_sub(1);
        let cols = usize::from(size.cols);

        // ── Text area ───────────────────────────────────────────────
        for y in 0..text_rows {
            ansi::cursor_to(out, 0, y)?;
            ansi::clear_line(out)?;

            let Some(line) = snap.visible_lines.get(usize::from(y)) else {
                continue;
            };

            let label: String = snap.gutter_label(line.number).chars().take(cols).collect();
            ansi::attrs(out, Attr::DIM)?;
            out.extend_from_slice(label.as_bytes());
            ansi::reset(out)?;

            let room = cols.saturating_sub(snap.gutter_width);
            let text: String = line.text.chars().take(room).map(printable).collect();
            out.extend_from_slice(text.as_bytes());
        }

        // ── Status line ─────────────────────────────────────────────
        let status_row = size.rows.saturating_sub(1);
        ansi::cursor_to(out, 0, status_row)?;
        ansi::clear_line(out)?;
        ansi::attrs(out, Attr::REVERSE)?;
        let status: String = snap.status_text.chars().take(cols).map(printable).collect();
        let pad = cols - status.chars().count();
        write!(out, "{status}{:pad$}", "")?;
        ansi::reset(out)?;

        // ── Cursor ──────────────────────────────────────────────────
        let (x, y) = if snap.mode.is_prompt() {
            let end = snap.status_text.chars().count().min(cols.saturating_sub(1));
            (clamp_u16(end), status_row)
        } else {
            (
                clamp_u16(snap.cursor_screen_col),
                clamp_u16(snap.cursor_screen_row),
            )
        };
        ansi::cursor_to(out, x, y)?;
        ansi::set_cursor_shape(out, CursorShape::from(snap.mode.cursor_shape()))?;
        ansi::cursor_show(out)?;
        ansi::end_sync(out)?;

        Ok(&self.out)
    }
}

/// Control characters loaded from a file would move the terminal cursor;
/// draw them as `?` instead.
fn printable(ch: char) -> char {
    if ch.is_control() { '?' } else { ch }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
