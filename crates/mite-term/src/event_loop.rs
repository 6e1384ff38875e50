// SPDX-License-Identifier: MIT
//
// Event loop — the heartbeat of the terminal application.
//
// Single-threaded and blocking. Each iteration:
//
//   1. Query the terminal size and tell the app if it changed.
//   2. Paint a frame from the app's snapshot.
//   3. Block on `read()` for the next chunk of input.
//   4. Decode the chunk into keys and hand them to the app one by one.
//
// The loop ends when the app answers a key with [`Action::Quit`], or when
// input reaches end-of-file.
//
// Resizes are picked up on the next iteration, i.e. on the next keypress.
// There is no SIGWINCH handler and no background reader.
//
// The core loop ([`EventLoop::drive`]) is generic over `Read` and `Write`,
// so tests feed it byte slices and capture frames in a `Vec<u8>`.
// [`EventLoop::run`] wraps it with the real terminal.

use std::io::{self, Read, Write};

use mite_editor::{EditorState, Key, Snapshot};

use crate::input::Decoder;
use crate::render::Renderer;
use crate::terminal::{Size, Terminal};

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Continue running.
    Continue,
    /// Exit the event loop cleanly.
    Quit,
}

/// Application interface for the event loop.
///
/// Each iteration the loop calls [`on_resize`](App::on_resize) if the size
/// changed, then [`snapshot`](App::snapshot) to paint, then
/// [`on_key`](App::on_key) for every decoded key.
pub trait App {
    /// Handle one key. Return [`Action::Quit`] to exit the loop.
    fn on_key(&mut self, _key: Key) -> Action {
        Action::Continue
    }

    /// Handle terminal resize. Also called once before the first frame.
    fn on_resize(&mut self, _size: Size) {}

    /// Describe the frame to draw on a `size` screen.
    fn snapshot(&self, size: Size) -> Snapshot;
}

impl App for EditorState {
    fn on_key(&mut self, key: Key) -> Action {
        self.apply_key(key);
        if self.is_running() {
            Action::Continue
        } else {
            Action::Quit
        }
    }

    fn on_resize(&mut self, size: Size) {
        log::debug!("screen size {}x{}", size.cols, size.rows);
        self.set_size(size.viewport());
    }

    fn snapshot(&self, size: Size) -> Snapshot {
        Self::snapshot(self, size.viewport())
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// Bytes requested per `read()`.
const READ_CHUNK: usize = 1024;

/// The terminal event loop.
///
/// Owns the terminal, decoder, and renderer. Call [`run`](Self::run) to
/// enter the loop. It returns when the application signals
/// [`Action::Quit`] or stdin closes.
pub struct EventLoop {
    terminal: Terminal,
    decoder: Decoder,
    renderer: Renderer,
}

impl EventLoop {
    /// Create an event loop. With `fixed_size`, the terminal is never
    /// asked for its size.
    #[must_use]
    pub fn new(fixed_size: Option<Size>) -> Self {
        Self {
            terminal: Terminal::new(fixed_size),
            decoder: Decoder::new(),
            renderer: Renderer::new(),
        }
    }

    /// The current terminal size.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run on the real terminal until the application quits.
    ///
    /// Enters raw mode and the alternate screen, drives the loop on
    /// stdin/stdout, and restores the terminal on the way out, even when
    /// the loop failed.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, reading, or writing fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;

        let result = {
            let stdin = io::stdin();
            let stdout = io::stdout();
            self.drive(app, stdin.lock(), stdout.lock())
        };

        // Always clean up, even if the loop errored.
        settle(result, self.terminal.leave())
    }

    /// The loop itself, over any byte source and sink.
    ///
    /// # Errors
    ///
    /// Returns the first read or write error other than `Interrupted`.
    pub fn drive<R: Read, W: Write>(
        &mut self,
        app: &mut impl App,
        mut input: R,
        mut output: W,
    ) -> io::Result<()> {
        let mut last_size = None;
        let mut bytes = [0u8; READ_CHUNK];

        loop {
            // ── Size ─────────────────────────────────────────────
            let size = self.terminal.size();
            if last_size != Some(size) {
                app.on_resize(size);
                last_size = Some(size);
            }

            // ── Paint ────────────────────────────────────────────
            let snap = app.snapshot(size);
            self.renderer.paint(&mut output, &snap, size)?;

            // ── Read ─────────────────────────────────────────────
            let n = match input.read(&mut bytes) {
                Ok(0) => {
                    log::debug!("input closed");
                    self.decoder.flush();
                    return Ok(());
                }
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            // ── Dispatch ─────────────────────────────────────────
            for key in self.decoder.advance(&bytes[..n]) {
                if app.on_key(key) == Action::Quit {
                    return Ok(());
                }
            }
        }
    }
}

/// The loop's error wins over the restore error, which is logged.
fn settle(result: io::Result<()>, restore: io::Result<()>) -> io::Result<()> {
    if let Err(err) = &restore {
        log::error!("terminal restore failed: {err}");
    }
    result.and(restore)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
