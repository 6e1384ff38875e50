// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, alternate screen, and RAII cleanup.
//
// Entering the terminal puts stdin in raw mode, moves to the alternate
// screen and clears it. Leaving (or dropping the handle) undoes both. A
// panic hook does the same, so a crash lands on a usable shell.
//
// All OS calls live in the private `sys` module: window size, termios
// save / raw / restore, and the panic-path writer. Everything above it is
// platform-neutral.
#![allow(unsafe_code)]

use std::io::{self, Write};
use std::sync::Once;

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// Used when the terminal cannot be queried.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };

    /// Pick the size to use: an explicit override first, then what the
    /// terminal reported, then [`FALLBACK`](Self::FALLBACK).
    #[must_use]
    pub fn resolve(fixed: Option<Self>, reported: impl FnOnce() -> Option<Self>) -> Self {
        fixed.or_else(reported).unwrap_or(Self::FALLBACK)
    }

    /// The editor's text area for this screen (all rows but the status line).
    #[must_use]
    pub const fn viewport(self) -> mite_editor::ViewportSize {
        mite_editor::ViewportSize::for_screen(self.rows, self.cols)
    }
}

impl std::str::FromStr for Size {
    type Err = String;

    /// Parse `COLSxROWS`, e.g. `120x40`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cols, rows) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected COLSxROWS, got {s:?}"))?;
        let cols: u16 = cols.trim().parse().map_err(|e| format!("bad column count: {e}"))?;
        let rows: u16 = rows.trim().parse().map_err(|e| format!("bad row count: {e}"))?;
        if cols == 0 || rows < 2 {
            return Err(format!("{cols}x{rows} is too small"));
        }
        Ok(Self { cols, rows })
    }
}

// ─── Restore Sequence ───────────────────────────────────────────────────────

/// Everything `enter` and rendering may have changed on screen, undone.
/// Alternate screen exit goes last so the rest applies to the shell's screen
/// state too.
fn write_restore(w: &mut impl Write) -> io::Result<()> {
    ansi::end_sync(w)?;
    ansi::reset(w)?;
    ansi::set_cursor_shape(w, ansi::CursorShape::Default)?;
    ansi::cursor_show(w)?;
    ansi::exit_alt_screen(w)
}

static PANIC_HOOK: Once = Once::new();

/// Chain a hook in front of the default panic handler that puts the
/// terminal back first, so the panic message is readable.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut seq = Vec::with_capacity(32);
            let _ = write_restore(&mut seq);
            sys::emergency_restore(&seq);
            previous(info);
        }));
    });
}

// ─── OS Layer ───────────────────────────────────────────────────────────────

#[cfg(unix)]
mod sys {
    use std::io;
    use std::mem::MaybeUninit;
    use std::sync::Mutex;

    use super::Size;

    /// Saved terminal mode.
    pub type Mode = libc::termios;

    /// The mode in effect before raw mode, for the panic hook, which has no
    /// access to the [`Terminal`](super::Terminal).
    static SAVED: Mutex<Option<Mode>> = Mutex::new(None);

    fn check(ret: libc::c_int) -> io::Result<()> {
        if ret == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    /// Window size of stdout, if it is a terminal that knows its size.
    pub fn window_size() -> Option<Size> {
        let mut ws = MaybeUninit::<libc::winsize>::zeroed();
        // SAFETY: TIOCGWINSZ fills a `winsize`; the buffer is zeroed either way.
        let ret = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, ws.as_mut_ptr()) };
        // SAFETY: zero-initialized plain C struct.
        let ws = unsafe { ws.assume_init() };
        (ret == 0 && ws.ws_col > 0 && ws.ws_row > 0).then_some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    }

    /// Put stdin in raw mode and return the mode to restore later.
    /// Returns `None` without touching anything when stdin is not a TTY.
    pub fn make_raw() -> io::Result<Option<Mode>> {
        // SAFETY: isatty only inspects the descriptor.
        if unsafe { libc::isatty(libc::STDIN_FILENO) } != 1 {
            return Ok(None);
        }

        let mut current = MaybeUninit::<Mode>::zeroed();
        // SAFETY: tcgetattr fills the struct on success; checked below.
        check(unsafe { libc::tcgetattr(libc::STDIN_FILENO, current.as_mut_ptr()) })?;
        // SAFETY: zero-initialized and filled by tcgetattr.
        let original = unsafe { current.assume_init() };

        let mut editing = original;
        // SAFETY: cfmakeraw only edits the struct it is given.
        unsafe { libc::cfmakeraw(&raw mut editing) };
        // Block until at least one byte is available, no timeout.
        editing.c_cc[libc::VMIN] = 1;
        editing.c_cc[libc::VTIME] = 0;

        if let Ok(mut saved) = SAVED.lock() {
            *saved = Some(original);
        }
        // SAFETY: valid descriptor and a fully initialized termios.
        check(unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const editing) })?;
        Ok(Some(original))
    }

    /// Put back a mode returned by [`make_raw`].
    pub fn restore(mode: &Mode) -> io::Result<()> {
        if let Ok(mut saved) = SAVED.lock() {
            *saved = None;
        }
        // SAFETY: valid descriptor and a termios obtained from tcgetattr.
        check(unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, mode) })
    }

    /// Panic path: write `seq` straight to fd 1, skipping the `io::stdout()`
    /// lock the panicking code may hold, then restore the saved mode.
    pub fn emergency_restore(seq: &[u8]) {
        // SAFETY: writing an in-bounds buffer to stdout.
        let _ = unsafe { libc::write(libc::STDOUT_FILENO, seq.as_ptr().cast(), seq.len()) };

        let saved = SAVED.try_lock().ok().and_then(|guard| *guard);
        if let Some(mode) = saved {
            // SAFETY: as in `restore`.
            let _ = unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw const mode) };
        }
    }
}

#[cfg(not(unix))]
mod sys {
    use std::io::{self, Write};

    use super::Size;

    pub type Mode = ();

    pub const fn window_size() -> Option<Size> {
        None
    }

    pub const fn make_raw() -> io::Result<Option<Mode>> {
        Ok(None)
    }

    pub const fn restore(_mode: &Mode) -> io::Result<()> {
        Ok(())
    }

    pub fn emergency_restore(seq: &[u8]) {
        let mut out = io::stdout();
        let _ = out.write_all(seq);
        let _ = out.flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// Call [`enter`](Self::enter) to switch to editor mode (raw input,
/// alternate screen). The terminal is restored when the handle is dropped.
pub struct Terminal {
    /// Size override from the command line. Wins over the OS query.
    fixed_size: Option<Size>,

    /// Mode to restore on leave; `None` when stdin was not a TTY.
    saved_mode: Option<sys::Mode>,

    /// Whether raw mode and the alternate screen are active.
    active: bool,
}

impl Terminal {
    /// Create a terminal handle. Does **not** enter raw mode.
    ///
    /// With `fixed_size` set, [`size`](Self::size) always reports it instead
    /// of asking the OS.
    #[must_use]
    pub const fn new(fixed_size: Option<Size>) -> Self {
        Self {
            fixed_size,
            saved_mode: None,
            active: false,
        }
    }

    /// Current terminal size, re-queried on every call unless fixed.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::resolve(self.fixed_size, sys::window_size)
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Enter raw mode and the alternate screen. A no-op while active.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or terminal output fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }

        install_panic_hook();
        self.saved_mode = sys::make_raw()?;

        let mut out = io::stdout().lock();
        ansi::enter_alt_screen(&mut out)?;
        ansi::clear_screen(&mut out)?;
        out.flush()?;

        self.active = true;
        log::debug!("terminal entered ({:?})", self.size());
        Ok(())
    }

    /// Leave the alternate screen and restore the saved mode. A no-op while
    /// inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output or the mode restore fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut out = io::stdout().lock();
        let screen = write_restore(&mut out).and_then(|()| out.flush());
        drop(out);

        // Restore the mode even if the screen sequence failed.
        if let Some(mode) = self.saved_mode.take() {
            sys::restore(&mode)?;
        }
        log::debug!("terminal restored");
        screen
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            log::warn!("terminal restore failed: {err}");
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
