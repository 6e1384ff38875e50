// SPDX-License-Identifier: MIT
//
// mite — a small modal terminal text editor.
//
// This is the binary that wires the two crates together:
//
//   mite-term   → terminal control, key decoding, painting, event loop
//   mite-editor → text buffer, viewport, modes, commands, search
//
// `EditorState` implements mite-term's `App` trait, so each keypress flows:
//
//   stdin → decoder → apply_key → mode dispatch → buffer/cursor mutation
//   snapshot → renderer → stdout
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ gutter + text area           │  ← rows - 1
//   ├──────────────────────────────┤
//   │ status line (REVERSE)        │  ← 1 row
//   └──────────────────────────────┘

mod config;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use mite_editor::EditorState;
use mite_term::EventLoop;

use config::Args;

/// Open the session for `file`: its contents if it exists, else empty.
fn open_session(file: &Path) -> anyhow::Result<EditorState> {
    EditorState::open(file).with_context(|| format!("cannot open {}", file.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    config::init_logging(args.log_file.as_deref())?;
    log::info!("mite {} starting", env!("CARGO_PKG_VERSION"));

    let mut editor = open_session(&args.file)?;

    let mut event_loop = EventLoop::new(args.size);
    event_loop
        .run(&mut editor)
        .context("terminal session failed")?;

    log::info!("mite exited");
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
