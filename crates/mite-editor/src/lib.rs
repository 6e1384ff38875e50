//! # mite-editor — Editor core for mite
//!
//! This crate is the whole editing engine, with no terminal knowledge:
//!
//! - **[`position`]** — `Position` (row, col), 0-indexed
//! - **[`buffer`]** — `TextBuffer`, the line-oriented text with insert,
//!   delete, split, join, search and save
//! - **[`viewport`]** — scroll offset that keeps the cursor on screen
//! - **[`mode`]** — `Normal`, `Insert`, `Command`, `Search`
//! - **[`key`]** — the decoded key events the editor consumes
//! - **[`command`]** — the `:` command line and its command table
//! - **[`search`]** — the `/` query and its results
//! - **[`editor`]** — `EditorState`, the modal state machine tying it together
//! - **[`snapshot`]** — the read-only frame description handed to renderers
//! - **[`error`]** — error types

pub mod buffer;
pub mod command;
pub mod editor;
pub mod error;
pub mod key;
pub mod mode;
pub mod position;
pub mod search;
pub mod snapshot;
pub mod viewport;

pub use buffer::TextBuffer;
pub use editor::EditorState;
pub use error::{Error, Result};
pub use key::Key;
pub use mode::Mode;
pub use position::Position;
pub use snapshot::Snapshot;
pub use viewport::ViewportSize;
