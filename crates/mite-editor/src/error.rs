//! Error types for the editor core.
//!
//! Only two things can go wrong: a caller hands the buffer coordinates it
//! does not contain (a defect in the caller's clamping), or the filesystem
//! refuses a load or save.

use std::io;
use std::path::PathBuf;

/// Errors produced by the editor core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A buffer mutator was called with a position outside the buffer.
    ///
    /// `EditorState` clamps the cursor before every mutation, so seeing this
    /// means a clamping bug, not bad user input.
    #[error("position {row}:{col} is outside the buffer")]
    OutOfRange { row: usize, col: usize },

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result alias used throughout the editor core.
pub type Result<T> = std::result::Result<T, Error>;
