// SPDX-License-Identifier: MIT
//
// Command-line configuration and logger setup.
//
// There is no config file. Everything comes from the command line, with
// the log destination also readable from the environment:
//
//   mite [FILE] [--log-file PATH] [--size COLSxROWS]
//
//   MITE_LOG_FILE   same as --log-file
//   MITE_LOG        env_logger filter, default `info`

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use mite_editor::editor::DEFAULT_FILENAME;
use mite_term::Size;

/// Environment variable holding the log filter.
pub const LOG_FILTER_ENV: &str = "MITE_LOG";

/// CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "mite")]
#[command(version)]
#[command(about = "A small modal terminal text editor", long_about = None)]
pub struct Args {
    /// File to edit. Loaded if it exists, written by `:w`.
    #[arg(value_name = "FILE", default_value = DEFAULT_FILENAME)]
    pub file: PathBuf,

    /// Append log output to this file. Nothing is logged without it.
    #[arg(long, value_name = "PATH", env = "MITE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Screen size to use instead of asking the terminal, e.g. `100x30`.
    #[arg(long, value_name = "COLSxROWS")]
    pub size: Option<Size>,
}

/// Install `env_logger`, writing to `path`.
///
/// The editor owns the screen while it runs, so logs never go to stderr.
/// With no path this does nothing.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a logger is already set.
pub fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_FILTER_ENV, "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("logger already initialized")?;

    Ok(())
}
