//! Log writer module
//!
//! Resolves configured log destinations into `tracing-subscriber` writers:
//! a file opened for appending, or the process's stdout/stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Where a log stream goes when no file is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Stdout,
    Stderr,
}

/// Build a writer for an optional log file path
pub fn make_writer(path: Option<&str>, fallback: Fallback) -> io::Result<BoxMakeWriter> {
    let writer = match path {
        Some(path) => BoxMakeWriter::new(Mutex::new(open_log_file(path)?)),
        None => match fallback {
            Fallback::Stdout => BoxMakeWriter::new(io::stdout),
            Fallback::Stderr => BoxMakeWriter::new(io::stderr),
        },
    };
    Ok(writer)
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}
