#![deny(unsafe_code)]

//! crates/test-support/src/lib.rs
//!
//! Helpers shared by the workspace's unit and integration tests: an
//! in-memory writer that can be handed to a logger while the test keeps a
//! handle for inspecting what was written, and a temporary log file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tempfile::TempDir;

/// Cloneable in-memory writer. Every clone appends to the same buffer.
#[derive(Clone, Debug, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far as UTF-8 (lossy).
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Returns the written lines without their terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Returns the single line written so far, panicking otherwise.
    pub fn only_line(&self) -> String {
        let lines = self.lines();
        assert_eq!(lines.len(), 1, "expected exactly one line, got {lines:?}");
        lines.into_iter().next().unwrap_or_default()
    }

    /// Reports whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Discards the buffered bytes.
    pub fn clear(&self) {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Removes the trailing ` -- <call site>` attribution from a rendered line.
///
/// `dim` is the escape sequence that precedes the separator (empty when
/// color is disabled).
pub fn strip_caller<'a>(line: &'a str, dim: &str) -> &'a str {
    let marker = format!("{dim} -- ");
    match line.rfind(&marker) {
        Some(index) => &line[..index],
        None => line,
    }
}

/// Temporary directory holding a log file path that does not exist yet.
#[derive(Debug)]
pub struct TempLogFile {
    _dir: TempDir,
    path: PathBuf,
}

impl TempLogFile {
    /// Creates a fresh directory and reserves `name` inside it.
    pub fn new(name: &str) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(name);
        Ok(Self { _dir: dir, path })
    }

    /// Returns the reserved path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file for appending, creating it when missing.
    pub fn open_append(&self) -> io::Result<fs::File> {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
    }

    /// Reads the file back as UTF-8.
    pub fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}
