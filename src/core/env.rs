//! Flat `.env` store.
//!
//! One `NAME=VALUE` per line. Empty lines and lines starting with `#` are
//! ignored, the first `=` is the only delimiter, and no quoting or escaping
//! is applied. Entries are only ever appended; existing content is never
//! rewritten.

use std::fs;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::core::cipher;
use crate::error::StoreError;

/// A single stored variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub name: String,
    pub value: String,
}

impl EnvEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether the value carries the `enc:AES256:` envelope.
    pub fn is_encrypted(&self) -> bool {
        cipher::is_encrypted(&self.value)
    }
}

/// Parse store contents into entries, in file order.
///
/// Lines without `=` are skipped. Name and value are trimmed. Duplicate
/// names are all kept.
pub fn parse(contents: &str) -> Vec<EnvEntry> {
    contents
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(name, value)| EnvEntry::new(name.trim(), value.trim()))
        .collect()
}

/// Render one entry as a store line.
pub fn format_line(name: &str, value: &str) -> String {
    format!("{}={}\n", name, value)
}

/// Read every entry of the store at `path`.
///
/// # Errors
///
/// Returns `StoreError::NotFound` if the file does not exist, or
/// `StoreError::Read` for any other read failure.
pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<EnvEntry>, StoreError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading env file");

    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            StoreError::NotFound(path.to_path_buf())
        } else {
            StoreError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let entries = parse(&contents);
    debug!(entries = entries.len(), "env file parsed");
    Ok(entries)
}

/// Append `name=value` to the store at `path`, creating it if absent.
///
/// If the file does not end with a newline one is written first, so the
/// previous last line is left intact. New files are created with 0600
/// permissions on Unix.
///
/// # Errors
///
/// Returns `StoreError::Write` if the file cannot be opened or written.
pub fn append(name: &str, value: &str, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = fs::OpenOptions::new();
    options.read(true).append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(write_err)?;

    let mut line = String::new();
    if needs_separator(&mut file).map_err(write_err)? {
        line.push('\n');
    }
    line.push_str(&format_line(name, value));

    file.write_all(line.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    debug!(path = %path.display(), name, "entry appended");
    Ok(())
}

/// Whether the file is non-empty and its last byte is not a newline.
fn needs_separator(file: &mut fs::File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Whether any entry in the store is encrypted.
///
/// Lets callers tell "wrong key" apart from "nothing to decrypt".
///
/// # Errors
///
/// Returns `StoreError` if the file cannot be read.
pub fn has_encrypted(path: impl AsRef<Path>) -> Result<bool, StoreError> {
    Ok(read_all(path)?.iter().any(EnvEntry::is_encrypted))
}
