//! Filesystem-based usage state.
//!
//! Stores counters as a JSON object (`{"credential": count}`) in a single
//! file, `.keyhold.state` by default.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::{UsageCounter, UsageStore};
use crate::core::constants;
use crate::error::StateError;

/// JSON file holding usage counters.
#[derive(Debug, Clone)]
pub struct FileUsageStore {
    path: PathBuf,
}

impl FileUsageStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file used for rename-on-write.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_err(&self, source: std::io::Error) -> StateError {
        StateError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileUsageStore {
    fn default() -> Self {
        Self::new(constants::STATE_FILE)
    }
}

impl UsageStore for FileUsageStore {
    fn load(&self) -> Result<UsageCounter, StateError> {
        trace!(path = %self.path.display(), "loading usage state");

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(UsageCounter::new());
            }
            Err(source) => {
                return Err(StateError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if bytes.is_empty() {
            return Ok(UsageCounter::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StateError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, counter: &UsageCounter) -> Result<(), StateError> {
        let json = serde_json::to_vec(counter).map_err(StateError::Serialize)?;
        let staging = self.staging_path();

        {
            let mut options = fs::OpenOptions::new();
            options.create(true).truncate(true).write(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(0o600);
            }

            let mut file = options.open(&staging).map_err(|e| self.write_err(e))?;
            file.write_all(&json).map_err(|e| self.write_err(e))?;
            file.sync_all().map_err(|e| self.write_err(e))?;
        }

        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(self.write_err(e));
        }

        debug!(path = %self.path.display(), "usage state saved");
        Ok(())
    }
}
