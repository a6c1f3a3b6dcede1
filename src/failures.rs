use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::model::FailureLogEntry;

/// Append-only text log of items that could not be downloaded.
pub struct FailureRecorder {
    path: PathBuf,
    recorded: usize,
}

impl FailureRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recorded: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Drop the log left behind by a previous run.
    pub fn reset(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => log::info!("Removed previous failure log {:?}", self.path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove failure log {:?}: {}", self.path, e),
        }
    }

    /// Best effort: a failure to write the log is reported and swallowed.
    pub fn record(&mut self, entry: &FailureLogEntry) -> bool {
        match self.append(entry) {
            Ok(()) => {
                self.recorded += 1;
                log::info!(
                    "Logged failed download: {} (ID: {})",
                    entry.title,
                    entry.signature_request_id
                );
                true
            }
            Err(e) => {
                log::error!(
                    "Could not write failure log {:?} for {} (ID: {}): {}",
                    self.path,
                    entry.title,
                    entry.signature_request_id,
                    e
                );
                false
            }
        }
    }

    fn append(&self, entry: &FailureLogEntry) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry)
    }
}
