//! JSON report output.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use crate::{ChangeRecord, Error, Result};

/// Writes change records to a fixed path as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: Utf8PathBuf,
}

impl ReportWriter {
    /// Create a writer targeting `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination of the report.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Serialize `records` and overwrite the report file.
    ///
    /// The file is written even when `records` is empty, so a finished run
    /// always leaves a well-formed array behind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn write(&self, records: &[ChangeRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json).map_err(|source| Error::Io {
            path: self.path.to_string(),
            source,
        })?;

        if records.is_empty() {
            info!(path = %self.path, "no documentation changes detected; empty report written");
        } else {
            info!(path = %self.path, records = records.len(), "documentation changes saved");
        }

        Ok(())
    }
}
