//! Runtime configuration for a docdelta run.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Options controlling which files are compared and where the report lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Repository-relative directory prefix whose files are inspected.
    pub source_directory: Utf8PathBuf,
    /// Destination of the JSON report.
    pub output_file: Utf8PathBuf,
    /// Suffix a changed path must carry to be inspected.
    pub extension: String,
    /// Revision holding the previous contents.
    pub base_revision: String,
    /// Revision whose changes are listed.
    pub head_revision: String,
    /// Marker opening a documentation block.
    pub start_marker: String,
    /// Marker closing a documentation block.
    pub end_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_directory: Utf8PathBuf::from("src/"),
            output_file: Utf8PathBuf::from("docs_changes.json"),
            extension: ".js".into(),
            base_revision: "HEAD~1".into(),
            head_revision: "HEAD".into(),
            start_marker: "/**".into(),
            end_marker: "*/".into(),
        }
    }
}

impl Config {
    /// Read a TOML configuration file. Missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(path.as_str(), &contents)
    }

    /// Parse configuration from TOML text; `origin` is used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the text is not a valid configuration.
    pub fn from_toml(origin: &str, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| Error::Config {
            path: origin.to_owned(),
            source,
        })
    }

    /// Source directory as a pathspec string.
    #[must_use]
    pub fn source_prefix(&self) -> &str {
        self.source_directory.as_str()
    }
}
