//! Core library for docdelta's documentation change reports.
//!
//! The crate is layered around four responsibilities:
//! - listing changed source files between two revisions
//! - extracting documentation blocks from file contents
//! - pairing old and new blocks and diffing their text
//! - writing the accumulated change records as JSON

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Block pairing and change record generation.
pub mod compare;
/// Runtime configuration.
pub mod config;
/// Line-level text diffing.
pub mod diff;
/// Documentation block extraction.
pub mod extract;
/// End-to-end change collection.
pub mod pipeline;
/// JSON report output.
pub mod report;
/// Git repository access.
pub mod repository;
/// Collaborator traits for revision history and working tree reads.
pub mod source;

pub use compare::BlockDiffer;
pub use config::Config;
pub use docdelta_api::{
    ChangeKind, ChangeRecord, DocBlock, LineAnchor, LineChange, NOT_APPLICABLE,
};
pub use extract::BlockExtractor;
pub use pipeline::{run_repository, DocComparer};
pub use report::ReportWriter;
pub use repository::Repository;
pub use source::{MemorySource, VersionControl, Workspace};

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying git operation failed.
    #[error("git error: {source}")]
    Git {
        /// Original libgit2 error bubbled up by the core library.
        #[from]
        source: git2::Error,
    },
    /// Provided path does not correspond to a git repository.
    #[error("path does not reference a git repository: {path}")]
    NotARepository {
        /// Path that failed to resolve to a repository.
        path: String,
    },
    /// Bare repositories have no working tree to read current contents from.
    #[error("repository at {path} is bare and unsupported")]
    BareRepository {
        /// Path of the repository lacking a working tree.
        path: String,
    },
    /// Revision expression could not be resolved.
    #[error("revision {revision} could not be resolved")]
    MissingRevision {
        /// Revision expression that failed to resolve.
        revision: String,
    },
    /// Path is absent from the requested revision.
    #[error("{path} does not exist in revision {revision}")]
    PathNotFound {
        /// Revision that was searched.
        revision: String,
        /// Repository-relative path that was requested.
        path: String,
    },
    /// File contents are not valid UTF-8.
    #[error("{path} is not valid UTF-8")]
    InvalidUtf8 {
        /// Offending path.
        path: String,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
    /// Report serialization failed.
    #[error("failed to serialize report: {source}")]
    Serialize {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
    /// Configuration file could not be parsed.
    #[error("invalid configuration in {path}: {source}")]
    Config {
        /// Configuration file path.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}
