//! End-to-end change collection: list, extract, compare, write.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::compare::BlockDiffer;
use crate::extract::BlockExtractor;
use crate::report::ReportWriter;
use crate::repository::Repository;
use crate::source::{VersionControl, Workspace};
use crate::{ChangeRecord, Config, Result};

/// Drives one documentation comparison run over injected collaborators.
#[derive(Debug)]
pub struct DocComparer<'src, S> {
    config: Config,
    source: &'src S,
    extractor: BlockExtractor,
    differ: BlockDiffer,
}

impl<'src, S> DocComparer<'src, S>
where
    S: VersionControl + Workspace,
{
    /// Bind a run configuration to the history and working tree in `source`.
    pub fn new(config: Config, source: &'src S) -> Self {
        let extractor = BlockExtractor::from_config(&config);
        Self {
            config,
            source,
            extractor,
            differ: BlockDiffer::new(),
        }
    }

    /// Changed source files between the configured revisions.
    ///
    /// Failing to query history is not fatal: it is logged and treated as an
    /// empty change set.
    #[must_use]
    pub fn changed_files(&self) -> Vec<String> {
        let config = &self.config;
        match self.source.list_changed_paths(
            &config.base_revision,
            &config.head_revision,
            config.source_prefix(),
        ) {
            Ok(paths) => {
                let files: Vec<String> = paths
                    .into_iter()
                    .filter(|path| path.ends_with(&config.extension))
                    .collect();
                info!(?files, "changed files");
                files
            }
            Err(err) => {
                warn!(error = %err, "failed to list changed files");
                Vec::new()
            }
        }
    }

    /// Change records for a single file.
    ///
    /// # Errors
    ///
    /// Returns an error when either version of the file cannot be read or the
    /// block diff fails.
    pub fn compare_file(&self, path: &str) -> Result<Vec<ChangeRecord>> {
        let old_content = self
            .source
            .read_path_at_revision(&self.config.base_revision, path)?;
        let new_content = self.source.read_current(path)?;

        let old_blocks = self.extractor.extract(&old_content, path);
        let new_blocks = self.extractor.extract(&new_content, path);
        debug!(file = path, ?old_blocks, ?new_blocks, "documentation blocks");

        self.differ.compare(path, &old_blocks, &new_blocks)
    }

    /// Change records for every changed file, in listing order.
    ///
    /// Files that fail to compare are logged and skipped.
    pub fn collect(&self) -> Vec<ChangeRecord> {
        let mut changes = Vec::new();

        for file in self.changed_files() {
            info!(file = %file, "processing file");
            match self.compare_file(&file) {
                Ok(records) if records.is_empty() => {
                    info!(file = %file, "no differences detected");
                }
                Ok(records) => {
                    info!(file = %file, records = records.len(), "differences detected");
                    changes.extend(records);
                }
                Err(err) => warn!(file = %file, error = %err, "failed to process file"),
            }
        }

        changes
    }

    /// Collect every change and write the report.
    ///
    /// # Errors
    ///
    /// Returns an error only when the report cannot be written.
    pub fn run(&self) -> Result<Vec<ChangeRecord>> {
        let changes = self.collect();
        ReportWriter::new(self.config.output_file.clone()).write(&changes)?;
        Ok(changes)
    }
}

/// Run a comparison against the git repository enclosing `repo_path`.
///
/// A path that cannot be opened as a repository is logged and produces an
/// empty report.
///
/// # Errors
///
/// Returns an error only when the report cannot be written.
pub fn run_repository(repo_path: impl AsRef<Path>, config: Config) -> Result<Vec<ChangeRecord>> {
    let repo_path = repo_path.as_ref();
    match Repository::open(repo_path) {
        Ok(repository) => {
            info!(root = %repository.root().display(), "opened repository");
            DocComparer::new(config, &repository).run()
        }
        Err(err) => {
            warn!(
                path = %repo_path.display(),
                error = %err,
                "failed to open repository; writing empty report"
            );
            ReportWriter::new(config.output_file).write(&[])?;
            Ok(Vec::new())
        }
    }
}
