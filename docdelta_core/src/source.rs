//! Collaborators the pipeline reads file history and current contents from.

use std::collections::BTreeMap;

use crate::{Error, Result};

/// Read access to revision history.
pub trait VersionControl {
    /// Paths that differ between `base` and `head` and lie under `prefix`,
    /// in the order the backend reports them.
    ///
    /// # Errors
    ///
    /// Implementors fail when either revision cannot be resolved or the
    /// history cannot be queried.
    fn list_changed_paths(&self, base: &str, head: &str, prefix: &str) -> Result<Vec<String>>;

    /// Full text of `path` as it existed at `revision`.
    ///
    /// # Errors
    ///
    /// Implementors fail when the revision or path is missing or the contents
    /// are not UTF-8 text.
    fn read_path_at_revision(&self, revision: &str, path: &str) -> Result<String>;
}

/// Read access to the current working tree.
pub trait Workspace {
    /// Current on-disk text of the repository-relative `path`.
    ///
    /// # Errors
    ///
    /// Implementors fail when the file is missing or unreadable.
    fn read_current(&self, path: &str) -> Result<String>;
}

/// In-memory history with exactly two revisions and a working tree.
///
/// Files are kept in path order, which is the order changed paths are
/// reported in, mirroring git.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    base_revision: String,
    head_revision: String,
    previous: BTreeMap<String, String>,
    current: BTreeMap<String, String>,
    has_base: bool,
}

impl MemorySource {
    /// History with a base (`HEAD~1`) and a head (`HEAD`) revision.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_revision: "HEAD~1".into(),
            head_revision: "HEAD".into(),
            has_base: true,
            ..Self::default()
        }
    }

    /// History holding only the head revision.
    #[must_use]
    pub fn single_revision() -> Self {
        Self {
            has_base: false,
            ..Self::new()
        }
    }

    /// Set the contents of `path` in the base revision.
    #[must_use]
    pub fn with_previous(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.previous.insert(path.into(), contents.into());
        self
    }

    /// Set the current contents of `path`.
    #[must_use]
    pub fn with_current(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.current.insert(path.into(), contents.into());
        self
    }

    fn resolve(&self, revision: &str) -> Result<()> {
        let known = revision == self.head_revision
            || (self.has_base && revision == self.base_revision);
        if known {
            Ok(())
        } else {
            Err(Error::MissingRevision {
                revision: revision.to_owned(),
            })
        }
    }
}

impl VersionControl for MemorySource {
    fn list_changed_paths(&self, base: &str, head: &str, prefix: &str) -> Result<Vec<String>> {
        self.resolve(base)?;
        self.resolve(head)?;

        let mut paths: Vec<&String> = self.previous.keys().chain(self.current.keys()).collect();
        paths.sort();
        paths.dedup();

        Ok(paths
            .into_iter()
            .filter(|path| is_under_prefix(path, prefix))
            .filter(|path| self.previous.get(*path) != self.current.get(*path))
            .cloned()
            .collect())
    }

    fn read_path_at_revision(&self, revision: &str, path: &str) -> Result<String> {
        self.resolve(revision)?;
        let files = if revision == self.head_revision {
            &self.current
        } else {
            &self.previous
        };

        files.get(path).cloned().ok_or_else(|| Error::PathNotFound {
            revision: revision.to_owned(),
            path: path.to_owned(),
        })
    }
}

impl Workspace for MemorySource {
    fn read_current(&self, path: &str) -> Result<String> {
        self.current.get(path).cloned().ok_or_else(|| Error::Io {
            path: path.to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        })
    }
}

/// Whether `path` lies inside the directory `prefix`. An empty prefix
/// matches everything.
pub(crate) fn is_under_prefix(path: &str, prefix: &str) -> bool {
    let directory = prefix.trim_end_matches('/');
    directory.is_empty()
        || path == directory
        || path
            .strip_prefix(directory)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemorySource {
        MemorySource::new()
            .with_previous("src/a.js", "/** a */\n")
            .with_current("src/a.js", "/** b */\n")
            .with_previous("src/same.js", "same\n")
            .with_current("src/same.js", "same\n")
            .with_current("src/new.js", "fresh\n")
            .with_previous("docs/readme.md", "old\n")
            .with_current("docs/readme.md", "new\n")
    }

    #[test]
    fn lists_changed_paths_under_prefix_in_order() {
        let paths = sample()
            .list_changed_paths("HEAD~1", "HEAD", "src/")
            .expect("list paths");
        assert_eq!(paths, vec!["src/a.js".to_owned(), "src/new.js".to_owned()]);
    }

    #[test]
    fn single_revision_history_cannot_list() {
        let source = MemorySource::single_revision().with_current("src/a.js", "x\n");
        let err = source.list_changed_paths("HEAD~1", "HEAD", "src/");
        assert!(matches!(
            err,
            Err(Error::MissingRevision { ref revision }) if revision == "HEAD~1"
        ));
    }

    #[test]
    fn prefix_matches_whole_directory_names() {
        assert!(is_under_prefix("src/a.js", "src/"));
        assert!(is_under_prefix("src/nested/a.js", "src"));
        assert!(is_under_prefix("anything.js", ""));
        assert!(!is_under_prefix("srcfoo/a.js", "src/"));
    }

    #[test]
    fn reads_each_side() {
        let source = sample();
        assert_eq!(
            source.read_path_at_revision("HEAD~1", "src/a.js").expect("old"),
            "/** a */\n"
        );
        assert_eq!(source.read_current("src/a.js").expect("current"), "/** b */\n");
        assert!(matches!(
            source.read_path_at_revision("HEAD~1", "src/new.js"),
            Err(Error::PathNotFound { .. })
        ));
        assert!(matches!(source.read_current("gone.js"), Err(Error::Io { .. })));
    }
}
