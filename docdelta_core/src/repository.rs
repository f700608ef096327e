//! Repository access built on top of libgit2.

use std::fmt;
use std::path::{Path, PathBuf};

use git2::{DiffOptions, ErrorClass, ErrorCode, Repository as GitRepository, Tree};

use crate::source::{is_under_prefix, VersionControl, Workspace};
use crate::{Error, Result};

/// Lightweight handle to the repository docdelta reports on.
pub struct Repository {
    inner: GitRepository,
    root: PathBuf,
}

impl Repository {
    /// Discover the repository enclosing `path`.
    ///
    /// History supplies the old side of each comparison and the working tree
    /// supplies the new side, so a checkout is required.
    ///
    /// # Errors
    ///
    /// Fails when `path` does not exist, no repository encloses it, or the
    /// repository has no working tree.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let original = path.as_ref();
        let canonical = std::fs::canonicalize(original).map_err(|source| Error::Io {
            path: display_path(original),
            source,
        })?;

        let repo = match GitRepository::discover(&canonical) {
            Ok(repo) => repo,
            Err(err)
                if err.class() == ErrorClass::Repository && err.code() == ErrorCode::NotFound =>
            {
                return Err(Error::NotARepository {
                    path: display_path(&canonical),
                })
            }
            Err(err) => return Err(Error::from(err)),
        };

        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::BareRepository {
                path: display_path(&canonical),
            })?;

        Ok(Self { inner: repo, root })
    }

    /// Working tree directory current contents are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn tree_at(&self, revision: &str) -> Result<Tree<'_>> {
        let object = self
            .inner
            .revparse_single(revision)
            .map_err(|_| Error::MissingRevision {
                revision: revision.to_owned(),
            })?;

        Ok(object.peel_to_tree()?)
    }
}

impl VersionControl for Repository {
    fn list_changed_paths(&self, base: &str, head: &str, prefix: &str) -> Result<Vec<String>> {
        let base_tree = self.tree_at(base)?;
        let head_tree = self.tree_at(head)?;

        let mut opts = DiffOptions::new();
        let pathspec = prefix.trim_end_matches('/');
        if !pathspec.is_empty() {
            opts.pathspec(pathspec);
        }

        let diff =
            self.inner
                .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))?;

        Ok(diff
            .deltas()
            .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
            .map(display_path)
            .filter(|path| is_under_prefix(path, prefix))
            .collect())
    }

    fn read_path_at_revision(&self, revision: &str, path: &str) -> Result<String> {
        let tree = self.tree_at(revision)?;
        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(err) if err.code() == ErrorCode::NotFound => {
                return Err(Error::PathNotFound {
                    revision: revision.to_owned(),
                    path: path.to_owned(),
                })
            }
            Err(err) => return Err(Error::from(err)),
        };

        let blob = entry.to_object(&self.inner)?.peel_to_blob()?;
        decode(path, blob.content().to_vec())
    }
}

impl Workspace for Repository {
    fn read_current(&self, path: &str) -> Result<String> {
        let absolute = self.root.join(path);
        let bytes = std::fs::read(&absolute).map_err(|source| Error::Io {
            path: display_path(&absolute),
            source,
        })?;
        decode(path, bytes)
    }
}

fn decode(path: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
        path: path.to_owned(),
    })
}

fn display_path(path: &Path) -> String {
    path.to_path_buf()
        .into_os_string()
        .to_string_lossy()
        .into_owned()
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{IndexAddOption, Repository as GitRepository};
    use tempfile::TempDir;

    #[test]
    fn lists_paths_changed_by_last_commit() -> Result<()> {
        let temp = TempDir::new().expect("tempdir");
        let git_repo = GitRepository::init(temp.path())?;

        std::fs::create_dir_all(temp.path().join("src")).expect("mkdir src");
        write_file(temp.path().join("src/a.js"), "/** a */\n");
        write_file(temp.path().join("src/b.js"), "/** b */\n");
        write_file(temp.path().join("README.md"), "hello\n");
        stage_and_commit(&git_repo, "Initial commit")?;

        write_file(temp.path().join("src/b.js"), "/** b2 */\n");
        write_file(temp.path().join("README.md"), "hello again\n");
        stage_and_commit(&git_repo, "Second commit")?;

        let repo = Repository::open(temp.path())?;
        let paths = repo.list_changed_paths("HEAD~1", "HEAD", "src/")?;
        assert_eq!(paths, vec!["src/b.js".to_owned()]);

        assert_eq!(repo.read_path_at_revision("HEAD~1", "src/b.js")?, "/** b */\n");
        assert_eq!(repo.read_current("src/b.js")?, "/** b2 */\n");

        Ok(())
    }

    #[test]
    fn single_commit_has_no_base_revision() -> Result<()> {
        let temp = TempDir::new().expect("tempdir");
        let git_repo = GitRepository::init(temp.path())?;

        write_file(temp.path().join("file.js"), "one\n");
        stage_and_commit(&git_repo, "Initial commit")?;

        let repo = Repository::open(temp.path())?;
        let result = repo.list_changed_paths("HEAD~1", "HEAD", "");
        assert!(matches!(result, Err(Error::MissingRevision { .. })));

        Ok(())
    }

    #[test]
    fn missing_path_at_revision() -> Result<()> {
        let temp = TempDir::new().expect("tempdir");
        let git_repo = GitRepository::init(temp.path())?;

        write_file(temp.path().join("file.js"), "one\n");
        stage_and_commit(&git_repo, "Initial commit")?;

        let repo = Repository::open(temp.path())?;
        let result = repo.read_path_at_revision("HEAD", "other.js");
        assert!(matches!(result, Err(Error::PathNotFound { .. })));

        Ok(())
    }

    #[test]
    fn open_non_repository_returns_error() {
        let temp = TempDir::new().expect("tempdir");
        let err = Repository::open(temp.path());
        assert!(matches!(err, Err(Error::NotARepository { .. })));
    }

    fn write_file(path: std::path::PathBuf, contents: &str) {
        std::fs::write(path, contents).expect("write file");
    }

    fn stage_and_commit(repo: &GitRepository, message: &str) -> Result<()> {
        let mut index = repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.write()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let signature = git2::Signature::now("Test User", "test@example.com")?;

        let parents = match repo.head() {
            Ok(head) => head
                .peel_to_commit()
                .map_or_else(|_| Vec::new(), |parent| vec![parent]),
            Err(err)
                if matches!(
                    (err.class(), err.code()),
                    (
                        git2::ErrorClass::Reference,
                        git2::ErrorCode::NotFound | git2::ErrorCode::UnbornBranch
                    )
                ) =>
            {
                Vec::new()
            }
            Err(err) => return Err(Error::from(err)),
        };

        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parent_refs,
        )?;
        Ok(())
    }
}
