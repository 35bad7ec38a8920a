//! Read-only access to a single git repository
//!
//! [`GitRepository`] is opened once at startup and answers every query by
//! re-reading the repository, so callers always see the current state on
//! disk. Formatting of the individual answers lives in the submodules.

mod diff;
mod history;
mod status;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use git2::{BranchType, ErrorCode, Repository};

use crate::types::{Commit, GitError, GitResult};

pub use history::{format_git_time, to_commit, SHORT_SHA_LEN, UNKNOWN_AUTHOR};

/// Handle to a validated on-disk repository.
///
/// `git2::Repository` is not `Sync`; the mutex is held for one query at a
/// time and never across an `.await`.
pub struct GitRepository {
    root: PathBuf,
    repo: Mutex<Repository>,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Resolve `path` to an absolute path, following symlinks when it exists.
fn resolve_path(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl GitRepository {
    /// Open the repository at `path` or the nearest parent directory that is one.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let resolved = resolve_path(path.as_ref());

        if !resolved.exists() {
            return Err(GitError::path_not_found(&resolved));
        }

        let repo = Repository::discover(&resolved).map_err(|e| {
            tracing::debug!("discover failed for {}: {}", resolved.display(), e);
            GitError::invalid_repository(&resolved)
        })?;

        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self {
            root,
            repo: Mutex::new(repo),
        })
    }

    /// Working directory of the repository (the git dir for bare repositories)
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn with_repo<T>(&self, f: impl FnOnce(&Repository) -> GitResult<T>) -> GitResult<T> {
        // Queries never leave the repository half-updated, so a poisoned lock is still usable.
        let repo = self.repo.lock().unwrap_or_else(PoisonError::into_inner);
        f(&repo)
    }

    /// Names of all local branches, in libgit2's iteration order
    pub fn list_branches(&self) -> GitResult<Vec<String>> {
        self.with_repo(|repo| {
            let mut names = Vec::new();
            for branch in repo.branches(Some(BranchType::Local))? {
                let (branch, _) = branch?;
                names.push(String::from_utf8_lossy(branch.name_bytes()?).into_owned());
            }
            Ok(names)
        })
    }

    /// Name of the branch HEAD points at.
    ///
    /// Works on an unborn branch; fails with [`GitError::DetachedOrNoHead`]
    /// when HEAD points directly at a commit.
    pub fn current_branch(&self) -> GitResult<String> {
        self.with_repo(|repo| head_branch(repo)?.ok_or(GitError::DetachedOrNoHead))
    }

    /// Long-format `git status` text
    pub fn status(&self) -> GitResult<String> {
        self.with_repo(status::render)
    }

    /// Up to `limit` commits reachable from HEAD, newest first
    pub fn commit_log(&self, limit: usize) -> GitResult<Vec<Commit>> {
        self.with_repo(|repo| history::collect(repo, limit))
    }

    /// Unified diff of staged (`HEAD..index`) or unstaged (`index..workdir`) changes
    pub fn show_diff(&self, file_path: Option<&str>, staged: bool) -> GitResult<String> {
        self.with_repo(|repo| diff::render(repo, file_path, staged))
    }
}

/// Short name of the local branch HEAD refers to, `None` when detached.
fn head_branch(repo: &Repository) -> GitResult<Option<String>> {
    let head = repo.find_reference("HEAD")?;
    let branch = head
        .symbolic_target_bytes()
        .and_then(|target| target.strip_prefix(b"refs/heads/"))
        .map(|name| String::from_utf8_lossy(name).into_owned());
    Ok(branch)
}

/// HEAD's tree, or `None` while the current branch has no commits yet.
fn head_tree(repo: &Repository) -> GitResult<Option<git2::Tree<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(e) if is_unborn(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn is_unborn(e: &git2::Error) -> bool {
    matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}
