//! Type definitions for git-inspect-mcp

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Response Types
// ============================================================================

/// A single commit as reported by `get_commit_log`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Commit {
    /// Abbreviated hash (first 7 hex characters)
    pub sha: String,
    /// Author name, "Unknown" when the commit records none
    pub author: String,
    /// Commit time in ISO-8601 with the commit's UTC offset
    pub date: String,
    /// First line of the trimmed commit message
    pub message: String,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum GitError {
    #[error("The path '{0}' does not exist.")]
    PathNotFound(String),

    #[error("'{0}' is not a valid git repository.")]
    InvalidRepository(String),

    #[error("Git repository is not valid: {0}")]
    RepositoryUnavailable(String),

    #[error("HEAD is detached or does not point to a branch")]
    DetachedOrNoHead,

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}

impl GitError {
    pub(crate) fn path_not_found(path: &Path) -> Self {
        GitError::PathNotFound(path.display().to_string())
    }

    pub(crate) fn invalid_repository(path: &Path) -> Self {
        GitError::InvalidRepository(path.display().to_string())
    }
}

pub type GitResult<T> = Result<T, GitError>;
