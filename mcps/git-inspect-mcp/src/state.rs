//! Startup state shared by every tool call

use std::path::Path;

use crate::repository::GitRepository;
use crate::types::{GitError, GitResult};

/// Outcome of binding to the configured repository.
///
/// Built once at startup and never mutated. When the repository could not be
/// opened, the failure message is kept and every call reports it.
#[derive(Debug)]
pub struct ServiceState {
    repository: Result<GitRepository, String>,
}

impl ServiceState {
    /// Open the repository at `path`, recording the error instead of failing.
    pub fn initialize(path: impl AsRef<Path>) -> Self {
        let repository = GitRepository::open(path).map_err(|e| e.to_string());
        Self { repository }
    }

    pub fn from_repository(repository: GitRepository) -> Self {
        Self {
            repository: Ok(repository),
        }
    }

    /// The bound repository, or [`GitError::RepositoryUnavailable`].
    pub fn repository(&self) -> GitResult<&GitRepository> {
        self.repository
            .as_ref()
            .map_err(|e| GitError::RepositoryUnavailable(e.clone()))
    }

    /// Message recorded when initialization failed
    pub fn init_error(&self) -> Option<&str> {
        self.repository.as_ref().err().map(String::as_str)
    }
}
