//! Parameter types for git-inspect-mcp tools
//!
//! `list_branches`, `get_current_branch` and `get_status` take no
//! parameters.

use schemars::JsonSchema;
use serde::Deserialize;

/// Number of commits `get_commit_log` returns when `limit` is omitted
pub const DEFAULT_LOG_LIMIT: usize = 10;

fn default_log_limit() -> usize {
    DEFAULT_LOG_LIMIT
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CommitLogParams {
    /// Maximum number of commits to return (default: 10)
    #[serde(default = "default_log_limit")]
    pub limit: usize,
}

impl Default for CommitLogParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LOG_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ShowDiffParams {
    /// Optional file or directory to restrict the diff to (default: whole repository)
    #[serde(default, alias = "path")]
    pub file_path: Option<String>,
    /// Show staged changes (HEAD vs index) instead of unstaged ones (default: false)
    #[serde(default)]
    pub staged: bool,
}
