//! MCP Server implementation for git repository inspection

use std::sync::Arc;

use mcp_common::{
    async_trait, invalid_params, invalid_request, internal_error, json_success, text_success,
    EmbeddableError, EmbeddableMcp, EmbeddableResult, IntoMcpError, McpError, McpResult,
    ResultExt,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::params::{CommitLogParams, ShowDiffParams};
use crate::repository::GitRepository;
use crate::state::ServiceState;
use crate::types::GitError;

const INSTRUCTIONS: &str = "Read-only git inspection server. Lists branches, reports the \
     current branch, working tree status, recent commits and diffs for the repository it \
     was started against.";

/// The Git inspection MCP server
#[derive(Clone)]
pub struct GitInspectServer {
    state: Arc<ServiceState>,
    tool_router: ToolRouter<Self>,
}

impl IntoMcpError for GitError {
    fn into_mcp_error(self) -> McpError {
        match &self {
            GitError::PathNotFound(_) | GitError::InvalidRepository(_) => {
                invalid_params(self.to_string())
            }
            GitError::RepositoryUnavailable(_) | GitError::DetachedOrNoHead => {
                invalid_request(self.to_string())
            }
            GitError::Git(_) => internal_error(self.to_string()),
        }
    }
}

impl GitInspectServer {
    /// Build the server around state resolved at startup.
    pub fn new(state: ServiceState) -> Self {
        Self {
            state: Arc::new(state),
            tool_router: Self::tool_router(),
        }
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    /// Checked on every call: no retry once startup failed.
    fn repository(&self) -> McpResult<&GitRepository> {
        self.state.repository().to_mcp_err()
    }
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl GitInspectServer {
    #[tool(description = "Lists all local branches in the git repository.")]
    async fn list_branches(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!("list_branches");
        let branches = self.repository()?.list_branches().to_mcp_err()?;
        json_success(&branches)
    }

    #[tool(description = "Gets the name of the current active branch in the git repository.")]
    async fn get_current_branch(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!("get_current_branch");
        let branch = self.repository()?.current_branch().to_mcp_err()?;
        Ok(text_success(branch))
    }

    #[tool(description = "Gets the status of the git repository. Equivalent to running 'git status'.")]
    async fn get_status(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!("get_status");
        let status = self.repository()?.status().to_mcp_err()?;
        Ok(text_success(status))
    }

    #[tool(
        description = "Retrieves a log of the most recent commits from the repository, newest first. \
                       Each commit has sha (7 characters), author, date (ISO-8601) and the first line of its message."
    )]
    async fn get_commit_log(
        &self,
        Parameters(params): Parameters<CommitLogParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(limit = params.limit, "get_commit_log");
        let commits = self.repository()?.commit_log(params.limit).to_mcp_err()?;
        json_success(&commits)
    }

    #[tool(
        description = "Shows the git diff. Without file_path the whole repository is diffed. \
                       staged=true shows changes in the index, otherwise unstaged working tree changes. \
                       An empty result means there are no differences."
    )]
    async fn show_diff(
        &self,
        Parameters(params): Parameters<ShowDiffParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(file_path = ?params.file_path, staged = params.staged, "show_diff");
        let diff = self
            .repository()?
            .show_diff(params.file_path.as_deref(), params.staged)
            .to_mcp_err()?;
        Ok(text_success(diff))
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for GitInspectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for GitInspectServer {
    fn server_name(&self) -> &str {
        "git-inspect"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "list_branches" => self.list_branches().await.map_err(Into::into),

            "get_current_branch" => self.get_current_branch().await.map_err(Into::into),

            "get_status" => self.get_status().await.map_err(Into::into),

            "get_commit_log" => {
                let params: CommitLogParams = serde_json::from_value(params)?;
                self.get_commit_log(Parameters(params)).await.map_err(Into::into)
            }

            "show_diff" => {
                let params: ShowDiffParams = serde_json::from_value(params)?;
                self.show_diff(Parameters(params)).await.map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
