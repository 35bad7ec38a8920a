//! Git Inspect MCP Library
//!
//! Read-only inspection of a single local git repository using libgit2:
//! branches, the current branch, status, commit log and diffs.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use git_inspect_mcp::{GitInspectServer, ServiceState};
//! use mcp_common::EmbeddableMcp;
//!
//! let server = GitInspectServer::new(ServiceState::initialize("."));
//! let log = server.call_tool("get_commit_log", serde_json::json!({ "limit": 3 })).await?;
//! ```
//!
//! The repository is bound once at startup. If that fails the server still
//! runs and every tool call reports the startup error.

pub mod config;
pub mod params;
pub mod repository;
pub mod server;
pub mod state;
pub mod types;

// Re-export main server type
pub use server::GitInspectServer;
pub use state::ServiceState;

// Re-export parameter and response types for direct API usage
pub use params::*;
pub use repository::GitRepository;
pub use types::{Commit, GitError, GitResult};

// Re-export EmbeddableMcp trait for in-process usage
pub use mcp_common::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
