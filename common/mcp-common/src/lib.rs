//! MCP Common - Shared plumbing for MCP servers
//!
//! - **Initialization**: [`init_tracing`] routes logs to stderr
//! - **Transports**: [`serve_stdio`] and [`serve_http`] run a server handler
//! - **Results**: helpers for building `CallToolResult` responses
//! - **Errors**: [`IntoMcpError`] for mapping domain errors onto MCP errors
//! - **Embeddable**: [`EmbeddableMcp`] for calling tools in-process
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{init_tracing, serve_http};
//!
//! init_tracing("git_inspect_mcp", 0)?;
//! serve_http(server, "127.0.0.1:8000".parse()?).await?;
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;
pub mod transport;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params, invalid_request, IntoMcpError, McpResult, ResultExt};
pub use init::init_tracing;
pub use result::{json_success, text_success};
pub use transport::{serve_http, serve_stdio, MCP_HTTP_PATH};

pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

pub use async_trait::async_trait;
