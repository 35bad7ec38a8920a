//! In-process tool invocation
//!
//! [`EmbeddableMcp`] lets a host (or a test) call a server's tools by name
//! with JSON arguments, without a transport in between. Servers built on
//! `#[tool_router]` implement it by listing their `ToolRouter` and matching
//! tool names onto the typed handlers.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error from an in-process tool call
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// No tool is registered under this name
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not match the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The tool ran and reported an MCP error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// An MCP server whose tools can be called directly.
///
/// Implementations must be `Send + Sync`: hosts may issue concurrent calls
/// from several tasks.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Name used to identify the server in MCP configuration
    fn server_name(&self) -> &str;

    /// Every registered tool with its name, description and input schema
    fn list_tools(&self) -> Vec<Tool>;

    /// Run the tool `name` with `params` (a JSON object).
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoServer;

    #[async_trait]
    impl EmbeddableMcp for EchoServer {
        fn server_name(&self) -> &str {
            "echo"
        }

        fn list_tools(&self) -> Vec<Tool> {
            vec![]
        }

        async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
            match name {
                "echo" => {
                    let text: String = serde_json::from_value(params)?;
                    Ok(crate::text_success(text))
                }
                _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
            }
        }
    }

    #[test]
    fn test_default_description() {
        assert_eq!(EchoServer.server_name(), "echo");
        assert!(EchoServer.server_description().is_none());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = EchoServer.call_tool("missing", serde_json::json!({})).await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(name)) if name == "missing"));
    }

    #[tokio::test]
    async fn test_bad_params() {
        let result = EchoServer.call_tool("echo", serde_json::json!(42)).await;
        assert!(matches!(result, Err(EmbeddableError::InvalidParams(_))));
    }

    #[test]
    fn test_from_error_data_keeps_message() {
        let err: EmbeddableError = rmcp::ErrorData::invalid_request("no repo", None).into();
        assert_eq!(err.to_string(), "mcp error: no repo");
    }
}
