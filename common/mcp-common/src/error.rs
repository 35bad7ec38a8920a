//! Mapping domain errors onto MCP protocol errors

use rmcp::ErrorData as McpError;

/// Result of a tool implementation
pub type McpResult<T> = Result<T, McpError>;

/// Conversion into an MCP error.
///
/// Implement this for a server's own error enum to pick the MCP error code
/// per variant, then use [`ResultExt::to_mcp_err`] at the tool boundary.
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for serde_json::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("JSON error: {}", self), None)
    }
}

/// `to_mcp_err()` for any `Result` whose error implements [`IntoMcpError`]
pub trait ResultExt<T> {
    fn to_mcp_err(self) -> McpResult<T>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> McpResult<T> {
        self.map_err(IntoMcpError::into_mcp_error)
    }
}

/// Internal error: the server failed while handling a valid request
pub fn internal_error(message: impl Into<String>) -> McpError {
    let message: String = message.into();
    McpError::internal_error(message, None)
}

/// Invalid params: the arguments themselves are wrong
pub fn invalid_params(message: impl Into<String>) -> McpError {
    let message: String = message.into();
    McpError::invalid_params(message, None)
}

/// Invalid request: the call cannot be served in the server's current state
pub fn invalid_request(message: impl Into<String>) -> McpError {
    let message: String = message.into();
    McpError::invalid_request(message, None)
}
