//! Git Inspect MCP - read-only git repository inspection server
//!
//! # Usage
//!
//! `git-inspect-mcp --repo-path ~/src/project` serves streamable HTTP on
//! `127.0.0.1:8000/mcp`. `--transport stdio` serves over stdin/stdout instead:
//! ```json
//! { "mcpServers": { "git": { "command": "./git-inspect-mcp", "args": ["--transport", "stdio"] } } }
//! ```

use git_inspect_mcp::config::{Config, Transport};
use git_inspect_mcp::{GitInspectServer, ServiceState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();

    mcp_common::init_tracing("git_inspect_mcp", config.verbose)?;

    if let Some(path) = &config.dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    tracing::info!("Starting Git Inspect MCP server");

    let state = ServiceState::initialize(&config.repo_path);
    match state.repository() {
        Ok(repo) => tracing::info!("Git repository initialized at: {}", repo.root().display()),
        Err(e) => tracing::warn!("{}; every tool call will fail until restart", e),
    }

    let server = GitInspectServer::new(state);

    match config.transport {
        Transport::Http => mcp_common::serve_http(server, config.bind_addr()?).await?,
        Transport::Stdio => mcp_common::serve_stdio(server).await?,
    }

    tracing::info!("Git Inspect MCP server stopped");

    Ok(())
}
