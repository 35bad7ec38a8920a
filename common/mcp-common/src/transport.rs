//! Transports for running an MCP server handler
//!
//! Two ways to expose the same handler: newline-delimited JSON-RPC over
//! stdin/stdout, or MCP streamable HTTP mounted at [`MCP_HTTP_PATH`].

use std::net::SocketAddr;

use rmcp::{
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ServerHandler, ServiceExt,
};

/// Route the streamable HTTP endpoint is mounted under
pub const MCP_HTTP_PATH: &str = "/mcp";

/// Serve `server` over stdio until the peer disconnects.
pub async fn serve_stdio<S>(server: S) -> anyhow::Result<()>
where
    S: ServerHandler,
{
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running on stdio, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}

/// Serve `server` over streamable HTTP on `addr` until Ctrl-C.
///
/// Every MCP session gets its own clone of `server`, so clones must share
/// whatever state the handler reads.
pub async fn serve_http<S>(server: S, addr: SocketAddr) -> anyhow::Result<()>
where
    S: ServerHandler + Clone + Send + Sync + 'static,
{
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let app = axum::Router::new().nest_service(MCP_HTTP_PATH, service);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}{}", addr, MCP_HTTP_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
