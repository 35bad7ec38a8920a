//! Process configuration
//!
//! Read once at startup. Each setting comes from, in order of priority:
//! 1. Command-line flag
//! 2. Environment variable (a `.env` file in the working directory is loaded first)
//! 3. Default value

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};

/// How the server is exposed to MCP clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Streamable HTTP on host:port under /mcp
    Http,
    /// JSON-RPC over stdin/stdout
    Stdio,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "git-inspect-mcp")]
#[command(about = "Read-only git repository inspection over MCP")]
pub struct Config {
    /// Repository to inspect; parent directories are searched for a repository
    #[arg(long, env = "GIT_REPO_PATH", default_value = ".")]
    pub repo_path: PathBuf,

    /// Host to bind the HTTP transport to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP transport to
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Transport to serve on
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = Transport::Http)]
    pub transport: Transport,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// `.env` file the environment was loaded from, if any
    #[arg(skip)]
    pub dotenv: Option<PathBuf>,
}

impl Config {
    /// Load `.env` if present, then parse flags and environment.
    pub fn load() -> Self {
        let dotenv = dotenvy::dotenv().ok();
        Self {
            dotenv,
            ..Self::parse()
        }
    }

    /// Socket address for the HTTP transport; `host` may be a name such as `localhost`.
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("Invalid bind address {}", addr))?
            .next()
            .with_context(|| format!("Bind address {} did not resolve", addr))
    }
}
