//! Tracing setup shared by the MCP server binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `-v` count onto a level for the server's own crate.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for an MCP server.
///
/// Output always goes to stderr: the stdio transport owns stdout.
/// `RUST_LOG` directives are honored on top of `<crate_name>=<level>`, where
/// the level comes from `verbosity` (0 = info, 1 = debug, 2+ = trace).
/// Set `LOG_FORMAT=json` for one JSON object per event.
pub fn init_tracing(crate_name: &str, verbosity: u8) -> anyhow::Result<()> {
    let directive = format!("{}={}", crate_name, level_for(verbosity));
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
