//! Semantic Scholar MCP entry point.
//!
//! Parses the command line, initializes logging on stderr and dispatches to
//! `serve` or `tools`.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use semantic_scholar_mcp::cli::Cli;
use semantic_scholar_mcp::core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let config = Config::from_env();

    let level = if cli.debug() {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logging(level);

    cli.run(config).await?;

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs always go to stderr: stdout carries MCP frames or tool output.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
