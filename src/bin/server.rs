//! Prolific MCP Server
//!
//! Run with: PROLIFIC_TOKEN=... prolific-mcp-server

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prolific_mcp::config::DEFAULT_BASE_URL;
use prolific_mcp::error::Result;
use prolific_mcp::mcp::{McpServer, ProlificHandler};
use prolific_mcp::{ProlificClient, ProlificConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "prolific-mcp-server")]
#[command(about = "MCP server exposing the Prolific API as tools")]
#[command(version)]
struct Args {
    /// Prolific API token
    #[arg(long, env = "PROLIFIC_TOKEN", hide_env_values = true, default_value = "")]
    token: String,

    /// Prolific API base URL
    #[arg(long, env = "PROLIFIC_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Log output format (logs always go to stderr)
    #[arg(long, env = "PROLIFIC_LOG_FORMAT", value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn init_logging(format: LogFormat) {
    // stdout carries the MCP protocol, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn run(args: Args) -> Result<()> {
    let config = ProlificConfig::new(args.token, Some(args.url.as_str()))?;
    let client = ProlificClient::new(&config)?;
    let handler = ProlificHandler::new(client)?;
    let server = McpServer::new(handler);

    tracing::info!(base_url = %config.base_url(), "Prolific MCP server running on stdio");
    server.run()
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_format);

    if let Err(e) = run(args) {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}
