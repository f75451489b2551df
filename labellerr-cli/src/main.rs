//! Labellerr CLI
//!
//! Command-line interface for the Labellerr data-labeling platform.

mod commands;
mod config;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "labellerr")]
#[command(about = "Labellerr data-labeling platform CLI", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(
        long,
        global = true,
        env = "LABELLERR_BASE_URL",
        default_value = labellerr_client::config::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// API key
    #[arg(long, global = true, env = "LABELLERR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API secret
    #[arg(long, global = true, env = "LABELLERR_API_SECRET", hide_env_values = true)]
    api_secret: Option<String>,

    /// Workspace (client) ID
    #[arg(long, global = true, env = "LABELLERR_CLIENT_ID")]
    client_id: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "LABELLERR_REQUEST_TIMEOUT", default_value_t = 60)]
    request_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labellerr=info,labellerr_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        base_url: cli.base_url,
        api_key: cli.api_key,
        api_secret: cli.api_secret,
        client_id: cli.client_id,
        request_timeout: cli.request_timeout,
    };

    handle_command(cli.command, &config).await
}
