use std::sync::Arc;

use clap::Parser;
use svckit_bootstrap::{LoggingConfig, init_logging};
use tokio_tungstenite::Connector;
use ws_client::{SessionConfig, client_config, run_session};

/// Send one text frame over a WebSocket, print the reply and close
#[derive(Parser)]
#[command(name = "ws-client")]
#[command(version)]
struct Cli {
    /// WebSocket endpoint
    #[arg(long, default_value = "wss://127.0.0.1:8000/ws")]
    url: String,

    /// Text frame to send
    #[arg(long, default_value = "hello")]
    message: String,

    /// Verify the server certificate against the OS root store
    #[arg(long)]
    verify_certs: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let tls = client_config(cli.verify_certs)?;
    let config = SessionConfig {
        url: cli.url,
        message: cli.message,
    };

    run_session(&config, Some(Connector::Rustls(Arc::new(tls)))).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::default(), cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "ws-client failed");
        std::process::exit(1);
    }
}
