use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use svckit_bootstrap::{init_logging, load_layered, shutdown_token, to_pretty_json};
use user_gateway::GatewayConfig;
use user_gateway::config::ENV_PREFIX;

/// User gateway - HTTP front for the user service
#[derive(Parser)]
#[command(name = "user-gateway")]
#[command(about = "User gateway - HTTP front for the user service")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// User service URI override, e.g. http://127.0.0.1:50051
    #[arg(long)]
    user_service: Option<String>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML -> 3) env (USER_GATEWAY__*) -> 4) CLI overrides
    let mut config = load_layered(&GatewayConfig::default(), cli.config.as_deref(), ENV_PREFIX)?;
    config.apply_cli_overrides(cli.port, cli.user_service);

    init_logging(&config.logging, cli.verbose);

    if cli.print_config {
        println!("Effective configuration:\n{}", to_pretty_json(&config)?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let cancel = shutdown_token();
            user_gateway::module::run(&config, cancel).await
        }
        Commands::Check => {
            tracing::info!(listen_addr = %config.listen_addr, "configuration is valid");
            println!("Configuration is valid");
            Ok(())
        }
    }
}
