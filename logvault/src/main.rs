//! logvault Server Entry Point

use clap::Parser;
use logvault::cli::{Cli, Commands};
use logvault::config::ServiceConfig;
use logvault::{bootstrap, logging, server};
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let mut config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // サブコマンド無しはserveと同じ扱い
    if let Some(Commands::Serve(args)) = &cli.command {
        args.apply(&mut config);
    }

    let bind_addr = config.bind_addr();
    let state = match bootstrap::initialize(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(state, &bind_addr).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
