//! tgrelay: run one Telegram bridge leg. Config from env (.env loaded) and optional CLI flags.

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use relay_cli::{run_bridge, BridgeConfig, Cli, Commands};
use relay_core::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, chat_id } => {
            let config = BridgeConfig::load(token, chat_id)?;
            init_tracing(Some(Path::new(&config.log_file)))?;
            run_bridge(config).await
        }
    }
}
