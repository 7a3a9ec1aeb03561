//! subledger - chaincode console for a remote ledger peer
//!
//! Thin CLI over `subledger-rpc`: connects to a configured peer and exposes
//! the version/node/network/chaincode command tree.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::GlobalConfig;

/// subledger - chaincode console for a remote ledger peer
#[derive(Parser, Debug)]
#[command(name = "subledger")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the peer configuration file
    #[arg(short, long, default_value = "peer.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Peer node operations
    Node {
        #[command(subcommand)]
        command: commands::node::NodeCommand,
    },

    /// Network operations
    Network {
        #[command(subcommand)]
        command: commands::network::NetworkCommand,
    },

    /// Invoke or query chaincode on the peer
    Chaincode {
        #[command(subcommand)]
        command: commands::chaincode::ChaincodeCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GlobalConfig::load(&cli.config)?;
    tracing::debug!(path = %cli.config.display(), peer = %config.peer.address, "configuration loaded");

    match cli.command {
        Commands::Version => commands::version::run(),
        Commands::Node { command } => commands::node::run(command, &config).await,
        Commands::Network { command } => commands::network::run(command, &config),
        Commands::Chaincode { command } => commands::chaincode::run(command, &config).await,
    }
}
