//! Peer node operations.

use anyhow::{Context, Result};
use subledger_rpc::Connection;

use crate::config::GlobalConfig;

#[derive(clap::Subcommand, Debug)]
pub enum NodeCommand {
    /// Check that the configured peer accepts connections
    Status,
}

pub async fn run(command: NodeCommand, config: &GlobalConfig) -> Result<()> {
    match command {
        NodeCommand::Status => status(config).await,
    }
}

async fn status(config: &GlobalConfig) -> Result<()> {
    let endpoint = config.peer.endpoint()?;

    Connection::connect_timeout(&endpoint, config.peer.connect_timeout())
        .await
        .with_context(|| format!("peer at {endpoint} is not reachable"))?;

    println!("peer at {endpoint} is up");
    Ok(())
}
