//! Network operations.

use anyhow::Result;

use crate::config::GlobalConfig;

#[derive(clap::Subcommand, Debug)]
pub enum NetworkCommand {
    /// List the peers this console knows about
    List,
}

pub fn run(command: NetworkCommand, config: &GlobalConfig) -> Result<()> {
    match command {
        NetworkCommand::List => list(config),
    }
}

fn list(config: &GlobalConfig) -> Result<()> {
    println!("{}", config.peer.address);
    for peer in &config.network.peers {
        println!("{peer}");
    }
    Ok(())
}
