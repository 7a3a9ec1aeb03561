//! Version subcommand.

use anyhow::Result;

/// Print the console version.
pub fn run() -> Result<()> {
    println!("subledger {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
