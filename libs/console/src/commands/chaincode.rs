//! Chaincode invoke and query handlers.
//!
//! This is the layer that turns command-line flags into an `RpcBuilder`
//! call: it assembles the optional security policy, opens the connection,
//! and prints whatever the peer sends back. Errors are reported verbatim.

use anyhow::Result;
use clap::Args;
use subledger_rpc::{Connection, RpcBuilder, ScopeManager, SecurityPolicy};

use crate::config::GlobalConfig;

#[derive(clap::Subcommand, Debug)]
pub enum ChaincodeCommand {
    /// Fire a state-mutating invocation
    Invoke(CallArgs),
    /// Run a read-only query
    Query(CallArgs),
}

/// Arguments shared by invoke and query.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Chaincode name
    #[arg(short = 'n', long)]
    pub name: String,

    /// Function to call; omit to pass positional arguments only
    #[arg(short = 'f', long, default_value = "")]
    pub function: String,

    /// Positional string arguments
    pub args: Vec<String>,

    /// Acting user for peer-side authorization
    #[arg(long)]
    pub user: Option<String>,

    /// Attribute to attach; repeat the flag for several
    #[arg(long = "attribute")]
    pub attributes: Vec<String>,

    /// Opaque metadata forwarded to the chaincode
    #[arg(long)]
    pub metadata: Option<String>,

    /// Alternate request-ID generation algorithm
    #[arg(long)]
    pub id_gen_alg: Option<String>,
}

impl CallArgs {
    /// Bundle the security flags into a policy; `None` when none were given.
    fn security_policy(&self) -> Option<SecurityPolicy> {
        if self.user.is_none()
            && self.attributes.is_empty()
            && self.metadata.is_none()
            && self.id_gen_alg.is_none()
        {
            return None;
        }

        Some(SecurityPolicy {
            user: self.user.clone().unwrap_or_default(),
            attributes: if self.attributes.is_empty() {
                None
            } else {
                Some(self.attributes.clone())
            },
            metadata: self
                .metadata
                .as_ref()
                .map(|m| m.clone().into_bytes())
                .unwrap_or_default(),
            custom_id_gen_alg: self.id_gen_alg.clone().unwrap_or_default(),
        })
    }
}

pub async fn run(command: ChaincodeCommand, config: &GlobalConfig) -> Result<()> {
    match command {
        ChaincodeCommand::Invoke(call) => invoke(&call, config).await,
        ChaincodeCommand::Query(call) => query(&call, config).await,
    }
}

async fn invoke(call: &CallArgs, config: &GlobalConfig) -> Result<()> {
    let (conn, scope) = establish(config).await?;
    let security = call.security_policy();

    let builder = RpcBuilder {
        chaincode_name: call.name.clone(),
        function: call.function.clone(),
        security: security.as_ref(),
        conn: &conn,
        scope: Some(&scope),
    };

    let msg = builder.fire(&call.args).await?;
    println!("{msg}");
    Ok(())
}

async fn query(call: &CallArgs, config: &GlobalConfig) -> Result<()> {
    let (conn, scope) = establish(config).await?;
    let security = call.security_policy();

    let builder = RpcBuilder {
        chaincode_name: call.name.clone(),
        function: call.function.clone(),
        security: security.as_ref(),
        conn: &conn,
        scope: Some(&scope),
    };

    let payload = builder.query(&call.args).await?;
    println!("{}", String::from_utf8_lossy(&payload));
    Ok(())
}

/// Connect to the configured peer and wire Ctrl-C to the connection scope.
async fn establish(config: &GlobalConfig) -> Result<(Connection, ScopeManager)> {
    let endpoint = config.peer.endpoint()?;
    let conn = Connection::connect_timeout(&endpoint, config.peer.connect_timeout()).await?;

    let scope = ScopeManager::new();
    let trigger = scope.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    Ok((conn, scope))
}
