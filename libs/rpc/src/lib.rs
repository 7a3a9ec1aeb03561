//! Subledger RPC - chaincode request building and dispatch
//!
//! Turns a function name and a list of string arguments into a chaincode
//! invocation request, optionally stamped with a caller-owned security
//! policy, and dispatches it to a peer over a framed transport, either as
//! a state-mutating `fire` or a read-only `query`. A [`ScopeManager`] bounds
//! every request issued over one connection with a single cancellation
//! trigger.
//!
//! # Example
//!
//! ```no_run
//! use subledger_rpc::{Connection, Endpoint, RpcBuilder, ScopeManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoint: Endpoint = "tcp://127.0.0.1:7051".parse()?;
//! let conn = Connection::connect(&endpoint).await?;
//! let scope = ScopeManager::new();
//!
//! let builder = RpcBuilder {
//!     chaincode_name: "ledger".to_string(),
//!     function: "transfer".to_string(),
//!     security: None,
//!     conn: &conn,
//!     scope: Some(&scope),
//! };
//!
//! let msg = builder.fire(&["alice".into(), "bob".into(), "10".into()]).await?;
//! println!("{msg}");
//!
//! // Tearing down the connection releases every in-flight call.
//! scope.cancel();
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod channel;
pub mod codec;
pub mod connection;
pub mod error;
pub mod scope;
pub mod security;
pub mod transport;
pub mod wire;

// Re-exports for convenience
pub use builder::RpcBuilder;
pub use channel::Channel;
pub use connection::{Connection, Endpoint};
pub use error::{Error, Result};
pub use scope::ScopeManager;
pub use security::SecurityPolicy;
