use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::scope::ScopeManager;
use crate::security::SecurityPolicy;
use crate::wire::InvocationSpec;

/// Assembles chaincode requests and dispatches them over one connection.
///
/// Construct once per call site and reuse freely: every dispatch assembles a
/// fresh request and derives a fresh scope, so nothing is mutated between
/// calls and concurrent dispatches from the same builder are fine.
pub struct RpcBuilder<'a> {
    /// Target chaincode; must be non-empty.
    pub chaincode_name: String,
    /// Function to invoke; empty means the arguments are fully positional.
    pub function: String,
    pub security: Option<&'a SecurityPolicy>,
    pub conn: &'a Connection,
    /// Bounds calls to the connection's lifetime. Without one, each call
    /// runs under its own root scope and only the transport can end it.
    pub scope: Option<&'a ScopeManager>,
}

impl RpcBuilder<'_> {
    fn prepare(&self, args: &[String]) -> InvocationSpec {
        InvocationSpec::build(&self.chaincode_name, &self.function, self.security, args)
    }

    fn call_scope(&self) -> CancellationToken {
        match self.scope {
            Some(manager) => manager.child_scope(),
            None => CancellationToken::new(),
        }
    }

    /// Run one remote call under a freshly derived scope.
    ///
    /// The scope's own trigger stays here: individual calls cannot be
    /// cancelled from outside, only the whole connection scope can.
    async fn dispatch<F>(&self, call: F) -> Result<Vec<u8>>
    where
        F: Future<Output = Result<Vec<u8>>>,
    {
        let scope = self.call_scope();
        if scope.is_cancelled() {
            return Err(Error::Cancelled);
        }

        tokio::select! {
            _ = scope.cancelled() => Err(Error::Cancelled),
            result = call => result,
        }
    }

    /// Fire a state-mutating invocation; returns the peer's message as text.
    ///
    /// Transport and peer failures come back unmodified; there is no retry.
    pub async fn fire(&self, args: &[String]) -> Result<String> {
        let spec = self.prepare(args);
        debug!(chaincode = %self.chaincode_name, function = %self.function, "fire");

        let msg = self.dispatch(self.conn.invoke(&spec)).await?;
        Ok(String::from_utf8_lossy(&msg).into_owned())
    }

    /// Run a read-only query; returns the peer's payload as raw bytes.
    ///
    /// Transport and peer failures come back unmodified; there is no retry.
    pub async fn query(&self, args: &[String]) -> Result<Vec<u8>> {
        let spec = self.prepare(args);
        debug!(chaincode = %self.chaincode_name, function = %self.function, "query");

        self.dispatch(self.conn.query(&spec)).await
    }
}
