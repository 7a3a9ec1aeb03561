use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use crate::channel::Channel;
use crate::codec::BincodeCodec;
use crate::error::{Error, Result};
use crate::transport::{TcpTransport, UnixTransport};
use crate::wire::{InvocationSpec, PeerRequest, PeerResponse};

/// Where a peer listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Tcp(SocketAddr),
    Unix(PathBuf),
}

impl FromStr for Endpoint {
    type Err = Error;

    /// Accepts `tcp://ip:port`, bare `ip:port`, and `unix://path`.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(path) = s.strip_prefix("unix://") {
            if path.is_empty() {
                return Err(Error::Custom(format!("Invalid peer address: {s}")));
            }
            return Ok(Self::Unix(PathBuf::from(path)));
        }

        let addr = s.strip_prefix("tcp://").unwrap_or(s);
        addr.parse()
            .map(Self::Tcp)
            .map_err(|_| Error::Custom(format!("Invalid peer address: {s}")))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp(addr) => write!(f, "tcp://{addr}"),
            Self::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}

/// Persistent request/response handle to one peer.
///
/// A single framed channel serves every caller; concurrent dispatches
/// serialize on it, so the handle is shared by reference across any number
/// of request builders.
pub struct Connection {
    channel: Mutex<Channel<BincodeCodec>>,
    endpoint: Endpoint,
}

impl Connection {
    /// Connect to a peer
    pub async fn connect(endpoint: &Endpoint) -> Result<Self> {
        Self::establish(endpoint, None).await
    }

    /// Connect with a connect timeout
    pub async fn connect_timeout(endpoint: &Endpoint, timeout: Duration) -> Result<Self> {
        Self::establish(endpoint, Some(timeout)).await
    }

    async fn establish(endpoint: &Endpoint, timeout: Option<Duration>) -> Result<Self> {
        let channel = match endpoint {
            Endpoint::Tcp(addr) => {
                let transport = match timeout {
                    Some(limit) => TcpTransport::connect_timeout(*addr, limit).await?,
                    None => TcpTransport::connect(*addr).await?,
                };
                Channel::from_transport(transport, BincodeCodec)
            }
            Endpoint::Unix(path) => {
                let transport = match timeout {
                    Some(limit) => UnixTransport::connect_timeout(path, limit).await?,
                    None => UnixTransport::connect(path).await?,
                };
                Channel::from_transport(transport, BincodeCodec)
            }
        };

        debug!(endpoint = %endpoint, "connected to peer");

        Ok(Self {
            channel: Mutex::new(channel),
            endpoint: endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Issue the state-mutating remote operation.
    pub async fn invoke(&self, spec: &InvocationSpec) -> Result<Vec<u8>> {
        self.call(PeerRequest::Invoke(spec.clone())).await
    }

    /// Issue the read-only remote operation.
    pub async fn query(&self, spec: &InvocationSpec) -> Result<Vec<u8>> {
        self.call(PeerRequest::Query(spec.clone())).await
    }

    async fn call(&self, request: PeerRequest) -> Result<Vec<u8>> {
        let mut channel = self.channel.lock().await;
        channel.send(&request).await?;

        match channel.receive().await? {
            PeerResponse::Success { msg } => Ok(msg),
            PeerResponse::Failure { message } => Err(Error::Remote(message)),
        }
    }
}
