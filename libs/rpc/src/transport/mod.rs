use crate::error::Result;

pub mod framing;
pub mod tcp;
pub mod unix;

pub use self::framing::MAX_FRAME_SIZE;
pub use self::tcp::{TcpTransport, TcpTransportListener};
pub use self::unix::{UnixTransport, UnixTransportListener};

/// Transport trait for sending and receiving raw byte frames
///
/// Each transport instance represents a single connection to a peer.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send bytes over the transport
    async fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Receive bytes from the transport
    async fn receive(&mut self) -> Result<Vec<u8>>;

    /// Close the transport connection
    async fn close(&mut self) -> Result<()>;
}
