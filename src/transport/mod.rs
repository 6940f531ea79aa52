//! IRC transports the probe can run over.
//!
//! - [`TlsTransport`]: TCP dial plus rustls client handshake (production)
//! - [`MemoryTransport`]: in-process queue pair driven by a [`MemoryPeer`]
//!
//! Both exchange parsed [`Message`]s; the session never sees raw bytes.

mod memory;
mod tls;

pub use memory::{MemoryPeer, MemoryTransport};
pub use tls::TlsTransport;

use async_trait::async_trait;
use slirc_wire::{Message, ProtocolError};

/// A bidirectional IRC message channel.
#[async_trait]
pub trait IrcTransport: Send {
    /// Send one message, flushing it to the peer.
    async fn send(&mut self, msg: &Message) -> Result<(), ProtocolError>;

    /// Receive the next message. `Ok(None)` means the peer closed the stream.
    async fn recv(&mut self) -> Result<Option<Message>, ProtocolError>;

    /// Shut the connection down. Calling this twice is harmless.
    async fn close(&mut self) -> Result<(), ProtocolError>;
}
