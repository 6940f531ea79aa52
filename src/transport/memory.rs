use std::io;

use async_trait::async_trait;
use slirc_wire::{Message, ProtocolError};
use tokio::sync::mpsc;

use super::IrcTransport;

type Inbound = Result<Message, ProtocolError>;

/// In-process transport whose other end is a [`MemoryPeer`].
///
/// Useful for embedding the probe behind a custom connection, and for
/// exercising the session without a socket.
pub struct MemoryTransport {
    incoming: mpsc::UnboundedReceiver<Inbound>,
    outgoing: Option<mpsc::UnboundedSender<Message>>,
}

/// The server side of a [`MemoryTransport`].
pub struct MemoryPeer {
    to_probe: Option<mpsc::UnboundedSender<Inbound>>,
    from_probe: mpsc::UnboundedReceiver<Message>,
}

impl MemoryTransport {
    /// Create a connected transport/peer pair.
    pub fn pair() -> (MemoryTransport, MemoryPeer) {
        let (to_probe, incoming) = mpsc::unbounded_channel();
        let (outgoing, from_probe) = mpsc::unbounded_channel();
        (
            MemoryTransport {
                incoming,
                outgoing: Some(outgoing),
            },
            MemoryPeer {
                to_probe: Some(to_probe),
                from_probe,
            },
        )
    }
}

#[async_trait]
impl IrcTransport for MemoryTransport {
    async fn send(&mut self, msg: &Message) -> Result<(), ProtocolError> {
        let outgoing = self.outgoing.as_ref().ok_or_else(|| {
            ProtocolError::Io(io::Error::new(io::ErrorKind::NotConnected, "transport closed"))
        })?;
        outgoing.send(msg.clone()).map_err(|_| {
            ProtocolError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"))
        })
    }

    async fn recv(&mut self) -> Result<Option<Message>, ProtocolError> {
        match self.incoming.recv().await {
            Some(Ok(msg)) => Ok(Some(msg)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<(), ProtocolError> {
        self.outgoing = None;
        self.incoming.close();
        Ok(())
    }
}

impl MemoryPeer {
    /// Deliver a message to the probe. Returns `false` once the probe closed.
    pub fn send(&self, msg: Message) -> bool {
        self.to_probe
            .as_ref()
            .is_some_and(|tx| tx.send(Ok(msg)).is_ok())
    }

    /// Parse a raw line and deliver it to the probe.
    pub fn send_line(&self, line: &str) -> Result<bool, ProtocolError> {
        Ok(self.send(line.parse()?))
    }

    /// Make the probe's next receive fail with `err`.
    pub fn fail(&self, err: io::Error) -> bool {
        self.to_probe
            .as_ref()
            .is_some_and(|tx| tx.send(Err(ProtocolError::Io(err))).is_ok())
    }

    /// End the probe's inbound stream, as a server closing the socket would.
    pub fn hang_up(&mut self) {
        self.to_probe = None;
    }

    /// Next message the probe sent. `None` once the probe has closed and
    /// everything it sent has been read.
    pub async fn recv(&mut self) -> Option<Message> {
        self.from_probe.recv().await
    }

    /// Drain what the probe has sent so far without waiting.
    pub fn drain(&mut self) -> Vec<Message> {
        let mut sent = Vec::new();
        while let Ok(msg) = self.from_probe.try_recv() {
            sent.push(msg);
        }
        sent
    }
}
