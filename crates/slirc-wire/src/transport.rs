//! Framed IRC transport over TCP and TLS.
//!
//! [`Transport`] wraps a connected stream in [`IrcCodec`] and exchanges
//! owned [`Message`] values. Client-side TLS is what a probe uses; the
//! plain and server-side variants exist so tests can stand up a peer.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream as ClientTlsStream;
use tokio_rustls::server::TlsStream as ServerTlsStream;
use tokio_util::codec::Framed;
use tracing::trace;

use crate::error::ProtocolError;
use crate::irc::IrcCodec;
use crate::Message;

/// Maximum IRC line length (8191 bytes as per modern IRC conventions).
pub const MAX_IRC_LINE_LEN: usize = 8191;

/// IRC transport over the supported stream types.
#[allow(clippy::large_enum_variant)]
#[non_exhaustive]
pub enum Transport {
    /// Plain TCP transport.
    Tcp {
        /// The framed codec for TCP.
        framed: Framed<TcpStream, IrcCodec>,
    },
    /// Server-side TLS-encrypted transport.
    Tls {
        /// The framed codec for server-side TLS.
        framed: Framed<ServerTlsStream<TcpStream>, IrcCodec>,
    },
    /// Client-side TLS-encrypted transport.
    ///
    /// Use this for clients connecting to TLS-enabled servers.
    ClientTls {
        /// The framed codec for client-side TLS.
        framed: Framed<ClientTlsStream<TcpStream>, IrcCodec>,
    },
}

impl Transport {
    /// Create a new TCP transport from a connected stream.
    pub fn tcp(stream: TcpStream) -> Self {
        Self::Tcp {
            framed: Framed::new(stream, IrcCodec::new()),
        }
    }

    /// Create a new server-side TLS transport from an accepted TLS stream.
    pub fn tls(stream: ServerTlsStream<TcpStream>) -> Self {
        Self::Tls {
            framed: Framed::new(stream, IrcCodec::new()),
        }
    }

    /// Create a new client-side TLS transport from an established TLS stream.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use slirc_wire::Transport;
    ///
    /// let tcp_stream = TcpStream::connect("irc.example.com:6697").await?;
    /// let tls_stream = connector.connect(server_name, tcp_stream).await?;
    /// let transport = Transport::client_tls(tls_stream);
    /// ```
    pub fn client_tls(stream: ClientTlsStream<TcpStream>) -> Self {
        Self::ClientTls {
            framed: Framed::new(stream, IrcCodec::new()),
        }
    }

    /// Read the next IRC message from the transport.
    ///
    /// Returns `Ok(None)` when the connection is closed.
    pub async fn read_message(&mut self) -> Result<Option<Message>, ProtocolError> {
        macro_rules! read_framed {
            ($framed:expr) => {
                match $framed.next().await {
                    Some(Ok(msg)) => Ok(Some(msg)),
                    Some(Err(e)) => Err(e),
                    None => Ok(None),
                }
            };
        }

        let result = match self {
            Transport::Tcp { framed } => read_framed!(framed),
            Transport::Tls { framed } => read_framed!(framed),
            Transport::ClientTls { framed } => read_framed!(framed),
        };

        if let Ok(Some(ref msg)) = result {
            let line = msg.to_string();
            trace!(line = %line.trim_end(), "<<");
        }
        result
    }

    /// Write an IRC message to the transport and flush it.
    pub async fn write_message(&mut self, message: &Message) -> Result<(), ProtocolError> {
        let line = message.to_string();
        trace!(line = %line.trim_end(), ">>");

        match self {
            Transport::Tcp { framed } => framed.send(message.clone()).await,
            Transport::Tls { framed } => framed.send(message.clone()).await,
            Transport::ClientTls { framed } => framed.send(message.clone()).await,
        }
    }

    /// Flush pending output and shut the stream down.
    ///
    /// For TLS this sends `close_notify` before the TCP shutdown.
    pub async fn close(&mut self) -> Result<(), ProtocolError> {
        match self {
            Transport::Tcp { framed } => framed.close().await,
            Transport::Tls { framed } => framed.close().await,
            Transport::ClientTls { framed } => framed.close().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Command, Response};
    use tokio::net::TcpListener;

    async fn tcp_pair() -> (Transport, Transport) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (client, accepted) =
            tokio::join!(TcpStream::connect(addr), listener.accept());
        (
            Transport::tcp(client.unwrap()),
            Transport::tcp(accepted.unwrap().0),
        )
    }

    #[tokio::test]
    async fn test_exchange_over_tcp() {
        let (mut client, mut server) = tcp_pair().await;

        client.write_message(&Message::whois("doug")).await.unwrap();
        let got = server.read_message().await.unwrap().unwrap();
        assert_eq!(got.command, Command::WHOIS(None, "doug".into()));

        let reply: Message = ":irc.test 242 checker :Server up 3 days, 01:02:03"
            .parse()
            .unwrap();
        server.write_message(&reply).await.unwrap();
        let got = client.read_message().await.unwrap().unwrap();
        assert!(matches!(
            got.command,
            Command::Response(Response::RPL_STATSUPTIME, _)
        ));
        assert_eq!(got.param(1), Some("Server up 3 days, 01:02:03"));
    }

    #[tokio::test]
    async fn test_close_yields_end_of_stream() {
        let (mut client, mut server) = tcp_pair().await;

        client.write_message(&Message::quit()).await.unwrap();
        client.close().await.unwrap();

        let got = server.read_message().await.unwrap().unwrap();
        assert_eq!(got.command, Command::QUIT(None));
        assert!(server.read_message().await.unwrap().is_none());
    }
}
