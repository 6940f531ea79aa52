//! Scripted single-connection IRC server over TLS.

use slirc_wire::{Command, Message, Transport};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;

/// How the server answers `WHOIS`.
#[derive(Clone, Debug)]
pub enum WhoisReply {
    User { host: String },
    NoSuchNick,
    /// Never answer, leaving the probe to its watchdog.
    Silent,
}

#[derive(Clone, Debug)]
pub struct Script {
    pub whois: WhoisReply,
    /// Text of the `242 RPL_STATSUPTIME` reply.
    pub uptime: String,
    /// Raw lines written straight after `001`, bypassing the codec.
    pub noise: Vec<Vec<u8>>,
}

impl Script {
    pub fn user_at(host: &str, uptime: &str) -> Self {
        Self {
            whois: WhoisReply::User {
                host: host.to_string(),
            },
            uptime: uptime.to_string(),
            noise: Vec::new(),
        }
    }

    pub fn with_noise(mut self, raw: &[u8]) -> Self {
        self.noise.push(raw.to_vec());
        self
    }
}

pub struct FakeServer {
    pub port: u16,
    handle: JoinHandle<anyhow::Result<Vec<Message>>>,
}

impl FakeServer {
    /// Listen on an ephemeral loopback port and serve one connection.
    pub async fn start(acceptor: TlsAcceptor, script: Script) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let handle = tokio::spawn(serve(listener, acceptor, script));
        Ok(Self { port, handle })
    }

    /// Wait for the connection to end and return what the client sent.
    pub async fn received(self) -> anyhow::Result<Vec<Message>> {
        self.handle.await?
    }
}

fn line(raw: &str) -> anyhow::Result<Message> {
    Ok(raw.parse()?)
}

async fn serve(
    listener: TcpListener,
    acceptor: TlsAcceptor,
    script: Script,
) -> anyhow::Result<Vec<Message>> {
    let (tcp, _) = listener.accept().await?;
    let Ok(stream) = acceptor.accept(tcp).await else {
        // Client rejected our certificate.
        return Ok(Vec::new());
    };
    let mut transport = Transport::tls(stream);
    let mut received = Vec::new();

    transport.write_message(&line("PING :irc.test")?).await?;
    let mut ponged = false;
    let mut nick = None;
    let mut registered = false;

    // The client may hang up right after QUIT.
    while let Ok(Some(msg)) = transport.read_message().await {
        received.push(msg.clone());

        let mut replies = Vec::new();
        let mut welcomed = false;
        match msg.command {
            Command::PONG(ref token, _) if token == "irc.test" => ponged = true,
            Command::NICK(ref n) => nick = Some(n.clone()),
            Command::WHOIS(_, ref target) => match script.whois {
                WhoisReply::User { ref host } => replies.push(line(&format!(
                    ":irc.test 311 checker {target} ~{target} {host} * :{target}"
                ))?),
                WhoisReply::NoSuchNick => replies.push(line(&format!(
                    ":irc.test 401 checker {target} :No such nick/channel"
                ))?),
                WhoisReply::Silent => {}
            },
            Command::STATS(Some(ref query), _) if query == "u" => {
                replies.push(line(&format!(":irc.test 242 checker :{}", script.uptime))?);
                replies.push(line(":irc.test 219 checker u :End of /STATS report")?);
            }
            Command::QUIT(_) => break,
            _ => {}
        }

        if !registered
            && ponged
            && let Some(ref n) = nick
            && received.iter().any(|m| matches!(m.command, Command::USER(..)))
        {
            registered = true;
            welcomed = true;
            replies.push(line(&format!(":irc.test 001 {n} :Welcome to the test network"))?);
        }

        for reply in replies {
            if transport.write_message(&reply).await.is_err() {
                return Ok(received);
            }
        }

        if welcomed
            && !script.noise.is_empty()
            && let Transport::Tls { framed } = &mut transport
        {
            let stream = framed.get_mut();
            for raw in &script.noise {
                if stream.write_all(raw).await.is_err() {
                    return Ok(received);
                }
            }
            if stream.flush().await.is_err() {
                return Ok(received);
            }
        }
    }

    let _ = transport.close().await;
    Ok(received)
}
