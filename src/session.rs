//! Protocol housekeeping around the check machine.
//!
//! The session registers the probe, answers PING, copes with a nickname
//! collision, and turns server replies into [`InboundMessage`]s for the
//! [`CheckMachine`]. Connection loss, receive failures and send failures are
//! fed to the machine as [`InboundMessage::TransportError`].

use slirc_wire::{Command, Message, Response};
use tracing::{debug, warn};

use crate::check::{CheckMachine, InboundMessage, OutboundCommand};
use crate::config::ClientConfig;
use crate::transport::IrcTransport;

/// Nickname retries (each appends `_`) before registration is abandoned.
pub const MAX_NICK_ATTEMPTS: usize = 3;

/// Map a server message to the event the machine cares about, if any.
pub fn classify(msg: &Message) -> Option<InboundMessage> {
    let (resp, args) = match &msg.command {
        Command::ERROR(reason) => {
            return Some(InboundMessage::TransportError {
                err: format!("server closed link: {}", reason),
            });
        }
        Command::Response(resp, args) => (*resp, args),
        _ => return None,
    };

    match resp {
        Response::RPL_WELCOME => Some(InboundMessage::Welcome),
        Response::RPL_WHOISUSER => Some(match (args.get(1), args.get(3)) {
            (Some(nick), Some(hostname)) => InboundMessage::WhoisUserReply {
                nick: nick.clone(),
                hostname: hostname.clone(),
            },
            _ => InboundMessage::TransportError {
                err: format!("malformed {} reply: {}", resp, args.join(" ")),
            },
        }),
        Response::RPL_STATSUPTIME => args
            .get(1)
            .or(args.last())
            .map(|text| InboundMessage::StatsUptimeReply { text: text.clone() }),
        Response::ERR_NOSUCHNICK => args
            .get(1)
            .map(|nick| InboundMessage::NoSuchNick { nick: nick.clone() }),
        _ => None,
    }
}

impl From<&OutboundCommand> for Message {
    fn from(cmd: &OutboundCommand) -> Message {
        match cmd {
            OutboundCommand::Whois(nick) => Message::whois(nick.as_str()),
            OutboundCommand::StatsUptime => Message::stats("u"),
            OutboundCommand::Quit => Message::quit(),
        }
    }
}

/// Per-connection protocol state.
#[derive(Debug)]
pub struct Session<'a> {
    client: &'a ClientConfig,
    nickname: String,
    nick_attempts: usize,
    registered: bool,
    quit_sent: bool,
}

impl<'a> Session<'a> {
    pub fn new(client: &'a ClientConfig) -> Self {
        Self {
            client,
            nickname: client.nickname.clone(),
            nick_attempts: 0,
            registered: false,
            quit_sent: false,
        }
    }

    /// The nickname currently being registered.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Whether a QUIT send has finished, delivered or not.
    pub fn quit_sent(&self) -> bool {
        self.quit_sent
    }

    /// Register and pump messages until the machine reaches a verdict.
    pub async fn drive<T>(&mut self, transport: &mut T, machine: &mut CheckMachine)
    where
        T: IrcTransport + ?Sized,
    {
        let registration = [
            Message::nick(self.nickname.as_str()),
            Message::user(self.client.username.as_str(), self.client.realname.as_str()),
        ];
        for msg in registration {
            if machine.is_terminal() {
                return;
            }
            self.send(transport, machine, msg).await;
        }

        while !machine.is_terminal() {
            let err = match transport.recv().await {
                Ok(Some(msg)) => {
                    if let Some(reply) = self.react(&msg, machine) {
                        self.send(transport, machine, reply).await;
                    }
                    continue;
                }
                Ok(None) => "connection closed by server".to_string(),
                Err(e) => e.to_string(),
            };

            debug!(error = %err, "receive failed");
            if let Some(cmd) = machine.feed(InboundMessage::TransportError { err }) {
                self.send(transport, machine, Message::from(&cmd)).await;
            }
        }
    }

    /// Handle one server message, returning what to send in response.
    pub fn react(&mut self, msg: &Message, machine: &mut CheckMachine) -> Option<Message> {
        match &msg.command {
            Command::PING(token, _) => return Some(Message::pong(token.as_str())),
            Command::Response(Response::ERR_NICKNAMEINUSE, _) if !self.registered => {
                return self.next_nickname(machine);
            }
            _ => {}
        }

        let event = classify(msg)?;
        if event == InboundMessage::Welcome {
            self.registered = true;
        }
        machine.feed(event).map(|cmd| Message::from(&cmd))
    }

    fn next_nickname(&mut self, machine: &mut CheckMachine) -> Option<Message> {
        if self.nick_attempts >= MAX_NICK_ATTEMPTS {
            let err = format!("nickname {} is already in use", self.nickname);
            return machine
                .feed(InboundMessage::TransportError { err })
                .map(|cmd| Message::from(&cmd));
        }

        self.nick_attempts += 1;
        self.nickname.push('_');
        debug!(nickname = %self.nickname, attempt = self.nick_attempts, "nickname in use, retrying");
        Some(Message::nick(self.nickname.as_str()))
    }

    async fn send<T>(&mut self, transport: &mut T, machine: &mut CheckMachine, msg: Message)
    where
        T: IrcTransport + ?Sized,
    {
        let is_quit = matches!(msg.command, Command::QUIT(_));
        let sent = transport.send(&msg).await;
        // Only after the send resolves: a send cancelled by the watchdog
        // leaves the QUIT to the driver.
        if is_quit {
            self.quit_sent = true;
        }

        let Err(e) = sent else {
            return;
        };

        if is_quit {
            debug!(error = %e, "QUIT not delivered");
            return;
        }

        let line = msg.to_string();
        warn!(error = %e, command = %line.trim_end(), "send failed");
        if let Some(cmd) = machine.feed(InboundMessage::TransportError { err: e.to_string() }) {
            let quit = transport.send(&Message::from(&cmd)).await;
            self.quit_sent = true;
            if let Err(e) = quit {
                debug!(error = %e, "QUIT not delivered");
            }
        }
    }
}
