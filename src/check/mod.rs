//! Sans-IO health-check state machine.
//!
//! The machine consumes classified server replies ([`InboundMessage`]) and
//! produces at most one command to send per event ([`OutboundCommand`]). It
//! performs no I/O and keeps no clock; the session and driver supply both.
//!
//! ```text
//! AwaitingWelcome --001--> AwaitingWhoisReply --311 (host ok)--> AwaitingStatsReply --242--> Terminal
//!                                  |                                     |
//!                                  +--311 (host wrong) / 401------------+---------------> Terminal
//! ```
//!
//! Any transport error, and the watchdog via [`CheckMachine::conclude`],
//! short-circuits a non-terminal machine to `Terminal`.
//!
//! # Example
//!
//! ```
//! use slirc_probe::check::{CheckMachine, InboundMessage, OutboundCommand, RunResult};
//! use slirc_probe::config::CheckConfig;
//!
//! let mut machine = CheckMachine::new(CheckConfig {
//!     server: "irc.horph.com".into(),
//!     address: None,
//!     port: 6697,
//!     nick: "doug".into(),
//!     expected_hostname: "host.example".into(),
//!     min_uptime_secs: 60,
//! });
//!
//! assert_eq!(
//!     machine.feed(InboundMessage::Welcome),
//!     Some(OutboundCommand::Whois("doug".into()))
//! );
//! let _ = machine.feed(InboundMessage::WhoisUserReply {
//!     nick: "doug".into(),
//!     hostname: "host.example".into(),
//! });
//! let quit = machine.feed(InboundMessage::StatsUptimeReply {
//!     text: "Server up 2 days, 00:00:00".into(),
//! });
//! assert_eq!(quit, Some(OutboundCommand::Quit));
//! assert_eq!(machine.result(), &RunResult::Success);
//! ```

mod machine;
mod uptime;

pub use machine::CheckMachine;
pub use uptime::parse_uptime;

use crate::error::CheckFailure;

/// Where the check currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CheckState {
    /// Connected, waiting for `001 RPL_WELCOME`.
    #[default]
    AwaitingWelcome,
    /// Sent WHOIS, waiting for `311 RPL_WHOISUSER` or `401 ERR_NOSUCHNICK`.
    AwaitingWhoisReply,
    /// Sent `STATS u`, waiting for `242 RPL_STATSUPTIME`.
    AwaitingStatsReply,
    /// Verdict reached; every further event is ignored.
    Terminal,
}

/// Outcome of a run. Written once; the first terminal value sticks.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum RunResult {
    #[default]
    Pending,
    Success,
    Failure(CheckFailure),
}

impl RunResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// `None` while pending.
    pub fn into_outcome(self) -> Option<Result<(), CheckFailure>> {
        match self {
            Self::Pending => None,
            Self::Success => Some(Ok(())),
            Self::Failure(failure) => Some(Err(failure)),
        }
    }
}

/// A server event the machine understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundMessage {
    /// `001`
    Welcome,
    /// `311`
    WhoisUserReply { nick: String, hostname: String },
    /// `242`
    StatsUptimeReply { text: String },
    /// `401`
    NoSuchNick { nick: String },
    /// Connection loss, I/O failure, or server `ERROR`.
    TransportError { err: String },
}

/// A command the machine asks the session to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutboundCommand {
    Whois(String),
    /// `STATS u`
    StatsUptime,
    Quit,
}
