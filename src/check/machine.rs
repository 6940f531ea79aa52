//! Check state machine core implementation.

use tracing::debug;

use crate::config::CheckConfig;
use crate::error::CheckFailure;

use super::uptime::parse_uptime;
use super::{CheckState, InboundMessage, OutboundCommand, RunResult};

/// Sans-IO state machine for one health check.
///
/// This handles the 001 -> WHOIS -> 311 -> STATS u -> 242 flow.
#[derive(Clone, Debug)]
pub struct CheckMachine {
    config: CheckConfig,
    state: CheckState,
    result: RunResult,
}

impl CheckMachine {
    /// Create a machine waiting for the server welcome.
    #[must_use]
    pub fn new(config: CheckConfig) -> Self {
        Self {
            config,
            state: CheckState::AwaitingWelcome,
            result: RunResult::Pending,
        }
    }

    #[must_use]
    pub fn state(&self) -> CheckState {
        self.state
    }

    #[must_use]
    pub fn result(&self) -> &RunResult {
        &self.result
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state == CheckState::Terminal
    }

    #[must_use]
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn into_result(self) -> RunResult {
        self.result
    }

    /// Feed a server event to the machine.
    ///
    /// Returns the command to send next, if any. Events the current state
    /// does not expect are ignored.
    #[must_use]
    pub fn feed(&mut self, event: InboundMessage) -> Option<OutboundCommand> {
        match (self.state, event) {
            (CheckState::Terminal, _) => None,
            (_, InboundMessage::TransportError { err }) => {
                self.finish(RunResult::Failure(CheckFailure::Transport(err)))
            }
            (CheckState::AwaitingWelcome, InboundMessage::Welcome) => {
                self.state = CheckState::AwaitingWhoisReply;
                debug!(nick = %self.config.nick, "registered, sending WHOIS");
                Some(OutboundCommand::Whois(self.config.nick.clone()))
            }
            (CheckState::AwaitingWhoisReply, InboundMessage::WhoisUserReply { hostname, .. }) => {
                self.check_host(hostname)
            }
            (
                CheckState::AwaitingWhoisReply | CheckState::AwaitingStatsReply,
                InboundMessage::NoSuchNick { nick },
            ) => self.finish(RunResult::Failure(CheckFailure::NickNotFound { nick })),
            (CheckState::AwaitingStatsReply, InboundMessage::StatsUptimeReply { text }) => {
                self.check_uptime(&text)
            }
            (state, event) => {
                debug!(?state, ?event, "ignoring event");
                None
            }
        }
    }

    /// Force a failure from outside the event stream (the watchdog).
    ///
    /// No-op on a terminal machine, so whichever verdict lands first stands.
    #[must_use]
    pub fn conclude(&mut self, failure: CheckFailure) -> Option<OutboundCommand> {
        if self.is_terminal() {
            return None;
        }
        self.finish(RunResult::Failure(failure))
    }

    fn check_host(&mut self, hostname: String) -> Option<OutboundCommand> {
        if hostname != self.config.expected_hostname {
            return self.finish(RunResult::Failure(CheckFailure::HostMismatch {
                nick: self.config.nick.clone(),
                actual: hostname,
                expected: self.config.expected_hostname.clone(),
            }));
        }

        self.state = CheckState::AwaitingStatsReply;
        debug!(nick = %self.config.nick, host = %hostname, "host matches, sending STATS u");
        Some(OutboundCommand::StatsUptime)
    }

    fn check_uptime(&mut self, text: &str) -> Option<OutboundCommand> {
        let result = match parse_uptime(text) {
            Ok(seconds_up) if seconds_up < self.config.min_uptime_secs => {
                RunResult::Failure(CheckFailure::RecentReboot {
                    server: self.config.server.clone(),
                    seconds_up,
                })
            }
            Ok(seconds_up) => {
                debug!(seconds_up, threshold = self.config.min_uptime_secs, "uptime ok");
                RunResult::Success
            }
            Err(failure) => RunResult::Failure(failure),
        };
        self.finish(result)
    }

    fn finish(&mut self, result: RunResult) -> Option<OutboundCommand> {
        debug!(?result, from = ?self.state, "check finished");
        self.state = CheckState::Terminal;
        self.result = result;
        Some(OutboundCommand::Quit)
    }
}
