//! Error hierarchy for slirc-probe.
//!
//! [`CheckFailure`] is the verdict of a failed check; its `Display` text is
//! the diagnostic reported to the operator. [`ProbeError`] is everything a
//! run can end with, including failures that happen before the check starts.

use std::num::ParseIntError;

use thiserror::Error;

use crate::config::ConfigError;

// ============================================================================
// Check Failures (verdicts)
// ============================================================================

/// Why a health check did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    #[error("Could not find {nick} online")]
    NickNotFound { nick: String },

    #[error("{nick}'s host is {actual} instead of {expected}")]
    HostMismatch {
        nick: String,
        actual: String,
        expected: String,
    },

    #[error("Could not find enough info in stats call")]
    StatsUnparsable,

    #[error("Error converting number: {0}")]
    NumberConversion(#[from] ParseIntError),

    /// Uptime below the threshold: the server restarted since the last check.
    #[error("Server {server} up for {seconds_up} seconds")]
    RecentReboot { server: String, seconds_up: u64 },

    /// Connection loss, receive/send failure, or a server `ERROR`.
    #[error("{0}")]
    Transport(String),

    #[error("check timed out after {after_secs} seconds")]
    Timeout { after_secs: u64 },
}

impl CheckFailure {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NickNotFound { .. } => "nick_not_found",
            Self::HostMismatch { .. } => "host_mismatch",
            Self::StatsUnparsable => "stats_unparsable",
            Self::NumberConversion(_) => "number_conversion",
            Self::RecentReboot { .. } => "recent_reboot",
            Self::Transport(_) => "transport_error",
            Self::Timeout { .. } => "timeout",
        }
    }
}

// ============================================================================
// Probe Errors (run outcome)
// ============================================================================

/// Errors that end a probe run.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// TLS handshake failure, including certificate validation.
    #[error(transparent)]
    Tls(std::io::Error),

    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    #[error("failed to build TLS root store: {0}")]
    RootStore(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Check(#[from] CheckFailure),
}

impl ProbeError {
    /// Process exit status for standalone mode.
    ///
    /// 78 is `EX_CONFIG` from sysexits.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Check(CheckFailure::Timeout { .. }) => 3,
            Self::Check(_) => 1,
            Self::Connect { .. } | Self::Tls(_) | Self::InvalidServerName(_) | Self::RootStore(_) => {
                2
            }
            Self::Config(_) => 78,
        }
    }

    /// Get a static error code string for log labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connect_error",
            Self::Tls(_) => "tls_error",
            Self::InvalidServerName(_) => "invalid_server_name",
            Self::RootStore(_) => "root_store_error",
            Self::Config(_) => "config_error",
            Self::Check(failure) => failure.error_code(),
        }
    }
}
