//! slirc-probe - Straylight IRC health probe
//!
//! Connects to an IRC server over TLS, confirms a designated user is online
//! from the expected host, and checks via `STATS u` that the server has not
//! rebooted within the configured window.
//!
//! The verification logic lives in [`check::CheckMachine`], a sans-IO state
//! machine fed with classified server replies. [`session`] handles the
//! protocol chores around it and [`driver`] owns the connection, the
//! watchdog, and the final verdict.

pub mod check;
pub mod config;
pub mod driver;
pub mod error;
pub mod session;
pub mod telemetry;
pub mod transport;

pub use crate::check::{CheckMachine, CheckState, InboundMessage, OutboundCommand, RunResult};
pub use crate::config::{CheckConfig, Config};
pub use crate::driver::{run, run_with};
pub use crate::error::{CheckFailure, ProbeError};
pub use crate::transport::{IrcTransport, MemoryPeer, MemoryTransport, TlsTransport};
