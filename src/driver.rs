//! Run driver: connect, check, watchdog, close, report.

use std::time::{Duration, Instant};

use slirc_wire::Message;
use tokio::time::timeout;
use tracing::{Instrument, debug, info, warn};

use crate::check::CheckMachine;
use crate::config::Config;
use crate::error::{CheckFailure, ProbeError};
use crate::session::Session;
use crate::telemetry::spans;
use crate::transport::{IrcTransport, TlsTransport};

/// How long QUIT and the transport shutdown may each take.
pub const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Run one health check against the configured server.
///
/// The watchdog covers the whole run, TCP connect and TLS handshake
/// included.
pub async fn run(config: &Config) -> Result<(), ProbeError> {
    let span = spans::probe(&config.check.server, &config.check.nick);
    connect_and_run(config).instrument(span).await
}

async fn connect_and_run(config: &Config) -> Result<(), ProbeError> {
    let check = &config.check;
    let started = Instant::now();
    let watchdog = config.watchdog.timeout();

    let connect = TlsTransport::connect(check.dial_address(), check.port, &check.server, &config.tls);
    let transport = match timeout(watchdog, connect).await {
        Ok(result) => result?,
        Err(_) => {
            warn!("watchdog fired during connect");
            return Err(timeout_failure(config).into());
        }
    };

    run_with(config, transport, watchdog.saturating_sub(started.elapsed())).await
}

/// Run the check over an already-connected transport.
///
/// Exactly one of the session and the `watchdog` timer finishes the run.
/// The connection is closed on every path.
pub async fn run_with<T>(config: &Config, mut transport: T, watchdog: Duration) -> Result<(), ProbeError>
where
    T: IrcTransport,
{
    let mut machine = CheckMachine::new(config.check.clone());
    let mut session = Session::new(&config.client);

    let timed_out = tokio::select! {
        _ = session.drive(&mut transport, &mut machine) => false,
        _ = tokio::time::sleep(watchdog) => true,
    };

    if timed_out {
        warn!(state = ?machine.state(), "watchdog fired");
        let _ = machine.conclude(timeout_failure(config));
    }

    close(&mut transport, session.quit_sent()).await;

    let outcome = machine.into_result().into_outcome().unwrap_or_else(|| {
        Err(CheckFailure::Transport(
            "session ended without a verdict".to_string(),
        ))
    });

    match outcome {
        Ok(()) => {
            info!("check passed");
            Ok(())
        }
        Err(failure) => {
            info!(code = failure.error_code(), "check failed");
            Err(failure.into())
        }
    }
}

fn timeout_failure(config: &Config) -> CheckFailure {
    CheckFailure::Timeout {
        after_secs: config.watchdog.timeout_secs,
    }
}

async fn close<T: IrcTransport>(transport: &mut T, quit_sent: bool) {
    if !quit_sent {
        match timeout(CLOSE_GRACE, transport.send(&Message::quit())).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(error = %e, "QUIT not delivered"),
            Err(_) => debug!("QUIT timed out"),
        }
    }

    match timeout(CLOSE_GRACE, transport.close()).await {
        Ok(Ok(())) => debug!("connection closed"),
        Ok(Err(e)) => debug!(error = %e, "close failed"),
        Err(_) => debug!("close timed out"),
    }
}
