//! slirc-probe - Straylight IRC health probe
//!
//! Usage: `slirc-probe [config.toml]`
//!
//! Without a path the check is configured from the environment (`SERVER`,
//! `ADDRESS`, `PORT`, `CHECKNICK`, `EXPECTEDHOSTNAME`, `INTERVAL`). A passing
//! check prints nothing and exits 0. A failing one prints the diagnostic on
//! stderr and exits non-zero.

use std::process::ExitCode;

use slirc_probe::config::{self, Config, ConfigError};
use slirc_probe::error::ProbeError;
use slirc_probe::telemetry;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();

    match probe().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(code = err.error_code(), "probe failed");
            eprintln!("{}", err);
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

async fn probe() -> Result<(), ProbeError> {
    let config = load_config()?;
    debug!(
        server = %config.check.server,
        address = %config.check.dial_address(),
        port = config.check.port,
        nick = %config.check.nick,
        "starting probe"
    );
    slirc_probe::run(&config).await
}

fn load_config() -> Result<Config, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            debug!(path = %path, "loading config file");
            Config::load(&path)?
        }
        None => Config::from_env()?,
    };

    config::validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}
