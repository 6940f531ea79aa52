//! Integration test common infrastructure.
//!
//! Provides a throwaway PKI, a scripted TLS IRC server, and config helpers.

pub mod server;
pub mod tls;

use std::path::Path;

use slirc_probe::config::{CheckConfig, Config};

#[allow(unused_imports)]
pub use server::{FakeServer, Script, WhoisReply};
#[allow(unused_imports)]
pub use tls::TestPki;

pub const USER_HOST: &str = "ip-192-231-221-38.ec2.internal";

/// Config pointing at a local fake server, trusting only the test CA.
pub fn probe_config(port: u16, ca_path: &Path, nick: &str, expected_hostname: &str, min_uptime_secs: u64) -> Config {
    let mut config = Config::new(CheckConfig {
        server: "localhost".to_string(),
        address: Some("127.0.0.1".to_string()),
        port,
        nick: nick.to_string(),
        expected_hostname: expected_hostname.to_string(),
        min_uptime_secs,
    });
    config.tls.ca_file = Some(ca_path.to_path_buf());
    config.tls.native_roots = false;
    config.watchdog.timeout_secs = 10;
    config
}
