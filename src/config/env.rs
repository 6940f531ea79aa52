//! Environment-variable configuration.
//!
//! `SERVER`, `ADDRESS`, `PORT`, `CHECKNICK`, `EXPECTEDHOSTNAME` and
//! `INTERVAL` describe the check. `PROBE_*` variables override the client
//! identity, TLS trust and watchdog defaults.

use std::path::PathBuf;
use std::str::FromStr;

use super::types::{CheckConfig, Config, ConfigError};

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };
        let optional = |name: &'static str| lookup(name).filter(|v| !v.is_empty());

        let server = required("SERVER")?;
        let port = match optional("PORT") {
            Some(value) => parse_var("PORT", value)?,
            None => super::defaults::default_port(),
        };
        let min_uptime_secs = required("INTERVAL")?
            .trim()
            .parse::<u64>()
            .map_err(ConfigError::InvalidInterval)?;

        let mut config = Config::new(CheckConfig {
            server,
            address: optional("ADDRESS"),
            port,
            nick: required("CHECKNICK")?,
            expected_hostname: required("EXPECTEDHOSTNAME")?,
            min_uptime_secs,
        });

        if let Some(nickname) = optional("PROBE_NICKNAME") {
            config.client.nickname = nickname;
        }
        if let Some(username) = optional("PROBE_USERNAME") {
            config.client.username = username;
        }
        if let Some(realname) = optional("PROBE_REALNAME") {
            config.client.realname = realname;
        }
        if let Some(ca_file) = optional("PROBE_CA_FILE") {
            config.tls.ca_file = Some(PathBuf::from(ca_file));
        }
        if let Some(native_roots) = optional("PROBE_NATIVE_ROOTS") {
            config.tls.native_roots = parse_var("PROBE_NATIVE_ROOTS", native_roots)?;
        }
        if let Some(timeout) = optional("PROBE_TIMEOUT_SECS") {
            config.watchdog.timeout_secs = parse_var("PROBE_TIMEOUT_SECS", timeout)?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidVar { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("SERVER", "irc.horph.com"),
        ("ADDRESS", "irc.horph.com"),
        ("PORT", "6697"),
        ("CHECKNICK", "doug"),
        ("EXPECTEDHOSTNAME", "ip-192-231-221-38.ec2.internal"),
        ("INTERVAL", "3600"),
    ];

    #[test]
    fn test_reads_check_variables() {
        let config = Config::from_lookup(lookup_from(BASE)).unwrap();
        assert_eq!(config.check.server, "irc.horph.com");
        assert_eq!(config.check.port, 6697);
        assert_eq!(config.check.nick, "doug");
        assert_eq!(config.check.min_uptime_secs, 3600);
        assert_eq!(config.client.nickname, "checker");
        assert_eq!(config.watchdog.timeout_secs, 60);
    }

    #[test]
    fn test_probe_overrides() {
        let mut pairs = BASE.to_vec();
        pairs.extend_from_slice(&[
            ("PROBE_NICKNAME", "probe"),
            ("PROBE_CA_FILE", "/tmp/ca.pem"),
            ("PROBE_NATIVE_ROOTS", "false"),
            ("PROBE_TIMEOUT_SECS", "5"),
        ]);
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.client.nickname, "probe");
        assert_eq!(config.tls.ca_file, Some(PathBuf::from("/tmp/ca.pem")));
        assert!(!config.tls.native_roots);
        assert_eq!(config.watchdog.timeout_secs, 5);
    }

    #[test]
    fn test_missing_variable() {
        let pairs: Vec<_> = BASE
            .iter()
            .copied()
            .filter(|(k, _)| *k != "CHECKNICK")
            .collect();
        assert!(matches!(
            Config::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::MissingVar("CHECKNICK"))
        ));
    }

    #[test]
    fn test_bad_interval() {
        let mut pairs = BASE.to_vec();
        pairs.retain(|(k, _)| *k != "INTERVAL");
        pairs.push(("INTERVAL", "hourly"));

        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInterval(_)));
        assert!(
            err.to_string()
                .starts_with("Error converting interval to int: ")
        );
    }

    #[test]
    fn test_bad_port() {
        let mut pairs = BASE.to_vec();
        pairs.retain(|(k, _)| *k != "PORT");
        pairs.push(("PORT", "66970"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::InvalidVar { name: "PORT", .. })
        ));
    }
}
