//! Default value functions for configuration.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

/// IRC over TLS.
pub fn default_port() -> u16 {
    6697
}

pub fn default_nickname() -> String {
    "checker".to_string()
}

pub fn default_username() -> String {
    "IRCTestSSL".to_string()
}

pub fn default_realname() -> String {
    "IRCTestSSL".to_string()
}

pub fn default_timeout_secs() -> u64 {
    60
}
