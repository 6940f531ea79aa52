//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("check.server is required")]
    MissingServer,
    #[error("check.address must not be empty when set")]
    EmptyAddress,
    #[error("check.port must not be 0")]
    InvalidPort,
    #[error("check.nick is required")]
    MissingNick,
    #[error("check.expected_hostname is required")]
    MissingExpectedHostname,
    #[error("client.{0} must be a single non-empty word")]
    InvalidClientField(&'static str),
    #[error("watchdog.timeout_secs must be greater than 0")]
    ZeroTimeout,
    #[error("tls.ca_file does not exist: {0}")]
    CaFileNotFound(String),
    #[error("no trust anchors: tls.native_roots is false and tls.ca_file is unset")]
    NoTrustAnchors,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let check = &config.check;

    // Required fields
    if check.server.is_empty() {
        errors.push(ValidationError::MissingServer);
    }
    if check.address.as_deref().is_some_and(str::is_empty) {
        errors.push(ValidationError::EmptyAddress);
    }
    if check.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }
    if check.nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    }
    if check.expected_hostname.is_empty() {
        errors.push(ValidationError::MissingExpectedHostname);
    }

    // Registration identity goes on the wire as single parameters
    for (field, value) in [
        ("nickname", &config.client.nickname),
        ("username", &config.client.username),
    ] {
        if value.is_empty() || value.contains(' ') {
            errors.push(ValidationError::InvalidClientField(field));
        }
    }

    if config.watchdog.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    // TLS validation
    match config.tls.ca_file {
        Some(ref path) if !path.exists() => {
            errors.push(ValidationError::CaFileNotFound(path.display().to_string()));
        }
        None if !config.tls.native_roots => errors.push(ValidationError::NoTrustAnchors),
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
