//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and TOML loading
//! - [`env`]: Environment-variable loading (the standalone default)
//! - [`validation`]: Startup checks run on a loaded config
//! - `defaults`: serde default value functions

mod defaults;
mod env;
mod types;
mod validation;

pub use types::{CheckConfig, ClientConfig, Config, ConfigError, TlsConfig, WatchdogConfig};
pub use validation::{ValidationError, validate};
