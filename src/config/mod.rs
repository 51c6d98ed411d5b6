//! Configuration management for fetchcount
//!
//! The run shape (URL list, concurrency, match pattern) is built in. The HTTP
//! section can be overridden with environment variables following the pattern
//! `FETCHCOUNT__<section>__<key>`:
//!
//! - `FETCHCOUNT__HTTP__REQUEST_TIMEOUT_MS=10000`
//! - `FETCHCOUNT__HTTP__USER_AGENT=fetchcount/0.1`
//! - `FETCHCOUNT__HTTP__SYSTEM_PROXY=false`
//!
//! # Usage
//!
//! ```no_run
//! use fetchcount::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Fetching {} pages", config.urls.len());
//! ```

mod models;
mod sources;
mod validation;

pub use models::{Config, DEFAULT_CONCURRENCY, DEFAULT_PATTERN, DEFAULT_URLS, HttpConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from built-in defaults and `FETCHCOUNT__*`
    /// environment overrides, then validate it
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit environment source
    pub fn load_from_env(source: config::Environment) -> Result<Self, ConfigError> {
        let config = sources::load_from_env(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }
}
