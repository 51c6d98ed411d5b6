use super::models::{Config, HttpConfig};
use config::{ConfigError, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "FETCHCOUNT";
const ENV_SEPARATOR: &str = "__";

/// The subset of `Config` that may be overridden at startup
#[derive(Debug, Default, Deserialize)]
struct Overrides {
    #[serde(default)]
    http: HttpConfig,
}

/// Load configuration: built-in defaults, then process environment overrides
/// (`FETCHCOUNT__HTTP__REQUEST_TIMEOUT_MS` -> http.request_timeout_ms)
pub fn load() -> Result<Config, ConfigError> {
    load_from_env(environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

/// Load configuration from a specific environment source
/// Useful for testing without touching the process environment
pub fn load_from_env(source: Environment) -> Result<Config, ConfigError> {
    let overrides: Overrides = config::Config::builder()
        .add_source(source)
        .build()?
        .try_deserialize()?;

    Ok(Config {
        http: overrides.http,
        ..Config::default()
    })
}
