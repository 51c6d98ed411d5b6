use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("Match pattern must not be empty")]
    EmptyPattern,

    #[error("Request timeout must be positive")]
    ZeroRequestTimeout,
}

/// Validate the entire configuration
///
/// URLs are deliberately not checked here: a malformed URL is a fatal
/// request error at fetch time, not a startup error.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.concurrency == 0 {
        return Err(ValidationError::ZeroConcurrency);
    }

    if config.pattern.is_empty() {
        return Err(ValidationError::EmptyPattern);
    }

    if config.http.request_timeout_ms == 0 {
        return Err(ValidationError::ZeroRequestTimeout);
    }

    Ok(())
}
