//! HTTP client for fetching page bodies

use super::resolver::{ResolveError, SystemResolver};
use crate::config::HttpConfig;
use bytes::Bytes;
use reqwest::{Client, Request};
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("failed to build http client")]
    Build(#[from] reqwest::Error),
}

/// Why a single fetch failed
///
/// Only `HostResolution` and `DeadlineExceeded` are recoverable; every other
/// variant aborts the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create an http request")]
    InvalidRequest(#[source] reqwest::Error),

    #[error("failed to resolve host")]
    HostResolution(#[source] reqwest::Error),

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("failed to do an http request")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response body")]
    Body(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;

impl FetchError {
    /// Render the error with its full source chain, `outer: inner: ...`
    pub fn chain(&self) -> String {
        let mut rendered = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        rendered
    }
}

/// HTTP fetcher shared by all workers of a run
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    request_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: &HttpConfig) -> std::result::Result<Self, HttpClientError> {
        let mut builder = Client::builder().dns_resolver(Arc::new(SystemResolver));

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        for (host, addr) in &config.resolve_overrides {
            builder = builder.resolve(host, *addr);
        }

        Ok(Self {
            client: builder.build()?,
            request_timeout: config.request_timeout(),
        })
    }

    /// GET `url` and read the whole body, bounded by the request deadline
    ///
    /// No retry. Non-2xx responses are not errors; their bodies are returned
    /// like any other.
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        let request = self
            .client
            .get(url)
            .build()
            .map_err(FetchError::InvalidRequest)?;

        debug!(url, "Starting fetch");

        match tokio::time::timeout(self.request_timeout, self.execute(request)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::DeadlineExceeded(self.request_timeout)),
        }
    }

    async fn execute(&self, request: Request) -> Result<Bytes> {
        let url = request.url().to_string();

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::DeadlineExceeded(self.request_timeout)
            } else {
                FetchError::Body(e)
            }
        })?;

        debug!(url = %url, status = status.as_u16(), size = body.len(), "Fetch completed");

        Ok(body)
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_builder() {
            FetchError::InvalidRequest(err)
        } else if err.is_timeout() {
            FetchError::DeadlineExceeded(self.request_timeout)
        } else if is_resolve_failure(&err) {
            FetchError::HostResolution(err)
        } else {
            FetchError::Transport(err)
        }
    }
}

fn is_resolve_failure(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.is::<ResolveError>() {
            return true;
        }
        source = cause.source();
    }
    false
}
