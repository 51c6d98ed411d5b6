//! Host resolution for the HTTP client
//!
//! reqwest is handed this resolver instead of its built-in one so that a
//! failed lookup reaches the caller as a typed [`ResolveError`] somewhere in
//! the transport error's source chain.

use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use std::net::SocketAddr;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to lookup address for {host}")]
    Lookup {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no addresses found for {host}")]
    NoAddresses { host: String },
}

/// Resolver backed by the operating system (`getaddrinfo` via tokio)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let host = name.as_str().to_string();
        Box::pin(async move {
            let addrs = lookup(&host).await.map_err(|e| Box::new(e) as BoxError)?;
            Ok::<Addrs, BoxError>(Box::new(addrs.into_iter()))
        })
    }
}

/// Resolve `host` to socket addresses with port 0.
/// The connector replaces the port with the one from the URL.
pub async fn lookup(host: &str) -> Result<Vec<SocketAddr>, ResolveError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|source| ResolveError::Lookup {
            host: host.to_string(),
            source,
        })?
        .collect();

    if addrs.is_empty() {
        return Err(ResolveError::NoAddresses {
            host: host.to_string(),
        });
    }

    Ok(addrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ip_literal_resolves_without_dns() {
        let addrs = lookup("127.0.0.1").await.unwrap();
        assert_eq!(addrs, vec!["127.0.0.1:0".parse::<SocketAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn test_reserved_tld_fails() {
        // RFC 6761: .invalid never resolves
        let err = lookup("fetchcount.invalid").await.unwrap_err();
        assert!(err.to_string().contains("fetchcount.invalid"));
    }
}
