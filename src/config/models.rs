use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

/// Pages fetched by a default run, in seeding order
pub const DEFAULT_URLS: &[&str] = &[
    "http://go.dev",
    "http://golang.org",
    "http://google.com",
    "http://vc.ru",
    "http://www.reddit.com/r/golang/",
    "http://diesel.elcat.kg",
    "https://pikabu.ru/tag/Golang",
    "http://airvuz.com",
    "http://www.kg",
    "http://gopro.com",
    "http://python.org",
    "http://souncloud.com",
];

pub const DEFAULT_CONCURRENCY: usize = 4;

pub const DEFAULT_PATTERN: &str = "go";

/// Top-level run configuration
///
/// `urls`, `concurrency` and `pattern` are fixed at build time. Only the
/// `http` section accepts environment overrides (see `sources`).
#[derive(Debug, Clone)]
pub struct Config {
    pub urls: Vec<String>,
    /// Capacity of both queues. The pool runs `concurrency + 1` workers.
    pub concurrency: usize,
    pub pattern: String,
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: DEFAULT_URLS.iter().map(|url| url.to_string()).collect(),
            concurrency: DEFAULT_CONCURRENCY,
            pattern: DEFAULT_PATTERN.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Number of worker tasks started for a run: one more than `concurrency`.
    pub fn worker_count(&self) -> usize {
        self.concurrency + 1
    }

    pub fn with_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Absolute deadline for one GET, body read included
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Sent as `User-Agent` when set; reqwest sends none by default
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment
    #[serde(default = "default_system_proxy")]
    pub system_proxy: bool,
    /// Static host -> address pins, consulted before DNS
    #[serde(skip)]
    pub resolve_overrides: HashMap<String, SocketAddr>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: None,
            system_proxy: default_system_proxy(),
            resolve_overrides: HashMap::new(),
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    pub fn with_resolve_override(mut self, host: impl Into<String>, addr: SocketAddr) -> Self {
        self.resolve_overrides.insert(host.into(), addr);
        self
    }
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_system_proxy() -> bool {
    true
}
