//! Run orchestration
//!
//! Flow:
//! 1. Create the bounded work queue and result queue (capacity = concurrency)
//! 2. Start `concurrency + 1` workers sharing the work queue
//! 3. Seed every URL in list order, then close the work queue
//! 4. Read one record per URL in completion order, writing the report
//!
//! A worker that hits an unrecoverable error cancels the shared token. The
//! dispatcher then stops reading, joins the pool and returns that error
//! without writing a total.

mod report;

pub use report::Report;

use crate::config::Config;
use crate::observability::Metrics;
use crate::types::{RunSummary, UrlCount};
use crate::worker::{FetchError, HttpClient, HttpClientError, WorkerContext, run_worker};
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("run aborted: {}", .0.chain())]
    Fatal(#[source] FetchError),

    #[error("all workers exited before every URL was reported")]
    WorkersExited,

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] HttpClientError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;

pub struct Dispatcher {
    config: Config,
    client: HttpClient,
    metrics: Arc<Metrics>,
}

impl Dispatcher {
    /// Build the shared HTTP client for `config`
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpClient::new(&config.http)?;
        Ok(Self {
            config,
            client,
            metrics: Arc::new(Metrics::new()),
        })
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Run every configured URL through the worker pool, writing the report
    /// to `out`
    pub async fn run<W: Write>(&self, out: W) -> Result<RunSummary> {
        // mpsc::channel panics on zero capacity; validation rejects it anyway
        let capacity = self.config.concurrency.max(1);
        let expected = self.config.urls.len();
        let worker_count = self.config.worker_count();

        let (work_tx, work_rx) = mpsc::channel::<String>(capacity);
        let (result_tx, mut result_rx) = mpsc::channel::<UrlCount>(capacity);
        let work = Arc::new(Mutex::new(work_rx));
        let shutdown = CancellationToken::new();

        info!(urls = expected, workers = worker_count, capacity, "Starting run");

        let ctx = WorkerContext {
            client: self.client.clone(),
            pattern: Arc::from(self.config.pattern.as_str()),
            metrics: self.metrics.clone(),
            shutdown: shutdown.clone(),
        };

        let mut workers = JoinSet::new();
        for worker_id in 0..worker_count {
            workers.spawn(run_worker(ctx.clone(), work.clone(), result_tx.clone()));
            debug!(worker_id, "Worker started");
        }
        drop(result_tx);

        let seeder = tokio::spawn(seed(
            self.config.urls.clone(),
            work_tx,
            shutdown.clone(),
        ));

        let mut report = Report::new(out);
        while report.len() < expected {
            let next = tokio::select! {
                biased;
                _ = shutdown.cancelled() => None,
                record = result_rx.recv() => record,
            };
            match next {
                Some(record) => report.record(record)?,
                None => break,
            }
        }

        if report.len() < expected {
            // Unblocks any worker waiting on a full result queue
            drop(result_rx);
            shutdown.cancel();
            seeder.abort();

            let fatal = join_workers(&mut workers).await;
            return Err(fatal.map_or(DispatchError::WorkersExited, DispatchError::Fatal));
        }

        if let Err(err) = seeder.await {
            error!(error = %err, "Seeding task failed");
        }
        join_workers(&mut workers).await;

        let summary = report.finish()?;
        let metrics = self.metrics.snapshot();
        info!(
            total = summary.total,
            fetched = metrics.urls_fetched,
            host_failures = metrics.host_failures,
            deadline_failures = metrics.deadline_failures,
            bytes_read = metrics.bytes_read,
            "Run completed"
        );

        Ok(summary)
    }
}

/// Publish `urls` in order, then close the queue by dropping the sender
async fn seed(urls: Vec<String>, work: mpsc::Sender<String>, shutdown: CancellationToken) {
    for url in urls {
        let sent = tokio::select! {
            biased;
            _ = shutdown.cancelled() => return,
            sent = work.send(url) => sent,
        };
        if sent.is_err() {
            debug!("Work queue closed while seeding");
            return;
        }
    }
    debug!("All URLs seeded, closing work queue");
}

/// Wait for every worker, returning the first fatal error any of them hit
async fn join_workers(
    workers: &mut JoinSet<std::result::Result<(), FetchError>>,
) -> Option<FetchError> {
    let mut fatal = None;
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                fatal.get_or_insert(err);
            }
            Err(err) => error!(error = %err, "Worker task failed"),
        }
    }
    fatal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    fn offline_config() -> Config {
        Config::default().with_http(HttpConfig::default().with_system_proxy(false))
    }

    #[tokio::test]
    async fn test_empty_url_list() {
        let config = offline_config().with_urls(Vec::<String>::new());
        let dispatcher = Dispatcher::new(config).unwrap();
        let mut out = Vec::new();

        let summary = dispatcher.run(&mut out).await.unwrap();

        assert_eq!(summary, RunSummary::default());
        assert_eq!(String::from_utf8(out).unwrap(), "Total: 0\n");
    }

    #[tokio::test]
    async fn test_unresolvable_hosts_complete_run() {
        let urls = ["http://one.invalid/", "http://two.invalid/", "http://three.invalid/"];
        let config = offline_config().with_urls(urls).with_concurrency(1);
        let dispatcher = Dispatcher::new(config).unwrap();
        let mut out = Vec::new();

        let summary = dispatcher.run(&mut out).await.unwrap();

        assert_eq!(summary.results.len(), 3);
        assert_eq!(summary.total, 0);
        for url in urls {
            assert_eq!(summary.count_for(url), Some(0));
        }
        assert_eq!(dispatcher.metrics().snapshot().host_failures, 3);
        assert!(String::from_utf8(out).unwrap().ends_with("Total: 0\n"));
    }

    #[tokio::test]
    async fn test_malformed_url_aborts_without_total() {
        let dispatcher = Dispatcher::new(offline_config().with_urls(["not a url"])).unwrap();
        let mut out = Vec::new();

        let err = dispatcher.run(&mut out).await.unwrap_err();

        assert!(matches!(err, DispatchError::Fatal(FetchError::InvalidRequest(_))));
        assert!(out.is_empty());
    }
}
