//! Worker loop - claims URLs from the shared work queue and emits counts

use super::http::{FetchError, HttpClient, Result};
use crate::matcher::count_matches;
use crate::observability::Metrics;
use crate::types::UrlCount;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Receiving end of the work queue, shared by every worker of a run
pub type WorkQueue = Arc<Mutex<mpsc::Receiver<String>>>;

/// Everything a worker needs besides its queues
#[derive(Debug, Clone)]
pub struct WorkerContext {
    pub client: HttpClient,
    pub pattern: Arc<str>,
    pub metrics: Arc<Metrics>,
    /// Cancelled by the first worker that hits an unrecoverable error
    pub shutdown: CancellationToken,
}

/// Drain `work` until it is closed and empty, sending one record per URL.
///
/// Returns the fetch error that ended the run, after cancelling
/// `ctx.shutdown`. A worker that observes the cancellation stops claiming
/// work and abandons its in-flight fetch.
pub async fn run_worker(
    ctx: WorkerContext,
    work: WorkQueue,
    results: mpsc::Sender<UrlCount>,
) -> Result<()> {
    loop {
        let next = tokio::select! {
            biased;
            _ = ctx.shutdown.cancelled() => None,
            url = next_url(&work) => url,
        };
        let Some(url) = next else {
            break;
        };

        let outcome = tokio::select! {
            biased;
            _ = ctx.shutdown.cancelled() => None,
            outcome = process_url(&ctx, &url) => Some(outcome),
        };

        match outcome {
            None => break,
            Some(Ok(record)) => {
                if results.send(record).await.is_err() {
                    debug!(url = %url, "Result queue closed, stopping worker");
                    break;
                }
            }
            Some(Err(err)) => {
                ctx.shutdown.cancel();
                return Err(err);
            }
        }
    }

    Ok(())
}

async fn next_url(work: &WorkQueue) -> Option<String> {
    work.lock().await.recv().await
}

/// Fetch one URL and turn the outcome into a record.
/// Unrecoverable errors are logged and returned instead.
async fn process_url(ctx: &WorkerContext, url: &str) -> Result<UrlCount> {
    match ctx.client.fetch(url).await {
        Ok(body) => {
            ctx.metrics.url_fetched(body.len());
            let count = count_matches(&body, ctx.pattern.as_bytes());
            debug!(url, count, "Counted matches");
            Ok(UrlCount::new(url, count))
        }
        Err(err @ FetchError::HostResolution(_)) => {
            warn!("failed to find a host {url}: {}", err.chain());
            ctx.metrics.host_failed();
            Ok(UrlCount::new(url, 0))
        }
        Err(err @ FetchError::DeadlineExceeded(_)) => {
            warn!("failed to get response from host {url}: {}", err.chain());
            ctx.metrics.deadline_exceeded();
            Ok(UrlCount::new(url, 0))
        }
        Err(err) => {
            error!("failed to make an http request: {}", err.chain());
            Err(err)
        }
    }
}
