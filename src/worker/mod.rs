//! Fetch worker pool
//!
//! Workers share one bounded work queue, fetch each URL with a deadline,
//! count matches in the body and push a record onto the result queue.

pub mod http;
pub mod resolver;
pub mod runner;

pub use http::{FetchError, HttpClient, HttpClientError};
pub use resolver::{ResolveError, SystemResolver};
pub use runner::{WorkQueue, WorkerContext, run_worker};
