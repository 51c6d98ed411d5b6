pub mod config;
pub mod dispatcher;
pub mod matcher;
pub mod observability;
pub mod types;
pub mod worker;

pub use dispatcher::{DispatchError, Dispatcher};
pub use types::{RunSummary, UrlCount};
