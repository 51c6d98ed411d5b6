mod cli;

use clap::Parser;
use cli::Cli;
use fetchcount::config::Config;
use fetchcount::observability;
use fetchcount::{DispatchError, Dispatcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _cli = Cli::parse();
    observability::init_tracing();

    let config = Config::load()?;
    let dispatcher = Dispatcher::new(config)?;

    match dispatcher.run(std::io::stdout().lock()).await {
        Ok(_) => Ok(()),
        // The worker that failed has already logged the cause
        Err(DispatchError::Fatal(_)) => std::process::exit(1),
        Err(err) => Err(err.into()),
    }
}
