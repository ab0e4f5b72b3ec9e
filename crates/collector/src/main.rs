//! One sampling invocation per process run.
//!
//! Cadence is an external concern: a scheduler runs this binary, each
//! run appends at most one row. The only fatal condition is a sink
//! failure; fetch problems degrade to NA fields inside the row.

use anyhow::Result;
use p2p_collector::fetch::SideFetcher;
use p2p_collector::runner;
use p2p_collector::sink::CsvSink;
use p2p_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let client = SideFetcher::client(&config)?;

    if let Some(observation) = runner::run_once(&config, client).await {
        CsvSink::new(config.sink.csv_path.clone()).append(&observation)?;
        info!(row = ?observation.to_record(), "observation recorded");
    }
    Ok(())
}
