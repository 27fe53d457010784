//! matchwarden worker service.
//!
//! Wires the worker loop to in-process collaborators. A deployment replaces
//! `MemoryStore`/`StaticFetcher` with its persistence layer and source
//! client; the processing core is identical either way.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use matchwarden::fetch::StaticFetcher;
use matchwarden::store::MemoryStore;
use matchwarden::{Worker, WorkerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting matchwarden worker");
    info!("version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::var_os("MATCHWARDEN_CONFIG").map(PathBuf::from);
    let config = WorkerConfig::load(config_path.as_deref())?;
    info!(?config, "configuration resolved");

    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StaticFetcher::new());
    let worker = Worker::new(store, fetcher, config);

    worker.run().await?;
    Ok(())
}
