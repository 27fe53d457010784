//! Worker configuration.
//!
//! Resolution order: TOML file → environment → built-in defaults, with the
//! environment winning over the file. Thresholds and check constants are
//! deliberately *not* configurable (verdicts must be reproducible across
//! deployments), so only scheduling knobs live here.

use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::error::WorkerError;

const ENV_BATCH_SIZE: &str = "MATCHWARDEN_BATCH_SIZE";
const ENV_POLL_INTERVAL: &str = "MATCHWARDEN_POLL_INTERVAL_SECS";

/// Scheduling knobs for the worker loop.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkerConfig {
    /// Tournaments picked up per poll
    pub batch_size: usize,
    /// Sleep between polls
    pub poll_interval_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            poll_interval_secs: 30,
        }
    }
}

impl WorkerConfig {
    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, WorkerError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| WorkerError::Config(format!("read {}: {e}", path.display())))?;
                let config: WorkerConfig = toml::from_str(&content)
                    .map_err(|e| WorkerError::Config(format!("parse {}: {e}", path.display())))?;
                info!(path = %path.display(), "configuration loaded from TOML");
                config
            }
            _ => WorkerConfig::default(),
        };

        if let Ok(value) = std::env::var(ENV_BATCH_SIZE) {
            config.batch_size = value
                .parse()
                .map_err(|e| WorkerError::Config(format!("{ENV_BATCH_SIZE}: {e}")))?;
        }
        if let Ok(value) = std::env::var(ENV_POLL_INTERVAL) {
            config.poll_interval_secs = value
                .parse()
                .map_err(|e| WorkerError::Config(format!("{ENV_POLL_INTERVAL}: {e}")))?;
        }

        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
