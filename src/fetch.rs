//! Data-fetch collaborator boundary.
//!
//! The core never talks to an external source itself; it asks a
//! [`DataFetcher`] for a match payload and applies the result. On failure
//! the match keeps its `NeedsData` stage so a later pass can retry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::entities::{Game, Match, MatchProcessingStatus};
use crate::error::FetchError;

/// Fully populated match payload from the external source. Games arrive
/// with their scores already attached.
#[derive(Debug, Clone)]
pub struct MatchData {
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub games: Vec<Game>,
}

/// External source of raw match data.
#[async_trait]
pub trait DataFetcher: Send + Sync {
    async fn fetch_match(&self, external_id: u64) -> Result<MatchData, FetchError>;
}

impl Match {
    /// Apply a fetched payload and advance out of the data stage.
    pub fn apply_data(&mut self, data: MatchData) {
        self.name = data.name;
        self.start_time = data.start_time;
        self.end_time = data.end_time;
        self.games = data.games;
        self.processing_status = MatchProcessingStatus::NeedsAutomationChecks;
    }
}

/// Canned fetcher backed by a map of payloads. Used by tests and the demo
/// binary; a deployment substitutes a real client.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    payloads: HashMap<u64, MatchData>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match(mut self, external_id: u64, data: MatchData) -> Self {
        self.payloads.insert(external_id, data);
        self
    }
}

#[async_trait]
impl DataFetcher for StaticFetcher {
    async fn fetch_match(&self, external_id: u64) -> Result<MatchData, FetchError> {
        self.payloads
            .get(&external_id)
            .cloned()
            .ok_or(FetchError::NotFound(external_id))
    }
}

// ============================================================================
// Tests
// ============================================================================
