//! Persistence collaborator boundary.
//!
//! The worker loads a whole tournament subtree, mutates it in memory, and
//! saves it back in one call, so a store implementation can serialize writes
//! per tournament id. Batch selection (`needing_processing`) mirrors the
//! scheduler query: not `Done`, not parked at `NeedsApproval`, stalest
//! first.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::entities::{Tournament, TournamentProcessingStatus};
use crate::error::StoreError;

#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Load a full subtree by tournament id.
    async fn load(&self, id: i32) -> Result<Option<Tournament>, StoreError>;

    /// Persist a full subtree. Must be atomic per tournament: advancement
    /// decisions read through this, so partially-applied child writes must
    /// never be observable.
    async fn save(&self, tournament: &Tournament) -> Result<(), StoreError>;

    /// Tournaments whose processing is incomplete, stalest first.
    async fn needing_processing(&self, limit: usize) -> Result<Vec<Tournament>, StoreError>;
}

/// In-process store used by tests and the demo binary.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tournaments: RwLock<HashMap<i32, Tournament>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tournament, e.g. from a submission fixture.
    pub async fn insert(&self, tournament: Tournament) {
        self.tournaments
            .write()
            .await
            .insert(tournament.id, tournament);
    }
}

#[async_trait]
impl TournamentStore for MemoryStore {
    async fn load(&self, id: i32) -> Result<Option<Tournament>, StoreError> {
        Ok(self.tournaments.read().await.get(&id).cloned())
    }

    async fn save(&self, tournament: &Tournament) -> Result<(), StoreError> {
        self.tournaments
            .write()
            .await
            .insert(tournament.id, tournament.clone());
        Ok(())
    }

    async fn needing_processing(&self, limit: usize) -> Result<Vec<Tournament>, StoreError> {
        let guard = self.tournaments.read().await;
        let mut pending: Vec<Tournament> = guard
            .values()
            .filter(|t| {
                t.processing_status != TournamentProcessingStatus::Done
                    && t.processing_status != TournamentProcessingStatus::NeedsApproval
            })
            .cloned()
            .collect();
        pending.sort_by_key(|t| (t.last_processed_at, t.id));
        pending.truncate(limit);
        Ok(pending)
    }
}

// ============================================================================
// Tests
// ============================================================================
