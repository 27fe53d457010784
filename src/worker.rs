//! Scheduler-facing worker service.
//!
//! Owns the load → mutate → save cycle around the processors and exposes
//! the cross-cutting operations: confirm, reset, approve. Concurrency
//! contract: at most one in-flight operation per tournament id (the store
//! serializes per-subtree writes); different tournaments need no
//! coordination.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use crate::config::WorkerConfig;
use crate::entities::Tournament;
use crate::error::{Result, StoreError};
use crate::fetch::DataFetcher;
use crate::processors;
use crate::store::TournamentStore;

pub struct Worker {
    store: Arc<dyn TournamentStore>,
    fetcher: Arc<dyn DataFetcher>,
    config: WorkerConfig,
}

impl Worker {
    pub fn new(
        store: Arc<dyn TournamentStore>,
        fetcher: Arc<dyn DataFetcher>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            config,
        }
    }

    /// Poll loop: process a batch, sleep, repeat. Runs until the task is
    /// dropped or aborted by the host.
    pub async fn run(&self) -> Result<()> {
        info!(
            batch_size = self.config.batch_size,
            poll_interval_secs = self.config.poll_interval_secs,
            "worker loop started"
        );
        loop {
            let processed = self.process_batch().await?;
            if processed == 0 {
                debug!("no tournaments need processing");
            }
            tokio::time::sleep(Duration::from_secs(self.config.poll_interval_secs)).await;
        }
    }

    /// Process one batch of incomplete tournaments. Returns how many were
    /// handled.
    pub async fn process_batch(&self) -> Result<usize> {
        let batch = self.store.needing_processing(self.config.batch_size).await?;
        let count = batch.len();
        for mut tournament in batch {
            self.process(&mut tournament).await?;
        }
        if count > 0 {
            info!(count, "processed tournament batch");
        }
        Ok(count)
    }

    /// One full processing pass over a subtree, stamped and saved.
    pub async fn process(&self, tournament: &mut Tournament) -> Result<()> {
        processors::process_tournament(tournament, self.fetcher.as_ref()).await;
        tournament.last_processed_at = Some(Utc::now());
        self.store.save(tournament).await?;
        Ok(())
    }

    /// Load, process and save a single tournament by id.
    pub async fn process_by_id(&self, id: i32) -> Result<()> {
        let mut tournament = self.load(id).await?;
        self.process(&mut tournament).await
    }

    /// Promote every provisional verdict in the subtree to its terminal
    /// counterpart (one atomic pass, idempotent).
    pub async fn confirm_pre_statuses(&self, id: i32) -> Result<()> {
        let mut tournament = self.load(id).await?;
        tournament.confirm_pre_statuses();
        // advancement may now complete review stages across the subtree
        processors::advance_tournament(&mut tournament);
        self.store.save(&tournament).await?;
        info!(tournament_id = id, "pre-verification statuses confirmed");
        Ok(())
    }

    /// Re-arm automation for the subtree. Terminal entities are skipped
    /// unless `force` is set; the guard is per entity.
    pub async fn reset_automation_statuses(&self, id: i32, force: bool) -> Result<()> {
        let mut tournament = self.load(id).await?;
        tournament.reset_automation_statuses(force);
        self.store.save(&tournament).await?;
        info!(tournament_id = id, force, "automation statuses reset");
        Ok(())
    }

    /// Final sign-off: `NeedsApproval → Done`. No-op at any other stage.
    pub async fn approve(&self, id: i32) -> Result<bool> {
        let mut tournament = self.load(id).await?;
        let approved = processors::approve_tournament(&mut tournament);
        if approved {
            self.store.save(&tournament).await?;
            info!(tournament_id = id, "tournament approved");
        }
        Ok(approved)
    }

    async fn load(&self, id: i32) -> Result<Tournament> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id).into())
    }
}

// ============================================================================
// Tests
// ============================================================================
