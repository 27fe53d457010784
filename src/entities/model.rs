//! The four-level entity tree: Tournament → Match → Game → Score.
//!
//! Children are owned collections, so the cascading confirm/reset walks are
//! plain recursive traversals over `&mut` trees. Nothing here talks to
//! storage; the worker loads a subtree, mutates it, and saves it back.
//!
//! # Cascade semantics
//! - `confirm_pre_statuses` promotes every provisional verdict in the
//!   subtree to its terminal counterpart in one pass; `None` and terminal
//!   entities pass through unchanged (idempotent).
//! - `reset_automation_statuses(force)` re-arms the automation pipeline.
//!   The terminal-status guard is evaluated independently per entity, so a
//!   non-forced reset can legitimately leave a mixed tree behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flags::{
    GameRejectionReason, GameWarningFlags, MatchRejectionReason, MatchWarningFlags, Mods, Ruleset,
    ScoreRejectionReason, ScoringType, Team, TeamType, TournamentRejectionReason,
};
use super::status::{
    GameProcessingStatus, MatchProcessingStatus, ScoreProcessingStatus, TournamentProcessingStatus,
    VerificationStatus,
};

/// A submitted tournament, the root of one unit of processing work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: i32,
    pub name: String,
    /// Play mode the tournament is sanctioned for
    pub ruleset: Ruleset,
    /// Players per team as registered by the submitter. Absent until a human
    /// supplies it or the source reports it; several checks treat absence as
    /// insufficient data.
    pub lobby_size: Option<u8>,
    pub verification_status: VerificationStatus,
    pub rejection_reason: TournamentRejectionReason,
    pub processing_status: TournamentProcessingStatus,
    /// When the worker last touched this subtree; batch selection orders by
    /// this so stalled tournaments are revisited first
    pub last_processed_at: Option<DateTime<Utc>>,
    pub matches: Vec<Match>,
}

/// A lobby played within a tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: i32,
    /// Id of the match at the external source it is fetched from
    pub external_id: u64,
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub verification_status: VerificationStatus,
    pub rejection_reason: MatchRejectionReason,
    pub warning_flags: MatchWarningFlags,
    pub processing_status: MatchProcessingStatus,
    pub games: Vec<Game>,
}

/// A single map played within a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i32,
    pub external_id: u64,
    pub ruleset: Ruleset,
    pub scoring_type: ScoringType,
    pub team_type: TeamType,
    /// Modifiers forced on the whole lobby for this game
    pub mods: Mods,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub verification_status: VerificationStatus,
    pub rejection_reason: GameRejectionReason,
    pub warning_flags: GameWarningFlags,
    pub processing_status: GameProcessingStatus,
    pub scores: Vec<Score>,
}

/// One player's result in one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub id: i32,
    pub player_id: i32,
    pub team: Team,
    pub points: u64,
    /// Modifiers the player applied on top of the lobby mods
    pub mods: Mods,
    pub ruleset: Ruleset,
    pub verification_status: VerificationStatus,
    pub rejection_reason: ScoreRejectionReason,
    pub processing_status: ScoreProcessingStatus,
}

impl Tournament {
    /// New submission: no verdict, waiting on external data.
    pub fn new(id: i32, name: impl Into<String>, ruleset: Ruleset, lobby_size: Option<u8>) -> Self {
        Self {
            id,
            name: name.into(),
            ruleset,
            lobby_size,
            verification_status: VerificationStatus::None,
            rejection_reason: TournamentRejectionReason::empty(),
            processing_status: TournamentProcessingStatus::NeedsData,
            last_processed_at: None,
            matches: Vec::new(),
        }
    }

    /// Promote every provisional verdict in the subtree to its terminal
    /// counterpart in one atomic pass.
    pub fn confirm_pre_statuses(&mut self) {
        self.verification_status = self.verification_status.confirmed();
        for match_ in &mut self.matches {
            match_.verification_status = match_.verification_status.confirmed();
            for game in &mut match_.games {
                game.verification_status = game.verification_status.confirmed();
                for score in &mut game.scores {
                    score.verification_status = score.verification_status.confirmed();
                }
            }
        }
    }

    /// Re-arm the automation pipeline for this subtree.
    ///
    /// Each entity is guarded on its own status: terminal entities are
    /// skipped unless `force` is set. Already-fetched data is preserved;
    /// the pipeline restarts at the automation stage, not at data fetch.
    pub fn reset_automation_statuses(&mut self, force: bool) {
        if force || !self.verification_status.is_terminal() {
            self.verification_status = VerificationStatus::None;
            self.rejection_reason = TournamentRejectionReason::empty();
            self.processing_status = TournamentProcessingStatus::NeedsAutomationChecks;
        }
        for match_ in &mut self.matches {
            match_.reset_automation_statuses(force);
        }
    }

    /// Fraction of matches whose verification status counts as valid.
    /// `None` when the tournament has no matches.
    pub fn valid_match_fraction(&self) -> Option<f64> {
        if self.matches.is_empty() {
            return None;
        }
        let valid = self
            .matches
            .iter()
            .filter(|m| m.verification_status.is_valid())
            .count();
        Some(valid as f64 / self.matches.len() as f64)
    }
}

impl Match {
    /// New match shell awaiting its data fetch.
    pub fn new(id: i32, external_id: u64) -> Self {
        Self {
            id,
            external_id,
            name: String::new(),
            start_time: None,
            end_time: None,
            verification_status: VerificationStatus::None,
            rejection_reason: MatchRejectionReason::empty(),
            warning_flags: MatchWarningFlags::empty(),
            processing_status: MatchProcessingStatus::NeedsData,
            games: Vec::new(),
        }
    }

    /// Per-entity reset; recurses into games. See
    /// [`Tournament::reset_automation_statuses`] for the guard semantics.
    pub fn reset_automation_statuses(&mut self, force: bool) {
        if force || !self.verification_status.is_terminal() {
            self.verification_status = VerificationStatus::None;
            self.rejection_reason = MatchRejectionReason::empty();
            self.warning_flags = MatchWarningFlags::empty();
            self.processing_status = MatchProcessingStatus::NeedsAutomationChecks;
        }
        for game in &mut self.games {
            game.reset_automation_statuses(force);
        }
    }

    /// Fraction of games whose verification status counts as valid.
    pub fn valid_game_fraction(&self) -> Option<f64> {
        if self.games.is_empty() {
            return None;
        }
        let valid = self
            .games
            .iter()
            .filter(|g| g.verification_status.is_valid())
            .count();
        Some(valid as f64 / self.games.len() as f64)
    }
}

impl Game {
    pub fn reset_automation_statuses(&mut self, force: bool) {
        if force || !self.verification_status.is_terminal() {
            self.verification_status = VerificationStatus::None;
            self.rejection_reason = GameRejectionReason::empty();
            self.warning_flags = GameWarningFlags::empty();
            self.processing_status = GameProcessingStatus::NeedsAutomationChecks;
        }
        for score in &mut self.scores {
            score.reset_automation_statuses(force);
        }
    }

    /// Scores whose verification status counts as valid.
    pub fn valid_scores(&self) -> impl Iterator<Item = &Score> {
        self.scores
            .iter()
            .filter(|s| s.verification_status.is_valid())
    }
}

impl Score {
    pub fn reset_automation_statuses(&mut self, force: bool) {
        if force || !self.verification_status.is_terminal() {
            self.verification_status = VerificationStatus::None;
            self.rejection_reason = ScoreRejectionReason::empty();
            self.processing_status = ScoreProcessingStatus::NeedsAutomationChecks;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
