//! Verification and processing status enums for all four entity levels.
//!
//! `VerificationStatus` tracks *trust*: whether an entity is fit for
//! consumption by the rating engine. `*ProcessingStatus` tracks *progress*:
//! how far through the worker pipeline the entity has moved. The two are
//! deliberately independent: a rejected match still finishes processing.

use serde::{Deserialize, Serialize};

/// Trust state of an entity.
///
/// `PreVerified`/`PreRejected` are provisional verdicts produced by the
/// automation check pipeline and await human confirmation. `Verified` and
/// `Rejected` are terminal: ordinary re-runs never touch them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// No verdict yet (freshly created or reset)
    #[default]
    None,
    /// Automation failed at least one check; awaiting confirmation
    PreRejected,
    /// Automation passed all checks; awaiting confirmation
    PreVerified,
    /// Confirmed rejection (terminal)
    Rejected,
    /// Confirmed verification (terminal)
    Verified,
}

impl VerificationStatus {
    /// Promote a provisional verdict to its terminal counterpart.
    ///
    /// `None` and already-terminal statuses pass through unchanged, which is
    /// what makes confirmation idempotent.
    pub fn confirmed(self) -> Self {
        match self {
            VerificationStatus::PreRejected => VerificationStatus::Rejected,
            VerificationStatus::PreVerified => VerificationStatus::Verified,
            other => other,
        }
    }

    /// Terminal statuses survive non-forced resets.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            VerificationStatus::Rejected | VerificationStatus::Verified
        )
    }

    /// Whether this entity counts as a valid child for parent-level
    /// threshold checks (`PreVerified` or `Verified`).
    pub fn is_valid(self) -> bool {
        matches!(
            self,
            VerificationStatus::PreVerified | VerificationStatus::Verified
        )
    }
}

/// Tournament pipeline stage.
///
/// Ordered; comparisons are used for the strict "all children at an
/// equivalent or later stage" advancement gates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum TournamentProcessingStatus {
    /// Waiting on external match data
    #[default]
    NeedsData,
    /// Data present; automation checks have not produced a verdict
    NeedsAutomationChecks,
    /// Automated verdict applied; awaiting human review
    NeedsVerification,
    /// Review complete; awaiting final approval
    NeedsApproval,
    /// Fully processed
    Done,
}

/// Match pipeline stage (shorter than the tournament sequence).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum MatchProcessingStatus {
    /// Waiting on external match data
    #[default]
    NeedsData,
    /// Data present; automation checks have not produced a verdict
    NeedsAutomationChecks,
    /// Automated verdict applied; awaiting human review
    NeedsVerification,
    /// Fully processed
    Done,
}

/// Game pipeline stage.
///
/// Games are created already populated (they arrive as part of a match data
/// fetch), so there is no `NeedsData` stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum GameProcessingStatus {
    /// Automation checks have not produced a verdict
    #[default]
    NeedsAutomationChecks,
    /// Automated verdict applied; awaiting human review
    NeedsVerification,
    /// Fully processed
    Done,
}

/// Score pipeline stage. Like games, scores arrive populated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum ScoreProcessingStatus {
    /// Automation checks have not produced a verdict
    #[default]
    NeedsAutomationChecks,
    /// Automated verdict applied; awaiting human review
    NeedsVerification,
    /// Fully processed
    Done,
}

// ============================================================================
// Tests
// ============================================================================
