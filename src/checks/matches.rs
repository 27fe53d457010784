//! Match-level automation checks.
//!
//! The game-count check is a threshold aggregate over children that already
//! carry verdicts, mirroring the tournament-level match-count check. The
//! name-format check never fails; it only raises an audit warning, which is
//! why matches carry `WarningFlags` at all.

use super::{AutomationCheck, CheckChain, CheckContext, Verdict, LOW_GAME_COUNT, VERIFIED_CHILD_RATIO};
use crate::entities::{Match, MatchRejectionReason, MatchWarningFlags};

/// Declared execution order for match checks.
pub fn match_checks() -> CheckChain<Match, MatchRejectionReason, MatchWarningFlags> {
    vec![
        Box::new(MatchEndTimeCheck),
        Box::new(MatchGameCountCheck),
        Box::new(MatchNameFormatCheck),
    ]
}

/// Rejects matches the source reports as never finished.
pub struct MatchEndTimeCheck;

impl AutomationCheck<Match> for MatchEndTimeCheck {
    type Reasons = MatchRejectionReason;
    type Warnings = MatchWarningFlags;

    fn name(&self) -> &'static str {
        "MatchEndTimeCheck"
    }

    fn check(&self, match_: &Match, _: &CheckContext) -> Verdict<MatchRejectionReason, MatchWarningFlags> {
        if match_.end_time.is_none() {
            Verdict::fail(MatchRejectionReason::NO_END_TIME)
        } else {
            Verdict::pass()
        }
    }
}

/// Threshold aggregate over the match's games.
///
/// No games at all is insufficient data; zero valid games and a valid
/// fraction below [`VERIFIED_CHILD_RATIO`] are distinct rejection causes.
/// A passing match with an unusually short series is flagged for audit.
pub struct MatchGameCountCheck;

impl AutomationCheck<Match> for MatchGameCountCheck {
    type Reasons = MatchRejectionReason;
    type Warnings = MatchWarningFlags;

    fn name(&self) -> &'static str {
        "MatchGameCountCheck"
    }

    fn check(&self, match_: &Match, _: &CheckContext) -> Verdict<MatchRejectionReason, MatchWarningFlags> {
        let Some(fraction) = match_.valid_game_fraction() else {
            return Verdict::fail(MatchRejectionReason::NO_GAMES);
        };

        let valid = match_
            .games
            .iter()
            .filter(|g| g.verification_status.is_valid())
            .count();
        if valid == 0 {
            return Verdict::fail(MatchRejectionReason::NO_VALID_GAMES);
        }
        if fraction < VERIFIED_CHILD_RATIO {
            return Verdict::fail(MatchRejectionReason::NOT_ENOUGH_VALID_GAMES);
        }
        if valid < LOW_GAME_COUNT {
            return Verdict::pass_with_warnings(MatchWarningFlags::LOW_GAME_COUNT);
        }
        Verdict::pass()
    }
}

/// Audit-only check on the conventional "Tournament: (A) vs (B)" lobby name.
/// Submitters sometimes rename lobbies mid-series; reviewers want to know,
/// but it says nothing about the data itself.
pub struct MatchNameFormatCheck;

impl AutomationCheck<Match> for MatchNameFormatCheck {
    type Reasons = MatchRejectionReason;
    type Warnings = MatchWarningFlags;

    fn name(&self) -> &'static str {
        "MatchNameFormatCheck"
    }

    fn check(&self, match_: &Match, _: &CheckContext) -> Verdict<MatchRejectionReason, MatchWarningFlags> {
        let name = match_.name.to_ascii_lowercase();
        if name.contains(" vs ") || name.contains(" vs. ") {
            Verdict::pass()
        } else {
            Verdict::pass_with_warnings(MatchWarningFlags::UNEXPECTED_NAME_FORMAT)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
