//! Score-level automation checks.

use super::{disallowed_mods, AutomationCheck, CheckChain, CheckContext, Verdict, MINIMUM_SCORE_POINTS};
use crate::entities::{NoWarnings, Score, ScoreRejectionReason};

/// Declared execution order for score checks.
pub fn score_checks() -> CheckChain<Score, ScoreRejectionReason, NoWarnings> {
    vec![
        Box::new(ScoreMinimumCheck),
        Box::new(ScoreModsCheck),
        Box::new(ScoreRulesetCheck),
    ]
}

/// Rejects point totals too low to be a real play (abandoned lobbies,
/// referees joining a slot, misclicks).
pub struct ScoreMinimumCheck;

impl AutomationCheck<Score> for ScoreMinimumCheck {
    type Reasons = ScoreRejectionReason;
    type Warnings = NoWarnings;

    fn name(&self) -> &'static str {
        "ScoreMinimumCheck"
    }

    fn check(&self, score: &Score, _: &CheckContext) -> Verdict<ScoreRejectionReason> {
        if score.points < MINIMUM_SCORE_POINTS {
            Verdict::fail(ScoreRejectionReason::SCORE_BELOW_MINIMUM)
        } else {
            Verdict::pass()
        }
    }
}

/// Rejects plays with mods that invalidate the result.
pub struct ScoreModsCheck;

impl AutomationCheck<Score> for ScoreModsCheck {
    type Reasons = ScoreRejectionReason;
    type Warnings = NoWarnings;

    fn name(&self) -> &'static str {
        "ScoreModsCheck"
    }

    fn check(&self, score: &Score, _: &CheckContext) -> Verdict<ScoreRejectionReason> {
        if score.mods.intersects(disallowed_mods()) {
            Verdict::fail(ScoreRejectionReason::INVALID_MODS)
        } else {
            Verdict::pass()
        }
    }
}

/// Rejects plays submitted under a different ruleset than the tournament is
/// sanctioned for.
pub struct ScoreRulesetCheck;

impl AutomationCheck<Score> for ScoreRulesetCheck {
    type Reasons = ScoreRejectionReason;
    type Warnings = NoWarnings;

    fn name(&self) -> &'static str {
        "ScoreRulesetCheck"
    }

    fn check(&self, score: &Score, ctx: &CheckContext) -> Verdict<ScoreRejectionReason> {
        if score.ruleset != ctx.ruleset {
            Verdict::fail(ScoreRejectionReason::RULESET_MISMATCH)
        } else {
            Verdict::pass()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
