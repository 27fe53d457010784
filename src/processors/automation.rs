//! Bottom-up automation check execution and verdict application.
//!
//! One call to [`check_tournament`] is one synchronous pass over the whole
//! subtree: scores first, then games, matches, and finally the tournament's
//! own checks. Applying a verdict is the only place verification statuses
//! are written by automation, and it can only ever produce the provisional
//! `PreVerified`/`PreRejected`; terminal statuses come from confirmation.
//!
//! Every entry point is a logged no-op when the entity is not at its
//! `NeedsAutomationChecks` stage, so re-running a pass over a partially
//! processed subtree is safe.

use tracing::debug;

use crate::checks::{
    self, game::game_checks, matches::match_checks, score::score_checks,
    tournament::tournament_checks, CheckContext, Verdict,
};
use crate::entities::{
    Game, GameProcessingStatus, GameRejectionReason, GameWarningFlags, Match,
    MatchProcessingStatus, MatchRejectionReason, MatchWarningFlags, NoWarnings, Score,
    ScoreProcessingStatus, ScoreRejectionReason, Tournament, TournamentProcessingStatus,
    TournamentRejectionReason, VerificationStatus,
};

fn verdict_status(passed: bool) -> VerificationStatus {
    if passed {
        VerificationStatus::PreVerified
    } else {
        VerificationStatus::PreRejected
    }
}

/// Run the score check chain and apply the verdict.
///
/// Returns the aggregate verdict, or `None` if the score was not awaiting
/// automation (precondition skip).
pub fn check_score(
    score: &mut Score,
    ctx: &CheckContext,
) -> Option<Verdict<ScoreRejectionReason>> {
    if score.processing_status != ScoreProcessingStatus::NeedsAutomationChecks {
        debug!(
            score_id = score.id,
            status = ?score.processing_status,
            "score does not require automation checks"
        );
        return None;
    }

    let verdict = checks::run_chain(&*score, ctx, &score_checks());
    score.rejection_reason |= verdict.reasons;
    score.verification_status = verdict_status(verdict.passed);
    score.processing_status = ScoreProcessingStatus::NeedsVerification;
    Some(verdict)
}

/// Run checks for a game: its scores first, then the game chain.
pub fn check_game(
    game: &mut Game,
    ctx: &CheckContext,
) -> Option<Verdict<GameRejectionReason, GameWarningFlags>> {
    for score in &mut game.scores {
        check_score(score, ctx);
    }

    if game.processing_status != GameProcessingStatus::NeedsAutomationChecks {
        debug!(
            game_id = game.id,
            status = ?game.processing_status,
            "game does not require automation checks"
        );
        return None;
    }

    let verdict = checks::run_chain(&*game, ctx, &game_checks());
    game.rejection_reason |= verdict.reasons;
    game.warning_flags |= verdict.warnings;
    game.verification_status = verdict_status(verdict.passed);
    game.processing_status = GameProcessingStatus::NeedsVerification;
    Some(verdict)
}

/// Run checks for a match: its games (and their scores) first, then the
/// match chain.
pub fn check_match(
    match_: &mut Match,
    ctx: &CheckContext,
) -> Option<Verdict<MatchRejectionReason, MatchWarningFlags>> {
    for game in &mut match_.games {
        check_game(game, ctx);
    }

    if match_.processing_status != MatchProcessingStatus::NeedsAutomationChecks {
        debug!(
            match_id = match_.id,
            status = ?match_.processing_status,
            "match does not require automation checks"
        );
        return None;
    }

    let verdict = checks::run_chain(&*match_, ctx, &match_checks());
    match_.rejection_reason |= verdict.reasons;
    match_.warning_flags |= verdict.warnings;
    match_.verification_status = verdict_status(verdict.passed);
    match_.processing_status = MatchProcessingStatus::NeedsVerification;
    Some(verdict)
}

/// Run one automation pass over the whole subtree.
///
/// The tournament's own chain is an aggregate over match verdicts that have
/// already been through human review, so it runs only once every match has
/// completed its pipeline; until then the tournament stays at
/// `NeedsAutomationChecks` and the pass ends with a logged skip.
pub fn check_tournament(
    tournament: &mut Tournament,
) -> Option<Verdict<TournamentRejectionReason, NoWarnings>> {
    let ctx = CheckContext::for_tournament(tournament);

    for match_ in &mut tournament.matches {
        check_match(match_, &ctx);
    }

    if tournament.processing_status != TournamentProcessingStatus::NeedsAutomationChecks {
        debug!(
            tournament_id = tournament.id,
            status = ?tournament.processing_status,
            "tournament does not require automation checks"
        );
        return None;
    }

    if !tournament
        .matches
        .iter()
        .all(|m| m.processing_status == MatchProcessingStatus::Done)
    {
        debug!(
            tournament_id = tournament.id,
            "tournament checks deferred until all matches complete processing"
        );
        return None;
    }

    let verdict = checks::run_chain(&*tournament, &ctx, &tournament_checks());
    tournament.rejection_reason |= verdict.reasons;
    tournament.verification_status = verdict_status(verdict.passed);
    tournament.processing_status = TournamentProcessingStatus::NeedsVerification;
    Some(verdict)
}

// ============================================================================
// Tests
// ============================================================================
