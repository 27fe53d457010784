//! Strict processing-stage advancement.
//!
//! Unlike the tolerant verification threshold, stage advancement is strict:
//! a parent moves forward only when *every* child has reached an equivalent
//! or later stage. Each function is idempotent and no-ops when its
//! prerequisites are unmet, so the worker can sweep the tree on every pass.

use tracing::debug;

use crate::entities::{
    Game, GameProcessingStatus, Match, MatchProcessingStatus, Score, ScoreProcessingStatus,
    Tournament, TournamentProcessingStatus,
};

/// Advance a score out of review once its verdict is terminal.
pub fn advance_score(score: &mut Score) -> bool {
    if score.processing_status == ScoreProcessingStatus::NeedsVerification
        && score.verification_status.is_terminal()
    {
        score.processing_status = ScoreProcessingStatus::Done;
        return true;
    }
    false
}

/// Advance a game once its verdict is terminal and all scores are done.
pub fn advance_game(game: &mut Game) -> bool {
    for score in &mut game.scores {
        advance_score(score);
    }

    if game.processing_status == GameProcessingStatus::NeedsVerification
        && game.verification_status.is_terminal()
        && game
            .scores
            .iter()
            .all(|s| s.processing_status == ScoreProcessingStatus::Done)
    {
        game.processing_status = GameProcessingStatus::Done;
        return true;
    }
    false
}

/// Advance a match once its verdict is terminal and all games are done.
pub fn advance_match(match_: &mut Match) -> bool {
    for game in &mut match_.games {
        advance_game(game);
    }

    if match_.processing_status == MatchProcessingStatus::NeedsVerification
        && match_.verification_status.is_terminal()
        && match_
            .games
            .iter()
            .all(|g| g.processing_status == GameProcessingStatus::Done)
    {
        match_.processing_status = MatchProcessingStatus::Done;
        return true;
    }
    false
}

/// Sweep the subtree bottom-up, then try to advance the tournament itself.
///
/// - `NeedsData → NeedsAutomationChecks` once every match has its data
///   (normally done by the data stage; repeated here so advancement alone
///   converges). An empty tournament advances too, so it reaches the
///   match-count check and gets rejected instead of stalling.
/// - `NeedsAutomationChecks → NeedsVerification` is owned by the automation
///   processor: it happens when the tournament verdict is applied.
/// - `NeedsVerification → NeedsApproval` once the tournament's own verdict
///   is terminal.
/// - `NeedsApproval → Done` only through [`approve_tournament`].
pub fn advance_tournament(tournament: &mut Tournament) -> bool {
    for match_ in &mut tournament.matches {
        advance_match(match_);
    }

    match tournament.processing_status {
        TournamentProcessingStatus::NeedsData => {
            // vacuously true for an empty tournament, same as the data
            // stage: the match-count check rejects it, not a stalled stage
            if tournament
                .matches
                .iter()
                .all(|m| m.processing_status > MatchProcessingStatus::NeedsData)
            {
                tournament.processing_status = TournamentProcessingStatus::NeedsAutomationChecks;
                return true;
            }
            false
        }
        TournamentProcessingStatus::NeedsVerification => {
            if tournament.verification_status.is_terminal() {
                tournament.processing_status = TournamentProcessingStatus::NeedsApproval;
                return true;
            }
            false
        }
        _ => false,
    }
}

/// Final human sign-off: `NeedsApproval → Done`. Idempotent no-op at any
/// other stage.
pub fn approve_tournament(tournament: &mut Tournament) -> bool {
    if tournament.processing_status == TournamentProcessingStatus::NeedsApproval {
        tournament.processing_status = TournamentProcessingStatus::Done;
        return true;
    }
    debug!(
        tournament_id = tournament.id,
        status = ?tournament.processing_status,
        "approval skipped; tournament is not awaiting approval"
    );
    false
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        GameRejectionReason, GameWarningFlags, Mods, Ruleset, ScoreRejectionReason, ScoringType,
        Team, TeamType, VerificationStatus,
    };

    fn reviewed_score(status: VerificationStatus) -> Score {
        Score {
            id: 1,
            player_id: 7,
            team: Team::Red,
            points: 200_000,
            mods: Mods::empty(),
            ruleset: Ruleset::Standard,
            verification_status: status,
            rejection_reason: ScoreRejectionReason::empty(),
            processing_status: ScoreProcessingStatus::NeedsVerification,
        }
    }

    fn reviewed_game(status: VerificationStatus) -> Game {
        Game {
            id: 1,
            external_id: 1,
            ruleset: Ruleset::Standard,
            scoring_type: ScoringType::ScoreV2,
            team_type: TeamType::TeamVs,
            mods: Mods::empty(),
            start_time: None,
            end_time: None,
            verification_status: status,
            rejection_reason: GameRejectionReason::empty(),
            warning_flags: GameWarningFlags::empty(),
            processing_status: GameProcessingStatus::NeedsVerification,
            scores: vec![reviewed_score(status)],
        }
    }

    fn reviewed_match(status: VerificationStatus) -> Match {
        let mut m = Match::new(1, 1);
        m.verification_status = status;
        m.processing_status = MatchProcessingStatus::NeedsVerification;
        m.games = vec![reviewed_game(status)];
        m
    }

    #[test]
    fn provisional_verdicts_do_not_advance() {
        let mut s = reviewed_score(VerificationStatus::PreVerified);
        assert!(!advance_score(&mut s));
        assert_eq!(s.processing_status, ScoreProcessingStatus::NeedsVerification);
    }

    #[test]
    fn rejected_entities_still_finish_processing() {
        let mut m = reviewed_match(VerificationStatus::Rejected);
        assert!(advance_match(&mut m));
        assert_eq!(m.processing_status, MatchProcessingStatus::Done);
        assert_eq!(m.games[0].processing_status, GameProcessingStatus::Done);
    }

    #[test]
    fn match_waits_for_every_game() {
        let mut m = reviewed_match(VerificationStatus::Verified);
        m.games.push(reviewed_game(VerificationStatus::PreVerified)); // not confirmed yet
        assert!(!advance_match(&mut m));
        assert_eq!(m.processing_status, MatchProcessingStatus::NeedsVerification);
    }

    #[test]
    fn tournament_strict_gate_requires_all_matches_done() {
        let mut t = Tournament::new(1, "Cup", Ruleset::Standard, Some(2));
        t.processing_status = TournamentProcessingStatus::NeedsAutomationChecks;
        for status in [
            VerificationStatus::Verified,
            VerificationStatus::Verified,
            VerificationStatus::PreVerified, // still under review
        ] {
            t.matches.push(reviewed_match(status));
            advance_match(t.matches.last_mut().unwrap());
        }

        // two matches Done, one at NeedsVerification: no advancement
        assert!(!advance_tournament(&mut t));
        assert_eq!(
            t.processing_status,
            TournamentProcessingStatus::NeedsAutomationChecks
        );
    }

    #[test]
    fn empty_tournament_advances_to_its_own_rejection() {
        let mut t = Tournament::new(1, "Cup", Ruleset::Standard, Some(2));
        assert!(advance_tournament(&mut t));
        assert_eq!(
            t.processing_status,
            TournamentProcessingStatus::NeedsAutomationChecks
        );

        // the match-count check now owns the outcome
        crate::processors::check_tournament(&mut t);
        assert_eq!(t.verification_status, VerificationStatus::PreRejected);
        assert_eq!(
            t.processing_status,
            TournamentProcessingStatus::NeedsVerification
        );
    }

    #[test]
    fn verification_to_approval_requires_terminal_status() {
        let mut t = Tournament::new(1, "Cup", Ruleset::Standard, Some(2));
        t.processing_status = TournamentProcessingStatus::NeedsVerification;
        t.verification_status = VerificationStatus::PreVerified;
        assert!(!advance_tournament(&mut t));

        t.verification_status = VerificationStatus::Verified;
        assert!(advance_tournament(&mut t));
        assert_eq!(t.processing_status, TournamentProcessingStatus::NeedsApproval);
    }

    #[test]
    fn approval_is_gated_and_idempotent() {
        let mut t = Tournament::new(1, "Cup", Ruleset::Standard, Some(2));
        assert!(!approve_tournament(&mut t)); // still NeedsData

        t.processing_status = TournamentProcessingStatus::NeedsApproval;
        assert!(approve_tournament(&mut t));
        assert_eq!(t.processing_status, TournamentProcessingStatus::Done);
        assert!(!approve_tournament(&mut t)); // second call is a no-op
        assert_eq!(t.processing_status, TournamentProcessingStatus::Done);
    }

    #[test]
    fn advancement_is_idempotent() {
        let mut m = reviewed_match(VerificationStatus::Verified);
        advance_match(&mut m);
        let snapshot = m.clone();
        advance_match(&mut m);
        assert_eq!(m.processing_status, snapshot.processing_status);
    }
}
