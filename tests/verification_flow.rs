//! End-to-end verification lifecycle tests: a tournament subtree travels
//! from submission through data fetch, automation checks, confirmation and
//! approval, exercising the cascade and advancement rules along the way.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use matchwarden::entities::{
    Game, GameProcessingStatus, GameRejectionReason, GameWarningFlags, Match,
    MatchProcessingStatus, Mods, Ruleset, Score, ScoreProcessingStatus, ScoreRejectionReason,
    ScoringType, Team, TeamType, Tournament, TournamentProcessingStatus,
    TournamentRejectionReason, VerificationStatus,
};
use matchwarden::fetch::{MatchData, StaticFetcher};
use matchwarden::processors;
use matchwarden::store::{MemoryStore, TournamentStore};
use matchwarden::{Worker, WorkerConfig};

fn score(id: i32, team: Team, points: u64) -> Score {
    Score {
        id,
        player_id: id * 10,
        team,
        points,
        mods: Mods::empty(),
        ruleset: Ruleset::Standard,
        verification_status: VerificationStatus::None,
        rejection_reason: ScoreRejectionReason::empty(),
        processing_status: ScoreProcessingStatus::NeedsAutomationChecks,
    }
}

fn game(id: i32, scores: Vec<Score>) -> Game {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
    Game {
        id,
        external_id: id as u64,
        ruleset: Ruleset::Standard,
        scoring_type: ScoringType::ScoreV2,
        team_type: TeamType::TeamVs,
        mods: Mods::empty(),
        start_time: Some(start),
        end_time: Some(start + Duration::seconds(300)),
        verification_status: VerificationStatus::None,
        rejection_reason: GameRejectionReason::empty(),
        warning_flags: GameWarningFlags::empty(),
        processing_status: GameProcessingStatus::NeedsAutomationChecks,
        scores,
    }
}

fn one_vs_one_game(id: i32) -> Game {
    game(
        id,
        vec![score(id * 100, Team::Red, 400_000), score(id * 100 + 1, Team::Blue, 350_000)],
    )
}

fn match_payload(games: Vec<Game>) -> MatchData {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
    MatchData {
        name: "Spring Cup: (A) vs (B)".into(),
        start_time: Some(start),
        end_time: Some(start + Duration::hours(2)),
        games,
    }
}

/// Tournament with one match of four clean 1v1 games, plus its fetcher.
fn submission() -> (Tournament, StaticFetcher) {
    let mut tournament = Tournament::new(1, "Spring Cup", Ruleset::Standard, Some(1));
    tournament.matches.push(Match::new(1, 9001));
    let fetcher = StaticFetcher::new().with_match(
        9001,
        match_payload((0..4).map(one_vs_one_game).collect()),
    );
    (tournament, fetcher)
}

#[tokio::test]
async fn full_lifecycle_from_submission_to_done() {
    let (mut tournament, fetcher) = submission();

    // pass 1: fetch + automation verdicts for match/game/score levels
    processors::process_tournament(&mut tournament, &fetcher).await;
    assert_eq!(
        tournament.processing_status,
        TournamentProcessingStatus::NeedsAutomationChecks
    );
    let m = &tournament.matches[0];
    assert_eq!(m.verification_status, VerificationStatus::PreVerified);
    assert_eq!(m.processing_status, MatchProcessingStatus::NeedsVerification);
    assert!(m
        .games
        .iter()
        .all(|g| g.verification_status == VerificationStatus::PreVerified));

    // human confirms the provisional verdicts below the tournament
    tournament.confirm_pre_statuses();
    processors::advance_tournament(&mut tournament);
    assert_eq!(
        tournament.matches[0].processing_status,
        MatchProcessingStatus::Done
    );

    // pass 2: all matches done, the tournament's own verdict lands
    processors::process_tournament(&mut tournament, &fetcher).await;
    assert_eq!(
        tournament.verification_status,
        VerificationStatus::PreVerified
    );
    assert_eq!(
        tournament.processing_status,
        TournamentProcessingStatus::NeedsVerification
    );

    // confirm the tournament verdict, advance into approval, sign off
    tournament.confirm_pre_statuses();
    processors::advance_tournament(&mut tournament);
    assert_eq!(
        tournament.processing_status,
        TournamentProcessingStatus::NeedsApproval
    );
    assert!(processors::approve_tournament(&mut tournament));
    assert_eq!(tournament.processing_status, TournamentProcessingStatus::Done);
    assert_eq!(tournament.verification_status, VerificationStatus::Verified);
}

#[tokio::test]
async fn confirm_cascade_converts_the_whole_subtree_in_one_pass() {
    let (mut tournament, fetcher) = submission();
    processors::process_tournament(&mut tournament, &fetcher).await;

    // sabotage one game so both provisional verdict kinds exist
    tournament.matches[0].games[0].verification_status = VerificationStatus::PreRejected;
    // and leave one score untouched by automation
    tournament.matches[0].games[1].scores[0].verification_status = VerificationStatus::None;

    tournament.confirm_pre_statuses();

    let m = &tournament.matches[0];
    assert_eq!(m.verification_status, VerificationStatus::Verified);
    assert_eq!(
        m.games[0].verification_status,
        VerificationStatus::Rejected
    );
    assert_eq!(m.games[2].verification_status, VerificationStatus::Verified);
    assert_eq!(
        m.games[1].scores[0].verification_status,
        VerificationStatus::None
    );
    assert_eq!(
        m.games[0].scores[0].verification_status,
        VerificationStatus::Verified
    );
}

#[tokio::test]
async fn confirm_is_idempotent_over_the_subtree() {
    let (mut tournament, fetcher) = submission();
    processors::process_tournament(&mut tournament, &fetcher).await;

    tournament.confirm_pre_statuses();
    let snapshot = serde_json::to_string(&{
        let mut t = tournament.clone();
        t.last_processed_at = None;
        t
    })
    .unwrap();

    tournament.confirm_pre_statuses();
    tournament.last_processed_at = None;
    assert_eq!(serde_json::to_string(&tournament).unwrap(), snapshot);
}

#[tokio::test]
async fn reset_is_idempotent_for_the_same_force_value() {
    let (mut tournament, fetcher) = submission();
    processors::process_tournament(&mut tournament, &fetcher).await;
    tournament.confirm_pre_statuses();

    tournament.reset_automation_statuses(false);
    let snapshot = serde_json::to_string(&tournament).unwrap();
    tournament.reset_automation_statuses(false);
    assert_eq!(serde_json::to_string(&tournament).unwrap(), snapshot);

    tournament.reset_automation_statuses(true);
    let forced = serde_json::to_string(&tournament).unwrap();
    tournament.reset_automation_statuses(true);
    assert_eq!(serde_json::to_string(&tournament).unwrap(), forced);
}

#[tokio::test]
async fn terminal_entities_survive_unforced_reset() {
    let (mut tournament, fetcher) = submission();
    processors::process_tournament(&mut tournament, &fetcher).await;
    tournament.confirm_pre_statuses(); // match + games + scores now terminal
    processors::advance_tournament(&mut tournament);

    let before = tournament.matches[0].clone();
    tournament.reset_automation_statuses(false);

    let m = &tournament.matches[0];
    assert_eq!(m.verification_status, before.verification_status);
    assert_eq!(m.rejection_reason, before.rejection_reason);
    assert_eq!(m.processing_status, before.processing_status);

    // the tournament itself had no verdict yet, so it was re-armed
    assert_eq!(
        tournament.processing_status,
        TournamentProcessingStatus::NeedsAutomationChecks
    );
}

#[tokio::test]
async fn forced_reset_clears_every_descendant() {
    let (mut tournament, fetcher) = submission();
    processors::process_tournament(&mut tournament, &fetcher).await;
    tournament.confirm_pre_statuses();

    tournament.reset_automation_statuses(true);

    assert_eq!(tournament.verification_status, VerificationStatus::None);
    assert!(tournament.rejection_reason.is_empty());
    for m in &tournament.matches {
        assert_eq!(m.verification_status, VerificationStatus::None);
        assert!(m.rejection_reason.is_empty());
        assert_eq!(m.processing_status, MatchProcessingStatus::NeedsAutomationChecks);
        for g in &m.games {
            assert_eq!(g.verification_status, VerificationStatus::None);
            assert!(g.rejection_reason.is_empty());
            for s in &g.scores {
                assert_eq!(s.verification_status, VerificationStatus::None);
                assert!(s.rejection_reason.is_empty());
            }
        }
    }

    // data survives the reset: no second fetch is needed to re-run checks
    assert!(!tournament.matches[0].games.is_empty());
}

#[tokio::test]
async fn threshold_tolerates_a_bounded_fraction_of_invalid_matches() {
    // 10 matches, lobby of 1; three of them will fail automation
    let mut tournament = Tournament::new(1, "Spring Cup", Ruleset::Standard, Some(1));
    let mut fetcher = StaticFetcher::new();
    for i in 0..10u64 {
        tournament.matches.push(Match::new(i as i32, 9000 + i));
        let mut payload = match_payload((0..4).map(|g| one_vs_one_game(i as i32 * 10 + g)).collect());
        if i < 3 {
            payload.end_time = None; // NO_END_TIME rejection
        }
        fetcher = fetcher.with_match(9000 + i, payload);
    }

    processors::process_tournament(&mut tournament, &fetcher).await;
    // 7 of 10 valid: 0.7 < 0.75
    tournament.confirm_pre_statuses();
    processors::advance_tournament(&mut tournament);
    processors::check_tournament(&mut tournament);

    assert_eq!(
        tournament.verification_status,
        VerificationStatus::PreRejected
    );
    assert_eq!(
        tournament.rejection_reason,
        TournamentRejectionReason::NOT_ENOUGH_VERIFIED_MATCHES
    );

    // with 8 of 10 valid the same tournament passes
    let mut tournament = Tournament::new(2, "Spring Cup", Ruleset::Standard, Some(1));
    let mut fetcher = StaticFetcher::new();
    for i in 0..10u64 {
        tournament.matches.push(Match::new(i as i32, 9000 + i));
        let mut payload = match_payload((0..4).map(|g| one_vs_one_game(i as i32 * 10 + g)).collect());
        if i < 2 {
            payload.end_time = None;
        }
        fetcher = fetcher.with_match(9000 + i, payload);
    }
    processors::process_tournament(&mut tournament, &fetcher).await;
    tournament.confirm_pre_statuses();
    processors::advance_tournament(&mut tournament);
    processors::check_tournament(&mut tournament);

    assert_eq!(
        tournament.verification_status,
        VerificationStatus::PreVerified
    );
    assert!(tournament.rejection_reason.is_empty());
}

#[tokio::test]
async fn strict_advancement_waits_for_every_match() {
    let (mut tournament, fetcher) = submission();
    // add two more matches sharing the same payload shape
    tournament.matches.push(Match::new(2, 9002));
    tournament.matches.push(Match::new(3, 9003));
    let fetcher = fetcher
        .with_match(9002, match_payload((10..14).map(one_vs_one_game).collect()))
        .with_match(9003, match_payload((20..24).map(one_vs_one_game).collect()));

    processors::process_tournament(&mut tournament, &fetcher).await;

    // confirm two matches only; the third keeps its provisional verdict
    tournament.matches[0].verification_status = VerificationStatus::Verified;
    tournament.matches[0].processing_status = MatchProcessingStatus::Done;
    tournament.matches[1].verification_status = VerificationStatus::Verified;
    tournament.matches[1].processing_status = MatchProcessingStatus::Done;

    processors::process_tournament(&mut tournament, &fetcher).await;
    assert_eq!(
        tournament.processing_status,
        TournamentProcessingStatus::NeedsAutomationChecks
    );
    assert_eq!(tournament.verification_status, VerificationStatus::None);

    // third match finishes review; the next evaluation advances
    tournament.matches[2].verification_status = VerificationStatus::Verified;
    for g in &mut tournament.matches[2].games {
        g.verification_status = VerificationStatus::Verified;
        for s in &mut g.scores {
            s.verification_status = VerificationStatus::Verified;
        }
    }
    processors::advance_tournament(&mut tournament);
    assert_eq!(
        tournament.matches[2].processing_status,
        MatchProcessingStatus::Done
    );

    processors::process_tournament(&mut tournament, &fetcher).await;
    assert_eq!(
        tournament.processing_status,
        TournamentProcessingStatus::NeedsVerification
    );
    assert_eq!(
        tournament.verification_status,
        VerificationStatus::PreVerified
    );
}

#[tokio::test]
async fn worker_drives_the_lifecycle_through_the_store() {
    let (tournament, fetcher) = submission();
    let id = tournament.id;
    let store = Arc::new(MemoryStore::new());
    store.insert(tournament).await;
    let worker = Worker::new(store.clone(), Arc::new(fetcher), WorkerConfig::default());

    // batch pass fetches data and applies child verdicts
    assert_eq!(worker.process_batch().await.unwrap(), 1);
    worker.confirm_pre_statuses(id).await.unwrap();

    // next pass lands the tournament verdict
    worker.process_by_id(id).await.unwrap();
    worker.confirm_pre_statuses(id).await.unwrap();
    worker.process_by_id(id).await.unwrap();
    assert!(worker.approve(id).await.unwrap());

    let done = store.load(id).await.unwrap().unwrap();
    assert_eq!(done.processing_status, TournamentProcessingStatus::Done);
    assert_eq!(done.verification_status, VerificationStatus::Verified);

    // done tournaments no longer appear in batch selection
    assert_eq!(worker.process_batch().await.unwrap(), 0);
}
