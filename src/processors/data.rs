//! Data-fetch stage: drives the external fetch collaborator for every match
//! still waiting on data.
//!
//! Per-match fetch failures are isolated: one unreachable match must not
//! stall its siblings. A failed match keeps `NeedsData` and is retried on a
//! later pass; the tournament advances only once every match has its data.

use tracing::{debug, info, warn};

use crate::entities::{MatchProcessingStatus, Tournament, TournamentProcessingStatus};
use crate::fetch::DataFetcher;

/// Fetch data for every match of the tournament that still needs it, then
/// advance the tournament out of `NeedsData` if the subtree is complete.
pub async fn fetch_tournament_data(tournament: &mut Tournament, fetcher: &dyn DataFetcher) {
    if tournament.processing_status != TournamentProcessingStatus::NeedsData {
        debug!(
            tournament_id = tournament.id,
            status = ?tournament.processing_status,
            "tournament does not require data processing"
        );
        return;
    }

    let mut fetched = 0usize;
    let mut failed = 0usize;
    for match_ in &mut tournament.matches {
        if match_.processing_status != MatchProcessingStatus::NeedsData {
            continue;
        }
        match fetcher.fetch_match(match_.external_id).await {
            Ok(data) => {
                match_.apply_data(data);
                fetched += 1;
            }
            Err(e) => {
                // stage unchanged; the scheduler retries on a later pass
                warn!(
                    match_id = match_.id,
                    external_id = match_.external_id,
                    error = %e,
                    "match data fetch failed"
                );
                failed += 1;
            }
        }
    }

    let games: usize = tournament.matches.iter().map(|m| m.games.len()).sum();
    let scores: usize = tournament
        .matches
        .iter()
        .flat_map(|m| &m.games)
        .map(|g| g.scores.len())
        .sum();
    info!(
        tournament_id = tournament.id,
        matches = tournament.matches.len(),
        games,
        scores,
        fetched,
        failed,
        "tournament data processing summary"
    );

    if tournament
        .matches
        .iter()
        .all(|m| m.processing_status > MatchProcessingStatus::NeedsData)
    {
        tournament.processing_status = TournamentProcessingStatus::NeedsAutomationChecks;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Match, Ruleset};
    use crate::fetch::{MatchData, StaticFetcher};
    use chrono::{TimeZone, Utc};

    fn payload(name: &str) -> MatchData {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
        MatchData {
            name: name.into(),
            start_time: Some(start),
            end_time: Some(start + chrono::Duration::hours(1)),
            games: Vec::new(),
        }
    }

    fn tournament_with_matches(external_ids: &[u64]) -> Tournament {
        let mut t = Tournament::new(1, "Cup", Ruleset::Standard, Some(2));
        for (i, &ext) in external_ids.iter().enumerate() {
            t.matches.push(Match::new(i as i32, ext));
        }
        t
    }

    #[tokio::test]
    async fn complete_fetch_advances_the_tournament() {
        let fetcher = StaticFetcher::new()
            .with_match(1, payload("Cup: (A) vs (B)"))
            .with_match(2, payload("Cup: (C) vs (D)"));
        let mut t = tournament_with_matches(&[1, 2]);

        fetch_tournament_data(&mut t, &fetcher).await;

        assert_eq!(
            t.processing_status,
            TournamentProcessingStatus::NeedsAutomationChecks
        );
        assert!(t
            .matches
            .iter()
            .all(|m| m.processing_status == MatchProcessingStatus::NeedsAutomationChecks));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_match_and_tournament_in_place() {
        let fetcher = StaticFetcher::new().with_match(1, payload("Cup: (A) vs (B)"));
        let mut t = tournament_with_matches(&[1, 2]); // match 2 unknown to source

        fetch_tournament_data(&mut t, &fetcher).await;

        assert_eq!(t.processing_status, TournamentProcessingStatus::NeedsData);
        assert_eq!(
            t.matches[0].processing_status,
            MatchProcessingStatus::NeedsAutomationChecks
        );
        assert_eq!(t.matches[1].processing_status, MatchProcessingStatus::NeedsData);
    }

    #[tokio::test]
    async fn retry_completes_after_source_recovers() {
        let mut t = tournament_with_matches(&[1, 2]);
        let partial = StaticFetcher::new().with_match(1, payload("Cup: (A) vs (B)"));
        fetch_tournament_data(&mut t, &partial).await;

        let full = StaticFetcher::new()
            .with_match(1, payload("Cup: (A) vs (B)"))
            .with_match(2, payload("Cup: (C) vs (D)"));
        fetch_tournament_data(&mut t, &full).await;

        assert_eq!(
            t.processing_status,
            TournamentProcessingStatus::NeedsAutomationChecks
        );
    }

    #[tokio::test]
    async fn non_data_stage_is_a_no_op() {
        let fetcher = StaticFetcher::new();
        let mut t = tournament_with_matches(&[]);
        t.processing_status = TournamentProcessingStatus::NeedsVerification;

        fetch_tournament_data(&mut t, &fetcher).await;

        assert_eq!(
            t.processing_status,
            TournamentProcessingStatus::NeedsVerification
        );
    }
}
