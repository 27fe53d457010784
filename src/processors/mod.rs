//! Processing stages for one tournament subtree.
//!
//! One worker pass over a tournament chains the stages in order (data
//! fetch, automation checks, stage advancement), with each stage guarding on
//! the processing status it owns, so a single entry point serves a
//! tournament anywhere in its lifecycle.

pub mod advancement;
pub mod automation;
pub mod data;

pub use advancement::{advance_game, advance_match, advance_score, advance_tournament, approve_tournament};
pub use automation::{check_game, check_match, check_score, check_tournament};
pub use data::fetch_tournament_data;

use crate::entities::Tournament;
use crate::fetch::DataFetcher;

/// Run one full processing pass: data, then checks, then advancement.
pub async fn process_tournament(tournament: &mut Tournament, fetcher: &dyn DataFetcher) {
    fetch_tournament_data(tournament, fetcher).await;
    check_tournament(tournament);
    advance_tournament(tournament);
}
