//! Game-level automation checks.
//!
//! Game checks run after the game's scores already carry their own verdicts,
//! so count/shape checks can reason over *valid* scores only. Prerequisite
//! data that is simply absent (an unregistered lobby size) produces a
//! dedicated insufficient-data flag, distinct from a genuine mismatch.

use chrono::Duration;

use super::{
    disallowed_mods, AutomationCheck, CheckChain, CheckContext, Verdict, MAX_LOBBY_SIZE,
    SHORT_GAME_SECONDS,
};
use crate::entities::{Game, GameRejectionReason, GameWarningFlags, ScoringType, Team, TeamType};

/// Declared execution order for game checks.
pub fn game_checks() -> CheckChain<Game, GameRejectionReason, GameWarningFlags> {
    vec![
        Box::new(GameScoreCountCheck),
        Box::new(GameRulesetCheck),
        Box::new(GameScoringTypeCheck),
        Box::new(GameModsCheck),
        Box::new(GameTeamTypeCheck),
        Box::new(GameEndTimeCheck),
    ]
}

/// Validates that the number of valid scores fits the registered lobby size.
///
/// The registered size must itself be a playable value (1..=[`MAX_LOBBY_SIZE`]
/// per side; an absurd registration is a bad value, not insufficient data).
/// Expected player count is `2 * lobby_size` (two sides), and for team
/// modes each team must field exactly `lobby_size` valid scores.
pub struct GameScoreCountCheck;

impl AutomationCheck<Game> for GameScoreCountCheck {
    type Reasons = GameRejectionReason;
    type Warnings = GameWarningFlags;

    fn name(&self) -> &'static str {
        "GameScoreCountCheck"
    }

    fn check(&self, game: &Game, ctx: &CheckContext) -> Verdict<GameRejectionReason, GameWarningFlags> {
        if game.scores.is_empty() {
            return Verdict::fail(GameRejectionReason::NO_SCORES);
        }

        let Some(lobby_size) = ctx.lobby_size else {
            // missing prerequisite, not a mismatch
            return Verdict::fail(GameRejectionReason::LOBBY_SIZE_UNKNOWN);
        };
        if !(1..=MAX_LOBBY_SIZE).contains(&lobby_size) {
            return Verdict::fail(GameRejectionReason::LOBBY_SIZE_INVALID);
        }
        let lobby_size = usize::from(lobby_size);

        let valid_total = game.valid_scores().count();
        if valid_total != lobby_size * 2 {
            return Verdict::fail(GameRejectionReason::LOBBY_SIZE_MISMATCH);
        }

        if matches!(game.team_type, TeamType::TeamVs | TeamType::TagTeamVs) {
            let red = game
                .valid_scores()
                .filter(|s| s.team == Team::Red)
                .count();
            let blue = game
                .valid_scores()
                .filter(|s| s.team == Team::Blue)
                .count();
            if red != lobby_size || blue != lobby_size {
                return Verdict::fail(GameRejectionReason::LOBBY_SIZE_MISMATCH);
            }
        }

        Verdict::pass()
    }
}

/// Rejects games played under a different ruleset than the tournament.
pub struct GameRulesetCheck;

impl AutomationCheck<Game> for GameRulesetCheck {
    type Reasons = GameRejectionReason;
    type Warnings = GameWarningFlags;

    fn name(&self) -> &'static str {
        "GameRulesetCheck"
    }

    fn check(&self, game: &Game, ctx: &CheckContext) -> Verdict<GameRejectionReason, GameWarningFlags> {
        if game.ruleset != ctx.ruleset {
            Verdict::fail(GameRejectionReason::RULESET_MISMATCH)
        } else {
            Verdict::pass()
        }
    }
}

/// Allow-list check on the lobby scoring type. Combo scoring cannot be
/// compared across plays and is never rateable.
pub struct GameScoringTypeCheck;

impl AutomationCheck<Game> for GameScoringTypeCheck {
    type Reasons = GameRejectionReason;
    type Warnings = GameWarningFlags;

    fn name(&self) -> &'static str {
        "GameScoringTypeCheck"
    }

    fn check(&self, game: &Game, _: &CheckContext) -> Verdict<GameRejectionReason, GameWarningFlags> {
        if game.scoring_type == ScoringType::Combo {
            Verdict::fail(GameRejectionReason::INVALID_SCORING_TYPE)
        } else {
            Verdict::pass()
        }
    }
}

/// Rejects games where the lobby forced a disallowed mod on everyone.
pub struct GameModsCheck;

impl AutomationCheck<Game> for GameModsCheck {
    type Reasons = GameRejectionReason;
    type Warnings = GameWarningFlags;

    fn name(&self) -> &'static str {
        "GameModsCheck"
    }

    fn check(&self, game: &Game, _: &CheckContext) -> Verdict<GameRejectionReason, GameWarningFlags> {
        if game.mods.intersects(disallowed_mods()) {
            Verdict::fail(GameRejectionReason::INVALID_MODS)
        } else {
            Verdict::pass()
        }
    }
}

/// Validates the team arrangement: tag modes are never rateable, and the
/// arrangement must be consistent with the registered lobby size.
pub struct GameTeamTypeCheck;

impl AutomationCheck<Game> for GameTeamTypeCheck {
    type Reasons = GameRejectionReason;
    type Warnings = GameWarningFlags;

    fn name(&self) -> &'static str {
        "GameTeamTypeCheck"
    }

    fn check(&self, game: &Game, ctx: &CheckContext) -> Verdict<GameRejectionReason, GameWarningFlags> {
        match game.team_type {
            TeamType::TagCoop | TeamType::TagTeamVs => {
                Verdict::fail(GameRejectionReason::INVALID_TEAM_TYPE)
            }
            TeamType::HeadToHead => match ctx.lobby_size {
                None => Verdict::fail(GameRejectionReason::LOBBY_SIZE_UNKNOWN),
                Some(1) => Verdict::pass(),
                Some(_) => Verdict::fail(GameRejectionReason::INVALID_TEAM_TYPE),
            },
            TeamType::TeamVs => match ctx.lobby_size {
                None => Verdict::fail(GameRejectionReason::LOBBY_SIZE_UNKNOWN),
                Some(size) if size >= 1 => Verdict::pass(),
                Some(_) => Verdict::fail(GameRejectionReason::INVALID_TEAM_TYPE),
            },
        }
    }
}

/// Rejects games without an end timestamp; also flags (but does not reject)
/// games that finished implausibly fast.
pub struct GameEndTimeCheck;

impl AutomationCheck<Game> for GameEndTimeCheck {
    type Reasons = GameRejectionReason;
    type Warnings = GameWarningFlags;

    fn name(&self) -> &'static str {
        "GameEndTimeCheck"
    }

    fn check(&self, game: &Game, _: &CheckContext) -> Verdict<GameRejectionReason, GameWarningFlags> {
        let Some(end) = game.end_time else {
            return Verdict::fail(GameRejectionReason::NO_END_TIME);
        };
        if let Some(start) = game.start_time {
            if end - start < Duration::seconds(SHORT_GAME_SECONDS) {
                return Verdict::pass_with_warnings(GameWarningFlags::SHORT_DURATION);
            }
        }
        Verdict::pass()
    }
}

// ============================================================================
// Tests
// ============================================================================
