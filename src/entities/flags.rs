//! Rejection-reason and warning bitmaps plus the play-mode enums.
//!
//! Every automation check owns one or more flags. Flags accumulate with
//! bitwise OR while a check pass runs and are cleared only by reset, so the
//! bitmap is a full explanation of *why* an entity was rejected, not just
//! the last failure observed.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Reasons a tournament failed automation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct TournamentRejectionReason: u32 {
        /// No match in the tournament is pre-verified or verified
        const NO_VERIFIED_MATCHES = 1 << 0;
        /// Valid match fraction is below the verified-child ratio
        const NOT_ENOUGH_VERIFIED_MATCHES = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Reasons a match failed automation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct MatchRejectionReason: u32 {
        /// The match never finished (no end timestamp from the source)
        const NO_END_TIME = 1 << 0;
        /// The match contains no games at all
        const NO_GAMES = 1 << 1;
        /// No game in the match is pre-verified or verified
        const NO_VALID_GAMES = 1 << 2;
        /// Valid game fraction is below the verified-child ratio
        const NOT_ENOUGH_VALID_GAMES = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Reasons a game failed automation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct GameRejectionReason: u32 {
        /// The game has no scores at all
        const NO_SCORES = 1 << 0;
        /// Tournament lobby size is unknown, so the score count cannot be
        /// validated (insufficient data, distinct from a mismatch)
        const LOBBY_SIZE_UNKNOWN = 1 << 1;
        /// Valid score count does not fit the tournament lobby size
        const LOBBY_SIZE_MISMATCH = 1 << 2;
        /// Game ruleset disagrees with the tournament ruleset
        const RULESET_MISMATCH = 1 << 3;
        /// Scoring type outside the allow-list
        const INVALID_SCORING_TYPE = 1 << 4;
        /// A disallowed mod was applied at the lobby level
        const INVALID_MODS = 1 << 5;
        /// Team type unsupported or inconsistent with the lobby size
        const INVALID_TEAM_TYPE = 1 << 6;
        /// The game never finished (no end timestamp)
        const NO_END_TIME = 1 << 7;
        /// Registered lobby size is outside the playable range (bad value,
        /// distinct from an unknown one)
        const LOBBY_SIZE_INVALID = 1 << 8;
    }
}

bitflags::bitflags! {
    /// Reasons a score failed automation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ScoreRejectionReason: u32 {
        /// Point total below the minimum considered a real play
        const SCORE_BELOW_MINIMUM = 1 << 0;
        /// A disallowed mod was applied by the player
        const INVALID_MODS = 1 << 1;
        /// Score ruleset disagrees with the tournament ruleset
        const RULESET_MISMATCH = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Non-fatal match anomalies kept for audit; never block verification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct MatchWarningFlags: u32 {
        /// Lobby name does not follow the expected "A vs B" convention
        const UNEXPECTED_NAME_FORMAT = 1 << 0;
        /// Fewer valid games than a typical best-of series
        const LOW_GAME_COUNT = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Non-fatal game anomalies kept for audit; never block verification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct GameWarningFlags: u32 {
        /// Game lasted implausibly little time for a full play-through
        const SHORT_DURATION = 1 << 0;
    }
}

bitflags::bitflags! {
    /// Empty warning set for levels that carry no warning flags
    /// (scores and tournaments).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct NoWarnings: u32 {}
}

bitflags::bitflags! {
    /// Gameplay modifiers, applied either at the lobby level (game) or by
    /// an individual player (score).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Mods: u32 {
        const NO_FAIL = 1 << 0;
        const EASY = 1 << 1;
        const HIDDEN = 1 << 3;
        const HARD_ROCK = 1 << 4;
        const SUDDEN_DEATH = 1 << 5;
        const DOUBLE_TIME = 1 << 6;
        const RELAX = 1 << 7;
        const HALF_TIME = 1 << 8;
        const NIGHTCORE = 1 << 9;
        const FLASHLIGHT = 1 << 10;
        const AUTOPLAY = 1 << 11;
        const SPUN_OUT = 1 << 12;
        const AUTOPILOT = 1 << 13;
        const PERFECT = 1 << 14;
    }
}

/// Play mode a tournament is sanctioned for. Every game and score in the
/// tournament is expected to agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ruleset {
    #[default]
    Standard,
    Taiko,
    Catch,
    Mania,
}

/// How a game was scored in the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoringType {
    #[default]
    Score,
    Accuracy,
    /// Combo scoring is not rateable and always fails the allow-list check
    Combo,
    ScoreV2,
}

/// Lobby team arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TeamType {
    #[default]
    HeadToHead,
    TagCoop,
    TeamVs,
    TagTeamVs,
}

/// Team a score was submitted for. `NoTeam` is normal in head-to-head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Team {
    #[default]
    NoTeam,
    Red,
    Blue,
}

// ============================================================================
// Tests
// ============================================================================
