//! Entity tree, status enums and flag bitmaps.

pub mod flags;
pub mod model;
pub mod status;

pub use flags::{
    GameRejectionReason, GameWarningFlags, MatchRejectionReason, MatchWarningFlags, Mods,
    NoWarnings, Ruleset, ScoreRejectionReason, ScoringType, Team, TeamType,
    TournamentRejectionReason,
};
pub use model::{Game, Match, Score, Tournament};
pub use status::{
    GameProcessingStatus, MatchProcessingStatus, ScoreProcessingStatus, TournamentProcessingStatus,
    VerificationStatus,
};
