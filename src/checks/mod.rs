//! Automation check pipeline.
//!
//! Each level of the entity tree has an ordered list of checks. A check is a
//! pure function over one entity (plus tournament-level context) that
//! produces a [`Verdict`]: pass/fail, rejection-reason flags and warning
//! flags. The pipeline runs *every* check (a failure never short-circuits)
//! and ORs all flags together, so the accumulated bitmap explains every
//! failure at once and is reproducible for a given declared order.
//!
//! Checks never touch `VerificationStatus` or `ProcessingStatus`; applying
//! the aggregate verdict is the processor's job (see
//! [`crate::processors::automation`]).

pub mod game;
pub mod matches;
pub mod score;
pub mod tournament;

use std::fmt;
use std::ops::BitOrAssign;

use tracing::trace;

use crate::entities::{Ruleset, Tournament};

/// Minimum fraction of valid (`PreVerified`/`Verified`) children a parent
/// needs to pass its threshold check. Deliberately tolerant: a parent can be
/// accepted despite some rejected children.
pub const VERIFIED_CHILD_RATIO: f64 = 0.75;

/// Point totals below this are treated as abandoned or accidental plays.
pub const MINIMUM_SCORE_POINTS: u64 = 1_000;

/// Largest lobby size a real tournament can register per side.
pub const MAX_LOBBY_SIZE: u8 = 8;

/// Valid game count below which a match is flagged (not rejected) as a
/// suspiciously short series.
pub const LOW_GAME_COUNT: usize = 3;

/// Games shorter than this many seconds are flagged as implausibly short.
pub const SHORT_GAME_SECONDS: i64 = 20;

/// Mods that invalidate a play for rating purposes, whether applied at the
/// lobby level or by an individual player.
pub fn disallowed_mods() -> crate::entities::Mods {
    use crate::entities::Mods;
    Mods::SUDDEN_DEATH | Mods::PERFECT | Mods::RELAX | Mods::AUTOPLAY | Mods::AUTOPILOT
}

/// Bound for the bitmap types a verdict accumulates.
///
/// Satisfied by every `bitflags`-generated type in
/// [`crate::entities::flags`]; `Default` is the empty set.
pub trait FlagSet:
    Copy + Default + PartialEq + BitOrAssign + fmt::Debug + Send + Sync + 'static
{
}

impl<T> FlagSet for T where
    T: Copy + Default + PartialEq + BitOrAssign + fmt::Debug + Send + Sync + 'static
{
}

/// Outcome of one check, or of a whole pipeline (aggregated).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict<R, W = crate::entities::NoWarnings> {
    /// Aggregate pass requires every contributing check to have passed
    pub passed: bool,
    /// OR-accumulated rejection reasons from failing checks
    pub reasons: R,
    /// OR-accumulated audit warnings; never affect `passed`
    pub warnings: W,
}

impl<R: FlagSet, W: FlagSet> Verdict<R, W> {
    pub fn pass() -> Self {
        Self {
            passed: true,
            reasons: R::default(),
            warnings: W::default(),
        }
    }

    pub fn pass_with_warnings(warnings: W) -> Self {
        Self {
            passed: true,
            reasons: R::default(),
            warnings,
        }
    }

    pub fn fail(reasons: R) -> Self {
        Self {
            passed: false,
            reasons,
            warnings: W::default(),
        }
    }

    /// Fold another check's verdict into this aggregate.
    pub fn merge(&mut self, other: Verdict<R, W>) {
        self.passed &= other.passed;
        self.reasons |= other.reasons;
        self.warnings |= other.warnings;
    }
}

/// Tournament-level facts the lower-level checks need. Copied out of the
/// tournament before the mutable bottom-up walk starts.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext {
    pub ruleset: Ruleset,
    pub lobby_size: Option<u8>,
}

impl CheckContext {
    pub fn for_tournament(tournament: &Tournament) -> Self {
        Self {
            ruleset: tournament.ruleset,
            lobby_size: tournament.lobby_size,
        }
    }
}

/// One automation check. Implementations must be pure: they read the entity
/// (whose children already carry their own verdicts) and the context, and
/// report flags through the returned verdict only.
pub trait AutomationCheck<E>: Send + Sync {
    type Reasons: FlagSet;
    type Warnings: FlagSet;

    /// Name for log provenance.
    fn name(&self) -> &'static str;

    fn check(&self, entity: &E, ctx: &CheckContext) -> Verdict<Self::Reasons, Self::Warnings>;
}

/// Boxed check list for one entity level, in declared execution order.
pub type CheckChain<E, R, W> = Vec<Box<dyn AutomationCheck<E, Reasons = R, Warnings = W>>>;

/// Run every check in declared order and aggregate the verdicts.
pub fn run_chain<E, R: FlagSet, W: FlagSet>(
    entity: &E,
    ctx: &CheckContext,
    chain: &CheckChain<E, R, W>,
) -> Verdict<R, W> {
    let mut aggregate = Verdict::pass();
    for check in chain {
        let verdict = check.check(entity, ctx);
        trace!(
            check = check.name(),
            passed = verdict.passed,
            reasons = ?verdict.reasons,
            "automation check evaluated"
        );
        aggregate.merge(verdict);
    }
    aggregate
}

// ============================================================================
// Tests
// ============================================================================
