//! Tournament-level automation checks.

use super::{AutomationCheck, CheckChain, CheckContext, Verdict, VERIFIED_CHILD_RATIO};
use crate::entities::{NoWarnings, Tournament, TournamentRejectionReason};

/// Declared execution order for tournament checks.
pub fn tournament_checks() -> CheckChain<Tournament, TournamentRejectionReason, NoWarnings> {
    vec![Box::new(TournamentMatchCountCheck)]
}

/// Threshold aggregate over the tournament's matches.
///
/// Zero valid matches is its own cause; otherwise the valid fraction must
/// meet [`VERIFIED_CHILD_RATIO`]. The tolerance is deliberate: a handful of
/// rejected matches should not sink an otherwise sound tournament.
pub struct TournamentMatchCountCheck;

impl AutomationCheck<Tournament> for TournamentMatchCountCheck {
    type Reasons = TournamentRejectionReason;
    type Warnings = NoWarnings;

    fn name(&self) -> &'static str {
        "TournamentMatchCountCheck"
    }

    fn check(
        &self,
        tournament: &Tournament,
        _: &CheckContext,
    ) -> Verdict<TournamentRejectionReason> {
        let valid = tournament
            .matches
            .iter()
            .filter(|m| m.verification_status.is_valid())
            .count();

        if valid == 0 {
            return Verdict::fail(TournamentRejectionReason::NO_VERIFIED_MATCHES);
        }

        match tournament.valid_match_fraction() {
            Some(fraction) if fraction >= VERIFIED_CHILD_RATIO => Verdict::pass(),
            _ => Verdict::fail(TournamentRejectionReason::NOT_ENOUGH_VERIFIED_MATCHES),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Match, Ruleset, VerificationStatus};

    fn tournament_with(valid: usize, invalid: usize) -> Tournament {
        let mut t = Tournament::new(1, "Spring Cup", Ruleset::Standard, Some(2));
        for i in 0..valid + invalid {
            let mut m = Match::new(i as i32, i as u64);
            m.verification_status = if i < valid {
                VerificationStatus::PreVerified
            } else {
                VerificationStatus::PreRejected
            };
            t.matches.push(m);
        }
        t
    }

    fn ctx() -> CheckContext {
        CheckContext {
            ruleset: Ruleset::Standard,
            lobby_size: Some(2),
        }
    }

    #[test]
    fn no_valid_matches_is_its_own_cause() {
        let verdict = TournamentMatchCountCheck.check(&tournament_with(0, 5), &ctx());
        assert!(!verdict.passed);
        assert_eq!(
            verdict.reasons,
            TournamentRejectionReason::NO_VERIFIED_MATCHES
        );
    }

    #[test]
    fn empty_tournament_has_no_valid_matches() {
        let verdict = TournamentMatchCountCheck.check(&tournament_with(0, 0), &ctx());
        assert_eq!(
            verdict.reasons,
            TournamentRejectionReason::NO_VERIFIED_MATCHES
        );
    }

    #[test]
    fn seven_of_ten_fails_the_threshold() {
        let verdict = TournamentMatchCountCheck.check(&tournament_with(7, 3), &ctx());
        assert!(!verdict.passed);
        assert_eq!(
            verdict.reasons,
            TournamentRejectionReason::NOT_ENOUGH_VERIFIED_MATCHES
        );
    }

    #[test]
    fn eight_of_ten_meets_the_threshold() {
        let verdict = TournamentMatchCountCheck.check(&tournament_with(8, 2), &ctx());
        assert!(verdict.passed);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn confirmed_verified_matches_also_count() {
        let mut t = tournament_with(8, 2);
        for m in t.matches.iter_mut().take(4) {
            m.verification_status = VerificationStatus::Verified;
        }
        assert!(TournamentMatchCountCheck.check(&t, &ctx()).passed);
    }
}
