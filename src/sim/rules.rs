//! Turn rules applied once a shot has settled
//!
//! Resolution order:
//! 1. Striker pocketed: foul, the turn passes no matter what else dropped.
//! 2. Own color pocketed: the same seat shoots again.
//! 3. Queen pocketed: the seat shoots again and owes a cover.
//! 4. A pending queen is covered by any own-color pocket in the same or a
//!    later shot; if the turn passes without a cover the queen goes back
//!    to the center.
//! 5. Otherwise the turn passes.
//!
//! A color reaching nine pocketed coins ends the match regardless of the
//! above.

use serde::{Deserialize, Serialize};

use super::piece::{CoinColor, PieceKind};
use super::store::PocketCounts;
use crate::consts::COINS_PER_COLOR;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing moving, waiting for striker placement and a shot
    Aiming,
    /// Shot submitted, striker velocity set; becomes Settling next tick
    Shooting,
    /// Pieces in motion
    Settling,
    /// A color has been cleared
    GameOver,
}

/// What happens to the turn after a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDecision {
    /// Same seat shoots again
    ContinueTurn,
    /// Next seat shoots
    AdvanceTurn,
    /// Match over, this color won
    GameOver(CoinColor),
}

/// Queen status change caused by a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueenOutcome {
    Untouched,
    /// Pocketed this shot; a cover is now owed
    Pocketed,
    /// Capture confirmed by an own-color pocket
    Covered,
    /// Capture voided; the queen must go back to the center
    Returned,
}

/// Everything the rules need to know about a settled shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSummary {
    /// Counts captured when the shot was taken
    pub before: PocketCounts,
    /// Counts once everything came to rest
    pub after: PocketCounts,
    pub striker_pocketed: bool,
    /// Color of the seat that shot
    pub shooter: CoinColor,
    /// Whether a cover was owed going into the shot
    pub queen_pending: bool,
}

impl ShotSummary {
    fn gained(&self, kind: PieceKind) -> u32 {
        self.after.of(kind).saturating_sub(self.before.of(kind))
    }
}

/// Result of applying the rules to a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotOutcome {
    pub decision: TurnDecision,
    pub foul: bool,
    pub queen: QueenOutcome,
    /// Whether a cover is owed after this shot
    pub queen_pending: bool,
    /// Own-color coins pocketed this shot
    pub own_pocketed: u32,
}

/// Apply the turn rules to a settled shot
pub fn resolve(shot: &ShotSummary) -> ShotOutcome {
    let foul = shot.striker_pocketed;
    let own_pocketed = shot.gained(PieceKind::from(shot.shooter));
    let own_gain = own_pocketed > 0;
    let queen_new = shot.gained(PieceKind::Queen) > 0;

    let (continue_turn, queen) = if foul {
        // A foul can't cover; any capture still owed is voided
        let queen = if queen_new || shot.queen_pending {
            QueenOutcome::Returned
        } else {
            QueenOutcome::Untouched
        };
        (false, queen)
    } else {
        let queen = match (queen_new, shot.queen_pending, own_gain) {
            (true, _, true) => QueenOutcome::Covered,
            (true, _, false) => QueenOutcome::Pocketed,
            (false, true, true) => QueenOutcome::Covered,
            (false, true, false) => QueenOutcome::Returned,
            (false, false, _) => QueenOutcome::Untouched,
        };
        (own_gain || queen_new, queen)
    };

    let decision = match winner(&shot.after, shot.shooter) {
        Some(color) => TurnDecision::GameOver(color),
        None if continue_turn => TurnDecision::ContinueTurn,
        None => TurnDecision::AdvanceTurn,
    };

    ShotOutcome {
        decision,
        foul,
        queen,
        queen_pending: queen == QueenOutcome::Pocketed,
        own_pocketed,
    }
}

/// Color that has cleared all its coins, the shooter's first if both have
pub fn winner(counts: &PocketCounts, shooter: CoinColor) -> Option<CoinColor> {
    [shooter, shooter.opponent()]
        .into_iter()
        .find(|&color| counts.of(PieceKind::from(color)) >= COINS_PER_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(white: u32, black: u32, queen: u32) -> PocketCounts {
        PocketCounts { white, black, queen }
    }

    fn shot(before: PocketCounts, after: PocketCounts, shooter: CoinColor) -> ShotSummary {
        ShotSummary {
            before,
            after,
            striker_pocketed: false,
            shooter,
            queen_pending: false,
        }
    }

    #[test]
    fn test_own_color_continues() {
        let outcome = resolve(&shot(counts(1, 2, 0), counts(3, 2, 0), CoinColor::White));
        assert_eq!(outcome.decision, TurnDecision::ContinueTurn);
        assert_eq!(outcome.own_pocketed, 2);
        assert!(!outcome.foul);
        assert_eq!(outcome.queen, QueenOutcome::Untouched);
    }

    #[test]
    fn test_opponent_color_only_advances() {
        let outcome = resolve(&shot(counts(0, 0, 0), counts(0, 1, 0), CoinColor::White));
        assert_eq!(outcome.decision, TurnDecision::AdvanceTurn);
        assert_eq!(outcome.own_pocketed, 0);
    }

    #[test]
    fn test_empty_shot_advances() {
        let outcome = resolve(&shot(counts(4, 4, 0), counts(4, 4, 0), CoinColor::Black));
        assert_eq!(outcome.decision, TurnDecision::AdvanceTurn);
    }

    #[test]
    fn test_foul_beats_own_pocket() {
        let mut summary = shot(counts(0, 0, 0), counts(2, 0, 0), CoinColor::White);
        summary.striker_pocketed = true;
        let outcome = resolve(&summary);
        assert!(outcome.foul);
        assert_eq!(outcome.decision, TurnDecision::AdvanceTurn);
    }

    #[test]
    fn test_queen_pocket_owes_cover() {
        let outcome = resolve(&shot(counts(0, 0, 0), counts(0, 0, 1), CoinColor::Black));
        assert_eq!(outcome.decision, TurnDecision::ContinueTurn);
        assert_eq!(outcome.queen, QueenOutcome::Pocketed);
        assert!(outcome.queen_pending);
    }

    #[test]
    fn test_queen_and_own_coin_cover_at_once() {
        let outcome = resolve(&shot(counts(0, 0, 0), counts(0, 1, 1), CoinColor::Black));
        assert_eq!(outcome.decision, TurnDecision::ContinueTurn);
        assert_eq!(outcome.queen, QueenOutcome::Covered);
        assert!(!outcome.queen_pending);
    }

    #[test]
    fn test_pending_queen_covered_next_shot() {
        let mut summary = shot(counts(0, 0, 1), counts(1, 0, 1), CoinColor::White);
        summary.queen_pending = true;
        let outcome = resolve(&summary);
        assert_eq!(outcome.queen, QueenOutcome::Covered);
        assert_eq!(outcome.decision, TurnDecision::ContinueTurn);
        assert!(!outcome.queen_pending);
    }

    #[test]
    fn test_pending_queen_returned_on_miss() {
        let mut summary = shot(counts(0, 0, 1), counts(0, 0, 1), CoinColor::Black);
        summary.queen_pending = true;
        let outcome = resolve(&summary);
        assert_eq!(outcome.queen, QueenOutcome::Returned);
        assert_eq!(outcome.decision, TurnDecision::AdvanceTurn);
        assert!(!outcome.queen_pending);
    }

    #[test]
    fn test_foul_voids_queen() {
        let mut summary = shot(counts(0, 0, 0), counts(0, 1, 1), CoinColor::Black);
        summary.striker_pocketed = true;
        let outcome = resolve(&summary);
        assert_eq!(outcome.queen, QueenOutcome::Returned);
        assert_eq!(outcome.decision, TurnDecision::AdvanceTurn);

        let mut summary = shot(counts(0, 0, 1), counts(0, 1, 1), CoinColor::Black);
        summary.striker_pocketed = true;
        summary.queen_pending = true;
        assert_eq!(resolve(&summary).queen, QueenOutcome::Returned);
    }

    #[test]
    fn test_ninth_coin_wins_even_with_opponent_at_eight() {
        let outcome = resolve(&shot(counts(8, 8, 0), counts(9, 8, 0), CoinColor::White));
        assert_eq!(outcome.decision, TurnDecision::GameOver(CoinColor::White));
    }

    #[test]
    fn test_clearing_opponent_color_ends_match() {
        let outcome = resolve(&shot(counts(3, 8, 0), counts(3, 9, 0), CoinColor::White));
        assert_eq!(outcome.decision, TurnDecision::GameOver(CoinColor::Black));
    }

    #[test]
    fn test_game_over_ignores_foul() {
        let mut summary = shot(counts(8, 0, 0), counts(9, 0, 0), CoinColor::White);
        summary.striker_pocketed = true;
        let outcome = resolve(&summary);
        assert!(outcome.foul);
        assert_eq!(outcome.decision, TurnDecision::GameOver(CoinColor::White));
    }

    #[test]
    fn test_winner_prefers_shooter_on_tie() {
        assert_eq!(winner(&counts(9, 9, 0), CoinColor::Black), Some(CoinColor::Black));
        assert_eq!(winner(&counts(8, 8, 1), CoinColor::Black), None);
    }
}
