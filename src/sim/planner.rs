//! Computer-controlled shots
//!
//! Aims the striker straight at a target: the queen while it is on the
//! board, otherwise a random coin of the shooter's color. Difficulty sets
//! the power range and how far the aim may wobble.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::piece::{Piece, PieceKind};
use super::state::MatchState;
use crate::settings::Difficulty;

/// Scale applied to the striker-to-center vector when nothing is left to aim at
const FALLBACK_SCALE: f32 = 0.05;

/// Plans shots for computer seats
#[derive(Debug, Clone)]
pub struct ShotPlanner {
    difficulty: Difficulty,
    rng: Pcg32,
}

impl ShotPlanner {
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pick the piece to aim at, if any
    fn choose_target<'a>(&mut self, state: &'a MatchState) -> Option<&'a Piece> {
        let own = PieceKind::from(state.shooter_color());
        let candidates: Vec<&Piece> = state
            .store
            .pieces()
            .iter()
            .filter(|p| p.is_active() && (p.kind() == own || p.kind() == PieceKind::Queen))
            .collect();

        if let Some(queen) = candidates.iter().find(|p| p.kind() == PieceKind::Queen) {
            return Some(*queen);
        }
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..candidates.len());
        Some(candidates[index])
    }

    /// Striker velocity for the active seat's shot
    pub fn plan(&mut self, state: &MatchState) -> Vec2 {
        let origin = match state.store.striker() {
            Some(striker) => striker.pos,
            None => state
                .store
                .board()
                .baseline(state.config.seats, state.active_seat)
                .point_at(state.placement),
        };
        let center = state.store.board().center();

        let direction = self
            .choose_target(state)
            .map(|target| (target.pos - origin).normalize_or_zero())
            .filter(|dir| *dir != Vec2::ZERO);

        let Some(direction) = direction else {
            log::debug!("No target for seat {}, shooting at center", state.active_seat);
            return (center - origin) * FALLBACK_SCALE;
        };

        let jitter = self.difficulty.aim_jitter();
        let wobble = self.rng.random_range(-jitter..=jitter);
        let (lo, hi) = self.difficulty.power_range();
        let power = self.rng.random_range(lo..=hi);

        Vec2::from_angle(wobble).rotate(direction) * power
    }

    /// Plan and fire in one go. Returns whether the shot was accepted.
    pub fn take_shot(&mut self, state: &mut MatchState) -> bool {
        let velocity = self.plan(state);
        log::debug!(
            "Computer ({}) shoots for seat {}: {:.1} at {:.2} rad",
            self.difficulty.as_str(),
            state.active_seat,
            velocity.length(),
            velocity.y.atan2(velocity.x)
        );
        state.submit_shot(velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MatchConfig;
    use crate::sim::rules::Phase;

    fn state() -> MatchState {
        MatchState::new(MatchConfig::default())
    }

    fn angle_between(a: Vec2, b: Vec2) -> f32 {
        a.normalize().dot(b.normalize()).clamp(-1.0, 1.0).acos()
    }

    #[test]
    fn test_prefers_queen() {
        let state = state();
        let mut planner = ShotPlanner::new(7, Difficulty::Hard);
        let shot = planner.plan(&state);
        let striker = state.store.striker().unwrap().pos;
        let to_queen = state.store.queen().unwrap().pos - striker;
        assert!(angle_between(shot, to_queen) <= Difficulty::Hard.aim_jitter() + 1e-4);
        let (lo, hi) = Difficulty::Hard.power_range();
        assert!(shot.length() >= lo - 1e-3 && shot.length() <= hi + 1e-3);
    }

    #[test]
    fn test_targets_own_color_without_queen() {
        let mut state = state();
        for p in state.store.pieces_mut() {
            if p.kind() == PieceKind::Queen {
                p.pocket();
            }
        }
        let striker = state.store.striker().unwrap().pos;
        let own: Vec<Vec2> = state
            .store
            .pieces()
            .iter()
            .filter(|p| p.kind() == PieceKind::White)
            .map(|p| p.pos)
            .collect();

        let mut planner = ShotPlanner::new(3, Difficulty::Easy);
        for _ in 0..20 {
            let shot = planner.plan(&state);
            let hits_own = own
                .iter()
                .any(|&pos| angle_between(shot, pos - striker) <= Difficulty::Easy.aim_jitter() + 1e-4);
            assert!(hits_own);
        }
    }

    #[test]
    fn test_falls_back_to_center() {
        let mut state = state();
        for p in state.store.pieces_mut() {
            if p.kind() != PieceKind::Striker {
                p.pocket();
            }
        }
        let mut planner = ShotPlanner::new(1, Difficulty::Medium);
        let shot = planner.plan(&state);
        // Striker at (400, 700): straight up, 300 * 0.05
        assert!((shot - Vec2::new(0.0, -15.0)).length() < 1e-4);
    }

    #[test]
    fn test_same_seed_same_shot() {
        let state = state();
        let mut a = ShotPlanner::new(99, Difficulty::Easy);
        let mut b = ShotPlanner::new(99, Difficulty::Easy);
        for _ in 0..5 {
            assert_eq!(a.plan(&state), b.plan(&state));
        }
    }

    #[test]
    fn test_take_shot_starts_shot() {
        let mut state = state();
        let mut planner = ShotPlanner::new(5, Difficulty::Medium);
        assert!(planner.take_shot(&mut state));
        assert_eq!(state.phase, Phase::Shooting);
        assert!(state.shot_start.is_some());
    }
}
