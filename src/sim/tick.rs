//! Fixed-step simulation tick
//!
//! One call per animation frame. Physics only runs while a shot is in
//! flight; the rules are applied exactly once, on the tick everything
//! comes to rest.

use glam::Vec2;

use super::rules::Phase;
use super::state::{MatchEvent, MatchState};
use super::{physics, pocket};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New striker placement along the baseline, 0..1
    pub placement: Option<f32>,
    /// Striker velocity to fire with
    pub shot: Option<Vec2>,
}

/// Advance the match by one tick. Returns true while the shot is still
/// settling.
pub fn tick(state: &mut MatchState, input: &TickInput) -> bool {
    if let Some(placement) = input.placement {
        state.set_striker_placement(placement);
    }
    if let Some(shot) = input.shot {
        state.submit_shot(shot);
    }

    match state.phase {
        Phase::Aiming | Phase::GameOver => return false,
        Phase::Shooting => state.phase = Phase::Settling,
        Phase::Settling => {}
    }

    state.time_ticks += 1;

    let moving = physics::step(&mut state.store);
    for (id, kind) in pocket::detect(&mut state.store) {
        log::debug!("Pocketed {kind:?} #{id}");
        state.push_event(MatchEvent::Pocketed { id, kind });
    }

    if moving {
        return true;
    }

    state.settle();
    false
}
