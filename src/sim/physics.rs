//! Per-tick integration of every disc on the board
//!
//! Semi-implicit Euler with a fixed per-tick friction factor. Velocities are
//! in board units per tick, so there is no dt.

use glam::Vec2;

use super::collision::{resolve_pair, wall_bounce};
use super::store::PieceStore;
use crate::consts::*;

/// Advance all pieces by one tick.
///
/// Order: move and apply friction, resolve disc pairs, then walls so that
/// no disc ends the tick outside the board. Returns true while any piece
/// is still above rest speed; this is the only "shot in flight" signal.
pub fn step(store: &mut PieceStore) -> bool {
    let board = *store.board();
    let pieces = store.pieces_mut();

    for piece in pieces.iter_mut().filter(|p| p.is_active()) {
        piece.pos += piece.vel;
        piece.vel *= FRICTION;
        if piece.speed() < REST_SPEED {
            piece.vel = Vec2::ZERO;
        }
    }

    for i in 0..pieces.len() {
        let (head, tail) = pieces.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.is_active() {
            continue;
        }
        for b in tail.iter_mut().filter(|b| b.is_active()) {
            resolve_pair(a, b);
        }
    }

    for piece in pieces.iter_mut().filter(|p| p.is_active()) {
        wall_bounce(piece, &board);
    }

    pieces.iter().any(|p| p.is_moving())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Seats;
    use crate::sim::board::Board;
    use crate::sim::piece::PieceKind;
    use proptest::prelude::*;

    fn run_to_rest(store: &mut PieceStore, max_ticks: u32) -> u32 {
        let mut ticks = 0;
        while step(store) {
            ticks += 1;
            assert!(ticks < max_ticks, "pieces never settled");
        }
        ticks
    }

    #[test]
    fn test_resting_board_stays_at_rest() {
        let mut store = PieceStore::new(Board::default(), Seats::Two);
        store.spawn_striker(0, 0.5);
        let before: Vec<Vec2> = store.pieces().iter().map(|p| p.pos).collect();

        assert!(!step(&mut store));
        for (p, pos) in store.pieces().iter().zip(before) {
            assert!(p.pos.distance(pos) < 1e-3);
        }
    }

    #[test]
    fn test_friction_brings_striker_to_rest() {
        let mut store = PieceStore::new(Board::default(), Seats::Two);
        store.spawn_striker(0, 0.0);
        if let Some(s) = store.striker_mut() {
            s.vel = Vec2::new(5.0, 0.0);
        }
        let ticks = run_to_rest(&mut store, 2000);
        assert!(ticks > 10);
        let striker = store.striker().unwrap();
        assert_eq!(striker.vel, Vec2::ZERO);
        assert!(striker.pos.x > 100.0);
    }

    #[test]
    fn test_break_shot_scatters_rack() {
        let mut store = PieceStore::new(Board::default(), Seats::Two);
        store.spawn_striker(0, 0.5);
        if let Some(s) = store.striker_mut() {
            s.vel = Vec2::new(0.0, -MAX_SHOT_POWER);
        }
        let before: Vec<Vec2> = store.pieces().iter().map(|p| p.pos).collect();
        run_to_rest(&mut store, 5000);

        let moved = store
            .pieces()
            .iter()
            .zip(before)
            .filter(|(p, pos)| p.kind() != PieceKind::Striker && p.pos.distance(*pos) > 1.0)
            .count();
        assert!(moved > 0);

        let board = *store.board();
        for p in store.pieces().iter().filter(|p| p.is_active()) {
            let (lo, hi) = board.bounds_for(p.radius());
            assert!(p.pos.x >= lo && p.pos.x <= hi);
            assert!(p.pos.y >= lo && p.pos.y <= hi);
        }
    }

    #[test]
    fn test_pocketed_pieces_are_not_integrated() {
        let mut store = PieceStore::new(Board::default(), Seats::Two);
        let frozen = store.pieces()[3].pos;
        {
            let piece = &mut store.pieces_mut()[3];
            piece.pocket();
            piece.vel = Vec2::new(9.0, 9.0);
        }
        step(&mut store);
        assert_eq!(store.pieces()[3].pos, frozen);
    }

    #[test]
    fn test_friction_only_energy_decays() {
        let mut store = PieceStore::new(Board::default(), Seats::Two);
        store.spawn_striker(1, 0.5);
        if let Some(s) = store.striker_mut() {
            s.vel = Vec2::new(4.0, 0.0);
        }
        let mut energy = store.kinetic_energy();
        for _ in 0..50 {
            step(&mut store);
            let next = store.kinetic_energy();
            assert!(next <= energy);
            energy = next;
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_shots_never_escape_board(
            seat in 0usize..4,
            placement in 0.0f32..1.0,
            angle in 0.0f32..std::f32::consts::TAU,
            power in 1.0f32..30.0,
        ) {
            let mut store = PieceStore::new(Board::default(), Seats::Four);
            store.spawn_striker(seat, placement);
            if let Some(s) = store.striker_mut() {
                s.vel = crate::polar_to_cartesian(power, angle);
            }

            let board = *store.board();
            let mut ticks = 0;
            loop {
                let moving = step(&mut store);
                for p in store.pieces().iter().filter(|p| p.is_active()) {
                    let (lo, hi) = board.bounds_for(p.radius());
                    prop_assert!(p.pos.x >= lo && p.pos.x <= hi);
                    prop_assert!(p.pos.y >= lo && p.pos.y <= hi);
                }
                if !moving {
                    break;
                }
                ticks += 1;
                prop_assert!(ticks < 20_000);
            }
        }

        #[test]
        fn prop_lone_disc_energy_never_grows(
            x in 100.0f32..700.0, y in 100.0f32..700.0,
            vx in -30.0f32..30.0, vy in -30.0f32..30.0,
        ) {
            let mut store = PieceStore::new(Board::default(), Seats::Two);
            store.pieces_mut().iter_mut().for_each(|p| p.pocket());
            store.spawn_striker(0, 0.5);
            if let Some(s) = store.striker_mut() {
                s.pos = Vec2::new(x, y);
                s.vel = Vec2::new(vx, vy);
            }
            let mut energy = store.kinetic_energy();
            for _ in 0..200 {
                step(&mut store);
                let next = store.kinetic_energy();
                prop_assert!(next <= energy + 1e-4);
                energy = next;
            }
        }
    }
}
